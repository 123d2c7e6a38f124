use std::path::Path;

use eframe::egui;
use image::RgbaImage;
use kurbo::{Line, ParamCurve, ParamCurveArclen, Point, Size};
use log::{debug, warn};

use crate::primitive::Polyline;
use crate::shape::ShapeKind;

pub const ICON_SIZE: u32 = 24;
const ICON_INK: [u8; 4] = [40, 40, 40, 255];

/// A clickable entry of the toolbar's shape row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolButton {
    Shape(ShapeKind),
    Clear,
}

impl ToolButton {
    pub fn all() -> Vec<ToolButton> {
        ShapeKind::ALL
            .into_iter()
            .map(ToolButton::Shape)
            .chain(std::iter::once(ToolButton::Clear))
            .collect()
    }

    pub fn caption(self) -> &'static str {
        match self {
            ToolButton::Shape(kind) => kind.caption(),
            ToolButton::Clear => "Clear",
        }
    }

    /// File stem looked up in the icon directory.
    pub fn icon_name(self) -> &'static str {
        match self {
            ToolButton::Shape(ShapeKind::Rectangle) => "icon_rect",
            ToolButton::Shape(ShapeKind::Ellipse) => "icon_ellipse",
            ToolButton::Shape(ShapeKind::Spline) => "icon_spline",
            ToolButton::Shape(ShapeKind::Triangle) => "icon_triangle",
            ToolButton::Clear => "clear",
        }
    }
}

// ── Icon Images ─────────────────────────────────────────────────────────────

pub fn load_icon(path: &Path) -> Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Icon drawn in code, used when no icon file is available.
pub fn builtin_icon(button: ToolButton) -> RgbaImage {
    let mut img = RgbaImage::new(ICON_SIZE, ICON_SIZE);
    let lo = 4.0;
    let hi = f64::from(ICON_SIZE) - 4.0;

    match button {
        ToolButton::Shape(kind) => match kind.primitive() {
            Ok(mut primitive) => {
                primitive.set_bounds(Point::new(lo, lo), Size::new(hi - lo, hi - lo));
                for line in primitive.outline(0.5) {
                    stamp_polyline(&mut img, &line, 2.0, ICON_INK);
                }
            }
            Err(err) => warn!("No built-in icon for {kind:?}: {err}"),
        },
        ToolButton::Clear => {
            for (a, b) in [((lo, lo), (hi, hi)), ((lo, hi), (hi, lo))] {
                let cross = Polyline {
                    points: vec![a.into(), b.into()],
                    closed: false,
                };
                stamp_polyline(&mut img, &cross, 2.0, ICON_INK);
            }
        }
    }
    img
}

/// Stamp a square pen of side `thickness` along every segment of `line`,
/// including the closing segment of a closed polyline.
fn stamp_polyline(img: &mut RgbaImage, line: &Polyline, thickness: f64, color: [u8; 4]) {
    let closing = line
        .closed
        .then(|| line.points.last().zip(line.points.first()))
        .flatten();
    let segments = line
        .points
        .windows(2)
        .map(|pair| Line::new(pair[0], pair[1]))
        .chain(closing.map(|(last, first)| Line::new(*last, *first)));

    let half = (thickness / 2.0).max(0.5) as i64;
    let (w, h) = (img.width() as i64, img.height() as i64);
    for segment in segments {
        // two samples per pixel of length keeps the stamps overlapping
        let steps = (segment.arclen(0.1) * 2.0).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let p = segment.eval(f64::from(i) / f64::from(steps));
            let (cx, cy) = (p.x.round() as i64, p.y.round() as i64);
            for py in (cy - half).max(0)..=(cy + half).min(h - 1) {
                for px in (cx - half).max(0)..=(cx + half).min(w - 1) {
                    img.put_pixel(px as u32, py as u32, image::Rgba(color));
                }
            }
        }
    }
}

// ── Textures ────────────────────────────────────────────────────────────────

pub struct ToolIcons {
    textures: Vec<(ToolButton, egui::TextureHandle)>,
}

impl ToolIcons {
    /// Load `<dir>/<icon_name>.png` for every button, falling back to the
    /// built-in drawing.
    pub fn load(ctx: &egui::Context, dir: &Path) -> Self {
        let textures = ToolButton::all()
            .into_iter()
            .map(|button| {
                let path = dir.join(format!("{}.png", button.icon_name()));
                let rgba = if path.exists() {
                    load_icon(&path).unwrap_or_else(|err| {
                        warn!("Failed to load icon {}: {err}", path.display());
                        builtin_icon(button)
                    })
                } else {
                    debug!("No icon at {}, using built-in", path.display());
                    builtin_icon(button)
                };
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.as_flat_samples();
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
                let texture =
                    ctx.load_texture(button.icon_name(), color_image, egui::TextureOptions::LINEAR);
                (button, texture)
            })
            .collect();
        Self { textures }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ToolButton, egui::TextureHandle)> {
        self.textures.iter()
    }
}
