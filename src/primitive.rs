use eframe::egui;
use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape as _, Size};
use thiserror::Error;

use crate::color::{self, BLACK, TRANSPARENT};

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("invalid path data {data:?}: {source}")]
    InvalidPathData {
        data: String,
        #[source]
        source: kurbo::SvgParseError,
    },
}

// ── Paint ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub stroke_rgba: u32,
    pub fill_rgba: u32,
    pub line_width: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            stroke_rgba: BLACK,
            fill_rgba: TRANSPARENT,
            line_width: 2.0,
        }
    }
}

// ── Primitive ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum Geometry {
    Rect,
    /// Path in its own coordinates; drawn scaled into the primitive bounds.
    Path(BezPath),
}

/// A flattened run of points in canvas coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Drawn item of a shape. Its bounds are written by the owning shape and
/// are never negative.
#[derive(Clone, Debug)]
pub struct Primitive {
    geometry: Geometry,
    bounds: Rect,
    paint: Paint,
}

impl Primitive {
    pub fn rect() -> Self {
        Self::with_geometry(Geometry::Rect)
    }

    pub fn path(path: BezPath) -> Self {
        Self::with_geometry(Geometry::Path(path))
    }

    /// Parse SVG path data, e.g. `"M100,300 C50,160 440,300 340,50"`.
    pub fn from_svg(data: &str) -> Result<Self, ShapeError> {
        let path = BezPath::from_svg(data).map_err(|source| ShapeError::InvalidPathData {
            data: data.to_string(),
            source,
        })?;
        Ok(Self::path(path))
    }

    fn with_geometry(geometry: Geometry) -> Self {
        Self {
            geometry,
            bounds: Rect::ZERO,
            paint: Paint::default(),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn set_bounds(&mut self, origin: Point, size: Size) {
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        self.bounds = Rect::from_origin_size(origin, size);
    }

    pub fn set_stroke_rgba(&mut self, rgba: u32) {
        self.paint.stroke_rgba = rgba;
    }

    pub fn set_fill_rgba(&mut self, rgba: u32) {
        self.paint.fill_rgba = rgba;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.paint.line_width = width;
    }

    /// Map from the path's natural bounding box onto `self.bounds`.
    fn fit_transform(&self, natural: Rect) -> Affine {
        let scale = |target: f64, source: f64| if source > 0.0 { target / source } else { 1.0 };
        let sx = scale(self.bounds.width(), natural.width());
        let sy = scale(self.bounds.height(), natural.height());
        Affine::translate(self.bounds.origin().to_vec2())
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate(-natural.origin().to_vec2())
    }

    /// Geometry flattened to line segments, in canvas coordinates.
    pub fn outline(&self, tolerance: f64) -> Vec<Polyline> {
        match &self.geometry {
            Geometry::Rect => {
                let r = self.bounds;
                vec![Polyline {
                    points: vec![
                        Point::new(r.x0, r.y0),
                        Point::new(r.x1, r.y0),
                        Point::new(r.x1, r.y1),
                        Point::new(r.x0, r.y1),
                    ],
                    closed: true,
                }]
            }
            Geometry::Path(path) => {
                let affine = self.fit_transform(path.bounding_box());
                let mut lines: Vec<Polyline> = Vec::new();
                kurbo::flatten(path.iter().map(|el| affine * el), tolerance, |el| match el {
                    PathEl::MoveTo(p) => lines.push(Polyline {
                        points: vec![p],
                        closed: false,
                    }),
                    PathEl::LineTo(p) => {
                        if let Some(line) = lines.last_mut() {
                            line.points.push(p);
                        }
                    }
                    PathEl::ClosePath => {
                        if let Some(line) = lines.last_mut() {
                            if line.points.len() > 1 && line.points.first() == line.points.last() {
                                line.points.pop();
                            }
                            line.closed = true;
                        }
                    }
                    // flatten only emits moves, lines and closes
                    _ => {}
                });
                lines
            }
        }
    }

    pub fn paint_into(&self, painter: &egui::Painter, origin: egui::Vec2) {
        let fill = color::to_color32(self.paint.fill_rgba);
        let stroke = egui::Stroke::new(
            self.paint.line_width as f32,
            color::to_color32(self.paint.stroke_rgba),
        );
        let to_screen = |p: &Point| egui::pos2(p.x as f32, p.y as f32) + origin;

        match &self.geometry {
            Geometry::Rect => {
                let r = self.bounds;
                let rect = egui::Rect::from_min_max(
                    to_screen(&Point::new(r.x0, r.y0)),
                    to_screen(&Point::new(r.x1, r.y1)),
                );
                painter.rect_filled(rect, 0.0, fill);
                painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
            }
            Geometry::Path(_) => {
                for line in self.outline(0.25) {
                    let points: Vec<egui::Pos2> = line.points.iter().map(to_screen).collect();
                    if line.closed {
                        // egui only tessellates convex fills
                        if fill.a() > 0 {
                            painter.add(egui::Shape::convex_polygon(
                                points.clone(),
                                fill,
                                egui::Stroke::NONE,
                            ));
                        }
                        painter.add(egui::Shape::closed_line(points, stroke));
                    } else {
                        painter.add(egui::Shape::line(points, stroke));
                    }
                }
            }
        }
    }
}
