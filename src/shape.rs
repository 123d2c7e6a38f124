use eframe::egui;
use kurbo::{BezPath, Ellipse, Point, Rect, Shape as _, Size};

use crate::handle::{Handle, HandleRole, PointerEvent};
use crate::primitive::{Primitive, ShapeError};
use crate::settings::ToolSettings;

// ── Shape Kinds ─────────────────────────────────────────────────────────────

pub const SPLINE_PATH_DATA: &str = "M100,300 C50,160 440,300 340,50";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Spline,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Spline,
        ShapeKind::Triangle,
    ];

    pub fn caption(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Spline => "Spline",
            ShapeKind::Triangle => "Triangle",
        }
    }

    /// Initial `(x, y, width, height)` of a freshly created shape.
    fn placement(self) -> (f64, f64, f64, f64) {
        match self {
            ShapeKind::Spline => (100.0, 50.0, 240.0, 250.0),
            _ => (100.0, 100.0, 100.0, 100.0),
        }
    }

    pub(crate) fn primitive(self) -> Result<Primitive, ShapeError> {
        Ok(match self {
            ShapeKind::Rectangle => Primitive::rect(),
            ShapeKind::Ellipse => {
                Primitive::path(Ellipse::from_rect(Rect::new(0.0, 0.0, 1.0, 1.0)).to_path(1e-4))
            }
            ShapeKind::Triangle => {
                let mut path = BezPath::new();
                path.move_to((0.0, 1.0));
                path.line_to((0.5, 0.0));
                path.line_to((1.0, 1.0));
                path.close_path();
                Primitive::path(path)
            }
            ShapeKind::Spline => Primitive::from_svg(SPLINE_PATH_DATA)?,
        })
    }

    pub fn is_filled(self) -> bool {
        self != ShapeKind::Spline
    }
}

// ── Bounded Shape ───────────────────────────────────────────────────────────

/// A primitive framed by two corners, edited through a move handle on the
/// top-left corner and a resize handle on the bottom-right one.
#[derive(Clone, Debug)]
pub struct BoundedShape {
    kind: Option<ShapeKind>,
    top_left: Point,
    bottom_right: Point,
    move_handle: Handle,
    resize_handle: Handle,
    primitive: Primitive,
}

impl BoundedShape {
    pub fn new(primitive: Primitive, x: f64, y: f64, width: f64, height: f64) -> Self {
        let top_left = Point::new(x, y);
        let bottom_right = Point::new(x + width, y + height);
        let mut shape = Self {
            kind: None,
            top_left,
            bottom_right,
            move_handle: Handle::new(top_left),
            resize_handle: Handle::new(bottom_right),
            primitive,
        };
        shape.sync_primitive();
        shape
    }

    pub fn from_kind(kind: ShapeKind) -> Result<Self, ShapeError> {
        let (x, y, w, h) = kind.placement();
        let mut shape = Self::new(kind.primitive()?, x, y, w, h);
        shape.kind = Some(kind);
        Ok(shape)
    }

    pub fn kind(&self) -> Option<ShapeKind> {
        self.kind
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn handle(&self, role: HandleRole) -> &Handle {
        match role {
            HandleRole::Move => &self.move_handle,
            HandleRole::Resize => &self.resize_handle,
        }
    }

    fn handle_mut(&mut self, role: HandleRole) -> &mut Handle {
        match role {
            HandleRole::Move => &mut self.move_handle,
            HandleRole::Resize => &mut self.resize_handle,
        }
    }

    /// Displayed size; zero on an axis where the corners have crossed.
    pub fn size(&self) -> Size {
        let d = self.bottom_right - self.top_left;
        Size::new(d.x.max(0.0), d.y.max(0.0))
    }

    fn sync_primitive(&mut self) {
        let size = self.size();
        self.primitive.set_bounds(self.top_left, size);
    }

    /// Translate both corners so the top-left lands on `new_center`.
    pub fn on_move(&mut self, new_center: Point) {
        let delta = new_center - self.top_left;
        self.top_left = new_center;
        self.bottom_right += delta;
        self.resize_handle.move_to(self.bottom_right);
        self.sync_primitive();
    }

    pub fn on_resize(&mut self, new_center: Point) {
        self.bottom_right = new_center;
        self.sync_primitive();
    }

    pub fn handle_event(&mut self, role: HandleRole, event: PointerEvent) -> bool {
        let Some(center) = self.handle_mut(role).handle_event(event) else {
            return false;
        };
        match role {
            HandleRole::Move => self.on_move(center),
            HandleRole::Resize => self.on_resize(center),
        }
        true
    }

    /// The resize handle sits above the move handle, so it wins overlaps.
    pub fn handle_at(&self, point: Point) -> Option<HandleRole> {
        [HandleRole::Resize, HandleRole::Move]
            .into_iter()
            .find(|role| self.handle(*role).contains(point))
    }

    pub fn set_stroke_rgba(&mut self, rgba: u32) {
        self.primitive.set_stroke_rgba(rgba);
    }

    pub fn set_fill_rgba(&mut self, rgba: u32) {
        self.primitive.set_fill_rgba(rgba);
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.primitive.set_line_width(width);
    }

    pub fn apply_settings(&mut self, settings: &ToolSettings) {
        self.set_stroke_rgba(settings.stroke_color_rgba);
        self.set_line_width(settings.line_width);
        if self.kind.map_or(true, ShapeKind::is_filled) {
            self.set_fill_rgba(settings.fill_color_rgba);
        }
    }

    pub fn paint(&self, painter: &egui::Painter, origin: egui::Vec2) {
        self.primitive.paint_into(painter, origin);
        self.move_handle.paint(painter, origin);
        self.resize_handle.paint(painter, origin);
    }
}
