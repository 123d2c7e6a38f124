use eframe::egui;
use kurbo::{Point, Rect, Size};

use crate::color::{self, BLACK};

// ── Pointer Events ──────────────────────────────────────────────────────────

/// Pointer events in canvas coordinates, dispatched synchronously from the UI
/// thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
}

/// Which corner operation of the owning shape a handle drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleRole {
    /// Top-left handle, translates the whole shape.
    Move,
    /// Bottom-right handle, moves only the bottom-right corner.
    Resize,
}

// ── Handle ──────────────────────────────────────────────────────────────────

pub const HANDLE_SIZE: f64 = 12.0;
pub const HANDLE_FILL: u32 = 0xffff_0080;
pub const HANDLE_STROKE: u32 = BLACK;

/// Small square marker that can be dragged with the primary button.
///
/// While dragging, every motion reports the handle's new center to the caller
/// so the owner can update itself.
#[derive(Clone, Debug)]
pub struct Handle {
    center: Point,
    /// Last pointer position of the current drag. `None` outside a drag.
    anchor: Option<Point>,
}

impl Handle {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            anchor: None,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Reposition the handle without reporting anything.
    pub fn move_to(&mut self, center: Point) {
        self.center = center;
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, Size::new(HANDLE_SIZE, HANDLE_SIZE))
    }

    pub fn contains(&self, point: Point) -> bool {
        let r = self.rect();
        (r.x0..=r.x1).contains(&point.x) && (r.y0..=r.y1).contains(&point.y)
    }

    pub fn press(&mut self, pos: Point) {
        self.anchor = Some(pos);
    }

    /// Follow the pointer by the distance travelled since the previous event.
    /// Returns the new center, or `None` when no drag is in progress.
    pub fn drag_to(&mut self, pos: Point) -> Option<Point> {
        let anchor = self.anchor?;
        self.center += pos - anchor;
        self.anchor = Some(pos);
        Some(self.center)
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }

    pub fn handle_event(&mut self, event: PointerEvent) -> Option<Point> {
        match event {
            PointerEvent::Press(pos) => {
                self.press(pos);
                None
            }
            PointerEvent::Move(pos) => self.drag_to(pos),
            PointerEvent::Release(_) => {
                self.release();
                None
            }
        }
    }

    pub fn paint(&self, painter: &egui::Painter, origin: egui::Vec2) {
        let r = self.rect();
        let rect = egui::Rect::from_min_max(
            egui::pos2(r.x0 as f32, r.y0 as f32) + origin,
            egui::pos2(r.x1 as f32, r.y1 as f32) + origin,
        );
        painter.rect_filled(rect, 0.0, color::to_color32(HANDLE_FILL));
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.0, color::to_color32(HANDLE_STROKE)),
            egui::StrokeKind::Middle,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_without_press_is_ignored() {
        let mut h = Handle::new(Point::new(10.0, 10.0));
        assert_eq!(h.handle_event(PointerEvent::Move(Point::new(50.0, 60.0))), None);
        assert_eq!(h.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn drag_follows_pointer_incrementally() {
        let mut h = Handle::new(Point::new(10.0, 10.0));
        h.handle_event(PointerEvent::Press(Point::new(12.0, 8.0)));
        assert!(h.is_dragging());

        let c = h.handle_event(PointerEvent::Move(Point::new(15.0, 10.0)));
        assert_eq!(c, Some(Point::new(13.0, 12.0)));

        let c = h.handle_event(PointerEvent::Move(Point::new(20.0, 10.0)));
        assert_eq!(c, Some(Point::new(18.0, 12.0)));
        assert_eq!(h.center(), Point::new(18.0, 12.0));
    }

    #[test]
    fn release_ends_the_drag() {
        let mut h = Handle::new(Point::ZERO);
        h.handle_event(PointerEvent::Press(Point::ZERO));
        h.handle_event(PointerEvent::Move(Point::new(5.0, 5.0)));
        h.handle_event(PointerEvent::Release(Point::new(5.0, 5.0)));
        assert!(!h.is_dragging());

        assert_eq!(h.handle_event(PointerEvent::Move(Point::new(40.0, 40.0))), None);
        assert_eq!(h.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn hit_area_is_centered_square() {
        let h = Handle::new(Point::new(100.0, 100.0));
        assert!(h.contains(Point::new(94.0, 106.0)));
        assert!(h.contains(Point::new(100.0, 100.0)));
        assert!(!h.contains(Point::new(93.0, 100.0)));
        assert!(!h.contains(Point::new(100.0, 107.0)));
    }

    #[test]
    fn move_to_does_not_start_a_drag() {
        let mut h = Handle::new(Point::ZERO);
        h.move_to(Point::new(3.0, 4.0));
        assert_eq!(h.center(), Point::new(3.0, 4.0));
        assert!(!h.is_dragging());
    }
}
