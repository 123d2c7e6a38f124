use eframe::egui;
use log::debug;

use crate::handle::{HandleRole, PointerEvent};
use crate::shape::BoundedShape;

/// Retained list of editable shapes plus the pointer grab of an active drag.
#[derive(Debug, Default)]
pub struct Canvas {
    shapes: Vec<BoundedShape>,
    /// Shape index and handle that received the last press.
    grab: Option<(usize, HandleRole)>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: BoundedShape) {
        self.shapes.push(shape);
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.grab = None;
    }

    pub fn shapes(&self) -> &[BoundedShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Topmost handle under `point`. Later shapes are drawn above earlier ones.
    fn handle_at(&self, point: kurbo::Point) -> Option<(usize, HandleRole)> {
        self.shapes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, shape)| shape.handle_at(point).map(|role| (i, role)))
    }

    /// Route a pointer event to the handle it belongs to. Returns true when a
    /// shape changed.
    pub fn dispatch(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Press(pos) => {
                let Some((index, role)) = self.handle_at(pos) else {
                    return false;
                };
                debug!("Grabbed {role:?} handle of shape {index}");
                self.grab = Some((index, role));
                self.shapes[index].handle_event(role, event)
            }
            PointerEvent::Move(_) => match self.grab {
                Some((index, role)) => self.shapes[index].handle_event(role, event),
                None => false,
            },
            PointerEvent::Release(_) => match self.grab.take() {
                Some((index, role)) => self.shapes[index].handle_event(role, event),
                None => false,
            },
        }
    }

    pub fn paint(&self, painter: &egui::Painter, origin: egui::Vec2) {
        for shape in &self.shapes {
            shape.paint(painter, origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;
    use kurbo::{Point, Size};

    fn canvas_with(rects: &[(f64, f64, f64, f64)]) -> Canvas {
        let mut canvas = Canvas::new();
        for &(x, y, w, h) in rects {
            canvas.add(BoundedShape::new(Primitive::rect(), x, y, w, h));
        }
        canvas
    }

    #[test]
    fn press_on_empty_space_is_ignored() {
        let mut canvas = canvas_with(&[(100.0, 100.0, 100.0, 100.0)]);
        assert!(!canvas.dispatch(PointerEvent::Press(Point::new(150.0, 150.0))));
        assert!(!canvas.is_dragging());
        assert!(!canvas.dispatch(PointerEvent::Move(Point::new(160.0, 160.0))));
        assert_eq!(canvas.shapes()[0].top_left(), Point::new(100.0, 100.0));
    }

    #[test]
    fn drag_goes_to_grabbed_handle_until_release() {
        let mut canvas = canvas_with(&[(100.0, 100.0, 100.0, 100.0)]);
        canvas.dispatch(PointerEvent::Press(Point::new(200.0, 200.0)));
        assert!(canvas.is_dragging());

        // Far outside the handle, the grab still holds.
        assert!(canvas.dispatch(PointerEvent::Move(Point::new(300.0, 260.0))));
        assert_eq!(canvas.shapes()[0].size(), Size::new(200.0, 160.0));

        canvas.dispatch(PointerEvent::Release(Point::new(300.0, 260.0)));
        assert!(!canvas.is_dragging());
        assert!(!canvas.dispatch(PointerEvent::Move(Point::new(400.0, 400.0))));
        assert_eq!(canvas.shapes()[0].size(), Size::new(200.0, 160.0));
    }

    #[test]
    fn topmost_shape_receives_the_press() {
        let mut canvas = canvas_with(&[(100.0, 100.0, 50.0, 50.0), (100.0, 100.0, 80.0, 80.0)]);
        canvas.dispatch(PointerEvent::Press(Point::new(100.0, 100.0)));
        canvas.dispatch(PointerEvent::Move(Point::new(110.0, 100.0)));
        canvas.dispatch(PointerEvent::Release(Point::new(110.0, 100.0)));

        assert_eq!(canvas.shapes()[0].top_left(), Point::new(100.0, 100.0));
        assert_eq!(canvas.shapes()[1].top_left(), Point::new(110.0, 100.0));
    }

    #[test]
    fn clear_drops_shapes_and_grab() {
        let mut canvas = canvas_with(&[(0.0, 0.0, 10.0, 10.0)]);
        canvas.dispatch(PointerEvent::Press(Point::new(0.0, 0.0)));
        canvas.clear();
        assert!(canvas.is_empty());
        assert!(!canvas.is_dragging());
        assert!(!canvas.dispatch(PointerEvent::Move(Point::new(5.0, 5.0))));
    }
}
