use eframe::egui;
use kurbo::Point;

use crate::handle::PointerEvent;

/// Translate one frame of egui input into canvas-local pointer events.
///
/// egui delivers everything since the previous frame as one batch, so a
/// press and the motion after it can arrive together. Each event keeps the
/// position it carried, which is what the handle hit test needs. A primary
/// press only counts inside `press_area`; motion and release always pass.
pub fn pointer_events(
    events: &[egui::Event],
    origin: egui::Pos2,
    press_area: egui::Rect,
) -> Vec<PointerEvent> {
    let to_canvas = |p: egui::Pos2| Point::new((p.x - origin.x) as f64, (p.y - origin.y) as f64);

    events
        .iter()
        .filter_map(|event| match *event {
            egui::Event::PointerMoved(pos) => Some(PointerEvent::Move(to_canvas(pos))),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                ..
            } if press_area.contains(pos) => Some(PointerEvent::Press(to_canvas(pos))),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: false,
                ..
            } => Some(PointerEvent::Release(to_canvas(pos))),
            _ => None,
        })
        .collect()
}
