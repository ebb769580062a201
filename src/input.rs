//! Platform-neutral input events and the session state they act on.
//!
//! The app layer turns egui pointer, wheel and key input into [`InputEvent`]s;
//! [`Session::handle`] applies them in arrival order and reports what changed.

use crate::config::clamp_threshold;
use crate::points::{Point, PointStore};
use crate::selection::{Annotator, PressOutcome};
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A single zoom step, already normalized from wheel deltas or zoom keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Nudge(Direction),
}

/// Pointer positions are pixels relative to the top-left of the scaled image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PrimaryPressed { x: f64, y: f64 },
    PrimaryDragged { x: f64, y: f64 },
    Zoom(ZoomDirection),
    Key(Key),
}

/// What an event did to the session.
///
/// The app logs it at the input boundary; `Ignored` means nothing changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Selected(usize),
    Deselected,
    Created(usize),
    Moved(usize),
    Deleted(usize),
    Nudged(usize),
    Zoomed(f64),
    Ignored,
}

impl From<PressOutcome> for Action {
    fn from(outcome: PressOutcome) -> Self {
        match outcome {
            PressOutcome::Selected(i) => Action::Selected(i),
            PressOutcome::Deselected => Action::Deselected,
            PressOutcome::Created(i) => Action::Created(i),
        }
    }
}

/// All mutable annotation state for the single open image.
#[derive(Clone, Debug)]
pub struct Session {
    annotator: Annotator,
    viewport: Option<Viewport>,
    threshold: f64,
    show_index: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::selection::DEFAULT_THRESHOLD, false)
    }
}

impl Session {
    pub fn new(threshold: f64, show_index: bool) -> Self {
        Self {
            annotator: Annotator::new(),
            viewport: None,
            threshold: clamp_threshold(threshold),
            show_index,
        }
    }

    /// Start over on a new image: no points, no highlight, scale 1.
    pub fn load_image(&mut self, width: u32, height: u32) {
        self.viewport = Some(Viewport::new(width, height));
        self.annotator.clear();
    }

    /// Replace every point with `points`, in order.
    pub fn import_points(&mut self, points: Vec<Point>) {
        self.annotator.replace(points);
    }

    pub fn clear_points(&mut self) {
        self.annotator.clear();
    }

    pub fn store(&self) -> &PointStore {
        self.annotator.store()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.annotator.highlight()
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = clamp_threshold(threshold);
    }

    pub fn show_index(&self) -> bool {
        self.show_index
    }

    pub fn toggle_index(&mut self) {
        self.show_index = !self.show_index;
    }

    pub fn handle(&mut self, event: InputEvent) -> Action {
        let Some(viewport) = self.viewport.as_mut() else {
            return Action::Ignored;
        };

        match event {
            InputEvent::PrimaryPressed { x, y } => {
                let at = viewport.to_normalized(x, y);
                self.annotator.press(at, self.threshold).into()
            }
            InputEvent::PrimaryDragged { x, y } => {
                let to = viewport.to_normalized(x, y);
                self.annotator.drag(to).map_or(Action::Ignored, Action::Moved)
            }
            InputEvent::Zoom(direction) => {
                match direction {
                    ZoomDirection::In => viewport.zoom_in(),
                    ZoomDirection::Out => viewport.zoom_out(),
                }
                Action::Zoomed(viewport.scale())
            }
            InputEvent::Key(Key::Delete) => self
                .annotator
                .delete_highlighted()
                .map_or(Action::Ignored, Action::Deleted),
            InputEvent::Key(Key::Nudge(direction)) => {
                let (step_x, step_y) = viewport.pixel_step();
                let (dx, dy) = match direction {
                    Direction::Left => (-step_x, 0.0),
                    Direction::Right => (step_x, 0.0),
                    Direction::Up => (0.0, -step_y),
                    Direction::Down => (0.0, step_y),
                };
                self.annotator
                    .nudge(dx, dy)
                    .map_or(Action::Ignored, Action::Nudged)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_100x50() -> Session {
        let mut session = Session::default();
        session.load_image(101, 51);
        session
    }

    #[test]
    fn test_events_without_image_are_ignored() {
        let mut session = Session::default();
        let action = session.handle(InputEvent::PrimaryPressed { x: 1.0, y: 1.0 });
        assert_eq!(action, Action::Ignored);
        assert_eq!(session.store().active_count(), 0);
    }

    #[test]
    fn test_press_creates_point_at_normalized_position() {
        let mut session = session_100x50();
        let action = session.handle(InputEvent::PrimaryPressed { x: 50.0, y: 25.0 });
        assert_eq!(action, Action::Created(0));
        assert_eq!(session.store().get(0), Some(Point::new(0.5, 0.5)));
    }

    #[test]
    fn test_press_then_drag_moves_live() {
        let mut session = session_100x50();
        session.handle(InputEvent::PrimaryPressed { x: 50.0, y: 25.0 });
        session.handle(InputEvent::PrimaryPressed { x: 50.0, y: 25.0 });
        assert_eq!(session.highlight(), Some(0));

        for x in [60.0, 70.0, 80.0] {
            let action = session.handle(InputEvent::PrimaryDragged { x, y: 25.0 });
            assert_eq!(action, Action::Moved(0));
            let p = session.store().get(0).unwrap();
            assert!((p.x - x / 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_keys_need_highlight() {
        let mut session = session_100x50();
        session.handle(InputEvent::PrimaryPressed { x: 10.0, y: 10.0 });
        assert_eq!(session.handle(InputEvent::Key(Key::Delete)), Action::Ignored);
        assert_eq!(
            session.handle(InputEvent::Key(Key::Nudge(Direction::Up))),
            Action::Ignored
        );
        assert_eq!(session.store().active_count(), 1);
    }

    #[test]
    fn test_delete_key_removes_highlighted() {
        let mut session = session_100x50();
        session.handle(InputEvent::PrimaryPressed { x: 10.0, y: 10.0 });
        session.handle(InputEvent::PrimaryPressed { x: 10.0, y: 10.0 });
        assert_eq!(session.handle(InputEvent::Key(Key::Delete)), Action::Deleted(0));
        assert_eq!(session.highlight(), None);
        assert_eq!(session.store().active_count(), 0);
    }

    #[test]
    fn test_nudge_down_uses_view_height() {
        let mut session = session_100x50();
        session.handle(InputEvent::PrimaryPressed { x: 50.0, y: 25.0 });
        session.handle(InputEvent::PrimaryPressed { x: 50.0, y: 25.0 });
        let before = session.store().get(0).unwrap();

        session.handle(InputEvent::Key(Key::Nudge(Direction::Down)));

        let after = session.store().get(0).unwrap();
        assert_eq!(after.x, before.x);
        assert!((after.y - before.y - 1.0 / 51.0).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_reports_scale() {
        let mut session = session_100x50();
        match session.handle(InputEvent::Zoom(ZoomDirection::In)) {
            Action::Zoomed(scale) => assert!((scale - 1.03).abs() < 1e-12),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_load_image_resets_everything() {
        let mut session = session_100x50();
        session.handle(InputEvent::PrimaryPressed { x: 50.0, y: 25.0 });
        session.handle(InputEvent::PrimaryPressed { x: 50.0, y: 25.0 });
        session.handle(InputEvent::Zoom(ZoomDirection::In));

        session.load_image(20, 20);

        assert_eq!(session.store().slot_count(), 0);
        assert_eq!(session.highlight(), None);
        assert_eq!(session.viewport().unwrap().scale(), 1.0);
        assert_eq!(session.viewport().unwrap().view_size(), (20, 20));
    }

    #[test]
    fn test_threshold_setter_clamps() {
        let mut session = Session::default();
        session.set_threshold(0.3);
        assert_eq!(session.threshold(), crate::selection::MAX_THRESHOLD);
    }
}
