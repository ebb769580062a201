//! Hit-testing and the single-highlight selection model.

use crate::points::{Point, PointStore};

/// Default maximum click distance, in normalized units.
pub const DEFAULT_THRESHOLD: f64 = 0.005;

/// Largest threshold the control panel offers.
pub const MAX_THRESHOLD: f64 = 0.02;

/// Closest active point strictly within `threshold` of `target`.
///
/// On equal distances the lower index wins.
pub fn find_nearest(store: &PointStore, target: Point, threshold: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, point) in store.active_points() {
        let distance = point.distance(&target);
        if distance >= threshold {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// Outcome of a primary-button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Selected(usize),
    Deselected,
    Created(usize),
}

/// Owns the points together with the highlight so that the highlight can
/// never refer to a deleted or missing slot.
#[derive(Clone, Debug, Default)]
pub struct Annotator {
    store: PointStore,
    highlight: Option<usize>,
}

impl Annotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn highlighted_point(&self) -> Option<Point> {
        self.highlight.and_then(|i| self.store.get(i))
    }

    /// Select the nearest point; if none is in range either drop the current
    /// highlight or, when nothing was highlighted, create a point.
    pub fn press(&mut self, at: Point, threshold: f64) -> PressOutcome {
        if let Some(index) = find_nearest(&self.store, at, threshold) {
            self.highlight = Some(index);
            return PressOutcome::Selected(index);
        }
        if self.highlight.take().is_some() {
            return PressOutcome::Deselected;
        }
        let index = self.store.create_or_reuse(at.clamped());
        PressOutcome::Created(index)
    }

    /// Live move of the highlighted point. Returns the moved index.
    pub fn drag(&mut self, to: Point) -> Option<usize> {
        let index = self.highlight?;
        self.store.move_to(index, to.clamped()).then_some(index)
    }

    /// Shift the highlighted point by a normalized offset.
    pub fn nudge(&mut self, dx: f64, dy: f64) -> Option<usize> {
        let index = self.highlight?;
        let current = self.store.get(index)?;
        let moved = Point::new(current.x + dx, current.y + dy).clamped();
        self.store.move_to(index, moved).then_some(index)
    }

    /// Delete the highlighted point and clear the highlight.
    pub fn delete_highlighted(&mut self) -> Option<usize> {
        let index = self.highlight.take()?;
        self.store.mark_deleted(index).then_some(index)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.highlight = None;
    }

    pub fn replace(&mut self, points: Vec<Point>) {
        self.store.replace(points);
        self.highlight = None;
    }
}
