//! Index-addressed storage for normalized landmark points.
//!
//! Deleting a point never renumbers the others: the slot is pushed onto a
//! free-list and handed to the next point that gets created.

/// A position expressed as a fraction of image width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same point with both coordinates clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PointStore {
    points: Vec<Point>,
    /// Free-list, most recently deleted last
    deleted: Vec<usize>,
    /// `is_deleted[i]` mirrors membership of `i` in `deleted`
    is_deleted: Vec<bool>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `point`, reusing the most recently deleted slot if there is one.
    pub fn create_or_reuse(&mut self, point: Point) -> usize {
        match self.deleted.pop() {
            Some(index) => {
                self.points[index] = point;
                self.is_deleted[index] = false;
                index
            }
            None => {
                self.points.push(point);
                self.is_deleted.push(false);
                self.points.len() - 1
            }
        }
    }

    /// Returns false if `index` is out of range or already deleted.
    pub fn mark_deleted(&mut self, index: usize) -> bool {
        if !self.is_active(index) {
            return false;
        }
        self.deleted.push(index);
        self.is_deleted[index] = true;
        true
    }

    /// Overwrite an active slot. Deleted or unknown slots are left alone.
    pub fn move_to(&mut self, index: usize, point: Point) -> bool {
        if !self.is_active(index) {
            return false;
        }
        self.points[index] = point;
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.deleted.clear();
        self.is_deleted.clear();
    }

    /// Drop everything and take `points` in order, with no deleted slots.
    pub fn replace(&mut self, points: Vec<Point>) {
        self.is_deleted = vec![false; points.len()];
        self.points = points;
        self.deleted.clear();
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        if self.is_active(index) {
            Some(self.points[index])
        } else {
            None
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < self.points.len() && !self.is_deleted[index]
    }

    /// Active points with their slot index, in storage order.
    pub fn active_points(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.points
            .iter()
            .zip(&self.is_deleted)
            .enumerate()
            .filter(|(_, (_, deleted))| !**deleted)
            .map(|(i, (p, _))| (i, *p))
    }

    pub fn active_count(&self) -> usize {
        self.points.len() - self.deleted.len()
    }

    /// Number of slots, deleted ones included.
    pub fn slot_count(&self) -> usize {
        self.points.len()
    }

    pub fn deleted_slots(&self) -> &[usize] {
        &self.deleted
    }
}
