//! Mapping between normalized point space and the scaled image on screen.

use crate::points::Point;

/// Scale change applied by one zoom step.
pub const ZOOM_STEP: f64 = 0.03;

/// Smallest scale reachable by zooming out. There is no upper bound.
pub const MIN_SCALE: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    image_width: u32,
    image_height: u32,
    scale: f64,
    view_width: u32,
    view_height: u32,
}

impl Viewport {
    /// Viewport for a freshly loaded image, at scale 1.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        let mut viewport = Self {
            image_width,
            image_height,
            scale: 1.0,
            view_width: 0,
            view_height: 0,
        };
        viewport.recompute_view_size();
        viewport
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Size of the scaled image in pixels, never smaller than 1x1.
    pub fn view_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }

    /// Pixel position inside the scaled image to normalized coordinates.
    ///
    /// Pixel `0` maps to `0.0` and pixel `view - 1` maps to `1.0`.
    pub fn to_normalized(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let denom_x = (self.view_width.saturating_sub(1)).max(1) as f64;
        let denom_y = (self.view_height.saturating_sub(1)).max(1) as f64;
        Point::new(pixel_x / denom_x, pixel_y / denom_y)
    }

    pub fn to_pixel(&self, point: Point) -> (i32, i32) {
        (
            (point.x * self.view_width as f64).round() as i32,
            (point.y * self.view_height as f64).round() as i32,
        )
    }

    /// Normalized distance covered by one on-screen pixel along each axis.
    pub fn pixel_step(&self) -> (f64, f64) {
        (
            1.0 / self.view_width as f64,
            1.0 / self.view_height as f64,
        )
    }

    pub fn zoom_in(&mut self) {
        self.scale += ZOOM_STEP;
        self.recompute_view_size();
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - ZOOM_STEP).max(MIN_SCALE);
        self.recompute_view_size();
    }

    fn recompute_view_size(&mut self) {
        self.view_width = ((self.image_width as f64 * self.scale).round() as u32).max(1);
        self.view_height = ((self.image_height as f64 * self.scale).round() as u32).max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_new_viewport_is_unscaled() {
        let v = Viewport::new(640, 480);
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.view_size(), (640, 480));
    }

    #[test]
    fn test_to_normalized_covers_both_edges() {
        let v = Viewport::new(101, 51);
        let first = v.to_normalized(0.0, 0.0);
        let last = v.to_normalized(100.0, 50.0);
        assert!(approx_eq(first.x, 0.0) && approx_eq(first.y, 0.0));
        assert!(approx_eq(last.x, 1.0) && approx_eq(last.y, 1.0));
    }

    #[test]
    fn test_to_pixel_rounds() {
        let v = Viewport::new(200, 100);
        assert_eq!(v.to_pixel(Point::new(0.5, 0.5)), (100, 50));
        assert_eq!(v.to_pixel(Point::new(0.0026, 0.004)), (1, 0));
    }

    #[test]
    fn test_zoom_changes_view_size() {
        let mut v = Viewport::new(1000, 500);
        v.zoom_in();
        assert!(approx_eq(v.scale(), 1.03));
        assert_eq!(v.view_size(), (1030, 515));
        v.zoom_out();
        v.zoom_out();
        assert_eq!(v.view_size(), (970, 485));
    }

    #[test]
    fn test_zoom_round_trip_restores_pixel_position() {
        let mut v = Viewport::new(1000, 800);
        let p = Point::new(0.3217, 0.7781);
        let before = v.to_pixel(p);

        for _ in 0..3 {
            v.zoom_in();
        }
        for _ in 0..3 {
            v.zoom_out();
        }

        let after = v.to_pixel(p);
        assert!((before.0 - after.0).abs() <= 1);
        assert!((before.1 - after.1).abs() <= 1);
        assert!(approx_eq(v.scale(), 1.0));
    }

    #[test]
    fn test_zoom_out_stops_at_floor() {
        let mut v = Viewport::new(300, 300);
        for _ in 0..100 {
            v.zoom_out();
            assert!(v.scale() >= MIN_SCALE);
        }
        assert!(approx_eq(v.scale(), MIN_SCALE));
        assert_eq!(v.view_size(), (120, 120));
    }

    #[test]
    fn test_tiny_image_keeps_nonzero_view() {
        let mut v = Viewport::new(1, 1);
        for _ in 0..30 {
            v.zoom_out();
        }
        assert_eq!(v.view_size(), (1, 1));
        let p = v.to_normalized(0.0, 0.0);
        assert!(p.is_finite());
    }

    #[test]
    fn test_pixel_step_tracks_scale() {
        let mut v = Viewport::new(100, 50);
        assert_eq!(v.pixel_step(), (0.01, 0.02));
        for _ in 0..10 {
            v.zoom_in();
        }
        let (w, h) = v.view_size();
        assert_eq!(v.pixel_step(), (1.0 / w as f64, 1.0 / h as f64));
    }
}
