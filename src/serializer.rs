//! Plain-text points files: one `x<TAB>y` row per active point.
//!
//! Import accepts any whitespace between values and replaces the whole
//! point set, so parsing finishes before anything is handed back.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{AnnotateError, Result};
use crate::points::{Point, PointStore};

/// Extension used by the save dialog.
pub const POINTS_EXTENSION: &str = "txt";

/// Render the active points of `store` in storage order.
pub fn format_points(store: &PointStore) -> String {
    let mut out = String::new();
    for (_, point) in store.active_points() {
        // Display for f64 is the shortest form that parses back exactly
        let _ = writeln!(out, "{}\t{}", point.x, point.y);
    }
    out
}

/// Write the active points of `store` to `path`. Returns the row count.
pub fn write_points(path: &Path, store: &PointStore) -> Result<usize> {
    std::fs::write(path, format_points(store))?;
    let count = store.active_count();
    log::info!("Saved {} points to {:?}", count, path);
    Ok(count)
}

/// Points read from a file, after clamping into the unit square.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPoints {
    pub points: Vec<Point>,
    /// How many individual coordinates were outside `[0, 1]`.
    pub clamped: usize,
}

/// Parse whitespace separated coordinate pairs.
///
/// Fails on unparsable or non-finite numbers and on an odd value count.
pub fn parse_points(text: &str) -> std::result::Result<ParsedPoints, String> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(format!("value #{} ({}) is not finite", i + 1, token)),
            Err(_) => Err(format!("value #{} ({:?}) is not a number", i + 1, token)),
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    if values.len() % 2 != 0 {
        return Err(format!(
            "found {} values, which is not a whole number of x/y pairs",
            values.len()
        ));
    }

    let clamped = values.iter().filter(|v| !(0.0..=1.0).contains(*v)).count();
    let points = values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]).clamped())
        .collect();

    Ok(ParsedPoints { points, clamped })
}

/// Read and parse a points file. Nothing is returned unless every row parsed.
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let text =
        std::fs::read_to_string(path).map_err(|e| AnnotateError::invalid_points(path, e))?;
    let parsed = parse_points(&text).map_err(|reason| AnnotateError::invalid_points(path, reason))?;
    if parsed.clamped > 0 {
        log::warn!(
            "{} coordinates in {:?} were outside [0, 1] and have been clamped",
            parsed.clamped,
            path
        );
    }
    log::info!("Read {} points from {:?}", parsed.points.len(), path);
    Ok(parsed.points)
}
