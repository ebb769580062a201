//! Errors surfaced to the user as modal warnings.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateError {
    /// The image file is missing, unreadable or not a decodable raster image
    #[error("Please select an image file (.jpg/.png etc.): {path:?}: {reason}")]
    InvalidImageSource { path: PathBuf, reason: String },

    /// The points file could not be opened or does not hold coordinate pairs
    #[error("Please select a valid txt points file: {path:?}: {reason}")]
    InvalidPointsFile { path: PathBuf, reason: String },

    /// Save was cancelled without picking a file name
    #[error("Please enter a file name")]
    NoDestinationChosen,

    /// Writing the exported points failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnnotateError {
    pub fn invalid_points(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InvalidPointsFile {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_image(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InvalidImageSource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotateError>;
