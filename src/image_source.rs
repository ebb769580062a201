//! Decoding the image shown under the points.

use std::path::{Path, PathBuf};

use crate::error::{AnnotateError, Result};

/// A decoded raster image in RGBA8 layout.
#[derive(Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("path", &self.path)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl LoadedImage {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AnnotateError::invalid_image(path, "file not found"));
        }
        let img = image::open(path).map_err(|e| AnnotateError::invalid_image(path, e))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AnnotateError::invalid_image(path, "image has no pixels"));
        }
        log::info!("Loaded image {:?} ({}x{})", path, width, height);
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }
}
