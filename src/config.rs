//! Startup settings read from a JSON file.
//!
//! The file is only ever read; nothing here is written back on exit.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::selection::{DEFAULT_THRESHOLD, MAX_THRESHOLD};

/// Current settings file format version.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter string understood by `env_logger`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    /// Initial maximum click distance for selecting a point
    pub threshold: f64,
    /// Whether ordinal labels are drawn next to each point
    pub show_index: bool,
    pub log_level: LogLevel,
    pub window_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            threshold: DEFAULT_THRESHOLD,
            show_index: false,
            log_level: LogLevel::default(),
            window_size: [1200.0, 800.0],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Settings file version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keep a threshold inside the range the slider offers.
pub fn clamp_threshold(threshold: f64) -> f64 {
    if threshold.is_finite() {
        threshold.clamp(0.0, MAX_THRESHOLD)
    } else {
        DEFAULT_THRESHOLD
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = serde_json::from_str(json)?;
        if settings.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: settings.version,
                supported_version: CONFIG_VERSION,
            });
        }
        settings.threshold = clamp_threshold(settings.threshold);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("landmark-marker").join("settings.json"))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Settings from `path` or the default location, falling back to defaults.
    ///
    /// Runs before the logger exists, so problems are returned as messages
    /// for the caller to log once it is up.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<String>) {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return (Self::default(), None),
        };
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(&path) {
            Ok(settings) => (settings, None),
            Err(e) => (
                Self::default(),
                Some(format!("Ignoring settings file {:?}: {}", path, e)),
            ),
        }
    }
}
