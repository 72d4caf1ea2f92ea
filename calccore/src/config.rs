//! Calculator settings
//!
//! Stored as `settings.json` in the platform config directory. Every field
//! has a default, so older or hand-edited files load with whatever they
//! are missing filled in.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::{MAX_DIGITS, MIN_DIGITS};
use crate::theme::Palette;

/// Upper bound on the configurable display length.
pub const MAX_DIGITS_LIMIT: usize = 32;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub palette: Palette,
    pub font_size: f32,
    pub max_digits: usize,
    pub show_operator: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: Palette::Dark,
            font_size: 21.0,
            max_digits: MAX_DIGITS,
            show_operator: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Clamp values a hand-edited file could put out of range.
    pub fn sanitized(mut self) -> Self {
        self.max_digits = self.max_digits.clamp(MIN_DIGITS, MAX_DIGITS_LIMIT);
        if !self.font_size.is_finite() {
            self.font_size = Self::default().font_size;
        }
        self.font_size = self.font_size.clamp(10.0, 48.0);
        self
    }
}

/// Log why settings could not be loaded. A missing file is the normal
/// first-run case and only shows at debug level.
pub fn report_load_error(path: &Path, err: &ConfigError) {
    match err {
        ConfigError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
        }
        _ => {
            tracing::warn!(path = %path.display(), error = %err, "could not read settings, using defaults");
        }
    }
}

/// Get the config directory for the calculator
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("co", "slowcomputer", "calculator")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path() -> PathBuf {
    config_dir().join(SETTINGS_FILE)
}
