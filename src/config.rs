//! Engine constants and user settings
//!
//! The constants are fixed by the value grammar and are not user configurable.
//! [`Settings`] only covers the outer surfaces (logging, export file naming, where
//! saved mappings live).

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{IoContext, ThemeError, ThemeResult};

/// Separator between alternative values of a multi-valued entry
pub const MULTI_VALUE_DELIMITER: &str = " | ";
/// Conventional prefix of variable names
pub const VARIABLE_PREFIX: &str = "--";
/// Root font size used for rem and em conversions
pub const BASE_FONT_SIZE_PX: f64 = 16.0;
/// Pixels per point
pub const PX_PER_PT: f64 = 1.333333;
/// Display value of a search row whose variable does not exist in the theme
pub const ABSENT_PLACEHOLDER: &str = "—";
/// Text form of the separator between flattened sibling chains
pub const SEPARATOR_MARKER: &str = "---SEPARATOR---";

/// Name of the application directory under the platform config/data dirs
pub const APP_DIR_NAME: &str = "ThemeLens";
/// Environment variable that overrides the configured log level
pub const LOG_LEVEL_ENV: &str = "THEME_LENS_LOG";

/// Normalize a variable name so it carries the `--` prefix
pub fn with_prefix(name: &str) -> String {
    if name.starts_with(VARIABLE_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", VARIABLE_PREFIX, name)
    }
}

/// Strip a leading `--` from a variable name if present
pub fn strip_prefix(name: &str) -> &str {
    name.strip_prefix(VARIABLE_PREFIX).unwrap_or(name)
}

/// User settings, stored as JSON in the platform config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// One of off, error, warn, info, debug, trace
    pub log_level: String,
    /// Base name (without `.css`) of generated export files
    pub export_file_name: String,
    /// Where saved variable mappings are kept; defaults to the data directory
    pub mappings_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            export_file_name: "tailwind-themes".to_string(),
            mappings_file: None,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults when absent
    pub fn load_default() -> ThemeResult<Self> {
        match default_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a file. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> ThemeResult<Self> {
        if !path.exists() {
            log::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).with_io_context("Failed to read settings file")?;
        serde_json::from_str(&content).map_err(|e| ThemeError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Effective log level, honoring the environment override
    pub fn level_filter(&self) -> LevelFilter {
        let raw = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| self.log_level.clone());
        raw.parse().unwrap_or(LevelFilter::Info)
    }

    /// Path of the saved mappings file
    pub fn mappings_path(&self) -> Option<PathBuf> {
        self.mappings_file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join("mappings.json"))
        })
    }
}

/// Platform specific location of `settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prefix_helpers() {
        assert_eq!(with_prefix("bg"), "--bg");
        assert_eq!(with_prefix("--bg"), "--bg");
        assert_eq!(strip_prefix("--bg"), "bg");
        assert_eq!(strip_prefix("bg"), "bg");
    }

    #[test]
    fn test_missing_settings_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "export_file_name": "brand" }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.export_file_name, "brand");
        assert_eq!(settings.log_level, "info");
        assert!(settings.mappings_file.is_none());
    }

    #[test]
    fn test_malformed_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let result = Settings::load_from(&path);
        assert!(matches!(result, Err(ThemeError::Settings { .. })));
    }
}
