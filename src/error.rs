//! Error types for theme_lens
//!
//! Resolution problems (cycles, missing variables, missing themes) are never errors;
//! they are reported in-band as chain steps. The errors here cover the outer surfaces:
//! importing text, parsing mappings, editing themes and file access.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for theme_lens operations
#[derive(Error, Debug)]
pub enum ThemeError {
    /// IO errors (reading theme files, saving mappings, etc.)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing/serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Text that was supposed to be JSON could not be parsed
    #[error("Invalid JSON")]
    InvalidJson,

    /// Mapping JSON parsed but is not an object of string to string
    #[error("Invalid mapping format, expected a JSON object of variable names")]
    InvalidMappingFormat,

    /// Theme JSON parsed but does not have a name and variables
    #[error("Invalid theme JSON, expected an object with \"name\" and \"variables\"")]
    InvalidThemeJson,

    /// Imported text had neither a theme JSON nor any CSS variable declaration
    #[error("No valid variables found")]
    NoValidVariables,

    #[error("Theme name is required")]
    ThemeNameRequired,

    #[error("A theme named '{name}' already exists")]
    ThemeExists { name: String },

    #[error("A theme needs at least one variable")]
    AtLeastOneVariable,

    #[error("Theme '{name}' not found")]
    ThemeNotFound { name: String },

    #[error("Variable mapping is required")]
    MappingRequired,

    #[error("Mapping name is required")]
    MappingNameRequired,

    #[error("No saved mapping named '{name}'")]
    MappingNotFound { name: String },

    #[error("Select at least one theme to export")]
    NoThemesSelected,

    /// The root theme of an export must be one of the selected themes
    #[error("Root theme '{name}' is not among the selected themes")]
    RootThemeNotSelected { name: String },

    /// Settings file exists but could not be understood
    #[error("Invalid settings file {path:?}: {message}")]
    Settings { path: PathBuf, message: String },
}

/// Result type alias for theme_lens operations
pub type ThemeResult<T> = Result<T, ThemeError>;

impl From<std::io::Error> for ThemeError {
    fn from(err: std::io::Error) -> Self {
        ThemeError::Io {
            source: err,
            message: "IO operation failed".to_string(),
        }
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        ThemeError::Json {
            source: err,
            message: "JSON operation failed".to_string(),
        }
    }
}

/// Helper trait for converting IO errors with context
pub trait IoContext<T> {
    fn with_io_context(self, message: &str) -> ThemeResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, message: &str) -> ThemeResult<T> {
        self.map_err(|e| ThemeError::Io {
            message: message.to_string(),
            source: e,
        })
    }
}

/// Helper trait for converting JSON errors with context
pub trait JsonContext<T> {
    fn with_json_context(self, message: &str) -> ThemeResult<T>;
}

impl<T> JsonContext<T> for Result<T, serde_json::Error> {
    fn with_json_context(self, message: &str) -> ThemeResult<T> {
        self.map_err(|e| ThemeError::Json {
            message: message.to_string(),
            source: e,
        })
    }
}
