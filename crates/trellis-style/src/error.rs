//! Error types for theme loading.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a theme.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The theme file could not be read.
    #[error("Failed to read theme '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The theme file is not valid TOML or has unknown keys.
    #[error("Theme parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A colour entry is not a `#rrggbb` or `#rrggbbaa` string.
    #[error("Invalid colour for '{name}': {value:?}")]
    InvalidColor { name: &'static str, value: String },

    /// A size entry is negative or not finite.
    #[error("Invalid value for '{name}': {value}")]
    InvalidMetric { name: &'static str, value: f32 },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a colour error.
    pub fn invalid_color(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidColor {
            name,
            value: value.into(),
        }
    }
}
