//! Theme system with built-in light and dark themes.
//!
//! A [`Theme`] is a plain value: sizes and colours that widgets query when
//! they measure, lay out and refresh. It never changes behind a widget's back;
//! switching theme means handing widgets a new one.

mod file;
mod palette;

use std::path::Path;

use serde::Deserialize;
use trellis_core::logging::targets;

pub use palette::ColorPalette;

use crate::error::{Error, Result};

/// Theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Size constants, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSizes {
    /// Standard gap between and around elements.
    pub padding: f32,
    /// Body text size.
    pub text_size: f32,
    /// Icons drawn inside buttons and entries.
    pub inline_icon_size: f32,
    /// Width of a toolbar separator line.
    pub separator_thickness: f32,
}

impl Default for ThemeSizes {
    fn default() -> Self {
        Self {
            padding: 4.0,
            text_size: 14.0,
            inline_icon_size: 20.0,
            separator_thickness: 1.0,
        }
    }
}

/// A complete theme: a mode, a palette and the size constants.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme mode.
    pub mode: ThemeMode,
    /// Color palette.
    pub palette: ColorPalette,
    /// Size constants.
    pub sizes: ThemeSizes,
}

impl Theme {
    /// Create a light theme.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            palette: ColorPalette::light(),
            sizes: ThemeSizes::default(),
        }
    }

    /// Create a dark theme.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            palette: ColorPalette::dark(),
            sizes: ThemeSizes::default(),
        }
    }

    /// The built-in theme for a mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Parse a theme from TOML.
    ///
    /// The document picks a base with `mode` (light when absent) and may
    /// override any size or colour; everything it leaves out keeps the base
    /// value.
    ///
    /// ```
    /// use trellis_style::Theme;
    ///
    /// let theme = Theme::from_toml_str(r##"
    ///     mode = "dark"
    ///
    ///     [sizes]
    ///     padding = 6.0
    ///
    ///     [colors]
    ///     primary = "#ff8800"
    /// "##).unwrap();
    ///
    /// assert_eq!(theme.padding(), 6.0);
    /// assert_eq!(theme.text_size(), Theme::dark().text_size());
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let overrides: file::ThemeFile = toml::from_str(source)?;
        overrides.into_theme()
    }

    /// Load a theme file from disk. See [`Theme::from_toml_str`] for the format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let theme = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::STYLE, path = %path.display(), mode = ?theme.mode, "loaded theme");
        Ok(theme)
    }

    // ========================================================================
    // Convenience accessors
    // ========================================================================

    #[inline]
    pub fn padding(&self) -> f32 {
        self.sizes.padding
    }

    #[inline]
    pub fn text_size(&self) -> f32 {
        self.sizes.text_size
    }

    #[inline]
    pub fn inline_icon_size(&self) -> f32 {
        self.sizes.inline_icon_size
    }

    #[inline]
    pub fn separator_thickness(&self) -> f32 {
        self.sizes.separator_thickness
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_render::Color;

    #[test]
    fn test_empty_document_is_light() {
        let theme = Theme::from_toml_str("").unwrap();
        assert_eq!(theme, Theme::light());
    }

    #[test]
    fn test_mode_selects_base_palette() {
        let theme = Theme::from_toml_str("mode = \"dark\"").unwrap();
        assert_eq!(theme.palette, ColorPalette::dark());
    }

    #[test]
    fn test_color_override() {
        let theme = Theme::from_toml_str("[colors]\nforeground = \"#00ff00\"").unwrap();
        assert_eq!(Some(theme.palette.foreground), Color::from_hex("#00ff00"));
        assert_eq!(theme.palette.button, ColorPalette::light().button);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let err = Theme::from_toml_str("[colors]\nbutton = \"blue\"").unwrap_err();
        assert!(matches!(err, Error::InvalidColor { name: "button", .. }));
    }

    #[test]
    fn test_negative_size_is_rejected() {
        let err = Theme::from_toml_str("[sizes]\npadding = -1.0").unwrap_err();
        assert!(matches!(err, Error::InvalidMetric { name: "padding", .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Theme::from_toml_str("[sizes]\ngutter = 3.0").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_hover_color_is_not_themeable() {
        let err = Theme::from_toml_str("[colors]\nhover = \"#000000\"").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
