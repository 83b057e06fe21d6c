//! Theme values for Trellis.
//!
//! Widgets read sizes and colours from a [`Theme`] at measure, layout and
//! refresh time. Two built-in themes are provided and either can be adjusted
//! from a TOML file:
//!
//! ```no_run
//! use trellis_style::Theme;
//!
//! let theme = Theme::load("theme.toml")?;
//! println!("padding is {}", theme.padding());
//! # Ok::<(), trellis_style::Error>(())
//! ```

pub mod theme;

mod error;

pub use error::{Error, Result};
pub use theme::{ColorPalette, Theme, ThemeMode, ThemeSizes};
