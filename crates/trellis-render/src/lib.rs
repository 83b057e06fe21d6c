//! Rendering vocabulary for Trellis.
//!
//! This crate holds the value types every other layer draws with:
//!
//! - Geometry: [`Point`], [`Size`], [`Rect`]
//! - [`Color`], parsed from hex strings by the theme
//! - Text measurement through the [`TextMeasurer`] trait
//! - [`IconResource`] handles for icons
//!
//! Rasterisation is not performed here. A backend walks the scene graph
//! built by the `trellis` crate and draws these values however it likes.

pub mod icon;
pub mod text;
mod types;

pub use icon::{names, IconResource, IconSource};
pub use text::{FixedAdvanceMeasurer, TextMeasurer, TextStyle};
pub use types::{Color, Point, Rect, Size};
