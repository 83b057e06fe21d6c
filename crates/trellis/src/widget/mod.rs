//! Widget system for Trellis.
//!
//! This module provides the widget architecture:
//!
//! - [`Widget`] trait: Object-safe interface for every widget in the scene
//! - [`BaseWidget`] and [`WidgetBase`]: Identity, geometry and the renderer
//!   lifecycle shared by all widgets
//! - [`WidgetRenderer`]: The per-widget object list builder
//! - [`Focusable`] and [`Tappable`]: Input capabilities
//! - [`FocusManager`]: Single focus owner per canvas
//! - [`layout`]: Box layouts
//! - [`widgets`]: The standard widgets
//!
//! # Creating a Widget
//!
//! 1. Define a struct with a `WidgetBase<R>` field and a renderer type `R`
//! 2. Implement [`BaseWidget`] and call `extend_base_widget::<Self>()` in
//!    the constructor
//! 3. Implement [`WidgetRenderer`] for `R`: build the object list in
//!    `create`, then measure, lay out and refresh it
//! 4. Implement [`Widget`], plus [`Focusable`] / [`Tappable`] as needed
//!
//! ```ignore
//! struct Swatch {
//!     base: WidgetBase<SwatchRenderer>,
//!     color: Color,
//! }
//!
//! impl Swatch {
//!     pub fn new(color: Color) -> Self {
//!         let mut swatch = Self { base: WidgetBase::new(Env::default()), color };
//!         swatch.base.extend_base_widget::<Swatch>();
//!         swatch
//!     }
//! }
//! ```

mod base;
mod events;
mod focus;
pub mod layout;
mod renderer;
mod traits;
pub mod widgets;

pub use base::{BaseWidget, WidgetBase};
pub use events::{Key, KeyEvent, KeyboardModifiers, WidgetEvent};
pub use focus::{FocusChange, FocusManager};
pub use renderer::WidgetRenderer;
pub use traits::{find_widget, find_widget_mut, Focusable, Tappable, Widget};
