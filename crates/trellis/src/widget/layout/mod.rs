//! Layout system for positioning a renderer's objects.
//!
//! A [`Layout`] is a pure mapping from a container size and a list of child
//! objects to child positions and sizes, plus the container's minimum size.
//! Layouts hold configuration only; nothing is retained between calls, so
//! the same layout value can be applied to any object list.
//!
//! # Built-in Layouts
//!
//! - [`HBoxLayout`] / [`VBoxLayout`] - Horizontal and vertical box layouts
//!
//! # Example
//!
//! ```ignore
//! use trellis::widget::layout::{BoxLayout, Layout};
//!
//! let layout = BoxLayout::horizontal().with_spacing(env.padding());
//! let min = layout.min_size(&mut objects);
//! layout.layout(&mut objects, size.max(min));
//! ```

mod box_layout;

pub use box_layout::{BoxLayout, HBoxLayout, Orientation, VBoxLayout};

use trellis_render::Size;

use crate::scene::CanvasObject;

/// Arranges a list of canvas objects inside a container.
pub trait Layout: Send + Sync {
    /// The smallest container size that fits every visible object at its
    /// minimum size.
    fn min_size(&self, objects: &mut [Box<dyn CanvasObject>]) -> Size;

    /// Position and size every visible object for a container of `size`.
    ///
    /// Positions are relative to the container's top-left corner.
    fn layout(&self, objects: &mut [Box<dyn CanvasObject>], size: Size);
}
