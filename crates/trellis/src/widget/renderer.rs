//! The renderer contract.
//!
//! A renderer turns one widget's state into canvas objects. It owns those
//! objects exclusively, and the list it returns from [`objects`] is exactly
//! the list it measures in [`min_size`] and positions in [`layout`]: there is
//! no second, hidden set.
//!
//! Refreshing follows one of two paths:
//!
//! - [`rebuild`] builds a complete new object list and swaps it in. Used when
//!   the number or kind of objects must change.
//! - [`update_in_place`] mutates the existing objects (colours, text,
//!   visibility) without replacing any.
//!
//! The widget decides which path runs by marking its structure changed on
//! the [`WidgetBase`](super::WidgetBase). Either path must be idempotent.
//!
//! [`objects`]: WidgetRenderer::objects
//! [`min_size`]: WidgetRenderer::min_size
//! [`layout`]: WidgetRenderer::layout
//! [`rebuild`]: WidgetRenderer::rebuild
//! [`update_in_place`]: WidgetRenderer::update_in_place

use trellis_render::{Color, Size};

use crate::scene::CanvasObject;

/// Per-widget object that owns the canvas objects drawing that widget.
pub trait WidgetRenderer: Send + Sync + Sized {
    /// The widget this renderer draws.
    type Widget;

    /// Build a renderer with a complete object list for the widget's current
    /// state.
    fn create(widget: &Self::Widget) -> Self;

    /// The smallest size the widget can be laid out at.
    fn min_size(&mut self) -> Size;

    /// Position and size the owned objects for a widget of `size`.
    fn layout(&mut self, size: Size);

    /// Replace the whole object list from the widget's state.
    ///
    /// The new list is built completely before it replaces the old one.
    fn rebuild(&mut self, widget: &Self::Widget);

    /// Update the existing objects from the widget's state.
    fn update_in_place(&mut self, widget: &Self::Widget);

    /// Re-derive the objects from the widget's state.
    fn refresh(&mut self, widget: &Self::Widget, structure_changed: bool) {
        if structure_changed {
            self.rebuild(widget);
        } else {
            self.update_in_place(widget);
        }
    }

    /// Colour drawn behind the objects.
    fn background_color(&self) -> Color {
        Color::TRANSPARENT
    }

    /// The owned objects, in drawing order.
    fn objects(&self) -> &[Box<dyn CanvasObject>];

    /// The owned objects, mutably, in drawing order.
    fn objects_mut(&mut self) -> &mut [Box<dyn CanvasObject>];

    /// Release anything held outside the object list. Called when the
    /// renderer is discarded.
    fn destroy(&mut self) {}
}
