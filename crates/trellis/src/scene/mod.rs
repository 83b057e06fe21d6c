//! The retained scene graph.
//!
//! Everything a canvas draws is a [`CanvasObject`]: the primitives in
//! [`primitives`] and every widget. Objects have a position relative to their
//! parent, a size, a minimum size and a visibility flag. Parents own their
//! children exclusively and children never point back at their parent.
//!
//! Widgets appear in the graph like any other object; a renderer's object
//! list may contain other widgets (a toolbar's buttons, an entry's action
//! button). [`CanvasObject::as_widget`] is how traversal finds them.

pub mod debug;
pub mod primitives;

use std::any::Any;

use trellis_render::{Point, Size};

use crate::widget::Widget;

pub use debug::{SceneTreeDebug, TreeFormatOptions, TreeStyle};
pub use primitives::{Icon, Rectangle, Spacer, Text};

/// A node in the retained scene graph.
pub trait CanvasObject: Any + Send + Sync {
    /// Position relative to the parent's top-left corner.
    fn position(&self) -> Point;

    /// Move to a new position relative to the parent.
    fn move_to(&mut self, position: Point);

    /// Current size.
    fn size(&self) -> Size;

    /// Assign a new size.
    fn resize(&mut self, size: Size);

    /// The smallest size this object can be given without clipping content.
    ///
    /// Takes `&mut self` because a widget builds its renderer on first use.
    fn min_size(&mut self) -> Size;

    fn is_visible(&self) -> bool;

    fn show(&mut self);

    fn hide(&mut self);

    /// Whether a box layout should hand this object a share of leftover space.
    fn is_spacer(&self) -> bool {
        false
    }

    /// Short type name for debug output.
    fn type_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// This object as a widget, if it is one.
    fn as_widget(&self) -> Option<&dyn Widget> {
        None
    }

    /// This object as a mutable widget, if it is one.
    fn as_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        None
    }
}

impl dyn CanvasObject {
    /// Downcast to a concrete object type.
    pub fn downcast_ref<T: CanvasObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a concrete object type, mutably.
    pub fn downcast_mut<T: CanvasObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Check the concrete type of an object.
    pub fn is<T: CanvasObject>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
