//! Trellis - a retained-mode widget framework core.
//!
//! Trellis keeps a tree of [`CanvasObject`](scene::CanvasObject)s per
//! [`Canvas`](canvas::Canvas). Widgets own renderers, renderers own the
//! primitive objects that draw them, and layouts position those objects.
//! Input is routed by the canvas to exactly one widget at a time; pop-up
//! menus float above the content on the canvas overlay stack.
//!
//! Drawing pixels is left to a backend: walk the canvas with
//! [`Canvas::walk`](canvas::Canvas::walk) and draw each primitive at the
//! absolute position it is handed.
//!
//! # Example
//!
//! ```ignore
//! use trellis::prelude::*;
//!
//! let mut canvas = Canvas::default();
//! let toolbar = Toolbar::new(vec![
//!     Box::new(ToolbarAction::new(IconResource::themed(names::DOCUMENT_SAVE), Some(callback(save)))),
//!     Box::new(ToolbarSeparator::new()),
//!     Box::new(ToolbarAction::new(IconResource::themed(names::DOCUMENT_OPEN), Some(callback(open)))),
//! ]);
//! let id = toolbar.widget_id();
//! canvas.set_content(Box::new(toolbar));
//! canvas.focus(id)?;
//! canvas.typed_key(Key::Return);
//! ```

pub mod canvas;
pub mod env;
pub mod prelude;
pub mod scene;
pub mod widget;

pub use trellis_core::{callback, logging, Callback, ConnectionId, Error, ObjectId, Result, Signal};

/// Geometry, colour, text measurement and icon types.
pub mod render {
    pub use trellis_render::*;
}

/// Themes and colour palettes.
pub mod style {
    pub use trellis_style::*;
}
