//! Prelude module for Trellis.
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use crate::{callback, Callback, Error, ObjectId, Result, Signal};

// ============================================================================
// Canvas and Environment
// ============================================================================

pub use crate::canvas::{Canvas, CanvasId, EventContext};
pub use crate::env::Env;

// ============================================================================
// Scene Graph
// ============================================================================

pub use crate::scene::{CanvasObject, Icon, Rectangle, Spacer, Text};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::layout::{BoxLayout, HBoxLayout, Layout, VBoxLayout};
pub use crate::widget::{
    BaseWidget, Focusable, Key, KeyEvent, KeyboardModifiers, Tappable, Widget, WidgetBase,
    WidgetEvent, WidgetRenderer,
};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::widgets::{
    ActionItem, Button, Entry, Menu, MenuItem, PopUpMenu, SelectEntry, Toolbar, ToolbarAction,
    ToolbarItem, ToolbarSeparator, ToolbarSpacer,
};

// ============================================================================
// Rendering Vocabulary
// ============================================================================

pub use trellis_render::{names, Color, IconResource, Point, Rect, Size};
pub use trellis_style::Theme;
