//! Standard widgets for Trellis.
//!
//! - [`Button`]: Push button with text, an icon, or both
//! - [`Entry`]: Single line text input with an optional action button
//! - [`Menu`] / [`PopUpMenu`]: Menu data and the overlay that shows it
//! - [`Toolbar`]: Row of tool buttons, spacers and separators
//! - [`SelectEntry`]: Entry with a drop-down of options

mod button;
mod entry;
mod menu;
mod popup_menu;
mod select_entry;
mod toolbar;

pub use button::{Button, ButtonRenderer};
pub use entry::{ActionItem, Entry, EntryRenderer};
pub use menu::{Menu, MenuItem};
pub use popup_menu::{PopUpMenu, PopUpMenuRenderer};
pub use select_entry::SelectEntry;
pub use toolbar::{
    Toolbar, ToolbarAction, ToolbarItem, ToolbarRenderer, ToolbarSeparator, ToolbarSpacer,
};
