//! Select entry widget implementation.
//!
//! This module provides [`SelectEntry`], an [`Entry`] that also offers a
//! drop-down list of suggested values.
//!
//! The drop-down is an action button at the trailing edge of the entry. Tapping
//! it opens a [`PopUpMenu`] directly below the entry, as wide as the entry,
//! with the row matching the current text highlighted. Choosing a row writes
//! its label into the entry and closes the menu. Free text can still be typed.
//!
//! # Example
//!
//! ```ignore
//! use trellis::widget::widgets::SelectEntry;
//!
//! let mut select = SelectEntry::new(["Apple", "Banana", "Cherry"]);
//! select.entry().text_changed.connect(|text| println!("now {text}"));
//! select.set_options(Vec::<String>::new()); // plain entry again
//! ```

use std::any::Any;
use std::fmt;

use trellis_core::logging::targets;
use trellis_core::ObjectId;
use trellis_render::{names, IconResource, Point, Rect, Size};

use super::{ActionItem, Entry, Menu, PopUpMenu};
use crate::canvas::EventContext;
use crate::env::Env;
use crate::scene::CanvasObject;
use crate::widget::{BaseWidget, Focusable, Tappable, Widget, WidgetEvent};

/// An entry with a drop-down of options.
///
/// Shares its identity with the inner entry: the entry's base is extended as
/// a `SelectEntry`, so focus and taps addressed to that id reach this widget.
pub struct SelectEntry {
    entry: Entry,
    drop_down: Option<Menu>,
    pop_up: Option<PopUpMenu>,
}

impl SelectEntry {
    /// Create a select entry with the default environment.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_env(&Env::default(), options)
    }

    /// Create a select entry measured and styled with `env`.
    pub fn with_env<I, S>(env: &Env, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entry = Entry::new().with_env(env);
        entry.base_mut().extend_base_widget::<SelectEntry>();
        let mut select = Self {
            entry,
            drop_down: None,
            pop_up: None,
        };
        select.set_options(options);
        select.refresh();
        select
    }

    /// Replace the options offered by the drop-down.
    ///
    /// An empty list removes the drop-down button and closes any open menu.
    /// An open menu otherwise keeps showing the old options until it closes.
    pub fn set_options<I, S>(&mut self, options: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let menu = Menu::from_labels(options);
        tracing::trace!(
            target: targets::WIDGET,
            widget = %self.entry.widget_id(),
            options = menu.len(),
            "select entry options"
        );

        if menu.is_empty() {
            self.drop_down = None;
            self.hide_drop_down();
            if self.entry.action_item().is_some() {
                self.entry.set_action_item(None);
            }
            return;
        }

        self.drop_down = Some(menu);
        if self.entry.action_item().is_none() {
            self.entry
                .set_action_item(Some(ActionItem::new(IconResource::themed(names::MENU_DROP_DOWN))));
        }
    }

    /// The current options, in order.
    pub fn options(&self) -> Vec<&str> {
        self.drop_down
            .as_ref()
            .map(|menu| menu.labels().collect())
            .unwrap_or_default()
    }

    pub fn text(&self) -> &str {
        self.entry.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.entry.set_text(text);
    }

    /// The inner entry.
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn entry_mut(&mut self) -> &mut Entry {
        &mut self.entry
    }

    /// Whether the drop-down menu is showing.
    pub fn is_drop_down_open(&self) -> bool {
        self.pop_up.as_ref().is_some_and(|pop_up| pop_up.is_visible())
    }

    /// The open drop-down menu, if any.
    pub fn pop_up(&self) -> Option<&PopUpMenu> {
        self.pop_up.as_ref()
    }

    /// Close and discard the drop-down menu.
    ///
    /// The canvas drops the menu from its overlay stack on the next delivery.
    /// Returns `false` if no menu was open.
    pub fn hide_drop_down(&mut self) -> bool {
        let Some(mut pop_up) = self.pop_up.take() else {
            return false;
        };
        pop_up.hide();
        true
    }

    /// Open the drop-down menu below the entry, replacing any open one.
    fn show_drop_down(&mut self, ctx: &mut EventContext<'_>) {
        let Some(menu) = self.drop_down.clone() else {
            return;
        };
        if let Some(mut old) = self.pop_up.take() {
            old.hide();
            ctx.remove_overlay(old.widget_id());
        }

        let id = self.entry.widget_id();
        let size = self.entry.size();
        let origin = ctx
            .absolute_position_for_object(id)
            .unwrap_or_else(|| self.entry.position());
        let anchor = Rect::from_origin_size(origin, size).bottom_left();

        let mut pop_up = PopUpMenu::new(menu, ctx.canvas_id(), self.entry.base().env());
        if let Some(parent) = self.entry.action_button_id() {
            pop_up = pop_up.with_parent(parent);
        }
        pop_up.show_at_position(anchor);
        let height = pop_up.min_size().height;
        pop_up.resize(Size::new(size.width, height));
        pop_up.select_current(self.entry.text());

        let pop_up_id = pop_up.widget_id();
        ctx.add_overlay(pop_up_id);
        ctx.request_focus(pop_up_id);
        tracing::debug!(target: targets::OVERLAY, widget = %id, popup = %pop_up_id, "drop-down opened");
        self.pop_up = Some(pop_up);
    }

    /// Collect what the menu did while handling an event.
    fn pop_up_handled(&mut self) {
        let Some(pop_up) = self.pop_up.as_mut() else {
            return;
        };
        let label = pop_up
            .take_activated()
            .and_then(|index| pop_up.menu().items.get(index))
            .map(|item| item.label.clone());
        let closed = !pop_up.is_visible();

        if let Some(label) = label {
            self.entry.set_text(label);
        }
        if closed {
            self.pop_up = None;
        }
    }

    /// Widest option label plus the entry's horizontal padding.
    fn options_min_width(&self) -> f32 {
        let env = self.entry.base().env();
        self.drop_down
            .iter()
            .flat_map(|menu| menu.labels())
            .map(|label| env.measure_body(label).width + env.padding() * 4.0)
            .fold(0.0, f32::max)
    }
}

impl CanvasObject for SelectEntry {
    fn position(&self) -> Point {
        self.entry.position()
    }

    fn move_to(&mut self, position: Point) {
        self.entry.move_to(position);
    }

    fn size(&self) -> Size {
        self.entry.size()
    }

    /// The open menu follows the entry's width and keeps its own height.
    fn resize(&mut self, size: Size) {
        self.entry.resize(size);
        if let Some(pop_up) = self.pop_up.as_mut() {
            let height = pop_up.size().height;
            pop_up.resize(Size::new(size.width, height));
        }
    }

    fn min_size(&mut self) -> Size {
        let min = self.entry.min_size();
        min.max(Size::new(self.options_min_width(), 0.0))
    }

    fn is_visible(&self) -> bool {
        self.entry.is_visible()
    }

    fn show(&mut self) {
        self.entry.show();
    }

    fn hide(&mut self) {
        self.hide_drop_down();
        self.entry.hide();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_widget(&self) -> Option<&dyn Widget> {
        Some(self)
    }

    fn as_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        Some(self)
    }
}

impl Widget for SelectEntry {
    fn widget_id(&self) -> ObjectId {
        self.entry.widget_id()
    }

    fn extended_type_name(&self) -> &'static str {
        self.entry.extended_type_name()
    }

    fn refresh(&mut self) {
        self.entry.refresh();
        if let Some(pop_up) = self.pop_up.as_mut() {
            pop_up.refresh();
        }
    }

    fn set_env(&mut self, env: &Env) {
        self.entry.set_env(env);
        if let Some(pop_up) = self.pop_up.as_mut() {
            pop_up.set_env(env);
        }
    }

    fn background_color(&self) -> trellis_render::Color {
        self.entry.background_color()
    }

    fn children(&self) -> &[Box<dyn CanvasObject>] {
        self.entry.children()
    }

    fn children_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
        self.entry.children_mut()
    }

    fn overlay(&self) -> Option<&dyn Widget> {
        self.pop_up.as_ref().map(|pop_up| pop_up as &dyn Widget)
    }

    fn overlay_mut(&mut self) -> Option<&mut dyn Widget> {
        self.pop_up.as_mut().map(|pop_up| pop_up as &mut dyn Widget)
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        self.entry.as_focusable()
    }

    fn as_tappable(&mut self) -> Option<&mut dyn Tappable> {
        self.entry.as_tappable()
    }

    /// The menu sees events first; a tap on the drop-down button opens it.
    fn dispatch(&mut self, target: ObjectId, event: &WidgetEvent, ctx: &mut EventContext<'_>) -> bool {
        if let Some(pop_up) = self.pop_up.as_mut() {
            if pop_up.dispatch(target, event, ctx) {
                self.pop_up_handled();
                return true;
            }
        }
        if matches!(event, WidgetEvent::Tapped) && self.entry.action_button_id() == Some(target) {
            self.show_drop_down(ctx);
            return true;
        }
        self.entry.dispatch(target, event, ctx)
    }
}

impl fmt::Debug for SelectEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectEntry")
            .field("entry", &self.entry)
            .field("options", &self.options())
            .field("drop_down_open", &self.is_drop_down_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::widget::Key;

    fn setup(options: &[&str]) -> (Canvas, ObjectId) {
        let select = SelectEntry::new(options.iter().copied());
        let id = select.widget_id();
        let mut canvas = Canvas::default();
        canvas.set_content(Box::new(select));
        canvas.resize(Size::new(120.0, 29.0));
        (canvas, id)
    }

    fn select(canvas: &Canvas, id: ObjectId) -> &SelectEntry {
        canvas.widget::<SelectEntry>(id).unwrap()
    }

    fn open(canvas: &mut Canvas, id: ObjectId) {
        let button = select(canvas, id).entry().action_button_id().unwrap();
        canvas.tap(button).unwrap();
    }

    #[test]
    fn test_extends_as_select_entry() {
        let select = SelectEntry::new(["a"]);
        assert_eq!(select.extended_type_name(), "SelectEntry");
        assert_eq!(select.widget_id(), select.entry().widget_id());
    }

    #[test]
    fn test_options_add_action_button() {
        let mut select = SelectEntry::new(["Apple", "Banana"]);
        assert!(select.entry().action_item().is_some());
        assert_eq!(select.options(), vec!["Apple", "Banana"]);
        // Box, text, cursor and the drop-down button.
        assert_eq!(select.children().len(), 4);
        // "Banana" plus padding is wider than the entry with its button.
        assert_eq!(select.min_size(), Size::new(58.0, 29.0));
    }

    #[test]
    fn test_empty_options_remove_action_button() {
        let mut select = SelectEntry::new(["Apple"]);
        select.set_options(Vec::<String>::new());
        assert!(select.entry().action_item().is_none());
        assert!(select.options().is_empty());
        assert_eq!(select.children().len(), 3);
    }

    #[test]
    fn test_replacing_options() {
        let mut select = SelectEntry::new(["a", "b"]);
        let button = select.entry().action_button_id();
        select.set_options(["c"]);
        assert_eq!(select.options(), vec!["c"]);
        // The existing button stays.
        assert_eq!(select.entry().action_button_id(), button);
    }

    #[test]
    fn test_open_drop_down() {
        let (mut canvas, id) = setup(&["One", "Two"]);
        open(&mut canvas, id);

        let widget = select(&canvas, id);
        assert!(widget.is_drop_down_open());
        let pop_up = widget.pop_up().unwrap();
        assert_eq!(pop_up.position(), Point::new(0.0, 29.0));
        assert_eq!(pop_up.size(), Size::new(120.0, 58.0));
        assert_eq!(canvas.overlays().len(), 1);
        assert_eq!(canvas.focused(), Some(pop_up.widget_id()));
    }

    #[test]
    fn test_open_highlights_current_text() {
        let (mut canvas, id) = setup(&["One", "Two"]);
        if let Some(widget) = canvas.widget_mut::<SelectEntry>(id) {
            widget.set_text("Two");
        }
        open(&mut canvas, id);
        assert_eq!(select(&canvas, id).pop_up().unwrap().highlighted(), Some(1));
    }

    #[test]
    fn test_reopen_replaces_menu() {
        let (mut canvas, id) = setup(&["One", "Two"]);
        open(&mut canvas, id);
        let first = select(&canvas, id).pop_up().unwrap().widget_id();
        open(&mut canvas, id);
        let second = select(&canvas, id).pop_up().unwrap().widget_id();

        assert_ne!(first, second);
        assert_eq!(canvas.overlays().len(), 1);
        assert_eq!(canvas.overlays().top(), Some(second));
    }

    #[test]
    fn test_keyboard_selection_writes_text() {
        let (mut canvas, id) = setup(&["One", "Two"]);
        open(&mut canvas, id);
        canvas.typed_key(Key::Down);
        canvas.typed_key(Key::Down);
        canvas.typed_key(Key::Return);

        let widget = select(&canvas, id);
        assert_eq!(widget.text(), "Two");
        assert!(!widget.is_drop_down_open());
        assert!(widget.pop_up().is_none());
        assert!(canvas.overlays().is_empty());
        assert_eq!(canvas.focused(), None);
    }

    #[test]
    fn test_tap_selection_writes_text() {
        let (mut canvas, id) = setup(&["One", "Two"]);
        open(&mut canvas, id);
        let row = select(&canvas, id).pop_up().unwrap().row_id(0).unwrap();
        canvas.tap(row).unwrap();

        assert_eq!(select(&canvas, id).text(), "One");
        assert!(canvas.overlays().is_empty());
    }

    #[test]
    fn test_escape_closes_without_change() {
        let (mut canvas, id) = setup(&["One", "Two"]);
        open(&mut canvas, id);
        canvas.typed_key(Key::Escape);

        let widget = select(&canvas, id);
        assert_eq!(widget.text(), "");
        assert!(!widget.is_drop_down_open());
        assert!(canvas.overlays().is_empty());
    }

    #[test]
    fn test_resize_keeps_menu_height() {
        let (mut canvas, id) = setup(&["One", "Two"]);
        open(&mut canvas, id);
        canvas.resize(Size::new(200.0, 29.0));

        let pop_up = select(&canvas, id).pop_up().unwrap();
        assert_eq!(pop_up.size(), Size::new(200.0, 58.0));
    }

    #[test]
    fn test_typing_still_edits() {
        let (mut canvas, id) = setup(&["One"]);
        canvas.focus(id).unwrap();
        canvas.typed_rune('x');
        assert_eq!(select(&canvas, id).text(), "x");
        assert!(select(&canvas, id).entry().is_focused());
    }
}
