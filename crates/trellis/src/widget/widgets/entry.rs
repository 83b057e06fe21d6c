//! Single-line text entry implementation.
//!
//! This module provides [`Entry`], an editable single line of text with a
//! placeholder and an optional action item: an icon button drawn at the
//! trailing edge (the drop-down arrow of a select entry, a clear button,
//! a search button).
//!
//! # Editing
//!
//! While focused the entry inserts typed characters at the cursor and
//! handles Backspace, Delete, Left, Right, Home and End. The cursor always
//! sits on a grapheme cluster boundary.
//!
//! # Signals
//!
//! - `text_changed`: Emitted with the new text after every change
//!
//! # Example
//!
//! ```ignore
//! use trellis::widget::widgets::Entry;
//!
//! let entry = Entry::new().with_placeholder("Search");
//! entry.text_changed.connect(|text| println!("query: {text}"));
//! ```

use std::fmt;

use trellis_core::{Callback, ObjectId, Signal};
use trellis_render::{Color, IconResource, Point, Size, TextStyle};
use unicode_segmentation::UnicodeSegmentation;

use super::Button;
use crate::canvas::EventContext;
use crate::env::Env;
use crate::scene::{CanvasObject, Rectangle, Text};
use crate::widget::base::{base_widget_methods, impl_widget_object};
use crate::widget::{
    BaseWidget, Focusable, Key, KeyEvent, Tappable, Widget, WidgetBase, WidgetRenderer,
};

const CURSOR_WIDTH: f32 = 2.0;
const FOCUS_OUTLINE_WIDTH: f32 = 2.0;

// Renderer object slots.
const BOX: usize = 0;
const TEXT: usize = 1;
const CURSOR: usize = 2;
const ACTION: usize = 3;

// ============================================================================
// ActionItem
// ============================================================================

/// A button drawn at the trailing edge of an entry.
#[derive(Clone)]
pub struct ActionItem {
    pub icon: IconResource,
    /// Invoked when the button is tapped. Owners that intercept the tap
    /// themselves leave this unset.
    pub on_tapped: Option<Callback>,
}

impl ActionItem {
    pub fn new(icon: IconResource) -> Self {
        Self {
            icon,
            on_tapped: None,
        }
    }

    pub fn with_on_tapped(mut self, on_tapped: Callback) -> Self {
        self.on_tapped = Some(on_tapped);
        self
    }
}

impl fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("icon", &self.icon)
            .field("on_tapped", &self.on_tapped.is_some())
            .finish()
    }
}

// ============================================================================
// Entry
// ============================================================================

/// An editable single line of text.
pub struct Entry {
    base: WidgetBase<EntryRenderer>,
    text: String,
    placeholder: String,
    /// Byte offset of the cursor, always on a grapheme boundary.
    cursor_pos: usize,
    focused: bool,
    action_item: Option<ActionItem>,

    /// Signal emitted when the text changes.
    pub text_changed: Signal<String>,
}

impl Entry {
    /// Create an empty entry.
    pub fn new() -> Self {
        let mut entry = Self {
            base: WidgetBase::new(Env::default()),
            text: String::new(),
            placeholder: String::new(),
            cursor_pos: 0,
            focused: false,
            action_item: None,
            text_changed: Signal::new(),
        };
        entry.base.extend_base_widget::<Entry>();
        entry
    }

    /// Set the text shown while the entry is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.set_placeholder(placeholder);
        self
    }

    /// Measure and style the entry with `env`.
    pub fn with_env(mut self, env: &Env) -> Self {
        self.set_widget_env(env);
        self
    }

    // =========================================================================
    // Text
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and move the cursor to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text = text;
        self.cursor_pos = self.text.len();
        self.text_did_change();
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
        self.refresh_if_created();
    }

    /// Byte offset of the cursor in [`text`](Self::text).
    #[inline]
    pub fn cursor_position(&self) -> usize {
        self.cursor_pos
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // =========================================================================
    // Action Item
    // =========================================================================

    pub fn action_item(&self) -> Option<&ActionItem> {
        self.action_item.as_ref()
    }

    /// Add, replace or remove the trailing action button.
    pub fn set_action_item(&mut self, action_item: Option<ActionItem>) {
        self.action_item = action_item;
        self.base.mark_structure_changed();
        self.refresh_if_created();
    }

    /// Id of the button realising the action item, once drawn.
    pub fn action_button_id(&self) -> Option<ObjectId> {
        self.base
            .objects()
            .get(ACTION)?
            .as_widget()
            .map(|button| button.widget_id())
    }

    // =========================================================================
    // Internal: Editing
    // =========================================================================

    fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text.insert_str(self.cursor_pos, text);
        self.cursor_pos += text.len();
        self.text_did_change();
    }

    /// Delete character before cursor (backspace).
    fn delete_char_before(&mut self) {
        if self.cursor_pos > 0 {
            let prev_pos = self.prev_grapheme_boundary(self.cursor_pos);
            self.text.replace_range(prev_pos..self.cursor_pos, "");
            self.cursor_pos = prev_pos;
            self.text_did_change();
        }
    }

    /// Delete character after cursor (delete).
    fn delete_char_after(&mut self) {
        if self.cursor_pos < self.text.len() {
            let next_pos = self.next_grapheme_boundary(self.cursor_pos);
            self.text.replace_range(self.cursor_pos..next_pos, "");
            self.text_did_change();
        }
    }

    fn move_cursor_to(&mut self, pos: usize) {
        if self.cursor_pos != pos {
            self.cursor_pos = pos;
            self.refresh_if_created();
        }
    }

    fn text_did_change(&mut self) {
        self.refresh_if_created();
        self.text_changed.emit(self.text.clone());
    }

    fn refresh_if_created(&mut self) {
        if self.base.has_renderer() {
            self.refresh_widget();
        }
    }

    /// Find the previous grapheme boundary.
    fn prev_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, _)| offset)
            .take_while(|&offset| offset < pos)
            .last()
            .unwrap_or(0)
    }

    /// Find the next grapheme boundary.
    fn next_grapheme_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(offset, grapheme)| offset + grapheme.len())
            .find(|&end| end > pos)
            .unwrap_or(self.text.len())
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseWidget for Entry {
    type Renderer = EntryRenderer;

    fn base(&self) -> &WidgetBase<EntryRenderer> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase<EntryRenderer> {
        &mut self.base
    }
}

impl_widget_object!(Entry);

impl Widget for Entry {
    base_widget_methods!();

    fn refresh(&mut self) {
        self.refresh_widget();
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }

    fn as_tappable(&mut self) -> Option<&mut dyn Tappable> {
        Some(self)
    }
}

impl Focusable for Entry {
    fn focus_gained(&mut self, _ctx: &mut EventContext<'_>) {
        self.focused = true;
        self.refresh_if_created();
    }

    fn focus_lost(&mut self, _ctx: &mut EventContext<'_>) {
        self.focused = false;
        self.refresh_if_created();
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn typed_rune(&mut self, ch: char, _ctx: &mut EventContext<'_>) {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf));
    }

    fn typed_key(&mut self, event: &KeyEvent, _ctx: &mut EventContext<'_>) {
        match event.key {
            Key::Backspace => self.delete_char_before(),
            Key::Delete => self.delete_char_after(),
            Key::Left => self.move_cursor_to(self.prev_grapheme_boundary(self.cursor_pos)),
            Key::Right => self.move_cursor_to(self.next_grapheme_boundary(self.cursor_pos)),
            Key::Home => self.move_cursor_to(0),
            Key::End => self.move_cursor_to(self.text.len()),
            _ => {}
        }
    }
}

impl Tappable for Entry {
    fn tapped(&mut self, ctx: &mut EventContext<'_>) {
        ctx.request_focus(self.base.id());
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.base.id())
            .field("text", &self.text)
            .field("cursor_pos", &self.cursor_pos)
            .field("focused", &self.focused)
            .field("action_item", &self.action_item)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Draws an [`Entry`] as `[box, text, cursor, action?]`.
pub struct EntryRenderer {
    objects: Vec<Box<dyn CanvasObject>>,
    /// Size of one line of text, at least as wide as the placeholder.
    line: Size,
    /// Horizontal offset of the cursor from the start of the text.
    cursor_x: f32,
    padding: f32,
}

impl EntryRenderer {
    fn build(entry: &Entry) -> Self {
        let env = entry.base.env();
        let palette = &env.theme().palette;

        let mut objects: Vec<Box<dyn CanvasObject>> = vec![
            Box::new(Rectangle::new(palette.input_background)),
            Box::new(Text::new(String::new(), palette.foreground, env)),
            Box::new(Rectangle::new(palette.primary)),
        ];
        if let Some(item) = &entry.action_item {
            let mut button = Button::icon_only(item.icon.clone()).with_env(env);
            button.set_on_tapped(item.on_tapped.clone());
            objects.push(Box::new(button));
        }

        let mut renderer = Self {
            objects,
            line: Size::ZERO,
            cursor_x: 0.0,
            padding: env.padding(),
        };
        renderer.update_in_place(entry);
        renderer
    }

    fn action_min(&mut self) -> Option<Size> {
        self.objects.get_mut(ACTION).map(|action| action.min_size())
    }
}

impl WidgetRenderer for EntryRenderer {
    type Widget = Entry;

    fn create(entry: &Entry) -> Self {
        Self::build(entry)
    }

    fn min_size(&mut self) -> Size {
        let mut min = self.line.expand(self.padding * 4.0, self.padding * 2.0);
        if let Some(action) = self.action_min() {
            min.width += action.width;
            min.height = min.height.max(action.height);
        }
        min
    }

    fn layout(&mut self, size: Size) {
        let action = self.action_min();
        let action_width = action.map_or(0.0, |a| a.width);
        let text_y = ((size.height - self.line.height) / 2.0).max(0.0);
        let text_width = (size.width - self.padding * 4.0 - action_width).max(0.0);

        let placements = [
            (BOX, Point::ZERO, size),
            (TEXT, Point::new(self.padding * 2.0, text_y), Size::new(text_width, self.line.height)),
            (
                CURSOR,
                Point::new(self.padding * 2.0 + self.cursor_x, text_y),
                Size::new(CURSOR_WIDTH, self.line.height),
            ),
        ];
        for (slot, position, slot_size) in placements {
            if let Some(object) = self.objects.get_mut(slot) {
                object.move_to(position);
                object.resize(slot_size);
            }
        }

        if let (Some(a), Some(object)) = (action, self.objects.get_mut(ACTION)) {
            object.move_to(Point::new(size.width - a.width, (size.height - a.height) / 2.0));
            object.resize(a);
        }
    }

    fn rebuild(&mut self, entry: &Entry) {
        *self = Self::build(entry);
    }

    fn update_in_place(&mut self, entry: &Entry) {
        let env = entry.base.env();
        let palette = &env.theme().palette;
        let text_size = env.theme().text_size();

        let placeholder = env.measure_text(&entry.placeholder, text_size, TextStyle::NORMAL);
        self.line = placeholder.max(env.measure_text("M", text_size, TextStyle::NORMAL));
        self.cursor_x = if entry.cursor_pos == 0 {
            0.0
        } else {
            env.measure_text(&entry.text[..entry.cursor_pos], text_size, TextStyle::NORMAL)
                .width
        };

        if let Some(rect) = self.objects[BOX].downcast_mut::<Rectangle>() {
            rect.fill = palette.input_background;
            if entry.focused {
                rect.stroke = palette.focus;
                rect.stroke_width = FOCUS_OUTLINE_WIDTH;
            } else {
                rect.stroke = palette.shadow;
                rect.stroke_width = 1.0;
            }
        }
        if let Some(text) = self.objects[TEXT].downcast_mut::<Text>() {
            if entry.text.is_empty() {
                text.set_text(&entry.placeholder, env);
                text.color = palette.placeholder;
            } else {
                text.set_text(&entry.text, env);
                text.color = palette.foreground;
            }
        }
        let cursor = &mut self.objects[CURSOR];
        if entry.focused {
            cursor.show();
        } else {
            cursor.hide();
        }
        if let Some(rect) = cursor.downcast_mut::<Rectangle>() {
            rect.fill = if entry.focused { palette.primary } else { Color::TRANSPARENT };
        }
    }

    fn objects(&self) -> &[Box<dyn CanvasObject>] {
        &self.objects
    }

    fn objects_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
        &mut self.objects
    }
}
