//! Pop-up menu implementation.
//!
//! This module provides [`PopUpMenu`], a transient list of menu rows shown
//! above everything else on a canvas.
//!
//! A pop-up menu is owned by the widget that opened it and registered on the
//! canvas overlay stack by id; its position is absolute. It is dismissed by
//! losing focus, by Escape, or by activating a row. Dismissing hides it and
//! takes it off the overlay stack; the owner discards it afterwards.
//!
//! # Keyboard
//!
//! - Up / Down: move the highlight, clamped to the first and last row
//! - Return / Enter / Space: activate the highlighted row
//! - Escape: dismiss
//!
//! # Signals
//!
//! - `closed`: Emitted when the menu is dismissed
//!
//! # Example
//!
//! ```ignore
//! // Inside an event handler:
//! let mut popup = PopUpMenu::new(Menu::from_labels(["One", "Two"]), ctx.canvas_id(), ctx.env());
//! popup.show_at_position(anchor);
//! ctx.add_overlay(popup.widget_id());
//! ctx.request_focus(popup.widget_id());
//! ```

use trellis_core::logging::targets;
use trellis_core::{ObjectId, Signal};
use trellis_render::{Point, Size};

use super::{Button, Menu};
use crate::canvas::{CanvasId, EventContext};
use crate::env::Env;
use crate::scene::{CanvasObject, Rectangle};
use crate::widget::base::{base_widget_methods, impl_widget_object};
use crate::widget::layout::{BoxLayout, Layout};
use crate::widget::{
    BaseWidget, Focusable, Key, KeyEvent, Widget, WidgetBase, WidgetEvent, WidgetRenderer,
};

/// A transient menu drawn as an overlay.
pub struct PopUpMenu {
    base: WidgetBase<PopUpMenuRenderer>,
    menu: Menu,
    /// The canvas this menu is shown on.
    canvas: CanvasId,
    /// The control that opened the menu.
    parent: Option<ObjectId>,
    highlighted: Option<usize>,
    /// Last activated row, until the owner takes it.
    activated: Option<usize>,
    focused: bool,

    /// Signal emitted when the menu is dismissed.
    pub closed: Signal<()>,
}

impl PopUpMenu {
    /// Create a hidden pop-up menu for `canvas`.
    pub fn new(menu: Menu, canvas: CanvasId, env: &Env) -> Self {
        let mut base = WidgetBase::new(env.clone());
        base.set_visible(false);
        let mut popup = Self {
            base,
            menu,
            canvas,
            parent: None,
            highlighted: None,
            activated: None,
            focused: false,
            closed: Signal::new(),
        };
        popup.base.extend_base_widget::<PopUpMenu>();
        popup
    }

    /// Record the control that opened this menu.
    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    #[inline]
    pub fn canvas_id(&self) -> CanvasId {
        self.canvas
    }

    #[inline]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    #[inline]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Show the menu with its top-left corner at `position` in canvas
    /// coordinates.
    pub fn show_at_position(&mut self, position: Point) {
        self.base.set_position(position);
        self.base.set_visible(true);
        self.refresh_widget();
        tracing::debug!(
            target: targets::OVERLAY,
            popup = %self.base.id(),
            x = position.x,
            y = position.y,
            items = self.menu.len(),
            "pop-up menu shown"
        );
    }

    /// Highlight the row labelled `text`, or nothing if there is none.
    pub fn select_current(&mut self, text: &str) {
        self.highlighted = self.menu.position(text);
        self.refresh_if_created();
    }

    /// The row activated since the last call, if any.
    pub fn take_activated(&mut self) -> Option<usize> {
        self.activated.take()
    }

    /// Id of the button drawing row `index`, once drawn.
    pub fn row_id(&self, index: usize) -> Option<ObjectId> {
        self.base
            .objects()
            .get(index + 1)?
            .as_widget()
            .map(|row| row.widget_id())
    }

    /// Activate row `index`: run its action, record it for the owner and
    /// close the menu.
    pub fn activate(&mut self, index: usize, ctx: &mut EventContext<'_>) {
        let Some(item) = self.menu.items.get(index) else {
            return;
        };
        tracing::debug!(
            target: targets::OVERLAY,
            popup = %self.base.id(),
            index,
            label = %item.label,
            "menu item activated"
        );
        if let Some(action) = item.action.clone() {
            action();
        }
        self.activated = Some(index);
        if self.focused {
            ctx.request_unfocus();
        } else {
            self.dismiss(ctx);
        }
    }

    /// Hide the menu and take it off the overlay stack.
    pub fn dismiss(&mut self, ctx: &mut EventContext<'_>) {
        if !self.base.is_visible() {
            return;
        }
        self.base.set_visible(false);
        ctx.remove_overlay(self.base.id());
        tracing::debug!(target: targets::OVERLAY, popup = %self.base.id(), "pop-up menu dismissed");
        self.closed.emit(());
    }

    fn move_highlight(&mut self, delta: isize) {
        let Some(last) = self.menu.len().checked_sub(1) else {
            return;
        };
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(last),
        });
        self.refresh_if_created();
    }

    fn row_index(&self, id: ObjectId) -> Option<usize> {
        self.base
            .objects()
            .iter()
            .skip(1)
            .position(|row| row.as_widget().is_some_and(|w| w.widget_id() == id))
    }

    fn refresh_if_created(&mut self) {
        if self.base.has_renderer() {
            self.refresh_widget();
        }
    }
}

impl BaseWidget for PopUpMenu {
    type Renderer = PopUpMenuRenderer;

    fn base(&self) -> &WidgetBase<PopUpMenuRenderer> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase<PopUpMenuRenderer> {
        &mut self.base
    }
}

impl_widget_object!(PopUpMenu);

impl Widget for PopUpMenu {
    base_widget_methods!();

    fn refresh(&mut self) {
        self.refresh_widget();
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }

    /// Taps on a row activate that row.
    fn dispatch(&mut self, target: ObjectId, event: &WidgetEvent, ctx: &mut EventContext<'_>) -> bool {
        if target == self.base.id() {
            self.handle_event(event, ctx);
            return true;
        }
        let Some(index) = self.row_index(target) else {
            return false;
        };
        if let WidgetEvent::Tapped = event {
            self.activate(index, ctx);
        }
        true
    }
}

impl Focusable for PopUpMenu {
    fn focus_gained(&mut self, _ctx: &mut EventContext<'_>) {
        self.focused = true;
    }

    fn focus_lost(&mut self, ctx: &mut EventContext<'_>) {
        self.focused = false;
        self.dismiss(ctx);
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn typed_key(&mut self, event: &KeyEvent, ctx: &mut EventContext<'_>) {
        match event.key {
            Key::Up => self.move_highlight(-1),
            Key::Down => self.move_highlight(1),
            key if key.is_activation() => {
                if let Some(index) = self.highlighted {
                    self.activate(index, ctx);
                }
            }
            Key::Escape => {
                if self.focused {
                    ctx.request_unfocus();
                } else {
                    self.dismiss(ctx);
                }
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for PopUpMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopUpMenu")
            .field("id", &self.base.id())
            .field("canvas", &self.canvas)
            .field("parent", &self.parent)
            .field("items", &self.menu.len())
            .field("highlighted", &self.highlighted)
            .field("visible", &self.base.is_visible())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Draws a [`PopUpMenu`] as a background followed by one flat button per row.
pub struct PopUpMenuRenderer {
    objects: Vec<Box<dyn CanvasObject>>,
    layout: BoxLayout,
}

impl PopUpMenuRenderer {
    fn rows_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
        self.objects.get_mut(1..).unwrap_or_default()
    }
}

impl WidgetRenderer for PopUpMenuRenderer {
    type Widget = PopUpMenu;

    fn create(popup: &PopUpMenu) -> Self {
        let env = popup.base.env();
        let palette = &env.theme().palette;
        let mut objects: Vec<Box<dyn CanvasObject>> = Vec::with_capacity(popup.menu.len() + 1);
        objects.push(Box::new(
            Rectangle::new(palette.menu_background).with_stroke(palette.shadow, 1.0),
        ));
        for item in &popup.menu.items {
            objects.push(Box::new(Button::new(item.label.clone()).with_env(env).with_flat(true)));
        }

        let mut renderer = Self {
            objects,
            layout: BoxLayout::vertical(),
        };
        renderer.update_in_place(popup);
        renderer
    }

    fn min_size(&mut self) -> Size {
        let layout = self.layout;
        layout.min_size(self.rows_mut())
    }

    fn layout(&mut self, size: Size) {
        if let Some(background) = self.objects.first_mut() {
            background.move_to(Point::ZERO);
            background.resize(size);
        }
        let layout = self.layout;
        layout.layout(self.rows_mut(), size);
    }

    fn rebuild(&mut self, popup: &PopUpMenu) {
        *self = Self::create(popup);
    }

    fn update_in_place(&mut self, popup: &PopUpMenu) {
        for (index, row) in self.rows_mut().iter_mut().enumerate() {
            if let Some(button) = row.downcast_mut::<Button>() {
                button.set_focused(popup.highlighted == Some(index));
            }
        }
    }

    fn objects(&self) -> &[Box<dyn CanvasObject>] {
        &self.objects
    }

    fn objects_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
        &mut self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, OverlayStack};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn popup(labels: &[&str]) -> PopUpMenu {
        let canvas = Canvas::default();
        PopUpMenu::new(Menu::from_labels(labels.iter().copied()), canvas.id(), canvas.env())
    }

    fn count_closed(menu: &PopUpMenu) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        menu.closed.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_starts_hidden_and_shows_at_position() {
        let mut menu = popup(&["One", "Two"]);
        assert!(!menu.is_visible());

        menu.show_at_position(Point::new(10.0, 30.0));
        assert!(menu.is_visible());
        assert_eq!(menu.position(), Point::new(10.0, 30.0));
        assert_eq!(menu.children().len(), 3);
    }

    #[test]
    fn test_min_size_stacks_rows() {
        let mut menu = popup(&["One", "Three"]);
        // Widest row: "Three" is 35px + 8px padding; each row 29px tall.
        assert_eq!(menu.min_size(), Size::new(43.0, 58.0));
    }

    #[test]
    fn test_rows_fill_width() {
        let mut menu = popup(&["One", "Two"]);
        menu.show_at_position(Point::ZERO);
        menu.resize(Size::new(120.0, 58.0));
        let rows: Vec<(Point, Size)> = menu.children()[1..]
            .iter()
            .map(|row| (row.position(), row.size()))
            .collect();
        assert_eq!(rows[0], (Point::new(0.0, 0.0), Size::new(120.0, 29.0)));
        assert_eq!(rows[1], (Point::new(0.0, 29.0), Size::new(120.0, 29.0)));
    }

    #[test]
    fn test_select_current_highlights_matching_row() {
        let mut menu = popup(&["One", "Two"]);
        menu.show_at_position(Point::ZERO);
        menu.select_current("Two");
        assert_eq!(menu.highlighted(), Some(1));
        let focused: Vec<bool> = menu.children()[1..]
            .iter()
            .filter_map(|row| row.downcast_ref::<Button>())
            .map(|button| button.is_focused())
            .collect();
        assert_eq!(focused, vec![false, true]);

        menu.select_current("Missing");
        assert_eq!(menu.highlighted(), None);
    }

    #[test]
    fn test_highlight_clamps() {
        let mut menu = popup(&["One", "Two"]);
        menu.move_highlight(-1);
        assert_eq!(menu.highlighted(), Some(0));
        menu.move_highlight(1);
        menu.move_highlight(1);
        assert_eq!(menu.highlighted(), Some(1));

        let mut empty = popup(&[]);
        empty.move_highlight(1);
        assert_eq!(empty.highlighted(), None);
    }

    #[test]
    fn test_closed_emitted_once_per_dismiss() {
        let canvas = Canvas::default();
        let positions = HashMap::new();
        let mut overlays = OverlayStack::new();
        let mut ctx = EventContext::new(canvas.id(), canvas.env(), &positions, &mut overlays, None);

        let mut menu = popup(&["One"]);
        let closed = count_closed(&menu);
        // Never shown, so there is nothing to dismiss.
        menu.dismiss(&mut ctx);
        assert_eq!(closed.load(Ordering::SeqCst), 0);

        menu.show_at_position(Point::ZERO);
        menu.dismiss(&mut ctx);
        menu.dismiss(&mut ctx);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_activate_unfocused_closes() {
        let canvas = Canvas::default();
        let positions = HashMap::new();
        let mut overlays = OverlayStack::new();
        let mut ctx = EventContext::new(canvas.id(), canvas.env(), &positions, &mut overlays, None);

        let mut menu = popup(&["One", "Two"]);
        let closed = count_closed(&menu);
        menu.show_at_position(Point::ZERO);
        menu.activate(1, &mut ctx);

        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert_eq!(menu.take_activated(), Some(1));
        assert!(!menu.is_visible());
    }
}
