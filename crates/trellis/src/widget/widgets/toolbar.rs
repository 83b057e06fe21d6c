//! Toolbar widget implementation.
//!
//! This module provides [`Toolbar`], a horizontal strip of tool buttons with
//! optional spacers and separators, and the [`ToolbarItem`] kinds it is
//! built from.
//!
//! # Keyboard Navigation
//!
//! The toolbar takes focus as a whole and tracks a current button:
//!
//! - Left / Up: previous button, stopping at the first
//! - Right / Down: next button, stopping at the last
//! - Return / Enter / Space: activate the current button; the button shows
//!   as pressed while the key is held
//!
//! Spacers and separators are skipped by navigation.
//!
//! # Example
//!
//! ```ignore
//! use trellis::widget::widgets::{Toolbar, ToolbarAction, ToolbarSeparator, ToolbarSpacer};
//! use trellis_render::{names, IconResource};
//!
//! let mut toolbar = Toolbar::new(vec![
//!     Box::new(ToolbarAction::new(IconResource::themed(names::DOCUMENT_SAVE), Some(save))),
//!     Box::new(ToolbarSeparator::new()),
//!     Box::new(ToolbarSpacer::new()),
//!     Box::new(ToolbarAction::new(IconResource::themed(names::DOCUMENT_OPEN), Some(open))),
//! ]);
//! toolbar.append(Box::new(ToolbarAction::new(help_icon, None)));
//! ```

use std::any::Any;
use std::fmt;

use trellis_core::logging::targets;
use trellis_core::Callback;
use trellis_render::{Color, IconResource, Size};

use super::Button;
use crate::canvas::EventContext;
use crate::env::Env;
use crate::scene::{CanvasObject, Rectangle, Spacer};
use crate::widget::base::{base_widget_methods, impl_widget_object};
use crate::widget::layout::{BoxLayout, Layout};
use crate::widget::{BaseWidget, Focusable, KeyEvent, Widget, WidgetBase, WidgetRenderer};

// ============================================================================
// Toolbar Items
// ============================================================================

/// Anything that can be placed on a [`Toolbar`].
pub trait ToolbarItem: Send + Sync {
    /// Build the canvas object that draws this item.
    ///
    /// Called whenever the toolbar rebuilds; every call returns a new object.
    fn toolbar_object(&self, env: &Env) -> Box<dyn CanvasObject>;

    fn as_any(&self) -> &dyn Any;
}

/// A push button with an icon.
#[derive(Clone)]
pub struct ToolbarAction {
    pub icon: IconResource,
    /// Invoked when the button is tapped or activated from the keyboard.
    pub on_activated: Option<Callback>,
}

impl ToolbarAction {
    pub fn new(icon: IconResource, on_activated: Option<Callback>) -> Self {
        Self { icon, on_activated }
    }
}

impl ToolbarItem for ToolbarAction {
    fn toolbar_object(&self, env: &Env) -> Box<dyn CanvasObject> {
        let mut button = Button::icon_only(self.icon.clone()).with_env(env);
        button.set_on_tapped(self.on_activated.clone());
        Box::new(button)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for ToolbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolbarAction")
            .field("icon", &self.icon)
            .field("on_activated", &self.on_activated.is_some())
            .finish()
    }
}

/// Blank space that stretches to fill the toolbar.
///
/// Leftover width is split evenly between all spacers on a toolbar, so one
/// spacer right-aligns the items after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolbarSpacer;

impl ToolbarSpacer {
    pub fn new() -> Self {
        Self
    }
}

impl ToolbarItem for ToolbarSpacer {
    fn toolbar_object(&self, _env: &Env) -> Box<dyn CanvasObject> {
        Box::new(Spacer::new())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A thin visible line between groups of items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolbarSeparator;

impl ToolbarSeparator {
    pub fn new() -> Self {
        Self
    }
}

impl ToolbarItem for ToolbarSeparator {
    fn toolbar_object(&self, env: &Env) -> Box<dyn CanvasObject> {
        let theme = env.theme();
        Box::new(
            Rectangle::new(theme.palette.foreground)
                .with_min_size(Size::new(theme.separator_thickness(), 0.0)),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Toolbar
// ============================================================================

/// A horizontal list of tool buttons.
pub struct Toolbar {
    base: WidgetBase<ToolbarRenderer>,
    items: Vec<Box<dyn ToolbarItem>>,
    /// Renderer object indices of the items that realised as buttons, in
    /// display order. Recollected on every rebuild.
    buttons: Vec<usize>,
    /// Index into `buttons` of the keyboard-current button.
    current: usize,
    focused: bool,
    /// An activation key is held on the current button.
    pressed: bool,
}

impl Toolbar {
    /// Create a toolbar with the default environment.
    pub fn new(items: Vec<Box<dyn ToolbarItem>>) -> Self {
        Self::with_env(&Env::default(), items)
    }

    /// Create a toolbar measured and styled with `env`.
    pub fn with_env(env: &Env, items: Vec<Box<dyn ToolbarItem>>) -> Self {
        let mut toolbar = Self {
            base: WidgetBase::new(env.clone()),
            items,
            buttons: Vec::new(),
            current: 0,
            focused: false,
            pressed: false,
        };
        toolbar.base.extend_base_widget::<Toolbar>();
        toolbar.refresh();
        toolbar
    }

    /// Add an item at the end.
    pub fn append(&mut self, item: Box<dyn ToolbarItem>) {
        self.items.push(item);
        self.items_changed();
    }

    /// Add an item at the start.
    pub fn prepend(&mut self, item: Box<dyn ToolbarItem>) {
        self.items.insert(0, item);
        self.items_changed();
    }

    /// Replace every item.
    pub fn set_items(&mut self, items: Vec<Box<dyn ToolbarItem>>) {
        self.items = items;
        self.items_changed();
    }

    pub fn items(&self) -> &[Box<dyn ToolbarItem>] {
        &self.items
    }

    /// Number of items that realised as buttons.
    #[inline]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Index of the keyboard-current button among the buttons.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The button at `index` among the buttons.
    pub fn button(&self, index: usize) -> Option<&Button> {
        let slot = *self.buttons.get(index)?;
        self.base.objects().get(slot)?.downcast_ref::<Button>()
    }

    fn items_changed(&mut self) {
        self.base.mark_structure_changed();
        self.refresh();
    }

    fn current_button(&self) -> Option<&Button> {
        self.button(self.current)
    }

    fn change_focused_button(&mut self, delta: isize) {
        let last = self.buttons.len().saturating_sub(1);
        self.current = self.current.saturating_add_signed(delta).min(last);
        tracing::trace!(
            target: targets::FOCUS,
            toolbar = %self.base.id(),
            current = self.current,
            "toolbar current button"
        );
    }

    fn collect_buttons(&mut self) {
        self.buttons = self
            .base
            .objects()
            .iter()
            .enumerate()
            .filter(|(_, object)| object.is::<Button>())
            .map(|(index, _)| index)
            .collect();
        self.current = self.current.min(self.buttons.len().saturating_sub(1));
    }
}

impl BaseWidget for Toolbar {
    type Renderer = ToolbarRenderer;

    fn base(&self) -> &WidgetBase<ToolbarRenderer> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase<ToolbarRenderer> {
        &mut self.base
    }
}

impl_widget_object!(Toolbar);

impl Widget for Toolbar {
    base_widget_methods!();

    fn refresh(&mut self) {
        if self.refresh_widget() {
            let current = self.current;
            self.collect_buttons();
            if self.current != current {
                self.refresh_widget();
            }
        }
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for Toolbar {
    fn focus_gained(&mut self, _ctx: &mut EventContext<'_>) {
        self.focused = true;
        self.refresh();
    }

    fn focus_lost(&mut self, _ctx: &mut EventContext<'_>) {
        self.focused = false;
        self.pressed = false;
        self.refresh();
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn typed_key(&mut self, event: &KeyEvent, _ctx: &mut EventContext<'_>) {
        if self.buttons.is_empty() {
            return;
        }
        let key = event.key;
        if key.is_activation() {
            if let Some(button) = self.current_button() {
                button.activate();
            }
        }
        if key.is_backward() {
            self.change_focused_button(-1);
        } else if key.is_forward() {
            self.change_focused_button(1);
        }
        self.refresh();
    }

    fn key_down(&mut self, event: &KeyEvent, _ctx: &mut EventContext<'_>) {
        if !self.buttons.is_empty() && event.key.is_activation() {
            self.pressed = true;
            self.refresh();
        }
    }

    fn key_up(&mut self, event: &KeyEvent, _ctx: &mut EventContext<'_>) {
        if !self.buttons.is_empty() && event.key.is_activation() {
            self.pressed = false;
            self.refresh();
        }
    }
}

impl fmt::Debug for Toolbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolbar")
            .field("id", &self.base.id())
            .field("items", &self.items.len())
            .field("buttons", &self.buttons)
            .field("current", &self.current)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Draws a [`Toolbar`]: one object per item, laid out in a row.
pub struct ToolbarRenderer {
    objects: Vec<Box<dyn CanvasObject>>,
    layout: BoxLayout,
    background: Color,
}

impl ToolbarRenderer {
    fn build(toolbar: &Toolbar) -> Self {
        let env = toolbar.base.env();
        let objects = toolbar
            .items
            .iter()
            .map(|item| item.toolbar_object(env))
            .collect();
        Self {
            objects,
            layout: BoxLayout::horizontal().with_spacing(env.padding()),
            background: env.theme().palette.button,
        }
    }
}

impl WidgetRenderer for ToolbarRenderer {
    type Widget = Toolbar;

    fn create(toolbar: &Toolbar) -> Self {
        let mut renderer = Self::build(toolbar);
        renderer.update_in_place(toolbar);
        renderer
    }

    fn min_size(&mut self) -> Size {
        self.layout.min_size(&mut self.objects)
    }

    fn layout(&mut self, size: Size) {
        self.layout.layout(&mut self.objects, size);
    }

    fn rebuild(&mut self, toolbar: &Toolbar) {
        *self = Self::create(toolbar);
    }

    fn update_in_place(&mut self, toolbar: &Toolbar) {
        let palette = &toolbar.base.env().theme().palette;
        self.background = palette.button;

        for (item, object) in toolbar.items.iter().zip(self.objects.iter_mut()) {
            if item.as_any().is::<ToolbarSeparator>() {
                if let Some(rect) = object.downcast_mut::<Rectangle>() {
                    rect.fill = palette.foreground;
                }
            }
        }

        let buttons = self
            .objects
            .iter_mut()
            .filter_map(|object| object.downcast_mut::<Button>());
        for (index, button) in buttons.enumerate() {
            let current = toolbar.focused && index == toolbar.current;
            button.set_focused(current);
            button.set_pressed(current && toolbar.pressed);
        }
    }

    fn background_color(&self) -> Color {
        self.background
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
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::canvas::Canvas;
    use crate::widget::Key;
    use trellis_core::{callback, ObjectId};

    fn action(name: &str) -> Box<dyn ToolbarItem> {
        Box::new(ToolbarAction::new(IconResource::themed(name), None))
    }

    fn focused_canvas(toolbar: Toolbar) -> (Canvas, ObjectId) {
        let mut canvas = Canvas::default();
        let id = toolbar.widget_id();
        canvas.set_content(Box::new(toolbar));
        canvas.focus(id).unwrap();
        (canvas, id)
    }

    fn toolbar(canvas: &Canvas, id: ObjectId) -> &Toolbar {
        canvas.widget::<Toolbar>(id).unwrap()
    }

    #[test]
    fn test_buttons_exclude_spacers_and_separators() {
        let toolbar = Toolbar::new(vec![
            action("a"),
            Box::new(ToolbarSeparator::new()),
            Box::new(ToolbarSpacer::new()),
            action("b"),
        ]);
        assert_eq!(toolbar.children().len(), 4);
        assert_eq!(toolbar.button_count(), 2);
    }

    #[test]
    fn test_append_and_prepend_rebuild() {
        let mut toolbar = Toolbar::new(vec![action("a")]);
        toolbar.append(Box::new(ToolbarSeparator::new()));
        toolbar.append(action("b"));
        toolbar.prepend(action("c"));

        assert_eq!(toolbar.items().len(), 4);
        assert_eq!(toolbar.children().len(), 4);
        assert_eq!(toolbar.button_count(), 3);
        assert_eq!(toolbar.button(0).and_then(|b| b.icon()).map(|i| i.name()), Some("c"));
    }

    #[test]
    fn test_min_size() {
        let mut toolbar = Toolbar::new(vec![action("a"), Box::new(ToolbarSeparator::new()), action("b")]);
        // Two 28px buttons, a 1px separator and two 4px gaps.
        assert_eq!(toolbar.min_size(), Size::new(65.0, 28.0));
    }

    #[test]
    fn test_separator_uses_foreground() {
        let toolbar = Toolbar::new(vec![Box::new(ToolbarSeparator::new())]);
        let env = Env::default();
        let fill = toolbar.children()[0].downcast_ref::<Rectangle>().map(|r| r.fill);
        assert_eq!(fill, Some(env.theme().palette.foreground));
        assert_eq!(toolbar.background_color(), env.theme().palette.button);
    }

    #[test]
    fn test_navigation_clamps() {
        let (mut canvas, id) = focused_canvas(Toolbar::new(vec![action("a"), action("b"), action("c")]));

        canvas.typed_key(Key::Left);
        assert_eq!(toolbar(&canvas, id).current_index(), 0);

        for _ in 0..5 {
            canvas.typed_key(Key::Right);
        }
        assert_eq!(toolbar(&canvas, id).current_index(), 2);

        canvas.typed_key(Key::Up);
        assert_eq!(toolbar(&canvas, id).current_index(), 1);
        canvas.typed_key(Key::Down);
        assert_eq!(toolbar(&canvas, id).current_index(), 2);
    }

    #[test]
    fn test_current_button_shows_focus() {
        let (mut canvas, id) = focused_canvas(Toolbar::new(vec![action("a"), action("b")]));
        canvas.typed_key(Key::Right);

        let bar = toolbar(&canvas, id);
        assert!(!bar.button(0).is_some_and(|b| b.is_focused()));
        assert!(bar.button(1).is_some_and(|b| b.is_focused()));

        canvas.unfocus();
        assert!(!toolbar(&canvas, id).button(1).is_some_and(|b| b.is_focused()));
    }

    #[test]
    fn test_activation_key_invokes_current_button() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let on_activated = callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let (mut canvas, _) = focused_canvas(Toolbar::new(vec![Box::new(ToolbarAction::new(
            IconResource::themed("go"),
            Some(on_activated),
        ))]));

        canvas.typed_key(Key::Return);
        canvas.typed_key(Key::Space);
        canvas.typed_key(Key::Escape);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_pressed_while_key_held() {
        let (mut canvas, id) = focused_canvas(Toolbar::new(vec![action("a")]));

        canvas.key_down(Key::Space);
        assert!(toolbar(&canvas, id).button(0).is_some_and(|b| b.is_pressed()));
        canvas.key_up(Key::Space);
        assert!(!toolbar(&canvas, id).button(0).is_some_and(|b| b.is_pressed()));
    }

    #[test]
    fn test_keys_are_noops_without_buttons() {
        let (mut canvas, id) = focused_canvas(Toolbar::new(vec![
            Box::new(ToolbarSpacer::new()),
            Box::new(ToolbarSeparator::new()),
        ]));
        canvas.typed_key(Key::Right);
        canvas.typed_key(Key::Return);
        canvas.key_down(Key::Return);
        assert_eq!(toolbar(&canvas, id).current_index(), 0);
        assert_eq!(toolbar(&canvas, id).button_count(), 0);
    }

    #[test]
    fn test_current_clamped_after_items_shrink() {
        let (mut canvas, id) = focused_canvas(Toolbar::new(vec![action("a"), action("b"), action("c")]));
        canvas.typed_key(Key::Right);
        canvas.typed_key(Key::Right);

        if let Some(bar) = canvas.widget_mut::<Toolbar>(id) {
            bar.set_items(vec![action("x")]);
        }
        assert_eq!(toolbar(&canvas, id).current_index(), 0);
        assert!(toolbar(&canvas, id).button(0).is_some_and(|b| b.is_focused()));
    }
}
