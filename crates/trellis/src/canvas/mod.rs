//! The canvas: a root widget, its overlays, and the input router.
//!
//! A [`Canvas`] owns one content widget and the focus state for everything
//! drawn on it. Input arrives through its public methods and is routed to
//! exactly one widget:
//!
//! - keyboard events go to the focused widget,
//! - taps go to the widget named by id,
//! - `FocusLost` / `FocusGained` go to the old and new focus owners.
//!
//! Overlays (pop-up menus) are owned by the widget that opened them and
//! registered on the canvas's [`OverlayStack`] by id. Their positions are
//! absolute. After every delivery the canvas drops overlays that were hidden
//! or discarded by their owner.
//!
//! # Example
//!
//! ```ignore
//! use trellis::canvas::Canvas;
//! use trellis::widget::{Key, widgets::{Toolbar, ToolbarAction}};
//!
//! let mut canvas = Canvas::new(Env::default());
//! let toolbar = Toolbar::new(vec![Box::new(ToolbarAction::new(icon, Some(save)))]);
//! let id = toolbar.widget_id();
//! canvas.set_content(Box::new(toolbar));
//! canvas.focus(id)?;
//! canvas.typed_key(Key::Return);
//! ```

mod context;
mod overlay;

pub use context::EventContext;
pub use overlay::OverlayStack;

use std::collections::HashMap;
use std::fmt;

use trellis_core::logging::targets;
use trellis_core::{Error, ObjectId, Result};
use trellis_render::{Point, Size};

use crate::env::Env;
use crate::scene::CanvasObject;
use crate::widget::{find_widget, find_widget_mut, FocusManager, Key, KeyEvent, Widget, WidgetEvent};
use context::FocusRequest;

/// Identity of a canvas.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasId(ObjectId);

impl CanvasId {
    fn next() -> Self {
        Self(ObjectId::next())
    }
}

impl fmt::Debug for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanvasId({})", self.0.as_u64())
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "canvas#{}", self.0.as_u64())
    }
}

/// A drawing surface with one content widget.
pub struct Canvas {
    id: CanvasId,
    env: Env,
    size: Size,
    content: Option<Box<dyn Widget>>,
    focus: FocusManager,
    overlays: OverlayStack,
    /// Absolute widget positions, rebuilt before each delivery.
    positions: HashMap<ObjectId, Point>,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(env: Env) -> Self {
        Self {
            id: CanvasId::next(),
            env,
            size: Size::ZERO,
            content: None,
            focus: FocusManager::new(),
            overlays: OverlayStack::new(),
            positions: HashMap::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> CanvasId {
        self.id
    }

    #[inline]
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Replace the environment and re-theme the content, rebuilding every
    /// renderer.
    pub fn set_env(&mut self, env: Env) {
        self.env = env;
        if let Some(content) = self.content.as_deref_mut() {
            content.set_env(&self.env);
        }
        self.fit_content();
    }

    // =========================================================================
    // Content and Size
    // =========================================================================

    /// Replace the content widget.
    ///
    /// The content takes the canvas environment, is placed at the origin and
    /// sized to the canvas (never below its minimum). Focus and overlays of
    /// the previous content are dropped.
    pub fn set_content(&mut self, mut content: Box<dyn Widget>) {
        if let Some(previous) = self.focus.focused_widget() {
            self.focus.forget(previous);
        }
        self.overlays.clear();

        content.set_env(&self.env);
        content.move_to(Point::ZERO);
        tracing::debug!(
            target: targets::WIDGET,
            canvas = %self.id,
            content = content.extended_type_name(),
            "content set"
        );
        self.content = Some(content);
        self.fit_content();
    }

    pub fn content(&self) -> Option<&dyn Widget> {
        self.content.as_deref()
    }

    pub fn content_mut(&mut self) -> Option<&mut dyn Widget> {
        self.content.as_deref_mut()
    }

    /// Remove and return the content widget.
    pub fn take_content(&mut self) -> Option<Box<dyn Widget>> {
        self.focus.clear_focus();
        self.overlays.clear();
        self.content.take()
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the canvas and lay the content out again.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.fit_content();
    }

    /// The content's minimum size, or zero without content.
    pub fn min_size(&mut self) -> Size {
        self.content
            .as_deref_mut()
            .map_or(Size::ZERO, |content| content.min_size())
    }

    /// Refresh the content widget.
    pub fn refresh(&mut self) {
        if let Some(content) = self.content.as_deref_mut() {
            content.refresh();
        }
    }

    fn fit_content(&mut self) {
        if let Some(content) = self.content.as_deref_mut() {
            let size = self.size.max(content.min_size());
            content.resize(size);
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Find a widget attached to this canvas, overlays included.
    pub fn find_widget(&self, id: ObjectId) -> Option<&dyn Widget> {
        find_widget(self.content.as_deref()?, id)
    }

    pub fn find_widget_mut(&mut self, id: ObjectId) -> Option<&mut dyn Widget> {
        find_widget_mut(self.content.as_deref_mut()?, id)
    }

    /// Find a widget of a known type.
    pub fn widget<T: Widget>(&self, id: ObjectId) -> Option<&T> {
        self.find_widget(id)?.as_any().downcast_ref::<T>()
    }

    pub fn widget_mut<T: Widget>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.find_widget_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Find a widget of a known type, reporting why it is unavailable.
    pub fn try_widget_mut<T: Widget>(&mut self, id: ObjectId) -> Result<&mut T> {
        let widget = self.find_widget_mut(id).ok_or(Error::ObjectNotFound(id))?;
        widget.as_any_mut().downcast_mut::<T>().ok_or(Error::WrongType {
            id,
            expected: short_type_name::<T>(),
        })
    }

    /// Position of a widget's top-left corner in canvas coordinates.
    pub fn absolute_position_for_object(&self, id: ObjectId) -> Option<Point> {
        let content = self.content.as_deref()?;
        position_of(content, Point::ZERO, id)
    }

    /// Visible overlays, bottom to top.
    pub fn overlays(&self) -> OverlayStack {
        let mut live = self.overlays.clone();
        live.retain(|id| self.find_widget(id).is_some_and(|w| w.is_visible()));
        live
    }

    /// Visit every visible object: the content tree, then each overlay.
    ///
    /// The callback receives the object, its absolute position and its depth
    /// below the root it was reached from.
    pub fn walk(&self, mut visit: impl FnMut(&dyn CanvasObject, Point, usize)) {
        if let Some(content) = self.content.as_deref() {
            walk_object(content, Point::ZERO, 0, &mut visit);
        }
        for id in self.overlays().iter() {
            if let Some(overlay) = self.find_widget(id) {
                walk_object(overlay, Point::ZERO, 0, &mut visit);
            }
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The focused widget.
    ///
    /// A widget discarded by its owner outside event delivery (a drop-down
    /// closed from code) no longer counts as focused.
    pub fn focused(&self) -> Option<ObjectId> {
        self.focus
            .focused_widget()
            .filter(|&id| self.find_widget(id).is_some())
    }

    /// Give keyboard focus to `id`.
    ///
    /// The previous owner receives `FocusLost` before `id` receives
    /// `FocusGained`. Focusing the owner again does nothing.
    pub fn focus(&mut self, id: ObjectId) -> Result<()> {
        self.settle();
        let widget = self.find_widget_mut(id).ok_or(Error::ObjectNotFound(id))?;
        if widget.as_focusable().is_none() {
            return Err(Error::NotFocusable(id));
        }
        let change = self.focus.set_focus(id);
        if let Some(lost) = change.lost {
            self.deliver(lost, WidgetEvent::FocusLost);
        }
        if let Some(gained) = change.gained {
            self.deliver(gained, WidgetEvent::FocusGained);
        }
        Ok(())
    }

    /// Clear keyboard focus.
    pub fn unfocus(&mut self) {
        self.settle();
        if let Some(lost) = self.focus.clear_focus().lost {
            self.deliver(lost, WidgetEvent::FocusLost);
        }
    }

    /// Move focus to the next focusable widget in tab order, wrapping.
    pub fn focus_next(&mut self) -> bool {
        self.settle();
        let order = self.tab_order();
        match self.focus.next_in_order(&order) {
            Some(next) if Some(next) != self.focused() => self.focus(next).is_ok(),
            _ => false,
        }
    }

    /// Move focus to the previous focusable widget in tab order, wrapping.
    pub fn focus_previous(&mut self) -> bool {
        self.settle();
        let order = self.tab_order();
        match self.focus.previous_in_order(&order) {
            Some(previous) if Some(previous) != self.focused() => self.focus(previous).is_ok(),
            _ => false,
        }
    }

    fn tab_order(&mut self) -> Vec<ObjectId> {
        let mut order = Vec::new();
        if let Some(content) = self.content.as_deref_mut() {
            collect_focusable(content, &mut order);
        }
        order
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Deliver a typed key to the focused widget.
    ///
    /// Tab and Shift+Tab move focus through the tab order instead of reaching
    /// a widget. Returns `false` if nothing has focus.
    pub fn typed_key(&mut self, event: impl Into<KeyEvent>) -> bool {
        let event = event.into();
        if event.key == Key::Tab {
            return if event.modifiers.shift {
                self.focus_previous()
            } else {
                self.focus_next()
            };
        }
        self.deliver_to_focused(WidgetEvent::TypedKey(event))
    }

    /// Deliver a typed character to the focused widget.
    pub fn typed_rune(&mut self, ch: char) -> bool {
        self.deliver_to_focused(WidgetEvent::TypedRune(ch))
    }

    pub fn key_down(&mut self, event: impl Into<KeyEvent>) -> bool {
        self.deliver_to_focused(WidgetEvent::KeyDown(event.into()))
    }

    pub fn key_up(&mut self, event: impl Into<KeyEvent>) -> bool {
        self.deliver_to_focused(WidgetEvent::KeyUp(event.into()))
    }

    /// Tap the widget `id`.
    pub fn tap(&mut self, id: ObjectId) -> Result<()> {
        if self.find_widget(id).is_none() {
            return Err(Error::ObjectNotFound(id));
        }
        self.deliver(id, WidgetEvent::Tapped);
        Ok(())
    }

    fn deliver_to_focused(&mut self, event: WidgetEvent) -> bool {
        self.settle();
        match self.focus.focused_widget() {
            Some(target) => self.deliver(target, event),
            None => false,
        }
    }

    /// Dispatch `event` to `target`, then settle overlays and focus.
    fn deliver(&mut self, target: ObjectId, event: WidgetEvent) -> bool {
        self.positions.clear();
        if let Some(content) = self.content.as_deref() {
            index_positions(content, Point::ZERO, &mut self.positions);
        }

        let mut ctx = EventContext::new(
            self.id,
            &self.env,
            &self.positions,
            &mut self.overlays,
            self.focus.focused_widget(),
        );
        let reached = match self.content.as_deref_mut() {
            Some(content) => content.dispatch(target, &event, &mut ctx),
            None => false,
        };
        let requests = ctx.into_requests();

        if !reached {
            tracing::trace!(target: targets::FOCUS, %target, ?event, "event target not attached");
        }

        self.settle();

        for request in requests {
            match request {
                FocusRequest::Focus(id) => {
                    if let Err(err) = self.focus(id) {
                        tracing::debug!(target: targets::FOCUS, %err, "focus request ignored");
                    }
                }
                FocusRequest::Unfocus => self.unfocus(),
            }
        }
        reached
    }

    /// Drop overlays and focus left behind by widgets that were hidden or
    /// discarded by their owner.
    fn settle(&mut self) {
        self.prune_overlays();
        if let Some(focused) = self.focus.focused_widget() {
            if self.find_widget(focused).is_none() {
                tracing::debug!(target: targets::FOCUS, %focused, "focused widget detached");
                self.focus.forget(focused);
            }
        }
    }

    /// Drop overlays that were hidden or discarded by their owner.
    fn prune_overlays(&mut self) {
        let live = self.overlays();
        if live.len() != self.overlays.len() {
            tracing::trace!(
                target: targets::OVERLAY,
                removed = self.overlays.len() - live.len(),
                "pruned overlays"
            );
            self.overlays = live;
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Env::default())
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("content", &self.content.as_ref().map(|c| c.extended_type_name()))
            .field("focused", &self.focus.focused_widget())
            .field("overlays", &self.overlays)
            .finish()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

fn index_positions(widget: &dyn Widget, origin: Point, out: &mut HashMap<ObjectId, Point>) {
    let absolute = origin + widget.position();
    out.insert(widget.widget_id(), absolute);
    if let Some(overlay) = widget.overlay() {
        index_positions(overlay, Point::ZERO, out);
    }
    for child in widget.children() {
        if let Some(child) = child.as_widget() {
            index_positions(child, absolute, out);
        }
    }
}

fn position_of(widget: &dyn Widget, origin: Point, id: ObjectId) -> Option<Point> {
    let absolute = origin + widget.position();
    if widget.widget_id() == id {
        return Some(absolute);
    }
    if let Some(found) = widget.overlay().and_then(|overlay| position_of(overlay, Point::ZERO, id)) {
        return Some(found);
    }
    widget
        .children()
        .iter()
        .filter_map(|child| child.as_widget())
        .find_map(|child| position_of(child, absolute, id))
}

fn collect_focusable(widget: &mut dyn Widget, order: &mut Vec<ObjectId>) {
    if !widget.is_visible() {
        return;
    }
    if widget.as_focusable().is_some() {
        order.push(widget.widget_id());
    }
    for child in widget.children_mut() {
        if let Some(child) = child.as_widget_mut() {
            collect_focusable(child, order);
        }
    }
}

fn walk_object(
    object: &dyn CanvasObject,
    origin: Point,
    depth: usize,
    visit: &mut dyn FnMut(&dyn CanvasObject, Point, usize),
) {
    if !object.is_visible() {
        return;
    }
    let absolute = origin + object.position();
    visit(object, absolute, depth);
    if let Some(widget) = object.as_widget() {
        for child in widget.children() {
            walk_object(child.as_ref(), absolute, depth + 1, visit);
        }
    }
}
