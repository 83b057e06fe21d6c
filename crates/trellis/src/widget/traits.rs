//! Core widget trait definitions.
//!
//! # Key Types
//!
//! - [`Widget`] - Object-safe trait for every widget in the scene graph
//! - [`Focusable`] - Widgets that take keyboard focus
//! - [`Tappable`] - Widgets that react to taps
//!
//! # Related Types
//!
//! - [`super::BaseWidget`] - Renderer lifecycle shared by widgets
//! - [`super::WidgetEvent`] - Events routed to widgets
//! - [`crate::canvas::EventContext`] - What a handler may ask of the canvas

use trellis_core::ObjectId;
use trellis_render::Color;

use super::events::{KeyEvent, WidgetEvent};
use crate::canvas::EventContext;
use crate::env::Env;
use crate::scene::CanvasObject;

/// A widget: a canvas object with identity, a renderer and input handling.
///
/// Widgets built on [`super::BaseWidget`] get most of this trait from the
/// `base_widget_methods!` macro and only write [`refresh`](Widget::refresh)
/// and the capability accessors themselves.
pub trait Widget: CanvasObject {
    /// Identity of this widget.
    fn widget_id(&self) -> ObjectId;

    /// Short name of the most derived widget type, for debug output.
    fn extended_type_name(&self) -> &'static str;

    /// Re-derive the renderer's objects from current state.
    fn refresh(&mut self);

    /// Apply a new environment to this widget and everything it owns.
    fn set_env(&mut self, env: &Env);

    /// Colour drawn behind the widget's objects.
    fn background_color(&self) -> Color {
        Color::TRANSPARENT
    }

    /// The renderer's objects, positioned relative to this widget.
    fn children(&self) -> &[Box<dyn CanvasObject>];

    fn children_mut(&mut self) -> &mut [Box<dyn CanvasObject>];

    /// An overlay owned by this widget but drawn on the canvas overlay
    /// stack, with an absolute position.
    fn overlay(&self) -> Option<&dyn Widget> {
        None
    }

    fn overlay_mut(&mut self) -> Option<&mut dyn Widget> {
        None
    }

    /// This widget's keyboard handlers, if it can take focus.
    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        None
    }

    /// This widget's tap handler, if it reacts to taps.
    fn as_tappable(&mut self) -> Option<&mut dyn Tappable> {
        None
    }

    /// Handle an event addressed to this widget.
    ///
    /// Returns `true` if the widget had a handler for it.
    fn handle_event(&mut self, event: &WidgetEvent, ctx: &mut EventContext<'_>) -> bool {
        if let WidgetEvent::Tapped = event {
            return match self.as_tappable() {
                Some(tappable) => {
                    tappable.tapped(ctx);
                    true
                }
                None => false,
            };
        }

        let Some(focusable) = self.as_focusable() else {
            return false;
        };
        match event {
            WidgetEvent::FocusGained => focusable.focus_gained(ctx),
            WidgetEvent::FocusLost => focusable.focus_lost(ctx),
            WidgetEvent::TypedKey(key) => focusable.typed_key(key, ctx),
            WidgetEvent::TypedRune(ch) => focusable.typed_rune(*ch, ctx),
            WidgetEvent::KeyDown(key) => focusable.key_down(key, ctx),
            WidgetEvent::KeyUp(key) => focusable.key_up(key, ctx),
            WidgetEvent::Tapped => {}
        }
        true
    }

    /// Route `event` to the widget `target` in this subtree.
    ///
    /// Checks this widget, then its overlay, then its children. Returns
    /// `true` once the target was reached, whether or not it handled the
    /// event. Widgets that intercept events for their children override
    /// this.
    fn dispatch(&mut self, target: ObjectId, event: &WidgetEvent, ctx: &mut EventContext<'_>) -> bool {
        if self.widget_id() == target {
            self.handle_event(event, ctx);
            return true;
        }
        if let Some(overlay) = self.overlay_mut() {
            if overlay.dispatch(target, event, ctx) {
                return true;
            }
        }
        self.children_mut()
            .iter_mut()
            .filter_map(|child| child.as_widget_mut())
            .any(|child| child.dispatch(target, event, ctx))
    }
}

/// Keyboard focus handlers.
///
/// Every handler has an empty default so a widget only writes the ones it
/// reacts to.
pub trait Focusable {
    fn focus_gained(&mut self, _ctx: &mut EventContext<'_>) {}

    fn focus_lost(&mut self, _ctx: &mut EventContext<'_>) {}

    fn is_focused(&self) -> bool;

    /// A character was typed.
    fn typed_rune(&mut self, _ch: char, _ctx: &mut EventContext<'_>) {}

    /// A named key was typed.
    fn typed_key(&mut self, _event: &KeyEvent, _ctx: &mut EventContext<'_>) {}

    fn key_down(&mut self, _event: &KeyEvent, _ctx: &mut EventContext<'_>) {}

    fn key_up(&mut self, _event: &KeyEvent, _ctx: &mut EventContext<'_>) {}
}

/// Tap handler.
pub trait Tappable {
    fn tapped(&mut self, ctx: &mut EventContext<'_>);
}

/// Find the widget `id` in the subtree rooted at `root`, including
/// overlays owned by widgets in that subtree.
pub fn find_widget(root: &dyn Widget, id: ObjectId) -> Option<&dyn Widget> {
    if root.widget_id() == id {
        return Some(root);
    }
    if let Some(found) = root.overlay().and_then(|overlay| find_widget(overlay, id)) {
        return Some(found);
    }
    root.children()
        .iter()
        .filter_map(|child| child.as_widget())
        .find_map(|child| find_widget(child, id))
}

/// Find the widget `id` in the subtree rooted at `root`, mutably.
pub fn find_widget_mut(root: &mut dyn Widget, id: ObjectId) -> Option<&mut dyn Widget> {
    if root.widget_id() == id {
        return Some(root);
    }
    if root
        .overlay()
        .is_some_and(|overlay| find_widget(overlay, id).is_some())
    {
        return root.overlay_mut().and_then(|overlay| find_widget_mut(overlay, id));
    }
    let index = root.children().iter().position(|child| {
        child
            .as_widget()
            .is_some_and(|widget| find_widget(widget, id).is_some())
    })?;
    root.children_mut()[index]
        .as_widget_mut()
        .and_then(|widget| find_widget_mut(widget, id))
}
