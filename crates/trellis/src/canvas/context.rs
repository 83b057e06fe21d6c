//! What an event handler may ask of the canvas.

use std::collections::HashMap;

use trellis_core::ObjectId;
use trellis_render::Point;

use super::overlay::OverlayStack;
use super::CanvasId;
use crate::env::Env;

/// A focus change asked for while an event was being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FocusRequest {
    Focus(ObjectId),
    Unfocus,
}

/// Handed to widget event handlers during dispatch.
///
/// Handlers cannot reach the canvas directly because the canvas is borrowed
/// for the dispatch itself. Overlay changes apply immediately; focus
/// requests are queued and the canvas applies them, in order, as soon as the
/// handler returns and before the public call that delivered the event
/// returns.
pub struct EventContext<'a> {
    canvas_id: CanvasId,
    env: &'a Env,
    positions: &'a HashMap<ObjectId, Point>,
    overlays: &'a mut OverlayStack,
    focused: Option<ObjectId>,
    requests: Vec<FocusRequest>,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(
        canvas_id: CanvasId,
        env: &'a Env,
        positions: &'a HashMap<ObjectId, Point>,
        overlays: &'a mut OverlayStack,
        focused: Option<ObjectId>,
    ) -> Self {
        Self {
            canvas_id,
            env,
            positions,
            overlays,
            focused,
            requests: Vec::new(),
        }
    }

    /// The canvas the event was delivered on.
    #[inline]
    pub fn canvas_id(&self) -> CanvasId {
        self.canvas_id
    }

    #[inline]
    pub fn env(&self) -> &Env {
        self.env
    }

    /// The widget that had focus when the event was delivered.
    #[inline]
    pub fn focused(&self) -> Option<ObjectId> {
        self.focused
    }

    /// Ask the canvas to focus `id`.
    pub fn request_focus(&mut self, id: ObjectId) {
        self.requests.push(FocusRequest::Focus(id));
    }

    /// Ask the canvas to clear focus.
    pub fn request_unfocus(&mut self) {
        self.requests.push(FocusRequest::Unfocus);
    }

    /// Show `id` on top of the canvas overlay stack.
    pub fn add_overlay(&mut self, id: ObjectId) {
        self.overlays.push(id);
    }

    /// Take `id` off the overlay stack.
    pub fn remove_overlay(&mut self, id: ObjectId) -> bool {
        self.overlays.remove(id)
    }

    /// Position of a widget's top-left corner in canvas coordinates, as of
    /// the start of this dispatch.
    pub fn absolute_position_for_object(&self, id: ObjectId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub(crate) fn into_requests(self) -> Vec<FocusRequest> {
        self.requests
    }
}
