//! The canvas overlay stack.

use trellis_core::logging::targets;
use trellis_core::ObjectId;

/// Ids of the overlays shown on a canvas, bottom to top.
///
/// The stack does not own the overlay widgets; each overlay is owned by the
/// widget that opened it and is registered here by id so it is drawn above
/// the content and receives events first.
#[derive(Debug, Default, Clone)]
pub struct OverlayStack {
    ids: Vec<ObjectId>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `id` on top. An id already on the stack is moved to the top.
    pub fn push(&mut self, id: ObjectId) {
        self.ids.retain(|&existing| existing != id);
        self.ids.push(id);
        tracing::trace!(target: targets::OVERLAY, overlay = %id, depth = self.ids.len(), "overlay added");
    }

    /// Remove `id`. Returns whether it was on the stack.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&existing| existing != id);
        let removed = self.ids.len() != before;
        if removed {
            tracing::trace!(target: targets::OVERLAY, overlay = %id, depth = self.ids.len(), "overlay removed");
        }
        removed
    }

    /// The topmost overlay.
    pub fn top(&self) -> Option<ObjectId> {
        self.ids.last().copied()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids.iter().copied()
    }

    /// Keep only the overlays for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(ObjectId) -> bool) {
        self.ids.retain(|&id| keep(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
