//! Focus management for a canvas.
//!
//! [`FocusManager`] tracks which widget holds keyboard focus on one canvas.
//! It is a plain state machine over widget ids:
//!
//! ```text
//! Unfocused --set_focus(a)--> Focused(a) --set_focus(b)--> Focused(b)
//!     ^                                                        |
//!     +--------------------------clear_focus-------------------+
//! ```
//!
//! It never touches widgets itself. Each transition returns a
//! [`FocusChange`] and the canvas delivers `FocusLost` to the widget in
//! `lost` and then `FocusGained` to the widget in `gained`.
//!
//! # Tab Order
//!
//! Tab order is the depth-first pre-order of focusable widgets, the order
//! they are drawn in. The canvas collects that order and asks the manager
//! for the neighbour of the current widget; navigation wraps at both ends.

use trellis_core::logging::targets;
use trellis_core::ObjectId;

/// The widgets affected by a focus transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusChange {
    /// Widget that must receive `FocusLost`.
    pub lost: Option<ObjectId>,
    /// Widget that must receive `FocusGained`.
    pub gained: Option<ObjectId>,
}

impl FocusChange {
    /// Whether the transition changed nothing.
    pub fn is_empty(&self) -> bool {
        self.lost.is_none() && self.gained.is_none()
    }
}

/// Tracks the focused widget of one canvas.
#[derive(Debug, Default)]
pub struct FocusManager {
    /// The currently focused widget, if any.
    focused_widget: Option<ObjectId>,
}

impl FocusManager {
    /// Create a new focus manager with nothing focused.
    pub fn new() -> Self {
        Self {
            focused_widget: None,
        }
    }

    /// Get the currently focused widget.
    #[inline]
    pub fn focused_widget(&self) -> Option<ObjectId> {
        self.focused_widget
    }

    /// Check if a specific widget has focus.
    #[inline]
    pub fn has_focus(&self, widget_id: ObjectId) -> bool {
        self.focused_widget == Some(widget_id)
    }

    /// Move focus to `widget_id`.
    ///
    /// Focusing the widget that already has focus changes nothing.
    pub fn set_focus(&mut self, widget_id: ObjectId) -> FocusChange {
        if self.focused_widget == Some(widget_id) {
            return FocusChange::default();
        }

        let lost = self.focused_widget.replace(widget_id);
        tracing::debug!(
            target: targets::FOCUS,
            from = ?lost,
            to = %widget_id,
            "focus changed"
        );
        FocusChange {
            lost,
            gained: Some(widget_id),
        }
    }

    /// Remove focus from the focused widget, if any.
    pub fn clear_focus(&mut self) -> FocusChange {
        let lost = self.focused_widget.take();
        if let Some(id) = lost {
            tracing::debug!(target: targets::FOCUS, from = %id, "focus cleared");
        }
        FocusChange { lost, gained: None }
    }

    /// Drop focus without notifying anyone.
    ///
    /// Used when the focused widget no longer exists. Returns `true` if
    /// `widget_id` was the focused widget.
    pub fn forget(&mut self, widget_id: ObjectId) -> bool {
        if self.focused_widget == Some(widget_id) {
            self.focused_widget = None;
            tracing::trace!(target: targets::FOCUS, widget = %widget_id, "forgot removed widget");
            true
        } else {
            false
        }
    }

    /// The widget after the focused one in `tab_order`, wrapping to the
    /// first. With nothing focused (or the focused widget not in the order)
    /// this is the first widget.
    pub fn next_in_order(&self, tab_order: &[ObjectId]) -> Option<ObjectId> {
        let first = *tab_order.first()?;
        let Some(pos) = self.position_in(tab_order) else {
            return Some(first);
        };
        Some(tab_order[(pos + 1) % tab_order.len()])
    }

    /// The widget before the focused one in `tab_order`, wrapping to the
    /// last. With nothing focused this is the last widget.
    pub fn previous_in_order(&self, tab_order: &[ObjectId]) -> Option<ObjectId> {
        let last = *tab_order.last()?;
        let Some(pos) = self.position_in(tab_order) else {
            return Some(last);
        };
        let prev = if pos == 0 { tab_order.len() - 1 } else { pos - 1 };
        Some(tab_order[prev])
    }

    fn position_in(&self, tab_order: &[ObjectId]) -> Option<usize> {
        let focused = self.focused_widget?;
        tab_order.iter().position(|&id| id == focused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let manager = FocusManager::new();
        assert_eq!(manager.focused_widget(), None);
    }

    #[test]
    fn test_set_focus_reports_old_and_new() {
        let mut manager = FocusManager::new();
        let a = ObjectId::next();
        let b = ObjectId::next();

        let change = manager.set_focus(a);
        assert_eq!(change, FocusChange { lost: None, gained: Some(a) });

        let change = manager.set_focus(b);
        assert_eq!(change, FocusChange { lost: Some(a), gained: Some(b) });
        assert!(manager.has_focus(b));
        assert!(!manager.has_focus(a));
    }

    #[test]
    fn test_refocus_same_widget_is_empty() {
        let mut manager = FocusManager::new();
        let a = ObjectId::next();
        manager.set_focus(a);
        assert!(manager.set_focus(a).is_empty());
    }

    #[test]
    fn test_clear_focus() {
        let mut manager = FocusManager::new();
        let a = ObjectId::next();
        manager.set_focus(a);

        let change = manager.clear_focus();
        assert_eq!(change.lost, Some(a));
        assert_eq!(manager.focused_widget(), None);
        assert!(manager.clear_focus().is_empty());
    }

    #[test]
    fn test_forget_only_matching_widget() {
        let mut manager = FocusManager::new();
        let a = ObjectId::next();
        manager.set_focus(a);

        assert!(!manager.forget(ObjectId::next()));
        assert!(manager.forget(a));
        assert_eq!(manager.focused_widget(), None);
    }

    #[test]
    fn test_tab_order_wraps() {
        let mut manager = FocusManager::new();
        let ids = [ObjectId::next(), ObjectId::next(), ObjectId::next()];

        assert_eq!(manager.next_in_order(&ids), Some(ids[0]));
        assert_eq!(manager.previous_in_order(&ids), Some(ids[2]));

        manager.set_focus(ids[2]);
        assert_eq!(manager.next_in_order(&ids), Some(ids[0]));
        manager.set_focus(ids[0]);
        assert_eq!(manager.previous_in_order(&ids), Some(ids[2]));
        assert_eq!(manager.next_in_order(&[]), None);
    }
}
