//! Menu definitions.
//!
//! A [`Menu`] is plain data: an ordered list of labelled items, each with an
//! optional action. It is what a [`PopUpMenu`](super::PopUpMenu) draws.

use std::fmt;

use trellis_core::Callback;

/// One entry of a [`Menu`].
#[derive(Clone)]
pub struct MenuItem {
    pub label: String,
    /// Invoked when the item is activated.
    pub action: Option<Callback>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: Option<Callback>) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// An ordered list of menu items.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    pub label: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    /// A menu of items without actions, one per label.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            String::new(),
            labels.into_iter().map(|label| MenuItem::new(label, None)).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the first item labelled `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.items.iter().position(|item| item.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|item| item.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels() {
        let menu = Menu::from_labels(["a", "b", "b"]);
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.position("b"), Some(1));
        assert_eq!(menu.position("c"), None);
        assert_eq!(menu.labels().collect::<Vec<_>>(), vec!["a", "b", "b"]);
    }
}
