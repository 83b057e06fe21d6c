//! Debug utilities for visualizing scene graphs.
//!
//! ```ignore
//! use trellis::scene::SceneTreeDebug;
//!
//! let debug = SceneTreeDebug::new();
//! println!("{}", debug.format_canvas(&canvas));
//! ```

use std::fmt::Write as FmtWrite;

use super::CanvasObject;
use crate::canvas::Canvas;

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for scene tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show widget IDs.
    pub show_ids: bool,
    /// Whether to show position and size.
    pub show_geometry: bool,
    /// Whether hidden objects are listed.
    pub show_hidden: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_geometry: true,
            show_hidden: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_geometry: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing scene graphs.
#[derive(Debug, Clone, Default)]
pub struct SceneTreeDebug {
    options: TreeFormatOptions,
}

impl SceneTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format a canvas: its content tree followed by each overlay.
    pub fn format_canvas(&self, canvas: &Canvas) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Canvas {} ({} overlays):", canvas.id(), canvas.overlays().len());
        match canvas.content() {
            Some(content) => self.format_into(content, 0, true, &mut output),
            None => output.push_str("  (empty)\n"),
        }
        for id in canvas.overlays().iter() {
            if let Some(overlay) = canvas.find_widget(id) {
                self.format_into(overlay, 0, true, &mut output);
            }
        }
        output
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, root: &dyn CanvasObject) -> String {
        let mut output = String::new();
        self.format_into(root, 0, true, &mut output);
        output
    }

    fn format_into(&self, object: &dyn CanvasObject, depth: usize, is_last: bool, output: &mut String) {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return;
            }
        }
        if !object.is_visible() && !self.options.show_hidden {
            return;
        }

        output.push_str(&self.build_prefix(depth, is_last));

        let widget = object.as_widget();
        match widget {
            Some(widget) => output.push_str(widget.extended_type_name()),
            None => output.push_str(object.type_name()),
        }

        if self.options.show_ids {
            if let Some(widget) = widget {
                let _ = write!(output, " [{}]", widget.widget_id());
            }
        }

        if self.options.show_geometry {
            let pos = object.position();
            let size = object.size();
            let _ = write!(output, " @({}, {}) {}x{}", pos.x, pos.y, size.width, size.height);
        }

        if !object.is_visible() {
            output.push_str(" (hidden)");
        }

        output.push('\n');

        let Some(widget) = widget else {
            return;
        };
        let children: Vec<&dyn CanvasObject> = widget
            .children()
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| c.is_visible() || self.options.show_hidden)
            .collect();
        let child_count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.format_into(child, depth + 1, i + 1 == child_count, output);
        }
    }

    /// Build the prefix string for a tree node.
    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Rectangle;
    use crate::widget::widgets::{Toolbar, ToolbarAction, ToolbarSeparator};
    use trellis_render::{Color, IconResource};

    #[test]
    fn test_primitive_is_a_single_line() {
        let debug = SceneTreeDebug::with_options(TreeFormatOptions::minimal());
        let rect = Rectangle::new(Color::WHITE);
        assert_eq!(debug.format_subtree(&rect), "Rectangle\n");
    }

    #[test]
    fn test_toolbar_tree_lists_buttons() {
        let toolbar = Toolbar::new(vec![
            Box::new(ToolbarAction::new(IconResource::themed("save"), None)),
            Box::new(ToolbarSeparator::new()),
        ]);

        let debug = SceneTreeDebug::with_options(TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::minimal()
        });
        let out = debug.format_subtree(&toolbar);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Toolbar");
        assert!(lines[1].starts_with("+-- Button"));
        assert_eq!(lines.last().copied(), Some("`-- Rectangle"));
    }
}
