//! Text styling and measurement.
//!
//! Layout needs to know how much room a string occupies before anything is
//! drawn. That question is answered by a [`TextMeasurer`], which the host
//! provides alongside its rendering backend. [`FixedAdvanceMeasurer`] is a
//! deterministic implementation suitable for headless use and tests.

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Size;

/// Font variations a piece of text can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    /// Heavier weight.
    pub bold: bool,
    /// Slanted glyphs.
    pub italic: bool,
    /// Fixed-pitch family.
    pub monospace: bool,
}

impl TextStyle {
    /// Regular upright proportional text.
    pub const NORMAL: Self = Self {
        bold: false,
        italic: false,
        monospace: false,
    };

    /// Bold upright text.
    pub const BOLD: Self = Self {
        bold: true,
        italic: false,
        monospace: false,
    };
}

/// Measures the space a string needs when drawn.
///
/// Implementations must be pure: the same inputs always give the same size.
/// Widgets cache min sizes computed through this trait and only re-measure
/// when their text or the theme changes.
pub trait TextMeasurer: Send + Sync {
    /// The size of `text` drawn at `size` points with `style`.
    ///
    /// Width is that of the longest line; height covers every line.
    fn measure_text(&self, text: &str, size: f32, style: TextStyle) -> Size;
}

/// A measurer that gives every grapheme cluster the same advance.
///
/// Each cluster is `advance_ratio * size` wide (bold adds
/// `bold_extra_ratio * size`), and each line is `line_height_ratio * size`
/// tall. Empty text still occupies one line so empty entries keep their
/// height.
#[derive(Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    advance_ratio: f32,
    bold_extra_ratio: f32,
    line_height_ratio: f32,
}

impl FixedAdvanceMeasurer {
    /// Create a measurer with explicit ratios.
    pub const fn new(advance_ratio: f32, line_height_ratio: f32) -> Self {
        Self {
            advance_ratio,
            bold_extra_ratio: 0.0,
            line_height_ratio,
        }
    }

    /// Set the extra advance added per cluster for bold text.
    pub const fn with_bold_extra(mut self, ratio: f32) -> Self {
        self.bold_extra_ratio = ratio;
        self
    }

    /// Width of a single grapheme cluster at the given size and style.
    pub fn advance(&self, size: f32, style: TextStyle) -> f32 {
        let mut ratio = self.advance_ratio;
        if style.bold {
            ratio += self.bold_extra_ratio;
        }
        ratio * size
    }

    /// Height of one line at the given size.
    pub fn line_height(&self, size: f32) -> f32 {
        self.line_height_ratio * size
    }
}

impl Default for FixedAdvanceMeasurer {
    /// Half-em advance with one and a half em lines.
    fn default() -> Self {
        Self::new(0.5, 1.5).with_bold_extra(0.125)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure_text(&self, text: &str, size: f32, style: TextStyle) -> Size {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.graphemes(true).count());
        }
        Size::new(
            widest as f32 * self.advance(size, style),
            lines as f32 * self.line_height(size),
        )
    }
}

impl fmt::Debug for FixedAdvanceMeasurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedAdvanceMeasurer")
            .field("advance", &self.advance_ratio)
            .field("line_height", &self.line_height_ratio)
            .finish()
    }
}
