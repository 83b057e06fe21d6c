//! Box layout for arranging objects in a row or column.
//!
//! Objects are placed one after another along the main axis at their
//! minimum main-axis size and stretched to the full cross-axis size.
//! [`Spacer`](crate::scene::Spacer) objects take no room of their own and
//! share whatever main-axis space is left over, equally. Spacing is only
//! inserted between adjacent non-spacer objects. Hidden objects are skipped
//! entirely.
//!
//! When the container is smaller than the minimum size, objects keep their
//! minimum sizes and run past the end; spacers then get nothing.
//!
//! # Example
//!
//! ```ignore
//! use trellis::widget::layout::{BoxLayout, Layout};
//!
//! // [button] [spacer] [button] in a 200px wide toolbar
//! let layout = BoxLayout::horizontal().with_spacing(4.0);
//! layout.layout(&mut objects, Size::new(200.0, 28.0));
//! ```

use trellis_core::logging::targets;
use trellis_render::{Point, Size};

use super::Layout;
use crate::scene::CanvasObject;

/// Layout orientation for box layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Objects are arranged left to right.
    #[default]
    Horizontal,
    /// Objects are arranged top to bottom.
    Vertical,
}

impl Orientation {
    /// Get the cross (perpendicular) orientation.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A box layout that arranges objects horizontally or vertically.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxLayout {
    orientation: Orientation,
    /// Gap between adjacent non-spacer objects.
    spacing: f32,
}

impl BoxLayout {
    /// Create a box layout with no spacing.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            spacing: 0.0,
        }
    }

    /// Create a horizontal box layout.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create a vertical box layout.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Set the gap between adjacent non-spacer objects.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    // =========================================================================
    // Size Calculation Helpers
    // =========================================================================

    /// Get the main axis component of a size.
    #[inline]
    fn main_axis(&self, size: Size) -> f32 {
        match self.orientation {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Get the cross axis component of a size.
    #[inline]
    fn cross_axis(&self, size: Size) -> f32 {
        match self.orientation {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    /// Create a size from main and cross axis values.
    #[inline]
    fn make_size(&self, main: f32, cross: f32) -> Size {
        match self.orientation {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    #[inline]
    fn make_point(&self, main: f32, cross: f32) -> Point {
        match self.orientation {
            Orientation::Horizontal => Point::new(main, cross),
            Orientation::Vertical => Point::new(cross, main),
        }
    }

    /// Total spacing for `count` non-spacer objects.
    #[inline]
    fn total_spacing(&self, count: usize) -> f32 {
        self.spacing * count.saturating_sub(1) as f32
    }
}

impl Layout for BoxLayout {
    fn min_size(&self, objects: &mut [Box<dyn CanvasObject>]) -> Size {
        let mut main: f32 = 0.0;
        let mut cross: f32 = 0.0;
        let mut count = 0;

        for object in objects.iter_mut().filter(|o| o.is_visible() && !o.is_spacer()) {
            let min = object.min_size();
            main += self.main_axis(min);
            cross = cross.max(self.cross_axis(min));
            count += 1;
        }

        self.make_size(main + self.total_spacing(count), cross)
    }

    fn layout(&self, objects: &mut [Box<dyn CanvasObject>], size: Size) {
        let mut fixed: f32 = 0.0;
        let mut count = 0;
        let mut spacers = 0;
        for object in objects.iter_mut().filter(|o| o.is_visible()) {
            if object.is_spacer() {
                spacers += 1;
            } else {
                fixed += self.main_axis(object.min_size());
                count += 1;
            }
        }

        let available = self.main_axis(size);
        let extra = available - fixed - self.total_spacing(count);
        let spacer_share = if spacers > 0 {
            (extra / spacers as f32).max(0.0)
        } else {
            0.0
        };
        let cross = self.cross_axis(size);

        tracing::trace!(
            target: targets::LAYOUT,
            orientation = ?self.orientation,
            objects = count,
            spacers,
            available,
            extra,
            "box layout"
        );

        let mut offset: f32 = 0.0;
        let mut previous_fixed = false;
        for object in objects.iter_mut().filter(|o| o.is_visible()) {
            if object.is_spacer() {
                object.move_to(self.make_point(offset, 0.0));
                object.resize(self.make_size(spacer_share, cross));
                offset += spacer_share;
                continue;
            }

            if previous_fixed {
                offset += self.spacing;
            }
            let main = self.main_axis(object.min_size());
            object.move_to(self.make_point(offset, 0.0));
            object.resize(self.make_size(main, cross));
            offset += main;
            previous_fixed = true;
        }
    }
}

/// Type alias for a horizontal box layout.
pub type HBoxLayout = BoxLayout;

/// Type alias for a vertical box layout.
pub type VBoxLayout = BoxLayout;
