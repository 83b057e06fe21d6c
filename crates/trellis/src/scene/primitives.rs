//! Primitive drawable objects.
//!
//! These are the leaves of the scene graph. A rendering backend only has to
//! know how to draw these four types; everything else is composed from them.

use std::any::Any;

use trellis_render::{Color, IconResource, Point, Size, TextStyle};

use super::CanvasObject;
use crate::env::Env;

/// Geometry shared by all primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Geometry {
    position: Point,
    size: Size,
    visible: bool,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            size: Size::ZERO,
            visible: true,
        }
    }
}

/// Implements [`CanvasObject`] for a primitive with a `geometry` field and a
/// `min_size()` inherent method.
macro_rules! impl_primitive {
    ($ty:ty) => {
        impl CanvasObject for $ty {
            fn position(&self) -> Point {
                self.geometry.position
            }

            fn move_to(&mut self, position: Point) {
                self.geometry.position = position;
            }

            fn size(&self) -> Size {
                self.geometry.size
            }

            fn resize(&mut self, size: Size) {
                self.geometry.size = size;
            }

            fn min_size(&mut self) -> Size {
                <$ty>::min_size(self)
            }

            fn is_visible(&self) -> bool {
                self.geometry.visible
            }

            fn show(&mut self) {
                self.geometry.visible = true;
            }

            fn hide(&mut self) {
                self.geometry.visible = false;
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }
    };
}

// ============================================================================
// Rectangle
// ============================================================================

/// A filled rectangle with an optional outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    geometry: Geometry,
    /// Interior colour.
    pub fill: Color,
    /// Outline colour. Not drawn when transparent or when the width is zero.
    pub stroke: Color,
    pub stroke_width: f32,
    min: Size,
}

impl Rectangle {
    /// A filled rectangle with no outline and no minimum size.
    pub fn new(fill: Color) -> Self {
        Self {
            geometry: Geometry::default(),
            fill,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
            min: Size::ZERO,
        }
    }

    /// Set the outline.
    pub fn with_stroke(mut self, stroke: Color, width: f32) -> Self {
        self.stroke = stroke;
        self.stroke_width = width;
        self
    }

    /// Set the minimum size reported to layouts.
    pub fn with_min_size(mut self, min: Size) -> Self {
        self.min = min;
        self
    }

    pub fn set_min_size(&mut self, min: Size) {
        self.min = min;
    }

    pub fn min_size(&self) -> Size {
        self.min
    }
}

impl_primitive!(Rectangle);

// ============================================================================
// Text
// ============================================================================

/// A single run of text.
///
/// The minimum size is measured when the text is set and cached, so layout
/// never calls back into the text measurer.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    geometry: Geometry,
    text: String,
    text_size: f32,
    style: TextStyle,
    /// Glyph colour.
    pub color: Color,
    min: Size,
}

impl Text {
    /// Text at the theme's body size, measured with `env`.
    pub fn new(text: impl Into<String>, color: Color, env: &Env) -> Self {
        Self::with_style(text, env.theme().text_size(), TextStyle::NORMAL, color, env)
    }

    /// Text with an explicit size and style, measured with `env`.
    pub fn with_style(
        text: impl Into<String>,
        text_size: f32,
        style: TextStyle,
        color: Color,
        env: &Env,
    ) -> Self {
        let text = text.into();
        let min = env.measure_text(&text, text_size, style);
        Self {
            geometry: Geometry::default(),
            text,
            text_size,
            style,
            color,
            min,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, re-measuring only if it changed.
    pub fn set_text(&mut self, text: &str, env: &Env) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
            self.min = env.measure_text(&self.text, self.text_size, self.style);
        }
    }

    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn min_size(&self) -> Size {
        self.min
    }
}

impl_primitive!(Text);

// ============================================================================
// Icon
// ============================================================================

/// An icon drawn at its assigned size.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    geometry: Geometry,
    resource: Option<IconResource>,
    min: Size,
}

impl Icon {
    /// An icon whose minimum size is a square of `edge` pixels.
    pub fn new(resource: Option<IconResource>, edge: f32) -> Self {
        Self {
            geometry: Geometry::default(),
            resource,
            min: Size::new(edge, edge),
        }
    }

    pub fn resource(&self) -> Option<&IconResource> {
        self.resource.as_ref()
    }

    pub fn set_resource(&mut self, resource: Option<IconResource>) {
        self.resource = resource;
    }

    pub fn min_size(&self) -> Size {
        self.min
    }
}

impl_primitive!(Icon);

// ============================================================================
// Spacer
// ============================================================================

/// Invisible space that box layouts stretch to fill leftover room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spacer {
    geometry: Geometry,
}

impl Spacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_size(&self) -> Size {
        Size::ZERO
    }
}

impl CanvasObject for Spacer {
    fn position(&self) -> Point {
        self.geometry.position
    }

    fn move_to(&mut self, position: Point) {
        self.geometry.position = position;
    }

    fn size(&self) -> Size {
        self.geometry.size
    }

    fn resize(&mut self, size: Size) {
        self.geometry.size = size;
    }

    fn min_size(&mut self) -> Size {
        Size::ZERO
    }

    fn is_visible(&self) -> bool {
        self.geometry.visible
    }

    fn show(&mut self) {
        self.geometry.visible = true;
    }

    fn hide(&mut self) {
        self.geometry.visible = false;
    }

    fn is_spacer(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_measures_on_creation() {
        let env = Env::default();
        let text = Text::new("Save", Color::BLACK, &env);
        assert_eq!(text.min_size(), Size::new(28.0, 21.0));
    }

    #[test]
    fn test_text_remeasures_on_change() {
        let env = Env::default();
        let mut text = Text::new("a", Color::BLACK, &env);
        text.set_text("abcd", &env);
        assert_eq!(text.min_size().width, 28.0);
        assert_eq!(text.text(), "abcd");
    }

    #[test]
    fn test_visibility() {
        let mut rect: Box<dyn CanvasObject> = Box::new(Rectangle::new(Color::WHITE));
        assert!(rect.is_visible());
        rect.hide();
        assert!(!rect.is_visible());
        rect.show();
        assert!(rect.is_visible());
    }

    #[test]
    fn test_only_spacer_is_spacer() {
        let objects: Vec<Box<dyn CanvasObject>> = vec![
            Box::new(Rectangle::new(Color::WHITE)),
            Box::new(Spacer::new()),
            Box::new(Icon::new(None, 20.0)),
        ];
        let spacers: Vec<bool> = objects.iter().map(|o| o.is_spacer()).collect();
        assert_eq!(spacers, vec![false, true, false]);
        assert!(objects[1].is::<Spacer>());
    }

    #[test]
    fn test_type_name_is_short() {
        let rect: Box<dyn CanvasObject> = Box::new(Rectangle::new(Color::WHITE));
        assert_eq!(rect.type_name(), "Rectangle");
    }
}
