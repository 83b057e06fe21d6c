//! Button widget implementation.
//!
//! This module provides [`Button`], a tappable control showing an icon, a
//! label, or both. Buttons are what toolbar actions realise as, what an
//! entry's action item is drawn with, and what pop-up menu rows are.
//!
//! # Example
//!
//! ```ignore
//! use trellis::widget::widgets::Button;
//! use trellis_core::callback;
//!
//! let save = Button::new("Save").with_on_tapped(callback(|| println!("saved")));
//! let open = Button::icon_only(IconResource::themed(names::DOCUMENT_OPEN));
//! ```

use trellis_core::logging::targets;
use trellis_core::Callback;
use trellis_render::{Color, IconResource, Point, Size};

use crate::canvas::EventContext;
use crate::env::Env;
use crate::scene::{CanvasObject, Icon, Rectangle, Text};
use crate::widget::base::{base_widget_methods, impl_widget_object};
use crate::widget::{BaseWidget, Tappable, Widget, WidgetBase, WidgetRenderer};

/// Width of the outline drawn around a focused button.
const FOCUS_OUTLINE_WIDTH: f32 = 2.0;

/// A tappable button with an optional icon and an optional label.
///
/// # Visual States
///
/// - **Normal**: button face colour (transparent when flat)
/// - **Focused**: focus outline; flat buttons fill with the primary colour
/// - **Pressed**: pressed colour, set while an activation key is held
pub struct Button {
    base: WidgetBase<ButtonRenderer>,
    text: String,
    icon: Option<IconResource>,
    on_tapped: Option<Callback>,
    /// Drawn without a face until focused, as menu rows are.
    flat: bool,
    focused: bool,
    pressed: bool,
}

impl Button {
    /// Create a button with a text label.
    pub fn new(text: impl Into<String>) -> Self {
        Self::build(text.into(), None)
    }

    /// Create a button showing only an icon.
    pub fn icon_only(icon: IconResource) -> Self {
        Self::build(String::new(), Some(icon))
    }

    fn build(text: String, icon: Option<IconResource>) -> Self {
        let mut button = Self {
            base: WidgetBase::new(Env::default()),
            text,
            icon,
            on_tapped: None,
            flat: false,
            focused: false,
            pressed: false,
        };
        button.base.extend_base_widget::<Button>();
        button
    }

    /// Set the handler invoked when the button is tapped or activated.
    pub fn with_on_tapped(mut self, on_tapped: Callback) -> Self {
        self.on_tapped = Some(on_tapped);
        self
    }

    /// Add or replace the icon.
    pub fn with_icon(mut self, icon: IconResource) -> Self {
        self.set_icon(Some(icon));
        self
    }

    /// Measure and style the button with `env`.
    pub fn with_env(mut self, env: &Env) -> Self {
        self.set_widget_env(env);
        self
    }

    /// Draw the button without a face until it is focused.
    pub fn with_flat(mut self, flat: bool) -> Self {
        self.flat = flat;
        self.refresh_if_created();
        self
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label. An empty label removes it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        if self.text.is_empty() != text.is_empty() {
            self.base.mark_structure_changed();
        }
        self.text = text;
        self.refresh_if_created();
    }

    pub fn icon(&self) -> Option<&IconResource> {
        self.icon.as_ref()
    }

    pub fn set_icon(&mut self, icon: Option<IconResource>) {
        if self.icon.is_some() != icon.is_some() {
            self.base.mark_structure_changed();
        }
        self.icon = icon;
        self.refresh_if_created();
    }

    pub fn set_on_tapped(&mut self, on_tapped: Option<Callback>) {
        self.on_tapped = on_tapped;
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.flat
    }

    // =========================================================================
    // State
    // =========================================================================

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Show or clear the focused visual state.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.refresh_if_created();
        }
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Show or clear the pressed visual state.
    pub fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.refresh_if_created();
        }
    }

    /// Invoke the tap handler.
    pub fn activate(&self) {
        if let Some(on_tapped) = &self.on_tapped {
            tracing::trace!(target: targets::WIDGET, button = %self.base.id(), "button activated");
            on_tapped();
        }
    }

    fn refresh_if_created(&mut self) {
        if self.base.has_renderer() {
            self.refresh_widget();
        }
    }
}

impl BaseWidget for Button {
    type Renderer = ButtonRenderer;

    fn base(&self) -> &WidgetBase<ButtonRenderer> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase<ButtonRenderer> {
        &mut self.base
    }
}

impl_widget_object!(Button);

impl Widget for Button {
    base_widget_methods!();

    fn refresh(&mut self) {
        self.refresh_widget();
    }

    fn as_tappable(&mut self) -> Option<&mut dyn Tappable> {
        Some(self)
    }
}

impl Tappable for Button {
    fn tapped(&mut self, _ctx: &mut EventContext<'_>) {
        self.activate();
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.base.id())
            .field("text", &self.text)
            .field("icon", &self.icon)
            .field("focused", &self.focused)
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Draws a [`Button`] as `[background, icon?, label?]`.
pub struct ButtonRenderer {
    objects: Vec<Box<dyn CanvasObject>>,
    icon: Option<usize>,
    label: Option<usize>,
    padding: f32,
    flat: bool,
}

impl ButtonRenderer {
    fn background(button: &Button) -> Rectangle {
        let mut rect = Rectangle::new(Color::TRANSPARENT);
        Self::style_background(&mut rect, button);
        rect
    }

    fn style_background(rect: &mut Rectangle, button: &Button) {
        let palette = &button.base.env().theme().palette;
        rect.fill = if button.pressed {
            palette.pressed
        } else if button.flat {
            if button.focused { palette.primary } else { Color::TRANSPARENT }
        } else {
            palette.button
        };
        if button.focused && !button.flat {
            rect.stroke = palette.focus;
            rect.stroke_width = FOCUS_OUTLINE_WIDTH;
        } else {
            rect.stroke = Color::TRANSPARENT;
            rect.stroke_width = 0.0;
        }
    }

    fn build(button: &Button) -> Self {
        let env = button.base.env();
        let mut objects: Vec<Box<dyn CanvasObject>> = vec![Box::new(Self::background(button))];

        let icon = button.icon.as_ref().map(|resource| {
            objects.push(Box::new(Icon::new(
                Some(resource.clone()),
                env.theme().inline_icon_size(),
            )));
            objects.len() - 1
        });
        let label = (!button.text.is_empty()).then(|| {
            let color = env.theme().palette.foreground;
            objects.push(Box::new(Text::new(button.text.clone(), color, env)));
            objects.len() - 1
        });

        Self {
            objects,
            icon,
            label,
            padding: env.padding(),
            flat: button.flat,
        }
    }

    fn part_min(&mut self, index: Option<usize>) -> Size {
        index
            .and_then(|i| self.objects.get_mut(i))
            .map_or(Size::ZERO, |object| object.min_size())
    }

    /// Icon and label side by side, without the surrounding padding.
    fn content_min(&mut self) -> Size {
        let icon = self.part_min(self.icon);
        let label = self.part_min(self.label);
        let gap = if self.icon.is_some() && self.label.is_some() {
            self.padding
        } else {
            0.0
        };
        Size::new(icon.width + gap + label.width, icon.height.max(label.height))
    }
}

impl WidgetRenderer for ButtonRenderer {
    type Widget = Button;

    fn create(button: &Button) -> Self {
        Self::build(button)
    }

    fn min_size(&mut self) -> Size {
        self.content_min().expand(self.padding * 2.0, self.padding * 2.0)
    }

    fn layout(&mut self, size: Size) {
        let content = self.content_min();
        let icon = self.part_min(self.icon);
        let label = self.part_min(self.label);
        let mut x = if self.flat {
            self.padding
        } else {
            ((size.width - content.width) / 2.0).max(0.0)
        };

        if let Some(background) = self.objects.first_mut() {
            background.move_to(Point::ZERO);
            background.resize(size);
        }
        if let Some(object) = self.icon.and_then(|i| self.objects.get_mut(i)) {
            object.move_to(Point::new(x, (size.height - icon.height) / 2.0));
            object.resize(icon);
            x += icon.width + self.padding;
        }
        if let Some(object) = self.label.and_then(|i| self.objects.get_mut(i)) {
            object.move_to(Point::new(x, (size.height - label.height) / 2.0));
            object.resize(label);
        }
    }

    fn rebuild(&mut self, button: &Button) {
        *self = Self::build(button);
    }

    fn update_in_place(&mut self, button: &Button) {
        let env = button.base.env();
        self.flat = button.flat;
        if let Some(background) = self
            .objects
            .first_mut()
            .and_then(|o| o.downcast_mut::<Rectangle>())
        {
            Self::style_background(background, button);
        }
        if let Some(icon) = self
            .icon
            .and_then(|i| self.objects.get_mut(i))
            .and_then(|o| o.downcast_mut::<Icon>())
        {
            icon.set_resource(button.icon.clone());
        }
        if let Some(label) = self
            .label
            .and_then(|i| self.objects.get_mut(i))
            .and_then(|o| o.downcast_mut::<Text>())
        {
            label.set_text(&button.text, env);
            label.color = env.theme().palette.foreground;
        }
    }

    fn objects(&self) -> &[Box<dyn CanvasObject>] {
        &self.objects
    }

    fn objects_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
        &mut self.objects
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use trellis_core::callback;

    #[test]
    fn test_icon_only_min_size() {
        let mut button = Button::icon_only(IconResource::themed("save"));
        // 20px icon plus 4px padding on each side.
        assert_eq!(button.min_size(), Size::new(28.0, 28.0));
    }

    #[test]
    fn test_label_min_size() {
        let mut button = Button::new("Save");
        // 4 chars at 7px, 21px line, 4px padding on each side.
        assert_eq!(button.min_size(), Size::new(36.0, 29.0));
    }

    #[test]
    fn test_icon_and_label_objects() {
        let mut button = Button::new("Open").with_icon(IconResource::themed("open"));
        button.refresh();
        let kinds: Vec<&str> = button.children().iter().map(|o| o.type_name()).collect();
        assert_eq!(kinds, vec!["Rectangle", "Icon", "Text"]);
        assert_eq!(button.min_size(), Size::new(20.0 + 4.0 + 28.0 + 8.0, 29.0));
    }

    #[test]
    fn test_activate_invokes_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let button = Button::new("Go").with_on_tapped(callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        button.activate();
        button.activate();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_state_updates_background_in_place() {
        let mut button = Button::new("Go");
        button.refresh();
        let env = Env::default();
        let palette = &env.theme().palette;

        button.set_pressed(true);
        let fill = button.children()[0].downcast_ref::<Rectangle>().map(|r| r.fill);
        assert_eq!(fill, Some(palette.pressed));

        button.set_pressed(false);
        button.set_focused(true);
        let rect = button.children()[0].downcast_ref::<Rectangle>().cloned();
        assert_eq!(rect.map(|r| (r.fill, r.stroke)), Some((palette.button, palette.focus)));
    }

    #[test]
    fn test_removing_label_rebuilds() {
        let mut button = Button::new("Go").with_icon(IconResource::themed("go"));
        button.refresh();
        assert_eq!(button.children().len(), 3);
        button.set_text("");
        assert_eq!(button.children().len(), 2);
    }

    #[test]
    fn test_layout_centers_content() {
        let mut button = Button::icon_only(IconResource::themed("save"));
        button.resize(Size::new(48.0, 28.0));
        assert_eq!(button.children()[0].size(), Size::new(48.0, 28.0));
        assert_eq!(button.children()[1].position(), Point::new(14.0, 4.0));
    }
}
