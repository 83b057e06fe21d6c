//! Widget base implementation.
//!
//! This module provides [`WidgetBase`], the state every widget carries, and
//! [`BaseWidget`], the trait that gives a widget its renderer lifecycle:
//! lazy creation, refresh, minimum size and resize.
//!
//! # Extension
//!
//! A widget type built on top of another one (a select entry wrapping an
//! entry) calls [`WidgetBase::extend_base_widget`] with the outer type. The
//! base then reports the outer type in debug output and renderer lookups go
//! through the outer widget. Extending with the type already recorded is a
//! no-op; extending with a different type re-points the record.
//!
//! Every widget constructor must extend its base before the renderer is
//! first requested. Requesting a renderer on a base that was never extended
//! is a programming error and panics.

use std::any::type_name;
use std::fmt;

use trellis_core::logging::targets;
use trellis_core::ObjectId;
use trellis_render::{Color, Point, Size};

use super::renderer::WidgetRenderer;
use crate::env::Env;
use crate::scene::CanvasObject;

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and delegate common
/// operations to it through [`BaseWidget`].
///
/// # Example
///
/// ```ignore
/// use trellis::widget::{BaseWidget, WidgetBase};
///
/// struct Badge {
///     base: WidgetBase<BadgeRenderer>,
///     count: u32,
/// }
///
/// impl BaseWidget for Badge {
///     type Renderer = BadgeRenderer;
///     fn base(&self) -> &WidgetBase<BadgeRenderer> { &self.base }
///     fn base_mut(&mut self) -> &mut WidgetBase<BadgeRenderer> { &mut self.base }
/// }
/// ```
pub struct WidgetBase<R: WidgetRenderer> {
    /// Identity, stable for the widget's lifetime.
    id: ObjectId,

    /// Position relative to the parent.
    position: Point,

    size: Size,

    visible: bool,

    /// Theme and text measurement the renderer reads.
    env: Env,

    /// Full type name of the widget this base was extended for.
    extended: Option<&'static str>,

    /// Created on first use, dropped on environment change.
    renderer: Option<R>,

    /// Set when the next refresh must rebuild the object list.
    structure_changed: bool,
}

impl<R: WidgetRenderer> WidgetBase<R> {
    /// Create a new, not yet extended, widget base.
    pub fn new(env: Env) -> Self {
        Self {
            id: ObjectId::next(),
            position: Point::ZERO,
            size: Size::ZERO,
            visible: true,
            env,
            extended: None,
            renderer: None,
            structure_changed: false,
        }
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    // =========================================================================
    // Extension
    // =========================================================================

    /// Record `T` as the concrete widget type built on this base.
    pub fn extend_base_widget<T: 'static>(&mut self) {
        let name = type_name::<T>();
        match self.extended {
            Some(current) if current == name => {}
            Some(current) => {
                tracing::debug!(
                    target: targets::WIDGET,
                    widget = %self.id,
                    from = short_name(current),
                    to = short_name(name),
                    "re-pointed widget extension"
                );
                self.extended = Some(name);
            }
            None => {
                tracing::trace!(
                    target: targets::WIDGET,
                    widget = %self.id,
                    ty = short_name(name),
                    "extended base widget"
                );
                self.extended = Some(name);
            }
        }
    }

    /// Whether [`extend_base_widget`](Self::extend_base_widget) has been called.
    #[inline]
    pub fn is_extended(&self) -> bool {
        self.extended.is_some()
    }

    /// Short name of the extended type, such as `"Toolbar"`.
    pub fn extended_type_name(&self) -> Option<&'static str> {
        self.extended.map(short_name)
    }

    // =========================================================================
    // Geometry and Visibility
    // =========================================================================

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Store a new size. Does not lay the renderer out; see
    /// [`BaseWidget::resize_widget`].
    #[inline]
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // =========================================================================
    // Environment
    // =========================================================================

    #[inline]
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Replace the environment.
    ///
    /// Returns `true` if the environment differs from the current one, in
    /// which case the renderer has been discarded.
    pub fn set_env(&mut self, env: &Env) -> bool {
        if self.env.same_as(env) {
            return false;
        }
        self.env = env.clone();
        self.invalidate_renderer();
        true
    }

    // =========================================================================
    // Renderer State
    // =========================================================================

    /// The renderer, if it has been created.
    #[inline]
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    #[inline]
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Destroy the renderer. The next request creates a fresh one.
    pub fn invalidate_renderer(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.destroy();
            tracing::trace!(target: targets::WIDGET, widget = %self.id, "renderer invalidated");
        }
    }

    /// Make the next refresh rebuild the renderer's object list.
    #[inline]
    pub fn mark_structure_changed(&mut self) {
        self.structure_changed = true;
    }

    #[inline]
    pub fn is_structure_changed(&self) -> bool {
        self.structure_changed
    }

    /// The renderer's objects, or an empty slice before it exists.
    pub fn objects(&self) -> &[Box<dyn CanvasObject>] {
        match &self.renderer {
            Some(renderer) => renderer.objects(),
            None => &[],
        }
    }

    /// The renderer's objects mutably, or an empty slice before it exists.
    pub fn objects_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
        match &mut self.renderer {
            Some(renderer) => renderer.objects_mut(),
            None => &mut [],
        }
    }

    /// The renderer's background, or transparent before it exists.
    pub fn background_color(&self) -> Color {
        self.renderer
            .as_ref()
            .map_or(Color::TRANSPARENT, |r| r.background_color())
    }
}

impl<R: WidgetRenderer> Drop for WidgetBase<R> {
    fn drop(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.destroy();
        }
    }
}

impl<R: WidgetRenderer> fmt::Debug for WidgetBase<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id)
            .field("extended", &self.extended_type_name())
            .field("position", &self.position)
            .field("size", &self.size)
            .field("visible", &self.visible)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Strip the module path from a type name.
fn short_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

/// The renderer lifecycle shared by every widget.
///
/// Implementors only supply access to their [`WidgetBase`]; everything else
/// is provided.
pub trait BaseWidget: Sized + 'static {
    /// The renderer that draws this widget.
    type Renderer: WidgetRenderer<Widget = Self>;

    fn base(&self) -> &WidgetBase<Self::Renderer>;

    fn base_mut(&mut self) -> &mut WidgetBase<Self::Renderer>;

    /// Build a new renderer for the current state.
    ///
    /// # Panics
    ///
    /// Panics if the base was never extended.
    fn create_renderer(&self) -> Self::Renderer {
        let base = self.base();
        assert!(
            base.is_extended(),
            "renderer requested for {} ({}) before extend_base_widget was called",
            short_name(type_name::<Self>()),
            base.id(),
        );
        tracing::trace!(
            target: targets::RENDERER,
            widget = %base.id(),
            ty = base.extended_type_name().unwrap_or_default(),
            "creating renderer"
        );
        let mut renderer = Self::Renderer::create(self);
        renderer.layout(base.size());
        renderer
    }

    /// The widget's renderer, created and laid out on first use.
    ///
    /// # Panics
    ///
    /// Panics if the base was never extended.
    fn renderer(&mut self) -> &mut Self::Renderer {
        let renderer = match self.base_mut().renderer.take() {
            Some(renderer) => renderer,
            None => self.create_renderer(),
        };
        self.base_mut().renderer.insert(renderer)
    }

    /// Re-derive the renderer's objects from the widget's state and lay them
    /// out again.
    ///
    /// Returns `true` if the object list was rebuilt (or created), `false`
    /// if the existing objects were updated in place.
    fn refresh_widget(&mut self) -> bool {
        let structure_changed = std::mem::take(&mut self.base_mut().structure_changed);
        let (mut renderer, rebuilt) = match self.base_mut().renderer.take() {
            Some(mut renderer) => {
                renderer.refresh(self, structure_changed);
                (renderer, structure_changed)
            }
            None => (self.create_renderer(), true),
        };
        renderer.layout(self.base().size());
        self.base_mut().renderer = Some(renderer);

        if rebuilt {
            tracing::trace!(
                target: targets::RENDERER,
                widget = %self.base().id(),
                objects = self.base().objects().len(),
                "rebuilt renderer objects"
            );
        }
        rebuilt
    }

    /// The renderer's minimum size.
    fn widget_min_size(&mut self) -> Size {
        self.renderer().min_size()
    }

    /// Store a new size and lay the renderer out for it.
    fn resize_widget(&mut self, size: Size) {
        self.base_mut().set_size(size);
        self.renderer().layout(size);
    }

    /// Apply a new environment, rebuilding the renderer if it changed.
    fn set_widget_env(&mut self, env: &Env) {
        if self.base_mut().set_env(env) {
            self.refresh_widget();
        }
    }
}

/// Implements [`CanvasObject`] for a [`BaseWidget`] by delegating geometry
/// and visibility to its base and sizing to its renderer.
macro_rules! impl_widget_object {
    ($ty:ty) => {
        impl $crate::scene::CanvasObject for $ty {
            fn position(&self) -> ::trellis_render::Point {
                $crate::widget::BaseWidget::base(self).position()
            }

            fn move_to(&mut self, position: ::trellis_render::Point) {
                $crate::widget::BaseWidget::base_mut(self).set_position(position);
            }

            fn size(&self) -> ::trellis_render::Size {
                $crate::widget::BaseWidget::base(self).size()
            }

            fn resize(&mut self, size: ::trellis_render::Size) {
                $crate::widget::BaseWidget::resize_widget(self, size);
            }

            fn min_size(&mut self) -> ::trellis_render::Size {
                $crate::widget::BaseWidget::widget_min_size(self)
            }

            fn is_visible(&self) -> bool {
                $crate::widget::BaseWidget::base(self).is_visible()
            }

            fn show(&mut self) {
                $crate::widget::BaseWidget::base_mut(self).set_visible(true);
            }

            fn hide(&mut self) {
                $crate::widget::BaseWidget::base_mut(self).set_visible(false);
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn as_widget(&self) -> Option<&dyn $crate::widget::Widget> {
                Some(self)
            }

            fn as_widget_mut(&mut self) -> Option<&mut dyn $crate::widget::Widget> {
                Some(self)
            }
        }
    };
}

/// Expands, inside an `impl Widget` block, to the [`Widget`] methods that
/// every [`BaseWidget`] answers from its base.
///
/// [`Widget`]: crate::widget::Widget
macro_rules! base_widget_methods {
    () => {
        fn widget_id(&self) -> ::trellis_core::ObjectId {
            $crate::widget::BaseWidget::base(self).id()
        }

        fn extended_type_name(&self) -> &'static str {
            $crate::widget::BaseWidget::base(self)
                .extended_type_name()
                .unwrap_or_else(|| $crate::scene::CanvasObject::type_name(self))
        }

        fn set_env(&mut self, env: &$crate::env::Env) {
            $crate::widget::BaseWidget::set_widget_env(self, env);
        }

        fn background_color(&self) -> ::trellis_render::Color {
            $crate::widget::BaseWidget::base(self).background_color()
        }

        fn children(&self) -> &[Box<dyn $crate::scene::CanvasObject>] {
            $crate::widget::BaseWidget::base(self).objects()
        }

        fn children_mut(&mut self) -> &mut [Box<dyn $crate::scene::CanvasObject>] {
            $crate::widget::BaseWidget::base_mut(self).objects_mut()
        }
    };
}

pub(crate) use base_widget_methods;
pub(crate) use impl_widget_object;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Rectangle;

    /// A widget whose renderer draws one rectangle per `count`.
    struct Bars {
        base: WidgetBase<BarsRenderer>,
        count: usize,
        color: Color,
    }

    struct BarsRenderer {
        objects: Vec<Box<dyn CanvasObject>>,
    }

    impl BarsRenderer {
        fn build(widget: &Bars) -> Vec<Box<dyn CanvasObject>> {
            (0..widget.count)
                .map(|_| {
                    Box::new(Rectangle::new(widget.color).with_min_size(Size::new(10.0, 10.0)))
                        as Box<dyn CanvasObject>
                })
                .collect()
        }
    }

    impl WidgetRenderer for BarsRenderer {
        type Widget = Bars;

        fn create(widget: &Bars) -> Self {
            Self {
                objects: Self::build(widget),
            }
        }

        fn min_size(&mut self) -> Size {
            Size::new(10.0 * self.objects.len() as f32, 10.0)
        }

        fn layout(&mut self, size: Size) {
            for object in &mut self.objects {
                object.resize(Size::new(10.0, size.height));
            }
        }

        fn rebuild(&mut self, widget: &Bars) {
            self.objects = Self::build(widget);
        }

        fn update_in_place(&mut self, widget: &Bars) {
            for object in &mut self.objects {
                if let Some(rect) = object.downcast_mut::<Rectangle>() {
                    rect.fill = widget.color;
                }
            }
        }

        fn objects(&self) -> &[Box<dyn CanvasObject>] {
            &self.objects
        }

        fn objects_mut(&mut self) -> &mut [Box<dyn CanvasObject>] {
            &mut self.objects
        }
    }

    impl BaseWidget for Bars {
        type Renderer = BarsRenderer;

        fn base(&self) -> &WidgetBase<BarsRenderer> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut WidgetBase<BarsRenderer> {
            &mut self.base
        }
    }

    fn setup(count: usize) -> Bars {
        let mut bars = Bars {
            base: WidgetBase::new(Env::default()),
            count,
            color: Color::BLACK,
        };
        bars.base.extend_base_widget::<Bars>();
        bars
    }

    #[test]
    fn test_renderer_is_created_lazily() {
        let mut bars = setup(3);
        assert!(!bars.base.has_renderer());
        assert!(bars.base.objects().is_empty());

        assert_eq!(bars.renderer().objects().len(), 3);
        assert!(bars.base.has_renderer());
    }

    #[test]
    fn test_refresh_updates_in_place_without_structure_change() {
        let mut bars = setup(2);
        bars.renderer();
        bars.color = Color::WHITE;
        bars.count = 5;

        assert!(!bars.refresh_widget());
        let objects = bars.base.objects();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].downcast_ref::<Rectangle>().map(|r| r.fill), Some(Color::WHITE));
    }

    #[test]
    fn test_refresh_rebuilds_after_structure_change() {
        let mut bars = setup(2);
        bars.renderer();
        bars.count = 4;
        bars.base.mark_structure_changed();

        assert!(bars.refresh_widget());
        assert_eq!(bars.base.objects().len(), 4);
        assert!(!bars.base.is_structure_changed());
    }

    #[test]
    fn test_min_size_and_resize_go_through_renderer() {
        let mut bars = setup(3);
        assert_eq!(bars.widget_min_size(), Size::new(30.0, 10.0));

        bars.resize_widget(Size::new(50.0, 40.0));
        assert_eq!(bars.base.size(), Size::new(50.0, 40.0));
        assert_eq!(bars.base.objects()[0].size(), Size::new(10.0, 40.0));
    }

    #[test]
    fn test_extend_same_type_is_noop() {
        let mut bars = setup(1);
        bars.base.extend_base_widget::<Bars>();
        assert_eq!(bars.base.extended_type_name(), Some("Bars"));
    }

    #[test]
    fn test_extend_different_type_repoints() {
        struct Outer;
        let mut bars = setup(1);
        bars.base.extend_base_widget::<Outer>();
        assert_eq!(bars.base.extended_type_name(), Some("Outer"));
    }

    #[test]
    #[should_panic(expected = "before extend_base_widget")]
    fn test_renderer_before_extend_panics() {
        let mut bars = Bars {
            base: WidgetBase::new(Env::default()),
            count: 1,
            color: Color::BLACK,
        };
        bars.renderer();
    }

    #[test]
    fn test_env_change_recreates_renderer() {
        let mut bars = setup(1);
        bars.renderer();
        assert!(!bars.base.set_env(&Env::default()));

        let env = Env::with_theme(trellis_style::Theme::dark());
        bars.set_widget_env(&env);
        assert!(bars.base.env().same_as(&env));
        assert!(bars.base.has_renderer());

        // Same environment again: nothing to do.
        assert!(!bars.base.set_env(&env));
    }
}
