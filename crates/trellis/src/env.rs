//! The environment widgets are measured and styled in.

use std::fmt;
use std::sync::{Arc, OnceLock};

use trellis_render::{FixedAdvanceMeasurer, Size, TextMeasurer, TextStyle};
use trellis_style::Theme;

/// Theme and text measurement, shared by every widget on a canvas.
///
/// An `Env` is cheap to clone. Widgets keep their own copy and read it while
/// measuring and refreshing; a canvas hands its environment to content when
/// the content is attached and again on [`Canvas::set_env`].
///
/// [`Canvas::set_env`]: crate::canvas::Canvas::set_env
#[derive(Clone)]
pub struct Env {
    theme: Arc<Theme>,
    measurer: Arc<dyn TextMeasurer>,
}

impl Env {
    /// Create an environment from a theme and a text measurer.
    pub fn new(theme: Theme, measurer: impl TextMeasurer + 'static) -> Self {
        Self {
            theme: Arc::new(theme),
            measurer: Arc::new(measurer),
        }
    }

    /// An environment with the given theme and the default measurer.
    pub fn with_theme(theme: Theme) -> Self {
        Self::new(theme, FixedAdvanceMeasurer::default())
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn measurer(&self) -> &dyn TextMeasurer {
        &*self.measurer
    }

    /// Measure text through this environment's measurer.
    pub fn measure_text(&self, text: &str, size: f32, style: TextStyle) -> Size {
        self.measurer.measure_text(text, size, style)
    }

    /// Measure text at the theme's body text size.
    pub fn measure_body(&self, text: &str) -> Size {
        self.measure_text(text, self.theme.text_size(), TextStyle::NORMAL)
    }

    #[inline]
    pub fn padding(&self) -> f32 {
        self.theme.padding()
    }

    /// Whether two environments share the same theme and measurer.
    pub fn same_as(&self, other: &Env) -> bool {
        Arc::ptr_eq(&self.theme, &other.theme) && Arc::ptr_eq(&self.measurer, &other.measurer)
    }
}

static DEFAULT_ENV: OnceLock<Env> = OnceLock::new();

impl Default for Env {
    /// The process-wide default environment. Every call returns a clone of
    /// the same one, so widgets built with it never re-theme when attached to
    /// a default canvas.
    fn default() -> Self {
        DEFAULT_ENV
            .get_or_init(|| Self::with_theme(Theme::default()))
            .clone()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("mode", &self.theme.mode)
            .field("padding", &self.theme.padding())
            .field("text_size", &self.theme.text_size())
            .finish()
    }
}

static_assertions::assert_impl_all!(Env: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let env = Env::default();
        let copy = env.clone();
        assert!(env.same_as(&copy));
        assert!(!env.same_as(&Env::with_theme(Theme::default())));
    }

    #[test]
    fn test_default_is_shared() {
        assert!(Env::default().same_as(&Env::default()));
    }

    #[test]
    fn test_measure_body_uses_theme_text_size() {
        let env = Env::default();
        // 14pt text, half-em advance.
        assert_eq!(env.measure_body("abc").width, 21.0);
    }
}
