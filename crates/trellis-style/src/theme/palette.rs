//! Color palette definitions.

use trellis_render::Color;

/// An opaque colour from a `0xRRGGBB` literal.
fn rgb(hex: u32) -> Color {
    Color::from_rgba8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
}

/// The colours widgets draw with.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    // Surfaces
    /// Window and canvas background.
    pub background: Color,
    /// Button face, also the toolbar background.
    pub button: Color,
    /// Background of text inputs.
    pub input_background: Color,
    /// Background of pop-up menus.
    pub menu_background: Color,
    /// Drop shadow under overlays.
    pub shadow: Color,

    // Content
    /// Primary text and icon colour. Toolbar separators use it too.
    pub foreground: Color,
    /// Placeholder text in empty inputs.
    pub placeholder: Color,
    /// Disabled text and icons.
    pub disabled: Color,

    // Accents
    /// Highlight for the selected menu item.
    pub primary: Color,
    /// Outline of the focused control.
    pub focus: Color,
    /// Overlay drawn on a pressed button.
    pub pressed: Color,
}

impl ColorPalette {
    /// Create a light theme palette.
    pub fn light() -> Self {
        Self {
            background: rgb(0xF2F2F2),
            button: rgb(0xE1E1E1),
            input_background: rgb(0xFFFFFF),
            menu_background: rgb(0xFAFAFA),
            shadow: Color::from_rgba8(0, 0, 0, 0x33),

            foreground: rgb(0x212121),
            placeholder: rgb(0x888888),
            disabled: rgb(0xADB5BD),

            primary: rgb(0x007AFF),
            focus: rgb(0x4DA3FF),
            pressed: Color::from_rgba8(0, 0, 0, 0x20),
        }
    }

    /// Create a dark theme palette.
    pub fn dark() -> Self {
        Self {
            background: rgb(0x1C1C1E),
            button: rgb(0x2C2C2E),
            input_background: rgb(0x3A3A3C),
            menu_background: rgb(0x2C2C2E),
            shadow: Color::from_rgba8(0, 0, 0, 0x66),

            foreground: rgb(0xFFFFFF),
            placeholder: rgb(0x8E8E93),
            disabled: rgb(0x636366),

            primary: rgb(0x0A84FF),
            focus: rgb(0x5EB1FF),
            pressed: Color::from_rgba8(0xFF, 0xFF, 0xFF, 0x30),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_literal_matches_hex() {
        assert_eq!(Some(rgb(0x007AFF)), Color::from_hex("#007AFF"));
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(ColorPalette::light().foreground, ColorPalette::dark().foreground);
    }
}
