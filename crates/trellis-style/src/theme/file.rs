//! On-disk theme format.
//!
//! Every field is optional; absent fields keep the value of the base theme
//! selected by `mode`.

use serde::Deserialize;
use trellis_render::Color;

use super::{Theme, ThemeMode};
use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct ThemeFile {
    mode: ThemeMode,
    sizes: SizeOverrides,
    colors: ColorOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SizeOverrides {
    padding: Option<f32>,
    text_size: Option<f32>,
    inline_icon_size: Option<f32>,
    separator_thickness: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ColorOverrides {
    background: Option<String>,
    button: Option<String>,
    input_background: Option<String>,
    menu_background: Option<String>,
    shadow: Option<String>,
    foreground: Option<String>,
    placeholder: Option<String>,
    disabled: Option<String>,
    primary: Option<String>,
    focus: Option<String>,
    pressed: Option<String>,
}

fn apply_size(name: &'static str, value: Option<f32>, slot: &mut f32) -> Result<()> {
    if let Some(value) = value {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidMetric { name, value });
        }
        *slot = value;
    }
    Ok(())
}

fn apply_color(name: &'static str, value: Option<String>, slot: &mut Color) -> Result<()> {
    if let Some(value) = value {
        *slot = Color::from_hex(&value).ok_or_else(|| Error::invalid_color(name, value))?;
    }
    Ok(())
}

impl ThemeFile {
    pub(super) fn into_theme(self) -> Result<Theme> {
        let mut theme = Theme::for_mode(self.mode);

        let sizes = &mut theme.sizes;
        apply_size("padding", self.sizes.padding, &mut sizes.padding)?;
        apply_size("text_size", self.sizes.text_size, &mut sizes.text_size)?;
        apply_size("inline_icon_size", self.sizes.inline_icon_size, &mut sizes.inline_icon_size)?;
        apply_size(
            "separator_thickness",
            self.sizes.separator_thickness,
            &mut sizes.separator_thickness,
        )?;

        let c = self.colors;
        let p = &mut theme.palette;
        apply_color("background", c.background, &mut p.background)?;
        apply_color("button", c.button, &mut p.button)?;
        apply_color("input_background", c.input_background, &mut p.input_background)?;
        apply_color("menu_background", c.menu_background, &mut p.menu_background)?;
        apply_color("shadow", c.shadow, &mut p.shadow)?;
        apply_color("foreground", c.foreground, &mut p.foreground)?;
        apply_color("placeholder", c.placeholder, &mut p.placeholder)?;
        apply_color("disabled", c.disabled, &mut p.disabled)?;
        apply_color("primary", c.primary, &mut p.primary)?;
        apply_color("focus", c.focus, &mut p.focus)?;
        apply_color("pressed", c.pressed, &mut p.pressed)?;

        Ok(theme)
    }
}
