//! Name-derived display colors.

use serde::{Deserialize, Serialize};

use crate::ColorSettings;

/// A display color as a `#rrggbb` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the hex form back into channels; `None` for foreign tokens.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Assigns a stable color to a timer name.
pub trait Colorizer {
    fn color(&self, name: &str) -> Color;
}

impl<F> Colorizer for F
where
    F: Fn(&str) -> Color,
{
    fn color(&self, name: &str) -> Color {
        self(name)
    }
}

/// Hashes a name to a hue at fixed lightness and saturation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorHash {
    lightness: f64,
    saturation: f64,
}

impl ColorHash {
    pub fn new(lightness: f64, saturation: f64) -> Self {
        Self {
            lightness: lightness.clamp(0.0, 1.0),
            saturation: saturation.clamp(0.0, 1.0),
        }
    }

    pub fn from_settings(settings: &ColorSettings) -> Self {
        Self::new(settings.lightness, settings.saturation)
    }

    fn hue(name: &str) -> f64 {
        let h = blake3::hash(name.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&h.as_bytes()[0..8]);
        (u64::from_le_bytes(head) % 360) as f64
    }
}

impl Default for ColorHash {
    fn default() -> Self {
        Self::from_settings(&ColorSettings::default())
    }
}

impl Colorizer for ColorHash {
    fn color(&self, name: &str) -> Color {
        let (r, g, b) = hsl_to_rgb(Self::hue(name), self.saturation, self.lightness);
        Color::from_rgb(r, g, b)
    }
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_color() {
        let hash = ColorHash::default();
        assert_eq!(hash.color("Render"), hash.color("Render"));
        assert_ne!(hash.color("Render"), hash.color("Shadows"));
    }

    #[test]
    fn output_is_hex_rgb() {
        let c = ColorHash::default().color("Atmosphere");
        assert_eq!(c.as_str().len(), 7);
        assert!(c.rgb().is_some());
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(hsl_to_rgb(77.0, 0.0, 0.5), (128, 128, 128));
    }

    #[test]
    fn closures_are_colorizers() {
        let fixed = |_: &str| Color::from_rgb(1, 2, 3);
        assert_eq!(fixed.color("anything").as_str(), "#010203");
        assert_eq!(fixed.color("x").rgb(), Some((1, 2, 3)));
    }

    #[test]
    fn foreign_tokens_have_no_rgb() {
        let c: Color = serde_json::from_str(r#""teal""#).expect("color");
        assert_eq!(c.rgb(), None);
    }
}
