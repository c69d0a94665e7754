//! sRGB colours with the classic named palette.

use serde::{Deserialize, Serialize};

/// RGBA colour, each channel in `[0, 1]`, sRGB encoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
    pub const LIGHT_GRAY: Self = Self::rgb(192.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0);
    pub const DARK_GRAY: Self = Self::rgb(64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const ORANGE: Self = Self::rgb(1.0, 200.0 / 255.0, 0.0);
    pub const PINK: Self = Self::rgb(1.0, 175.0 / 255.0, 175.0 / 255.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Converts the colour channels from sRGB to linear space. Alpha is kept as is.
    pub fn to_linear(self) -> Self {
        fn channel(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: f64::from(c.r),
            g: f64::from(c.g),
            b: f64::from(c.b),
            a: f64::from(c.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn palette_matches_rgb8_values() {
        assert_eq!(Color::BLUE.to_array(), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(Color::ORANGE, Color::from_rgb8(255, 200, 0));
        assert_relative_eq!(Color::GRAY.r, 128.0 / 255.0);
    }

    #[test]
    fn linear_conversion_keeps_endpoints_and_alpha() {
        let c = Color::rgba(0.0, 1.0, 0.5, 0.25).to_linear();
        assert_eq!(c.r, 0.0);
        assert_relative_eq!(c.g, 1.0, epsilon = 1e-6);
        assert_relative_eq!(c.b, 0.214_041, epsilon = 1e-5);
        assert_eq!(c.a, 0.25);
    }

    #[test]
    fn alpha_defaults_to_opaque_when_parsing() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: Color,
        }
        let w: Wrapper = toml::from_str("color = { r = 0.5, g = 0.5, b = 0.5 }").unwrap();
        assert_eq!(w.color.a, 1.0);
    }
}
