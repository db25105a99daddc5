//! RGBA colour used by menu styles and the drawing surface.

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

#[allow(non_snake_case)]
impl Color {
    pub const BLACK: Color = Color::RGB(0, 0, 0);
    pub const WHITE: Color = Color::RGB(255, 255, 255);

    /// Opaque colour (same constructor shape as `sdl2::pixels::Color`)
    pub const fn RGB(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn RGBA(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Same colour with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

#[cfg(feature = "sdl")]
impl From<Color> for sdl2::pixels::Color {
    fn from(color: Color) -> Self {
        sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a)
    }
}
