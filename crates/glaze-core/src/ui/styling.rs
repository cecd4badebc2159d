// src/ui/styling.rs
//! Element color triples and a small stock palette.

use embedded_graphics::pixelcolor::Rgb565;

// Common colors in Rgb565 space.
pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);
pub const DODGER_BLUE: Rgb565 = Rgb565::new(30 >> 3, 144 >> 2, 255 >> 3);
pub const STEEL_BLUE: Rgb565 = Rgb565::new(70 >> 3, 130 >> 2, 180 >> 3);
pub const CRIMSON: Rgb565 = Rgb565::new(220 >> 3, 20 >> 2, 60 >> 3);
pub const SURFACE_DARK: Rgb565 = Rgb565::new(0x08 >> 3, 0x10 >> 2, 0x18 >> 3);

/// The color triple every element carries.
///
/// `frame` strokes the border (and renders label text), `fill` paints the
/// interior, and `glow` replaces `fill` while the element is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementColors {
    pub frame: Rgb565,
    pub fill: Rgb565,
    pub glow: Rgb565,
}

impl ElementColors {
    pub const fn new(frame: Rgb565, fill: Rgb565, glow: Rgb565) -> Self {
        Self { frame, fill, glow }
    }

    /// Stock triple for passive elements on a dark background.
    pub const fn surface() -> Self {
        Self::new(GRAY, SURFACE_DARK, SURFACE_DARK)
    }

    /// Stock triple for interactive elements.
    pub const fn button() -> Self {
        Self::new(WHITE, STEEL_BLUE, DODGER_BLUE)
    }
}

impl Default for ElementColors {
    fn default() -> Self {
        Self::new(WHITE, BLACK, GRAY)
    }
}
