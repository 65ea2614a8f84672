//! Pixel color for monochrome OLED panels
//!
//! The SSD1306 stores one bit per pixel, so the only meaningful "colors" are
//! operations on that bit: turn it on, turn it off, or flip it.
//!
//! | Color    | Effect on the framebuffer bit |
//! |----------|-------------------------------|
//! | `On`     | `byte \|= mask`               |
//! | `Off`    | `byte &= !mask`               |
//! | `Invert` | `byte ^= mask`                |
//!
//! ## Example
//!
//! ```
//! use ssd1306_page::Color;
//!
//! assert_eq!(Color::On.apply(0b0000_0000, 0b0000_0100), 0b0000_0100);
//! assert_eq!(Color::Off.apply(0b1111_1111, 0b0000_0100), 0b1111_1011);
//! assert_eq!(Color::Invert.apply(0b0000_0100, 0b0000_0100), 0b0000_0000);
//! ```

/// Tri-state pixel color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Pixel lit
    #[default]
    On,
    /// Pixel dark
    Off,
    /// Toggle whatever the pixel currently holds
    Invert,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU8;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::On,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::Off,
        }
    }
}

impl Color {
    /// Apply this color to `byte` at the bit(s) selected by `mask`
    pub fn apply(self, byte: u8, mask: u8) -> u8 {
        match self {
            Self::On => byte | mask,
            Self::Off => byte & !mask,
            Self::Invert => byte ^ mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_twice_restores_byte() {
        let original = 0b1010_0101;
        let once = Color::Invert.apply(original, 0x80);
        assert_eq!(once, 0b0010_0101);
        assert_eq!(Color::Invert.apply(once, 0x80), original);
    }

    #[test]
    fn test_on_and_off_leave_other_bits_alone() {
        assert_eq!(Color::On.apply(0b0101_0000, 0x01), 0b0101_0001);
        assert_eq!(Color::Off.apply(0b0101_0001, 0x01), 0b0101_0000);
    }
}
