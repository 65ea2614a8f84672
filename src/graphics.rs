//! Graphics support via embedded-graphics
//!
//! [`Display`] implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
//! trait, so shapes, text and images from the embedded-graphics ecosystem
//! can be drawn straight into its framebuffer. Nothing reaches the panel
//! until [`Display::flush`] is called.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use ssd1306_page::{Builder, Color, Dimensions, Display, I2cInterface, PowerMode};
//! # use core::convert::Infallible;
//! # use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c<SevenBitAddress> for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: SevenBitAddress,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let dims = match Dimensions::new(128, 64) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let interface = I2cInterface::new(MockI2c, config.address);
//! let mut display = match Display::new(interface, config, [0u8; 1024]) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.begin(PowerMode::Internal);
//!
//! // Draw shapes
//! let _ = Rectangle::new(Point::new(0, 0), Size::new(128, 16))
//!     .into_styled(PrimitiveStyle::with_fill(Color::On))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(96, 24), 32)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::On, 1))
//!     .draw(&mut display);
//!
//! // Draw text, knocked out of the bar
//! let _ = Text::new(
//!     "Hello, OLED!",
//!     Point::new(4, 11),
//!     MonoTextStyle::new(&FONT_6X10, Color::Off),
//! )
//! .draw(&mut display);
//!
//! // Update physical display
//! let _ = display.flush();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::color::Color;
use crate::display::Display;
use crate::interface::DisplayInterface;

impl<I, B> DrawTarget for Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.write_pixel(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        match color {
            Color::On => self.fill(),
            Color::Off => Display::clear(self),
            Color::Invert => {
                let (w, h) = self.framebuffer().size();
                for y in 0..h as i32 {
                    for x in 0..w as i32 {
                        self.write_pixel(x, y, Color::Invert);
                    }
                }
            }
        }
        Ok(())
    }
}

impl<I, B> OriginDimensions for Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let (width, height) = self.framebuffer().size();
        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions, Rotation};
    use alloc::vec::Vec;
    use embedded_graphics::{
        mono_font::{MonoTextStyle, ascii::FONT_6X10},
        pixelcolor::BinaryColor,
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
        text::Text,
    };

    #[derive(Debug)]
    struct MockInterface;

    impl DisplayInterface for MockInterface {
        type Error = Infallible;

        fn write(&mut self, _frame: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn test_display(rotation: Rotation) -> Display<MockInterface, Vec<u8>> {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 32).unwrap())
            .rotation(rotation)
            .build()
            .unwrap();
        Display::new(MockInterface, config, alloc::vec![0u8; 512]).unwrap()
    }

    fn lit(display: &Display<MockInterface, Vec<u8>>) -> usize {
        display
            .framebuffer()
            .as_bytes()
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum()
    }

    #[test]
    fn test_size_follows_rotation() {
        assert_eq!(test_display(Rotation::Rotate0).size(), Size::new(128, 32));
        assert_eq!(test_display(Rotation::Rotate90).size(), Size::new(32, 128));
    }

    #[test]
    fn test_filled_rectangle_sets_exact_pixels() {
        let mut display = test_display(Rotation::Rotate0);
        Rectangle::new(Point::new(2, 3), Size::new(10, 4))
            .into_styled(PrimitiveStyle::with_fill(Color::On))
            .draw(&mut display)
            .unwrap();
        assert_eq!(lit(&display), 40);
        assert_eq!(display.get_pixel(2, 3), Some(true));
        assert_eq!(display.get_pixel(11, 6), Some(true));
        assert_eq!(display.get_pixel(12, 6), Some(false));
    }

    #[test]
    fn test_drawing_off_panel_is_clipped() {
        let mut display = test_display(Rotation::Rotate0);
        Rectangle::new(Point::new(120, 28), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(Color::On))
            .draw(&mut display)
            .unwrap();
        assert_eq!(lit(&display), 8 * 4);
    }

    #[test]
    fn test_text_stays_inside_its_box() {
        let mut display = test_display(Rotation::Rotate0);
        Text::new("Hi", Point::new(0, 8), MonoTextStyle::new(&FONT_6X10, Color::On))
            .draw(&mut display)
            .unwrap();
        assert!(lit(&display) > 0);
        for y in 0..32 {
            for x in 12..128 {
                assert_eq!(display.get_pixel(x, y), Some(false));
            }
        }
    }

    #[test]
    fn test_clear_with_colors() {
        let mut display = test_display(Rotation::Rotate0);
        DrawTarget::clear(&mut display, Color::On).unwrap();
        assert_eq!(lit(&display), 128 * 32);
        DrawTarget::clear(&mut display, Color::Invert).unwrap();
        assert_eq!(lit(&display), 0);
        DrawTarget::clear(&mut display, Color::Invert).unwrap();
        DrawTarget::clear(&mut display, Color::Off).unwrap();
        assert_eq!(lit(&display), 0);
    }

    #[test]
    fn test_binary_color_converts() {
        assert_eq!(Color::from(BinaryColor::On), Color::On);
        assert_eq!(Color::from(BinaryColor::Off), Color::Off);
    }
}
