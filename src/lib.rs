//! SSD1306 / SH1106 OLED Display Driver
//!
//! A page-addressed framebuffer driver for monochrome OLED controllers of the
//! SSD1306 family (128x64, 128x32, 96x16 panels) on an I2C bus.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation required
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Internal charge pump or external VCC
//! - SH1106 column offset support
//! - Rotation support
//!
//! ## Wire format
//!
//! Every transmission is one I2C write starting with a control byte:
//! `[0x00, commands...]` or `[0x40, pixels...]`. A flush sends, for each
//! page `p`, the command frame `[0x00, 0xB0 | p, 0x00, 0x10]` followed by
//! the data frame `[0x40, page bytes...]`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! use ssd1306_page::{Builder, Color, Dimensions, Display, I2cInterface, PowerMode, Rotation};
//!
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
//! # let i2c = MockI2c;
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate0).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let interface = I2cInterface::new(i2c, config.address);
//! let mut display = match Display::new(interface, config, [0u8; 1024]) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! if display.begin(PowerMode::Internal).is_err() {
//!     return;
//! }
//!
//! display.write_pixel(64, 32, Color::On);
//! let _ = display.flush();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Pixel color for monochrome panels
pub mod color;
/// SSD1306 command definitions and framing
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Page-addressed framebuffer
pub mod framebuffer;
/// Hardware interface abstraction
pub mod interface;
/// Coordinate rotation and page addressing
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::Color;
pub use config::{
    ALTERNATE_ADDRESS, Bitmap, Builder, Config, DEFAULT_ADDRESS, Dimensions, GeometryProfile,
    MAX_HEIGHT, MAX_WIDTH, PowerMode, Rotation, Variant,
};
pub use display::{Display, State};
pub use error::{BufferTooSmall, BuilderError, Error};
pub use framebuffer::Framebuffer;
pub use interface::{DisplayInterface, I2cInterface, InterfaceError, NoResetPin};
