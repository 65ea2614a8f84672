//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait, the bus transport the
//! driver talks through, and [`I2cInterface`], its implementation for
//! embedded-hal v1.0 I2C.
//!
//! ## Hardware Requirements
//!
//! The SSD1306 in I2C mode needs:
//! - I2C bus (SDA + SCL), 7-bit address 0x3C or 0x3D
//! - optionally a RST pin (output, active low); many breakouts tie it high
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! use ssd1306_page::{DisplayInterface, I2cInterface};
//! # use core::convert::Infallible;
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
//! // Create interface at the default address
//! let mut interface = I2cInterface::new(MockI2c, ssd1306_page::DEFAULT_ADDRESS);
//!
//! // Send a framed command (display off)
//! let _ = interface.write(&[0x00, 0xAE]);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::i2c::I2c;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the bus transport to the controller
///
/// This trait abstracts over different hardware implementations, allowing
/// the [`Display`](crate::display::Display) to work with anything that can
/// push a byte sequence to the controller's address in one blocking
/// transmission.
///
/// ## Implementing
///
/// For most cases, use the provided [`I2cInterface`]. Implement this trait
/// yourself for PIO-based or bit-banged buses, or to record frames in tests.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Transmit one frame to the controller
    ///
    /// `frame` already starts with its control byte. The implementation must
    /// send it as a single bus transaction and block until it completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    fn write(&mut self, frame: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Pulse the controller's reset line, if there is one
    ///
    /// The implementation must:
    /// 1. Drive RST high and wait 1ms
    /// 2. Drive RST low and wait 10ms
    /// 3. Drive RST high and wait 10ms
    ///
    /// The default does nothing, for panels without a reset line.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let _ = delay;
        Ok(())
    }
}

/// Errors that can occur at the interface level
///
/// Generic over I2C and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<I2cErr, PinErr> {
    /// I2C communication error (NACK, arbitration loss, bus fault)
    I2c(I2cErr),
    /// Reset pin error
    Pin(PinErr),
}

impl<I2cErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<I2cErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "I2C error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<I2cErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<I2cErr, PinErr> {}

/// Placeholder for panels whose RST line is not wired to the MCU
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// I2C interface implementation for the SSD1306
///
/// ## Type Parameters
///
/// * `I2C` - bus implementing [`I2c`]
/// * `RST` - reset pin implementing [`OutputPin`], [`NoResetPin`] if absent
pub struct I2cInterface<I2C, RST = NoResetPin> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
    /// Reset pin (active low)
    rst: RST,
}

impl<I2C> I2cInterface<I2C, NoResetPin>
where
    I2C: I2c,
{
    /// Create a new interface for the controller at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            rst: NoResetPin,
        }
    }

    /// Attach a reset pin
    pub fn with_reset<RST: OutputPin>(self, rst: RST) -> I2cInterface<I2C, RST> {
        I2cInterface {
            i2c: self.i2c,
            address: self.address,
            rst,
        }
    }
}

impl<I2C, RST> I2cInterface<I2C, RST> {
    /// Device address this interface writes to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus and the reset pin
    pub fn release(self) -> (I2C, RST) {
        (self.i2c, self.rst)
    }
}

impl<I2C, RST> DisplayInterface for I2cInterface<I2C, RST>
where
    I2C: I2c,
    I2C::Error: Debug,
    RST: OutputPin,
    RST::Error: Debug,
{
    type Error = InterfaceError<I2C::Error, RST::Error>;

    fn write(&mut self, frame: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.i2c
            .write(self.address, frame)
            .map_err(InterfaceError::I2c)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(1);
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(10);
        Ok(())
    }
}
