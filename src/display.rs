//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::color::Color;
use crate::command::{
    CHARGE_PUMP, CHARGE_PUMP_EXTERNAL, CHARGE_PUMP_INTERNAL, CLOCK_DIV_DEFAULT, COM_SCAN_DEC,
    CONTROL_COMMAND, CONTROL_DATA, CommandFrame, DEACTIVATE_SCROLL, DISPLAY_ALL_ON_RESUME,
    DISPLAY_OFF, DISPLAY_ON, DataFrame, INVERT_DISPLAY, MEMORY_MODE_HORIZONTAL, NORMAL_DISPLAY,
    PRECHARGE_EXTERNAL, PRECHARGE_INTERNAL, SEGMENT_REMAP, SET_CLOCK_DIV, SET_COM_PINS,
    SET_CONTRAST, SET_DISPLAY_OFFSET, SET_MEMORY_MODE, SET_MULTIPLEX, SET_PRECHARGE,
    SET_START_LINE, SET_VCOM_DETECT, VCOM_DETECT_DEFAULT, page_select,
};
use crate::config::{Bitmap, Config, Dimensions, PowerMode, Rotation, geometry_profile};
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Controller lifecycle
///
/// A `Display` only exists once its framebuffer storage is in place, so the
/// first observable state is [`State::BufferAllocated`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Framebuffer ready, controller not configured yet
    BufferAllocated,
    /// Initialisation commands sent, first frame not yet shown
    HandshakeSent,
    /// Controller configured and showing the framebuffer
    DisplayOn,
}

/// Core display driver for SSD1306 / SH1106
///
/// Owns the bus interface and the framebuffer. Drawing calls only touch
/// memory; [`flush`](Self::flush) pushes the whole framebuffer to the panel.
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Framebuffer storage implementing `AsRef<[u8]> + AsMut<[u8]>`
pub struct Display<I, B>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Pixel storage in GDDRAM layout
    framebuffer: Framebuffer<B>,
    /// Contrast last programmed (or chosen by `begin`)
    contrast: u8,
    /// Supply mode passed to the last `begin`
    power_mode: Option<PowerMode>,
    /// Lifecycle state
    state: State,
}

impl<I, B> Display<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new Display over caller-provided framebuffer storage
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` holds fewer than
    /// `config.dimensions.buffer_size()` bytes.
    ///
    /// ## Example
    ///
    /// ```rust,no_run
    /// use ssd1306_page::{Builder, Dimensions, Display, I2cInterface, PowerMode};
    /// # use core::convert::Infallible;
    /// # use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
    /// # struct MockI2c;
    /// # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
    /// # impl I2c<SevenBitAddress> for MockI2c {
    /// #     fn transaction(
    /// #         &mut self,
    /// #         _address: SevenBitAddress,
    /// #         _operations: &mut [Operation<'_>],
    /// #     ) -> Result<(), Self::Error> {
    /// #         Ok(())
    /// #     }
    /// # }
    /// let dims = match Dimensions::new(128, 64) {
    ///     Ok(dims) => dims,
    ///     Err(_) => return,
    /// };
    /// let config = match Builder::new().dimensions(dims).build() {
    ///     Ok(config) => config,
    ///     Err(_) => return,
    /// };
    /// let interface = I2cInterface::new(MockI2c, config.address);
    /// let mut display = match Display::new(interface, config, [0u8; 1024]) {
    ///     Ok(display) => display,
    ///     Err(_) => return,
    /// };
    /// let _ = display.begin(PowerMode::Internal);
    /// ```
    pub fn new(interface: I, config: Config, buffer: B) -> Result<Self, Error<I>> {
        let framebuffer = Framebuffer::new(buffer, config.dimensions, config.rotation)?;
        Ok(Self {
            interface,
            config,
            framebuffer,
            contrast: 0,
            power_mode: None,
            state: State::BufferAllocated,
        })
    }

    /// Pulse the reset line through the interface
    ///
    /// Call before [`begin`](Self::begin) on boards that wire RST.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.reset(delay).map_err(Error::Interface)
    }

    /// Bring the controller from power-on to showing the framebuffer
    ///
    /// Clears the framebuffer, draws the configured splash image, sends the
    /// initialisation sequence for `power_mode`, then flushes once.
    ///
    /// # Errors
    ///
    /// - `Error::UnsupportedGeometry` if the panel size has no known COM pin
    ///   and contrast profile. Nothing is sent to the bus in that case.
    /// - `Error::Interface` if any transmission fails. The display is left in
    ///   [`State::BufferAllocated`] or [`State::HandshakeSent`].
    pub fn begin(&mut self, power_mode: PowerMode) -> DisplayResult<I> {
        let dims = self.config.dimensions;
        let Some(profile) = geometry_profile(dims) else {
            warn!(
                "ssd1306: no profile for {}x{} panel",
                dims.width, dims.height
            );
            return Err(Error::UnsupportedGeometry {
                width: dims.width,
                height: dims.height,
            });
        };

        self.state = State::BufferAllocated;
        self.framebuffer.clear();
        if let Some(splash) = self.config.splash {
            self.draw_splash(&splash);
        }

        let external = power_mode == PowerMode::External;
        let contrast = profile.contrast(power_mode);

        self.send_commands(&[DISPLAY_OFF, SET_CLOCK_DIV, CLOCK_DIV_DEFAULT, SET_MULTIPLEX])?;
        self.send_command((dims.height - 1) as u8)?;

        self.send_commands(&[SET_DISPLAY_OFFSET, 0x00, SET_START_LINE, CHARGE_PUMP])?;
        self.send_command(if external {
            CHARGE_PUMP_EXTERNAL
        } else {
            CHARGE_PUMP_INTERNAL
        })?;

        self.send_commands(&[
            SET_MEMORY_MODE,
            MEMORY_MODE_HORIZONTAL,
            SEGMENT_REMAP | 0x01,
            COM_SCAN_DEC,
        ])?;

        self.send_command(SET_COM_PINS)?;
        self.send_command(profile.com_pins)?;
        self.send_command(SET_CONTRAST)?;
        self.send_command(contrast)?;
        self.contrast = contrast;

        self.send_command(SET_PRECHARGE)?;
        self.send_command(if external {
            PRECHARGE_EXTERNAL
        } else {
            PRECHARGE_INTERNAL
        })?;

        self.send_commands(&[
            SET_VCOM_DETECT,
            VCOM_DETECT_DEFAULT,
            DISPLAY_ALL_ON_RESUME,
            NORMAL_DISPLAY,
            DEACTIVATE_SCROLL,
            DISPLAY_ON,
        ])?;

        self.power_mode = Some(power_mode);
        self.state = State::HandshakeSent;
        debug!(
            "ssd1306: handshake sent ({}x{}, {:?}, contrast {:#04x})",
            dims.width, dims.height, power_mode, contrast
        );

        self.flush()?;
        self.state = State::DisplayOn;
        debug!("ssd1306: display on");
        Ok(())
    }

    /// Write the whole framebuffer to the controller, page by page
    ///
    /// Each page is sent as a page-select command frame followed by one data
    /// frame of `width` bytes.
    ///
    /// # Errors
    ///
    /// - `Error::NotInitialized` before a successful handshake
    /// - `Error::Interface` if a transmission fails; later pages are not sent
    pub fn flush(&mut self) -> DisplayResult<I> {
        if self.state == State::BufferAllocated {
            return Err(Error::NotInitialized);
        }

        let offset = self.config.variant.column_offset();
        let mut frame = DataFrame::tagged(CONTROL_DATA, &[])?;
        for page in 0..self.config.dimensions.pages() {
            self.send_commands(&page_select(page as u8, offset))?;
            frame.set_payload(self.framebuffer.page(page).unwrap_or(&[]))?;
            self.interface
                .write(frame.as_bytes())
                .map_err(Error::Interface)?;
            trace!("ssd1306: page {} flushed", page);
        }
        Ok(())
    }

    /// Turn every pixel off (framebuffer only)
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Turn every pixel on (framebuffer only)
    pub fn fill(&mut self) {
        self.framebuffer.fill();
    }

    /// Apply `color` to one pixel; off-panel coordinates are ignored
    pub fn write_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.write_pixel(x, y, color);
    }

    /// Whether a pixel is lit in the framebuffer, `None` off-panel
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<bool> {
        self.framebuffer.get_pixel(x, y)
    }

    /// Blit the set bits of `bitmap` at `(x, y)`
    pub fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &Bitmap<'_>, color: Color) {
        self.framebuffer.draw_bitmap(x, y, bitmap, color);
    }

    /// Program a new contrast value and remember it
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<I> {
        self.send_commands(&[SET_CONTRAST, contrast])?;
        self.contrast = contrast;
        Ok(())
    }

    /// Drop contrast to zero, or restore the remembered contrast
    pub fn dim(&mut self, dim: bool) -> DisplayResult<I> {
        let contrast = if dim { 0x00 } else { self.contrast };
        self.send_commands(&[SET_CONTRAST, contrast])
    }

    /// Swap lit and dark pixels in hardware
    pub fn set_inverted(&mut self, inverted: bool) -> DisplayResult<I> {
        self.send_command(if inverted {
            INVERT_DISPLAY
        } else {
            NORMAL_DISPLAY
        })
    }

    /// Wake the panel or put it to sleep (GDDRAM is retained)
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        self.send_command(if on { DISPLAY_ON } else { DISPLAY_OFF })
    }

    /// Change the orientation used by later drawing calls
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.config.rotation = rotation;
        self.framebuffer.set_rotation(rotation);
    }

    /// Send a group of commands in one frame
    fn send_commands(&mut self, commands: &[u8]) -> DisplayResult<I> {
        let frame = CommandFrame::commands(commands)?;
        self.interface
            .write(frame.as_bytes())
            .map_err(Error::Interface)
    }

    /// Send a single command
    fn send_command(&mut self, command: u8) -> DisplayResult<I> {
        self.interface
            .write(&[CONTROL_COMMAND, command])
            .map_err(Error::Interface)
    }

    fn draw_splash(&mut self, splash: &Bitmap<'_>) {
        let (w, h) = self.framebuffer.size();
        let x = (w as i32 - i32::from(splash.width)) / 2;
        let y = (h as i32 - i32::from(splash.height)) / 2;
        self.framebuffer.draw_bitmap(x, y, splash, Color::On);
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Get display rotation
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Contrast currently programmed
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Supply mode used by the last `begin`
    pub fn power_mode(&self) -> Option<PowerMode> {
        self.power_mode
    }

    /// Read-only access to the framebuffer
    pub fn framebuffer(&self) -> &Framebuffer<B> {
        &self.framebuffer
    }

    /// Mutable access to the framebuffer
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<B> {
        &mut self.framebuffer
    }

    /// Give back the interface and the framebuffer storage
    pub fn release(self) -> (I, B) {
        (self.interface, self.framebuffer.into_inner())
    }
}

#[cfg(feature = "alloc")]
impl<I> Display<I, alloc::vec::Vec<u8>>
where
    I: DisplayInterface,
{
    /// Create a new Display with a heap-allocated framebuffer
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfMemory` if the allocator cannot provide
    /// `config.dimensions.buffer_size()` bytes.
    pub fn allocate(interface: I, config: Config) -> Result<Self, Error<I>> {
        let size = config.dimensions.buffer_size();
        let mut buffer = alloc::vec::Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|_| Error::OutOfMemory)?;
        buffer.resize(size, 0);
        Self::new(interface, config, buffer)
    }
}
