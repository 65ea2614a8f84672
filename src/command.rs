//! SSD1306 command definitions and bus framing
//!
//! Over I2C the controller has no D/C pin. Instead every transmission starts
//! with a control byte that says how to interpret the rest of the frame:
//!
//! - [`CONTROL_COMMAND`] (`0x00`): the following bytes are commands
//! - [`CONTROL_DATA`] (`0x40`): the following bytes are GDDRAM pixel data
//!   for the currently selected page
//!
//! A frame carries exactly one control byte and never mixes commands with
//! pixel data. [`Frame`] builds such frames in fixed-capacity storage so no
//! transmission needs a heap allocation.
//!
//! ## Example
//!
//! ```
//! use ssd1306_page::command::{self, CommandFrame};
//!
//! let frame = match CommandFrame::commands(&[command::DISPLAY_OFF, command::SET_CLOCK_DIV, 0x80]) {
//!     Ok(frame) => frame,
//!     Err(_) => return,
//! };
//! assert_eq!(frame.as_bytes(), &[0x00, 0xAE, 0xD5, 0x80]);
//! ```

use heapless::Vec;

use crate::config::MAX_WIDTH;

// Control bytes

/// Control byte announcing a command stream (0x00)
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing a GDDRAM data stream (0x40)
pub const CONTROL_DATA: u8 = 0x40;

// Fundamental commands

/// Set contrast control (0x81)
///
/// Requires 1 byte: contrast 0x00..=0xFF.
pub const SET_CONTRAST: u8 = 0x81;

/// Resume display from GDDRAM content (0xA4)
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;

/// Light every pixel regardless of GDDRAM (0xA5)
pub const DISPLAY_ALL_ON: u8 = 0xA5;

/// Normal display polarity, bit set = pixel on (0xA6)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverted display polarity, bit set = pixel off (0xA7)
pub const INVERT_DISPLAY: u8 = 0xA7;

/// Display off, controller sleeps (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

// Scrolling

/// Stop any running hardware scroll (0x2E)
pub const DEACTIVATE_SCROLL: u8 = 0x2E;

// Addressing

/// Set memory addressing mode (0x20)
///
/// Requires 1 byte: 0x00 horizontal, 0x01 vertical, 0x02 page.
pub const SET_MEMORY_MODE: u8 = 0x20;

/// Memory mode argument used during initialisation (0x00)
///
/// Paired with per-page addressing on every flush, so the frame works on
/// both the SSD1306 and the SH1106 (which only knows page mode).
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// Set lower column start address, OR'd with the low nibble (0x00)
pub const SET_LOW_COLUMN: u8 = 0x00;

/// Set higher column start address, OR'd with the high nibble (0x10)
pub const SET_HIGH_COLUMN: u8 = 0x10;

/// Set page start address, OR'd with the page index (0xB0)
pub const SET_PAGE_START: u8 = 0xB0;

// Hardware configuration

/// Set display start line, OR'd with the line (0x40)
pub const SET_START_LINE: u8 = 0x40;

/// Segment re-map, OR 0x01 to map column 127 to SEG0 (0xA0)
pub const SEGMENT_REMAP: u8 = 0xA0;

/// Set multiplex ratio (0xA8)
///
/// Requires 1 byte: rows - 1.
pub const SET_MULTIPLEX: u8 = 0xA8;

/// COM output scan direction, normal (0xC0)
pub const COM_SCAN_INC: u8 = 0xC0;

/// COM output scan direction, remapped (0xC8)
pub const COM_SCAN_DEC: u8 = 0xC8;

/// Set display offset (0xD3)
///
/// Requires 1 byte: vertical shift.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration (0xDA)
///
/// Requires 1 byte, panel-geometry dependent.
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and driving

/// Set display clock divide ratio / oscillator frequency (0xD5)
pub const SET_CLOCK_DIV: u8 = 0xD5;

/// Suggested clock divide value from the datasheet (0x80)
pub const CLOCK_DIV_DEFAULT: u8 = 0x80;

/// Set pre-charge period (0xD9)
pub const SET_PRECHARGE: u8 = 0xD9;

/// Set VCOMH deselect level (0xDB)
pub const SET_VCOM_DETECT: u8 = 0xDB;

/// VCOMH deselect level used during initialisation (0x40)
pub const VCOM_DETECT_DEFAULT: u8 = 0x40;

// Charge pump

/// Charge pump setting (0x8D)
///
/// Requires 1 byte: 0x14 enable (internal supply), 0x10 disable (external VCC).
pub const CHARGE_PUMP: u8 = 0x8D;

/// Charge pump argument when the panel is driven from an external VCC (0x10)
pub const CHARGE_PUMP_EXTERNAL: u8 = 0x10;

/// Charge pump argument when the internal DC-DC generates VCC (0x14)
pub const CHARGE_PUMP_INTERNAL: u8 = 0x14;

/// Pre-charge period with external VCC (0x22)
pub const PRECHARGE_EXTERNAL: u8 = 0x22;

/// Pre-charge period with the internal charge pump (0xF1)
pub const PRECHARGE_INTERNAL: u8 = 0xF1;

/// Longest command group the driver ever sends in one frame
pub const MAX_COMMAND_GROUP: usize = 6;

/// Frame sized for the longest command group plus its control byte
pub type CommandFrame = Frame<{ MAX_COMMAND_GROUP + 1 }>;

/// Frame sized for one full page of the widest supported panel
pub type DataFrame = Frame<{ MAX_WIDTH as usize + 1 }>;

/// Returned when a payload does not fit a [`Frame`]'s capacity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOverflow {
    /// Frame capacity in bytes, control byte included
    pub capacity: usize,
    /// Bytes that were requested, control byte included
    pub len: usize,
}

/// One bus transmission: a control byte followed by its payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> Frame<N> {
    /// Frame tagged with `control`, carrying `payload`
    pub fn tagged(control: u8, payload: &[u8]) -> Result<Self, FrameOverflow> {
        let mut frame = Self { bytes: Vec::new() };
        frame.extend(&[control])?;
        frame.extend(payload)?;
        Ok(frame)
    }

    /// Build a command frame (`[0x00, commands...]`)
    pub fn commands(commands: &[u8]) -> Result<Self, FrameOverflow> {
        Self::tagged(CONTROL_COMMAND, commands)
    }

    /// Build a data frame (`[0x40, pixels...]`)
    pub fn data(pixels: &[u8]) -> Result<Self, FrameOverflow> {
        Self::tagged(CONTROL_DATA, pixels)
    }

    /// Append payload bytes after the control byte
    pub fn extend(&mut self, payload: &[u8]) -> Result<(), FrameOverflow> {
        let len = self.bytes.len() + payload.len();
        self.bytes
            .extend_from_slice(payload)
            .map_err(|()| FrameOverflow { capacity: N, len })
    }

    /// Replace the payload, keeping the control byte
    pub fn set_payload(&mut self, payload: &[u8]) -> Result<(), FrameOverflow> {
        self.bytes.truncate(1);
        self.extend(payload)
    }

    /// The control byte this frame starts with
    pub fn control(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Payload without the control byte
    pub fn payload(&self) -> &[u8] {
        self.bytes.get(1..).unwrap_or(&[])
    }

    /// Wire bytes, control byte first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Page-select group for page `page`: page start, low column, high column
///
/// `column_offset` is 0x00 on the SSD1306 and 0x02 on the SH1106, whose
/// 132-column RAM is centred on a 128-pixel glass.
pub fn page_select(page: u8, column_offset: u8) -> [u8; 3] {
    [
        SET_PAGE_START | (page & 0x07),
        SET_LOW_COLUMN | (column_offset & 0x0F),
        SET_HIGH_COLUMN | (column_offset >> 4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_frame_prefixes_control_byte() {
        let frame = CommandFrame::commands(&[DISPLAY_ON]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x00, 0xAF]);
        assert_eq!(frame.control(), Some(CONTROL_COMMAND));
        assert_eq!(frame.payload(), &[0xAF]);
    }

    #[test]
    fn test_longest_command_group_fits() {
        let group = [
            SET_VCOM_DETECT,
            VCOM_DETECT_DEFAULT,
            DISPLAY_ALL_ON_RESUME,
            NORMAL_DISPLAY,
            DEACTIVATE_SCROLL,
            DISPLAY_ON,
        ];
        let frame = CommandFrame::commands(&group).unwrap();
        assert_eq!(frame.as_bytes().len(), MAX_COMMAND_GROUP + 1);
    }

    #[test]
    fn test_command_frame_overflow_is_reported() {
        let result = CommandFrame::commands(&[0u8; MAX_COMMAND_GROUP + 1]);
        assert_eq!(
            result,
            Err(FrameOverflow {
                capacity: MAX_COMMAND_GROUP + 1,
                len: MAX_COMMAND_GROUP + 2,
            })
        );
    }

    #[test]
    fn test_data_frame_reuse_keeps_control_byte() {
        let mut frame = DataFrame::data(&[]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x40]);
        frame.set_payload(&[1, 2, 3]).unwrap();
        frame.set_payload(&[9]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x40, 9]);
    }

    #[test]
    fn test_zero_capacity_frame_reports_overflow() {
        assert_eq!(
            Frame::<0>::commands(&[]),
            Err(FrameOverflow {
                capacity: 0,
                len: 1
            })
        );
        assert_eq!(
            Frame::<1>::data(&[0xFF]),
            Err(FrameOverflow {
                capacity: 1,
                len: 2
            })
        );
        assert_eq!(Frame::<1>::commands(&[]).unwrap().as_bytes(), &[0x00]);
    }

    #[test]
    fn test_data_frame_holds_widest_page() {
        let page = [0xAAu8; MAX_WIDTH as usize];
        let frame = DataFrame::data(&page).unwrap();
        assert_eq!(frame.payload().len(), MAX_WIDTH as usize);
    }

    #[test]
    fn test_page_select_ssd1306() {
        assert_eq!(page_select(0, 0x00), [0xB0, 0x00, 0x10]);
        assert_eq!(page_select(7, 0x00), [0xB7, 0x00, 0x10]);
    }

    #[test]
    fn test_page_select_sh1106_offset() {
        assert_eq!(page_select(3, 0x02), [0xB3, 0x02, 0x10]);
    }
}
