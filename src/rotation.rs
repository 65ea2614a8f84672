//! Coordinate rotation and page addressing
//!
//! The controller's GDDRAM is split into pages of 8 rows. Each byte holds one
//! column of a page, with bit 0 at the top row of the page and bit 7 at the
//! bottom. The framebuffer mirrors this layout byte for byte, so a flush can
//! ship each page unchanged:
//!
//! ```text
//! index = x + (y / 8) * width
//! mask  = 1 << (y % 8)
//! ```
//!
//! Rotation happens before addressing: logical coordinates are first mapped
//! to the physical panel, then to a byte and bit.
//!
//! ## Rotation Modes
//!
//! - **Rotate0**: Native orientation
//! - **Rotate90**: 90° clockwise, width and height swapped
//! - **Rotate180**: 180° rotation, origin at bottom-right
//! - **Rotate270**: 270° clockwise (or 90° counter-clockwise)
//!
//! ## Example
//!
//! ```
//! use ssd1306_page::rotation::pixel_address;
//!
//! // Pixel (0,0) is byte 0, bit 0 (LSB)
//! assert_eq!(pixel_address(0, 0, 128), (0, 0x01));
//!
//! // Pixel (0,7) is still byte 0, bit 7 (MSB)
//! assert_eq!(pixel_address(0, 7, 128), (0, 0x80));
//!
//! // Pixel (0,8) starts page 1
//! assert_eq!(pixel_address(0, 8, 128), (128, 0x01));
//! ```

use crate::config::Rotation;

/// Map logical coordinates to physical panel coordinates
///
/// # Arguments
///
/// * `x` - logical X, 0 to rotated width - 1
/// * `y` - logical Y, 0 to rotated height - 1
/// * `width` - physical panel width in pixels
/// * `height` - physical panel height in pixels
/// * `rotation` - Rotation mode
///
/// ```
/// use ssd1306_page::{rotation::apply_rotation, Rotation};
///
/// // On a 128x64 panel rotated 90°, the logical origin sits at the top-right
/// assert_eq!(apply_rotation(0, 0, 128, 64, Rotation::Rotate90), (127, 0));
/// ```
pub fn apply_rotation(x: u32, y: u32, width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (width - 1 - y, x),
        Rotation::Rotate180 => (width - 1 - x, height - 1 - y),
        Rotation::Rotate270 => (y, height - 1 - x),
    }
}

/// Buffer index and bit mask of physical pixel `(x, y)`
pub fn pixel_address(x: u32, y: u32, width: u32) -> (usize, u8) {
    let index = (x + (y / 8) * width) as usize;
    let mask = 1u8 << (y & 7);
    (index, mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_address_page_layout() {
        // column 5, row 13: page 1, bit 5
        assert_eq!(pixel_address(5, 13, 128), (128 + 5, 0x20));
        // last pixel of a 128x64 panel
        assert_eq!(pixel_address(127, 63, 128), (1023, 0x80));
    }

    #[test]
    fn test_rotate0_is_identity() {
        assert_eq!(apply_rotation(3, 9, 128, 64, Rotation::Rotate0), (3, 9));
    }

    #[test]
    fn test_rotate180() {
        assert_eq!(apply_rotation(0, 0, 128, 64, Rotation::Rotate180), (127, 63));
        assert_eq!(apply_rotation(127, 63, 128, 64, Rotation::Rotate180), (0, 0));
    }

    #[test]
    fn test_rotate90() {
        // logical space is 64 wide, 128 tall
        assert_eq!(apply_rotation(0, 0, 128, 64, Rotation::Rotate90), (127, 0));
        assert_eq!(apply_rotation(63, 127, 128, 64, Rotation::Rotate90), (0, 63));
    }

    #[test]
    fn test_rotate270() {
        assert_eq!(apply_rotation(0, 0, 128, 64, Rotation::Rotate270), (0, 63));
        assert_eq!(apply_rotation(63, 127, 128, 64, Rotation::Rotate270), (127, 0));
    }
}
