//! In-memory pixel buffer in the controller's page layout
//!
//! [`Framebuffer`] wraps caller-provided storage and knows how to address it.
//! Its bytes are exactly what goes over the wire during a flush: page 0
//! first, then page 1, and so on, each page `width` bytes long. See
//! [`rotation`](crate::rotation) for the addressing law.
//!
//! Drawing is tolerant: coordinates outside the panel are ignored, so shapes
//! and bitmaps can hang off the edge without manual clipping.
//!
//! ## Example
//!
//! ```
//! use ssd1306_page::{Bitmap, Color, Dimensions, Framebuffer, Rotation};
//!
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let mut fb = match Framebuffer::new([0u8; 1024], dims, Rotation::Rotate0) {
//!     Ok(fb) => fb,
//!     Err(_) => return,
//! };
//!
//! fb.write_pixel(3, 10, Color::On);
//! assert_eq!(fb.get_pixel(3, 10), Some(true));
//! assert_eq!(fb.as_bytes()[128 + 3], 0b0000_0100);
//!
//! // 8x2 arrow-ish glyph, MSB first
//! const GLYPH: [u8; 2] = [0b1000_0001, 0b0111_1110];
//! fb.draw_bitmap(0, 0, &Bitmap::new(&GLYPH, 8, 2), Color::On);
//! assert_eq!(fb.get_pixel(0, 0), Some(true));
//! assert_eq!(fb.get_pixel(1, 0), Some(false));
//! ```

use crate::color::Color;
use crate::config::{Bitmap, Dimensions, Rotation};
use crate::error::BufferTooSmall;
use crate::rotation::{apply_rotation, pixel_address};

/// Page-addressed 1-bit framebuffer
///
/// ## Type Parameters
///
/// * `B` - storage, e.g. `[u8; 1024]`, `&'static mut [u8]` or `Vec<u8>`
pub struct Framebuffer<B> {
    /// Backing storage, at least `dimensions.buffer_size()` bytes
    buffer: B,
    /// Physical panel dimensions
    dimensions: Dimensions,
    /// Orientation applied to every pixel access
    rotation: Rotation,
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap `buffer` as the framebuffer for a panel of `dimensions`
    ///
    /// # Errors
    ///
    /// Returns [`BufferTooSmall`] if `buffer` is shorter than
    /// `dimensions.buffer_size()`. Extra bytes are left untouched.
    pub fn new(
        buffer: B,
        dimensions: Dimensions,
        rotation: Rotation,
    ) -> Result<Self, BufferTooSmall> {
        let required = dimensions.buffer_size();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(BufferTooSmall { required, provided });
        }
        Ok(Self {
            buffer,
            dimensions,
            rotation,
        })
    }

    /// Physical panel dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Current orientation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change the orientation used by later drawing calls
    ///
    /// Already drawn pixels stay where they are.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Drawable width and height after rotation
    pub fn size(&self) -> (u32, u32) {
        let (w, h) = (
            u32::from(self.dimensions.width),
            u32::from(self.dimensions.height),
        );
        match self.rotation {
            Rotation::Rotate0 | Rotation::Rotate180 => (w, h),
            Rotation::Rotate90 | Rotation::Rotate270 => (h, w),
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.bytes_mut().fill(0x00);
    }

    /// Turn every pixel on
    pub fn fill(&mut self) {
        self.bytes_mut().fill(0xFF);
    }

    /// Apply `color` to the pixel at logical `(x, y)`
    ///
    /// Coordinates outside the drawable area are ignored.
    pub fn write_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some((index, mask)) = self.locate(x, y) {
            let bytes = self.bytes_mut();
            bytes[index] = color.apply(bytes[index], mask);
        }
    }

    /// Whether the pixel at logical `(x, y)` is lit, `None` off-panel
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (index, mask) = self.locate(x, y)?;
        Some(self.as_bytes()[index] & mask != 0)
    }

    /// Blit the set bits of `bitmap` with its top-left corner at `(x, y)`
    ///
    /// Clear source bits leave the destination untouched. Source rows are
    /// read MSB first; a short `data` slice reads as unset bits. Destination
    /// coordinates past `i32::MAX` are off-panel and dropped like any other.
    pub fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &Bitmap<'_>, color: Color) {
        let byte_width = bitmap.byte_width();
        for j in 0..i32::from(bitmap.height) {
            let Some(dy) = y.checked_add(j) else {
                break;
            };
            let row = j as usize * byte_width;
            for i in 0..i32::from(bitmap.width) {
                let Some(dx) = x.checked_add(i) else {
                    break;
                };
                let byte = bitmap.data.get(row + i as usize / 8).copied().unwrap_or(0);
                if byte & (0x80 >> (i & 7)) != 0 {
                    self.write_pixel(dx, dy, color);
                }
            }
        }
    }

    /// Raw bytes in wire order, exactly `buffer_size()` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.dimensions.buffer_size()]
    }

    /// The `width` bytes of page `page`, or `None` past the last page
    pub fn page(&self, page: u16) -> Option<&[u8]> {
        if page >= self.dimensions.pages() {
            return None;
        }
        let width = self.dimensions.width as usize;
        let start = page as usize * width;
        self.as_bytes().get(start..start + width)
    }

    /// Give back the storage
    pub fn into_inner(self) -> B {
        self.buffer
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        let len = self.dimensions.buffer_size();
        &mut self.buffer.as_mut()[..len]
    }

    /// Byte index and mask of a logical coordinate, after bounds check and rotation
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        let (w, h) = self.size();
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= w || y >= h {
            return None;
        }
        let width = u32::from(self.dimensions.width);
        let height = u32::from(self.dimensions.height);
        let (px, py) = apply_rotation(x, y, width, height, self.rotation);
        Some(pixel_address(px, py, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn framebuffer(width: u16, height: u16) -> Framebuffer<alloc::vec::Vec<u8>> {
        let dims = Dimensions::new(width, height).unwrap();
        Framebuffer::new(vec![0u8; dims.buffer_size()], dims, Rotation::Rotate0).unwrap()
    }

    #[test]
    fn test_new_rejects_short_buffer() {
        let dims = Dimensions::new(128, 64).unwrap();
        let result = Framebuffer::new([0u8; 1023], dims, Rotation::Rotate0);
        assert!(matches!(
            result,
            Err(BufferTooSmall {
                required: 1024,
                provided: 1023
            })
        ));
    }

    #[test]
    fn test_write_pixel_sets_documented_bit() {
        let mut fb = framebuffer(128, 64);
        fb.write_pixel(10, 17, Color::On);
        let bytes = fb.as_bytes();
        assert_eq!(bytes[10 + 2 * 128], 1 << 1);
        assert_eq!(bytes.iter().filter(|b| **b != 0).count(), 1);
    }

    #[test]
    fn test_read_back_matches_last_color() {
        let mut fb = framebuffer(128, 64);
        for (x, y) in [(0, 0), (127, 63), (64, 31), (5, 8)] {
            fb.write_pixel(x, y, Color::On);
            assert_eq!(fb.get_pixel(x, y), Some(true));
            fb.write_pixel(x, y, Color::Off);
            assert_eq!(fb.get_pixel(x, y), Some(false));
        }
    }

    #[test]
    fn test_invert_twice_restores_pixel() {
        let mut fb = framebuffer(128, 32);
        fb.write_pixel(7, 7, Color::On);
        fb.write_pixel(7, 7, Color::Invert);
        assert_eq!(fb.get_pixel(7, 7), Some(false));
        fb.write_pixel(7, 7, Color::Invert);
        assert_eq!(fb.get_pixel(7, 7), Some(true));
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut fb = framebuffer(128, 64);
        fb.fill();
        for (x, y) in [(-1, 0), (0, -1), (128, 0), (0, 64), (i32::MIN, i32::MAX)] {
            fb.write_pixel(x, y, Color::Off);
            assert_eq!(fb.get_pixel(x, y), None);
        }
        assert!(fb.as_bytes().iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_clear_and_fill() {
        let mut fb = framebuffer(96, 16);
        fb.fill();
        assert!(fb.as_bytes().iter().all(|b| *b == 0xFF));
        fb.clear();
        assert!(fb.as_bytes().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn test_partial_last_page_addresses_low_bits() {
        let mut fb = framebuffer(16, 12);
        fb.write_pixel(2, 11, Color::On);
        assert_eq!(fb.page(1).unwrap()[2], 1 << 3);
        assert_eq!(fb.get_pixel(2, 12), None);
    }

    #[test]
    fn test_bitmap_all_ones_sets_exact_rectangle() {
        let mut fb = framebuffer(128, 64);
        // 10x3, rows padded to 2 bytes
        let data = [0xFFu8; 6];
        fb.draw_bitmap(0, 0, &Bitmap::new(&data, 10, 3), Color::On);
        for y in 0..64 {
            for x in 0..128 {
                let inside = x < 10 && y < 3;
                assert_eq!(fb.get_pixel(x, y), Some(inside), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_bitmap_is_msb_first_and_row_padded() {
        let mut fb = framebuffer(32, 8);
        // 9 wide: byte 0 covers columns 0..8, bit 7 of byte 1 is column 8
        let data = [0b0100_0000, 0b1000_0000, 0b0000_0000, 0b1000_0000];
        fb.draw_bitmap(0, 0, &Bitmap::new(&data, 9, 2), Color::On);
        assert_eq!(fb.get_pixel(1, 0), Some(true));
        assert_eq!(fb.get_pixel(8, 0), Some(true));
        assert_eq!(fb.get_pixel(0, 0), Some(false));
        assert_eq!(fb.get_pixel(8, 1), Some(true));
        assert_eq!(fb.get_pixel(0, 1), Some(false));
    }

    #[test]
    fn test_bitmap_clips_at_edges() {
        let mut fb = framebuffer(128, 64);
        let data = [0xFFu8; 8];
        fb.draw_bitmap(124, 60, &Bitmap::new(&data, 8, 8), Color::On);
        fb.draw_bitmap(-4, -4, &Bitmap::new(&data, 8, 8), Color::On);
        let lit = (0..64)
            .flat_map(|y| (0..128).map(move |x| (x, y)))
            .filter(|(x, y)| fb.get_pixel(*x, *y) == Some(true))
            .count();
        assert_eq!(lit, 32);
    }

    #[test]
    fn test_bitmap_far_off_panel_is_dropped() {
        let mut fb = framebuffer(128, 64);
        let data = [0xFFu8; 8];
        fb.draw_bitmap(i32::MAX, 0, &Bitmap::new(&data[..1], 8, 1), Color::On);
        fb.draw_bitmap(0, i32::MAX - 3, &Bitmap::new(&data, 8, 8), Color::On);
        fb.draw_bitmap(i32::MAX - 1, i32::MAX - 1, &Bitmap::new(&data, 8, 8), Color::On);
        fb.draw_bitmap(i32::MIN, i32::MIN, &Bitmap::new(&data, 8, 8), Color::On);
        assert!(fb.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_bitmap_short_data_draws_nothing_extra() {
        let mut fb = framebuffer(32, 8);
        fb.draw_bitmap(0, 0, &Bitmap::new(&[0xFF], 8, 4), Color::On);
        assert_eq!(fb.get_pixel(0, 0), Some(true));
        assert_eq!(fb.get_pixel(0, 1), Some(false));
    }

    #[test]
    fn test_rotation_maps_to_physical_bytes() {
        let mut fb = framebuffer(128, 64);
        fb.set_rotation(Rotation::Rotate180);
        fb.write_pixel(0, 0, Color::On);
        assert_eq!(fb.as_bytes()[1023], 0x80);

        fb.clear();
        fb.set_rotation(Rotation::Rotate90);
        assert_eq!(fb.size(), (64, 128));
        fb.write_pixel(0, 0, Color::On);
        assert_eq!(fb.as_bytes()[127], 0x01);
        fb.write_pixel(64, 0, Color::On);
        assert_eq!(fb.as_bytes().iter().filter(|b| **b != 0).count(), 1);
    }

    #[test]
    fn test_page_slices() {
        let mut fb = framebuffer(128, 64);
        fb.write_pixel(0, 56, Color::On);
        assert_eq!(fb.page(7).unwrap()[0], 0x01);
        assert_eq!(fb.page(7).unwrap().len(), 128);
        assert!(fb.page(8).is_none());
    }
}
