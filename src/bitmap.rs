//! Monochrome bitmaps in page layout
//!
//! A [`Bitmap`] uses the same layout as the display RAM: rows of 8-pixel page
//! bytes, `width` bytes per page, LSB on top. Images converted for the panel
//! can be blitted with [`Canvas::draw_bitmap`](crate::Canvas::draw_bitmap)
//! without reshuffling.
//!
//! ```
//! use page_display::{Bitmap, BitmapError};
//!
//! // 2 x 10 pixels need two pages of two bytes
//! let bitmap = Bitmap::new(2, 10, &[0xFF, 0x01, 0x03, 0x00]).unwrap();
//! assert!(bitmap.pixel(0, 9));
//! assert!(!bitmap.pixel(1, 9));
//!
//! let result = Bitmap::new(2, 10, &[0xFF, 0x01]);
//! assert!(matches!(result, Err(BitmapError::LengthMismatch { expected: 4, provided: 2 })));
//! ```

use crate::error::BitmapError;

/// Borrowed page-major 1 bpp image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    width: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Wrap `data` as a `width` x `height` image
    ///
    /// # Errors
    ///
    /// Returns [`BitmapError::LengthMismatch`] unless `data` holds exactly
    /// `width * ceil(height / 8)` bytes.
    pub const fn new(width: u16, height: u16, data: &'a [u8]) -> Result<Self, BitmapError> {
        let expected = width as usize * height.div_ceil(8) as usize;
        if data.len() != expected {
            return Err(BitmapError::LengthMismatch {
                expected,
                provided: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Raw page bytes
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Whether the pixel at (x, y) is set; `false` outside the image
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = (y / 8) as usize * self.width as usize + x as usize;
        self.data[index] & (1 << (y % 8)) != 0
    }
}

/// USB plug logo, 24 x 16
pub const USB_LOGO: Bitmap<'static> = Bitmap {
    width: 24,
    height: 16,
    data: &USB_LOGO_DATA,
};

const USB_LOGO_DATA: [u8; 48] = [
    0x00, 0x00, 0x80, 0xC0, 0xC0, 0xC0, 0x80, 0x00, 0x80, 0xC0, 0x60, 0x20, 0x20, 0x70, 0x70, 0x20,
    0x00, 0x00, 0xC0, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x07, 0x07, 0x07, 0x03, 0x01,
    0x01, 0x01, 0x03, 0x07, 0x0D, 0x09, 0x1D, 0x1D, 0x1D, 0x01, 0x07, 0x03, 0x01, 0x00, 0x00, 0x00,
];
