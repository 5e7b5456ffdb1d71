//! Pixel write operations
//!
//! Every drawing primitive takes a [`PixelMask`] so the same routine can draw,
//! erase or XOR a shape. The mask is applied to a single bit of a page byte;
//! the other 7 pixels in the byte are left as they were.
//!
//! ## Example
//!
//! ```
//! use page_display::PixelMask;
//!
//! // bit 2 of the byte is pixel row page * 8 + 2
//! assert_eq!(PixelMask::Set.apply(0b0000_0001, 2), 0b0000_0101);
//! assert_eq!(PixelMask::Clear.apply(0b0000_0101, 0), 0b0000_0100);
//! assert_eq!(PixelMask::Toggle.apply(0b0000_0100, 2), 0b0000_0000);
//! ```

/// Operation applied to one pixel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelMask {
    /// Turn the pixel on
    #[default]
    Set,
    /// Turn the pixel off
    Clear,
    /// Flip the pixel
    Toggle,
}

impl PixelMask {
    /// Apply the operation to bit `bit` (0 = top row of the page) of `byte`
    pub fn apply(self, byte: u8, bit: u8) -> u8 {
        let mask = 1u8 << (bit & 0x07);
        match self {
            Self::Set => byte | mask,
            Self::Clear => byte & !mask,
            Self::Toggle => byte ^ mask,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for PixelMask {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::Set,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::Clear,
        }
    }
}
