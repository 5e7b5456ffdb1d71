//! Coordinate rotation utilities
//!
//! This module maps logical pixel coordinates to the controller's page/column
//! layout, applying the configured [`Rotation`] in software.
//!
//! Page/column controllers store each column of 8 vertically stacked pixels in
//! one byte: pixel row `y` lives in page `y / 8`, bit `y % 8` (LSB on top).
//! When the display is rotated, the logical axes are mapped onto that layout
//! before the page and bit are computed.
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
//! use page_display::{rotation::locate, Dimensions, Rotation};
//!
//! let dims = Dimensions::new(64, 128).unwrap();
//!
//! // Pixel (5, 10) sits in page 1, column 5, bit 2
//! let addr = locate(5, 10, &dims, Rotation::Rotate0).unwrap();
//! assert_eq!((addr.page, addr.column, addr.bit), (1, 5, 2));
//!
//! // Upside down, the origin is the bottom-right pixel
//! let addr = locate(0, 0, &dims, Rotation::Rotate180).unwrap();
//! assert_eq!((addr.page, addr.column, addr.bit), (7, 127, 7));
//! ```

use crate::config::{Dimensions, PIXELS_PER_PAGE, Rotation};

/// Physical location of one pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelAddress {
    /// Page (band of 8 rows)
    pub page: u8,
    /// Segment column
    pub column: u8,
    /// Bit within the page byte, 0 = top row
    pub bit: u8,
}

/// Logical size `(width, height)` of the panel under `rotation`
pub fn logical_size(dims: &Dimensions, rotation: Rotation) -> (u16, u16) {
    match rotation {
        Rotation::Rotate0 | Rotation::Rotate180 => (dims.cols, dims.rows),
        Rotation::Rotate90 | Rotation::Rotate270 => (dims.rows, dims.cols),
    }
}

/// Map logical (x, y) to page, column and bit
///
/// Returns `None` when the point lies outside the rotated panel.
///
/// # Arguments
///
/// * `x` - X coordinate (column), 0 to width-1 of the rotated panel
/// * `y` - Y coordinate (row), 0 to height-1 of the rotated panel
/// * `dims` - Physical (unrotated) panel dimensions
/// * `rotation` - Rotation mode
pub fn locate(x: i32, y: i32, dims: &Dimensions, rotation: Rotation) -> Option<PixelAddress> {
    let (width, height) = logical_size(dims, rotation);
    if x < 0 || y < 0 || x >= i32::from(width) || y >= i32::from(height) {
        return None;
    }
    let (x, y) = (x as u16, y as u16);
    let (cols, rows) = (dims.cols, dims.rows);
    let (px, py) = match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (cols - 1 - y, x),
        Rotation::Rotate180 => (cols - 1 - x, rows - 1 - y),
        Rotation::Rotate270 => (y, rows - 1 - x),
    };
    Some(PixelAddress {
        page: (py / PIXELS_PER_PAGE) as u8,
        column: px as u8,
        bit: (py % PIXELS_PER_PAGE) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions::new(64, 128).unwrap()
    }

    #[test]
    fn test_rotate0() {
        let addr = locate(0, 0, &dims(), Rotation::Rotate0).unwrap();
        assert_eq!(addr, PixelAddress { page: 0, column: 0, bit: 0 });

        let addr = locate(127, 63, &dims(), Rotation::Rotate0).unwrap();
        assert_eq!(addr, PixelAddress { page: 7, column: 127, bit: 7 });

        let addr = locate(3, 9, &dims(), Rotation::Rotate0).unwrap();
        assert_eq!(addr, PixelAddress { page: 1, column: 3, bit: 1 });
    }

    #[test]
    fn test_rotate180() {
        let addr = locate(127, 63, &dims(), Rotation::Rotate180).unwrap();
        assert_eq!(addr, PixelAddress { page: 0, column: 0, bit: 0 });
    }

    #[test]
    fn test_rotate90() {
        // logical origin is the physical top-right corner
        let addr = locate(0, 0, &dims(), Rotation::Rotate90).unwrap();
        assert_eq!(addr, PixelAddress { page: 0, column: 127, bit: 0 });
        // logical x runs down the physical rows
        let addr = locate(63, 0, &dims(), Rotation::Rotate90).unwrap();
        assert_eq!(addr, PixelAddress { page: 7, column: 127, bit: 7 });
    }

    #[test]
    fn test_rotate270() {
        // logical origin is the physical bottom-left corner
        let addr = locate(0, 0, &dims(), Rotation::Rotate270).unwrap();
        assert_eq!(addr, PixelAddress { page: 7, column: 0, bit: 7 });
        let addr = locate(0, 127, &dims(), Rotation::Rotate270).unwrap();
        assert_eq!(addr, PixelAddress { page: 7, column: 127, bit: 7 });
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(locate(-1, 0, &dims(), Rotation::Rotate0), None);
        assert_eq!(locate(0, 64, &dims(), Rotation::Rotate0), None);
        assert_eq!(locate(128, 0, &dims(), Rotation::Rotate0), None);
        // 90 degrees: 64 wide, 128 tall
        assert_eq!(locate(64, 0, &dims(), Rotation::Rotate90), None);
        assert!(locate(0, 127, &dims(), Rotation::Rotate90).is_some());
    }

    #[test]
    fn test_logical_size() {
        assert_eq!(logical_size(&dims(), Rotation::Rotate0), (128, 64));
        assert_eq!(logical_size(&dims(), Rotation::Rotate270), (64, 128));
    }
}
