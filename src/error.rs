//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! bitmap construction ([`BitmapError`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors from controllers and the display manager
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! Drawing primitives never return [`Error::OutOfRange`]: shapes that leave the
//! panel are clipped pixel by pixel. Only the addressing calls treat a bad
//! page, column or line as an error.
//!
//! ## Example
//!
//! ```
//! use page_display::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Height must be a whole number of pages
//! let result = Dimensions::new(60, 128);
//! assert!(result.is_err());
//! ```

use crate::config::ControllerKind;

/// Maximum number of pixel rows a page/column controller can address
///
/// Both supported controllers drive 64 COM lines (8 pages).
pub const MAX_ROWS: u16 = 64;

/// Maximum number of segment columns a page/column controller can address
///
/// The ST7565R has 132 segment drivers; the SSD1306 stops at 128.
pub const MAX_COLUMNS: u16 = 132;

/// Capability a controller may lack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Turning the panel on or off
    SwitchDisplay,
    /// Inverting all pixels in hardware
    SwitchInvert,
    /// Adjusting contrast / electronic volume
    SetContrast,
    /// Entering or leaving the controller's sleep mode
    Sleep,
    /// Switching a backlight LED
    SwitchBacklight,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::SwitchDisplay => "switch display",
            Self::SwitchInvert => "switch invert",
            Self::SetContrast => "set contrast",
            Self::Sleep => "sleep",
            Self::SwitchBacklight => "switch backlight",
        };
        f.write_str(name)
    }
}

/// Addressing register that rejected a value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Segment column
    Column,
    /// Page (band of 8 rows)
    Page,
    /// Display start line
    Line,
}

/// Errors that can occur when interacting with the display
///
/// Generic over the transport error so callers can match on the
/// underlying SPI/GPIO failure.
#[derive(Debug)]
pub enum Error<E> {
    /// Transport error (SPI/GPIO)
    ///
    /// Wraps the error returned by the [`DisplayInterface`](crate::DisplayInterface).
    /// Never retried by this crate.
    Transport(E),
    /// The controller does not implement the requested capability
    Unsupported(Operation),
    /// An addressing value outside the panel geometry
    OutOfRange {
        /// Register being addressed
        axis: Axis,
        /// Requested value
        value: u16,
        /// Exclusive upper bound
        limit: u16,
    },
    /// Buffer is too small for the display
    ///
    /// The provided buffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// The backlight GPIO could not be driven
    Pin,
}

impl<E> Error<E> {
    pub(crate) fn out_of_range(axis: Axis, value: impl Into<u16>, limit: u16) -> Self {
        Self::OutOfRange {
            axis,
            value: value.into(),
            limit,
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {e:?}"),
            Self::Unsupported(op) => write!(f, "Unsupported operation: {op}"),
            Self::OutOfRange { axis, value, limit } => {
                write!(f, "{axis:?} {value} out of range (limit {limit})")
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::Pin => write!(f, "Backlight pin error"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
    /// Dimensions exceed what the selected controller can address
    UnsupportedDimensions {
        /// Selected controller
        kind: ControllerKind,
        /// Number of columns (width) requested
        cols: u16,
    },
    /// Contrast range is empty (`min > max`)
    InvalidContrastRange {
        /// Lower bound
        min: u8,
        /// Upper bound
        max: u8,
    },
    /// Start line is not a valid row
    InvalidStartLine(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_ROWS}x{MAX_COLUMNS}, rows must be multiple of 8)"
            ),
            Self::UnsupportedDimensions { kind, cols } => {
                write!(f, "{kind:?} cannot address {cols} columns")
            }
            Self::InvalidContrastRange { min, max } => {
                write!(f, "Invalid contrast range {min}..={max}")
            }
            Self::InvalidStartLine(line) => write!(f, "Invalid start line {line}"),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors that can occur when wrapping bitmap data
#[derive(Debug, PartialEq)]
pub enum BitmapError {
    /// Data length does not match `width * ceil(height / 8)`
    LengthMismatch {
        /// Expected length in bytes
        expected: usize,
        /// Provided length in bytes
        provided: usize,
    },
}

impl core::fmt::Display for BitmapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LengthMismatch { expected, provided } => write!(
                f,
                "Bitmap data length mismatch: expected {expected} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for BitmapError {}
