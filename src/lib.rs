//! Page/column display graphics engine
//!
//! A monochrome drawing engine for SSD1306 (OLED) and ST7565R (LCD) panels of
//! up to 132x64 pixels, driven over SPI with a D/C and a reset line.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Controller chosen at construction ([`AnyController`]) or statically
//! - RAM mirror with write-through, so drawing never reads the panel
//! - Lines, rectangles, circles, circle segments, bitmaps and proportional text
//! - Strip chart and bar gauge widgets
//! - Software rotation
//! - `embedded-graphics` integration (with `graphics` feature)
//!
//! ## Layers
//!
//! [`Canvas`] primitives → [`DisplayManager`] (mirror, read-modify-write) →
//! [`Controller`] (page/column addressing) → [`DisplayInterface`] (SPI) →
//! panel.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use page_display::{
//!     AnyController, Builder, Canvas, ControllerKind, Dimensions, DisplayManager, FillOptions,
//!     Graph, Interface, PixelMask, ProportionalFont,
//! };
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let backlight = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst);
//! let dims = match Dimensions::new(64, 128) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new()
//!     .controller(ControllerKind::St7565r)
//!     .dimensions(dims)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let controller = AnyController::new(interface, &config, Some(backlight));
//! let mut display = DisplayManager::from_config(controller, [0u8; 1024], &config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! let _ = display.draw_rect(0, 0, 128, 64, FillOptions::Outline, 1, PixelMask::Set);
//! let _ = display.draw_string(4, 4, "Hello", &ProportionalFont);
//! if let Ok(mut graph) = Graph::init(&mut display, &ProportionalFont, 4, 16, "T", 100) {
//!     let _ = graph.update(&mut display, 42);
//! }
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Page-major bitmaps
pub mod bitmap;
/// SSD1306 and ST7565R command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Controller drivers
pub mod controller;
/// Display manager: framebuffer mirror and write-through
pub mod display;
/// Drawing primitives
pub mod draw;
/// Error types for the driver
pub mod error;
/// Bitmap fonts
pub mod font;
/// Strip chart and gauge widgets
pub mod graph;
/// Hardware interface abstraction
pub mod interface;
/// Pixel write operations
pub mod mask;
/// Coordinate rotation utilities
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use bitmap::{Bitmap, USB_LOGO};
pub use config::{Builder, Config, ControllerKind, Dimensions, MAX_COLUMNS, MAX_ROWS, Rotation};
pub use controller::{AnyController, Controller, NoBacklight, Ssd1306, St7565r};
pub use display::DisplayManager;
pub use draw::{Canvas, CircleSegment, FillOptions};
pub use error::{Axis, BitmapError, BuilderError, Error, Operation};
pub use font::{Font, ProportionalFont};
pub use graph::{Gauge, Graph, PlotRegion};
pub use interface::InterfaceError;
pub use interface::{DEFAULT_SPI_CLOCK_HZ, DisplayInterface, Interface};
pub use mask::PixelMask;
