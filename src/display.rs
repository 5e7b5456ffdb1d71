//! Display manager
//!
//! [`DisplayManager`] owns a [`Controller`] and a RAM mirror of the panel.
//! The controllers are write-only over SPI, so the mirror is the source of
//! truth for reads. Every byte write updates the mirror first and is then
//! sent to the controller (write-through).
//!
//! Pixel writes are read-modify-write on one page byte: the mirror byte is
//! read, one bit is changed with a [`PixelMask`], and the byte is written back.
//! The other 7 pixels of the byte are never disturbed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use page_display::{Builder, Canvas, Dimensions, DisplayManager, Interface, PixelMask, Ssd1306};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut delay = MockDelay;
//! # let dims = match Dimensions::new(64, 128) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let controller = Ssd1306::new(Interface::new(MockSpi, MockPin, MockPin), &config);
//! let mut display = DisplayManager::new(controller, [0u8; 1024]);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! let _ = display.draw_pixel(10, 20, PixelMask::Set);
//! assert_eq!(display.read_byte(2, 10).ok(), Some(0b0001_0000));
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::{Config, Dimensions, Rotation};
use crate::controller::Controller;
use crate::draw::Canvas;
use crate::error::{Axis, Error};
use crate::mask::PixelMask;
use crate::rotation::{locate, logical_size};

type DisplayResult<E> = core::result::Result<(), Error<E>>;

/// Framebuffer mirror bound to a controller
///
/// ## Type Parameters
///
/// * `C` - Controller implementing [`Controller`]
/// * `B` - Buffer type implementing `AsRef<[u8]> + AsMut<[u8]>`
///   (`[u8; N]`, `&mut [u8]`, `Vec<u8>`), at least
///   [`Dimensions::buffer_size`] bytes
///
/// Byte `page * width + column` of the buffer mirrors the controller byte at
/// (page, column); bit `n` of it is pixel row `page * 8 + n`.
pub struct DisplayManager<C, B> {
    /// Bound controller
    controller: C,
    /// RAM mirror, page-major
    buffer: B,
    /// Physical geometry, cached from the controller
    dimensions: Dimensions,
    /// Software rotation applied to drawing coordinates
    rotation: Rotation,
}

impl<C, B> DisplayManager<C, B>
where
    C: Controller,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new DisplayManager
    ///
    /// # Panics
    ///
    /// Panics if the buffer is smaller than the controller's
    /// [`Dimensions::buffer_size`].
    pub fn new(controller: C, buffer: B) -> Self {
        let dimensions = controller.dimensions();
        let required = dimensions.buffer_size();
        assert!(
            buffer.as_ref().len() >= required,
            "buffer too small: required {} bytes, got {}",
            required,
            buffer.as_ref().len()
        );
        Self {
            controller,
            buffer,
            dimensions,
            rotation: Rotation::Rotate0,
        }
    }

    /// Try to create a new DisplayManager, returning an error if the buffer is too small
    ///
    /// This is the fallible version of [`new`](Self::new).
    pub fn try_new(controller: C, buffer: B) -> Result<Self, Error<C::Error>> {
        let dimensions = controller.dimensions();
        let required = dimensions.buffer_size();
        if buffer.as_ref().len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.as_ref().len(),
            });
        }
        Ok(Self {
            controller,
            buffer,
            dimensions,
            rotation: Rotation::Rotate0,
        })
    }

    /// Create a new DisplayManager drawing with the rotation from `config`
    ///
    /// # Panics
    ///
    /// Panics if the buffer is too small, like [`new`](Self::new).
    pub fn from_config(controller: C, buffer: B, config: &Config) -> Self {
        Self::new(controller, buffer).with_rotation(config.rotation)
    }

    /// Apply a software rotation to all drawing coordinates
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Reset and initialize the controller, show RAM row 0 on top and clear the panel
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<C::Error> {
        log::debug!(
            "display: init {}x{} rotation {:?}",
            self.dimensions.cols,
            self.dimensions.rows,
            self.rotation
        );
        self.controller.init(delay)?;
        self.controller.set_start_line(0)?;
        self.clear()
    }

    /// Read one page byte from the mirror
    pub fn read_byte(&self, page: u8, column: u8) -> Result<u8, Error<C::Error>> {
        let index = self.index(page, column)?;
        Ok(self.buffer.as_ref()[index])
    }

    /// Write one page byte to the mirror and the controller
    ///
    /// The mirror is updated before the transfer, so it reflects the write
    /// even when the transport fails.
    pub fn write_byte(&mut self, page: u8, column: u8, data: u8) -> DisplayResult<C::Error> {
        let index = self.index(page, column)?;
        self.buffer.as_mut()[index] = data;
        log::trace!("display: write page {} column {} = {:#04x}", page, column, data);
        self.controller.set_page(page)?;
        self.controller.set_column(column)?;
        self.controller.write_data(data)
    }

    /// Zero every byte of the panel
    pub fn clear(&mut self) -> DisplayResult<C::Error> {
        log::debug!("display: clear");
        for page in 0..self.page_count() {
            self.clear_line(page)?;
        }
        Ok(())
    }

    /// Zero one page (8 pixel rows)
    pub fn clear_line(&mut self, page: u8) -> DisplayResult<C::Error> {
        if u16::from(page) >= self.dimensions.pages() {
            return Err(Error::out_of_range(Axis::Page, page, self.dimensions.pages()));
        }
        for column in 0..self.column_count() {
            self.write_byte(page, column, 0x00)?;
        }
        Ok(())
    }

    /// Zero one column across all pages
    pub fn clear_column(&mut self, column: u8) -> DisplayResult<C::Error> {
        if u16::from(column) >= self.dimensions.cols {
            return Err(Error::out_of_range(Axis::Column, column, self.dimensions.cols));
        }
        for page in 0..self.page_count() {
            self.write_byte(page, column, 0x00)?;
        }
        Ok(())
    }

    /// Resend the whole mirror, e.g. after the controller lost its RAM
    ///
    /// Each page is addressed once and streamed using the controller's
    /// column auto-increment.
    pub fn flush(&mut self) -> DisplayResult<C::Error> {
        log::debug!("display: flush {} bytes", self.dimensions.buffer_size());
        let width = self.dimensions.cols as usize;
        for page in 0..self.page_count() {
            self.controller.set_page(page)?;
            self.controller.set_column(0)?;
            let start = page as usize * width;
            for offset in 0..width {
                let data = self.buffer.as_ref()[start + offset];
                self.controller.write_data(data)?;
            }
        }
        Ok(())
    }

    /// Read back a logical pixel; `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        let addr = locate(x, y, &self.dimensions, self.rotation)?;
        let index = addr.page as usize * self.dimensions.cols as usize + addr.column as usize;
        Some(self.buffer.as_ref()[index] & (1 << addr.bit) != 0)
    }

    /// Scroll the panel vertically by changing the RAM row shown on top
    pub fn set_start_line(&mut self, line: u8) -> DisplayResult<C::Error> {
        self.controller.set_start_line(line)
    }

    /// Switch the panel on or off
    pub fn switch_display(&mut self, on: bool) -> DisplayResult<C::Error> {
        self.controller.switch_display(on)
    }

    /// Invert the panel in hardware
    pub fn switch_invert(&mut self, on: bool) -> DisplayResult<C::Error> {
        self.controller.switch_invert(on)
    }

    /// Set panel contrast
    pub fn set_contrast(&mut self, level: u8) -> DisplayResult<C::Error> {
        self.controller.set_contrast(level)
    }

    /// Enter or leave the controller's sleep mode
    pub fn sleep(&mut self, enable: bool) -> DisplayResult<C::Error> {
        self.controller.sleep(enable)
    }

    /// Switch the backlight
    pub fn switch_backlight(&mut self, on: bool) -> DisplayResult<C::Error> {
        self.controller.switch_backlight(on)
    }

    /// Get physical display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Get display rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The mirror, page-major
    pub fn buffer(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.dimensions.buffer_size()]
    }

    /// Access the underlying controller
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Access the underlying controller mutably
    ///
    /// Writes made through the controller bypass the mirror.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Release the controller and buffer
    pub fn release(self) -> (C, B) {
        (self.controller, self.buffer)
    }

    fn index(&self, page: u8, column: u8) -> Result<usize, Error<C::Error>> {
        if u16::from(page) >= self.dimensions.pages() {
            return Err(Error::out_of_range(Axis::Page, page, self.dimensions.pages()));
        }
        if u16::from(column) >= self.dimensions.cols {
            return Err(Error::out_of_range(Axis::Column, column, self.dimensions.cols));
        }
        Ok(page as usize * self.dimensions.cols as usize + column as usize)
    }

    fn page_count(&self) -> u8 {
        self.dimensions.pages() as u8
    }

    fn column_count(&self) -> u8 {
        self.dimensions.cols as u8
    }
}

impl<C, B> Canvas for DisplayManager<C, B>
where
    C: Controller,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Error = Error<C::Error>;

    fn size(&self) -> (u16, u16) {
        logical_size(&self.dimensions, self.rotation)
    }

    fn draw_pixel(&mut self, x: i32, y: i32, mask: PixelMask) -> Result<(), Self::Error> {
        let Some(addr) = locate(x, y, &self.dimensions, self.rotation) else {
            return Ok(());
        };
        let byte = self.read_byte(addr.page, addr.column)?;
        let updated = mask.apply(byte, addr.bit);
        if updated == byte {
            return Ok(());
        }
        self.write_byte(addr.page, addr.column, updated)
    }

    fn fill(&mut self, mask: PixelMask) -> Result<(), Self::Error> {
        for page in 0..self.page_count() {
            for column in 0..self.column_count() {
                let byte = self.read_byte(page, column)?;
                let updated = match mask {
                    PixelMask::Set => 0xFF,
                    PixelMask::Clear => 0x00,
                    PixelMask::Toggle => !byte,
                };
                self.write_byte(page, column, updated)?;
            }
        }
        Ok(())
    }
}
