//! Graphics support via embedded-graphics
//!
//! With the `graphics` feature, [`DisplayManager`] implements
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) with
//! [`BinaryColor`] pixels, so the embedded-graphics primitives, fonts and
//! images draw straight into the panel. `On` sets a pixel, `Off` clears it.
//! Each pixel goes through the same read-modify-write path as
//! [`Canvas::draw_pixel`], so it is written through to the controller at once.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use page_display::{Builder, Dimensions, DisplayManager, Interface, St7565r};
//! # use core::convert::Infallible;
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
//! # let dims = match Dimensions::new(64, 128) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let controller = St7565r::new(Interface::new(MockSpi, MockPin, MockPin), &config);
//! let mut display = DisplayManager::new(controller, [0u8; 1024]);
//!
//! let _ = Rectangle::new(Point::new(2, 2), Size::new(40, 20))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(90, 10), 30)
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "Hello",
//!     Point::new(4, 50),
//!     MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
//! )
//! .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::controller::Controller;
use crate::display::DisplayManager;
use crate::draw::Canvas;
use crate::error::Error;

impl<C, B> DrawTarget for DisplayManager<C, B>
where
    C: Controller,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = Error<C::Error>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.draw_pixel(x, y, color.into())?;
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into())
    }
}

impl<C, B> OriginDimensions for DisplayManager<C, B>
where
    C: Controller,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let (width, height) = Canvas::size(self);
        Size::new(u32::from(width), u32::from(height))
    }
}
