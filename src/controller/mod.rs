//! Controller drivers
//!
//! A [`Controller`] owns a [`DisplayInterface`](crate::DisplayInterface) and
//! knows the command set of one page/column controller. Higher layers only see
//! the trait, so a new controller plugs in without touching the
//! [`DisplayManager`](crate::DisplayManager) or the drawing code.
//!
//! | Capability         | [`Ssd1306`] | [`St7565r`]           |
//! |--------------------|-------------|-----------------------|
//! | display on/off     | yes         | yes                   |
//! | invert             | yes         | yes                   |
//! | contrast           | 0..=255     | clamped to config     |
//! | sleep              | yes         | yes                   |
//! | backlight          | no          | when a pin is wired   |
//!
//! Missing capabilities return [`Error::Unsupported`] instead of being ignored.
//!
//! [`AnyController`] picks the variant from [`Config::kind`](crate::Config)
//! at runtime.

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{Config, ControllerKind, Dimensions};
use crate::error::{Axis, Error, Operation};
use crate::interface::DisplayInterface;

mod ssd1306;
mod st7565r;

pub use ssd1306::Ssd1306;
pub use st7565r::{NoBacklight, St7565r};

pub(crate) type ControllerResult<E> = core::result::Result<(), Error<E>>;

/// Capability set of a page/column addressed controller
///
/// Addressing calls reject values outside the panel with
/// [`Error::OutOfRange`]; the controller never masks them silently.
pub trait Controller {
    /// Transport error type
    type Error: Debug;

    /// Physical panel geometry
    fn dimensions(&self) -> Dimensions;

    /// Reset the controller and bring it into page addressing mode with the
    /// display switched on
    fn init<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<Self::Error>;

    /// Pulse the reset line and wait for the controller to settle
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<Self::Error>;

    /// Set the column address for the next data write
    fn set_column(&mut self, column: u8) -> ControllerResult<Self::Error>;

    /// Set the page address for the next data write
    fn set_page(&mut self, page: u8) -> ControllerResult<Self::Error>;

    /// Set the RAM row shown on the top line of the panel
    fn set_start_line(&mut self, line: u8) -> ControllerResult<Self::Error>;

    /// Write one byte at the current page/column; the column auto-increments
    fn write_data(&mut self, data: u8) -> ControllerResult<Self::Error>;

    /// Switch the panel on or off
    fn switch_display(&mut self, _on: bool) -> ControllerResult<Self::Error> {
        Err(unsupported(Operation::SwitchDisplay))
    }

    /// Invert all pixels in hardware
    fn switch_invert(&mut self, _on: bool) -> ControllerResult<Self::Error> {
        Err(unsupported(Operation::SwitchInvert))
    }

    /// Set contrast / electronic volume
    fn set_contrast(&mut self, _level: u8) -> ControllerResult<Self::Error> {
        Err(unsupported(Operation::SetContrast))
    }

    /// Enter or leave the controller's power saving mode
    fn sleep(&mut self, _enable: bool) -> ControllerResult<Self::Error> {
        Err(unsupported(Operation::Sleep))
    }

    /// Switch the backlight LED
    fn switch_backlight(&mut self, _on: bool) -> ControllerResult<Self::Error> {
        Err(unsupported(Operation::SwitchBacklight))
    }
}

pub(crate) fn unsupported<E>(operation: Operation) -> Error<E> {
    log::warn!("controller does not support {}", operation);
    Error::Unsupported(operation)
}

/// Validate a column against the panel width
pub(crate) fn check_column<E>(dims: &Dimensions, column: u8) -> ControllerResult<E> {
    if u16::from(column) >= dims.cols {
        return Err(Error::out_of_range(Axis::Column, column, dims.cols));
    }
    Ok(())
}

/// Validate a page against the panel height
pub(crate) fn check_page<E>(dims: &Dimensions, page: u8) -> ControllerResult<E> {
    if u16::from(page) >= dims.pages() {
        return Err(Error::out_of_range(Axis::Page, page, dims.pages()));
    }
    Ok(())
}

/// Validate a start line against the panel height
pub(crate) fn check_line<E>(dims: &Dimensions, line: u8) -> ControllerResult<E> {
    if u16::from(line) >= dims.rows {
        return Err(Error::out_of_range(Axis::Line, line, dims.rows));
    }
    Ok(())
}

/// Controller chosen at runtime from [`Config::kind`]
///
/// ## Example
///
/// ```rust,no_run
/// use page_display::{AnyController, Builder, ControllerKind, Dimensions, Interface};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::OutputPin;
/// # use embedded_hal::spi::{Operation, SpiDevice};
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiDevice for MockSpi {
/// #     fn transaction(
/// #         &mut self,
/// #         _operations: &mut [Operation<'_, u8>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # let dims = match Dimensions::new(64, 128) {
/// #     Ok(dims) => dims,
/// #     Err(_) => return,
/// # };
/// let config = match Builder::new()
///     .controller(ControllerKind::St7565r)
///     .dimensions(dims)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let interface = Interface::new(MockSpi, MockPin, MockPin);
/// let _controller = AnyController::new(interface, &config, Some(MockPin));
/// ```
pub enum AnyController<I, BL = NoBacklight> {
    /// SSD1306 OLED
    Ssd1306(Ssd1306<I>),
    /// ST7565R LCD
    St7565r(St7565r<I, BL>),
}

impl<I, BL> AnyController<I, BL>
where
    I: DisplayInterface,
    BL: OutputPin,
{
    /// Bind the controller named by `config.kind`
    ///
    /// `backlight` is only used by controllers that drive one.
    pub fn new(interface: I, config: &Config, backlight: Option<BL>) -> Self {
        match config.kind {
            ControllerKind::Ssd1306 => Self::Ssd1306(Ssd1306::new(interface, config)),
            ControllerKind::St7565r => {
                Self::St7565r(St7565r::with_backlight(interface, config, backlight))
            }
        }
    }

    /// Variant in use
    pub fn kind(&self) -> ControllerKind {
        match self {
            Self::Ssd1306(_) => ControllerKind::Ssd1306,
            Self::St7565r(_) => ControllerKind::St7565r,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $c:ident => $body:expr) => {
        match $self {
            AnyController::Ssd1306($c) => $body,
            AnyController::St7565r($c) => $body,
        }
    };
}

impl<I, BL> Controller for AnyController<I, BL>
where
    I: DisplayInterface,
    BL: OutputPin,
{
    type Error = I::Error;

    fn dimensions(&self) -> Dimensions {
        dispatch!(self, c => c.dimensions())
    }

    fn init<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.init(delay))
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.reset(delay))
    }

    fn set_column(&mut self, column: u8) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.set_column(column))
    }

    fn set_page(&mut self, page: u8) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.set_page(page))
    }

    fn set_start_line(&mut self, line: u8) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.set_start_line(line))
    }

    fn write_data(&mut self, data: u8) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.write_data(data))
    }

    fn switch_display(&mut self, on: bool) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.switch_display(on))
    }

    fn switch_invert(&mut self, on: bool) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.switch_invert(on))
    }

    fn set_contrast(&mut self, level: u8) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.set_contrast(level))
    }

    fn sleep(&mut self, enable: bool) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.sleep(enable))
    }

    fn switch_backlight(&mut self, on: bool) -> ControllerResult<Self::Error> {
        dispatch!(self, c => c.switch_backlight(on))
    }
}
