//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for talking to a page/column controller over a 4-wire SPI bus.
//!
//! ## Hardware Requirements
//!
//! Both supported controllers need:
//! - SPI bus (MOSI + SCK, chip select handled by the [`SpiDevice`])
//! - 2 GPIO pins:
//!   - **DC**: Data/Command select (output, low = command)
//!   - **RST**: Reset (output, active low)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use page_display::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! // Create interface with SPI and GPIO pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//!
//! // Pulse reset: 10ms low, 10ms settle
//! interface.reset(&mut delay, 10, 10);
//!
//! // Send command
//! let _ = interface.send_command(0xAF); // Display on
//!
//! // Send data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the transport to a page/column controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the controllers in [`crate::controller`] to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// Every call blocks until the bytes are on the wire. The controllers rely on
/// this: the page/column pointer is shared state, so a second transfer must
/// never start while one is still in flight.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., I2C, a 3-wire bus, inverted pins),
/// implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a run of command bytes (and their arguments) to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the bytes over SPI in one transfer
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send a single command byte to the controller
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.send_commands(&[command])
    }

    /// Send display RAM bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST pin low
    /// 2. Wait `low_ms`
    /// 3. Set RST pin high
    /// 4. Wait `settle_ms`
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    /// * `low_ms` - Reset pulse width
    /// * `settle_ms` - Time the controller needs after reset is released
    fn reset<D: DelayNs>(&mut self, delay: &mut D, low_ms: u32, settle_ms: u32);
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Default SPI clock for both controllers in hertz
///
/// Informational: the [`SpiDevice`] owns the real bus configuration.
pub const DEFAULT_SPI_CLOCK_HZ: u32 = 1_000_000;

/// 4-wire SPI interface implementation
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`] (owns chip select)
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
///
/// ## Example
///
/// ```rust,no_run
/// use page_display::{Builder, Dimensions, Interface, Ssd1306};
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
/// let interface = Interface::new(
///     MockSpi,  // SpiDevice
///     MockPin,  // DC
///     MockPin,  // RST
/// );
///
/// // Use with a controller
/// # let dims = match Dimensions::new(64, 128) {
/// #     Ok(dims) => dims,
/// #     Err(_) => return,
/// # };
/// # let config = match Builder::new().dimensions(dims).build() {
/// #     Ok(config) => config,
/// #     Err(_) => return,
/// # };
/// let _controller = Ssd1306::new(interface, &config);
/// ```
pub struct Interface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Release the SPI device and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(commands).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D, low_ms: u32, settle_ms: u32) {
        let _ = self.rst.set_low();
        delay.delay_ms(low_ms);
        let _ = self.rst.set_high();
        delay.delay_ms(settle_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::spi::Operation;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Dc(bool),
        Rst(bool),
        Write(u8),
        Delay(u32),
    }

    struct Log(RefCell<Vec<Event>>);

    impl Log {
        fn push(&self, event: Event) {
            self.0.borrow_mut().push(event);
        }
    }

    struct MockSpi<'a>(&'a Log);

    impl embedded_hal::spi::ErrorType for MockSpi<'_> {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi<'_> {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    for byte in bytes.iter() {
                        self.0.push(Event::Write(*byte));
                    }
                }
            }
            Ok(())
        }
    }

    struct MockPin<'a> {
        log: &'a Log,
        is_dc: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.push(if self.is_dc {
                Event::Dc(false)
            } else {
                Event::Rst(false)
            });
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.push(if self.is_dc {
                Event::Dc(true)
            } else {
                Event::Rst(true)
            });
            Ok(())
        }
    }

    struct MockDelay<'a>(&'a Log);

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.0.push(Event::Delay(ns / 1_000_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.push(Event::Delay(ms));
        }
    }

    fn interface(log: &Log) -> Interface<MockSpi<'_>, MockPin<'_>, MockPin<'_>> {
        Interface::new(
            MockSpi(log),
            MockPin { log, is_dc: true },
            MockPin { log, is_dc: false },
        )
    }

    #[test]
    fn test_commands_are_sent_with_dc_low() {
        let log = Log(RefCell::new(Vec::new()));
        let mut iface = interface(&log);
        iface.send_commands(&[0xB0, 0x10]).unwrap();
        iface.send_command(0xAF).unwrap();
        assert_eq!(
            *log.0.borrow(),
            [
                Event::Dc(false),
                Event::Write(0xB0),
                Event::Write(0x10),
                Event::Dc(false),
                Event::Write(0xAF),
            ]
        );
    }

    #[test]
    fn test_data_is_sent_with_dc_high() {
        let log = Log(RefCell::new(Vec::new()));
        let mut iface = interface(&log);
        iface.send_data(&[0x55]).unwrap();
        assert_eq!(*log.0.borrow(), [Event::Dc(true), Event::Write(0x55)]);
    }

    #[test]
    fn test_reset_pulses_low_then_settles() {
        let log = Log(RefCell::new(Vec::new()));
        let mut iface = interface(&log);
        let mut delay = MockDelay(&log);
        iface.reset(&mut delay, 1, 5);
        assert_eq!(
            *log.0.borrow(),
            [
                Event::Rst(false),
                Event::Delay(1),
                Event::Rst(true),
                Event::Delay(5),
            ]
        );
    }
}
