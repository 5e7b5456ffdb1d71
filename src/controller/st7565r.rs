use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::{Controller, ControllerResult, check_column, check_line, check_page, unsupported};
use crate::command::st7565r::*;
use crate::config::{Config, ControllerKind, Dimensions};
use crate::error::{Error, Operation};
use crate::interface::DisplayInterface;

/// Placeholder for panels without a switchable backlight
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBacklight;

impl embedded_hal::digital::ErrorType for NoBacklight {
    type Error = Infallible;
}

impl OutputPin for NoBacklight {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// ST7565R LCD controller (up to 132 x 64)
///
/// Contrast requests are clamped into the configured window before they are
/// written to the electronic volume register. The backlight is a plain GPIO;
/// without one, [`Controller::switch_backlight`] reports
/// [`Error::Unsupported`].
pub struct St7565r<I, BL = NoBacklight> {
    interface: I,
    backlight: Option<BL>,
    dimensions: Dimensions,
    contrast: u8,
    contrast_min: u8,
    contrast_max: u8,
    start_line: u8,
    segment_remap: bool,
    com_scan_reversed: bool,
}

impl<I> St7565r<I, NoBacklight>
where
    I: DisplayInterface,
{
    /// Bind an interface for a panel without backlight control
    pub fn new(interface: I, config: &Config) -> Self {
        Self::with_backlight(interface, config, None)
    }
}

impl<I, BL> St7565r<I, BL>
where
    I: DisplayInterface,
    BL: OutputPin,
{
    /// Bind an interface and an optional backlight pin
    pub fn with_backlight(interface: I, config: &Config, backlight: Option<BL>) -> Self {
        Self {
            interface,
            backlight,
            dimensions: config.dimensions,
            contrast: config.clamp_contrast(config.contrast),
            contrast_min: config.contrast_min,
            contrast_max: config.contrast_max,
            start_line: config.start_line,
            segment_remap: config.segment_remap,
            com_scan_reversed: config.com_scan_reversed,
        }
    }

    /// Contrast currently programmed
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Release the interface and backlight pin
    pub fn release(self) -> (I, Option<BL>) {
        (self.interface, self.backlight)
    }

    fn command(&mut self, command: u8) -> ControllerResult<I::Error> {
        self.interface
            .send_command(command)
            .map_err(Error::Transport)
    }

    fn commands(&mut self, commands: &[u8]) -> ControllerResult<I::Error> {
        self.interface
            .send_commands(commands)
            .map_err(Error::Transport)
    }
}

impl<I, BL> Controller for St7565r<I, BL>
where
    I: DisplayInterface,
    BL: OutputPin,
{
    type Error = I::Error;

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn init<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<Self::Error> {
        if let Some(pin) = self.backlight.as_mut() {
            // Backlight stays dark until the caller switches it on
            pin.set_low().map_err(pin_error)?;
        }
        self.reset(delay)?;
        log::debug!(
            "st7565r: init {}x{} contrast {}",
            self.dimensions.cols,
            self.dimensions.rows,
            self.contrast
        );
        let sequence = [
            if self.segment_remap {
                ADC_REVERSE
            } else {
                ADC_NORMAL
            },
            DISPLAY_NORMAL,
            if self.com_scan_reversed {
                COM_SCAN_REVERSE
            } else {
                COM_SCAN_NORMAL
            },
            BIAS_1_6,
            POWER_CONTROL_ALL_ON,
            BOOSTER_RATIO,
            BOOSTER_RATIO_2X_3X_4X,
            resistor_ratio(DEFAULT_RESISTOR_RATIO),
            ELECTRONIC_VOLUME_MODE,
            electronic_volume(self.contrast),
            start_line(self.start_line),
            ALL_POINTS_OFF,
            DISPLAY_ON,
        ];
        self.commands(&sequence)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<Self::Error> {
        let (low_ms, settle_ms) = ControllerKind::St7565r.reset_timing_ms();
        self.interface.reset(delay, low_ms, settle_ms);
        self.command(RESET)
    }

    fn set_column(&mut self, column: u8) -> ControllerResult<Self::Error> {
        check_column(&self.dimensions, column)?;
        self.commands(&[column_high(column), column_low(column)])
    }

    fn set_page(&mut self, page: u8) -> ControllerResult<Self::Error> {
        check_page(&self.dimensions, page)?;
        self.command(page_address(page))
    }

    fn set_start_line(&mut self, line: u8) -> ControllerResult<Self::Error> {
        check_line(&self.dimensions, line)?;
        self.command(start_line(line))
    }

    fn write_data(&mut self, data: u8) -> ControllerResult<Self::Error> {
        self.interface.send_data(&[data]).map_err(Error::Transport)
    }

    fn switch_display(&mut self, on: bool) -> ControllerResult<Self::Error> {
        self.command(if on { DISPLAY_ON } else { DISPLAY_OFF })
    }

    fn switch_invert(&mut self, on: bool) -> ControllerResult<Self::Error> {
        self.command(if on { DISPLAY_REVERSE } else { DISPLAY_NORMAL })
    }

    fn set_contrast(&mut self, level: u8) -> ControllerResult<Self::Error> {
        let clamped = level.clamp(self.contrast_min, self.contrast_max);
        if clamped != level {
            log::warn!(
                "st7565r: contrast {} clamped to {}..={}",
                level,
                self.contrast_min,
                self.contrast_max
            );
        }
        self.contrast = clamped;
        self.commands(&[ELECTRONIC_VOLUME_MODE, electronic_volume(clamped)])
    }

    fn sleep(&mut self, enable: bool) -> ControllerResult<Self::Error> {
        if enable {
            self.commands(&[SLEEP_MODE, DISPLAY_OFF])
        } else {
            self.commands(&[NORMAL_MODE, DISPLAY_ON])
        }
    }

    fn switch_backlight(&mut self, on: bool) -> ControllerResult<Self::Error> {
        let Some(pin) = self.backlight.as_mut() else {
            return Err(unsupported(Operation::SwitchBacklight));
        };
        let result = if on { pin.set_high() } else { pin.set_low() };
        result.map_err(pin_error)
    }
}

fn pin_error<P: core::fmt::Debug, E>(err: P) -> Error<E> {
    log::warn!("st7565r: backlight pin error: {:?}", err);
    Error::Pin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::controller::mock::{MockDelay, MockInterface, MockPin, Transfer};

    fn config() -> Config {
        Builder::new()
            .controller(ControllerKind::St7565r)
            .dimensions(Dimensions::new(64, 128).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_init_resets_hardware_then_software() {
        let mut lcd = St7565r::new(MockInterface::new(), &config());
        lcd.init(&mut MockDelay).unwrap();
        let (iface, _) = lcd.release();
        assert_eq!(
            iface.transfers[0],
            Transfer::Reset {
                low_ms: 1,
                settle_ms: 5
            }
        );
        assert_eq!(iface.transfers[1], Transfer::Commands(alloc::vec![RESET]));
        let commands = iface.commands();
        // unmirrored columns, reversed COM scan
        assert_eq!(&commands[1..4], &[ADC_NORMAL, DISPLAY_NORMAL, COM_SCAN_REVERSE]);
        assert_eq!(commands.last(), Some(&DISPLAY_ON));
        let volume = commands
            .iter()
            .position(|c| *c == ELECTRONIC_VOLUME_MODE)
            .unwrap();
        // default contrast is the bottom of the window
        assert_eq!(commands[volume + 1], electronic_volume(30));
    }

    #[test]
    fn test_addressing_accepts_132_columns() {
        let config = Builder::new()
            .controller(ControllerKind::St7565r)
            .dimensions(Dimensions::new(64, 132).unwrap())
            .build()
            .unwrap();
        let mut lcd = St7565r::new(MockInterface::new(), &config);
        lcd.set_column(131).unwrap();
        assert!(lcd.set_column(132).is_err());
        lcd.set_page(7).unwrap();
        assert_eq!(lcd.release().0.commands(), [0x18, 0x03, 0xB7]);
    }

    #[test]
    fn test_contrast_is_clamped() {
        let mut lcd = St7565r::new(MockInterface::new(), &config());
        lcd.set_contrast(100).unwrap();
        assert_eq!(lcd.contrast(), 40);
        lcd.set_contrast(0).unwrap();
        assert_eq!(lcd.contrast(), 30);
        lcd.set_contrast(35).unwrap();
        assert_eq!(lcd.contrast(), 35);
        assert_eq!(
            lcd.release().0.commands(),
            [
                ELECTRONIC_VOLUME_MODE,
                electronic_volume(40),
                ELECTRONIC_VOLUME_MODE,
                electronic_volume(30),
                ELECTRONIC_VOLUME_MODE,
                electronic_volume(35),
            ]
        );
    }

    #[test]
    fn test_sleep_and_invert() {
        let mut lcd = St7565r::new(MockInterface::new(), &config());
        lcd.sleep(true).unwrap();
        lcd.sleep(false).unwrap();
        lcd.switch_invert(true).unwrap();
        assert_eq!(
            lcd.release().0.commands(),
            [SLEEP_MODE, DISPLAY_OFF, NORMAL_MODE, DISPLAY_ON, DISPLAY_REVERSE]
        );
    }

    #[test]
    fn test_backlight_drives_pin() {
        let mut lcd =
            St7565r::with_backlight(MockInterface::new(), &config(), Some(MockPin::default()));
        lcd.switch_backlight(true).unwrap();
        let (_, pin) = lcd.release();
        assert!(pin.unwrap().high);
    }

    #[test]
    fn test_backlight_without_pin_is_unsupported() {
        let mut lcd = St7565r::new(MockInterface::new(), &config());
        assert!(matches!(
            lcd.switch_backlight(true),
            Err(Error::Unsupported(Operation::SwitchBacklight))
        ));
    }

    struct StuckPin;

    impl embedded_hal::digital::ErrorType for StuckPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl OutputPin for StuckPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    #[test]
    fn test_backlight_pin_failure_aborts_init() {
        let mut lcd = St7565r::with_backlight(MockInterface::new(), &config(), Some(StuckPin));
        assert!(matches!(lcd.init(&mut MockDelay), Err(Error::Pin)));
        // nothing reaches the bus once the pin fails
        assert!(lcd.release().0.transfers.is_empty());

        let mut lcd = St7565r::with_backlight(MockInterface::new(), &config(), Some(StuckPin));
        assert!(matches!(lcd.switch_backlight(true), Err(Error::Pin)));
    }
}
