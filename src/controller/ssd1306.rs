use embedded_hal::delay::DelayNs;

use super::{Controller, ControllerResult, check_column, check_line, check_page, unsupported};
use crate::command::ssd1306::*;
use crate::config::{Config, ControllerKind, Dimensions};
use crate::error::{Error, Operation};
use crate::interface::DisplayInterface;

/// SSD1306 OLED controller (up to 128 x 64)
///
/// Uses page addressing mode. There is no backlight on an OLED, so
/// [`Controller::switch_backlight`] reports [`Error::Unsupported`].
pub struct Ssd1306<I> {
    interface: I,
    dimensions: Dimensions,
    contrast: u8,
    start_line: u8,
    segment_remap: bool,
    com_scan_reversed: bool,
    charge_pump: bool,
}

impl<I> Ssd1306<I>
where
    I: DisplayInterface,
{
    /// Bind an interface using the geometry and init values in `config`
    pub fn new(interface: I, config: &Config) -> Self {
        Self {
            interface,
            dimensions: config.dimensions,
            contrast: config.contrast,
            start_line: config.start_line,
            segment_remap: config.segment_remap,
            com_scan_reversed: config.com_scan_reversed,
            charge_pump: config.charge_pump,
        }
    }

    /// Release the interface
    pub fn release(self) -> I {
        self.interface
    }

    fn init_sequence(&self) -> [u8; 25] {
        let rows = self.dimensions.rows;
        let com_pins = if rows > 32 {
            COM_PINS_ALTERNATIVE
        } else {
            COM_PINS_SEQUENTIAL
        };
        [
            DISPLAY_OFF,
            MULTIPLEX_RATIO,
            (rows - 1) as u8,
            DISPLAY_OFFSET,
            0x00,
            start_line(self.start_line),
            if self.segment_remap {
                SEGMENT_REMAP_ON
            } else {
                SEGMENT_REMAP_OFF
            },
            if self.com_scan_reversed {
                COM_SCAN_REMAPPED
            } else {
                COM_SCAN_NORMAL
            },
            COM_PINS,
            com_pins,
            CONTRAST,
            self.contrast,
            ENTIRE_DISPLAY_RESUME,
            INVERT_OFF,
            DISPLAY_CLOCK,
            DISPLAY_CLOCK_DEFAULT,
            CHARGE_PUMP,
            if self.charge_pump {
                CHARGE_PUMP_ON
            } else {
                CHARGE_PUMP_OFF
            },
            VCOMH,
            VCOMH_DEFAULT,
            PRECHARGE,
            PRECHARGE_DEFAULT,
            MEMORY_MODE,
            MEMORY_MODE_PAGE,
            DISPLAY_ON,
        ]
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

impl<I> Controller for Ssd1306<I>
where
    I: DisplayInterface,
{
    type Error = I::Error;

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn init<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<Self::Error> {
        self.reset(delay)?;
        log::debug!(
            "ssd1306: init {}x{}",
            self.dimensions.cols,
            self.dimensions.rows
        );
        let sequence = self.init_sequence();
        self.commands(&sequence)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> ControllerResult<Self::Error> {
        let (low_ms, settle_ms) = ControllerKind::Ssd1306.reset_timing_ms();
        self.interface.reset(delay, low_ms, settle_ms);
        Ok(())
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
        self.command(if on { INVERT_ON } else { INVERT_OFF })
    }

    fn set_contrast(&mut self, level: u8) -> ControllerResult<Self::Error> {
        self.contrast = level;
        self.commands(&[CONTRAST, level])
    }

    // Display off is the SSD1306's sleep mode; RAM content is kept.
    fn sleep(&mut self, enable: bool) -> ControllerResult<Self::Error> {
        self.switch_display(!enable)
    }

    fn switch_backlight(&mut self, _on: bool) -> ControllerResult<Self::Error> {
        Err(unsupported(Operation::SwitchBacklight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::controller::mock::{FailingInterface, MockDelay, MockInterface, Transfer};
    use crate::error::Axis;

    fn controller(rows: u16) -> Ssd1306<MockInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::new(rows, 128).unwrap())
            .build()
            .unwrap();
        Ssd1306::new(MockInterface::new(), &config)
    }

    #[test]
    fn test_init_resets_then_sends_sequence() {
        let mut oled = controller(64);
        oled.init(&mut MockDelay).unwrap();
        let iface = oled.release();
        assert_eq!(
            iface.transfers[0],
            Transfer::Reset {
                low_ms: 10,
                settle_ms: 10
            }
        );
        let commands = iface.commands();
        assert_eq!(commands.first(), Some(&DISPLAY_OFF));
        assert_eq!(commands.last(), Some(&DISPLAY_ON));
        // multiplex ratio follows the panel height
        assert_eq!(&commands[1..3], &[MULTIPLEX_RATIO, 63]);
        let pins = commands.iter().position(|c| *c == COM_PINS).unwrap();
        assert_eq!(commands[pins + 1], COM_PINS_ALTERNATIVE);
        let contrast = commands.iter().position(|c| *c == CONTRAST).unwrap();
        assert_eq!(commands[contrast + 1], DEFAULT_CONTRAST);
    }

    #[test]
    fn test_init_honours_charge_pump_setting() {
        let pump = |oled: Ssd1306<MockInterface>| {
            let commands = oled.release().commands();
            let at = commands.iter().position(|c| *c == CHARGE_PUMP).unwrap();
            commands[at + 1]
        };
        let mut oled = controller(64);
        oled.init(&mut MockDelay).unwrap();
        assert_eq!(pump(oled), CHARGE_PUMP_ON);

        let config = Builder::new()
            .dimensions(Dimensions::new(64, 128).unwrap())
            .charge_pump(false)
            .build()
            .unwrap();
        let mut oled = Ssd1306::new(MockInterface::new(), &config);
        oled.init(&mut MockDelay).unwrap();
        assert_eq!(pump(oled), CHARGE_PUMP_OFF);
    }

    #[test]
    fn test_init_for_32_row_panel_uses_sequential_com_pins() {
        let mut oled = controller(32);
        oled.init(&mut MockDelay).unwrap();
        let commands = oled.release().commands();
        assert_eq!(&commands[1..3], &[MULTIPLEX_RATIO, 31]);
        let pins = commands.iter().position(|c| *c == COM_PINS).unwrap();
        assert_eq!(commands[pins + 1], COM_PINS_SEQUENTIAL);
    }

    #[test]
    fn test_addressing_commands() {
        let mut oled = controller(64);
        oled.set_page(3).unwrap();
        oled.set_column(0x5A).unwrap();
        oled.set_start_line(12).unwrap();
        oled.write_data(0xA5).unwrap();
        let iface = oled.release();
        assert_eq!(iface.commands(), [0xB3, 0x15, 0x0A, 0x4C]);
        assert_eq!(iface.data(), [0xA5]);
    }

    #[test]
    fn test_addressing_rejects_out_of_range() {
        let mut oled = controller(32);
        assert!(matches!(
            oled.set_column(128),
            Err(Error::OutOfRange {
                axis: Axis::Column,
                value: 128,
                limit: 128
            })
        ));
        assert!(matches!(
            oled.set_page(4),
            Err(Error::OutOfRange { axis: Axis::Page, .. })
        ));
        assert!(matches!(
            oled.set_start_line(32),
            Err(Error::OutOfRange { axis: Axis::Line, .. })
        ));
        assert!(oled.release().transfers.is_empty());
    }

    #[test]
    fn test_display_toggles() {
        let mut oled = controller(64);
        oled.switch_display(false).unwrap();
        oled.switch_invert(true).unwrap();
        oled.switch_invert(false).unwrap();
        oled.set_contrast(0x20).unwrap();
        oled.sleep(true).unwrap();
        oled.sleep(false).unwrap();
        assert_eq!(
            oled.release().commands(),
            [
                DISPLAY_OFF,
                INVERT_ON,
                INVERT_OFF,
                CONTRAST,
                0x20,
                DISPLAY_OFF,
                DISPLAY_ON
            ]
        );
    }

    #[test]
    fn test_backlight_is_unsupported() {
        let mut oled = controller(64);
        assert!(matches!(
            oled.switch_backlight(true),
            Err(Error::Unsupported(Operation::SwitchBacklight))
        ));
    }

    #[test]
    fn test_transport_failure_is_propagated() {
        let config = Builder::new()
            .dimensions(Dimensions::new(64, 128).unwrap())
            .build()
            .unwrap();
        let mut oled = Ssd1306::new(FailingInterface, &config);
        assert!(matches!(
            oled.init(&mut MockDelay),
            Err(Error::Transport(_))
        ));
        assert!(matches!(oled.write_data(0), Err(Error::Transport(_))));
    }
}
