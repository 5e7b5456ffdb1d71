//! Controller command definitions
//!
//! Command bytes for the two supported page/column controllers. Commands are
//! sent over SPI with the D/C pin low; display RAM bytes are sent with D/C high.
//!
//! Several commands carry their argument in the low bits of the opcode
//! (column nibbles, page number, start line). Those are exposed as `const fn`
//! helpers that mask the argument to the field width.
//!
//! ## Example
//!
//! ```rust,no_run
//! use page_display::{command::ssd1306, DisplayInterface, Interface};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//! // Address page 2, column 0x35 and write one byte
//! let _ = interface.send_commands(&[
//!     ssd1306::page_address(2),
//!     ssd1306::column_high(0x35),
//!     ssd1306::column_low(0x35),
//! ]);
//! let _ = interface.send_data(&[0xFF]);
//! ```

/// SSD1306 OLED controller commands
pub mod ssd1306 {
    /// Set lower column nibble (0x00 | col & 0x0F)
    pub const fn column_low(column: u8) -> u8 {
        column & 0x0F
    }

    /// Set upper column nibble (0x10 | col >> 4)
    pub const fn column_high(column: u8) -> u8 {
        0x10 | ((column >> 4) & 0x0F)
    }

    /// Set memory addressing mode (0x20), followed by the mode byte
    pub const MEMORY_MODE: u8 = 0x20;
    /// Page addressing mode argument for [`MEMORY_MODE`]
    pub const MEMORY_MODE_PAGE: u8 = 0x02;

    /// Set display start line (0x40 | line & 0x3F)
    pub const fn start_line(line: u8) -> u8 {
        0x40 | (line & 0x3F)
    }

    /// Set contrast control (0x81), followed by the level
    pub const CONTRAST: u8 = 0x81;

    /// Charge pump setting (0x8D), followed by [`CHARGE_PUMP_ON`] or [`CHARGE_PUMP_OFF`]
    pub const CHARGE_PUMP: u8 = 0x8D;
    /// Enable the internal charge pump
    pub const CHARGE_PUMP_ON: u8 = 0x14;
    /// Disable the internal charge pump (external VCC)
    pub const CHARGE_PUMP_OFF: u8 = 0x10;

    /// Column address 0 is mapped to SEG0
    pub const SEGMENT_REMAP_OFF: u8 = 0xA0;
    /// Column address 127 is mapped to SEG0
    pub const SEGMENT_REMAP_ON: u8 = 0xA1;

    /// Output follows RAM content
    pub const ENTIRE_DISPLAY_RESUME: u8 = 0xA4;

    /// Normal display (1 in RAM = lit pixel)
    pub const INVERT_OFF: u8 = 0xA6;
    /// Inverse display (0 in RAM = lit pixel)
    pub const INVERT_ON: u8 = 0xA7;

    /// Set multiplex ratio (0xA8), followed by `rows - 1`
    pub const MULTIPLEX_RATIO: u8 = 0xA8;

    /// Display off (sleep mode)
    pub const DISPLAY_OFF: u8 = 0xAE;
    /// Display on
    pub const DISPLAY_ON: u8 = 0xAF;

    /// Set page start address for page addressing mode (0xB0 | page & 0x07)
    pub const fn page_address(page: u8) -> u8 {
        0xB0 | (page & 0x07)
    }

    /// Scan from COM0 to COM[N-1]
    pub const COM_SCAN_NORMAL: u8 = 0xC0;
    /// Scan from COM[N-1] to COM0
    pub const COM_SCAN_REMAPPED: u8 = 0xC8;

    /// Set display offset (0xD3), followed by the vertical shift
    pub const DISPLAY_OFFSET: u8 = 0xD3;

    /// Set display clock divide ratio / oscillator frequency (0xD5)
    pub const DISPLAY_CLOCK: u8 = 0xD5;
    /// Reset value: divide ratio 1, default oscillator
    pub const DISPLAY_CLOCK_DEFAULT: u8 = 0x80;

    /// Set pre-charge period (0xD9)
    pub const PRECHARGE: u8 = 0xD9;
    /// Pre-charge for internal charge pump
    pub const PRECHARGE_DEFAULT: u8 = 0xF1;

    /// Set COM pins hardware configuration (0xDA)
    pub const COM_PINS: u8 = 0xDA;
    /// Sequential COM pin configuration (32 row panels)
    pub const COM_PINS_SEQUENTIAL: u8 = 0x02;
    /// Alternative COM pin configuration (64 row panels)
    pub const COM_PINS_ALTERNATIVE: u8 = 0x12;

    /// Set VCOMH deselect level (0xDB)
    pub const VCOMH: u8 = 0xDB;
    /// ~0.77 x Vcc
    pub const VCOMH_DEFAULT: u8 = 0x40;

    /// Contrast level used when none is configured
    pub const DEFAULT_CONTRAST: u8 = 0x8F;
}

/// ST7565R LCD controller commands
pub mod st7565r {
    /// Set lower column nibble (0x00 | col & 0x0F)
    pub const fn column_low(column: u8) -> u8 {
        column & 0x0F
    }

    /// Set upper column nibble (0x10 | col >> 4)
    pub const fn column_high(column: u8) -> u8 {
        0x10 | ((column >> 4) & 0x0F)
    }

    /// Select internal resistor ratio (0x20 | ratio & 0x07)
    pub const fn resistor_ratio(ratio: u8) -> u8 {
        0x20 | (ratio & 0x07)
    }
    /// Resistor ratio used at power-up
    pub const DEFAULT_RESISTOR_RATIO: u8 = 1;

    /// Booster, regulator and follower all on
    pub const POWER_CONTROL_ALL_ON: u8 = 0x2F;

    /// Set display start line (0x40 | line & 0x3F)
    pub const fn start_line(line: u8) -> u8 {
        0x40 | (line & 0x3F)
    }

    /// Electronic volume mode set (0x81), followed by [`electronic_volume`]
    pub const ELECTRONIC_VOLUME_MODE: u8 = 0x81;

    /// Electronic volume register value for a contrast level
    ///
    /// The register is 6 bits wide and counts downwards.
    pub const fn electronic_volume(level: u8) -> u8 {
        0x3F & !level
    }

    /// SEG output in normal direction
    pub const ADC_NORMAL: u8 = 0xA0;
    /// SEG output reversed
    pub const ADC_REVERSE: u8 = 0xA1;

    /// LCD bias 1/6
    pub const BIAS_1_6: u8 = 0xA2;

    /// Output follows RAM content
    pub const ALL_POINTS_OFF: u8 = 0xA4;

    /// Normal display
    pub const DISPLAY_NORMAL: u8 = 0xA6;
    /// Reverse display
    pub const DISPLAY_REVERSE: u8 = 0xA7;

    /// Static indicator off; enters sleep together with display off
    pub const SLEEP_MODE: u8 = 0xAC;
    /// Static indicator on; leaves sleep mode
    pub const NORMAL_MODE: u8 = 0xAD;

    /// Display off
    pub const DISPLAY_OFF: u8 = 0xAE;
    /// Display on
    pub const DISPLAY_ON: u8 = 0xAF;

    /// Set page address (0xB0 | page & 0x0F)
    pub const fn page_address(page: u8) -> u8 {
        0xB0 | (page & 0x0F)
    }

    /// COM output normal scan direction
    pub const COM_SCAN_NORMAL: u8 = 0xC0;
    /// COM output reverse scan direction
    pub const COM_SCAN_REVERSE: u8 = 0xC8;

    /// Internal reset
    pub const RESET: u8 = 0xE2;

    /// Booster ratio select (0xF8), followed by [`BOOSTER_RATIO_2X_3X_4X`]
    pub const BOOSTER_RATIO: u8 = 0xF8;
    /// 2x, 3x, 4x step-up
    pub const BOOSTER_RATIO_2X_3X_4X: u8 = 0x00;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_nibbles() {
        assert_eq!(ssd1306::column_high(0x7F), 0x17);
        assert_eq!(ssd1306::column_low(0x7F), 0x0F);
        assert_eq!(st7565r::column_high(0x83), 0x18);
        assert_eq!(st7565r::column_low(0x83), 0x03);
    }

    #[test]
    fn test_argument_masking() {
        assert_eq!(ssd1306::start_line(0x41), 0x41);
        assert_eq!(ssd1306::start_line(0xFF), 0x7F);
        assert_eq!(ssd1306::page_address(9), 0xB1);
        assert_eq!(st7565r::page_address(8), 0xB8);
        assert_eq!(st7565r::resistor_ratio(9), 0x21);
    }

    #[test]
    fn test_electronic_volume_counts_down() {
        assert_eq!(st7565r::electronic_volume(0), 0x3F);
        assert_eq!(st7565r::electronic_volume(30), 0x21);
        assert_eq!(st7565r::electronic_volume(40), 0x17);
    }
}
