//! Display configuration types and builder

use crate::command::ssd1306::DEFAULT_CONTRAST;
pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};
use crate::interface::DEFAULT_SPI_CLOCK_HZ;

/// Number of pixel rows stored in one page byte
pub const PIXELS_PER_PAGE: u16 = 8;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to COM outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, corresponds to segment outputs)
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0 or rows > MAX_ROWS
    /// - cols == 0 or cols > MAX_COLUMNS
    /// - rows % 8 != 0 (pages hold 8 rows each)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_ROWS || !rows.is_multiple_of(PIXELS_PER_PAGE) {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_COLUMNS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of pages (bands of 8 rows)
    pub fn pages(&self) -> u16 {
        self.rows / PIXELS_PER_PAGE
    }

    /// Calculate required buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        self.pages() as usize * self.cols as usize
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Controller variant driving the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerKind {
    /// Solomon Systech SSD1306 OLED controller
    #[default]
    Ssd1306,
    /// Sitronix ST7565R LCD controller
    St7565r,
}

impl ControllerKind {
    /// Number of segment columns the controller can address
    pub fn max_columns(self) -> u16 {
        match self {
            Self::Ssd1306 => 128,
            Self::St7565r => MAX_COLUMNS,
        }
    }

    /// Reset pulse width and post-reset settle time in milliseconds
    pub fn reset_timing_ms(self) -> (u32, u32) {
        match self {
            Self::Ssd1306 => (10, 10),
            Self::St7565r => (1, 5),
        }
    }
}

/// Display configuration
///
/// Describes which controller to bind and how to drive it. Handed to the
/// controller once at construction. Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Controller variant
    pub kind: ControllerKind,
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Software rotation picked up by [`DisplayManager::from_config`](crate::DisplayManager::from_config)
    pub rotation: Rotation,
    /// Contrast applied during init
    pub contrast: u8,
    /// Lowest contrast the panel tolerates
    pub contrast_min: u8,
    /// Highest contrast the panel tolerates
    pub contrast_max: u8,
    /// Display start line programmed during init
    pub start_line: u8,
    /// Mirror columns (SEG remap / ADC reverse)
    pub segment_remap: bool,
    /// Scan COM lines from the last to the first
    pub com_scan_reversed: bool,
    /// Generate the panel voltage with the internal charge pump (SSD1306)
    pub charge_pump: bool,
    /// SPI clock the bus should be configured for, in hertz
    pub spi_clock_hz: u32,
}

impl Config {
    /// Clamp a contrast level into the configured range
    pub fn clamp_contrast(&self, level: u8) -> u8 {
        level.clamp(self.contrast_min, self.contrast_max)
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use page_display::{Builder, ControllerKind, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(64, 128) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .controller(ControllerKind::St7565r)
///     .dimensions(dims)
///     .rotation(Rotation::Rotate180)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Controller variant
    kind: ControllerKind,
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Display rotation
    rotation: Rotation,
    /// Contrast override; per-controller default when unset
    contrast: Option<u8>,
    /// Lowest allowed contrast
    contrast_min: u8,
    /// Highest allowed contrast
    contrast_max: u8,
    /// Display start line
    start_line: u8,
    /// Mirror columns; per-controller default when unset
    segment_remap: Option<bool>,
    /// Reverse COM scan
    com_scan_reversed: bool,
    /// Internal charge pump
    charge_pump: bool,
    /// SPI clock hint
    spi_clock_hz: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            kind: ControllerKind::Ssd1306,
            dimensions: None,
            rotation: Rotation::Rotate0,
            contrast: None,
            // Usable electronic volume window of common ST7565R glass
            contrast_min: 30,
            contrast_max: 40,
            start_line: 0,
            segment_remap: None,
            com_scan_reversed: true,
            charge_pump: true,
            spi_clock_hz: DEFAULT_SPI_CLOCK_HZ,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the controller variant
    pub fn controller(mut self, kind: ControllerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the contrast applied during init
    pub fn contrast(mut self, level: u8) -> Self {
        self.contrast = Some(level);
        self
    }

    /// Set the contrast window used for clamping (ST7565R)
    pub fn contrast_range(mut self, min: u8, max: u8) -> Self {
        self.contrast_min = min;
        self.contrast_max = max;
        self
    }

    /// Set the display start line programmed during init
    pub fn start_line(mut self, line: u8) -> Self {
        self.start_line = line;
        self
    }

    /// Mirror the panel horizontally
    pub fn segment_remap(mut self, value: bool) -> Self {
        self.segment_remap = Some(value);
        self
    }

    /// Mirror the panel vertically
    pub fn com_scan_reversed(mut self, value: bool) -> Self {
        self.com_scan_reversed = value;
        self
    }

    /// Enable or disable the internal charge pump (SSD1306)
    ///
    /// Turn it off for modules that feed VCC from an external supply.
    pub fn charge_pump(mut self, enabled: bool) -> Self {
        self.charge_pump = enabled;
        self
    }

    /// Set the SPI clock hint in hertz
    pub fn spi_clock_hz(mut self, hz: u32) -> Self {
        self.spi_clock_hz = hz;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// `BuilderError::UnsupportedDimensions` if the controller cannot address
    /// the width, `BuilderError::InvalidContrastRange` for an empty contrast
    /// window and `BuilderError::InvalidStartLine` for a line past the last row.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        if dimensions.cols > self.kind.max_columns() {
            return Err(BuilderError::UnsupportedDimensions {
                kind: self.kind,
                cols: dimensions.cols,
            });
        }
        if self.contrast_min > self.contrast_max {
            return Err(BuilderError::InvalidContrastRange {
                min: self.contrast_min,
                max: self.contrast_max,
            });
        }
        if u16::from(self.start_line) >= dimensions.rows {
            return Err(BuilderError::InvalidStartLine(self.start_line));
        }
        let contrast = match (self.contrast, self.kind) {
            (Some(level), _) => level,
            (None, ControllerKind::Ssd1306) => DEFAULT_CONTRAST,
            (None, ControllerKind::St7565r) => self.contrast_min,
        };
        Ok(Config {
            kind: self.kind,
            dimensions,
            rotation: self.rotation,
            contrast,
            contrast_min: self.contrast_min,
            contrast_max: self.contrast_max,
            start_line: self.start_line,
            // ST7565R glass is usually mounted unmirrored
            segment_remap: self
                .segment_remap
                .unwrap_or(self.kind == ControllerKind::Ssd1306),
            com_scan_reversed: self.com_scan_reversed,
            charge_pump: self.charge_pump,
            spi_clock_hz: self.spi_clock_hz,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validation() {
        assert!(Dimensions::new(64, 128).is_ok());
        assert!(Dimensions::new(32, 128).is_ok());
        assert!(Dimensions::new(64, 132).is_ok());
        assert_eq!(
            Dimensions::new(60, 128),
            Err(BuilderError::InvalidDimensions { rows: 60, cols: 128 })
        );
        assert!(Dimensions::new(0, 128).is_err());
        assert!(Dimensions::new(72, 128).is_err());
        assert!(Dimensions::new(64, 0).is_err());
        assert!(Dimensions::new(64, 133).is_err());
    }

    #[test]
    fn test_buffer_size_is_pages_times_columns() {
        let dims = Dimensions::new(64, 128).unwrap();
        assert_eq!(dims.pages(), 8);
        assert_eq!(dims.buffer_size(), 1024);
        let dims = Dimensions::new(32, 128).unwrap();
        assert_eq!(dims.buffer_size(), 512);
    }

    #[test]
    fn test_builder_defaults_per_controller() {
        let dims = Dimensions::new(64, 128).unwrap();
        let oled = Builder::new().dimensions(dims).build().unwrap();
        assert_eq!(oled.kind, ControllerKind::Ssd1306);
        assert_eq!(oled.contrast, DEFAULT_CONTRAST);
        assert_eq!(oled.spi_clock_hz, 1_000_000);

        let lcd = Builder::new()
            .controller(ControllerKind::St7565r)
            .dimensions(dims)
            .build()
            .unwrap();
        assert_eq!(lcd.contrast, 30);
    }

    #[test]
    fn test_builder_rejects_wide_panel_for_ssd1306() {
        let dims = Dimensions::new(64, 132).unwrap();
        let result = Builder::new().dimensions(dims).build();
        assert_eq!(
            result.err(),
            Some(BuilderError::UnsupportedDimensions {
                kind: ControllerKind::Ssd1306,
                cols: 132
            })
        );
        let result = Builder::new()
            .controller(ControllerKind::St7565r)
            .dimensions(dims)
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_rejects_bad_contrast_range_and_start_line() {
        let dims = Dimensions::new(32, 128).unwrap();
        let result = Builder::new().dimensions(dims).contrast_range(50, 10).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidContrastRange { min: 50, max: 10 })
        ));
        let result = Builder::new().dimensions(dims).start_line(32).build();
        assert!(matches!(result, Err(BuilderError::InvalidStartLine(32))));
    }

    #[test]
    fn test_segment_remap_defaults_per_controller() {
        let dims = Dimensions::new(64, 128).unwrap();
        let oled = Builder::new().dimensions(dims).build().unwrap();
        assert!(oled.segment_remap);
        let lcd = Builder::new()
            .controller(ControllerKind::St7565r)
            .dimensions(dims)
            .build()
            .unwrap();
        assert!(!lcd.segment_remap);
        assert!(lcd.com_scan_reversed);
        let mirrored = Builder::new()
            .controller(ControllerKind::St7565r)
            .dimensions(dims)
            .segment_remap(true)
            .build()
            .unwrap();
        assert!(mirrored.segment_remap);
    }

    #[test]
    fn test_charge_pump_defaults_on() {
        let dims = Dimensions::new(64, 128).unwrap();
        assert!(Builder::new().dimensions(dims).build().unwrap().charge_pump);
        let external = Builder::new()
            .dimensions(dims)
            .charge_pump(false)
            .build()
            .unwrap();
        assert!(!external.charge_pump);
    }

    #[test]
    fn test_clamp_contrast() {
        let dims = Dimensions::new(64, 128).unwrap();
        let config = Builder::new().dimensions(dims).build().unwrap();
        assert_eq!(config.clamp_contrast(0), 30);
        assert_eq!(config.clamp_contrast(35), 35);
        assert_eq!(config.clamp_contrast(200), 40);
    }
}
