//! Graph widgets
//!
//! [`Graph`] is a scrolling strip chart: each [`update`](Graph::update) draws
//! one vertical bar at the cursor column, blanks the column after it and moves
//! the cursor right, wrapping at the right edge of the plot region. The blank
//! column marks the newest sample once the chart has wrapped.
//!
//! [`Gauge`] is a horizontal bar that grows and shrinks in place, redrawing
//! only the difference between the old and new length.
//!
//! Both widgets draw through [`Canvas`], keep no reference to it between
//! calls, and clamp out-of-range values instead of failing.
//!
//! ```rust,no_run
//! use page_display::{Canvas, Graph, ProportionalFont};
//!
//! fn plot<C: Canvas>(canvas: &mut C, samples: &[i32]) -> Result<(), C::Error> {
//!     let mut graph = Graph::init(canvas, &ProportionalFont, 0, 0, "T", 100)?;
//!     for sample in samples {
//!         graph.update(canvas, *sample)?;
//!     }
//!     Ok(())
//! }
//! ```

use crate::draw::Canvas;
use crate::font::Font;
use crate::mask::PixelMask;

/// Blank columns between the title and the axis
pub const TITLE_GAP: i32 = 2;

/// Blank columns between the axis and the first plot column
pub const AXIS_GAP: i32 = 2;

/// Rectangle a widget draws its samples into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotRegion {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

/// Scrolling strip chart
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    axis_x: i32,
    plot: PlotRegion,
    max: u16,
    scale: f32,
    start: u16,
    wraps: u32,
}

impl Graph {
    /// Draw the title and axis at (x, y), with the plot reaching the bottom
    /// of the canvas
    pub fn init<C, F>(
        canvas: &mut C,
        font: &F,
        x: i32,
        y: i32,
        title: &str,
        max: u16,
    ) -> Result<Self, C::Error>
    where
        C: Canvas + ?Sized,
        F: Font + ?Sized,
    {
        let (_, canvas_height) = canvas.size();
        let plot_height = saturate(i32::from(canvas_height).saturating_sub(y));
        Self::init_with_height(canvas, font, x, y, title, max, plot_height)
    }

    /// Draw the title and axis at (x, y) with a plot `plot_height` rows tall
    ///
    /// The plot region runs from [`AXIS_GAP`] columns after the axis to the
    /// right edge of the canvas. When no column is left, updates draw nothing.
    pub fn init_with_height<C, F>(
        canvas: &mut C,
        font: &F,
        x: i32,
        y: i32,
        title: &str,
        max: u16,
        plot_height: u16,
    ) -> Result<Self, C::Error>
    where
        C: Canvas + ?Sized,
        F: Font + ?Sized,
    {
        let title_end = canvas.draw_string(x, y, title, font)?;
        let axis_x = title_end.saturating_add(TITLE_GAP);
        canvas.draw_vertical_line(axis_x, y, plot_height, 1, PixelMask::Set)?;

        let plot_x = axis_x.saturating_add(AXIS_GAP);
        let (canvas_width, _) = canvas.size();
        let plot = PlotRegion {
            x: plot_x,
            y,
            width: saturate(i32::from(canvas_width).saturating_sub(plot_x)),
            height: plot_height,
        };
        let scale = if max == 0 {
            0.0
        } else {
            f32::from(plot_height) / f32::from(max)
        };
        log::debug!(
            "graph: {:?} axis at {} plot {}x{} at ({}, {}) max {}",
            title,
            axis_x,
            plot.width,
            plot.height,
            plot.x,
            plot.y,
            max
        );
        Ok(Self {
            axis_x,
            plot,
            max,
            scale,
            start: 0,
            wraps: 0,
        })
    }

    /// Plot one sample at the cursor and advance it
    ///
    /// `value` is clamped to `0..=max`. The bar is `value * scale` pixels
    /// high, rounded down, growing up from the bottom of the plot. The column
    /// after the bar is blanked before the cursor moves onto it.
    pub fn update<C: Canvas + ?Sized>(&mut self, canvas: &mut C, value: i32) -> Result<(), C::Error> {
        if self.plot.width == 0 {
            return Ok(());
        }
        let clamped = value.clamp(0, i32::from(self.max));
        if clamped != value {
            log::debug!("graph: value {} clamped to {}", value, clamped);
        }

        let column = self.plot.x.saturating_add(i32::from(self.start));
        let bar = self.bar_height(clamped as u16);
        canvas.draw_vertical_line(column, self.plot.y, self.plot.height - bar, 1, PixelMask::Clear)?;
        canvas.draw_vertical_line(
            column,
            self.plot.y.saturating_add(i32::from(self.plot.height - bar)),
            bar,
            1,
            PixelMask::Set,
        )?;

        let next = (self.start + 1) % self.plot.width;
        canvas.draw_vertical_line(
            self.plot.x.saturating_add(i32::from(next)),
            self.plot.y,
            self.plot.height,
            1,
            PixelMask::Clear,
        )?;
        self.start = next;
        if next == 0 {
            self.wraps += 1;
            log::trace!("graph: wrapped {} times", self.wraps);
        }
        Ok(())
    }

    /// Plot column offset the next sample goes to
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Pixels per unit of value
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Largest plotted value
    pub fn max(&self) -> u16 {
        self.max
    }

    /// Column of the vertical axis
    pub fn axis_x(&self) -> i32 {
        self.axis_x
    }

    /// Area the bars are drawn into
    pub fn plot_region(&self) -> PlotRegion {
        self.plot
    }

    /// How many times the cursor returned to the first column
    pub fn wraps(&self) -> u32 {
        self.wraps
    }

    // Integer math keeps a full-scale value at exactly the plot height.
    fn bar_height(&self, value: u16) -> u16 {
        if self.max == 0 {
            return 0;
        }
        let height = u32::from(value) * u32::from(self.plot.height) / u32::from(self.max);
        height.min(u32::from(self.plot.height)) as u16
    }
}

/// Blank columns between the title and the gauge tick
pub const GAUGE_GAP: i32 = 3;

/// Rows between the top of the gauge and its bar
const BAR_OFFSET: i32 = 2;

/// Bar thickness in rows
const BAR_THICKNESS: u16 = 3;

/// Horizontal bar gauge
///
/// Laid out on one text line: title, a tick as tall as the font, then the
/// bar, which may grow to one column short of the canvas edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gauge {
    bar_x: i32,
    bar_y: i32,
    max: u16,
    max_length: u16,
    length: u16,
}

impl Gauge {
    /// Draw the title and tick at (x, y)
    pub fn init<C, F>(
        canvas: &mut C,
        font: &F,
        x: i32,
        y: i32,
        title: &str,
        max: u16,
    ) -> Result<Self, C::Error>
    where
        C: Canvas + ?Sized,
        F: Font + ?Sized,
    {
        let tick_x = canvas
            .draw_string(x, y, title, font)?
            .saturating_add(GAUGE_GAP);
        canvas.draw_vertical_line(tick_x, y, u16::from(font.height()), 1, PixelMask::Set)?;
        let bar_x = tick_x.saturating_add(GAUGE_GAP);
        let (canvas_width, _) = canvas.size();
        let max_length = saturate(
            i32::from(canvas_width)
                .saturating_sub(bar_x)
                .saturating_sub(1),
        );
        log::debug!("gauge: {:?} bar at {} up to {} px", title, bar_x, max_length);
        Ok(Self {
            bar_x,
            bar_y: y.saturating_add(BAR_OFFSET),
            max,
            max_length,
            length: 0,
        })
    }

    /// Resize the bar to `value`, clamped to `0..=max`
    ///
    /// Only the columns between the old and the new length are drawn.
    pub fn update<C: Canvas + ?Sized>(&mut self, canvas: &mut C, value: i32) -> Result<(), C::Error> {
        let clamped = value.clamp(0, i32::from(self.max)) as u16;
        let length = if self.max == 0 {
            0
        } else {
            (u32::from(clamped) * u32::from(self.max_length) / u32::from(self.max)) as u16
        };

        if length > self.length {
            canvas.draw_horizontal_line(
                self.bar_x.saturating_add(i32::from(self.length)),
                self.bar_y,
                length - self.length,
                BAR_THICKNESS,
                PixelMask::Set,
            )?;
        } else if length < self.length {
            canvas.draw_horizontal_line(
                self.bar_x.saturating_add(i32::from(length)),
                self.bar_y,
                self.length - length,
                BAR_THICKNESS,
                PixelMask::Clear,
            )?;
        }
        self.length = length;
        Ok(())
    }

    /// Current bar length in pixels
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Bar length at `max`
    pub fn max_length(&self) -> u16 {
        self.max_length
    }

    /// First bar column
    pub fn bar_x(&self) -> i32 {
        self.bar_x
    }
}

fn saturate(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}
