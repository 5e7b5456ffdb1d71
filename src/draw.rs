//! Drawing primitives
//!
//! [`Canvas`] is the drawing engine. An implementor supplies its logical size
//! and a single-pixel write; lines, rectangles, circles, bitmaps and text are
//! provided on top of that. [`DisplayManager`](crate::DisplayManager)
//! implements it against the panel mirror.
//!
//! Coordinates are signed so shapes may hang off any edge. Pixels outside the
//! canvas are dropped silently; no primitive reports an error for clipping.
//!
//! ## Example
//!
//! ```rust,no_run
//! use page_display::{Canvas, CircleSegment, FillOptions, PixelMask};
//!
//! fn dial<C: Canvas>(canvas: &mut C) -> Result<(), C::Error> {
//!     canvas.draw_circle_segment(
//!         32,
//!         32,
//!         20,
//!         CircleSegment::UPPER_HALF,
//!         FillOptions::Outline,
//!         PixelMask::Set,
//!     )?;
//!     canvas.draw_line(32, 32, 45, 20, PixelMask::Set)?;
//!     canvas.draw_rect(0, 40, 64, 8, FillOptions::Outline, 1, PixelMask::Set)
//! }
//! ```

use core::ops::{BitOr, BitOrAssign, Range};

use crate::bitmap::Bitmap;
use crate::font::Font;
use crate::mask::PixelMask;

/// How closed shapes are painted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillOptions {
    /// Boundary only
    #[default]
    Outline,
    /// Boundary and interior
    Solid,
}

/// Set of circle quadrants, in screen coordinates (y grows downward)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CircleSegment(u8);

impl CircleSegment {
    /// Upper right quadrant
    pub const UPPER_RIGHT: Self = Self(0x01);
    /// Upper left quadrant
    pub const UPPER_LEFT: Self = Self(0x02);
    /// Lower left quadrant
    pub const LOWER_LEFT: Self = Self(0x04);
    /// Lower right quadrant
    pub const LOWER_RIGHT: Self = Self(0x08);
    /// Upper half
    pub const UPPER_HALF: Self = Self(0x03);
    /// Lower half
    pub const LOWER_HALF: Self = Self(0x0C);
    /// Left half
    pub const LEFT_HALF: Self = Self(0x06);
    /// Right half
    pub const RIGHT_HALF: Self = Self(0x09);
    /// Whole circle
    pub const FULL: Self = Self(0x0F);

    /// Build from raw quadrant bits; bits above the fourth are ignored
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// Raw quadrant bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every quadrant of `other` is selected
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no quadrant is selected
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CircleSegment {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CircleSegment {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Quadrant bit with the sign of its x and y offsets
const QUADRANTS: [(CircleSegment, i32, i32); 4] = [
    (CircleSegment::UPPER_RIGHT, 1, -1),
    (CircleSegment::UPPER_LEFT, -1, -1),
    (CircleSegment::LOWER_LEFT, -1, 1),
    (CircleSegment::LOWER_RIGHT, 1, 1),
];

/// Monochrome drawing surface
///
/// Only [`size`](Self::size) and [`draw_pixel`](Self::draw_pixel) are
/// required. Every provided primitive touches each pixel at most once per
/// call, so drawing with [`PixelMask::Toggle`] twice restores the canvas.
pub trait Canvas {
    /// Error raised by the pixel sink
    type Error;

    /// Logical `(width, height)` in pixels
    fn size(&self) -> (u16, u16);

    /// Apply `mask` to one pixel; points outside the canvas are ignored
    fn draw_pixel(&mut self, x: i32, y: i32, mask: PixelMask) -> Result<(), Self::Error>;

    /// Apply `mask` to every pixel
    fn fill(&mut self, mask: PixelMask) -> Result<(), Self::Error> {
        let (width, height) = self.size();
        self.draw_horizontal_line(0, 0, width, height, mask)
    }

    /// Draw `width` stacked horizontal lines of `length` pixels, starting at
    /// (x, y) and growing right and down
    fn draw_horizontal_line(
        &mut self,
        x: i32,
        y: i32,
        length: u16,
        width: u16,
        mask: PixelMask,
    ) -> Result<(), Self::Error> {
        let (canvas_width, canvas_height) = self.size();
        for row in visible(y, width, canvas_height) {
            for column in visible(x, length, canvas_width) {
                self.draw_pixel(column, row, mask)?;
            }
        }
        Ok(())
    }

    /// Draw `width` side by side vertical lines of `length` pixels, starting
    /// at (x, y) and growing down and right
    fn draw_vertical_line(
        &mut self,
        x: i32,
        y: i32,
        length: u16,
        width: u16,
        mask: PixelMask,
    ) -> Result<(), Self::Error> {
        let (canvas_width, canvas_height) = self.size();
        for column in visible(x, width, canvas_width) {
            for row in visible(y, length, canvas_height) {
                self.draw_pixel(column, row, mask)?;
            }
        }
        Ok(())
    }

    /// Draw a 1 px line from (x1, y1) to (x2, y2), both ends included
    ///
    /// Bresenham: the error term starts at half the dominant delta and the
    /// minor axis steps whenever it drops below zero. Only the steps whose
    /// dominant coordinate lies on the canvas are walked; the error term at
    /// the first of them is computed directly.
    fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        mask: PixelMask,
    ) -> Result<(), Self::Error> {
        let (canvas_width, canvas_height) = self.size();
        let (dx, step_x) = delta(x1, x2);
        let (dy, step_y) = delta(y1, y2);
        if dx == 0 && dy == 0 {
            return self.draw_pixel(x1, y1, mask);
        }

        let x_major = dx > dy;
        let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };
        let (major_from, major_step, limit, minor_from, minor_step) = if x_major {
            (x1, step_x, canvas_width, y1, step_y)
        } else {
            (y1, step_y, canvas_height, x1, step_x)
        };
        let Some((first, last)) = visible_steps(major_from, major_step, limit, major) else {
            return Ok(());
        };

        // State after `first` steps
        let offset = i128::from(major >> 1) - i128::from(first) * i128::from(minor);
        let taken = (-offset.div_euclid(i128::from(major))) as i64;
        let mut error = offset.rem_euclid(i128::from(major)) as i64;
        let mut along = i64::from(major_from) + major_step * first;
        let mut across = i64::from(minor_from) + minor_step * taken;

        for step in first..=last {
            if step != first {
                error -= minor;
                if error < 0 {
                    error += major;
                    across += minor_step;
                }
                along += major_step;
            }
            // Both coordinates lie between the end points
            let (x, y) = if x_major { (along, across) } else { (across, along) };
            self.draw_pixel(x as i32, y as i32, mask)?;
        }
        Ok(())
    }

    /// Draw a `width` x `height` rectangle with its top-left corner at (x, y)
    ///
    /// The outline is `line_width` pixels thick, drawn inside the rectangle.
    /// A border as thick as half the smaller side covers the whole rectangle.
    /// An outline of width 0 draws nothing.
    #[allow(clippy::too_many_arguments)]
    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        fill: FillOptions,
        line_width: u16,
        mask: PixelMask,
    ) -> Result<(), Self::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let covers = 2 * u32::from(line_width) >= u32::from(width.min(height));
        if fill == FillOptions::Solid || covers {
            return self.draw_horizontal_line(x, y, width, height, mask);
        }
        if line_width == 0 {
            return Ok(());
        }

        let lw = line_width;
        let inner = height - 2 * lw;
        let inset = i32::from(lw);
        self.draw_horizontal_line(x, y, width, lw, mask)?;
        let bottom = y.saturating_add(i32::from(height - lw));
        let right = x.saturating_add(i32::from(width - lw));
        self.draw_horizontal_line(x, bottom, width, lw, mask)?;
        self.draw_vertical_line(x, y.saturating_add(inset), inner, lw, mask)?;
        self.draw_vertical_line(right, y.saturating_add(inset), inner, lw, mask)
    }

    /// Draw a circle of `radius` around (x, y)
    fn draw_circle(
        &mut self,
        x: i32,
        y: i32,
        radius: u16,
        fill: FillOptions,
        mask: PixelMask,
    ) -> Result<(), Self::Error> {
        draw_quadrants(self, x, y, radius, CircleSegment::FULL, fill, false, mask)
    }

    /// Draw the quadrants of a circle selected by `segment`
    ///
    /// Outlined partial circles also get the radii that bound each selected
    /// quadrant, so a single quadrant renders as a closed pie slice.
    fn draw_circle_segment(
        &mut self,
        x: i32,
        y: i32,
        radius: u16,
        segment: CircleSegment,
        fill: FillOptions,
        mask: PixelMask,
    ) -> Result<(), Self::Error> {
        let radii = fill == FillOptions::Outline && segment != CircleSegment::FULL;
        draw_quadrants(self, x, y, radius, segment, fill, radii, mask)
    }

    /// Blit the set pixels of `bitmap` with its top-left corner at (x, y)
    ///
    /// Clear bitmap pixels leave the canvas untouched.
    fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &Bitmap<'_>,
        mask: PixelMask,
    ) -> Result<(), Self::Error> {
        for row in 0..bitmap.height() {
            for column in 0..bitmap.width() {
                if bitmap.pixel(column, row) {
                    self.draw_pixel(
                        x.saturating_add(i32::from(column)),
                        y.saturating_add(i32::from(row)),
                        mask,
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Render `text` with its top-left corner at (x, y)
    ///
    /// Characters without a glyph advance the cursor by the font's space
    /// width. A glyph that would cross the right edge starts a new line at
    /// `x`, one font height lower; `'\n'` does the same.
    ///
    /// Returns the cursor x after the last glyph and its spacing.
    fn draw_string<F: Font + ?Sized>(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        font: &F,
    ) -> Result<i32, Self::Error> {
        let (canvas_width, _) = self.size();
        let line_height = i32::from(font.height());
        let (mut cursor_x, mut cursor_y) = (x, y);

        for c in text.chars() {
            if c == '\n' {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(line_height);
                continue;
            }
            let glyph = font.glyph(c);
            let advance = glyph.map_or(i32::from(font.space_width()), |g| g.len() as i32);
            if cursor_x != x && cursor_x.saturating_add(advance) > i32::from(canvas_width) {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(line_height);
            }
            if let Some(columns) = glyph {
                for (offset, bits) in columns.iter().enumerate() {
                    for row in 0..font.height().min(8) {
                        if bits & (1 << row) != 0 {
                            self.draw_pixel(
                                cursor_x.saturating_add(offset as i32),
                                cursor_y.saturating_add(i32::from(row)),
                                PixelMask::Set,
                            )?;
                        }
                    }
                }
            } else {
                log::trace!("draw: no glyph for {:?}", c);
            }
            cursor_x = cursor_x.saturating_add(advance + i32::from(font.spacing()));
        }
        Ok(cursor_x)
    }
}

/// Visible part of `[start, start + len)` on an axis of `limit` pixels
fn visible(start: i32, len: u16, limit: u16) -> Range<i32> {
    let end = start.saturating_add(i32::from(len)).min(i32::from(limit));
    start.max(0)..end
}

/// Absolute delta and unit step from `from` towards `to`
fn delta(from: i32, to: i32) -> (i64, i64) {
    let d = i64::from(to) - i64::from(from);
    if d < 0 { (-d, -1) } else { (d, 1) }
}

/// First and last of the steps `0..=steps` that keep `from + step * k`
/// inside `[0, limit)`
fn visible_steps(from: i32, step: i64, limit: u16, steps: i64) -> Option<(i64, i64)> {
    let (from, limit) = (i64::from(from), i64::from(limit));
    let (first, last) = if step > 0 {
        (-from, limit - 1 - from)
    } else {
        (from - limit + 1, from)
    };
    let (first, last) = (first.max(0), last.min(steps));
    (limit > 0 && first <= last).then_some((first, last))
}

/// Plot offset (dx, dy) in every selected quadrant, once per distinct pixel
///
/// Offsets on an axis land on the same pixel in two quadrants.
fn plot_mirrored<C: Canvas + ?Sized>(
    canvas: &mut C,
    cx: i32,
    cy: i32,
    dx: i32,
    dy: i32,
    segment: CircleSegment,
    mask: PixelMask,
) -> Result<(), C::Error> {
    let mut plotted = [(0, 0); 4];
    let mut count = 0;
    for (quadrant, sign_x, sign_y) in QUADRANTS {
        if !segment.contains(quadrant) {
            continue;
        }
        let point = (cx.saturating_add(sign_x * dx), cy.saturating_add(sign_y * dy));
        if plotted[..count].contains(&point) {
            continue;
        }
        plotted[count] = point;
        count += 1;
        canvas.draw_pixel(point.0, point.1, mask)?;
    }
    Ok(())
}

/// Vertical span from the centre row to `height` in column offset `dx`
fn plot_span<C: Canvas + ?Sized>(
    canvas: &mut C,
    cx: i32,
    cy: i32,
    dx: i32,
    height: i32,
    segment: CircleSegment,
    mask: PixelMask,
) -> Result<(), C::Error> {
    for dy in 0..=height {
        plot_mirrored(canvas, cx, cy, dx, dy, segment, mask)?;
    }
    Ok(())
}

/// Midpoint circle over one octant, mirrored into `segment`
///
/// Offsets (x, y) with x <= y are generated once each; the swapped offset
/// covers the other octant of the quadrant. For solid circles every column
/// offset gets one span, sized by the highest boundary point in it.
#[allow(clippy::too_many_arguments)]
fn draw_quadrants<C: Canvas + ?Sized>(
    canvas: &mut C,
    cx: i32,
    cy: i32,
    radius: u16,
    segment: CircleSegment,
    fill: FillOptions,
    radii: bool,
    mask: PixelMask,
) -> Result<(), C::Error> {
    if segment.is_empty() {
        return Ok(());
    }
    let r = i32::from(radius);
    let (mut x, mut y) = (0, r);
    let mut error = 3 - 2 * r;

    while x <= y {
        let y_steps = error >= 0;
        match fill {
            FillOptions::Outline => {
                plot_mirrored(canvas, cx, cy, x, y, segment, mask)?;
                if x != y {
                    plot_mirrored(canvas, cx, cy, y, x, segment, mask)?;
                }
            }
            FillOptions::Solid => {
                plot_span(canvas, cx, cy, x, y, segment, mask)?;
                // Column y is complete once y is about to move
                if y_steps && x != y {
                    plot_span(canvas, cx, cy, y, x, segment, mask)?;
                }
            }
        }
        if y_steps {
            error += 4 * (x - y) + 10;
            y -= 1;
        } else {
            error += 4 * x + 6;
        }
        x += 1;
    }

    if radii && r > 0 {
        draw_radii(canvas, cx, cy, r, segment, mask)?;
    }
    Ok(())
}

/// Straight edges of the selected quadrants, centre included, rim excluded
fn draw_radii<C: Canvas + ?Sized>(
    canvas: &mut C,
    cx: i32,
    cy: i32,
    r: i32,
    segment: CircleSegment,
    mask: PixelMask,
) -> Result<(), C::Error> {
    let has = |a: CircleSegment, b: CircleSegment| segment.contains(a) || segment.contains(b);
    let directions = [
        (has(CircleSegment::UPPER_RIGHT, CircleSegment::LOWER_RIGHT), 1, 0),
        (has(CircleSegment::UPPER_LEFT, CircleSegment::LOWER_LEFT), -1, 0),
        (has(CircleSegment::UPPER_RIGHT, CircleSegment::UPPER_LEFT), 0, -1),
        (has(CircleSegment::LOWER_LEFT, CircleSegment::LOWER_RIGHT), 0, 1),
    ];
    canvas.draw_pixel(cx, cy, mask)?;
    for (selected, step_x, step_y) in directions {
        if !selected {
            continue;
        }
        for k in 1..r {
            canvas.draw_pixel(
                cx.saturating_add(step_x * k),
                cy.saturating_add(step_y * k),
                mask,
            )?;
        }
    }
    Ok(())
}
