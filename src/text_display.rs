//! A device abstraction for a small monochrome OLED showing one centered
//! message at a time.
//!
//! The OLED driver itself (for example an SH1106 in buffered-graphics mode)
//! is supplied by the caller through [`BufferedDisplay`]. [`MonoFrame`] is an
//! in-memory implementation for previews and tests.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_7X13_BOLD},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text, renderer::TextRenderer},
};

use crate::{Error, Result};

/// Default horizontal shift, in pixels. SH1106 controllers map a 132-column
/// RAM onto a 128-column panel, which leaves text looking left of center.
pub const DEFAULT_X_OFFSET: i32 = 4;

/// Default glyph cap height used to center text vertically.
pub const DEFAULT_CAP_HEIGHT: i32 = 10;

/// A [`DrawTarget`] that draws into a RAM buffer and sends it to the panel
/// on [`flush`](Self::flush).
pub trait BufferedDisplay: DrawTarget<Color = BinaryColor> {
    /// Sends the buffer to the panel.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the transfer fails.
    fn flush(&mut self) -> core::result::Result<(), Self::Error>;
}

/// Runtime settings for a [`TextDisplay`].
#[derive(Clone, Copy, Debug)]
pub struct TextDisplayConfig {
    /// Font for every message.
    pub font: &'static MonoFont<'static>,
    /// Added to the horizontally centered x position.
    pub x_offset: i32,
    /// Height the baseline is centered around.
    pub cap_height: i32,
}

impl Default for TextDisplayConfig {
    fn default() -> Self {
        Self {
            font: &FONT_7X13_BOLD,
            x_offset: DEFAULT_X_OFFSET,
            cap_height: DEFAULT_CAP_HEIGHT,
        }
    }
}

/// Shows one line of text, centered, on a [`BufferedDisplay`].
///
/// # Example
///
/// ```rust
/// use farkle_console::text_display::{MonoFrame, TextDisplay, TextDisplayConfig};
///
/// # fn example() -> farkle_console::Result<()> {
/// let mut text_display = TextDisplay::new(MonoFrame::<128, 64>::new(), TextDisplayConfig::default());
/// text_display.begin()?;
/// text_display.print("Player 2")?;
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct TextDisplay<D> {
    display: D,
    config: TextDisplayConfig,
}

impl<D> TextDisplay<D>
where
    D: BufferedDisplay,
{
    /// Wraps `display`. Nothing is drawn until [`begin`](Self::begin) or
    /// [`print`](Self::print).
    #[must_use]
    pub const fn new(display: D, config: TextDisplayConfig) -> Self {
        Self { display, config }
    }

    /// Blanks the panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the driver fails to draw or flush.
    pub fn begin(&mut self) -> Result<()> {
        self.display
            .clear(BinaryColor::Off)
            .map_err(|_| Error::Display)?;
        self.display.flush().map_err(|_| Error::Display)
    }

    /// Replaces whatever is shown with `message`, centered.
    ///
    /// Text wider than the panel is clipped on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the driver fails to draw or flush.
    pub fn print(&mut self, message: &str) -> Result<()> {
        self.display
            .clear(BinaryColor::Off)
            .map_err(|_| Error::Display)?;

        let style = MonoTextStyle::new(self.config.font, BinaryColor::On);
        let origin = self.text_origin(&style, message);
        Text::with_baseline(message, origin, style, Baseline::Alphabetic)
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;

        self.display.flush().map_err(|_| Error::Display)
    }

    /// Gives the display back.
    #[must_use]
    pub fn release(self) -> D {
        self.display
    }

    /// Baseline-left point that centers `message` on the panel.
    #[allow(
        clippy::cast_possible_wrap,
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "panel and text dimensions are far below i32::MAX"
    )]
    fn text_origin(&self, style: &MonoTextStyle<'static, BinaryColor>, message: &str) -> Point {
        let size = self.display.bounding_box().size;
        let text_width = style
            .measure_string(message, Point::zero(), Baseline::Alphabetic)
            .bounding_box
            .size
            .width;
        let x = (size.width as i32 - text_width as i32) / 2 + self.config.x_offset;
        let y = (size.height as i32 + self.config.cap_height) / 2;
        Point::new(x, y)
    }
}

// ============================================================================
// MonoFrame - in-memory panel
// ============================================================================

/// A `W`×`H` monochrome frame buffer that can stand in for a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonoFrame<const W: usize, const H: usize>(pub [[BinaryColor; W]; H]);

impl<const W: usize, const H: usize> MonoFrame<W, H> {
    /// Frame width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame height in pixels (rows).
    pub const HEIGHT: usize = H;

    /// Create a new blank (all off) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[BinaryColor::Off; W]; H])
    }

    /// Color at `(x, y)`, or `None` outside the frame.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<BinaryColor> {
        self.0.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Smallest `(min_x, min_y, max_x, max_y)` box containing every lit
    /// pixel, or `None` for a blank frame.
    #[must_use]
    pub fn lit_bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (y, row) in self.0.iter().enumerate() {
            for (x, color) in row.iter().enumerate() {
                if color.is_on() {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((min_x, min_y, max_x, max_y)) => {
                            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                        }
                    });
                }
            }
        }
        bounds
    }
}

impl<const W: usize, const H: usize> Default for MonoFrame<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for MonoFrame<W, H> {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "frame dimensions are small"
    )]
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const W: usize, const H: usize> DrawTarget for MonoFrame<W, H> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x_index), Ok(y_index)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            if let Some(pixel) = self.0.get_mut(y_index).and_then(|row| row.get_mut(x_index)) {
                *pixel = color;
            }
        }
        Ok(())
    }
}

impl<const W: usize, const H: usize> BufferedDisplay for MonoFrame<W, H> {
    fn flush(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}
