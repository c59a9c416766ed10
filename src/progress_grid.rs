//! A device abstraction for a serpentine-wired NeoPixel-style (WS2812) LED
//! grid used as a set of horizontal progress bars, one per row.
//!
//! Rows fill left-to-right. A row at ratio `r` lights `floor(r * W)` pixels
//! at full brightness plus one dimmed boundary pixel whose brightness is the
//! leftover fraction, so the bar appears to move smoothly between pixels.
//!
//! ```text
//! 8-wide row at ratio 0.55 (0.55 * 8 = 4.4):
//!   ████ ▒ · · ·
//!   ^^^^ full   (columns 0..=3)
//!        ^ boundary at brightness floor(0.4 * 256) = 102
//! ```
//!
//! See [`ProgressGrid`] for usage example.

pub mod color;
pub mod layout;

use smart_leds::{RGB8, SmartLedsWrite};

pub use color::{GOLDEN_HUE_STEP, Gamma, color_hsv, output_table};
pub use layout::SnakeLayout;

use crate::{Error, Result};

/// Default brightness limit applied when the grid is shown (full scale).
pub const DEFAULT_MAX_BRIGHTNESS: u8 = 255;

const BLACK: RGB8 = RGB8::new(0, 0, 0);

/// Runtime settings for a [`ProgressGrid`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProgressGridConfig {
    /// Output gamma curve.
    pub gamma: Gamma,
    /// Every channel is scaled to at most this value on output.
    pub max_brightness: u8,
}

impl Default for ProgressGridConfig {
    fn default() -> Self {
        Self {
            gamma: Gamma::default(),
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
        }
    }
}

/// A `W`×`H` serpentine LED grid (8×8 by default) driven through any
/// [`SmartLedsWrite`] driver.
///
/// Drawing calls only change the in-memory buffer; call
/// [`show`](Self::show) to send it to the LEDs.
///
/// # Example
///
/// ```rust,no_run
/// use farkle_console::progress_grid::{ProgressGrid, ProgressGridConfig};
/// # use core::convert::Infallible;
/// # use smart_leds::{RGB8, SmartLedsWrite};
/// # struct Ws2812;
/// # impl SmartLedsWrite for Ws2812 {
/// #     type Error = Infallible;
/// #     type Color = RGB8;
/// #     fn write<T, I>(&mut self, _: T) -> Result<(), Infallible>
/// #     where T: IntoIterator<Item = I>, I: Into<RGB8> { Ok(()) }
/// # }
/// # fn example(ws2812: Ws2812) -> farkle_console::Result<()> {
/// let mut grid: ProgressGrid<Ws2812> = ProgressGrid::new(ws2812, ProgressGridConfig::default())?;
///
/// // Player 1 (row 0) is 3/4 of the way to the winning score; player 2 a third.
/// grid.illuminate_row(0, 0, 0.75);
/// grid.illuminate_row(1, 21_845, 1.0 / 3.0);
/// grid.show()?;
/// # Ok(())
/// # }
/// ```
pub struct ProgressGrid<D, const W: usize = 8, const H: usize = 8> {
    driver: D,
    // Strip order: flattened, `frame[i / W][i % W]` is LED `i`.
    frame: [[RGB8; W]; H],
    output_table: [u8; 256],
}

impl<D, const W: usize, const H: usize> ProgressGrid<D, W, H>
where
    D: SmartLedsWrite,
    D::Color: From<RGB8>,
{
    /// Number of LEDs in the grid.
    pub const LEN: usize = W * H;

    /// Creates the grid and turns every LED off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedWrite`] if the driver rejects the blank frame.
    pub fn new(driver: D, config: ProgressGridConfig) -> Result<Self> {
        let mut grid = Self {
            driver,
            frame: [[BLACK; W]; H],
            output_table: output_table(config.gamma, config.max_brightness),
        };
        grid.show()?;
        info!("ProgressGrid: {}x{} grid ready", W, H);
        Ok(grid)
    }

    /// Fills `row` to `ratio` (0.0 to 1.0) in the color at `hue` (16-bit wheel).
    ///
    /// Columns `0..floor(ratio * W)` get full brightness. The next column,
    /// if there is one, gets the leftover fraction scaled to 0-255. Other
    /// columns of the row are left as they were. Ratios outside 0.0..=1.0
    /// are clamped, so a full row never spills into the next one.
    ///
    /// # Panics
    ///
    /// Panics if `row >= H`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        clippy::arithmetic_side_effects,
        reason = "ratio is clamped to 0.0..=1.0, so products stay within 0..=W and 0..=256"
    )]
    pub fn illuminate_row(&mut self, row: usize, hue: u16, ratio: f32) {
        assert!(row < H, "row out of bounds");
        let ratio = ratio.clamp(0.0, 1.0);
        let filled = ratio * W as f32;
        let full = (filled as usize).min(W);
        let remainder = filled - full as f32;
        let boundary_brightness = (remainder * 256.0) as u8;

        for col in 0..full {
            self.set_pixel(row, col, color_hsv(hue, 255, 255));
        }
        if full < W {
            self.set_pixel(row, full, color_hsv(hue, 255, boundary_brightness));
        }
    }

    /// Turns every LED of `row` off (in the buffer).
    ///
    /// # Panics
    ///
    /// Panics if `row >= H`.
    pub fn clear_row(&mut self, row: usize) {
        for col in 0..W {
            self.set_pixel(row, col, BLACK);
        }
    }

    /// Turns every LED off (in the buffer).
    pub fn clear(&mut self) {
        self.frame = [[BLACK; W]; H];
    }

    /// Start-up pattern: row `i` fills to `ratios[i]`, with hues spaced by
    /// [`GOLDEN_HUE_STEP`] starting at `hue_offset`. The grid is then shown.
    ///
    /// Pass random values for a different pattern on every boot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedWrite`] if the driver rejects the frame.
    pub fn show_demo(&mut self, hue_offset: u16, ratios: &[f32; H]) -> Result<()> {
        let mut hue = hue_offset;
        for (row, &ratio) in ratios.iter().enumerate() {
            self.illuminate_row(row, hue, ratio);
            hue = hue.wrapping_add(GOLDEN_HUE_STEP);
        }
        self.show()
    }

    /// Sends the buffer to the LEDs, in strip order, through the gamma and
    /// brightness table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedWrite`] if the driver rejects the frame.
    #[allow(
        clippy::indexing_slicing,
        reason = "the table has 256 entries and channels are u8"
    )]
    pub fn show(&mut self) -> Result<()> {
        let table = &self.output_table;
        let pixels = self.frame.as_flattened().iter().map(|pixel| RGB8 {
            r: table[usize::from(pixel.r)],
            g: table[usize::from(pixel.g)],
            b: table[usize::from(pixel.b)],
        });
        self.driver.write(pixels).map_err(|_| Error::LedWrite)
    }

    /// Buffered color of the LED at `(row, col)`, before gamma and brightness.
    ///
    /// # Panics
    ///
    /// Panics if `row >= H` or `col >= W`.
    #[must_use]
    #[allow(
        clippy::indexing_slicing,
        reason = "index_for asserts the bounds and returns an index below W * H"
    )]
    pub fn pixel(&self, row: usize, col: usize) -> RGB8 {
        let index = SnakeLayout::<W, H>::index_for(row, col);
        self.pixels()[index]
    }

    /// The whole buffer in strip order, before gamma and brightness.
    #[must_use]
    pub fn pixels(&self) -> &[RGB8] {
        self.frame.as_flattened()
    }

    /// Gives the driver back.
    #[must_use]
    pub fn release(self) -> D {
        self.driver
    }

    #[allow(
        clippy::indexing_slicing,
        reason = "index_for asserts the bounds and returns an index below W * H"
    )]
    fn set_pixel(&mut self, row: usize, col: usize, color: RGB8) {
        let index = SnakeLayout::<W, H>::index_for(row, col);
        self.frame.as_flattened_mut()[index] = color;
    }
}
