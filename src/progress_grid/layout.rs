//! Compile-time description of a serpentine-wired LED grid.
//!
//! See [`SnakeLayout`] for the mapping and examples.

/// Row-major serpentine wiring of a `W`×`H` LED grid.
///
/// The strip enters at the top-left corner, runs left-to-right along row 0,
/// turns, runs right-to-left along row 1, and keeps alternating:
///
/// ```text
/// 4×3 grid (LED index at each (row, col)):
///   LED0   LED1   LED2   LED3
///   LED7   LED6   LED5   LED4
///   LED8   LED9   LED10  LED11
/// ```
///
/// The mapping is a bijection between `{0..H}×{0..W}` and `{0..W*H}`;
/// [`cell_for`](Self::cell_for) is the inverse of [`index_for`](Self::index_for).
///
/// # Example
///
/// ```rust
/// use farkle_console::progress_grid::layout::SnakeLayout;
///
/// type Grid = SnakeLayout<8, 8>;
///
/// const _: () = assert!(Grid::index_for(0, 3) == 3);
/// const _: () = assert!(Grid::index_for(1, 0) == 15); // odd rows run backwards
/// assert_eq!(Grid::cell_for(15), (1, 0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnakeLayout<const W: usize, const H: usize>;

impl<const W: usize, const H: usize> SnakeLayout<W, H> {
    /// Number of columns (LEDs per row).
    pub const WIDTH: usize = W;
    /// Number of rows.
    pub const HEIGHT: usize = H;
    /// Total number of LEDs.
    pub const LEN: usize = W * H;

    /// Strip index of the LED at `(row, col)`.
    ///
    /// Even rows run left-to-right, odd rows right-to-left.
    ///
    /// # Panics
    ///
    /// Panics if `row >= H` or `col >= W`.
    #[must_use]
    #[allow(
        clippy::arithmetic_side_effects,
        reason = "row < H and col < W are asserted, so the index stays below W * H"
    )]
    pub const fn index_for(row: usize, col: usize) -> usize {
        assert!(row < H, "row out of bounds");
        assert!(col < W, "column out of bounds");
        let offset = if row % 2 == 0 { col } else { W - 1 - col };
        row * W + offset
    }

    /// `(row, col)` of the LED at strip index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= W * H`.
    #[must_use]
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "index < W * H is asserted, so W > 0 and offset < W"
    )]
    pub const fn cell_for(index: usize) -> (usize, usize) {
        assert!(index < W * H, "index out of bounds");
        let row = index / W;
        let offset = index % W;
        let col = if row % 2 == 0 { offset } else { W - 1 - offset };
        (row, col)
    }
}
