#![allow(missing_docs)]
//! Host-level tests for progress bar drawing and output.

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use farkle_console::{
    Error,
    progress_grid::{
        GOLDEN_HUE_STEP, Gamma, ProgressGrid, ProgressGridConfig, SnakeLayout, color_hsv,
        output_table,
    },
};
use smart_leds::{RGB8, SmartLedsWrite};

const BLACK: RGB8 = RGB8::new(0, 0, 0);
const RED: RGB8 = RGB8::new(255, 0, 0);
const GREEN_HUE: u16 = 21_845;
const BLUE_HUE: u16 = 43_690;

/// Records every frame written to it.
#[derive(Clone, Default)]
struct RecordingStrip {
    frames: Rc<RefCell<Vec<Vec<RGB8>>>>,
}

impl RecordingStrip {
    fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    fn last_frame(&self) -> Vec<RGB8> {
        self.frames.borrow().last().cloned().unwrap_or_default()
    }
}

impl SmartLedsWrite for RecordingStrip {
    type Error = Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let frame = iterator.into_iter().map(Into::into).collect();
        self.frames.borrow_mut().push(frame);
        Ok(())
    }
}

fn linear_grid() -> (ProgressGrid<RecordingStrip>, RecordingStrip) {
    let strip = RecordingStrip::default();
    let grid = ProgressGrid::new(
        strip.clone(),
        ProgressGridConfig {
            gamma: Gamma::Linear,
            ..ProgressGridConfig::default()
        },
    )
    .unwrap();
    (grid, strip)
}

#[test]
fn new_writes_a_blank_frame() {
    let (_grid, strip) = linear_grid();
    assert_eq!(strip.frame_count(), 1);
    assert_eq!(strip.last_frame(), vec![BLACK; 64]);
}

#[test]
fn half_row_lights_four_pixels() {
    let (mut grid, _strip) = linear_grid();
    grid.illuminate_row(0, 0, 0.5);

    for col in 0..4 {
        assert_eq!(grid.pixel(0, col), RED, "col {col}");
    }
    // Boundary pixel at brightness 0.
    assert_eq!(grid.pixel(0, 4), BLACK);
    for col in 5..8 {
        assert_eq!(grid.pixel(0, col), BLACK, "col {col}");
    }
}

#[test]
fn exact_multiple_leaves_boundary_dark() {
    let (mut grid, _strip) = linear_grid();
    grid.illuminate_row(2, 0, 0.625);

    for col in 0..5 {
        assert_eq!(grid.pixel(2, col), RED, "col {col}");
    }
    assert_eq!(grid.pixel(2, 5), BLACK);
}

#[test]
fn boundary_pixel_carries_the_remainder() {
    let (mut grid, _strip) = linear_grid();
    // 0.55 * 8 = 4.4, so the boundary is at floor(0.4 * 256) = 102.
    grid.illuminate_row(0, 0, 0.55);

    assert_eq!(grid.pixel(0, 3), RED);
    assert_eq!(grid.pixel(0, 4), color_hsv(0, 255, 102));
    assert_eq!(grid.pixel(0, 4).r, 102);
}

#[test]
fn full_row_stays_in_its_row() {
    let (mut grid, _strip) = linear_grid();
    grid.illuminate_row(1, BLUE_HUE, 0.25);
    let row_1_before: Vec<RGB8> = (0..8).map(|col| grid.pixel(1, col)).collect();

    grid.illuminate_row(0, 0, 1.0);

    for col in 0..8 {
        assert_eq!(grid.pixel(0, col), RED, "col {col}");
    }
    let row_1_after: Vec<RGB8> = (0..8).map(|col| grid.pixel(1, col)).collect();
    assert_eq!(row_1_before, row_1_after);
}

#[test]
fn out_of_range_ratios_are_clamped() {
    let (mut grid, _strip) = linear_grid();
    grid.illuminate_row(0, 0, 1.7);
    grid.illuminate_row(1, 0, -0.3);

    assert!((0..8).all(|col| grid.pixel(0, col) == RED));
    assert!((0..8).all(|col| grid.pixel(1, col) == BLACK));
    assert_eq!(grid.pixel(2, 0), BLACK);
}

#[test]
fn nan_ratio_only_darkens_the_first_column() {
    let (mut grid, _strip) = linear_grid();
    grid.illuminate_row(6, BLUE_HUE, 1.0);
    grid.illuminate_row(6, 0, f32::NAN);

    assert_eq!(grid.pixel(6, 0), BLACK);
    let blue = color_hsv(BLUE_HUE, 255, 255);
    for col in 1..8 {
        assert_eq!(grid.pixel(6, col), blue, "col {col}");
    }
}

#[test]
fn odd_rows_fill_from_the_left_edge() {
    let (mut grid, _strip) = linear_grid();
    grid.illuminate_row(1, 0, 0.25);

    // Row 1 runs right-to-left along the strip: col 0 is LED 15.
    let pixels = grid.pixels();
    assert_eq!(pixels[15], RED);
    assert_eq!(pixels[14], RED);
    assert_eq!(pixels[13], BLACK);
    assert_eq!(pixels[8], BLACK);
    assert_eq!(SnakeLayout::<8, 8>::index_for(1, 1), 14);
}

#[test]
fn drawing_does_not_write_until_show() {
    let (mut grid, strip) = linear_grid();
    grid.illuminate_row(0, 0, 1.0);
    assert_eq!(strip.frame_count(), 1);

    grid.show().unwrap();
    assert_eq!(strip.frame_count(), 2);
    let frame = strip.last_frame();
    assert_eq!(frame.len(), 64);
    assert!(frame[..8].iter().all(|&pixel| pixel == RED));
    assert!(frame[8..].iter().all(|&pixel| pixel == BLACK));
}

#[test]
fn show_applies_brightness_limit() {
    let strip = RecordingStrip::default();
    let mut grid: ProgressGrid<RecordingStrip> = ProgressGrid::new(
        strip.clone(),
        ProgressGridConfig {
            gamma: Gamma::Linear,
            max_brightness: 128,
        },
    )
    .unwrap();
    grid.illuminate_row(0, 0, 1.0);
    grid.show().unwrap();

    assert_eq!(strip.last_frame()[0], RGB8::new(128, 0, 0));
    // The buffer itself keeps full-scale colors.
    assert_eq!(grid.pixel(0, 0), RED);
}

#[test]
fn clear_row_and_clear_blank_the_buffer() {
    let (mut grid, _strip) = linear_grid();
    grid.illuminate_row(0, 0, 1.0);
    grid.illuminate_row(3, GREEN_HUE, 1.0);

    grid.clear_row(0);
    assert!((0..8).all(|col| grid.pixel(0, col) == BLACK));
    assert_eq!(grid.pixel(3, 7), color_hsv(GREEN_HUE, 255, 255));

    grid.clear();
    assert!(grid.pixels().iter().all(|&pixel| pixel == BLACK));
}

#[test]
fn demo_spaces_row_hues_by_golden_step() {
    let (mut grid, strip) = linear_grid();
    let hue_offset = 1_234;
    grid.show_demo(hue_offset, &[1.0; 8]).unwrap();

    let mut hue = hue_offset;
    for row in 0..8 {
        assert_eq!(grid.pixel(row, 0), color_hsv(hue, 255, 255), "row {row}");
        hue = hue.wrapping_add(GOLDEN_HUE_STEP);
    }
    assert_eq!(strip.frame_count(), 2);
}

#[test]
fn golden_step_matches_the_float_row_spacing() {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "65536 * 1.618 is positive and below u32::MAX"
    )]
    let float_step = (65_536.0_f64 * 1.618) as u32 % 65_536;
    assert_eq!(u32::from(GOLDEN_HUE_STEP), float_step);
}

#[test]
fn hue_wheel_primaries() {
    assert_eq!(color_hsv(0, 255, 255), RED);
    assert_eq!(color_hsv(GREEN_HUE, 255, 255), RGB8::new(0, 255, 0));
    assert_eq!(color_hsv(BLUE_HUE, 255, 255), RGB8::new(0, 0, 255));
    assert_eq!(color_hsv(GREEN_HUE, 0, 255), RGB8::new(255, 255, 255));
    assert_eq!(color_hsv(BLUE_HUE, 255, 0), BLACK);
}

#[test]
fn output_tables_keep_the_ends() {
    let linear = output_table(Gamma::Linear, 255);
    assert_eq!(linear[0], 0);
    assert_eq!(linear[100], 100);
    assert_eq!(linear[255], 255);

    let gamma = output_table(Gamma::Gamma2_2, 255);
    assert_eq!(gamma[0], 0);
    assert!(gamma[128] < 128);
    assert_eq!(gamma[255], 255);
}

struct FailingStrip;

impl SmartLedsWrite for FailingStrip {
    type Error = ();
    type Color = RGB8;

    fn write<T, I>(&mut self, _iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        Err(())
    }
}

#[test]
fn driver_errors_are_reported() {
    let result: Result<ProgressGrid<FailingStrip>, Error> =
        ProgressGrid::new(FailingStrip, ProgressGridConfig::default());
    assert!(matches!(result, Err(Error::LedWrite)));
}
