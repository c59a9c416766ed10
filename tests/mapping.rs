#![allow(missing_docs)]
//! Host-level tests for the serpentine grid mapping.

use farkle_console::progress_grid::layout::SnakeLayout;

fn assert_bijection<const W: usize, const H: usize>() {
    let mut seen = vec![false; W * H];
    for row in 0..H {
        for col in 0..W {
            let index = SnakeLayout::<W, H>::index_for(row, col);
            assert!(index < W * H, "({row}, {col}) mapped past the end");
            assert!(!seen[index], "index {index} mapped twice");
            seen[index] = true;
            assert_eq!(SnakeLayout::<W, H>::cell_for(index), (row, col));
        }
    }
    assert!(seen.iter().all(|&hit| hit));
}

#[test]
fn mapping_is_a_bijection_for_several_sizes() {
    assert_bijection::<8, 8>();
    assert_bijection::<4, 3>();
    assert_bijection::<5, 1>();
    assert_bijection::<1, 5>();
    assert_bijection::<16, 16>();
}

#[test]
fn even_rows_run_left_to_right() {
    type Grid = SnakeLayout<8, 8>;
    for row in (0..8).step_by(2) {
        for col in 0..8 {
            assert_eq!(Grid::index_for(row, col), row * 8 + col);
        }
    }
}

#[test]
fn odd_rows_run_right_to_left() {
    type Grid = SnakeLayout<8, 8>;
    for row in (1..8).step_by(2) {
        for col in 0..8 {
            assert_eq!(Grid::index_for(row, col), row * 8 + (7 - col));
        }
    }
}

#[test]
fn small_grid_matches_expected() {
    type Grid = SnakeLayout<4, 3>;
    let strip_order: Vec<(usize, usize)> = (0..Grid::LEN).map(Grid::cell_for).collect();
    assert_eq!(
        strip_order,
        [
            (0, 0),
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 3),
            (1, 2),
            (1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (2, 2),
            (2, 3),
        ]
    );
}

#[test]
#[should_panic(expected = "column out of bounds")]
fn column_past_the_edge_panics() {
    let _ = SnakeLayout::<8, 8>::index_for(0, 8);
}
