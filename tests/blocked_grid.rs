mod common;

use blocked_grid::grid::{auto_blocksize, BlockedGrid, Grid2};
use blocked_grid::GridError;
use std::collections::HashSet;

/// (width, height, blocksize) combinations covering blocksize 1, tiles larger
/// than the grid and dimensions that are not multiples of the blocksize.
const SHAPES: &[(usize, usize, usize)] = &[
    (1, 1, 1),
    (6, 4, 1),
    (8, 8, 4),
    (7, 5, 3),
    (5, 7, 3),
    (3, 2, 2),
    (3, 2, 16),
    (17, 3, 4),
    (2, 19, 5),
    (33, 31, 8),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Huge([u8; 65_537]);

impl Default for Huge {
    fn default() -> Self {
        Huge([0; 65_537])
    }
}

#[test]
fn distinct_coordinates_get_distinct_slots() {
    for &(w, h, b) in SHAPES {
        let grid: BlockedGrid<u8> = BlockedGrid::new(w, h, b).unwrap();
        let mut offsets = HashSet::new();
        for row in 0..h {
            for col in 0..w {
                let off = grid.offset(col, row).unwrap();
                assert!(
                    offsets.insert(off),
                    "{w}x{h} b={b}: ({col},{row}) shares slot {off}"
                );
                assert!(off < grid.capacity());
            }
        }
        assert_eq!(offsets.len(), w * h);
    }
}

#[test]
fn every_cell_round_trips() {
    for &(w, h, b) in SHAPES {
        let mut grid: BlockedGrid<u64> = BlockedGrid::new(w, h, b).unwrap();
        for row in 0..h {
            for col in 0..w {
                *grid.at_mut(col, row).unwrap() = (row * 1000 + col) as u64;
            }
        }
        for row in 0..h {
            for col in 0..w {
                assert_eq!(
                    *grid.at(col, row).unwrap(),
                    (row * 1000 + col) as u64,
                    "{w}x{h} b={b} ({col},{row})"
                );
            }
        }
        // Corners explicitly.
        for &(col, row) in &[(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            *grid.at_mut(col, row).unwrap() = u64::MAX;
            assert_eq!(*grid.at(col, row).unwrap(), u64::MAX);
        }
    }
}

#[test]
fn traversal_visits_each_cell_exactly_once() {
    for &(w, h, b) in SHAPES {
        let mut grid: BlockedGrid<u32> = BlockedGrid::new(w, h, b).unwrap();
        let mut seen = HashSet::new();
        grid.map(&mut seen, |col, row, v, seen| {
            assert!(col < w && row < h, "padding cell ({col},{row}) visited");
            assert!(seen.insert((col, row)), "({col},{row}) visited twice");
            *v += 1;
        });
        assert_eq!(seen.len(), w * h, "{w}x{h} b={b}");
        for row in 0..h {
            for col in 0..w {
                assert_eq!(*grid.at(col, row).unwrap(), 1);
            }
        }
    }
}

#[test]
fn traversal_finishes_each_tile_before_the_next() {
    for &(w, h, b) in SHAPES {
        let mut grid: BlockedGrid<u8> = BlockedGrid::new(w, h, b).unwrap();
        let mut tiles = Vec::new();
        let (_, tiles_y) = grid.tile_dims();
        grid.map(&mut tiles, |col, row, _, tiles| {
            tiles.push((col / b) * tiles_y + row / b)
        });
        for pair in tiles.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "{w}x{h} b={b}: tile {} revisited after {}",
                pair[0],
                pair[1]
            );
        }
        let runs = 1 + tiles.windows(2).filter(|p| p[0] != p[1]).count();
        let distinct: HashSet<usize> = tiles.iter().copied().collect();
        assert_eq!(runs, distinct.len(), "{w}x{h} b={b}: a tile was split");
    }
}

#[test]
fn tile_index_agrees_with_traversal() {
    let mut grid: BlockedGrid<u8> = BlockedGrid::new(10, 7, 3).unwrap();
    let mut visits = Vec::new();
    grid.map(&mut visits, |col, row, _, visits| visits.push((col, row)));
    let ids: Vec<usize> = visits
        .iter()
        .map(|&(col, row)| grid.tile_index(col, row).unwrap())
        .collect();
    assert!(ids.windows(2).all(|p| p[0] <= p[1]));
    assert_eq!(*ids.last().unwrap(), 4 * 3 - 1);
}

#[test]
fn oversized_elements_get_single_cell_tiles() {
    assert_eq!(auto_blocksize(65_536 + 1), 1);
    let grid: BlockedGrid<Huge> = BlockedGrid::with_auto_blocksize(1, 2).unwrap();
    assert_eq!(grid.blocksize(), 1);
    assert_eq!(grid.element_size(), 65_537);
}

#[test]
fn auto_blocksize_for_rgb_pixels() {
    let grid: BlockedGrid<[u8; 3]> = BlockedGrid::with_auto_blocksize(4, 4).unwrap();
    assert_eq!(grid.blocksize(), 147);
    assert_eq!(grid.capacity(), 147 * 147);
}

#[test]
fn zero_blocksize_and_out_of_range_access_fail() {
    assert!(matches!(
        BlockedGrid::<u32>::new(3, 3, 0),
        Err(GridError::InvalidParameter(_))
    ));

    let mut grid: BlockedGrid<u32> = BlockedGrid::new(3, 2, 2).unwrap();
    assert_eq!(
        grid.at(3, 0).unwrap_err(),
        GridError::OutOfRange {
            col: 3,
            row: 0,
            width: 3,
            height: 2
        }
    );
    assert!(matches!(grid.at_mut(0, 2), Err(GridError::OutOfRange { .. })));
    assert!(matches!(grid.tile_index(3, 0), Err(GridError::OutOfRange { .. })));
}
