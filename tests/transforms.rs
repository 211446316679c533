mod common;

use blocked_grid::transform::{self, FlipAxis, Rotation, Transform};
use blocked_grid::{Grid2, LayoutKind, MethodSuite, Traversal};
use common::synthetic_image::{numbered_grid, same_cells};

fn suites() -> Vec<MethodSuite<u32>> {
    vec![
        MethodSuite::select(LayoutKind::RowMajor),
        MethodSuite::select(LayoutKind::ColumnMajor),
        MethodSuite::select(LayoutKind::BlockMajor),
        MethodSuite::select_with(LayoutKind::BlockMajor, Some(1)),
        MethodSuite::select_with(LayoutKind::BlockMajor, Some(3)),
    ]
}

#[test]
fn four_quarter_turns_restore_the_grid() {
    for suite in suites() {
        for &(w, h) in &[(1, 1), (3, 2), (7, 5), (4, 9)] {
            let original = numbered_grid(&suite, w, h);
            let mut grid = original.clone();
            for _ in 0..4 {
                grid = transform::rotate(&suite, grid, Rotation::R90).unwrap();
            }
            assert!(same_cells(&grid, &original), "{:?} {w}x{h}", suite.kind());
        }
    }
}

#[test]
fn double_flip_and_double_transpose_restore_the_grid() {
    for suite in suites() {
        let original = numbered_grid(&suite, 6, 5);
        for axis in [FlipAxis::Horizontal, FlipAxis::Vertical] {
            let once = transform::flip(&suite, original.clone(), axis).unwrap();
            assert!(!same_cells(&once, &original));
            let twice = transform::flip(&suite, once, axis).unwrap();
            assert!(same_cells(&twice, &original), "{:?} {axis:?}", suite.kind());
        }

        let once = transform::transpose(&suite, original.clone()).unwrap();
        assert_eq!((once.width(), once.height()), (5, 6));
        let twice = transform::transpose(&suite, once).unwrap();
        assert!(same_cells(&twice, &original), "{:?} transpose", suite.kind());
    }
}

#[test]
fn rotations_compose() {
    for suite in suites() {
        let original = numbered_grid(&suite, 5, 3);
        let half = transform::rotate(&suite, original.clone(), Rotation::R180).unwrap();
        let two_quarters = transform::rotate(
            &suite,
            transform::rotate(&suite, original.clone(), Rotation::R90).unwrap(),
            Rotation::R90,
        )
        .unwrap();
        assert!(same_cells(&half, &two_quarters));

        let three_quarters = transform::rotate(&suite, half, Rotation::R90).unwrap();
        let direct = transform::rotate(&suite, original.clone(), Rotation::R270).unwrap();
        assert!(same_cells(&three_quarters, &direct));

        let identity = transform::rotate(&suite, original.clone(), Rotation::R0).unwrap();
        assert!(same_cells(&identity, &original));
    }
}

#[test]
fn layouts_agree_on_every_transform() {
    let reference_suite = MethodSuite::<u32>::select(LayoutKind::RowMajor);
    let transforms = [
        Transform::Rotate(Rotation::R90),
        Transform::Rotate(Rotation::R180),
        Transform::Rotate(Rotation::R270),
        Transform::Flip(FlipAxis::Horizontal),
        Transform::Flip(FlipAxis::Vertical),
        Transform::Transpose,
    ];
    for t in transforms {
        let expected =
            transform::apply(&reference_suite, numbered_grid(&reference_suite, 7, 4), t).unwrap();
        for suite in suites() {
            let got = transform::apply(&suite, numbered_grid(&suite, 7, 4), t).unwrap();
            assert!(same_cells(&got, &expected), "{t} on {:?}", suite.kind());
        }
    }
}

#[test]
fn three_by_two_rotation_scenario() {
    let suite = MethodSuite::<u32>::select_with(LayoutKind::BlockMajor, Some(2));
    let original = numbered_grid(&suite, 3, 2);
    assert_eq!(suite.element_size(&original), 4);
    let expected_origin = *suite.at(&original, 0, 1).unwrap();

    let rotated = transform::rotate(&suite, original, Rotation::R90).unwrap();
    assert_eq!(suite.width(&rotated), 2);
    assert_eq!(suite.height(&rotated), 3);
    assert_eq!(*suite.at(&rotated, 0, 0).unwrap(), expected_origin);
    assert_eq!(expected_origin, 3);

    let cells: Vec<u32> = (0..3)
        .flat_map(|row| (0..2).map(move |col| (col, row)))
        .map(|(col, row)| *suite.at(&rotated, col, row).unwrap())
        .collect();
    assert_eq!(cells, vec![3, 0, 4, 1, 5, 2]);
}

#[test]
fn non_default_traversals_produce_the_same_result() {
    let suite = MethodSuite::<u32>::select(LayoutKind::ColumnMajor);
    for traversal in [Traversal::RowMajor, Traversal::ColMajor] {
        let map = suite.traversal(traversal).unwrap();
        let got = transform::apply_with(
            &suite,
            map,
            numbered_grid(&suite, 4, 6),
            Transform::Transpose,
        )
        .unwrap();
        assert_eq!(*got.at(5, 3).unwrap(), 5 * 4 + 3, "{traversal}");
    }
}
