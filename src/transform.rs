//! Geometric remapping (rotate, flip, transpose) written against the method
//! suite only.
//!
//! Every operation allocates a destination through the suite, walks it with
//! a traversal, pulls each destination cell from its source coordinate and
//! frees the source. Because nothing here looks at the concrete layout, the
//! same code runs on plain and blocked grids.
use crate::error::{GridError, Result};
use crate::methods::{GridHandle, MapFn, MethodSuite};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Clockwise rotation by a multiple of 90 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn from_degrees(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(GridError::InvalidParameter(format!(
                "rotation must be 0, 90, 180 or 270, got {other}"
            ))),
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = GridError;

    fn try_from(degrees: u32) -> Result<Self> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> u32 {
        rotation.degrees()
    }
}

/// Mirror axis for [`Transform::Flip`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left to right.
    Horizontal,
    /// Mirror top to bottom.
    Vertical,
}

impl FlipAxis {
    pub fn name(self) -> &'static str {
        match self {
            FlipAxis::Horizontal => "horizontal",
            FlipAxis::Vertical => "vertical",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    Rotate(Rotation),
    Flip(FlipAxis),
    Transpose,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::Rotate(Rotation::R0)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Rotate(r) => write!(f, "rotate {}", r.degrees()),
            Transform::Flip(axis) => write!(f, "flip {}ly", axis.name()),
            Transform::Transpose => f.write_str("transpose"),
        }
    }
}

impl Transform {
    /// Destination dimensions for a `width`x`height` source.
    pub fn output_dims(self, width: usize, height: usize) -> (usize, usize) {
        match self {
            Transform::Rotate(Rotation::R90 | Rotation::R270) | Transform::Transpose => {
                (height, width)
            }
            _ => (width, height),
        }
    }

    /// Source cell feeding destination cell `(col, row)` for a
    /// `width`x`height` source.
    #[inline]
    pub fn source_coord(
        self,
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    ) -> (usize, usize) {
        match self {
            Transform::Rotate(Rotation::R0) => (col, row),
            Transform::Rotate(Rotation::R90) => (row, height - 1 - col),
            Transform::Rotate(Rotation::R180) => (width - 1 - col, height - 1 - row),
            Transform::Rotate(Rotation::R270) => (width - 1 - row, col),
            Transform::Flip(FlipAxis::Horizontal) => (width - 1 - col, row),
            Transform::Flip(FlipAxis::Vertical) => (col, height - 1 - row),
            Transform::Transpose => (row, col),
        }
    }
}

/// Apply `transform` walking the destination with `map`.
///
/// `src` is released once the copy is done; the returned grid replaces it.
/// `map` must come from `suite` (see [`MethodSuite::traversal`]).
pub fn apply_with<T: Copy>(
    suite: &MethodSuite<T>,
    map: MapFn<T>,
    src: GridHandle<T>,
    transform: Transform,
) -> Result<GridHandle<T>> {
    let start = Instant::now();
    let (width, height) = (suite.width(&src), suite.height(&src));
    let (out_w, out_h) = transform.output_dims(width, height);
    let mut dst = suite.new_grid(out_w, out_h)?;

    let mut cl = CopyContext {
        suite,
        src: &src,
        first_error: None,
    };
    map.apply(&mut dst, &mut cl, |col, row, px, cl| {
        let (sc, sr) = transform.source_coord(col, row, width, height);
        match cl.suite.at(cl.src, sc, sr) {
            Ok(value) => *px = *value,
            Err(err) => {
                cl.first_error.get_or_insert(err);
            }
        }
    })?;
    if let Some(err) = cl.first_error {
        return Err(err);
    }

    suite.free(src);
    log::debug!(
        "transform {transform} {width}x{height} -> {out_w}x{out_h} via {} map on {} layout in {:.3} ms",
        map.traversal(),
        suite.kind(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(dst)
}

/// Apply `transform` with the suite's default traversal.
pub fn apply<T: Copy>(
    suite: &MethodSuite<T>,
    src: GridHandle<T>,
    transform: Transform,
) -> Result<GridHandle<T>> {
    apply_with(suite, suite.map_default(), src, transform)
}

pub fn rotate<T: Copy>(
    suite: &MethodSuite<T>,
    src: GridHandle<T>,
    rotation: Rotation,
) -> Result<GridHandle<T>> {
    apply(suite, src, Transform::Rotate(rotation))
}

pub fn flip<T: Copy>(
    suite: &MethodSuite<T>,
    src: GridHandle<T>,
    axis: FlipAxis,
) -> Result<GridHandle<T>> {
    apply(suite, src, Transform::Flip(axis))
}

pub fn transpose<T: Copy>(suite: &MethodSuite<T>, src: GridHandle<T>) -> Result<GridHandle<T>> {
    apply(suite, src, Transform::Transpose)
}

struct CopyContext<'a, T> {
    suite: &'a MethodSuite<T>,
    src: &'a GridHandle<T>,
    first_error: Option<GridError>,
}

#[cfg(test)]
mod tests {
    use super::{apply_with, rotate, FlipAxis, Rotation, Transform};
    use crate::error::GridError;
    use crate::grid::Grid2;
    use crate::methods::{LayoutKind, MethodSuite, Traversal};

    #[test]
    fn rotation_accepts_only_right_angles() {
        assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::R270);
        assert!(matches!(
            Rotation::from_degrees(45),
            Err(GridError::InvalidParameter(_))
        ));
    }

    #[test]
    fn source_coords_match_the_documented_formulas() {
        let (w, h) = (4, 3);
        assert_eq!(Transform::Rotate(Rotation::R90).source_coord(0, 0, w, h), (0, 2));
        assert_eq!(Transform::Rotate(Rotation::R180).source_coord(0, 0, w, h), (3, 2));
        assert_eq!(Transform::Rotate(Rotation::R270).source_coord(0, 0, w, h), (3, 0));
        assert_eq!(Transform::Flip(FlipAxis::Horizontal).source_coord(1, 2, w, h), (2, 2));
        assert_eq!(Transform::Flip(FlipAxis::Vertical).source_coord(1, 2, w, h), (1, 0));
        assert_eq!(Transform::Transpose.source_coord(2, 1, w, h), (1, 2));
    }

    #[test]
    fn rotate_90_swaps_dimensions() {
        let suite = MethodSuite::<u32>::select_with(LayoutKind::BlockMajor, Some(2));
        let src = suite.new_grid(5, 2).unwrap();
        let out = rotate(&suite, src, Rotation::R90).unwrap();
        assert_eq!((out.width(), out.height()), (2, 5));
    }

    #[test]
    fn explicit_traversal_gives_the_same_image() {
        let suite = MethodSuite::<u32>::select(LayoutKind::RowMajor);
        let mut a = suite.new_grid(4, 3).unwrap();
        suite
            .map_default()
            .apply(&mut a, &mut (), |col, row, v, _| *v = (row * 4 + col) as u32)
            .unwrap();
        let b = a.clone();

        let by_row = apply_with(&suite, suite.map_default(), a, Transform::Rotate(Rotation::R270))
            .unwrap();
        let by_col = apply_with(
            &suite,
            suite.traversal(Traversal::ColMajor).unwrap(),
            b,
            Transform::Rotate(Rotation::R270),
        )
        .unwrap();
        assert_eq!(by_row, by_col);
        // Top-left of a 270 rotation is the source's top-right corner.
        assert_eq!(*by_row.at(0, 0).unwrap(), 3);
    }

    #[test]
    fn display_matches_timing_labels() {
        assert_eq!(Transform::Rotate(Rotation::R90).to_string(), "rotate 90");
        assert_eq!(Transform::Flip(FlipAxis::Vertical).to_string(), "flip vertically");
        assert_eq!(Transform::Transpose.to_string(), "transpose");
    }
}
