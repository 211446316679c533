use crate::error::{GridError, Result};

/// Shape and element access shared by every grid layout.
///
/// Coordinates are `(col, row)`: `col` runs along the width, `row` along
/// the height. Implementations check bounds once, in [`Grid2::at`] and
/// [`Grid2::at_mut`]; references they hand out need no further checks.
pub trait Grid2 {
    type Element;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Bytes per element.
    fn element_size(&self) -> usize {
        std::mem::size_of::<Self::Element>()
    }

    fn at(&self, col: usize, row: usize) -> Result<&Self::Element>;
    fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut Self::Element>;

    #[inline]
    fn contains(&self, col: usize, row: usize) -> bool {
        col < self.width() && row < self.height()
    }

    /// Number of addressable cells (`width * height`).
    #[inline]
    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }
}

/// Builds the `OutOfRange` error for `(col, row)` on a `width`x`height` grid.
#[inline]
pub(crate) fn out_of_range(col: usize, row: usize, width: usize, height: usize) -> GridError {
    GridError::OutOfRange {
        col,
        row,
        width,
        height,
    }
}
