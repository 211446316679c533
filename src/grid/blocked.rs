//! Block-major (tiled) grid storage.
//!
//! Cells are grouped into `b`x`b` tiles, where `b` is the blocksize. Each
//! tile is stored contiguously and row-major inside, so a traversal that
//! finishes one tile before starting the next touches memory sequentially.
//!
//! The backing store is padded to whole tiles:
//! `ceil(width / b) * ceil(height / b) * b * b` slots. A cell `(col, row)`
//! lives at
//!
//! ```text
//! b * height * (col / b) + b * b * (row / b) + (col % b) + b * (row % b)
//! ```
//!
//! The tile-column stride is `b * height` with the declared height, not the
//! padded one. Each tile column therefore packs its valid cells into exactly
//! `b * height` slots and partial tiles at the bottom edge overlap the
//! padding of the allocation. The mapping stays collision-free; the slots
//! past `b * height * ceil(width / b)` are allocated but never addressed.
use super::traits::{out_of_range, Grid2};
use crate::error::{GridError, Result};
use crate::store::Store;

/// Per-tile footprint targeted by [`auto_blocksize`].
pub const TILE_BUDGET_BYTES: usize = 64 * 1024;

/// Largest blocksize whose tile (`b * b * element_size` bytes) fits in
/// [`TILE_BUDGET_BYTES`]. Returns 1 when a single element is already larger.
/// Zero-sized elements are budgeted as one byte.
pub fn auto_blocksize(element_size: usize) -> usize {
    let element_size = element_size.max(1);
    if element_size > TILE_BUDGET_BYTES {
        return 1;
    }
    let cap = TILE_BUDGET_BYTES / element_size;
    let mut b = (cap as f64).sqrt() as usize;
    // Float sqrt can land one off for large inputs.
    while b * b > cap {
        b -= 1;
    }
    while (b + 1) * (b + 1) <= cap {
        b += 1;
    }
    b.max(1)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockedGrid<T> {
    width: usize,
    height: usize,
    blocksize: usize,
    store: Store<T>,
}

impl<T: Clone + Default> BlockedGrid<T> {
    /// Allocate a `width`x`height` grid tiled with `blocksize`x`blocksize`
    /// blocks.
    ///
    /// Fails with [`GridError::InvalidParameter`] when `blocksize` is zero and
    /// with [`GridError::AllocationFailure`] when the padded store cannot be
    /// obtained.
    pub fn new(width: usize, height: usize, blocksize: usize) -> Result<Self> {
        if blocksize < 1 {
            return Err(GridError::InvalidParameter(format!(
                "blocksize must be at least 1, got {blocksize}"
            )));
        }
        let len = padded_len(width, height, blocksize).ok_or(GridError::AllocationFailure {
            elements: usize::MAX,
            element_size: std::mem::size_of::<T>(),
        })?;
        let store = Store::allocate(len, T::default())?;
        log::debug!(
            "BlockedGrid::new {width}x{height} blocksize={blocksize} capacity={len} element_size={}",
            std::mem::size_of::<T>()
        );
        Ok(Self {
            width,
            height,
            blocksize,
            store,
        })
    }

    /// Like [`BlockedGrid::new`] with the blocksize picked by
    /// [`auto_blocksize`] for `T`.
    pub fn with_auto_blocksize(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, auto_blocksize(std::mem::size_of::<T>()))
    }
}

/// `b * b * ceil(width / b) * ceil(height / b)`, or `None` on overflow.
fn padded_len(width: usize, height: usize, b: usize) -> Option<usize> {
    let tiles_x = width.div_ceil(b);
    let tiles_y = height.div_ceil(b);
    b.checked_mul(b)?
        .checked_mul(tiles_x)?
        .checked_mul(tiles_y)
}

impl<T> BlockedGrid<T> {
    #[inline]
    pub fn blocksize(&self) -> usize {
        self.blocksize
    }

    /// Allocated slot count, padding included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Number of tile columns and tile rows.
    #[inline]
    pub fn tile_dims(&self) -> (usize, usize) {
        (
            self.width.div_ceil(self.blocksize),
            self.height.div_ceil(self.blocksize),
        )
    }

    /// Position of the tile holding `(col, row)` in traversal order.
    pub fn tile_index(&self, col: usize, row: usize) -> Result<usize> {
        if !self.contains(col, row) {
            return Err(out_of_range(col, row, self.width, self.height));
        }
        let (_, tiles_y) = self.tile_dims();
        Ok((col / self.blocksize) * tiles_y + row / self.blocksize)
    }

    /// Unchecked block-major offset; callers guarantee `(col, row)` is valid.
    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        let b = self.blocksize;
        b * self.height * (col / b) + b * b * (row / b) + (col % b) + b * (row % b)
    }

    /// Linear slot offset for `(col, row)`.
    pub fn offset(&self, col: usize, row: usize) -> Result<usize> {
        if !self.contains(col, row) {
            return Err(out_of_range(col, row, self.width, self.height));
        }
        Ok(self.index(col, row))
    }

    /// Visit every cell tile by tile.
    ///
    /// Tiles are taken column by column (every tile row of tile column 0,
    /// then tile column 1, ...). Inside a tile cells go row by row, left to
    /// right. All cells of one tile are visited before any cell of the next;
    /// padding cells outside `width`x`height` are skipped.
    ///
    /// `visit` receives `(col, row, element, cl)` and may overwrite the
    /// element.
    pub fn map<C, F>(&mut self, cl: &mut C, mut visit: F)
    where
        F: FnMut(usize, usize, &mut T, &mut C),
    {
        let b = self.blocksize;
        let (tiles_x, tiles_y) = self.tile_dims();
        for tile_col in 0..tiles_x {
            for tile_row in 0..tiles_y {
                for i in 0..b {
                    let row = tile_row * b + i;
                    if row >= self.height {
                        break;
                    }
                    for j in 0..b {
                        let col = tile_col * b + j;
                        if col >= self.width {
                            break;
                        }
                        let idx = self.index(col, row);
                        if let Some(elem) = self.store.slot_mut(idx) {
                    visit(col, row, elem, cl);
                }
                    }
                }
            }
        }
    }
}

impl<T> Grid2 for BlockedGrid<T> {
    type Element = T;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    fn at(&self, col: usize, row: usize) -> Result<&T> {
        let idx = self.offset(col, row)?;
        self.store
            .slot(idx)
            .ok_or_else(|| out_of_range(col, row, self.width, self.height))
    }

    fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut T> {
        let idx = self.offset(col, row)?;
        let (width, height) = (self.width, self.height);
        self.store
            .slot_mut(idx)
            .ok_or_else(|| out_of_range(col, row, width, height))
    }
}
