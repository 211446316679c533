//! Flat grid stored in row-major or column-major order.
//!
//! Used by the row-major and column-major method suites. Supports row and
//! column traversals; there is no tiled traversal for this layout.
use super::traits::{out_of_range, Grid2};
use crate::error::Result;
use crate::store::Store;
use serde::{Deserialize, Serialize};

/// Physical ordering of a [`PlainGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    RowMajor,
    ColumnMajor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlainGrid<T> {
    width: usize,
    height: usize,
    order: Order,
    store: Store<T>,
}

impl<T: Clone + Default> PlainGrid<T> {
    /// Allocate a `width`x`height` grid of default-valued elements.
    pub fn new(width: usize, height: usize, order: Order) -> Result<Self> {
        let len = width.saturating_mul(height);
        let store = Store::allocate(len, T::default())?;
        log::debug!("PlainGrid::new {width}x{height} order={order:?}");
        Ok(Self {
            width,
            height,
            order,
            store,
        })
    }
}

impl<T> PlainGrid<T> {
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        match self.order {
            Order::RowMajor => row * self.width + col,
            Order::ColumnMajor => col * self.height + row,
        }
    }

    /// Linear slot offset for `(col, row)`.
    pub fn offset(&self, col: usize, row: usize) -> Result<usize> {
        if !self.contains(col, row) {
            return Err(out_of_range(col, row, self.width, self.height));
        }
        Ok(self.index(col, row))
    }

    /// Visit every cell row by row, left to right within a row.
    pub fn map_row_major<C, F>(&mut self, cl: &mut C, mut visit: F)
    where
        F: FnMut(usize, usize, &mut T, &mut C),
    {
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = self.index(col, row);
                if let Some(elem) = self.store.slot_mut(idx) {
                    visit(col, row, elem, cl);
                }
            }
        }
    }

    /// Visit every cell column by column, top to bottom within a column.
    pub fn map_col_major<C, F>(&mut self, cl: &mut C, mut visit: F)
    where
        F: FnMut(usize, usize, &mut T, &mut C),
    {
        for col in 0..self.width {
            for row in 0..self.height {
                let idx = self.index(col, row);
                if let Some(elem) = self.store.slot_mut(idx) {
                    visit(col, row, elem, cl);
                }
            }
        }
    }
}

impl<T> Grid2 for PlainGrid<T> {
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
