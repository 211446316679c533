//! Method suites: one capability table per grid layout.
//!
//! A [`MethodSuite`] is picked once from configuration and then passed to
//! every operation that creates, reads or traverses grids. Callers never
//! look at the concrete layout; the suite decides both how cells are stored
//! and which traversal walks that storage sequentially
//! ([`MethodSuite::map_default`]).
//!
//! Traversals a layout does not implement are absent from its table.
//! Resolve the one you need with [`MethodSuite::traversal`] before the first
//! use; a missing entry is reported as [`GridError::CapabilityMismatch`].
use crate::error::{GridError, Result};
use crate::grid::{BlockedGrid, Grid2, Order, PlainGrid};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage layout selected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    RowMajor,
    ColumnMajor,
    BlockMajor,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 3] = [
        LayoutKind::RowMajor,
        LayoutKind::ColumnMajor,
        LayoutKind::BlockMajor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::RowMajor => "row-major",
            LayoutKind::ColumnMajor => "column-major",
            LayoutKind::BlockMajor => "block-major",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Order in which a traversal visits cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    RowMajor,
    ColMajor,
    BlockMajor,
}

impl Traversal {
    pub fn name(self) -> &'static str {
        match self {
            Traversal::RowMajor => "row-major",
            Traversal::ColMajor => "column-major",
            Traversal::BlockMajor => "block-major",
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A grid created by some [`MethodSuite`].
///
/// Dropping the handle (or passing it to [`MethodSuite::free`]) releases the
/// backing store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridHandle<T> {
    Plain(PlainGrid<T>),
    Blocked(BlockedGrid<T>),
}

impl<T> GridHandle<T> {
    /// Layout the handle's storage uses.
    pub fn layout(&self) -> LayoutKind {
        match self {
            GridHandle::Plain(grid) => match grid.order() {
                Order::RowMajor => LayoutKind::RowMajor,
                Order::ColumnMajor => LayoutKind::ColumnMajor,
            },
            GridHandle::Blocked(_) => LayoutKind::BlockMajor,
        }
    }
}

impl<T> Grid2 for GridHandle<T> {
    type Element = T;

    fn width(&self) -> usize {
        match self {
            GridHandle::Plain(grid) => grid.width(),
            GridHandle::Blocked(grid) => grid.width(),
        }
    }

    fn height(&self) -> usize {
        match self {
            GridHandle::Plain(grid) => grid.height(),
            GridHandle::Blocked(grid) => grid.height(),
        }
    }

    fn at(&self, col: usize, row: usize) -> Result<&T> {
        match self {
            GridHandle::Plain(grid) => grid.at(col, row),
            GridHandle::Blocked(grid) => grid.at(col, row),
        }
    }

    fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut T> {
        match self {
            GridHandle::Plain(grid) => grid.at_mut(col, row),
            GridHandle::Blocked(grid) => grid.at_mut(col, row),
        }
    }
}

type NewFn<T> = fn(usize, usize, Option<usize>) -> Result<GridHandle<T>>;
type AtFn<T> = fn(&GridHandle<T>, usize, usize) -> Result<&T>;
type AtMutFn<T> = fn(&mut GridHandle<T>, usize, usize) -> Result<&mut T>;
type RawMapFn<T> = fn(&mut GridHandle<T>, &mut dyn FnMut(usize, usize, &mut T)) -> Result<()>;

/// A traversal resolved from a suite.
pub struct MapFn<T> {
    traversal: Traversal,
    run: RawMapFn<T>,
}

impl<T> Clone for MapFn<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MapFn<T> {}

impl<T> fmt::Debug for MapFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapFn")
            .field("traversal", &self.traversal)
            .finish()
    }
}

impl<T> MapFn<T> {
    #[inline]
    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Run the traversal over `grid`, calling `visit(col, row, element, cl)`
    /// once per cell.
    ///
    /// Fails with [`GridError::InvalidHandle`] when `grid` was not created by
    /// the suite this traversal came from.
    pub fn apply<C, F>(&self, grid: &mut GridHandle<T>, cl: &mut C, mut visit: F) -> Result<()>
    where
        F: FnMut(usize, usize, &mut T, &mut C),
    {
        (self.run)(grid, &mut |col: usize, row: usize, elem: &mut T| {
            visit(col, row, elem, cl)
        })
    }
}

/// Capability table bound to one grid layout.
pub struct MethodSuite<T> {
    kind: LayoutKind,
    blocksize: Option<usize>,
    new: NewFn<T>,
    at: AtFn<T>,
    at_mut: AtMutFn<T>,
    map_row_major: Option<RawMapFn<T>>,
    map_col_major: Option<RawMapFn<T>>,
    map_block_major: Option<RawMapFn<T>>,
    map_default: MapFn<T>,
}

impl<T> Clone for MethodSuite<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MethodSuite<T> {}

impl<T> fmt::Debug for MethodSuite<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSuite")
            .field("kind", &self.kind)
            .field("blocksize", &self.blocksize)
            .field("row_major", &self.map_row_major.is_some())
            .field("col_major", &self.map_col_major.is_some())
            .field("block_major", &self.map_block_major.is_some())
            .field("default", &self.map_default.traversal)
            .finish()
    }
}

impl<T: Clone + Default> MethodSuite<T> {
    /// Suite for `kind`. Block-major grids get an automatic blocksize.
    pub fn select(kind: LayoutKind) -> Self {
        Self::select_with(kind, None)
    }

    /// Suite for `kind`; `blocksize` only applies to [`LayoutKind::BlockMajor`].
    pub fn select_with(kind: LayoutKind, blocksize: Option<usize>) -> Self {
        let suite = match kind {
            LayoutKind::RowMajor => Self::plain(Order::RowMajor),
            LayoutKind::ColumnMajor => Self::plain(Order::ColumnMajor),
            LayoutKind::BlockMajor => Self::blocked(blocksize),
        };
        if kind != LayoutKind::BlockMajor && blocksize.is_some() {
            log::debug!("MethodSuite::select_with ignoring blocksize for {kind} layout");
        }
        log::debug!("MethodSuite::select_with {suite:?}");
        suite
    }

    /// Flat suite storing cells in `order`.
    pub fn plain(order: Order) -> Self {
        let (kind, new, map_default): (_, NewFn<T>, _) = match order {
            Order::RowMajor => (
                LayoutKind::RowMajor,
                new_row_major::<T>,
                MapFn {
                    traversal: Traversal::RowMajor,
                    run: plain_map_row_major::<T>,
                },
            ),
            Order::ColumnMajor => (
                LayoutKind::ColumnMajor,
                new_col_major::<T>,
                MapFn {
                    traversal: Traversal::ColMajor,
                    run: plain_map_col_major::<T>,
                },
            ),
        };
        Self {
            kind,
            blocksize: None,
            new,
            at: plain_at::<T>,
            at_mut: plain_at_mut::<T>,
            map_row_major: Some(plain_map_row_major::<T>),
            map_col_major: Some(plain_map_col_major::<T>),
            map_block_major: None,
            map_default,
        }
    }

    /// Tiled suite; `None` picks the blocksize from the element size.
    pub fn blocked(blocksize: Option<usize>) -> Self {
        Self {
            kind: LayoutKind::BlockMajor,
            blocksize,
            new: new_blocked::<T>,
            at: blocked_at::<T>,
            at_mut: blocked_at_mut::<T>,
            map_row_major: None,
            map_col_major: None,
            map_block_major: Some(blocked_map::<T>),
            map_default: MapFn {
                traversal: Traversal::BlockMajor,
                run: blocked_map::<T>,
            },
        }
    }
}

impl<T> MethodSuite<T> {
    #[inline]
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// Explicit blocksize, if one was configured.
    #[inline]
    pub fn blocksize(&self) -> Option<usize> {
        self.blocksize
    }

    /// Allocate a `width`x`height` grid in this suite's layout.
    pub fn new_grid(&self, width: usize, height: usize) -> Result<GridHandle<T>> {
        (self.new)(width, height, self.blocksize)
    }

    /// Release a grid. Consuming the handle rules out double frees.
    pub fn free(&self, grid: GridHandle<T>) {
        drop(grid);
    }

    #[inline]
    pub fn width(&self, grid: &GridHandle<T>) -> usize {
        grid.width()
    }

    #[inline]
    pub fn height(&self, grid: &GridHandle<T>) -> usize {
        grid.height()
    }

    #[inline]
    pub fn element_size(&self, grid: &GridHandle<T>) -> usize {
        grid.element_size()
    }

    #[inline]
    pub fn at<'g>(&self, grid: &'g GridHandle<T>, col: usize, row: usize) -> Result<&'g T> {
        (self.at)(grid, col, row)
    }

    #[inline]
    pub fn at_mut<'g>(
        &self,
        grid: &'g mut GridHandle<T>,
        col: usize,
        row: usize,
    ) -> Result<&'g mut T> {
        (self.at_mut)(grid, col, row)
    }

    pub fn map_row_major(&self) -> Option<MapFn<T>> {
        self.entry(Traversal::RowMajor)
    }

    pub fn map_col_major(&self) -> Option<MapFn<T>> {
        self.entry(Traversal::ColMajor)
    }

    pub fn map_block_major(&self) -> Option<MapFn<T>> {
        self.entry(Traversal::BlockMajor)
    }

    /// The traversal matching this suite's physical layout: block-major for
    /// the blocked suite, row-major for `RowMajor` and column-major for
    /// `ColumnMajor`, so consecutive visits touch consecutive slots.
    pub fn map_default(&self) -> MapFn<T> {
        self.map_default
    }

    pub fn supports(&self, traversal: Traversal) -> bool {
        self.entry(traversal).is_some()
    }

    /// Resolve `traversal`, or report that this layout does not provide it.
    pub fn traversal(&self, traversal: Traversal) -> Result<MapFn<T>> {
        self.entry(traversal)
            .ok_or(GridError::CapabilityMismatch {
                layout: self.kind,
                traversal,
            })
    }

    fn entry(&self, traversal: Traversal) -> Option<MapFn<T>> {
        let run = match traversal {
            Traversal::RowMajor => self.map_row_major,
            Traversal::ColMajor => self.map_col_major,
            Traversal::BlockMajor => self.map_block_major,
        }?;
        Some(MapFn { traversal, run })
    }
}

fn new_row_major<T: Clone + Default>(
    width: usize,
    height: usize,
    _blocksize: Option<usize>,
) -> Result<GridHandle<T>> {
    PlainGrid::new(width, height, Order::RowMajor).map(GridHandle::Plain)
}

fn new_col_major<T: Clone + Default>(
    width: usize,
    height: usize,
    _blocksize: Option<usize>,
) -> Result<GridHandle<T>> {
    PlainGrid::new(width, height, Order::ColumnMajor).map(GridHandle::Plain)
}

fn new_blocked<T: Clone + Default>(
    width: usize,
    height: usize,
    blocksize: Option<usize>,
) -> Result<GridHandle<T>> {
    let grid = match blocksize {
        Some(b) => BlockedGrid::new(width, height, b)?,
        None => BlockedGrid::with_auto_blocksize(width, height)?,
    };
    Ok(GridHandle::Blocked(grid))
}

fn plain_ref<T>(grid: &GridHandle<T>) -> Result<&PlainGrid<T>> {
    match grid {
        GridHandle::Plain(grid) => Ok(grid),
        GridHandle::Blocked(_) => Err(GridError::InvalidHandle(
            "block-major grid passed to a plain suite",
        )),
    }
}

fn plain_mut<T>(grid: &mut GridHandle<T>) -> Result<&mut PlainGrid<T>> {
    match grid {
        GridHandle::Plain(grid) => Ok(grid),
        GridHandle::Blocked(_) => Err(GridError::InvalidHandle(
            "block-major grid passed to a plain suite",
        )),
    }
}

fn blocked_ref<T>(grid: &GridHandle<T>) -> Result<&BlockedGrid<T>> {
    match grid {
        GridHandle::Blocked(grid) => Ok(grid),
        GridHandle::Plain(_) => Err(GridError::InvalidHandle(
            "plain grid passed to the block-major suite",
        )),
    }
}

fn blocked_mut<T>(grid: &mut GridHandle<T>) -> Result<&mut BlockedGrid<T>> {
    match grid {
        GridHandle::Blocked(grid) => Ok(grid),
        GridHandle::Plain(_) => Err(GridError::InvalidHandle(
            "plain grid passed to the block-major suite",
        )),
    }
}

fn plain_at<T>(grid: &GridHandle<T>, col: usize, row: usize) -> Result<&T> {
    plain_ref(grid)?.at(col, row)
}

fn plain_at_mut<T>(grid: &mut GridHandle<T>, col: usize, row: usize) -> Result<&mut T> {
    plain_mut(grid)?.at_mut(col, row)
}

fn blocked_at<T>(grid: &GridHandle<T>, col: usize, row: usize) -> Result<&T> {
    blocked_ref(grid)?.at(col, row)
}

fn blocked_at_mut<T>(grid: &mut GridHandle<T>, col: usize, row: usize) -> Result<&mut T> {
    blocked_mut(grid)?.at_mut(col, row)
}

fn plain_map_row_major<T>(
    grid: &mut GridHandle<T>,
    visit: &mut dyn FnMut(usize, usize, &mut T),
) -> Result<()> {
    plain_mut(grid)?.map_row_major(&mut (), |col, row, elem, _| visit(col, row, elem));
    Ok(())
}

fn plain_map_col_major<T>(
    grid: &mut GridHandle<T>,
    visit: &mut dyn FnMut(usize, usize, &mut T),
) -> Result<()> {
    plain_mut(grid)?.map_col_major(&mut (), |col, row, elem, _| visit(col, row, elem));
    Ok(())
}

fn blocked_map<T>(
    grid: &mut GridHandle<T>,
    visit: &mut dyn FnMut(usize, usize, &mut T),
) -> Result<()> {
    blocked_mut(grid)?.map(&mut (), |col, row, elem, _| visit(col, row, elem));
    Ok(())
}
