#![doc = include_str!("../README.md")]

// Core: storage layouts and the dispatch layer over them.
pub mod error;
pub mod grid;
pub mod methods;
pub mod store;

// Clients of the core.
pub mod transform;

// Glue for the command-line tools.
pub mod config;
pub mod diagnostics;
pub mod image;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{GridError, Result};
pub use crate::grid::{auto_blocksize, BlockedGrid, Grid2, Order, PlainGrid};
pub use crate::methods::{GridHandle, LayoutKind, MapFn, MethodSuite, Traversal};
pub use crate::transform::{FlipAxis, Rotation, Transform};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use blocked_grid::prelude::*;
///
/// # fn main() -> blocked_grid::Result<()> {
/// let suite = MethodSuite::<u32>::select(LayoutKind::BlockMajor);
/// let mut grid = suite.new_grid(3, 2)?;
/// suite.map_default().apply(&mut grid, &mut 0u32, |_, _, v, next| {
///     *v = *next;
///     *next += 1;
/// })?;
/// let rotated = transform::rotate(&suite, grid, Rotation::R90)?;
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::grid::Grid2;
    pub use crate::image::{Pixmap, Rgb};
    pub use crate::methods::{GridHandle, LayoutKind, MethodSuite, Traversal};
    pub use crate::transform::{self, FlipAxis, Rotation, Transform};
}
