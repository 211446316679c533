//! Grid layouts: flat row/column-major and tiled block-major.
pub mod blocked;
pub mod plain;
pub mod traits;

pub use self::blocked::{auto_blocksize, BlockedGrid, TILE_BUDGET_BYTES};
pub use self::plain::{Order, PlainGrid};
pub use self::traits::Grid2;
