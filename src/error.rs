//! Error kinds raised by grid construction, access and dispatch.
use thiserror::Error;

use crate::methods::{LayoutKind, Traversal};

/// Errors produced by the grid core.
///
/// None of these are retried internally. The only recovery is to build a
/// fresh grid and run the whole operation again.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("failed to allocate {elements} elements of {element_size} bytes")]
    AllocationFailure { elements: usize, element_size: usize },

    #[error("coordinate ({col}, {row}) is outside a {width}x{height} grid")]
    OutOfRange {
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid grid handle: {0}")]
    InvalidHandle(&'static str),

    #[error("{layout} layout does not support {traversal} mapping")]
    CapabilityMismatch {
        layout: LayoutKind,
        traversal: Traversal,
    },
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, GridError>;
