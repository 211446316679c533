//! Flat, fixed-length buffer of element slots.
//!
//! Every grid layout sits on top of a [`Store`]. The store never grows or
//! shrinks after [`Store::allocate`]; it is released when dropped.
use crate::error::{GridError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store<T> {
    slots: Vec<T>,
}

impl<T: Clone> Store<T> {
    /// Allocate `len` slots, each initialised to `fill`.
    ///
    /// Allocation goes through `try_reserve_exact`, so a refused request is
    /// reported as [`GridError::AllocationFailure`] instead of aborting.
    pub fn allocate(len: usize, fill: T) -> Result<Self> {
        let failure = || GridError::AllocationFailure {
            elements: len,
            element_size: std::mem::size_of::<T>(),
        };
        // Vec cannot hold more than isize::MAX bytes.
        len.checked_mul(std::mem::size_of::<T>())
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or_else(failure)?;

        let mut slots = Vec::new();
        slots.try_reserve_exact(len).map_err(|_| failure())?;
        slots.resize(len, fill);
        Ok(Self { slots })
    }
}

impl<T> Store<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bytes per slot.
    #[inline]
    pub fn element_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Slot at linear `index`, `None` past the end of the store.
    #[inline]
    pub fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Contiguous view of all slots, padding included.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}
