use core::marker::PhantomData;

use crate::core::{DArray, Inner};
use crate::error::Result;
use crate::policy::DEFAULT_CAPACITY;
use crate::protection::{Protection, Unprotected};

/// Configures a `DArray` before its first allocation.
///
/// ```
/// # use darray::DArray;
/// let darray: DArray<u32> = DArray::builder().capacity(2).build().unwrap();
/// assert_eq!(darray.capacity(), Ok(2));
/// ```
pub struct Builder<T, P: Protection = Unprotected> {
    initial_capacity: usize,
    _marker: PhantomData<fn() -> (T, P)>,
}

impl<T, P: Protection> Builder<T, P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            _marker: PhantomData,
        }
    }

    /// Initial capacity, which is also the floor for every later shrink.
    /// Zero is raised to one.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// # Errors
    ///
    /// Returns `DArrayError::AllocationFailure` if the initial buffer cannot be
    /// allocated.
    pub fn build(self) -> Result<DArray<T, P>> {
        Ok(DArray::from_inner(Inner::try_with_capacity(
            self.initial_capacity,
        )?))
    }
}

impl<T, P: Protection> Default for Builder<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Protection> core::fmt::Debug for Builder<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Builder")
            .field("initial_capacity", &self.initial_capacity)
            .finish()
    }
}
