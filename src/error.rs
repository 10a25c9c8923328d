use thiserror::Error;

/// Error types for `DArray` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DArrayError {
    /// A growth, shrink or reset-to-original buffer could not be allocated
    #[error("Allocation failure: could not allocate a buffer of {requested} elements")]
    AllocationFailure {
        /// Number of element slots that were requested
        requested: usize,
    },
    /// Index is beyond the live elements of the array
    #[error("Index out of range: index {index} is beyond array length {size}")]
    IndexOutOfRange {
        /// Index that was requested
        index: usize,
        /// Number of live elements at the time of the call
        size: usize,
    },
    /// Removal attempted on an array without elements
    #[error("No elements to pop")]
    EmptyContainer,
}

pub type Result<T> = core::result::Result<T, DArrayError>;
