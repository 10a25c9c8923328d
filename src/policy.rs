//! Capacity decisions taken before a mutation touches the buffer.
//!
//! Growth doubles, shrinking halves only once the live elements fit in half
//! of the current capacity, and neither ever goes below the capacity chosen at
//! construction.

pub(crate) const DEFAULT_CAPACITY: usize = 8;
pub(crate) const MIN_CAPACITY: usize = 1;

/// Target capacity for an append or insert, if the buffer is full.
#[must_use]
pub(crate) fn grow_target(size: usize, capacity: usize) -> Option<usize> {
    if size < capacity {
        return None;
    }
    // Saturates so that the allocation, not the arithmetic, reports the failure.
    Some(capacity.saturating_mul(2))
}

/// Target capacity after a removal leaves `size_after` live elements.
#[must_use]
pub(crate) fn shrink_target(
    size_after: usize,
    capacity: usize,
    original_capacity: usize,
) -> Option<usize> {
    let half = capacity / 2;
    if capacity > original_capacity && size_after <= half {
        Some(half.max(original_capacity))
    } else {
        None
    }
}

/// Target capacity for an explicit clear.
#[must_use]
pub(crate) fn reset_target(capacity: usize, original_capacity: usize) -> Option<usize> {
    (capacity > original_capacity).then_some(original_capacity)
}
