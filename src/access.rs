use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::core::{GuardOf, Inner, ReadGuardOf};
use crate::protection::Protection;

/// Shared handle to one element, returned by `DArray::at`.
///
/// The array's gate stays acquired for reading while the handle is alive.
/// Other reads, including further `at` handles, may run alongside it;
/// operations that change the array wait (or, unprotected, panic) until it
/// is dropped. Use `DArray::get` for a copy that releases the gate at once.
pub struct ElementRef<'a, T: 'a, P: Protection + 'a> {
    guard: ReadGuardOf<'a, T, P>,
    index: usize,
}

impl<'a, T: 'a, P: Protection + 'a> ElementRef<'a, T, P> {
    pub(crate) fn new(guard: ReadGuardOf<'a, T, P>, index: usize) -> Self {
        Self { guard, index }
    }

    /// Position of the element in the array.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<'a, T: 'a, P: Protection + 'a> Deref for ElementRef<'a, T, P> {
    type Target = T;

    #[allow(unsafe_code)]
    fn deref(&self) -> &T {
        let inner: &Inner<T> = &self.guard;
        // SAFETY: the index was in range when the handle was made, by check or
        // by caller contract, and the gate keeps the size from changing
        unsafe { inner.as_slice().get_unchecked(self.index) }
    }
}

impl<'a, T: fmt::Debug + 'a, P: Protection + 'a> fmt::Debug for ElementRef<'a, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// Exclusive handle to one element, returned by `DArray::at_mut`.
///
/// Holds the array's gate exclusively: drop it before calling any other
/// operation on the same array.
pub struct ElementMut<'a, T: 'a, P: Protection + 'a> {
    guard: GuardOf<'a, T, P>,
    index: usize,
}

impl<'a, T: 'a, P: Protection + 'a> ElementMut<'a, T, P> {
    pub(crate) fn new(guard: GuardOf<'a, T, P>, index: usize) -> Self {
        Self { guard, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<'a, T: 'a, P: Protection + 'a> Deref for ElementMut<'a, T, P> {
    type Target = T;

    #[allow(unsafe_code)]
    fn deref(&self) -> &T {
        let inner: &Inner<T> = &self.guard;
        // SAFETY: index checked by `at_mut`, size fixed while the gate is held
        unsafe { inner.as_slice().get_unchecked(self.index) }
    }
}

impl<'a, T: 'a, P: Protection + 'a> DerefMut for ElementMut<'a, T, P> {
    #[allow(unsafe_code)]
    fn deref_mut(&mut self) -> &mut T {
        let index = self.index;
        let inner: &mut Inner<T> = &mut self.guard;
        // SAFETY: see `deref`
        unsafe { inner.as_mut_slice().get_unchecked_mut(index) }
    }
}

impl<'a, T: fmt::Debug + 'a, P: Protection + 'a> fmt::Debug for ElementMut<'a, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

/// The live elements of a `DArray`, viewed as a shared slice while its gate
/// is held for reading.
///
/// Everything read-only slices offer works here: indexing, `iter`, `rev`,
/// `binary_search` and so on. Several views may be alive at once.
pub struct Locked<'a, T: 'a, P: Protection + 'a> {
    guard: ReadGuardOf<'a, T, P>,
}

impl<'a, T: 'a, P: Protection + 'a> Locked<'a, T, P> {
    pub(crate) fn new(guard: ReadGuardOf<'a, T, P>) -> Self {
        Self { guard }
    }
}

impl<'a, T: 'a, P: Protection + 'a> Deref for Locked<'a, T, P> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        let inner: &Inner<T> = &self.guard;
        inner.as_slice()
    }
}

impl<'a, 'b, T: 'a, P: Protection + 'a> IntoIterator for &'b Locked<'a, T, P> {
    type Item = &'b T;
    type IntoIter = core::slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: fmt::Debug + 'a, P: Protection + 'a> fmt::Debug for Locked<'a, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// The live elements of a `DArray` as a mutable slice, with the gate held
/// exclusively. Use it for `sort`, `iter_mut`, `swap` and other in-place
/// slice algorithms.
pub struct LockedMut<'a, T: 'a, P: Protection + 'a> {
    guard: GuardOf<'a, T, P>,
}

impl<'a, T: 'a, P: Protection + 'a> LockedMut<'a, T, P> {
    pub(crate) fn new(guard: GuardOf<'a, T, P>) -> Self {
        Self { guard }
    }
}

impl<'a, T: 'a, P: Protection + 'a> Deref for LockedMut<'a, T, P> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        let inner: &Inner<T> = &self.guard;
        inner.as_slice()
    }
}

impl<'a, T: 'a, P: Protection + 'a> DerefMut for LockedMut<'a, T, P> {
    fn deref_mut(&mut self) -> &mut [T] {
        let inner: &mut Inner<T> = &mut self.guard;
        inner.as_mut_slice()
    }
}

impl<'a, 'b, T: 'a, P: Protection + 'a> IntoIterator for &'b LockedMut<'a, T, P> {
    type Item = &'b T;
    type IntoIter = core::slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, T: 'a, P: Protection + 'a> IntoIterator for &'b mut LockedMut<'a, T, P> {
    type Item = &'b mut T;
    type IntoIter = core::slice::IterMut<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, T: fmt::Debug + 'a, P: Protection + 'a> fmt::Debug for LockedMut<'a, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Metadata of a `DArray` read in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    capacity: usize,
    original_capacity: usize,
    size: usize,
}

impl Snapshot {
    pub(crate) fn new<T>(inner: &Inner<T>) -> Self {
        Self {
            capacity: inner.capacity(),
            original_capacity: inner.original_capacity(),
            size: inner.size(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn original_capacity(&self) -> usize {
        self.original_capacity
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
