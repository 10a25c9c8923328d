use core::fmt;
use core::mem::{self, ManuallyDrop};
use core::ptr;

use log::{debug, trace};

use crate::access::{ElementMut, ElementRef, Locked, LockedMut, Snapshot};
use crate::buffer::RawBuffer;
use crate::builder::Builder;
use crate::error::{DArrayError, Result};
use crate::iter::IntoIter;
use crate::policy::{self, DEFAULT_CAPACITY, MIN_CAPACITY};
use crate::protection::{acquire_pair, Gate, Protection, Unprotected};
use crate::transfer::{transfer_all, transfer_erase, transfer_insert};

pub(crate) type StateOf<T, P> = <P as Protection>::State<Inner<T>>;
pub(crate) type GuardOf<'a, T, P> = <StateOf<T, P> as Gate<Inner<T>>>::Guard<'a>;
pub(crate) type ReadGuardOf<'a, T, P> = <StateOf<T, P> as Gate<Inner<T>>>::ReadGuard<'a>;

/// Buffer owner: the live elements occupy slots `[0, size)` of `buffer`.
///
/// Every mutation allocates first and only then moves elements, so a failed
/// allocation returns with nothing touched.
pub(crate) struct Inner<T> {
    buffer: RawBuffer<T>,
    original_capacity: usize,
    size: usize,
}

impl<T> Inner<T> {
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self> {
        let capacity = capacity.max(MIN_CAPACITY);
        Ok(Self {
            buffer: RawBuffer::try_allocate(capacity)?,
            original_capacity: capacity,
            size: 0,
        })
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: RawBuffer::allocate(capacity),
            original_capacity: capacity,
            size: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[inline]
    pub(crate) fn original_capacity(&self) -> usize {
        self.original_capacity
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    #[inline]
    #[allow(unsafe_code)]
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: [0, size) is always initialized
        unsafe { self.buffer.slice(self.size) }
    }

    #[inline]
    #[allow(unsafe_code)]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: [0, size) is always initialized
        unsafe { self.buffer.slice_mut(self.size) }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.size {
            return Err(DArrayError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(())
    }

    fn grow_allocation(&self) -> Result<Option<RawBuffer<T>>> {
        match policy::grow_target(self.size, self.capacity()) {
            Some(target) => Ok(Some(RawBuffer::try_allocate(target)?)),
            None => Ok(None),
        }
    }

    /// Shrinking is best effort: a failed allocation keeps the current buffer.
    fn shrink_allocation(&self, size_after: usize) -> Option<RawBuffer<T>> {
        let target = policy::shrink_target(size_after, self.capacity(), self.original_capacity)?;
        match RawBuffer::try_allocate(target) {
            Ok(buffer) => Some(buffer),
            Err(err) => {
                debug!(
                    "keeping capacity {} after failed shrink to {}: {}",
                    self.capacity(),
                    target,
                    err
                );
                None
            }
        }
    }

    /// Swaps in a buffer already holding the live elements. The old buffer is
    /// released without dropping anything.
    fn commit(&mut self, resized: RawBuffer<T>, size: usize) {
        let previous = mem::replace(&mut self.buffer, resized);
        self.size = size;
        trace!(
            "reallocated darray buffer from {} to {} slots",
            previous.capacity(),
            self.capacity()
        );
    }

    #[allow(unsafe_code)]
    pub(crate) fn push_back(&mut self, value: T) -> Result<usize> {
        if let Some(mut resized) = self.grow_allocation()? {
            // SAFETY: resized holds capacity * 2 > size slots
            unsafe { transfer_all(&self.buffer, &mut resized, self.size) };
            self.commit(resized, self.size);
        }

        // SAFETY: size < capacity after the grow step
        unsafe { self.buffer.write(self.size, value) };
        self.size += 1;
        Ok(self.size)
    }

    #[allow(unsafe_code)]
    pub(crate) fn insert(&mut self, index: usize, value: T) -> Result<usize> {
        if index > self.size {
            return Err(DArrayError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }

        match self.grow_allocation()? {
            Some(mut resized) => {
                // SAFETY: index <= size < resized capacity; slot `index` of
                // resized is left free by the transfer
                unsafe {
                    transfer_insert(&mut self.buffer, Some(&mut resized), self.size, index);
                    resized.write(index, value);
                }
                self.commit(resized, self.size + 1);
            }
            None => {
                // SAFETY: size < capacity; the shift frees slot `index`
                unsafe {
                    transfer_insert(&mut self.buffer, None, self.size, index);
                    self.buffer.write(index, value);
                }
                self.size += 1;
            }
        }
        Ok(self.size)
    }

    #[allow(unsafe_code)]
    pub(crate) fn pop_back(&mut self) -> Result<T> {
        if self.size == 0 {
            return Err(DArrayError::EmptyContainer);
        }

        let resized = self.shrink_allocation(self.size - 1);

        self.size -= 1;
        // SAFETY: slot `size` was the last live element
        let value = unsafe { self.buffer.read(self.size) };

        if let Some(mut resized) = resized {
            // SAFETY: shrink targets never go below the remaining size
            unsafe { transfer_all(&self.buffer, &mut resized, self.size) };
            self.commit(resized, self.size);
        }
        Ok(value)
    }

    #[allow(unsafe_code)]
    pub(crate) fn extract(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;

        let resized = self.shrink_allocation(self.size - 1);

        // SAFETY: index < size
        let value = unsafe { self.buffer.read(index) };

        match resized {
            Some(mut resized) => {
                // SAFETY: slot `index` was just moved out, resized holds at
                // least size - 1 slots
                unsafe { transfer_erase(&mut self.buffer, Some(&mut resized), self.size, index) };
                self.commit(resized, self.size - 1);
            }
            None => {
                // SAFETY: slot `index` was just moved out
                unsafe { transfer_erase(&mut self.buffer, None, self.size, index) };
                self.size -= 1;
            }
        }
        Ok(value)
    }

    #[allow(unsafe_code)]
    pub(crate) fn clear(&mut self) {
        // Zero first: a panicking element drop leaks the rest instead of
        // dropping anything twice.
        let live = mem::replace(&mut self.size, 0);

        if let Some(target) = policy::reset_target(self.capacity(), self.original_capacity) {
            match RawBuffer::try_allocate(target) {
                Ok(fresh) => {
                    let mut previous = mem::replace(&mut self.buffer, fresh);
                    trace!(
                        "reset darray buffer from {} to original {} slots",
                        previous.capacity(),
                        target
                    );
                    // SAFETY: [0, live) of the previous buffer was the live range
                    unsafe { previous.drop_range(0, live) };
                    return;
                }
                Err(err) => debug!(
                    "keeping capacity {} after failed reset to {}: {}",
                    self.capacity(),
                    target,
                    err
                ),
            }
        }

        // SAFETY: [0, live) was the live range
        unsafe { self.buffer.drop_range(0, live) };
    }

    /// Hands the buffer and its live length to the caller, who becomes
    /// responsible for dropping the elements.
    #[allow(unsafe_code)]
    pub(crate) fn into_raw_parts(self) -> (RawBuffer<T>, usize) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never used or dropped again
        let buffer = unsafe { ptr::read(&this.buffer) };
        (buffer, this.size)
    }
}

impl<T: Clone> Inner<T> {
    /// Deep copy into a fresh buffer of the same capacity.
    #[allow(unsafe_code)]
    pub(crate) fn try_duplicate(&self) -> Result<Self> {
        let mut copy = Self {
            buffer: RawBuffer::try_allocate(self.capacity())?,
            original_capacity: self.original_capacity,
            size: 0,
        };
        for value in self.as_slice() {
            // SAFETY: copy.size < self.size <= capacity; size tracks the
            // written prefix so a panicking clone drops exactly that prefix
            unsafe { copy.buffer.write(copy.size, value.clone()) };
            copy.size += 1;
        }
        Ok(copy)
    }
}

impl<T> Drop for Inner<T> {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        let live = mem::replace(&mut self.size, 0);
        // SAFETY: [0, live) was the live range
        unsafe { self.buffer.drop_range(0, live) };
    }
}

/// A contiguous growable array.
///
/// Capacity doubles when an append or insert finds the buffer full, halves
/// when a removal leaves at most half of it in use, and never drops below
/// the capacity the array was built with. All operations take `&self`; the
/// protection strategy `P` decides whether they lock. Operations that only
/// read share the gate, operations that change the array take it exclusively.
pub struct DArray<T, P: Protection = Unprotected> {
    state: StateOf<T, P>,
}

impl<T, P: Protection> DArray<T, P> {
    /// Creates an empty array with the default capacity of 8.
    #[must_use]
    pub fn new() -> Self {
        Self::from_inner(Inner::with_capacity(DEFAULT_CAPACITY))
    }

    /// Returns a builder for choosing the initial capacity.
    #[must_use]
    pub fn builder() -> Builder<T, P> {
        Builder::new()
    }

    pub(crate) fn from_inner(inner: Inner<T>) -> Self {
        Self {
            state: <StateOf<T, P> as Gate<Inner<T>>>::new(inner),
        }
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner<T>) -> R) -> R {
        let mut guard = self.state.acquire();
        f(&mut guard)
    }

    fn with_inner_ref<R>(&self, f: impl FnOnce(&Inner<T>) -> R) -> R {
        let guard = self.state.read();
        f(&guard)
    }

    /// Appends an element, doubling the capacity if the array is full.
    ///
    /// Returns the new size.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::AllocationFailure` if the larger buffer cannot be
    /// allocated. The array is left exactly as it was and `value` is dropped.
    pub fn push_back(&self, value: T) -> Result<usize> {
        self.with_inner(|inner| inner.push_back(value))
    }

    /// Inserts an element at `index`, shifting later elements one slot right.
    ///
    /// `index == size` appends. Returns the new size.
    ///
    /// # Errors
    ///
    /// - `DArrayError::IndexOutOfRange` if `index > size`
    /// - `DArrayError::AllocationFailure` if the array is full and cannot grow
    ///
    /// On error the array is unchanged.
    pub fn insert(&self, index: usize, value: T) -> Result<usize> {
        self.with_inner(|inner| inner.insert(index, value))
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::EmptyContainer` if there are no elements.
    pub fn pop_back(&self) -> Result<T> {
        self.with_inner(Inner::pop_back)
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// one slot left.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::IndexOutOfRange` if `index >= size`.
    pub fn extract(&self, index: usize) -> Result<T> {
        self.with_inner(|inner| inner.extract(index))
    }

    /// Drops every element and returns to the original capacity.
    ///
    /// If the smaller buffer cannot be allocated the elements are still
    /// dropped and the current capacity is kept.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the signature uniform with the other
    /// mutators.
    #[allow(clippy::unnecessary_wraps)]
    pub fn clear(&self) -> Result<()> {
        self.with_inner(Inner::clear);
        Ok(())
    }

    /// Returns a shared handle to the element at `index`.
    ///
    /// The handle holds the array's gate for reading until it is dropped, so
    /// `*darray.at(0)? < *darray.at(1)?` works, but changing the array while
    /// a handle is alive does not. Use `get` to read a copy instead.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::IndexOutOfRange` if `index >= size`.
    pub fn at(&self, index: usize) -> Result<ElementRef<'_, T, P>> {
        let guard = self.state.read();
        guard.check_index(index)?;
        Ok(ElementRef::new(guard, index))
    }

    /// Returns an exclusive handle to the element at `index`, for writing.
    ///
    /// Every other operation on this array waits (or, unprotected, panics)
    /// until the handle is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::IndexOutOfRange` if `index >= size`.
    pub fn at_mut(&self, index: usize) -> Result<ElementMut<'_, T, P>> {
        let guard = self.state.acquire();
        guard.check_index(index)?;
        Ok(ElementMut::new(guard, index))
    }

    /// Returns a shared handle to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than the current size.
    #[allow(unsafe_code)]
    pub unsafe fn get_unchecked(&self, index: usize) -> ElementRef<'_, T, P> {
        ElementRef::new(self.state.read(), index)
    }

    /// Shares the array's gate and exposes its live elements as a slice.
    ///
    /// Use this for iteration, searching and other read-only slice
    /// algorithms. Other reads may run alongside; operations that change the
    /// array wait (or, unprotected, panic) until the view is dropped.
    pub fn lock(&self) -> Locked<'_, T, P> {
        Locked::new(self.state.read())
    }

    /// Locks the array exclusively and exposes its live elements as a
    /// mutable slice, for sorting and other in-place algorithms.
    pub fn lock_mut(&self) -> LockedMut<'_, T, P> {
        LockedMut::new(self.state.acquire())
    }

    /// Mutable slice of the live elements. The exclusive borrow makes locking unnecessary.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.state.get_mut().as_mut_slice()
    }

    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unnecessary_wraps)]
    pub fn capacity(&self) -> Result<usize> {
        Ok(self.with_inner_ref(|inner| inner.capacity()))
    }

    /// Capacity the array was built with; shrinking never goes below it.
    ///
    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unnecessary_wraps)]
    pub fn original_capacity(&self) -> Result<usize> {
        Ok(self.with_inner_ref(|inner| inner.original_capacity()))
    }

    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unnecessary_wraps)]
    pub fn size(&self) -> Result<usize> {
        Ok(self.with_inner_ref(|inner| inner.size()))
    }

    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unnecessary_wraps)]
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.with_inner_ref(|inner| inner.size() == 0))
    }

    /// Capacity, original capacity and size read under a single gate acquisition.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.with_inner_ref(|inner| Snapshot::new(inner))
    }

    /// Appends every element of `iter`, holding the gate for the whole run.
    ///
    /// Returns the new size. `iter` must not touch this array.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::AllocationFailure` if growing fails. Elements
    /// appended before the failure stay in the array.
    pub fn try_extend<I: IntoIterator<Item = T>>(&self, iter: I) -> Result<usize> {
        self.with_inner(|inner| {
            for value in iter {
                inner.push_back(value)?;
            }
            Ok(inner.size())
        })
    }

    /// Moves the contents of `source` into this array, dropping what this
    /// array held before. `source` is left empty.
    ///
    /// Both gates are held together for the transfer. Returns the new size.
    pub fn move_from(&self, source: &Self) -> usize {
        if ptr::eq(self, source) {
            return self.with_inner_ref(|inner| inner.size());
        }

        let (mut target, mut origin) = acquire_pair::<Inner<T>, _>(&self.state, &source.state);
        mem::swap(&mut *target, &mut *origin);
        origin.clear();
        target.size()
    }
}

impl<T: Clone, P: Protection> DArray<T, P> {
    /// Deep copy with the same capacity and original capacity.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::AllocationFailure` if the copy's buffer cannot be
    /// allocated.
    pub fn try_clone(&self) -> Result<Self> {
        let copy = self.with_inner_ref(|inner| inner.try_duplicate())?;
        Ok(Self::from_inner(copy))
    }

    /// Replaces the contents of this array with a deep copy of `source`.
    ///
    /// Both gates are held together for the copy. Returns the new size.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::AllocationFailure` if the copy's buffer cannot be
    /// allocated. This array is unchanged in that case.
    pub fn assign_from(&self, source: &Self) -> Result<usize> {
        if ptr::eq(self, source) {
            return self.size();
        }

        let (previous, size) = {
            let (mut target, origin) = acquire_pair::<Inner<T>, _>(&self.state, &source.state);
            let copy = origin.try_duplicate()?;
            let size = copy.size();
            (mem::replace(&mut *target, copy), size)
        };
        // element drops run with both gates released
        drop(previous);
        Ok(size)
    }

    /// Returns a copy of the element at `index`.
    ///
    /// The gate is released before this returns, so the value can be fed
    /// straight back into the array: `darray.push_back(darray.get(0)?)`.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::IndexOutOfRange` if `index >= size`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.with_inner_ref(|inner| {
            inner.check_index(index)?;
            Ok(inner.as_slice()[index].clone())
        })
    }

    /// Copies the live elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> alloc::vec::Vec<T> {
        self.with_inner_ref(|inner| inner.as_slice().to_vec())
    }
}

impl<T, P: Protection> Default for DArray<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, P: Protection> Clone for DArray<T, P> {
    /// # Panics
    ///
    /// Panics if the copy cannot be allocated; use `try_clone` to handle that.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("failed to clone DArray: {err}"),
        }
    }
}

impl<T: fmt::Debug, P: Protection> fmt::Debug for DArray<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_inner_ref(|inner| {
            f.debug_struct("DArray")
                .field("capacity", &inner.capacity())
                .field("size", &inner.size())
                .field("elements", &inner.as_slice())
                .finish()
        })
    }
}

impl<T, P: Protection> IntoIterator for DArray<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (buffer, size) = self.state.into_inner().into_raw_parts();
        IntoIter::new(buffer, size)
    }
}
