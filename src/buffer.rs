use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::marker::PhantomData;
use core::ptr::{self, NonNull};

use crate::error::{DArrayError, Result};

/// Exclusively owned storage for `capacity` element slots.
///
/// The buffer never tracks which slots are initialized and never drops
/// elements; the owner (`Inner`) keeps the live range `[0, size)` and drops
/// it. Dropping a `RawBuffer` only releases the allocation.
pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

// The buffer owns its `T`s like a `Box<[T]>` would.
#[allow(unsafe_code)]
unsafe impl<T: Send> Send for RawBuffer<T> {}
#[allow(unsafe_code)]
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    fn layout(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity).map_err(|_| DArrayError::AllocationFailure {
            requested: capacity,
        })
    }

    /// Allocates a buffer with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns `DArrayError::AllocationFailure` if the layout overflows or the
    /// allocator reports out of memory.
    #[allow(unsafe_code)]
    pub(crate) fn try_allocate(capacity: usize) -> Result<Self> {
        let layout = Self::layout(capacity)?;

        #[cfg(test)]
        if fault::should_fail() {
            return Err(DArrayError::AllocationFailure {
                requested: capacity,
            });
        }

        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(DArrayError::AllocationFailure {
            requested: capacity,
        })?;

        Ok(Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Allocates a buffer, diverting to the global allocation error handler on failure.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` elements of `T` exceed the maximum layout size.
    pub(crate) fn allocate(capacity: usize) -> Self {
        match Self::try_allocate(capacity) {
            Ok(buffer) => buffer,
            Err(_) => match Self::layout(capacity) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => panic!("capacity overflow"),
            },
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Moves the element out of slot `index`.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot is initialized. The slot is logically
    /// uninitialized afterwards.
    #[inline]
    #[allow(unsafe_code)]
    pub(crate) unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.capacity);
        ptr::read(self.as_ptr().add(index))
    }

    /// Writes `value` into slot `index` without dropping the previous content.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot holds no live element.
    #[inline]
    #[allow(unsafe_code)]
    pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.capacity);
        ptr::write(self.as_mut_ptr().add(index), value);
    }

    /// # Safety
    ///
    /// `len <= capacity` and slots `[0, len)` are initialized.
    #[inline]
    #[allow(unsafe_code)]
    pub(crate) unsafe fn slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity);
        core::slice::from_raw_parts(self.as_ptr(), len)
    }

    /// # Safety
    ///
    /// `len <= capacity` and slots `[0, len)` are initialized.
    #[inline]
    #[allow(unsafe_code)]
    pub(crate) unsafe fn slice_mut(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.capacity);
        core::slice::from_raw_parts_mut(self.as_mut_ptr(), len)
    }

    /// Drops the elements in slots `[start, end)` in place.
    ///
    /// # Safety
    ///
    /// `start <= end <= capacity`, the slots are initialized and are treated as
    /// uninitialized afterwards.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn drop_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.capacity);
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
            self.as_mut_ptr().add(start),
            end - start,
        ));
    }
}

impl<T> Drop for RawBuffer<T> {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        if let Ok(layout) = Self::layout(self.capacity) {
            if layout.size() != 0 {
                // SAFETY: allocated in try_allocate with this very layout
                unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
    }
}
