use core::ptr;

use crate::buffer::RawBuffer;

/// Iteration order used to relocate a run of elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transfer {
    /// Ascending, between two distinct buffers
    Direct,
    /// Ascending; in place the destination never passes the source
    ShiftLeft,
    /// Descending; in place the destination is always ahead of the source
    ShiftRight,
}

/// Relocates `count` elements from `src` to `dst` by bitwise move.
///
/// # Safety
///
/// - `src[0..count]` is initialized and is logically uninitialized afterwards
/// - `dst[0..count]` is writable and holds no live elements outside the source run
/// - `Direct` requires non-overlapping runs; `ShiftLeft` requires `dst <= src`;
///   `ShiftRight` requires `dst >= src`
#[allow(unsafe_code)]
pub(crate) unsafe fn relocate<T>(method: Transfer, src: *const T, dst: *mut T, count: usize) {
    match method {
        Transfer::Direct | Transfer::ShiftLeft => {
            for idx in 0..count {
                ptr::write(dst.add(idx), ptr::read(src.add(idx)));
            }
        }
        Transfer::ShiftRight => {
            for idx in (0..count).rev() {
                ptr::write(dst.add(idx), ptr::read(src.add(idx)));
            }
        }
    }
}

/// Moves the live run `[0, size)` of `from` into the same slots of `to`.
///
/// # Safety
///
/// `size` slots of `from` are initialized, `to` has at least `size` free slots.
#[allow(unsafe_code)]
pub(crate) unsafe fn transfer_all<T>(from: &RawBuffer<T>, to: &mut RawBuffer<T>, size: usize) {
    debug_assert!(size <= to.capacity());
    relocate(Transfer::Direct, from.as_ptr(), to.as_mut_ptr(), size);
}

/// Opens a one-slot gap at `index` for an insertion.
///
/// With `resized` the left run `[0, index)` and the right run `[index, size)`
/// are moved independently into the new buffer, the right one landing at
/// `index + 1`. Without it the right run shifts right in place.
///
/// # Safety
///
/// `index <= size`, `[0, size)` of `buffer` is initialized and the target
/// buffer has at least `size + 1` slots.
#[allow(unsafe_code)]
pub(crate) unsafe fn transfer_insert<T>(
    buffer: &mut RawBuffer<T>,
    resized: Option<&mut RawBuffer<T>>,
    size: usize,
    index: usize,
) {
    debug_assert!(index <= size);
    let right = size - index;
    match resized {
        Some(target) => {
            debug_assert!(size < target.capacity());
            relocate(Transfer::Direct, buffer.as_ptr(), target.as_mut_ptr(), index);
            relocate(
                Transfer::Direct,
                buffer.as_ptr().add(index),
                target.as_mut_ptr().add(index + 1),
                right,
            );
        }
        None => {
            debug_assert!(size < buffer.capacity());
            let base = buffer.as_mut_ptr();
            relocate(Transfer::ShiftRight, base.add(index), base.add(index + 1), right);
        }
    }
}

/// Closes the one-slot gap left at `index` after its element was moved out.
///
/// With `resized` the left run `[0, index)` and the right run
/// `[index + 1, size)` are moved into the new buffer, the right one landing at
/// `index`. Without it the right run shifts left in place.
///
/// # Safety
///
/// `index < size`, slots `[0, size)` other than `index` are initialized and the
/// target buffer has at least `size - 1` slots.
#[allow(unsafe_code)]
pub(crate) unsafe fn transfer_erase<T>(
    buffer: &mut RawBuffer<T>,
    resized: Option<&mut RawBuffer<T>>,
    size: usize,
    index: usize,
) {
    debug_assert!(index < size);
    let right = size - (index + 1);
    match resized {
        Some(target) => {
            debug_assert!(size - 1 <= target.capacity());
            relocate(Transfer::Direct, buffer.as_ptr(), target.as_mut_ptr(), index);
            relocate(
                Transfer::Direct,
                buffer.as_ptr().add(index + 1),
                target.as_mut_ptr().add(index),
                right,
            );
        }
        None => {
            let base = buffer.as_mut_ptr();
            relocate(Transfer::ShiftLeft, base.add(index + 1), base.add(index), right);
        }
    }
}
