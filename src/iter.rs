use core::fmt;
use core::iter::FusedIterator;

use crate::buffer::RawBuffer;

/// Owning iterator over the elements of a `DArray`, in order.
///
/// Elements not yet yielded are dropped together with the iterator.
pub struct IntoIter<T> {
    buffer: RawBuffer<T>,
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(buffer: RawBuffer<T>, size: usize) -> Self {
        Self {
            buffer,
            front: 0,
            back: size,
        }
    }

    /// The elements not yet yielded.
    #[must_use]
    #[allow(unsafe_code)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [front, back) is the initialized remainder
        unsafe { &self.buffer.slice(self.back)[self.front..] }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[allow(unsafe_code)]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: front < back, so the slot is initialized
        let value = unsafe { self.buffer.read(self.front) };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[allow(unsafe_code)]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: the old back - 1 was initialized
        Some(unsafe { self.buffer.read(self.back) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        let (front, back) = (self.front, self.back);
        self.front = back;
        // SAFETY: [front, back) was the initialized remainder
        unsafe { self.buffer.drop_range(front, back) };
    }
}
