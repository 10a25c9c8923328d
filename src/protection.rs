//! Type-level selection of the locking discipline around a `DArray`.
//!
//! Every operation runs inside exactly one gate acquisition: shared
//! ([`Gate::read`]) for operations that only look at the array, exclusive
//! ([`Gate::acquire`]) for operations that change it. With [`Unprotected`]
//! the gate is a `RefCell`: no lock is taken and the array is not `Sync`, so
//! it cannot be shared between threads at all. With [`Protected`] the gate
//! is a reader-writer lock covering the whole array.

use core::cell::{Ref, RefCell, RefMut};
use core::ops::{Deref, DerefMut};

#[cfg(feature = "std")]
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

mod private {
    pub trait Sealed {}
}

/// Access to a piece of state for the duration of a guard.
pub trait Gate<S>: Sized {
    type Guard<'a>: DerefMut<Target = S>
    where
        Self: 'a;

    type ReadGuard<'a>: Deref<Target = S>
    where
        Self: 'a;

    /// Wraps `state` in a fresh gate.
    fn new(state: S) -> Self;

    /// Blocks until no other guard of this gate is alive.
    fn acquire(&self) -> Self::Guard<'_>;

    /// Blocks until no exclusive guard of this gate is alive. Any number of
    /// read guards may coexist, including several on the same thread.
    fn read(&self) -> Self::ReadGuard<'_>;

    /// Access through an exclusive borrow, which needs no locking.
    fn get_mut(&mut self) -> &mut S;

    /// Unwraps the state, consuming the gate.
    fn into_inner(self) -> S;
}

/// Locking strategy of a `DArray`, chosen when the type is named.
pub trait Protection: private::Sealed + 'static {
    type State<S>: Gate<S>;
}

/// No locking. Best single-thread performance; the array is `Send` but not `Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unprotected;

impl private::Sealed for Unprotected {}

impl Protection for Unprotected {
    type State<S> = RefCell<S>;
}

/// One reader-writer lock per array. Mutations hold it exclusively for the
/// whole operation, reads share it.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Protected;

#[cfg(feature = "std")]
impl private::Sealed for Protected {}

#[cfg(feature = "std")]
impl Protection for Protected {
    type State<S> = RwLock<S>;
}

impl<S> Gate<S> for RefCell<S> {
    type Guard<'a>
        = RefMut<'a, S>
    where
        Self: 'a;

    type ReadGuard<'a>
        = Ref<'a, S>
    where
        Self: 'a;

    fn new(state: S) -> Self {
        RefCell::new(state)
    }

    /// # Panics
    ///
    /// Panics if any other guard is alive, e.g. when an element handle from
    /// `at` is still in scope, or an element's `Drop` reaches back into the
    /// array that is dropping it.
    fn acquire(&self) -> RefMut<'_, S> {
        self.borrow_mut()
    }

    /// # Panics
    ///
    /// Panics if an exclusive guard is alive.
    fn read(&self) -> Ref<'_, S> {
        self.borrow()
    }

    fn get_mut(&mut self) -> &mut S {
        RefCell::get_mut(self)
    }

    fn into_inner(self) -> S {
        RefCell::into_inner(self)
    }
}

#[cfg(feature = "std")]
impl<S> Gate<S> for RwLock<S> {
    type Guard<'a>
        = RwLockWriteGuard<'a, S>
    where
        Self: 'a;

    type ReadGuard<'a>
        = RwLockReadGuard<'a, S>
    where
        Self: 'a;

    fn new(state: S) -> Self {
        RwLock::new(state)
    }

    fn acquire(&self) -> RwLockWriteGuard<'_, S> {
        self.write()
    }

    // Recursive so that a thread holding a read guard can take another one
    // even while a writer is queued.
    fn read(&self) -> RwLockReadGuard<'_, S> {
        self.read_recursive()
    }

    fn get_mut(&mut self) -> &mut S {
        RwLock::get_mut(self)
    }

    fn into_inner(self) -> S {
        RwLock::into_inner(self)
    }
}

/// Acquires two distinct gates exclusively, in address order.
///
/// Two threads pairing the same gates in opposite roles still lock them in the
/// same order, so they cannot deadlock. Guards come back in argument order.
pub(crate) fn acquire_pair<'a, S, G: Gate<S>>(
    first: &'a G,
    second: &'a G,
) -> (G::Guard<'a>, G::Guard<'a>) {
    debug_assert!(!core::ptr::eq(first, second));
    if (first as *const G) < (second as *const G) {
        let a = first.acquire();
        let b = second.acquire();
        (a, b)
    } else {
        let b = second.acquire();
        let a = first.acquire();
        (a, b)
    }
}
