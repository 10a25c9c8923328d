#![no_std]

//! `DArray`: a growable contiguous array with capacity hysteresis, fallible
//! allocation and optional locking.
//!
//! `DArray` keeps its elements in one heap buffer, like `Vec`, but reports
//! allocation failure as a value instead of aborting, never lets capacity
//! drop below what it was built with, and can be shared between threads
//! behind a single reader-writer lock chosen at the type level.
//!
//! # Capacity Policy
//!
//! - Appending or inserting into a full array doubles the capacity.
//! - Removing an element shrinks the buffer to half once the remaining
//!   elements fit in half of it, but never below the original capacity.
//! - `clear()` drops every element and returns to the original capacity.
//!
//! ```
//! # use darray::DArray;
//! let darray: DArray<u32> = DArray::builder().capacity(2).build().unwrap();
//!
//! darray.push_back(1).unwrap();
//! darray.push_back(2).unwrap();
//! darray.push_back(3).unwrap();            // full: 2 -> 4
//! assert_eq!(darray.capacity(), Ok(4));
//!
//! assert_eq!(darray.pop_back(), Ok(3));    // 2 left, fits in half: 4 -> 2
//! assert_eq!(darray.capacity(), Ok(2));
//! ```
//!
//! ## Time Complexity
//! - `push_back()`, `pop_back()`: amortized O(1)
//! - `insert()`, `extract()`: O(n) - elements after the index are shifted
//! - `at()`, `get()`, `size()`, `capacity()`: O(1)
//! - `clear()`: O(n) - every element is dropped
//!
//! # Errors Instead of Aborts
//!
//! Every mutation returns a [`Result`]. A failed reallocation leaves the array
//! exactly as it was before the call. Shrinking is best effort: if the smaller
//! buffer cannot be allocated, the removal still succeeds and the capacity is
//! kept.
//!
//! ```
//! # use darray::{DArray, DArrayError};
//! let darray: DArray<&str> = DArray::new();
//!
//! assert_eq!(darray.pop_back(), Err(DArrayError::EmptyContainer));
//! assert_eq!(
//!     darray.extract(0).unwrap_err().to_string(),
//!     "Index out of range: index 0 is beyond array length 0"
//! );
//! ```
//!
//! # Protection
//!
//! The second type parameter picks the locking discipline. Every operation
//! takes `&self` and runs under one acquisition of the array's gate: shared
//! for reads, exclusive for changes.
//!
//! - [`Unprotected`] (default): no lock. The array is not `Sync`, so sharing
//!   it between threads does not compile.
//! - [`Protected`] (`std` feature): one `parking_lot` reader-writer lock per
//!   array. Readers on several threads run together. Operations on two
//!   arrays at once (`assign_from`, `move_from`) lock both in a fixed order.
//!
//! ```
//! # use darray::{DArray, Protected};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let shared: Arc<DArray<u32, Protected>> = Arc::new(DArray::new());
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let shared = Arc::clone(&shared);
//!         thread::spawn(move || {
//!             for value in 0..100 {
//!                 shared.push_back(value).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(shared.size(), Ok(400));
//! ```
//!
//! # Element Access and Iteration
//!
//! `at()` and `lock()` return shared handles that hold the gate for reading
//! while alive; any number of them may coexist. `at_mut()` and `lock_mut()`
//! hold it exclusively. `get()` returns a copy and releases the gate before
//! returning, so its result can be passed straight back to a mutator.
//!
//! Drop every handle before changing the same array: with `Unprotected` the
//! change panics, with `Protected` it waits for the handle forever.
//!
//! ```
//! # use darray::DArray;
//! let darray: DArray<i32> = DArray::new();
//! darray.try_extend([5, 3, 9, 1]).unwrap();
//!
//! assert!(*darray.at(1).unwrap() < *darray.at(2).unwrap());
//! darray.push_back(darray.get(1).unwrap()).unwrap();
//! assert_eq!(darray.extract(4), Ok(3));
//!
//! *darray.at_mut(0).unwrap() += 10;
//!
//! darray.lock_mut().sort_unstable();
//! assert_eq!(*darray.lock(), [1, 3, 9, 15]);
//!
//! let doubled: DArray<i32> = DArray::new();
//! doubled.try_extend(darray.lock().iter().map(|x| x * 2)).unwrap();
//! assert_eq!(doubled.to_vec(), [2, 6, 18, 30]);
//!
//! let owned: Vec<i32> = darray.into_iter().rev().collect();
//! assert_eq!(owned, [15, 9, 3, 1]);
//! ```
//!
//! ## `no_std` Compatibility
//!
//! The crate needs only `core` and `alloc`. The default `std` feature adds
//! the [`Protected`] strategy and `std::error::Error` for [`DArrayError`]:
//! ```toml
//! [dependencies]
//! darray = { version = "0.1", default-features = false }
//! ```
//!
//! Reallocations are reported through the `log` facade at trace level, and
//! absorbed shrink failures at debug level.

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod access;
mod buffer;
mod builder;
mod core;
mod error;
mod iter;
mod policy;
mod protection;
mod transfer;

pub use access::{ElementMut, ElementRef, Locked, LockedMut, Snapshot};
pub use builder::Builder;
pub use core::DArray;
pub use error::{DArrayError, Result};
pub use iter::IntoIter;
#[cfg(feature = "std")]
pub use protection::Protected;
pub use protection::{Gate, Protection, Unprotected};
