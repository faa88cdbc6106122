#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(all(test, not(feature = "std")))]
extern crate std;

/// A hash table using separate chaining.
///
/// This module provides the `HashTable` itself together with its capacity
/// constants.
pub mod hash_table;

/// In-place manipulation of a single table entry.
pub mod entry;

mod error;

pub mod iter;

mod key;

#[cfg(feature = "stats")]
mod stats;

pub use entry::Entry;
pub use error::TryReserveError;
pub use hash_table::HashTable;
#[cfg(feature = "stats")]
pub use stats::ChainStats;
