#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Construction parameters and sizing constants.
pub mod config;

/// Error types returned by table construction and insertion.
pub mod error;

pub mod hash;

/// The open-addressed, linearly probed hash table.
///
/// This module provides [`ProbeTable`], which stores keys and values directly
/// in a single slot array and removes entries with backward-shift deletion.
pub mod probe_table;

mod sizing;
mod slots;

pub use config::Config;
pub use config::MAX_CAPACITY;
pub use error::Error;
pub use error::InvalidArgument;
#[cfg(any(test, feature = "stats"))]
pub use probe_table::DebugStats;
pub use probe_table::ProbeTable;
