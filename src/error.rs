use thiserror::Error;

/// Errors returned by [`ProbeTable`](crate::ProbeTable) construction and
/// insertion.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// A construction parameter was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// The table already holds the maximum number of entries and the key being
    /// inserted is not present.
    #[error("maximum size of the table has been reached ({max_len} entries)")]
    CapacityExceeded {
        /// The largest number of entries the table can hold.
        max_len: usize,
    },
}

/// The reason a construction parameter was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    /// The initial capacity was zero.
    #[error("initial capacity must be positive")]
    ZeroCapacity,

    /// The load factor was NaN, infinite, zero or negative.
    #[error("load factor must be finite and positive, got {0}")]
    LoadFactor(f32),

    /// The maximum capacity was below two slots.
    #[error("maximum capacity must be at least 2, got {0}")]
    MaxCapacity(usize),
}
