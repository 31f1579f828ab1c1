use crate::error::InvalidArgument;

/// Slot count used when no initial capacity is given.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1 << 4;

/// Load factor used when none is given.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.5;

/// Hard ceiling on the number of slots a table may allocate.
///
/// A table never holds more than `MAX_CAPACITY - 1` entries.
pub const MAX_CAPACITY: usize = 1 << 30;

/// Construction parameters for a [`ProbeTable`](crate::ProbeTable).
///
/// # Examples
///
/// ```rust
/// use probe_table::Config;
/// use probe_table::ProbeTable;
///
/// let config = Config::new().initial_capacity(64).load_factor(0.75);
/// let table: ProbeTable<u32, u32> = ProbeTable::with_config(config).unwrap();
/// assert_eq!(table.capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub(crate) initial_capacity: usize,
    pub(crate) load_factor: f32,
    pub(crate) max_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            max_capacity: MAX_CAPACITY,
        }
    }
}

impl Config {
    /// Creates a configuration with the default capacity (16), load factor
    /// (0.5) and maximum capacity (2^30).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of slots allocated at construction.
    ///
    /// Values above the maximum capacity are clamped to it.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the ratio of occupied slots at which the table grows.
    pub fn load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Lowers the slot ceiling below [`MAX_CAPACITY`].
    ///
    /// Values above [`MAX_CAPACITY`] are clamped to it.
    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), InvalidArgument> {
        if self.initial_capacity == 0 {
            return Err(InvalidArgument::ZeroCapacity);
        }

        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(InvalidArgument::LoadFactor(self.load_factor));
        }

        if self.max_capacity < 2 {
            return Err(InvalidArgument::MaxCapacity(self.max_capacity));
        }

        Ok(())
    }
}
