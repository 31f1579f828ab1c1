use crate::config::Config;
use crate::config::DEFAULT_INITIAL_CAPACITY;
use crate::config::DEFAULT_LOAD_FACTOR;
use crate::config::MAX_CAPACITY;
use crate::error::Error;

/// Capacity, load factor and resize threshold of a table.
///
/// The threshold never exceeds `capacity - 1` below the ceiling so that at
/// least one slot stays empty and probing always terminates. Once the ceiling
/// is reached the threshold equals the capacity and growth stops; insertions
/// are then bounded by [`Sizing::max_len`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sizing {
    capacity: usize,
    max_capacity: usize,
    load_factor: f32,
    threshold: usize,
}

impl Default for Sizing {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: MAX_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            threshold: threshold(DEFAULT_INITIAL_CAPACITY, MAX_CAPACITY, DEFAULT_LOAD_FACTOR),
        }
    }
}

impl Sizing {
    pub(crate) fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let max_capacity = config.max_capacity.min(MAX_CAPACITY);
        let capacity = config.initial_capacity.min(max_capacity);

        Ok(Self {
            capacity,
            max_capacity,
            load_factor: config.load_factor,
            threshold: threshold(capacity, max_capacity, config.load_factor),
        })
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub(crate) fn load_factor(&self) -> f32 {
        self.load_factor
    }

    #[inline(always)]
    pub(crate) fn threshold(&self) -> usize {
        self.threshold
    }

    /// Largest number of entries the table may ever hold.
    #[inline(always)]
    pub(crate) fn max_len(&self) -> usize {
        self.max_capacity - 1
    }

    #[inline(always)]
    pub(crate) fn should_grow(&self, len: usize) -> bool {
        len >= self.threshold
    }

    /// Doubles the capacity, capped at the ceiling, and recomputes the
    /// threshold. Returns the new capacity.
    pub(crate) fn grow(&mut self) -> usize {
        self.capacity = (self.capacity << 1).min(self.max_capacity);
        self.threshold = threshold(self.capacity, self.max_capacity, self.load_factor);
        self.capacity
    }
}

fn threshold(capacity: usize, max_capacity: usize, load_factor: f32) -> usize {
    if capacity == max_capacity {
        return max_capacity;
    }

    // `as` saturates, so oversized load factors land on the clamp below.
    let target = (capacity as f32 * load_factor) as usize;
    target.min(capacity - 1)
}
