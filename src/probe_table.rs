use core::fmt::Debug;
use core::hash::Hash;
use core::mem;

use crate::config::Config;
use crate::error::Error;
use crate::hash::DefaultHashBuilder;
use crate::hash::hash_key;
use crate::sizing::Sizing;
use crate::slots::Entry;
use crate::slots::Slots;

/// Debug statistics for probe table analysis.
///
/// Available under `cfg(test)` or with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Number of slots allocated
    pub capacity: usize,
    /// Entry count at which the next insertion grows the table
    pub threshold: usize,
    /// Measured occupancy (populated / capacity)
    pub occupancy: f64,
    /// Largest distance of any entry from its home slot
    pub max_probe_length: usize,
    /// Mean distance of entries from their home slots
    pub mean_probe_length: f64,
    /// Bytes used by the slot array
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probe Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% occupied, threshold {})",
            self.populated,
            self.capacity,
            self.occupancy * 100.0,
            self.threshold
        );
        println!(
            "Probe length: max {}, mean {:.3}",
            self.max_probe_length, self.mean_probe_length
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// A hash table using open addressing with linear probing.
///
/// `ProbeTable<K, V>` maps keys to values in a single array of slots. A key's
/// hash is computed once, when its entry is created, and cached on the entry
/// for all later probing and resizing. Removal shifts later entries of the
/// probe chain backward instead of leaving tombstones, so lookups never scan
/// past dead slots.
///
/// The absent key (`None`) is a valid key and hashes to `0`. Every key
/// parameter accepts either a plain key or an `Option`.
///
/// The table is not synchronized. Share it across threads only behind an
/// external lock.
///
/// ## Example
///
/// ```rust
/// use probe_table::ProbeTable;
///
/// let mut table: ProbeTable<&str, i32> = ProbeTable::new();
/// assert_eq!(table.insert("apple", 3).unwrap(), None);
/// assert_eq!(table.insert("apple", 5).unwrap(), Some(3));
/// assert_eq!(table.insert(None, 7).unwrap(), None);
///
/// assert_eq!(table.get(&"apple"), Some(&5));
/// assert_eq!(table.get(None), Some(&7));
/// assert_eq!(table.remove(&"apple"), Some(5));
/// assert!(!table.contains_key(&"apple"));
/// ```
#[derive(Clone)]
pub struct ProbeTable<K, V> {
    slots: Slots<K, V>,
    sizing: Sizing,
    len: usize,
    hash_builder: DefaultHashBuilder,
}

impl<K, V> Debug for ProbeTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProbeTable")
            .field("len", &self.len)
            .field("capacity", &self.sizing.capacity())
            .field("threshold", &self.sizing.threshold())
            .field("load_factor", &self.sizing.load_factor())
            .finish()
    }
}

impl<K, V> Default for ProbeTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ProbeTable<K, V> {
    /// Creates an empty table with 16 slots and a load factor of 0.5.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::ProbeTable;
    /// #
    /// let table: ProbeTable<u64, String> = ProbeTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::from_sizing(Sizing::default())
    }

    /// Creates an empty table with `capacity` slots and the default load
    /// factor.
    ///
    /// Capacities above [`MAX_CAPACITY`](crate::MAX_CAPACITY) are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::ProbeTable;
    /// #
    /// let table: ProbeTable<u64, u64> = ProbeTable::with_capacity(100).unwrap();
    /// assert_eq!(table.capacity(), 100);
    /// assert!(ProbeTable::<u64, u64>::with_capacity(0).is_err());
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_config(Config::new().initial_capacity(capacity))
    }

    /// Creates an empty table with `capacity` slots that grows once the ratio
    /// of entries to slots reaches `load_factor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is zero or
    /// `load_factor` is not a finite positive number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::Error;
    /// # use probe_table::InvalidArgument;
    /// # use probe_table::ProbeTable;
    /// #
    /// let table = ProbeTable::<u64, u64>::with_capacity_and_load_factor(32, 0.75);
    /// assert!(table.is_ok());
    ///
    /// let table = ProbeTable::<u64, u64>::with_capacity_and_load_factor(32, f32::NAN);
    /// assert!(matches!(
    ///     table,
    ///     Err(Error::InvalidArgument(InvalidArgument::LoadFactor(_)))
    /// ));
    /// ```
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self, Error> {
        Self::with_config(
            Config::new()
                .initial_capacity(capacity)
                .load_factor(load_factor),
        )
    }

    /// Creates an empty table from a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any parameter is out of range.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        Ok(Self::from_sizing(Sizing::new(&config)?))
    }

    fn from_sizing(sizing: Sizing) -> Self {
        Self {
            slots: Slots::new(sizing.capacity()),
            sizing,
            len: 0,
            hash_builder: DefaultHashBuilder::default(),
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots currently allocated.
    ///
    /// The table grows before every slot is occupied, so this is always
    /// strictly greater than [`len`](Self::len).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Removes every entry, keeping the allocated slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::ProbeTable;
    /// #
    /// let mut table: ProbeTable<u32, u32> = ProbeTable::new();
    /// for k in 0..20u32 {
    ///     table.insert(k, k).unwrap();
    /// }
    /// let capacity = table.capacity();
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }

    #[cold]
    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = self.sizing.grow();

        log::debug!(
            "growing probe table from {old_capacity} to {new_capacity} slots ({} entries, next threshold {})",
            self.len,
            self.sizing.threshold()
        );

        let old = mem::replace(&mut self.slots, Slots::new(new_capacity));
        for entry in old.into_entries() {
            self.slots.place(entry);
        }
    }

    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Available under `cfg(test)` or with the `stats` feature.
    ///
    /// The probe length of an entry is its distance, in slots and with
    /// wrap-around, from its home slot `hash % capacity`. Index `i` of the
    /// returned vector counts the entries with probe length `i`; the vector is
    /// as long as the largest probe length plus one, or empty for an empty
    /// table.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> alloc::vec::Vec<usize> {
        let mut hist = alloc::vec::Vec::new();

        for index in 0..self.slots.len() {
            if let Some(distance) = self.slots.displacement(index) {
                if hist.len() <= distance {
                    hist.resize(distance + 1, 0);
                }
                hist[distance] += 1;
            }
        }

        hist
    }

    /// Returns detailed probe and utilization statistics for debugging.
    ///
    /// Available under `cfg(test)` or with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let hist = self.probe_histogram();
        let total_probe: usize = hist.iter().enumerate().map(|(i, n)| i * n).sum();

        DebugStats {
            populated: self.len,
            capacity: self.slots.len(),
            threshold: self.sizing.threshold(),
            occupancy: self.len as f64 / self.slots.len() as f64,
            max_probe_length: hist.len().saturating_sub(1),
            mean_probe_length: if self.len == 0 {
                0.0
            } else {
                total_probe as f64 / self.len as f64
            },
            total_bytes: self.slots.len() * mem::size_of::<Option<Entry<K, V>>>(),
        }
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    ///
    /// Requires the `std` feature and either `cfg(test)` or the `stats`
    /// feature.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = *hist.iter().max().unwrap_or(&0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.len);

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            match units % 8 {
                1 => bar.push('▏'),
                2 => bar.push('▎'),
                3 => bar.push('▍'),
                4 => bar.push('▌'),
                5 => bar.push('▋'),
                6 => bar.push('▊'),
                7 => bar.push('▉'),
                _ => {}
            }
            bar
        };

        for (i, &count) in hist.iter().enumerate() {
            println!("{:>3} | {} ({})", i, make_bar(count), count);
        }
    }
}

impl<K, V> ProbeTable<K, V>
where
    K: Hash + Eq,
{
    #[inline]
    fn find(&self, key: Option<&K>) -> usize {
        let hash = hash_key(&self.hash_builder, key);
        self.slots.find(hash, key)
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, `Ok(None)` is returned.
    /// If the table did have this key present, the value is updated, and the
    /// old value is returned. The stored key is left untouched.
    ///
    /// The table grows after an insertion brings it to its threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the key is new and the table
    /// already holds the maximum number of entries. The table is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::ProbeTable;
    /// #
    /// let mut table: ProbeTable<&str, i32> = ProbeTable::new();
    /// assert_eq!(table.insert("x", 1).unwrap(), None);
    /// assert_eq!(table.insert("x", 2).unwrap(), Some(1));
    /// assert_eq!(table.get(&"x"), Some(&2));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, key: impl Into<Option<K>>, value: V) -> Result<Option<V>, Error> {
        let key = key.into();
        let hash = hash_key(&self.hash_builder, key.as_ref());
        let index = self.slots.find(hash, key.as_ref());

        if let Some(entry) = self.slots.get_mut(index) {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }

        let max_len = self.sizing.max_len();
        if self.len >= max_len {
            log::warn!("rejecting insertion: probe table is full at {max_len} entries");
            return Err(Error::CapacityExceeded { max_len });
        }

        self.slots.occupy(index, Entry::new(hash, key, value));
        self.len += 1;

        if self.sizing.should_grow(self.len) {
            self.grow();
        }

        Ok(None)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::ProbeTable;
    /// #
    /// let mut table: ProbeTable<i32, &str> = ProbeTable::new();
    /// table.insert(1, "a").unwrap();
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    pub fn get<'q>(&self, key: impl Into<Option<&'q K>>) -> Option<&V>
    where
        K: 'q,
    {
        let index = self.find(key.into());
        self.slots.get(index).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::ProbeTable;
    /// #
    /// let mut table: ProbeTable<i32, &str> = ProbeTable::new();
    /// table.insert(1, "a").unwrap();
    /// if let Some(x) = table.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(table.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<'q>(&mut self, key: impl Into<Option<&'q K>>) -> Option<&mut V>
    where
        K: 'q,
    {
        let index = self.find(key.into());
        self.slots.get_mut(index).map(|entry| &mut entry.value)
    }

    /// Returns `true` if the table contains a value for the specified key.
    pub fn contains_key<'q>(&self, key: impl Into<Option<&'q K>>) -> bool
    where
        K: 'q,
    {
        let index = self.find(key.into());
        self.slots.get(index).is_some()
    }

    /// Removes a key from the table, returning the value at the key if the key
    /// was previously in the table.
    ///
    /// Entries further along the key's probe chain are shifted back so that
    /// every remaining key stays reachable. The table never shrinks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_table::ProbeTable;
    /// #
    /// let mut table: ProbeTable<i32, &str> = ProbeTable::new();
    /// table.insert(1, "a").unwrap();
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove<'q>(&mut self, key: impl Into<Option<&'q K>>) -> Option<V>
    where
        K: 'q,
    {
        let index = self.find(key.into());
        let entry = self.slots.remove(index)?;
        self.len -= 1;
        Some(entry.value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use hashbrown::HashMap;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::MAX_CAPACITY;
    use crate::error::InvalidArgument;

    /// Finds `count` distinct keys sharing a home slot in a table of
    /// `capacity` slots.
    fn colliding_keys(capacity: usize, count: usize) -> Vec<u64> {
        let builder = DefaultHashBuilder::default();
        let mut buckets: Vec<Vec<u64>> = vec![Vec::new(); capacity];
        for k in 0u64.. {
            let home = hash_key(&builder, Some(&k)) as usize % capacity;
            buckets[home].push(k);
            if buckets[home].len() == count {
                return buckets.swap_remove(home);
            }
        }
        unreachable!()
    }

    fn assert_all_reachable(table: &ProbeTable<u64, u64>, oracle: &HashMap<u64, u64>) {
        assert_eq!(table.len(), oracle.len());
        for (k, v) in oracle {
            assert_eq!(table.get(k), Some(v), "{:#?}", table);
        }
    }

    #[test]
    fn new_table_is_empty() {
        let table: ProbeTable<u64, u64> =
            ProbeTable::with_capacity_and_load_factor(16, 0.5).unwrap();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.sizing.threshold(), 8);
    }

    #[test]
    fn invalid_construction() {
        assert_eq!(
            ProbeTable::<u64, u64>::with_capacity(0).unwrap_err(),
            Error::InvalidArgument(InvalidArgument::ZeroCapacity)
        );
        assert_eq!(
            ProbeTable::<u64, u64>::with_capacity_and_load_factor(16, 0.0).unwrap_err(),
            Error::InvalidArgument(InvalidArgument::LoadFactor(0.0))
        );
        assert_eq!(
            ProbeTable::<u64, u64>::with_capacity_and_load_factor(16, -2.0).unwrap_err(),
            Error::InvalidArgument(InvalidArgument::LoadFactor(-2.0))
        );
        assert!(ProbeTable::<u64, u64>::with_capacity_and_load_factor(16, f32::NAN).is_err());
    }

    #[test]
    fn oversized_capacity_is_clamped() {
        let config = Config::new().initial_capacity(usize::MAX).max_capacity(64);
        let table: ProbeTable<u64, u64> = ProbeTable::with_config(config).unwrap();
        assert_eq!(table.capacity(), 64);

        let sizing = Sizing::new(&Config::new().initial_capacity(usize::MAX)).unwrap();
        assert_eq!(sizing.capacity(), MAX_CAPACITY);
    }

    #[test]
    fn reaching_threshold_grows() {
        let mut table: ProbeTable<u64, u64> =
            ProbeTable::with_capacity_and_load_factor(16, 0.5).unwrap();
        for k in 0..7u64 {
            table.insert(k, k * 10).unwrap();
        }
        assert_eq!(table.capacity(), 16);

        table.insert(7, 70).unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.sizing.threshold(), 16);

        table.insert(8, 80).unwrap();
        assert_eq!(table.len(), 9);
        assert_eq!(table.capacity(), 32);
        for k in 0..9u64 {
            assert_eq!(table.get(&k), Some(&(k * 10)));
        }
    }

    #[test]
    fn inexact_load_factor_grows_at_truncated_threshold() {
        let mut table: ProbeTable<u64, u64> =
            ProbeTable::with_capacity_and_load_factor(10, 0.7).unwrap();
        for k in 0..6u64 {
            table.insert(k, k).unwrap();
        }
        assert_eq!(table.capacity(), 10);

        table.insert(6, 6).unwrap();
        assert_eq!(table.capacity(), 20);
        assert_eq!(table.sizing.threshold(), 14);

        for k in 7..13u64 {
            table.insert(k, k).unwrap();
        }
        assert_eq!(table.capacity(), 20);
        table.insert(13, 13).unwrap();
        assert_eq!(table.capacity(), 40);
        for k in 0..14u64 {
            assert_eq!(table.get(&k), Some(&k));
        }
    }

    #[test]
    fn overwrite_returns_previous() {
        let mut table: ProbeTable<String, u32> = ProbeTable::new();
        assert_eq!(table.insert("x".to_string(), 1).unwrap(), None);
        assert_eq!(table.insert("x".to_string(), 2).unwrap(), Some(1));
        assert_eq!(table.get(&"x".to_string()), Some(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn remove_missing_from_empty() {
        let mut table: ProbeTable<String, u32> = ProbeTable::new();
        assert_eq!(table.remove(&"missing".to_string()), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn remove_then_absent() {
        let mut table: ProbeTable<u64, u64> = ProbeTable::new();
        for k in 0..5u64 {
            table.insert(k, k).unwrap();
        }
        assert_eq!(table.remove(&3), Some(3));
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(&3), None);
        assert!(!table.contains_key(&3));

        assert_eq!(table.remove(&3), None);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn remove_from_collision_chain() {
        let keys = colliding_keys(16, 3);
        let (a, b, c) = (keys[0], keys[1], keys[2]);

        let mut table: ProbeTable<u64, u32> = ProbeTable::new();
        table.insert(a, 1).unwrap();
        table.insert(b, 2).unwrap();
        table.insert(c, 3).unwrap();
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.probe_histogram(), vec![1, 1, 1]);

        assert_eq!(table.remove(&b), Some(2));
        assert_eq!(table.get(&c), Some(&3));
        assert_eq!(table.get(&a), Some(&1));
        assert_eq!(table.probe_histogram(), vec![1, 1]);

        assert_eq!(table.remove(&a), Some(1));
        assert_eq!(table.get(&c), Some(&3));
        assert_eq!(table.probe_histogram(), vec![1]);
    }

    #[test]
    fn absent_key() {
        let mut table: ProbeTable<&str, u32> = ProbeTable::new();
        assert!(!table.contains_key(None));
        assert_eq!(table.insert(None, 1).unwrap(), None);
        assert_eq!(table.insert("a", 2).unwrap(), None);
        assert_eq!(table.insert(None, 3).unwrap(), Some(1));

        assert_eq!(table.get(None), Some(&3));
        assert!(table.contains_key(None));
        assert_eq!(table.len(), 2);

        assert_eq!(table.remove(None), Some(3));
        assert_eq!(table.get(None), None);
        assert_eq!(table.get(&"a"), Some(&2));
    }

    #[test]
    fn absent_key_survives_growth() {
        let mut table: ProbeTable<u64, u64> = ProbeTable::with_capacity(2).unwrap();
        table.insert(None, u64::MAX).unwrap();
        for k in 0..100u64 {
            table.insert(k, k).unwrap();
        }
        assert_eq!(table.get(None), Some(&u64::MAX));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table: ProbeTable<u64, u64> = ProbeTable::new();
        for k in 0..5u64 {
            table.insert(k, 1u64).unwrap();
        }
        for k in 0..5u64 {
            if let Some(v) = table.get_mut(&k) {
                *v += 9;
            }
        }
        for k in 0..5u64 {
            assert_eq!(table.get(&k), Some(&10));
        }
        assert!(table.get_mut(&99).is_none());
    }

    #[test]
    fn capacity_exceeded() {
        let config = Config::new()
            .initial_capacity(2)
            .load_factor(0.5)
            .max_capacity(8);
        let mut table: ProbeTable<u64, u64> = ProbeTable::with_config(config).unwrap();
        for k in 0..7u64 {
            table.insert(k, k).unwrap();
        }
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.len(), 7);

        assert_eq!(
            table.insert(7, 7),
            Err(Error::CapacityExceeded { max_len: 7 })
        );
        assert_eq!(table.len(), 7);
        assert!(!table.contains_key(&7));

        // Existing keys can still be overwritten at the ceiling.
        assert_eq!(table.insert(3, 30), Ok(Some(3)));

        // Removing makes room again.
        assert_eq!(table.remove(&0), Some(0));
        assert_eq!(table.insert(7, 7), Ok(None));
        for k in 1..8u64 {
            assert!(table.contains_key(&k));
        }
    }

    #[test]
    fn load_factor_above_one_keeps_an_empty_slot() {
        let mut table: ProbeTable<u64, u64> =
            ProbeTable::with_capacity_and_load_factor(4, 10.0).unwrap();
        for k in 0..64u64 {
            table.insert(k, k).unwrap();
            assert!(table.len() < table.capacity());
        }
        for k in 0..64u64 {
            assert_eq!(table.get(&k), Some(&k));
        }
        assert_eq!(table.get(&64), None);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut table: ProbeTable<u64, u64> = ProbeTable::new();
        for k in 0..100u64 {
            table.insert(k, k).unwrap();
        }
        let capacity = table.capacity();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.get(&5), None);

        table.insert(5, 50).unwrap();
        assert_eq!(table.get(&5), Some(&50));
    }

    #[test]
    fn clone_is_independent() {
        let mut table: ProbeTable<u64, String> = ProbeTable::new();
        for k in 0..20u64 {
            table.insert(k, k.to_string()).unwrap();
        }
        let cloned = table.clone();
        table.remove(&3);
        table.insert(100, "x".to_string()).unwrap();

        assert_eq!(cloned.len(), 20);
        assert_eq!(cloned.get(&3).map(String::as_str), Some("3"));
        assert_eq!(cloned.get(&100), None);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn insert_many() {
        let mut table: ProbeTable<u64, u64> = ProbeTable::new();
        for k in 0..100000u64 {
            assert_eq!(table.insert(k, k * 2).unwrap(), None);
        }
        assert_eq!(table.len(), 100000);
        for k in 0..100000u64 {
            assert_eq!(table.get(&k), Some(&(k * 2)));
        }
        assert!(table.get(&100000).is_none());

        for k in (0..100000u64).step_by(2) {
            assert_eq!(table.remove(&k), Some(k * 2));
        }
        assert_eq!(table.len(), 50000);
        for k in 0..100000u64 {
            assert_eq!(table.contains_key(&k), k % 2 == 1);
        }
    }

    #[test]
    fn random_operations_match_model() {
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let mut table: ProbeTable<u64, u64> = ProbeTable::with_capacity(1).unwrap();
        let mut oracle = HashMap::new();

        for step in 0..20000u64 {
            let key = rng.random_range(0..512u64);
            match rng.random_range(0..3u8) {
                0 | 1 => {
                    assert_eq!(table.insert(key, step).unwrap(), oracle.insert(key, step));
                }
                _ => {
                    assert_eq!(table.remove(&key), oracle.remove(&key));
                }
            }
            assert_eq!(table.len(), oracle.len());
            assert!(table.len() < table.capacity());

            if step % 1000 == 0 {
                assert_all_reachable(&table, &oracle);
            }
        }
        assert_all_reachable(&table, &oracle);
    }

    #[test]
    fn dense_removal_keeps_chains_intact() {
        // A load factor just under one makes long, wrapping clusters.
        let mut table: ProbeTable<u64, u64> =
            ProbeTable::with_capacity_and_load_factor(64, 0.95).unwrap();
        let mut oracle = HashMap::new();
        for k in 0..59u64 {
            table.insert(k, k).unwrap();
            oracle.insert(k, k);
        }
        assert_eq!(table.capacity(), 64);

        let mut rng = SmallRng::seed_from_u64(42);
        while !oracle.is_empty() {
            let key = rng.random_range(0..59u64);
            assert_eq!(table.remove(&key), oracle.remove(&key));
            assert_all_reachable(&table, &oracle);
        }
        assert!(table.is_empty());
    }

    #[test]
    fn stats_track_population() {
        let mut table: ProbeTable<u64, u64> = ProbeTable::new();
        let empty = table.debug_stats();
        assert_eq!(empty.populated, 0);
        assert_eq!(empty.max_probe_length, 0);
        assert_eq!(empty.mean_probe_length, 0.0);
        assert!(table.probe_histogram().is_empty());

        for k in 0..1000u64 {
            table.insert(k, k).unwrap();
        }
        let stats = table.debug_stats();
        assert_eq!(stats.populated, 1000);
        assert_eq!(stats.capacity, table.capacity());
        assert_eq!(stats.capacity, 2048);
        assert_eq!(stats.threshold, 1024);
        assert!(stats.occupancy < 0.5);
        assert_eq!(table.probe_histogram().iter().sum::<usize>(), 1000);
        assert_eq!(stats.max_probe_length + 1, table.probe_histogram().len());
    }

    #[test]
    #[cfg(feature = "std")]
    fn histogram_output() {
        let mut table: ProbeTable<u64, u64> = ProbeTable::new();
        table.print_probe_histogram();
        for k in 0..500u64 {
            table.insert(k, k).unwrap();
        }
        table.print_probe_histogram();
        table.debug_stats().print();
    }

    #[test]
    fn debug_reports_shape() {
        let mut table: ProbeTable<u64, u64> = ProbeTable::new();
        table.insert(1u64, 1u64).unwrap();
        assert_eq!(
            alloc::format!("{:?}", table),
            "ProbeTable { len: 1, capacity: 16, threshold: 8, load_factor: 0.5 }"
        );
    }
}
