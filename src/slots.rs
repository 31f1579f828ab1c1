use alloc::boxed::Box;
use alloc::vec::Vec;
use core::iter;

/// A stored key/value pair together with the key's cached hash.
///
/// `hash` and `key` are fixed for the lifetime of the entry; only `value` may
/// change.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    hash: u32,
    key: Option<K>,
    pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(hash: u32, key: Option<K>, value: V) -> Self {
        Self { hash, key, value }
    }

    #[inline(always)]
    pub(crate) fn hash(&self) -> u32 {
        self.hash
    }

    #[inline(always)]
    pub(crate) fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }
}

/// Fixed-length array of optional entries addressed by linear probing.
///
/// Every occupied slot is reachable from its home index, `hash % len`, by
/// stepping forward (with wrap-around) over occupied slots only. The owner
/// must keep at least one slot empty; probing does not terminate on a full
/// array.
#[derive(Clone)]
pub(crate) struct Slots<K, V> {
    slots: Box<[Option<Entry<K, V>>]>,
}

impl<K, V> Slots<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: iter::repeat_with(|| None).take(capacity).collect(),
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    fn home(&self, hash: u32) -> usize {
        hash as usize % self.slots.len()
    }

    #[inline(always)]
    fn next(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() { 0 } else { next }
    }

    #[inline(always)]
    pub(crate) fn get(&self, index: usize) -> Option<&Entry<K, V>> {
        self.slots[index].as_ref()
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Entry<K, V>> {
        self.slots[index].as_mut()
    }

    /// Stores `entry` at `index`, which must be the empty slot returned by
    /// [`Slots::find`] for the entry's key.
    #[inline]
    pub(crate) fn occupy(&mut self, index: usize, entry: Entry<K, V>) {
        debug_assert!(self.slots[index].is_none());
        self.slots[index] = Some(entry);
    }

    /// Places `entry` in the first empty slot at or after its home index.
    ///
    /// Used when rehashing into a fresh array, where no key can already be
    /// present.
    pub(crate) fn place(&mut self, entry: Entry<K, V>) {
        let mut index = self.home(entry.hash);
        while self.slots[index].is_some() {
            index = self.next(index);
        }
        self.slots[index] = Some(entry);
    }

    /// Removes the entry at `index` and closes the gap it leaves.
    ///
    /// Scanning forward from the gap, an entry whose home lies in the cyclic
    /// interval `(gap, scan]` must stay put, since moving it before its home
    /// would make it unreachable. The first entry whose home lies outside that
    /// interval is moved into the gap, and its old slot becomes the new gap.
    /// The scan stops at the first empty slot.
    pub(crate) fn remove(&mut self, index: usize) -> Option<Entry<K, V>> {
        let removed = self.slots[index].take()?;

        let mut gap = index;
        let mut scan = index;
        loop {
            scan = self.next(scan);

            let Some(entry) = &self.slots[scan] else {
                break;
            };

            let home = self.home(entry.hash);
            if in_cyclic_range(gap, home, scan) {
                continue;
            }

            log::trace!("shifting entry from slot {scan} back to slot {gap}");
            self.slots[gap] = self.slots[scan].take();
            gap = scan;
        }

        Some(removed)
    }

    /// Drops every entry, keeping the array length.
    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Consumes the array, yielding its entries in ascending slot order.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = Entry<K, V>> {
        Vec::from(self.slots).into_iter().flatten()
    }

    /// Distance of the entry at `index` from its home index.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn displacement(&self, index: usize) -> Option<usize> {
        let entry = self.get(index)?;
        let home = self.home(entry.hash);
        Some(if index >= home {
            index - home
        } else {
            index + self.slots.len() - home
        })
    }
}

impl<K: PartialEq, V> Slots<K, V> {
    /// Returns the index of the slot holding `key`, or of the empty slot where
    /// it would be inserted.
    pub(crate) fn find(&self, hash: u32, key: Option<&K>) -> usize {
        let mut index = self.home(hash);
        while let Some(entry) = &self.slots[index] {
            if entry.hash() == hash && entry.key() == key {
                break;
            }
            index = self.next(index);
        }
        index
    }
}

/// Whether `home` lies in the cyclic interval `(gap, scan]`.
#[inline(always)]
fn in_cyclic_range(gap: usize, home: usize, scan: usize) -> bool {
    if gap <= scan {
        gap < home && home <= scan
    } else {
        gap < home || home <= scan
    }
}
