//! Key hashing.
//!
//! Every key is hashed once, when its entry is created, and the result is
//! cached on the entry for probing and rehashing. Hashes are 31-bit
//! non-negative values so they can be reduced modulo any capacity.

use core::hash::BuildHasher;
use core::hash::Hash;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used for all keys.
        ///
        /// Fixed-seed, so a key hashes identically in every table of a build.
        pub type DefaultHashBuilder = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used for all keys.
        ///
        /// Fixed-seed, so a key hashes identically in every table of a build.
        pub type DefaultHashBuilder = std::hash::BuildHasherDefault<std::hash::DefaultHasher>;
    } else {
        compile_error!("either the `foldhash` or the `std` feature must be enabled");
    }
}

/// Clears the sign bit of a 32-bit hash.
pub(crate) const HASH_MASK: u32 = u32::MAX >> 1;

/// Hashes a key, treating the absent key as hash `0`.
#[inline]
pub(crate) fn hash_key<K: Hash>(builder: &DefaultHashBuilder, key: Option<&K>) -> u32 {
    match key {
        None => 0,
        Some(key) => fold(builder.hash_one(key)) & HASH_MASK,
    }
}

#[inline(always)]
fn fold(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}
