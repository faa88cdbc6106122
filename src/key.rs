//! Key hashing and bucket reduction.
//!
//! The table never stores hashes. Every lookup, insertion and rehash runs the
//! key through the fixed hasher selected here and reduces the result modulo
//! the bucket count that is current at that moment.

use core::hash::BuildHasher;
use core::hash::Hash;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        type KeyHasher = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        type KeyHasher = core::hash::BuildHasherDefault<std::hash::DefaultHasher>;
    } else {
        compile_error!("chain-hash needs the `foldhash` or `std` feature to select a key hasher");
    }
}

/// Hash assigned to the null key.
///
/// The null key always lands in bucket 0, whatever the capacity.
pub(crate) const NULL_KEY_HASH: u64 = 0;

#[inline(always)]
pub(crate) fn hash_key<K: Hash + ?Sized>(key: Option<&K>) -> u64 {
    match key {
        Some(key) => KeyHasher::default().hash_one(key),
        None => NULL_KEY_HASH,
    }
}

/// Reduces `hash` into `0..capacity`.
///
/// Hashes are unsigned, so the remainder can never be negative.
#[inline(always)]
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}

/// Both null, or both present and equal.
#[inline(always)]
pub(crate) fn keys_match<K: Eq>(stored: &Option<K>, probe: Option<&K>) -> bool {
    stored.as_ref() == probe
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn null_key_always_maps_to_first_bucket() {
        for capacity in [1, 2, 3, 16, 17, 1000] {
            assert_eq!(bucket_index(hash_key::<u64>(None), capacity), 0);
        }
    }

    #[test]
    fn index_is_within_capacity() {
        for capacity in [1usize, 7, 16, 31, 4096] {
            for key in 0..500u64 {
                let index = bucket_index(hash_key(Some(&key)), capacity);
                assert!(index < capacity, "{index} >= {capacity}");
            }
        }

        assert_eq!(bucket_index(u64::MAX, 10), (u64::MAX % 10) as usize);
    }

    #[test]
    fn hashing_is_deterministic() {
        let key = "stable";
        assert_eq!(hash_key(Some(key)), hash_key(Some(key)));
        assert_eq!(hash_key(Some(&42u32)), hash_key(Some(&42u32)));
    }

    #[test]
    fn null_matches_only_null() {
        assert!(keys_match::<u8>(&None, None));
        assert!(!keys_match(&None, Some(&0u8)));
        assert!(!keys_match(&Some(0u8), None));
        assert!(keys_match(&Some(3u8), Some(&3)));
        assert!(!keys_match(&Some(3u8), Some(&4)));
    }
}
