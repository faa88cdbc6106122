/// The error type for [`HashTable::try_with_capacity`] and
/// [`HashTable::try_reserve`].
///
/// Growth triggered implicitly by [`HashTable::insert`] never returns this
/// error; an allocation failure there is fatal.
///
/// [`HashTable::try_with_capacity`]: crate::HashTable::try_with_capacity
/// [`HashTable::try_reserve`]: crate::HashTable::try_reserve
/// [`HashTable::insert`]: crate::HashTable::insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TryReserveError {
    /// A bucket array must hold at least one bucket.
    #[error("bucket array capacity must be positive")]
    ZeroCapacity,

    /// The requested bucket count does not fit in `usize`.
    #[error("bucket count overflowed usize")]
    CapacityOverflow,

    /// The allocator could not provide the new bucket array.
    #[error("failed to allocate a bucket array of {buckets} buckets")]
    AllocError {
        /// Number of buckets that was requested.
        buckets: usize,
    },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use test_log::test;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            TryReserveError::ZeroCapacity.to_string(),
            "bucket array capacity must be positive"
        );
        assert_eq!(
            TryReserveError::AllocError { buckets: 64 }.to_string(),
            "failed to allocate a bucket array of 64 buckets"
        );
    }
}
