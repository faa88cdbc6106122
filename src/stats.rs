use alloc::vec;
use alloc::vec::Vec;

use crate::hash_table::HashTable;

#[cfg(feature = "std")]
const BAR_WIDTH: usize = 50;

/// Histogram bar length for `count`, scaled so that `max` fills the bar.
#[cfg(feature = "std")]
fn bar_width(count: usize, max: usize) -> usize {
    (count * BAR_WIDTH).checked_div(max).unwrap_or(0)
}

/// Chain length statistics for a [`HashTable`].
///
/// Created by [`HashTable::chain_stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStats {
    /// Number of entries in the table
    pub len: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Buckets with no chain
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Entries per bucket
    pub load_factor: f64,
    /// `histogram[n]` is the number of buckets whose chain holds `n` entries.
    pub histogram: Vec<usize>,
}

impl ChainStats {
    /// Average chain length over non-empty buckets, the expected number of
    /// comparisons for a successful lookup.
    pub fn mean_occupied_chain(&self) -> f64 {
        let occupied = self.capacity - self.empty_buckets;
        if occupied == 0 {
            return 0.0;
        }
        self.len as f64 / occupied as f64
    }

    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Chain Statistics ===");
        println!(
            "Population: {} entries in {} buckets ({:.2}% load factor)",
            self.len,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Empty buckets: {} ({:.2}%)",
            self.empty_buckets,
            self.empty_buckets as f64 / self.capacity as f64 * 100.0
        );
        println!("Longest chain: {}", self.longest_chain);
        println!("Mean occupied chain: {:.3}", self.mean_occupied_chain());

        let max = self.histogram.iter().copied().max().unwrap_or(0);
        for (length, &count) in self.histogram.iter().enumerate() {
            let bar = "#".repeat(bar_width(count, max));
            println!("{:>3} | {} ({})", length, bar, count);
        }
    }
}

impl<K, V> HashTable<K, V> {
    /// Computes chain length statistics for the current bucket array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for i in 0..10 {
    ///     table.insert(i, i);
    /// }
    ///
    /// let stats = table.chain_stats();
    /// assert_eq!(stats.len, 10);
    /// assert_eq!(stats.capacity, 16);
    /// assert_eq!(stats.histogram.iter().sum::<usize>(), 16);
    /// ```
    pub fn chain_stats(&self) -> ChainStats {
        let mut histogram = vec![0usize; 1];
        for slot in self.buckets.iter() {
            let mut length = 0;
            let mut cursor = slot.as_deref();
            while let Some(node) = cursor {
                length += 1;
                cursor = node.next.as_deref();
            }

            if histogram.len() <= length {
                histogram.resize(length + 1, 0);
            }
            histogram[length] += 1;
        }

        ChainStats {
            len: self.len,
            capacity: self.buckets.len(),
            empty_buckets: histogram[0],
            longest_chain: histogram.len() - 1,
            load_factor: self.load_factor(),
            histogram,
        }
    }
}
