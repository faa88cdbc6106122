//! Iterators over [`HashTable`] entries.
//!
//! Every iterator walks the bucket array front to back and each chain from
//! head to tail, so the order is unspecified and changes whenever the table
//! grows.

use alloc::boxed::Box;
use core::iter::FusedIterator;

use crate::hash_table::HashTable;
use crate::hash_table::Link;
use crate::hash_table::Node;

/// An iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::iter`].
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Link<K, V>>,
    chain: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(buckets: &'a [Link<K, V>], len: usize) -> Self {
        Self {
            buckets: buckets.iter(),
            chain: None,
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            chain: self.chain,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Option<&'a K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain {
                self.chain = node.next.as_deref();
                self.remaining -= 1;
                return Some((node.key.as_ref(), &node.value));
            }

            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::iter_mut`].
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Link<K, V>>,
    chain: Option<&'a mut Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(buckets: &'a mut [Link<K, V>], len: usize) -> Self {
        Self {
            buckets: buckets.iter_mut(),
            chain: None,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (Option<&'a K>, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.chain.take() {
                let Node { key, value, next } = node;
                self.chain = next.as_deref_mut();
                self.remaining -= 1;
                return Some((key.as_ref(), value));
            }

            self.chain = self.buckets.next()?.as_deref_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a [`HashTable`]. The null key is yielded as
/// `None`.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = Option<&'a K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`HashTable`].
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An iterator over mutable references to the values of a [`HashTable`].
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// A draining iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::drain`]. Chains are detached one
/// bucket at a time; dropping the iterator drops whatever is left.
pub struct Drain<'a, K, V> {
    table: &'a mut HashTable<K, V>,
    bucket_index: usize,
    chain: Link<K, V>,
}

impl<'a, K, V> Drain<'a, K, V> {
    pub(crate) fn new(table: &'a mut HashTable<K, V>) -> Self {
        Self {
            table,
            bucket_index: 0,
            chain: None,
        }
    }
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (Option<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut node) = self.chain.take() {
                self.chain = node.next.take();
                self.table.len -= 1;
                let node = *node;
                return Some((node.key, node.value));
            }

            let slot = self.table.buckets.get_mut(self.bucket_index)?;
            self.bucket_index += 1;
            self.chain = slot.take();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.len, Some(self.table.len))
    }
}

impl<K, V> Drop for Drain<'_, K, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K, V> FusedIterator for Drain<'_, K, V> {}

/// An owning iterator over the entries of a [`HashTable`].
///
/// This struct is created by the `into_iter` method on [`HashTable`].
pub struct IntoIter<K, V> {
    buckets: alloc::vec::IntoIter<Link<K, V>>,
    chain: Link<K, V>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(buckets: Box<[Link<K, V>]>, len: usize) -> Self {
        Self {
            buckets: buckets.into_vec().into_iter(),
            chain: None,
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (Option<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut node) = self.chain.take() {
                self.chain = node.next.take();
                self.remaining -= 1;
                let node = *node;
                return Some((node.key, node.value));
            }

            self.chain = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use std::collections::HashMap;
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    fn sample() -> HashTable<u32, String> {
        let mut table = HashTable::new();
        for k in 0..40u32 {
            table.insert(k, k.to_string());
        }
        table.insert_null("null".to_string());
        table
    }

    #[test]
    fn iter_visits_every_entry_once() {
        let table = sample();
        let mut iter = table.iter();
        assert_eq!(iter.len(), 41);

        let mut seen = HashMap::new();
        for (key, value) in &mut iter {
            assert!(seen.insert(key.copied(), value.clone()).is_none());
        }
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);

        assert_eq!(seen.len(), 41);
        assert_eq!(seen.get(&None), Some(&"null".to_string()));
        for k in 0..40u32 {
            assert_eq!(seen.get(&Some(k)), Some(&k.to_string()));
        }
    }

    #[test]
    fn keys_and_values() {
        let table = sample();

        let keys: HashSet<Option<u32>> = table.keys().map(|k| k.copied()).collect();
        assert_eq!(keys.len(), 41);
        assert!(keys.contains(&None));
        assert!(keys.contains(&Some(39)));

        let values: HashSet<&str> = table.values().map(String::as_str).collect();
        assert_eq!(values.len(), 41);
        assert!(values.contains("null"));
        assert!(values.contains("0"));
    }

    #[test]
    fn iter_mut_and_values_mut() {
        let mut table = sample();
        for (key, value) in table.iter_mut() {
            if key.is_none() {
                value.push('!');
            }
        }
        assert_eq!(table.get_null(), Some(&"null!".to_string()));

        for value in table.values_mut() {
            value.insert(0, '#');
        }
        assert_eq!(table.get(&7), Some(&"#7".to_string()));
        assert_eq!(table.get_null(), Some(&"#null!".to_string()));

        for (_, value) in &mut table {
            value.clear();
        }
        assert!(table.values().all(String::is_empty));
    }

    #[test]
    fn drain_keeps_capacity() {
        let mut table = sample();
        let capacity = table.capacity();

        let drained: HashMap<Option<u32>, String> = table.drain().collect();
        assert_eq!(drained.len(), 41);
        assert_eq!(drained.get(&Some(3)), Some(&"3".to_string()));
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.get(&3), None);

        table.insert(3, "again".to_string());
        assert_eq!(table.get(&3), Some(&"again".to_string()));
    }

    #[test]
    fn dropped_drain_empties_table() {
        let mut table = sample();
        {
            let mut drain = table.drain();
            assert_eq!(drain.len(), 41);
            drain.next();
            drain.next();
            assert_eq!(drain.len(), 39);
        }
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn into_iter_yields_owned_entries() {
        let table = sample();
        let mut entries: Vec<(Option<u32>, String)> = table.into_iter().collect();
        entries.sort();
        assert_eq!(entries.len(), 41);
        assert_eq!(entries[0], (None, "null".to_string()));
        assert_eq!(entries[1], (Some(0), "0".to_string()));
    }

    #[test]
    fn partially_consumed_into_iter() {
        let table = sample();
        let mut iter = table.into_iter();
        assert_eq!(iter.len(), 41);
        iter.next();
        assert_eq!(iter.len(), 40);
        drop(iter);
    }

    #[test]
    fn empty_table_iterators() {
        let mut table: HashTable<u8, u8> = HashTable::new();
        assert_eq!(table.iter().next(), None);
        assert_eq!(table.iter_mut().next(), None);
        assert_eq!(table.drain().next(), None);
        assert_eq!(table.into_iter().next(), None);
    }
}
