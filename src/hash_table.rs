use alloc::boxed::Box;
use alloc::vec::Vec;
use core::alloc::Layout;
use core::fmt::Debug;
use core::hash::Hash;

use tracing::debug;
use tracing::trace;

use crate::entry::Entry;
use crate::entry::OccupiedEntry;
use crate::entry::VacantEntry;
use crate::error::TryReserveError;
use crate::iter::Drain;
use crate::iter::IntoIter;
use crate::iter::Iter;
use crate::iter::IterMut;
use crate::iter::Keys;
use crate::iter::Values;
use crate::iter::ValuesMut;
use crate::key::bucket_index;
use crate::key::hash_key;
use crate::key::keys_match;

/// Bucket count used by [`HashTable::new`] and [`Default`].
pub const DEFAULT_CAPACITY: usize = 16;

const LIVE_NODE: &str = "entry position refers to a live node";

/// Smallest entry count that forces growth before the next insertion, i.e.
/// `ceil(capacity * 0.75)`.
#[inline(always)]
fn growth_threshold(capacity: usize) -> usize {
    (capacity as u128 * 3).div_ceil(4) as usize
}

/// Doubles `current` until `required` entries fit below the growth threshold.
fn target_capacity(current: usize, required: usize) -> Option<usize> {
    let mut capacity = current.max(1);
    while growth_threshold(capacity) < required {
        capacity = capacity.checked_mul(2)?;
    }
    Some(capacity)
}

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// One key-value pair and the owning link to the rest of its chain.
pub(crate) struct Node<K, V> {
    pub(crate) key: Option<K>,
    pub(crate) value: V,
    pub(crate) next: Link<K, V>,
}

fn alloc_buckets<K, V>(capacity: usize) -> Box<[Link<K, V>]> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets.into_boxed_slice()
}

fn try_alloc_buckets<K, V>(capacity: usize) -> Result<Box<[Link<K, V>]>, TryReserveError> {
    if Layout::array::<Link<K, V>>(capacity).is_err() {
        return Err(TryReserveError::CapacityOverflow);
    }

    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|_| TryReserveError::AllocError { buckets: capacity })?;
    buckets.resize_with(capacity, || None);
    Ok(buckets.into_boxed_slice())
}

/// Drops a chain node by node.
///
/// Letting a `Box` chain drop on its own recurses once per node.
fn drop_chain<K, V>(mut head: Link<K, V>) {
    while let Some(mut node) = head {
        head = node.next.take();
    }
}

/// A hash table using separate chaining.
///
/// Every bucket holds the head of a singly linked chain of entries whose keys
/// reduce to that bucket. New keys are prepended to their chain. When an
/// insertion finds the table at 75% load (`len >= capacity * 0.75`), the
/// bucket count doubles and every node is relinked into the new bucket array
/// before the insertion proceeds. Removal unlinks the node directly, so there
/// are no tombstones, and the bucket array never shrinks.
///
/// Besides ordinary keys the table holds at most one entry for the *null
/// key*, addressed through the `*_null` methods. It hashes to a fixed value
/// and therefore always lives in bucket 0.
///
/// Iteration order is unspecified and changes when the table grows.
///
/// # Key contract
///
/// A key's [`Hash`] and [`Eq`] implementations must agree with each other and
/// must not change while the key is in the table. The table cannot detect a
/// violation; the affected entries become unreachable by lookup but are still
/// dropped with the table.
///
/// ## Example
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table = HashTable::new();
/// assert_eq!(table.insert("apple", 3), None);
/// assert_eq!(table.insert("apple", 5), Some(3));
/// assert_eq!(table.get(&"apple"), Some(&5));
///
/// table.insert_null(0);
/// assert_eq!(table.get_null(), Some(&0));
///
/// assert_eq!(table.remove(&"apple"), Some(5));
/// assert_eq!(table.len(), 1);
/// ```
pub struct HashTable<K, V> {
    pub(crate) buckets: Box<[Link<K, V>]>,
    pub(crate) len: usize,
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let table: HashTable<u32, String> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with exactly `capacity` buckets.
    ///
    /// A bucket array always has at least one bucket, so a `capacity` of 0 is
    /// raised to 1. Use [`try_with_capacity`] to reject it instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let table: HashTable<u32, u32> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 100);
    ///
    /// let table: HashTable<u32, u32> = HashTable::with_capacity(0);
    /// assert_eq!(table.capacity(), 1);
    /// ```
    ///
    /// [`try_with_capacity`]: HashTable::try_with_capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: alloc_buckets(capacity.max(1)),
            len: 0,
        }
    }

    /// Creates an empty table with exactly `capacity` buckets, reporting
    /// invalid capacities and allocation failure as an error.
    ///
    /// # Errors
    ///
    /// Returns [`TryReserveError::ZeroCapacity`] if `capacity` is 0,
    /// [`TryReserveError::CapacityOverflow`] if the bucket array would exceed
    /// `isize::MAX` bytes and [`TryReserveError::AllocError`] if it cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// # use chain_hash::TryReserveError;
    /// #
    /// let table = HashTable::<u32, u32>::try_with_capacity(64).unwrap();
    /// assert_eq!(table.capacity(), 64);
    ///
    /// assert_eq!(
    ///     HashTable::<u32, u32>::try_with_capacity(0).err(),
    ///     Some(TryReserveError::ZeroCapacity)
    /// );
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        if capacity == 0 {
            return Err(TryReserveError::ZeroCapacity);
        }

        Ok(Self {
            buckets: try_alloc_buckets(capacity)?,
            len: 0,
        })
    }

    /// Returns the number of entries in the table, including the null-key
    /// entry if present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.len(), 0);
    /// table.insert(1, "a");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    ///
    /// This is the bucket count, not the number of entries the table accepts
    /// before growing; growth happens once `len() >= capacity() * 0.75`.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Ratio of entries to buckets.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Removes all entries. The bucket count is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for i in 0..100 {
    ///     table.insert(i, i);
    /// }
    /// let capacity = table.capacity();
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        for slot in self.buckets.iter_mut() {
            drop_chain(slot.take());
        }
        self.len = 0;
    }

    /// Keeps only the entries for which `f` returns `true`.
    ///
    /// The predicate receives `None` as the key of the null-key entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table: HashTable<u32, u32> = (0..10).map(|i| (i, i * 10)).collect();
    /// table.retain(|_, value| *value % 20 == 0);
    /// assert_eq!(table.len(), 5);
    /// assert_eq!(table.get(&2), Some(&20));
    /// assert_eq!(table.get(&3), None);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(Option<&K>, &mut V) -> bool) {
        let HashTable { buckets, len } = self;
        for slot in buckets.iter_mut() {
            let mut chain = slot.take();
            let mut tail = slot;
            while let Some(mut node) = chain {
                chain = node.next.take();
                if f(node.key.as_ref(), &mut node.value) {
                    tail = &mut tail.insert(node).next;
                } else {
                    *len -= 1;
                }
            }
        }
    }

    /// Returns an iterator over the entries in unspecified order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert("a", 1);
    /// table.insert("b", 2);
    /// table.insert_null(3);
    ///
    /// let mut total = 0;
    /// for (key, value) in table.iter() {
    ///     if key.is_none() {
    ///         assert_eq!(*value, 3);
    ///     }
    ///     total += value;
    /// }
    /// assert_eq!(total, 6);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buckets, self.len)
    }

    /// Returns an iterator that allows modifying each value.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.buckets, self.len)
    }

    /// Returns an iterator over the keys. The null key appears as `None`.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes every entry, yielding them by value.
    ///
    /// The table is empty once the iterator is dropped, even if it was not
    /// fully consumed. The bucket count is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// table.insert(2, "b");
    ///
    /// let drained: Vec<_> = table.drain().collect();
    /// assert_eq!(drained.len(), 2);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain::new(self)
    }

    pub(crate) fn node_at(&self, index: usize, depth: usize) -> &Node<K, V> {
        let mut cursor = self.buckets[index].as_deref();
        for _ in 0..depth {
            cursor = cursor.and_then(|node| node.next.as_deref());
        }
        cursor.expect(LIVE_NODE)
    }

    pub(crate) fn node_at_mut(&mut self, index: usize, depth: usize) -> &mut Node<K, V> {
        let mut cursor = self.buckets[index].as_deref_mut();
        for _ in 0..depth {
            cursor = cursor.and_then(|node| node.next.as_deref_mut());
        }
        cursor.expect(LIVE_NODE)
    }

    /// Prepends a new node to the chain at `index`.
    pub(crate) fn push_front(&mut self, index: usize, key: Option<K>, value: V) -> &mut V {
        let slot = &mut self.buckets[index];
        let next = slot.take();
        self.len += 1;
        &mut slot.insert(Box::new(Node { key, value, next })).value
    }

    /// Unlinks the node `depth` steps down the chain at `index`.
    pub(crate) fn unlink_at(&mut self, index: usize, depth: usize) -> Box<Node<K, V>> {
        let mut slot = &mut self.buckets[index];
        for _ in 0..depth {
            slot = &mut slot.as_mut().expect(LIVE_NODE).next;
        }
        let mut node = slot.take().expect(LIVE_NODE);
        *slot = node.next.take();
        self.len -= 1;
        node
    }
}

impl<K, V> HashTable<K, V>
where
    K: Hash + Eq,
{
    /// Bucket position of `key` under the current bucket array.
    #[inline]
    fn locate(&self, key: Option<&K>) -> usize {
        bucket_index(hash_key(key), self.buckets.len())
    }

    fn find(&self, key: Option<&K>) -> Option<&Node<K, V>> {
        let mut cursor = self.buckets[self.locate(key)].as_deref();
        while let Some(node) = cursor {
            if keys_match(&node.key, key) {
                return Some(node);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    fn find_mut(&mut self, index: usize, key: Option<&K>) -> Option<&mut Node<K, V>> {
        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(node) = cursor {
            if keys_match(&node.key, key) {
                return Some(node);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    fn depth_of(&self, index: usize, key: Option<&K>) -> Option<usize> {
        let mut cursor = self.buckets[index].as_deref();
        let mut depth = 0;
        while let Some(node) = cursor {
            if keys_match(&node.key, key) {
                return Some(depth);
            }
            cursor = node.next.as_deref();
            depth += 1;
        }
        None
    }

    /// Unlinks the node holding `key`, tracking the owning slot while walking
    /// so the predecessor's link (or the bucket head) can be repointed.
    fn unlink(&mut self, key: Option<&K>) -> Option<Box<Node<K, V>>> {
        let index = self.locate(key);
        let mut slot = &mut self.buckets[index];
        while slot
            .as_ref()
            .is_some_and(|node| !keys_match(&node.key, key))
        {
            slot = &mut slot.as_mut()?.next;
        }

        let mut node = slot.take()?;
        *slot = node.next.take();
        self.len -= 1;
        Some(node)
    }

    #[inline]
    fn maybe_grow(&mut self) {
        if self.len >= growth_threshold(self.buckets.len()) {
            self.grow();
        }
    }

    #[cold]
    fn grow(&mut self) {
        let capacity = self
            .buckets
            .len()
            .checked_mul(2)
            .expect("bucket count overflow");
        self.rehash_into(alloc_buckets(capacity));
    }

    /// Moves every node into `buckets`, which must be empty.
    ///
    /// Nodes are relinked, never reallocated. Each node's `next` is detached
    /// before the node is prepended to its new chain, which reverses the
    /// relative order of nodes that stay together.
    fn rehash_into(&mut self, buckets: Box<[Link<K, V>]>) {
        let old = core::mem::replace(&mut self.buckets, buckets);
        let capacity = self.buckets.len();
        trace!(
            from = old.len(),
            to = capacity,
            len = self.len,
            "Rehashing bucket array."
        );

        for mut head in old.into_vec() {
            while let Some(mut node) = head {
                head = node.next.take();
                let index = bucket_index(hash_key(node.key.as_ref()), capacity);
                node.next = self.buckets[index].take();
                self.buckets[index] = Some(node);
            }
        }
    }

    fn insert_impl(&mut self, key: Option<K>, value: V) -> Option<V> {
        self.maybe_grow();

        let index = self.locate(key.as_ref());
        if let Some(node) = self.find_mut(index, key.as_ref()) {
            return Some(core::mem::replace(&mut node.value, value));
        }

        self.push_front(index, key, value);
        None
    }

    fn entry_impl(&mut self, key: Option<K>) -> Entry<'_, K, V> {
        self.maybe_grow();

        let index = self.locate(key.as_ref());
        match self.depth_of(index, key.as_ref()) {
            Some(depth) => Entry::Occupied(OccupiedEntry::new(self, index, depth)),
            None => Entry::Vacant(VacantEntry::new(self, index, key)),
        }
    }

    /// Inserts a key-value pair.
    ///
    /// If the key was absent, a new entry is prepended to its chain and
    /// `None` is returned. Otherwise the value is replaced in place and the
    /// previous value is returned; the key itself is not updated.
    ///
    /// Growth is checked before the lookup, so an update of an existing key
    /// can also double the bucket count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.insert(37, "a"), None);
    /// assert_eq!(table.insert(37, "b"), Some("a"));
    /// assert_eq!(table.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_impl(Some(key), value)
    }

    /// Inserts a value for the null key, returning the previous one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table: HashTable<String, u32> = HashTable::new();
    /// assert_eq!(table.insert_null(1), None);
    /// assert_eq!(table.insert_null(2), Some(1));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert_null(&mut self, value: V) -> Option<V> {
        self.insert_impl(None, value)
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(Some(key)).map(|node| &node.value)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(Some(key))
            .and_then(|node| node.key.as_ref().map(|stored| (stored, &node.value)))
    }

    /// Returns the value stored for the null key.
    pub fn get_null(&self) -> Option<&V> {
        self.find(None).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1, String::from("a"));
    /// if let Some(value) = table.get_mut(&1) {
    ///     value.push('b');
    /// }
    /// assert_eq!(table.get(&1).map(String::as_str), Some("ab"));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.locate(Some(key));
        self.find_mut(index, Some(key)).map(|node| &mut node.value)
    }

    /// Returns a mutable reference to the value stored for the null key.
    pub fn get_null_mut(&mut self) -> Option<&mut V> {
        let index = self.locate(None);
        self.find_mut(index, None).map(|node| &mut node.value)
    }

    /// Returns `true` if the table holds a value for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(Some(key)).is_some()
    }

    /// Returns `true` if the table holds a value for the null key.
    pub fn contains_null(&self) -> bool {
        self.find(None).is_some()
    }

    /// Removes `key` from the table, returning its value if it was present.
    ///
    /// The bucket count never shrinks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.unlink(Some(key)).map(|node| node.value)
    }

    /// Removes `key` from the table, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = *self.unlink(Some(key))?;
        node.key.map(|stored| (stored, node.value))
    }

    /// Removes the null-key entry, returning its value if it was present.
    pub fn remove_null(&mut self) -> Option<V> {
        self.unlink(None).map(|node| node.value)
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// Like [`insert`], this may grow the table before locating the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut counts = HashTable::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.entry(word).or_insert(0) += 1;
    /// }
    /// assert_eq!(counts.get(&"a"), Some(&2));
    /// assert_eq!(counts.get(&"b"), Some(&1));
    /// ```
    ///
    /// [`insert`]: HashTable::insert
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        self.entry_impl(Some(key))
    }

    /// Gets the entry for the null key.
    pub fn null_entry(&mut self) -> Entry<'_, K, V> {
        self.entry_impl(None)
    }

    /// Reserves room for at least `additional` more entries without further
    /// growth.
    ///
    /// The bucket count keeps doubling until `len() + additional` entries fit
    /// below the growth threshold, and the table is rehashed once. Does
    /// nothing if the current bucket array is already large enough.
    ///
    /// # Panics
    ///
    /// Panics if the new bucket count overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table: HashTable<u32, u32> = HashTable::new();
    /// table.reserve(100);
    /// let capacity = table.capacity();
    /// assert_eq!(capacity, 256);
    ///
    /// for i in 0..100 {
    ///     table.insert(i, i);
    /// }
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len.saturating_add(additional);
        let capacity =
            target_capacity(self.buckets.len(), required).expect("bucket count overflow");
        if capacity != self.buckets.len() {
            self.rehash_into(alloc_buckets(capacity));
        }
    }

    /// Fallible version of [`reserve`].
    ///
    /// # Errors
    ///
    /// Returns [`TryReserveError::CapacityOverflow`] if the bucket count
    /// would overflow `usize` and [`TryReserveError::AllocError`] if the new
    /// bucket array cannot be allocated. The table is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// # use chain_hash::TryReserveError;
    /// #
    /// let mut table: HashTable<u32, u32> = HashTable::new();
    /// assert_eq!(table.try_reserve(20), Ok(()));
    /// assert_eq!(table.capacity(), 32);
    ///
    /// assert_eq!(
    ///     table.try_reserve(usize::MAX),
    ///     Err(TryReserveError::CapacityOverflow)
    /// );
    /// ```
    ///
    /// [`reserve`]: HashTable::reserve
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(TryReserveError::CapacityOverflow)?;
        let capacity = target_capacity(self.buckets.len(), required)
            .ok_or(TryReserveError::CapacityOverflow)?;
        if capacity == self.buckets.len() {
            return Ok(());
        }

        let buckets = try_alloc_buckets(capacity).inspect_err(|error| {
            debug!(%error, capacity, "Failed to reserve bucket array.");
        })?;
        self.rehash_into(buckets);
        Ok(())
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for HashTable<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Clone for HashTable<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Deep-copies every chain, keeping the bucket count and the order of
    /// nodes within each chain.
    fn clone(&self) -> Self {
        let mut buckets = alloc_buckets(self.buckets.len());
        for (slot, source) in buckets.iter_mut().zip(self.buckets.iter()) {
            let mut tail = slot;
            let mut cursor = source.as_deref();
            while let Some(node) = cursor {
                let copy = tail.insert(Box::new(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    next: None,
                }));
                tail = &mut copy.next;
                cursor = node.next.as_deref();
            }
        }

        Self {
            buckets,
            len: self.len,
        }
    }
}

impl<K, V> Drop for HashTable<K, V> {
    fn drop(&mut self) {
        for slot in self.buckets.iter_mut() {
            drop_chain(slot.take());
        }
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V>
where
    K: Hash + Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> IntoIterator for HashTable<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (Option<K>, V);

    fn into_iter(mut self) -> Self::IntoIter {
        let len = core::mem::replace(&mut self.len, 0);
        let buckets = core::mem::take(&mut self.buckets);
        IntoIter::new(buckets, len)
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (Option<&'a K>, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut HashTable<K, V> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (Option<&'a K>, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
