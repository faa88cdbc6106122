use crate::hash_table::HashTable;

/// A view into a single entry in the table, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] and [`null_entry`] methods on
/// [`HashTable`].
///
/// [`entry`]: HashTable::entry
/// [`null_entry`]: HashTable::null_entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// *table.entry("a").or_insert(1) += 10;
    /// *table.entry("a").or_insert(1) += 10;
    /// assert_eq!(table.get(&"a"), Some(&21));
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from `default` if the entry is vacant and
    /// returns a mutable reference to the value.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(1).and_modify(|v| *v += 1).or_insert(0);
    /// assert_eq!(table.get(&1), Some(&0));
    /// table.entry(1).and_modify(|v| *v += 1).or_insert(0);
    /// assert_eq!(table.get(&1), Some(&1));
    /// ```
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns this entry's key, or `None` for the null key.
    pub fn key(&self) -> Option<&K> {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the table.
pub struct VacantEntry<'a, K, V> {
    table: &'a mut HashTable<K, V>,
    index: usize,
    key: Option<K>,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    pub(crate) fn new(table: &'a mut HashTable<K, V>, index: usize, key: Option<K>) -> Self {
        Self { table, index, key }
    }

    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> Option<K> {
        self.key
    }

    /// Prepends the key and `value` to the bucket's chain and returns a mutable
    /// reference to the value.
    pub fn insert(self, value: V) -> &'a mut V {
        self.table.push_front(self.index, self.key, value)
    }
}

/// A view into an occupied entry in the table.
///
/// The entry remembers the node's bucket and its position in the chain.
pub struct OccupiedEntry<'a, K, V> {
    table: &'a mut HashTable<K, V>,
    index: usize,
    depth: usize,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    pub(crate) fn new(table: &'a mut HashTable<K, V>, index: usize, depth: usize) -> Self {
        Self {
            table,
            index,
            depth,
        }
    }

    /// Gets a reference to the key in the entry, or `None` for the null key.
    pub fn key(&self) -> Option<&K> {
        self.table.node_at(self.index, self.depth).key.as_ref()
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.node_at(self.index, self.depth).value
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.node_at_mut(self.index, self.depth).value
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.node_at_mut(self.index, self.depth).value
    }

    /// Replaces the value in the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Unlinks the entry from its chain and returns the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Unlinks the entry from its chain and returns the key and value.
    pub fn remove_entry(self) -> (Option<K>, V) {
        let node = *self.table.unlink_at(self.index, self.depth);
        (node.key, node.value)
    }
}
