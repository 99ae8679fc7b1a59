use core::fmt;
use core::ops::{Bound, Index, RangeBounds};

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::options::TreeOptions;
use crate::raw::{RawRBTree, SubtreeSize};
use crate::rb_tree_map::{IntoIter, Iter, Keys, Range, Values};

mod order_statistic;

/// An ordered map based on an order-statistic red-black tree.
///
/// `OSTreeMap` behaves like [`RBTreeMap`](crate::RBTreeMap), and every node also
/// records the size of its subtree. That makes positional queries O(log n):
///
/// - [`rank`](OSTreeMap::rank) - the number of keys below a present key
/// - [`select`](OSTreeMap::select) - the entry at a sorted position
/// - [`remove_by_rank`](OSTreeMap::remove_by_rank) - removal by sorted position
/// - Indexing by [`Rank`](crate::Rank) - e.g. `map[Rank(0)]` for the first value
///
/// Insertions and removals pay an extra O(log n) walk to keep the sizes exact.
///
/// # Examples
///
/// ```
/// use rbt_index::{OSTreeMap, Rank};
///
/// let mut scores = OSTreeMap::new();
/// scores.insert("Alice", 100);
/// scores.insert("Bob", 85);
/// scores.insert("Carol", 92);
///
/// assert_eq!(scores.rank(&"Bob"), Some(1));
/// assert_eq!(scores.select(2), Ok((&"Carol", &92)));
/// assert_eq!(scores[Rank(0)], 100);
/// ```
pub struct OSTreeMap<K, V, C = NaturalOrder> {
    raw: RawRBTree<K, V, C, SubtreeSize>,
}

impl<K, V> OSTreeMap<K, V> {
    /// Makes a new, empty `OSTreeMap` ordered by `K`'s [`Ord`] implementation.
    #[must_use]
    pub const fn new() -> Self {
        OSTreeMap {
            raw: RawRBTree::new(NaturalOrder),
        }
    }

    /// Creates an empty map with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSTreeMap::with_options(NaturalOrder, TreeOptions::new().capacity(capacity))
    }
}

impl<K, V, C> OSTreeMap<K, V, C> {
    /// Makes a new, empty `OSTreeMap` ordered by `comparator`.
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        OSTreeMap {
            raw: RawRBTree::new(comparator),
        }
    }

    /// Creates an empty map ordered by `comparator` and configured by `options`.
    #[must_use]
    pub fn with_options(comparator: C, options: TreeOptions) -> Self {
        OSTreeMap {
            raw: RawRBTree::with_options(comparator, options),
        }
    }

    /// Returns the number of entries in the map. O(1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    #[must_use]
    pub const fn options(&self) -> &TreeOptions {
        self.raw.options()
    }

    /// Returns `true` if the map was created as transferable to another
    /// execution context.
    #[must_use]
    pub const fn is_transferable(&self) -> bool {
        self.raw.options().is_transferable()
    }

    /// Returns the number of node slots the map can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Clears the map, removing all entries.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Consumes the map, handing every entry to `hook` in post-order before its
    /// node is released.
    pub fn cleanup<F>(mut self, hook: F)
    where
        F: FnMut(K, V),
    {
        self.raw.drain_post_order(hook);
    }

    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.first()?);
        Some((&node.key, &node.value))
    }

    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((&node.key, &node.value))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.raw.first()?;
        Some(self.raw.remove_node(first))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.raw.last()?;
        Some(self.raw.remove_node(last))
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V, C, SubtreeSize> {
        Iter::new(&self.raw)
    }

    pub fn keys(&self) -> Keys<'_, K, V, C, SubtreeSize> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V, C, SubtreeSize> {
        Values::new(self.iter())
    }

    /// Logs the shape of the tree at `trace` level.
    pub fn trace_structure(&self)
    where
        K: fmt::Debug,
    {
        self.raw.trace_structure();
    }
}

impl<K, V, C: Comparator<K>> OSTreeMap<K, V, C> {
    /// Inserts a key-value pair, overwriting the value if the key is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`](crate::Error::OutOfMemory) if a node for a new
    /// key cannot be allocated. The map is unchanged in that case.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        self.raw.insert(key, value).map(drop)
    }

    /// Inserts a key-value pair and returns the value it replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`](crate::Error::OutOfMemory) if a node for a new
    /// key cannot be allocated. The map is unchanged in that case.
    pub fn put_swap(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.raw.insert(key, value)
    }

    /// Inserts a key-value pair and returns the value it replaced, if any.
    ///
    /// # Panics
    ///
    /// Panics if a node for a new key cannot be allocated.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.insert(key, value) {
            Ok(previous) => previous,
            Err(error) => panic!("`OSTreeMap::insert()` - {error}"),
        }
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let handle = self.raw.search(key)?;
        Some(&self.raw.node(handle).value)
    }

    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.search(key)?);
        Some((&node.key, &node.value))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.search(key)?;
        Some(&mut self.raw.node_mut(handle).value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key).is_some()
    }

    /// Removes `key` from the map, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.raw.remove(key).map(|(_, value)| value)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove(key)
    }

    /// Constructs a double-ended cursor over a sub-range of entries. A range
    /// whose start lies after its end is empty.
    pub fn range<R>(&self, range: R) -> Range<'_, K, V, C, SubtreeSize>
    where
        R: RangeBounds<K>,
    {
        self.range_between(range.start_bound(), range.end_bound())
    }

    pub fn range_between(&self, start: Bound<&K>, end: Bound<&K>) -> Range<'_, K, V, C, SubtreeSize> {
        Range::new(self.raw.range(start, end))
    }

    /// Checks every structural invariant of the tree, subtree sizes included.
    ///
    /// # Panics
    ///
    /// Panics on the first violated invariant.
    pub fn validate(&self) {
        self.raw.validate();
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for OSTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        OSTreeMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OSTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for OSTreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OSTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for OSTreeMap<K, V, C> {
    fn default() -> Self {
        OSTreeMap::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for OSTreeMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OSTreeMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for OSTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OSTreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for OSTreeMap<K, V, C> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, C> IntoIterator for &'a OSTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C, SubtreeSize>;

    fn into_iter(self) -> Iter<'a, K, V, C, SubtreeSize> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for OSTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter::new(self.raw.drain_in_order())
    }
}
