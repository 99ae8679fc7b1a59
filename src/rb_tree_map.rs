use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Bound, Index, RangeBounds};

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::raw::{RawRBTree, RawRange};

pub use crate::raw::{Plain, SubtreeSize};

mod capacity;

/// An ordered map based on a [red-black tree].
///
/// Keys are kept in the order defined by the map's [`Comparator`]; by default
/// that is the key type's [`Ord`] implementation ([`NaturalOrder`]). Each key is
/// stored at most once: putting an existing key replaces its value and leaves
/// the tree's shape alone.
///
/// Every node lives in a slab owned by the map. Insertion and removal take
/// O(log n) time and at most a constant number of rotations per fixup pass.
///
/// It is a logic error for a key to be modified in such a way that its ordering
/// relative to any other key changes while it is in the map. The behavior
/// resulting from such a logic error is not specified, but will be encapsulated
/// to the `RBTreeMap` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rbt_index::RBTreeMap;
///
/// let mut properties = RBTreeMap::new();
/// properties.insert("width", 640);
/// properties.insert("height", 480);
/// properties.insert("depth", 24);
///
/// assert_eq!(properties.get(&"height"), Some(&480));
/// assert_eq!(properties.len(), 3);
///
/// // Replacing a value does not add an entry.
/// assert_eq!(properties.put_swap("depth", 32), Ok(Some(24)));
/// assert_eq!(properties.len(), 3);
///
/// let names: Vec<_> = properties.keys().copied().collect();
/// assert_eq!(names, ["depth", "height", "width"]);
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RBTreeMap<K, V, C = NaturalOrder> {
    raw: RawRBTree<K, V, C, Plain>,
}

/// An iterator over the entries of a `RBTreeMap` or an
/// [`OSTreeMap`](crate::OSTreeMap), in ascending key order.
///
/// This `struct` is created by the [`iter`] method on either map. `A` is the
/// node augmentation of the map being walked: [`Plain`] for a `RBTreeMap`,
/// [`SubtreeSize`] for an `OSTreeMap`.
///
/// [`iter`]: RBTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, C = NaturalOrder, A = Plain> {
    inner: RawRange<'a, K, V, C, A>,
    remaining: usize,
}

/// An iterator over the keys of a `RBTreeMap` or an
/// [`OSTreeMap`](crate::OSTreeMap).
///
/// This `struct` is created by the [`keys`] method on either map.
///
/// [`keys`]: RBTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, C = NaturalOrder, A = Plain> {
    inner: Iter<'a, K, V, C, A>,
}

/// An iterator over the values of a `RBTreeMap` or an
/// [`OSTreeMap`](crate::OSTreeMap).
///
/// This `struct` is created by the [`values`] method on either map.
///
/// [`values`]: RBTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, C = NaturalOrder, A = Plain> {
    inner: Iter<'a, K, V, C, A>,
}

/// An owning iterator over the entries of a `RBTreeMap` or an
/// [`OSTreeMap`](crate::OSTreeMap), in ascending key order.
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// A cursor over a sub-range of entries in a `RBTreeMap` or an
/// [`OSTreeMap`](crate::OSTreeMap).
///
/// This `struct` is created by the [`range`] method on either map. It yields
/// entries in ascending key order from the front and descending from the back,
/// and can be repositioned with [`reset`](Range::reset).
///
/// The range borrows the map, so the map cannot change underneath it.
///
/// # Examples
///
/// ```
/// use rbt_index::RBTreeMap;
///
/// let map: RBTreeMap<u32, char> = (10..30).zip('a'..).collect();
///
/// let mut range = map.range(10..20);
/// assert_eq!(range.next(), Some((&10, &'a')));
/// assert_eq!(range.next_back(), Some((&19, &'j')));
///
/// range.reset(25..);
/// assert_eq!(range.map(|(k, _)| *k).collect::<Vec<_>>(), [25, 26, 27, 28, 29]);
/// ```
///
/// [`range`]: RBTreeMap::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V, C = NaturalOrder, A = Plain> {
    inner: RawRange<'a, K, V, C, A>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap` ordered by `K`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        RBTreeMap {
            raw: RawRBTree::new(NaturalOrder),
        }
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Makes a new, empty `RBTreeMap` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// // Case-insensitive keys.
    /// let mut map = RBTreeMap::with_comparator(|a: &&str, b: &&str| {
    ///     a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase())
    /// });
    /// map.insert("Key", 1);
    /// map.insert("KEY", 2);
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&"key"), Some(&2));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        RBTreeMap {
            raw: RawRBTree::new(comparator),
        }
    }

    /// Returns the number of entries in the map. O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the comparator that orders the map.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Clears the map, removing all entries. The map can be used again afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Consumes the map, handing every entry to `hook` before its node is
    /// released.
    ///
    /// Entries are visited in post-order: both subtrees of a node are released
    /// before the node itself, and the root comes last. Dropping a map releases
    /// its entries the same way without a hook.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
    ///
    /// let mut released = Vec::new();
    /// map.cleanup(|key, _value| released.push(key));
    ///
    /// released.sort_unstable();
    /// assert_eq!(released, [1, 2, 3]);
    /// ```
    pub fn cleanup<F>(mut self, hook: F)
    where
        F: FnMut(K, V),
    {
        self.raw.drain_post_order(hook);
    }

    /// Returns the first entry in the map, the one with the minimum key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.first()?);
        Some((&node.key, &node.value))
    }

    /// Returns the last entry in the map, the one with the maximum key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((&node.key, &node.value))
    }

    /// Removes and returns the first entry in the map.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.raw.first()?;
        Some(self.raw.remove_node(first))
    }

    /// Removes and returns the last entry in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.raw.last()?;
        Some(self.raw.remove_node(last))
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// A red-black tree holding `n` entries is never higher than `2 * log2(n + 1)`.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (2, "b"), (1, "a")]);
    ///
    /// let mut iter = map.iter();
    /// assert_eq!(iter.next(), Some((&1, &"a")));
    /// assert_eq!(iter.next_back(), Some((&3, &"c")));
    /// assert_eq!(iter.len(), 1);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(&self.raw)
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys::new(self.iter())
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values::new(self.iter())
    }

    /// Logs the shape of the tree at `trace` level, one node per line with its
    /// color, indented by depth.
    pub fn trace_structure(&self)
    where
        K: fmt::Debug,
    {
        self.raw.trace_structure();
    }
}

impl<K, V, C: Comparator<K>> RBTreeMap<K, V, C> {
    /// Inserts a key-value pair, overwriting the value if the key is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`](crate::Error::OutOfMemory) if a node for a new
    /// key cannot be allocated. The map is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.put(7, "seven")?;
    /// map.put(7, "SEVEN")?;
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map[&7], "SEVEN");
    /// # Ok::<(), rbt_index::Error>(())
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        self.raw.insert(key, value).map(drop)
    }

    /// Inserts a key-value pair and returns the value it replaced, if any.
    ///
    /// When the key is already present only the value is swapped; the stored key
    /// is kept and `key` is dropped.
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
    /// Panics if a node for a new key cannot be allocated; see
    /// [`put_swap`](Self::put_swap) for the fallible form.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.insert(key, value) {
            Ok(previous) => previous,
            Err(error) => panic!("`RBTreeMap::insert()` - {error}"),
        }
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, "a")]);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let handle = self.raw.search(key)?;
        Some(&self.raw.node(handle).value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.search(key)?);
        Some((&node.key, &node.value))
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// Only the value is reachable this way; the key cannot be modified through it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, 10)]);
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x += 5;
    /// }
    /// assert_eq!(map[&1], 15);
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.search(key)?;
        Some(&mut self.raw.node_mut(handle).value)
    }

    /// Returns `true` if the map contains a value for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key).is_some()
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// Removing an absent key leaves the map untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, "a")]);
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.raw.remove(key).map(|(_, value)| value)
    }

    /// Removes `key` from the map, returning the stored key and value if it was
    /// present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove(key)
    }

    /// Constructs a double-ended cursor over a sub-range of entries.
    ///
    /// Each end of the range may be unbounded, inclusive or exclusive, e.g.
    /// `map.range(4..)`, `map.range(..=9)` or
    /// `map.range((Bound::Excluded(&4), Bound::Included(&10)))`. A range whose
    /// start lies after its end is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::Bound::{Excluded, Included};
    /// use rbt_index::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "a"), (5, "b"), (8, "c")]);
    ///
    /// let keys: Vec<_> = map.range((Excluded(&3), Included(&8))).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [5, 8]);
    /// assert_eq!(map.range(4..).next(), Some((&5, &"b")));
    /// assert_eq!(map.range(6..4).next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to position the cursor; each step is O(1) amortized.
    pub fn range<R>(&self, range: R) -> Range<'_, K, V, C>
    where
        R: RangeBounds<K>,
    {
        Range::new(self.raw.range(range.start_bound(), range.end_bound()))
    }

    /// Constructs a double-ended cursor between two explicit bounds.
    ///
    /// Equivalent to [`range`](Self::range) with `(start, end)`, for callers that
    /// build bounds at runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::Bound;
    /// use rbt_index::RBTreeMap;
    ///
    /// let map: RBTreeMap<u32, ()> = (0..10).map(|k| (k, ())).collect();
    /// let start_inclusive = false;
    ///
    /// let start = if start_inclusive { Bound::Included(&3) } else { Bound::Excluded(&3) };
    /// let keys: Vec<_> = map.range_between(start, Bound::Unbounded).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [4, 5, 6, 7, 8, 9]);
    /// ```
    pub fn range_between(&self, start: Bound<&K>, end: Bound<&K>) -> Range<'_, K, V, C> {
        Range::new(self.raw.range(start, end))
    }

    /// Checks every structural invariant of the tree.
    ///
    /// # Panics
    ///
    /// Panics if the keys are not strictly ascending, a red node has a red child,
    /// black heights differ between paths, or the links or entry count are
    /// inconsistent. None of these can happen through the public API unless the
    /// comparator is inconsistent.
    pub fn validate(&self) {
        self.raw.validate();
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RBTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        RBTreeMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RBTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for RBTreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RBTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for RBTreeMap<K, V, C> {
    fn default() -> Self {
        RBTreeMap::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RBTreeMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RBTreeMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RBTreeMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for RBTreeMap<K, V, C> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, C> IntoIterator for &'a RBTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Iter<'a, K, V, C> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for RBTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter::new(self.raw.drain_in_order())
    }
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: alloc::vec::Vec<(K, V)>) -> Self {
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, K, V, C, A> Iter<'a, K, V, C, A> {
    pub(crate) fn new(tree: &'a RawRBTree<K, V, C, A>) -> Self {
        Iter {
            inner: RawRange::new(tree, tree.first(), tree.last()),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V, C, A> Keys<'a, K, V, C, A> {
    pub(crate) fn new(inner: Iter<'a, K, V, C, A>) -> Self {
        Keys { inner }
    }
}

impl<'a, K, V, C, A> Values<'a, K, V, C, A> {
    pub(crate) fn new(inner: Iter<'a, K, V, C, A>) -> Self {
        Values { inner }
    }
}

impl<'a, K, V, C, A> Iterator for Iter<'a, K, V, C, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next_entry()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C, A> DoubleEndedIterator for Iter<'_, K, V, C, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next_back_entry()?;
        self.remaining -= 1;
        Some(entry)
    }
}

impl<K, V, C, A> ExactSizeIterator for Iter<'_, K, V, C, A> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C, A> FusedIterator for Iter<'_, K, V, C, A> {}

impl<K, V, C, A> Clone for Iter<'_, K, V, C, A> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, A> fmt::Debug for Iter<'_, K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, C, A> Iterator for Keys<'a, K, V, C, A> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C, A> DoubleEndedIterator for Keys<'_, K, V, C, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, C, A> ExactSizeIterator for Keys<'_, K, V, C, A> {}

impl<K, V, C, A> FusedIterator for Keys<'_, K, V, C, A> {}

impl<'a, K, V, C, A> Iterator for Values<'a, K, V, C, A> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C, A> DoubleEndedIterator for Values<'_, K, V, C, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, C, A> ExactSizeIterator for Values<'_, K, V, C, A> {}

impl<K, V, C, A> FusedIterator for Values<'_, K, V, C, A> {}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<'a, K, V, C, A> Range<'a, K, V, C, A> {
    pub(crate) fn new(inner: RawRange<'a, K, V, C, A>) -> Self {
        Range { inner }
    }
}

impl<K, V, C: Comparator<K>, A> Range<'_, K, V, C, A> {
    /// Repositions the cursor on `range` of the same map, as if it had just been
    /// created by the map's `range` method.
    pub fn reset<R>(&mut self, range: R)
    where
        R: RangeBounds<K>,
    {
        self.inner = self.inner.tree().range(range.start_bound(), range.end_bound());
    }

    /// Repositions the cursor between two explicit bounds of the same map.
    pub fn reset_between(&mut self, start: Bound<&K>, end: Bound<&K>) {
        self.inner = self.inner.tree().range(start, end);
    }
}

impl<'a, K, V, C, A> Iterator for Range<'a, K, V, C, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.inner.is_exhausted() { (0, Some(0)) } else { (1, None) }
    }
}

impl<K, V, C, A> DoubleEndedIterator for Range<'_, K, V, C, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back_entry()
    }
}

impl<K, V, C, A> FusedIterator for Range<'_, K, V, C, A> {}

impl<K, V, C, A> Clone for Range<'_, K, V, C, A> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, A> fmt::Debug for Range<'_, K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
