use core::ops::{Index, IndexMut};

use super::OSTreeMap;
use crate::Rank;
use crate::comparator::Comparator;
use crate::error::{Error, Result};

impl<K, V, C> OSTreeMap<K, V, C> {
    /// Returns the entry at zero-based position `index` in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::{Error, OSTreeMap};
    ///
    /// let map = OSTreeMap::from([(7, 'a'), (3, 'b'), (18, 'c')]);
    ///
    /// assert_eq!(map.select(0), Ok((&3, &'b')));
    /// assert_eq!(map.select(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn select(&self, index: usize) -> Result<(&K, &V)> {
        self.get_by_rank(index).ok_or(Error::OutOfRange { index, len: self.len() })
    }

    /// Returns the entry at position `rank` in sorted order, or `None` if `rank`
    /// is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([("a", 10), ("c", 30), ("b", 20)]);
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let node = self.raw.node(self.raw.select(rank)?);
        Some((&node.key, &node.value))
    }

    /// Returns the key and a mutable reference to the value at position `rank`.
    ///
    /// The key stays a shared reference; changing it could break the ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::from([(10, "a"), (5, "b")]);
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.select(rank)?;
        let node = self.raw.node_mut(handle);
        Some((&node.key, &mut node.value))
    }

    /// Removes and returns the entry at position `index` in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= self.len()`; the map is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
    ///
    /// assert_eq!(map.remove_by_rank(1), Ok((2, 'b')));
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3]);
    /// assert!(map.remove_by_rank(2).is_err());
    /// ```
    pub fn remove_by_rank(&mut self, index: usize) -> Result<(K, V)> {
        let handle = self.raw.select(index).ok_or(Error::OutOfRange { index, len: self.len() })?;
        Ok(self.raw.remove_node(handle))
    }
}

impl<K, V, C: Comparator<K>> OSTreeMap<K, V, C> {
    /// Returns the number of keys strictly less than `key`, or `None` if `key`
    /// is not present.
    ///
    /// Use [`rank_lower_bound`](Self::rank_lower_bound) for a position that also
    /// answers for absent keys.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(10, "a"), (20, "b")]);
    ///
    /// assert_eq!(map.rank(&20), Some(1));
    /// assert_eq!(map.rank(&15), None);
    /// ```
    #[must_use]
    pub fn rank(&self, key: &K) -> Option<usize> {
        let comparator = self.raw.comparator();
        self.raw.rank_by(|probe| comparator.compare(key, probe))
    }

    /// Returns the number of keys strictly less than `key`, whether or not `key`
    /// is present. This is the position `key` has, or would have once inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::OSTreeMap;
    ///
    /// let map = OSTreeMap::from([(10, "a"), (20, "b")]);
    ///
    /// assert_eq!(map.rank_lower_bound(&5), 0);
    /// assert_eq!(map.rank_lower_bound(&15), 1);
    /// assert_eq!(map.rank_lower_bound(&20), 1);
    /// assert_eq!(map.rank_lower_bound(&99), 2);
    /// ```
    #[must_use]
    pub fn rank_lower_bound(&self, key: &K) -> usize {
        let comparator = self.raw.comparator();
        self.raw.rank_lower_bound_by(|probe| comparator.compare(key, probe))
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rbt_index::{OSTreeMap, Rank};
///
/// let map = OSTreeMap::from([("a", 1), ("b", 2)]);
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, C> Index<Rank> for OSTreeMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        match self.select(rank.0) {
            Ok((_, value)) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rbt_index::{OSTreeMap, Rank};
///
/// let mut map = OSTreeMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V, C> IndexMut<Rank> for OSTreeMap<K, V, C> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        let len = self.len();
        match self.get_by_rank_mut(rank.0) {
            Some((_, value)) => value,
            None => panic!("{}", Error::OutOfRange { index: rank.0, len }),
        }
    }
}
