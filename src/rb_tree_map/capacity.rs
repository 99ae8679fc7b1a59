use super::RBTreeMap;
use crate::options::TreeOptions;
use crate::raw::RawRBTree;

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator` and configured by `options`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::{NaturalOrder, RBTreeMap, TreeOptions};
    ///
    /// let map: RBTreeMap<u8, u8> = RBTreeMap::with_options(NaturalOrder, TreeOptions::new().transferable(true));
    /// assert!(map.is_transferable());
    /// ```
    #[must_use]
    pub fn with_options(comparator: C, options: TreeOptions) -> Self {
        RBTreeMap {
            raw: RawRBTree::with_options(comparator, options),
        }
    }

    /// Returns the options the map was created with.
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
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = RBTreeMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

impl<K, V> RBTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries.
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMap::with_options(crate::NaturalOrder, TreeOptions::new().capacity(capacity))
    }
}
