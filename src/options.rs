/// Construction-time settings for a tree.
///
/// # Examples
///
/// ```
/// use rbt_index::{NaturalOrder, RBTreeMap, TreeOptions};
///
/// let options = TreeOptions::new().capacity(64).node_limit(2);
/// let mut map = RBTreeMap::with_options(NaturalOrder, options);
///
/// assert!(map.put(1, 'a').is_ok());
/// assert!(map.put(2, 'b').is_ok());
/// // The slab is full; the map is left as it was.
/// assert!(map.put(3, 'c').is_err());
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TreeOptions {
    capacity: usize,
    node_limit: Option<usize>,
    transferable: bool,
}

impl TreeOptions {
    /// Default settings: no preallocation, no node limit, not transferable.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            node_limit: None,
            transferable: false,
        }
    }

    /// Preallocates room for `capacity` nodes.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Caps the number of live nodes. Inserting a new key into a tree that
    /// already holds `limit` nodes fails with [`Error::OutOfMemory`].
    ///
    /// [`Error::OutOfMemory`]: crate::Error::OutOfMemory
    #[must_use]
    pub const fn node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Marks the tree as safe to hand over wholesale to another execution
    /// context. The tree only records the flag.
    #[must_use]
    pub const fn transferable(mut self, transferable: bool) -> Self {
        self.transferable = transferable;
        self
    }

    pub(crate) const fn initial_capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) const fn limit(&self) -> Option<usize> {
        self.node_limit
    }

    pub(crate) const fn is_transferable(&self) -> bool {
        self.transferable
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self::new()
    }
}
