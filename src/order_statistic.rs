/// A zero-based position in the sorted order of an [`OSTreeMap`](crate::OSTreeMap).
///
/// Indexing an `OSTreeMap` with a `Rank` selects by position instead of by key.
///
/// # Examples
///
/// ```
/// use rbt_index::{OSTreeMap, Rank};
///
/// let mut map = OSTreeMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// assert_eq!(map[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
