use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::comparator::Comparator;
use crate::error::{Error, Result};
use crate::options::TreeOptions;
use crate::raw::{Handle, Plain, RawRBTree, RawRange};

/// Orders two raw keys of a [`ByteTree`].
pub type KeyCompare = fn(&[u8], &[u8]) -> Ordering;

type Bytes = Box<[u8]>;

/// Copies `bytes` into a new buffer, reporting allocation failure instead of
/// aborting.
fn try_copy(bytes: &[u8]) -> Result<Bytes> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(bytes.len()).map_err(|_| Error::OutOfMemory)?;
    buffer.extend_from_slice(bytes);
    Ok(buffer.into_boxed_slice())
}

#[derive(Clone, Copy, Debug)]
struct ByteOrder(KeyCompare);

impl Comparator<Bytes> for ByteOrder {
    #[inline]
    fn compare(&self, a: &Bytes, b: &Bytes) -> Ordering {
        (self.0)(a, b)
    }
}

/// A red-black tree over fixed-size byte keys and values.
///
/// Every key is exactly `key_size` bytes and every value exactly `value_size`
/// bytes; both are fixed when the tree is created. Keys are ordered by a
/// [`KeyCompare`] function over the raw key bytes. Buffers of the wrong length are
/// rejected with [`Error::InvalidArgument`].
///
/// # Examples
///
/// ```
/// use rbt_index::ByteTree;
///
/// let mut tree = ByteTree::create(4, 8, Some(|a: &[u8], b: &[u8]| a.cmp(b)), false)?;
/// tree.put(&7u32.to_be_bytes(), &70u64.to_le_bytes())?;
/// tree.put(&3u32.to_be_bytes(), &30u64.to_le_bytes())?;
///
/// assert_eq!(tree.get(&7u32.to_be_bytes())?, &70u64.to_le_bytes());
///
/// let mut previous = [0u8; 8];
/// assert!(tree.put_swap(&3u32.to_be_bytes(), &31u64.to_le_bytes(), &mut previous)?);
/// assert_eq!(u64::from_le_bytes(previous), 30);
/// assert_eq!(tree.len(), 2);
/// # Ok::<(), rbt_index::Error>(())
/// ```
#[derive(Clone)]
pub struct ByteTree {
    raw: RawRBTree<Bytes, Bytes, ByteOrder, Plain>,
    key_size: usize,
    value_size: usize,
}

/// A cursor over a key range of a [`ByteTree`].
///
/// This `struct` is created by [`ByteTree::range`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ByteRange<'a> {
    inner: RawRange<'a, Bytes, Bytes, ByteOrder, Plain>,
    key_size: usize,
}

impl ByteTree {
    /// Creates an empty tree for `key_size`-byte keys and `value_size`-byte values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either size is zero or no comparator
    /// is given.
    pub fn create(key_size: usize, value_size: usize, compare: Option<KeyCompare>, transferable: bool) -> Result<Self> {
        if key_size == 0 {
            return Err(Error::InvalidArgument {
                reason: "key size must be non-zero",
            });
        }
        if value_size == 0 {
            return Err(Error::InvalidArgument {
                reason: "value size must be non-zero",
            });
        }
        let compare = compare.ok_or(Error::InvalidArgument {
            reason: "a key comparator is required",
        })?;
        log::debug!("creating byte tree ({key_size}-byte keys, {value_size}-byte values)");

        Ok(ByteTree {
            raw: RawRBTree::with_options(ByteOrder(compare), TreeOptions::new().transferable(transferable)),
            key_size,
            value_size,
        })
    }

    /// Returns the length every key of this tree must have.
    #[must_use]
    pub const fn key_size(&self) -> usize {
        self.key_size
    }

    /// Returns the length every value of this tree must have.
    #[must_use]
    pub const fn value_size(&self) -> usize {
        self.value_size
    }

    /// Returns `true` if the tree was created as transferable between threads.
    ///
    /// The flag is recorded for callers; it does not change how the tree
    /// behaves.
    #[must_use]
    pub const fn is_transferable(&self) -> bool {
        self.raw.options().is_transferable()
    }

    /// Returns the number of entries in the tree. O(1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    fn check_key(&self, key: &[u8]) -> Result<()> {
        if key.len() == self.key_size {
            Ok(())
        } else {
            Err(Error::InvalidArgument {
                reason: "key length does not match the tree's key size",
            })
        }
    }

    fn check_value(&self, value: &[u8]) -> Result<()> {
        if value.len() == self.value_size {
            Ok(())
        } else {
            Err(Error::InvalidArgument {
                reason: "value length does not match the tree's value size",
            })
        }
    }

    fn find(&self, key: &[u8]) -> Result<Option<Handle>> {
        self.check_key(key)?;
        let ByteOrder(compare) = *self.raw.comparator();
        Ok(self.raw.search_by(|probe| compare(key, probe)))
    }

    /// Inserts `key` with `value`, overwriting both the stored key bytes and the
    /// value if an equal key is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for buffers of the wrong length and
    /// [`Error::OutOfMemory`] if no node can be allocated. The tree is unchanged
    /// on error.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.put_inner(key, value, None).map(drop)
    }

    /// Like [`put`](Self::put), but copies the value being replaced into
    /// `previous` and returns `true` when the key was already present.
    ///
    /// `previous` is left untouched when the key is new.
    ///
    /// # Errors
    ///
    /// As for [`put`](Self::put); `previous` must also be `value_size` bytes long.
    pub fn put_swap(&mut self, key: &[u8], value: &[u8], previous: &mut [u8]) -> Result<bool> {
        self.check_value(previous)?;
        self.put_inner(key, value, Some(previous))
    }

    fn put_inner(&mut self, key: &[u8], value: &[u8], previous: Option<&mut [u8]>) -> Result<bool> {
        self.check_value(value)?;
        if let Some(handle) = self.find(key)? {
            let node = self.raw.node_mut(handle);
            if let Some(previous) = previous {
                previous.copy_from_slice(&node.value);
            }
            node.key.copy_from_slice(key);
            node.value.copy_from_slice(value);
            return Ok(true);
        }
        self.raw.insert(try_copy(key)?, try_copy(value)?)?;
        Ok(false)
    }

    /// Returns the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is absent and
    /// [`Error::InvalidArgument`] if `key` has the wrong length.
    pub fn get(&self, key: &[u8]) -> Result<&[u8]> {
        let handle = self.find(key)?.ok_or(Error::NotFound)?;
        Ok(&self.raw.node(handle).value[..])
    }

    /// Returns the value stored for `key`, writable in place.
    ///
    /// # Errors
    ///
    /// As for [`get`](Self::get).
    pub fn get_mut(&mut self, key: &[u8]) -> Result<&mut [u8]> {
        let handle = self.find(key)?.ok_or(Error::NotFound)?;
        Ok(&mut self.raw.node_mut(handle).value[..])
    }

    /// Removes `key` and copies its value into `removed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is absent, leaving the tree and
    /// `removed` untouched, and [`Error::InvalidArgument`] for buffers of the wrong
    /// length.
    pub fn remove(&mut self, key: &[u8], removed: &mut [u8]) -> Result<()> {
        self.check_value(removed)?;
        let handle = self.find(key)?.ok_or(Error::NotFound)?;
        let (_, value) = self.raw.remove_node(handle);
        removed.copy_from_slice(&value);
        Ok(())
    }

    /// Returns a cursor over the keys between `start` and `end`. A `None` bound
    /// leaves that side open; the flags say whether a bound key itself is
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a bound has the wrong length.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbt_index::ByteTree;
    ///
    /// let mut tree = ByteTree::create(1, 1, Some(|a: &[u8], b: &[u8]| a.cmp(b)), false)?;
    /// for key in 10u8..30 {
    ///     tree.put(&[key], &[key * 2])?;
    /// }
    ///
    /// let keys: Vec<u8> = tree.range(Some(&[10]), true, Some(&[20]), false)?.map(|(k, _)| k[0]).collect();
    /// assert_eq!(keys, (10..20).collect::<Vec<_>>());
    /// # Ok::<(), rbt_index::Error>(())
    /// ```
    pub fn range(
        &self,
        start: Option<&[u8]>,
        start_inclusive: bool,
        end: Option<&[u8]>,
        end_inclusive: bool,
    ) -> Result<ByteRange<'_>> {
        Ok(ByteRange {
            inner: slice_range(&self.raw, self.key_size, (start, start_inclusive), (end, end_inclusive))?,
            key_size: self.key_size,
        })
    }

    /// Consumes the tree, handing every key and value to `hook` in post-order
    /// before its node is released.
    pub fn cleanup<F>(mut self, mut hook: F)
    where
        F: FnMut(&[u8], &[u8]),
    {
        self.raw.drain_post_order(|key, value| hook(&key[..], &value[..]));
    }

    /// Checks every structural invariant of the tree.
    ///
    /// # Panics
    ///
    /// Panics on the first violated invariant.
    pub fn validate(&self) {
        self.raw.validate();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }
}

/// Builds a raw cursor from optional byte bounds, checking their lengths.
fn slice_range<'a>(
    raw: &'a RawRBTree<Bytes, Bytes, ByteOrder, Plain>,
    key_size: usize,
    (start, start_inclusive): (Option<&[u8]>, bool),
    (end, end_inclusive): (Option<&[u8]>, bool),
) -> Result<RawRange<'a, Bytes, Bytes, ByteOrder, Plain>> {
    if start.into_iter().chain(end).any(|key| key.len() != key_size) {
        return Err(Error::InvalidArgument {
            reason: "bound length does not match the tree's key size",
        });
    }
    let ByteOrder(compare) = *raw.comparator();
    let lower = start.map(|key| (move |probe: &Bytes| compare(key, probe), start_inclusive));
    let upper = end.map(|key| (move |probe: &Bytes| compare(key, probe), end_inclusive));
    Ok(raw.range_by(lower, upper))
}

impl fmt::Debug for ByteTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = RawRange::new(&self.raw, self.raw.first(), self.raw.last());
        let mut map = f.debug_map();
        while let Some((key, value)) = entries.next_entry() {
            map.entry(&&key[..], &&value[..]);
        }
        map.finish()
    }
}

impl ByteRange<'_> {
    /// Repositions the cursor on a new key range of the same tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a bound has the wrong length; the
    /// cursor is left where it was.
    pub fn reset(&mut self, start: Option<&[u8]>, start_inclusive: bool, end: Option<&[u8]>, end_inclusive: bool) -> Result<()> {
        self.inner = slice_range(self.inner.tree(), self.key_size, (start, start_inclusive), (end, end_inclusive))?;
        Ok(())
    }
}

impl<'a> Iterator for ByteRange<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_entry().map(|(key, value)| (&key[..], &value[..]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.inner.is_exhausted() { (0, Some(0)) } else { (1, None) }
    }
}

impl DoubleEndedIterator for ByteRange<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back_entry().map(|(key, value)| (&key[..], &value[..]))
    }
}

impl FusedIterator for ByteRange<'_> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn by_bytes(a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }

    fn tree() -> ByteTree {
        ByteTree::create(2, 1, Some(by_bytes), false).unwrap()
    }

    #[test]
    fn create_rejects_bad_arguments() {
        assert!(matches!(ByteTree::create(0, 1, Some(by_bytes), false), Err(Error::InvalidArgument { .. })));
        assert!(matches!(ByteTree::create(1, 0, Some(by_bytes), false), Err(Error::InvalidArgument { .. })));
        assert!(matches!(ByteTree::create(1, 1, None, false), Err(Error::InvalidArgument { .. })));

        let tree = ByteTree::create(8, 16, Some(by_bytes), true).unwrap();
        assert_eq!((tree.key_size(), tree.value_size()), (8, 16));
        assert!(tree.is_transferable());
        assert!(tree.is_empty());
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        let mut tree = tree();
        assert!(matches!(tree.put(&[1], &[1]), Err(Error::InvalidArgument { .. })));
        assert!(matches!(tree.put(&[1, 2], &[1, 2]), Err(Error::InvalidArgument { .. })));
        assert!(matches!(tree.get(&[1, 2, 3]), Err(Error::InvalidArgument { .. })));
        assert!(matches!(tree.range(Some(&[1]), true, None, false), Err(Error::InvalidArgument { .. })));
        assert!(tree.is_empty());
    }

    #[test]
    fn put_swap_and_remove() {
        let mut tree = tree();
        let mut out = [0u8];

        assert_eq!(tree.put_swap(&[0, 7], &[70], &mut out), Ok(false));
        assert_eq!(out, [0]);
        assert_eq!(tree.put_swap(&[0, 7], &[71], &mut out), Ok(true));
        assert_eq!(out, [70]);
        assert_eq!(tree.len(), 1);

        tree.get_mut(&[0, 7]).unwrap().copy_from_slice(&[72]);
        assert_eq!(tree.get(&[0, 7]), Ok(&[72][..]));

        assert_eq!(tree.remove(&[0, 8], &mut out), Err(Error::NotFound));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.remove(&[0, 7], &mut out), Ok(()));
        assert_eq!(out, [72]);
        assert_eq!(tree.get(&[0, 7]), Err(Error::NotFound));
        tree.validate();
    }

    #[test]
    fn try_copy_builds_exact_buffer() {
        let copy = try_copy(&[1, 2, 3]).unwrap();
        assert_eq!(&copy[..], &[1, 2, 3]);
        assert_eq!(copy.len(), 3);
        assert!(try_copy(&[]).unwrap().is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let mut tree = tree();
        for key in 0u8..32 {
            tree.put(&[0, key], &[key]).unwrap();
        }
        let mut copy = tree.clone();
        let mut out = [0u8];
        for key in (0u8..32).step_by(2) {
            copy.remove(&[0, key], &mut out).unwrap();
            assert_eq!(out, [key]);
            copy.validate();
        }

        assert_eq!(copy.len(), 16);
        assert_eq!(tree.len(), 32);
        assert_eq!(tree.get(&[0, 4]), Ok(&[4][..]));
        tree.validate();
    }

    #[test]
    fn update_replaces_stored_key_bytes() {
        // Only the first byte takes part in the order.
        let mut tree = ByteTree::create(2, 1, Some(|a: &[u8], b: &[u8]| a[0].cmp(&b[0])), false).unwrap();
        tree.put(&[1, 0], &[10]).unwrap();
        tree.put(&[1, 9], &[11]).unwrap();

        let entries: Vec<_> = tree.range(None, false, None, false).unwrap().collect();
        assert_eq!(entries, [(&[1u8, 9][..], &[11u8][..])]);
    }

    #[test]
    fn range_reset() {
        let mut tree = tree();
        for key in 0u8..10 {
            tree.put(&[0, key], &[key]).unwrap();
        }

        let mut range = tree.range(Some(&[0, 2]), false, Some(&[0, 5]), true).unwrap();
        assert_eq!(range.next(), Some((&[0u8, 3][..], &[3u8][..])));
        assert_eq!(range.next_back(), Some((&[0u8, 5][..], &[5u8][..])));

        range.reset(Some(&[0, 8]), true, None, false).unwrap();
        assert_eq!(range.map(|(_, v)| v[0]).collect::<Vec<_>>(), [8, 9]);
    }

    #[test]
    fn cleanup_visits_every_entry() {
        let mut tree = tree();
        for key in 0u8..16 {
            tree.put(&[key, 0], &[key]).unwrap();
        }
        let mut seen = Vec::new();
        tree.cleanup(|key, value| {
            assert_eq!(key[0], value[0]);
            seen.push(value[0]);
        });
        seen.sort_unstable();
        assert_eq!(seen, (0u8..16).collect::<Vec<_>>());
    }
}
