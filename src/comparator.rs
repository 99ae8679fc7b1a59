use core::cmp::Ordering;

/// A total order over keys, supplied once when a tree is created.
///
/// The comparator must be consistent for the lifetime of the tree: if it ever
/// reports a different ordering for the same two keys, lookups and removals
/// may miss entries. The tree is never left in an unsound state by such a
/// comparator, only an incorrectly ordered one.
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator:
///
/// ```
/// use rbt_index::RBTreeMap;
///
/// // Descending order.
/// let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// assert_eq!(map.first_key_value(), Some((&2, &"two")));
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<K: ?Sized + Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn closure_comparator() {
        let reverse = |a: &u8, b: &u8| b.cmp(a);
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(reverse.compare(&2, &2), Ordering::Equal);
    }

    proptest! {
        #[test]
        fn natural_order_matches_ord(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(NaturalOrder.compare(&a, &b), a.cmp(&b));
        }
    }
}
