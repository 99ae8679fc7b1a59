use super::handle::Handle;

/// Per-node augmentation slot.
///
/// The plain red-black tree stores [`Plain`], which is zero-sized and never
/// maintained. The order-statistic tree stores a [`SubtreeSize`]: the number of nodes
/// in the subtree rooted at the node, itself included.
pub(crate) trait Augment: Copy {
    /// Whether subtree sizes are maintained for this augmentation.
    const TRACKED: bool;

    fn from_size(size: usize) -> Self;

    fn size(self) -> usize;
}

/// Node augmentation of an [`RBTreeMap`](crate::RBTreeMap): nothing beyond the
/// links and the color.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Plain;

impl Augment for Plain {
    const TRACKED: bool = false;

    #[inline]
    fn from_size(_size: usize) -> Self {
        Plain
    }

    #[inline]
    fn size(self) -> usize {
        0
    }
}

/// Node augmentation of an [`OSTreeMap`](crate::OSTreeMap): the number of
/// entries in the subtree rooted at the node.
// Shares the handle niche, so no subtree can count more nodes than the arena
// can address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct SubtreeSize(Handle);

impl SubtreeSize {
    pub(crate) const MAX: usize = Handle::MAX;

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`SubtreeSize::from_usize()` - `size` > `SubtreeSize::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }
}

impl Augment for SubtreeSize {
    const TRACKED: bool = true;

    #[inline]
    fn from_size(size: usize) -> Self {
        Self::from_usize(size)
    }

    #[inline]
    fn size(self) -> usize {
        self.to_usize()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::{assert_eq_size, const_assert};

    assert_eq_size!(SubtreeSize, Option<SubtreeSize>);
    assert_eq_size!(SubtreeSize, Handle);
    assert_eq_size!(Plain, ());
    const_assert!(!Plain::TRACKED);
    const_assert!(SubtreeSize::TRACKED);

    #[test]
    #[should_panic(expected = "`SubtreeSize::from_usize()` - `size` > `SubtreeSize::MAX`!")]
    fn invalid_size() {
        let _ = SubtreeSize::from_usize(SubtreeSize::MAX + 1);
    }

    #[test]
    fn one() {
        assert_eq!(SubtreeSize::from_size(1).to_usize(), 1);
        assert_eq!(SubtreeSize::from_size(1), SubtreeSize::from_usize(1));
    }

    proptest! {
        #[test]
        fn size_round_trip(size in 0..=SubtreeSize::MAX) {
            let augment = SubtreeSize::from_size(size);
            prop_assert_eq!(augment.size(), size);
        }
    }
}
