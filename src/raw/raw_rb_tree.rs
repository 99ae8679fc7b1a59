use core::cmp::Ordering;
use core::fmt;
use core::ops::Bound;

use alloc::vec::Vec;
use smallvec::{SmallVec, smallvec};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};
use super::range::RawRange;
use super::size::{Augment, SubtreeSize};
use crate::comparator::Comparator;
use crate::error::Result;
use crate::options::TreeOptions;

/// Traversal stack; red-black height is at most 2 * log2(n + 1).
type Stack<T> = SmallVec<[T; 64]>;

/// The red-black tree backing every map in this crate.
///
/// `A` selects the node augmentation: [`Plain`](super::size::Plain) for the plain
/// tree, [`SubtreeSize`] for the order-statistic tree. Lookups that take a `probe`
/// expect it to return the ordering of the searched-for key relative to the
/// node key it is given.
#[derive(Clone)]
pub(crate) struct RawRBTree<K, V, C, A> {
    /// Slab holding every node of the tree.
    nodes: Arena<Node<K, V, A>>,
    root: Option<Handle>,
    len: usize,
    comparator: C,
    options: TreeOptions,
}

impl<K, V, C, A> RawRBTree<K, V, C, A> {
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V, A> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V, A> {
        self.nodes.get_mut(handle)
    }

    pub(crate) fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left {
            handle = left;
        }
        handle
    }

    pub(crate) fn maximum(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.minimum(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.maximum(root))
    }

    /// Returns the in-order successor of `handle`.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right {
            return Some(self.minimum(right));
        }
        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent {
            if self.nodes.get(parent).right != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Returns the in-order predecessor of `handle`.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.nodes.get(handle).left {
            return Some(self.maximum(left));
        }
        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent {
            if self.nodes.get(parent).left != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Finds the node whose key the probe reports as equal.
    pub(crate) fn search_by<F>(&self, mut probe: F) -> Option<Handle>
    where
        F: FnMut(&K) -> Ordering,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match probe(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(handle),
            }
        }
        None
    }

    /// First node whose key is above the probed key (or equal to it when
    /// `inclusive`). Remembers the best candidate while descending.
    pub(crate) fn lower_bound_by<F>(&self, mut probe: F, inclusive: bool) -> Option<Handle>
    where
        F: FnMut(&K) -> Ordering,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match probe(&node.key) {
                Ordering::Less => {
                    best = Some(handle);
                    current = node.left;
                }
                Ordering::Equal if inclusive => return Some(handle),
                Ordering::Equal | Ordering::Greater => current = node.right,
            }
        }
        best
    }

    /// Last node whose key is below the probed key (or equal to it when
    /// `inclusive`).
    pub(crate) fn upper_bound_by<F>(&self, mut probe: F, inclusive: bool) -> Option<Handle>
    where
        F: FnMut(&K) -> Ordering,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match probe(&node.key) {
                Ordering::Greater => {
                    best = Some(handle);
                    current = node.right;
                }
                Ordering::Equal if inclusive => return Some(handle),
                Ordering::Equal | Ordering::Less => current = node.left,
            }
        }
        best
    }

    /// Builds a cursor over the keys between the two probed bounds. `None` leaves
    /// that side unbounded; the flag says whether the bound key itself is included.
    pub(crate) fn range_by<L, U>(&self, lower: Option<(L, bool)>, upper: Option<(U, bool)>) -> RawRange<'_, K, V, C, A>
    where
        L: FnMut(&K) -> Ordering,
        U: FnMut(&K) -> Ordering,
    {
        let front = match lower {
            None => self.first(),
            Some((probe, inclusive)) => self.lower_bound_by(probe, inclusive),
        };
        let Some(front) = front else {
            return RawRange::new(self, None, None);
        };

        let back = match upper {
            None => self.last(),
            Some((mut probe, inclusive)) => {
                // An inverted range: the first key past the start is already past the end.
                match probe(&self.nodes.get(front).key) {
                    Ordering::Greater => {}
                    Ordering::Equal if inclusive => {}
                    Ordering::Equal | Ordering::Less => return RawRange::new(self, None, None),
                }
                self.upper_bound_by(probe, inclusive)
            }
        };
        RawRange::new(self, Some(front), back)
    }
}

impl<K, V, C: Comparator<K>, A> RawRBTree<K, V, C, A> {
    pub(crate) fn search(&self, key: &K) -> Option<Handle> {
        self.search_by(|probe| self.comparator.compare(key, probe))
    }

    /// Cursor over the keys within `start` and `end`.
    pub(crate) fn range(&self, start: Bound<&K>, end: Bound<&K>) -> RawRange<'_, K, V, C, A> {
        self.range_by(bound_probe(&self.comparator, start), bound_probe(&self.comparator, end))
    }
}

impl<K, V, C, A: Augment> RawRBTree<K, V, C, A> {
    pub(crate) const fn new(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            comparator,
            options: TreeOptions::new(),
        }
    }

    pub(crate) fn with_options(comparator: C, options: TreeOptions) -> Self {
        log::debug!(
            "creating red-black tree (capacity: {}, node limit: {:?}, transferable: {}, order statistic: {})",
            options.initial_capacity(),
            options.limit(),
            options.is_transferable(),
            A::TRACKED
        );
        Self {
            nodes: Arena::with_capacity_and_limit(options.initial_capacity(), options.limit()),
            root: None,
            len: 0,
            comparator,
            options,
        }
    }

    /// Releases every node and resets the tree to empty.
    pub(crate) fn clear(&mut self) {
        log::debug!("clearing red-black tree of {} entries", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Absent links are the black empty leaves.
    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.nodes.get(h).is_red())
    }

    #[inline]
    fn subtree_size(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.nodes.get(h).augment.size())
    }

    fn update_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = 1 + self.subtree_size(node.left) + self.subtree_size(node.right);
        self.nodes.get_mut(handle).augment = A::from_size(size);
    }

    /// Adds or removes one node's worth of size on every node from `from` up to the root.
    fn adjust_sizes(&mut self, mut from: Option<Handle>, grow: bool) {
        if !A::TRACKED {
            return;
        }
        while let Some(handle) = from {
            let node = self.nodes.get_mut(handle);
            let size = node.augment.size();
            node.augment = A::from_size(if grow { size + 1 } else { size - 1 });
            from = node.parent;
        }
    }

    /// Points whatever referenced `old` (its parent, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = self.nodes.get_mut(parent);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    debug_assert_eq!(node.right, Some(old), "`replace_child()` - `old` is not a child of `parent`!");
                    node.right = new;
                }
            }
        }
    }

    /// Lifts the child of `pivot` on the `lift_right` side into `pivot`'s place.
    ///
    /// `lift_right == true` is a left rotation. The lifted child's inner subtree is
    /// reattached to `pivot`, and both sizes are recomputed bottom-up.
    fn rotate(&mut self, pivot: Handle, lift_right: bool) {
        let pivot_node = self.nodes.get(pivot);
        let parent = pivot_node.parent;
        let child = pivot_node.child(lift_right).expect("`rotate()` - pivot has no child to lift!");
        let inner = self.nodes.get(child).child(!lift_right);

        self.nodes.get_mut(pivot).set_child(lift_right, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(pivot);
        }

        self.nodes.get_mut(child).parent = parent;
        self.replace_child(parent, pivot, Some(child));

        self.nodes.get_mut(child).set_child(!lift_right, Some(pivot));
        self.nodes.get_mut(pivot).parent = Some(child);

        if A::TRACKED {
            self.update_size(pivot);
            self.update_size(child);
        }
        log::trace!(
            "rotated {} around slot {}",
            if lift_right { "left" } else { "right" },
            pivot.to_index()
        );
    }

    /// Restores the red-black invariants after `node` was linked in red.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.nodes.get(node).parent {
            if self.nodes.get(parent).is_black() {
                break;
            }
            // The root is black, so a red parent always has a parent.
            let grandparent = self.nodes.get(parent).parent.expect("`insert_fixup()` - red node is the root!");
            let parent_on_right = self.nodes.get(grandparent).right == Some(parent);
            let uncle = self.nodes.get(grandparent).child(!parent_on_right);

            if let Some(uncle) = uncle.filter(|&u| self.nodes.get(u).is_red()) {
                // Red uncle: recolor and move the violation up two levels.
                self.nodes.get_mut(parent).color = Color::Black;
                self.nodes.get_mut(uncle).color = Color::Black;
                self.nodes.get_mut(grandparent).color = Color::Red;
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.nodes.get(parent).child(!parent_on_right) == Some(node) {
                // Inner grandchild: turn it into an outer one first.
                self.rotate(parent, !parent_on_right);
                node = parent;
                parent = self.nodes.get(node).parent.expect("`insert_fixup()` - rotated node lost its parent!");
            }

            self.nodes.get_mut(parent).color = Color::Black;
            self.nodes.get_mut(grandparent).color = Color::Red;
            self.rotate(grandparent, parent_on_right);
            log::trace!("insert fixup terminated at slot {}", node.to_index());
            break;
        }

        if let Some(root) = self.root {
            self.nodes.get_mut(root).color = Color::Black;
        }
    }

    /// Resolves the double-black deficiency left at `node` (possibly an empty leaf)
    /// below `parent` after a black node was spliced out.
    fn remove_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let Some(p) = parent else {
                break;
            };
            // An empty `node` sits on whichever side of `p` is empty; its sibling
            // cannot be empty because it carries the missing black height.
            let node_on_right = self.nodes.get(p).right == node;
            let mut sibling =
                self.nodes.get(p).child(!node_on_right).expect("`remove_fixup()` - doubly-black node has no sibling!");

            if self.nodes.get(sibling).is_red() {
                // Red sibling: rotate it above the parent to get a black sibling.
                self.nodes.get_mut(sibling).color = Color::Black;
                self.nodes.get_mut(p).color = Color::Red;
                self.rotate(p, !node_on_right);
                sibling = self.nodes.get(p).child(!node_on_right).expect("`remove_fixup()` - sibling vanished!");
            }

            let near = self.nodes.get(sibling).child(node_on_right);
            let far = self.nodes.get(sibling).child(!node_on_right);

            if !self.is_red(near) && !self.is_red(far) {
                // Black sibling with black children: push the deficiency up.
                self.nodes.get_mut(sibling).color = Color::Red;
                node = Some(p);
                parent = self.nodes.get(p).parent;
                continue;
            }

            if !self.is_red(far) {
                // Only the near nephew is red: rotate it into the far position.
                if let Some(near) = near {
                    self.nodes.get_mut(near).color = Color::Black;
                }
                self.nodes.get_mut(sibling).color = Color::Red;
                self.rotate(sibling, node_on_right);
                sibling = self.nodes.get(p).child(!node_on_right).expect("`remove_fixup()` - sibling vanished!");
            }

            // Red far nephew: one rotation around the parent ends the fixup.
            let parent_color = self.nodes.get(p).color;
            self.nodes.get_mut(sibling).color = parent_color;
            self.nodes.get_mut(p).color = Color::Black;
            if let Some(far) = self.nodes.get(sibling).child(!node_on_right) {
                self.nodes.get_mut(far).color = Color::Black;
            }
            self.rotate(p, !node_on_right);
            node = self.root;
            parent = None;
        }

        if let Some(node) = node {
            self.nodes.get_mut(node).color = Color::Black;
        }
    }

    /// Unlinks the node at `handle` and returns its entry.
    ///
    /// A node with two children trades its entry with its in-order successor, and
    /// the successor's node is the one physically removed.
    pub(crate) fn remove_node(&mut self, handle: Handle) -> (K, V) {
        let node = self.nodes.get(handle);
        let target = match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.minimum(right);
                let (node, successor_node) = self.nodes.get_pair_mut(handle, successor);
                core::mem::swap(&mut node.key, &mut successor_node.key);
                core::mem::swap(&mut node.value, &mut successor_node.value);
                successor
            }
            _ => handle,
        };

        let target_node = self.nodes.get(target);
        let child = target_node.left.or(target_node.right);
        let parent = target_node.parent;
        let color = target_node.color;

        if let Some(child) = child {
            self.nodes.get_mut(child).parent = parent;
        }
        self.replace_child(parent, target, child);
        // Sizes must be exact before the fixup rotations recompute them.
        self.adjust_sizes(parent, false);

        self.len -= 1;
        let removed = self.nodes.take(target);
        if color == Color::Black {
            self.remove_fixup(child, parent);
        }
        removed.into_entry()
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub(crate) fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut height = 0;
        let mut stack: Stack<(Handle, usize)> = smallvec![(root, 1)];
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            stack.extend([node.left, node.right].into_iter().flatten().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Tears the tree down leaf-first, handing every entry to `hook`, and leaves the
    /// tree empty.
    pub(crate) fn drain_post_order<F>(&mut self, mut hook: F)
    where
        F: FnMut(K, V),
    {
        log::debug!("releasing {} nodes", self.len);
        if let Some(root) = self.root.take() {
            let mut stack: Stack<Handle> = smallvec![root];
            while let Some(&top) = stack.last() {
                let node = self.nodes.get_mut(top);
                if let Some(left) = node.left.take() {
                    stack.push(left);
                } else if let Some(right) = node.right.take() {
                    stack.push(right);
                } else {
                    stack.pop();
                    let (key, value) = self.nodes.take(top).into_entry();
                    hook(key, value);
                }
            }
        }
        self.nodes.clear();
        self.len = 0;
    }

    /// Moves every entry out in ascending key order, leaving the tree empty.
    pub(crate) fn drain_in_order(&mut self) -> Vec<(K, V)> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            handles.push(handle);
            current = self.successor(handle);
        }

        let entries = handles.into_iter().map(|handle| self.nodes.take(handle).into_entry()).collect();
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        entries
    }

    /// Logs the tree shape, one node per line, at trace level.
    pub(crate) fn trace_structure(&self)
    where
        K: fmt::Debug,
    {
        let Some(root) = self.root else {
            log::trace!("<empty>");
            return;
        };
        let mut stack: Stack<(Handle, usize)> = smallvec![(root, 0)];
        while let Some((handle, depth)) = stack.pop() {
            let node = self.nodes.get(handle);
            log::trace!("{:indent$}{:?} {:?}", "", node.key, node.color, indent = depth * 2);
            stack.extend([node.right, node.left].into_iter().flatten().map(|child| (child, depth + 1)));
        }
    }
}

impl<K, V, C: Comparator<K>, A: Augment> RawRBTree<K, V, C, A> {
    /// Inserts or overwrites. Returns the previous value when `key` was present.
    ///
    /// A new node is only linked in after its slot has been allocated, so an
    /// allocation failure leaves the tree untouched.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let mut parent = None;
        let mut on_right = false;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.comparator.compare(&key, &node.key) {
                Ordering::Less => {
                    on_right = false;
                    current = node.left;
                }
                Ordering::Greater => {
                    on_right = true;
                    current = node.right;
                }
                Ordering::Equal => {
                    let old = core::mem::replace(&mut self.nodes.get_mut(handle).value, value);
                    return Ok(Some(old));
                }
            }
            parent = Some(handle);
        }

        let handle = self.nodes.try_alloc(Node::new_leaf(key, value, parent))?;
        match parent {
            None => self.root = Some(handle),
            Some(parent) => self.nodes.get_mut(parent).set_child(on_right, Some(handle)),
        }
        self.len += 1;
        self.adjust_sizes(parent, true);
        self.insert_fixup(handle);
        Ok(None)
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.search(key)?;
        Some(self.remove_node(handle))
    }

    /// Checks every structural invariant and panics on the first violation.
    pub(crate) fn validate(&self) {
        assert_eq!(self.nodes.len(), self.len, "live node count does not match `len`");

        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "empty tree reports entries");
            return;
        };
        let root_node = self.nodes.get(root);
        assert!(root_node.is_black(), "root is red");
        assert_eq!(root_node.parent, None, "root has a parent");

        let (count, _) = self.validate_subtree(root);
        assert_eq!(count, self.len, "reachable node count does not match `len`");

        let mut previous = self.first();
        while let Some(handle) = previous {
            let next = self.successor(handle);
            if let Some(next) = next {
                assert_eq!(
                    self.comparator.compare(&self.nodes.get(handle).key, &self.nodes.get(next).key),
                    Ordering::Less,
                    "keys are not strictly ascending"
                );
            }
            previous = next;
        }
    }

    /// Returns the node count and black height of the subtree at `handle`.
    fn validate_subtree(&self, handle: Handle) -> (usize, usize) {
        let node = self.nodes.get(handle);
        for child in [node.left, node.right].into_iter().flatten() {
            let child_node = self.nodes.get(child);
            assert_eq!(child_node.parent, Some(handle), "child does not link back to its parent");
            assert!(!(node.is_red() && child_node.is_red()), "red node has a red child");
        }

        let (left_count, left_height) = node.left.map_or((0, 1), |left| self.validate_subtree(left));
        let (right_count, right_height) = node.right.map_or((0, 1), |right| self.validate_subtree(right));
        assert_eq!(left_height, right_height, "black height differs between subtrees");

        let count = left_count + right_count + 1;
        if A::TRACKED {
            assert_eq!(node.augment.size(), count, "subtree size is stale");
        }
        (count, left_height + usize::from(node.is_black()))
    }
}

/// Turns a key bound into a probe for [`RawRBTree::range_by`].
fn bound_probe<'k, K, C>(comparator: &'k C, bound: Bound<&'k K>) -> Option<(impl FnMut(&K) -> Ordering + 'k, bool)>
where
    C: Comparator<K>,
{
    let (key, inclusive) = match bound {
        Bound::Included(key) => (key, true),
        Bound::Excluded(key) => (key, false),
        Bound::Unbounded => return None,
    };
    Some((move |probe: &K| comparator.compare(key, probe), inclusive))
}

impl<K, V, C> RawRBTree<K, V, C, SubtreeSize> {
    /// Number of keys below the probed key, if the key is present.
    pub(crate) fn rank_by<F>(&self, mut probe: F) -> Option<usize>
    where
        F: FnMut(&K) -> Ordering,
    {
        let mut rank = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match probe(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    rank += self.subtree_size(node.left) + 1;
                    current = node.right;
                }
                Ordering::Equal => return Some(rank + self.subtree_size(node.left)),
            }
        }
        None
    }

    /// Number of keys below the probed key, whether or not it is present.
    pub(crate) fn rank_lower_bound_by<F>(&self, mut probe: F) -> usize
    where
        F: FnMut(&K) -> Ordering,
    {
        let mut rank = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match probe(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    rank += self.subtree_size(node.left) + 1;
                    current = node.right;
                }
                Ordering::Equal => return rank + self.subtree_size(node.left),
            }
        }
        rank
    }

    /// Node at sorted position `index`.
    pub(crate) fn select(&self, mut index: usize) -> Option<Handle> {
        if index >= self.len {
            return None;
        }
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.subtree_size(node.left);
            match index.cmp(&left_size) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    index -= left_size + 1;
                    current = node.right;
                }
            }
        }
        None
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::super::size::Plain;
    use super::*;
    use crate::comparator::NaturalOrder;
    use crate::error::Error;
    use proptest::prelude::*;

    type Plain64 = RawRBTree<u64, u64, NaturalOrder, Plain>;
    type Ordered64 = RawRBTree<u64, u64, NaturalOrder, SubtreeSize>;

    fn keys<A: Augment>(tree: &RawRBTree<u64, u64, NaturalOrder, A>) -> Vec<u64> {
        let mut out = Vec::new();
        let mut current = tree.first();
        while let Some(handle) = current {
            out.push(tree.node(handle).key);
            current = tree.successor(handle);
        }
        out
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = Plain64::new(NaturalOrder);
        for key in 0..1024 {
            assert_eq!(tree.insert(key, key * 2), Ok(None));
            tree.validate();
        }
        // A red-black tree of n nodes is at most 2 * log2(n + 1) high.
        assert!(tree.height() <= 20, "height {} too large", tree.height());
        assert_eq!(keys(&tree), (0..1024).collect::<Vec<_>>());
    }

    #[test]
    fn insert_existing_key_replaces_value() {
        let mut tree = Plain64::new(NaturalOrder);
        assert_eq!(tree.insert(1, 10), Ok(None));
        assert_eq!(tree.insert(1, 11), Ok(Some(10)));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.search(&1).unwrap()).value, 11);
    }

    #[test]
    fn node_limit_leaves_tree_unchanged() {
        let mut tree = Ordered64::with_options(NaturalOrder, TreeOptions::new().node_limit(3));
        for key in [2, 1, 3] {
            tree.insert(key, key).unwrap();
        }
        assert_eq!(tree.insert(4, 4), Err(Error::OutOfMemory));
        assert_eq!(tree.len(), 3);
        tree.validate();
        // Overwriting needs no new node.
        assert_eq!(tree.insert(2, 20), Ok(Some(2)));
    }

    #[test]
    fn bounds() {
        let mut tree = Plain64::new(NaturalOrder);
        for key in (10..=50).step_by(10) {
            tree.insert(key, key).unwrap();
        }
        let key_of = |handle: Option<Handle>| handle.map(|h| tree.node(h).key);

        assert_eq!(key_of(tree.lower_bound_by(|k| 30.cmp(k), true)), Some(30));
        assert_eq!(key_of(tree.lower_bound_by(|k| 30.cmp(k), false)), Some(40));
        assert_eq!(key_of(tree.lower_bound_by(|k| 35.cmp(k), false)), Some(40));
        assert_eq!(key_of(tree.lower_bound_by(|k| 50.cmp(k), false)), None);
        assert_eq!(key_of(tree.upper_bound_by(|k| 30.cmp(k), true)), Some(30));
        assert_eq!(key_of(tree.upper_bound_by(|k| 30.cmp(k), false)), Some(20));
        assert_eq!(key_of(tree.upper_bound_by(|k| 5.cmp(k), true)), None);
    }

    #[test]
    fn drain_post_order_visits_children_first() {
        let mut tree = Plain64::new(NaturalOrder);
        for key in 1..=7 {
            tree.insert(key, key).unwrap();
        }
        let root_key = tree.node(tree.root.unwrap()).key;

        let mut visited = Vec::new();
        tree.drain_post_order(|key, _| visited.push(key));

        assert_eq!(visited.len(), 7);
        assert_eq!(visited.last(), Some(&root_key));
        assert!(tree.is_empty());
        tree.validate();
    }

    #[test]
    fn repeated_root_removal() {
        let mut tree = Ordered64::new(NaturalOrder);
        for key in 0..200 {
            tree.insert(key, key).unwrap();
        }
        while let Some(root) = tree.root {
            let key = tree.node(root).key;
            assert_eq!(tree.remove_node(root), (key, key));
            assert_eq!(tree.search(&key), None);
            tree.validate();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn select_and_rank() {
        let mut tree = Ordered64::new(NaturalOrder);
        for key in [50, 20, 80, 10, 30, 70, 90] {
            tree.insert(key, key).unwrap();
        }
        for (index, key) in [10, 20, 30, 50, 70, 80, 90].into_iter().enumerate() {
            assert_eq!(tree.node(tree.select(index).unwrap()).key, key);
            assert_eq!(tree.rank_by(|k| key.cmp(k)), Some(index));
        }
        assert_eq!(tree.select(7), None);
        assert_eq!(tree.rank_by(|k| 55.cmp(k)), None);
        assert_eq!(tree.rank_lower_bound_by(|k| 55.cmp(k)), 4);
        assert_eq!(tree.rank_lower_bound_by(|k| 5.cmp(k)), 0);
        assert_eq!(tree.rank_lower_bound_by(|k| 95.cmp(k)), 7);
    }

    proptest! {
        #[test]
        fn random_operations_keep_invariants(ops in prop::collection::vec((any::<bool>(), 0u64..64), 0..512)) {
            let mut tree = Ordered64::new(NaturalOrder);
            let mut model = alloc::collections::BTreeMap::new();

            for (insert, key) in ops {
                if insert {
                    prop_assert_eq!(tree.insert(key, key + 1).unwrap(), model.insert(key, key + 1));
                } else {
                    prop_assert_eq!(tree.remove(&key), model.remove_entry(&key));
                }
                tree.validate();
                prop_assert_eq!(tree.len(), model.len());
            }
            prop_assert_eq!(keys(&tree), model.keys().copied().collect::<Vec<_>>());
        }
    }
}
