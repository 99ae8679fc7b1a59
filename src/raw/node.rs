use super::handle::Handle;
use super::size::Augment;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A red-black tree node.
///
/// Child links own their subtree in the sense that the tree frees every node
/// reachable from the root; the parent link is only a way back up.
#[derive(Clone)]
pub(crate) struct Node<K, V, A> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    // Subtree size for the order-statistic tree, zero-sized otherwise.
    pub(crate) augment: A,
}

impl<K, V, A: Augment> Node<K, V, A> {
    /// Creates a red leaf hanging off `parent`.
    pub(crate) fn new_leaf(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
            augment: A::from_size(1),
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    /// Returns the child on the requested side.
    #[inline]
    pub(crate) fn child(&self, right: bool) -> Option<Handle> {
        if right { self.right } else { self.left }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, right: bool, child: Option<Handle>) {
        if right {
            self.right = child;
        } else {
            self.left = child;
        }
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}
