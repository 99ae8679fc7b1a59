use super::handle::Handle;
use super::raw_rb_tree::RawRBTree;

/// A double-ended cursor over the nodes between `front` and `back`, inclusive.
///
/// Both ends walk towards each other through successor/predecessor links; the
/// cursor is exhausted once they meet.
pub(crate) struct RawRange<'a, K, V, C, A> {
    tree: &'a RawRBTree<K, V, C, A>,
    front: Option<Handle>,
    back: Option<Handle>,
}

impl<'a, K, V, C, A> RawRange<'a, K, V, C, A> {
    /// `front` must not come after `back` in key order. Either being `None`
    /// makes the cursor empty.
    pub(crate) fn new(tree: &'a RawRBTree<K, V, C, A>, front: Option<Handle>, back: Option<Handle>) -> Self {
        match (front, back) {
            (Some(_), Some(_)) => Self { tree, front, back },
            _ => Self {
                tree,
                front: None,
                back: None,
            },
        }
    }

    pub(crate) const fn tree(&self) -> &'a RawRBTree<K, V, C, A> {
        self.tree
    }

    pub(crate) const fn is_exhausted(&self) -> bool {
        self.front.is_none()
    }

    fn finish(&mut self) {
        self.front = None;
        self.back = None;
    }

    pub(crate) fn next_entry(&mut self) -> Option<(&'a K, &'a V)> {
        let front = self.front?;
        if self.front == self.back {
            self.finish();
        } else {
            self.front = self.tree.successor(front);
        }
        let node = self.tree.node(front);
        Some((&node.key, &node.value))
    }

    pub(crate) fn next_back_entry(&mut self) -> Option<(&'a K, &'a V)> {
        let back = self.back?;
        if self.front == self.back {
            self.finish();
        } else {
            self.back = self.tree.predecessor(back);
        }
        let node = self.tree.node(back);
        Some((&node.key, &node.value))
    }
}

impl<K, V, C, A> Clone for RawRange<'_, K, V, C, A> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}
