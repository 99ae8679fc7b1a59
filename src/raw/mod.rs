mod arena;
mod handle;
mod node;
mod range;
mod raw_rb_tree;
mod size;

pub(crate) use handle::Handle;
pub(crate) use range::RawRange;
pub(crate) use raw_rb_tree::RawRBTree;
pub use size::{Plain, SubtreeSize};
