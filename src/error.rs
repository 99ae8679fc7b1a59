use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by the trees in this crate.
///
/// Only conditions a caller can provoke through normal use are represented here.
/// A broken tree invariant is a bug in this crate and panics instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A tree was created with arguments it cannot work with, or a buffer does not
    /// match the tree's fixed key or value size.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },
    /// The requested key is not stored in the tree.
    #[error("key not found")]
    NotFound,
    /// A new node could not be allocated. The tree is left unchanged.
    #[error("out of memory: no node slot available")]
    OutOfMemory,
    /// A sorted position was requested outside of `0..len`.
    #[error("index {index} out of range for tree of length {len}")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The number of entries in the tree.
        len: usize,
    },
}
