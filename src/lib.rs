//! Red-black tree ordered indexes for Rust.
//!
//! This crate provides three maps over one red-black tree core:
//!
//! - [`RBTreeMap`] - an ordered map with a pluggable [`Comparator`]
//! - [`OSTreeMap`] - the same map with subtree sizes, answering positional
//!   queries in O(log n):
//!   - [`rank`](OSTreeMap::rank) - the sorted position of a key
//!   - [`select`](OSTreeMap::select) - the entry at a sorted position
//!   - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first value
//! - [`ByteTree`] - fixed-size byte keys and values ordered by a comparator
//!   function over the raw key bytes
//!
//! Every map hands out double-ended range cursors with independent inclusive or
//! exclusive bounds.
//!
//! # Example
//!
//! ```
//! use rbt_index::{OSTreeMap, Rank};
//!
//! let mut scores = OSTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Positional queries (O(log n))
//! assert_eq!(scores.select(1), Ok((&"Bob", &85)));
//! assert_eq!(scores.rank(&"Carol"), Some(2));
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // Range cursors
//! let names: Vec<_> = scores.range("B"..).map(|(name, _)| *name).collect();
//! assert_eq!(names, ["Bob", "Carol"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Fallible allocation** - `put` reports [`Error::OutOfMemory`] and leaves the tree as it was
//! - **Bounded node storage** - [`TreeOptions::node_limit`] caps the node slab
//!
//! # Implementation
//!
//! Nodes live in a slab and link to each other by index, parent links included.
//! Insertion and removal follow the classic red-black fixups: at most two
//! rotations per insertion and three per removal. The order-statistic map keeps
//! a subtree size in every node and repairs the sizes along the mutated path.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod error;
mod options;
mod order_statistic;
mod raw;

pub mod byte_tree;
pub mod os_tree_map;
pub mod rb_tree_map;

pub use byte_tree::{ByteTree, KeyCompare};
pub use comparator::{Comparator, NaturalOrder};
pub use error::{Error, Result};
pub use options::TreeOptions;
pub use order_statistic::Rank;
pub use os_tree_map::OSTreeMap;
pub use rb_tree_map::RBTreeMap;
