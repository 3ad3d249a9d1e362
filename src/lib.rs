//! AVL order-statistic tree for Rust.
//!
//! This crate provides [`AvlTree`], an ordered set of unique values kept in a
//! height-balanced binary search tree, with order-statistic queries on top of
//! the usual insert/delete/search:
//!
//! - [`count_less`](AvlTree::count_less) / [`count_greater`](AvlTree::count_greater) -
//!   How many elements sort before / after a value, present or not
//! - [`k_smallest`](AvlTree::k_smallest) - The k-th smallest element (one-based),
//!   found with a stackless threaded walk
//! - [`get_by_rank`](AvlTree::get_by_rank) and indexing by [`Rank`] - The same
//!   question, zero-based and read-only, answered from cached subtree sizes
//! - [`inorder`](AvlTree::inorder), [`preorder`](AvlTree::preorder),
//!   [`postorder`](AvlTree::postorder) - Depth-first traversals
//!
//! # Example
//!
//! ```
//! use avl_ost::{AvlTree, Rank};
//!
//! let mut tree = AvlTree::new();
//! for value in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(value);
//! }
//!
//! // Duplicates are ignored.
//! assert!(!tree.insert(5));
//! assert_eq!(tree.len(), 7);
//!
//! // Rank queries (O(log n))
//! assert_eq!(tree.count_less(&7), 4);
//! assert_eq!(tree.count_greater(&7), 2);
//! assert_eq!(tree[Rank(3)], 5);
//!
//! // k-th smallest, one-based
//! assert_eq!(tree.k_smallest(4), Ok(&5));
//! assert!(tree.k_smallest(8).is_err());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc` with default features off
//! - **`std`** (default) - Adds [`SharedAvlTree`], a lock-guarded tree for
//!   sharing between threads
//!
//! # Implementation
//!
//! Nodes live in one arena and link to their children by index. Each node
//! caches the height and size of its subtree, which keeps rebalancing local
//! and makes the rank queries logarithmic. Rotation and no-op mutation events
//! are emitted through [`tracing`] at trace level.

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
#[cfg(any(feature = "std", test))]
extern crate std;

mod error;
mod order_statistic;
mod raw;

pub mod avl_tree;
#[cfg(feature = "std")]
pub mod sync;

pub use avl_tree::AvlTree;
pub use error::AvlError;
pub use order_statistic::Rank;
#[cfg(feature = "std")]
pub use sync::SharedAvlTree;
