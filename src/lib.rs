//! An arena-backed Red-Black Tree for Rust.
//!
//! This crate provides [`RbTreeSet`], an ordered set guaranteeing O(log n)
//! search, insertion, and deletion. Balance is maintained by the classic
//! red-black coloring discipline: every node is tagged `Red` or `Black`, the
//! root is always black, a red node never has a red child, and every path
//! from a node down to an absent child passes the same number of black
//! nodes. Together these bound the height at `2 * log2(n + 1)`.
//!
//! # Example
//!
//! ```
//! use rubi_tree::RbTreeSet;
//!
//! let mut set = RbTreeSet::new();
//! set.insert(13);
//! set.insert(8);
//! set.insert(17);
//!
//! assert!(set.contains(&8));
//! assert_eq!(set.min(), Some(&8));
//! assert_eq!(set.inorder(), [&8, &13, &17]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Index-based arena storage** - Nodes live in a flat slot arena addressed by
//!   `NonZero` handles; parent links are plain back-indices, so there are no
//!   reference cycles and no unsafe pointer graphs
//! - **Traversals** - In-order, pre-order, post-order, and breadth-first walks
//! - **Self-checking** - [`RbTreeSet::validate`] verifies every structural and
//!   coloring invariant, for use in tests
//!
//! # Implementation
//!
//! The crate is split into a color-agnostic binary-search-tree substrate
//! (leaf insertion, rotations, transplant, search, min/max, traversals) and a
//! red-black layer that drives the two balancing state machines: the
//! insertion fixup and the "double black" deletion fixup. Both fixups are
//! iterative and dispatch over explicit case enums so the compiler checks the
//! case analysis for exhaustiveness.

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

mod raw;

pub mod rbtree_set;

pub use rbtree_set::RbTreeSet;
