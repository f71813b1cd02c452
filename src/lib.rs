//! A red-black ordered index with stable element identity.
//!
//! [`RbTree`] stores `(id, key)` pairs ordered by key, where keys may repeat and the
//! identifier is the element's handle for its whole life in the tree. It is meant as
//! the status structure of sweep-line style algorithms, which need:
//!
//! - [`insert`](RbTree::insert) and [`delete`](RbTree::delete) by identifier in O(log n)
//! - [`minimum`](RbTree::minimum) / [`maximum`](RbTree::maximum) and the neighbors of an
//!   element via [`successor`](RbTree::successor) / [`predecessor`](RbTree::predecessor)
//! - in-order iteration with [`iter`](RbTree::iter)
//!
//! # Example
//!
//! ```
//! use rb_index::{FaultKind, RbTree};
//!
//! let mut tree = RbTree::new();
//! for (id, key) in [(1, 50), (2, 30), (3, 70), (4, 20), (5, 40)] {
//!     tree.insert(id, key).unwrap();
//! }
//!
//! let first = tree.minimum().unwrap();
//! assert_eq!((*first.id(), *first.key()), (4, 20));
//! assert_eq!(first.successor().map(|node| *node.key()), Some(30));
//!
//! tree.delete(&3).unwrap();
//! assert!(!tree.contains_id(&3));
//!
//! let report = tree.check();
//! assert!(report.is_valid());
//! assert_eq!(report.kind(), None::<FaultKind>);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Verifiable** - [`RbTree::check`] certifies the coloring invariants and reports every
//!   offending node; [`Config`] can run it after each mutation
//!
//! # Implementation
//!
//! Nodes live in a slot arena and link to each other by index, with `None` standing in
//! for the nil sentinel. Insertion follows the left-leaning red-black discipline and
//! deletion the bottom-up six-case fixup, adjusted so that no red node is ever left as a
//! right child.

#![no_std]
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

mod config;
mod error;
mod raw;
mod report;

pub mod rb_tree;

pub use config::{Config, Verification};
pub use error::{Error, Result};
pub use raw::Color;
pub use rb_tree::{NodeRef, RbTree};
pub use report::{Fault, FaultKind, Report};
