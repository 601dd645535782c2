//! Self-adjusting splay-tree sequence with pluggable order statistics.
//!
//! [`SplayList`] represents an ordered *sequence*, not a key-sorted set:
//! the in-order position of a node is its logical index.  Random-access
//! get/set, insert, remove and range splice are all amortized O(log n) —
//! where a plain `Vec` gives O(1) access but O(n) insert/remove, and a
//! linked list the reverse.
//!
//! Instead of raw cyclic pointers, all "pointers" are `Option<u32>`
//! indices into a `Vec`-backed arena owned by the list, so ownership
//! stays explicit and node handles ([`NodeId`]) are stable slot keys.
//!
//! Each node carries an aggregate record summarizing its subtree,
//! recomputed bottom-up by a reducer chosen at construction
//! ([`OrderStats`]); the always-present subtree `count` drives index
//! lookups, and custom fields drive cumulative-offset searches like
//! "the node at byte offset 4096".
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`node`]  | Arena slots ([`Node`]) and handles ([`NodeId`]) |
//! | [`stats`] | [`OrderStats`] reducer contract, default [`Count`] |
//! | [`splay`] | Rotation primitives, bottom-up splay |
//! | [`order`] | Top-down order-statistic splay |
//! | [`util`]  | Non-splaying traversal (`first`, `next`, …) |
//! | [`list`]  | [`SplayList`] container and sequence API |
//! | [`print`] | Diagnostic tree dump |
//!
//! # Example
//!
//! ```
//! use splay_list::SplayList;
//!
//! let mut list: SplayList<&str> = SplayList::new();
//! let loc = list.push("first");
//! list.insert_before(Some(loc), "before");
//! list.insert_after(Some(loc), "after");
//! list.unshift("unshifted");
//! assert_eq!(list.to_vec(), ["unshifted", "before", "first", "after"]);
//! assert_eq!(list.get(2), Some(&"first"));
//! ```

pub mod list;
pub mod node;
pub mod order;
pub mod print;
pub mod splay;
pub mod stats;
pub mod util;

pub use list::{Iter, SplayList};
pub use node::{Node, NodeId};
pub use order::splay_by_order;
pub use splay::{reorder, rotate_left, rotate_right, splay_up};
pub use stats::{Count, OrderStats};
