//! Arena slots and public node handles.
//!
//! Every "pointer" in the tree is an `Option<u32>` index into a
//! [`Vec`]-backed arena owned by the list.  The arena owns all nodes; the
//! list holds only a root index, so the cyclic parent/child graph never
//! needs reference counting or unsafe code.

/// One arena slot: a sequence element with its tree links and aggregate
/// record.
#[derive(Clone, Debug)]
pub struct Node<V, S> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    /// Value is wrapped in `Option` so removal can take it by value
    /// without moving the slot out of the arena.
    pub v: Option<V>,
    /// Aggregate record for the subtree rooted here, produced by the
    /// list's reducer.  Always contains the subtree size.
    pub stats: S,
}

impl<V, S> Node<V, S> {
    pub fn new(v: V, stats: S) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            v: Some(v),
            stats,
        }
    }
}

/// Stable handle to a node slot in a [`SplayList`](crate::SplayList).
///
/// A handle stays valid while its element is in the list.  Using a handle
/// after its element was removed, or against a different list, is a
/// contract violation; debug builds catch most such uses, release builds
/// may return garbage or panic on an out-of-bounds slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub(crate) u32);
