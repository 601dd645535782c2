//! Link accessors and non-splaying traversal.
//!
//! All functions take the arena as a slice plus node indices (`u32`).
//! Traversal never splays: iterating a whole list is O(n) total and a
//! single step is O(log n) amortized, so restructuring would buy nothing.

use crate::node::Node;

// ── link helpers ──────────────────────────────────────────────────────────

#[inline]
pub(crate) fn get_p<V, S>(arena: &[Node<V, S>], idx: u32) -> Option<u32> {
    arena[idx as usize].p
}
#[inline]
pub(crate) fn get_l<V, S>(arena: &[Node<V, S>], idx: u32) -> Option<u32> {
    arena[idx as usize].l
}
#[inline]
pub(crate) fn get_r<V, S>(arena: &[Node<V, S>], idx: u32) -> Option<u32> {
    arena[idx as usize].r
}
#[inline]
pub(crate) fn set_p<V, S>(arena: &mut [Node<V, S>], idx: u32, v: Option<u32>) {
    arena[idx as usize].p = v;
}
#[inline]
pub(crate) fn set_l<V, S>(arena: &mut [Node<V, S>], idx: u32, v: Option<u32>) {
    arena[idx as usize].l = v;
}
#[inline]
pub(crate) fn set_r<V, S>(arena: &mut [Node<V, S>], idx: u32, v: Option<u32>) {
    arena[idx as usize].r = v;
}

// ── traversal ─────────────────────────────────────────────────────────────

/// Leftmost node of the subtree rooted at `idx`.
pub fn leftmost<V, S>(arena: &[Node<V, S>], mut idx: u32) -> u32 {
    while let Some(l) = get_l(arena, idx) {
        idx = l;
    }
    idx
}

/// Rightmost node of the subtree rooted at `idx`.
pub fn rightmost<V, S>(arena: &[Node<V, S>], mut idx: u32) -> u32 {
    while let Some(r) = get_r(arena, idx) {
        idx = r;
    }
    idx
}

/// First node in sequence order.
pub fn first<V, S>(arena: &[Node<V, S>], root: Option<u32>) -> Option<u32> {
    root.map(|r| leftmost(arena, r))
}

/// Last node in sequence order.
pub fn last<V, S>(arena: &[Node<V, S>], root: Option<u32>) -> Option<u32> {
    root.map(|r| rightmost(arena, r))
}

/// In-order successor.
pub fn next<V, S>(arena: &[Node<V, S>], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return Some(leftmost(arena, r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<V, S>(arena: &[Node<V, S>], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return Some(rightmost(arena, l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Number of nodes under `root`, counted by walking the links.  Used by
/// diagnostics and tests to cross-check the `count` aggregate.
pub fn subtree_size<V, S>(arena: &[Node<V, S>], root: Option<u32>) -> usize {
    let Some(root) = root else { return 0 };
    let mut n = 0;
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        n += 1;
        if let Some(l) = get_l(arena, i) {
            stack.push(l);
        }
        if let Some(r) = get_r(arena, i) {
            stack.push(r);
        }
    }
    n
}
