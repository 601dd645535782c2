//! Rotation primitives and the bottom-up splay.
//!
//! Rotations only rewire links; they never touch aggregate records.
//! Callers recompute stats afterwards with [`reorder`], bottom node first,
//! then the promoted node.

use crate::node::Node;
use crate::stats::OrderStats;
use crate::util::{get_l, get_p, get_r, set_l, set_p, set_r};

/// Recompute `x`'s aggregate record from its value and its children's
/// current records.
pub fn reorder<V, R>(arena: &mut [Node<V, R::Stats>], reducer: &R, x: u32)
where
    R: OrderStats<V>,
{
    let n = &arena[x as usize];
    let (l, r) = (n.l, n.r);
    let stats = {
        let ls = l.map(|i| &arena[i as usize].stats);
        let rs = r.map(|i| &arena[i as usize].stats);
        match arena[x as usize].v.as_ref() {
            Some(value) => reducer.combine(value, ls, rs),
            None => return, // freed slot, nothing to maintain
        }
    };
    arena[x as usize].stats = stats;
}

// ── rooted single rotations ───────────────────────────────────────────────

/// Rooted right rotation: promote `y = x.l` over `x`.
///
/// ```text
///      x            y
///    /   \        /   \
///   y     R  →   LL    x
/// /   \              /   \
/// LL   LR           LR    R
/// ```
///
/// `y`'s parent link is cleared and `x`'s old parent keeps a stale child
/// link; callers either know `x` was a (sub)tree root or rewire through
/// [`rotate_right_up`].
pub fn rotate_right<V, S>(arena: &mut [Node<V, S>], y: u32, x: u32) {
    let b = get_r(arena, y);
    set_p(arena, y, None);
    set_r(arena, y, Some(x));
    set_p(arena, x, Some(y));
    set_l(arena, x, b);
    if let Some(b) = b {
        set_p(arena, b, Some(x));
    }
}

/// Rooted left rotation: promote `y = x.r` over `x` (mirror of
/// [`rotate_right`]).
pub fn rotate_left<V, S>(arena: &mut [Node<V, S>], y: u32, x: u32) {
    let b = get_l(arena, y);
    set_p(arena, y, None);
    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));
    set_r(arena, x, b);
    if let Some(b) = b {
        set_p(arena, b, Some(x));
    }
}

// ── parent-fixing rotations ───────────────────────────────────────────────

/// Right rotation at `x` promoting `y = x.l`, rewiring `x`'s old parent
/// (or the tree root if `x` was the root).  Returns the new tree root.
pub fn rotate_right_up<V, S>(
    arena: &mut [Node<V, S>],
    root: Option<u32>,
    y: u32,
    x: u32,
) -> Option<u32> {
    let p = get_p(arena, x);
    rotate_right(arena, y, x);
    set_p(arena, y, p);
    reattach(arena, root, p, x, y)
}

/// Left rotation at `x` promoting `y = x.r` (mirror of
/// [`rotate_right_up`]).
pub fn rotate_left_up<V, S>(
    arena: &mut [Node<V, S>],
    root: Option<u32>,
    y: u32,
    x: u32,
) -> Option<u32> {
    let p = get_p(arena, x);
    rotate_left(arena, y, x);
    set_p(arena, y, p);
    reattach(arena, root, p, x, y)
}

/// After a rotation moved `y` into the slot previously occupied by `x`,
/// wire `y` into `x`'s old parent `p`.
fn reattach<V, S>(
    arena: &mut [Node<V, S>],
    root: Option<u32>,
    p: Option<u32>,
    x: u32,
    y: u32,
) -> Option<u32> {
    match p {
        Some(p) => {
            if get_l(arena, p) == Some(x) {
                set_l(arena, p, Some(y));
            } else {
                set_r(arena, p, Some(y));
            }
            root
        }
        None => Some(y),
    }
}

// ── bottom-up splay ───────────────────────────────────────────────────────

/// Splay `x` to the root via zig / zig-zig / zig-zag steps, recomputing
/// aggregates along the path: grandparent first, then parent, after each
/// grandparent-level step, and `x` itself once at the end.
///
/// Returns the new root (always `x`).  Amortized O(log n).
pub fn splay_up<V, R>(
    arena: &mut [Node<V, R::Stats>],
    reducer: &R,
    mut root: Option<u32>,
    x: u32,
) -> Option<u32>
where
    R: OrderStats<V>,
{
    while let Some(p) = get_p(arena, x) {
        match get_p(arena, p) {
            None => {
                // zig
                root = if get_l(arena, p) == Some(x) {
                    rotate_right_up(arena, root, x, p)
                } else {
                    rotate_left_up(arena, root, x, p)
                };
                reorder(arena, reducer, p);
            }
            Some(g) => {
                let x_left = get_l(arena, p) == Some(x);
                let p_left = get_l(arena, g) == Some(p);
                root = match (p_left, x_left) {
                    (true, true) => {
                        // zig-zig right
                        let root = rotate_right_up(arena, root, p, g);
                        rotate_right_up(arena, root, x, p)
                    }
                    (false, false) => {
                        // zig-zig left
                        let root = rotate_left_up(arena, root, p, g);
                        rotate_left_up(arena, root, x, p)
                    }
                    (false, true) => {
                        // zig-zag right-left
                        let root = rotate_right_up(arena, root, x, p);
                        rotate_left_up(arena, root, x, g)
                    }
                    (true, false) => {
                        // zig-zag left-right
                        let root = rotate_left_up(arena, root, x, p);
                        rotate_right_up(arena, root, x, g)
                    }
                };
                reorder(arena, reducer, g);
                reorder(arena, reducer, p);
            }
        }
    }
    reorder(arena, reducer, x);
    debug_assert_eq!(root, Some(x));
    root
}
