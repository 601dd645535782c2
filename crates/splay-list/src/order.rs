//! Top-down order-statistic splay.
//!
//! Locates, in one downward pass, the leftmost node whose *cumulative*
//! aggregate for a key strictly exceeds a running target offset, splaying
//! it to the root as a byproduct of the search.  This is the simplified
//! top-down splaying algorithm from Sleator & Tarjan, "Self-adjusting
//! Binary Search Trees", driven by an aggregate key instead of an
//! ordering comparison.
//!
//! The classic formulation threads both detached chains through a shared
//! stub node.  Here the stub is replaced by stack-local head/tail cursors
//! (`Option<u32>` each), so the pass allocates nothing and stays
//! re-entrant across lists.

use crate::node::Node;
use crate::splay::{reorder, rotate_left, rotate_right};
use crate::stats::OrderStats;
use crate::util::{get_l, get_p, get_r, set_l, set_p, set_r};

/// Searches for the node at cumulative offset `target` under `key` and
/// splays it to the root.
///
/// Returns `(found, new_root)`.  `found` is `false` when `target` is at
/// or past the whole tree's aggregate; the tree is then still correctly
/// splayed (to the last node visited, i.e. the rightmost) but no node
/// satisfies the search — callers must treat this as "no such node", not
/// an error.  An empty tree returns `(false, None)` without mutating
/// anything.
///
/// `key` must read a monotone, non-negative field of the aggregate record
/// (the subtree `count`, a sum of non-negative per-value numbers, …).
pub fn splay_by_order<V, R, F>(
    arena: &mut [Node<V, R::Stats>],
    reducer: &R,
    root: Option<u32>,
    key: F,
    mut target: usize,
) -> (bool, Option<u32>)
where
    R: OrderStats<V>,
    F: Fn(&R::Stats) -> usize,
{
    let Some(mut root) = root else {
        return (false, None);
    };

    // Detached chains.  Heads are what will hang back under the found
    // node; tails grow downward as the search bypasses subtrees.  Chain
    // links are threaded through the bypassed nodes' own l/r/p fields;
    // their aggregates go stale until the reassembly walk below.
    let mut left_head: Option<u32> = None;
    let mut left_tail: Option<u32> = None;
    let mut right_head: Option<u32> = None;
    let mut right_tail: Option<u32> = None;

    let found;
    loop {
        if let Some(l) = get_l(arena, root) {
            if target < key(&arena[l as usize].stats) {
                // The answer is inside the left subtree.  When it is
                // already known to land inside l's *left* subtree, rotate
                // first so the bypassed chain stays shallow; this is what
                // keeps the single pass amortized O(log n).
                let mut node = root;
                let mut next = l;
                if let Some(ll) = get_l(arena, l) {
                    if target < key(&arena[ll as usize].stats) {
                        rotate_right(arena, l, node);
                        reorder(arena, reducer, node);
                        node = l;
                        next = ll;
                    }
                }
                // Everything at `node` and to its right ends up after the
                // found node: grow the right chain.
                match right_tail {
                    Some(t) => set_l(arena, t, Some(node)),
                    None => right_head = Some(node),
                }
                set_p(arena, node, right_tail);
                right_tail = Some(node);
                root = next;
                continue;
            }
        }
        let rootsum = key(&arena[root as usize].stats);
        if let Some(r) = get_r(arena, root) {
            let side = key(&arena[r as usize].stats);
            if target >= rootsum - side {
                // The target falls at or past root's own contribution,
                // into the right subtree.  Symmetric rotation optimization
                // when it is already past r's own contribution too.
                let mut node = root;
                let mut next = r;
                let mut consumed = rootsum - side;
                if let Some(rr) = get_r(arena, r) {
                    let ss = key(&arena[rr as usize].stats);
                    if target >= rootsum - ss {
                        rotate_left(arena, r, node);
                        reorder(arena, reducer, node);
                        node = r;
                        next = rr;
                        consumed = rootsum - ss;
                    }
                }
                target -= consumed;
                match left_tail {
                    Some(t) => set_r(arena, t, Some(node)),
                    None => left_head = Some(node),
                }
                set_p(arena, node, left_tail);
                left_tail = Some(node);
                root = next;
                continue;
            }
            found = true;
            break;
        }
        // Ran off the right edge: found only if the offset falls within
        // root's own contribution.
        found = target < rootsum;
        break;
    }

    // Reassemble: root's remaining subtrees finish off the chains, the
    // chains become root's new children.
    let rl = get_l(arena, root);
    let rr = get_r(arena, root);
    match left_tail {
        Some(t) => {
            set_r(arena, t, rl);
            if let Some(rl) = rl {
                set_p(arena, rl, Some(t));
            }
        }
        None => left_head = rl,
    }
    match right_tail {
        Some(t) => {
            set_l(arena, t, rr);
            if let Some(rr) = rr {
                set_p(arena, rr, Some(t));
            }
        }
        None => right_head = rr,
    }
    set_l(arena, root, left_head);
    if let Some(h) = left_head {
        set_p(arena, h, Some(root));
    }
    set_r(arena, root, right_head);
    if let Some(h) = right_head {
        set_p(arena, h, Some(root));
    }
    set_p(arena, root, None);

    // Propagate aggregates back up both chains, tails first.  Chain
    // parent links point at the previous chain element, so following them
    // walks tail → head → root.
    let mut curr = right_tail;
    while let Some(i) = curr {
        reorder(arena, reducer, i);
        curr = get_p(arena, i);
    }
    let mut curr = left_tail;
    while let Some(i) = curr {
        reorder(arena, reducer, i);
        curr = get_p(arena, i);
    }
    reorder(arena, reducer, root);

    (found, Some(root))
}
