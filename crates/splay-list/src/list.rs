//! The sequence container and its list-like API.

use std::fmt;

use crate::node::{Node, NodeId};
use crate::order::splay_by_order;
use crate::splay::{reorder, splay_up};
use crate::stats::{Count, OrderStats};
use crate::util;

/// A self-adjusting binary search tree representing an ordered sequence:
/// the in-order position of a node is its logical index.
///
/// Random-access get/set, insert, remove and range splice are all
/// amortized O(log n).  Most operations splay and therefore take
/// `&mut self` even when they only read.
///
/// The list owns all of its nodes through a `Vec`-backed arena; handles
/// ([`NodeId`]) are stable slot indices.  Lists are never copied
/// implicitly — splaying mutates in place — and are not safe for
/// concurrent mutation; callers needing shared access must serialize
/// externally.
pub struct SplayList<V, R = Count>
where
    R: OrderStats<V>,
{
    pub(crate) arena: Vec<Node<V, R::Stats>>,
    pub(crate) free: Vec<u32>,
    pub(crate) root: Option<u32>,
    pub(crate) reducer: R,
}

impl<V> SplayList<V, Count> {
    /// Empty list with the default size-counting reducer.
    pub fn new() -> Self {
        Self::with_stats(Count)
    }
}

impl<V> Default for SplayList<V, Count> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<V> for SplayList<V, Count> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut list = Self::new();
        list.push_all(iter);
        list
    }
}

impl<V, R> SplayList<V, R>
where
    R: OrderStats<V>,
{
    /// Empty list with a custom aggregate reducer.
    pub fn with_stats(reducer: R) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            reducer,
        }
    }

    /// Number of elements, read off the root's `count` aggregate.
    pub fn len(&self) -> usize {
        self.root
            .map_or(0, |r| R::count(&self.arena[r as usize].stats))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    // ── slot management ───────────────────────────────────────────────

    fn alloc(&mut self, value: V) -> u32 {
        let stats = self.reducer.combine(&value, None, None);
        self.alloc_slot(Node::new(value, stats))
    }

    fn alloc_slot(&mut self, node: Node<V, R::Stats>) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = node;
                i
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Clears `i`'s links, takes its value out and recycles the slot.
    fn release(&mut self, i: u32) -> V {
        let n = &mut self.arena[i as usize];
        n.p = None;
        n.l = None;
        n.r = None;
        let v = n.v.take();
        self.free.push(i);
        v.unwrap()
    }

    fn free_subtree(&mut self, root: u32) {
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            if let Some(l) = self.arena[i as usize].l {
                stack.push(l);
            }
            if let Some(r) = self.arena[i as usize].r {
                stack.push(r);
            }
            self.release(i);
        }
    }

    /// Takes the values of the subtree at `root` in sequence order,
    /// recycling the slots.
    fn drain_subtree(&mut self, root: u32, out: &mut Vec<V>) {
        let mut stack: Vec<u32> = Vec::new();
        let mut curr = Some(root);
        loop {
            while let Some(i) = curr {
                stack.push(i);
                curr = self.arena[i as usize].l;
            }
            match stack.pop() {
                Some(i) => {
                    curr = self.arena[i as usize].r;
                    out.push(self.release(i));
                }
                None => break,
            }
        }
    }

    fn reorder(&mut self, x: u32) {
        reorder(&mut self.arena, &self.reducer, x);
    }

    fn splay(&mut self, x: u32) {
        self.root = splay_up(&mut self.arena, &self.reducer, self.root, x);
    }

    // ── order-statistic access ────────────────────────────────────────

    /// Splays and returns the node at logical index `index`, or `None`
    /// when outside `[0, len)`.
    pub fn nth(&mut self, index: usize) -> Option<NodeId> {
        self.find_by(|s| R::count(s), index)
    }

    /// Splays and returns the leftmost node whose cumulative aggregate
    /// for `key` strictly exceeds `target`.
    ///
    /// `find_by(|s| R::count(s), i)` is exactly [`nth`](Self::nth); a
    /// custom key turns any monotone per-value sum into an offset search
    /// (e.g. seek by cumulative string length).
    pub fn find_by<F>(&mut self, key: F, target: usize) -> Option<NodeId>
    where
        F: Fn(&R::Stats) -> usize,
    {
        let (found, root) = splay_by_order(&mut self.arena, &self.reducer, self.root, key, target);
        self.root = root;
        if found {
            root.map(NodeId)
        } else {
            None
        }
    }

    /// Value at `index`, or `None` when out of range.  Splays.
    pub fn get(&mut self, index: usize) -> Option<&V> {
        let id = self.nth(index)?;
        self.arena[id.0 as usize].v.as_ref()
    }

    /// Replaces the value at `index`, returning the previous value, or
    /// `None` when out of range.
    pub fn set(&mut self, index: usize, value: V) -> Option<V> {
        let id = self.nth(index)?;
        Some(self.replace(id, value))
    }

    /// Value behind a handle.  Does not splay.
    pub fn value(&self, node: NodeId) -> &V {
        self.arena[node.0 as usize]
            .v
            .as_ref()
            .expect("stale NodeId: element was removed")
    }

    /// Replaces the value behind a handle, returning the previous value,
    /// and recomputes aggregates (the value may contribute to them).
    pub fn replace(&mut self, node: NodeId, value: V) -> V {
        self.splay(node.0);
        let old = self.arena[node.0 as usize]
            .v
            .replace(value)
            .expect("stale NodeId: element was removed");
        self.reorder(node.0);
        old
    }

    /// Current logical index of `node`.  Splays it to the root.
    pub fn index(&mut self, node: NodeId) -> usize {
        self.splay(node.0);
        self.arena[node.0 as usize]
            .l
            .map_or(0, |l| R::count(&self.arena[l as usize].stats))
    }

    /// Tree-wide total of an aggregate key.
    pub fn stat<F>(&self, key: F) -> usize
    where
        F: Fn(&R::Stats) -> usize,
    {
        self.root.map_or(0, |r| key(&self.arena[r as usize].stats))
    }

    /// Cumulative aggregate of `key` strictly to the left of `node`,
    /// after splaying it.
    pub fn stat_at<F>(&mut self, key: F, node: NodeId) -> usize
    where
        F: Fn(&R::Stats) -> usize,
    {
        self.splay(node.0);
        self.arena[node.0 as usize]
            .l
            .map_or(0, |l| key(&self.arena[l as usize].stats))
    }

    // ── endpoint insert/remove ────────────────────────────────────────

    /// Appends, making the new node the root: O(1) on repeated pushes.
    pub fn push(&mut self, value: V) -> NodeId {
        let node = self.alloc(value);
        let old = self.root;
        self.arena[node as usize].l = old;
        if let Some(old) = old {
            self.arena[old as usize].p = Some(node);
        }
        self.reorder(node);
        self.root = Some(node);
        NodeId(node)
    }

    /// Prepends (mirror of [`push`](Self::push)).
    pub fn unshift(&mut self, value: V) -> NodeId {
        let node = self.alloc(value);
        let old = self.root;
        self.arena[node as usize].r = old;
        if let Some(old) = old {
            self.arena[old as usize].p = Some(node);
        }
        self.reorder(node);
        self.root = Some(node);
        NodeId(node)
    }

    /// Appends every value in order.
    pub fn push_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        for v in values {
            self.push(v);
        }
    }

    /// Prepends, keeping the values' order.
    pub fn unshift_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        self.splice(0, 0, values);
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<V> {
        let last = util::last(&self.arena, self.root)?;
        Some(self.remove_at(NodeId(last)))
    }

    /// Removes and returns the first element.
    pub fn shift(&mut self) -> Option<V> {
        let first = util::first(&self.arena, self.root)?;
        Some(self.remove_at(NodeId(first)))
    }

    // ── positional insert ─────────────────────────────────────────────

    /// Inserts `value` immediately before `node`.  `None` degrades to
    /// [`push`](Self::push) (insert before the end position).
    pub fn insert_before(&mut self, node: Option<NodeId>, value: V) -> NodeId {
        let Some(node) = node else {
            return self.push(value);
        };
        self.splay(node.0);
        let old = node.0;
        let new = self.alloc(value);
        let old_l = self.arena[old as usize].l;
        self.arena[new as usize].r = Some(old);
        self.arena[new as usize].l = old_l;
        if let Some(l) = old_l {
            self.arena[l as usize].p = Some(new);
        }
        self.arena[old as usize].l = None;
        self.arena[old as usize].p = Some(new);
        self.reorder(old);
        self.reorder(new);
        self.root = Some(new);
        NodeId(new)
    }

    /// Inserts `value` immediately after `node`.  `None` degrades to
    /// [`unshift`](Self::unshift) (insert after the before-the-start
    /// position).
    pub fn insert_after(&mut self, node: Option<NodeId>, value: V) -> NodeId {
        let Some(node) = node else {
            return self.unshift(value);
        };
        self.splay(node.0);
        let old = node.0;
        let new = self.alloc(value);
        let old_r = self.arena[old as usize].r;
        self.arena[new as usize].l = Some(old);
        self.arena[new as usize].r = old_r;
        if let Some(r) = old_r {
            self.arena[r as usize].p = Some(new);
        }
        self.arena[old as usize].r = None;
        self.arena[old as usize].p = Some(new);
        self.reorder(old);
        self.reorder(new);
        self.root = Some(new);
        NodeId(new)
    }

    // ── removal ───────────────────────────────────────────────────────

    /// Removes the element behind `node` and returns its value.
    pub fn remove_at(&mut self, node: NodeId) -> V {
        let x = node.0;
        self.splay(x);
        let l = self.arena[x as usize].l;
        let r = self.arena[x as usize].r;
        match (l, r) {
            (_, None) => {
                self.root = l;
                if let Some(l) = l {
                    self.arena[l as usize].p = None;
                }
            }
            (None, Some(r)) => {
                self.root = Some(r);
                self.arena[r as usize].p = None;
            }
            (Some(_), Some(r)) => {
                // Splaying x's successor leaves x as its left child with
                // no right child: hang x's left subtree in x's place.
                let succ = util::leftmost(&self.arena, r);
                self.splay(succ);
                debug_assert_eq!(self.arena[succ as usize].l, Some(x));
                debug_assert_eq!(self.arena[x as usize].r, None);
                let xl = self.arena[x as usize].l;
                self.arena[succ as usize].l = xl;
                if let Some(xl) = xl {
                    self.arena[xl as usize].p = Some(succ);
                }
                self.reorder(succ);
            }
        }
        self.release(x)
    }

    /// Removes the element at `index`, returning its value, or `None`
    /// when out of range.
    pub fn remove_at_index(&mut self, index: usize) -> Option<V> {
        let id = self.nth(index)?;
        Some(self.remove_at(id))
    }

    /// Detaches the contiguous range `[first, limit)` from the tree in
    /// O(log n) without visiting interior nodes, returning the root of
    /// the detached subtree.  `limit = None` detaches through the end.
    ///
    /// Returns `None` (tree unchanged apart from splaying) when the range
    /// is empty or `first` does not come before `limit`.
    fn detach_range(&mut self, first: u32, limit: Option<u32>) -> Option<u32> {
        let Some(limit) = limit else {
            self.splay(first);
            self.root = self.arena[first as usize].l;
            if let Some(r) = self.root {
                self.arena[r as usize].p = None;
            }
            self.arena[first as usize].l = None;
            self.reorder(first);
            return Some(first);
        };
        self.splay(first);
        if limit == first {
            return None;
        }
        self.splay(limit);
        // After splaying first and then limit, first sits either directly
        // at limit's left child, or one level further down when the final
        // splay step was a zig-zig.
        let range_root = self.arena[limit as usize].l?;
        let valid =
            range_root == first || self.arena[range_root as usize].l == Some(first);
        if !valid {
            // first does not precede limit
            return None;
        }
        self.arena[range_root as usize].p = None;
        let fl = self.arena[first as usize].l;
        self.arena[limit as usize].l = fl;
        if let Some(fl) = fl {
            self.arena[fl as usize].p = Some(limit);
        }
        self.arena[first as usize].l = None;
        self.reorder(limit);
        // fix the detached subtree's aggregates: first lost its left
        // subtree, which bubbles up to the range root
        self.reorder(first);
        if range_root != first {
            self.reorder(range_root);
        }
        Some(range_root)
    }

    /// Removes `[first, limit)` in one splay-bounded operation
    /// (`limit = None` removes through the end).  Returns `false` when
    /// the range is empty or invalid.
    pub fn remove_range(&mut self, first: NodeId, limit: Option<NodeId>) -> bool {
        match self.detach_range(first.0, limit.map(|l| l.0)) {
            Some(root) => {
                self.free_subtree(root);
                true
            }
            None => false,
        }
    }

    /// Removes `count` elements starting at `start` (clamped to the end).
    /// Returns `false` when nothing was removed.
    pub fn remove_range_at(&mut self, start: usize, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        let Some(first) = self.nth(start) else {
            return false;
        };
        let limit = start.checked_add(count).and_then(|e| self.nth(e));
        self.remove_range(first, limit)
    }

    // ── splicing ──────────────────────────────────────────────────────

    /// Array-splice semantics: removes `count` elements starting at
    /// `index`, inserts `values` at that position, and returns the
    /// removed values in order.  `index` past the end appends.
    pub fn splice<I>(&mut self, index: usize, count: usize, values: I) -> Vec<V>
    where
        I: IntoIterator<Item = V>,
    {
        let mut removed = Vec::new();
        // `after` = node now at the cut point (first survivor past the
        // removed range), splayed to the root when present.
        let after: Option<u32> = match self.nth(index) {
            Some(loc) if count > 0 => {
                let limit = index.checked_add(count).and_then(|e| self.nth(e));
                if let Some(range_root) = self.detach_range(loc.0, limit.map(|l| l.0)) {
                    self.drain_subtree(range_root, &mut removed);
                }
                limit.map(|l| l.0)
            }
            Some(loc) => {
                self.splay(loc.0);
                Some(loc.0)
            }
            None => None,
        };

        // Build a right-leaning chain of the new values; each node's
        // aggregates are fixed once its right child is final.
        let vals: Vec<V> = values.into_iter().collect();
        let mut iter = vals.into_iter().rev();
        let Some(last_v) = iter.next() else {
            return removed;
        };
        let mut chain = self.alloc(last_v);
        for v in iter {
            let node = self.alloc(v);
            self.arena[node as usize].r = Some(chain);
            self.arena[chain as usize].p = Some(node);
            self.reorder(chain);
            chain = node;
        }

        // Hang the old prefix under the chain head, the chain under the
        // cut point.
        let left = match after {
            Some(a) => self.arena[a as usize].l,
            None => self.root,
        };
        if let Some(left) = left {
            self.arena[chain as usize].l = Some(left);
            self.arena[left as usize].p = Some(chain);
        }
        self.reorder(chain);
        match after {
            Some(a) => {
                self.arena[a as usize].l = Some(chain);
                self.arena[chain as usize].p = Some(a);
                self.root = Some(a);
                self.reorder(a);
            }
            None => self.root = Some(chain),
        }
        removed
    }

    /// Like [`remove_range`](Self::remove_range), but the removed range
    /// is returned as its own list — node slots are relocated, values are
    /// moved, never cloned.  When `insert` is given, its whole contents
    /// are merged in at the cut point (before `limit`, or at the end when
    /// `limit` is `None`); the donor is consumed.
    ///
    /// `first = None` removes nothing and merges at the end.
    pub fn splice_list(
        &mut self,
        first: Option<NodeId>,
        limit: Option<NodeId>,
        insert: Option<Self>,
    ) -> Self
    where
        R: Clone,
        R::Stats: Clone,
    {
        let mut result = Self::with_stats(self.reducer.clone());
        let mut limit_node = limit.map(|l| l.0);
        match first {
            Some(first) => {
                if let Some(range_root) = self.detach_range(first.0, limit_node) {
                    let new_root = Self::transfer_subtree(self, &mut result, range_root);
                    result.root = Some(new_root);
                }
            }
            None => limit_node = None,
        }

        if let Some(donor) = insert {
            self.merge_at(limit_node, donor);
        }
        result
    }

    /// Index-based form of [`splice_list`](Self::splice_list): removes
    /// `count` elements starting at `start` into the returned list and
    /// merges `insert` at that position.
    pub fn splice_list_at(&mut self, start: usize, count: usize, insert: Option<Self>) -> Self
    where
        R: Clone,
        R::Stats: Clone,
    {
        let first = self.nth(start);
        let limit = match first {
            Some(_) if count > 0 => start.checked_add(count).and_then(|e| self.nth(e)),
            Some(_) => first,
            None => None,
        };
        self.splice_list(first, limit, insert)
    }

    /// Merges the donor's contents immediately before `limit` (at the end
    /// when `None`).  The donor's slots are relocated into this arena;
    /// O(log(self) + donor).
    fn merge_at(&mut self, limit: Option<u32>, mut donor: Self)
    where
        R::Stats: Clone,
    {
        let Some(donor_root) = donor.root else {
            return;
        };
        donor.root = None;
        let droot = Self::transfer_subtree(&mut donor, self, donor_root);
        match limit {
            None => {
                // hang the current tree under the donor's first element
                let dfirst = util::leftmost(&self.arena, droot);
                splay_up(&mut self.arena, &self.reducer, Some(droot), dfirst);
                let old = self.root;
                self.arena[dfirst as usize].l = old;
                if let Some(old) = old {
                    self.arena[old as usize].p = Some(dfirst);
                }
                self.root = Some(dfirst);
                self.reorder(dfirst);
            }
            Some(limit) => {
                self.splay(limit);
                match self.arena[limit as usize].l {
                    None => {
                        self.arena[limit as usize].l = Some(droot);
                        self.arena[droot as usize].p = Some(limit);
                        self.reorder(limit);
                    }
                    Some(ll) => {
                        // the donor's first element picks up both the old
                        // left subtree and the donor tree
                        let dfirst = util::leftmost(&self.arena, droot);
                        splay_up(&mut self.arena, &self.reducer, Some(droot), dfirst);
                        self.arena[dfirst as usize].l = Some(ll);
                        self.arena[ll as usize].p = Some(dfirst);
                        self.arena[limit as usize].l = Some(dfirst);
                        self.arena[dfirst as usize].p = Some(limit);
                        self.reorder(dfirst);
                        self.reorder(limit);
                    }
                }
            }
        }
    }

    /// Relocates the subtree rooted at `root` from `src`'s arena into
    /// `dst`'s, preserving shape and aggregates.  Returns the subtree's
    /// root slot in `dst`; the detached links (`p = None`) carry over.
    fn transfer_subtree(src: &mut Self, dst: &mut Self, root: u32) -> u32
    where
        R::Stats: Clone,
    {
        // (src slot, dst parent slot, attach as left child?)
        let mut stack: Vec<(u32, Option<u32>, bool)> = vec![(root, None, false)];
        let mut dst_root = 0u32;
        while let Some((s, dst_parent, left_side)) = stack.pop() {
            let stats = src.arena[s as usize].stats.clone();
            let l = src.arena[s as usize].l;
            let r = src.arena[s as usize].r;
            let value = src.release(s);
            let d = dst.alloc_slot(Node {
                p: dst_parent,
                l: None,
                r: None,
                v: Some(value),
                stats,
            });
            match dst_parent {
                Some(dp) => {
                    if left_side {
                        dst.arena[dp as usize].l = Some(d);
                    } else {
                        dst.arena[dp as usize].r = Some(d);
                    }
                }
                None => dst_root = d,
            }
            if let Some(l) = l {
                stack.push((l, Some(d), true));
            }
            if let Some(r) = r {
                stack.push((r, Some(d), false));
            }
        }
        dst_root
    }

    // ── traversal & materialization ───────────────────────────────────

    /// First node in sequence order.  Does not splay.
    pub fn first(&self) -> Option<NodeId> {
        util::first(&self.arena, self.root).map(NodeId)
    }

    /// Last node in sequence order.  Does not splay.
    pub fn last(&self) -> Option<NodeId> {
        util::last(&self.arena, self.root).map(NodeId)
    }

    /// In-order successor of `node`.
    pub fn next(&self, node: NodeId) -> Option<NodeId> {
        util::next(&self.arena, node.0).map(NodeId)
    }

    /// In-order predecessor of `node`.
    pub fn prev(&self, node: NodeId) -> Option<NodeId> {
        util::prev(&self.arena, node.0).map(NodeId)
    }

    /// Iterates the values in sequence order without splaying.
    pub fn iter(&self) -> Iter<'_, V, R> {
        Iter {
            list: self,
            curr: util::first(&self.arena, self.root),
        }
    }

    /// Materializes all values.
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Materializes references to the values in `[start, end)` (clamped).
    pub fn slice(&self, start: usize, end: usize) -> Vec<&V> {
        let mut out = Vec::new();
        let mut curr = util::first(&self.arena, self.root);
        let mut i = 0usize;
        while let Some(c) = curr {
            if i >= end {
                break;
            }
            if i >= start {
                if let Some(v) = self.arena[c as usize].v.as_ref() {
                    out.push(v);
                }
            }
            curr = util::next(&self.arena, c);
            i += 1;
        }
        out
    }

    // ── diagnostics ───────────────────────────────────────────────────

    /// Walks the whole tree and panics on any broken invariant: link
    /// consistency, aggregate correctness against a recomputation, and
    /// arena slot accounting.  Intended for tests and debugging.
    pub fn validate(&self)
    where
        R::Stats: PartialEq + fmt::Debug,
    {
        if let Some(root) = self.root {
            assert_eq!(self.arena[root as usize].p, None, "root has a parent");
            // iterative walk, the tree may be spine-shaped
            let mut stack = vec![root];
            while let Some(i) = stack.pop() {
                let n = &self.arena[i as usize];
                let value = match n.v.as_ref() {
                    Some(v) => v,
                    None => panic!("freed slot {i} is still reachable"),
                };
                let (l, r) = (n.l, n.r);
                if let Some(l) = l {
                    assert_eq!(self.arena[l as usize].p, Some(i), "left child parent link");
                    stack.push(l);
                }
                if let Some(r) = r {
                    assert_eq!(self.arena[r as usize].p, Some(i), "right child parent link");
                    stack.push(r);
                }
                // stored child records feed the recomputation, so the check
                // order does not matter
                let expect = self.reducer.combine(
                    value,
                    l.map(|l| &self.arena[l as usize].stats),
                    r.map(|r| &self.arena[r as usize].stats),
                );
                assert!(
                    n.stats == expect,
                    "stale aggregates at slot {i}: {:?} != {:?}",
                    n.stats,
                    expect
                );
            }
        }
        assert_eq!(
            util::subtree_size(&self.arena, self.root),
            self.len(),
            "reachable nodes do not match root count"
        );
        let live = self.arena.len() - self.free.len();
        assert_eq!(live, self.len(), "live slots do not match root count");
    }
}

/// Sequence-order iterator over a list's values.
pub struct Iter<'a, V, R>
where
    R: OrderStats<V>,
{
    list: &'a SplayList<V, R>,
    curr: Option<u32>,
}

impl<'a, V, R> Iterator for Iter<'a, V, R>
where
    R: OrderStats<V>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let i = self.curr?;
        self.curr = util::next(&self.list.arena, i);
        self.list.arena[i as usize].v.as_ref()
    }
}

impl<'a, V, R> IntoIterator for &'a SplayList<V, R>
where
    R: OrderStats<V>,
{
    type Item = &'a V;
    type IntoIter = Iter<'a, V, R>;

    fn into_iter(self) -> Iter<'a, V, R> {
        self.iter()
    }
}
