//! Diagnostic tree dump.
//!
//! Depth-first textual rendering with box-drawing connectors, one line
//! per node showing its value and current aggregate record.  The shape
//! reflects the true tree structure (tests assert on splay shape through
//! it), but the format itself is a debugging aid, not a contract.

use std::fmt::Debug;

use crate::list::SplayList;
use crate::stats::OrderStats;

impl<V, R> SplayList<V, R>
where
    R: OrderStats<V>,
    V: Debug,
    R::Stats: Debug,
{
    /// Renders the current tree, e.g.:
    ///
    /// ```text
    /// SplayList
    /// └─ "c" 3
    ///   ← "a" 2
    ///     → "b" 1
    /// ```
    pub fn dump(&self) -> String {
        match self.root {
            Some(root) => format!("SplayList{}", self.dump_node(root, "", "└─")),
            None => "SplayList ∅".to_string(),
        }
    }

    fn dump_node(&self, node: u32, tab: &str, side: &str) -> String {
        let n = &self.arena[node as usize];
        let mut s = match n.v.as_ref() {
            Some(v) => format!("\n{tab}{side} {:?} {:?}", v, n.stats),
            None => format!("\n{tab}{side} <freed> {:?}", n.stats),
        };
        if let Some(l) = n.l {
            s.push_str(&self.dump_node(l, &format!("{tab}  "), "←"));
        }
        if let Some(r) = n.r {
            s.push_str(&self.dump_node(r, &format!("{tab}  "), "→"));
        }
        s
    }
}
