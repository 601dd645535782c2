//! Property tests checking the list against a plain `Vec` model.

use proptest::prelude::*;
use splay_list::{OrderStats, SplayList};

/// One random sequence operation.
#[derive(Clone, Debug)]
enum Op {
    Push(u16),
    Unshift(u16),
    Pop,
    Shift,
    InsertAt(usize, u16),
    RemoveAt(usize),
    Set(usize, u16),
    Splice(usize, usize, Vec<u16>),
    RemoveRange(usize, usize),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u16>().prop_map(Op::Push),
        any::<u16>().prop_map(Op::Unshift),
        Just(Op::Pop),
        Just(Op::Shift),
        (0usize..64, any::<u16>()).prop_map(|(i, v)| Op::InsertAt(i, v)),
        (0usize..64).prop_map(Op::RemoveAt),
        (0usize..64, any::<u16>()).prop_map(|(i, v)| Op::Set(i, v)),
        (0usize..64, 0usize..16, prop::collection::vec(any::<u16>(), 0..8))
            .prop_map(|(i, c, vs)| Op::Splice(i, c, vs)),
        (0usize..64, 0usize..16).prop_map(|(i, c)| Op::RemoveRange(i, c)),
    ]
}

fn apply(list: &mut SplayList<u16>, model: &mut Vec<u16>, op: &Op) {
    match op {
        Op::Push(v) => {
            list.push(*v);
            model.push(*v);
        }
        Op::Unshift(v) => {
            list.unshift(*v);
            model.insert(0, *v);
        }
        Op::Pop => assert_eq!(list.pop(), model.pop()),
        Op::Shift => {
            let expect = if model.is_empty() {
                None
            } else {
                Some(model.remove(0))
            };
            assert_eq!(list.shift(), expect);
        }
        Op::InsertAt(i, v) => {
            let i = (*i).min(model.len());
            match list.nth(i) {
                Some(id) => {
                    list.insert_before(Some(id), *v);
                }
                None => {
                    list.push(*v);
                }
            }
            model.insert(i, *v);
        }
        Op::RemoveAt(i) => {
            let expect = if *i < model.len() {
                Some(model.remove(*i))
            } else {
                None
            };
            assert_eq!(list.remove_at_index(*i), expect);
        }
        Op::Set(i, v) => {
            let expect = if *i < model.len() {
                Some(std::mem::replace(&mut model[*i], *v))
            } else {
                None
            };
            assert_eq!(list.set(*i, *v), expect);
        }
        Op::Splice(i, c, vs) => {
            let start = (*i).min(model.len());
            let end = i.saturating_add(*c).min(model.len());
            let expect: Vec<u16> = model.splice(start..end, vs.iter().copied()).collect();
            assert_eq!(list.splice(*i, *c, vs.iter().copied()), expect);
        }
        Op::RemoveRange(i, c) => {
            let start = (*i).min(model.len());
            let end = i.saturating_add(*c).min(model.len());
            model.drain(start..end);
            list.remove_range_at(*i, *c);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// In-order traversal equals the model after any interleaving.
    #[test]
    fn order_preserved(ops in prop::collection::vec(arbitrary_op(), 1..60)) {
        let mut list: SplayList<u16> = SplayList::new();
        let mut model: Vec<u16> = Vec::new();
        for op in &ops {
            apply(&mut list, &mut model, op);
            prop_assert_eq!(list.len(), model.len());
        }
        prop_assert_eq!(list.to_vec(), model);
        list.validate();
    }

    /// `splice` matches `Vec::splice` exactly.
    #[test]
    fn splice_equivalence(
        init in prop::collection::vec(any::<u16>(), 0..40),
        index in 0usize..48,
        count in 0usize..48,
        values in prop::collection::vec(any::<u16>(), 0..10),
    ) {
        let mut list: SplayList<u16> = init.iter().copied().collect();
        let mut model = init;

        let start = index.min(model.len());
        let end = index.saturating_add(count).min(model.len());
        let expect: Vec<u16> = model.splice(start..end, values.iter().copied()).collect();

        let removed = list.splice(index, count, values.iter().copied());
        prop_assert_eq!(removed, expect);
        prop_assert_eq!(list.to_vec(), model);
        list.validate();
    }

    /// `index(nth(i)) == i` for every valid index.
    #[test]
    fn index_round_trip(
        ops in prop::collection::vec(arbitrary_op(), 1..40),
        probe in 0usize..64,
    ) {
        let mut list: SplayList<u16> = SplayList::new();
        let mut model: Vec<u16> = Vec::new();
        for op in &ops {
            apply(&mut list, &mut model, op);
        }
        match list.nth(probe) {
            Some(id) => {
                prop_assert!(probe < model.len());
                prop_assert_eq!(list.index(id), probe);
                prop_assert_eq!(*list.value(id), model[probe]);
            }
            None => prop_assert!(probe >= model.len()),
        }
        list.validate();
    }

    /// Detaching a range and merging it back at the same cut restores the
    /// sequence.
    #[test]
    fn splice_list_conservation(
        init in prop::collection::vec(any::<u16>(), 0..40),
        start in 0usize..48,
        count in 0usize..48,
    ) {
        let mut list: SplayList<u16> = init.iter().copied().collect();

        let detached = list.splice_list_at(start, count, None);
        let expected_removed = count.min(init.len().saturating_sub(start.min(init.len())));
        prop_assert_eq!(detached.len(), expected_removed);
        prop_assert_eq!(list.len() + detached.len(), init.len());
        detached.validate();
        list.validate();

        list.splice_list_at(start, 0, Some(detached));
        prop_assert_eq!(list.to_vec(), init);
        list.validate();
    }
}

/// Reducer summing the values themselves alongside the count.
#[derive(Clone, Copy, Debug)]
struct SumStats;

#[derive(Clone, Debug, PartialEq)]
struct Sum {
    count: usize,
    total: usize,
}

impl OrderStats<u16> for SumStats {
    type Stats = Sum;

    fn combine(&self, value: &u16, left: Option<&Sum>, right: Option<&Sum>) -> Sum {
        Sum {
            count: 1 + left.map_or(0, |s| s.count) + right.map_or(0, |s| s.count),
            total: *value as usize
                + left.map_or(0, |s| s.total)
                + right.map_or(0, |s| s.total),
        }
    }

    fn count(stats: &Sum) -> usize {
        stats.count
    }
}

proptest! {
    /// The tree-wide total of a summing reducer always equals the sum of
    /// the current values.
    #[test]
    fn aggregate_matches_value_sum(ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut list = SplayList::with_stats(SumStats);
        let mut model: Vec<u16> = Vec::new();
        for op in &ops {
            match op {
                Op::Push(v) => {
                    list.push(*v);
                    model.push(*v);
                }
                Op::Unshift(v) => {
                    list.unshift(*v);
                    model.insert(0, *v);
                }
                Op::Pop => {
                    assert_eq!(list.pop(), model.pop());
                }
                Op::RemoveAt(i) => {
                    if *i < model.len() {
                        model.remove(*i);
                    }
                    list.remove_at_index(*i);
                }
                Op::Set(i, v) => {
                    if *i < model.len() {
                        model[*i] = *v;
                    }
                    list.set(*i, *v);
                }
                _ => {}
            }
            let expect: usize = model.iter().map(|v| *v as usize).sum();
            prop_assert_eq!(list.stat(|s| s.total), expect);
        }
        list.validate();
    }
}
