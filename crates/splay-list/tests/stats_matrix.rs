use splay_list::{OrderStats, SplayList};

/// Reducer tracking subtree size plus total string length.
#[derive(Clone, Copy, Debug, Default)]
struct LenStats;

#[derive(Clone, Debug, PartialEq)]
struct Lens {
    count: usize,
    total_len: usize,
}

impl OrderStats<String> for LenStats {
    type Stats = Lens;

    fn combine(&self, value: &String, left: Option<&Lens>, right: Option<&Lens>) -> Lens {
        let mut count = 1;
        let mut total_len = value.len();
        if let Some(l) = left {
            count += l.count;
            total_len += l.total_len;
        }
        if let Some(r) = right {
            count += r.count;
            total_len += r.total_len;
        }
        Lens { count, total_len }
    }

    fn count(stats: &Lens) -> usize {
        stats.count
    }
}

fn total_len(s: &Lens) -> usize {
    s.total_len
}

#[test]
fn length_sum_over_1000_strings() {
    let mut list = SplayList::with_stats(LenStats);
    let mut expected = 0;
    for i in 0..1000 {
        let s = format!("value-{i}");
        expected += s.len();
        list.push(s);
        assert_eq!(list.stat(total_len), expected);
    }
    assert_eq!(list.len(), 1000);
    list.validate();
}

#[test]
fn stat_survives_mutation() {
    let mut list = SplayList::with_stats(LenStats);
    list.push_all(["aa", "bbbb", "c", "ddd"].map(String::from));
    assert_eq!(list.stat(total_len), 10);

    list.set(1, "x".to_string());
    assert_eq!(list.stat(total_len), 7);

    list.remove_at_index(3);
    assert_eq!(list.stat(total_len), 4);

    list.splice(0, 2, ["yy".to_string()]);
    assert_eq!(list.to_vec(), ["yy", "c"]);
    assert_eq!(list.stat(total_len), 3);
    list.validate();
}

#[test]
fn stat_at_is_prefix_sum() {
    let mut list = SplayList::with_stats(LenStats);
    let words = ["one", "three", "fifteen", "x", "seven"];
    list.push_all(words.map(String::from));

    let mut prefix = 0;
    for (i, w) in words.iter().enumerate() {
        let id = list.nth(i).unwrap();
        assert_eq!(list.stat_at(total_len, id), prefix);
        assert_eq!(list.stat_at(|s: &Lens| s.count, id), i);
        prefix += w.len();
    }
    assert_eq!(list.stat(total_len), prefix);
}

#[test]
fn find_by_cumulative_length() {
    let mut list = SplayList::with_stats(LenStats);
    // offsets:        0      3        8     9
    list.push_all(["abc", "defgh", "i", "jklm"].map(String::from));

    // the node at byte offset b is the leftmost whose cumulative length
    // exceeds b
    for (offset, expect) in [
        (0, "abc"),
        (2, "abc"),
        (3, "defgh"),
        (7, "defgh"),
        (8, "i"),
        (9, "jklm"),
        (12, "jklm"),
    ] {
        let id = list.find_by(total_len, offset).expect("offset in range");
        assert_eq!(list.value(id), expect, "offset {offset}");
    }
    assert_eq!(list.find_by(total_len, 13), None);
    list.validate();
}

#[test]
fn splice_list_preserves_custom_stats() {
    let mut list = SplayList::with_stats(LenStats);
    list.push_all(["aaa", "bb", "cccc", "d", "ee"].map(String::from));

    let detached = list.splice_list_at(1, 2, None);
    assert_eq!(detached.stat(total_len), 6);
    assert_eq!(list.stat(total_len), 6);
    detached.validate();
    list.validate();

    list.splice_list_at(1, 0, Some(detached));
    assert_eq!(list.stat(total_len), 12);
    list.validate();
}
