use navtree::{Error, TreeMap, TreeSet};
use quickcheck::{quickcheck, TestResult};
use std::collections::{BTreeMap, BTreeSet};

fn in_range<K: Ord>(key: &K, lo: &K, lo_inclusive: bool, hi: &K, hi_inclusive: bool) -> bool {
    (if lo_inclusive { key >= lo } else { key > lo }) &&
    (if hi_inclusive { key <= hi } else { key < hi })
}

macro_rules! map_tests {
    ($name:ident, $K:ty, $V:ty) => {
        mod $name {
            use super::*;

            fn model(map: &TreeMap<$K, $V>) -> BTreeMap<$K, $V> {
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
            }

            #[test]
            fn insert_then_get() {
                fn test(mut map: TreeMap<$K, $V>, key: $K, value: $V) -> bool {
                    let old_len = map.len();
                    let had = map.contains_key(&key);
                    map.insert(key.clone(), value.clone());

                    map.get(&key) == Some(&value) &&
                    map.len() == if had { old_len } else { old_len + 1 }
                }

                quickcheck(test as fn(TreeMap<$K, $V>, $K, $V) -> bool);
            }

            #[test]
            fn remove_affects_no_others() {
                fn test(mut map: TreeMap<$K, $V>, key: $K) -> bool {
                    let mut expected = model(&map);
                    let removed = map.remove(&key);

                    removed == expected.remove_entry(&key) && model(&map) == expected
                }

                quickcheck(test as fn(TreeMap<$K, $V>, $K) -> bool);
            }

            #[test]
            fn navigation_agrees_with_btree_map() {
                fn test(map: TreeMap<$K, $V>, key: $K) -> bool {
                    let model = model(&map);

                    map.lower_key(&key) == model.range(..key.clone()).next_back().map(|e| e.0) &&
                    map.floor_key(&key) == model.range(..=key.clone()).next_back().map(|e| e.0) &&
                    map.ceiling_key(&key) == model.range(key.clone()..).next().map(|e| e.0) &&
                    map.higher_key(&key) ==
                        model.iter().find(|e| *e.0 > key).map(|e| e.0) &&
                    map.first_key() == model.keys().next() &&
                    map.last_key() == model.keys().next_back()
                }

                quickcheck(test as fn(TreeMap<$K, $V>, $K) -> bool);
            }

            #[test]
            fn sub_map_agrees_with_filter() {
                fn test(map: TreeMap<$K, $V>, lo: $K, lo_inclusive: bool, hi: $K, hi_inclusive: bool)
                    -> TestResult {

                    if lo > hi {
                        return TestResult::from_bool(
                            map.sub_map(lo, lo_inclusive, hi, hi_inclusive).err() ==
                                Some(Error::InvalidRange));
                    }

                    let expected: Vec<_> = map.iter()
                        .filter(|e| in_range(e.0, &lo, lo_inclusive, &hi, hi_inclusive))
                        .collect();

                    let view = match map.sub_map(lo, lo_inclusive, hi, hi_inclusive) {
                        Ok(view) => view,
                        Err(_) => return TestResult::failed(),
                    };

                    let forwards = view.iter().eq(expected.iter().cloned());
                    let backwards = view.iter().rev().eq(expected.iter().rev().cloned());

                    let view = view.descending_map();
                    let descending = view.iter().eq(expected.iter().rev().cloned());

                    TestResult::from_bool(forwards && backwards && descending)
                }

                quickcheck(test as fn(TreeMap<$K, $V>, $K, bool, $K, bool) -> TestResult);
            }

            #[test]
            fn sub_map_len_tracks_the_backing_map() {
                fn test(mut map: TreeMap<$K, $V>, lo: $K, hi: $K, key: $K, value: $V) -> TestResult {
                    if lo > hi { return TestResult::discard(); }

                    let count = |map: &TreeMap<$K, $V>|
                        map.keys().filter(|k| **k >= lo && **k < hi).count();

                    let before = count(&map);
                    {
                        let mut view = match map.sub_map_mut(lo.clone(), true, hi.clone(), false) {
                            Ok(view) => view,
                            Err(_) => return TestResult::failed(),
                        };

                        if view.len() != before { return TestResult::failed(); }

                        let accepted = view.insert(key.clone(), value).is_ok();
                        if accepted != (key >= lo && key < hi) { return TestResult::failed(); }
                    }

                    TestResult::from_bool(map.sub_map(lo.clone(), true, hi.clone(), false)
                        .map(|v| v.len()) == Ok(count(&map)))
                }

                quickcheck(test as fn(TreeMap<$K, $V>, $K, $K, $K, $V) -> TestResult);
            }

            #[test]
            fn cursor_removal_matches_retain() {
                fn test(mut map: TreeMap<$K, $V>, modulus: u8) -> TestResult {
                    if modulus == 0 { return TestResult::discard(); }

                    let mut expected = map.clone();
                    let keep = |i: usize| i % modulus as usize != 0;
                    let mut index = 0;
                    expected.retain(|_, _| { index += 1; keep(index - 1) });

                    let mut cursor = map.cursor();
                    let mut visited = 0;

                    while cursor.has_next() {
                        if cursor.next(&map).is_err() { return TestResult::failed(); }
                        if !keep(visited) && cursor.remove(&mut map).is_err() {
                            return TestResult::failed();
                        }
                        visited += 1;
                    }

                    TestResult::from_bool(map == expected && visited == index)
                }

                quickcheck(test as fn(TreeMap<$K, $V>, u8) -> TestResult);
            }
        }
    }
}

map_tests!{map_u8_u8, u8, u8}
map_tests!{map_u32_string, u32, String}
map_tests!{map_string_bool, String, bool}

macro_rules! set_tests {
    ($name:ident, $T:ty) => {
        mod $name {
            use super::*;

            fn model(set: &TreeSet<$T>) -> BTreeSet<$T> { set.iter().cloned().collect() }

            #[test]
            fn insert_and_remove() {
                fn test(mut set: TreeSet<$T>, item: $T) -> bool {
                    let mut expected = model(&set);

                    set.insert(item.clone()) == expected.insert(item.clone()) &&
                    model(&set) == expected &&
                    set.remove(&item) == expected.remove(&item) &&
                    !set.contains(&item) &&
                    model(&set) == expected
                }

                quickcheck(test as fn(TreeSet<$T>, $T) -> bool);
            }

            #[test]
            fn descending_set_reverses() {
                fn test(set: TreeSet<$T>) -> bool {
                    let view = set.descending_set();
                    set.iter().rev().eq(view.iter())
                }

                quickcheck(test as fn(TreeSet<$T>) -> bool);
            }

            #[test]
            fn polls_drain_in_order() {
                fn test(mut set: TreeSet<$T>) -> bool {
                    let expected: Vec<_> = set.iter().cloned().collect();
                    let mut drained = vec![];
                    while let Some(item) = set.poll_first() { drained.push(item); }

                    drained == expected && set.is_empty() && set.poll_last().is_none()
                }

                quickcheck(test as fn(TreeSet<$T>) -> bool);
            }
        }
    }
}

set_tests!{set_u8, u8}
set_tests!{set_i64, i64}
set_tests!{set_string, String}
