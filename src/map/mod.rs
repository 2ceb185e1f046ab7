//! An ordered map based on a red-black tree.

mod view;

pub use self::view::SubMap;

use compare::{Compare, Natural};
use std::cmp::Ordering::{self, *};
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use std::mem;
use std::ops::{self, Bound};
use std::vec;
use super::cursor::Cursor;
use super::entry::Entry;
use super::error::Result;
use super::node::Walk;
use super::set::SubSet;
use super::tree::{Inserted, NodeId, RedBlackTree};
use super::view::{bound, Ascending, Backing, BackingMut, Bounds, Descending};

// Inserts or overwrites, returning the displaced value.
pub(crate) fn put<K, V, C>(tree: &mut RedBlackTree<K, V, C>, key: K, value: V) -> Option<V>
    where C: Compare<K> {

    match tree.insert(key, value) {
        Inserted::Vacant(_) => None,
        Inserted::Occupied(id, _, value) => tree.value_mut(id).map(|old| mem::replace(old, value)),
    }
}

/// An ordered map based on a red-black tree.
///
/// The behavior of this map is undefined if a key's ordering relative to any other key changes
/// while the key is in the map. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct TreeMap<K, V, C = Natural<K>> where C: Compare<K> {
    tree: RedBlackTree<K, V, C>,
}

impl<K, V> TreeMap<K, V> where K: Ord {
    /// Creates an empty map ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { TreeMap::with_cmp(compare::natural()) }
}

impl<K, V, C> TreeMap<K, V, C> where C: Compare<K> {
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut map = navtree::TreeMap::with_cmp(natural().rev());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { TreeMap { tree: RedBlackTree::with_cmp(cmp) } }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool { self.tree.is_empty() }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the map's comparator.
    pub fn cmp(&self) -> &C { self.tree.cmp() }

    /// Removes all entries from the map.
    pub fn clear(&mut self) { self.tree.clear(); }

    fn entry_at(&self, id: NodeId) -> &Entry<K, V> { &self.tree.nodes().get(id).entry }

    /// Inserts an entry into the map, returning the previous value, if any, associated with the
    /// key. The key already in the map is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> { put(&mut self.tree, key, value) }

    /// Inserts every entry of the iterator. Equivalent to `Extend::extend`.
    pub fn put_all<I>(&mut self, entries: I) where I: IntoIterator<Item = (K, V)> {
        self.extend(entries);
    }

    /// Removes and returns the entry whose key is equal to the given key, returning `None` if
    /// the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.remove(&1), Some((1, "a")));
    /// assert_eq!(map.remove(&1), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)> where C: Compare<Q, K> {
        self.tree.remove(key).map(Entry::into_pair)
    }

    /// Checks if the map contains the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where C: Compare<Q, K> {
        self.tree.get_node(key).is_some()
    }

    /// Checks if any entry of the map has the given value. This takes linear time.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// map.insert(1, "a");
    ///
    /// assert!(map.contains_value(&"a"));
    /// assert!(!map.contains_value(&"b"));
    /// ```
    pub fn contains_value(&self, value: &V) -> bool where V: PartialEq {
        self.values().any(|v| v == value)
    }

    /// Removes the entry with the least key whose value equals `value`. Returns whether an
    /// entry was removed. This takes linear time.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: navtree::TreeMap<_, _> = vec![(1, "a"), (2, "b"), (3, "a")]
    ///     .into_iter().collect();
    ///
    /// assert!(map.remove_value(&"a"));
    /// assert!(!map.remove_value(&"c"));
    /// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), [2, 3]);
    /// ```
    pub fn remove_value(&mut self, value: &V) -> bool where V: PartialEq {
        let mut next = self.tree.first_node();

        while let Some(id) = next {
            if self.entry_at(id).value() == value {
                self.tree.delete(id);
                return true;
            }

            next = self.tree.successor(id);
        }

        false
    }

    /// Checks if the map maps `key` to `value`.
    pub fn contains_entry<Q: ?Sized>(&self, key: &Q, value: &V) -> bool
        where C: Compare<Q, K>, V: PartialEq {
        self.get(key) == Some(value)
    }

    /// Removes the entry for `key` only if its value equals `value`. Returns whether an entry
    /// was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// map.insert(1, "a");
    ///
    /// assert!(!map.remove_entry(&1, &"b"));
    /// assert!(map.remove_entry(&1, &"a"));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q, value: &V) -> bool
        where C: Compare<Q, K>, V: PartialEq {

        match self.tree.get_node(key) {
            Some(id) if self.entry_at(id).value() == value => {
                self.tree.delete(id);
                true
            }
            _ => false,
        }
    }

    /// Returns a reference to the value associated with the given key, or `None` if the map
    /// does not contain the key.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where C: Compare<Q, K> {
        self.tree.get_node(key).map(|id| self.entry_at(id).value())
    }

    /// Returns a mutable reference to the value associated with the given key, or `None` if
    /// the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// map.insert(1, "a");
    ///
    /// if let Some(value) = map.get_mut(&1) { *value = "b"; }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where C: Compare<Q, K> {
        let id = self.tree.get_node(key)?;
        self.tree.value_mut(id)
    }

    /// Replaces the value associated with the given key, returning the old value. Does nothing
    /// and returns `None` if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// assert_eq!(map.replace(&1, "a"), None);
    /// assert!(map.is_empty());
    ///
    /// map.insert(1, "a");
    /// assert_eq!(map.replace(&1, "b"), Some("a"));
    /// ```
    pub fn replace<Q: ?Sized>(&mut self, key: &Q, value: V) -> Option<V> where C: Compare<Q, K> {
        self.get_mut(key).map(|old| mem::replace(old, value))
    }

    /// Replaces the value associated with the given key only if it currently equals `old`.
    /// Returns whether a replacement happened.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// map.insert(1, "a");
    ///
    /// assert!(!map.replace_if(&1, &"b", "c"));
    /// assert!(map.replace_if(&1, &"a", "c"));
    /// assert_eq!(map[&1], "c");
    /// ```
    pub fn replace_if<Q: ?Sized>(&mut self, key: &Q, old: &V, value: V) -> bool
        where C: Compare<Q, K>, V: PartialEq {

        match self.get_mut(key) {
            Some(current) if *current == *old => { *current = value; true }
            _ => false,
        }
    }

    /// Returns the entry with the least key, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// assert!(map.first_entry().is_none());
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.first_entry().map(|e| e.pair()), Some((&1, &"a")));
    /// ```
    pub fn first_entry(&self) -> Option<&Entry<K, V>> {
        self.tree.first_node().map(|id| self.entry_at(id))
    }

    /// Returns the entry with the greatest key, or `None` if the map is empty.
    pub fn last_entry(&self) -> Option<&Entry<K, V>> {
        self.tree.last_node().map(|id| self.entry_at(id))
    }

    /// Returns the least key, or `None` if the map is empty.
    pub fn first_key(&self) -> Option<&K> { self.first_entry().map(Entry::key) }

    /// Returns the greatest key, or `None` if the map is empty.
    pub fn last_key(&self) -> Option<&K> { self.last_entry().map(Entry::key) }

    /// Removes and returns the entry with the least key, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = navtree::TreeMap::new();
    /// assert_eq!(map.poll_first_entry(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.poll_first_entry().map(|e| e.into_pair()), Some((1, "a")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn poll_first_entry(&mut self) -> Option<Entry<K, V>> {
        let id = self.tree.first_node()?;
        Some(self.tree.delete(id).0)
    }

    /// Removes and returns the entry with the greatest key, or `None` if the map is empty.
    pub fn poll_last_entry(&mut self) -> Option<Entry<K, V>> {
        let id = self.tree.last_node()?;
        Some(self.tree.delete(id).0)
    }

    /// Returns the entry with the greatest key strictly less than the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: navtree::TreeMap<_, _> = vec![(1, "a"), (3, "c")].into_iter().collect();
    ///
    /// assert_eq!(map.lower_entry(&1), None);
    /// assert_eq!(map.lower_entry(&3).map(|e| e.pair()), Some((&1, &"a")));
    /// assert_eq!(map.lower_key(&4), Some(&3));
    /// ```
    pub fn lower_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<K, V>> where C: Compare<Q, K> {
        self.tree.lower_node(key).map(|id| self.entry_at(id))
    }

    /// Returns the entry with the greatest key less than or equal to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: navtree::TreeMap<_, _> = vec![(1, "a"), (3, "c")].into_iter().collect();
    ///
    /// assert_eq!(map.floor_entry(&0), None);
    /// assert_eq!(map.floor_entry(&3).map(|e| e.pair()), Some((&3, &"c")));
    /// assert_eq!(map.floor_key(&2), Some(&1));
    /// ```
    pub fn floor_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<K, V>> where C: Compare<Q, K> {
        self.tree.floor_node(key).map(|id| self.entry_at(id))
    }

    /// Returns the entry with the least key greater than or equal to the given key.
    pub fn ceiling_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<K, V>>
        where C: Compare<Q, K> {
        self.tree.ceiling_node(key).map(|id| self.entry_at(id))
    }

    /// Returns the entry with the least key strictly greater than the given key.
    pub fn higher_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<K, V>>
        where C: Compare<Q, K> {
        self.tree.higher_node(key).map(|id| self.entry_at(id))
    }

    /// Returns the greatest key strictly less than the given key.
    pub fn lower_key<Q: ?Sized>(&self, key: &Q) -> Option<&K> where C: Compare<Q, K> {
        self.lower_entry(key).map(Entry::key)
    }

    /// Returns the greatest key less than or equal to the given key.
    pub fn floor_key<Q: ?Sized>(&self, key: &Q) -> Option<&K> where C: Compare<Q, K> {
        self.floor_entry(key).map(Entry::key)
    }

    /// Returns the least key greater than or equal to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: navtree::TreeMap<_, _> = vec![(1, "a"), (3, "c")].into_iter().collect();
    ///
    /// assert_eq!(map.ceiling_key(&2), Some(&3));
    /// assert_eq!(map.ceiling_key(&3), Some(&3));
    /// assert_eq!(map.higher_key(&3), None);
    /// ```
    pub fn ceiling_key<Q: ?Sized>(&self, key: &Q) -> Option<&K> where C: Compare<Q, K> {
        self.ceiling_entry(key).map(Entry::key)
    }

    /// Returns the least key strictly greater than the given key.
    pub fn higher_key<Q: ?Sized>(&self, key: &Q) -> Option<&K> where C: Compare<Q, K> {
        self.higher_entry(key).map(Entry::key)
    }

    /// Returns the entry following the one whose key is equal to the given key.
    ///
    /// Returns `None` if the key is absent or is the greatest in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: navtree::TreeMap<_, _> = vec![(1, "a"), (3, "c")].into_iter().collect();
    ///
    /// assert_eq!(map.successor_entry(&1).map(|e| e.pair()), Some((&3, &"c")));
    /// assert_eq!(map.successor_entry(&2), None);
    /// assert_eq!(map.predecessor_entry(&3).map(|e| e.pair()), Some((&1, &"a")));
    /// ```
    pub fn successor_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<K, V>>
        where C: Compare<Q, K> {
        let id = self.tree.get_node(key)?;
        self.tree.successor(id).map(|id| self.entry_at(id))
    }

    /// Returns the entry preceding the one whose key is equal to the given key.
    ///
    /// Returns `None` if the key is absent or is the least in the map.
    pub fn predecessor_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<K, V>>
        where C: Compare<Q, K> {
        let id = self.tree.get_node(key)?;
        self.tree.predecessor(id).map(|id| self.entry_at(id))
    }

    /// Retains only the entries for which the predicate returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: navtree::TreeMap<_, _> = (0..8).map(|k| (k, k * 10)).collect();
    /// map.retain(|&k, v| { *v += 1; k % 2 == 0 });
    ///
    /// assert_eq!(map.into_iter().collect::<Vec<_>>(), [(0, 1), (2, 21), (4, 41), (6, 61)]);
    /// ```
    pub fn retain<F>(&mut self, f: F) where F: FnMut(&K, &mut V) -> bool { self.tree.retain(f); }

    /// Returns an iterator that consumes the map.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    pub fn into_iter(mut self) -> IntoIter<K, V> {
        let ids = self.tree.walk().into_ids();
        IntoIter(self.tree.nodes_mut().drain(ids).into_iter())
    }

    /// Returns an iterator over the map's entries with immutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    pub fn iter(&self) -> Iter<K, V> { Iter(self.tree.walk()) }

    /// Returns an iterator over the map's entries with mutable references to the values.
    ///
    /// The iterator yields the entries in ascending order according to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: navtree::TreeMap<_, _> = vec![(1, 10), (2, 20)].into_iter().collect();
    ///
    /// for (_, value) in map.iter_mut() { *value += 1; }
    /// assert_eq!(map.values().cloned().collect::<Vec<_>>(), [11, 21]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<K, V> {
        let ids = self.tree.walk().into_ids();
        IterMut(self.tree.nodes_mut().entries_mut(ids).into_iter())
    }

    /// Returns an iterator over the map's entries as [`Entry`] references.
    pub fn entries(&self) -> Entries<K, V> { Entries(self.tree.walk()) }

    /// Returns an iterator over the map's keys in ascending order.
    pub fn keys(&self) -> Keys<K, V> { Keys(self.iter()) }

    /// Returns an iterator over the map's values in ascending order of their keys.
    pub fn values(&self) -> Values<K, V> { Values(self.iter()) }

    /// Returns an iterator over mutable references to the map's values in ascending order of
    /// their keys.
    pub fn values_mut(&mut self) -> ValuesMut<K, V> { ValuesMut(self.iter_mut()) }

    /// Returns an iterator over the map's entries whose keys lie in the given range.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::*;
    ///
    /// let map: navtree::TreeMap<_, _> = (1..6).map(|k| (k, ())).collect();
    ///
    /// assert_eq!(map.range(Excluded(&1), Included(&3)).map(|e| *e.0).collect::<Vec<_>>(), [2, 3]);
    /// assert_eq!(map.range(Included(&4), Excluded(&4)).count(), 0);
    /// ```
    pub fn range<Min: ?Sized, Max: ?Sized>(&self, min: Bound<&Min>, max: Bound<&Max>)
        -> Range<K, V> where C: Compare<Min, K> + Compare<Max, K> {

        let tree = &self.tree;

        let front = match min {
            Bound::Unbounded => tree.first_node(),
            Bound::Included(min) => tree.ceiling_node(min),
            Bound::Excluded(min) => tree.higher_node(min),
        };

        let back = match max {
            Bound::Unbounded => tree.last_node(),
            Bound::Included(max) => tree.floor_node(max),
            Bound::Excluded(max) => tree.lower_node(max),
        };

        match (front, back) {
            (Some(front), Some(back))
                if tree.cmp().compares_le(self.entry_at(front).key(), self.entry_at(back).key()) =>
                Range(Walk::new(tree.nodes(), Some(front), Some(back), true)),
            _ => Range(Walk::new(tree.nodes(), None, None, true)),
        }
    }

    /// Returns a fail-fast cursor positioned before the least entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use navtree::Error;
    ///
    /// let mut map: navtree::TreeMap<_, _> = (1..6).map(|k| (k, ())).collect();
    /// let mut cursor = map.cursor();
    ///
    /// assert_eq!(cursor.next_key(&map), Ok(&1));
    /// map.insert(6, ());
    /// assert!(matches!(cursor.next_key(&map), Err(Error::ConcurrentModification { .. })));
    /// ```
    pub fn cursor(&self) -> Cursor<Ascending> {
        Cursor::new(&self.tree, self.tree.first_node(), None)
    }

    /// Returns a fail-fast cursor positioned after the greatest entry, moving backwards.
    pub fn descending_cursor(&self) -> Cursor<Descending> {
        Cursor::new(&self.tree, self.tree.last_node(), None)
    }

    /// Returns a view of the map's keys.
    pub fn navigable_key_set(&self) -> SubSet<&Self> {
        SubSet::new(SubMap::new(self, Bounds::unbounded()))
    }

    /// Returns a view of the map's keys through which keys can be removed.
    pub fn navigable_key_set_mut(&mut self) -> SubSet<&mut Self> {
        SubSet::new(SubMap::new(self, Bounds::unbounded()))
    }

    /// Returns a view of the map's keys in descending order.
    pub fn descending_key_set(&self) -> SubSet<&Self, Descending> {
        SubSet::new(SubMap::new(self, Bounds::unbounded()))
    }

    /// Returns a view of the map's keys in descending order through which keys can be removed.
    pub fn descending_key_set_mut(&mut self) -> SubSet<&mut Self, Descending> {
        SubSet::new(SubMap::new(self, Bounds::unbounded()))
    }

    /// Returns a view of the map in descending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: navtree::TreeMap<_, _> = vec![(5, ()), (1, ()), (9, ())].into_iter().collect();
    /// let keys: Vec<_> = map.descending_map().keys().cloned().collect();
    /// assert_eq!(keys, [9, 5, 1]);
    /// ```
    pub fn descending_map(&self) -> SubMap<&Self, Descending> {
        SubMap::new(self, Bounds::unbounded())
    }

    /// Returns a mutable view of the map in descending key order.
    pub fn descending_map_mut(&mut self) -> SubMap<&mut Self, Descending> {
        SubMap::new(self, Bounds::unbounded())
    }

    /// Returns a view of the entries whose keys lie between `from` and `to`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `from` is greater than `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: navtree::TreeMap<_, _> = vec![5, 1, 9, 3, 7].into_iter().map(|k| (k, ())).collect();
    ///
    /// let view = map.sub_map(3, true, 9, false).unwrap();
    /// assert_eq!(view.keys().cloned().collect::<Vec<_>>(), [3, 5, 7]);
    /// assert!(map.sub_map(9, true, 3, true).is_err());
    /// ```
    pub fn sub_map(&self, from: K, from_inclusive: bool, to: K, to_inclusive: bool)
        -> Result<SubMap<&Self>> {
        let bounds =
            Bounds::new(bound(from, from_inclusive), bound(to, to_inclusive), self.tree.cmp())?;
        Ok(SubMap::new(self, bounds))
    }

    /// Returns a mutable view of the entries whose keys lie between `from` and `to`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `from` is greater than `to`.
    pub fn sub_map_mut(&mut self, from: K, from_inclusive: bool, to: K, to_inclusive: bool)
        -> Result<SubMap<&mut Self>> {
        let bounds =
            Bounds::new(bound(from, from_inclusive), bound(to, to_inclusive), self.tree.cmp())?;
        Ok(SubMap::new(self, bounds))
    }

    /// Returns a view of the entries whose keys are less than (or equal to, if `inclusive`)
    /// `to`.
    pub fn head_map(&self, to: K, inclusive: bool) -> SubMap<&Self> {
        SubMap::new(self, Bounds::up_to(bound(to, inclusive)))
    }

    /// Returns a mutable view of the entries whose keys are less than (or equal to, if
    /// `inclusive`) `to`.
    pub fn head_map_mut(&mut self, to: K, inclusive: bool) -> SubMap<&mut Self> {
        SubMap::new(self, Bounds::up_to(bound(to, inclusive)))
    }

    /// Returns a view of the entries whose keys are greater than (or equal to, if `inclusive`)
    /// `from`.
    pub fn tail_map(&self, from: K, inclusive: bool) -> SubMap<&Self> {
        SubMap::new(self, Bounds::starting_at(bound(from, inclusive)))
    }

    /// Returns a mutable view of the entries whose keys are greater than (or equal to, if
    /// `inclusive`) `from`.
    pub fn tail_map_mut(&mut self, from: K, inclusive: bool) -> SubMap<&mut Self> {
        SubMap::new(self, Bounds::starting_at(bound(from, inclusive)))
    }
}

impl<K, V, C> Backing for TreeMap<K, V, C> where C: Compare<K> {
    type Key = K;
    type Value = V;
    type Cmp = C;

    fn tree(&self) -> &RedBlackTree<K, V, C> { &self.tree }
}

impl<K, V, C> BackingMut for TreeMap<K, V, C> where C: Compare<K> {
    fn tree_mut(&mut self) -> &mut RedBlackTree<K, V, C> { &mut self.tree }
}

impl<K, V, C> Debug for TreeMap<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_map().entries(self).finish() }
}

impl<K, V, C> Default for TreeMap<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { TreeMap::with_cmp(Default::default()) }
}

impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C> where C: Compare<K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for TreeMap<K, V, C> where C: Compare<K> + Default {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

impl<K, V, C> Hash for TreeMap<K, V, C> where K: Hash, V: Hash, C: Compare<K> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        for e in self.entries() { e.hash(h); }
    }
}

impl<'a, K, V, C, Q: ?Sized> ops::Index<&'a Q> for TreeMap<K, V, C>
    where C: Compare<K> + Compare<Q, K> {

    type Output = V;
    fn index(&self, key: &Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V, C> IntoIterator for &'a mut TreeMap<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V, C> IntoIterator for TreeMap<K, V, C> where C: Compare<K> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> { self.into_iter() }
}

impl<K, V, C> PartialEq for TreeMap<K, V, C> where V: PartialEq, C: Compare<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(l, r)| {
            self.cmp().compares_eq(l.0, r.0) && l.1 == r.1
        })
    }
}

impl<K, V, C> Eq for TreeMap<K, V, C> where V: Eq, C: Compare<K> {}

impl<K, V, C> PartialOrd for TreeMap<K, V, C> where V: PartialOrd, C: Compare<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut r = other.iter();

        for (lk, lv) in self {
            let (rk, rv) = match r.next() {
                None => return Some(Greater),
                Some(pair) => pair,
            };

            match self.cmp().compare(lk, rk) {
                Equal => {}
                order => return Some(order),
            }

            match lv.partial_cmp(rv) {
                Some(Equal) => {}
                order => return order,
            }
        }

        Some(if r.next().is_none() { Equal } else { Less })
    }
}

impl<K, V, C> Ord for TreeMap<K, V, C> where V: Ord, C: Compare<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut r = other.iter();

        for (lk, lv) in self {
            let (rk, rv) = match r.next() {
                None => return Greater,
                Some(pair) => pair,
            };

            match self.tree.cmp().compare(lk, rk).then_with(|| lv.cmp(rv)) {
                Equal => {}
                order => return order,
            }
        }

        if r.next().is_none() { Equal } else { Less }
    }
}

/// An iterator that consumes the map.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`TreeMap::into_iter`](struct.TreeMap.html#method.into_iter) or the
/// `IntoIterator` trait:
///
/// ```
/// let mut map = navtree::TreeMap::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
///
/// for (key, value) in map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct IntoIter<K, V>(vec::IntoIter<Entry<K, V>>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next().map(Entry::into_pair) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back().map(Entry::into_pair) }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the map's entries with immutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
///
/// # Examples
///
/// Acquire through [`TreeMap::iter`](struct.TreeMap.html#method.iter) or the `IntoIterator`
/// trait:
///
/// ```
/// let mut map = navtree::TreeMap::new();
///
/// map.insert(2, "b");
/// map.insert(1, "a");
///
/// for (key, value) in &map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct Iter<'a, K: 'a, V: 'a>(Walk<'a, K, V>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next().map(Entry::pair) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back().map(Entry::pair) }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries with mutable references to the values.
///
/// The iterator yields the entries in ascending order according to the map's comparator.
pub struct IterMut<'a, K: 'a, V: 'a>(vec::IntoIter<&'a mut Entry<K, V>>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next().map(Entry::pair_mut) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.0.next_back().map(Entry::pair_mut)
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator over the map's entries as [`Entry`] references.
pub struct Entries<'a, K: 'a, V: 'a>(Walk<'a, K, V>);

impl<'a, K, V> Clone for Entries<'a, K, V> {
    fn clone(&self) -> Entries<'a, K, V> { Entries(self.0.clone()) }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = &'a Entry<K, V>;
    fn next(&mut self) -> Option<&'a Entry<K, V>> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Entries<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a Entry<K, V>> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for Entries<'a, K, V> {}

/// An iterator over the map's keys.
pub struct Keys<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Keys<'a, K, V> { Keys(self.0.clone()) }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> { self.0.next_back().map(|e| e.0) }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the map's values.
pub struct Values<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Values<'a, K, V> { Values(self.0.clone()) }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// An iterator over mutable references to the map's values.
pub struct ValuesMut<'a, K: 'a, V: 'a>(IterMut<'a, K, V>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<&'a mut V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}

/// An iterator over the entries of a map or view whose keys lie in a range.
///
/// Acquire through [`TreeMap::range`](struct.TreeMap.html#method.range) or a view's `iter`.
pub struct Range<'a, K: 'a, V: 'a>(Walk<'a, K, V>);

impl<'a, K, V> Clone for Range<'a, K, V> {
    fn clone(&self) -> Range<'a, K, V> { Range(self.0.clone()) }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next().map(Entry::pair) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back().map(Entry::pair) }
}
