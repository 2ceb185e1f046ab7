use compare::Compare;
use std::cell::Cell;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::ops::Bound::{self, Unbounded};
use super::{put, Range};
use super::super::cursor::Cursor;
use super::super::entry::Entry;
use super::super::error::{Error, Result};
use super::super::node::Walk;
use super::super::set::SubSet;
use super::super::tree::{NodeId, RedBlackTree};
use super::super::view::{bound, Ascending, Backing, BackingMut, Bounds, Direction};

/// A live view of the entries of a map whose keys lie in a range, in the order given by `D`.
///
/// `M` is the handle to the backing map: `&TreeMap` gives a read-only view and `&mut TreeMap`
/// a view that can also insert and remove. Every change made through the view lands in the
/// backing map, and every change to the backing map shows through the view.
///
/// Navigation is relative to `D`: in a `Descending` view `first_key` is the greatest key in
/// range and `higher_key(k)` is the greatest key below `k`.
///
/// # Examples
///
/// ```
/// let mut map: navtree::TreeMap<_, _> = (1..=9).map(|k| (k, k * 10)).collect();
///
/// {
///     let mut view = map.sub_map_mut(3, true, 6, false).unwrap();
///     assert_eq!(view.len(), 3);
///     assert_eq!(view.remove(&4), Some((4, 40)));
///     assert_eq!(view.remove(&8), None);
///     assert!(view.insert(9, 90).is_err());
/// }
///
/// assert_eq!(map.len(), 8);
/// ```
pub struct SubMap<M, D = Ascending> where M: Backing {
    map: M,
    bounds: Bounds<M::Key>,
    // (modification count, length) as of the last `len` call.
    len: Cell<Option<(usize, usize)>>,
    _dir: PhantomData<D>,
}

impl<M, D> SubMap<M, D> where M: Backing, D: Direction {
    pub(crate) fn new(map: M, bounds: Bounds<M::Key>) -> Self {
        SubMap { map, bounds, len: Cell::new(None), _dir: PhantomData }
    }

    fn entry_at(&self, id: NodeId) -> &Entry<M::Key, M::Value> {
        &self.map.tree().nodes().get(id).entry
    }

    /// Returns the view's range.
    pub fn bounds(&self) -> &Bounds<M::Key> { &self.bounds }

    /// Returns the number of entries in the view.
    ///
    /// This walks the range, but the count is remembered until the backing map is next
    /// structurally modified.
    pub fn len(&self) -> usize {
        let mod_count = self.map.tree().mod_count();

        if let Some((seen, len)) = self.len.get() {
            if seen == mod_count { return len; }
        }

        let len = self.iter().count();
        self.len.set(Some((mod_count, len)));
        len
    }

    /// Checks if the view is empty.
    pub fn is_empty(&self) -> bool { D::lowest(&self.bounds, self.map.tree()).is_none() }

    /// Checks if `key` lies within the view's range, whether or not it is present.
    pub fn in_range<Q: ?Sized>(&self, key: &Q) -> bool where M::Cmp: Compare<Q, M::Key> {
        self.bounds.contains(key, self.map.tree().cmp())
    }

    /// Checks if the view contains the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where M::Cmp: Compare<Q, M::Key> {
        self.get(key).is_some()
    }

    /// Returns a reference to the value associated with the given key, or `None` if the key is
    /// absent or out of range.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&M::Value> where M::Cmp: Compare<Q, M::Key> {
        if !self.in_range(key) { return None; }
        self.map.tree().get_node(key).map(|id| self.entry_at(id).value())
    }

    /// Checks if any entry in range has the given value. This walks the range.
    pub fn contains_value(&self, value: &M::Value) -> bool where M::Value: PartialEq {
        self.values().any(|v| v == value)
    }

    /// Checks if the view maps `key` to `value`.
    pub fn contains_entry<Q: ?Sized>(&self, key: &Q, value: &M::Value) -> bool
        where M::Cmp: Compare<Q, M::Key>, M::Value: PartialEq {
        self.get(key) == Some(value)
    }

    // The first node in view order whose value equals `value`.
    fn find_value(&self, value: &M::Value) -> Option<NodeId> where M::Value: PartialEq {
        let tree = self.map.tree();
        let fence = D::fence(&self.bounds, tree);
        let mut next = D::lowest(&self.bounds, tree);

        while let Some(id) = next {
            if next == fence { break; }
            if self.entry_at(id).value() == value { return Some(id); }
            next = D::step(tree, id);
        }

        None
    }

    /// Returns the first entry in view order.
    pub fn first_entry(&self) -> Option<&Entry<M::Key, M::Value>> {
        D::lowest(&self.bounds, self.map.tree()).map(|id| self.entry_at(id))
    }

    /// Returns the last entry in view order.
    pub fn last_entry(&self) -> Option<&Entry<M::Key, M::Value>> {
        D::highest(&self.bounds, self.map.tree()).map(|id| self.entry_at(id))
    }

    /// Returns the first key in view order.
    pub fn first_key(&self) -> Option<&M::Key> { self.first_entry().map(Entry::key) }

    /// Returns the last key in view order.
    pub fn last_key(&self) -> Option<&M::Key> { self.last_entry().map(Entry::key) }

    /// Returns the last entry in view order that comes strictly before `key`.
    pub fn lower_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<M::Key, M::Value>>
        where M::Cmp: Compare<Q, M::Key> {
        D::lower(&self.bounds, self.map.tree(), key).map(|id| self.entry_at(id))
    }

    /// Returns the last entry in view order that comes before or at `key`.
    pub fn floor_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<M::Key, M::Value>>
        where M::Cmp: Compare<Q, M::Key> {
        D::floor(&self.bounds, self.map.tree(), key).map(|id| self.entry_at(id))
    }

    /// Returns the first entry in view order that comes at or after `key`.
    pub fn ceiling_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<M::Key, M::Value>>
        where M::Cmp: Compare<Q, M::Key> {
        D::ceiling(&self.bounds, self.map.tree(), key).map(|id| self.entry_at(id))
    }

    /// Returns the first entry in view order that comes strictly after `key`.
    pub fn higher_entry<Q: ?Sized>(&self, key: &Q) -> Option<&Entry<M::Key, M::Value>>
        where M::Cmp: Compare<Q, M::Key> {
        D::higher(&self.bounds, self.map.tree(), key).map(|id| self.entry_at(id))
    }

    pub fn lower_key<Q: ?Sized>(&self, key: &Q) -> Option<&M::Key>
        where M::Cmp: Compare<Q, M::Key> {
        self.lower_entry(key).map(Entry::key)
    }

    pub fn floor_key<Q: ?Sized>(&self, key: &Q) -> Option<&M::Key>
        where M::Cmp: Compare<Q, M::Key> {
        self.floor_entry(key).map(Entry::key)
    }

    pub fn ceiling_key<Q: ?Sized>(&self, key: &Q) -> Option<&M::Key>
        where M::Cmp: Compare<Q, M::Key> {
        self.ceiling_entry(key).map(Entry::key)
    }

    pub fn higher_key<Q: ?Sized>(&self, key: &Q) -> Option<&M::Key>
        where M::Cmp: Compare<Q, M::Key> {
        self.higher_entry(key).map(Entry::key)
    }

    /// Returns an iterator over the view's entries in view order.
    pub fn iter(&self) -> Range<M::Key, M::Value> {
        let tree = self.map.tree();
        let front = D::lowest(&self.bounds, tree);
        let back = front.and_then(|_| D::highest(&self.bounds, tree));
        Range(Walk::new(tree.nodes(), front, back, D::ascending()))
    }

    /// Returns an iterator over the view's keys in view order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &M::Key> + '_ {
        self.iter().map(|e| e.0)
    }

    /// Returns an iterator over the view's values in view order of their keys.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &M::Value> + '_ {
        self.iter().map(|e| e.1)
    }

    /// Returns a fail-fast cursor over the view, in view order.
    ///
    /// The cursor stops at the first node outside the range, fixed when the cursor is created.
    pub fn cursor(&self) -> Cursor<D> {
        let tree = self.map.tree();
        Cursor::new(tree, D::lowest(&self.bounds, tree), D::fence(&self.bounds, tree))
    }

    /// Turns the view around.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: navtree::TreeMap<_, _> = (1..=5).map(|k| (k, ())).collect();
    /// let view = map.sub_map(2, true, 4, true).unwrap().descending_map();
    ///
    /// assert_eq!(view.keys().cloned().collect::<Vec<_>>(), [4, 3, 2]);
    /// assert_eq!(view.higher_key(&3), Some(&2));
    /// ```
    pub fn descending_map(self) -> SubMap<M, D::Reverse> {
        let SubMap { map, bounds, .. } = self;
        SubMap::new(map, bounds)
    }

    /// Narrows the view to the keys between `from` and `to`, given in view order.
    ///
    /// # Errors
    ///
    /// `KeyOutOfRange` if either key lies outside the current range; `InvalidRange` if `from`
    /// comes after `to`.
    pub fn sub_map(self, from: M::Key, from_inclusive: bool, to: M::Key, to_inclusive: bool)
        -> Result<Self> {

        let (lo, hi) = D::orient(bound(from, from_inclusive), bound(to, to_inclusive));
        self.narrow(lo, hi)
    }

    /// Narrows the view to the keys before (or at, if `inclusive`) `to` in view order.
    pub fn head_map(self, to: M::Key, inclusive: bool) -> Result<Self> {
        let (lo, hi) = D::orient(Unbounded, bound(to, inclusive));
        self.narrow(lo, hi)
    }

    /// Narrows the view to the keys after (or at, if `inclusive`) `from` in view order.
    pub fn tail_map(self, from: M::Key, inclusive: bool) -> Result<Self> {
        let (lo, hi) = D::orient(bound(from, inclusive), Unbounded);
        self.narrow(lo, hi)
    }

    fn narrow(self, lo: Bound<M::Key>, hi: Bound<M::Key>) -> Result<Self> {
        let SubMap { map, bounds, .. } = self;
        let bounds = bounds.narrow(lo, hi, map.tree().cmp())?;
        Ok(SubMap::new(map, bounds))
    }

    /// Returns a view of the view's keys.
    pub fn navigable_key_set(self) -> SubSet<M, D> { SubSet::new(self) }

    /// Returns a view of the view's keys in reverse order.
    pub fn descending_key_set(self) -> SubSet<M, D::Reverse> {
        SubSet::new(self.descending_map())
    }
}

impl<M, D> SubMap<M, D> where M: BackingMut, D: Direction {
    /// Inserts an entry, returning the previous value associated with the key.
    ///
    /// # Errors
    ///
    /// `KeyOutOfRange` if the key lies outside the view's range.
    pub fn insert(&mut self, key: M::Key, value: M::Value) -> Result<Option<M::Value>> {
        if !self.in_range(&key) {
            tracing::debug!("rejected an insertion outside the view's range");
            return Err(Error::KeyOutOfRange);
        }

        Ok(put(self.map.tree_mut(), key, value))
    }

    /// Removes and returns the entry with the given key, if it is present and in range.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<(M::Key, M::Value)>
        where M::Cmp: Compare<Q, M::Key> {

        if !self.in_range(key) { return None; }
        self.map.tree_mut().remove(key).map(Entry::into_pair)
    }

    /// Removes the entry for `key` only if it is in range and its value equals `value`. Returns
    /// whether an entry was removed.
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q, value: &M::Value) -> bool
        where M::Cmp: Compare<Q, M::Key>, M::Value: PartialEq {

        if !self.contains_entry(key, value) { return false; }
        self.remove(key).is_some()
    }

    /// Removes the first entry in view order whose value equals `value`. Returns whether an
    /// entry was removed.
    pub fn remove_value(&mut self, value: &M::Value) -> bool where M::Value: PartialEq {
        match self.find_value(value) {
            Some(id) => {
                self.map.tree_mut().delete(id);
                true
            }
            None => false,
        }
    }

    /// Returns a mutable reference to the value associated with the given key, if it is present
    /// and in range.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut M::Value>
        where M::Cmp: Compare<Q, M::Key> {

        if !self.in_range(key) { return None; }
        let tree = self.map.tree_mut();
        let id = tree.get_node(key)?;
        tree.value_mut(id)
    }

    /// Removes and returns the first entry in view order.
    pub fn poll_first_entry(&mut self) -> Option<Entry<M::Key, M::Value>> {
        let id = D::lowest(&self.bounds, self.map.tree())?;
        Some(self.map.tree_mut().delete(id).0)
    }

    /// Removes and returns the last entry in view order.
    pub fn poll_last_entry(&mut self) -> Option<Entry<M::Key, M::Value>> {
        let id = D::highest(&self.bounds, self.map.tree())?;
        Some(self.map.tree_mut().delete(id).0)
    }

    /// Removes every entry in range from the backing map.
    pub fn clear(&mut self) {
        while self.poll_first_entry().is_some() {}
    }
}

impl<M, D> Backing for SubMap<M, D> where M: Backing {
    type Key = M::Key;
    type Value = M::Value;
    type Cmp = M::Cmp;

    fn tree(&self) -> &RedBlackTree<M::Key, M::Value, M::Cmp> { self.map.tree() }
}

impl<M, D> BackingMut for SubMap<M, D> where M: BackingMut {
    fn tree_mut(&mut self) -> &mut RedBlackTree<M::Key, M::Value, M::Cmp> { self.map.tree_mut() }
}

impl<M, D> Debug for SubMap<M, D> where M: Backing, M::Key: Debug, M::Value: Debug, D: Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_map().entries(self.iter()).finish() }
}
