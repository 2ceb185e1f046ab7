use compare::Compare;
use std::fmt::{self, Debug};
use super::super::cursor::Cursor;
use super::super::error::{Error, Result};
use super::super::map::SubMap;
use super::super::tree::{Inserted, RedBlackTree};
use super::super::view::{Ascending, Backing, BackingMut, Bounds, Direction};

/// A live view of the keys of a map or set that lie in a range, in the order given by `D`.
///
/// This is the key-only face of a [`SubMap`]: it shares the backing tree, so removals through
/// the view remove whole entries from the backing collection.
///
/// # Examples
///
/// ```
/// let mut set: navtree::TreeSet<_> = (1..=9).collect();
///
/// {
///     let mut view = set.tail_set_mut(5, false).descending_set();
///     assert_eq!(view.first(), Some(&9));
///     assert_eq!(view.higher(&8), Some(&7));
///     assert_eq!(view.poll_last(), Some(6));
///     assert_eq!(view.insert(2), Err(navtree::Error::KeyOutOfRange));
/// }
///
/// assert_eq!(set.len(), 8);
/// assert!(!set.contains(&6));
/// ```
pub struct SubSet<M, D = Ascending> where M: Backing {
    map: SubMap<M, D>,
}

impl<M, D> SubSet<M, D> where M: Backing, D: Direction {
    pub(crate) fn new(map: SubMap<M, D>) -> Self { SubSet { map } }

    /// Returns the view's range.
    pub fn bounds(&self) -> &Bounds<M::Key> { self.map.bounds() }

    /// Returns the number of keys in the view.
    pub fn len(&self) -> usize { self.map.len() }

    /// Checks if the view is empty.
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Checks if the view contains the given key.
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool where M::Cmp: Compare<Q, M::Key> {
        self.map.contains_key(key)
    }

    /// Returns the first key in view order.
    pub fn first(&self) -> Option<&M::Key> { self.map.first_key() }

    /// Returns the last key in view order.
    pub fn last(&self) -> Option<&M::Key> { self.map.last_key() }

    /// Returns the closest key before the given key in view order.
    pub fn lower<Q: ?Sized>(&self, key: &Q) -> Option<&M::Key> where M::Cmp: Compare<Q, M::Key> {
        self.map.lower_key(key)
    }

    /// Returns the given key, if present, or the closest key before it in view order.
    pub fn floor<Q: ?Sized>(&self, key: &Q) -> Option<&M::Key> where M::Cmp: Compare<Q, M::Key> {
        self.map.floor_key(key)
    }

    /// Returns the given key, if present, or the closest key after it in view order.
    pub fn ceiling<Q: ?Sized>(&self, key: &Q) -> Option<&M::Key>
        where M::Cmp: Compare<Q, M::Key> {
        self.map.ceiling_key(key)
    }

    /// Returns the closest key after the given key in view order.
    pub fn higher<Q: ?Sized>(&self, key: &Q) -> Option<&M::Key>
        where M::Cmp: Compare<Q, M::Key> {
        self.map.higher_key(key)
    }

    /// Returns an iterator over the view's keys in view order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &M::Key> + '_ { self.map.keys() }

    /// Returns a fail-fast cursor over the view, in view order.
    pub fn cursor(&self) -> Cursor<D> { self.map.cursor() }

    /// Turns the view around.
    pub fn descending_set(self) -> SubSet<M, D::Reverse> { SubSet::new(self.map.descending_map()) }

    /// Narrows the view to the keys between `from` and `to`, given in view order.
    ///
    /// # Errors
    ///
    /// `KeyOutOfRange` if either key lies outside the current range; `InvalidRange` if `from`
    /// comes after `to`.
    pub fn sub_set(self, from: M::Key, from_inclusive: bool, to: M::Key, to_inclusive: bool)
        -> Result<Self> {
        self.map.sub_map(from, from_inclusive, to, to_inclusive).map(SubSet::new)
    }

    /// Narrows the view to the keys before (or at, if `inclusive`) `to` in view order.
    pub fn head_set(self, to: M::Key, inclusive: bool) -> Result<Self> {
        self.map.head_map(to, inclusive).map(SubSet::new)
    }

    /// Narrows the view to the keys after (or at, if `inclusive`) `from` in view order.
    pub fn tail_set(self, from: M::Key, inclusive: bool) -> Result<Self> {
        self.map.tail_map(from, inclusive).map(SubSet::new)
    }
}

impl<M, D> SubSet<M, D> where M: BackingMut, D: Direction {
    /// Removes the given key and its entry from the backing collection, returning `true` if it
    /// was present and in range.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> bool where M::Cmp: Compare<Q, M::Key> {
        self.map.remove(key).is_some()
    }

    /// Removes the given key from the backing collection and returns it, if it was present and
    /// in range.
    pub fn take<Q: ?Sized>(&mut self, key: &Q) -> Option<M::Key> where M::Cmp: Compare<Q, M::Key> {
        self.map.remove(key).map(|e| e.0)
    }

    /// Removes and returns the first key in view order.
    pub fn poll_first(&mut self) -> Option<M::Key> {
        self.map.poll_first_entry().map(|e| e.into_pair().0)
    }

    /// Removes and returns the last key in view order.
    pub fn poll_last(&mut self) -> Option<M::Key> {
        self.map.poll_last_entry().map(|e| e.into_pair().0)
    }

    /// Removes every key in range from the backing collection.
    pub fn clear(&mut self) { self.map.clear(); }
}

impl<M, D> SubSet<M, D> where M: BackingMut<Value = ()>, D: Direction {
    /// Inserts a key into the backing set, returning `true` if it was not already present.
    ///
    /// Only views over sets can insert: a key view of a map has no value to pair the key with.
    ///
    /// # Errors
    ///
    /// `KeyOutOfRange` if the key lies outside the view's range.
    pub fn insert(&mut self, key: M::Key) -> Result<bool> {
        if !self.map.in_range(&key) {
            tracing::debug!("rejected an insertion outside the view's range");
            return Err(Error::KeyOutOfRange);
        }

        match self.map.tree_mut().insert(key, ()) {
            Inserted::Vacant(_) => Ok(true),
            Inserted::Occupied(..) => Ok(false),
        }
    }
}

impl<M, D> Backing for SubSet<M, D> where M: Backing {
    type Key = M::Key;
    type Value = M::Value;
    type Cmp = M::Cmp;

    fn tree(&self) -> &RedBlackTree<M::Key, M::Value, M::Cmp> { self.map.tree() }
}

impl<M, D> BackingMut for SubSet<M, D> where M: BackingMut {
    fn tree_mut(&mut self) -> &mut RedBlackTree<M::Key, M::Value, M::Cmp> { self.map.tree_mut() }
}

impl<M, D> Debug for SubSet<M, D> where M: Backing, M::Key: Debug, D: Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_set().entries(self.iter()).finish() }
}
