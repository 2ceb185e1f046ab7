//! An ordered set based on a red-black tree.

mod view;

pub use self::view::SubSet;

use compare::{Compare, Natural};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use super::cursor::Cursor;
use super::error::Result;
use super::map::{self, SubMap, TreeMap};
use super::tree::{Inserted, RedBlackTree};
use super::view::{bound, Ascending, Backing, BackingMut, Bounds, Descending};

/// An ordered set based on a red-black tree.
///
/// The behavior of this set is undefined if an item's ordering relative to any other item changes
/// while the item is in the set. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
#[derive(Clone)]
pub struct TreeSet<T, C = Natural<T>> where C: Compare<T> {
    map: TreeMap<T, (), C>,
}

impl<T> TreeSet<T> where T: Ord {
    /// Creates an empty set ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = navtree::TreeSet::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { TreeSet { map: TreeMap::new() } }
}

impl<T, C> TreeSet<T, C> where C: Compare<T> {
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut set = navtree::TreeSet::with_cmp(natural().rev());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { TreeSet { map: TreeMap::with_cmp(cmp) } }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Returns the number of items in the set.
    pub fn len(&self) -> usize { self.map.len() }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C { self.map.cmp() }

    /// Removes all items from the set.
    pub fn clear(&mut self) { self.map.clear(); }

    /// Inserts an item into the set, returning `true` if the set did not already contain it.
    /// An item already in the set is not replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = navtree::TreeSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> bool {
        match self.map.tree_mut().insert(item, ()) {
            Inserted::Vacant(_) => true,
            Inserted::Occupied(..) => false,
        }
    }

    /// Removes the given item from the set, returning `true` if the set contained it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = navtree::TreeSet::new();
    /// set.insert(1);
    ///
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.remove(item).is_some()
    }

    /// Removes the given item from the set and returns it, or `None` if the set does not
    /// contain it.
    pub fn take<Q: ?Sized>(&mut self, item: &Q) -> Option<T> where C: Compare<Q, T> {
        self.map.remove(item).map(|e| e.0)
    }

    /// Checks if the set contains the given item.
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where C: Compare<Q, T> {
        self.map.contains_key(item)
    }

    /// Returns the least item, or `None` if the set is empty.
    pub fn first(&self) -> Option<&T> { self.map.first_key() }

    /// Returns the greatest item, or `None` if the set is empty.
    pub fn last(&self) -> Option<&T> { self.map.last_key() }

    /// Returns the greatest item strictly less than the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: navtree::TreeSet<_> = vec![10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(set.lower(&20), Some(&10));
    /// assert_eq!(set.floor(&20), Some(&20));
    /// assert_eq!(set.ceiling(&21), Some(&30));
    /// assert_eq!(set.higher(&30), None);
    /// ```
    pub fn lower<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        self.map.lower_key(item)
    }

    /// Returns the greatest item less than or equal to the given item.
    pub fn floor<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        self.map.floor_key(item)
    }

    /// Returns the least item greater than or equal to the given item.
    pub fn ceiling<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        self.map.ceiling_key(item)
    }

    /// Returns the least item strictly greater than the given item.
    pub fn higher<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        self.map.higher_key(item)
    }

    /// Removes and returns the least item, or `None` if the set is empty.
    pub fn poll_first(&mut self) -> Option<T> {
        self.map.poll_first_entry().map(|e| e.into_pair().0)
    }

    /// Removes and returns the greatest item, or `None` if the set is empty.
    pub fn poll_last(&mut self) -> Option<T> {
        self.map.poll_last_entry().map(|e| e.into_pair().0)
    }

    /// Retains only the items for which the predicate returns `true`.
    pub fn retain<F>(&mut self, mut f: F) where F: FnMut(&T) -> bool {
        self.map.retain(|item, _| f(item));
    }

    /// Returns an iterator that consumes the set, yielding its items in ascending order.
    pub fn into_iter(self) -> IntoIter<T> { IntoIter(self.map.into_iter()) }

    /// Returns an iterator over the set's items in ascending order.
    pub fn iter(&self) -> Iter<T> { Iter(self.map.keys()) }

    /// Returns a fail-fast cursor positioned before the least item.
    pub fn cursor(&self) -> Cursor<Ascending> { self.map.cursor() }

    /// Returns a fail-fast cursor positioned after the greatest item, moving backwards.
    pub fn descending_cursor(&self) -> Cursor<Descending> { self.map.descending_cursor() }

    /// Returns a view of the set in descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: navtree::TreeSet<_> = vec![5, 1, 9, 3, 7].into_iter().collect();
    /// let items: Vec<_> = set.descending_set().iter().cloned().collect();
    /// assert_eq!(items, [9, 7, 5, 3, 1]);
    /// ```
    pub fn descending_set(&self) -> SubSet<&Self, Descending> {
        SubSet::new(SubMap::new(self, Bounds::unbounded()))
    }

    /// Returns a mutable view of the set in descending order.
    pub fn descending_set_mut(&mut self) -> SubSet<&mut Self, Descending> {
        SubSet::new(SubMap::new(self, Bounds::unbounded()))
    }

    /// Returns a view of the items between `from` and `to`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `from` is greater than `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: navtree::TreeSet<_> = (0..10).collect();
    /// let view = set.sub_set(2, false, 5, true).unwrap();
    ///
    /// assert_eq!(view.iter().cloned().collect::<Vec<_>>(), [3, 4, 5]);
    /// assert_eq!(view.first(), Some(&3));
    /// assert!(!view.contains(&2));
    /// ```
    pub fn sub_set(&self, from: T, from_inclusive: bool, to: T, to_inclusive: bool)
        -> Result<SubSet<&Self>> {
        let bounds =
            Bounds::new(bound(from, from_inclusive), bound(to, to_inclusive), self.map.cmp())?;
        Ok(SubSet::new(SubMap::new(self, bounds)))
    }

    /// Returns a mutable view of the items between `from` and `to`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `from` is greater than `to`.
    pub fn sub_set_mut(&mut self, from: T, from_inclusive: bool, to: T, to_inclusive: bool)
        -> Result<SubSet<&mut Self>> {
        let bounds =
            Bounds::new(bound(from, from_inclusive), bound(to, to_inclusive), self.map.cmp())?;
        Ok(SubSet::new(SubMap::new(self, bounds)))
    }

    /// Returns a view of the items less than (or equal to, if `inclusive`) `to`.
    pub fn head_set(&self, to: T, inclusive: bool) -> SubSet<&Self> {
        SubSet::new(SubMap::new(self, Bounds::up_to(bound(to, inclusive))))
    }

    /// Returns a mutable view of the items less than (or equal to, if `inclusive`) `to`.
    pub fn head_set_mut(&mut self, to: T, inclusive: bool) -> SubSet<&mut Self> {
        SubSet::new(SubMap::new(self, Bounds::up_to(bound(to, inclusive))))
    }

    /// Returns a view of the items greater than (or equal to, if `inclusive`) `from`.
    pub fn tail_set(&self, from: T, inclusive: bool) -> SubSet<&Self> {
        SubSet::new(SubMap::new(self, Bounds::starting_at(bound(from, inclusive))))
    }

    /// Returns a mutable view of the items greater than (or equal to, if `inclusive`) `from`.
    pub fn tail_set_mut(&mut self, from: T, inclusive: bool) -> SubSet<&mut Self> {
        SubSet::new(SubMap::new(self, Bounds::starting_at(bound(from, inclusive))))
    }
}

impl<T, C> Backing for TreeSet<T, C> where C: Compare<T> {
    type Key = T;
    type Value = ();
    type Cmp = C;

    fn tree(&self) -> &RedBlackTree<T, (), C> { self.map.tree() }
}

impl<T, C> BackingMut for TreeSet<T, C> where C: Compare<T> {
    fn tree_mut(&mut self) -> &mut RedBlackTree<T, (), C> { self.map.tree_mut() }
}

impl<T, C> Debug for TreeSet<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.debug_set().entries(self).finish() }
}

impl<T, C> Default for TreeSet<T, C> where C: Compare<T> + Default {
    fn default() -> Self { TreeSet::with_cmp(Default::default()) }
}

impl<T, C> Extend<T> for TreeSet<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, it: I) {
        for item in it { self.insert(item); }
    }
}

impl<T, C> iter::FromIterator<T> for TreeSet<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> Self {
        let mut set: Self = Default::default();
        set.extend(it);
        set
    }
}

impl<T, C> Hash for TreeSet<T, C> where T: Hash, C: Compare<T> {
    fn hash<H: hash::Hasher>(&self, h: &mut H) { self.map.hash(h); }
}

impl<'a, T, C> IntoIterator for &'a TreeSet<T, C> where C: Compare<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, C> IntoIterator for TreeSet<T, C> where C: Compare<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { self.into_iter() }
}

impl<T, C> PartialEq for TreeSet<T, C> where C: Compare<T> {
    fn eq(&self, other: &Self) -> bool { self.map == other.map }
}

impl<T, C> Eq for TreeSet<T, C> where C: Compare<T> {}

impl<T, C> PartialOrd for TreeSet<T, C> where C: Compare<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { self.map.partial_cmp(&other.map) }
}

impl<T, C> Ord for TreeSet<T, C> where C: Compare<T> {
    fn cmp(&self, other: &Self) -> Ordering { Ord::cmp(&self.map, &other.map) }
}

/// An iterator that consumes the set, yielding its items in ascending order.
pub struct IntoIter<T>(map::IntoIter<T, ()>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back().map(|e| e.0) }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator over the set's items in ascending order.
///
/// # Examples
///
/// Acquire through [`TreeSet::iter`](struct.TreeSet.html#method.iter) or the `IntoIterator`
/// trait:
///
/// ```
/// let mut set = navtree::TreeSet::new();
///
/// set.insert(2);
/// set.insert(1);
///
/// for item in &set {
///     println!("{:?}", item);
/// }
/// ```
pub struct Iter<'a, T: 'a>(map::Keys<'a, T, ()>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Iter<'a, T> { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back() }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

#[cfg(test)]
mod test {
    use compare::{Compare, natural};
    use quickcheck_macros::quickcheck;
    use super::TreeSet;
    use super::super::error::Error;

    #[quickcheck]
    fn collects_sorted_without_duplicates(items: Vec<u8>) -> bool {
        let set: TreeSet<u8> = items.iter().cloned().collect();
        let mut expected = items;
        expected.sort();
        expected.dedup();

        set.len() == expected.len() && set.into_iter().eq(expected)
    }

    #[test]
    fn insert_keeps_the_first_item() {
        let cmp = |l: &(u32, char), r: &(u32, char)| l.0.cmp(&r.0);
        let mut set = TreeSet::with_cmp(cmp);

        assert!(set.insert((1, 'a')));
        assert!(!set.insert((1, 'b')));
        assert_eq!(set.first(), Some(&(1, 'a')));
        assert_eq!(set.take(&(1, 'z')), Some((1, 'a')));
    }

    #[test]
    fn mutable_sub_set_uses_the_comparator() {
        let mut set = TreeSet::with_cmp(natural().rev());
        for item in 0..10u32 { set.insert(item); }

        assert_eq!(set.sub_set_mut(2, true, 7, true).err(), Some(Error::InvalidRange));

        {
            let mut view = set.sub_set_mut(7, true, 2, false).unwrap();
            assert_eq!(view.iter().cloned().collect::<Vec<_>>(), [7, 6, 5, 4, 3]);
            assert_eq!(view.insert(2), Err(Error::KeyOutOfRange));
            assert!(view.remove(&5));
        }

        assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [9, 8, 7, 6, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn poll_and_retain() {
        let mut set: TreeSet<u32> = (0..10).collect();
        set.retain(|&k| k % 3 != 0);

        assert_eq!(set.poll_first(), Some(1));
        assert_eq!(set.poll_last(), Some(8));
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [2, 4, 5, 7]);
    }

    #[test]
    fn equality_and_debug() {
        let a: TreeSet<u32> = vec![3, 1, 2].into_iter().collect();
        let b: TreeSet<u32> = (1..4).collect();

        let c: TreeSet<u32> = (1..5).collect();

        assert_eq!(a, b);
        assert!(a < c);
        assert_eq!(format!("{:?}", a), "{1, 2, 3}");
    }
}
