//! Fail-fast traversal that tolerates its own removals.

use compare::Compare;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use super::entry::Entry;
use super::error::{Error, Result};
use super::tree::{NodeId, RedBlackTree};
use super::view::{Ascending, Backing, BackingMut, Direction};

/// A position in the traversal of a map, set or view.
///
/// A cursor does not borrow the collection it walks. Each call takes the collection instead, so
/// the collection stays free for direct mutation between steps. Any structural change not made
/// through the cursor itself is detected on the next step, which then fails with
/// [`Error::ConcurrentModification`] instead of following stale links.
///
/// A cursor must only be used with the collection (or a view over the same tree) that created it.
///
/// # Examples
///
/// ```
/// let mut set: navtree::TreeSet<_> = [10, 20, 30, 40, 50].iter().cloned().collect();
/// let mut cursor = set.cursor();
///
/// while cursor.has_next() {
///     if cursor.next_key(&set).unwrap() % 20 == 0 {
///         cursor.remove(&mut set).unwrap();
///     }
/// }
///
/// assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [10, 30, 50]);
/// ```
pub struct Cursor<D = Ascending> {
    next: Option<NodeId>,
    last: Option<NodeId>,
    fence: Option<NodeId>,
    expected: usize,
    _dir: PhantomData<D>,
}

impl<D> Cursor<D> where D: Direction {
    pub(crate) fn new<K, V, C>(tree: &RedBlackTree<K, V, C>, first: Option<NodeId>,
                               fence: Option<NodeId>) -> Self where C: Compare<K> {
        Cursor { next: first, last: None, fence, expected: tree.mod_count(), _dir: PhantomData }
    }

    /// Checks if another element remains.
    pub fn has_next(&self) -> bool { self.next.is_some() && self.next != self.fence }

    fn check<K, V, C>(&self, tree: &RedBlackTree<K, V, C>) -> Result<()> where C: Compare<K> {
        let found = tree.mod_count();

        if found == self.expected {
            Ok(())
        } else {
            tracing::debug!(expected = self.expected, found, "concurrent modification detected");
            Err(Error::ConcurrentModification { expected: self.expected, found })
        }
    }

    /// Advances the cursor, returning the entry it moved over.
    ///
    /// # Errors
    ///
    /// `NoSuchElement` if the traversal is exhausted; `ConcurrentModification` if the tree was
    /// structurally changed other than through this cursor.
    pub fn next<'a, B>(&mut self, backing: &'a B) -> Result<&'a Entry<B::Key, B::Value>>
        where B: Backing + ?Sized {

        let id = match self.next {
            Some(id) if self.next != self.fence => id,
            _ => return Err(Error::NoSuchElement),
        };

        let tree = backing.tree();
        self.check(tree)?;

        let entry = tree.entry(id).ok_or(Error::ConcurrentModification {
            expected: self.expected,
            found: tree.mod_count(),
        })?;

        self.next = D::step(tree, id);
        self.last = Some(id);
        Ok(entry)
    }

    /// Advances the cursor, returning the key it moved over.
    pub fn next_key<'a, B>(&mut self, backing: &'a B) -> Result<&'a B::Key>
        where B: Backing + ?Sized {
        self.next(backing).map(Entry::key)
    }

    /// Removes the entry most recently returned by `next`.
    ///
    /// The traversal continues undisturbed, including when the removal moved the successor's
    /// entry into the removed node.
    ///
    /// # Errors
    ///
    /// `IllegalState` if `next` has not returned an entry since the last removal;
    /// `ConcurrentModification` as for `next`.
    pub fn remove<B>(&mut self, backing: &mut B) -> Result<Entry<B::Key, B::Value>>
        where B: BackingMut + ?Sized {

        let last = self.last.ok_or(Error::IllegalState)?;
        let tree = backing.tree_mut();
        self.check(tree)?;

        let (entry, moved) = tree.delete(last);

        // `last` now holds what `moved` held.
        if let Some(moved) = moved {
            if self.next == Some(moved) { self.next = Some(last); }
            if self.fence == Some(moved) { self.fence = Some(last); }
        }

        self.last = None;
        self.expected = tree.mod_count();
        Ok(entry)
    }

    /// Replaces the value of the entry most recently returned by `next`, returning the old
    /// value. This is not a structural change.
    ///
    /// # Errors
    ///
    /// As for `remove`. After a successful call, neither `remove` nor `set_value` may be called
    /// again until `next` returns another entry.
    pub fn set_value<B>(&mut self, backing: &mut B, value: B::Value) -> Result<B::Value>
        where B: BackingMut + ?Sized {

        let last = self.last.ok_or(Error::IllegalState)?;
        let tree = backing.tree_mut();
        self.check(tree)?;

        let slot = tree.value_mut(last).ok_or(Error::IllegalState)?;
        self.last = None;
        Ok(mem::replace(slot, value))
    }
}

impl<D> Clone for Cursor<D> {
    fn clone(&self) -> Self {
        Cursor { next: self.next, last: self.last, fence: self.fence, expected: self.expected,
                 _dir: PhantomData }
    }
}

impl<D> fmt::Debug for Cursor<D> where D: Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("ascending", &D::ascending())
            .field("next", &self.next)
            .field("last", &self.last)
            .field("fence", &self.fence)
            .field("expected", &self.expected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::view::Descending;

    fn tree(keys: &[u32]) -> RedBlackTree<u32, char> {
        let mut tree = RedBlackTree::new();
        for &key in keys { tree.insert(key, 'x'); }
        tree
    }

    fn full<D: Direction>(tree: &RedBlackTree<u32, char>) -> Cursor<D> {
        let first = if D::ascending() { tree.first_node() } else { tree.last_node() };
        Cursor::new(tree, first, None)
    }

    #[test]
    fn exhausted_cursor_reports_no_such_element() {
        let tree = tree(&[1]);
        let mut cursor = full::<Ascending>(&tree);

        assert_eq!(cursor.next_key(&tree), Ok(&1));
        assert!(!cursor.has_next());
        assert_eq!(cursor.next_key(&tree), Err(Error::NoSuchElement));
    }

    #[test]
    fn remove_requires_a_fresh_next() {
        let mut tree = tree(&[1, 2]);
        let mut cursor = full::<Ascending>(&tree);

        assert_eq!(cursor.remove(&mut tree), Err(Error::IllegalState));
        cursor.next(&tree).unwrap();
        assert_eq!(cursor.remove(&mut tree).map(|e| *e.key()), Ok(1));
        assert_eq!(cursor.remove(&mut tree), Err(Error::IllegalState));
        assert_eq!(cursor.set_value(&mut tree, 'y'), Err(Error::IllegalState));
    }

    #[test]
    fn set_value_is_not_structural() {
        let mut tree = tree(&[1, 2, 3]);
        let mut cursor = full::<Ascending>(&tree);

        cursor.next(&tree).unwrap();
        assert_eq!(cursor.set_value(&mut tree, 'y'), Ok('x'));
        assert_eq!(cursor.next(&tree).map(|e| *e.key()), Ok(2));
        assert_eq!(tree.entry(tree.first_node().unwrap()).map(|e| *e.value()), Some('y'));
    }

    #[test]
    fn set_value_requires_a_fresh_next() {
        let mut tree = tree(&[1, 2]);
        let mut cursor = full::<Ascending>(&tree);

        cursor.next(&tree).unwrap();
        assert_eq!(cursor.set_value(&mut tree, 'a'), Ok('x'));
        assert_eq!(cursor.set_value(&mut tree, 'b'), Err(Error::IllegalState));
        assert_eq!(cursor.remove(&mut tree).map(|e| *e.key()), Err(Error::IllegalState));

        cursor.next(&tree).unwrap();
        assert_eq!(cursor.set_value(&mut tree, 'c'), Ok('x'));
        let values: String = tree.walk().map(|e| *e.value()).collect();
        assert_eq!(values, "ac");
    }

    #[test]
    fn outside_change_is_detected() {
        let mut tree = tree(&[1, 2, 3]);
        let mut cursor = full::<Ascending>(&tree);

        cursor.next(&tree).unwrap();
        tree.insert(4, 'x');
        assert_eq!(cursor.next(&tree).map(|e| *e.key()),
                   Err(Error::ConcurrentModification { expected: 3, found: 4 }));
    }

    #[test]
    fn descending_removal_of_every_node() {
        let keys: Vec<u32> = (0..64).map(|k| (k * 37) % 64).collect();
        let mut tree = tree(&keys);
        let mut cursor = full::<Descending>(&tree);
        let mut seen = vec![];

        while cursor.has_next() {
            seen.push(*cursor.next_key(&tree).unwrap());
            cursor.remove(&mut tree).unwrap();
        }

        assert_eq!(seen, (0..64).rev().collect::<Vec<_>>());
        assert!(tree.is_empty());
    }

    #[test]
    fn ascending_removal_of_every_other_node() {
        let keys: Vec<u32> = (0..64).map(|k| (k * 37) % 64).collect();
        let mut tree = tree(&keys);
        let mut cursor = full::<Ascending>(&tree);
        let mut seen = vec![];

        while cursor.has_next() {
            let key = *cursor.next_key(&tree).unwrap();
            seen.push(key);
            if key % 2 == 0 { cursor.remove(&mut tree).unwrap(); }
        }

        assert_eq!(seen, (0..64).collect::<Vec<_>>());
        let left: Vec<u32> = tree.walk().map(|e| *e.key()).collect();
        assert_eq!(left, (0..64).filter(|k| k % 2 == 1).collect::<Vec<_>>());
    }
}
