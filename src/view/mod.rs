//! Range bounds, traversal directions and the backing abstraction shared by the map and set
//! views.

use compare::Compare;
use std::ops::Bound::{self, Excluded, Included, Unbounded};
use super::error::{Error, Result};
use super::tree::{NodeId, RedBlackTree};

/// Access to the tree beneath a collection or a view.
///
/// Implemented for the trees themselves, for the map and set types, for views, and for shared
/// and exclusive references to any of them. A view is generic over its backing handle, so the
/// same view type serves `&TreeMap` (read-only) and `&mut TreeMap` (read-write).
pub trait Backing {
    type Key;
    type Value;
    type Cmp: Compare<Self::Key>;

    fn tree(&self) -> &RedBlackTree<Self::Key, Self::Value, Self::Cmp>;
}

/// Exclusive access to the tree beneath a collection or a view.
pub trait BackingMut: Backing {
    fn tree_mut(&mut self) -> &mut RedBlackTree<Self::Key, Self::Value, Self::Cmp>;
}

impl<K, V, C> Backing for RedBlackTree<K, V, C> where C: Compare<K> {
    type Key = K;
    type Value = V;
    type Cmp = C;

    fn tree(&self) -> &RedBlackTree<K, V, C> { self }
}

impl<K, V, C> BackingMut for RedBlackTree<K, V, C> where C: Compare<K> {
    fn tree_mut(&mut self) -> &mut RedBlackTree<K, V, C> { self }
}

impl<'a, B> Backing for &'a B where B: Backing + ?Sized {
    type Key = B::Key;
    type Value = B::Value;
    type Cmp = B::Cmp;

    fn tree(&self) -> &RedBlackTree<B::Key, B::Value, B::Cmp> { (**self).tree() }
}

impl<'a, B> Backing for &'a mut B where B: Backing + ?Sized {
    type Key = B::Key;
    type Value = B::Value;
    type Cmp = B::Cmp;

    fn tree(&self) -> &RedBlackTree<B::Key, B::Value, B::Cmp> { (**self).tree() }
}

impl<'a, B> BackingMut for &'a mut B where B: BackingMut + ?Sized {
    fn tree_mut(&mut self) -> &mut RedBlackTree<B::Key, B::Value, B::Cmp> { (**self).tree_mut() }
}

pub(crate) fn bound<K>(key: K, inclusive: bool) -> Bound<K> {
    if inclusive { Included(key) } else { Excluded(key) }
}

/// A key range. Either side may be unbounded, inclusive or exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bounds<K> {
    lo: Bound<K>,
    hi: Bound<K>,
}

impl<K> Bounds<K> {
    /// Creates the range with no bounds at all.
    pub fn unbounded() -> Self { Bounds { lo: Unbounded, hi: Unbounded } }

    /// Creates the range bounded above by `hi` alone.
    pub fn up_to(hi: Bound<K>) -> Self { Bounds { lo: Unbounded, hi } }

    /// Creates the range of keys bounded below by `lo` alone.
    pub fn starting_at(lo: Bound<K>) -> Self { Bounds { lo, hi: Unbounded } }

    /// Creates a range, failing with `InvalidRange` if `lo` is greater than `hi` under `cmp`.
    ///
    /// Equal bounds are accepted whatever their inclusivity; `(k, k)` exclusive on either side
    /// is simply empty.
    pub fn new<C>(lo: Bound<K>, hi: Bound<K>, cmp: &C) -> Result<Self> where C: Compare<K> {
        if let (Included(lo) | Excluded(lo), Included(hi) | Excluded(hi)) = (&lo, &hi) {
            if cmp.compares_gt(lo, hi) { return Err(Error::InvalidRange); }
        }

        Ok(Bounds { lo, hi })
    }

    /// Returns the lower bound.
    pub fn lo(&self) -> Bound<&K> { self.lo.as_ref() }

    /// Returns the upper bound.
    pub fn hi(&self) -> Bound<&K> { self.hi.as_ref() }

    /// Checks if `key` falls below the range.
    pub fn too_low<Q: ?Sized, C>(&self, key: &Q, cmp: &C) -> bool where C: Compare<Q, K> {
        match self.lo {
            Unbounded => false,
            Included(ref lo) => cmp.compares_lt(key, lo),
            Excluded(ref lo) => cmp.compares_le(key, lo),
        }
    }

    /// Checks if `key` falls above the range.
    pub fn too_high<Q: ?Sized, C>(&self, key: &Q, cmp: &C) -> bool where C: Compare<Q, K> {
        match self.hi {
            Unbounded => false,
            Included(ref hi) => cmp.compares_gt(key, hi),
            Excluded(ref hi) => cmp.compares_ge(key, hi),
        }
    }

    /// Checks if `key` lies within the range.
    pub fn contains<Q: ?Sized, C>(&self, key: &Q, cmp: &C) -> bool where C: Compare<Q, K> {
        !self.too_low(key, cmp) && !self.too_high(key, cmp)
    }

    /// Checks if `key` lies within the range with both ends treated as inclusive.
    pub fn contains_closed<Q: ?Sized, C>(&self, key: &Q, cmp: &C) -> bool where C: Compare<Q, K> {
        let above_lo = match self.lo {
            Unbounded => true,
            Included(ref lo) | Excluded(ref lo) => cmp.compares_ge(key, lo),
        };

        let below_hi = match self.hi {
            Unbounded => true,
            Included(ref hi) | Excluded(ref hi) => cmp.compares_le(key, hi),
        };

        above_lo && below_hi
    }

    /// Narrows the range, treating `Unbounded` as "keep the current bound".
    ///
    /// An inclusive bound must lie within the range; an exclusive one may also sit exactly on
    /// either end.
    pub fn narrow<C>(self, lo: Bound<K>, hi: Bound<K>, cmp: &C) -> Result<Self>
        where C: Compare<K> {

        let check = |bound: &Bound<K>| match *bound {
            Unbounded => true,
            Included(ref key) => self.contains(key, cmp),
            Excluded(ref key) => self.contains_closed(key, cmp),
        };

        if !check(&lo) || !check(&hi) {
            tracing::debug!("rejected a sub-range reaching outside its parent range");
            return Err(Error::KeyOutOfRange);
        }

        let lo = match lo { Unbounded => self.lo, bound => bound };
        let hi = match hi { Unbounded => self.hi, bound => bound };
        Bounds::new(lo, hi, cmp)
    }

    fn key<'a, V, C>(tree: &'a RedBlackTree<K, V, C>, id: NodeId) -> &'a K where C: Compare<K> {
        tree.nodes().get(id).entry.key()
    }

    fn below_hi<V, C>(&self, tree: &RedBlackTree<K, V, C>, id: Option<NodeId>) -> Option<NodeId>
        where C: Compare<K> {
        id.filter(|&id| !self.too_high(Self::key(tree, id), tree.cmp()))
    }

    fn above_lo<V, C>(&self, tree: &RedBlackTree<K, V, C>, id: Option<NodeId>) -> Option<NodeId>
        where C: Compare<K> {
        id.filter(|&id| !self.too_low(Self::key(tree, id), tree.cmp()))
    }

    /// Returns the least node in range.
    pub fn abs_lowest<V, C>(&self, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> {
        let id = match self.lo {
            Unbounded => tree.first_node(),
            Included(ref lo) => tree.ceiling_node(lo),
            Excluded(ref lo) => tree.higher_node(lo),
        };
        self.below_hi(tree, id)
    }

    /// Returns the greatest node in range.
    pub fn abs_highest<V, C>(&self, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> {
        let id = match self.hi {
            Unbounded => tree.last_node(),
            Included(ref hi) => tree.floor_node(hi),
            Excluded(ref hi) => tree.lower_node(hi),
        };
        self.above_lo(tree, id)
    }

    /// Returns the least node in range whose key is greater than or equal to `key`.
    pub fn abs_ceiling<Q: ?Sized, V, C>(&self, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> {
        if self.too_low(key, tree.cmp()) { return self.abs_lowest(tree); }
        self.below_hi(tree, tree.ceiling_node(key))
    }

    /// Returns the least node in range whose key is strictly greater than `key`.
    pub fn abs_higher<Q: ?Sized, V, C>(&self, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> {
        if self.too_low(key, tree.cmp()) { return self.abs_lowest(tree); }
        self.below_hi(tree, tree.higher_node(key))
    }

    /// Returns the greatest node in range whose key is less than or equal to `key`.
    pub fn abs_floor<Q: ?Sized, V, C>(&self, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> {
        if self.too_high(key, tree.cmp()) { return self.abs_highest(tree); }
        self.above_lo(tree, tree.floor_node(key))
    }

    /// Returns the greatest node in range whose key is strictly less than `key`.
    pub fn abs_lower<Q: ?Sized, V, C>(&self, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> {
        if self.too_high(key, tree.cmp()) { return self.abs_highest(tree); }
        self.above_lo(tree, tree.lower_node(key))
    }

    /// Returns the first node past the upper end of the range, where an ascending traversal
    /// stops.
    pub fn abs_high_fence<V, C>(&self, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> {
        match self.hi {
            Unbounded => None,
            Included(ref hi) => tree.higher_node(hi),
            Excluded(ref hi) => tree.ceiling_node(hi),
        }
    }

    /// Returns the first node past the lower end of the range, where a descending traversal
    /// stops.
    pub fn abs_low_fence<V, C>(&self, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> {
        match self.lo {
            Unbounded => None,
            Included(ref lo) => tree.lower_node(lo),
            Excluded(ref lo) => tree.floor_node(lo),
        }
    }
}

impl<K> Default for Bounds<K> {
    fn default() -> Self { Bounds::unbounded() }
}

/// A traversal order over a bounded range.
///
/// The navigation primitives are expressed relative to the direction: for a `Descending` view
/// "lowest" is the greatest key in range and "ceiling" is the absolute floor.
pub trait Direction {
    type Reverse: Direction<Reverse = Self>;

    fn ascending() -> bool;

    fn lowest<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K>;

    fn highest<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K>;

    fn ceiling<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K>;

    fn higher<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K>;

    fn floor<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K>;

    fn lower<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K>;

    /// Returns the node at which a traversal in this direction leaves the range.
    fn fence<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K>;

    /// Returns the node after `id` in this direction.
    fn step<K, V, C>(tree: &RedBlackTree<K, V, C>, id: NodeId) -> Option<NodeId>
        where C: Compare<K>;

    /// Orders a `(from, to)` pair given in traversal order as `(lo, hi)` in key order.
    fn orient<T>(from: T, to: T) -> (T, T);
}

/// Traversal from the least key to the greatest.
#[derive(Clone, Copy, Debug)]
pub enum Ascending {}

/// Traversal from the greatest key to the least.
#[derive(Clone, Copy, Debug)]
pub enum Descending {}

impl Direction for Ascending {
    type Reverse = Descending;

    fn ascending() -> bool { true }

    fn lowest<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> { bounds.abs_lowest(tree) }

    fn highest<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> { bounds.abs_highest(tree) }

    fn ceiling<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> { bounds.abs_ceiling(tree, key) }

    fn higher<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> { bounds.abs_higher(tree, key) }

    fn floor<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> { bounds.abs_floor(tree, key) }

    fn lower<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> { bounds.abs_lower(tree, key) }

    fn fence<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> { bounds.abs_high_fence(tree) }

    fn step<K, V, C>(tree: &RedBlackTree<K, V, C>, id: NodeId) -> Option<NodeId>
        where C: Compare<K> { tree.successor(id) }

    fn orient<T>(from: T, to: T) -> (T, T) { (from, to) }
}

impl Direction for Descending {
    type Reverse = Ascending;

    fn ascending() -> bool { false }

    fn lowest<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> { bounds.abs_highest(tree) }

    fn highest<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> { bounds.abs_lowest(tree) }

    fn ceiling<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> { bounds.abs_floor(tree, key) }

    fn higher<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> { bounds.abs_lower(tree, key) }

    fn floor<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> { bounds.abs_ceiling(tree, key) }

    fn lower<Q: ?Sized, K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>, key: &Q)
        -> Option<NodeId> where C: Compare<K> + Compare<Q, K> { bounds.abs_higher(tree, key) }

    fn fence<K, V, C>(bounds: &Bounds<K>, tree: &RedBlackTree<K, V, C>) -> Option<NodeId>
        where C: Compare<K> { bounds.abs_low_fence(tree) }

    fn step<K, V, C>(tree: &RedBlackTree<K, V, C>, id: NodeId) -> Option<NodeId>
        where C: Compare<K> { tree.predecessor(id) }

    fn orient<T>(from: T, to: T) -> (T, T) { (to, from) }
}

#[cfg(test)]
mod tests {
    use compare::natural;
    use std::ops::Bound::*;
    use super::*;

    fn tree() -> RedBlackTree<u32, ()> {
        let mut tree = RedBlackTree::new();
        for key in [10, 20, 30, 40, 50] { tree.insert(key, ()); }
        tree
    }

    fn key(tree: &RedBlackTree<u32, ()>, id: Option<NodeId>) -> Option<u32> {
        id.and_then(|id| tree.entry(id)).map(|e| *e.key())
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(Bounds::new(Included(5), Included(3), &natural()), Err(Error::InvalidRange));
        assert!(Bounds::new(Excluded(5), Excluded(5), &natural()).is_ok());
        assert!(Bounds::new(Unbounded, Included(3), &natural()).is_ok());
    }

    #[test]
    fn membership() {
        let cmp = natural();
        let bounds = Bounds::new(Included(10), Excluded(20), &cmp).unwrap();

        assert!(bounds.too_low(&9, &cmp));
        assert!(!bounds.too_low(&10, &cmp));
        assert!(bounds.too_high(&20, &cmp));
        assert!(bounds.contains(&19, &cmp));
        assert!(!bounds.contains(&20, &cmp));
        assert!(bounds.contains_closed(&20, &cmp));
        assert!(!bounds.contains_closed(&21, &cmp));
    }

    #[test]
    fn extremes_respect_the_opposite_bound() {
        let tree = tree();
        let cmp = natural();

        let bounds = Bounds::new(Excluded(20), Excluded(30), &cmp).unwrap();
        assert_eq!(key(&tree, bounds.abs_lowest(&tree)), None);
        assert_eq!(key(&tree, bounds.abs_highest(&tree)), None);

        let bounds = Bounds::new(Excluded(10), Included(40), &cmp).unwrap();
        assert_eq!(key(&tree, bounds.abs_lowest(&tree)), Some(20));
        assert_eq!(key(&tree, bounds.abs_highest(&tree)), Some(40));
    }

    #[test]
    fn relative_navigation() {
        let tree = tree();
        let bounds = Bounds::new(Included(20), Included(40), &natural()).unwrap();

        assert_eq!(key(&tree, bounds.abs_ceiling(&tree, &5)), Some(20));
        assert_eq!(key(&tree, bounds.abs_higher(&tree, &30)), Some(40));
        assert_eq!(key(&tree, bounds.abs_higher(&tree, &40)), None);
        assert_eq!(key(&tree, bounds.abs_floor(&tree, &45)), Some(40));
        assert_eq!(key(&tree, bounds.abs_floor(&tree, &15)), None);
        assert_eq!(key(&tree, bounds.abs_lower(&tree, &30)), Some(20));
        assert_eq!(key(&tree, bounds.abs_lower(&tree, &99)), Some(40));

        assert_eq!(key(&tree, Descending::ceiling(&bounds, &tree, &35)), Some(30));
        assert_eq!(key(&tree, Descending::higher(&bounds, &tree, &30)), Some(20));
        assert_eq!(key(&tree, Descending::lowest(&bounds, &tree)), Some(40));
    }

    #[test]
    fn fences() {
        let tree = tree();
        let cmp = natural();

        let bounds = Bounds::new(Included(20), Included(40), &cmp).unwrap();
        assert_eq!(key(&tree, bounds.abs_high_fence(&tree)), Some(50));
        assert_eq!(key(&tree, bounds.abs_low_fence(&tree)), Some(10));

        let bounds = Bounds::new(Excluded(20), Excluded(40), &cmp).unwrap();
        assert_eq!(key(&tree, bounds.abs_high_fence(&tree)), Some(40));
        assert_eq!(key(&tree, bounds.abs_low_fence(&tree)), Some(20));

        assert_eq!(Bounds::unbounded().abs_high_fence(&tree), None);
    }

    #[test]
    fn narrowing() {
        let cmp = natural();
        let bounds = Bounds::new(Included(10), Excluded(20), &cmp).unwrap();

        let narrowed = bounds.clone().narrow(Excluded(12), Unbounded, &cmp).unwrap();
        assert_eq!((narrowed.lo(), narrowed.hi()), (Excluded(&12), Excluded(&20)));

        assert!(bounds.clone().narrow(Unbounded, Excluded(20), &cmp).is_ok());
        assert_eq!(bounds.clone().narrow(Unbounded, Included(20), &cmp), Err(Error::KeyOutOfRange));
        assert_eq!(bounds.clone().narrow(Included(5), Unbounded, &cmp), Err(Error::KeyOutOfRange));
        assert_eq!(bounds.narrow(Included(15), Included(12), &cmp), Err(Error::InvalidRange));
    }
}
