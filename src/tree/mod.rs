//! A red-black tree over an arena of nodes.
//!
//! This is the engine beneath [`TreeMap`](../map/struct.TreeMap.html) and
//! [`TreeSet`](../set/struct.TreeSet.html). It is exposed for callers that want node-level
//! access (for instance to hold a [`NodeId`] between lookups), but most code should use the
//! map and set façades.

#[cfg(test)]
mod test;

use compare::{Compare, Natural};
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use super::entry::Entry;
use super::node::{Color, Dir, Left, Node, Nodes, Right, Walk};

pub use super::node::NodeId;

/// The outcome of [`RedBlackTree::insert`].
#[derive(Debug, PartialEq, Eq)]
pub enum Inserted<K, V> {
    /// A new node was created.
    Vacant(NodeId),
    /// A node with an equal key already exists. The tree was not touched; the rejected key and
    /// value are handed back.
    Occupied(NodeId, K, V),
}

/// A self-balancing binary search tree using the red-black scheme.
///
/// Keys are unique under the tree's comparator. Every insertion and deletion increments a
/// modification counter (once per call, however many rotations it takes) that cursors use to
/// detect structural changes made behind their backs.
#[derive(Clone)]
pub struct RedBlackTree<K, V, C = Natural<K>> where C: Compare<K> {
    nodes: Nodes<K, V>,
    root: Option<NodeId>,
    len: usize,
    mod_count: usize,
    cmp: C,
}

impl<K, V> RedBlackTree<K, V> where K: Ord {
    /// Creates an empty tree ordered according to the natural order of its keys.
    pub fn new() -> Self { RedBlackTree::with_cmp(compare::natural()) }
}

impl<K, V, C> RedBlackTree<K, V, C> where C: Compare<K> {
    /// Creates an empty tree ordered according to the given comparator.
    pub fn with_cmp(cmp: C) -> Self {
        RedBlackTree { nodes: Nodes::new(), root: None, len: 0, mod_count: 0, cmp }
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize { self.len }

    /// Checks if the tree is empty.
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of structural modifications made to the tree so far.
    pub fn mod_count(&self) -> usize { self.mod_count }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<NodeId> { self.root }

    pub(crate) fn nodes(&self) -> &Nodes<K, V> { &self.nodes }

    pub(crate) fn nodes_mut(&mut self) -> &mut Nodes<K, V> { &mut self.nodes }

    /// Returns the entry stored at the given node, or `None` if the node does not exist.
    pub fn entry(&self, id: NodeId) -> Option<&Entry<K, V>> {
        self.nodes.try_get(id).map(|node| &node.entry)
    }

    /// Returns a mutable reference to the value stored at the given node.
    ///
    /// Changing a value is not a structural modification.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        if self.nodes.try_get(id).is_none() { return None; }
        Some(self.nodes.get_mut(id).entry.value_mut())
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.mod_count += 1;
    }

    /// Returns the node holding the least key.
    pub fn first_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.nodes.extremum::<Left>(root))
    }

    /// Returns the node holding the greatest key.
    pub fn last_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.nodes.extremum::<Right>(root))
    }

    /// Returns the in-order successor of the given node.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> { self.nodes.successor(id) }

    /// Returns the in-order predecessor of the given node.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> { self.nodes.predecessor(id) }

    /// Returns the node whose key is equal to the given key.
    pub fn get_node<Q: ?Sized>(&self, key: &Q) -> Option<NodeId> where C: Compare<Q, K> {
        let mut link = self.root;

        while let Some(id) = link {
            let node = self.nodes.get(id);
            link = match self.cmp.compare(key, node.entry.key()) {
                Equal => return Some(id),
                Less => node.left,
                Greater => node.right,
            };
        }

        None
    }

    /// Returns the node holding the least key greater than or equal to the given key.
    pub fn ceiling_node<Q: ?Sized>(&self, key: &Q) -> Option<NodeId> where C: Compare<Q, K> {
        self.closest::<Right, Q>(key, true)
    }

    /// Returns the node holding the least key strictly greater than the given key.
    pub fn higher_node<Q: ?Sized>(&self, key: &Q) -> Option<NodeId> where C: Compare<Q, K> {
        self.closest::<Right, Q>(key, false)
    }

    /// Returns the node holding the greatest key less than or equal to the given key.
    pub fn floor_node<Q: ?Sized>(&self, key: &Q) -> Option<NodeId> where C: Compare<Q, K> {
        self.closest::<Left, Q>(key, true)
    }

    /// Returns the node holding the greatest key strictly less than the given key.
    pub fn lower_node<Q: ?Sized>(&self, key: &Q) -> Option<NodeId> where C: Compare<Q, K> {
        self.closest::<Left, Q>(key, false)
    }

    // Descends toward `key`. When the descent runs off the tree on the `D` side, the answer is
    // the in-order `D` neighbor of the last node visited, found by climbing parent links.
    fn closest<D: Dir, Q: ?Sized>(&self, key: &Q, inclusive: bool) -> Option<NodeId>
        where C: Compare<Q, K> {

        let mut id = self.root?;

        loop {
            let node = self.nodes.get(id);

            let toward = match self.cmp.compare(key, node.entry.key()) {
                Equal if inclusive => return Some(id),
                Equal => true,
                order => D::left() == (order == Less),
            };

            if toward {
                match D::child(node) {
                    Some(child) => id = child,
                    None => return self.nodes.neighbor::<D>(id),
                }
            } else {
                match <D::Opposite as Dir>::child(node) {
                    Some(child) => id = child,
                    None => return Some(id),
                }
            }
        }
    }

    /// Inserts a key and value unless an equal key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use navtree::tree::{Inserted, RedBlackTree};
    ///
    /// let mut tree = RedBlackTree::new();
    /// let id = match tree.insert(1, "a") {
    ///     Inserted::Vacant(id) => id,
    ///     Inserted::Occupied(..) => unreachable!(),
    /// };
    ///
    /// assert_eq!(tree.insert(1, "b"), Inserted::Occupied(id, 1, "b"));
    /// assert_eq!(tree.entry(id).map(|e| *e.value()), Some("a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Inserted<K, V> {
        let mut id = match self.root {
            Some(root) => root,
            None => {
                let id = self.nodes.alloc(Node::new(key, value, None));
                self.root = Some(id);
                self.len = 1;
                self.mod_count += 1;
                return Inserted::Vacant(id);
            }
        };

        let order = loop {
            let node = self.nodes.get(id);
            let order = self.cmp.compare(&key, node.entry.key());

            let child = match order {
                Equal => return Inserted::Occupied(id, key, value),
                Less => node.left,
                Greater => node.right,
            };

            match child {
                Some(child) => id = child,
                None => break order,
            }
        };

        let parent = id;
        let id = self.nodes.alloc(Node::new(key, value, Some(parent)));

        if order == Less {
            self.nodes.get_mut(parent).left = Some(id);
        } else {
            self.nodes.get_mut(parent).right = Some(id);
        }

        self.fix_after_insertion(id);
        self.len += 1;
        self.mod_count += 1;
        Inserted::Vacant(id)
    }

    /// Removes the node whose key is equal to the given key, returning its entry.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<Entry<K, V>> where C: Compare<Q, K> {
        let id = self.get_node(key)?;
        Some(self.delete(id).0)
    }

    /// Removes the entry stored at the given node and rebalances.
    ///
    /// If the node has two children, its in-order successor's entry is moved into it and the
    /// successor's node is the one unlinked. In that case the second element of the result is
    /// the successor's former id, which no longer exists; the entry it held now lives at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a node of this tree.
    pub fn delete(&mut self, id: NodeId) -> (Entry<K, V>, Option<NodeId>) {
        let mut target = id;
        let mut moved = None;

        let node = self.nodes.get(target);
        if let (Some(_), Some(right)) = (node.left, node.right) {
            let successor = self.nodes.extremum::<Left>(right);
            self.nodes.swap_entries(target, successor);
            moved = Some(successor);
            target = successor;
        }

        let node = self.nodes.get(target);
        let replacement = node.left.or(node.right);
        let parent = node.parent;
        let color = node.color;

        match replacement {
            Some(replacement) => {
                self.nodes.get_mut(replacement).parent = parent;
                self.replace_child(parent, target, Some(replacement));

                let node = self.nodes.get_mut(target);
                node.left = None;
                node.right = None;
                node.parent = None;

                if color == Color::Black { self.fix_after_deletion(replacement); }
            }
            None if parent.is_none() => self.root = None,
            None => {
                // The node stands in for its own (absent) replacement during the fixup.
                if color == Color::Black { self.fix_after_deletion(target); }

                if let Some(parent) = self.nodes.get(target).parent {
                    let parent = self.nodes.get_mut(parent);
                    if parent.left == Some(target) {
                        parent.left = None;
                    } else if parent.right == Some(target) {
                        parent.right = None;
                    }
                    self.nodes.get_mut(target).parent = None;
                }
            }
        }

        let node = self.nodes.take(target);
        self.len -= 1;
        self.mod_count += 1;
        (node.entry, moved)
    }

    /// Removes every entry for which `f` returns `false`, visiting entries in ascending order.
    pub fn retain<F>(&mut self, mut f: F) where F: FnMut(&K, &mut V) -> bool {
        let mut next = self.first_node();

        while let Some(id) = next {
            let keep = {
                let (key, value) = self.nodes.get_mut(id).entry.pair_mut();
                f(key, value)
            };

            next = self.successor(id);

            if !keep {
                let (_, moved) = self.delete(id);
                if moved.is_some() && moved == next { next = Some(id); }
            }
        }
    }

    /// Returns an ascending walk over every entry.
    pub(crate) fn walk(&self) -> Walk<K, V> {
        Walk::exact(&self.nodes, self.first_node(), self.last_node(), true, self.len)
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.nodes.get_mut(parent);
                if parent.left == Some(old) { parent.left = new; } else { parent.right = new; }
            }
        }
    }

    // Moves `pivot` down to its `D` side; its child on the opposite side takes its place.
    fn rotate<D: Dir>(&mut self, pivot: NodeId) {
        let riser = match <D::Opposite as Dir>::child(self.nodes.get(pivot)) {
            Some(riser) => riser,
            None => return,
        };

        tracing::trace!(?pivot, ?riser, left = D::left(), "rotate");

        let inner = D::child(self.nodes.get(riser));
        *<D::Opposite as Dir>::child_mut(self.nodes.get_mut(pivot)) = inner;
        if let Some(inner) = inner { self.nodes.get_mut(inner).parent = Some(pivot); }

        let parent = self.nodes.get(pivot).parent;
        self.nodes.get_mut(riser).parent = parent;
        self.replace_child(parent, pivot, Some(riser));

        *D::child_mut(self.nodes.get_mut(riser)) = Some(pivot);
        self.nodes.get_mut(pivot).parent = Some(riser);
    }

    fn fix_after_insertion(&mut self, mut x: NodeId) {
        self.nodes.get_mut(x).color = Color::Red;

        while Some(x) != self.root {
            let parent = match self.nodes.get(x).parent {
                Some(parent) if self.nodes.get(parent).color == Color::Red => parent,
                _ => break,
            };

            // A red node is never the root, so the grandparent exists.
            let grandparent = match self.nodes.get(parent).parent {
                Some(grandparent) => grandparent,
                None => break,
            };

            x = if self.nodes.get(grandparent).left == Some(parent) {
                self.fix_insertion::<Left>(x, grandparent)
            } else {
                self.fix_insertion::<Right>(x, grandparent)
            };
        }

        if let Some(root) = self.root { self.nodes.get_mut(root).color = Color::Black; }
    }

    // `D` is the side of `grandparent` that holds `x`'s parent. Returns the node to continue
    // the fixup from.
    fn fix_insertion<D: Dir>(&mut self, mut x: NodeId, grandparent: NodeId) -> NodeId {
        let uncle = <D::Opposite as Dir>::child(self.nodes.get(grandparent));

        if self.nodes.color_of(uncle) == Color::Red {
            tracing::trace!(?x, "recolor parent, uncle and grandparent");
            let parent = self.nodes.get(x).parent;
            self.nodes.set_color(parent, Color::Black);
            self.nodes.set_color(uncle, Color::Black);
            self.nodes.set_color(Some(grandparent), Color::Red);
            return grandparent;
        }

        let parent = self.nodes.get(x).parent;
        if self.nodes.child_of::<D::Opposite>(parent) == Some(x) {
            if let Some(parent) = parent {
                x = parent;
                self.rotate::<D>(x);
            }
        }

        let parent = self.nodes.get(x).parent;
        let grandparent = self.nodes.parent_of(parent);
        self.nodes.set_color(parent, Color::Black);
        self.nodes.set_color(grandparent, Color::Red);
        if let Some(grandparent) = grandparent { self.rotate::<D::Opposite>(grandparent); }
        x
    }

    fn fix_after_deletion(&mut self, mut x: NodeId) {
        while Some(x) != self.root && self.nodes.get(x).color == Color::Black {
            let parent = self.nodes.get(x).parent;
            x = if self.nodes.child_of::<Left>(parent) == Some(x) {
                self.fix_deletion::<Left>(x)
            } else {
                self.fix_deletion::<Right>(x)
            };
        }

        self.nodes.set_color(Some(x), Color::Black);
    }

    // `x` carries an extra black and hangs from the `D` side of its parent. Returns the node to
    // continue the fixup from.
    fn fix_deletion<D: Dir>(&mut self, x: NodeId) -> NodeId {
        let parent = match self.nodes.get(x).parent {
            Some(parent) => parent,
            None => return x,
        };

        let mut sibling = <D::Opposite as Dir>::child(self.nodes.get(parent));

        if self.nodes.color_of(sibling) == Color::Red {
            tracing::trace!(?x, "red sibling");
            self.nodes.set_color(sibling, Color::Black);
            self.nodes.set_color(Some(parent), Color::Red);
            self.rotate::<D>(parent);
            sibling = <D::Opposite as Dir>::child(self.nodes.get(parent));
        }

        let near = self.nodes.child_of::<D>(sibling);
        let far = self.nodes.child_of::<D::Opposite>(sibling);

        if self.nodes.color_of(near) == Color::Black && self.nodes.color_of(far) == Color::Black {
            tracing::trace!(?x, "black sibling with black children");
            self.nodes.set_color(sibling, Color::Red);
            return parent;
        }

        if self.nodes.color_of(far) == Color::Black {
            self.nodes.set_color(near, Color::Black);
            self.nodes.set_color(sibling, Color::Red);
            if let Some(sibling) = sibling { self.rotate::<D::Opposite>(sibling); }
            sibling = <D::Opposite as Dir>::child(self.nodes.get(parent));
        }

        tracing::trace!(?x, "black sibling with red child");
        let parent_color = self.nodes.get(parent).color;
        self.nodes.set_color(sibling, parent_color);
        self.nodes.set_color(Some(parent), Color::Black);
        let far = self.nodes.child_of::<D::Opposite>(sibling);
        self.nodes.set_color(far, Color::Black);
        self.rotate::<D>(parent);
        self.root.unwrap_or(x)
    }
}

impl<K, V, C> Debug for RedBlackTree<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.walk().map(Entry::pair)).finish()
    }
}

impl<K, V, C> Default for RedBlackTree<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { RedBlackTree::with_cmp(Default::default()) }
}
