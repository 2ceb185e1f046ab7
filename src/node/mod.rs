mod iter;


use std::mem;
use super::entry::Entry;

pub use self::iter::Walk;

/// A handle to a node in a tree's arena.
///
/// Handles stay valid until the node they name is removed. A handle held across a structural
/// change may name a different node afterwards; cursors guard against that with the tree's
/// modification counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    fn index(self) -> usize { self.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub entry: Entry<K, V>,
    pub color: Color,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    // Non-owning; only used for traversal and rebalancing.
    pub parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Node {
            entry: Entry::new(key, value),
            color: Color::Black,
            left: None,
            right: None,
            parent,
        }
    }
}

/// Slot storage for the nodes of one tree. Freed slots are recycled.
#[derive(Clone, Debug)]
pub struct Nodes<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
}

impl<K, V> Nodes<K, V> {
    pub fn new() -> Self { Nodes { slots: Vec::new(), free: Vec::new() } }

    pub fn len(&self) -> usize { self.slots.len() - self.free.len() }

    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    pub fn take(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.slots[id.index()].take().expect("`Nodes::take()` - `id` is vacant");
        self.free.push(id);
        node
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    pub fn try_get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get(&self, id: NodeId) -> &Node<K, V> {
        self.try_get(id).expect("`Nodes::get()` - `id` is vacant")
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.slots[id.index()].as_mut().expect("`Nodes::get_mut()` - `id` is vacant")
    }

    pub fn color_of(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.get(id).color)
    }

    pub fn set_color(&mut self, id: Option<NodeId>, color: Color) {
        if let Some(id) = id { self.get_mut(id).color = color; }
    }

    pub fn parent_of(&self, id: Option<NodeId>) -> Option<NodeId> {
        id.and_then(|id| self.get(id).parent)
    }

    pub fn child_of<D: Dir>(&self, id: Option<NodeId>) -> Option<NodeId> {
        id.and_then(|id| D::child(self.get(id)))
    }

    /// Exchanges the entries of two distinct nodes, leaving their links and colors in place.
    pub fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        debug_assert!(a != b);
        let (lo, hi) = if a.index() < b.index() { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi.index());
        if let (Some(x), Some(y)) = (head[lo.index()].as_mut(), tail[0].as_mut()) {
            mem::swap(&mut x.entry, &mut y.entry);
        }
    }

    /// Returns the node reached by following `D`-ward children from `id` as far as possible.
    pub fn extremum<D: Dir>(&self, mut id: NodeId) -> NodeId {
        while let Some(child) = D::child(self.get(id)) { id = child; }
        id
    }

    /// Returns the in-order neighbor of `id` on its `D` side.
    ///
    /// `Right` yields the successor and `Left` the predecessor.
    pub fn neighbor<D: Dir>(&self, id: NodeId) -> Option<NodeId> {
        if let Some(child) = D::child(self.get(id)) {
            return Some(self.extremum::<D::Opposite>(child));
        }

        let mut child = id;
        let mut parent = self.get(id).parent;

        while let Some(p) = parent {
            if D::child(self.get(p)) != Some(child) { break; }
            child = p;
            parent = self.get(p).parent;
        }

        parent
    }

    pub fn successor(&self, id: NodeId) -> Option<NodeId> { self.neighbor::<Right>(id) }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> { self.neighbor::<Left>(id) }

    /// Returns mutable references to the entries named by `order`, in that order.
    ///
    /// Every id must be distinct; repeated or vacant ids are skipped. This collects a slot table
    /// over the whole arena, free slots included, so each call costs O(capacity) up front.
    pub fn entries_mut<I>(&mut self, order: I) -> Vec<&mut Entry<K, V>>
        where I: IntoIterator<Item = NodeId> {

        let mut by_slot: Vec<Option<&mut Entry<K, V>>> =
            self.slots.iter_mut().map(|slot| slot.as_mut().map(|node| &mut node.entry)).collect();

        order.into_iter()
            .filter_map(|id| by_slot.get_mut(id.index()).and_then(Option::take))
            .collect()
    }

    /// Moves the entries named by `order` out of the arena, in that order, and empties it.
    pub fn drain<I>(&mut self, order: I) -> Vec<Entry<K, V>> where I: IntoIterator<Item = NodeId> {
        let entries = order.into_iter()
            .filter_map(|id| self.slots.get_mut(id.index()).and_then(Option::take))
            .map(|node| node.entry)
            .collect();
        self.clear();
        entries
    }
}

impl<K, V> Default for Nodes<K, V> {
    fn default() -> Self { Nodes::new() }
}

/// A side of a node. Lets symmetric tree algorithms be written once.
pub trait Dir {
    type Opposite: Dir<Opposite = Self>;

    fn left() -> bool;
    fn child<K, V>(node: &Node<K, V>) -> Option<NodeId>;
    fn child_mut<K, V>(node: &mut Node<K, V>) -> &mut Option<NodeId>;
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn left() -> bool { true }
    fn child<K, V>(node: &Node<K, V>) -> Option<NodeId> { node.left }
    fn child_mut<K, V>(node: &mut Node<K, V>) -> &mut Option<NodeId> { &mut node.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn left() -> bool { false }
    fn child<K, V>(node: &Node<K, V>) -> Option<NodeId> { node.right }
    fn child_mut<K, V>(node: &mut Node<K, V>) -> &mut Option<NodeId> { &mut node.right }
}
