use super::{NodeId, Nodes};
use super::super::entry::Entry;

/// A double-ended in-order walk over the closed node range `[front, back]`.
///
/// `front` and `back` are either both present or both absent. When `ascending` is `false` the
/// walk runs from the greatest node to the least.
pub struct Walk<'a, K: 'a, V: 'a> {
    nodes: &'a Nodes<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    ascending: bool,
    len: Option<usize>,
}

impl<'a, K, V> Walk<'a, K, V> {
    /// Creates a walk whose remaining length is unknown.
    pub fn new(nodes: &'a Nodes<K, V>, front: Option<NodeId>, back: Option<NodeId>,
               ascending: bool) -> Self {
        debug_assert_eq!(front.is_some(), back.is_some());
        Walk { nodes, front, back, ascending, len: None }
    }

    /// Creates a walk over exactly `len` nodes.
    pub fn exact(nodes: &'a Nodes<K, V>, front: Option<NodeId>, back: Option<NodeId>,
                 ascending: bool, len: usize) -> Self {
        Walk { len: Some(len), ..Walk::new(nodes, front, back, ascending) }
    }

    fn advance(&mut self, step: Option<NodeId>, front: bool) {
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else if front {
            self.front = step;
        } else {
            self.back = step;
        }

        if let Some(ref mut len) = self.len { *len -= 1; }
    }

    pub fn next_id(&mut self) -> Option<NodeId> {
        let id = self.front?;
        let step = if self.ascending { self.nodes.successor(id) } else { self.nodes.predecessor(id) };
        self.advance(step, true);
        Some(id)
    }

    pub fn next_back_id(&mut self) -> Option<NodeId> {
        let id = self.back?;
        let step = if self.ascending { self.nodes.predecessor(id) } else { self.nodes.successor(id) };
        self.advance(step, false);
        Some(id)
    }

    pub fn size_hint(&self) -> (usize, Option<usize>) {
        match self.len {
            Some(len) => (len, Some(len)),
            None if self.front.is_none() => (0, Some(0)),
            None => (1, Some(self.nodes.len())),
        }
    }

    /// Consumes the walk, returning the remaining node ids in walk order.
    pub fn into_ids(mut self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.size_hint().0);
        while let Some(id) = self.next_id() { ids.push(id); }
        ids
    }
}

impl<'a, K, V> Clone for Walk<'a, K, V> {
    fn clone(&self) -> Self {
        Walk { nodes: self.nodes, front: self.front, back: self.back, ascending: self.ascending,
               len: self.len }
    }
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<&'a Entry<K, V>> {
        let nodes = self.nodes;
        self.next_id().map(|id| &nodes.get(id).entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { Walk::size_hint(self) }
}

impl<'a, K, V> DoubleEndedIterator for Walk<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a Entry<K, V>> {
        let nodes = self.nodes;
        self.next_back_id().map(|id| &nodes.get(id).entry)
    }
}
