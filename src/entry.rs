//! The key/value pair stored in every tree node.

use std::mem;

/// A key and its associated value, as stored in a tree node.
///
/// The tree orders entries by key alone; the value can change in place without moving the entry.
///
/// Entries handed out by lookups are shared references, so code outside the tree cannot replace
/// a key and corrupt the ordering. The value is reachable mutably only through the owning map
/// (`get_mut`, `replace`, or a cursor's `set_value`).
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry from a key and a value.
    ///
    /// # Examples
    ///
    /// ```
    /// let entry = navtree::Entry::new(1, "a");
    /// assert_eq!(entry.key(), &1);
    /// assert_eq!(entry.value(), &"a");
    /// ```
    pub fn new(key: K, value: V) -> Self { Entry { key, value } }

    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { &self.key }

    /// Returns a reference to the entry's value.
    pub fn value(&self) -> &V { &self.value }

    /// Returns a mutable reference to the entry's value.
    pub fn value_mut(&mut self) -> &mut V { &mut self.value }

    /// Replaces the entry's value, returning the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut entry = navtree::Entry::new(1, "a");
    /// assert_eq!(entry.set_value("b"), "a");
    /// assert_eq!(entry.value(), &"b");
    /// ```
    pub fn set_value(&mut self, value: V) -> V { mem::replace(&mut self.value, value) }

    /// Returns the entry's key and value as a pair of references.
    pub fn pair(&self) -> (&K, &V) { (&self.key, &self.value) }

    /// Returns the entry's key and a mutable reference to its value.
    pub fn pair_mut(&mut self) -> (&K, &mut V) { (&self.key, &mut self.value) }

    /// Consumes the entry, returning its key and value.
    pub fn into_pair(self) -> (K, V) { (self.key, self.value) }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self { Entry::new(key, value) }
}
