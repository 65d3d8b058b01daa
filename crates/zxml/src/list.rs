//! Append-only growable sequence backing node children and attributes

use std::slice;

/// Append-only list with index-stable entries.
///
/// Starts with room for a single item and doubles its allocation whenever a
/// push finds it full. Items are never removed or reordered, so an index
/// handed out once stays valid for the lifetime of the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowList<T> {
    items: Vec<T>,
}

impl<T> GrowList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(1),
        }
    }

    /// Append an item, doubling the allocation when full
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            let additional = self.items.capacity().max(1);
            self.items.reserve_exact(additional);
        }
        self.items.push(item);
    }

    /// Item at `index`, or `None` unless `index < len()`
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.items.len() {
            self.items.get(index)
        } else {
            None
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Give up the items in order, consuming the list
    pub(crate) fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for GrowList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a GrowList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
