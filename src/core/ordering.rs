use serde::{Serialize, Serializer};

/// Vec kept sorted by a key extracted from each item. Items with equal keys
/// stay in insertion order.
#[derive(Clone)]
pub struct OrderedSet<T, K: Ord> {
    items: Vec<T>,
    key: fn(&T) -> K,
}

impl<T, K: Ord> OrderedSet<T, K> {
    pub fn new(key: fn(&T) -> K) -> Self {
        Self {
            items: Vec::new(),
            key,
        }
    }

    /// Inserts after every item whose key is less than or equal to the new one.
    pub fn insert(&mut self, item: T) {
        let k = (self.key)(&item);
        let idx = self.items.partition_point(|existing| (self.key)(existing) <= k);
        self.items.insert(idx, item);
    }

    /// Inserts only if no item with an equal key exists. Returns whether the
    /// item was added.
    pub fn insert_unique(&mut self, item: T) -> bool {
        let k = (self.key)(&item);
        match self.items.binary_search_by(|existing| (self.key)(existing).cmp(&k)) {
            Ok(_) => false,
            Err(idx) => {
                self.items.insert(idx, item);
                true
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: std::fmt::Debug, K: Ord> std::fmt::Debug for OrderedSet<T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: Serialize, K: Ord> Serialize for OrderedSet<T, K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a, T, K: Ord> IntoIterator for &'a OrderedSet<T, K> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
