//! External iteration and index access for collections.

use std::ops::Index;

use super::{Collection, IntoKey, Key, Value};

/// An owning, single-pass iterator over a snapshot of a collection.
///
/// Created by [`Collection::get_iterator`]. The snapshot is taken when the
/// iterator is requested, so later changes to the collection are not seen.
///
/// ```
/// use collectia::{Collection, Value};
///
/// let mut numbers = Collection::new();
/// numbers.add(1).add(2);
///
/// let snapshot = numbers.get_iterator();
/// numbers.add(3);
///
/// let seen: Vec<Value> = snapshot.map(|(_, value)| value).collect();
/// assert_eq!(seen, vec![Value::Int(1), Value::Int(2)]);
/// assert_eq!(numbers.get_iterator().count(), 3);
/// ```
#[derive(Debug)]
pub struct Snapshot {
    inner: indexmap::map::IntoIter<Key, Value>,
}

impl Iterator for Snapshot {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Snapshot {}

impl Collection {
    /// Returns an iterator over a copy of the current entries.
    ///
    /// May be called any number of times; each call reflects the contents at
    /// that moment.
    pub fn get_iterator(&self) -> Snapshot {
        Snapshot {
            inner: self.entries.clone().into_iter(),
        }
    }

    /// Returns an iterator over the entries in order (a live borrow)
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// Returns an iterator over the keys in order
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over the values in order
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Returns a mutable iterator over the values in order
    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, Key, Value> {
        self.entries.values_mut()
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Read-only bracket access.
///
/// There is no `IndexMut`, so bracket assignment does not compile. Writes go
/// through [`Collection::set`] or [`Collection::offset_set`], which report an
/// invalid key as an error.
///
/// ```compile_fail
/// let mut collection = collectia::Collection::new();
/// collection[0] = collectia::Value::from(1);
/// ```
impl<K: IntoKey> Index<K> for Collection {
    type Output = Value;

    /// Returns the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is null, not a scalar, or absent. Use
    /// [`Collection::get`] for a fallible lookup.
    fn index(&self, key: K) -> &Value {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
