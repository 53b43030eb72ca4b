//! Ordered, uniquely keyed collections.
//!
//! A [`Collection`] behaves like a hybrid of a list and a map: every entry has
//! a unique [`Key`] (an explicit string or integer, or an auto-assigned index)
//! and entries keep their insertion order. On top of the basic CRUD surface it
//! offers functional operations (map, filter, partition, slice, chunk, sort),
//! a recursive merge with per-key-type conflict rules, and round-trippable
//! serialization of its array form.
//!
//! # Core Types
//!
//! - [`Collection`] - The container itself
//! - [`CollectionKind`] - Plain or recursive insertion behavior
//! - [`Key`] - Integer index or string name
//! - [`Value`] - Scalars, plain [`Array`]s and nested collections
//! - [`Array`] - Plain ordered map used as input and as flattened output
//!
//! # Usage
//!
//! ```
//! use collectia::{Collection, Key, array};
//!
//! let mut fruits = Collection::new();
//! fruits.add("apple").add("banana");
//! fruits.set("favorite", "cherry").unwrap();
//!
//! assert_eq!(fruits.len(), 3);
//! assert_eq!(fruits.get(1).unwrap(), &"banana");
//! assert_eq!(fruits.index_of("cherry"), Some(&Key::from("favorite")));
//!
//! // Integer keys append on merge, string keys overwrite
//! fruits.merge(array!{0u64 => "date", "favorite" => "elderberry"}).unwrap();
//! assert_eq!(fruits.to_array(true), array!{
//!     0u64 => "apple",
//!     1u64 => "banana",
//!     "favorite" => "elderberry",
//!     2u64 => "date",
//! });
//! ```

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, trace};
use uuid::Uuid;

pub mod array;
pub mod errors;
mod functional;
mod iter;
pub mod key;
pub mod kind;
mod merge;
mod serialize;
pub mod value;


pub use array::Array;
pub use errors::CollectionError;
pub use iter::Snapshot;
pub use key::{IntoKey, Key};
pub use kind::CollectionKind;
pub use value::Value;

use key::next_index;

/// An ordered associative container with unique keys.
///
/// # Keys
///
/// Appending (`add`, `push`, `append`, or `set` with a null key) assigns the
/// key `max(existing integer keys) + 1`, or `0` when there are none. The
/// maximum is computed fresh on every append, so removing the highest index
/// makes that index available again. Setting an existing key replaces its
/// value in place without moving it.
///
/// # Iteration
///
/// There are two independent iteration models:
///
/// - an internal cursor driven by [`first`](Collection::first),
///   [`last`](Collection::last), [`next`](Collection::next),
///   [`current`](Collection::current) and [`key`](Collection::key);
/// - external iteration through [`iter`](Collection::iter) (a live borrow)
///   or [`get_iterator`](Collection::get_iterator) (a snapshot taken when it
///   is requested).
///
/// The cursor is a position in the entry order. Removing an entry before the
/// cursor shifts it back by one so it keeps pointing at the same entry.
///
/// # Copy semantics
///
/// `set` and `get` hand nested collections over without copying. `Clone`
/// copies every nested collection recursively, giving each copy a fresh
/// identity; `merge` rebuilds incoming collections from their flattened form.
#[derive(Debug)]
pub struct Collection {
    /// Per-instance identity token used by the string form
    id: Uuid,
    kind: CollectionKind,
    entries: IndexMap<Key, Value>,
    /// Position of the internal cursor in the entry order
    cursor: usize,
}

impl Collection {
    /// Creates a new empty plain collection
    pub fn new() -> Self {
        Self::with_kind(CollectionKind::Plain)
    }

    /// Creates a new empty recursive collection
    pub fn recursive() -> Self {
        Self::with_kind(CollectionKind::Recursive)
    }

    /// Creates a new empty collection of the given kind
    pub fn with_kind(kind: CollectionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            entries: IndexMap::new(),
            cursor: 0,
        }
    }

    /// Creates a plain collection populated from an array-like source.
    ///
    /// Fails with an invalid argument error if `source` is neither an
    /// [`Array`] nor a [`Collection`].
    pub fn from_source(source: impl Into<Value>) -> crate::Result<Self> {
        Self::with_kind_from(CollectionKind::Plain, source)
    }

    /// Creates a recursive collection populated from an array-like source.
    pub fn recursive_from(source: impl Into<Value>) -> crate::Result<Self> {
        Self::with_kind_from(CollectionKind::Recursive, source)
    }

    /// Creates a collection of the given kind populated from an array-like source.
    pub fn with_kind_from(kind: CollectionKind, source: impl Into<Value>) -> crate::Result<Self> {
        let mut collection = Self::with_kind(kind);
        collection.exchange_array(source)?;
        Ok(collection)
    }

    /// Returns the kind of this collection
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Returns true if this is a recursive collection
    pub fn is_recursive(&self) -> bool {
        self.kind == CollectionKind::Recursive
    }

    /// Returns the per-instance identity token
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns true if `other` is this very instance (not merely equal to it).
    ///
    /// Clones and rebuilt collections always have a different identity.
    pub fn is_same_instance(&self, other: &Collection) -> bool {
        self.id == other.id
    }

    /// Creates an empty collection of the same kind as `self`
    fn sibling(&self) -> Self {
        Self::with_kind(self.kind)
    }

    /// Inserts every entry of an array-like source through `set`.
    ///
    /// The receiver is not cleared first: existing keys are overwritten in
    /// place, new keys are appended. Collection sources contribute their
    /// entries one level deep.
    pub fn exchange_array(&mut self, source: impl Into<Value>) -> crate::Result<()> {
        let array = source.into().into_array()?;
        debug!(kind = %self.kind, count = array.len(), "Loading entries into collection");
        self.extend_from(array);
        Ok(())
    }

    /// Builds a collection of `kind` from an array, infallibly
    pub(crate) fn from_array(kind: CollectionKind, array: Array) -> Self {
        let mut collection = Self::with_kind(kind);
        collection.extend_from(array);
        collection
    }

    /// Inserts every entry of `array` through the kind's admission rules
    fn extend_from(&mut self, array: Array) {
        for (key, value) in array {
            self.put(key, value);
        }
    }

    /// Stores a value under the normalized form of `key`
    fn put(&mut self, key: Key, value: Value) {
        let value = self.kind.admit(value);
        self.entries.insert(key.normalize(), value);
    }

    /// Stores a value under the next auto-assigned index.
    ///
    /// Fails without touching the entries when the largest integer key is
    /// already `u64::MAX`.
    fn put_next(&mut self, value: Value) -> crate::Result<Key> {
        let index = next_index(self.entries.keys()).ok_or_else(CollectionError::next_index_occupied)?;
        let key = Key::Index(index);
        let value = self.kind.admit(value);
        self.entries.insert(key.clone(), value);
        Ok(key)
    }

    /// Sets a value under `key`, or appends it when `key` is the null sentinel.
    ///
    /// An existing key keeps its position. Fails if `key` cannot be a key at
    /// all (negative integer, array, collection), or if an append finds the
    /// index space exhausted.
    pub fn set(&mut self, key: impl IntoKey, value: impl Into<Value>) -> crate::Result<&mut Self> {
        match key.into_key()? {
            Some(key) => self.put(key, value.into()),
            None => {
                self.put_next(value.into())?;
            }
        }
        Ok(self)
    }

    /// Appends a value under the next auto-assigned index.
    ///
    /// Use `set(None::<Key>, value)` for the fallible form.
    ///
    /// # Panics
    ///
    /// Panics if the collection already holds the integer key `u64::MAX`.
    pub fn add(&mut self, value: impl Into<Value>) -> &mut Self {
        if let Err(err) = self.put_next(value.into()) {
            panic!("{err}");
        }
        self
    }

    /// Synonym for [`add`](Collection::add)
    pub fn append(&mut self, value: impl Into<Value>) -> &mut Self {
        self.add(value)
    }

    /// Synonym for [`add`](Collection::add)
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.add(value)
    }

    /// Inserts a value at the front of the order.
    ///
    /// Follows array-unshift semantics: the new value gets index `0` and all
    /// integer keys are renumbered `1, 2, ...` in order. String keys are left
    /// untouched. The cursor is reset to the first entry.
    pub fn prepend(&mut self, value: impl Into<Value>) -> &mut Self {
        let value = self.kind.admit(value.into());
        let previous = std::mem::take(&mut self.entries);
        self.entries.reserve(previous.len() + 1);
        self.entries.insert(Key::Index(0), value);
        let mut next = 1;
        for (key, value) in previous {
            let key = match key {
                Key::Index(_) => {
                    let renumbered = Key::Index(next);
                    next += 1;
                    renumbered
                }
                name => name,
            };
            self.entries.insert(key, value);
        }
        trace!(count = self.entries.len(), "Renumbered collection after prepend");
        self.cursor = 0;
        self
    }

    /// Synonym for [`prepend`](Collection::prepend)
    pub fn unshift(&mut self, value: impl Into<Value>) -> &mut Self {
        self.prepend(value)
    }

    /// Resolves caller input to a key, rejecting the null sentinel
    fn required_key(key: impl IntoKey) -> crate::Result<Key> {
        key.into_key()?
            .map(Key::normalize)
            .ok_or_else(|| CollectionError::null_key().into())
    }

    /// Gets the value stored under `key`.
    ///
    /// Fails with an invalid argument error for a null or non-scalar key, and
    /// with an out of bounds error if the key is absent.
    pub fn get(&self, key: impl IntoKey) -> crate::Result<&Value> {
        let key = Self::required_key(key)?;
        self.entries.get(&key).ok_or_else(|| {
            CollectionError::OutOfBounds {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// Gets a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: impl IntoKey) -> crate::Result<&mut Value> {
        let key = Self::required_key(key)?;
        self.entries.get_mut(&key).ok_or_else(|| {
            CollectionError::OutOfBounds {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// Gets a value by key with automatic type conversion using `TryFrom`.
    ///
    /// Returns `None` if the key is absent or invalid, or if the conversion fails.
    pub fn get_as<'a, T>(&'a self, key: impl IntoKey) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = CollectionError>,
    {
        let value = self.get(key).ok()?;
        T::try_from(value).ok()
    }

    /// Returns whether `key` is present.
    ///
    /// Fails with an invalid argument error for a null or non-scalar key.
    pub fn has(&self, key: impl IntoKey) -> crate::Result<bool> {
        let key = Self::required_key(key)?;
        Ok(self.entries.contains_key(&key))
    }

    /// Synonym for [`has`](Collection::has)
    pub fn contains_key(&self, key: impl IntoKey) -> crate::Result<bool> {
        self.has(key)
    }

    /// Returns true if any stored value strictly equals `element`
    pub fn has_element<T>(&self, element: &T) -> bool
    where
        T: ?Sized,
        Value: PartialEq<T>,
    {
        self.entries.values().any(|value| value == element)
    }

    /// Synonym for [`has_element`](Collection::has_element)
    pub fn contains<T>(&self, element: &T) -> bool
    where
        T: ?Sized,
        Value: PartialEq<T>,
    {
        self.has_element(element)
    }

    /// Removes the entry under `key` and returns its value.
    ///
    /// An absent key is not an error and yields `Ok(None)`.
    pub fn remove(&mut self, key: impl IntoKey) -> crate::Result<Option<Value>> {
        let key = Self::required_key(key)?;
        Ok(self.remove_entry(&key))
    }

    fn remove_entry(&mut self, key: &Key) -> Option<Value> {
        let (position, _, value) = self.entries.shift_remove_full(key)?;
        if position < self.cursor {
            self.cursor -= 1;
        }
        Some(value)
    }

    /// Removes the first entry (in order) whose value strictly equals `element`.
    ///
    /// Returns true if an entry was removed.
    pub fn remove_element<T>(&mut self, element: &T) -> bool
    where
        T: ?Sized,
        Value: PartialEq<T>,
    {
        let Some(key) = self.index_of(element).cloned() else {
            return false;
        };
        let before = self.entries.len();
        self.remove_entry(&key);
        self.entries.len() != before
    }

    /// Removes and returns the first value.
    ///
    /// Integer keys of the remaining entries are renumbered from `0` and the
    /// cursor is reset, mirroring array-shift.
    pub fn shift(&mut self) -> Option<Value> {
        let (_, value) = self.entries.shift_remove_index(0)?;
        self.renumber_indices();
        self.cursor = 0;
        Some(value)
    }

    /// Removes and returns the last value, resetting the cursor
    pub fn pop(&mut self) -> Option<Value> {
        let (_, value) = self.entries.pop()?;
        self.cursor = 0;
        Some(value)
    }

    fn renumber_indices(&mut self) {
        let mut next = 0;
        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(key, value)| match key {
                Key::Index(_) => {
                    let renumbered = Key::Index(next);
                    next += 1;
                    (renumbered, value)
                }
                name => (name, value),
            })
            .collect();
    }

    /// Returns a new collection of the same kind holding the keys as values.
    ///
    /// Integer keys past `i64::MAX` are stored as their decimal text, which
    /// still looks up the original entry.
    pub fn get_keys(&self) -> Collection {
        let mut keys = self.sibling();
        for key in self.entries.keys() {
            keys.add(key.clone());
        }
        keys
    }

    /// Returns a new collection of the same kind holding the values, re-indexed from `0`
    pub fn get_values(&self) -> Collection {
        let mut values = self.sibling();
        for value in self.entries.values() {
            values.add(value.clone());
        }
        values
    }

    /// Moves the cursor to the first entry and returns its value
    pub fn first(&mut self) -> Option<&Value> {
        self.cursor = 0;
        self.current()
    }

    /// Moves the cursor to the last entry and returns its value
    pub fn last(&mut self) -> Option<&Value> {
        self.cursor = self.entries.len().saturating_sub(1);
        self.current()
    }

    /// Returns the key at the cursor, or `None` once the cursor is exhausted
    pub fn key(&self) -> Option<&Key> {
        self.entries.get_index(self.cursor).map(|(key, _)| key)
    }

    /// Returns the value at the cursor, or `None` once the cursor is exhausted
    pub fn current(&self) -> Option<&Value> {
        self.entries.get_index(self.cursor).map(|(_, value)| value)
    }

    /// Advances the cursor and returns the new current value.
    ///
    /// `None` means the cursor moved past the last entry; a stored
    /// [`Value::Null`] is returned as `Some(&Value::Null)`.
    pub fn next(&mut self) -> Option<&Value> {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Synonym for [`len`](Collection::len)
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Returns true if the collection has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry and resets the cursor
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self.cursor = 0;
        self
    }

    /// Produces the plain ordered map form of this collection.
    ///
    /// With `recursive`, every nested collection (including collections held
    /// inside nested arrays) is flattened to an array. Without it, nested
    /// values are copied one level deep and collections stay collections.
    pub fn to_array(&self, recursive: bool) -> Array {
        self.entries
            .iter()
            .map(|(key, value)| {
                let value = if recursive {
                    value.flattened()
                } else {
                    value.clone()
                };
                (key.clone(), value)
            })
            .collect()
    }

    /// Array-access existence check, same as [`has`](Collection::has)
    pub fn offset_exists(&self, offset: impl IntoKey) -> crate::Result<bool> {
        self.has(offset)
    }

    /// Array-access read, same as [`get`](Collection::get)
    pub fn offset_get(&self, offset: impl IntoKey) -> crate::Result<&Value> {
        self.get(offset)
    }

    /// Array-access write, same as [`set`](Collection::set)
    pub fn offset_set(&mut self, offset: impl IntoKey, value: impl Into<Value>) -> crate::Result<()> {
        self.set(offset, value).map(|_| ())
    }

    /// Array-access delete, same as [`remove`](Collection::remove)
    pub fn offset_unset(&mut self, offset: impl IntoKey) -> crate::Result<()> {
        self.remove(offset).map(|_| ())
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Collection {
    /// Deep-copies the collection.
    ///
    /// Nested collections are cloned recursively and every copy gets a fresh
    /// identity; scalar and array values are copied by value.
    fn clone(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: self.kind,
            entries: self.entries.clone(),
            cursor: self.cursor,
        }
    }
}

impl PartialEq for Collection {
    /// Structural equality: same kind and same entries in the same order.
    /// Identity and cursor position are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.entries.len() == other.entries.len()
            && self.entries.iter().eq(other.entries.iter())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind.name(), self.id.simple())
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Collection {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut collection = Collection::new();
        for (key, value) in iter {
            collection.put(key.into(), value.into());
        }
        collection
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Collection {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key.into(), value.into());
        }
    }
}

impl From<Array> for Collection {
    fn from(array: Array) -> Self {
        Collection::from_array(CollectionKind::Plain, array)
    }
}

impl TryFrom<Value> for Collection {
    type Error = crate::Error;

    /// Converts an array-like value; a collection value is returned as-is.
    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Collection(collection) => Ok(collection),
            other => Collection::from_source(other),
        }
    }
}
