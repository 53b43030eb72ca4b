//! Plain ordered key-value structure.
//!
//! [`Array`] is the array-like source accepted by collection constructors,
//! `exchange_array` and `merge`, and the structure produced by
//! `Collection::to_array`. It is a thin wrapper around [`IndexMap`] so that
//! entries keep their insertion order.
//!
//! ```
//! use collectia::{Key, Value, array};
//!
//! let list = array!["a", "b"];
//! let keys: Vec<_> = list.keys().cloned().collect();
//! assert_eq!(keys, vec![Key::Index(0), Key::Index(1)]);
//!
//! let map = array!{"name" => "Alice", "age" => 30};
//! assert_eq!(map.get("age"), Some(&Value::Int(30)));
//! ```

use indexmap::IndexMap;

use super::errors::CollectionError;
use super::key::{next_index, Key};
use super::value::{quoted, Value};

/// An insertion-ordered map of [`Key`]s to [`Value`]s.
///
/// Equality is order-sensitive: two arrays are equal only if they hold the
/// same entries in the same order.
#[derive(Debug, Clone, Default)]
pub struct Array(IndexMap<Key, Value>);

impl Array {
    /// Creates an empty `Array`.
    pub fn new() -> Self {
        Array(IndexMap::new())
    }

    /// Creates an empty `Array` with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Array(IndexMap::with_capacity(capacity))
    }

    /// Builds an array from `(key, value)` pairs, later duplicates overwrite
    /// earlier ones in place.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut array = Array::new();
        for (key, value) in pairs {
            array.insert(key, value);
        }
        array
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the array has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a value under the next auto-assigned index and returns that key.
    ///
    /// # Panics
    ///
    /// Panics if the array already holds the integer key `u64::MAX`. See
    /// [`try_push`](Array::try_push).
    pub fn push(&mut self, value: impl Into<Value>) -> Key {
        match self.try_push(value) {
            Ok(key) => key,
            Err(err) => panic!("{err}"),
        }
    }

    /// Appends a value under the next auto-assigned index and returns that key.
    ///
    /// Fails, leaving the array unchanged, if the integer key `u64::MAX` is
    /// already present.
    pub fn try_push(&mut self, value: impl Into<Value>) -> crate::Result<Key> {
        let index = next_index(self.0.keys()).ok_or_else(CollectionError::next_index_occupied)?;
        let key = Key::Index(index);
        self.0.insert(key.clone(), value.into());
        Ok(key)
    }

    /// Inserts a value, keeping the position of an existing key.
    ///
    /// Returns the previous value stored under the key, if any.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into().normalize(), value.into())
    }

    /// Gets a value by key.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.0.get(&key.into())
    }

    /// Returns true if the array contains the given key.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.0.contains_key(&key.into())
    }

    /// Returns an iterator over the entries in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.0.iter()
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values in order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.0.values()
    }

    /// Returns a copy with every nested collection converted to an array.
    pub(crate) fn flattened(&self) -> Array {
        Array(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.flattened()))
                .collect(),
        )
    }

    /// Returns true when the keys are exactly `0, 1, .., len - 1` in order.
    pub fn is_list(&self) -> bool {
        self.0
            .keys()
            .enumerate()
            .all(|(position, key)| key.as_index() == Some(position as u64))
    }

    /// Converts to a JSON-like string representation for human-readable output.
    pub fn to_json_string(&self) -> String {
        let mut result = String::with_capacity(self.len() * 8);
        if self.is_list() {
            result.push('[');
            for (i, value) in self.values().enumerate() {
                if i > 0 {
                    result.push(',');
                }
                result.push_str(&value.to_json_string());
            }
            result.push(']');
        } else {
            result.push('{');
            for (i, (key, value)) in self.iter().enumerate() {
                if i > 0 {
                    result.push(',');
                }
                result.push_str(&quoted(&key.to_string()));
                result.push(':');
                result.push_str(&value.to_json_string());
            }
            result.push('}');
        }
        result
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Array {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().map(Into::into).collect()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut array = Array::new();
        for value in iter {
            array.push(value);
        }
        array
    }
}

impl FromIterator<(Key, Value)> for Array {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Array::from_pairs(iter)
    }
}

impl IntoIterator for Array {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds an [`Array`] literal.
///
/// `array![a, b, c]` assigns indices `0, 1, 2`; `array!{k1 => v1, k2 => v2}`
/// uses explicit keys (anything convertible into a [`Key`]).
#[macro_export]
macro_rules! array {
    () => {
        $crate::collection::Array::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut array = $crate::collection::Array::new();
        $(array.insert($key, $value);)+
        array
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut array = $crate::collection::Array::new();
        $(array.push($value);)+
        array
    }};
}
