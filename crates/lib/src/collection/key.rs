//! Entry keys for collections and arrays.
//!
//! A [`Key`] is either a non-negative integer index or a string name. Keys
//! follow array-key normalization: a string holding the canonical decimal form
//! of a non-negative integer is the same key as that integer, so `"3"` and `3`
//! address the same entry.
//!
//! Caller input is turned into keys through [`IntoKey`], which also models the
//! null sentinel (`None`) used by `set` to request an auto-assigned index.
//!
//! ```
//! use collectia::collection::{IntoKey, Key};
//!
//! assert_eq!(Key::from("7"), Key::Index(7));
//! assert_eq!(Key::from("07"), Key::Name("07".to_string()));
//! assert_eq!(true.into_key().unwrap(), Some(Key::Index(1)));
//! assert_eq!(None::<&str>.into_key().unwrap(), None);
//! assert!((-1i64).into_key().is_err());
//! ```

use std::fmt;

use super::errors::CollectionError;
use super::value::Value;
use crate::Result;

/// A key identifying one entry of a collection.
///
/// Integer keys order before string keys when keys themselves are compared;
/// this ordering is unrelated to the insertion order of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Sequential integer key
    Index(u64),
    /// Associative string key
    Name(String),
}

impl Key {
    /// Parses a string key, normalizing canonical decimal integers to indices.
    pub fn parse(s: &str) -> Self {
        match parse_index(s) {
            Some(index) => Key::Index(index),
            None => Key::Name(s.to_string()),
        }
    }

    /// Re-applies normalization to a key built directly from its variants.
    ///
    /// `Key::Name("3".into())` becomes `Key::Index(3)`; every other key is
    /// returned unchanged.
    pub fn normalize(self) -> Self {
        match self {
            Key::Name(name) => Key::from(name),
            index => index,
        }
    }

    /// Returns true for integer keys
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Returns the integer value of an index key
    pub fn as_index(&self) -> Option<u64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    /// Returns the string value of a name key
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

/// Returns the index for `s` if it is the canonical decimal form of a `u64`.
///
/// Leading zeros, signs and whitespace disqualify a string, matching the way
/// array keys are normalized.
fn parse_index(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    s.parse().ok()
}

/// Computes the next auto-assigned index for a sequence of keys.
///
/// This is one more than the largest integer key present, or `0` when there
/// are no integer keys. Returns `None` when the largest key is `u64::MAX`.
pub(crate) fn next_index<'a>(keys: impl IntoIterator<Item = &'a Key>) -> Option<u64> {
    keys.into_iter()
        .filter_map(Key::as_index)
        .max()
        .map_or(Some(0), |max| max.checked_add(1))
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<u64> for Key {
    fn from(index: u64) -> Self {
        Key::Index(index)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index as u64)
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        Key::Index(u64::from(index))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::parse(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match parse_index(&s) {
            Some(index) => Key::Index(index),
            None => Key::Name(s),
        }
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// Conversion of caller input into an optional key.
///
/// `Ok(None)` is the null sentinel: `set` treats it as "append with an
/// auto-assigned index" while lookups reject it. Inputs that cannot be keys at
/// all (negative integers, non-finite floats, arrays and collections) fail with
/// an invalid argument error.
pub trait IntoKey {
    /// Converts `self` into a key, or `None` for the null sentinel.
    fn into_key(self) -> Result<Option<Key>>;
}

impl IntoKey for Key {
    fn into_key(self) -> Result<Option<Key>> {
        Ok(Some(self))
    }
}

impl IntoKey for &Key {
    fn into_key(self) -> Result<Option<Key>> {
        Ok(Some(self.clone()))
    }
}

impl IntoKey for &str {
    fn into_key(self) -> Result<Option<Key>> {
        Ok(Some(Key::parse(self)))
    }
}

impl IntoKey for String {
    fn into_key(self) -> Result<Option<Key>> {
        Ok(Some(Key::from(self)))
    }
}

impl IntoKey for &String {
    fn into_key(self) -> Result<Option<Key>> {
        Ok(Some(Key::parse(self)))
    }
}

impl IntoKey for bool {
    fn into_key(self) -> Result<Option<Key>> {
        Ok(Some(Key::Index(u64::from(self))))
    }
}

impl IntoKey for f64 {
    fn into_key(self) -> Result<Option<Key>> {
        if !self.is_finite() {
            return Err(CollectionError::InvalidArgument {
                reason: format!("The key {self} is not a finite number"),
            }
            .into());
        }
        let truncated = self.trunc();
        if truncated < 0.0 || truncated > u64::MAX as f64 {
            return Err(negative_key(self));
        }
        Ok(Some(Key::Index(truncated as u64)))
    }
}

macro_rules! unsigned_into_key {
    ($($ty:ty),*) => {
        $(
            impl IntoKey for $ty {
                fn into_key(self) -> Result<Option<Key>> {
                    Ok(Some(Key::Index(self as u64)))
                }
            }
        )*
    };
}

macro_rules! signed_into_key {
    ($($ty:ty),*) => {
        $(
            impl IntoKey for $ty {
                fn into_key(self) -> Result<Option<Key>> {
                    u64::try_from(self)
                        .map(|index| Some(Key::Index(index)))
                        .map_err(|_| negative_key(self))
                }
            }
        )*
    };
}

unsigned_into_key!(u8, u16, u32, u64, usize);
signed_into_key!(i8, i16, i32, i64, isize);

fn negative_key(key: impl fmt::Display) -> crate::Error {
    CollectionError::InvalidArgument {
        reason: format!("The key {key} is negative; keys must be non-negative integers or strings"),
    }
    .into()
}

impl IntoKey for &Value {
    fn into_key(self) -> Result<Option<Key>> {
        match self {
            Value::Null => Ok(None),
            Value::Bool(b) => b.into_key(),
            Value::Int(n) => n.into_key(),
            Value::Float(x) => x.into_key(),
            Value::Text(s) => s.as_str().into_key(),
            Value::Array(_) | Value::Collection(_) => Err(CollectionError::InvalidArgument {
                reason: "The specified key name must be a scalar".to_string(),
            }
            .into()),
        }
    }
}

impl IntoKey for Value {
    fn into_key(self) -> Result<Option<Key>> {
        (&self).into_key()
    }
}

impl<T: IntoKey> IntoKey for Option<T> {
    fn into_key(self) -> Result<Option<Key>> {
        match self {
            Some(inner) => inner.into_key(),
            None => Ok(None),
        }
    }
}
