//! Values stored in collections.
//!
//! [`Value`] is the closed set of things a collection entry can hold: scalar
//! leaves, plain array-like sources ([`Array`]) and nested [`Collection`]s.
//! Operations that behave differently for nested containers (merge,
//! flattening, recursive promotion) branch on these variants.

use std::fmt;

use super::array::Array;
use super::errors::CollectionError;
use super::key::Key;
use super::Collection;

/// A value stored in a collection or array.
///
/// # Strict equality
///
/// `PartialEq` is strict: both sides must be the same variant with equal
/// contents. An integer never equals a float or a string with the same digits.
/// Nested arrays and collections are compared structurally, entry by entry in
/// order; for collections the kind must match too.
///
/// ```
/// # use collectia::Value;
/// assert_eq!(Value::from(1), Value::Int(1));
/// assert_ne!(Value::from(1), Value::Float(1.0));
/// assert_ne!(Value::from(1), Value::from("1"));
///
/// // Direct comparison with primitives
/// assert!(Value::from("hello") == "hello");
/// assert!(Value::from(42) == 42);
/// assert!(Value::from(true) == true);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    // Scalars
    /// Null/empty value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),

    // Containers
    /// Plain ordered key-value structure
    Array(Array),
    /// Nested collection
    Collection(Collection),
}

impl Value {
    /// Returns true for scalar values (everything except arrays and collections)
    pub fn is_scalar(&self) -> bool {
        !self.is_array_like()
    }

    /// Returns true if this value is an array or a collection
    pub fn is_array_like(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Collection(_))
    }

    /// Returns true if this value is a nested collection
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Collection(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Array(_) => "array",
            Value::Collection(_) => "collection",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to an array (returns immutable reference)
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Attempts to convert to a collection (returns immutable reference)
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable collection reference
    pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
        match self {
            Value::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Converts an array-like value into a plain ordered map.
    ///
    /// Arrays are returned as-is. Collections yield their entries one level
    /// deep, so nested collections are kept as collection values. Scalars are
    /// rejected with an invalid argument error naming their type.
    pub fn into_array(self) -> crate::Result<Array> {
        match self {
            Value::Array(array) => Ok(array),
            Value::Collection(collection) => Ok(collection.into_iter().collect()),
            other => Err(CollectionError::not_array_like(other.type_name()).into()),
        }
    }

    /// Returns a copy of this value with every nested collection flattened to
    /// an array, recursively.
    pub(crate) fn flattened(&self) -> Value {
        match self {
            Value::Collection(collection) => Value::Array(collection.to_array(true)),
            Value::Array(array) => Value::Array(array.flattened()),
            scalar => scalar.clone(),
        }
    }

    /// Converts to a JSON-like string representation for human-readable output.
    ///
    /// Nested collections render as their flattened array form. Arrays whose
    /// keys are exactly `0..len` in order render as JSON lists, everything else
    /// as objects.
    ///
    /// ```
    /// # use collectia::{Value, array};
    /// assert_eq!(Value::from("hi").to_json_string(), "\"hi\"");
    /// assert_eq!(Value::from(array![1, 2]).to_json_string(), "[1,2]");
    /// assert_eq!(Value::from(array!{"a" => 1}).to_json_string(), "{\"a\":1}");
    /// ```
    pub fn to_json_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(x) if x.is_finite() => format!("{x:?}"),
            Value::Float(_) => "null".to_string(),
            Value::Text(s) => quoted(s),
            Value::Array(array) => array.to_json_string(),
            Value::Collection(collection) => collection.to_array(true).to_json_string(),
        }
    }
}

/// Renders `s` as a JSON string literal, escapes included
pub(crate) fn quoted(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Array(array) => {
                write!(f, "[")?;
                for (i, (key, item)) in array.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                write!(f, "]")
            }
            Value::Collection(collection) => write!(f, "{collection}"),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        // Values past i64::MAX keep their magnitude as a float; keys use
        // `From<Key>`, which keeps them exact as text
        i64::try_from(value).map_or(Value::Float(value as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Collection> for Value {
    fn from(value: Collection) -> Self {
        Value::Collection(value)
    }
}

/// Integer keys past `i64::MAX` become their decimal text, which converts
/// back to the same key.
impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Index(index) => {
                i64::try_from(index).map_or_else(|_| Value::Text(index.to_string()), Value::Int)
            }
            Key::Name(name) => Value::Text(name),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(Array::from(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// TryFrom implementations for typed retrieval
impl TryFrom<&Value> for String {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(type_mismatch("String", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = CollectionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(type_mismatch("&str", value)),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            _ => Err(type_mismatch("i64", value)),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(x) => Ok(*x),
            _ => Err(type_mismatch("f64", value)),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(type_mismatch("bool", value)),
        }
    }
}

fn type_mismatch(expected: &str, actual: &Value) -> CollectionError {
    CollectionError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.type_name().to_string(),
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        match self {
            Value::Text(s) => s == other,
            _ => false,
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Value::Int(n) => n == other,
            _ => false,
        }
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        match self {
            Value::Int(n) => *n == i64::from(*other),
            _ => false,
        }
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        match self {
            Value::Float(x) => x == other,
            _ => false,
        }
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        match self {
            Value::Bool(b) => b == other,
            _ => false,
        }
    }
}

impl PartialEq<Collection> for Value {
    fn eq(&self, other: &Collection) -> bool {
        match self {
            Value::Collection(collection) => collection == other,
            _ => false,
        }
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
