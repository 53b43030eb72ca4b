//! Serialization of collections through their array form.
//!
//! A collection is encoded as `to_array(true)`: nested collections become
//! plain nested maps and no identity or kind information is written. Decoding
//! goes back through `exchange_array`, so a recursive collection re-promotes
//! nested maps on load.
//!
//! Arrays serialize as maps in entry order. Integer keys are written as
//! unsigned integers, which JSON stores as strings; key normalization turns
//! them back into integer keys when reading. Non-finite floats have no
//! encoding and fail serialization.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::array::Array;
use super::errors::CollectionError;
use super::{Collection, CollectionKind, Key, Value};

impl Collection {
    /// Encodes the flattened array form of this collection as JSON bytes.
    pub fn serialize(&self) -> crate::Result<Vec<u8>> {
        serde_json::to_vec(&self.to_array(true)).map_err(|e| {
            CollectionError::SerializationFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Decodes bytes produced by [`serialize`](Collection::serialize) and
    /// loads them through [`exchange_array`](Collection::exchange_array).
    ///
    /// Like `exchange_array`, this is additive: existing entries are kept
    /// unless a decoded key overwrites them.
    pub fn deserialize(&mut self, bytes: &[u8]) -> crate::Result<()> {
        let array: Array = serde_json::from_slice(bytes).map_err(|e| {
            CollectionError::DeserializationFailed {
                reason: e.to_string(),
            }
        })?;
        debug!(kind = %self.kind, count = array.len(), "Decoded serialized collection");
        self.exchange_array(array)
    }

    /// Creates a collection of `kind` from bytes produced by
    /// [`serialize`](Collection::serialize).
    pub fn from_bytes(kind: CollectionKind, bytes: &[u8]) -> crate::Result<Self> {
        let mut collection = Collection::with_kind(kind);
        collection.deserialize(bytes)?;
        Ok(collection)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Index(index) => serializer.serialize_u64(*index),
            Key::Name(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a non-negative integer or a string key")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
                Ok(Key::Index(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
                u64::try_from(v)
                    .map(Key::Index)
                    .map_err(|_| E::custom(format!("negative key {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
                Ok(Key::parse(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Key, E> {
                Ok(Key::from(v))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ArrayVisitor;

impl<'de> Visitor<'de> for ArrayVisitor {
    type Value = Array;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map or a sequence")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Array, A::Error> {
        let mut array = Array::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            array.insert(key, value);
        }
        Ok(array)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Array, A::Error> {
        let mut array = Array::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(value) = access.next_element::<Value>()? {
            array.push(value);
        }
        Ok(array)
    }
}

impl<'de> Deserialize<'de> for Array {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ArrayVisitor)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) if !x.is_finite() => Err(serde::ser::Error::custom(format!(
                "non-finite float {x} cannot be serialized"
            ))),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Array(array) => array.serialize(serializer),
            Value::Collection(collection) => Serialize::serialize(collection, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a scalar, a map or a sequence")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
                Value::deserialize(deserializer)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                Ok(Value::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
                Ok(Value::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
                Ok(Value::Text(v))
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Value, A::Error> {
                ArrayVisitor.visit_map(access).map(Value::Array)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, access: A) -> Result<Value, A::Error> {
                ArrayVisitor.visit_seq(access).map(Value::Array)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array(true).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Collection {
    /// Deserializes into a plain collection
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Array::deserialize(deserializer).map(Collection::from)
    }
}
