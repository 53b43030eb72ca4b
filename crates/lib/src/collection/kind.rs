//! Collection kinds and recursive promotion.
//!
//! Every [`Collection`] carries a [`CollectionKind`]. Operations that produce a
//! new collection (`map`, `slice`, `chunk`, merge rewraps, ...) create it with
//! the receiver's kind, so a recursive collection only ever builds recursive
//! collections.
//!
//! The recursive kind changes insertion only: before `set` or `prepend` stores
//! a value, a plain [`Array`](crate::Array) is promoted into a recursive collection built from
//! it. Promotion cascades, so a single construction call over deeply nested
//! arrays yields a fully typed tree:
//!
//! ```
//! use collectia::{Collection, array};
//!
//! let tree = Collection::recursive_from(array! {
//!     "x" => array!["y", array!["z"]],
//! })
//! .unwrap();
//!
//! let x = tree.get("x").unwrap().as_collection().unwrap();
//! assert!(x.is_recursive());
//! assert!(x.get(1).unwrap().is_collection());
//! ```

use std::fmt;

use super::value::Value;
use super::Collection;

/// Selects how a collection treats array-like values on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollectionKind {
    /// Values are stored exactly as given
    #[default]
    Plain,
    /// Plain arrays are promoted to nested recursive collections
    Recursive,
}

impl CollectionKind {
    /// Name used in the string form of a collection
    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::Plain => "Collection",
            CollectionKind::Recursive => "RecursiveCollection",
        }
    }

    /// Prepares a value for storage in a collection of this kind.
    ///
    /// Collections pass through untouched, keeping their own kind and identity.
    /// The promotion is applied once, at insertion time; it is not re-checked
    /// when the stored value is later read or modified.
    pub fn admit(self, value: Value) -> Value {
        match (self, value) {
            (CollectionKind::Recursive, Value::Array(array)) => {
                Value::Collection(Collection::from_array(self, array))
            }
            (_, value) => value,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
