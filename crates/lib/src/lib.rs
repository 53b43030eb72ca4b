//!
//! Collectia: ordered, uniquely keyed collections.
//! This library provides a container that behaves like a hybrid of a list and a map.
//!
//! ## Core Concepts
//!
//! * **Collections (`collection::Collection`)**: Ordered key-value stores with unique keys. Entries are
//!   addressed by explicit string or integer keys, or appended under auto-assigned indices.
//! * **Keys (`collection::Key`)**: Non-negative integer indices or string names, normalized the way array keys are.
//! * **Values (`collection::Value`)**: Scalars, plain arrays and nested collections.
//! * **Arrays (`collection::Array`)**: Plain ordered maps used to build collections and produced when flattening them.
//! * **Recursive collections (`collection::CollectionKind::Recursive`)**: Collections that promote every nested
//!   array to a nested collection of the same kind, producing typed trees from a single construction call.
//! * **Merge**: Folds another source into a collection, appending integer-keyed entries and deep-merging
//!   nested collections under shared string keys.

pub mod collection;

/// Re-export the core collection types for easier access.
pub use collection::{Array, Collection, CollectionKind, IntoKey, Key, Value};

/// Result type used throughout the Collectia library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Collectia library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured collection errors from the collection module
    #[error(transparent)]
    Collection(collection::CollectionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Collection(_) => "collection",
        }
    }

    /// Check if this error indicates a malformed argument.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_invalid_argument(),
        }
    }

    /// Check if this error indicates a lookup of an absent key.
    pub fn is_out_of_bounds(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_out_of_bounds(),
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_type_error(),
        }
    }

    /// Check if this error is an encoding or decoding failure.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Collection(collection_err) => collection_err.is_serialization_error(),
        }
    }
}
