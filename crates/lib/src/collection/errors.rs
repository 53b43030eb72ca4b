//! Error types for collection operations.
//!
//! This module defines structured error types for the collection engine,
//! covering malformed arguments, lookups of absent keys and failures while
//! encoding or decoding the array form of a collection.

use thiserror::Error;

/// Structured error types for collection operations.
///
/// Every fallible collection method validates its input before mutating
/// anything, so receiving one of these errors means the receiver is unchanged.
/// The one exception is `merge` running out of indices partway through.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The argument did not have the shape the operation requires
    /// (null key, non-scalar key, non array-like source, zero chunk size,
    /// exhausted index space).
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A lookup was made for a key that is not present
    #[error("Index \"{key}\" is out of bounds")]
    OutOfBounds { key: String },

    /// A stored value did not have the requested type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Encoding the array form of a collection failed
    #[error("Collection serialization failed: {reason}")]
    SerializationFailed { reason: String },

    /// Decoding a serialized collection failed
    #[error("Collection deserialization failed: {reason}")]
    DeserializationFailed { reason: String },
}

impl CollectionError {
    /// Builds the error raised when an operation receives something that is
    /// neither an array nor a collection.
    pub(crate) fn not_array_like(type_name: &str) -> Self {
        CollectionError::InvalidArgument {
            reason: format!("Expected argument \"array\" or \"collection\"; \"{type_name}\" given"),
        }
    }

    /// Builds the error raised when a null key is used where a key is required.
    pub(crate) fn null_key() -> Self {
        CollectionError::InvalidArgument {
            reason: "The specified key name is null".to_string(),
        }
    }

    /// Builds the error raised when an append finds `u64::MAX` already in use.
    pub(crate) fn next_index_occupied() -> Self {
        CollectionError::InvalidArgument {
            reason: "Cannot add element to the collection because the next index is already occupied"
                .to_string(),
        }
    }

    /// Check if this error is an invalid argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CollectionError::InvalidArgument { .. })
    }

    /// Check if this error is an out of bounds lookup
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, CollectionError::OutOfBounds { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, CollectionError::TypeMismatch { .. })
    }

    /// Check if this error is related to serialization
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            CollectionError::SerializationFailed { .. }
                | CollectionError::DeserializationFailed { .. }
        )
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            CollectionError::OutOfBounds { key } => Some(key),
            _ => None,
        }
    }

    /// Get the reason text for errors that carry one
    pub fn reason(&self) -> Option<&str> {
        match self {
            CollectionError::InvalidArgument { reason }
            | CollectionError::SerializationFailed { reason }
            | CollectionError::DeserializationFailed { reason } => Some(reason),
            CollectionError::OutOfBounds { .. } | CollectionError::TypeMismatch { .. } => None,
        }
    }
}

// Conversion from CollectionError to the main Error type
impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}
