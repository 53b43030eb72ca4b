//! Recursive merge of array-like sources into a collection.
//!
//! Conflicts are resolved per key type:
//!
//! | incoming key | receiver has key | incoming value | result                                   |
//! |--------------|------------------|----------------|------------------------------------------|
//! | index        | yes              | any            | appended under a new index               |
//! | name         | yes              | collection     | deep-merged into an existing collection, |
//! |              |                  |                | otherwise stored as a fresh collection   |
//! | name         | yes              | other          | overwritten in place                     |
//! | any          | no               | collection     | stored as a fresh collection             |
//! | any          | no               | other          | inserted as-is                           |
//!
//! "Fresh collection" means a new collection of the receiver's kind built
//! from the flattened array form of the incoming one, so the result never
//! aliases the source.

use tracing::{debug, trace};

use super::array::Array;
use super::{Collection, Key, Value};

impl Collection {
    /// Folds an array-like source into this collection, in source order.
    ///
    /// Fails with an invalid argument error, before touching the receiver, if
    /// `source` is neither an [`Array`] nor a [`Collection`]. Also fails when
    /// an integer-keyed entry must be appended to a collection already holding
    /// the key `u64::MAX`; entries merged before that point stay merged.
    ///
    /// ```
    /// use collectia::{Collection, array};
    ///
    /// let mut settings = Collection::from_source(array! {
    ///     "tags" => Collection::from_source(array!["a", "b"]).unwrap(),
    /// })
    /// .unwrap();
    ///
    /// settings
    ///     .merge(array! {"tags" => Collection::from_source(array!["c"]).unwrap()})
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     settings.to_array(true),
    ///     array! {"tags" => array!["a", "b", "c"]},
    /// );
    /// ```
    pub fn merge(&mut self, source: impl Into<Value>) -> crate::Result<&mut Self> {
        let array = source.into().into_array()?;
        debug!(kind = %self.kind, count = array.len(), "Merging source into collection");
        self.merge_array(array)?;
        Ok(self)
    }

    fn merge_array(&mut self, array: Array) -> crate::Result<()> {
        for (key, value) in array {
            self.merge_entry(key.normalize(), value)?;
        }
        Ok(())
    }

    fn merge_entry(&mut self, key: Key, value: Value) -> crate::Result<()> {
        if !self.entries.contains_key(&key) {
            let value = match value {
                Value::Collection(incoming) => self.rewrap(&incoming),
                other => other,
            };
            self.put(key, value);
            return Ok(());
        }

        if key.is_index() {
            self.put_next(value)?;
            return Ok(());
        }

        let value = match value {
            Value::Collection(incoming) => {
                let flattened = incoming.to_array(true);
                if let Some(Value::Collection(existing)) = self.entries.get_mut(&key) {
                    trace!(key = %key, "Deep merging nested collection");
                    return existing.merge_array(flattened);
                }
                Value::Collection(Collection::from_array(self.kind, flattened))
            }
            other => other,
        };
        self.put(key, value);
        Ok(())
    }

    /// Builds a fresh collection of the receiver's kind from `incoming`'s flattened form
    fn rewrap(&self, incoming: &Collection) -> Value {
        Value::Collection(Collection::from_array(
            self.kind,
            incoming.to_array(true),
        ))
    }
}
