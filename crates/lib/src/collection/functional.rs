//! Queries and higher-order operations on collections.
//!
//! Every operation that produces a new collection creates it with the kind of
//! the receiver and inserts through the normal admission rules, so recursive
//! promotion applies to results too.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::errors::CollectionError;
use super::{Collection, Key, Value};

impl Collection {
    /// Returns true if `predicate(key, value)` holds for at least one entry.
    ///
    /// Stops at the first match.
    pub fn exists<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.entries.iter().any(|(key, value)| predicate(key, value))
    }

    /// Returns true if `predicate(key, value)` holds for every entry.
    ///
    /// Vacuously true for an empty collection; stops at the first failure.
    pub fn for_all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.entries.iter().all(|(key, value)| predicate(key, value))
    }

    /// Returns the first key whose value strictly equals `element`
    pub fn index_of<T>(&self, element: &T) -> Option<&Key>
    where
        T: ?Sized,
        Value: PartialEq<T>,
    {
        self.entries
            .iter()
            .find(|(_, value)| *value == element)
            .map(|(key, _)| key)
    }

    /// Sorts the entries by value in place, keeping each key with its value.
    ///
    /// The sort is stable. Always returns true.
    pub fn sort<F>(&mut self, mut comparator: F) -> bool
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.entries
            .sort_by(|_, left, _, right| comparator(left, right));
        self.cursor = 0;
        true
    }

    /// Splits the entries into consecutive groups of at most `size`.
    ///
    /// Each group becomes a new collection; the groups are appended, in order,
    /// to a new outer collection. With `preserve_keys` the groups keep the
    /// original keys, otherwise each group is indexed from `0`.
    ///
    /// Fails with an invalid argument error if `size` is zero.
    pub fn chunk(&self, size: usize, preserve_keys: bool) -> crate::Result<Collection> {
        if size == 0 {
            return Err(CollectionError::InvalidArgument {
                reason: "Size parameter expected to be greater than 0".to_string(),
            }
            .into());
        }

        let entries: Vec<_> = self.entries.iter().collect();
        let mut chunks = self.sibling();
        for group in entries.chunks(size) {
            let mut chunk = self.sibling();
            for (key, value) in group {
                if preserve_keys {
                    chunk.put((*key).clone(), (*value).clone());
                } else {
                    chunk.put_next((*value).clone())?;
                }
            }
            chunks.add(chunk);
        }
        trace!(size, count = chunks.len(), "Chunked collection");
        Ok(chunks)
    }

    /// Randomizes the order of the entries in place using the thread RNG.
    ///
    /// Keys stay attached to their values. Always returns true.
    pub fn shuffle(&mut self) -> bool {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// Randomizes the order of the entries in place using `rng`.
    pub fn shuffle_with<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let mut entries: Vec<_> = self.entries.drain(..).collect();
        entries.shuffle(rng);
        self.entries = entries.into_iter().collect();
        self.cursor = 0;
        true
    }

    /// Applies `mapper` to every value, keeping keys and order.
    pub fn map<F, T>(&self, mut mapper: F) -> Collection
    where
        F: FnMut(&Value) -> T,
        T: Into<Value>,
    {
        let mut mapped = self.sibling();
        for (key, value) in &self.entries {
            mapped.put(key.clone(), mapper(value).into());
        }
        mapped
    }

    /// Keeps the entries whose value satisfies `predicate`, with original keys.
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Value) -> bool,
    {
        let mut filtered = self.sibling();
        for (key, value) in &self.entries {
            if predicate(value) {
                filtered.put(key.clone(), value.clone());
            }
        }
        filtered
    }

    /// Splits the entries by `predicate(key, value)` into `(matches, non_matches)`.
    ///
    /// Both collections keep the original keys and relative order.
    pub fn partition<F>(&self, mut predicate: F) -> (Collection, Collection)
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        let mut matches = self.sibling();
        let mut non_matches = self.sibling();
        for (key, value) in &self.entries {
            let target = if predicate(key, value) {
                &mut matches
            } else {
                &mut non_matches
            };
            target.put(key.clone(), value.clone());
        }
        (matches, non_matches)
    }

    /// Returns the entries starting at `offset`, up to `length` of them.
    ///
    /// Follows array-slice conventions and keeps the original keys:
    ///
    /// - a negative `offset` counts from the end;
    /// - `None` for `length` takes everything up to the end;
    /// - a negative `length` stops that many entries before the end.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> Collection {
        let (start, end) = slice_bounds(self.entries.len(), offset, length);
        let mut sliced = self.sibling();
        for (key, value) in self.entries.iter().skip(start).take(end - start) {
            sliced.put(key.clone(), value.clone());
        }
        sliced
    }
}

/// Resolves array-slice `offset`/`length` arguments into a `start..end` range.
fn slice_bounds(len: usize, offset: i64, length: Option<i64>) -> (usize, usize) {
    let len_signed = i64::try_from(len).unwrap_or(i64::MAX);
    let start = if offset < 0 {
        (len_signed + offset).max(0)
    } else {
        offset.min(len_signed)
    };
    let end = match length {
        None => len_signed,
        Some(length) if length < 0 => (len_signed + length).max(start),
        Some(length) => start.saturating_add(length).min(len_signed),
    };
    // Both bounds are clamped to 0..=len above
    (start as usize, end as usize)
}
