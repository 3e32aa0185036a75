//! Single column result set collections.
//!
//! Each collection is its own [`Model`] and its own row [`ColumnScanner`], so
//! every row of a one column result set is flattened into one collection.
//!
//! - [`Strings`]
//! - [`Ints`]
//! - [`IntSet`]
use bytes::BytesMut;
use std::{collections::HashSet, ops::Deref};

use crate::{
    Result,
    array::append_list,
    quote::{self, Quote},
    scan::{self, ColumnScanner, DecodeError, Model},
    ValueAppender,
};

macro_rules! self_model {
    ($ty:ty) => {
        impl Model for $ty {
            fn new_model(&mut self) -> &mut dyn ColumnScanner {
                self
            }

            fn add_model(&mut self) -> Result<(), DecodeError> {
                Ok(())
            }
        }
    };
}

// ===== Strings =====

/// Ordered list of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Strings(Vec<String>);

impl Strings {
    /// Create empty [`Strings`].
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Consume self into the inner [`Vec`].
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl ColumnScanner for Strings {
    /// Push the column text, never fails.
    ///
    /// Non utf8 bytes are replaced, and `NULL` is pushed as empty string.
    fn scan_column(&mut self, _: usize, _: &str, raw: Option<&[u8]>) -> Result<(), DecodeError> {
        let raw = raw.unwrap_or_default();
        self.0.push(String::from_utf8_lossy(raw).into_owned());
        Ok(())
    }
}

self_model!(Strings);

impl ValueAppender for Strings {
    /// Append comma separated string literals, `'a','b'`.
    ///
    /// Element is always quoted as [`Quote::Literal`] regardless of `quote`,
    /// so callers requesting [`Quote::Raw`] still get quoted output.
    fn append_value(&self, dst: &mut BytesMut, _: Quote) -> Result<()> {
        append_list(dst, &self.0, |dst, s| {
            quote::append_string(dst, s, Quote::Literal);
            Ok(())
        })
    }
}

// ===== Ints =====

/// Ordered list of `int8`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ints(Vec<i64>);

impl Ints {
    /// Create empty [`Ints`].
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Consume self into the inner [`Vec`].
    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }
}

impl ColumnScanner for Ints {
    fn scan_column(&mut self, _: usize, _: &str, raw: Option<&[u8]>) -> Result<(), DecodeError> {
        self.0.push(scan::int(raw)?);
        Ok(())
    }
}

self_model!(Ints);

impl ValueAppender for Ints {
    /// Append comma separated integers, `1,2,3`.
    fn append_value(&self, dst: &mut BytesMut, _: Quote) -> Result<()> {
        append_list(dst, &self.0, |dst, &n| {
            quote::append_int(dst, n);
            Ok(())
        })
    }
}

// ===== IntSet =====

/// Set of distinct `int8`.
///
/// Storage is allocated on the first scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntSet(Option<HashSet<i64>>);

impl IntSet {
    /// Create empty [`IntSet`] without allocating.
    pub const fn new() -> Self {
        Self(None)
    }

    /// Returns the number of distinct values.
    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, HashSet::len)
    }

    /// Returns `true` if set contains no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if set contains `value`.
    pub fn contains(&self, value: i64) -> bool {
        self.0.as_ref().is_some_and(|set| set.contains(&value))
    }

    /// Returns `true` if storage has been allocated.
    pub const fn is_allocated(&self) -> bool {
        self.0.is_some()
    }

    /// Iterate over values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().flatten().copied()
    }

    /// Consume self into the inner [`HashSet`].
    pub fn into_inner(self) -> HashSet<i64> {
        self.0.unwrap_or_default()
    }
}

impl ColumnScanner for IntSet {
    /// Insert the column integer, duplicate is ignored.
    fn scan_column(&mut self, _: usize, _: &str, raw: Option<&[u8]>) -> Result<(), DecodeError> {
        let set = self.0.get_or_insert_with(HashSet::new);
        set.insert(scan::int(raw)?);
        Ok(())
    }
}

self_model!(IntSet);

// ===== Conversion =====

macro_rules! list {
    ($ty:ident, $elem:ty) => {
        impl Deref for $ty {
            type Target = [$elem];

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<Vec<$elem>> for $ty {
            fn from(value: Vec<$elem>) -> Self {
                Self(value)
            }
        }

        impl FromIterator<$elem> for $ty {
            fn from_iter<I: IntoIterator<Item = $elem>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl IntoIterator for $ty {
            type Item = $elem;

            type IntoIter = std::vec::IntoIter<$elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }
    };
}

list!(Strings, String);
list!(Ints, i64);

impl FromIterator<i64> for IntSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(Some(iter.into_iter().collect()))
    }
}
