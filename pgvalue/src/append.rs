//! The [`ValueAppender`] trait.
//!
//! - [`ValueAppender`]
//! - [`Q`]
//! - [`F`]
use bytes::{Bytes, BytesMut};

use crate::{
    Result,
    quote::{self, Quote},
};

/// Value that can be written as sql text.
pub trait ValueAppender {
    /// Append sql text form of self into `dst` with given quoting level.
    ///
    /// Prior content of `dst` must be kept, and on error `dst` must be left
    /// as it was before the call.
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()>;
}

/// Sql text that is already safe to be spliced into a query.
///
/// Written as is at every quote level.
///
/// ```
/// use bytes::BytesMut;
/// use pgvalue::{Q, Quote, ValueAppender};
///
/// let mut sql = BytesMut::from("SELECT * FROM users WHERE ");
/// Q::from_static("1=1").append_value(&mut sql, Quote::Literal).unwrap();
/// assert_eq!(&sql[..], b"SELECT * FROM users WHERE 1=1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Q(Bytes);

impl Q {
    /// Create new [`Q`].
    pub fn new(sql: impl Into<Bytes>) -> Self {
        Self(sql.into())
    }

    /// Create new [`Q`] from static str, without copying.
    pub const fn from_static(sql: &'static str) -> Self {
        Self(Bytes::from_static(sql.as_bytes()))
    }

    /// Returns the inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl ValueAppender for Q {
    fn append_value(&self, dst: &mut BytesMut, _: Quote) -> Result<()> {
        dst.extend_from_slice(&self.0);
        Ok(())
    }
}

/// Sql identifier, e.g. table or column name.
///
/// See [`append_field`][quote::append_field] for quoting rules.
///
/// ```
/// use bytes::BytesMut;
/// use pgvalue::{F, Quote, ValueAppender};
///
/// let mut sql = BytesMut::from("SELECT ");
/// F::from_static("users.name").append_value(&mut sql, Quote::Literal).unwrap();
/// assert_eq!(&sql[..], b"SELECT \"users\".\"name\"");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct F(Bytes);

impl F {
    /// Create new [`F`].
    pub fn new(field: impl Into<Bytes>) -> Self {
        Self(field.into())
    }

    /// Create new [`F`] from static str, without copying.
    pub const fn from_static(field: &'static str) -> Self {
        Self(Bytes::from_static(field.as_bytes()))
    }

    /// Returns the inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl ValueAppender for F {
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        quote::append_field(dst, &self.0, quote);
        Ok(())
    }
}

macro_rules! from_text {
    ($ty:ident) => {
        impl From<&'static str> for $ty {
            fn from(value: &'static str) -> Self {
                $ty::from_static(value)
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                $ty(value.into())
            }
        }
    };
}

from_text!(Q);
from_text!(F);

// ===== Scalar =====

impl<T: ValueAppender + ?Sized> ValueAppender for &T {
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        T::append_value(self, dst, quote)
    }
}

impl<T: ValueAppender> ValueAppender for Option<T> {
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        match self {
            Some(value) => value.append_value(dst, quote),
            None => {
                quote::append_null(dst);
                Ok(())
            },
        }
    }
}

impl ValueAppender for str {
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        quote::append_string(dst, self, quote);
        Ok(())
    }
}

impl ValueAppender for String {
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        quote::append_string(dst, self, quote);
        Ok(())
    }
}

impl ValueAppender for bool {
    fn append_value(&self, dst: &mut BytesMut, _: Quote) -> Result<()> {
        quote::append_bool(dst, *self);
        Ok(())
    }
}

macro_rules! append_int {
    ($($ty:ty),*) => {$(
        impl ValueAppender for $ty {
            fn append_value(&self, dst: &mut BytesMut, _: Quote) -> Result<()> {
                quote::append_int(dst, *self);
                Ok(())
            }
        }
    )*};
}

append_int!(i16, i32, i64);

impl ValueAppender for f64 {
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        quote::append_float(dst, *self, quote);
        Ok(())
    }
}

impl ValueAppender for f32 {
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        use std::fmt::Write;

        if self.is_finite() {
            // writing into `BytesMut` is infallible
            let _ = write!(dst, "{self}");
        } else {
            quote::append_float(dst, f64::from(*self), quote);
        }
        Ok(())
    }
}
