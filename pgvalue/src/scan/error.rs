use std::{
    borrow::Cow,
    fmt,
    num::{ParseFloatError, ParseIntError},
    str::Utf8Error,
};

/// An error when scanning column value.
pub enum DecodeError {
    /// Value is not a base 10 integer, or out of range.
    Int(ParseIntError),
    /// Value is not a floating point number.
    Float(ParseFloatError),
    /// Value is not a postgres boolean text.
    Bool,
    /// Postgres return non utf8 string.
    Utf8(Utf8Error),
    /// Value is `NULL` but target cannot represent it.
    Null,
    /// Column requested not found.
    ColumnNotFound(Cow<'static,str>),
    /// Index requested is out of bounds.
    IndexOutOfBounds(usize),
    /// Failed to deserialize using `serde_json`.
    #[cfg(feature = "json")]
    Json(serde_json::error::Error),
    /// Failed to parse timestamp.
    #[cfg(feature = "time")]
    Time(time::error::Parse),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to decode value, ")?;
        match self {
            Self::Int(e) => write!(f, "{e}"),
            Self::Float(e) => write!(f, "{e}"),
            Self::Bool => write!(f, "invalid boolean"),
            Self::Utf8(e) => write!(f, "{e}"),
            Self::Null => write!(f, "unexpected NULL value"),
            Self::ColumnNotFound(name) => write!(f, "column not found: {name:?}"),
            Self::IndexOutOfBounds(u) => write!(f, "index out of bounds: {u:?}"),
            #[cfg(feature = "json")]
            Self::Json(e) => write!(f, "{e}"),
            #[cfg(feature = "time")]
            Self::Time(e) => write!(f, "{e}"),
        }
    }
}

macro_rules! from {
    (<$ty:ty>$pat:pat => $body:expr) => {
        impl From<$ty> for DecodeError {
            fn from($pat: $ty) -> Self {
                $body
            }
        }
    };
}

from!(<ParseIntError>e => Self::Int(e));
from!(<ParseFloatError>e => Self::Float(e));
from!(<Utf8Error>e => Self::Utf8(e));
#[cfg(feature = "json")]
from!(<serde_json::error::Error>e => Self::Json(e));
#[cfg(feature = "time")]
from!(<time::error::Parse>e => Self::Time(e));

impl std::error::Error for DecodeError { }

impl fmt::Debug for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
