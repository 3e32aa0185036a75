//! Sql text quoting and escaping.
//!
//! - [`Quote`]
//! - [`append_string`]
//! - [`append_field`]
//! - [`append_int`]
use bytes::{BufMut, BytesMut};

/// Quoting level requested when a value is written into sql text.
///
/// Levels are ordered, `0` is raw and each level nests one quoting deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Quote {
    /// Written as is, caller is responsible for safety.
    #[default]
    Raw = 0,
    /// Single quoted string literal, `'it''s'`.
    Literal = 1,
    /// Double quoted element inside a single quoted array literal,
    /// `'{"it''s","a\"b"}'`.
    Element = 2,
}

impl Quote {
    /// Returns the integer level.
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Create quote from integer level, level above `2` is [`Quote::Element`].
    pub const fn from_level(level: u8) -> Quote {
        match level {
            0 => Quote::Raw,
            1 => Quote::Literal,
            _ => Quote::Element,
        }
    }

    /// Returns `true` if value should be quoted.
    pub const fn is_quoted(self) -> bool {
        !matches!(self, Quote::Raw)
    }
}

impl From<u8> for Quote {
    fn from(level: u8) -> Self {
        Quote::from_level(level)
    }
}

/// Append string value.
///
/// Nul is dropped at every level, postgres text cannot contain it.
pub fn append_string(dst: &mut BytesMut, value: &str, quote: Quote) {
    append_string_bytes(dst, value.as_bytes(), quote);
}

/// Same as [`append_string`] for bytes.
pub fn append_string_bytes(dst: &mut BytesMut, value: &[u8], quote: Quote) {
    match quote {
        Quote::Raw => {},
        Quote::Literal => dst.put_u8(b'\''),
        Quote::Element => dst.put_u8(b'"'),
    }

    dst.reserve(value.len());

    for &b in value {
        match (b, quote) {
            (b'\0', _) => {},
            (b'\'', Quote::Literal | Quote::Element) => dst.put_slice(b"''"),
            (b'"' | b'\\', Quote::Element) => {
                dst.put_u8(b'\\');
                dst.put_u8(b);
            },
            _ => dst.put_u8(b),
        }
    }

    match quote {
        Quote::Raw => {},
        Quote::Literal => dst.put_u8(b'\''),
        Quote::Element => dst.put_u8(b'"'),
    }
}

/// Append sql identifier, e.g. table or column name.
///
/// When quoted, each dot separated part is double quoted separately and
/// `*` is left as is, so `users.*` becomes `"users".*`.
pub fn append_field(dst: &mut BytesMut, field: &[u8], quote: Quote) {
    if !quote.is_quoted() {
        dst.put_slice(field);
        return;
    }

    for (i, part) in field.split(|e| matches!(e, b'.')).enumerate() {
        if i != 0 {
            dst.put_u8(b'.');
        }

        if part == b"*" {
            dst.put_u8(b'*');
            continue;
        }

        dst.put_u8(b'"');
        for &b in part {
            match b {
                b'\0' => {},
                b'"' => dst.put_slice(b"\"\""),
                _ => dst.put_u8(b),
            }
        }
        dst.put_u8(b'"');
    }
}

/// Append integer in base 10, quoting is irrelevant for integer.
pub fn append_int<I: itoa::Integer>(dst: &mut BytesMut, value: I) {
    dst.put_slice(itoa::Buffer::new().format(value).as_bytes());
}

/// Append boolean as `TRUE` or `FALSE`.
pub fn append_bool(dst: &mut BytesMut, value: bool) {
    dst.put_slice(if value { &b"TRUE"[..] } else { b"FALSE" });
}

/// Append `NULL`.
pub fn append_null(dst: &mut BytesMut) {
    dst.put_slice(b"NULL");
}

/// Append floating point number.
///
/// Non finite values are written as postgres special string, which must be
/// quoted unless nested inside array literal.
pub fn append_float(dst: &mut BytesMut, value: f64, quote: Quote) {
    use std::fmt::Write;

    let special = if value.is_nan() {
        "NaN"
    } else if value == f64::INFINITY {
        "Infinity"
    } else if value == f64::NEG_INFINITY {
        "-Infinity"
    } else {
        // writing into `BytesMut` is infallible
        let _ = write!(dst, "{value}");
        return;
    };

    match quote {
        Quote::Element => dst.put_slice(special.as_bytes()),
        Quote::Raw | Quote::Literal => append_string(dst, special, Quote::Literal),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn string(value: &str, quote: Quote) -> BytesMut {
        let mut dst = BytesMut::new();
        append_string(&mut dst, value, quote);
        dst
    }

    fn field(value: &str, quote: Quote) -> BytesMut {
        let mut dst = BytesMut::new();
        append_field(&mut dst, value.as_bytes(), quote);
        dst
    }

    #[test]
    fn quote_level() {
        assert_eq!(Quote::from_level(0), Quote::Raw);
        assert_eq!(Quote::from_level(1), Quote::Literal);
        assert_eq!(Quote::from_level(2), Quote::Element);
        assert_eq!(Quote::from_level(7), Quote::Element);
        assert_eq!(Quote::Literal.level(), 1);
        assert_eq!(Quote::from(2u8), Quote::Element);
        assert!(Quote::Raw < Quote::Literal);
    }

    #[test]
    fn string_raw() {
        assert_eq!(&string("it's", Quote::Raw)[..], b"it's");
        assert_eq!(&string("a\0b", Quote::Raw)[..], b"ab");
    }

    #[test]
    fn string_literal() {
        assert_eq!(&string("foo", Quote::Literal)[..], b"'foo'");
        assert_eq!(&string("it's", Quote::Literal)[..], b"'it''s'");
        assert_eq!(&string("", Quote::Literal)[..], b"''");
        assert_eq!(&string("a\"b\\c", Quote::Literal)[..], b"'a\"b\\c'");
    }

    #[test]
    fn string_element() {
        assert_eq!(&string("foo", Quote::Element)[..], b"\"foo\"");
        assert_eq!(&string("it's", Quote::Element)[..], b"\"it''s\"");
        assert_eq!(&string("a\"b\\c", Quote::Element)[..], b"\"a\\\"b\\\\c\"");
    }

    #[test]
    fn field_quoting() {
        assert_eq!(&field("users", Quote::Raw)[..], b"users");
        assert_eq!(&field("users", Quote::Literal)[..], b"\"users\"");
        assert_eq!(&field("users.name", Quote::Literal)[..], b"\"users\".\"name\"");
        assert_eq!(&field("users.*", Quote::Literal)[..], b"\"users\".*");
        assert_eq!(&field("we\"ird", Quote::Element)[..], b"\"we\"\"ird\"");
    }

    #[test]
    fn scalars() {
        let mut dst = BytesMut::new();
        append_int(&mut dst, -42i64);
        dst.put_u8(b' ');
        append_bool(&mut dst, true);
        dst.put_u8(b' ');
        append_null(&mut dst);
        dst.put_u8(b' ');
        append_float(&mut dst, 1.5, Quote::Literal);
        dst.put_u8(b' ');
        append_float(&mut dst, f64::NAN, Quote::Raw);
        dst.put_u8(b' ');
        append_float(&mut dst, f64::NEG_INFINITY, Quote::Element);
        assert_eq!(&dst[..], b"-42 TRUE NULL 1.5 'NaN' -Infinity");
    }
}
