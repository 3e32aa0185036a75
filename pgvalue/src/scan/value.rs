use super::DecodeError;

/// A type that can be constructed from a text format column.
pub trait Decode: Sized {
    /// Try decode self from raw column, [`None`] is `NULL`.
    fn decode(raw: Option<&[u8]>) -> Result<Self, DecodeError>;
}

/// Value that can be overwritten from a text format column.
///
/// Implemented for every [`Decode`] type.
pub trait ScanValue {
    /// Decode `raw` into self.
    ///
    /// Self is left untouched on error.
    fn scan_value(&mut self, raw: Option<&[u8]>) -> Result<(), DecodeError>;
}

impl<T: Decode> ScanValue for T {
    fn scan_value(&mut self, raw: Option<&[u8]>) -> Result<(), DecodeError> {
        *self = T::decode(raw)?;
        Ok(())
    }
}

/// Text of a non `NULL` column.
pub(crate) fn text(raw: Option<&[u8]>) -> Result<&str, DecodeError> {
    Ok(std::str::from_utf8(raw.ok_or(DecodeError::Null)?)?)
}

/// Base 10 signed integer of a non `NULL` column.
pub(crate) fn int(raw: Option<&[u8]>) -> Result<i64, DecodeError> {
    Ok(text(raw)?.parse()?)
}

impl<T: Decode> Decode for Option<T> {
    fn decode(raw: Option<&[u8]>) -> Result<Self, DecodeError> {
        match raw {
            None => Ok(None),
            Some(_) => T::decode(raw).map(Some),
        }
    }
}

impl Decode for String {
    fn decode(raw: Option<&[u8]>) -> Result<Self, DecodeError> {
        text(raw).map(String::from)
    }
}

impl Decode for bool {
    fn decode(raw: Option<&[u8]>) -> Result<Self, DecodeError> {
        match text(raw)? {
            "t" | "true" => Ok(true),
            "f" | "false" => Ok(false),
            _ => Err(DecodeError::Bool),
        }
    }
}

macro_rules! decode_parse {
    ($($ty:ty),*) => {$(
        impl Decode for $ty {
            fn decode(raw: Option<&[u8]>) -> Result<Self, DecodeError> {
                Ok(text(raw)?.parse()?)
            }
        }
    )*};
}

decode_parse!(i16, i32, i64, f32, f64);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(i16::decode(Some(b"-12")).unwrap(), -12);
        assert_eq!(i32::decode(Some(b"2147483647")).unwrap(), i32::MAX);
        assert_eq!(i64::decode(Some(b"+5")).unwrap(), 5);
        assert!(matches!(i32::decode(Some(b"2147483648")), Err(DecodeError::Int(_))));
        assert!(matches!(i64::decode(Some(b"")), Err(DecodeError::Int(_))));
        assert!(matches!(i64::decode(Some(b"1.0")), Err(DecodeError::Int(_))));
        assert!(matches!(i64::decode(None), Err(DecodeError::Null)));
    }

    #[test]
    fn floats() {
        assert_eq!(f64::decode(Some(b"1.5")).unwrap(), 1.5);
        assert!(f64::decode(Some(b"NaN")).unwrap().is_nan());
        assert_eq!(f32::decode(Some(b"-Infinity")).unwrap(), f32::NEG_INFINITY);
        assert!(matches!(f64::decode(Some(b"one")), Err(DecodeError::Float(_))));
    }

    #[test]
    fn booleans() {
        assert!(bool::decode(Some(b"t")).unwrap());
        assert!(!bool::decode(Some(b"false")).unwrap());
        assert!(matches!(bool::decode(Some(b"yes")), Err(DecodeError::Bool)));
    }

    #[test]
    fn strings() {
        assert_eq!(String::decode(Some(b"")).unwrap(), "");
        assert_eq!(String::decode(Some("héllo".as_bytes())).unwrap(), "héllo");
        assert!(matches!(String::decode(Some(b"\xff")), Err(DecodeError::Utf8(_))));
        assert!(matches!(String::decode(None), Err(DecodeError::Null)));
    }

    #[test]
    fn optional() {
        assert_eq!(Option::<i32>::decode(None).unwrap(), None);
        assert_eq!(Option::<i32>::decode(Some(b"3")).unwrap(), Some(3));
    }

    #[test]
    fn scan_keeps_value_on_error() {
        let mut value = Some(1i32);
        assert!(value.scan_value(Some(b"x")).is_err());
        assert_eq!(value, Some(1));

        value.scan_value(None).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn helpers() {
        assert_eq!(int(Some(b"-9223372036854775808")).unwrap(), i64::MIN);
        assert!(matches!(int(Some(b"9223372036854775808")), Err(DecodeError::Int(_))));
        assert_eq!(text(Some(b"abc")).unwrap(), "abc");
    }
}
