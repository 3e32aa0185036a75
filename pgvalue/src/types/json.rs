use bytes::BytesMut;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    Decode, DecodeError, Result, ValueAppender,
    quote::{self, Quote},
};

/// Scan and append postgres `json` or `jsonb` text value.
///
/// Appended as a string literal, cast it in the query if needed, e.g.
/// `'{"id":420}'::jsonb`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: DeserializeOwned> Decode for Json<T> {
    fn decode(raw: Option<&[u8]>) -> Result<Self, DecodeError> {
        Ok(Self(serde_json::from_slice(raw.ok_or(DecodeError::Null)?)?))
    }
}

impl<T: Serialize> ValueAppender for Json<T> {
    /// Serialization error leaves `dst` untouched.
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        let json = serde_json::to_string(&self.0)?;
        quote::append_string(dst, &json, quote);
        Ok(())
    }
}

impl<T: Serialize> Serialize for Json<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Json<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self(T::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;
    use crate::{ErrorKind, ScanValue};

    #[derive(Debug, Default, Deserialize, PartialEq, Eq)]
    struct Foo {
        id: i32,
    }

    #[test]
    fn scan_json() {
        let mut foo = Json(Foo::default());
        foo.scan_value(Some(br#"{"id":420}"#)).unwrap();
        assert_eq!(foo.0, Foo { id: 420 });

        assert!(matches!(foo.scan_value(Some(b"{")), Err(DecodeError::Json(_))));
        assert!(matches!(foo.scan_value(None), Err(DecodeError::Null)));
        assert_eq!(foo.0.id, 420);
    }

    #[test]
    fn append_json() {
        let value = Json(BTreeMap::from([("name", "it's")]));
        let mut dst = BytesMut::new();
        value.append_value(&mut dst, Quote::Literal).unwrap();
        assert_eq!(&dst[..], br#"'{"name":"it''s"}'"#);
    }

    #[test]
    fn append_json_error_keeps_dst() {
        let value = Json(BTreeMap::from([((1, 2), 3)]));
        let mut dst = BytesMut::from("keep");
        let err = value.append_value(&mut dst, Quote::Literal).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Json(_)));
        assert_eq!(&dst[..], b"keep");
    }
}
