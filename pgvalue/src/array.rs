//! Comma separated list composition.
use bytes::{BufMut, BytesMut};

use crate::Result;

/// Append each item using `f` separated by comma, without trailing separator.
///
/// Nothing is written for empty `items`. If `f` returns error, `dst` is
/// truncated back to its length before the call.
///
/// No bracket is written, wrapping the list with `ARRAY[..]`, `IN (..)` or
/// `'{..}'` is the caller choice.
pub fn append_list<I, F>(dst: &mut BytesMut, items: I, mut f: F) -> Result<()>
where
    I: IntoIterator,
    F: FnMut(&mut BytesMut, I::Item) -> Result<()>,
{
    let start = dst.len();

    for item in items {
        if let Err(err) = f(dst, item) {
            dst.truncate(start);
            return Err(err);
        }
        dst.put_u8(b',');
    }

    if dst.len() > start {
        // trailing separator
        dst.truncate(dst.len() - 1);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{DecodeError, ValueAppender, quote::Quote};

    #[test]
    fn no_trailing_separator() {
        let mut dst = BytesMut::from("(");
        append_list(&mut dst, ["a", "b", "c"], |dst, e| e.append_value(dst, Quote::Literal)).unwrap();
        assert_eq!(&dst[..], b"('a','b','c'");
    }

    #[test]
    fn empty_is_noop() {
        let mut dst = BytesMut::from("x");
        append_list(&mut dst, Vec::<i64>::new(), |dst, e| e.append_value(dst, Quote::Raw)).unwrap();
        assert_eq!(&dst[..], b"x");
    }

    #[test]
    fn single_item() {
        let mut dst = BytesMut::new();
        append_list(&mut dst, [1i64], |dst, e| e.append_value(dst, Quote::Raw)).unwrap();
        assert_eq!(&dst[..], b"1");
    }

    #[test]
    fn error_restores_dst() {
        let mut dst = BytesMut::from("keep");
        let result = append_list(&mut dst, [1i64, 2, 3], |dst, e| {
            if e == 3 {
                return Err(DecodeError::Null.into());
            }
            e.append_value(dst, Quote::Raw)
        });
        assert!(result.is_err());
        assert_eq!(&dst[..], b"keep");
    }
}
