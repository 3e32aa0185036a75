use bytes::BytesMut;
use time::{
    PrimitiveDateTime,
    format_description::{BorrowedFormatItem as I, Component as C, modifier},
};

use crate::{
    Decode, DecodeError, Result, ValueAppender,
    quote::{self, Quote},
    scan::text,
};

/// `timestamp` text format, `2025-04-01 13:45:09.123`
const DESCRIPTION: &[I<'_>] = &[
    I::Component(C::Year(modifier::Year::default())),
    I::Literal(b"-"),
    I::Component(C::Month(modifier::Month::default())),
    I::Literal(b"-"),
    I::Component(C::Day(modifier::Day::default())),
    I::Literal(b" "),
    I::Component(C::Hour(modifier::Hour::default())),
    I::Literal(b":"),
    I::Component(C::Minute(modifier::Minute::default())),
    I::Literal(b":"),
    I::Component(C::Second(modifier::Second::default())),
    I::Optional(&FRACTION),
];

const FRACTION: I<'_> = I::Compound(SUBSECOND);

const SUBSECOND: &[I<'_>] = &[
    I::Literal(b"."),
    I::Component(C::Subsecond(modifier::Subsecond::default())),
];

impl Decode for PrimitiveDateTime {
    fn decode(raw: Option<&[u8]>) -> Result<Self, DecodeError> {
        Ok(PrimitiveDateTime::parse(text(raw)?, DESCRIPTION)?)
    }
}

impl ValueAppender for PrimitiveDateTime {
    fn append_value(&self, dst: &mut BytesMut, quote: Quote) -> Result<()> {
        let value = self
            .format(DESCRIPTION)
            .expect("format is statically known");
        quote::append_string(dst, &value, quote);
        Ok(())
    }
}
