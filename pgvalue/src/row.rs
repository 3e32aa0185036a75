//! Postgres row operation.
//!
//! - [`RowDescription`]
//! - [`Row`]
//! - [`Column`]
//! - [`scan_rows`]
//!
//! - [`Index`]
//! - [`ProtocolError`]
use bytes::Bytes;
use std::{fmt, sync::Arc};

use crate::{
    Result,
    common::{span, verbose},
    ext::{BytesExt, FmtExt},
    scan::{ColumnScanner, Decode, DecodeError, Model},
};

/// Postgres object identifier.
///
/// <https://www.postgresql.org/docs/current/datatype-oid.html>
pub type Oid = u32;

/// Field metadata of a [`RowDescription`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    table_oid: Oid,
    attribute: i16,
    oid: Oid,
    format: i16,
}

impl Field {
    /// `body` is start of data **after** field name
    fn parse(name: String, body: &mut Bytes) -> Option<Self> {
        let table_oid = body.checked_u32()?;
        let attribute = body.checked_i16()?;
        let oid = body.checked_u32()?;
        let _size = body.checked_i16()?;
        let _modifier = body.checked_i32()?;
        let format = body.checked_i16()?;
        Some(Self { name, table_oid, attribute, oid, format })
    }

    /// Returns field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns table [`Oid`], or zero if field is not a table column.
    pub const fn table_oid(&self) -> Oid {
        self.table_oid
    }

    /// Returns table attribute number, or zero if field is not a table column.
    pub const fn attribute(&self) -> i16 {
        self.attribute
    }

    /// Returns data type [`Oid`].
    pub const fn oid(&self) -> Oid {
        self.oid
    }

    /// Returns format code, zero is text and one is binary.
    pub const fn format(&self) -> i16 {
        self.format
    }
}

/// `RowDescription` message body.
///
/// Cheap to clone, every [`Row`] share its description.
///
/// <https://www.postgresql.org/docs/current/protocol-message-formats.html#PROTOCOL-MESSAGE-FORMATS-ROWDESCRIPTION>
#[derive(Debug, Clone)]
pub struct RowDescription {
    fields: Arc<[Field]>,
}

impl RowDescription {
    /// Parse `RowDescription` message body, without the message header.
    pub fn parse(mut body: Bytes) -> Result<Self, ProtocolError> {
        let len = body.checked_i16().ok_or(ProtocolError::Truncated("RowDescription"))?;
        let len = usize::try_from(len).map_err(|_| ProtocolError::NegativeLength("RowDescription"))?;
        let mut fields = Vec::with_capacity(len);

        for _ in 0..len {
            let name = body.checked_nul_bytes().ok_or(ProtocolError::Truncated("RowDescription"))?;
            let name = String::from_utf8(name.into()).map_err(|_| ProtocolError::NonUtf8Name)?;

            let field = Field::parse(name, &mut body).ok_or(ProtocolError::Truncated("RowDescription"))?;
            fields.push(field);
        }

        Ok(Self { fields: fields.into() })
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if description contains no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns all fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Parse `DataRow` message body, without the message header.
    pub fn row(&self, mut body: Bytes) -> Result<Row, ProtocolError> {
        let len = body.checked_i16().ok_or(ProtocolError::Truncated("DataRow"))?;
        if usize::try_from(len).ok() != Some(self.fields.len()) {
            return Err(ProtocolError::ColumnCount { expect: self.fields.len(), found: len });
        }

        let mut values = Vec::with_capacity(self.fields.len());
        for _ in 0..len {
            let len = body.checked_i32().ok_or(ProtocolError::Truncated("DataRow"))?;
            let value = match len {
                -1 => None,
                i32::MIN..=-2 => return Err(ProtocolError::NegativeLength("DataRow")),
                len => Some(body.checked_split(len as usize).ok_or(ProtocolError::Truncated("DataRow"))?),
            };
            values.push(value);
        }

        Ok(Row { fields: self.fields.clone(), values })
    }

    /// Parse each `DataRow` body and scan it into `model`.
    ///
    /// Returns the number of rows scanned.
    pub fn scan_data_rows<M, I>(&self, model: &mut M, bodies: I) -> Result<u64>
    where
        M: Model + ?Sized,
        I: IntoIterator<Item = Bytes>,
    {
        span!("scan_data_rows", fields = self.fields.len());
        let mut n = 0;
        for body in bodies {
            let row = self.row(body)?;
            row.scan(model.new_model())?;
            model.add_model()?;
            n += 1;
        }
        verbose!(rows = n, "scan complete");
        Ok(n)
    }
}

/// Postgres row in text format.
pub struct Row {
    fields: Arc<[Field]>,
    values: Vec<Option<Bytes>>,
}

impl Row {
    /// Returns `true` if row contains no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns column at given index.
    pub fn column(&self, index: usize) -> Option<Column<'_>> {
        Some(Column {
            index,
            field: self.fields.get(index)?,
            value: self.values.get(index)?.as_deref(),
        })
    }

    /// Iterate over columns.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = Column<'_>> + '_ {
        self.fields
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(index, (field, value))| Column { index, field, value: value.as_deref() })
    }

    /// Try get and scan column.
    pub fn try_get<I: Index, D: Decode>(&self, idx: I) -> Result<D, DecodeError> {
        let index = idx.position(&self.fields)?;
        D::decode(self.values[index].as_deref())
    }

    /// Feed every column to `scanner` in order.
    ///
    /// Stops at the first error.
    pub fn scan(&self, scanner: &mut dyn ColumnScanner) -> Result<(), DecodeError> {
        for col in self.columns() {
            if let Err(err) = scanner.scan_column(col.index, col.name(), col.value) {
                verbose!(index = col.index, name = col.name(), "failed to scan column: {err}");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_map();
        for col in self.columns() {
            dbg.key(&col.name());
            match col.value {
                None => dbg.value(&format_args!("NULL")),
                Some(value) => dbg.value(&value.lossy()),
            };
        }
        dbg.finish()
    }
}

/// Postgres column borrowed from a [`Row`].
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    index: usize,
    field: &'a Field,
    value: Option<&'a [u8]>,
}

impl<'a> Column<'a> {
    /// Returns column index.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns column name.
    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    /// Returns column [`Oid`].
    pub const fn oid(&self) -> Oid {
        self.field.oid
    }

    /// Return `true` if value is NULL.
    pub const fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Returns raw value, [`None`] if value is `NULL`.
    pub const fn as_slice(&self) -> Option<&'a [u8]> {
        self.value
    }

    /// Try decode type using [`Decode`] implementation.
    pub fn decode<D: Decode>(&self) -> Result<D, DecodeError> {
        D::decode(self.value)
    }
}

/// Drive `model` over `rows`, returns the number of rows scanned.
///
/// For each row, [`new_model`][Model::new_model] is called, every column is
/// scanned in order, then [`add_model`][Model::add_model] is called. Stops at
/// the first error, rows scanned before it are kept by the model.
pub fn scan_rows<M, I>(model: &mut M, rows: I) -> Result<u64, DecodeError>
where
    M: Model + ?Sized,
    I: IntoIterator<Item = Row>,
{
    span!("scan_rows");
    let mut n = 0;
    for row in rows {
        row.scan(model.new_model())?;
        model.add_model()?;
        n += 1;
    }
    verbose!(rows = n, "scan complete");
    Ok(n)
}

// ===== Index =====

/// Type that can be used for indexing column.
pub trait Index: Sized + sealed::Sealed {
    /// Returns the column index.
    fn position(self, fields: &[Field]) -> Result<usize, DecodeError>;
}

impl Index for usize {
    fn position(self, fields: &[Field]) -> Result<usize, DecodeError> {
        match self < fields.len() {
            true => Ok(self),
            false => Err(DecodeError::IndexOutOfBounds(self)),
        }
    }
}

impl Index for &str {
    fn position(self, fields: &[Field]) -> Result<usize, DecodeError> {
        fields
            .iter()
            .position(|field| field.name == self)
            .ok_or_else(|| DecodeError::ColumnNotFound(String::from(self).into()))
    }
}

mod sealed {
    pub trait Sealed { }
    impl Sealed for usize { }
    impl Sealed for &str { }
}

// ===== Error =====

/// An error when message body is malformed.
pub enum ProtocolError {
    /// Body ends before the message is complete.
    Truncated(&'static str),
    /// Negative count or length other than `NULL` marker.
    NegativeLength(&'static str),
    /// Field name is not utf8.
    NonUtf8Name,
    /// `DataRow` column count does not match `RowDescription`.
    ColumnCount { expect: usize, found: i16 },
}

impl std::error::Error for ProtocolError { }

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated(msg) => write!(f, "truncated `{msg}` message"),
            Self::NegativeLength(msg) => write!(f, "negative length in `{msg}` message"),
            Self::NonUtf8Name => write!(f, "field name is not utf8"),
            Self::ColumnCount { expect, found } => {
                write!(f, "expected {expect} columns in `DataRow` found {found}")
            },
        }
    }
}

impl fmt::Debug for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::{ErrorKind, Ints, Strings, scan::Discard};

    fn description(fields: &[(&str, Oid)]) -> Bytes {
        let mut b = BytesMut::new();
        b.put_i16(fields.len() as i16);
        for (name, oid) in fields {
            b.put_slice(name.as_bytes());
            b.put_u8(b'\0');
            b.put_u32(0);
            b.put_i16(0);
            b.put_u32(*oid);
            b.put_i16(-1);
            b.put_i32(-1);
            b.put_i16(0);
        }
        b.freeze()
    }

    fn data_row(values: &[Option<&str>]) -> Bytes {
        let mut b = BytesMut::new();
        b.put_i16(values.len() as i16);
        for value in values {
            match value {
                Some(value) => {
                    b.put_i32(value.len() as i32);
                    b.put_slice(value.as_bytes());
                },
                None => b.put_i32(-1),
            }
        }
        b.freeze()
    }

    #[test]
    fn parse_description() {
        let desc = RowDescription::parse(description(&[("id", 20), ("name", 25)])).unwrap();
        assert_eq!(desc.len(), 2);
        assert_eq!(desc.fields()[0].name(), "id");
        assert_eq!(desc.fields()[0].oid(), 20);
        assert_eq!(desc.fields()[1].name(), "name");
        assert_eq!(desc.fields()[1].format(), 0);
    }

    #[test]
    fn row_columns() {
        let desc = RowDescription::parse(description(&[("id", 20), ("name", 25)])).unwrap();
        let row = desc.row(data_row(&[Some("1"), None])).unwrap();
        assert_eq!(row.len(), 2);

        let id = row.column(0).unwrap();
        assert_eq!(id.name(), "id");
        assert_eq!(id.as_slice(), Some(&b"1"[..]));
        assert_eq!(id.decode::<i64>().unwrap(), 1);

        let name = row.column(1).unwrap();
        assert!(name.is_null());
        assert!(row.column(2).is_none());

        assert_eq!(row.try_get::<_, i32>("id").unwrap(), 1);
        assert_eq!(row.try_get::<_, Option<String>>(1).unwrap(), None);
        assert!(matches!(row.try_get::<_, String>("name"), Err(DecodeError::Null)));
        assert!(matches!(row.try_get::<_, i64>("nope"), Err(DecodeError::ColumnNotFound(_))));
        assert!(matches!(row.try_get::<_, i64>(9), Err(DecodeError::IndexOutOfBounds(9))));

        assert_eq!(format!("{row:?}"), r#"{"id": b"1", "name": NULL}"#);
    }

    #[test]
    fn scan_with_macro() {
        let desc = RowDescription::parse(description(&[("id", 20), ("name", 25), ("ok", 16)])).unwrap();
        let row = desc.row(data_row(&[Some("1"), Some("foo"), None])).unwrap();

        let mut id = 0i64;
        let mut name = String::new();
        let mut ok = Some(true);
        row.scan(&mut crate::scan!(id, name, ok)).unwrap();

        assert_eq!(id, 1);
        assert_eq!(name, "foo");
        assert_eq!(ok, None);
    }

    #[test]
    fn scan_rows_into_collection() {
        let desc = RowDescription::parse(description(&[("id", 20)])).unwrap();
        let rows = ["3", "1", "2"].map(|e| desc.row(data_row(&[Some(e)])).unwrap());

        let mut ints = Ints::new();
        assert_eq!(scan_rows(&mut ints, rows).unwrap(), 3);
        assert_eq!(&ints[..], [3, 1, 2]);
    }

    #[test]
    fn scan_rows_stop_at_error() {
        let desc = RowDescription::parse(description(&[("id", 20)])).unwrap();
        let rows = [Some("1"), None, Some("2")].map(|e| desc.row(data_row(&[e])).unwrap());

        let mut ints = Ints::new();
        assert!(matches!(scan_rows(&mut ints, rows), Err(DecodeError::Null)));
        assert_eq!(&ints[..], [1]);
    }

    #[test]
    fn scan_data_rows() {
        let desc = RowDescription::parse(description(&[("name", 25)])).unwrap();
        let bodies = vec![data_row(&[Some("x")]), data_row(&[Some("y")])];

        let mut strings = Strings::new();
        assert_eq!(desc.scan_data_rows(&mut strings, bodies).unwrap(), 2);
        assert_eq!(&strings[..], ["x", "y"]);

        let err = desc.scan_data_rows(&mut Discard, [data_row(&[Some("a"), Some("b")])]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Protocol(ProtocolError::ColumnCount { expect: 1, found: 2 })));
    }

    #[test]
    fn malformed_body() {
        assert!(matches!(
            RowDescription::parse(Bytes::from_static(b"\x00")),
            Err(ProtocolError::Truncated(_))
        ));
        assert!(matches!(
            RowDescription::parse(Bytes::from_static(b"\x00\x01id\0\x00\x00")),
            Err(ProtocolError::Truncated(_))
        ));
        assert!(matches!(
            RowDescription::parse(Bytes::from_static(b"\xff\xff")),
            Err(ProtocolError::NegativeLength(_))
        ));

        let desc = RowDescription::parse(description(&[("id", 20)])).unwrap();
        assert!(matches!(
            desc.row(Bytes::from_static(b"\x00\x01\x00\x00\x00\x05ab")),
            Err(ProtocolError::Truncated(_))
        ));
        assert!(matches!(
            desc.row(Bytes::from_static(b"\x00\x01\xff\xff\xff\xfe")),
            Err(ProtocolError::NegativeLength(_))
        ));
    }
}
