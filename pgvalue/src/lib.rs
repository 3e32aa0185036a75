//! Postgres value scanning and appending
//!
//! Two sides of the value layer of a Postgres client:
//!
//! - scanning, raw text format column bytes are fed into a [`ColumnScanner`]
//!   once per column per row, a [`Model`] hands out the scanner for each row
//! - appending, a [`ValueAppender`] writes its sql text form into a query buffer
//!
//! # Examples
//!
//! Scanning one column result into a collection, then splicing it back into
//! another query:
//!
//! ```
//! use bytes::BytesMut;
//! use pgvalue::{ColumnScanner, Quote, Strings, ValueAppender};
//!
//! # fn app() -> pgvalue::Result<()> {
//! let mut names = Strings::new();
//! names.scan_column(0, "name", Some(b"foo"))?;
//! names.scan_column(0, "name", Some(b"it's"))?;
//!
//! let mut sql = BytesMut::from("SELECT id FROM users WHERE name IN (");
//! names.append_value(&mut sql, Quote::Raw)?;
//! sql.extend_from_slice(b")");
//!
//! assert_eq!(&sql[..], b"SELECT id FROM users WHERE name IN ('foo','it''s')");
//! # Ok(())
//! # }
//! # app().unwrap();
//! ```
//!
//! Scalar columns:
//!
//! ```
//! use pgvalue::{ColumnScanner, scan};
//!
//! # fn app() -> pgvalue::Result<()> {
//! let mut id = 0i64;
//! let mut name = String::new();
//! let mut deleted: Option<bool> = Some(true);
//!
//! let mut row = scan!(id, name, deleted);
//! row.scan_column(0, "id", Some(b"420"))?;
//! row.scan_column(1, "name", Some(b"Foo"))?;
//! row.scan_column(2, "deleted", None)?;
//! drop(row);
//!
//! assert_eq!(id, 420);
//! assert_eq!(name, "Foo");
//! assert_eq!(deleted, None);
//! # Ok(())
//! # }
//! # app().unwrap();
//! ```

mod common;
mod ext;

// Appending
pub mod quote;
pub mod append;
pub mod array;

// Scanning
pub mod scan;
pub mod collection;
pub mod row;

pub mod types;

mod error;

pub use quote::Quote;
pub use append::{ValueAppender, Q, F};
pub use scan::{ColumnScanner, Model, Decode, ScanValue, Scan, Discard, DecodeError};
pub use collection::{Strings, Ints, IntSet};
pub use row::{Row, RowDescription, scan_rows};
pub use error::{Error, ErrorKind, Result};
