//! Column scanning.
//!
//! - [`ColumnScanner`]
//! - [`Model`]
//! - [`ScanValue`]
//! - [`Decode`]
//!
//! - [`Scan`]
//! - [`Discard`]
//! - [`DecodeError`]
mod error;
mod value;

pub use error::DecodeError;
pub use value::{Decode, ScanValue};

pub(crate) use value::{int, text};

/// Type that accumulates column values.
///
/// Called once per column per row by the row iteration driver.
pub trait ColumnScanner {
    /// Scan one column.
    ///
    /// `index` is 0 based, `raw` is [`None`] when column value is `NULL`. `raw`
    /// is only borrowed for the duration of the call.
    fn scan_column(&mut self, index: usize, name: &str, raw: Option<&[u8]>) -> Result<(), DecodeError>;
}

impl<T: ColumnScanner + ?Sized> ColumnScanner for &mut T {
    fn scan_column(&mut self, index: usize, name: &str, raw: Option<&[u8]>) -> Result<(), DecodeError> {
        T::scan_column(self, index, name, raw)
    }
}

/// Receiver of a whole result set.
///
/// For each row, the driver call [`new_model`][Model::new_model], feed every
/// column to the returned scanner, then call [`add_model`][Model::add_model].
pub trait Model {
    /// Returns the scanner for the next row.
    ///
    /// The scanner is borrowed from the model, so a model may hand out itself
    /// to accumulate every row into the same value.
    fn new_model(&mut self) -> &mut dyn ColumnScanner;

    /// Finalize the row most recently returned by [`new_model`][Model::new_model].
    fn add_model(&mut self) -> Result<(), DecodeError>;
}

impl<T: Model + ?Sized> Model for &mut T {
    fn new_model(&mut self) -> &mut dyn ColumnScanner {
        T::new_model(self)
    }

    fn add_model(&mut self) -> Result<(), DecodeError> {
        T::add_model(self)
    }
}

/// Model that discards every row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl ColumnScanner for Discard {
    fn scan_column(&mut self, _: usize, _: &str, _: Option<&[u8]>) -> Result<(), DecodeError> {
        Ok(())
    }
}

impl Model for Discard {
    fn new_model(&mut self) -> &mut dyn ColumnScanner {
        self
    }

    fn add_model(&mut self) -> Result<(), DecodeError> {
        Ok(())
    }
}

/// Scanner that copies each column into the value at the same position.
///
/// As a [`Model`], every row is scanned into the same values, so the last
/// row wins.
///
/// Use [`scan!`][crate::scan!] for convenience.
pub struct Scan<'a> {
    values: Vec<&'a mut dyn ScanValue>,
}

impl<'a> Scan<'a> {
    /// Create new [`Scan`].
    pub fn new(values: Vec<&'a mut dyn ScanValue>) -> Self {
        Self { values }
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there is no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ColumnScanner for Scan<'_> {
    fn scan_column(&mut self, index: usize, _: &str, raw: Option<&[u8]>) -> Result<(), DecodeError> {
        match self.values.get_mut(index) {
            Some(value) => value.scan_value(raw),
            None => Err(DecodeError::IndexOutOfBounds(index)),
        }
    }
}

impl Model for Scan<'_> {
    fn new_model(&mut self) -> &mut dyn ColumnScanner {
        self
    }

    fn add_model(&mut self) -> Result<(), DecodeError> {
        Ok(())
    }
}

impl std::fmt::Debug for Scan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scan").field("len", &self.values.len()).finish()
    }
}

/// Create [`Scan`] that copies columns into given places.
///
/// ```
/// use pgvalue::{ColumnScanner, scan};
///
/// let mut id = 0i32;
/// scan!(id).scan_column(0, "id", Some(b"7")).unwrap();
/// assert_eq!(id, 7);
/// ```
#[macro_export]
macro_rules! scan {
    ($($value:expr),* $(,)?) => {
        $crate::Scan::new(vec![$(&mut $value as &mut dyn $crate::ScanValue),*])
    };
}
