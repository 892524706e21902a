//! # Typed catalog columns
//!
//! A [`Column`] is a named vector of per-row scalars. Three storage types are supported,
//! matching what the ASCII reader can infer from a whitespace-delimited catalog:
//!
//! - [`ColumnData::Int`] – integer flags, object numbers, counts (`i64`)
//! - [`ColumnData::Float`] – positions, fluxes, shape parameters (`f64`)
//! - [`ColumnData::Text`] – anything that does not parse as a number
//!
//! Single cells are exposed through [`CellValue`], whose `Display` implementation
//! renders numbers the way the catalog and region writers expect them on disk:
//! integers plainly, floats in shortest round-trip form with a `.0` kept on integral
//! values (`1.0`, `20.25`, `30`).
use std::borrow::Cow;
use std::fmt;

use crate::catmatch_errors::CatMatchError;

/// Storage of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short type label, used by the table display.
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Int(_) => "int",
            ColumnData::Float(_) => "float",
            ColumnData::Text(_) => "str",
        }
    }

    /// Gather the rows at `indices`, in the given order. Indices may repeat.
    ///
    /// Panics
    /// ----------
    /// * If any index is out of bounds.
    fn take(&self, indices: &[usize]) -> ColumnData {
        match self {
            ColumnData::Int(v) => ColumnData::Int(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Float(v) => ColumnData::Float(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Text(v) => {
                ColumnData::Text(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}

/// A single cell, borrowed from its column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{}", format_float(v)),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Render a float in shortest round-trip form, keeping a `.0` on integral values.
///
/// Rust prints `1.0_f64` as `1`; catalogs written by astronomy tools keep the decimal
/// point so that the column type survives a write/read cycle.
pub(crate) fn format_float(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v == f64::INFINITY {
        "inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if v.fract() == 0.0 {
        // `1e16` rather than `10000000000000000`, which would read back as an integer
        format!("{v:?}")
    } else {
        format!("{v}")
    }
}

/// A named column of a [`Catalog`](crate::catalog::Catalog).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Column {
            name: name.into(),
            data,
        }
    }

    pub fn from_f64(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column::new(name, ColumnData::Float(values))
    }

    pub fn from_i64(name: impl Into<String>, values: Vec<i64>) -> Self {
        Column::new(name, ColumnData::Int(values))
    }

    pub fn from_text(name: impl Into<String>, values: Vec<String>) -> Self {
        Column::new(name, ColumnData::Text(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self.data, ColumnData::Text(_))
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Cell at row `row`, or `None` when out of range.
    pub fn value(&self, row: usize) -> Option<CellValue<'_>> {
        match &self.data {
            ColumnData::Int(v) => v.get(row).map(|&x| CellValue::Int(x)),
            ColumnData::Float(v) => v.get(row).map(|&x| CellValue::Float(x)),
            ColumnData::Text(v) => v.get(row).map(|s| CellValue::Text(s.as_str())),
        }
    }

    /// View the column as `f64`, converting integers on the fly.
    ///
    /// Return
    /// ----------
    /// * A borrowed slice for float columns, an owned vector for integer columns,
    ///   or [`CatMatchError::NonNumericField`] for text columns.
    pub fn as_f64(&self) -> Result<Cow<'_, [f64]>, CatMatchError> {
        match &self.data {
            ColumnData::Float(v) => Ok(Cow::Borrowed(v.as_slice())),
            ColumnData::Int(v) => Ok(Cow::Owned(v.iter().map(|&x| x as f64).collect())),
            ColumnData::Text(_) => Err(CatMatchError::NonNumericField(self.name.clone())),
        }
    }

    /// New column holding the rows at `indices` (see [`Catalog::select_rows`](crate::catalog::Catalog::select_rows)).
    pub fn take(&self, indices: &[usize]) -> Column {
        Column {
            name: self.name.clone(),
            data: self.data.take(indices),
        }
    }

    /// Element-wise `self - other`, named `name`.
    ///
    /// Integer minus integer stays integer (wrapping is not expected for catalog values,
    /// so plain subtraction is used); any float operand promotes the result to float.
    ///
    /// Errors
    /// ----------
    /// * [`CatMatchError::NonNumericField`] if either column holds text.
    /// * [`CatMatchError::ColumnLengthMismatch`] if the lengths differ.
    pub fn sub(&self, other: &Column, name: impl Into<String>) -> Result<Column, CatMatchError> {
        if self.len() != other.len() {
            return Err(CatMatchError::ColumnLengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }

        let data = match (&self.data, &other.data) {
            (ColumnData::Int(a), ColumnData::Int(b)) => {
                ColumnData::Int(a.iter().zip(b).map(|(x, y)| x - y).collect())
            }
            _ => {
                let a = self.as_f64()?;
                let b = other.as_f64()?;
                ColumnData::Float(a.iter().zip(b.iter()).map(|(x, y)| x - y).collect())
            }
        };

        Ok(Column::new(name, data))
    }
}
