//! # Line-oriented ASCII output
//!
//! [`AsciiWriter`] writes space-separated rows and `# ` comment lines to any
//! [`Write`] sink. It backs both the catalog writer ([`write_catalog`]) and the region
//! writer ([`crate::io::region`]).
//!
//! [`write_catalog`] produces the commented-header layout understood by
//! [`read_catalog`](crate::io::reader::read_catalog): one `# NAME1 NAME2 …` line, then one
//! line per row. A text value must read back as exactly one data token: empty values,
//! values containing whitespace and values starting with `#` are rejected with
//! [`CatMatchError::UnwritableText`] before anything is written.
use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
};

use camino::Utf8Path;
use itertools::Itertools;
use log::debug;

use crate::{
    catalog::{Catalog, ColumnData},
    catmatch_errors::CatMatchError,
};

const NEWLINE: &str = "\n";

pub struct AsciiWriter<W: Write> {
    inner: W,
}

impl<W: Write> AsciiWriter<W> {
    pub fn new(inner: W) -> Self {
        AsciiWriter { inner }
    }

    /// Write `# <comment>`.
    pub fn write_comment(&mut self, comment: &str) -> Result<(), CatMatchError> {
        write!(self.inner, "# {comment}{NEWLINE}")?;
        Ok(())
    }

    /// Write the items of `row` separated by single spaces.
    pub fn write_row<I>(&mut self, row: I) -> Result<(), CatMatchError>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        write!(self.inner, "{}{NEWLINE}", row.into_iter().join(" "))?;
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn finish(mut self) -> Result<W, CatMatchError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

fn is_single_token(value: &str) -> bool {
    !value.is_empty() && !value.starts_with('#') && !value.contains(char::is_whitespace)
}

/// Find the first text cell that would not read back as one value.
fn check_text_cells(catalog: &Catalog) -> Result<(), CatMatchError> {
    for column in catalog.columns() {
        if let ColumnData::Text(values) = column.data() {
            if let Some((row, value)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| !is_single_token(v))
            {
                return Err(CatMatchError::UnwritableText {
                    field: column.name().to_string(),
                    row,
                    value: value.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Write `catalog` in commented-header layout to `sink`.
///
/// Errors
/// ----------
/// * [`CatMatchError::UnwritableText`] for a text cell that is empty, holds whitespace or
///   starts with `#` (0-based row). Nothing is written.
pub fn write_catalog_to<W: Write>(catalog: &Catalog, sink: W) -> Result<W, CatMatchError> {
    check_text_cells(catalog)?;
    let mut writer = AsciiWriter::new(sink);
    writer.write_comment(&catalog.column_names().join(" "))?;

    for row in 0..catalog.n_rows() {
        writer.write_row(catalog.columns().iter().filter_map(|c| c.value(row)))?;
    }
    writer.finish()
}

/// Write `catalog` to the file at `path`, replacing it if it exists.
///
/// Text cells are checked before the file is created.
pub fn write_catalog(catalog: &Catalog, path: &Utf8Path) -> Result<(), CatMatchError> {
    check_text_cells(catalog)?;
    let file = File::create(path)?;
    write_catalog_to(catalog, BufWriter::new(file))?;
    debug!("wrote {} rows to {path}", catalog.n_rows());
    Ok(())
}
