//! # Commented-header ASCII catalog reader
//!
//! Reads the plain-text catalogs written by source-extraction tools:
//!
//! ```text
//! some banner line, ignored
//! # NUMBER X_WORLD Y_WORLD FLUX_AUTO
//! 1 150.1183 2.2051 1532.7
//! 2 150.1201 2.2077 87.1
//! ```
//!
//! ## Layout
//! -----------------
//! - The **header** is the first line starting with `#`. Lines before it are skipped.
//!   Its whitespace-separated words (after the `#`) are the column names.
//! - Every following non-blank line not starting with `#` is a **data row** of
//!   whitespace-separated values.
//!
//! ## Short rows
//! -----------------
//! Each data row goes through [`process_line`]: when it is short of the header by
//! **two or more** values, it is right-padded with `0`. A row short by exactly one value
//! is left as is and then rejected, like any other row whose value count differs from
//! the header, with [`CatMatchError::InconsistentRow`].
//!
//! ## Column types
//! -----------------
//! A column is `Int` if every value parses as `i64`, otherwise `Float` if every value
//! parses as `f64`, otherwise `Text`. Columns of a catalog without rows are `Float`.
use std::{
    fs::File,
    io::{BufRead, BufReader},
};

use camino::Utf8Path;
use itertools::Itertools;
use log::debug;

use crate::{
    catalog::{Catalog, Column, ColumnData},
    catmatch_errors::CatMatchError,
    constants::PAD_TOKEN,
};

/// Normalize one data line against a header of `ncols` columns.
///
/// The line is split on whitespace; if it holds fewer than `ncols - 1` values it is
/// padded with `"0"` up to `ncols` values. The values are re-joined with single spaces.
///
/// ```rust
/// use catmatch::io::reader::process_line;
///
/// assert_eq!(process_line("1", 3), "1 0 0");
/// assert_eq!(process_line("1   2", 3), "1 2");
/// ```
pub fn process_line(line: &str, ncols: usize) -> String {
    let nx = line.split_whitespace().count();
    let deltacol = ncols.saturating_sub(nx);
    let padding = if deltacol > 1 { deltacol } else { 0 };

    line.split_whitespace()
        .chain(std::iter::repeat(PAD_TOKEN).take(padding))
        .join(" ")
}

fn infer_column(name: String, values: Vec<String>) -> Column {
    if values.is_empty() {
        return Column::new(name, ColumnData::Float(Vec::new()));
    }
    if let Ok(ints) = values
        .iter()
        .map(|v| v.parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
    {
        return Column::new(name, ColumnData::Int(ints));
    }
    if let Ok(floats) = values
        .iter()
        .map(|v| v.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
    {
        return Column::new(name, ColumnData::Float(floats));
    }
    Column::new(name, ColumnData::Text(values))
}

/// Parse a catalog from any buffered reader.
///
/// Arguments
/// -----------------
/// * `reader` – Source of the catalog text.
/// * `source` – Name reported in [`CatMatchError::HeaderNotFound`] (usually the path).
///
/// Errors
/// ----------
/// * [`CatMatchError::HeaderNotFound`] if the input ends before a `#` line.
/// * [`CatMatchError::InconsistentRow`] for a row (1-based line number) whose value count
///   differs from the header after padding.
/// * [`CatMatchError::DuplicateField`] if the header repeats a column name.
/// * [`CatMatchError::IoError`] on read failure.
pub fn parse_catalog<R: BufRead>(reader: R, source: &str) -> Result<Catalog, CatMatchError> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if line.starts_with('#') {
                    break line;
                }
            }
            None => return Err(CatMatchError::HeaderNotFound(source.to_string())),
        }
    };

    let names: Vec<String> = header[1..].split_whitespace().map(String::from).collect();
    let ncols = names.len();
    let mut values: Vec<Vec<String>> = vec![Vec::new(); ncols];

    for (idx, line) in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = process_line(&line, ncols);
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.len() != ncols {
            return Err(CatMatchError::InconsistentRow {
                line: idx + 1,
                expected: ncols,
                found: tokens.len(),
            });
        }
        for (column, token) in values.iter_mut().zip(tokens) {
            column.push(token.to_string());
        }
    }

    let catalog = Catalog::new(
        names
            .into_iter()
            .zip(values)
            .map(|(name, column)| infer_column(name, column))
            .collect(),
    )?;

    debug!(
        "read {} rows x {} columns from {source}",
        catalog.n_rows(),
        catalog.n_cols()
    );
    Ok(catalog)
}

/// Read a commented-header ASCII catalog from `path`.
///
/// The file is closed when the function returns, on success or error.
pub fn read_catalog(path: &Utf8Path) -> Result<Catalog, CatMatchError> {
    let file = File::open(path)?;
    parse_catalog(BufReader::new(file), path.as_str())
}
