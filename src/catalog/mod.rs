//! # Column-oriented source catalogs
//!
//! A [`Catalog`] is an ordered list of uniquely named [`Column`]s sharing the same
//! row count. Row order is meaningful: the matcher hands back **row indices** and the
//! merger uses them to gather aligned sub-catalogs.
//!
//! ## Operations used by the merge pipeline
//!
//! - [`Catalog::column_names`] / [`Catalog::column`] – schema and column lookup
//! - [`Catalog::rename_column`] – rename one column, keeping names unique
//! - [`Catalog::select_rows`] – new catalog from an ordered (possibly repeating) index list
//! - [`Catalog::hstack`] – horizontal concatenation of two catalogs with equal row counts
//! - [`add_diff_column`] – derived `field1 - field2` column
//!
//! Name collisions are never resolved silently: any operation that would produce two
//! columns with the same name fails with [`CatMatchError::DuplicateField`].
pub mod column;
mod derived;
pub mod display;

use std::borrow::Cow;

use crate::catmatch_errors::CatMatchError;

pub use column::{CellValue, Column, ColumnData};
pub use derived::add_diff_column;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    columns: Vec<Column>,
}

impl Catalog {
    /// Build a catalog from columns.
    ///
    /// Errors
    /// ----------
    /// * [`CatMatchError::DuplicateField`] if two columns share a name.
    /// * [`CatMatchError::ColumnLengthMismatch`] if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self, CatMatchError> {
        let mut catalog = Catalog::default();
        for column in columns {
            catalog.push_column(column)?;
        }
        Ok(catalog)
    }

    /// Append a column at the end of the schema.
    pub fn push_column(&mut self, column: Column) -> Result<(), CatMatchError> {
        if self.contains(column.name()) {
            return Err(CatMatchError::DuplicateField(column.name().to_string()));
        }
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(CatMatchError::ColumnLengthMismatch {
                expected: self.n_rows(),
                found: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, CatMatchError> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| CatMatchError::MissingField(name.to_string()))
    }

    /// Numeric view of a column (integers are converted to `f64`).
    pub fn column_as_f64(&self, name: &str) -> Result<Cow<'_, [f64]>, CatMatchError> {
        self.column(name)?.as_f64()
    }

    /// Rename column `old` to `new`.
    ///
    /// Renaming a column to its own name is a no-op.
    ///
    /// Errors
    /// ----------
    /// * [`CatMatchError::MissingField`] if `old` does not exist.
    /// * [`CatMatchError::DuplicateField`] if another column is already called `new`.
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<(), CatMatchError> {
        if old != new && self.contains(new) {
            return Err(CatMatchError::DuplicateField(new.to_string()));
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name() == old)
            .ok_or_else(|| CatMatchError::MissingField(old.to_string()))?;
        column.set_name(new);
        Ok(())
    }

    /// New catalog made of the rows at `indices`, in that order.
    ///
    /// Indices may repeat: the same source row can be gathered several times, which is
    /// how a reference object matched by several sources ends up on several output rows.
    ///
    /// Panics
    /// ----------
    /// * If an index is `>= self.n_rows()`.
    pub fn select_rows(&self, indices: &[usize]) -> Catalog {
        Catalog {
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
        }
    }

    /// Horizontal concatenation: all columns of `self` followed by all columns of `other`.
    ///
    /// Errors
    /// ----------
    /// * [`CatMatchError::ColumnLengthMismatch`] if both catalogs have columns and their
    ///   row counts differ.
    /// * [`CatMatchError::DuplicateField`] on the first column name present in both.
    pub fn hstack(self, other: Catalog) -> Result<Catalog, CatMatchError> {
        if self.n_cols() > 0 && other.n_cols() > 0 && self.n_rows() != other.n_rows() {
            return Err(CatMatchError::ColumnLengthMismatch {
                expected: self.n_rows(),
                found: other.n_rows(),
            });
        }

        let mut stacked = self;
        for column in other.columns {
            stacked.push_column(column)?;
        }
        Ok(stacked)
    }

    /// Mutable access used by the tagger, which renames every column at once.
    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Column::from_i64("NUMBER", vec![1, 2, 3]),
            Column::from_f64("FLUX", vec![10.0, 20.0, 30.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_duplicates_and_ragged_columns() {
        let dup = Catalog::new(vec![
            Column::from_f64("A", vec![1.0]),
            Column::from_f64("A", vec![2.0]),
        ]);
        assert_eq!(dup.unwrap_err(), CatMatchError::DuplicateField("A".into()));

        let ragged = Catalog::new(vec![
            Column::from_f64("A", vec![1.0, 2.0]),
            Column::from_f64("B", vec![2.0]),
        ]);
        assert_eq!(
            ragged.unwrap_err(),
            CatMatchError::ColumnLengthMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_shape_and_lookup() {
        let cat = sample();
        assert_eq!(cat.n_rows(), 3);
        assert_eq!(cat.n_cols(), 2);
        assert_eq!(cat.column_names(), vec!["NUMBER", "FLUX"]);
        assert_eq!(cat.column_as_f64("NUMBER").unwrap().as_ref(), &[1.0, 2.0, 3.0]);
        assert_eq!(
            cat.column("MAG").unwrap_err(),
            CatMatchError::MissingField("MAG".into())
        );
    }

    #[test]
    fn test_rename_column() {
        let mut cat = sample();
        cat.rename_column("FLUX", "FLUX_r").unwrap();
        assert_eq!(cat.column_names(), vec!["NUMBER", "FLUX_r"]);

        cat.rename_column("NUMBER", "NUMBER").unwrap();
        assert_eq!(
            cat.rename_column("NUMBER", "FLUX_r").unwrap_err(),
            CatMatchError::DuplicateField("FLUX_r".into())
        );
        assert_eq!(
            cat.rename_column("FLUX", "X").unwrap_err(),
            CatMatchError::MissingField("FLUX".into())
        );
    }

    #[test]
    fn test_select_rows() {
        let sub = sample().select_rows(&[2, 0, 2]);
        assert_eq!(sub.n_rows(), 3);
        assert_eq!(
            sub.column("NUMBER").unwrap().data(),
            &ColumnData::Int(vec![3, 1, 3])
        );

        let none = sample().select_rows(&[]);
        assert_eq!(none.n_rows(), 0);
        assert_eq!(none.n_cols(), 2);
    }

    #[test]
    fn test_hstack() {
        let other = Catalog::new(vec![Column::from_f64("MAG", vec![1.0, 2.0, 3.0])]).unwrap();
        let stacked = sample().hstack(other).unwrap();
        assert_eq!(stacked.column_names(), vec!["NUMBER", "FLUX", "MAG"]);

        let clash = sample().hstack(sample());
        assert_eq!(
            clash.unwrap_err(),
            CatMatchError::DuplicateField("NUMBER".into())
        );

        let short = Catalog::new(vec![Column::from_f64("MAG", vec![1.0])]).unwrap();
        assert_eq!(
            sample().hstack(short).unwrap_err(),
            CatMatchError::ColumnLengthMismatch {
                expected: 3,
                found: 1
            }
        );
    }
}
