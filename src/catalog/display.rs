//! # Tabular display for catalogs
//!
//! [`Catalog`] implements `Display` through [`CatalogDisplay`], a borrowing adaptor that
//! renders the catalog with [`comfy-table`]. The header shows each column name with its
//! storage type, numeric cells are right-aligned, and long catalogs can be truncated with
//! [`Catalog::show`].
//!
//! ```rust,ignore
//! println!("{}", catalog);          // every row
//! println!("{}", catalog.show(10)); // first 10 rows, then a "... N more rows" line
//! ```
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use super::{CellValue, Catalog};

/// Display adaptor returned by [`Catalog::show`].
pub struct CatalogDisplay<'a> {
    catalog: &'a Catalog,
    max_rows: Option<usize>,
}

impl Catalog {
    /// Borrowing display limited to the first `max_rows` rows.
    pub fn show(&self, max_rows: usize) -> CatalogDisplay<'_> {
        CatalogDisplay {
            catalog: self,
            max_rows: Some(max_rows),
        }
    }
}

impl CatalogDisplay<'_> {
    fn render(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(
            self.catalog
                .columns()
                .iter()
                .map(|c| Cell::new(format!("{}\n{}", c.name(), c.data().type_name())))
                .collect::<Vec<_>>(),
        );

        let n_rows = self.catalog.n_rows();
        let shown = self.max_rows.map_or(n_rows, |m| m.min(n_rows));

        for row in 0..shown {
            table.add_row(Row::from(
                self.catalog
                    .columns()
                    .iter()
                    .map(|c| match c.value(row) {
                        Some(v @ CellValue::Text(_)) => Cell::new(v),
                        Some(v) => Cell::new(v).set_alignment(CellAlignment::Right),
                        None => Cell::new(""),
                    })
                    .collect::<Vec<_>>(),
            ));
        }

        let mut out = table.to_string();
        if shown < n_rows {
            out.push_str(&format!("\n... {} more rows", n_rows - shown));
        }
        out
    }
}

impl fmt::Display for CatalogDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = CatalogDisplay {
            catalog: self,
            max_rows: None,
        };
        write!(f, "{}", display.render())
    }
}
