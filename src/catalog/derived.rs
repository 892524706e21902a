use log::debug;

use super::Catalog;
use crate::catmatch_errors::CatMatchError;

/// Append a column holding `catalog[field1] - catalog[field2]`.
///
/// The new column is named `output_field`, or `diff_<field1>_<field2>` when `None`.
/// Typical use is a colour index after a merge, e.g. `MAG_AUTO_g - MAG_AUTO_r`.
///
/// Arguments
/// -----------------
/// * `catalog` – Catalog receiving the new column (modified in place).
/// * `field1`, `field2` – Numeric columns; integer minus integer stays integer.
/// * `output_field` – Optional name of the new column.
///
/// Errors
/// ----------
/// * [`CatMatchError::MissingField`] if either input column is absent.
/// * [`CatMatchError::NonNumericField`] if either input column holds text.
/// * [`CatMatchError::DuplicateField`] if the output name is already taken.
pub fn add_diff_column(
    catalog: &mut Catalog,
    field1: &str,
    field2: &str,
    output_field: Option<&str>,
) -> Result<(), CatMatchError> {
    let name = output_field
        .map(str::to_string)
        .unwrap_or_else(|| format!("diff_{field1}_{field2}"));

    let diff = catalog
        .column(field1)?
        .sub(catalog.column(field2)?, name.as_str())?;

    debug!("adding derived column {name} = {field1} - {field2}");
    catalog.push_column(diff)
}
