//! # Catalog merging
//!
//! Merge catalogs of the same field (one per filter, exposure, …) into a single catalog
//! that only keeps the objects found in **every** input.
//!
//! ## Pairwise merge
//!
//! [`merge_pair`] matches catalog A against catalog B on the sky (see
//! [`crate::matching`]), then gathers
//! - the matched rows of A, in A order,
//! - the matched rows of B, **re-ordered so that row *i* of both sub-catalogs describes the
//!   same object**.
//!
//! With `stack = true` the two sub-catalogs are concatenated column-wise (A's columns then
//! B's), otherwise they are returned side by side. The merger never renames columns: a
//! name present in both catalogs makes the stack fail with
//! [`CatMatchError::DuplicateField`]. Use [`tag_catalog`] first.
//!
//! ## N-way merge
//!
//! [`merge_all`] reduces a list of catalogs from left to right,
//!
//! ```text
//! merged = cat[0]
//! merged = merge_pair(merged, cat[1])
//! merged = merge_pair(merged, cat[2])
//! …
//! ```
//!
//! with the same threshold at every step. When tags are given (and stacking is on), each
//! catalog is tagged with its own tag first and matched on its own tagged position fields.
//! The left-hand side of every step is matched on **catalog 0's** tagged position fields:
//! stacking keeps catalog 0's columns untouched at the front of `merged`, so those fields
//! are always present and always hold catalog 0's positions.
//!
//! Without stacking, a pair of catalogs cannot feed the next step; only two catalogs are
//! accepted and more fail with [`CatMatchError::AmbiguousPipelineInput`].
mod params;
mod tagging;

use log::{debug, info, warn};

use crate::{
    catalog::Catalog,
    catmatch_errors::CatMatchError,
    constants::Degree,
    matching::match_positions,
    sky::{PositionFields, SkyPositions},
};

pub use params::{MergeParams, MergeParamsBuilder};
pub use tagging::tag_catalog;

/// Result of a merge.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutput {
    /// One catalog holding the columns of every input, one row per matched object.
    Stacked(Catalog),
    /// Two row-aligned sub-catalogs with their original columns.
    Pair(Catalog, Catalog),
}

impl MergeOutput {
    pub fn into_stacked(self) -> Option<Catalog> {
        match self {
            MergeOutput::Stacked(c) => Some(c),
            MergeOutput::Pair(..) => None,
        }
    }

    pub fn into_pair(self) -> Option<(Catalog, Catalog)> {
        match self {
            MergeOutput::Pair(a, b) => Some((a, b)),
            MergeOutput::Stacked(_) => None,
        }
    }
}

/// Matched, row-aligned sub-catalogs of A and B.
fn matched_subsets(
    catalog_a: &Catalog,
    catalog_b: &Catalog,
    fields_a: &PositionFields,
    fields_b: &PositionFields,
    threshold: Degree,
) -> Result<(Catalog, Catalog), CatMatchError> {
    let positions_a = SkyPositions::from_catalog(catalog_a, fields_a)?;
    let positions_b = SkyPositions::from_catalog(catalog_b, fields_b)?;

    let matches = match_positions(&positions_a, &positions_b, threshold);

    Ok((
        catalog_a.select_rows(&matches.indices_a()),
        catalog_b.select_rows(&matches.indices_b()),
    ))
}

/// Cross-match two catalogs and merge the matched rows.
///
/// Arguments
/// -----------------
/// * `catalog_a`, `catalog_b` – Input catalogs (left untouched).
/// * `fields_a`, `fields_b` – Position columns of each catalog, in degrees.
/// * `threshold` – Match radius in degrees (strict `<`).
/// * `stack` – Concatenate columns (`true`) or return the aligned pair (`false`).
///
/// Return
/// ----------
/// * [`MergeOutput::Stacked`] with `matches` rows and `n_cols(A) + n_cols(B)` columns, or
///   [`MergeOutput::Pair`] of two catalogs with `matches` rows each.
///
/// Errors
/// ----------
/// * [`CatMatchError::MissingField`] / [`CatMatchError::NonNumericField`] for unusable
///   position fields.
/// * [`CatMatchError::DuplicateField`] when stacking catalogs sharing a column name.
pub fn merge_pair(
    catalog_a: &Catalog,
    catalog_b: &Catalog,
    fields_a: &PositionFields,
    fields_b: &PositionFields,
    threshold: Degree,
    stack: bool,
) -> Result<MergeOutput, CatMatchError> {
    let (sub_a, sub_b) = matched_subsets(catalog_a, catalog_b, fields_a, fields_b, threshold)?;

    if stack {
        Ok(MergeOutput::Stacked(sub_a.hstack(sub_b)?))
    } else {
        Ok(MergeOutput::Pair(sub_a, sub_b))
    }
}

/// Merge `catalogs` into one, keeping only objects matched in every catalog.
///
/// See the [module documentation](self) for the reduction order and tagging rules.
///
/// Return
/// ----------
/// * [`MergeOutput::Stacked`] for a single catalog (tagged if requested) or when stacking,
/// * [`MergeOutput::Pair`] for exactly two catalogs without stacking.
///
/// Errors
/// ----------
/// * [`CatMatchError::EmptyCatalogList`] if `catalogs` is empty.
/// * [`CatMatchError::TagCountMismatch`] if tags are given but not one per catalog.
/// * [`CatMatchError::AmbiguousPipelineInput`] for more than two catalogs without stacking.
/// * Any error of [`merge_pair`].
pub fn merge_all(
    catalogs: Vec<Catalog>,
    params: &MergeParams,
) -> Result<MergeOutput, CatMatchError> {
    let n_cat = catalogs.len();
    if n_cat == 0 {
        return Err(CatMatchError::EmptyCatalogList);
    }
    if let Some(tags) = &params.tags {
        if tags.len() != n_cat {
            return Err(CatMatchError::TagCountMismatch {
                expected: n_cat,
                found: tags.len(),
            });
        }
        if !params.stack {
            warn!("tags are ignored when catalogs are not stacked");
        }
    }
    if !params.stack && n_cat > 2 {
        return Err(CatMatchError::AmbiguousPipelineInput(n_cat));
    }

    let mut inputs = catalogs.into_iter().enumerate().map(|(i, catalog)| {
        let catalog = match (&params.tags, params.tagging_enabled()) {
            (Some(tags), true) => tag_catalog(catalog, &tags[i]),
            _ => catalog,
        };
        (catalog, params.fields_for(i))
    });

    let Some((mut merged, left_fields)) = inputs.next() else {
        return Err(CatMatchError::EmptyCatalogList);
    };

    if !params.stack {
        if let Some((other, right_fields)) = inputs.next() {
            return merge_pair(
                &merged,
                &other,
                &left_fields,
                &right_fields,
                params.threshold,
                false,
            );
        }
        return Ok(MergeOutput::Stacked(merged));
    }

    for (step, (catalog, right_fields)) in inputs.enumerate() {
        let (sub_merged, sub_catalog) = matched_subsets(
            &merged,
            &catalog,
            &left_fields,
            &right_fields,
            params.threshold,
        )?;
        debug!(
            "merge step {}: {} of {} rows kept",
            step + 1,
            sub_merged.n_rows(),
            merged.n_rows()
        );
        merged = sub_merged.hstack(sub_catalog)?;
    }

    info!(
        "merged {n_cat} catalogs: {} objects, {} columns",
        merged.n_rows(),
        merged.n_cols()
    );
    Ok(MergeOutput::Stacked(merged))
}

#[cfg(test)]
mod merge_test {
    use super::*;
    use crate::catalog::{Column, ColumnData};

    fn catalog(lon: &[f64], lat: &[f64], flux: &[f64]) -> Catalog {
        Catalog::new(vec![
            Column::from_f64("X_WORLD", lon.to_vec()),
            Column::from_f64("Y_WORLD", lat.to_vec()),
            Column::from_f64("FLUX", flux.to_vec()),
        ])
        .unwrap()
    }

    #[test]
    fn test_merge_pair_aligns_b_rows() {
        let a = catalog(&[150.0, 150.1, 150.2], &[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]);
        let b = tag_catalog(
            catalog(&[150.2, 150.0, 151.0], &[2.0, 2.0, 2.0], &[30.0, 10.0, 99.0]),
            "b",
        );

        let out = merge_pair(
            &a,
            &b,
            &PositionFields::default(),
            &PositionFields::default().tagged("b"),
            1e-4,
            true,
        )
        .unwrap();
        let merged = out.into_stacked().unwrap();

        assert_eq!(merged.n_rows(), 2);
        assert_eq!(merged.n_cols(), a.n_cols() + b.n_cols());
        assert_eq!(
            merged.column("FLUX").unwrap().data(),
            &ColumnData::Float(vec![1.0, 3.0])
        );
        assert_eq!(
            merged.column("FLUX_b").unwrap().data(),
            &ColumnData::Float(vec![10.0, 30.0])
        );
    }

    #[test]
    fn test_merge_pair_unstacked() {
        let a = catalog(&[150.0, 150.1], &[2.0, 2.0], &[1.0, 2.0]);
        let b = catalog(&[150.1, 150.0, 150.05], &[2.0, 2.0, 2.0], &[20.0, 10.0, 15.0]);
        let fields = PositionFields::default();

        let (sub_a, sub_b) = merge_pair(&a, &b, &fields, &fields, 1e-4, false)
            .unwrap()
            .into_pair()
            .unwrap();

        assert_eq!(sub_a.n_rows(), 2);
        assert_eq!(sub_b.n_rows(), 2);
        assert_eq!(sub_a.column_names(), a.column_names());
        assert_eq!(sub_b.column_names(), b.column_names());
        assert_eq!(
            sub_b.column("FLUX").unwrap().data(),
            &ColumnData::Float(vec![10.0, 20.0])
        );
    }

    #[test]
    fn test_merge_pair_errors() {
        let a = catalog(&[150.0], &[2.0], &[1.0]);
        let fields = PositionFields::default();

        assert_eq!(
            merge_pair(&a, &a, &PositionFields::new("RA", "DEC"), &fields, 1e-4, true)
                .unwrap_err(),
            CatMatchError::MissingField("RA".into())
        );
        assert_eq!(
            merge_pair(&a, &a, &fields, &fields, 1e-4, true).unwrap_err(),
            CatMatchError::DuplicateField("X_WORLD".into())
        );
    }

    #[test]
    fn test_merge_all_with_tags() {
        let g = catalog(&[150.0, 150.1, 150.2], &[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]);
        let r = catalog(&[150.2, 150.1], &[2.0, 2.0], &[30.0, 20.0]);
        let i = catalog(&[150.1, 150.2, 150.3], &[2.0, 2.0, 2.0], &[200.0, 300.0, 400.0]);

        let params = MergeParams::builder().tags(["g", "r", "i"]).build().unwrap();
        let merged = merge_all(vec![g, r, i], &params)
            .unwrap()
            .into_stacked()
            .unwrap();

        assert_eq!(merged.n_rows(), 2);
        assert_eq!(merged.n_cols(), 9);
        assert_eq!(
            merged.column("FLUX_g").unwrap().data(),
            &ColumnData::Float(vec![2.0, 3.0])
        );
        assert_eq!(
            merged.column("FLUX_r").unwrap().data(),
            &ColumnData::Float(vec![20.0, 30.0])
        );
        assert_eq!(
            merged.column("FLUX_i").unwrap().data(),
            &ColumnData::Float(vec![200.0, 300.0])
        );
    }

    #[test]
    fn test_merge_all_single_catalog() {
        let g = catalog(&[150.0], &[2.0], &[1.0]);
        let params = MergeParams::builder().tags(["g"]).build().unwrap();
        let out = merge_all(vec![g], &params).unwrap().into_stacked().unwrap();
        assert_eq!(out.column_names(), vec!["X_WORLD_g", "Y_WORLD_g", "FLUX_g"]);
    }

    #[test]
    fn test_merge_all_errors() {
        let cat = || catalog(&[150.0], &[2.0], &[1.0]);

        assert_eq!(
            merge_all(vec![], &MergeParams::default()).unwrap_err(),
            CatMatchError::EmptyCatalogList
        );
        assert_eq!(
            merge_all(
                vec![cat(), cat()],
                &MergeParams::builder().tags(["g"]).build().unwrap()
            )
            .unwrap_err(),
            CatMatchError::TagCountMismatch {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            merge_all(
                vec![cat(), cat(), cat()],
                &MergeParams::builder().stack(false).build().unwrap()
            )
            .unwrap_err(),
            CatMatchError::AmbiguousPipelineInput(3)
        );
        // untagged same-schema catalogs collide when stacked
        assert_eq!(
            merge_all(vec![cat(), cat()], &MergeParams::default()).unwrap_err(),
            CatMatchError::DuplicateField("X_WORLD".into())
        );
    }

    #[test]
    fn test_merge_all_two_catalogs_unstacked_ignores_tags() {
        let a = catalog(&[150.0, 150.1], &[2.0, 2.0], &[1.0, 2.0]);
        let b = catalog(&[150.1], &[2.0], &[20.0]);
        let params = MergeParams::builder()
            .tags(["g", "r"])
            .stack(false)
            .build()
            .unwrap();

        let (sub_a, sub_b) = merge_all(vec![a, b], &params)
            .unwrap()
            .into_pair()
            .unwrap();
        assert_eq!(sub_a.column_names(), vec!["X_WORLD", "Y_WORLD", "FLUX"]);
        assert_eq!(
            sub_a.column("FLUX").unwrap().data(),
            &ColumnData::Float(vec![2.0])
        );
        assert_eq!(sub_b.n_rows(), 1);
    }
}
