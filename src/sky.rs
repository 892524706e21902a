//! # Sky positions and nearest-neighbour search
//!
//! Sky positions are (longitude, latitude) pairs in **degrees** in the ICRS equatorial
//! frame, read from two catalog columns named by [`PositionFields`]. Internally each
//! position is also kept as a unit vector on the sphere, which gives a separation formula
//! that stays accurate from zero up to 180°:
//!
//! ```text
//! θ = atan2(|u₁ × u₂|, u₁ · u₂)
//! ```
//!
//! ## Nearest-neighbour search
//!
//! The matcher only needs, for every position of a *source* set, the index of and the
//! separation to the closest position of a *target* set. That contract is the
//! [`NeighborSearch`] trait. [`BruteForceSearch`] scans every target for every source
//! (O(N×M)); catalogs of a few thousand sources per filter are handled comfortably.
//! A tree-backed implementation can be plugged in without changing the matcher.
use nalgebra::Vector3;

use crate::{
    catalog::Catalog,
    catmatch_errors::CatMatchError,
    constants::{Degree, DEFAULT_LAT_FIELD, DEFAULT_LON_FIELD, DEGRAD, TAG_SEPARATOR},
};

/// Names of the two catalog columns holding (longitude, latitude) in degrees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionFields {
    pub lon: String,
    pub lat: String,
}

impl PositionFields {
    pub fn new(lon: impl Into<String>, lat: impl Into<String>) -> Self {
        PositionFields {
            lon: lon.into(),
            lat: lat.into(),
        }
    }

    /// Position fields of a catalog tagged with `tag` (`X_WORLD` → `X_WORLD_<tag>`).
    pub fn tagged(&self, tag: &str) -> Self {
        PositionFields {
            lon: format!("{}{TAG_SEPARATOR}{tag}", self.lon),
            lat: format!("{}{TAG_SEPARATOR}{tag}", self.lat),
        }
    }
}

impl Default for PositionFields {
    fn default() -> Self {
        PositionFields::new(DEFAULT_LON_FIELD, DEFAULT_LAT_FIELD)
    }
}

/// Unit vector pointing at (lon, lat), both in degrees.
#[inline]
fn unit_vector(lon: Degree, lat: Degree) -> Vector3<f64> {
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Great-circle distance in degrees between two unit vectors.
#[inline]
fn separation_between(u1: &Vector3<f64>, u2: &Vector3<f64>) -> Degree {
    u1.cross(u2).norm().atan2(u1.dot(u2)) * DEGRAD
}

/// Great-circle distance in degrees between (lon1, lat1) and (lon2, lat2), all in degrees.
pub fn angular_separation_deg(lon1: Degree, lat1: Degree, lon2: Degree, lat2: Degree) -> Degree {
    separation_between(&unit_vector(lon1, lat1), &unit_vector(lon2, lat2))
}

/// A set of sky positions (ICRS, degrees), one per catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyPositions {
    lon: Vec<Degree>,
    lat: Vec<Degree>,
    unit: Vec<Vector3<f64>>,
}

impl SkyPositions {
    /// Build a position set from parallel longitude/latitude arrays in degrees.
    ///
    /// Errors
    /// ----------
    /// * [`CatMatchError::ColumnLengthMismatch`] if the two arrays differ in length.
    pub fn from_degrees(lon: Vec<Degree>, lat: Vec<Degree>) -> Result<Self, CatMatchError> {
        if lon.len() != lat.len() {
            return Err(CatMatchError::ColumnLengthMismatch {
                expected: lon.len(),
                found: lat.len(),
            });
        }

        let unit = lon
            .iter()
            .zip(&lat)
            .map(|(&l, &b)| unit_vector(l, b))
            .collect();
        Ok(SkyPositions { lon, lat, unit })
    }

    /// Read the position set of `catalog` from the columns named by `fields`.
    ///
    /// Errors
    /// ----------
    /// * [`CatMatchError::MissingField`] if either column is absent.
    /// * [`CatMatchError::NonNumericField`] if either column holds text.
    pub fn from_catalog(catalog: &Catalog, fields: &PositionFields) -> Result<Self, CatMatchError> {
        let lon = catalog.column_as_f64(&fields.lon)?.into_owned();
        let lat = catalog.column_as_f64(&fields.lat)?.into_owned();
        SkyPositions::from_degrees(lon, lat)
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    pub fn lon(&self) -> &[Degree] {
        &self.lon
    }

    pub fn lat(&self) -> &[Degree] {
        &self.lat
    }

    /// Separation in degrees between position `i` of `self` and position `j` of `other`.
    pub fn separation(&self, i: usize, other: &SkyPositions, j: usize) -> Degree {
        separation_between(&self.unit[i], &other.unit[j])
    }
}

/// Closest target of one source position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub separation: Degree,
}

/// Nearest-neighbour query between two position sets.
pub trait NeighborSearch {
    /// For every position of `source`, the closest position of `target`.
    ///
    /// The returned vector has `source.len()` entries, in `source` order. An entry is
    /// `None` when `target` holds no position at a finite separation (empty, or all NaN).
    fn nearest(&self, source: &SkyPositions, target: &SkyPositions) -> Vec<Option<Neighbor>>;
}

/// Exhaustive O(N×M) search. Ties go to the lowest target index; NaN separations are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceSearch;

impl NeighborSearch for BruteForceSearch {
    fn nearest(&self, source: &SkyPositions, target: &SkyPositions) -> Vec<Option<Neighbor>> {
        source
            .unit
            .iter()
            .map(|u| {
                target
                    .unit
                    .iter()
                    .enumerate()
                    .fold(None, |best: Option<Neighbor>, (j, v)| {
                        let separation = separation_between(u, v);
                        if separation.is_nan() {
                            return best;
                        }
                        match best {
                            Some(b) if b.separation <= separation => Some(b),
                            _ => Some(Neighbor {
                                index: j,
                                separation,
                            }),
                        }
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod sky_test {
    use super::*;
    use crate::catalog::Column;
    use approx::assert_relative_eq;

    #[test]
    fn test_angular_separation_deg() {
        assert_eq!(angular_separation_deg(10.0, 20.0, 10.0, 20.0), 0.0);
        assert_relative_eq!(angular_separation_deg(0.0, 0.0, 90.0, 0.0), 90.0, epsilon = 1e-12);
        assert_relative_eq!(
            angular_separation_deg(0.0, 90.0, 0.0, -90.0),
            180.0,
            epsilon = 1e-12
        );
        // wraps across RA = 0
        assert_relative_eq!(
            angular_separation_deg(359.9, 0.0, 0.1, 0.0),
            0.2,
            epsilon = 1e-10
        );
        // RA offsets shrink with cos(dec)
        assert_relative_eq!(
            angular_separation_deg(0.0, 60.0, 1e-3, 60.0),
            0.5e-3,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_position_fields() {
        let fields = PositionFields::default();
        assert_eq!(fields.lon, "X_WORLD");
        assert_eq!(fields.lat, "Y_WORLD");

        let tagged = fields.tagged("r");
        assert_eq!(tagged, PositionFields::new("X_WORLD_r", "Y_WORLD_r"));
    }

    #[test]
    fn test_from_catalog() {
        let cat = Catalog::new(vec![
            Column::from_f64("X_WORLD", vec![150.0, 150.1]),
            Column::from_i64("Y_WORLD", vec![2, 3]),
            Column::from_text("NAME", vec!["a".into(), "b".into()]),
        ])
        .unwrap();

        let pos = SkyPositions::from_catalog(&cat, &PositionFields::default()).unwrap();
        assert_eq!(pos.len(), 2);
        assert_eq!(pos.lat(), &[2.0, 3.0]);

        assert_eq!(
            SkyPositions::from_catalog(&cat, &PositionFields::new("RA", "Y_WORLD")).unwrap_err(),
            CatMatchError::MissingField("RA".into())
        );
        assert_eq!(
            SkyPositions::from_catalog(&cat, &PositionFields::new("X_WORLD", "NAME")).unwrap_err(),
            CatMatchError::NonNumericField("NAME".into())
        );
    }

    #[test]
    fn test_brute_force_nearest() {
        let source = SkyPositions::from_degrees(vec![10.0, 10.5, 40.0], vec![0.0, 0.0, 0.0]).unwrap();
        let target = SkyPositions::from_degrees(vec![10.4, 10.01], vec![0.0, 0.0]).unwrap();

        let nn = BruteForceSearch.nearest(&source, &target);
        assert_eq!(nn.len(), 3);
        assert_eq!(nn[0].unwrap().index, 1);
        assert_eq!(nn[1].unwrap().index, 0);
        assert_eq!(nn[2].unwrap().index, 0);
        assert_relative_eq!(nn[2].unwrap().separation, 29.6, epsilon = 1e-9);

        let empty = SkyPositions::from_degrees(vec![], vec![]).unwrap();
        assert_eq!(BruteForceSearch.nearest(&source, &empty), vec![None, None, None]);
        assert!(BruteForceSearch.nearest(&empty, &target).is_empty());
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let source = SkyPositions::from_degrees(vec![0.0], vec![0.0]).unwrap();
        let target = SkyPositions::from_degrees(vec![1.0, -1.0], vec![0.0, 0.0]).unwrap();
        let nn = BruteForceSearch.nearest(&source, &target);
        assert_eq!(nn[0].unwrap().index, 0);
    }

    #[test]
    fn test_nan_targets_are_skipped() {
        let source = SkyPositions::from_degrees(vec![150.0], vec![2.0]).unwrap();

        let nan_last = SkyPositions::from_degrees(vec![150.0, f64::NAN], vec![2.0, 2.0]).unwrap();
        let nn = BruteForceSearch.nearest(&source, &nan_last);
        assert_eq!(
            nn,
            vec![Some(Neighbor {
                index: 0,
                separation: 0.0
            })]
        );

        let nan_first = SkyPositions::from_degrees(vec![f64::NAN, 150.0], vec![2.0, 2.0]).unwrap();
        assert_eq!(BruteForceSearch.nearest(&source, &nan_first)[0].unwrap().index, 1);

        let all_nan = SkyPositions::from_degrees(vec![f64::NAN], vec![2.0]).unwrap();
        assert_eq!(BruteForceSearch.nearest(&source, &all_nan), vec![None]);
    }
}
