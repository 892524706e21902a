//! # Angular matching of two position sets
//!
//! [`match_positions`] pairs every position of a catalog **A** with its nearest position
//! in a catalog **B** and keeps the pair when the separation is **strictly** below a
//! threshold. The result is a [`MatchSet`]:
//!
//! - ordered by A row order, one entry at most per A row;
//! - A rows without a neighbour under the threshold are dropped, not reported as misses;
//! - **not a bijection**: a B row may be the nearest neighbour of several A rows and then
//!   appears several times. Such reuse is kept as is.
//!
//! Matching is therefore not symmetric: matching B against A can give different pairs.
use std::io::Write;

use log::debug;
use serde::Serialize;

use crate::{
    catmatch_errors::CatMatchError,
    constants::Degree,
    sky::{BruteForceSearch, NeighborSearch, SkyPositions},
};

/// One accepted pair: row `index_a` of A is matched to row `index_b` of B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkyMatch {
    pub index_a: usize,
    pub index_b: usize,
    /// Great-circle distance in degrees
    pub separation: Degree,
}

/// Ordered result of matching A against B.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet {
    matches: Vec<SkyMatch>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkyMatch> {
        self.matches.iter()
    }

    pub fn as_slice(&self) -> &[SkyMatch] {
        &self.matches
    }

    /// Matched A rows, in A order.
    pub fn indices_a(&self) -> Vec<usize> {
        self.matches.iter().map(|m| m.index_a).collect()
    }

    /// Matched B rows, aligned with [`MatchSet::indices_a`] (may repeat).
    pub fn indices_b(&self) -> Vec<usize> {
        self.matches.iter().map(|m| m.index_b).collect()
    }

    pub fn separations(&self) -> Vec<Degree> {
        self.matches.iter().map(|m| m.separation).collect()
    }

    /// Write the match set as CSV (`index_a,index_b,separation`, header included).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CatMatchError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for m in &self.matches {
            wtr.serialize(m)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a SkyMatch;
    type IntoIter = std::slice::Iter<'a, SkyMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Match `positions_a` against `positions_b` with the default brute-force search.
///
/// Arguments
/// -----------------
/// * `positions_a` – Positions whose rows drive the output order.
/// * `positions_b` – Positions searched for the nearest neighbour of each A row.
/// * `threshold` – Match radius in degrees; a pair is kept only if `separation < threshold`.
///
/// Return
/// ----------
/// * The [`MatchSet`]; empty when either set is empty or `threshold <= 0`.
pub fn match_positions(
    positions_a: &SkyPositions,
    positions_b: &SkyPositions,
    threshold: Degree,
) -> MatchSet {
    match_positions_with(&BruteForceSearch, positions_a, positions_b, threshold)
}

/// Same as [`match_positions`], with a caller-provided [`NeighborSearch`].
pub fn match_positions_with<S: NeighborSearch + ?Sized>(
    search: &S,
    positions_a: &SkyPositions,
    positions_b: &SkyPositions,
    threshold: Degree,
) -> MatchSet {
    let matches: Vec<SkyMatch> = search
        .nearest(positions_a, positions_b)
        .into_iter()
        .enumerate()
        .filter_map(|(index_a, nn)| {
            nn.filter(|n| n.separation < threshold).map(|n| SkyMatch {
                index_a,
                index_b: n.index,
                separation: n.separation,
            })
        })
        .collect();

    debug!(
        "matched {} of {} positions against {} (threshold = {threshold} deg)",
        matches.len(),
        positions_a.len(),
        positions_b.len()
    );

    MatchSet { matches }
}
