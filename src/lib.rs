//! # catmatch
//!
//! Cross-match and merge astronomical source catalogs.
//!
//! Catalogs of the same field observed through different filters (or at different
//! epochs) list the same objects at slightly different positions. `catmatch` pairs rows by
//! angular proximity on the sky and merges the catalogs into one table that only keeps the
//! objects present in every input.
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use catmatch::{io::read_catalog, merge::{merge_all, MergeParams}};
//!
//! # fn demo() -> Result<(), catmatch::CatMatchError> {
//! let catalogs = ["g.cat", "r.cat", "i.cat"]
//!     .into_iter()
//!     .map(|p| read_catalog(Utf8Path::new(p)))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let params = MergeParams::builder()
//!     .threshold(1.0 / 3600.0)
//!     .tags(["g", "r", "i"])
//!     .build()?;
//!
//! let merged = merge_all(catalogs, &params)?.into_stacked();
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] – column-oriented catalog storage
//! - [`sky`] – sky positions, angular separation, nearest-neighbour search
//! - [`matching`] – threshold matching of two position sets
//! - [`merge`] – tagging, pairwise and N-way merges
//! - [`io`] – ASCII catalogs and region files
pub mod catalog;
pub mod catmatch_errors;
pub mod constants;
pub mod io;
pub mod matching;
pub mod merge;
pub mod sky;

pub use catalog::{add_diff_column, Catalog, Column, ColumnData};
pub use catmatch_errors::CatMatchError;
pub use constants::{Degree, DEFAULT_MATCH_RADIUS};
pub use matching::{match_positions, MatchSet, SkyMatch};
pub use merge::{merge_all, merge_pair, tag_catalog, MergeOutput, MergeParams};
pub use sky::{PositionFields, SkyPositions};
