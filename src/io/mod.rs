//! # Catalog file formats
//!
//! - [`reader`] – commented-header ASCII catalogs (input)
//! - [`writer`] – the same layout on output, and the line writer shared with regions
//! - [`region`] – region files for image viewers (output only)
pub mod reader;
pub mod region;
pub mod writer;

pub use reader::read_catalog;
pub use region::{write_region_file, RegionOptions, RegionSymbol};
pub use writer::write_catalog;
