//! # Constants and type definitions for catmatch
//!
//! This module centralizes the **default field names**, **matching defaults**, and
//! **unit helpers** shared by the matcher, the merge pipeline and the file formats.
//!
//! ## Overview
//!
//! - Default position columns produced by SExtractor-like tools (`X_WORLD`, `Y_WORLD`)
//! - Default match radius used by the merge pipeline
//! - Separator used to build tagged field names
//! - Angle type alias and conversions

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

/// Degrees → arcseconds
pub const DEG2ARC: f64 = 3600.0;

// -------------------------------------------------------------------------------------------------
// Matching defaults
// -------------------------------------------------------------------------------------------------

/// Default match radius in degrees (0.36 arcsec)
pub const DEFAULT_MATCH_RADIUS: Degree = 1e-4;

/// Default longitude column (right ascension, world coordinates)
pub const DEFAULT_LON_FIELD: &str = "X_WORLD";

/// Default latitude column (declination, world coordinates)
pub const DEFAULT_LAT_FIELD: &str = "Y_WORLD";

/// Separator inserted between a field name and its tag (`FLUX` + `r` → `FLUX_r`)
pub const TAG_SEPARATOR: char = '_';

/// Token appended to rows that are missing trailing values
pub const PAD_TOKEN: &str = "0";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
