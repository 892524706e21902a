//! # Region files for image viewers
//!
//! Dump catalog sources as a region file (one shape per line, no header) so they can be
//! overlaid on the image they were extracted from.
//!
//! ## Symbols
//! -----------------
//! - [`RegionSymbol::Ellipse`] – `<coord> ellipse X Y A B THETA`
//! - [`RegionSymbol::Point`] – `<coord> x point X Y`
//!
//! ## Coordinates
//! -----------------
//! | `wcs`   | coordinate token | field suffix |
//! |---------|------------------|--------------|
//! | `false` | `image;`         | `_IMAGE`     |
//! | `true`  | `linear;`        | `_WORLD`     |
//!
//! Field names are `<base><suffix><subtag>`, with `subtag` empty or `_<tag>`, so that a
//! merged, tagged catalog can be dumped one filter at a time (`X_IMAGE_r`, `Y_IMAGE_r`, …).
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    str::FromStr,
};

use camino::Utf8Path;
use log::debug;

use crate::{
    catalog::{Catalog, Column},
    catmatch_errors::CatMatchError,
    constants::TAG_SEPARATOR,
    io::writer::AsciiWriter,
};

/// Shape drawn for each source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionSymbol {
    #[default]
    Ellipse,
    Point,
}

impl RegionSymbol {
    fn token(&self) -> &'static str {
        match self {
            RegionSymbol::Ellipse => "ellipse",
            RegionSymbol::Point => "x point",
        }
    }

    fn field_bases(&self) -> &'static [&'static str] {
        match self {
            RegionSymbol::Ellipse => &["X", "Y", "A", "B", "THETA"],
            RegionSymbol::Point => &["X", "Y"],
        }
    }
}

impl FromStr for RegionSymbol {
    type Err = CatMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ellipse" => Ok(RegionSymbol::Ellipse),
            "point" => Ok(RegionSymbol::Point),
            other => Err(CatMatchError::InvalidRegionSymbol(other.to_string())),
        }
    }
}

impl fmt::Display for RegionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSymbol::Ellipse => write!(f, "ellipse"),
            RegionSymbol::Point => write!(f, "point"),
        }
    }
}

/// Options of the region writer. Defaults: ellipses, pixel coordinates, no subtag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionOptions {
    pub symbol: RegionSymbol,
    pub subtag: Option<String>,
    pub wcs: bool,
}

impl RegionOptions {
    pub fn new(symbol: RegionSymbol) -> Self {
        RegionOptions {
            symbol,
            ..Default::default()
        }
    }

    pub fn subtag(mut self, tag: impl Into<String>) -> Self {
        self.subtag = Some(tag.into());
        self
    }

    pub fn wcs(mut self, wcs: bool) -> Self {
        self.wcs = wcs;
        self
    }

    fn coord_token(&self) -> &'static str {
        if self.wcs {
            "linear;"
        } else {
            "image;"
        }
    }

    fn coord_tag(&self) -> &'static str {
        if self.wcs {
            "_WORLD"
        } else {
            "_IMAGE"
        }
    }

    /// Full catalog column name for `base` (`X` → `X_IMAGE_r`).
    pub fn field_name(&self, base: &str) -> String {
        match self.subtag.as_deref() {
            Some(tag) if !tag.is_empty() => {
                format!("{base}{}{TAG_SEPARATOR}{tag}", self.coord_tag())
            }
            _ => format!("{base}{}", self.coord_tag()),
        }
    }

    /// Look up every column needed for the symbol, in output order.
    fn resolve<'a>(&self, catalog: &'a Catalog) -> Result<Vec<&'a Column>, CatMatchError> {
        self.symbol
            .field_bases()
            .iter()
            .map(|base| catalog.column(&self.field_name(base)))
            .collect()
    }
}

fn write_rows<W: Write>(
    catalog: &Catalog,
    columns: &[&Column],
    options: &RegionOptions,
    sink: W,
) -> Result<W, CatMatchError> {
    let mut writer = AsciiWriter::new(sink);
    let prefix = [options.coord_token(), options.symbol.token()];

    for row in 0..catalog.n_rows() {
        writer.write_row(
            prefix.iter().map(|t| t.to_string()).chain(
                columns
                    .iter()
                    .filter_map(|c| c.value(row))
                    .map(|v| v.to_string()),
            ),
        )?;
    }
    writer.finish()
}

/// Write the region lines of `catalog` to `sink`.
///
/// Errors
/// ----------
/// * [`CatMatchError::MissingField`] if a required column is absent; nothing is written.
pub fn write_region<W: Write>(
    catalog: &Catalog,
    options: &RegionOptions,
    sink: W,
) -> Result<W, CatMatchError> {
    let columns = options.resolve(catalog)?;
    write_rows(catalog, &columns, options, sink)
}

/// Write the region file of `catalog` at `path`.
///
/// Required columns are checked before the file is created, so a missing field never
/// leaves a truncated file behind.
pub fn write_region_file(
    catalog: &Catalog,
    path: &Utf8Path,
    options: &RegionOptions,
) -> Result<(), CatMatchError> {
    let columns = options.resolve(catalog)?;
    let file = File::create(path)?;
    write_rows(catalog, &columns, options, BufWriter::new(file))?;
    debug!(
        "wrote {} {} regions to {path}",
        catalog.n_rows(),
        options.symbol
    );
    Ok(())
}
