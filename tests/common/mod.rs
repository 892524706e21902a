use approx::assert_relative_eq;
use camino::{Utf8Path, Utf8PathBuf};
use catmatch::io::read_catalog;
use catmatch::Catalog;

pub const FILTERS: [&str; 3] = ["g", "r", "i"];

pub fn data_path(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// The g, r and i catalogs of the test field, in that order.
pub fn read_field_catalogs() -> Vec<Catalog> {
    FILTERS
        .iter()
        .map(|f| read_catalog(&data_path(&format!("field_{f}.cat"))).unwrap())
        .collect()
}

pub fn assert_column_close(catalog: &Catalog, name: &str, expected: &[f64], epsilon: f64) {
    let actual = catalog.column_as_f64(name).unwrap();
    assert_eq!(actual.len(), expected.len(), "length of column {name}");
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(*a, *e, epsilon = epsilon);
    }
}
