use crate::{catalog::Catalog, constants::TAG_SEPARATOR};

/// Rename every column `f` of `catalog` to `f_<tag>` and return it.
///
/// The catalog is taken by value: tagging never touches a table someone else still
/// reads. Clone first if the untagged columns are needed afterwards.
///
/// Renaming is injective, so a tagged catalog never has colliding names; tagging twice
/// appends both tags (`FLUX_g_v2`), and a catalog without columns is returned unchanged.
pub fn tag_catalog(mut catalog: Catalog, tag: &str) -> Catalog {
    for column in catalog.columns_mut() {
        let tagged = format!("{}{TAG_SEPARATOR}{tag}", column.name());
        column.set_name(tagged);
    }
    catalog
}
