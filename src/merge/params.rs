use crate::{
    catmatch_errors::CatMatchError,
    constants::{Degree, DEFAULT_MATCH_RADIUS},
    sky::PositionFields,
};

/// Configuration of the N-way merge pipeline ([`merge_all`](crate::merge::merge_all)).
///
/// Fields
/// -----------------
/// * `threshold` – Match radius in degrees, used for every reduction step (default `1e-4`).
/// * `tags` – Optional per-catalog tags (typically filter names). When set together with
///   `stack`, every column of catalog *i* is renamed `<name>_<tags[i]>` before matching.
/// * `position_fields` – Untagged (longitude, latitude) column names shared by all catalogs
///   (default `X_WORLD`, `Y_WORLD`).
/// * `stack` – `true` to concatenate matched rows into one wide catalog, `false` to get the
///   two aligned sub-catalogs (only valid for two catalogs).
///
/// ```rust
/// use catmatch::merge::MergeParams;
///
/// let params = MergeParams::builder()
///     .threshold(2.0 / 3600.0)
///     .tags(["g", "r", "i"])
///     .build()
///     .unwrap();
/// assert!(params.stack);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MergeParams {
    pub threshold: Degree,
    pub tags: Option<Vec<String>>,
    pub position_fields: PositionFields,
    pub stack: bool,
}

impl MergeParams {
    /// Equivalent to [`MergeParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> MergeParamsBuilder {
        MergeParamsBuilder::new()
    }

    /// Position fields used for catalog `i`, accounting for tagging.
    pub(crate) fn fields_for(&self, i: usize) -> PositionFields {
        match (&self.tags, self.stack) {
            (Some(tags), true) => self.position_fields.tagged(&tags[i]),
            _ => self.position_fields.clone(),
        }
    }

    pub(crate) fn tagging_enabled(&self) -> bool {
        self.stack && self.tags.is_some()
    }
}

impl Default for MergeParams {
    fn default() -> Self {
        MergeParams {
            threshold: DEFAULT_MATCH_RADIUS,
            tags: None,
            position_fields: PositionFields::default(),
            stack: true,
        }
    }
}

/// Builder for [`MergeParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct MergeParamsBuilder {
    params: MergeParams,
}

impl MergeParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, v: Degree) -> Self {
        self.params.threshold = v;
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn position_fields(mut self, fields: PositionFields) -> Self {
        self.params.position_fields = fields;
        self
    }

    pub fn stack(mut self, v: bool) -> Self {
        self.params.stack = v;
        self
    }

    /// Validate and build.
    ///
    /// Errors
    /// ----------
    /// * [`CatMatchError::InvalidMergeParameter`] if the threshold is negative or not
    ///   finite, or if the position field names are empty. A zero threshold is accepted
    ///   and matches nothing.
    pub fn build(self) -> Result<MergeParams, CatMatchError> {
        let p = &self.params;

        if !p.threshold.is_finite() || p.threshold < 0.0 {
            return Err(CatMatchError::InvalidMergeParameter(
                "threshold must be a finite, non-negative angle in degrees".into(),
            ));
        }
        if p.position_fields.lon.is_empty() || p.position_fields.lat.is_empty() {
            return Err(CatMatchError::InvalidMergeParameter(
                "position field names must not be empty".into(),
            ));
        }

        Ok(self.params)
    }
}
