use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatMatchError {
    #[error("No header line starting with '#' found in catalog file: {0}")]
    HeaderNotFound(String),

    #[error("Field not found in catalog: {0}")]
    MissingField(String),

    #[error("Field is not numeric: {0}")]
    NonNumericField(String),

    #[error("Field already exists in catalog: {0}")]
    DuplicateField(String),

    #[error("Column length mismatch: expected {expected} rows, found {found}")]
    ColumnLengthMismatch { expected: usize, found: usize },

    #[error("Line {line}: expected {expected} values, found {found}")]
    InconsistentRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cannot reduce {0} catalogs without stacking: only two catalogs can be returned as a pair")]
    AmbiguousPipelineInput(usize),

    #[error("No catalog to merge")]
    EmptyCatalogList,

    #[error("Number of tags ({found}) does not match the number of catalogs ({expected})")]
    TagCountMismatch { expected: usize, found: usize },

    #[error("Text value in field {field}, row {row} cannot be written as a single token: {value:?}")]
    UnwritableText {
        field: String,
        row: usize,
        value: String,
    },

    #[error("Invalid merge parameter: {0}")]
    InvalidMergeParameter(String),

    #[error("Invalid region symbol: {0}")]
    InvalidRegionSymbol(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for CatMatchError {
    fn eq(&self, other: &Self) -> bool {
        use CatMatchError::*;
        match (self, other) {
            (HeaderNotFound(a), HeaderNotFound(b)) => a == b,
            (MissingField(a), MissingField(b)) => a == b,
            (NonNumericField(a), NonNumericField(b)) => a == b,
            (DuplicateField(a), DuplicateField(b)) => a == b,
            (
                ColumnLengthMismatch {
                    expected: e1,
                    found: f1,
                },
                ColumnLengthMismatch {
                    expected: e2,
                    found: f2,
                },
            ) => e1 == e2 && f1 == f2,
            (
                InconsistentRow {
                    line: l1,
                    expected: e1,
                    found: f1,
                },
                InconsistentRow {
                    line: l2,
                    expected: e2,
                    found: f2,
                },
            ) => l1 == l2 && e1 == e2 && f1 == f2,
            (AmbiguousPipelineInput(a), AmbiguousPipelineInput(b)) => a == b,
            (
                TagCountMismatch {
                    expected: e1,
                    found: f1,
                },
                TagCountMismatch {
                    expected: e2,
                    found: f2,
                },
            ) => e1 == e2 && f1 == f2,
            (
                UnwritableText {
                    field: f1,
                    row: r1,
                    value: v1,
                },
                UnwritableText {
                    field: f2,
                    row: r2,
                    value: v2,
                },
            ) => f1 == f2 && r1 == r2 && v1 == v2,
            (InvalidMergeParameter(a), InvalidMergeParameter(b)) => a == b,
            (InvalidRegionSymbol(a), InvalidRegionSymbol(b)) => a == b,

            // foreign errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (EmptyCatalogList, EmptyCatalogList) => true,

            _ => false,
        }
    }
}
