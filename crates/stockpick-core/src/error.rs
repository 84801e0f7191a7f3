/// Error types shared by the glossary server and anything else built on the core.
///
/// `CoreError` covers loading the compiled-in datasets. `CalcError` is the
/// "unavailable" outcome of a calculator: a missing input or an undefined
/// operation, kept distinct from a numeric zero.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("invalid slug: '{0}'")]
    InvalidSlug(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    #[error("result is not a finite number: {0}")]
    NonFinite(&'static str),
}
