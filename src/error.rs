use thiserror::Error;

/// Reasons a raw game row is dropped before it reaches the pipeline.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing required field {0}")]
    MissingField(&'static str),
    #[error("unparseable game date {0:?}")]
    InvalidDate(String),
    #[error("malformed row: {0}")]
    Malformed(#[from] csv::Error),
}
