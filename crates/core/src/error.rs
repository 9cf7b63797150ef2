use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogbookError {
    /// Caller-supplied record violates a required-field or level constraint.
    /// Displays as the bare message so it can be returned to clients as-is.
    #[error("{0}")]
    Validation(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("storage error: {0}")]
    Store(String),

    #[error("row scan error: {0}")]
    RowScan(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LogbookError>;
