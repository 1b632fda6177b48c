use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid sort key '{key}': {message}")]
    InvalidKey { key: String, message: String },
    #[error("line {line}, field {field}: {message}")]
    InvalidField {
        line: usize,
        field: usize,
        message: String,
    },
}
