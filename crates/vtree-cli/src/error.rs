use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("classification failed: {0}")]
    Classify(#[from] vtree_core::ClassifyError),
}

pub type CliResult<T> = Result<T, CliError>;
