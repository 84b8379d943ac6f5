use thiserror::Error;

/// Errors emitted by the generation engine and the exporters.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("core error: {0}")]
    Core(#[from] mocky_core::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
