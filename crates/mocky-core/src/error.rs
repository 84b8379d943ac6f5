use thiserror::Error;

/// Core error type shared across Mocky crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The generation configuration violates its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Dataset type tag that is not part of the entity catalogue.
    #[error("unknown dataset type: {0}")]
    UnknownEntity(String),
    /// Export target tag that is not recognised.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
    /// SQL dialect tag that is not recognised.
    #[error("unknown sql dialect: {0}")]
    UnknownDialect(String),
    /// Relation mode tag that is not recognised.
    #[error("unknown relation mode: {0}")]
    UnknownRelationMode(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by Mocky crates.
pub type Result<T> = std::result::Result<T, Error>;
