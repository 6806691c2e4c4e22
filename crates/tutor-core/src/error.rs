use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load source {path}: {message}")]
    Source { path: String, message: String },

    #[error("Index build failed: {0}")]
    Index(String),
}

pub type Result<T> = std::result::Result<T, Error>;
