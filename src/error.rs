use thiserror::Error;

#[derive(Error, Debug)]
pub enum LadleError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Embedding provider error: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LadleError>;
