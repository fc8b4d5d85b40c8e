//! Error types for configuration and catalog access

use thiserror::Error;

/// Fatal configuration problems, checked before any mapping starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("EXERCISEDB_API_KEY is missing. Set it in your environment before running the mapper.")]
    MissingApiKey,

    #[error("invalid ExerciseDB base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Errors from a single catalog request
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ExerciseDB request failed ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode ExerciseDB response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot build request URL from {0}")]
    InvalidUrl(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
