//! Pipeline errors.
//!
//! Only the surrounding pipeline (retrieval, parsing, persistence) can
//! fail; the code generator itself is total and returns plain text.

use thiserror::Error;

/// Errors raised before or after the generation pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid contract URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to fetch contract document: {0}")]
    Http(#[from] reqwest::Error),

    #[error("contract endpoint returned status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("failed to parse contract document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to write generated client: {0}")]
    Io(#[from] std::io::Error),
}
