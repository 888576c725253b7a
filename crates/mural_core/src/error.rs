use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Author,
    Body,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Author => f.write_str("author"),
            RequiredField::Body => f.write_str("body"),
        }
    }
}

/// Failures surfaced by mural operations. None of them is fatal: fetch
/// failures become the retryable error panel, create failures a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MuralError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("request failed: {status} {reason}")]
    Http { status: u16, reason: String },
    #[error("required field `{field}` is empty")]
    Validation { field: RequiredField },
    #[error("malformed response body: {0}")]
    MalformedResponse(String),
}

impl MuralError {
    pub fn http(status: reqwest::StatusCode) -> Self {
        Self::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, MuralError::Validation { .. })
    }
}

impl From<reqwest::Error> for MuralError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::MalformedResponse(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::http(status);
        }
        Self::Network(err.to_string())
    }
}
