//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Service not reachable after {0} attempts")]
    ServiceUnavailable(usize),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("{operation} returned status {status}: {body}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;

/// Fail with `AssertionFailed` unless `cond` holds.
pub(crate) fn ensure(cond: bool, msg: impl FnOnce() -> String) -> E2eResult<()> {
    if cond {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed(msg()))
    }
}
