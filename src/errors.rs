//! Typed error hierarchy for the board engine.
//!
//! Two top-level enums cover the two subsystems:
//! - `ServiceError`: Task Service calls
//! - `BoardError`: board state operations

use thiserror::Error;

/// Errors from a Task Service call.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status. `message` is the
    /// `message` field of the JSON error body, when one was sent.
    #[error("Request failed with status code {status}")]
    Rejected { status: u16, message: Option<String> },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    /// The human-readable message supplied by the service, if any.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Text shown to the user: the service message, or this error's own
    /// description when the service did not provide one.
    pub fn user_message(&self) -> String {
        self.service_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    /// HTTP status of a rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from board state operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("No project selected")]
    NoProjectSelected,

    #[error("Board state lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Service(#[from] ServiceError),
}
