//! Errors reported by the issue tracker collaborators.
//!
//! [`TrackerError`] is what an [`crate::IssueSource`] or [`crate::LabelMutator`]
//! implementation returns. Its `Display` output is the human-readable reason
//! that ends up embedded in the run's failure message, so variants render the
//! tracker's own message and little else.

use thiserror::Error;

/// Failure of a single call to the issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// The tracker answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the tracker.
        status: u16,
        /// Message supplied by the tracker, or the raw response body.
        message: String,
    },

    /// The request never produced a response (connection, TLS, DNS).
    #[error("{message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The tracker responded, but the body could not be understood.
    #[error("Invalid response from issue tracker: {message}")]
    InvalidResponse {
        /// What was wrong with the response.
        message: String,
    },
}

impl TrackerError {
    /// HTTP status of an [`TrackerError::Api`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            TrackerError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
