//! Fatal errors of an SLA label run.
//!
//! Every variant aborts the whole run. Its `Display` output is the exact
//! message surfaced as the process failure signal, so operators can tell which
//! mutation failed without reading further logs.

use sla::{IssueNumber, TrackerError};
use thiserror::Error;

/// Errors that end an SLA label run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The issue source could not list issues. The tracker's message is
    /// surfaced unchanged.
    #[error(transparent)]
    FetchFailed(TrackerError),

    /// Removing a stale tier label failed.
    #[error("Could not remove label {label} from issue #{issue}: {source}")]
    LabelRemovalFailed {
        /// Label that could not be removed.
        label: String,
        /// Issue the removal targeted.
        issue: IssueNumber,
        /// Reason reported by the tracker.
        source: TrackerError,
    },

    /// Adding the target tier label failed.
    #[error("Could not add label {label} to issue #{issue}: {source}")]
    LabelAdditionFailed {
        /// Label that could not be added.
        label: String,
        /// Issue the addition targeted.
        issue: IssueNumber,
        /// Reason reported by the tracker.
        source: TrackerError,
    },

    /// The run failed without a usable error value (for example a panic
    /// inside the run task).
    #[error("An unknown error occurred: {detail}")]
    Unknown {
        /// String form of whatever was caught.
        detail: String,
    },
}

impl RunError {
    /// Builds [`RunError::Unknown`] from a panic payload.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let detail = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };
        RunError::Unknown { detail }
    }
}
