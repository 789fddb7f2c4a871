//! Port traits for the issue tracker.
//!
//! The run reads issues through [`IssueSource`] and writes labels through
//! [`LabelMutator`]. Infrastructure crates implement both; this crate never
//! sees transport, pagination, or authentication.

use async_trait::async_trait;

use crate::{Issue, IssueNumber, RepositoryId, TrackerError};

/// Supplies the open issues an SLA run works on.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Returns every open issue in `repo` that carries all of `required_labels`.
    ///
    /// Label names on the returned issues are already normalised.
    async fn open_issues_with_labels(
        &self,
        repo: &RepositoryId,
        required_labels: &[String],
    ) -> Result<Vec<Issue>, TrackerError>;
}

/// Adds and removes labels on issues.
///
/// Each call may fail independently. Callers await one call before issuing
/// the next.
#[async_trait]
pub trait LabelMutator: Send + Sync {
    /// Removes the label `name` from `issue`.
    async fn remove_label(
        &self,
        repo: &RepositoryId,
        issue: IssueNumber,
        name: &str,
    ) -> Result<(), TrackerError>;

    /// Adds `names` to `issue`, keeping its existing labels.
    async fn add_labels(
        &self,
        repo: &RepositoryId,
        issue: IssueNumber,
        names: &[String],
    ) -> Result<(), TrackerError>;
}
