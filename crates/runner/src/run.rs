//! The sequential SLA label run.

use std::sync::Arc;

use serde::Serialize;
use sla::{
    classify, Classification, Issue, IssueSource, LabelMutator, RepositoryId, SlaTier, Timestamp,
};
use tracing::{debug, info, instrument};

use crate::RunError;

/// Counters reported at the end of a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Issues returned by the issue source.
    pub fetched: usize,
    /// Issues skipped for lack of an impact label.
    pub skipped: usize,
    /// Issues whose tier labels already matched their target.
    pub unchanged: usize,
    /// Issues that received at least one mutation.
    pub updated: usize,
    /// Tier labels removed across all issues.
    pub labels_removed: usize,
    /// Tier labels added across all issues.
    pub labels_added: usize,
}

/// One SLA label pass over a repository.
///
/// Issues are processed strictly in the order the source returns them, and
/// every tracker call is awaited before the next is made. The first failed
/// mutation ends the run; issues after it are not touched.
pub struct SlaLabelRun {
    source: Arc<dyn IssueSource>,
    mutator: Arc<dyn LabelMutator>,
    repo: RepositoryId,
    required_labels: Vec<String>,
}

impl SlaLabelRun {
    /// Creates a run over `repo`, considering only issues carrying every one
    /// of `required_labels`.
    pub fn new(
        source: Arc<dyn IssueSource>,
        mutator: Arc<dyn LabelMutator>,
        repo: RepositoryId,
        required_labels: Vec<String>,
    ) -> Self {
        Self {
            source,
            mutator,
            repo,
            required_labels,
        }
    }

    /// Fetches issues and converges their tier labels, evaluating ages at `now`.
    #[instrument(skip_all, fields(repo = %self.repo))]
    pub async fn execute(&self, now: Timestamp) -> Result<RunSummary, RunError> {
        info!(required_labels = ?self.required_labels, "Fetching open issues");

        let issues = self
            .source
            .open_issues_with_labels(&self.repo, &self.required_labels)
            .await
            .map_err(RunError::FetchFailed)?;

        let mut summary = RunSummary {
            fetched: issues.len(),
            ..RunSummary::default()
        };
        info!(total = issues.len(), "Total issues fetched");

        if issues.is_empty() {
            info!("No issues found with the required labels");
            return Ok(summary);
        }

        for issue in &issues {
            self.process_issue(issue, now, &mut summary).await?;
        }

        info!(
            fetched = summary.fetched,
            skipped = summary.skipped,
            unchanged = summary.unchanged,
            updated = summary.updated,
            labels_removed = summary.labels_removed,
            labels_added = summary.labels_added,
            "SLA label run complete"
        );
        Ok(summary)
    }

    async fn process_issue(
        &self,
        issue: &Issue,
        now: Timestamp,
        summary: &mut RunSummary,
    ) -> Result<(), RunError> {
        let (level, weeks_old, target, delta) = match classify(issue, now) {
            Classification::SkipNoImpactLevel => {
                info!(
                    issue = %issue.number,
                    "Issue #{} has no recognized impact level (Blocker, Critical, Serious, Moderate). Skipping.",
                    issue.number
                );
                summary.skipped += 1;
                return Ok(());
            }
            Classification::Classified {
                level,
                weeks_old,
                target,
                delta,
            } => (level, weeks_old, target, delta),
        };

        debug!(
            issue = %issue.number,
            impact = %level,
            weeks_old = weeks_old.as_u32(),
            tier = ?target.map(SlaTier::as_str),
            "Classified issue"
        );

        if delta.is_empty() {
            summary.unchanged += 1;
            return Ok(());
        }

        for stale in &delta.to_remove {
            info!(issue = %issue.number, label = %stale, "Removing label from issue");
            self.mutator
                .remove_label(&self.repo, issue.number, stale.as_str())
                .await
                .map_err(|source| RunError::LabelRemovalFailed {
                    label: stale.as_str().to_string(),
                    issue: issue.number,
                    source,
                })?;
            summary.labels_removed += 1;
        }

        if let Some(tier) = delta.to_add {
            info!(issue = %issue.number, label = %tier, "Adding new label to issue");
            self.mutator
                .add_labels(&self.repo, issue.number, &[tier.as_str().to_string()])
                .await
                .map_err(|source| RunError::LabelAdditionFailed {
                    label: tier.as_str().to_string(),
                    issue: issue.number,
                    source,
                })?;
            summary.labels_added += 1;
        }

        summary.updated += 1;
        Ok(())
    }
}
