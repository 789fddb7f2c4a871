//! The issue view the SLA run works on.

use serde::{Deserialize, Serialize};

use crate::{ImpactLevel, IssueNumber, Timestamp, WeeksOld};

/// An open issue as seen by the SLA run: its identity, creation time, and
/// current label names. Owned and mutated by the issue tracker; read once per
/// run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number within the repository.
    pub number: IssueNumber,
    /// When the issue was opened.
    pub created_at: Timestamp,
    /// Normalised label names, in tracker order.
    pub labels: Vec<String>,
}

impl Issue {
    /// Creates an [`Issue`] from already-normalised label names.
    pub fn new(number: IssueNumber, created_at: Timestamp, labels: Vec<String>) -> Self {
        Self {
            number,
            created_at,
            labels,
        }
    }

    /// Age in whole weeks at `now`.
    pub fn weeks_old(&self, now: Timestamp) -> WeeksOld {
        WeeksOld::between(self.created_at, now)
    }

    /// Impact level resolved from this issue's labels.
    pub fn impact_level(&self) -> Option<ImpactLevel> {
        ImpactLevel::resolve(&self.labels)
    }

    /// Returns `true` if a label with exactly this name is present.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}
