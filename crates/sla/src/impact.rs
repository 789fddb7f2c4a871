//! Impact levels and their SLA windows.

use serde::{Deserialize, Serialize};

/// Severity classification of an issue. Drives which SLA window applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    /// Window of 4 weeks.
    Blocker,
    /// Window of 10 weeks.
    Critical,
    /// Window of 20 weeks.
    Serious,
    /// Window of 30 weeks.
    Moderate,
}

/// SLA window length, in whole weeks, for every impact level.
///
/// Listed in resolution order: when an issue carries several impact labels the
/// earliest entry here wins.
pub const SLA_WINDOWS: [(ImpactLevel, u32); 4] = [
    (ImpactLevel::Blocker, 4),
    (ImpactLevel::Critical, 10),
    (ImpactLevel::Serious, 20),
    (ImpactLevel::Moderate, 30),
];

impl ImpactLevel {
    /// The label name that marks an issue with this impact level.
    pub fn as_str(self) -> &'static str {
        match self {
            ImpactLevel::Blocker => "Blocker",
            ImpactLevel::Critical => "Critical",
            ImpactLevel::Serious => "Serious",
            ImpactLevel::Moderate => "Moderate",
        }
    }

    /// Weeks allowed before an issue of this level is in breach.
    pub fn sla_window_weeks(self) -> u32 {
        SLA_WINDOWS
            .iter()
            .find(|(level, _)| *level == self)
            .map_or(0, |(_, weeks)| *weeks)
    }

    /// Resolves the impact level of an issue from its label names.
    ///
    /// Levels are tried in [`SLA_WINDOWS`] order and each is matched
    /// case-insensitively against every label; the first level with a match
    /// is returned.
    pub fn resolve<S: AsRef<str>>(labels: &[S]) -> Option<Self> {
        SLA_WINDOWS.iter().map(|(level, _)| *level).find(|level| {
            let wanted = level.as_str().to_lowercase();
            labels
                .iter()
                .any(|label| label.as_ref().to_lowercase() == wanted)
        })
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
