//! SLA tier labels and the tiering function.

use serde::{Deserialize, Serialize};

use crate::{ImpactLevel, WeeksOld};

/// Proximity of an issue to, or past, its SLA window.
///
/// An issue should carry at most one tier label at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlaTier {
    /// Three weeks before breach.
    P3,
    /// Two weeks before breach.
    P2,
    /// One week before breach.
    P1,
    /// Window exhausted.
    Breach,
}

impl SlaTier {
    /// Every tier label, in the order they are checked for on an issue.
    pub const ALL: [SlaTier; 4] = [SlaTier::P1, SlaTier::P2, SlaTier::P3, SlaTier::Breach];

    /// The exact label name for this tier.
    pub fn as_str(self) -> &'static str {
        match self {
            SlaTier::P3 => "SLA P3",
            SlaTier::P2 => "SLA P2",
            SlaTier::P1 => "SLA P1",
            SlaTier::Breach => "SLA Breach",
        }
    }

    /// Maps a label name to a tier. Exact, case-sensitive match only.
    pub fn from_label(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.as_str() == name)
    }

    /// Returns `true` if `name` is exactly one of the four tier labels.
    pub fn is_tier_label(name: &str) -> bool {
        Self::from_label(name).is_some()
    }

    /// Computes the tier for an issue `weeks_old` weeks old at `level`.
    ///
    /// With `W` the level's window: Breach at `W` or more, then P1 at `W-1`,
    /// P2 at `W-2`, P3 at `W-3`. Each bound is inclusive and the checks run
    /// most-severe first; an older issue satisfies every lower bound too, so
    /// only the first match counts. Younger issues get no tier.
    pub fn for_age(weeks_old: WeeksOld, level: ImpactLevel) -> Option<Self> {
        let weeks = weeks_old.as_u32();
        let window = level.sla_window_weeks();

        if weeks >= window {
            Some(SlaTier::Breach)
        } else if weeks >= window.saturating_sub(1) {
            Some(SlaTier::P1)
        } else if weeks >= window.saturating_sub(2) {
            Some(SlaTier::P2)
        } else if weeks >= window.saturating_sub(3) {
            Some(SlaTier::P3)
        } else {
            None
        }
    }
}

impl std::fmt::Display for SlaTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SLA_WINDOWS;

    fn tier(weeks: u32, level: ImpactLevel) -> Option<SlaTier> {
        SlaTier::for_age(WeeksOld::new(weeks), level)
    }

    #[test]
    fn tiers_are_monotonic_for_every_level() {
        for (level, window) in SLA_WINDOWS {
            for weeks in 0..=window - 4 {
                assert_eq!(tier(weeks, level), None, "{level} at {weeks} weeks");
            }
            assert_eq!(tier(window - 3, level), Some(SlaTier::P3), "{level}");
            assert_eq!(tier(window - 2, level), Some(SlaTier::P2), "{level}");
            assert_eq!(tier(window - 1, level), Some(SlaTier::P1), "{level}");
            for weeks in window..window + 10 {
                assert_eq!(tier(weeks, level), Some(SlaTier::Breach), "{level}");
            }
        }
    }

    #[test]
    fn new_blocker_has_no_tier() {
        assert_eq!(tier(0, ImpactLevel::Blocker), None);
    }

    #[test]
    fn equality_takes_the_more_severe_tier() {
        assert_eq!(tier(20, ImpactLevel::Serious), Some(SlaTier::Breach));
        assert_eq!(tier(9, ImpactLevel::Critical), Some(SlaTier::P1));
    }

    #[test]
    fn tier_labels_match_exactly() {
        assert_eq!(SlaTier::from_label("SLA P1"), Some(SlaTier::P1));
        assert_eq!(SlaTier::from_label("SLA Breach"), Some(SlaTier::Breach));
        assert!(!SlaTier::is_tier_label("sla p1"));
        assert!(!SlaTier::is_tier_label("SLA P1 "));
        assert!(!SlaTier::is_tier_label(""));
    }
}
