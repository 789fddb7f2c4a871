//! Label-delta reconciliation.
//!
//! Given the labels an issue carries now and the tier it should carry, compute
//! the smallest set of mutations that converges the two. Only the four tier
//! labels are ever touched. Stale tier labels are all removed, so an issue left
//! with several tier labels by an interrupted run heals on the next one.

use serde::{Deserialize, Serialize};

use crate::{ImpactLevel, Issue, SlaTier, Timestamp, WeeksOld};

/// Label mutations needed to bring one issue to its target tier.
///
/// `to_remove` never contains `to_add`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDelta {
    /// Stale tier labels, in the order they appear on the issue. Applied first.
    pub to_remove: Vec<SlaTier>,
    /// Target tier, when it is not already present. Applied after removals.
    pub to_add: Option<SlaTier>,
}

impl LabelDelta {
    /// Computes the delta between `current` labels and `target`.
    pub fn between<S: AsRef<str>>(current: &[S], target: Option<SlaTier>) -> Self {
        let mut to_remove: Vec<SlaTier> = Vec::new();
        for tier in current
            .iter()
            .filter_map(|label| SlaTier::from_label(label.as_ref()))
        {
            if Some(tier) != target && !to_remove.contains(&tier) {
                to_remove.push(tier);
            }
        }

        let to_add = target.filter(|tier| {
            !current
                .iter()
                .any(|label| label.as_ref() == tier.as_str())
        });

        Self { to_remove, to_add }
    }

    /// Returns `true` when the issue already matches its target.
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_none()
    }

    /// Applies this delta to a label list, as the tracker would.
    ///
    /// Non-tier labels keep their positions; the added tier goes last.
    pub fn apply(&self, labels: &[String]) -> Vec<String> {
        let mut next: Vec<String> = labels
            .iter()
            .filter(|label| {
                SlaTier::from_label(label)
                    .map_or(true, |tier| !self.to_remove.contains(&tier))
            })
            .cloned()
            .collect();
        if let Some(tier) = self.to_add {
            next.push(tier.as_str().to_string());
        }
        next
    }
}

/// Result of classifying one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// No impact label was found; the issue is left untouched.
    SkipNoImpactLevel,
    /// The issue has an impact level; `delta` may be empty.
    Classified {
        /// Impact level that selected the SLA window.
        level: ImpactLevel,
        /// Age used for tiering.
        weeks_old: WeeksOld,
        /// Tier the issue should carry, if any.
        target: Option<SlaTier>,
        /// Mutations needed to reach `target`.
        delta: LabelDelta,
    },
}

/// Classifies `issue` at `now`: resolves impact, tiers by age, and computes
/// the label delta.
pub fn classify(issue: &Issue, now: Timestamp) -> Classification {
    let Some(level) = issue.impact_level() else {
        return Classification::SkipNoImpactLevel;
    };
    let weeks_old = issue.weeks_old(now);
    let target = SlaTier::for_age(weeks_old, level);
    let delta = LabelDelta::between(&issue.labels, target);

    Classification::Classified {
        level,
        weeks_old,
        target,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IssueNumber;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn now() -> Timestamp {
        Timestamp::parse_rfc3339("2024-01-29T12:00:00Z").unwrap()
    }

    fn issue(age: Duration, labels: &[&str]) -> Issue {
        Issue::new(
            IssueNumber::new(10),
            Timestamp::from_utc(now().as_datetime() - age),
            labels.iter().map(|l| l.to_string()).collect(),
        )
    }

    fn delta_of(issue: &Issue) -> LabelDelta {
        match classify(issue, now()) {
            Classification::Classified { delta, .. } => delta,
            Classification::SkipNoImpactLevel => panic!("expected classification"),
        }
    }

    #[test]
    fn removes_every_stale_tier_label() {
        let delta = LabelDelta::between(&["A11y", "SLA P1", "VPAT", "SLA P2"], Some(SlaTier::Breach));
        assert_eq!(
            delta,
            LabelDelta {
                to_remove: vec![SlaTier::P1, SlaTier::P2],
                to_add: Some(SlaTier::Breach),
            }
        );
    }

    #[test]
    fn keeps_the_target_when_already_present() {
        let delta = LabelDelta::between(&["SLA P2", "SLA Breach"], Some(SlaTier::Breach));
        assert_eq!(delta.to_remove, vec![SlaTier::P2]);
        assert_eq!(delta.to_add, None);
    }

    #[test]
    fn no_target_clears_all_tier_labels() {
        let delta = LabelDelta::between(&["Blocker", "SLA P3"], None);
        assert_eq!(delta.to_remove, vec![SlaTier::P3]);
        assert_eq!(delta.to_add, None);
    }

    #[test]
    fn duplicate_tier_labels_are_removed_once() {
        let delta = LabelDelta::between(&["SLA P1", "SLA P1"], None);
        assert_eq!(delta.to_remove, vec![SlaTier::P1]);
    }

    #[test]
    fn tier_labels_are_case_sensitive() {
        let delta = LabelDelta::between(&["sla p1", "Sla Breach"], Some(SlaTier::P1));
        assert!(delta.to_remove.is_empty());
        assert_eq!(delta.to_add, Some(SlaTier::P1));
    }

    #[test]
    fn reconciling_twice_is_a_no_op() {
        let cases: [(&[&str], Option<SlaTier>); 4] = [
            (&["A11y", "VPAT", "Blocker", "SLA P1", "SLA P2"], Some(SlaTier::Breach)),
            (&["A11y", "VPAT", "Serious"], Some(SlaTier::P3)),
            (&["A11y", "SLA P3"], None),
            (&["A11y"], None),
        ];
        for (labels, target) in cases {
            let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
            let first = LabelDelta::between(&labels, target);
            let converged = first.apply(&labels);
            let second = LabelDelta::between(&converged, target);
            assert!(second.is_empty(), "{labels:?} -> {converged:?} -> {second:?}");
        }
    }

    #[test]
    fn five_week_old_blocker_moves_from_p1_to_breach() {
        let delta = delta_of(&issue(Duration::weeks(5), &["A11y", "VPAT", "Blocker", "SLA P1"]));
        assert_eq!(delta.to_remove, vec![SlaTier::P1]);
        assert_eq!(delta.to_add, Some(SlaTier::Breach));
    }

    #[test]
    fn twenty_week_old_serious_issue_is_breached() {
        let delta = delta_of(&issue(Duration::weeks(20), &["A11y", "VPAT", "Serious"]));
        assert!(delta.to_remove.is_empty());
        assert_eq!(delta.to_add, Some(SlaTier::Breach));
    }

    #[test]
    fn three_day_old_blocker_drops_its_tier() {
        let delta = delta_of(&issue(Duration::days(3), &["A11y", "VPAT", "Blocker", "SLA P3"]));
        assert_eq!(delta.to_remove, vec![SlaTier::P3]);
        assert_eq!(delta.to_add, None);
    }

    #[test]
    fn new_blocker_needs_no_mutation() {
        let delta = delta_of(&issue(Duration::zero(), &["A11y", "VPAT", "Blocker"]));
        assert!(delta.is_empty());
    }

    #[test]
    fn issue_without_impact_is_skipped() {
        let issue = issue(Duration::weeks(50), &["A11y", "VPAT", "SLA P1"]);
        assert_eq!(classify(&issue, now()), Classification::SkipNoImpactLevel);
    }

    #[test]
    fn lowercase_impact_label_still_classifies() {
        let classification = classify(&issue(Duration::weeks(3), &["A11y", "blocker"]), now());
        match classification {
            Classification::Classified { level, target, .. } => {
                assert_eq!(level, ImpactLevel::Blocker);
                assert_eq!(target, Some(SlaTier::P1));
            }
            Classification::SkipNoImpactLevel => panic!("expected classification"),
        }
    }
}
