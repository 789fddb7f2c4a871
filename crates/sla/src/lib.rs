//! SLA labelling domain.
//!
//! This crate contains every domain concept used by the SLA label action:
//! impact levels and their windows, tier classification, label normalisation,
//! and label-delta reconciliation. Infrastructure crates implement the traits
//! defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `RepositoryId`, `RunId`) |
//! | [`types`] | Time value types (`Timestamp`, `WeeksOld`) |
//! | [`impact`] | `ImpactLevel` and the SLA window table |
//! | [`tier`] | `SlaTier` and the tiering function |
//! | [`labels`] | Wire label shapes and name normalisation |
//! | [`issue`] | The `Issue` view |
//! | [`reconcile`] | `LabelDelta` and per-issue classification |
//! | [`ports`] | `IssueSource` and `LabelMutator` traits |
//! | [`errors`] | `TrackerError` |

pub mod errors;
pub mod identifiers;
pub mod impact;
pub mod issue;
pub mod labels;
pub mod ports;
pub mod reconcile;
pub mod tier;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::TrackerError;
pub use identifiers::{IssueNumber, RepositoryId, RunId};
pub use impact::{ImpactLevel, SLA_WINDOWS};
pub use issue::Issue;
pub use labels::{normalize_label_name, normalize_labels, RawLabel};
pub use ports::{IssueSource, LabelMutator};
pub use reconcile::{classify, Classification, LabelDelta};
pub use tier::SlaTier;
pub use types::{Timestamp, WeeksOld};

/// Labels an issue must carry to be considered by the SLA run.
pub const DEFAULT_REQUIRED_LABELS: [&str; 2] = ["A11y", "VPAT"];
