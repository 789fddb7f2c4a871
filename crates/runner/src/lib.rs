//! SLA label run orchestration.
//!
//! [`SlaLabelRun`] drives one pass over a repository: it fetches the marked
//! issues through [`sla::IssueSource`], classifies each with the rules in the
//! [`sla`] crate, and applies the resulting label deltas through
//! [`sla::LabelMutator`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** The run sequences calls between business logic in
//! the [`sla`] crate and the tracker ports. It contains no domain rules of its
//! own.
//!
//! ## Ordering and failure
//!
//! Everything is sequential. Per issue, stale tier labels are removed before
//! the target tier is added, so the run itself never leaves two tier labels
//! on an issue. The first failed call aborts the run with a [`RunError`]; no
//! call is retried.

pub mod errors;
pub mod run;

pub use errors::RunError;
pub use run::{RunSummary, SlaLabelRun};
