//! Subcommand handlers. Each validates its own inputs and drives one action.

pub mod merge_manifests;
pub mod sla_labels;
