//! Normalisation of label representations returned by issue trackers.
//!
//! The GitHub issues API returns labels either as bare strings or as objects
//! whose `name` may be missing or `null`, and list entries themselves may be
//! `null`. Everything downstream compares plain names, so every shape is
//! reduced to a single `String` here. Shapes with no derivable name become the
//! empty string, which never equals a known label.

use serde::{Deserialize, Serialize};

/// One entry of an issue's label list as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    /// A bare label name.
    Name(String),
    /// A label object. Only `name` is read; other fields are ignored.
    Object {
        /// The label name, if the tracker supplied one.
        #[serde(default)]
        name: Option<String>,
    },
    /// Any other JSON value.
    Other(serde_json::Value),
}

impl RawLabel {
    /// Reduces this entry to a label name, or `""` when none is derivable.
    pub fn into_name(self) -> String {
        match self {
            RawLabel::Name(name) => name,
            RawLabel::Object { name } => name.unwrap_or_default(),
            RawLabel::Other(_) => String::new(),
        }
    }
}

/// Normalises one (possibly `null`) label entry to its name.
pub fn normalize_label_name(label: Option<RawLabel>) -> String {
    label.map(RawLabel::into_name).unwrap_or_default()
}

/// Normalises a whole label list, preserving order.
pub fn normalize_labels(labels: Vec<Option<RawLabel>>) -> Vec<String> {
    labels.into_iter().map(normalize_label_name).collect()
}
