//! Request and response bodies exchanged with the GitHub REST API.

use serde::{Deserialize, Serialize};
use sla::{normalize_labels, Issue, IssueNumber, RawLabel, Timestamp};

/// One element of `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Deserialize)]
pub(crate) struct IssueResponse {
    pub number: u64,
    pub created_at: Timestamp,
    #[serde(default)]
    pub labels: Vec<Option<RawLabel>>,
}

impl IssueResponse {
    pub(crate) fn into_issue(self) -> Issue {
        Issue::new(
            IssueNumber::new(self.number),
            self.created_at,
            normalize_labels(self.labels),
        )
    }
}

/// Body of `POST /repos/{owner}/{repo}/issues/{n}/labels`.
#[derive(Debug, Serialize)]
pub(crate) struct AddLabelsRequest<'a> {
    pub labels: &'a [String],
}

/// Error body GitHub returns with non-success responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_issue_with_mixed_labels() {
        let body = r#"{
            "number": 42,
            "title": "Button has no accessible name",
            "created_at": "2024-01-01T08:30:00Z",
            "labels": [{"id": 1, "name": "A11y"}, "VPAT", {"name": null}, null]
        }"#;

        let issue = serde_json::from_str::<IssueResponse>(body)
            .unwrap()
            .into_issue();

        assert_eq!(issue.number, IssueNumber::new(42));
        assert_eq!(issue.created_at.to_string(), "2024-01-01T08:30:00+00:00");
        assert_eq!(issue.labels, vec!["A11y", "VPAT", "", ""]);
    }

    #[test]
    fn missing_label_list_is_empty() {
        let body = r#"{"number": 1, "created_at": "2024-01-01T00:00:00Z"}"#;
        let issue = serde_json::from_str::<IssueResponse>(body)
            .unwrap()
            .into_issue();
        assert!(issue.labels.is_empty());
    }
}
