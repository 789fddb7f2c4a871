//! GitHub infrastructure adapter.
//!
//! Implements the tracker ports defined in the [`sla`] crate
//! ([`sla::IssueSource`], [`sla::LabelMutator`]) over the GitHub REST API using
//! [`reqwest`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! Request construction, pagination, authentication headers, and response
//! decoding are handled here; the [`sla`] crate never sees them.
//!
//! ## Endpoints
//!
//! | Port method | Request |
//! |-------------|---------|
//! | `open_issues_with_labels` | `GET /repos/{owner}/{repo}/issues?state=open&labels=…` (paged) |
//! | `remove_label` | `DELETE /repos/{owner}/{repo}/issues/{n}/labels/{name}` |
//! | `add_labels` | `POST /repos/{owner}/{repo}/issues/{n}/labels` |

mod client;
mod wire;

pub use client::{GithubClient, GithubClientError, DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
