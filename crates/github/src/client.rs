//! REST client implementing the tracker ports.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, Url};
use sla::{Issue, IssueNumber, IssueSource, LabelMutator, RepositoryId, TrackerError};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::wire::{AddLabelsRequest, ErrorResponse, IssueResponse};

/// Public GitHub API root, used when `GITHUB_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Issues requested per page when listing. GitHub's maximum.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const API_VERSION: &str = "2022-11-28";

/// Errors constructing a [`GithubClient`].
#[derive(Debug, Error)]
pub enum GithubClientError {
    /// The API root is not an absolute `http(s)` URL.
    #[error("Invalid GitHub API URL '{url}': {reason}")]
    InvalidApiUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The token contains bytes that are not valid in an HTTP header.
    #[error("GitHub token is not a valid header value")]
    InvalidToken,

    /// The underlying HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// GitHub REST API client for issue listing and label mutation.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: Url,
    page_size: u32,
}

impl GithubClient {
    /// Creates a client authenticating with `token` against `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not a usable base URL, the token is
    /// not a valid header value, or the HTTP client cannot be created.
    pub fn new(token: &str, api_url: &str) -> Result<Self, GithubClientError> {
        let parsed = Url::parse(api_url).map_err(|e| GithubClientError::InvalidApiUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(GithubClientError::InvalidApiUrl {
                url: api_url.to_string(),
                reason: "expected an absolute http(s) URL".to_string(),
            });
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| GithubClientError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ci-actions/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url: parsed,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Overrides the number of issues requested per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Builds `{api}/repos/{owner}/{repo}/issues[/…]`, percent-encoding each
    /// segment.
    fn issues_url(&self, repo: &RepositoryId, rest: &[&str]) -> Result<Url, TrackerError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| TrackerError::Transport {
                message: format!("GitHub API URL '{}' cannot be a base", self.api_url),
            })?
            .pop_if_empty()
            .extend(["repos", repo.owner(), repo.name(), "issues"])
            .extend(rest);
        Ok(url)
    }

    async fn fetch_page(
        &self,
        repo: &RepositoryId,
        labels: &str,
        page: u32,
    ) -> Result<Vec<IssueResponse>, TrackerError> {
        let mut url = self.issues_url(repo, &[])?;
        url.query_pairs_mut()
            .append_pair("state", "open")
            .append_pair("labels", labels)
            .append_pair("per_page", &self.page_size.to_string())
            .append_pair("page", &page.to_string());

        let response = self.http.get(url).send().await.map_err(transport_error)?;
        let response = ensure_success(response).await?;

        response
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl IssueSource for GithubClient {
    #[instrument(skip_all, fields(repo = %repo))]
    async fn open_issues_with_labels(
        &self,
        repo: &RepositoryId,
        required_labels: &[String],
    ) -> Result<Vec<Issue>, TrackerError> {
        let labels = required_labels.join(",");
        let mut issues = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page(repo, &labels, page).await?;
            let received = batch.len();
            debug!(page, received, "Fetched issue page");

            issues.extend(batch.into_iter().map(IssueResponse::into_issue));
            if received < self.page_size as usize {
                break;
            }
            page += 1;
        }

        Ok(issues)
    }
}

#[async_trait]
impl LabelMutator for GithubClient {
    #[instrument(skip_all, fields(repo = %repo, issue = %issue))]
    async fn remove_label(
        &self,
        repo: &RepositoryId,
        issue: IssueNumber,
        name: &str,
    ) -> Result<(), TrackerError> {
        let number = issue.to_string();
        let url = self.issues_url(repo, &[number.as_str(), "labels", name])?;

        let response = self.http.delete(url).send().await.map_err(transport_error)?;
        ensure_success(response).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(repo = %repo, issue = %issue))]
    async fn add_labels(
        &self,
        repo: &RepositoryId,
        issue: IssueNumber,
        names: &[String],
    ) -> Result<(), TrackerError> {
        let number = issue.to_string();
        let url = self.issues_url(repo, &[number.as_str(), "labels"])?;

        let response = self
            .http
            .post(url)
            .json(&AddLabelsRequest { labels: names })
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> TrackerError {
    TrackerError::Transport {
        message: err.to_string(),
    }
}

/// Passes successful responses through; turns anything else into
/// [`TrackerError::Api`] carrying GitHub's `message` when it sent one.
async fn ensure_success(response: Response) -> Result<Response, TrackerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.to_string());

    Err(TrackerError::Api {
        status: status.as_u16(),
        message,
    })
}
