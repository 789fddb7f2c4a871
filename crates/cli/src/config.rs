//! Command line and action input parsing.
//!
//! CI runners hand action inputs to the process as `INPUT_<NAME>` environment
//! variables, with the input name upper-cased and its dashes kept. Every input
//! is also accepted as a long flag for local runs. Required inputs are
//! optional at the clap level so a missing one is reported with the runner's
//! usual wording instead of a usage dump.

use clap::{Args, Parser, Subcommand, ValueEnum};
use github::DEFAULT_API_URL;
use manifest::{parse_workspace_list, DEFAULT_OUTPUT_PATH};
use sla::{RepositoryId, DEFAULT_REQUIRED_LABELS};
use thiserror::Error;

/// Problems with the inputs, detected before any work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required input was absent or blank.
    #[error("Input required and not supplied: {name}")]
    MissingInput {
        /// Action input name, e.g. `github-token`.
        name: &'static str,
    },

    /// The repository is not in `owner/repo` form.
    #[error("Invalid repository '{value}': expected 'owner/repo'")]
    InvalidRepository {
        /// The rejected value.
        value: String,
    },

    /// The marker label list was empty after trimming.
    #[error("At least one required label must be provided")]
    NoRequiredLabels,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "ci-actions", version, about = "CI automation actions")]
pub struct Cli {
    /// Log output format.
    #[arg(long, env = "CI_ACTIONS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Label marked issues with their SLA tier based on age and impact level
    SlaLabels(SlaLabelsArgs),

    /// Merge workspace production dependencies into one temporary package.json
    MergeManifests(MergeManifestsArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SlaLabelsArgs {
    /// Token used to authenticate against the GitHub API.
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository to process, as owner/repo.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// GitHub API root.
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Comma-separated labels an issue must carry to be considered.
    #[arg(long, env = "INPUT_REQUIRED-LABELS")]
    pub required_labels: Option<String>,
}

/// Validated configuration for the SLA label action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaLabelsConfig {
    /// Bearer token for the GitHub API.
    pub token: String,
    /// Repository whose issues are labelled.
    pub repository: RepositoryId,
    /// API root, `https://api.github.com` unless overridden.
    pub api_url: String,
    /// Labels an issue must carry to be fetched. Never empty.
    pub required_labels: Vec<String>,
}

impl SlaLabelsArgs {
    /// Validates the raw inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a missing token or repository, a malformed
    /// repository, or an empty label list.
    pub fn into_config(self) -> Result<SlaLabelsConfig, ConfigError> {
        let token = non_blank(self.github_token).ok_or(ConfigError::MissingInput {
            name: "github-token",
        })?;

        let repository = non_blank(self.repository).ok_or(ConfigError::MissingInput {
            name: "repository",
        })?;
        let repository = RepositoryId::parse(&repository)
            .ok_or(ConfigError::InvalidRepository { value: repository })?;

        let api_url = non_blank(self.api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let required_labels = match non_blank(self.required_labels) {
            Some(list) => split_list(&list),
            None => DEFAULT_REQUIRED_LABELS.iter().map(|l| l.to_string()).collect(),
        };
        if required_labels.is_empty() {
            return Err(ConfigError::NoRequiredLabels);
        }

        Ok(SlaLabelsConfig {
            token,
            repository,
            api_url,
            required_labels,
        })
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct MergeManifestsArgs {
    /// Comma-separated workspace directories to merge, in order.
    #[arg(long, env = "INPUT_WORKSPACE-PATH-LIST")]
    pub workspace_path_list: Option<String>,

    /// Directory the merged package.json is written to.
    #[arg(long, env = "INPUT_OUTPUT-PATH")]
    pub output_path: Option<String>,
}

/// Validated configuration for the manifest merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeManifestsConfig {
    /// Trimmed, non-empty workspace paths. May be empty; the merger reports that.
    pub workspace_paths: Vec<String>,
    /// Directory the merged `package.json` is written to.
    pub output_path: String,
}

impl MergeManifestsArgs {
    /// Validates the raw inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingInput`] when the workspace list is absent
    /// or blank.
    pub fn into_config(self) -> Result<MergeManifestsConfig, ConfigError> {
        let list = non_blank(self.workspace_path_list).ok_or(ConfigError::MissingInput {
            name: "workspace-path-list",
        })?;
        let output_path =
            non_blank(self.output_path).unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        Ok(MergeManifestsConfig {
            workspace_paths: parse_workspace_list(&list),
            output_path,
        })
    }
}

/// Splits a comma-separated input into trimmed, non-empty entries.
fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trims an input, treating blank as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sla_args(token: &str, repository: &str) -> SlaLabelsArgs {
        SlaLabelsArgs {
            github_token: Some(token.to_string()),
            repository: Some(repository.to_string()),
            ..SlaLabelsArgs::default()
        }
    }

    #[test]
    fn sla_defaults_apply() {
        let config = sla_args("t0k3n", "octo-org/widgets").into_config().unwrap();

        assert_eq!(config.token, "t0k3n");
        assert_eq!(config.repository.to_string(), "octo-org/widgets");
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.required_labels, vec!["A11y", "VPAT"]);
    }

    #[test]
    fn blank_token_is_missing() {
        let err = sla_args("   ", "octo-org/widgets").into_config().unwrap_err();
        assert_eq!(err.to_string(), "Input required and not supplied: github-token");
    }

    #[test]
    fn malformed_repository_is_rejected() {
        let err = sla_args("t", "widgets").into_config().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRepository {
                value: "widgets".to_string()
            }
        );
    }

    #[test]
    fn required_labels_can_be_overridden() {
        let args = SlaLabelsArgs {
            required_labels: Some(" A11y , WCAG ".to_string()),
            ..sla_args("t", "o/r")
        };
        assert_eq!(args.into_config().unwrap().required_labels, vec!["A11y", "WCAG"]);

        let args = SlaLabelsArgs {
            required_labels: Some(" , ".to_string()),
            ..sla_args("t", "o/r")
        };
        assert_eq!(args.into_config().unwrap_err(), ConfigError::NoRequiredLabels);
    }

    #[test]
    fn merge_requires_workspace_list() {
        let err = MergeManifestsArgs::default().into_config().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input required and not supplied: workspace-path-list"
        );
    }

    #[test]
    fn merge_output_defaults_when_blank() {
        let config = MergeManifestsArgs {
            workspace_path_list: Some("packages/app, packages/lib".to_string()),
            output_path: Some("  ".to_string()),
        }
        .into_config()
        .unwrap();

        assert_eq!(config.workspace_paths, vec!["packages/app", "packages/lib"]);
        assert_eq!(config.output_path, "./temp-license-check");
    }

    #[test]
    fn parses_subcommands_and_flags() {
        let cli = Cli::try_parse_from([
            "ci-actions",
            "--log-format",
            "json",
            "sla-labels",
            "--github-token",
            "t",
            "--repository",
            "o/r",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Command::SlaLabels(args) => {
                assert_eq!(args.github_token.as_deref(), Some("t"));
                assert_eq!(args.repository.as_deref(), Some("o/r"));
            }
            Command::MergeManifests(_) => panic!("expected sla-labels"),
        }
    }
}
