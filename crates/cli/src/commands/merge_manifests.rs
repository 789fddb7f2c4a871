//! `ci-actions merge-manifests`: the workspace manifest merger.

use anyhow::Context;
use manifest::{merge_workspaces, MergeOptions};

use crate::config::MergeManifestsArgs;
use crate::workflow::{self, StepOutputs};

/// Merges workspace dependencies relative to the working directory and
/// publishes the output directory as the `temp-path` step output.
///
/// # Errors
///
/// Configuration errors, any [`manifest::ManifestError`], or a failure to
/// write the step output.
pub fn execute(args: MergeManifestsArgs, outputs: &StepOutputs) -> anyhow::Result<()> {
    let config = args.into_config()?;
    let root = std::env::current_dir().context("Failed to resolve the working directory")?;

    let report = merge_workspaces(&MergeOptions {
        root,
        workspace_paths: config.workspace_paths,
        output_path: config.output_path,
    })?;

    for warning in &report.warnings {
        workflow::warning(warning);
    }

    outputs
        .set("temp-path", &report.output_path)
        .context("Failed to write step output")?;
    Ok(())
}
