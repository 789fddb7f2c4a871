//! Errors that stop a manifest merge.
//!
//! Each message is shown to the operator verbatim as the failure signal.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of [`crate::merge_workspaces`].
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Dependencies have not been installed at the root.
    #[error("The `node_modules` directory not found in the root directory. Please install all dependencies before this action.")]
    MissingNodeModules,

    /// The workspace list was empty after trimming.
    #[error("No workspace paths provided. Please specify at least one valid workspace path in the `workspace-path-list` input.")]
    NoWorkspacePaths,

    /// A workspace `package.json` could not be read or parsed.
    #[error("Failed to process \"{}\": {reason}", .path.display())]
    Process {
        /// The offending `package.json`.
        path: PathBuf,
        /// Read or parse error.
        reason: String,
    },

    /// Every workspace was skipped or declared no dependencies.
    #[error("No production dependencies found in any workspace")]
    NoDependencies,

    /// Creating the output directory or writing the merged manifest failed.
    #[error("Failed to write \"{}\": {source}", .path.display())]
    Write {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
