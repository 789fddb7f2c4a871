//! Reads workspace manifests from disk and writes the merged one.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::{DependencyMerge, ManifestError, WorkspaceManifest};

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_PATH: &str = "./temp-license-check";

/// Inputs of one merge.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Directory relative paths are resolved against; must hold `node_modules`.
    pub root: PathBuf,
    /// Workspace directories, in merge order.
    pub workspace_paths: Vec<String>,
    /// Directory the merged `package.json` is written to.
    pub output_path: String,
}

/// Result of a successful merge.
#[derive(Debug)]
pub struct MergeReport {
    /// Output directory as given in [`MergeOptions::output_path`].
    pub output_path: String,
    /// Where the merged `package.json` was written.
    pub package_json: PathBuf,
    /// The merged dependencies.
    pub merge: DependencyMerge,
    /// Non-fatal problems, one per skipped workspace.
    pub warnings: Vec<String>,
}

/// Merges the production dependencies of every workspace into
/// `{output_path}/package.json`.
///
/// Workspaces without a `package.json`, or with an empty one, are skipped
/// with a warning. Anything that cannot be read or parsed stops the merge.
///
/// # Errors
///
/// See [`ManifestError`].
pub fn merge_workspaces(options: &MergeOptions) -> Result<MergeReport, ManifestError> {
    if !options.root.join("node_modules").exists() {
        return Err(ManifestError::MissingNodeModules);
    }
    if options.workspace_paths.is_empty() {
        return Err(ManifestError::NoWorkspacePaths);
    }

    info!(workspaces = ?options.workspace_paths, "Provided workspaces");

    let output_dir = options.root.join(&options.output_path);
    fs::create_dir_all(&output_dir).map_err(|source| ManifestError::Write {
        path: output_dir.clone(),
        source,
    })?;

    let mut merge = DependencyMerge::new();
    let mut warnings = Vec::new();

    for workspace in &options.workspace_paths {
        info!(workspace = %workspace, "Processing workspace");

        let display_path = Path::new(workspace).join("package.json");
        let manifest_path = options.root.join(&display_path);

        if !manifest_path.exists() {
            let message = format!(
                "The \"package.json\" file is not found in the \"{workspace}\" workspace. Skipping..."
            );
            warn!(workspace = %workspace, "{message}");
            warnings.push(message);
            continue;
        }

        let content = fs::read_to_string(&manifest_path).map_err(|e| ManifestError::Process {
            path: display_path.clone(),
            reason: e.to_string(),
        })?;

        if content.is_empty() {
            let message = format!(
                "The \"package.json\" file in the \"{workspace}\" workspace is empty. Skipping..."
            );
            warn!(workspace = %workspace, "{message}");
            warnings.push(message);
            continue;
        }

        let parsed: Value = serde_json::from_str(&content).map_err(|e| ManifestError::Process {
            path: display_path.clone(),
            reason: e.to_string(),
        })?;

        let added = merge.add(workspace, WorkspaceManifest::from_json(&parsed));
        info!(workspace = %workspace, dependencies = added, "Merged workspace dependencies");
    }

    info!(total = merge.merged().len(), "Total merged dependencies");

    if merge.is_empty() {
        return Err(ManifestError::NoDependencies);
    }

    let package_json = output_dir.join("package.json");
    info!(path = %package_json.display(), "Creating temporary package.json with the production dependencies");

    let body = serde_json::to_string_pretty(&merge.to_temp_package()).map_err(|e| {
        ManifestError::Write {
            path: package_json.clone(),
            source: e.into(),
        }
    })?;
    fs::write(&package_json, body).map_err(|source| ManifestError::Write {
        path: package_json.clone(),
        source,
    })?;

    info!(
        path = %package_json.display(),
        by_workspace = ?merge.by_workspace(),
        "Temporary package.json created with merged dependencies from all workspaces"
    );

    Ok(MergeReport {
        output_path: options.output_path.clone(),
        package_json,
        merge,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn repo_root() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        dir
    }

    fn write_manifest(root: &Path, workspace: &str, content: &str) {
        let dir = root.join(workspace);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), content).unwrap();
    }

    fn options(root: &Path, workspaces: &[&str]) -> MergeOptions {
        MergeOptions {
            root: root.to_path_buf(),
            workspace_paths: workspaces.iter().map(|w| w.to_string()).collect(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }

    #[test]
    fn writes_merged_manifest() {
        let root = repo_root();
        write_manifest(
            root.path(),
            "packages/app",
            r#"{"name": "@acme/app", "dependencies": {"react": "^17.0.0"}}"#,
        );
        write_manifest(
            root.path(),
            "packages/lib",
            r#"{"name": "@acme/lib", "dependencies": {"react": "^18.2.0", "zod": "3.22.4"}}"#,
        );

        let report =
            merge_workspaces(&options(root.path(), &["packages/app", "packages/lib"])).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&report.package_json).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "name": "temp-license-check",
                "dependencies": {"react": "^18.2.0", "zod": "3.22.4"}
            })
        );
        assert_eq!(report.output_path, DEFAULT_OUTPUT_PATH);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn skips_missing_and_empty_manifests_with_warnings() {
        let root = repo_root();
        fs::create_dir_all(root.path().join("packages/missing")).unwrap();
        write_manifest(root.path(), "packages/empty", "");
        write_manifest(
            root.path(),
            "packages/app",
            r#"{"dependencies": {"chalk": "5.3.0"}}"#,
        );

        let report = merge_workspaces(&options(
            root.path(),
            &["packages/missing", "packages/empty", "packages/app"],
        ))
        .unwrap();

        assert_eq!(
            report.warnings,
            vec![
                "The \"package.json\" file is not found in the \"packages/missing\" workspace. Skipping...",
                "The \"package.json\" file in the \"packages/empty\" workspace is empty. Skipping...",
            ]
        );
        assert_eq!(report.merge.merged().len(), 1);
        assert!(report.merge.by_workspace().contains_key("packages/app"));
    }

    #[test]
    fn requires_node_modules_at_the_root() {
        let root = tempfile::tempdir().unwrap();
        let err = merge_workspaces(&options(root.path(), &["packages/app"])).unwrap_err();
        assert!(matches!(err, ManifestError::MissingNodeModules));
    }

    #[test]
    fn requires_at_least_one_workspace() {
        let root = repo_root();
        let err = merge_workspaces(&options(root.path(), &[])).unwrap_err();
        assert!(matches!(err, ManifestError::NoWorkspacePaths));
    }

    #[test]
    fn invalid_json_stops_the_merge() {
        let root = repo_root();
        write_manifest(root.path(), "packages/app", "{ not json");

        let err = merge_workspaces(&options(root.path(), &["packages/app"])).unwrap_err();

        let message = err.to_string();
        assert!(
            message.starts_with("Failed to process \"packages/app/package.json\": "),
            "{message}"
        );
    }

    #[test]
    fn fails_when_no_dependencies_are_found() {
        let root = repo_root();
        write_manifest(root.path(), "packages/app", r#"{"name": "@acme/app"}"#);

        let err = merge_workspaces(&options(root.path(), &["packages/app"])).unwrap_err();

        assert_eq!(
            err.to_string(),
            "No production dependencies found in any workspace"
        );
    }
}
