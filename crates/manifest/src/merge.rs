//! Pure dependency merging. No file access happens here.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Package name written into the merged manifest.
pub const TEMP_PACKAGE_NAME: &str = "temp-license-check";

/// Dependency name to version requirement, as found in a `package.json`.
pub type Dependencies = BTreeMap<String, Value>;

/// The parts of one workspace's `package.json` the merger reads.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceManifest {
    /// The `name` field, when it is a non-empty string.
    pub name: Option<String>,
    /// The `dependencies` object; empty when absent or not an object.
    pub dependencies: Dependencies,
}

impl WorkspaceManifest {
    /// Extracts the manifest fields from parsed `package.json` content.
    ///
    /// Anything that is not shaped like a manifest (a top-level array, a
    /// non-object `dependencies`) is read as "no dependencies".
    pub fn from_json(value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let dependencies = value
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|deps| deps.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Self { name, dependencies }
    }
}

/// Running union of workspace dependencies.
///
/// Workspaces are added in order; when two declare the same package the later
/// version wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyMerge {
    merged: Dependencies,
    by_workspace: BTreeMap<String, Dependencies>,
}

impl DependencyMerge {
    /// Creates an empty merge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one workspace. It is recorded under its package name, or under
    /// `workspace_path` when it has none. Returns the number of dependencies
    /// it contributed.
    pub fn add(&mut self, workspace_path: &str, manifest: WorkspaceManifest) -> usize {
        let count = manifest.dependencies.len();
        self.merged.extend(
            manifest
                .dependencies
                .iter()
                .map(|(name, version)| (name.clone(), version.clone())),
        );
        let key = manifest
            .name
            .unwrap_or_else(|| workspace_path.to_string());
        self.by_workspace.insert(key, manifest.dependencies);
        count
    }

    /// The merged dependency map.
    pub fn merged(&self) -> &Dependencies {
        &self.merged
    }

    /// Dependencies keyed by the workspace that declared them.
    pub fn by_workspace(&self) -> &BTreeMap<String, Dependencies> {
        &self.by_workspace
    }

    /// Returns `true` when no workspace contributed a dependency.
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// The manifest to write out.
    pub fn to_temp_package(&self) -> TempPackage<'_> {
        TempPackage {
            name: TEMP_PACKAGE_NAME,
            dependencies: &self.merged,
        }
    }
}

/// The merged `package.json`.
#[derive(Debug, Serialize)]
pub struct TempPackage<'a> {
    /// Always [`TEMP_PACKAGE_NAME`].
    pub name: &'a str,
    /// Union of all workspace dependencies.
    pub dependencies: &'a Dependencies,
}

/// Splits a comma-separated workspace list, trimming entries and dropping
/// empty ones.
pub fn parse_workspace_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect()
}
