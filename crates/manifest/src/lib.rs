//! Workspace manifest merger.
//!
//! Collects the production `dependencies` of several npm workspaces into one
//! temporary `package.json`, so a license scanner can be pointed at the union
//! instead of at each workspace separately.
//!
//! [`merge`] holds the pure merging rules; [`workspace`] does the file reads
//! and the single write.

pub mod errors;
pub mod merge;
pub mod workspace;

pub use errors::ManifestError;
pub use merge::{
    parse_workspace_list, Dependencies, DependencyMerge, TempPackage, WorkspaceManifest,
    TEMP_PACKAGE_NAME,
};
pub use workspace::{merge_workspaces, MergeOptions, MergeReport, DEFAULT_OUTPUT_PATH};
