//! Runtime settings
//!
//! [`ManagerSettings`] carries the three paths a run needs. It is built from the
//! workspace root with conventional defaults and then adjusted from CLI flags;
//! nothing here reads global state.

use std::path::{Path, PathBuf};

/// Default catalog file name under the workspace root.
pub const DEFAULT_CATALOG_FILE: &str = "features.yml";

/// Default profiles directory name under the workspace root.
pub const DEFAULT_PROFILES_DIR: &str = ".profiles";

/// Paths used by a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerSettings {
    pub workspace: PathBuf,
    pub catalog_path: PathBuf,
    pub profiles_dir: PathBuf,
}

impl ManagerSettings {
    /// Conventional layout: `features.yml` and `.profiles/` under `workspace`.
    pub fn for_workspace(workspace: &Path) -> Self {
        Self {
            workspace: workspace.to_path_buf(),
            catalog_path: workspace.join(DEFAULT_CATALOG_FILE),
            profiles_dir: workspace.join(DEFAULT_PROFILES_DIR),
        }
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_profiles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profiles_dir = dir.into();
        self
    }
}
