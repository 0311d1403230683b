//! Configuration store
//!
//! Loads and saves the workspace's `devcontainer.json`. The canonical location
//! is fixed at `<workspace>/.devcontainer/devcontainer.json`.
//!
//! Loading accepts JSON with comments and trailing commas, as commonly found in
//! hand-edited devcontainer files. Saving always writes canonical JSON (see
//! [`Document::to_canonical_string`]), so comments are not preserved.
//!
//! A missing file is reported as [`ConfigError::NotFound`]; substituting an
//! empty document is left to the caller.

use crate::document::{write_document, Document};
use crate::errors::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Directory under the workspace root holding the configuration.
pub const DEVCONTAINER_DIR: &str = ".devcontainer";

/// File name of the configuration inside [`DEVCONTAINER_DIR`].
pub const DEVCONTAINER_FILE: &str = "devcontainer.json";

/// Canonical configuration path for `workspace`.
pub fn devcontainer_path(workspace: &Path) -> PathBuf {
    workspace.join(DEVCONTAINER_DIR).join(DEVCONTAINER_FILE)
}

/// Load the devcontainer document for `workspace`.
///
/// ## Errors
///
/// - `ConfigError::NotFound` if the canonical file does not exist
/// - `ConfigError::Parsing` if the content is not valid JSON(C)
/// - `ConfigError::Validation` if the root is not a JSON object
/// - `ConfigError::Io` for other read failures
#[instrument(skip_all, fields(workspace = %workspace.display()))]
pub fn load(workspace: &Path) -> Result<Document> {
    let path = devcontainer_path(workspace);
    load_from_path(&path)
}

/// Load a devcontainer document from an explicit file path.
pub fn load_from_path(path: &Path) -> Result<Document> {
    debug!("Loading devcontainer document from {}", path.display());

    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        debug!("Failed to read configuration file: {}", e);
        ConfigError::Io(e)
    })?;

    // Plain JSON keeps full integer range; json5 only covers comments and trailing commas
    let raw_value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(_) => json5::from_str(&content).map_err(|e| {
            debug!("Failed to parse configuration file: {}", e);
            ConfigError::Parsing {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?,
    };

    let document = Document::from_value(raw_value).ok_or_else(|| ConfigError::Validation {
        message: format!(
            "Dev container config ({}) must contain a JSON object literal.",
            path.display()
        ),
    })?;

    debug!("Loaded document with {} top-level keys", document.as_map().len());
    Ok(document)
}

/// Persist `document` as the workspace's devcontainer configuration.
///
/// Creates `.devcontainer/` if needed and replaces any existing file. Returns
/// the path written.
#[instrument(skip_all, fields(workspace = %workspace.display()))]
pub fn save(workspace: &Path, document: &Document) -> Result<PathBuf> {
    let path = devcontainer_path(workspace);
    let written = write_document(&path, document).map_err(ConfigError::Io)?;
    debug!("Saved devcontainer document to {}", written.display());
    Ok(written)
}
