//! Feature catalog loading
//!
//! A catalog is a YAML list of mappings, one per feature. Only the top-level
//! shape is validated here; individual fields are read through
//! [`FeatureDescriptor`] accessors, which apply defaults when keys are absent.
//!
//! ```yaml
//! - name: Node.js
//!   description: Node runtime and npm
//!   reference: ghcr.io/devcontainers/features/node:1
//!   options:
//!     version: lts
//! ```

use crate::errors::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, instrument};

/// Display label used when a catalog entry has no `name`.
pub const DEFAULT_FEATURE_NAME: &str = "Unnamed Feature";

/// One catalog entry.
///
/// Wraps the raw mapping so unknown keys are preserved; the recognized keys
/// are exposed through accessors with documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureDescriptor(Map<String, Value>);

impl FeatureDescriptor {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Display name; [`DEFAULT_FEATURE_NAME`] when absent or not a string.
    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or(DEFAULT_FEATURE_NAME)
    }

    /// Description; empty when absent or not a string.
    pub fn description(&self) -> &str {
        self.str_field("description").unwrap_or("")
    }

    /// Feature reference used as the key in a document's `features` map.
    ///
    /// `None` when the key is missing, empty, or not a string.
    pub fn reference(&self) -> Option<&str> {
        self.str_field("reference").filter(|r| !r.is_empty())
    }

    /// Per-feature options, passed through verbatim. Defaults to `{}`.
    pub fn options(&self) -> Value {
        match self.0.get("options") {
            Some(Value::Null) | None => Value::Object(Map::new()),
            Some(v) => v.clone(),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Load a feature catalog from `path`.
///
/// ## Errors
///
/// - `CatalogError::NotFound` if `path` is not an existing file
/// - `CatalogError::Parsing` if the content is not valid YAML
/// - `CatalogError::Invalid` if the root is not a list, or an entry is not a mapping
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_catalog(path: &Path) -> Result<Vec<FeatureDescriptor>> {
    if !path.is_file() {
        return Err(CatalogError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(CatalogError::Io)?;
    let features = parse_catalog(&content).map_err(|e| match e {
        CatalogError::Parsing { message, .. } => CatalogError::Parsing {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })?;

    debug!("Loaded {} features from catalog", features.len());
    Ok(features)
}

/// Parse catalog content already read into memory.
pub fn parse_catalog(content: &str) -> std::result::Result<Vec<FeatureDescriptor>, CatalogError> {
    // An empty YAML stream has no root node at all
    if content.trim().is_empty() {
        return Err(CatalogError::Invalid {
            message: "Feature catalog must be a list of feature mappings (document is empty)"
                .to_string(),
        });
    }

    let root: Value = serde_yaml::from_str(content).map_err(|e| CatalogError::Parsing {
        path: String::new(),
        message: e.to_string(),
    })?;

    let entries = match root {
        Value::Array(entries) => entries,
        other => {
            return Err(CatalogError::Invalid {
                message: format!(
                    "Feature catalog must be a list of feature mappings, found {}",
                    value_kind(&other)
                ),
            })
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(FeatureDescriptor(fields)),
            other => Err(CatalogError::Invalid {
                message: format!(
                    "Feature catalog entries must be mappings (entry {} is {})",
                    index,
                    value_kind(&other)
                ),
            }),
        })
        .collect()
}

/// Display names for every catalog entry, defaults applied.
pub fn feature_names(features: &[FeatureDescriptor]) -> Vec<String> {
    features.iter().map(|f| f.name().to_string()).collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
