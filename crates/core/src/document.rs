//! Devcontainer document value type
//!
//! A [`Document`] is a JSON object with arbitrary keys. Only `features` has
//! meaning to this crate; everything else is carried through untouched. Nested
//! values use [`serde_json::Value`] as the variant type so unknown keys survive
//! a load/merge/save cycle.
//!
//! Serialization is canonical: object keys are sorted recursively, indentation
//! is two spaces and the file ends with a newline. Saving a logically identical
//! document twice therefore produces byte-identical files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reserved key holding the reference -> options map.
pub const FEATURES_KEY: &str = "features";

/// A devcontainer configuration (or profile snapshot) as a string-keyed map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document (`{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Return a copy of this document with `key` set to `value`.
    pub fn with(&self, key: impl Into<String>, value: Value) -> Self {
        let mut map = self.0.clone();
        map.insert(key.into(), value);
        Self(map)
    }

    /// The `features` entry, if present.
    pub fn features(&self) -> Option<&Value> {
        self.0.get(FEATURES_KEY)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Render the canonical on-disk form (sorted keys, 2-space indent, trailing newline).
    pub fn to_canonical_string(&self) -> serde_json::Result<String> {
        let mut value = Value::Object(self.0.clone());
        sort_json_object(&mut value);
        let mut out = serde_json::to_string_pretty(&value)?;
        out.push('\n');
        Ok(out)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}

/// Sort all object keys recursively for stable JSON output
fn sort_json_object(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<_, _> = std::mem::take(map).into_iter().collect();
            *map = sorted
                .into_iter()
                .map(|(k, mut v)| {
                    sort_json_object(&mut v);
                    (k, v)
                })
                .collect();
        }
        Value::Array(arr) => {
            for item in arr {
                sort_json_object(item);
            }
        }
        _ => {}
    }
}

/// Write `document` to `path` as a whole-file replacement.
///
/// The parent directory is created if missing. Content goes to a hidden
/// temporary sibling first and is then renamed over the target, so readers
/// never observe a half-written file. A serialization failure is reported
/// before anything touches the filesystem.
pub(crate) fn write_document(path: &Path, document: &Document) -> std::io::Result<PathBuf> {
    let content = document.to_canonical_string()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_file_name(format!(
        ".{}.tmp",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
    ));

    fs::write(&temp_path, content.as_bytes())?;

    #[cfg(windows)]
    if path.exists() {
        fs::remove_file(path)?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    debug!("Wrote document to {}", path.display());
    Ok(path.to_path_buf())
}
