//! Named configuration profiles
//!
//! A profile is a saved devcontainer document stored as `<dir>/<name>.json`
//! using the same canonical serialization as the configuration store. Saving
//! under an existing name replaces the previous snapshot.
//!
//! Profiles are applied with [`merge_profile`], a flat top-level overwrite.

use crate::document::{write_document, Document};
use crate::errors::{ProfileError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// File extension used for profile snapshots.
pub const PROFILE_EXTENSION: &str = "json";

/// Profile storage rooted at a single directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a profile named `name` is stored at.
    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, PROFILE_EXTENSION))
    }

    /// Save `document` as profile `name`, replacing any existing snapshot.
    ///
    /// ## Errors
    ///
    /// - `ProfileError::InvalidName` if `name` cannot be used as a file stem
    /// - `ProfileError::Io` if the directory or file cannot be written
    #[instrument(skip(self, document), fields(dir = %self.dir.display()))]
    pub fn save(&self, name: &str, document: &Document) -> Result<PathBuf> {
        validate_name(name)?;
        let path = self.profile_path(name);
        let written = write_document(&path, document).map_err(ProfileError::Io)?;
        debug!("Saved profile '{}' to {}", name, written.display());
        Ok(written)
    }

    /// Load every profile in the directory, keyed by name in lexicographic order.
    ///
    /// A missing directory yields an empty map. A single malformed profile
    /// fails the whole call with `ProfileError::Parsing` naming that profile.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load_all(&self) -> Result<BTreeMap<String, Document>> {
        let mut profiles = BTreeMap::new();
        for (name, path) in self.discover()? {
            let document = read_profile(&name, &path)?;
            profiles.insert(name, document);
        }
        debug!("Loaded {} profiles", profiles.len());
        Ok(profiles)
    }

    /// Load a single profile by name.
    ///
    /// Goes through [`ProfileStore::load_all`], so a malformed sibling profile
    /// still fails the call.
    pub fn load(&self, name: &str) -> Result<Document> {
        self.load_all()?.remove(name).ok_or_else(|| {
            ProfileError::Unknown {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Sorted names of all stored profiles, without parsing them.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.discover()?.into_keys().collect())
    }

    fn discover(&self) -> Result<BTreeMap<String, PathBuf>> {
        let mut found = BTreeMap::new();
        if !self.dir.is_dir() {
            debug!("Profiles directory {} does not exist", self.dir.display());
            return Ok(found);
        }

        for entry in fs::read_dir(&self.dir).map_err(ProfileError::Io)? {
            let path = entry.map_err(ProfileError::Io)?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                // `save` never produces hidden names
                if stem.starts_with('.') {
                    continue;
                }
                found.insert(stem.to_string(), path.clone());
            }
        }
        Ok(found)
    }
}

fn read_profile(name: &str, path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path).map_err(ProfileError::Io)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| ProfileError::Parsing {
            name: name.to_string(),
            message: e.to_string(),
        })?;
    Document::from_value(value).ok_or_else(|| {
        ProfileError::Parsing {
            name: name.to_string(),
            message: "profile must contain a JSON object".to_string(),
        }
        .into()
    })
}

/// Check that `name` can be used as a profile file stem.
///
/// Rejects empty names, path separators and a leading `.`.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name must not be empty")
    } else if name.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else if name.starts_with('.') {
        Some("name must not start with '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ProfileError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Apply `profile` on top of `base`.
///
/// Every top-level key in `profile` replaces the same key in `base`; keys only
/// in `base` are kept. Nested values are not merged, so a profile's `features`
/// map replaces the base `features` map entirely.
pub fn merge_profile(base: &Document, profile: &Document) -> Document {
    let mut merged = base.as_map().clone();
    for (key, value) in profile.iter() {
        merged.insert(key.clone(), value.clone());
    }
    Document::from(merged)
}
