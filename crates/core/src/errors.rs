//! Error types and handling
//!
//! Each concern (configuration store, feature catalog, feature merge, profiles,
//! selection input, external build) has its own error enum. They are wrapped in
//! [`DevcmError`] so callers can propagate a single type and still match on the
//! specific kind when mapping to user-facing messages or exit codes.

use thiserror::Error;

/// Configuration store errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    /// Configuration file parsing error
    #[error("Failed to parse configuration file {path}: {message}")]
    Parsing { path: String, message: String },

    /// Configuration shape error (parsed, but not usable as a document)
    #[error("Configuration validation error: {message}")]
    Validation { message: String },

    /// Configuration file I/O error
    #[error("Failed to access configuration file")]
    Io(#[from] std::io::Error),
}

/// Feature catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file not found
    #[error("Feature catalog not found: {path}")]
    NotFound { path: String },

    /// Catalog content is not valid YAML
    #[error("Failed to parse feature catalog {path}: {message}")]
    Parsing { path: String, message: String },

    /// Catalog parsed but has the wrong top-level shape
    #[error("Invalid feature catalog: {message}")]
    Invalid { message: String },

    /// Catalog file I/O error
    #[error("Failed to read feature catalog")]
    Io(#[from] std::io::Error),
}

/// Feature merge errors
#[derive(Error, Debug)]
pub enum FeatureError {
    /// A selected feature has no usable `reference`
    #[error("Selected feature #{position} ('{name}') is missing a 'reference' key")]
    MissingReference { position: usize, name: String },
}

/// Profile store errors
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Requested profile is not present in the profiles directory
    #[error("Unknown profile: {name}")]
    Unknown { name: String },

    /// A single profile failed to parse
    #[error("Failed to parse profile '{name}': {message}")]
    Parsing { name: String, message: String },

    /// Profile name cannot be used as a file stem
    #[error("Invalid profile name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Profile file I/O error
    #[error("Failed to access profile storage")]
    Io(#[from] std::io::Error),
}

/// Feature selection input errors
#[derive(Error, Debug)]
pub enum SelectionError {
    /// Token is not a number or is outside the catalog
    #[error("Invalid feature index: {token}")]
    InvalidIndex { token: String },
}

/// External build tool errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// The tool ran and exited with a non-zero status
    #[error("{program} {verb} failed with exit code {code}")]
    Failed {
        program: String,
        verb: String,
        code: i32,
    },

    /// The tool could not be started at all
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum DevcmError {
    /// Configuration store errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Feature catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Feature merge errors
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),

    /// Profile errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Selection input errors
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// External build errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),
}

impl DevcmError {
    /// True when an expected artifact (devcontainer document or catalog) is missing.
    ///
    /// Callers that fall back to an empty document match on this instead of
    /// treating every I/O failure as absence.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DevcmError::Config(ConfigError::NotFound { .. })
                | DevcmError::Catalog(CatalogError::NotFound { .. })
        )
    }
}

/// Convenience type alias for Results with DevcmError
pub type Result<T> = std::result::Result<T, DevcmError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::NotFound {
            path: "/ws/.devcontainer/devcontainer.json".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Configuration file not found: /ws/.devcontainer/devcontainer.json"
        );

        let error = ConfigError::Parsing {
            path: "devcontainer.json".to_string(),
            message: "unexpected end of input".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Failed to parse configuration file devcontainer.json: unexpected end of input"
        );
    }

    #[test]
    fn test_feature_error_display() {
        let error = FeatureError::MissingReference {
            position: 1,
            name: "Node".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Selected feature #1 ('Node') is missing a 'reference' key"
        );
    }

    #[test]
    fn test_build_error_display() {
        let error = BuildError::Failed {
            program: "devcontainer".to_string(),
            verb: "build".to_string(),
            code: 3,
        };
        assert_eq!(
            format!("{}", error),
            "devcontainer build failed with exit code 3"
        );
    }

    #[test]
    fn test_is_not_found() {
        let err: DevcmError = ConfigError::NotFound {
            path: "x".to_string(),
        }
        .into();
        assert!(err.is_not_found());

        let err: DevcmError = CatalogError::NotFound {
            path: "features.yml".to_string(),
        }
        .into();
        assert!(err.is_not_found());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DevcmError = ConfigError::Io(io).into();
        assert!(!err.is_not_found());

        let err: DevcmError = ProfileError::Unknown {
            name: "base".to_string(),
        }
        .into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_wrapping_from_domain_errors() {
        let err: DevcmError = CatalogError::Invalid {
            message: "root".to_string(),
        }
        .into();
        assert!(matches!(err, DevcmError::Catalog(CatalogError::Invalid { .. })));

        let err: DevcmError = SelectionError::InvalidIndex {
            token: "x".to_string(),
        }
        .into();
        assert!(matches!(err, DevcmError::Selection(_)));
    }

    #[test]
    fn test_anyhow_conversion() {
        let err = DevcmError::Profile(ProfileError::Unknown {
            name: "base".to_string(),
        });
        let anyhow_error = anyhow::Error::from(err);
        assert!(anyhow_error.to_string().contains("Unknown profile: base"));
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DevcmError::Profile(ProfileError::Io(io_error));

        assert!(err.source().is_some());
        if let Some(source) = err.source() {
            assert!(source.source().is_some());
        }
    }
}
