//! Core library for devcm
//!
//! Loading and saving the workspace devcontainer document, reading the feature
//! catalog, merging selected features and profiles into a document, and
//! handing off builds to the devcontainer CLI.

pub mod build;
pub mod catalog;
pub mod document;
pub mod errors;
pub mod logging;
pub mod merge;
pub mod profiles;
pub mod selection;
pub mod settings;
pub mod store;

pub use catalog::FeatureDescriptor;
pub use document::Document;

/// Get the version of the core library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
