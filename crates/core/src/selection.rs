//! Feature selection input
//!
//! Users pick features by typing a comma-separated list of catalog indices,
//! e.g. `0, 2,3`. Blank chunks are ignored, so an empty answer selects
//! nothing. Any other token must be a valid index into the catalog.

use crate::catalog::FeatureDescriptor;
use crate::errors::{Result, SelectionError};

/// Parse `raw` into catalog indices, in the order given.
///
/// ## Errors
///
/// `SelectionError::InvalidIndex` for a non-numeric token or an index `>= len`.
pub fn parse_indices(raw: &str, len: usize) -> Result<Vec<usize>> {
    raw.split(',')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| match chunk.parse::<usize>() {
            Ok(index) if index < len => Ok(index),
            _ => Err(SelectionError::InvalidIndex {
                token: chunk.to_string(),
            }
            .into()),
        })
        .collect()
}

/// Resolve `raw` against `catalog`, returning the selected descriptors.
pub fn select_features(catalog: &[FeatureDescriptor], raw: &str) -> Result<Vec<FeatureDescriptor>> {
    Ok(parse_indices(raw, catalog.len())?
        .into_iter()
        .map(|index| catalog[index].clone())
        .collect())
}
