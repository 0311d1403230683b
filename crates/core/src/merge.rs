//! Feature merge engine
//!
//! Applies a selection of catalog features to a devcontainer document. The
//! result is a new document whose `features` map contains every previously
//! configured reference plus one entry per selected feature:
//!
//! ```json
//! { "features": { "<reference>": { ...options } } }
//! ```
//!
//! Selections are applied in order, so when two selected features share a
//! reference the later one wins. Re-applying the same selection is a no-op.

use crate::catalog::FeatureDescriptor;
use crate::document::{Document, FEATURES_KEY};
use crate::errors::{ConfigError, FeatureError, Result};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Return a copy of `base` with `selected` applied to its `features` map.
///
/// Every selected feature must carry a non-empty string `reference`. The whole
/// batch is validated before anything is built, so an error leaves no partial
/// result behind.
///
/// ## Errors
///
/// - `FeatureError::MissingReference` if any selected feature lacks a usable reference
/// - `ConfigError::Validation` if `base` has a `features` value that is not an object
#[instrument(skip_all, fields(selected = selected.len()))]
pub fn apply_features(base: &Document, selected: &[FeatureDescriptor]) -> Result<Document> {
    let entries = selected
        .iter()
        .enumerate()
        .map(|(position, feature)| match feature.reference() {
            Some(reference) => Ok((reference.to_string(), feature.options())),
            None => Err(FeatureError::MissingReference {
                position,
                name: feature.name().to_string(),
            }),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut features = existing_features(base)?;
    for (reference, options) in entries {
        debug!("Setting feature {}", reference);
        features.insert(reference, options);
    }

    Ok(base.with(FEATURES_KEY, Value::Object(features)))
}

/// Shallow copy of the document's current `features` map (empty if absent).
fn existing_features(base: &Document) -> Result<Map<String, Value>> {
    match base.features() {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(ConfigError::Validation {
            message: "'features' must be an object mapping feature references to options"
                .to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DevcmError;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    fn feature(value: Value) -> FeatureDescriptor {
        match value {
            Value::Object(map) => FeatureDescriptor::new(map),
            _ => panic!("feature fixture must be an object"),
        }
    }

    #[test]
    fn test_apply_adds_features_with_options() {
        let base = doc(json!({"image": "x"}));
        let selected = vec![feature(json!({"reference": "r1", "options": {"version": "2"}}))];

        let result = apply_features(&base, &selected).unwrap();
        assert_eq!(
            result.into_value(),
            json!({"image": "x", "features": {"r1": {"version": "2"}}})
        );
    }

    #[test]
    fn test_apply_empty_selection_sets_empty_features() {
        let result = apply_features(&doc(json!({"image": "x"})), &[]).unwrap();
        assert_eq!(result.features(), Some(&json!({})));
    }

    #[test]
    fn test_apply_empty_selection_keeps_existing_features() {
        let base = doc(json!({"features": {"r0": {"a": 1}}}));
        let result = apply_features(&base, &[]).unwrap();
        assert_eq!(result, base);
    }

    #[test]
    fn test_apply_preserves_existing_references() {
        let base = doc(json!({"features": {"r0": {"a": 1}}}));
        let result = apply_features(&base, &[feature(json!({"reference": "r1"}))]).unwrap();
        assert_eq!(result.features(), Some(&json!({"r0": {"a": 1}, "r1": {}})));
    }

    #[test]
    fn test_apply_overwrites_existing_reference() {
        let base = doc(json!({"features": {"r1": {"version": "1"}}}));
        let selected = vec![feature(json!({"reference": "r1", "options": {"version": "2"}}))];
        let result = apply_features(&base, &selected).unwrap();
        assert_eq!(result.features(), Some(&json!({"r1": {"version": "2"}})));
    }

    #[test]
    fn test_apply_duplicate_reference_last_wins() {
        let selected = vec![
            feature(json!({"reference": "r1", "options": {"v": "first"}})),
            feature(json!({"reference": "r1", "options": {"v": "second"}})),
        ];
        let result = apply_features(&Document::new(), &selected).unwrap();
        assert_eq!(result.features(), Some(&json!({"r1": {"v": "second"}})));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let base = doc(json!({"image": "x", "features": {"r0": {}}}));
        let selected = vec![
            feature(json!({"reference": "r1"})),
            feature(json!({"reference": "r2", "options": {"x": true}})),
        ];
        let once = apply_features(&base, &selected).unwrap();
        let twice = apply_features(&once, &selected).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_missing_reference_aborts_batch() {
        let base = doc(json!({"image": "x"}));
        let selected = vec![
            feature(json!({"reference": "r1"})),
            feature(json!({"name": "Broken"})),
        ];

        let err = apply_features(&base, &selected).unwrap_err();
        match err {
            DevcmError::Feature(FeatureError::MissingReference { position, name }) => {
                assert_eq!(position, 1);
                assert_eq!(name, "Broken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(base.features(), None);
    }

    #[test]
    fn test_apply_empty_reference_is_missing() {
        let err = apply_features(&Document::new(), &[feature(json!({"reference": ""}))])
            .unwrap_err();
        assert!(matches!(
            err,
            DevcmError::Feature(FeatureError::MissingReference { .. })
        ));
    }

    #[test]
    fn test_apply_null_features_treated_as_empty() {
        let base = doc(json!({"features": null}));
        let result = apply_features(&base, &[feature(json!({"reference": "r1"}))]).unwrap();
        assert_eq!(result.features(), Some(&json!({"r1": {}})));
    }

    #[test]
    fn test_apply_rejects_non_object_features() {
        let base = doc(json!({"features": ["r1"]}));
        let err = apply_features(&base, &[]).unwrap_err();
        assert!(matches!(
            err,
            DevcmError::Config(ConfigError::Validation { .. })
        ));
    }
}
