//! Configure command implementation
//!
//! The default `devcm` flow:
//!
//! 1. Check the `--save-profile` name, then load the feature catalog
//! 2. Load `.devcontainer/devcontainer.json`, or start from `{}` if it is missing
//! 3. Merge `--from-profile` into it (flat overwrite)
//! 4. Ask for a feature selection and apply it
//! 5. Save the document, then `--save-profile` if requested
//! 6. Trigger a build when `--rebuild` is set or the user confirms

use anyhow::{Context, Result};
use devcm_core::build::BuildRunner;
use devcm_core::catalog::{load_catalog, FeatureDescriptor};
use devcm_core::document::Document;
use devcm_core::merge::apply_features;
use devcm_core::profiles::{merge_profile, validate_name, ProfileStore};
use devcm_core::settings::ManagerSettings;
use devcm_core::store;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Source of user decisions during a run.
pub trait Prompter {
    /// Choose features from `catalog`.
    fn select_features(&mut self, catalog: &[FeatureDescriptor]) -> Result<Vec<FeatureDescriptor>>;

    /// Ask whether to rebuild now. Only consulted when `--rebuild` is not set.
    fn confirm_rebuild(&mut self) -> Result<bool>;
}

/// Configure command arguments
#[derive(Debug, Clone)]
pub struct ConfigureArgs {
    pub settings: ManagerSettings,
    pub from_profile: Option<String>,
    pub save_profile: Option<String>,
    pub rebuild: bool,
    pub build_verb: String,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigureOutcome {
    pub document: Document,
    pub saved_path: PathBuf,
    pub profile_path: Option<PathBuf>,
    pub rebuilt: bool,
}

#[instrument(skip_all, fields(workspace = %args.settings.workspace.display()))]
pub fn execute(
    args: &ConfigureArgs,
    prompter: &mut dyn Prompter,
    runner: &dyn BuildRunner,
    out: &mut dyn Write,
) -> Result<ConfigureOutcome> {
    let settings = &args.settings;

    if let Some(name) = &args.save_profile {
        validate_name(name)?;
    }

    let catalog = load_catalog(&settings.catalog_path).with_context(|| {
        format!(
            "Failed to load feature catalog from {}",
            settings.catalog_path.display()
        )
    })?;

    let mut document = match store::load(&settings.workspace) {
        Ok(document) => document,
        Err(e) if e.is_not_found() => {
            debug!("No devcontainer.json yet; starting from an empty document");
            Document::new()
        }
        Err(e) => return Err(e).context("Failed to load existing devcontainer configuration"),
    };

    let profiles = ProfileStore::new(&settings.profiles_dir);
    if let Some(name) = &args.from_profile {
        let profile = profiles.load(name)?;
        info!("Applying profile '{}'", name);
        document = merge_profile(&document, &profile);
    }

    let selected = prompter.select_features(&catalog)?;
    debug!("Selected {} features", selected.len());
    let updated = apply_features(&document, &selected)?;

    let saved_path = store::save(&settings.workspace, &updated)?;
    writeln!(out, "Saved updated devcontainer to {}", saved_path.display())?;

    let profile_path = match &args.save_profile {
        Some(name) => {
            let path = profiles.save(name, &updated)?;
            writeln!(out, "Saved profile to {}", path.display())?;
            Some(path)
        }
        None => None,
    };

    let rebuild = args.rebuild || prompter.confirm_rebuild()?;
    if rebuild {
        runner.run(&args.build_verb, &settings.workspace)?;
        writeln!(out, "devcontainer {} triggered", args.build_verb)?;
    }

    Ok(ConfigureOutcome {
        document: updated,
        saved_path,
        profile_path,
        rebuilt: rebuild,
    })
}
