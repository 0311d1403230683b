//! User prompts
//!
//! [`InteractivePrompter`] shows the catalog table and asks on the terminal.
//! [`ScriptedPrompter`] answers from command-line flags and never blocks,
//! which is what non-interactive runs and tests use.

use crate::commands::configure::Prompter;
use crate::ui::catalog_table;
use anyhow::{Context, Result};
use devcm_core::catalog::FeatureDescriptor;
use devcm_core::selection::select_features;
use dialoguer::{Confirm, Input};

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct InteractivePrompter;

impl InteractivePrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for InteractivePrompter {
    fn select_features(&mut self, catalog: &[FeatureDescriptor]) -> Result<Vec<FeatureDescriptor>> {
        if catalog.is_empty() {
            tracing::info!("Feature catalog is empty; nothing to select");
            return Ok(Vec::new());
        }

        print!("{}", catalog_table::render(catalog));
        let raw: String = Input::new()
            .with_prompt("Enter comma-separated feature indices")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read feature selection")?;

        Ok(select_features(catalog, &raw)?)
    }

    fn confirm_rebuild(&mut self) -> Result<bool> {
        Confirm::new()
            .with_prompt("Rebuild the Dev Container now?")
            .default(false)
            .interact()
            .context("Failed to read rebuild confirmation")
    }
}

/// Answers prompts from pre-supplied values.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    selection: Option<String>,
}

impl ScriptedPrompter {
    /// `selection` is the raw index list (`--select`); `None` selects nothing.
    pub fn new(selection: Option<String>) -> Self {
        Self { selection }
    }
}

impl Prompter for ScriptedPrompter {
    fn select_features(&mut self, catalog: &[FeatureDescriptor]) -> Result<Vec<FeatureDescriptor>> {
        if catalog.is_empty() {
            tracing::info!("Feature catalog is empty; ignoring selection");
            return Ok(Vec::new());
        }

        let raw = self.selection.as_deref().unwrap_or("");
        Ok(select_features(catalog, raw)?)
    }

    fn confirm_rebuild(&mut self) -> Result<bool> {
        Ok(false)
    }
}
