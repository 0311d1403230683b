//! Profile listing
//!
//! Prints the names of saved profiles, one per line, to stdout.

use anyhow::{Context, Result};
use devcm_core::profiles::ProfileStore;
use devcm_core::settings::ManagerSettings;
use std::io::Write;

pub fn list(settings: &ManagerSettings, out: &mut dyn Write) -> Result<()> {
    let store = ProfileStore::new(&settings.profiles_dir);
    let names = store
        .names()
        .with_context(|| format!("Failed to list profiles in {}", store.dir().display()))?;

    if names.is_empty() {
        tracing::info!("No profiles found in {}", store.dir().display());
        return Ok(());
    }

    for name in names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}
