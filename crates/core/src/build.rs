//! External build invocation
//!
//! Builds are delegated to the devcontainer CLI:
//!
//! ```text
//! <program> <verb> --workspace-folder <workspace>
//! ```
//!
//! The [`BuildRunner`] trait is the seam used by the orchestration layer, so
//! tests can substitute a recording runner for the real process.

use crate::errors::{BuildError, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info, instrument};

/// Default program name for the devcontainer CLI.
pub const DEFAULT_PROGRAM: &str = "devcontainer";

/// Default verb passed to the CLI.
pub const DEFAULT_VERB: &str = "build";

/// Something that can run a devcontainer CLI verb against a workspace.
pub trait BuildRunner {
    /// Run `verb` for `workspace`, blocking until it finishes.
    fn run(&self, verb: &str, workspace: &Path) -> Result<()>;
}

/// Runs the devcontainer CLI as a child process with inherited stdio.
#[derive(Debug, Clone)]
pub struct DevcontainerCli {
    program: String,
}

impl DevcontainerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for DevcontainerCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl BuildRunner for DevcontainerCli {
    #[instrument(skip(self), fields(program = %self.program))]
    fn run(&self, verb: &str, workspace: &Path) -> Result<()> {
        info!(
            "Running {} {} --workspace-folder {}",
            self.program,
            verb,
            workspace.display()
        );

        let status = Command::new(&self.program)
            .arg(verb)
            .arg("--workspace-folder")
            .arg(workspace)
            .status()
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            // Terminated by a signal: no exit code available
            let code = status.code().unwrap_or(-1);
            debug!("{} {} exited with {}", self.program, verb, code);
            return Err(BuildError::Failed {
                program: self.program.clone(),
                verb: verb.to_string(),
                code,
            }
            .into());
        }

        Ok(())
    }
}
