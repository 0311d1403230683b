use anyhow::Result;
use clap::Parser;
use devcm_core::errors::{BuildError, DevcmError};

mod cli;
mod commands;
mod ui;

fn main() -> Result<()> {
    let parsed = cli::Cli::parse();

    match parsed.dispatch() {
        Ok(()) => Ok(()),
        Err(err) => {
            if let Some(devcm_error) = err.downcast_ref::<DevcmError>() {
                match devcm_error {
                    // Bad index input is a usage error
                    DevcmError::Selection(_) => {
                        eprintln!("Error: {}", devcm_error);
                        std::process::exit(2);
                    }
                    // Surface the build tool's own status
                    DevcmError::Build(BuildError::Failed { code, .. }) if *code > 0 => {
                        eprintln!("Error: {:#}", err);
                        std::process::exit(*code);
                    }
                    _ => {}
                }
            }

            Err(err)
        }
    }
}
