use crate::commands::configure::{self, ConfigureArgs, Prompter};
use crate::commands::profiles;
use crate::ui::prompt::{InteractivePrompter, ScriptedPrompter};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use devcm_core::build::{DevcontainerCli, DEFAULT_PROGRAM, DEFAULT_VERB};
use devcm_core::settings::ManagerSettings;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Log format options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

/// Log level options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Informational messages and above
    Info,
    /// Debug messages and above
    Debug,
    /// All messages including trace
    Trace,
}

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version,
    about = "Devcontainer feature manager",
    long_about = "Devcontainer feature manager\n\nSelect features from a catalog, merge them into .devcontainer/devcontainer.json, save and restore named profiles, and trigger a devcontainer build.",
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    /// Log format (text or json, defaults to text, can be set via DEVCM_LOG_FORMAT env var)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Workspace root
    #[arg(long, value_name = "PATH", default_value = ".", env = "DEVCM_WORKSPACE")]
    pub workspace: PathBuf,

    /// Override feature catalog path (default: <workspace>/features.yml)
    #[arg(long, value_name = "PATH", env = "DEVCM_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Override profiles directory (default: <workspace>/.profiles)
    #[arg(long, value_name = "PATH", env = "DEVCM_PROFILES_DIR")]
    pub profiles_dir: Option<PathBuf>,

    /// Profile name to merge into the configuration before selecting features
    #[arg(long, value_name = "NAME")]
    pub from_profile: Option<String>,

    /// Save the resulting configuration as a profile with this name
    #[arg(long, value_name = "NAME")]
    pub save_profile: Option<String>,

    /// Trigger a devcontainer build after saving, without prompting
    #[arg(long)]
    pub rebuild: bool,

    /// Comma-separated catalog indices to select instead of prompting (e.g. "0,2")
    #[arg(long, value_name = "INDICES")]
    pub select: Option<String>,

    /// Never prompt; implied when stdin is not a terminal
    #[arg(long)]
    pub non_interactive: bool,

    /// List saved profiles and exit
    #[arg(long)]
    pub list_profiles: bool,

    /// Path to the devcontainer CLI used for builds
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PROGRAM)]
    pub devcontainer_cli: String,

    /// Devcontainer CLI verb to run when rebuilding
    #[arg(long, value_name = "VERB", default_value = DEFAULT_VERB)]
    pub build_verb: String,
}

impl Cli {
    /// Resolve the effective settings from the workspace and path overrides.
    pub fn settings(&self) -> ManagerSettings {
        let workspace = resolve_workspace(&self.workspace);
        let mut settings = ManagerSettings::for_workspace(&workspace);
        if let Some(catalog) = &self.catalog {
            settings = settings.with_catalog_path(catalog);
        }
        if let Some(dir) = &self.profiles_dir {
            settings = settings.with_profiles_dir(dir);
        }
        settings
    }

    /// Whether prompts may be shown.
    fn interactive(&self) -> bool {
        !self.non_interactive && self.select.is_none() && std::io::stdin().is_terminal()
    }

    /// Initialize logging and run the requested action.
    pub fn dispatch(self) -> Result<()> {
        let log_format = match self.log_format {
            Some(LogFormat::Text) => Some("text"),
            Some(LogFormat::Json) => Some("json"),
            None => None, // Let logging module check environment variable
        };

        let log_level = match self.log_level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        if std::env::var_os("DEVCM_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
            std::env::set_var(
                "RUST_LOG",
                format!("devcm={},devcm_core={}", log_level, log_level),
            );
        }
        devcm_core::logging::init(log_format)?;
        tracing::debug!("CLI initialized with log level: {}", log_level);

        let settings = self.settings();
        let mut stdout = std::io::stdout();

        if self.list_profiles {
            return profiles::list(&settings, &mut stdout);
        }

        let mut prompter: Box<dyn Prompter> = if self.interactive() {
            Box::new(InteractivePrompter::new())
        } else {
            tracing::debug!("Running non-interactively");
            Box::new(ScriptedPrompter::new(self.select.clone()))
        };
        let runner = DevcontainerCli::new(self.devcontainer_cli.clone());

        let args = ConfigureArgs {
            settings,
            from_profile: self.from_profile,
            save_profile: self.save_profile,
            rebuild: self.rebuild,
            build_verb: self.build_verb,
        };
        configure::execute(&args, prompter.as_mut(), &runner, &mut stdout)?;
        Ok(())
    }
}

fn resolve_workspace(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
