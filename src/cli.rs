//! Clap adapter.
//!
//! Compiled only with the `cli` feature (on by default). [`CraftArgs`] parses
//! argv; [`CraftArgs::into_action`] converts it into an [`Action`] and
//! [`CraftArgs::builder`] carries the global flags into a
//! [`ZinitcraftBuilder`]. All logic lives behind
//! [`ZinitcraftBuilder::handle`], so other front ends can build `Action`
//! values directly.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::builder::{Zinitcraft, ZinitcraftBuilder};
use crate::types::Action;

/// Compile a structured zsh configuration into a zinit-ready script.
#[derive(Debug, Parser)]
#[command(name = "zinitcraft", version)]
pub struct CraftArgs {
    /// Read the tool's settings from this TOML file.
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Where the rendered script is written (default: ~/.zshrc).
    #[arg(long, global = true, value_name = "PATH")]
    pub script_path: Option<PathBuf>,

    /// Where the JSON configuration is stored (default: ~/.zsh_cfg/zsh_config.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Overwrite files without keeping a `.backup` copy.
    #[arg(long, global = true)]
    pub no_backup: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CraftCommand,
}

#[derive(Debug, Subcommand)]
pub enum CraftCommand {
    /// Render the stored configuration to a zsh script.
    Render {
        /// Render this JSON file instead of the stored configuration.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render and write the script and the configuration.
    Apply {
        /// Apply this JSON file instead of the stored configuration.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Replace the stored configuration with a JSON file.
    Import {
        file: PathBuf,
    },
    /// Print the stored configuration as JSON.
    Export {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the default configuration as JSON.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the stored configuration with the default.
    Reset,
    /// Summarize the stored configuration.
    Show,
    /// Print a commented template for the settings file.
    Settings,
}

impl CraftArgs {
    /// A builder carrying the global flags as overrides.
    pub fn builder(&self) -> ZinitcraftBuilder {
        let builder = Zinitcraft::builder()
            .settings_file(self.settings.clone())
            .script_path(self.script_path.clone())
            .config_path(self.config_path.clone());
        if self.no_backup {
            builder.backup(false)
        } else {
            builder
        }
    }

    /// Convert the parsed subcommand into a framework-agnostic `Action`.
    pub fn into_action(self) -> Action {
        match self.command {
            CraftCommand::Render { input, output } => Action::Render { input, output },
            CraftCommand::Apply { input } => Action::Apply { input },
            CraftCommand::Import { file } => Action::Import { file },
            CraftCommand::Export { output } => Action::Export { output },
            CraftCommand::Gen { output } => Action::Gen { output },
            CraftCommand::Reset => Action::Reset,
            CraftCommand::Show => Action::Show,
            CraftCommand::Settings => Action::Settings,
        }
    }
}
