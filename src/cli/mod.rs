//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;

use crate::config::Settings;
use crate::errors::Result;
use crate::vault::Vault;

/// passkeep CLI: local encrypted credential store.
#[derive(Parser)]
#[command(
    name = "passkeep",
    about = "Local encrypted credential store for scripts and tools",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Namespace scoping this vault (default from .passkeep.toml)
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Data directory for store and key files
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Save a secret (add or replace)
    Set {
        /// Secret name (case-insensitive)
        name: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Get a secret's value (prompts for it if missing)
    Get {
        /// Secret name (case-insensitive)
        name: String,
    },

    /// List all secret names
    List,

    /// Delete one or more secrets
    Delete {
        /// Secret names (case-insensitive)
        #[arg(required = true)]
        names: Vec<String>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the master key and re-encrypt all secrets
    RotateKey,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the working directory and apply CLI overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;

    if let Some(ns) = &cli.namespace {
        settings.namespace = ns.clone();
    }
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = Some(dir.clone());
    }

    Ok(settings)
}

/// Build the vault with production collaborators.
pub fn open_vault(cli: &Cli) -> Result<Vault> {
    let settings = load_settings(cli)?;
    Ok(Vault::new(&settings))
}
