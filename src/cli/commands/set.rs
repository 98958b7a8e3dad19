//! `passkeep set` — add or replace a secret in the vault.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{PasskeepError, Result};

/// Execute the `set` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>) -> Result<()> {
    // Determine the secret value from one of three sources.
    let secret_value = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter value for '{name}'"))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| PasskeepError::CommandFailed(format!("input prompt: {e}")))?
    };

    let vault = open_vault(cli)?;
    vault.save(name, &secret_value)?;

    output::success(&format!("Secret '{name}' saved"));

    Ok(())
}
