//! `passkeep delete` — remove one or more secrets from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{PasskeepError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, names: &[String], force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", names.join(", ")))
            .default(false)
            .interact()
            .map_err(|e| PasskeepError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let vault = open_vault(cli)?;
    let removed = vault.delete(names)?;

    if removed == 0 {
        output::warning("No matching secrets found — nothing deleted.");
    } else {
        output::success(&format!("Deleted {removed} secret(s)"));
    }

    Ok(())
}
