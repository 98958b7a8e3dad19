//! `passkeep list` — display all secret names.
//!
//! Listing needs no key and performs no decryption.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;

    let names = vault.list()?;

    output::info(&format!("{} secret(s)", names.len()));
    output::print_names_table(&names);

    Ok(())
}
