//! `passkeep get` — retrieve and print a single secret's value.
//!
//! If the name is unknown, or its stored ciphertext no longer decrypts
//! under the active key, the vault falls back to prompting for the
//! value (and optionally saving it) instead of failing.

use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let vault = open_vault(cli)?;

    let value = vault.get(name)?;
    println!("{value}");

    Ok(())
}
