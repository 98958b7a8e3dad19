//! `passkeep rotate-key` — change the master key.
//!
//! Obtains the current key (prompting and verifying if the wrapped key
//! file is unusable), prompts for a brand-new passphrase, re-encrypts
//! every recoverable entry under the new key, and persists the updated
//! store atomically.  Entries that no longer decrypt under the old key
//! are left untouched and reported.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `rotate-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;

    output::info("You will be asked for the new key passphrase.");
    let report = vault.rotate_key()?;

    output::success(&format!(
        "Master key rotated ({} secret(s) re-encrypted)",
        report.rotated
    ));

    if !report.skipped.is_empty() {
        output::warning(&format!(
            "{} secret(s) could not be decrypted under the old key and were left unchanged: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        ));
        output::tip("Re-save or delete these entries to bring them under the new key.");
    }

    Ok(())
}
