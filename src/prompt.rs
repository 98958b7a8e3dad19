//! Interactive prompts, abstracted behind the `Prompter` trait.
//!
//! The vault core never talks to a terminal directly; every suspension
//! point (passphrase entry, secret entry, destructive-wipe confirmation)
//! goes through this trait.  `Ok(None)` consistently means the user
//! canceled, which the core translates into `PasskeepError::Canceled`.

use zeroize::Zeroizing;

use crate::errors::{PasskeepError, Result};

/// A secret value entered by the user, plus whether to persist it.
pub struct SecretInput {
    pub value: String,
    pub save: bool,
}

/// External collaborator for all interactive input.
pub trait Prompter {
    /// Ask for the value of the named secret and whether to save it.
    fn secret_value(&self, name: &str) -> Result<Option<SecretInput>>;

    /// Ask for the master passphrase.
    ///
    /// `new_key` is `true` when there are no saved entries yet and the
    /// user is free to choose any passphrase; `false` when the entered
    /// passphrase must match the one the existing entries were
    /// encrypted with.
    fn passphrase(&self, new_key: bool) -> Result<Option<Zeroizing<String>>>;

    /// Ask whether to delete all saved entries after a lost key.
    fn confirm_wipe(&self) -> Result<bool>;
}

/// Terminal prompter built on dialoguer.
///
/// Honors the `PASSKEEP_PASSPHRASE` environment variable so scripted
/// and CI invocations never block on a passphrase prompt.  The variable
/// is consulted only for the first passphrase request; if that value is
/// rejected, later requests fall back to the interactive prompt rather
/// than retrying the same value forever.  An empty interactive
/// passphrase entry is treated as cancel (there is no other way to
/// decline a dialoguer password prompt).
#[derive(Default)]
pub struct DialogPrompter {
    env_consumed: std::cell::Cell<bool>,
}

impl DialogPrompter {
    fn password(prompt: &str) -> Result<String> {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| PasskeepError::PromptFailed(format!("password prompt: {e}")))
    }
}

impl Prompter for DialogPrompter {
    fn secret_value(&self, name: &str) -> Result<Option<SecretInput>> {
        let value = Self::password(&format!("Enter value for '{name}'"))?;

        let save = dialoguer::Confirm::new()
            .with_prompt("Save this value?")
            .default(true)
            .interact()
            .map_err(|e| PasskeepError::PromptFailed(format!("confirm prompt: {e}")))?;

        Ok(Some(SecretInput { value, save }))
    }

    fn passphrase(&self, new_key: bool) -> Result<Option<Zeroizing<String>>> {
        // Environment variable first (scripted/CI friendly), one shot.
        if !self.env_consumed.replace(true) {
            if let Ok(pw) = std::env::var("PASSKEEP_PASSPHRASE") {
                if !pw.is_empty() {
                    return Ok(Some(Zeroizing::new(pw)));
                }
            }
        }

        let prompt = if new_key {
            "Choose a key passphrase (used to encrypt saved secrets)"
        } else {
            "Enter the key passphrase the saved secrets were encrypted with"
        };

        let pw = Self::password(prompt)?;
        if pw.is_empty() {
            return Ok(None);
        }
        Ok(Some(Zeroizing::new(pw)))
    }

    fn confirm_wipe(&self) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(
                "Saved secrets cannot be decrypted without the key. \
                 Delete ALL saved secrets and set a new key?",
            )
            .default(false)
            .interact()
            .map_err(|e| PasskeepError::PromptFailed(format!("confirm prompt: {e}")))
    }
}
