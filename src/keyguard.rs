//! Master key lifecycle: obtain, establish, verify, rotate.
//!
//! The key is kept on disk only in wrapped form.  Obtaining it tries
//! the wrapped key file first and falls through to establishment when
//! the wrapper is missing or unusable (wrong account, corrupted file,
//! wrong payload length).
//!
//! Establishment is a small state machine:
//!
//! ```text
//! Prompting { first_run } --passphrase ok--------> accepted (persist, done)
//! Prompting { first_run } --wrong passphrase-----> Prompting (after pacing delay)
//! Prompting { first_run: true } --cancel---------> Canceled
//! Prompting { first_run: false } --cancel--------> AwaitingRecovery
//! AwaitingRecovery --wipe confirmed--------------> Prompting { first_run: true }
//! AwaitingRecovery --declined--------------------> Canceled
//! ```
//!
//! A wrong passphrase is a loop condition, not an error.  Correctness
//! is checked by trial decryption against the stored ciphertexts, so no
//! separate key-check value is ever persisted; an empty store accepts
//! any candidate.

use std::fs;
use std::thread;
use std::time::Duration;

use zeroize::{Zeroize, Zeroizing};

use crate::crypto::{decrypt_value, derive_master_key, encrypt_value, Argon2Params, MasterKey};
use crate::errors::{PasskeepError, Result};
use crate::prompt::Prompter;
use crate::protect::UserScopedProtector;
use crate::store::{Entry, EntryStore, StorePaths};

/// Anti-brute-force pacing after a rejected passphrase.  Fixed, does
/// not scale with repeated failures.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// States of the key-establishment flow.
enum Establish {
    Prompting { first_run: bool },
    AwaitingRecovery,
}

/// Owns the master key lifecycle for one store.
pub struct KeyGuard<'a> {
    prompter: &'a dyn Prompter,
    protector: &'a dyn UserScopedProtector,
    entropy: &'a [u8],
    kdf_params: Argon2Params,
    paths: &'a StorePaths,
}

impl<'a> KeyGuard<'a> {
    pub fn new(
        prompter: &'a dyn Prompter,
        protector: &'a dyn UserScopedProtector,
        entropy: &'a [u8],
        kdf_params: Argon2Params,
        paths: &'a StorePaths,
    ) -> Self {
        Self {
            prompter,
            protector,
            entropy,
            kdf_params,
            paths,
        }
    }

    /// Get the active master key.
    ///
    /// Reads and unwraps the key file; any failure falls through to
    /// `establish_key`, which may prompt.
    pub fn obtain_key(&self, store: &EntryStore) -> Result<MasterKey> {
        if let Ok(wrapped) = fs::read(self.paths.key()) {
            if let Ok(mut bytes) = self.protector.unwrap(&wrapped, self.entropy) {
                let key = MasterKey::from_slice(&bytes);
                bytes.zeroize();
                if let Some(key) = key {
                    return Ok(key);
                }
            }
        }

        self.establish_key(store)
    }

    /// Establish the master key by prompting, with verification against
    /// any existing entries and a destructive recovery path for a lost
    /// key.  Persists the wrapped key on acceptance.
    pub fn establish_key(&self, store: &EntryStore) -> Result<MasterKey> {
        let mut entries = store.load()?;
        let mut state = Establish::Prompting {
            first_run: entries.is_empty(),
        };

        loop {
            state = match state {
                Establish::Prompting { first_run } => {
                    match self.read_passphrase(first_run)? {
                        Some(pass) => {
                            let key = MasterKey::new(derive_master_key(
                                pass.as_bytes(),
                                self.entropy,
                                &self.kdf_params,
                            )?);

                            if first_run || verify_candidate(&key, &entries) {
                                self.persist_key(&key)?;
                                return Ok(key);
                            }

                            // Wrong passphrase: pace and re-prompt.
                            thread::sleep(RETRY_DELAY);
                            Establish::Prompting { first_run: false }
                        }
                        None if first_run => return Err(PasskeepError::Canceled),
                        None => Establish::AwaitingRecovery,
                    }
                }
                Establish::AwaitingRecovery => {
                    if !self.prompter.confirm_wipe()? {
                        return Err(PasskeepError::Canceled);
                    }

                    // The entries are undecryptable without the lost key;
                    // delete them together with the stale wrapper and
                    // start over as a first run.
                    store.wipe()?;
                    self.remove_key_file()?;
                    entries.clear();

                    Establish::Prompting { first_run: true }
                }
            };
        }
    }

    /// Replace the master key with a brand-new one.
    ///
    /// Prompts with first-run semantics (no verification against the
    /// old key).  Every entry that decrypts under `old_key` is
    /// re-encrypted under the new key in place; entries that do not are
    /// left byte-identical and their names are returned so the caller
    /// can surface them.  The caller persists the updated entries.
    pub fn rotate_key(
        &self,
        old_key: &MasterKey,
        entries: &mut [Entry],
    ) -> Result<(MasterKey, Vec<String>)> {
        let pass = match self.read_passphrase(true)? {
            Some(p) => p,
            None => return Err(PasskeepError::Canceled),
        };

        let new_key = MasterKey::new(derive_master_key(
            pass.as_bytes(),
            self.entropy,
            &self.kdf_params,
        )?);

        let mut skipped = Vec::new();
        for entry in entries.iter_mut() {
            match decrypt_value(old_key.as_bytes(), &entry.secret) {
                Ok(mut plain) => {
                    entry.secret = encrypt_value(new_key.as_bytes(), &plain)?;
                    plain.zeroize();
                }
                Err(_) => skipped.push(entry.name.clone()),
            }
        }

        self.persist_key(&new_key)?;

        Ok((new_key, skipped))
    }

    /// Prompt until a non-empty passphrase is supplied or the prompt is
    /// canceled (`None`).
    fn read_passphrase(&self, new_key: bool) -> Result<Option<Zeroizing<String>>> {
        loop {
            match self.prompter.passphrase(new_key)? {
                None => return Ok(None),
                Some(pass) if pass.is_empty() => continue,
                Some(pass) => return Ok(Some(pass)),
            }
        }
    }

    /// Wrap the key and write the key file, replacing any prior content.
    fn persist_key(&self, key: &MasterKey) -> Result<()> {
        let wrapped = self.protector.wrap(key.as_bytes(), self.entropy)?;

        let parent = self.paths.key().parent().unwrap_or(std::path::Path::new("."));
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        fs::write(self.paths.key(), wrapped)?;
        Ok(())
    }

    fn remove_key_file(&self) -> Result<()> {
        if self.paths.key().exists() {
            fs::remove_file(self.paths.key())?;
        }
        Ok(())
    }
}

/// Trial-decryption check of a candidate key against existing entries.
///
/// The candidate is rejected only when every entry fails to decrypt.
/// Empty tokens decrypt trivially, so a store holding only empty
/// secrets accepts any candidate, as there is nothing to check against.
fn verify_candidate(key: &MasterKey, entries: &[Entry]) -> bool {
    entries
        .iter()
        .any(|e| decrypt_value(key.as_bytes(), &e.secret).is_ok())
}
