//! High-level vault operations used by CLI commands and embedding code.
//!
//! `Vault` composes the entry store, the key guard, and the cipher so
//! callers can reference secrets by name:
//!
//! ```no_run
//! use passkeep::config::Settings;
//! use passkeep::vault::Vault;
//!
//! let vault = Vault::new(&Settings::default());
//! let token = vault.get("github-token")?;
//! # Ok::<(), passkeep::errors::PasskeepError>(())
//! ```
//!
//! Operations are synchronous and uncoordinated across processes; the
//! last writer wins.  Each persist replaces the store file atomically.

use crate::config::Settings;
use crate::crypto::{decrypt_value, encrypt_value, Argon2Params};
use crate::errors::{PasskeepError, Result};
use crate::keyguard::KeyGuard;
use crate::prompt::{DialogPrompter, Prompter};
use crate::protect::{KeyringProtector, UserScopedProtector};
use crate::store::{Entry, EntryStore, StorePaths};

/// Outcome of a key rotation.
///
/// `skipped` names the entries whose ciphertext did not decrypt under
/// the old key and was therefore left untouched, still encrypted under
/// whatever key originally produced it.
#[derive(Debug)]
pub struct RotationReport {
    pub rotated: usize,
    pub skipped: Vec<String>,
}

/// The vault orchestrator.
pub struct Vault {
    paths: StorePaths,
    store: EntryStore,
    entropy: Vec<u8>,
    kdf_params: Argon2Params,
    prompter: Box<dyn Prompter>,
    protector: Box<dyn UserScopedProtector>,
}

impl Vault {
    /// Build a vault with the production collaborators: terminal
    /// prompts and OS-keyring-backed key wrapping.
    pub fn new(settings: &Settings) -> Self {
        Self::with_collaborators(
            settings,
            Box::new(DialogPrompter::default()),
            Box::new(KeyringProtector::default()),
        )
    }

    /// Build a vault with explicit collaborators (tests, embedding).
    pub fn with_collaborators(
        settings: &Settings,
        prompter: Box<dyn Prompter>,
        protector: Box<dyn UserScopedProtector>,
    ) -> Self {
        // Computed once here and reused for the vault's lifetime; a
        // namespace change means constructing a new vault.
        let paths = StorePaths::resolve(&settings.data_dir(), settings.entropy());
        let store = EntryStore::new(paths.store().to_path_buf());

        Self {
            paths,
            store,
            entropy: settings.entropy().to_vec(),
            kdf_params: settings.argon2_params(),
            prompter,
            protector,
        }
    }

    fn guard(&self) -> KeyGuard<'_> {
        KeyGuard::new(
            self.prompter.as_ref(),
            self.protector.as_ref(),
            &self.entropy,
            self.kdf_params,
            &self.paths,
        )
    }

    /// Path of the store file (for user-facing messages).
    pub fn store_path(&self) -> &std::path::Path {
        self.paths.store()
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Encrypt `secret` and save it under `name`, adding or replacing.
    ///
    /// Fails with `Canceled` if key establishment is canceled and with
    /// an I/O error if the store cannot be read or written.
    pub fn save(&self, name: &str, secret: &str) -> Result<()> {
        let mut entries = self.store.load()?;
        self.set_entry(&mut entries, name, secret)?;
        self.store.save(&entries)
    }

    /// Get a secret and decrypt it.
    ///
    /// A missing entry, or one that no longer decrypts under the
    /// active key, falls back to prompting for the value, optionally
    /// saving what was entered.  Canceling the prompt fails with
    /// `Canceled`.
    pub fn get(&self, name: &str) -> Result<String> {
        let mut entries = self.store.load()?;

        if let Some(pos) = entries.iter().position(|e| e.matches(name)) {
            let key = self.guard().obtain_key(&self.store)?;
            if let Ok(plain) = decrypt_value(key.as_bytes(), &entries[pos].secret) {
                return Ok(plain);
            }
            // Undecryptable under the active key: treated as absent so
            // the user can re-enter the value instead of hard-failing.
        }

        match self.prompter.secret_value(name)? {
            None => Err(PasskeepError::Canceled),
            Some(input) => {
                if input.save {
                    self.set_entry(&mut entries, name, &input.value)?;
                    self.store.save(&entries)?;
                }
                Ok(input.value)
            }
        }
    }

    /// Delete every entry whose name matches one of `names`.
    ///
    /// Persists only if something was removed, so deleting nonexistent
    /// names never writes (and never creates an empty store file).
    /// Returns the number of entries removed.
    pub fn delete<S: AsRef<str>>(&self, names: &[S]) -> Result<usize> {
        let mut entries = self.store.load()?;
        let before = entries.len();

        entries.retain(|e| !names.iter().any(|n| e.matches(n.as_ref())));

        let removed = before - entries.len();
        if removed > 0 {
            self.store.save(&entries)?;
        }
        Ok(removed)
    }

    /// All entry names, in persisted order.  No key, no decryption.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = self.store.load()?;
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    /// Change the master key, re-encrypting every recoverable entry.
    ///
    /// Entries that fail to decrypt under the old key are left
    /// untouched and reported in the returned `RotationReport` rather
    /// than silently dropped.
    pub fn rotate_key(&self) -> Result<RotationReport> {
        let guard = self.guard();

        // Obtaining the old key can run lost-key recovery, which wipes
        // the store; load the entries only once the key is settled so a
        // wiped store is never written back.
        let old_key = guard.obtain_key(&self.store)?;
        let mut entries = self.store.load()?;
        let (_new_key, skipped) = guard.rotate_key(&old_key, &mut entries)?;

        let rotated = entries.len() - skipped.len();
        self.store.save(&entries)?;

        Ok(RotationReport { rotated, skipped })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Set or replace an entry in the in-memory list.
    ///
    /// An empty secret stores the empty token without needing a key.
    fn set_entry(&self, entries: &mut Vec<Entry>, name: &str, secret: &str) -> Result<()> {
        let token = if secret.is_empty() {
            String::new()
        } else {
            let key = self.guard().obtain_key(&self.store)?;
            encrypt_value(key.as_bytes(), secret)?
        };

        match entries.iter_mut().find(|e| e.matches(name)) {
            Some(existing) => existing.secret = token,
            None => entries.push(Entry::new(name, token)),
        }
        Ok(())
    }
}
