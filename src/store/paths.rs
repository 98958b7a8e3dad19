//! Deterministic store/key file identity.
//!
//! The store filename is derived from the namespace entropy, so distinct
//! applications (distinct namespaces) map to distinct, non-colliding
//! files in the same data directory without any extra configuration.
//!
//! The paths are computed once when a `Vault` is constructed and cached
//! for its lifetime.  Changing the namespace is a restart-time
//! configuration change, never a runtime mutation.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Suffix appended to the store filename to form the key filename.
const KEY_SUFFIX: &str = ".key";

/// Resolved locations of the store file and its wrapped key file.
#[derive(Debug, Clone)]
pub struct StorePaths {
    store: PathBuf,
    key: PathBuf,
}

impl StorePaths {
    /// Compute paths for a namespace inside `data_dir`.
    ///
    /// The filename stem is the hex of the first 8 bytes of
    /// `SHA-256(entropy)` — stable, filesystem-safe, and collision-free
    /// in practice across namespaces.
    pub fn resolve(data_dir: &Path, entropy: &[u8]) -> Self {
        let digest = Sha256::digest(entropy);
        let stem = hex::encode(&digest[..8]);

        let store = data_dir.join(format!("{stem}.csv"));
        let key = data_dir.join(format!("{stem}.csv{KEY_SUFFIX}"));

        Self { store, key }
    }

    /// Path of the entry store file.
    pub fn store(&self) -> &Path {
        &self.store
    }

    /// Path of the wrapped key file.
    pub fn key(&self) -> &Path {
        &self.key
    }
}
