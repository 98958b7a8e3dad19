//! Passphrase-based master key derivation using Argon2id.
//!
//! Deriving the key from the passphrase alone keeps the scheme stateless:
//! there is no stored salt to lose, and the same passphrase always yields
//! the same key for a given namespace.  The salt is derived from the
//! namespace entropy, so two vaults with different namespaces get
//! different keys even from identical passphrases.

use argon2::{Algorithm, Argon2, Params, Version};
use sha2::{Digest, Sha256};

use crate::errors::{PasskeepError, Result};

/// Length of the derived master key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `.passkeep.toml`.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive the 32-byte master key from a passphrase.
///
/// The salt is `SHA-256(namespace entropy)`, so derivation is
/// deterministic per namespace.  Enforces minimum Argon2 parameters to
/// prevent dangerously weak KDF settings.
pub fn derive_master_key(
    passphrase: &[u8],
    entropy: &[u8],
    params: &Argon2Params,
) -> Result<[u8; KEY_LEN]> {
    if params.memory_kib < MIN_MEMORY_KIB {
        return Err(PasskeepError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            params.memory_kib
        )));
    }
    if params.iterations < 1 {
        return Err(PasskeepError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if params.parallelism < 1 {
        return Err(PasskeepError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let argon_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PasskeepError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let salt = Sha256::digest(entropy);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt.as_slice(), &mut key)
        .map_err(|e| PasskeepError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}
