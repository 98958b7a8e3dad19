//! User-scoped protection of the master key at rest.
//!
//! The master key is never persisted raw.  Before it is written to the
//! key file it is wrapped by a `UserScopedProtector`, whose output can
//! only be unwrapped on the same machine and OS account.
//!
//! The production implementation keeps a random per-namespace wrapping
//! secret in the operating system's credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! All of these are scoped to the logged-in user, which gives the
//! "undecryptable elsewhere" property without any OS-specific code here.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hkdf::Hkdf;
use rand::TryRngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::errors::{PasskeepError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the per-namespace wrapping secret in bytes.
const WRAP_SECRET_LEN: usize = 32;

/// Wrap/unwrap of small byte payloads, bound to the current OS user.
///
/// `wrap` output must be unwrap-able only on the same machine/account,
/// and only with the same namespace entropy.  An unwrap failure is a
/// normal signal (wrong account, lost keyring entry, corrupted file)
/// that callers recover from by re-establishing the key.
pub trait UserScopedProtector {
    fn wrap(&self, plaintext: &[u8], entropy: &[u8]) -> Result<Vec<u8>>;
    fn unwrap(&self, wrapped: &[u8], entropy: &[u8]) -> Result<Vec<u8>>;
}

/// Production protector backed by the OS keyring.
///
/// A random 256-bit wrapping secret is stored per namespace under the
/// `passkeep` service.  The actual wrap key is derived from that secret
/// with HKDF-SHA256, using the namespace entropy as context, and the
/// payload is sealed with AES-256-GCM.
pub struct KeyringProtector {
    service: &'static str,
}

impl Default for KeyringProtector {
    fn default() -> Self {
        Self { service: "passkeep" }
    }
}

impl KeyringProtector {
    /// Keyring entry name for a namespace, derived from its entropy so
    /// distinct namespaces never share a wrapping secret.
    fn entry_name(entropy: &[u8]) -> String {
        let digest = Sha256::digest(entropy);
        format!("wrap:{}", hex::encode(&digest[..8]))
    }

    /// Fetch the per-namespace wrapping secret, creating it on first use.
    fn wrapping_secret(&self, entropy: &[u8]) -> Result<Vec<u8>> {
        let entry = keyring::Entry::new(self.service, &Self::entry_name(entropy))
            .map_err(|e| PasskeepError::ProtectFailed(format!("keyring entry: {e}")))?;

        match entry.get_password() {
            Ok(encoded) => BASE64
                .decode(&encoded)
                .map_err(|e| PasskeepError::ProtectFailed(format!("stored secret: {e}"))),
            Err(keyring::Error::NoEntry) => {
                let secret = fresh_wrap_secret()?;
                entry
                    .set_password(&BASE64.encode(&secret))
                    .map_err(|e| PasskeepError::ProtectFailed(format!("keyring store: {e}")))?;
                Ok(secret)
            }
            Err(e) => Err(PasskeepError::ProtectFailed(format!("keyring read: {e}"))),
        }
    }

    /// Derive the AES wrap key from the keyring secret and the entropy.
    fn wrap_key(&self, entropy: &[u8]) -> Result<[u8; 32]> {
        let mut secret = self.wrapping_secret(entropy)?;

        let hk = Hkdf::<Sha256>::new(None, &secret);
        let mut info = Vec::with_capacity(14 + entropy.len());
        info.extend_from_slice(b"passkeep-wrap:");
        info.extend_from_slice(entropy);

        let mut okm = [0u8; 32];
        let expanded = hk.expand(&info, &mut okm);
        secret.zeroize();
        expanded
            .map_err(|e| PasskeepError::ProtectFailed(format!("HKDF expand failed: {e}")))?;

        Ok(okm)
    }
}

/// Generate a fresh random wrapping secret from the OS entropy source.
fn fresh_wrap_secret() -> Result<Vec<u8>> {
    let mut secret = vec![0u8; WRAP_SECRET_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut secret)
        .map_err(|e| PasskeepError::ProtectFailed(format!("entropy source: {e}")))?;
    Ok(secret)
}

impl UserScopedProtector for KeyringProtector {
    fn wrap(&self, plaintext: &[u8], entropy: &[u8]) -> Result<Vec<u8>> {
        let mut key = self.wrap_key(entropy)?;
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| PasskeepError::ProtectFailed(format!("wrap cipher: {e}")))?;
        key.zeroize();

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| PasskeepError::ProtectFailed(format!("wrap failed: {e}")))?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn unwrap(&self, wrapped: &[u8], entropy: &[u8]) -> Result<Vec<u8>> {
        if wrapped.len() < NONCE_LEN {
            return Err(PasskeepError::ProtectFailed("wrapper too short".into()));
        }

        let mut key = self.wrap_key(entropy)?;
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| PasskeepError::ProtectFailed(format!("wrap cipher: {e}")))?;
        key.zeroize();

        let (nonce_bytes, sealed) = wrapped.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        cipher
            .decrypt(nonce, sealed)
            .map_err(|_| PasskeepError::ProtectFailed("unwrap failed".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_wrap_secrets_are_sized_and_random() {
        let a = fresh_wrap_secret().unwrap();
        let b = fresh_wrap_secret().unwrap();
        assert_eq!(a.len(), WRAP_SECRET_LEN);
        assert_ne!(a, b);
    }
}
