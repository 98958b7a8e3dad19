//! AES-256-GCM encryption of individual secret values.
//!
//! Secrets are stored as text tokens: `base64(nonce || ciphertext + tag)`.
//! Each call to `encrypt_value` generates a fresh random 12-byte nonce, so
//! the same plaintext never produces the same token twice.
//!
//! The empty string is a sentinel meaning "no secret".  It maps to the
//! empty token without touching the cipher, in both directions, so saving
//! or reading an empty secret never requires a key.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{PasskeepError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` with a 32-byte `key` into a storable text token.
///
/// Returns `""` for empty plaintext without invoking the cipher.
pub fn encrypt_value(key: &[u8], plaintext: &str) -> Result<String> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| PasskeepError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| PasskeepError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the token is self-contained.
    let mut buf = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    buf.extend_from_slice(&nonce);
    buf.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(buf))
}

/// Decrypt a token produced by `encrypt_value`.
///
/// Returns `""` for the empty token unconditionally (no key needed).
/// Any malformed token, wrong key, or corrupted ciphertext is a
/// recoverable `DecryptionFailed`, never a panic.
pub fn decrypt_value(key: &[u8], token: &str) -> Result<String> {
    if token.is_empty() {
        return Ok(String::new());
    }

    let data = BASE64
        .decode(token)
        .map_err(|_| PasskeepError::DecryptionFailed)?;

    // Make sure we have at least a nonce worth of bytes.
    if data.len() < NONCE_LEN {
        return Err(PasskeepError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| PasskeepError::DecryptionFailed)?;

    // Decrypt and verify the auth tag.
    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PasskeepError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| PasskeepError::DecryptionFailed)
}
