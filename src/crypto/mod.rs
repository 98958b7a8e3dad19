//! Cryptographic primitives for passkeep.
//!
//! This module provides:
//! - AES-256-GCM secret-token encryption and decryption (`cipher`)
//! - Argon2id passphrase-based master key derivation (`kdf`)
//! - The zeroizing `MasterKey` wrapper (`keys`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt_value, decrypt_value, derive_master_key, ...};
pub use cipher::{decrypt_value, encrypt_value};
pub use kdf::{derive_master_key, Argon2Params, KEY_LEN};
pub use keys::MasterKey;
