//! In-memory master key wrapper.

use zeroize::Zeroize;

use super::kdf::KEY_LEN;

/// A wrapper around the 32-byte master key that automatically zeroes
/// its memory when dropped.
///
/// The key lives only for the duration of a vault operation; it is
/// persisted exclusively in wrapped form.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Build a `MasterKey` from a slice, rejecting any other length.
    ///
    /// Used when unwrapping the key file: a payload that is not exactly
    /// 32 bytes is treated as an unusable wrapper.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; KEY_LEN] = bytes.try_into().ok()?;
        Some(Self { bytes: arr })
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
