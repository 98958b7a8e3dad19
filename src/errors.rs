use thiserror::Error;

/// All errors that can occur in passkeep.
#[derive(Debug, Error)]
pub enum PasskeepError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Store errors ---
    #[error("Invalid store format: {0}")]
    StoreFormat(String),

    // --- Key wrapping errors ---
    #[error("User-scoped protection failed: {0}")]
    ProtectFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Prompt errors ---
    #[error("Prompt failed: {0}")]
    PromptFailed(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Operation canceled")]
    Canceled,

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PasskeepError {
    /// Returns `true` for the user-declined-a-prompt outcome, so callers
    /// can treat it as "try again later" rather than as a data error.
    pub fn is_canceled(&self) -> bool {
        matches!(self, PasskeepError::Canceled)
    }
}

/// Convenience type alias for passkeep results.
pub type Result<T> = std::result::Result<T, PasskeepError>;
