//! Crypto error types.

use crate::level::SecurityLevel;

/// Result type alias using [`CryptoError`].
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors from key agreement, derivation and layered encryption.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Random source failed: {0}")]
    RandomSource(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Authentication failed on layer {layer}")]
    AuthenticationFailed { layer: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Curve mismatch: expected {expected}, got {actual}")]
    CurveMismatch {
        expected: SecurityLevel,
        actual: SecurityLevel,
    },

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Blinding produced a degenerate key")]
    DegenerateKey,

    #[error("Key set is empty")]
    EmptyKeySet,

    #[error("Invalid random point length: expected {expected}, got {actual}")]
    InvalidRandomPointLength { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
