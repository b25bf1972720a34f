//! Cipher-suite configuration.
//!
//! Every derivation and cipher call takes its hash and AEAD choice from an
//! explicit [`CipherSuite`] value instead of a process-wide default. The
//! free functions in this crate use [`CipherSuite::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};

/// Hash function driving HKDF extract-and-expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KdfHash {
    #[default]
    #[serde(rename = "sha3-512")]
    Sha3_512,
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha-512")]
    Sha512,
    #[serde(rename = "sha-256")]
    Sha256,
}

/// AEAD primitive applied once per layer.
///
/// Both use a 256-bit key, a 96-bit nonce and a 128-bit tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AeadAlgorithm {
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

/// Hash and AEAD selection shared by both parties of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CipherSuite {
    pub hash: KdfHash,
    pub aead: AeadAlgorithm,
}

impl CipherSuite {
    pub const fn new(hash: KdfHash, aead: AeadAlgorithm) -> Self {
        Self { hash, aead }
    }

    /// Parse a suite from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CryptoError::Config(e.to_string()))
    }

    /// Load a suite from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
