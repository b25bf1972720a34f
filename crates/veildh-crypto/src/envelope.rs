//! Single-key encrypt/decrypt from a shared point.
//!
//! `K` is empty in simplex mode and the duplex [`RandomPoint`] otherwise.
//! A mismatched `K` derives a different key and only shows up as
//! [`CryptoError::AuthenticationFailed`] when opening.
//!
//! [`RandomPoint`]: crate::keys::RandomPoint
//! [`CryptoError::AuthenticationFailed`]: crate::error::CryptoError::AuthenticationFailed

use crate::agreement::SharedPoint;
use crate::error::Result;
use crate::layered::EncryptionKeySet;
use crate::suite::CipherSuite;

impl CipherSuite {
    /// Derive a fresh key from `point` and `k`, then seal one layer.
    pub fn encrypt(&self, point: &SharedPoint, k: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let key = self.derive_symmetric_key(point, k)?;
        self.seal(EncryptionKeySet::from(key), plaintext)
    }

    /// Derive the same key from `point` and `k`, then open one layer.
    pub fn decrypt(&self, point: &SharedPoint, k: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let key = self.derive_symmetric_key(point, k)?;
        self.open(&EncryptionKeySet::from(key), ciphertext)
    }
}

/// [`CipherSuite::encrypt`] with the default suite.
pub fn encrypt(point: &SharedPoint, k: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    CipherSuite::default().encrypt(point, k, plaintext)
}

/// [`CipherSuite::decrypt`] with the default suite.
pub fn decrypt(point: &SharedPoint, k: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    CipherSuite::default().decrypt(point, k, ciphertext)
}
