//! Layered (onion) AEAD encryption.
//!
//! Each key in an [`EncryptionKeySet`] seals the running buffer once, in
//! order, so the last key forms the outermost layer. Opening walks the same
//! set in reverse. The nonce and associated data of a layer are expanded from
//! its key alone, which is why a key set is consumed on encryption.

use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::ChaCha20Poly1305;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, Result};
use crate::kdf::{SymmetricKey, hkdf_fill};
use crate::suite::{AeadAlgorithm, CipherSuite, KdfHash};

/// Nonce size per layer.
pub const NONCE_SIZE: usize = 12;

/// Associated-data size per layer.
pub const AAD_SIZE: usize = 32;

/// Authentication tag added by each layer.
pub const TAG_SIZE: usize = 16;

/// Ordered symmetric keys; index 0 is applied first.
///
/// Both parties must hold the same order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EncryptionKeySet {
    keys: Vec<SymmetricKey>,
}

impl EncryptionKeySet {
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Append a key as the new outermost layer.
    pub fn push(&mut self, key: SymmetricKey) {
        self.keys.push(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<SymmetricKey> for EncryptionKeySet {
    fn from(key: SymmetricKey) -> Self {
        Self { keys: vec![key] }
    }
}

impl From<Vec<SymmetricKey>> for EncryptionKeySet {
    fn from(keys: Vec<SymmetricKey>) -> Self {
        Self { keys }
    }
}

impl FromIterator<SymmetricKey> for EncryptionKeySet {
    fn from_iter<I: IntoIterator<Item = SymmetricKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Nonce and associated data for one layer.
#[derive(Zeroize, ZeroizeOnDrop)]
struct LayerParams {
    nonce: [u8; NONCE_SIZE],
    aad: [u8; AAD_SIZE],
}

impl LayerParams {
    /// Read the nonce then the associated data from the key's HKDF stream.
    fn derive(hash: KdfHash, key: &SymmetricKey) -> Result<Self> {
        let mut stream = [0u8; NONCE_SIZE + AAD_SIZE];
        hkdf_fill(hash, None, key.as_bytes(), &[], &mut stream)?;

        let mut params = Self {
            nonce: [0u8; NONCE_SIZE],
            aad: [0u8; AAD_SIZE],
        };
        params.nonce.copy_from_slice(&stream[..NONCE_SIZE]);
        params.aad.copy_from_slice(&stream[NONCE_SIZE..]);
        stream.zeroize();
        Ok(params)
    }
}

impl CipherSuite {
    /// Seal `plaintext` under every key in order, consuming the set.
    ///
    /// The output grows by [`TAG_SIZE`] bytes per layer.
    #[allow(clippy::needless_pass_by_value)]
    pub fn seal(&self, keys: EncryptionKeySet, plaintext: &[u8]) -> Result<Vec<u8>> {
        if keys.is_empty() {
            return Err(CryptoError::EmptyKeySet);
        }
        tracing::debug!(layers = keys.len(), aead = ?self.aead, "sealing layered payload");

        let mut sealed: Option<Vec<u8>> = None;
        for key in &keys.keys {
            let params = LayerParams::derive(self.hash, key)?;
            let input = sealed.as_deref().unwrap_or(plaintext);
            let next = self
                .seal_layer(key, &params, input)
                .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
            sealed = Some(next);
        }
        sealed.ok_or(CryptoError::EmptyKeySet)
    }

    /// Open `ciphertext` by peeling layers in reverse key order.
    ///
    /// Fails closed on the first layer whose tag does not verify.
    pub fn open(&self, keys: &EncryptionKeySet, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if keys.is_empty() {
            return Err(CryptoError::EmptyKeySet);
        }
        tracing::debug!(layers = keys.len(), aead = ?self.aead, "opening layered payload");

        let mut opened: Option<Vec<u8>> = None;
        for (layer, key) in keys.keys.iter().enumerate().rev() {
            let params = LayerParams::derive(self.hash, key)?;
            let input = opened.as_deref().unwrap_or(ciphertext);
            let next = self
                .open_layer(key, &params, input)
                .map_err(|_| CryptoError::AuthenticationFailed { layer })?;
            opened = Some(next);
        }
        opened.ok_or(CryptoError::EmptyKeySet)
    }

    fn seal_layer(
        &self,
        key: &SymmetricKey,
        params: &LayerParams,
        msg: &[u8],
    ) -> std::result::Result<Vec<u8>, aes_gcm::aead::Error> {
        let payload = Payload {
            msg,
            aad: &params.aad,
        };
        match self.aead {
            AeadAlgorithm::Aes256Gcm => {
                let cipher = Aes256Gcm::new(aes_gcm::Key::<Aes256Gcm>::from_slice(key.as_bytes()));
                cipher.encrypt(aes_gcm::Nonce::from_slice(&params.nonce), payload)
            }
            AeadAlgorithm::ChaCha20Poly1305 => {
                let cipher =
                    ChaCha20Poly1305::new(chacha20poly1305::Key::from_slice(key.as_bytes()));
                cipher.encrypt(chacha20poly1305::Nonce::from_slice(&params.nonce), payload)
            }
        }
    }

    fn open_layer(
        &self,
        key: &SymmetricKey,
        params: &LayerParams,
        msg: &[u8],
    ) -> std::result::Result<Vec<u8>, aes_gcm::aead::Error> {
        let payload = Payload {
            msg,
            aad: &params.aad,
        };
        match self.aead {
            AeadAlgorithm::Aes256Gcm => {
                let cipher = Aes256Gcm::new(aes_gcm::Key::<Aes256Gcm>::from_slice(key.as_bytes()));
                cipher.decrypt(aes_gcm::Nonce::from_slice(&params.nonce), payload)
            }
            AeadAlgorithm::ChaCha20Poly1305 => {
                let cipher =
                    ChaCha20Poly1305::new(chacha20poly1305::Key::from_slice(key.as_bytes()));
                cipher.decrypt(chacha20poly1305::Nonce::from_slice(&params.nonce), payload)
            }
        }
    }
}

/// [`CipherSuite::seal`] with the default suite.
pub fn layered_encrypt(keys: EncryptionKeySet, plaintext: &[u8]) -> Result<Vec<u8>> {
    CipherSuite::default().seal(keys, plaintext)
}

/// [`CipherSuite::open`] with the default suite.
pub fn layered_decrypt(keys: &EncryptionKeySet, ciphertext: &[u8]) -> Result<Vec<u8>> {
    CipherSuite::default().open(keys, ciphertext)
}
