//! `VeilDH` Hybrid Encryption Library
//!
//! Elliptic-curve Diffie-Hellman key agreement feeding an HKDF-derived
//! symmetric key into layered AEAD encryption.
//!
//! ## Modes
//!
//! - **Simplex**: the sender generates an ephemeral keypair per message and
//!   sends its public key alongside the ciphertext. `K` is empty.
//! - **Duplex**: both sides hold long-term keypairs. The sender blinds its
//!   private key with a random point `K`, the receiver blinds the sender's
//!   public key with the same `K`, and only `K` travels with the message.
//!
//! ## Crypto primitives
//!
//! - **Curves**: NIST P-224, P-256, P-384, P-521, selected by [`SecurityLevel`]
//! - **Derivation**: HKDF over SHA3-512 by default, `X` as secret, `Y` as salt, `K` as info
//! - **Encryption**: AES-256-GCM by default, one layer per key, nonce and
//!   associated data expanded from the layer key
//!
//! A [`SymmetricKey`] must encrypt at most one message. [`EncryptionKeySet`]
//! is consumed by encryption to enforce this per key set.

pub mod agreement;
pub mod blind;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod keys;
pub mod layered;
pub mod level;
pub mod suite;

pub use agreement::{SharedPoint, agree};
pub use blind::{blind_private_key, blind_public_key};
pub use envelope::{decrypt, encrypt};
pub use error::{CryptoError, Result};
pub use kdf::{SYMMETRIC_KEY_LEN, SymmetricKey, derive_symmetric_key};
pub use keys::{
    PrivateKey, PublicKey, RandomPoint, generate_keypair, generate_keypair_os, random_point,
    random_point_os,
};
pub use layered::{
    AAD_SIZE, EncryptionKeySet, NONCE_SIZE, TAG_SIZE, layered_decrypt, layered_encrypt,
};
pub use level::SecurityLevel;
pub use suite::{AeadAlgorithm, CipherSuite, KdfHash};
