//! Secret-to-key derivation via HKDF.
//!
//! The shared point is stretched into a 32-byte symmetric key with HKDF,
//! keyed by `X`, salted with `Y` and bound to the blinding material `K`
//! (empty in simplex mode).

use hkdf::Hkdf;
use sha2::{Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::agreement::SharedPoint;
use crate::error::{CryptoError, Result};
use crate::suite::{CipherSuite, KdfHash};

/// Length of a derived symmetric key.
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// A 32-byte symmetric key.
///
/// Nonces are derived from the key alone, so a key must encrypt at most one
/// plaintext. The type is neither `Clone` nor `Copy`, and
/// [`EncryptionKeySet`](crate::layered::EncryptionKeySet) consumes it on
/// encryption.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_LEN]);

impl SymmetricKey {
    pub const fn from_bytes(bytes: [u8; SYMMETRIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes. Handle with care.
    pub const fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for SymmetricKey {}

impl CipherSuite {
    /// Derive the message key from a shared point and blinding material.
    pub fn derive_symmetric_key(&self, point: &SharedPoint, k: &[u8]) -> Result<SymmetricKey> {
        let mut key = [0u8; SYMMETRIC_KEY_LEN];
        hkdf_fill(self.hash, Some(point.y()), point.x(), k, &mut key)?;
        Ok(SymmetricKey(key))
    }
}

/// [`CipherSuite::derive_symmetric_key`] with the default suite.
pub fn derive_symmetric_key(point: &SharedPoint, k: &[u8]) -> Result<SymmetricKey> {
    CipherSuite::default().derive_symmetric_key(point, k)
}

/// Fill `okm` from the HKDF stream of (`salt`, `ikm`, `info`).
pub(crate) fn hkdf_fill(
    hash: KdfHash,
    salt: Option<&[u8]>,
    ikm: &[u8],
    info: &[u8],
    okm: &mut [u8],
) -> Result<()> {
    let expanded = match hash {
        KdfHash::Sha3_512 => Hkdf::<Sha3_512>::new(salt, ikm).expand(info, okm),
        KdfHash::Sha3_256 => Hkdf::<Sha3_256>::new(salt, ikm).expand(info, okm),
        KdfHash::Sha512 => Hkdf::<Sha512>::new(salt, ikm).expand(info, okm),
        KdfHash::Sha256 => Hkdf::<Sha256>::new(salt, ikm).expand(info, okm),
    };
    expanded.map_err(|e| CryptoError::KeyDerivationFailed(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::agreement::agree;
    use crate::keys::generate_keypair_os;
    use crate::level::SecurityLevel;
    use crate::suite::AeadAlgorithm;

    fn sample_point() -> SharedPoint {
        SharedPoint::from_coordinates(&[0x11; 32], &[0x22; 32])
    }

    #[test]
    fn derivation_is_deterministic() {
        let point = sample_point();
        let key1 = derive_symmetric_key(&point, b"blinding").unwrap();
        let key2 = derive_symmetric_key(&point, b"blinding").unwrap();
        assert_eq!(key1, key2);
    }

    #[test]
    fn each_input_changes_the_key() {
        let base = derive_symmetric_key(&sample_point(), b"k").unwrap();

        let other_x = SharedPoint::from_coordinates(&[0x12; 32], &[0x22; 32]);
        let other_y = SharedPoint::from_coordinates(&[0x11; 32], &[0x23; 32]);
        assert_ne!(base, derive_symmetric_key(&other_x, b"k").unwrap());
        assert_ne!(base, derive_symmetric_key(&other_y, b"k").unwrap());
        assert_ne!(base, derive_symmetric_key(&sample_point(), b"j").unwrap());
        assert_ne!(base, derive_symmetric_key(&sample_point(), b"").unwrap());
    }

    #[test]
    fn hash_choice_changes_the_key() {
        let point = sample_point();
        let keys: Vec<SymmetricKey> = [
            KdfHash::Sha3_512,
            KdfHash::Sha3_256,
            KdfHash::Sha512,
            KdfHash::Sha256,
        ]
        .into_iter()
        .map(|hash| {
            CipherSuite::new(hash, AeadAlgorithm::default())
                .derive_symmetric_key(&point, &[])
                .unwrap()
        })
        .collect();

        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn both_sides_of_an_exchange_derive_the_same_key() {
        let (a_sk, a_pk) = generate_keypair_os(SecurityLevel::P512).unwrap();
        let (b_sk, b_pk) = generate_keypair_os(SecurityLevel::P512).unwrap();

        let key_a = derive_symmetric_key(&agree(&a_sk, &b_pk).unwrap(), &[]).unwrap();
        let key_b = derive_symmetric_key(&agree(&b_sk, &a_pk).unwrap(), &[]).unwrap();
        assert_eq!(key_a, key_b);
    }

    #[test]
    fn hkdf_fill_matches_rfc5869_sha256_vector() {
        // RFC 5869, test case 1.
        let ikm = [0x0bu8; 22];
        let salt = hex::decode("000102030405060708090a0b0c").unwrap();
        let info = hex::decode("f0f1f2f3f4f5f6f7f8f9").unwrap();
        let mut okm = [0u8; 42];
        hkdf_fill(KdfHash::Sha256, Some(&salt), &ikm, &info, &mut okm).unwrap();
        assert_eq!(
            hex::encode(okm),
            "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865"
        );
    }

    #[test]
    fn derive_symmetric_key_matches_known_vector() {
        // Leading zero of X is dropped before it reaches HKDF.
        let point = SharedPoint::from_coordinates(&[0x00, 0x11, 0x22], &[0x33; 5]);
        let key = derive_symmetric_key(&point, b"KK").unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "9b4d42954c9d09fe21b297496caad9e9f2e63917428c1f2e321c3713ef614022"
        );
    }

    #[test]
    fn hkdf_fill_rejects_oversized_output() {
        // HKDF caps output at 255 hash blocks.
        let mut okm = vec![0u8; 255 * 32 + 1];
        let result = hkdf_fill(KdfHash::Sha256, None, b"ikm", &[], &mut okm);
        assert!(matches!(result, Err(CryptoError::KeyDerivationFailed(_))));
    }

    #[test]
    fn debug_impl_redacts_key() {
        let key = SymmetricKey::from_bytes([0x5a; SYMMETRIC_KEY_LEN]);
        assert_eq!(format!("{key:?}"), "SymmetricKey([REDACTED])");
    }
}
