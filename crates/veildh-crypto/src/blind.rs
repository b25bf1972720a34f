//! Key blinding for duplex exchanges.
//!
//! The sender shifts its long-term private scalar by `K`; the receiver
//! shifts the sender's public point by `K·G`. Both land on the same keypair,
//! so only `K` needs to travel with the message:
//!
//! `public(blind_private_key(sk, K)) == blind_public_key(public(sk), K)`

use elliptic_curve::group::{Curve as _, Group};
use elliptic_curve::{CurveArithmetic, NonZeroScalar, PublicKey as CurvePublicKey, SecretKey};

use crate::error::{CryptoError, Result};
use crate::keys::{PrivateKey, PublicKey, scalar_from_be_bytes};

/// Blind a private key: `D' = (D + K) mod N` on the same curve.
///
/// Fails with [`CryptoError::DegenerateKey`] if `D'` is zero.
pub fn blind_private_key(sk: &PrivateKey, k: &[u8]) -> Result<PrivateKey> {
    let blinded = match sk {
        PrivateKey::P224(sk) => PrivateKey::P224(blind_secret(sk, k)?),
        PrivateKey::P256(sk) => PrivateKey::P256(blind_secret(sk, k)?),
        PrivateKey::P384(sk) => PrivateKey::P384(blind_secret(sk, k)?),
        PrivateKey::P521(sk) => PrivateKey::P521(blind_secret(sk, k)?),
    };
    tracing::trace!(level = %sk.level(), "blinded private key");
    Ok(blinded)
}

/// Blind a public key: `P' = P + K·G`.
///
/// Fails with [`CryptoError::DegenerateKey`] if `P'` is the point at infinity.
pub fn blind_public_key(pk: &PublicKey, k: &[u8]) -> Result<PublicKey> {
    let blinded = match pk {
        PublicKey::P224(pk) => PublicKey::P224(blind_point(pk, k)?),
        PublicKey::P256(pk) => PublicKey::P256(blind_point(pk, k)?),
        PublicKey::P384(pk) => PublicKey::P384(blind_point(pk, k)?),
        PublicKey::P521(pk) => PublicKey::P521(blind_point(pk, k)?),
    };
    tracing::trace!(level = %pk.level(), "blinded public key");
    Ok(blinded)
}

fn blind_secret<C>(sk: &SecretKey<C>, k: &[u8]) -> Result<SecretKey<C>>
where
    C: CurveArithmetic,
{
    let shifted = *sk.to_nonzero_scalar() + scalar_from_be_bytes::<C>(k);
    Option::<NonZeroScalar<C>>::from(NonZeroScalar::new(shifted))
        .map(SecretKey::from)
        .ok_or(CryptoError::DegenerateKey)
}

fn blind_point<C>(pk: &CurvePublicKey<C>, k: &[u8]) -> Result<CurvePublicKey<C>>
where
    C: CurveArithmetic,
{
    let offset = C::ProjectivePoint::generator() * scalar_from_be_bytes::<C>(k);
    let shifted = pk.to_projective() + offset;
    CurvePublicKey::from_affine(shifted.to_affine()).map_err(|_| CryptoError::DegenerateKey)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair_os, random_point_os};
    use crate::level::SecurityLevel;

    #[test]
    fn blinded_private_key_matches_blinded_public_key() {
        for level in SecurityLevel::ALL {
            let (sk, pk) = generate_keypair_os(level).unwrap();
            let k = random_point_os(level).unwrap();

            let blinded_sk = blind_private_key(&sk, k.as_bytes()).unwrap();
            let blinded_pk = blind_public_key(&pk, k.as_bytes()).unwrap();

            assert_eq!(blinded_sk.level(), level);
            assert_eq!(blinded_sk.public_key(), blinded_pk);
        }
    }

    #[test]
    fn blinding_changes_the_key() {
        let (sk, pk) = generate_keypair_os(SecurityLevel::P256).unwrap();
        let k = random_point_os(SecurityLevel::P256).unwrap();

        let blinded_pk = blind_public_key(&pk, k.as_bytes()).unwrap();
        assert_ne!(blinded_pk, pk);
        assert_ne!(blind_private_key(&sk, k.as_bytes()).unwrap().public_key(), pk);
    }

    #[test]
    fn empty_blinding_material_is_identity() {
        let (sk, pk) = generate_keypair_os(SecurityLevel::P384).unwrap();
        assert_eq!(blind_public_key(&pk, &[]).unwrap(), pk);
        assert_eq!(blind_private_key(&sk, &[]).unwrap().public_key(), pk);
    }

    #[test]
    fn blinding_material_longer_than_order_still_agrees() {
        // A P512-length K used on a P-256 key exceeds the group order.
        let (sk, pk) = generate_keypair_os(SecurityLevel::P256).unwrap();
        let k = random_point_os(SecurityLevel::P512).unwrap();

        let blinded_sk = blind_private_key(&sk, k.as_bytes()).unwrap();
        let blinded_pk = blind_public_key(&pk, k.as_bytes()).unwrap();
        assert_eq!(blinded_sk.public_key(), blinded_pk);
    }

    #[test]
    fn different_blinding_material_gives_different_keys() {
        let (_, pk) = generate_keypair_os(SecurityLevel::P244).unwrap();
        let k1 = random_point_os(SecurityLevel::P244).unwrap();
        let k2 = random_point_os(SecurityLevel::P244).unwrap();

        assert_ne!(
            blind_public_key(&pk, k1.as_bytes()).unwrap(),
            blind_public_key(&pk, k2.as_bytes()).unwrap()
        );
    }

    #[test]
    fn blinding_to_zero_is_rejected() {
        // K = N - D makes D' = 0 and P' the point at infinity.
        let scalar = p256::NonZeroScalar::random(&mut rand::rngs::OsRng);
        let sk = PrivateKey::P256(p256::SecretKey::from(scalar));
        let pk = sk.public_key();
        let k = (-*scalar).to_bytes();

        assert!(matches!(
            blind_private_key(&sk, &k),
            Err(CryptoError::DegenerateKey)
        ));
        assert!(matches!(
            blind_public_key(&pk, &k),
            Err(CryptoError::DegenerateKey)
        ));
    }
}
