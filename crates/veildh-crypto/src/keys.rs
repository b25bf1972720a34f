//! Curve keypairs and random blinding points.
//!
//! Keys are thin enums over the RustCrypto key types of each supported
//! curve, so the variant doubles as the curve identifier. Public keys can
//! only be built from points on their curve.

use elliptic_curve::ff::Field;
use elliptic_curve::generic_array::typenum::Unsigned;
use elliptic_curve::sec1::ToEncodedPoint;
use elliptic_curve::{CurveArithmetic, FieldBytesSize, NonZeroScalar, Scalar, SecretKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CryptoError, Result};
use crate::level::SecurityLevel;

/// Extra random bytes drawn beyond the field size so that reducing modulo
/// the group order leaves a negligible bias.
const EXTRA_RANDOM_BYTES: usize = 8;

/// Candidate scalars rejected before the random source is declared broken.
const MAX_SCALAR_ATTEMPTS: usize = 8;

/// A private scalar `D` on one of the supported curves, `0 < D < N`.
pub enum PrivateKey {
    P224(p224::SecretKey),
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

/// A public point on one of the supported curves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    P224(p224::PublicKey),
    P256(p256::PublicKey),
    P384(p384::PublicKey),
    P521(p521::PublicKey),
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("level", &self.level())
            .field("public", &hex::encode(self.public_key().to_sec1_bytes()))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl PrivateKey {
    /// Security level of the curve this key lives on.
    pub const fn level(&self) -> SecurityLevel {
        match self {
            Self::P224(_) => SecurityLevel::P244,
            Self::P256(_) => SecurityLevel::P256,
            Self::P384(_) => SecurityLevel::P384,
            Self::P521(_) => SecurityLevel::P512,
        }
    }

    /// Compute the public counterpart `D·G`.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::P224(sk) => PublicKey::P224(sk.public_key()),
            Self::P256(sk) => PublicKey::P256(sk.public_key()),
            Self::P384(sk) => PublicKey::P384(sk.public_key()),
            Self::P521(sk) => PublicKey::P521(sk.public_key()),
        }
    }
}

impl PublicKey {
    /// Security level of the curve this key lives on.
    pub const fn level(&self) -> SecurityLevel {
        match self {
            Self::P224(_) => SecurityLevel::P244,
            Self::P256(_) => SecurityLevel::P256,
            Self::P384(_) => SecurityLevel::P384,
            Self::P521(_) => SecurityLevel::P512,
        }
    }

    /// Decode a SEC1 point, rejecting anything not on the level's curve.
    pub fn from_sec1_bytes(level: SecurityLevel, bytes: &[u8]) -> Result<Self> {
        let invalid = |e: elliptic_curve::Error| CryptoError::InvalidPublicKey(e.to_string());
        let pk = match level {
            SecurityLevel::P244 => {
                Self::P224(p224::PublicKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
            SecurityLevel::P256 => {
                Self::P256(p256::PublicKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
            SecurityLevel::P384 => {
                Self::P384(p384::PublicKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
            SecurityLevel::P512 => {
                Self::P521(p521::PublicKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
        };
        Ok(pk)
    }

    /// Uncompressed SEC1 encoding of the point.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match self {
            Self::P224(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            Self::P256(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            Self::P384(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            Self::P521(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
        }
    }
}

/// Random blinding material `K`.
///
/// Despite the name this is not a curve point: the bytes are read as a
/// big-endian scalar. `K` travels in the clear alongside a duplex message.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RandomPoint {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for RandomPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RandomPoint")
            .field(&hex::encode(&self.bytes))
            .finish()
    }
}

impl RandomPoint {
    /// Rebuild a received `K`, checking it has the level's length.
    pub fn from_bytes(level: SecurityLevel, bytes: &[u8]) -> Result<Self> {
        let expected = level.random_point_len();
        if bytes.len() != expected {
            return Err(CryptoError::InvalidRandomPointLength {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for RandomPoint {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Generate a keypair on the curve selected by `level`.
pub fn generate_keypair<R>(level: SecurityLevel, rng: &mut R) -> Result<(PrivateKey, PublicKey)>
where
    R: RngCore + CryptoRng,
{
    let sk = match level {
        SecurityLevel::P244 => PrivateKey::P224(random_secret(rng)?),
        SecurityLevel::P256 => PrivateKey::P256(random_secret(rng)?),
        SecurityLevel::P384 => PrivateKey::P384(random_secret(rng)?),
        SecurityLevel::P512 => PrivateKey::P521(random_secret(rng)?),
    };
    let pk = sk.public_key();
    tracing::debug!(%level, curve = level.curve_name(), "generated keypair");
    Ok((sk, pk))
}

/// Generate a keypair from the operating system's random source.
pub fn generate_keypair_os(level: SecurityLevel) -> Result<(PrivateKey, PublicKey)> {
    generate_keypair(level, &mut OsRng)
}

/// Draw `level.random_point_len()` random bytes of blinding material.
pub fn random_point<R>(level: SecurityLevel, rng: &mut R) -> Result<RandomPoint>
where
    R: RngCore + CryptoRng,
{
    let mut bytes = vec![0u8; level.random_point_len()];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::RandomSource(e.to_string()))?;
    Ok(RandomPoint { bytes })
}

/// Draw blinding material from the operating system's random source.
pub fn random_point_os(level: SecurityLevel) -> Result<RandomPoint> {
    random_point(level, &mut OsRng)
}

/// Interpret `bytes` as a big-endian integer reduced modulo the group order.
///
/// Any length is accepted, so `K` longer than the order behaves exactly like
/// its residue.
pub(crate) fn scalar_from_be_bytes<C>(bytes: &[u8]) -> Scalar<C>
where
    C: CurveArithmetic,
{
    let radix = Scalar::<C>::from(256u64);
    bytes.iter().fold(Scalar::<C>::ZERO, |acc, &byte| {
        acc * radix + Scalar::<C>::from(u64::from(byte))
    })
}

/// Uniform nonzero scalar via the extra-random-bits method.
fn random_secret<C, R>(rng: &mut R) -> Result<SecretKey<C>>
where
    C: CurveArithmetic,
    R: RngCore + CryptoRng,
{
    let mut buf = Zeroizing::new(vec![0u8; FieldBytesSize::<C>::USIZE + EXTRA_RANDOM_BYTES]);
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| CryptoError::RandomSource(e.to_string()))?;
        let candidate = NonZeroScalar::<C>::new(scalar_from_be_bytes::<C>(&buf));
        if let Some(scalar) = Option::<NonZeroScalar<C>>::from(candidate) {
            return Ok(SecretKey::from(scalar));
        }
    }
    Err(CryptoError::RandomSource(format!(
        "no nonzero scalar after {MAX_SCALAR_ATTEMPTS} draws"
    )))
}
