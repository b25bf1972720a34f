//! ECDH shared-point computation.

use elliptic_curve::group::Curve as _;
use elliptic_curve::sec1::{ModulusSize, ToEncodedPoint};
use elliptic_curve::{
    AffinePoint, CurveArithmetic, FieldBytesSize, PublicKey as CurvePublicKey, SecretKey,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, Result};
use crate::keys::{PrivateKey, PublicKey};

/// Affine coordinates `(X, Y)` of an agreed point.
///
/// Consumed by key derivation and never persisted.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedPoint {
    x: Vec<u8>,
    y: Vec<u8>,
}

impl std::fmt::Debug for SharedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPoint")
            .field("x", &"[REDACTED]")
            .field("y", &"[REDACTED]")
            .finish()
    }
}

impl SharedPoint {
    /// Build from big-endian coordinates of any width.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Self {
        Self {
            x: strip_leading_zeros(x).to_vec(),
            y: strip_leading_zeros(y).to_vec(),
        }
    }

    /// Minimal big-endian encoding of `X` (no leading zero bytes).
    pub fn x(&self) -> &[u8] {
        &self.x
    }

    /// Minimal big-endian encoding of `Y` (no leading zero bytes).
    pub fn y(&self) -> &[u8] {
        &self.y
    }
}

/// Multiply `pk`'s point by `sk`'s scalar.
///
/// `agree(sk_a, pk_b) == agree(sk_b, pk_a)`. Both keys must be on the same
/// curve.
pub fn agree(sk: &PrivateKey, pk: &PublicKey) -> Result<SharedPoint> {
    match (sk, pk) {
        (PrivateKey::P224(sk), PublicKey::P224(pk)) => agree_on(sk, pk),
        (PrivateKey::P256(sk), PublicKey::P256(pk)) => agree_on(sk, pk),
        (PrivateKey::P384(sk), PublicKey::P384(pk)) => agree_on(sk, pk),
        (PrivateKey::P521(sk), PublicKey::P521(pk)) => agree_on(sk, pk),
        _ => Err(CryptoError::CurveMismatch {
            expected: sk.level(),
            actual: pk.level(),
        }),
    }
}

fn agree_on<C>(sk: &SecretKey<C>, pk: &CurvePublicKey<C>) -> Result<SharedPoint>
where
    C: CurveArithmetic,
    AffinePoint<C>: ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let point = (pk.to_projective() * *sk.to_nonzero_scalar()).to_affine();
    let encoded = point.to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Ok(SharedPoint::from_coordinates(x, y)),
        _ => Err(CryptoError::DegenerateKey),
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}
