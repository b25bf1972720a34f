//! Security levels and the curves they select.
//!
//! Each level is bound to exactly one NIST prime curve. The numeric tag is
//! part of the wire contract between parties and is kept even where it does
//! not match the curve's bit length: `P244` selects P-224 and `P512` selects
//! P-521.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Named security level selecting a standard elliptic curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityLevel {
    /// NIST P-224. The tag reads 244, not 224.
    P244,
    /// NIST P-256.
    P256,
    /// NIST P-384.
    P384,
    /// NIST P-521.
    P512,
}

impl SecurityLevel {
    /// All levels, weakest first.
    pub const ALL: [Self; 4] = [Self::P244, Self::P256, Self::P384, Self::P512];

    /// Numeric value of the tag.
    pub const fn bits(self) -> usize {
        match self {
            Self::P244 => 244,
            Self::P256 => 256,
            Self::P384 => 384,
            Self::P512 => 512,
        }
    }

    /// Standard name of the curve this level selects.
    pub const fn curve_name(self) -> &'static str {
        match self {
            Self::P244 => "P-224",
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P512 => "P-521",
        }
    }

    /// Byte length of a serialized field element on the selected curve.
    pub const fn field_len(self) -> usize {
        match self {
            Self::P244 => 28,
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P512 => 66,
        }
    }

    /// Length in bytes of a random blinding point for this level.
    pub const fn random_point_len(self) -> usize {
        self.bits().div_ceil(8)
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.bits())
    }
}

impl TryFrom<usize> for SecurityLevel {
    type Error = CryptoError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|level| level.bits() == bits)
            .ok_or_else(|| CryptoError::Config(format!("unknown security level: {bits}")))
    }
}

impl FromStr for SecurityLevel {
    type Err = CryptoError;

    /// Accepts the tag name (`"P256"`, case-insensitive) or the bare number (`"256"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('P')
            .or_else(|| trimmed.strip_prefix('p'))
            .unwrap_or(trimmed);
        digits
            .parse::<usize>()
            .map_err(|_| CryptoError::Config(format!("unknown security level: {s}")))
            .and_then(Self::try_from)
    }
}
