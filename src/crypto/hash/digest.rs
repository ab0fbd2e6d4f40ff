use core::fmt;
use core::str::FromStr;

use crate::encoding::hex::{self, HexError};

/// A 16-byte MD4 (or ed2k) digest.
///
/// Renders as 32 lowercase hex digits, most significant nibble first, bytes
/// in the order the engine produced them.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Digest([u8; 16]);

impl Digest {
    pub const LEN: usize = 16;
    pub const HEX_LEN: usize = Self::LEN * 2;

    #[inline(always)]
    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    #[inline(always)]
    pub const fn into_bytes(self) -> [u8; Self::LEN] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parses exactly 32 hex digits (either case).
    pub fn from_hex(s: &str) -> Result<Self, ParseDigestError> {
        if s.len() != Self::HEX_LEN {
            return Err(ParseDigestError::InvalidLength(s.len()));
        }
        let mut bytes = [0u8; Self::LEN];
        hex::decode_slice(s.as_bytes(), &mut bytes).map_err(ParseDigestError::InvalidHex)?;
        Ok(Self(bytes))
    }

    /// Comparison whose running time does not depend on where the digests
    /// differ (unless built with `variable_time_eq`).
    #[inline]
    pub fn ct_eq(&self, other: &Self) -> bool {
        crate::utils::constant_time_eq(&self.0, &other.0)
    }
}

impl From<[u8; 16]> for Digest {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; 16] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::HEX_LEN];
        hex::encode_slice(&self.0, &mut buf).map_err(|_| fmt::Error)?;
        let s = core::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.write_str(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self:x})")
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseDigestError {
    InvalidLength(usize),
    InvalidHex(HexError),
}

impl fmt::Display for ParseDigestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "expected {} hex digits, got {len}", Digest::HEX_LEN)
            }
            Self::InvalidHex(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for ParseDigestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHex(source) => Some(source),
            Self::InvalidLength(_) => None,
        }
    }
}
