use std::fmt;
use std::str::FromStr;

use crate::ParseFingerprintError;

const HEX_LEN: usize = 64;
const SHORT_LEN: usize = 8;

/// Hex-encoded SHA-256 digest of a document's content.
///
/// Always 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap a raw 32-byte digest.
    pub fn from_digest(digest: &[u8]) -> Result<Self, ParseFingerprintError> {
        if digest.len() * 2 != HEX_LEN {
            return Err(ParseFingerprintError(hex::encode(digest)));
        }
        Ok(Self(hex::encode(digest)))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Leading hex characters used for on-disk naming.
    ///
    /// Collisions between documents sharing a prefix are accepted; the full
    /// fingerprint remains the lookup key.
    pub fn short(&self) -> &str { &self.0[..SHORT_LEN] }
}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != HEX_LEN || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseFingerprintError(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str { &self.0 }
}
