use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Signature algorithm
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Algorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256
    #[serde(rename = "rsa-sha256")]
    RsaSha256,

    /// RSASSA-PKCS1-v1_5 with SHA-512
    #[serde(rename = "rsa-sha512")]
    RsaSha512,

    /// Ed25519 (RFC 8032)
    #[serde(rename = "ed25519")]
    Ed25519,
}

impl Algorithm {
    /// Every supported algorithm, in the order they are offered by default
    pub const ALL: &'static [Self] = &[Self::RsaSha256, Self::RsaSha512, Self::Ed25519];

    /// Algorithms an RSA key can sign with, most preferred first
    pub(crate) const RSA: &'static [Self] = &[Self::RsaSha256, Self::RsaSha512];

    /// Algorithms an Ed25519 key can sign with
    pub(crate) const ED25519: &'static [Self] = &[Self::Ed25519];

    /// Wire name of the algorithm
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RsaSha256 => "rsa-sha256",
            Self::RsaSha512 => "rsa-sha512",
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Algorithm name isn't one we know
#[derive(Debug, Error)]
#[error("Unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}
