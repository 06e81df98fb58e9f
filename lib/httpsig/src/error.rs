use crate::Algorithm;
use miette::Diagnostic;
use thiserror::Error;

/// Signing and configuration error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// A required builder field was never set
    #[error("Missing required field: {0}")]
    Configuration(&'static str),

    /// None of the keys supports an algorithm accepted by the challenge
    #[error("No key compatible with the challenge")]
    NoCompatibleKey,

    /// The keychain has no active key
    #[error("No current key")]
    NoCurrentKey,

    /// Header value contains characters not allowed in HTTP headers
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Signing the request failed
    #[error(transparent)]
    Signing(#[from] SigningError),
}

/// Failure while producing a signature
#[derive(Debug, Diagnostic, Error)]
pub enum SigningError {
    /// The cryptographic primitive failed
    #[error("Cryptographic operation failed")]
    Crypto,

    /// Header selected for signing is missing from the request content
    #[error("Missing header value: {0}")]
    MissingHeader(String),

    /// Key only carries its public half
    #[error("Key has no private component")]
    MissingPrivateKey,

    /// Key can't produce signatures with this algorithm
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(Algorithm),
}

impl From<ring::error::Unspecified> for SigningError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::Crypto
    }
}
