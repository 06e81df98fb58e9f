//!
//! HTTP signature authentication
//!
//! A client signs selected parts of a request with one of the keys in its [`Keychain`],
//! the server recovers the same canonical content and checks the signature against the key named in the
//! `Authorization` header.
//!
//! Only asymmetric schemes are supported (RSA and Ed25519)
//!

#![warn(missing_docs)]

pub use self::{
    algorithm::{Algorithm, UnknownAlgorithm},
    authorization::Authorization,
    challenge::Challenge,
    content::{RequestContent, RequestContentBuilder},
    error::{Error, SigningError},
    key::Key,
    keychain::Keychain,
    signer::{Signer, SignerState},
    verifier::Verifier,
};

mod algorithm;
mod authorization;
mod challenge;
mod content;
mod crypto;
mod error;
mod params;
mod signer;
mod verifier;

pub mod key;
pub mod keychain;
pub mod transport;

type Result<T, E = Error> = std::result::Result<T, E>;

/// Authentication scheme token used in the `Authorization` and `WWW-Authenticate` headers
pub const SCHEME: &str = "Signature";

/// Headers covered by a signature when no challenge says otherwise
pub const DEFAULT_HEADERS: &[&str] = &["date"];

/// Pseudo-header covering the lowercased method and the path (including the query)
pub const REQUEST_TARGET: &str = "(request-target)";

/// Pseudo-header covering the literal request line
pub const REQUEST_LINE: &str = "request-line";
