//!
//! Parse cryptographic keys from their PEM forms
//!

use super::{SigningKey, VerifyingKey};
use const_oid::db::{rfc5912::RSA_ENCRYPTION, rfc8410::ID_ED_25519};
use miette::Diagnostic;
use pkcs8::{Document, PrivateKeyInfo, SecretDocument, SubjectPublicKeyInfoRef};
use ring::signature::{Ed25519KeyPair, RsaKeyPair};
use thiserror::Error;

const PKCS1_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed DER structure
    #[error(transparent)]
    Der(#[from] pkcs8::der::Error),

    /// Reading the key file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Key rejected
    #[error(transparent)]
    KeyRejected(#[from] ring::error::KeyRejected),

    /// Malformed key
    #[error("Malformed key")]
    MalformedKey,

    /// The key is encrypted and no passphrase was provided
    #[error("Key is encrypted")]
    Encrypted,

    /// Malformed PKCS#8 document
    #[error(transparent)]
    Pkcs8(#[from] pkcs8::Error),

    /// Malformed PKCS#1 document
    #[error(transparent)]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// Inconsistent RSA key components
    #[error(transparent)]
    Rsa(#[from] rsa::Error),

    /// Malformed OpenSSH key, or wrong passphrase
    #[error(transparent)]
    Ssh(#[from] ssh_key::Error),

    /// Unknown key type
    #[error("Unknown key type")]
    UnknownKeyType,
}

/// Parse a public key from its SubjectPublicKeyInfo PEM form
///
/// Currently supported algorithms:
///
/// - RSA
/// - Ed25519
#[inline]
pub fn public_key(pem: &str) -> Result<VerifyingKey, Error> {
    let (_pem_tag, document) = Document::from_pem(pem.trim())?;
    let spki: SubjectPublicKeyInfoRef<'_> = document.decode_msg()?;

    let raw_bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::MalformedKey)?;

    if spki.algorithm.oid == RSA_ENCRYPTION {
        VerifyingKey::rsa_der(raw_bytes)
    } else if spki.algorithm.oid == ID_ED_25519 {
        VerifyingKey::ed25519(raw_bytes)
    } else {
        Err(Error::UnknownKeyType)
    }
}

/// Parse a private key from its PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`) PEM form
///
/// Currently supported algorithms:
///
/// - RSA
/// - Ed25519
#[inline]
pub fn private_key(pem: &str) -> Result<SigningKey, Error> {
    let (tag_line, document) = SecretDocument::from_pem(pem.trim())?;
    if tag_line == PKCS1_PRIVATE_KEY_LABEL {
        return Ok(SigningKey::Rsa(RsaKeyPair::from_der(document.as_bytes())?));
    }

    let private_key_info: PrivateKeyInfo<'_> = document.decode_msg()?;
    let signing_key = if private_key_info.algorithm.oid == RSA_ENCRYPTION {
        SigningKey::Rsa(RsaKeyPair::from_pkcs8(document.as_bytes())?)
    } else if private_key_info.algorithm.oid == ID_ED_25519 {
        SigningKey::Ed25519(Ed25519KeyPair::from_pkcs8_maybe_unchecked(
            document.as_bytes(),
        )?)
    } else {
        return Err(Error::UnknownKeyType);
    };

    Ok(signing_key)
}
