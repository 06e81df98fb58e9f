use super::{Error, Key};
use crate::{
    crypto::{self, SigningKey, VerifyingKey},
    Algorithm, SigningError,
};
use std::{fmt, sync::Arc};

/// Key sourced from raw key-pair material in its PEM encoding
#[derive(Clone)]
pub struct RawKey {
    id: String,
    verifying_key: VerifyingKey,
    signing_key: Option<Arc<SigningKey>>,
}

impl RawKey {
    fn new(verifying_key: VerifyingKey, signing_key: Option<SigningKey>) -> Result<Self, Error> {
        Ok(Self {
            id: verifying_key.fingerprint()?,
            verifying_key,
            signing_key: signing_key.map(Arc::new),
        })
    }

    /// Load a private key from its PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`) PEM form
    pub fn from_pem(pem: &str) -> Result<Self, Error> {
        let signing_key = crypto::parse::private_key(pem)?;
        Self::new(signing_key.verifying_key()?, Some(signing_key))
    }

    /// Load a verification-only key from its SubjectPublicKeyInfo (`PUBLIC KEY`) PEM form
    pub fn from_public_pem(pem: &str) -> Result<Self, Error> {
        Self::new(crypto::parse::public_key(pem)?, None)
    }

    /// Verification-only copy of this key
    #[must_use]
    pub fn public_key(&self) -> Self {
        Self {
            id: self.id.clone(),
            verifying_key: self.verifying_key.clone(),
            signing_key: None,
        }
    }

    /// Whether the private half is available
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.signing_key.is_some()
    }
}

impl Key for RawKey {
    fn id(&self) -> &str {
        &self.id
    }

    fn algorithms(&self) -> &[Algorithm] {
        self.verifying_key.algorithms()
    }

    fn sign(&self, algorithm: Algorithm, msg: &[u8]) -> Result<Vec<u8>, SigningError> {
        self.signing_key
            .as_ref()
            .ok_or(SigningError::MissingPrivateKey)?
            .sign(algorithm, msg)
    }

    fn verify(&self, algorithm: Algorithm, msg: &[u8], signature: &[u8]) -> bool {
        self.verifying_key.verify(algorithm, msg, signature)
    }
}

impl fmt::Debug for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawKey")
            .field("id", &self.id)
            .field("can_sign", &self.can_sign())
            .finish_non_exhaustive()
    }
}
