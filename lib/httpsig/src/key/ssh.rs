use super::{Error, Key};
use crate::{
    crypto::{SigningKey, VerifyingKey},
    Algorithm, SigningError,
};
use ssh_key::{HashAlg, PrivateKey, PublicKey};
use std::{fmt, sync::Arc};

/// Key sourced from an OpenSSH-encoded identity
#[derive(Clone)]
pub struct SshKey {
    id: String,
    public_key: PublicKey,
    verifying_key: VerifyingKey,
    signing_key: Option<Arc<SigningKey>>,
}

impl SshKey {
    fn new(private_key: &PrivateKey) -> Result<Self, Error> {
        let signing_key = SigningKey::try_from(private_key.key_data())?;
        let mut key = Self::from_public_key(private_key.public_key().clone())?;
        key.signing_key = Some(Arc::new(signing_key));

        Ok(key)
    }

    /// Load an unencrypted OpenSSH private key (`OPENSSH PRIVATE KEY`)
    pub fn from_openssh(pem: &str) -> Result<Self, Error> {
        let private_key = PrivateKey::from_openssh(pem.trim())?;
        if private_key.is_encrypted() {
            return Err(Error::Encrypted);
        }

        Self::new(&private_key)
    }

    /// Load an OpenSSH private key, decrypting it with the passphrase if it is encrypted
    pub fn from_openssh_encrypted(pem: &str, passphrase: &str) -> Result<Self, Error> {
        let private_key = PrivateKey::from_openssh(pem.trim())?;
        if private_key.is_encrypted() {
            Self::new(&private_key.decrypt(passphrase)?)
        } else {
            Self::new(&private_key)
        }
    }

    /// Load a verification-only key from a single `authorized_keys` or `.pub` line
    pub fn from_public(line: &str) -> Result<Self, Error> {
        Self::from_public_key(PublicKey::from_openssh(line.trim())?)
    }

    /// Wrap an already parsed OpenSSH public key
    pub fn from_public_key(public_key: PublicKey) -> Result<Self, Error> {
        let verifying_key = VerifyingKey::try_from(public_key.key_data())?;

        Ok(Self {
            id: public_key.fingerprint(HashAlg::Sha256).to_string(),
            public_key,
            verifying_key,
            signing_key: None,
        })
    }

    /// Comment attached to the key
    #[must_use]
    pub fn comment(&self) -> &str {
        self.public_key.comment()
    }

    /// OpenSSH public key
    #[must_use]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Whether the private half is available
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.signing_key.is_some()
    }
}

impl Key for SshKey {
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

impl fmt::Debug for SshKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshKey")
            .field("id", &self.id)
            .field("comment", &self.comment())
            .field("can_sign", &self.can_sign())
            .finish_non_exhaustive()
    }
}
