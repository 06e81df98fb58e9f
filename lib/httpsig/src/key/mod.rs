//!
//! Keys that can sign and verify requests
//!
//! Two kinds of key material are supported: raw key pairs in their PEM encodings ([`RawKey`]) and
//! OpenSSH identities ([`SshKey`]). Both derive their identifier from the public key in the same way,
//! so the same key material always ends up with the same fingerprint, no matter how it was loaded.
//!

use crate::{Algorithm, Keychain, SigningError};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::Arc};

pub use self::{raw::RawKey, ssh::SshKey};
pub use crate::crypto::parse::Error;

mod raw;
mod ssh;

/// Uniform capability over heterogeneous key material
///
/// Keys are immutable once constructed. Neither signing nor verifying mutates them.
pub trait Key: Send + Sync {
    /// Stable fingerprint of the key, derived from its public half
    fn id(&self) -> &str;

    /// Signature algorithms this key can be used with, most preferred first
    fn algorithms(&self) -> &[Algorithm];

    /// Sign a message
    fn sign(&self, algorithm: Algorithm, msg: &[u8]) -> Result<Vec<u8>, SigningError>;

    /// Verify the signature of a message
    ///
    /// Malformed signatures are simply not verified, this never panics
    fn verify(&self, algorithm: Algorithm, msg: &[u8], signature: &[u8]) -> bool;
}

impl<K> Key for Arc<K>
where
    K: Key + ?Sized,
{
    fn id(&self) -> &str {
        (**self).id()
    }

    fn algorithms(&self) -> &[Algorithm] {
        (**self).algorithms()
    }

    fn sign(&self, algorithm: Algorithm, msg: &[u8]) -> Result<Vec<u8>, SigningError> {
        (**self).sign(algorithm, msg)
    }

    fn verify(&self, algorithm: Algorithm, msg: &[u8], signature: &[u8]) -> bool {
        (**self).verify(algorithm, msg, signature)
    }
}

/// Encoding of a key file
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyFormat {
    /// PKCS#8 or PKCS#1 PEM
    Pem,

    /// OpenSSH private key
    #[default]
    Ssh,
}

/// Load a private key from the file system
pub fn load<P>(path: P, format: KeyFormat, passphrase: Option<&str>) -> Result<Arc<dyn Key>, Error>
where
    P: AsRef<Path>,
{
    let contents = fs::read_to_string(path)?;
    let key: Arc<dyn Key> = match (format, passphrase) {
        (KeyFormat::Pem, _) => Arc::new(RawKey::from_pem(&contents)?),
        (KeyFormat::Ssh, None) => Arc::new(SshKey::from_openssh(&contents)?),
        (KeyFormat::Ssh, Some(passphrase)) => {
            Arc::new(SshKey::from_openssh_encrypted(&contents, passphrase)?)
        }
    };

    Ok(key)
}

/// Build a verification keychain from the contents of an `authorized_keys` file
///
/// Entries keep the order of the file. Comments and empty lines are skipped.
pub fn authorized_keys(contents: &str) -> Result<Keychain, Error> {
    ssh_key::AuthorizedKeys::new(contents)
        .map(|entry| -> Result<Arc<dyn Key>, Error> {
            let entry = entry?;
            Ok(Arc::new(SshKey::from_public_key(entry.public_key().clone())?))
        })
        .collect()
}
