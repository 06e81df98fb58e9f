use super::VerifyingKey;
use crate::{Algorithm, SigningError};
use ring::{
    rand::SystemRandom,
    signature::{Ed25519KeyPair, KeyPair, RsaKeyPair, RSA_PKCS1_SHA256, RSA_PKCS1_SHA512},
};

/// Enum dispatch over the supported private keys
pub enum SigningKey {
    /// Ed25519
    Ed25519(Ed25519KeyPair),

    /// RSA
    Rsa(RsaKeyPair),
}

impl SigningKey {
    /// Public half of the key
    pub fn verifying_key(&self) -> Result<VerifyingKey, super::parse::Error> {
        match self {
            Self::Ed25519(key) => VerifyingKey::ed25519(key.public_key().as_ref()),
            Self::Rsa(key) => VerifyingKey::rsa_der(key.public().as_ref()),
        }
    }

    /// Sign a message with the given algorithm
    pub fn sign(&self, algorithm: Algorithm, msg: &[u8]) -> Result<Vec<u8>, SigningError> {
        match (self, algorithm) {
            (Self::Ed25519(key), Algorithm::Ed25519) => Ok(key.sign(msg).as_ref().to_vec()),
            (Self::Rsa(key), Algorithm::RsaSha256 | Algorithm::RsaSha512) => {
                let padding = if algorithm == Algorithm::RsaSha256 {
                    &RSA_PKCS1_SHA256
                } else {
                    &RSA_PKCS1_SHA512
                };

                let mut buf = vec![0; key.public().modulus_len()];
                key.sign(padding, &SystemRandom::new(), msg, &mut buf)?;

                Ok(buf)
            }
            (_, algorithm) => Err(SigningError::UnsupportedAlgorithm(algorithm)),
        }
    }
}
