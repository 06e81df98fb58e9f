use super::parse::Error;
use crate::Algorithm;
use rsa::pkcs1::der::Decode;
use ring::signature::{
    RsaPublicKeyComponents, UnparsedPublicKey, ED25519, RSA_PKCS1_2048_8192_SHA256,
    RSA_PKCS1_2048_8192_SHA512,
};
use ssh_key::{
    public::{Ed25519PublicKey, KeyData, RsaPublicKey},
    HashAlg, Mpint,
};

/// Enum dispatch over the supported public keys
#[derive(Clone, Debug)]
pub enum VerifyingKey {
    /// Ed25519 public key
    Ed25519([u8; 32]),

    /// RSA modulus and exponent as big-endian bytes without leading zeroes
    Rsa(RsaPublicKeyComponents<Vec<u8>>),
}

impl VerifyingKey {
    pub fn ed25519(raw: &[u8]) -> Result<Self, Error> {
        let raw = raw.try_into().map_err(|_| Error::MalformedKey)?;
        Ok(Self::Ed25519(raw))
    }

    /// Decode a DER-encoded PKCS#1 `RSAPublicKey`
    pub fn rsa_der(der: &[u8]) -> Result<Self, Error> {
        let public_key = rsa::pkcs1::RsaPublicKey::from_der(der)?;
        Ok(Self::Rsa(RsaPublicKeyComponents {
            n: public_key.modulus.as_bytes().to_vec(),
            e: public_key.public_exponent.as_bytes().to_vec(),
        }))
    }

    /// Algorithms this key can verify, most preferred first
    pub fn algorithms(&self) -> &'static [Algorithm] {
        match self {
            Self::Ed25519(..) => Algorithm::ED25519,
            Self::Rsa(..) => Algorithm::RSA,
        }
    }

    /// SSH wire representation of the key
    pub fn to_key_data(&self) -> Result<KeyData, Error> {
        let key_data = match self {
            Self::Ed25519(raw) => KeyData::Ed25519(Ed25519PublicKey(*raw)),
            Self::Rsa(components) => KeyData::Rsa(RsaPublicKey {
                e: Mpint::from_positive_bytes(&components.e).map_err(ssh_key::Error::from)?,
                n: Mpint::from_positive_bytes(&components.n).map_err(ssh_key::Error::from)?,
            }),
        };

        Ok(key_data)
    }

    /// OpenSSH SHA-256 fingerprint (`SHA256:<base64>`)
    pub fn fingerprint(&self) -> Result<String, Error> {
        Ok(self.to_key_data()?.fingerprint(HashAlg::Sha256).to_string())
    }

    /// Verify that the message corresponds with the signature
    ///
    /// Any failure, including malformed signatures and mismatched algorithms, is reported as `false`
    pub fn verify(&self, algorithm: Algorithm, msg: &[u8], signature: &[u8]) -> bool {
        match (self, algorithm) {
            (Self::Ed25519(raw), Algorithm::Ed25519) => UnparsedPublicKey::new(&ED25519, raw)
                .verify(msg, signature)
                .is_ok(),
            (Self::Rsa(components), Algorithm::RsaSha256) => components
                .verify(&RSA_PKCS1_2048_8192_SHA256, msg, signature)
                .is_ok(),
            (Self::Rsa(components), Algorithm::RsaSha512) => components
                .verify(&RSA_PKCS1_2048_8192_SHA512, msg, signature)
                .is_ok(),
            _ => false,
        }
    }
}
