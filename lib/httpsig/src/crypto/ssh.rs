//!
//! Conversions between OpenSSH key structures and the signing/verifying keys
//!

use super::{parse::Error, SigningKey, VerifyingKey};
use ring::signature::{Ed25519KeyPair, RsaKeyPair, RsaPublicKeyComponents};
use rsa::{pkcs1::EncodeRsaPrivateKey, BigUint};
use ssh_key::{private::KeypairData, public::KeyData};

impl TryFrom<&KeyData> for VerifyingKey {
    type Error = Error;

    fn try_from(key_data: &KeyData) -> Result<Self, Self::Error> {
        match key_data {
            KeyData::Ed25519(public) => Ok(Self::Ed25519(public.0)),
            KeyData::Rsa(public) => Ok(Self::Rsa(RsaPublicKeyComponents {
                n: public
                    .n
                    .as_positive_bytes()
                    .ok_or(Error::MalformedKey)?
                    .to_vec(),
                e: public
                    .e
                    .as_positive_bytes()
                    .ok_or(Error::MalformedKey)?
                    .to_vec(),
            })),
            _ => Err(Error::UnknownKeyType),
        }
    }
}

impl TryFrom<&KeypairData> for SigningKey {
    type Error = Error;

    fn try_from(keypair_data: &KeypairData) -> Result<Self, Self::Error> {
        match keypair_data {
            KeypairData::Ed25519(keypair) => Ok(Self::Ed25519(
                Ed25519KeyPair::from_seed_and_public_key(
                    &keypair.private.to_bytes(),
                    &keypair.public.0,
                )?,
            )),
            KeypairData::Rsa(keypair) => {
                // ring only takes DER documents, so go through the PKCS#1 encoding.
                // The CRT parameters get recomputed from both primes.
                let private_key = rsa::RsaPrivateKey::from_components(
                    BigUint::try_from(&keypair.public.n)?,
                    BigUint::try_from(&keypair.public.e)?,
                    BigUint::try_from(&keypair.private.d)?,
                    vec![
                        BigUint::try_from(&keypair.private.p)?,
                        BigUint::try_from(&keypair.private.q)?,
                    ],
                )?;
                let document = private_key.to_pkcs1_der()?;

                Ok(Self::Rsa(RsaKeyPair::from_der(document.as_bytes())?))
            }
            KeypairData::Encrypted(..) => Err(Error::Encrypted),
            _ => Err(Error::UnknownKeyType),
        }
    }
}
