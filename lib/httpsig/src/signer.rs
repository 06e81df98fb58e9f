use crate::{
    Algorithm, Authorization, Challenge, Error, Keychain, RequestContent, Result, DEFAULT_HEADERS,
};
use tracing::{debug, instrument};

/// Lifecycle of a [`Signer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignerState {
    /// The keychain has no current key, signing fails
    NoKey,

    /// A key is selected and ready to sign
    Ready,

    /// At least one request was signed with the current key
    Signed,
}

/// Client-side signer
///
/// Owns its keychain, so each signing flow rotates its own cursor
#[derive(Clone, Debug)]
pub struct Signer {
    keychain: Keychain,
    challenge: Option<Challenge>,
    state: SignerState,
}

impl Signer {
    /// Construct a new signer over the keychain
    #[must_use]
    pub fn new(keychain: Keychain) -> Self {
        let state = if keychain.current_key().is_ok() {
            SignerState::Ready
        } else {
            SignerState::NoKey
        };

        Self {
            keychain,
            challenge: None,
            state,
        }
    }

    /// Select the key to sign with according to the challenge
    ///
    /// The challenge is remembered and decides which headers get signed from now on
    #[instrument(skip_all, fields(realm = challenge.realm()))]
    pub fn rotate_keys(&mut self, challenge: &Challenge) -> Result<()> {
        self.challenge = Some(challenge.clone());

        match self.keychain.rotate(challenge) {
            Ok(..) => {
                self.state = SignerState::Ready;
                Ok(())
            }
            Err(error) => {
                self.state = SignerState::NoKey;
                Err(error)
            }
        }
    }

    /// Sign the request content with the current key
    ///
    /// Covers the headers of the most recent challenge in the challenge's order,
    /// or [`DEFAULT_HEADERS`] if no challenge was ever supplied
    #[instrument(skip_all)]
    pub fn sign(&mut self, content: &RequestContent) -> Result<Authorization> {
        let key = self.keychain.current_key()?;

        let algorithm = self.select_algorithm(key.algorithms())?;
        let headers: Vec<&str> = match self.challenge {
            Some(ref challenge) => challenge.headers().iter().map(String::as_str).collect(),
            None => DEFAULT_HEADERS.to_vec(),
        };

        let signing_string = content.signing_string(&headers)?;
        let signature = key.sign(algorithm, signing_string.as_bytes())?;
        debug!(key_id = key.id(), %algorithm, ?headers, "signed request");

        let authorization = Authorization::new(key.id(), algorithm, headers, signature);
        self.state = SignerState::Signed;

        Ok(authorization)
    }

    /// First algorithm in the key's preference order the challenge accepts
    fn select_algorithm(&self, supported: &[Algorithm]) -> Result<Algorithm> {
        let mut candidates = supported.iter().copied();
        let algorithm = match self.challenge {
            Some(ref challenge) => candidates.find(|algorithm| challenge.accepts(*algorithm)),
            None => candidates.next(),
        };

        algorithm.ok_or(Error::NoCompatibleKey)
    }

    /// Current state of the signer
    #[must_use]
    pub fn state(&self) -> SignerState {
        self.state
    }

    /// Keychain the signer draws its keys from
    #[must_use]
    pub fn keychain(&self) -> &Keychain {
        &self.keychain
    }

    /// Most recent challenge
    #[must_use]
    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }
}
