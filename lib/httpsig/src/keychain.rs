//!
//! Ordered key collection with a "current key" cursor
//!

use crate::{Challenge, Error, Key, Result};
use std::{fmt, sync::Arc};
use tracing::debug;

/// Ordered collection of keys with a cursor pointing at the active key
///
/// Keys are reference-counted. Cloning a keychain is cheap and gives the clone its own cursor,
/// which is how concurrent signing flows should share keys.
#[derive(Clone, Default)]
pub struct Keychain {
    keys: Vec<Arc<dyn Key>>,

    /// Index into `keys`. Always in bounds if set
    current: Option<usize>,
}

impl Keychain {
    /// Construct an empty keychain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key
    ///
    /// If the keychain was empty, the cursor moves to the new key
    pub fn push<K>(&mut self, key: K)
    where
        K: Key + 'static,
    {
        self.push_shared(Arc::new(key));
    }

    /// Append a shared key
    pub fn push_shared(&mut self, key: Arc<dyn Key>) {
        self.keys.push(key);
        if self.keys.len() == 1 {
            self.current = Some(0);
        }
    }

    /// Point the cursor at the first key supporting an algorithm the challenge accepts
    ///
    /// If no key qualifies, the cursor is cleared and [`Error::NoCompatibleKey`] is returned
    pub fn rotate(&mut self, challenge: &Challenge) -> Result<&Arc<dyn Key>> {
        self.current = self.keys.iter().position(|key| {
            key.algorithms()
                .iter()
                .any(|algorithm| challenge.accepts(*algorithm))
        });

        match self.current {
            Some(idx) => {
                debug!(key_id = self.keys[idx].id(), "rotated keychain");
                Ok(&self.keys[idx])
            }
            None => {
                debug!(realm = challenge.realm(), "no compatible key in keychain");
                Err(Error::NoCompatibleKey)
            }
        }
    }

    /// Currently active key
    pub fn current_key(&self) -> Result<&Arc<dyn Key>> {
        self.current
            .map(|idx| &self.keys[idx])
            .ok_or(Error::NoCurrentKey)
    }

    /// Look up a key by its fingerprint
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Arc<dyn Key>> {
        self.keys.iter().find(|key| key.id() == id)
    }

    /// Iterate over all keys in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Key>> {
        self.keys.iter()
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the keychain holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Extend<Arc<dyn Key>> for Keychain {
    fn extend<T: IntoIterator<Item = Arc<dyn Key>>>(&mut self, iter: T) {
        for key in iter {
            self.push_shared(key);
        }
    }
}

impl FromIterator<Arc<dyn Key>> for Keychain {
    fn from_iter<T: IntoIterator<Item = Arc<dyn Key>>>(iter: T) -> Self {
        let mut keychain = Self::new();
        keychain.extend(iter);
        keychain
    }
}

impl fmt::Debug for Keychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keychain")
            .field("keys", &self.keys.iter().map(|key| key.id()).collect::<Vec<_>>())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::Keychain;
    use crate::{Algorithm, Challenge, Error, Key, SigningError};
    use std::sync::Arc;

    /// Key that signs by echoing the message, for exercising selection logic
    pub struct EchoKey {
        pub id: &'static str,
        pub algorithms: &'static [Algorithm],
    }

    impl Key for EchoKey {
        fn id(&self) -> &str {
            self.id
        }

        fn algorithms(&self) -> &[Algorithm] {
            self.algorithms
        }

        fn sign(&self, algorithm: Algorithm, msg: &[u8]) -> Result<Vec<u8>, SigningError> {
            if !self.algorithms.contains(&algorithm) {
                return Err(SigningError::UnsupportedAlgorithm(algorithm));
            }

            Ok(msg.to_vec())
        }

        fn verify(&self, algorithm: Algorithm, msg: &[u8], signature: &[u8]) -> bool {
            self.algorithms.contains(&algorithm) && msg == signature
        }
    }

    pub fn keychain() -> Keychain {
        let mut keychain = Keychain::new();
        keychain.push(EchoKey {
            id: "k1",
            algorithms: &[Algorithm::RsaSha256],
        });
        keychain.push(EchoKey {
            id: "k2",
            algorithms: &[Algorithm::Ed25519],
        });
        keychain
    }

    fn challenge(algorithms: &[Algorithm]) -> Challenge {
        Challenge::new("realm", ["date"], algorithms.iter().copied())
    }

    #[test]
    fn cursor_starts_on_first_key() {
        assert_eq!(keychain().current_key().unwrap().id(), "k1");
        assert!(matches!(
            Keychain::new().current_key(),
            Err(Error::NoCurrentKey)
        ));
    }

    #[test]
    fn rotate_picks_first_match() {
        let mut keychain = keychain();

        let key = keychain.rotate(&challenge(&[Algorithm::Ed25519])).unwrap();
        assert_eq!(key.id(), "k2");
        assert_eq!(keychain.current_key().unwrap().id(), "k2");

        let both = challenge(&[Algorithm::Ed25519, Algorithm::RsaSha256]);
        assert_eq!(keychain.rotate(&both).unwrap().id(), "k1");
        assert_eq!(keychain.rotate(&both).unwrap().id(), "k1");
    }

    #[test]
    fn rotate_without_match_clears_cursor() {
        let mut keychain = keychain();

        let Err(err) = keychain.rotate(&challenge(&[Algorithm::RsaSha512])) else {
            panic!("rotation should fail without a compatible key");
        };
        assert!(matches!(err, Error::NoCompatibleKey));
        assert!(matches!(keychain.current_key(), Err(Error::NoCurrentKey)));
        assert_eq!(keychain.len(), 2);
    }

    #[test]
    fn clones_have_independent_cursors() {
        let mut first = keychain();
        let second = first.clone();

        first.rotate(&challenge(&[Algorithm::Ed25519])).unwrap();

        assert_eq!(first.current_key().unwrap().id(), "k2");
        assert_eq!(second.current_key().unwrap().id(), "k1");
    }

    #[test]
    fn find_by_id() {
        let keychain = keychain();

        assert_eq!(keychain.find_by_id("k2").unwrap().id(), "k2");
        assert!(keychain.find_by_id("k3").is_none());
    }

    #[test]
    fn collect_shared_keys() {
        let shared: Arc<dyn Key> = Arc::new(EchoKey {
            id: "shared",
            algorithms: &[Algorithm::Ed25519],
        });

        let keychain: Keychain = [shared.clone(), shared].into_iter().collect();
        assert_eq!(keychain.len(), 2);
        assert_eq!(keychain.current_key().unwrap().id(), "shared");
    }
}
