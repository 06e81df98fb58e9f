use crate::{Authorization, Challenge, Keychain, RequestContent};
use std::time::{Duration, SystemTime};
use tracing::{debug, instrument};

#[inline]
fn is_subset<I>(left: &[I], right: &[I]) -> bool
where
    I: PartialEq,
{
    if left.len() <= right.len() {
        left.iter().all(|item| right.contains(item))
    } else {
        false
    }
}

fn is_fresh(
    content: &RequestContent,
    authorization: &Authorization,
    max_age: Duration,
) -> bool {
    if !authorization.headers().iter().any(|name| name == "date") {
        debug!("date header isn't signed");
        return false;
    }

    let Some(date) = content
        .header("date")
        .and_then(|date| httpdate::parse_http_date(date).ok())
    else {
        debug!("missing or invalid date header");
        return false;
    };

    let now = SystemTime::now();
    let skew = now
        .duration_since(date)
        .or_else(|_| date.duration_since(now))
        .unwrap_or(Duration::MAX);

    if skew > max_age {
        debug!(?skew, "date header outside of the accepted window");
        return false;
    }

    true
}

/// Server-side verifier
///
/// Only reads its keychain, so a single verifier can serve any number of concurrent requests
#[derive(Clone, Debug)]
pub struct Verifier {
    keychain: Keychain,
    max_age: Option<Duration>,
}

impl Verifier {
    /// Construct a new verifier resolving keys from the keychain
    #[must_use]
    pub fn new(keychain: Keychain) -> Self {
        Self {
            keychain,
            max_age: None,
        }
    }

    /// Additionally require a signed `date` header no further than `max_age` away from the current time
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Keychain the verifier resolves keys from
    #[must_use]
    pub fn keychain(&self) -> &Keychain {
        &self.keychain
    }

    /// Verify the authorization against the request content
    ///
    /// The headers listed in the authorization decide what gets reconstructed, they have to cover
    /// every header the challenge requires. The reason of a failure is never reported.
    #[instrument(skip_all)]
    pub fn verify(
        &self,
        challenge: &Challenge,
        content: &RequestContent,
        authorization: Option<&Authorization>,
    ) -> bool {
        let Some(authorization) = authorization else {
            debug!("missing authorization");
            return false;
        };

        if !is_subset(challenge.headers(), authorization.headers()) {
            debug!("authorization doesn't cover the required headers");
            return false;
        }

        if !challenge.accepts(authorization.algorithm()) {
            debug!(algorithm = %authorization.algorithm(), "algorithm not accepted");
            return false;
        }

        let Some(key) = self.keychain.find_by_id(authorization.key_id()) else {
            debug!(key_id = authorization.key_id(), "unknown key");
            return false;
        };

        if !key.algorithms().contains(&authorization.algorithm()) {
            debug!(algorithm = %authorization.algorithm(), "key doesn't support algorithm");
            return false;
        }

        if let Some(max_age) = self.max_age {
            if !is_fresh(content, authorization, max_age) {
                return false;
            }
        }

        let signing_string = match content.signing_string(authorization.headers()) {
            Ok(signing_string) => signing_string,
            Err(error) => {
                debug!(%error, "couldn't reconstruct signing string");
                return false;
            }
        };

        let is_valid = key.verify(
            authorization.algorithm(),
            signing_string.as_bytes(),
            authorization.signature(),
        );

        if !is_valid {
            debug!(key_id = authorization.key_id(), "signature mismatch");
        }

        is_valid
    }
}
