use crate::{params, Algorithm, DEFAULT_HEADERS, SCHEME};
use itertools::Itertools;
use std::fmt;
use tracing::debug;

/// Lowercase and de-duplicate header names, falling back to the default headers if none are left
pub(crate) fn normalise_headers<I, S>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let headers: Vec<String> = headers
        .into_iter()
        .map(|name| name.as_ref().trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .unique()
        .collect();

    if headers.is_empty() {
        DEFAULT_HEADERS.iter().map(ToString::to_string).collect()
    } else {
        headers
    }
}

/// Server-issued parameters a signature has to satisfy
///
/// Sent in the `WWW-Authenticate` header of a `401` response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    realm: String,
    headers: Vec<String>,
    algorithms: Vec<Algorithm>,
}

impl Challenge {
    /// Construct a new challenge
    ///
    /// Header names are lowercased and de-duplicated. An empty header list falls back to [`DEFAULT_HEADERS`].
    pub fn new<R, H, S, A>(realm: R, headers: H, algorithms: A) -> Self
    where
        R: Into<String>,
        H: IntoIterator<Item = S>,
        S: AsRef<str>,
        A: IntoIterator<Item = Algorithm>,
    {
        Self {
            realm: realm.into(),
            headers: normalise_headers(headers),
            algorithms: algorithms.into_iter().unique().collect(),
        }
    }

    /// Parse a challenge header value
    ///
    /// Returns `None` if the value is malformed or the realm is missing.
    /// A missing `headers` parameter means [`DEFAULT_HEADERS`], a missing `algorithms` parameter means all supported algorithms.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let params = params::Params::parse(params::strip_scheme(input))?;
        let realm = params.get("realm")?;

        let headers = params
            .get("headers")
            .map_or_else(|| normalise_headers(DEFAULT_HEADERS), |headers| {
                normalise_headers(headers.split_whitespace())
            });

        let algorithms = params.get("algorithms").map_or_else(
            || Algorithm::ALL.to_vec(),
            |algorithms| {
                algorithms
                    .split_whitespace()
                    .filter_map(|name| {
                        name.parse::<Algorithm>()
                            .inspect_err(|error| debug!(%error, "skipping challenge algorithm"))
                            .ok()
                    })
                    .unique()
                    .collect()
            },
        );

        Some(Self {
            realm: realm.to_string(),
            headers,
            algorithms,
        })
    }

    /// Name of the protection space
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Headers every signature has to cover, in the order they should be signed
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Acceptable signature algorithms
    #[must_use]
    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    /// Whether the challenge accepts the algorithm
    #[must_use]
    pub fn accepts(&self, algorithm: Algorithm) -> bool {
        self.algorithms.contains(&algorithm)
    }

    /// Header value including the auth scheme, ready to be sent as `WWW-Authenticate`
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{SCHEME} {self}")
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = String::new();
        params::write_quoted(&mut buffer, "realm", &self.realm);
        buffer.push(' ');
        params::write_quoted(&mut buffer, "headers", &self.headers.join(" "));
        buffer.push(' ');
        params::write_quoted(
            &mut buffer,
            "algorithms",
            &self.algorithms.iter().map(|algorithm| algorithm.as_str()).join(" "),
        );

        f.write_str(&buffer)
    }
}
