use crate::{challenge::normalise_headers, params, Algorithm, SCHEME};
use std::fmt;

/// Signed request artifact sent by the client in the `Authorization` header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authorization {
    key_id: String,
    algorithm: Algorithm,
    headers: Vec<String>,
    signature: Vec<u8>,
}

impl Authorization {
    /// Construct a new authorization
    ///
    /// Header names are lowercased and de-duplicated. An empty header list falls back to [`crate::DEFAULT_HEADERS`].
    pub fn new<K, H, S>(key_id: K, algorithm: Algorithm, headers: H, signature: Vec<u8>) -> Self
    where
        K: Into<String>,
        H: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            key_id: key_id.into(),
            algorithm,
            headers: normalise_headers(headers),
            signature,
        }
    }

    /// Parse an authorization header value
    ///
    /// Returns `None` if the value is malformed, if `keyId`, `algorithm` or `signature` are missing,
    /// if the algorithm is unknown or if the signature isn't valid Base64
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let params = params::Params::parse(params::strip_scheme(input))?;

        let key_id = params.get("keyId")?;
        let algorithm = params.get("algorithm")?.parse().ok()?;
        let signature = base64_simd::STANDARD
            .decode_to_vec(params.get("signature")?)
            .ok()?;

        let headers = params.get("headers").unwrap_or_default();

        Some(Self {
            key_id: key_id.to_string(),
            algorithm,
            headers: normalise_headers(headers.split_whitespace()),
            signature,
        })
    }

    /// Fingerprint of the key the request was signed with
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Algorithm the request was signed with
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Headers covered by the signature, in signing order
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Raw signature bytes
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Header value including the auth scheme, ready to be sent as `Authorization`
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{SCHEME} {self}")
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = String::new();
        params::write_quoted(&mut buffer, "keyId", &self.key_id);
        buffer.push(' ');
        params::write_quoted(&mut buffer, "algorithm", self.algorithm.as_str());
        buffer.push(' ');
        params::write_quoted(&mut buffer, "headers", &self.headers.join(" "));
        buffer.push(' ');
        params::write_quoted(
            &mut buffer,
            "signature",
            &base64_simd::STANDARD.encode_to_string(&self.signature),
        );

        f.write_str(&buffer)
    }
}
