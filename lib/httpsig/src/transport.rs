//!
//! Glue between the signature types and the `http` request/response model
//!
//! Signatures travel in the `Authorization` header, challenges in the `WWW-Authenticate` header
//! of a `401 Unauthorized` response
//!

use crate::{Authorization, Challenge, RequestContent, Result, Signer, Verifier};
use http::{
    header::{AUTHORIZATION, DATE, WWW_AUTHENTICATE},
    uri::PathAndQuery,
    HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode,
};
use std::time::SystemTime;
use tracing::{debug, instrument};

fn first_parsed<T, F>(headers: &HeaderMap, name: &HeaderName, parse: F) -> Option<T>
where
    F: Fn(&str) -> Option<T>,
{
    headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse)
}

/// Capture the signable parts of the request
///
/// Headers named in `ignore_headers` (case-insensitive) are left out, as are header values that aren't valid UTF-8
pub fn request_content<B>(req: &Request<B>, ignore_headers: &[&str]) -> Result<RequestContent> {
    let path = req
        .uri()
        .path_and_query()
        .map_or("/", PathAndQuery::as_str);

    let mut builder = RequestContent::builder();
    builder
        .request_target(req.method().as_str(), path)
        .request_line(format!("{} {path} {:?}", req.method(), req.version()));

    for (name, value) in req.headers() {
        if ignore_headers
            .iter()
            .any(|ignored| name.as_str().eq_ignore_ascii_case(ignored))
        {
            continue;
        }

        match value.to_str() {
            Ok(value) => {
                builder.header(name.as_str(), value);
            }
            Err(..) => debug!(header = %name, "skipping non UTF-8 header value"),
        }
    }

    builder.build()
}

/// First `Authorization` header value that parses as a signature
#[must_use]
pub fn authorization(headers: &HeaderMap) -> Option<Authorization> {
    first_parsed(headers, &AUTHORIZATION, Authorization::parse)
}

/// First `WWW-Authenticate` header value that parses as a signature challenge
#[must_use]
pub fn challenge(headers: &HeaderMap) -> Option<Challenge> {
    first_parsed(headers, &WWW_AUTHENTICATE, Challenge::parse)
}

/// Set the `Authorization` header, replacing any previous value
pub fn attach_authorization(headers: &mut HeaderMap, authorization: &Authorization) -> Result<()> {
    let value = HeaderValue::from_str(&authorization.header_value())?;
    headers.insert(AUTHORIZATION, value);
    Ok(())
}

/// `401 Unauthorized` response carrying the challenge
pub fn challenge_response(challenge: &Challenge) -> Result<Response<()>> {
    let mut response = Response::new(());
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response.headers_mut().insert(
        WWW_AUTHENTICATE,
        HeaderValue::from_str(&challenge.header_value())?,
    );

    Ok(response)
}

/// Sign the request in place
///
/// Adds a `Date` header with the current time if the request doesn't carry one yet
#[instrument(skip_all, fields(method = %req.method(), uri = %req.uri()))]
pub fn sign_request<B>(signer: &mut Signer, req: &mut Request<B>) -> Result<Authorization> {
    if !req.headers().contains_key(DATE) {
        let date = HeaderValue::from_str(&httpdate::fmt_http_date(SystemTime::now()))?;
        req.headers_mut().insert(DATE, date);
    }

    let content = request_content(req, &[])?;
    let authorization = signer.sign(&content)?;
    attach_authorization(req.headers_mut(), &authorization)?;

    Ok(authorization)
}

/// Verify the request against the challenge
#[instrument(skip_all, fields(method = %req.method(), uri = %req.uri()))]
pub fn verify_request<B>(
    verifier: &Verifier,
    challenge: &Challenge,
    req: &Request<B>,
    ignore_headers: &[&str],
) -> bool {
    let content = match request_content(req, ignore_headers) {
        Ok(content) => content,
        Err(error) => {
            debug!(%error, "couldn't capture request content");
            return false;
        }
    };

    let authorization = authorization(req.headers());
    verifier.verify(challenge, &content, authorization.as_ref())
}

#[cfg(test)]
mod test {
    use crate::{keychain::test::keychain, Algorithm, Challenge, Signer, Verifier};
    use http::{
        header::{AUTHORIZATION, DATE, WWW_AUTHENTICATE},
        HeaderMap, HeaderValue, Request, StatusCode,
    };

    fn request() -> Request<()> {
        Request::builder()
            .method("POST")
            .uri("https://example.com/inbox?page=2")
            .header("Host", "example.com")
            .header("X-Forwarded-For", "10.0.0.1")
            .header("X-Forwarded-For", "10.0.0.2")
            .header("Content-Type", HeaderValue::from_bytes(b"\xfftext").unwrap())
            .body(())
            .unwrap()
    }

    #[test]
    fn request_content() {
        let content = super::request_content(&request(), &["X-Forwarded-For"]).unwrap();

        assert_eq!(content.request_target(), "post /inbox?page=2");
        assert_eq!(content.request_line(), "POST /inbox?page=2 HTTP/1.1");
        assert_eq!(content.header("host"), Some("example.com"));
        assert!(content.header("x-forwarded-for").is_none());
        assert!(content.header("content-type").is_none());

        let content = super::request_content(&request(), &[]).unwrap();
        assert_eq!(
            content.header_values("x-forwarded-for"),
            ["10.0.0.1", "10.0.0.2"]
        );
    }

    #[test]
    fn challenge_response() {
        let challenge = Challenge::new("example", ["(request-target)", "date"], [Algorithm::Ed25519]);
        let response = super::challenge_response(&challenge).unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(super::challenge(response.headers()), Some(challenge));
    }

    #[test]
    fn first_parsable_value_wins() {
        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.append(
            AUTHORIZATION,
            HeaderValue::from_static(r#"Signature keyId="k1" algorithm="rsa-sha256" signature="3q2+7w==""#),
        );
        headers.append(
            WWW_AUTHENTICATE,
            HeaderValue::from_static(r#"Basic realm="other""#),
        );

        assert_eq!(super::authorization(&headers).unwrap().key_id(), "k1");
        assert!(super::challenge(&headers).is_none());
    }

    #[test]
    fn sign_and_verify() {
        let challenge = Challenge::new(
            "example",
            ["(request-target)", "host", "date"],
            Algorithm::ALL.iter().copied(),
        );

        let mut signer = Signer::new(keychain());
        signer.rotate_keys(&challenge).unwrap();

        let mut req = request();
        let authorization = super::sign_request(&mut signer, &mut req).unwrap();
        assert!(req.headers().contains_key(DATE));
        assert_eq!(super::authorization(req.headers()), Some(authorization));

        let verifier = Verifier::new(keychain());
        assert!(super::verify_request(&verifier, &challenge, &req, &[]));

        // Proxies rewriting an ignored header don't break the signature
        req.headers_mut()
            .insert("x-forwarded-for", HeaderValue::from_static("192.168.0.1"));
        assert!(super::verify_request(&verifier, &challenge, &req, &["x-forwarded-for"]));

        req.headers_mut()
            .insert("host", HeaderValue::from_static("evil.example"));
        assert!(!super::verify_request(&verifier, &challenge, &req, &[]));
    }

    #[test]
    fn sign_keeps_existing_date() {
        let mut req = request();
        req.headers_mut().insert(
            DATE,
            HeaderValue::from_static("Sun, 05 Jan 2014 21:31:40 GMT"),
        );

        let authorization = super::sign_request(&mut Signer::new(keychain()), &mut req).unwrap();
        assert_eq!(
            authorization.signature(),
            b"date: Sun, 05 Jan 2014 21:31:40 GMT"
        );
    }

    #[test]
    fn unsigned_request() {
        let challenge = Challenge::new("example", ["date"], Algorithm::ALL.iter().copied());
        assert!(!super::verify_request(
            &Verifier::new(keychain()),
            &challenge,
            &request(),
            &[]
        ));
    }
}
