//!
//! Canonical request content
//!

use crate::{error::SigningError, Error, Result, REQUEST_LINE, REQUEST_TARGET};
use std::{collections::BTreeMap, fmt::Write, time::SystemTime};

/// Immutable snapshot of the parts of a request that can be signed
///
/// Header names are matched case-insensitively. Every occurrence of a header is kept in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContent {
    method: String,
    path: String,
    request_line: String,
    headers: BTreeMap<String, Vec<String>>,
}

impl RequestContent {
    /// Return a builder for the request content
    #[must_use]
    pub fn builder() -> RequestContentBuilder {
        RequestContentBuilder::default()
    }

    /// HTTP method as it was supplied to the builder
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Path and query of the request
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of the `(request-target)` pseudo-header
    #[must_use]
    pub fn request_target(&self) -> String {
        format!("{} {}", self.method.to_lowercase(), self.path)
    }

    /// Literal request line
    #[must_use]
    pub fn request_line(&self) -> &str {
        &self.request_line
    }

    /// First value of the header
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).first().map(String::as_str)
    }

    /// All values of the header, in arrival order
    #[must_use]
    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Lowercased names of all headers present
    pub fn header_names(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(String::as_str)
    }

    /// Construct the string that gets signed for the given header selection
    ///
    /// One `name: value` line per selected name, in selection order, without a trailing new-line.
    /// Headers with multiple occurrences are joined with `", "`.
    pub fn signing_string<I, S>(&self, names: I) -> Result<String, SigningError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut signing_string = String::new();
        for name in names {
            let name = name.as_ref().to_ascii_lowercase();
            match name.as_str() {
                REQUEST_TARGET => {
                    let _ = writeln!(signing_string, "{name}: {}", self.request_target());
                }
                REQUEST_LINE => {
                    let _ = writeln!(signing_string, "{name}: {}", self.request_line);
                }
                header => {
                    let values = self.header_values(header);
                    if values.is_empty() {
                        return Err(SigningError::MissingHeader(header.to_string()));
                    }

                    let _ = writeln!(signing_string, "{header}: {}", values.join(", "));
                }
            }
        }

        // Remove the last new-line
        signing_string.pop();

        Ok(signing_string)
    }
}

/// Incremental builder of [`RequestContent`]
#[derive(Clone, Debug, Default)]
pub struct RequestContentBuilder {
    target: Option<(String, String)>,
    request_line: Option<String>,
    headers: BTreeMap<String, Vec<String>>,
}

impl RequestContentBuilder {
    /// Set the method and the path (including the query) of the request
    pub fn request_target<M, P>(&mut self, method: M, path: P) -> &mut Self
    where
        M: Into<String>,
        P: Into<String>,
    {
        self.target = Some((method.into(), path.into()));
        self
    }

    /// Set the literal request line
    ///
    /// Defaults to `{METHOD} {path} HTTP/1.1`
    pub fn request_line<L>(&mut self, line: L) -> &mut Self
    where
        L: Into<String>,
    {
        self.request_line = Some(line.into());
        self
    }

    /// Add an occurrence of a header
    pub fn header<N, V>(&mut self, name: N, value: V) -> &mut Self
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        self.headers
            .entry(name.as_ref().trim().to_ascii_lowercase())
            .or_default()
            .push(value.as_ref().trim().to_string());
        self
    }

    /// Replace the `date` header with the given point in time
    pub fn date(&mut self, time: SystemTime) -> &mut Self {
        self.headers
            .insert("date".into(), vec![httpdate::fmt_http_date(time)]);
        self
    }

    /// Replace the `date` header with the current time
    pub fn date_now(&mut self) -> &mut Self {
        self.date(SystemTime::now())
    }

    /// Finalise the request content
    pub fn build(&self) -> Result<RequestContent> {
        let (method, path) = self
            .target
            .clone()
            .ok_or(Error::Configuration("request target"))?;

        let request_line = self
            .request_line
            .clone()
            .unwrap_or_else(|| format!("{} {path} HTTP/1.1", method.to_uppercase()));

        Ok(RequestContent {
            method,
            path,
            request_line,
            headers: self.headers.clone(),
        })
    }
}
