pub mod context;
pub mod parameters;
pub mod parser;
pub mod query;
pub mod url_validator;


use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::error::UrlError;
use context::{UrlContext, DEFAULT_SCHEME};
use parameters::{compose_parameters, extract_parameters};
use parser::{compose_without_parameters, parse_without_parameters};
use query::QueryParameters;

/// A URL split into scheme, host, port, path, query parameters and fragment
///
/// Only `http` and `https` are understood; other schemes are kept as text
/// with no default port. Values are built once by one of the `parse*`
/// constructors and never change afterwards, so the [`QueryParameters`]
/// lookup always matches [`Url::parameters`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Url {
    scheme: String,
    host: String,
    port: u32,
    path: String,
    parameters: Vec<(String, String)>,
    fragment: String,
    #[serde(skip)]
    query: QueryParameters,
    #[serde(skip)]
    url_without_parameters: String,
}

impl Default for Url {
    /// An empty URL: scheme `http`, path `/`, port `0`.
    ///
    /// The port stays `0` because no parsing took place.
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: String::new(),
            port: 0,
            path: "/".to_string(),
            parameters: Vec::new(),
            fragment: String::new(),
            query: QueryParameters::default(),
            url_without_parameters: String::new(),
        }
    }
}

impl Url {
    /// Parses `url` with the default previous context (`http`, no host, port 0).
    #[instrument(level = "trace", skip_all, fields(url = %url))]
    pub fn parse(url: &str) -> Result<Self, UrlError> {
        Self::parse_in_context(url, &UrlContext::default())
    }

    /// Parses `url`, taking missing parts from the given scheme, host and port
    ///
    /// Any of the three left as `None` falls back to its default.
    #[instrument(level = "trace", skip_all, fields(url = %url))]
    pub fn parse_with_defaults(
        url: &str,
        previous_scheme: Option<&str>,
        previous_host: Option<&str>,
        previous_port: Option<u32>,
    ) -> Result<Self, UrlError> {
        let context = UrlContext::with_defaults(previous_scheme, previous_host, previous_port);
        Self::parse_in_context(url, &context)
    }

    /// Parses `url` relative to an already parsed URL's scheme, host and port.
    #[instrument(level = "trace", skip_all, fields(url = %url, previous = %previous))]
    pub fn parse_relative_to(url: &str, previous: &Url) -> Result<Self, UrlError> {
        Self::parse_in_context(url, &previous.context())
    }

    /// Parses `url` against an explicit previous context
    ///
    /// The query string and fragment are split off first, so a `:` inside
    /// them is never taken for a port separator.
    ///
    /// # Errors
    /// * [`UrlError::EmptyInput`] if nothing is left once the query and
    ///   fragment are removed (this includes the empty string)
    /// * [`UrlError::MalformedEscape`] / [`UrlError::InvalidUtf8`] if a query
    ///   key or value cannot be percent-decoded
    pub fn parse_in_context(url: &str, previous: &UrlContext) -> Result<Self, UrlError> {
        trace!("Extracting query parameters and fragment");
        let extracted = extract_parameters(url)?;

        trace!("Parsing '{}'", extracted.url_without_parameters);
        let location = parse_without_parameters(&extracted.url_without_parameters, previous)?;

        let query = QueryParameters::new(&extracted.parameters);
        let parsed = Url {
            scheme: location.scheme,
            host: location.host,
            port: location.port,
            path: location.path,
            parameters: extracted.parameters,
            fragment: extracted.fragment,
            query,
            url_without_parameters: extracted.url_without_parameters,
        };
        debug!(
            "Parsed URL: scheme={} host={} port={} path={} parameters={}",
            parsed.scheme,
            parsed.host,
            parsed.port,
            parsed.path,
            parsed.parameters.len()
        );
        Ok(parsed)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Empty for a relative URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u32 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Query parameters in input order, duplicates included.
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Key/value lookup over [`Url::parameters`]; the last duplicate wins.
    pub fn query(&self) -> &QueryParameters {
        &self.query
    }

    /// The input with its query and fragment removed.
    pub fn url_without_parameters(&self) -> &str {
        &self.url_without_parameters
    }

    /// The previous context other URLs inherit from when parsed relative to this one.
    pub fn context(&self) -> UrlContext {
        UrlContext::new(self.scheme.as_str(), self.host.as_str(), self.port)
    }

    /// The canonical form: authority and path followed by query and fragment.
    pub fn compose_url(&self) -> String {
        let mut composed =
            compose_without_parameters(&self.scheme, &self.host, self.port, &self.path);
        composed.push_str(&self.compose_parameters());
        composed
    }

    /// Only the `?query#fragment` part, for appending to a known base.
    pub fn compose_parameters(&self) -> String {
        compose_parameters(&self.parameters, &self.fragment)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compose_url())
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl TryFrom<&str> for Url {
    type Error = UrlError;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        Url::parse(url)
    }
}
