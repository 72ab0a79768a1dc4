use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors raised while building a [`Url`](crate::Url).
///
/// Only the absence of input, a wrongly shaped argument and an undecodable
/// query component are errors. Every other irregularity in a URL string is
/// resolved by falling back to a default.
#[derive(Debug, Error)]
pub enum UrlError {
    /// The part of the URL handed to the authority/path parser was empty.
    #[error("URL cannot be empty")]
    EmptyInput,

    /// A string-typed caller supplied an argument of the wrong shape.
    #[error("malformed argument `{name}`: {reason}")]
    MalformedArgument { name: &'static str, reason: String },

    /// A `%` in a query key or value was not followed by two hex digits.
    #[error("malformed percent-escape in `{input}` at byte {position}")]
    MalformedEscape { input: String, position: usize },

    /// Percent-decoding produced bytes that are not valid UTF-8.
    #[error("percent-decoded `{input}` is not valid UTF-8")]
    InvalidUtf8 {
        input: String,
        #[source]
        source: FromUtf8Error,
    },
}

impl UrlError {
    /// True for the two decoding failures of query components.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, UrlError::MalformedEscape { .. } | UrlError::InvalidUtf8 { .. })
    }
}
