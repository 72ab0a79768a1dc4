//! A small URL value type for HTTP clients and servers.
//!
//! [`Url`] splits a URL string into scheme, host, port, path, ordered query
//! parameters and fragment, inheriting anything left out from a previous
//! context, and composes those parts back into a canonical string.
//!
//! ```
//! use net_url::Url;
//!
//! let base = Url::parse("http://example.com:8080/index").unwrap();
//! let next = Url::parse_relative_to("/search?q=rust#top", &base).unwrap();
//! assert_eq!(next.host(), "example.com");
//! assert_eq!(next.query().get("q"), "rust");
//! assert_eq!(next.compose_url(), "http://example.com:8080/search?q=rust#top");
//! ```

pub mod config;
pub mod error;
pub mod url_parser;
pub mod utils;

pub use error::UrlError;
pub use url_parser::context::UrlContext;
pub use url_parser::parser::{default_port_for_scheme, default_scheme_for_port};
pub use url_parser::query::QueryParameters;
pub use url_parser::Url;
