use tracing::{debug, trace};

use super::context::UrlContext;
use super::url_validator::validate_url;
use crate::error::UrlError;

const SCHEME_SEPARATOR: &str = "://";

/// Scheme, host, port and path of a URL whose query and fragment are gone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLocation {
    pub scheme: String,
    pub host: String,
    pub port: u32,
    pub path: String,
}

/// Port implied by a scheme, `0` for schemes without one.
pub fn default_port_for_scheme(scheme: &str) -> u32 {
    match scheme {
        "http" => 80,
        "https" => 443,
        _ => 0,
    }
}

/// Scheme implied by a port, empty for ports without one.
pub fn default_scheme_for_port(port: u32) -> &'static str {
    match port {
        80 => "http",
        443 => "https",
        _ => "",
    }
}

/// Splits `url` into scheme, host, port and path
///
/// Anything the string leaves out comes from `previous`: an empty host is
/// inherited, a missing `:port` is inherited, and a missing scheme is taken
/// from `previous.scheme` or, when that is empty too, guessed from the port.
/// A port still at `0` afterwards becomes the scheme's default. Port text is
/// read the way `parseInt` reads it: leading whitespace and a `+` are skipped,
/// then the leading digits are taken. Text without digits counts as missing
/// (`0`). Ports above 65535 are kept as written.
///
/// # Errors
/// * [`UrlError::EmptyInput`] if `url` is empty. Nothing else fails.
pub fn parse_without_parameters(
    url: &str,
    previous: &UrlContext,
) -> Result<ParsedLocation, UrlError> {
    validate_url(url)?;

    let (mut scheme, offset) = match url.find(SCHEME_SEPARATOR) {
        Some(i) => (url[..i].to_string(), i + SCHEME_SEPARATOR.len()),
        None => (String::new(), 0),
    };
    trace!("Scheme '{}' ends at offset {}", scheme, offset);

    // user:pass@host is not supported; the first colon always starts a port.
    let rest = &url[offset..];
    let colon = rest.find(':').unwrap_or(rest.len());
    let slash = rest.find('/').unwrap_or(rest.len());

    let mut host = rest[..colon.min(slash)].to_string();
    if host.is_empty() {
        debug!("No host in '{}', inheriting '{}'", url, previous.host);
        host = previous.host.clone();
    }

    let mut port = if colon < slash {
        parse_port(&rest[colon + 1..])
    } else {
        previous.port
    };

    let mut path = rest[slash..].to_string();
    if path.is_empty() {
        path.push('/');
    }

    if scheme.is_empty() {
        scheme = if previous.scheme.is_empty() {
            default_scheme_for_port(port).to_string()
        } else {
            previous.scheme.clone()
        };
        debug!("No scheme in '{}', using '{}'", url, scheme);
    }

    if port == 0 {
        port = default_port_for_scheme(&scheme);
    }

    Ok(ParsedLocation {
        scheme,
        host,
        port,
        path,
    })
}

/// Leading decimal digits of `text` as a port.
///
/// `0` if there are no digits, if the number is negative, or if it does not
/// fit in a `u32`.
fn parse_port(text: &str) -> u32 {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().unwrap_or(0)
}

/// Rebuilds `scheme://host[:port]path`, or just the path for a relative URL
///
/// The port is written only when it differs from the scheme's default, and
/// the `scheme://` prefix only when the scheme is known.
pub fn compose_without_parameters(scheme: &str, host: &str, port: u32, path: &str) -> String {
    if host.is_empty() {
        return path.to_string();
    }

    let mut composed = String::new();
    if !scheme.is_empty() {
        composed.push_str(scheme);
        composed.push_str(SCHEME_SEPARATOR);
    }
    composed.push_str(host);
    if port != default_port_for_scheme(scheme) {
        composed.push(':');
        composed.push_str(&port.to_string());
    }
    composed.push_str(path);
    composed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> ParsedLocation {
        parse_without_parameters(url, &UrlContext::default()).unwrap()
    }

    #[test]
    fn test_full_url() {
        let parsed = parse("https://example.com:8443/a/b");
        assert_eq!(parsed.scheme, "https");
        assert_eq!(parsed.host, "example.com");
        assert_eq!(parsed.port, 8443);
        assert_eq!(parsed.path, "/a/b");
    }

    #[test]
    fn test_scheme_defaults_port() {
        assert_eq!(parse("http://example.com/x").port, 80);
        assert_eq!(parse("https://example.com/x").port, 443);
        assert_eq!(parse("ftp://example.com/x").port, 0);
    }

    #[test]
    fn test_missing_scheme_uses_previous() {
        let parsed = parse("example.com:8080/x");
        assert_eq!(parsed.scheme, "http");
        assert_eq!(parsed.host, "example.com");
        assert_eq!(parsed.port, 8080);
        assert_eq!(parsed.path, "/x");
    }

    #[test]
    fn test_scheme_inferred_from_port_without_previous_scheme() {
        let previous = UrlContext::new("", "", 0);
        let parsed = parse_without_parameters("example.com:443/x", &previous).unwrap();
        assert_eq!(parsed.scheme, "https");
        assert_eq!(parsed.port, 443);

        let parsed = parse_without_parameters("example.com:80", &previous).unwrap();
        assert_eq!(parsed.scheme, "http");

        let parsed = parse_without_parameters("example.com:9000", &previous).unwrap();
        assert_eq!(parsed.scheme, "");
        assert_eq!(parsed.port, 9000);

        let parsed = parse_without_parameters("example.com", &previous).unwrap();
        assert_eq!(parsed.scheme, "");
        assert_eq!(parsed.port, 0);
    }

    #[test]
    fn test_empty_path_becomes_root() {
        assert_eq!(parse("http://example.com").path, "/");
        assert_eq!(parse("http://example.com:81").path, "/");
    }

    #[test]
    fn test_relative_path_inherits_previous() {
        let previous = UrlContext::new("https", "a.com", 9000);
        let parsed = parse_without_parameters("/new/path", &previous).unwrap();
        assert_eq!(parsed.scheme, "https");
        assert_eq!(parsed.host, "a.com");
        assert_eq!(parsed.port, 9000);
        assert_eq!(parsed.path, "/new/path");
    }

    #[test]
    fn test_non_numeric_port_falls_back_to_default() {
        assert_eq!(parse("http://example.com:abc/x").port, 80);
        assert_eq!(parse("https://example.com:/x").port, 443);
        assert_eq!(parse("http://example.com:8080abc/x").port, 8080);
        assert_eq!(parse("http://example.com:-8080/x").port, 80);
    }

    #[test]
    fn test_port_text_read_like_parse_int() {
        assert_eq!(parse("http://a.com: 8080/x").port, 8080);
        assert_eq!(parse("http://a.com:\t+81/x").port, 81);
        assert_eq!(parse("http://a.com:99999999999/x").port, 80);
    }

    #[test]
    fn test_out_of_range_port_is_kept() {
        let parsed = parse("http://a.com:70000/x");
        assert_eq!(parsed.port, 70000);
        assert_eq!(
            compose_without_parameters(&parsed.scheme, &parsed.host, parsed.port, &parsed.path),
            "http://a.com:70000/x"
        );
    }

    #[test]
    fn test_colon_after_slash_is_path() {
        let previous = UrlContext::new("http", "", 8080);
        let parsed = parse_without_parameters("http://a.com/x:y", &previous).unwrap();
        assert_eq!(parsed.host, "a.com");
        assert_eq!(parsed.port, 8080);
        assert_eq!(parsed.path, "/x:y");
    }

    #[test]
    fn test_empty_input_fails() {
        let err = parse_without_parameters("", &UrlContext::default()).unwrap_err();
        assert!(matches!(err, UrlError::EmptyInput));
    }

    #[test]
    fn test_compose() {
        assert_eq!(compose_without_parameters("http", "a.com", 80, "/x"), "http://a.com/x");
        assert_eq!(compose_without_parameters("http", "a.com", 8080, "/x"), "http://a.com:8080/x");
        assert_eq!(compose_without_parameters("https", "a.com", 443, "/"), "https://a.com/");
        assert_eq!(compose_without_parameters("https", "a.com", 80, "/"), "https://a.com:80/");
        assert_eq!(compose_without_parameters("", "a.com", 9000, "/"), "a.com:9000/");
        assert_eq!(compose_without_parameters("", "a.com", 0, "/"), "a.com/");
        assert_eq!(compose_without_parameters("http", "", 80, "/just/a/path"), "/just/a/path");
    }

    #[test]
    fn test_default_tables_are_symmetric() {
        for scheme in ["http", "https"] {
            assert_eq!(default_scheme_for_port(default_port_for_scheme(scheme)), scheme);
        }
        assert_eq!(default_scheme_for_port(8080), "");
        assert_eq!(default_port_for_scheme("gopher"), 0);
    }
}
