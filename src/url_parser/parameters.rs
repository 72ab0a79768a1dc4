use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::trace;

use crate::error::UrlError;

/// Characters left as-is in composed keys and values, same as `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Output of splitting the query string and fragment off a raw URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedParameters {
    /// Decoded key/value pairs in the order they appear.
    pub parameters: Vec<(String, String)>,
    /// Text after `#`, without the `#`.
    pub fragment: String,
    /// Everything before the query and fragment.
    pub url_without_parameters: String,
}

/// Splits the fragment and query string off `url` and decodes the query
///
/// The fragment is cut at the first `#`, then the query at the first `?` of
/// what remains. A query chunk without `=` gets an empty value. Repeated keys
/// are kept, in order.
pub fn extract_parameters(url: &str) -> Result<ExtractedParameters, UrlError> {
    let mut extracted = ExtractedParameters::default();

    let mut rest = url;
    if let Some(pound_sign) = rest.find('#') {
        extracted.fragment = rest[pound_sign + 1..].to_string();
        rest = &rest[..pound_sign];
        trace!("Extracted fragment: {}", extracted.fragment);
    }

    if let Some(question_mark) = rest.find('?') {
        for chunk in rest[question_mark + 1..].split('&') {
            let (key, value) = chunk.split_once('=').unwrap_or((chunk, ""));
            extracted
                .parameters
                .push((decode_component(key)?, decode_component(value)?));
        }
        trace!("Extracted {} query parameters", extracted.parameters.len());
        rest = &rest[..question_mark];
    }

    extracted.url_without_parameters = rest.to_string();
    Ok(extracted)
}

/// Percent-decodes one query key or value, then turns its first `+` into a space
///
/// Only the first `+` is replaced, and only after decoding, so `%2B` can end
/// up as a space too. Existing callers depend on this exact behavior.
pub fn decode_component(raw: &str) -> Result<String, UrlError> {
    let bytes = raw.as_bytes();
    for (position, _) in raw.match_indices('%') {
        match bytes.get(position + 1..position + 3) {
            Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => {}
            _ => {
                return Err(UrlError::MalformedEscape {
                    input: raw.to_string(),
                    position,
                })
            }
        }
    }

    let decoded = urlencoding::decode(raw).map_err(|source| UrlError::InvalidUtf8 {
        input: raw.to_string(),
        source,
    })?;
    Ok(decoded.replacen('+', " ", 1))
}

/// Rebuilds `?k=v&k=v#fragment` from the ordered parameters and the fragment
///
/// Keys and values are percent-encoded except for ASCII letters, digits and
/// `- _ . ! ~ * ' ( )`. With no parameters the query part is
/// empty; the fragment is still appended when present.
pub fn compose_parameters(parameters: &[(String, String)], fragment: &str) -> String {
    let mut composed = String::new();
    for (i, (key, value)) in parameters.iter().enumerate() {
        composed.push(if i == 0 { '?' } else { '&' });
        composed.extend(utf8_percent_encode(key, COMPONENT));
        composed.push('=');
        composed.extend(utf8_percent_encode(value, COMPONENT));
    }
    if !fragment.is_empty() {
        composed.push('#');
        composed.push_str(fragment);
    }
    composed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_extract_query_and_fragment() {
        let extracted = extract_parameters("http://a.com/p?x=1&y=2#frag").unwrap();
        assert_eq!(extracted.url_without_parameters, "http://a.com/p");
        assert_eq!(extracted.fragment, "frag");
        assert_eq!(extracted.parameters, vec![pair("x", "1"), pair("y", "2")]);
    }

    #[test]
    fn test_question_mark_inside_fragment_is_not_a_query() {
        let extracted = extract_parameters("http://a.com/#top?x=1").unwrap();
        assert_eq!(extracted.fragment, "top?x=1");
        assert!(extracted.parameters.is_empty());
        assert_eq!(extracted.url_without_parameters, "http://a.com/");
    }

    #[test]
    fn test_value_split_at_first_equals() {
        let extracted = extract_parameters("/?expr=a=b&flag").unwrap();
        assert_eq!(extracted.parameters, vec![pair("expr", "a=b"), pair("flag", "")]);
    }

    #[test]
    fn test_empty_query_yields_one_empty_pair() {
        let extracted = extract_parameters("/path?").unwrap();
        assert_eq!(extracted.parameters, vec![pair("", "")]);
        assert_eq!(extracted.url_without_parameters, "/path");
    }

    #[test]
    fn test_no_delimiters() {
        let extracted = extract_parameters("a.com/x").unwrap();
        assert_eq!(extracted.url_without_parameters, "a.com/x");
        assert!(extracted.parameters.is_empty());
        assert!(extracted.fragment.is_empty());
    }

    #[test]
    fn test_decode_replaces_only_first_plus() {
        assert_eq!(decode_component("a+b+c").unwrap(), "a b+c");
        assert_eq!(decode_component("%2B1").unwrap(), " 1");
        assert_eq!(decode_component("caf%C3%A9").unwrap(), "café");
        assert_eq!(decode_component("a%20b").unwrap(), "a b");
    }

    #[test]
    fn test_decode_rejects_malformed_escapes() {
        let err = decode_component("100%").unwrap_err();
        assert!(matches!(err, UrlError::MalformedEscape { position: 3, .. }));
        assert!(err.is_decode_error());

        assert!(decode_component("%zz").is_err());
        assert!(decode_component("%4").is_err());
        assert!(extract_parameters("/?q=%G1").is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_component("%FF%FE").unwrap_err();
        assert!(matches!(err, UrlError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_compose_parameters() {
        let parameters = vec![pair("x", "1"), pair("a b", "c&d")];
        assert_eq!(compose_parameters(&parameters, ""), "?x=1&a%20b=c%26d");
        assert_eq!(compose_parameters(&parameters, "top"), "?x=1&a%20b=c%26d#top");
        assert_eq!(compose_parameters(&[], "top"), "#top");
        assert_eq!(compose_parameters(&[], ""), "");
    }

    #[test]
    fn test_compose_leaves_uri_component_marks_unencoded() {
        let parameters = vec![pair("q", "(it's)!*"), pair("t~x", "a-b_c.d")];
        assert_eq!(compose_parameters(&parameters, ""), "?q=(it's)!*&t~x=a-b_c.d");

        let parameters = vec![pair("path", "/a b?c#d"), pair("name", "Jürgen")];
        assert_eq!(
            compose_parameters(&parameters, ""),
            "?path=%2Fa%20b%3Fc%23d&name=J%C3%BCrgen"
        );
    }

    #[test]
    fn test_compose_keeps_duplicates_and_empty_values() {
        let parameters = vec![pair("a", "1"), pair("a", "2"), pair("flag", "")];
        assert_eq!(compose_parameters(&parameters, ""), "?a=1&a=2&flag=");
    }
}
