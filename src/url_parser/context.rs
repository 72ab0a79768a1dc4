use crate::error::UrlError;

/// Scheme assumed when neither the URL nor the caller names one.
pub const DEFAULT_SCHEME: &str = "http";

/// The scheme, host and port a relative URL inherits missing components from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContext {
    pub scheme: String,
    pub host: String,
    /// `0` means "use the scheme default".
    pub port: u32,
}

impl Default for UrlContext {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: String::new(),
            port: 0,
        }
    }
}

impl UrlContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u32) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// Builds a context where any omitted part falls back to the default.
    pub fn with_defaults(scheme: Option<&str>, host: Option<&str>, port: Option<u32>) -> Self {
        let defaults = Self::default();
        Self {
            scheme: scheme.map(str::to_string).unwrap_or(defaults.scheme),
            host: host.map(str::to_string).unwrap_or(defaults.host),
            port: port.unwrap_or(defaults.port),
        }
    }

    /// Builds a context from untyped text, e.g. command-line flags or headers.
    ///
    /// Unlike URL parsing, which degrades a bad port to `0`, a port argument
    /// that is not a non-negative integer is rejected here.
    pub fn from_strs(
        scheme: Option<&str>,
        host: Option<&str>,
        port: Option<&str>,
    ) -> Result<Self, UrlError> {
        let port = match port {
            Some(text) => Some(text.trim().parse::<u32>().map_err(|e| {
                UrlError::MalformedArgument {
                    name: "previous_port",
                    reason: format!("expected an integer port, got `{}` ({})", text, e),
                }
            })?),
            None => None,
        };
        Ok(Self::with_defaults(scheme, host, port))
    }
}
