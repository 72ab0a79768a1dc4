use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::url_parser::context::{UrlContext, DEFAULT_SCHEME};

/// Prefix of the environment variables read by [`ParserConfig::load`].
pub const ENV_PREFIX: &str = "NET_URL";

/// Previous context used when parsing URLs that have no base of their own
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Scheme given to URLs without `scheme://`.
    pub default_scheme: String,

    /// Host given to URLs without a host.
    pub default_host: String,

    /// Port given to URLs without `:port`; `0` leaves it to the scheme.
    pub default_port: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_scheme: DEFAULT_SCHEME.to_string(),
            default_host: String::new(),
            default_port: 0,
        }
    }
}

impl ParserConfig {
    /// Loads the configuration from defaults, an optional file, then `NET_URL_*` variables
    ///
    /// Later sources override earlier ones. The file format follows its
    /// extension (TOML, JSON, YAML, ...).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("default_scheme", defaults.default_scheme)?
            .set_default("default_host", defaults.default_host)?
            .set_default("default_port", i64::from(defaults.default_port))?;

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Invalid URL parser configuration")
    }

    pub fn context(&self) -> UrlContext {
        UrlContext::new(
            self.default_scheme.as_str(),
            self.default_host.as_str(),
            self.default_port,
        )
    }
}
