//! Configuration: namespace, export format and daemon address.
//!
//! Loaded from an optional TOML file; any missing key takes its default.
//! `ROOMLIGHT_NAMESPACE`, `ROOMLIGHT_BIND` and `ROOMLIGHT_PORT` override the
//! file.
//!
//! ```toml
//! namespace = "http://example.org/"
//! format = "turtle"
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 8081
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GraphError};
use crate::export::ExportFormat;
use crate::resource::Namespace;
use crate::vocab::Vocabulary;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomlightConfig {
    /// IRI prefix for rooms, appliances, people and the vocabulary.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Format of the `rawRDF` text.
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Address the daemon listens on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_namespace() -> String {
    Namespace::DEFAULT_IRI.into()
}
fn default_bind() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8081
}

impl Default for RoomlightConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            format: ExportFormat::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `bind:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl RoomlightConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Load `path` if given, else defaults; then apply environment overrides.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `ROOMLIGHT_*` environment variables.
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a `key → value` lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(ns) = lookup("ROOMLIGHT_NAMESPACE") {
            self.namespace = ns;
        }
        if let Some(bind) = lookup("ROOMLIGHT_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = lookup("ROOMLIGHT_PORT") {
            self.server.port = port.parse().map_err(|e| ConfigError::Invalid {
                key: "ROOMLIGHT_PORT",
                message: format!("\"{port}\" is not a valid port: {e}"),
            })?;
        }
        Ok(())
    }

    /// Vocabulary for the configured namespace.
    pub fn vocabulary(&self) -> Result<Vocabulary, GraphError> {
        Ok(Vocabulary::new(Namespace::new(self.namespace.as_str())?))
    }
}
