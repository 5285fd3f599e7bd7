//! Application configuration for the content resolver.
//!
//! An optional TOML file provides base values; CLI flags and environment
//! variables override file values, which override defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ResolverError, Result};

// ---------------------------------------------------------------------------
// Config structs (matching content-resolver.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Inbound listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Content and statistics backends.
    #[serde(default)]
    pub backends: BackendsConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:20020".into()
}

/// `[backends]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendsConfig {
    /// Base URL of the content service (zebedee).
    #[serde(default = "default_zebedee_url")]
    pub zebedee_url: String,

    /// Base URL of the statistics service (babbage). Time series are read
    /// from the content service when unset.
    #[serde(default)]
    pub babbage_url: Option<String>,

    /// Transport timeout applied to every backend request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Deadline for each concurrent resolution unit.
    #[serde(default = "default_task_timeout")]
    pub task_timeout_ms: u64,

    /// Depth requested from the taxonomy endpoint.
    #[serde(default = "default_taxonomy_depth")]
    pub taxonomy_depth: u32,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            zebedee_url: default_zebedee_url(),
            babbage_url: None,
            request_timeout_ms: default_request_timeout(),
            task_timeout_ms: default_task_timeout(),
            taxonomy_depth: default_taxonomy_depth(),
        }
    }
}

fn default_zebedee_url() -> String {
    "http://localhost:8082".into()
}
fn default_request_timeout() -> u64 {
    2_000
}
fn default_task_timeout() -> u64 {
    5_000
}
fn default_taxonomy_depth() -> u32 {
    2
}

// ---------------------------------------------------------------------------
// Runtime configs (derived from AppConfig after overrides are applied)
// ---------------------------------------------------------------------------

/// Runtime backend configuration with parsed URLs.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub zebedee_url: Url,
    pub babbage_url: Option<Url>,
    pub request_timeout: Duration,
}

impl TryFrom<&AppConfig> for GatewayConfig {
    type Error = ResolverError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        let zebedee_url = parse_base_url("zebedee_url", &config.backends.zebedee_url)?;
        let babbage_url = config
            .backends
            .babbage_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| parse_base_url("babbage_url", s))
            .transpose()?;

        Ok(Self {
            zebedee_url,
            babbage_url,
            request_timeout: Duration::from_millis(config.backends.request_timeout_ms),
        })
    }
}

/// Runtime settings for the aggregation engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deadline applied to each concurrent unit (taxonomy, breadcrumb, section).
    pub task_timeout: Duration,
    /// Depth passed to the taxonomy endpoint.
    pub taxonomy_depth: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for EngineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            task_timeout: Duration::from_millis(config.backends.task_timeout_ms),
            taxonomy_depth: config.backends.taxonomy_depth,
        }
    }
}

fn parse_base_url(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ResolverError::config(format!("invalid {field} {raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ResolverError::config(format!(
            "{field} must be http or https, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config from an optional file path. Returns defaults
/// when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => {
            tracing::debug!("no config file given, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ResolverError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ResolverError::config(format!("failed to parse {}: {e}", path.display()))
    })
}
