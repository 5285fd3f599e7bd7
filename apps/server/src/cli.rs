//! Command-line flags, config merging, and tracing setup.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use content_resolver_shared::{AppConfig, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// content-resolver: compose home pages from the content and statistics backends.
#[derive(Parser, Debug)]
#[command(
    name = "content-resolver",
    version,
    about = "Resolve content pages by aggregating backend sub-resources.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Optional TOML config file. Flags and environment override its values.
    #[arg(long, env = "CONTENT_RESOLVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listener address, e.g. `:20020` or `127.0.0.1:20020`.
    #[arg(long, env = "BIND_ADDR")]
    pub bind_addr: Option<String>,

    /// Base URL of the content service.
    #[arg(long, env = "ZEBEDEE_URL")]
    pub zebedee_url: Option<String>,

    /// Base URL of the statistics service.
    #[arg(long, env = "BABBAGE_URL")]
    pub babbage_url: Option<String>,

    /// Transport timeout for each backend request, in milliseconds.
    #[arg(long, env = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Deadline for each concurrent resolution unit, in milliseconds.
    #[arg(long, env = "TASK_TIMEOUT_MS")]
    pub task_timeout_ms: Option<u64>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Load the config file (if any) and apply flag/env overrides on top.
    pub(crate) fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = load_config(self.config.as_deref()).wrap_err("loading config")?;
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(addr) = &self.bind_addr {
            config.server.bind_addr = normalize_bind_addr(addr);
        }
        if let Some(url) = &self.zebedee_url {
            config.backends.zebedee_url = url.clone();
        }
        if let Some(url) = &self.babbage_url {
            config.backends.babbage_url = Some(url.clone());
        }
        if let Some(ms) = self.request_timeout_ms {
            config.backends.request_timeout_ms = ms;
        }
        if let Some(ms) = self.task_timeout_ms {
            config.backends.task_timeout_ms = ms;
        }
    }
}

/// Accept the port-only form (`:20020`) by binding all interfaces.
fn normalize_bind_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "content_resolver=info",
        1 => "content_resolver=debug",
        _ => "content_resolver=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}
