//! CLI module for status-collector
//!
//! Parses command-line flags and merges them over the file/environment
//! configuration.

use std::path::PathBuf;

use clap::Parser;
use status_collector_common::config::{CollectorConfig, MIN_PAGE_TIMEOUT_MARGIN_SECS};

use crate::error::CollectorResult;

/// Margin added on top of the per-request timeout when the page deadline has to grow
const PAGE_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Status collector - Aggregated status page for third-party services
#[derive(Parser, Debug, Default)]
#[command(name = "status-collector")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    STATUS_COLLECTOR_HOST                  Bind address (default: 0.0.0.0)
    STATUS_COLLECTOR_PORT                  Listen port (default: 8080)
    STATUS_COLLECTOR_REQUEST_TIMEOUT_SECS  Per-provider HTTP timeout (default: 5)
    STATUS_COLLECTOR_PAGE_TIMEOUT_SECS     Deadline for the whole page (default: 10)
    STATUS_COLLECTOR_CONFIG                Configuration file (TOML/JSON/YAML)
    STATUS_COLLECTOR_LOG_LEVEL             Log level (default: info, fallback: RUST_LOG)
    STATUS_COLLECTOR_LOG_DIR               Also write daily rolling log files here
"#)]
pub struct Cli {
    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Configuration file (format chosen by extension)
    #[arg(short, long, env = "STATUS_COLLECTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Per-provider HTTP timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Build the effective configuration
    ///
    /// Order: defaults, config file, `STATUS_COLLECTOR_*` variables, then
    /// command-line flags.
    pub fn resolve_config(&self) -> CollectorResult<CollectorConfig> {
        let mut config = CollectorConfig::load(self.config.as_deref())?;

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.request_timeout_secs = timeout_secs;
            let min_page_timeout = timeout_secs.saturating_add(MIN_PAGE_TIMEOUT_MARGIN_SECS);
            if config.page_timeout_secs < min_page_timeout {
                config.page_timeout_secs = timeout_secs.saturating_add(PAGE_TIMEOUT_MARGIN_SECS);
            }
        }

        config.validate()?;
        Ok(config)
    }
}
