//! Command line and environment handling

use clap::Parser;
use ddns_core::{AddressSource, Error, IpFamilies, Result, UpdateConfig};
use std::time::Duration;
use tracing::Level;

/// Environment variable holding the Cloudflare API token
pub const TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// Environment variable selecting the log level
pub const LOG_LEVEL_ENV: &str = "CFDDNS_LOG_LEVEL";

/// Point a Cloudflare A/AAAA record at this host's address
#[derive(Debug, Parser)]
#[command(name = "cfddns", version, about)]
pub struct Cli {
    /// Zone the record lives in (e.g. example.com)
    pub zone: String,

    /// Report what would change without writing anything
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Use the address seen by an external echo service instead of local interfaces
    #[arg(short = 'e', long)]
    pub external: bool,

    /// Host label of the record [default: the OS hostname]
    #[arg(short = 'n', long)]
    pub hostname: Option<String>,

    /// Only consider addresses on this interface
    #[arg(short = 'i', long)]
    pub interface: Option<String>,

    /// Update the A record only
    #[arg(short = '4', long)]
    pub ipv4: bool,

    /// Update the AAAA record only
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Label placed before the hostname
    #[arg(short = 'p', long)]
    pub prefix: Option<String>,

    /// Label placed between the hostname and the zone
    #[arg(short = 's', long, visible_alias = "subdomain")]
    pub suffix: Option<String>,

    /// Log at debug level
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Per-request HTTP timeout in seconds [default: 30 for the API, 10 for the echo service]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Build the run configuration for `hostname`
    pub fn update_config(&self, hostname: String) -> UpdateConfig {
        let source = if self.external {
            AddressSource::External
        } else {
            AddressSource::interface(self.interface.clone())
        };

        UpdateConfig::new(self.zone.clone(), hostname)
            .with_prefix(self.prefix.clone())
            .with_suffix(self.suffix.clone())
            .with_families(IpFamilies::from_flags(self.ipv4, self.ipv6))
            .with_source(source)
            .with_dry_run(self.dry_run)
    }

    /// Timeout override from `--timeout`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Resolve the log level from `--verbose` and the environment value
pub fn log_level(verbose: bool, env_value: Option<&str>) -> Result<Level> {
    if verbose {
        return Ok(Level::DEBUG);
    }

    match env_value.map(str::to_lowercase).as_deref() {
        None | Some("") | Some("warn") => Ok(Level::WARN),
        Some("trace") => Ok(Level::TRACE),
        Some("debug") => Ok(Level::DEBUG),
        Some("info") => Ok(Level::INFO),
        Some("error") => Ok(Level::ERROR),
        Some(other) => Err(Error::config(format!(
            "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            LOG_LEVEL_ENV, other
        ))),
    }
}

/// Validate the API token read from the environment
pub fn api_token(env_value: Option<String>) -> Result<String> {
    match env_value {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(Error::config(format!(
            "{} is required. Set it via: export {}=your_token",
            TOKEN_ENV, TOKEN_ENV
        ))),
    }
}
