// # cfddns - one-shot Cloudflare DDNS updater
//
// This binary is a THIN integration layer. All DNS and address logic lives
// in ddns-core; this file only:
// 1. Parses the command line and reads the environment
// 2. Sets up logging
// 3. Wires the Cloudflare provider and address sources into an `Updater`
// 4. Prints one line per family and maps failures to exit codes
//
// ## Environment
//
// - `CLOUDFLARE_API_TOKEN`: API token (required)
// - `CFDDNS_LOG_LEVEL`: trace, debug, info, warn (default), error
//
// ## Example
//
// ```bash
// export CLOUDFLARE_API_TOKEN=your_token
// cfddns --ipv4 --prefix home example.com
// ```

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use ddns_core::{AddressResolver, Outcome, Updater};
use ddns_ip_http::HttpIpSource;
use ddns_ip_local::{LocalInterfaces, local_hostname};
use ddns_provider_cloudflare::CloudflareProvider;
use std::env;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Success (including dry-run)
/// - 1: Configuration error
/// - 2: Runtime error (zone, address or provider failure)
///
/// Command line usage errors are reported by clap, which also exits with 2.
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Every requested family was processed
    Success = 0,
    /// Configuration error (missing token, invalid arguments or log level)
    ConfigError = 1,
    /// Runtime error
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl DdnsExitCode {
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ddns_core::Error>() {
            Some(e) if e.is_config() => DdnsExitCode::ConfigError,
            _ => DdnsExitCode::RuntimeError,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let env_level = env::var(cli::LOG_LEVEL_ENV).ok();
    let log_level = match cli::log_level(cli.verbose, env_level.as_deref()) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    match run(cli) {
        Ok(()) => DdnsExitCode::Success.into(),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = hint_for(&e) {
                eprintln!("Hint: {}", hint);
            }
            DdnsExitCode::for_error(&e).into()
        }
    }
}

/// Build the updater from the command line and run one pass
fn run(cli: Cli) -> Result<()> {
    let token = cli::api_token(env::var(cli::TOKEN_ENV).ok())?;

    let hostname = match cli.hostname.clone().filter(|h| !h.is_empty()) {
        Some(hostname) => hostname,
        None => local_hostname()?,
    };

    if cli.external && cli.interface.as_deref().is_some_and(|i| !i.is_empty()) {
        warn!("--interface is ignored when --external is set");
    }

    let config = cli.update_config(hostname);
    debug!("Run configuration: {:?}", config);

    let (provider, echo) = match cli.timeout() {
        Some(timeout) => (
            CloudflareProvider::with_timeout(token, timeout)?,
            HttpIpSource::with_timeout(timeout)?,
        ),
        None => (CloudflareProvider::new(token)?, HttpIpSource::new()?),
    };

    let resolver = AddressResolver::new(Box::new(echo), Box::new(LocalInterfaces::new()));
    let updater = Updater::new(Box::new(provider), resolver, config)?;

    // Single sequential pass; no worker threads needed
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let dry_run = updater.config().dry_run;
    runtime.block_on(updater.run(|_, outcome| print_outcome(outcome, dry_run)))?;

    Ok(())
}

/// Follow-up advice for address resolution failures
fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<ddns_core::Error>() {
        Some(ddns_core::Error::ExternalLookup(_)) => {
            Some("the echo service is unreachable; drop --external to use a local interface address")
        }
        Some(e) if e.is_address_resolution() => Some(
            "no usable local address; check --interface or use --external for the NAT address",
        ),
        _ => None,
    }
}

fn print_outcome(outcome: &Outcome, dry_run: bool) {
    if dry_run {
        println!("[DRY-RUN] {}", outcome);
    } else {
        println!("{}", outcome);
    }
}
