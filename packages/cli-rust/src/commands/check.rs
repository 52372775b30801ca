//! check command - Report whether a host is already trusted

use anyhow::Result;
use clap::Args;
use console::style;
use knownhosts_trust_core::{KnownHosts, TrustConfig};

use crate::output::trust_style;

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Host to look up (`host` or `host:port`)
    pub host: String,
}

/// Check a host against the known_hosts file
///
/// Exits with status 1 when the host is not trusted, so scripts can branch
/// on the result.
pub fn cmd_check(args: &CheckArgs, config: &TrustConfig, quiet: bool) -> Result<()> {
    let known_hosts = KnownHosts::from_config(config)?;
    let trusted = known_hosts.contains(&args.host)?;

    if !quiet {
        println!(
            "{} is {} in {}",
            style(&args.host).cyan(),
            trust_style(trusted),
            style(known_hosts.path().display()).dim()
        );
    }

    if !trusted {
        std::process::exit(1);
    }
    Ok(())
}
