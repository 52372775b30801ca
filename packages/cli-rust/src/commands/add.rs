//! add command - Scan and trust one or more hosts

use anyhow::{Result, bail};
use clap::Args;
use console::style;
use knownhosts_trust_core::{AddOutcome, KnownHosts, TrustConfig};

use crate::output::{CommandSpinner, show_trust_error};

/// Arguments for the add command
#[derive(Args)]
pub struct AddArgs {
    /// Hosts to trust (`host` or `host:port`)
    #[arg(required = true)]
    pub hosts: Vec<String>,
}

/// Trust each host, scanning keys for the ones not yet known
///
/// Every host is attempted; the command fails if any of them failed.
pub fn cmd_add(args: &AddArgs, config: &TrustConfig, quiet: bool) -> Result<()> {
    let known_hosts = KnownHosts::from_config(config)?;
    let mut failures = 0;

    for host in &args.hosts {
        let spinner = CommandSpinner::new_maybe(&format!("Scanning {host}..."), quiet);
        match known_hosts.add(host) {
            Ok(AddOutcome::Added) => spinner.success(&format!(
                "Added {} to {}",
                style(host).cyan(),
                known_hosts.path().display()
            )),
            Ok(_) => spinner.skipped(&format!("{} is already trusted", style(host).cyan())),
            Err(e) => {
                spinner.fail(&format!("Could not trust {}", style(host).cyan()));
                show_trust_error(&e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} hosts could not be trusted", args.hosts.len());
    }
    Ok(())
}
