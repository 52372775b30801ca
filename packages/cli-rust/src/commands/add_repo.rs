//! add-repo command - Trust the hosts behind repository URLs
//!
//! This is what a job runner calls before cloning: SSH remotes get their
//! host keys recorded, everything else is left alone.

use anyhow::{Result, bail};
use clap::Args;
use console::style;
use knownhosts_trust_core::{AddOutcome, KnownHosts, TrustConfig};

use crate::output::{CommandSpinner, outcome_style, show_trust_error};

/// Arguments for the add-repo command
#[derive(Args)]
pub struct AddRepoArgs {
    /// Repository URLs (ssh://..., user@host:path, https://...)
    #[arg(required = true)]
    pub repositories: Vec<String>,
}

/// Trust the SSH host of each repository
///
/// URLs that cannot be parsed are reported and skipped; the clone may
/// still work if the host is already trusted. Any other failure makes the
/// command fail after all repositories were attempted.
pub fn cmd_add_repo(args: &AddRepoArgs, config: &TrustConfig, quiet: bool) -> Result<()> {
    let known_hosts = KnownHosts::from_config(config)?;
    tracing::debug!(
        "Trusting hosts for {} repositories in {}",
        args.repositories.len(),
        known_hosts.path().display()
    );
    let mut failures = 0;

    for repository in &args.repositories {
        let spinner = CommandSpinner::new_maybe(&format!("Checking {repository}..."), quiet);
        match known_hosts.add_from_repository(repository) {
            Ok(outcome @ AddOutcome::Added) => spinner.success(&format!(
                "{}: {}",
                style(repository).cyan(),
                outcome_style(outcome)
            )),
            Ok(outcome) => spinner.skipped(&format!(
                "{}: {}",
                style(repository).cyan(),
                outcome_style(outcome)
            )),
            Err(e) if e.is_skippable() => {
                spinner.skipped(&format!(
                    "{}: skipping host key trust",
                    style(repository).cyan()
                ));
                if !quiet {
                    eprintln!("{} {}", style("Warning:").yellow().bold(), e);
                }
            }
            Err(e) => {
                spinner.fail(&format!("{}: failed", style(repository).cyan()));
                show_trust_error(&e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!(
            "{failures} of {} repositories could not be trusted",
            args.repositories.len()
        );
    }
    Ok(())
}
