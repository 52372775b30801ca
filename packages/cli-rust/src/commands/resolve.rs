//! resolve command - Show which host a repository URL would trust

use anyhow::Result;
use clap::Args;
use console::style;
use knownhosts_trust_core::{HostNormalizer, RepositoryUrl, SshConfigResolver, TrustConfig};

/// Arguments for the resolve command
#[derive(Args)]
pub struct ResolveArgs {
    /// Repository URL to resolve
    pub repository: String,
}

/// Print the canonical host for a repository URL without touching known_hosts
pub fn cmd_resolve(args: &ResolveArgs, config: &TrustConfig, quiet: bool) -> Result<()> {
    let resolver = match config.resolved_ssh_config_path() {
        Some(path) => SshConfigResolver::new(path),
        None => SshConfigResolver::disabled(),
    };
    let normalizer = HostNormalizer::new(resolver);

    let Some(token) = normalizer.normalize(&args.repository)? else {
        if !quiet {
            let url = RepositoryUrl::parse(&args.repository)?;
            println!(
                "{} uses {}, no host key needed",
                style(&args.repository).cyan(),
                style(url.scheme()).yellow()
            );
        }
        return Ok(());
    };

    if quiet {
        println!("{token}");
        return Ok(());
    }

    println!("  {:<18} {}", style("Host:").dim(), style(&token).green());
    println!(
        "  {:<18} {}",
        style("known_hosts name:").dim(),
        token.known_hosts_name()
    );
    if let Some(port) = token.port() {
        println!("  {:<18} {}", style("Port:").dim(), port);
    }
    Ok(())
}
