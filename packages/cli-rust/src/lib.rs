//! knownhosts-trust CLI - Keep SSH known_hosts in sync with the repositories you clone
//!
//! This module contains the shared CLI implementation used by all binaries.

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use knownhosts_trust_core::{
    config, get_version, get_version_long, load_config, load_config_from,
};
use tracing_subscriber::EnvFilter;

/// Trust SSH host keys for hosts and repository URLs
#[derive(Parser)]
#[command(name = "knownhosts-trust")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = get_version_long())]
#[command(about = "Trust SSH host keys for hosts and repository URLs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a host is trusted
    Check(commands::CheckArgs),
    /// Scan and trust hosts
    Add(commands::AddArgs),
    /// Trust the SSH hosts behind repository URLs
    AddRepo(commands::AddRepoArgs),
    /// Show which host a repository URL resolves to
    Resolve(commands::ResolveArgs),
    /// Show or create configuration
    Config(commands::ConfigArgs),
}

/// Map -q/-v onto a default filter; RUST_LOG overrides it
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => config::get_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?,
    };

    let loaded = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            // Display rich error for invalid config
            eprintln!("{} Configuration error", style("Error:").red().bold());
            eprintln!();
            eprintln!("  {:#}", e);
            eprintln!();
            eprintln!("  Config file: {}", style(config_path.display()).yellow());
            eprintln!();
            eprintln!(
                "  {} Check the config file for syntax errors or unknown fields.",
                style("Tip:").cyan()
            );
            std::process::exit(1);
        }
    };

    if cli.verbose > 0 {
        eprintln!(
            "{} Config: {}",
            style("[info]").cyan(),
            config_path.display()
        );
        if let Some(known_hosts) = config.resolved_known_hosts_path() {
            eprintln!(
                "{} known_hosts: {}",
                style("[info]").cyan(),
                known_hosts.display()
            );
        }
    }

    match cli.command {
        Some(Commands::Check(args)) => commands::cmd_check(&args, &config, cli.quiet),
        Some(Commands::Add(args)) => commands::cmd_add(&args, &config, cli.quiet),
        Some(Commands::AddRepo(args)) => commands::cmd_add_repo(&args, &config, cli.quiet),
        Some(Commands::Resolve(args)) => commands::cmd_resolve(&args, &config, cli.quiet),
        Some(Commands::Config(args)) => {
            let custom_path = cli.config.is_some();
            commands::cmd_config(args, &config, &config_path, custom_path, cli.quiet)
        }
        None => {
            // No command - show a welcome message and hint to use --help
            if !cli.quiet {
                println!(
                    "{} {}",
                    style("knownhosts-trust").cyan().bold(),
                    style(get_version()).dim()
                );
                println!();
                println!("Run {} for available commands.", style("--help").green());
            }
            Ok(())
        }
    }
}
