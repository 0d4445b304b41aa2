//! qtup - Qt Updates.xml inspector CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qtup_cli::cmd;
use qtup_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Show { manifests, json } => cmd::show::show(&manifests, json),
        Commands::Arch { arch, manifests } => cmd::arch::arch(&arch, &manifests),
        Commands::Deps {
            target,
            manifests,
            json,
        } => cmd::deps::deps(&target, &manifests, json),
        Commands::Modules {
            arch,
            manifests,
            modules,
        } => cmd::modules::modules(&arch, &manifests, modules),
    }
}
