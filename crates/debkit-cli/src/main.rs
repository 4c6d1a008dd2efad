//! debkit - Debian packaging helpers CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use debkit_cli::{Cli, Commands, Context, cmd};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let context = || Context::load(&cli.builder_dir, cli.config.as_deref(), cli.quiet);

    match cli.command {
        Commands::Changelog => cmd::changelog::changelog(&context()?),
        Commands::Copyright => cmd::copyright::copyright(&context()?),
        Commands::PreBuild => cmd::prebuild::pre_build(&context()?),
        Commands::Hook { settings, marker } => {
            cmd::hook::hook(settings.as_deref(), &marker, cli.quiet)
        }
        Commands::Paths => {
            cmd::paths::paths(&context()?);
            Ok(())
        }
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
