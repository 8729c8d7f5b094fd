//! strafe - movement replay inspection tool

use std::io;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use strafe_cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Info { file } => {
            commands::info(&file, &mut out)?;
        }
        Commands::Dump { file, json, limit } => {
            commands::dump(&file, json, limit, &mut out)?;
        }
        Commands::Verify { file } => {
            let report = commands::verify(&file, &mut out)?;
            if !report.is_sound() {
                bail!("{} does not survive a re-encode", file.display());
            }
        }
    }
    Ok(())
}
