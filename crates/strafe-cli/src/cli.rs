//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "strafe")]
#[command(about = "Inspect strafe movement replay files")]
#[command(version)]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print header fields and frame statistics
    Info {
        /// Replay file
        file: PathBuf,
    },

    /// Print every frame in game units
    Dump {
        /// Replay file
        file: PathBuf,

        /// Emit a JSON array instead of one line per frame
        #[arg(long)]
        json: bool,

        /// Stop after this many frames
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Decode, re-encode and compare against the file
    Verify {
        /// Replay file
        file: PathBuf,
    },
}
