//! Commands behind the `strafe` binary.
//!
//! Each command reads a replay file and writes its report to any
//! `Write` sink, so the binary only parses arguments and picks stdout.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{dump, info, verify, InfoReport, VerifyReport};
