//! CLI argument definitions for konfig.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "konfig",
    version,
    about = "A declarative build-configuration propagator for JVM/Kotlin module trees",
    long_about = "konfig reads a Konfig.toml settings manifest and applies output-directory \
                  mappings, forced dependency versions, and canonical compiler options \
                  uniformly across a tree of build modules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the propagation pass and materialize the output tree
    Apply,

    /// Show what apply would do without touching the filesystem
    Plan,

    /// Remove the shared output directory
    Clean,
}

pub fn parse() -> Cli {
    Cli::parse()
}
