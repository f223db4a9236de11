//! CLI argument definitions for Pantry.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pantry",
    version,
    about = "A package manager for native libraries",
    long_about = "Pantry resolves the recipes a project depends on to one consistent set of \
                  versions and records the result in pantry.lock for reproducible builds."
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
    /// Create a pantry.toml in the current directory
    Init {
        /// Project name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a dependency to pantry.toml
    Add {
        /// Recipe identifier: org/recipe or source+org/recipe
        recipe: String,
        /// Version requirement, e.g. 1.2.3, >=1.0, 1.0-2.0 or [1.0, 1.1]
        requirement: Option<String>,
    },

    /// Remove a dependency from pantry.toml
    Remove {
        /// Recipe identifier
        recipe: String,
    },

    /// Resolve dependencies and print the chosen versions
    Resolve,

    /// Resolve dependencies and write pantry.lock
    Lock,
}

pub fn parse() -> Cli {
    Cli::parse()
}
