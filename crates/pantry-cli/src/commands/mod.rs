//! Command dispatch and handler modules.

mod add;
mod init;
mod lock;
mod remove;
mod resolve;

use std::path::PathBuf;

use indicatif::ProgressBar;
use miette::Result;

use pantry_core::config::GlobalConfig;
use pantry_core::manifest::MANIFEST_NAME;
use pantry_resolver::Event;
use pantry_util::errors::PantryError;
use pantry_util::progress;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init { name } => init::exec(name.as_deref()),
        Command::Add {
            recipe,
            requirement,
        } => add::exec(&recipe, requirement.as_deref()),
        Command::Remove { recipe } => remove::exec(&recipe),
        Command::Resolve => resolve::exec(cli.verbose).await,
        Command::Lock => lock::exec(cli.verbose).await,
    }
}

/// The nearest directory at or above the working directory holding `pantry.toml`.
fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(PantryError::Io)?;
    pantry_util::fs::find_ancestor_with(&cwd, MANIFEST_NAME).ok_or_else(|| {
        PantryError::Manifest {
            message: format!("No {MANIFEST_NAME} found in this directory or any parent"),
        }
        .into()
    })
}

fn load_config() -> GlobalConfig {
    match GlobalConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load global config, using defaults: {e}");
            GlobalConfig::default()
        }
    }
}

/// Reflect a resolver event on the spinner; with `verbose`, also log file
/// activity as status lines.
fn render_event(spinner: &ProgressBar, event: &Event, verbose: bool) {
    match event {
        Event::Fetching { recipe } => {
            spinner.set_message(format!("Fetching {recipe}"));
            if verbose {
                spinner.suspend(|| progress::status_info("Fetching", &recipe.to_string()));
            }
        }
        Event::CacheHit { recipe } => spinner.set_message(format!("Reusing {recipe}")),
        Event::FileRead { .. } => {}
        Event::FileHashed { path, sha256 } => {
            if verbose {
                let message = format!("{} sha256:{sha256}", path.display());
                spinner.suspend(|| progress::status_info("Read", &message));
            }
        }
        Event::Resolved(resolved) => {
            spinner.set_message(format!("Resolved {} recipe(s)", resolved.len()));
        }
    }
}
