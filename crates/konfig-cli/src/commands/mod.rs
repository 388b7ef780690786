//! Command dispatch and handler modules.

mod apply;
mod clean;
mod plan;

use std::path::PathBuf;

use miette::Result;

use konfig_core::settings::Settings;
use konfig_core::SETTINGS_FILE;
use konfig_util::errors::KonfigError;
use konfig_util::fs::find_ancestor_with;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Apply => apply::exec(cli.verbose),
        Command::Plan => plan::exec(cli.verbose),
        Command::Clean => clean::exec(),
    }
}

/// Locate the project root (the directory holding `Konfig.toml`) and load
/// the settings manifest from it.
fn load_project() -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir().map_err(KonfigError::Io)?;
    let project_root =
        find_ancestor_with(&cwd, SETTINGS_FILE).ok_or_else(|| KonfigError::Settings {
            message: format!(
                "Could not find {SETTINGS_FILE} in current or parent directories"
            ),
        })?;
    tracing::debug!("using project root {}", project_root.display());
    let settings = Settings::load(&project_root.join(SETTINGS_FILE))?;
    Ok((project_root, settings))
}
