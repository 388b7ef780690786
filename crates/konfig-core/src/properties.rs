use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use konfig_util::errors::KonfigError;

use crate::settings::ToolchainSettings;

/// Loads a properties file (`key=value` format, `#`/`!` comments).
///
/// Returns an empty map if the file does not exist; a toolchain path can
/// still be resolved from the environment in that case.
pub fn load_properties(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path).map_err(KonfigError::Io)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(map)
}

/// Resolve the external toolchain path for a project.
///
/// Resolution order: the configured property in the properties file first,
/// the configured environment variable second. If neither yields a value
/// the whole run aborts, before any node is configured.
pub fn resolve_toolchain_path(
    project_root: &Path,
    toolchain: &ToolchainSettings,
) -> miette::Result<PathBuf> {
    let properties_path = project_root.join(&toolchain.properties_file);
    let properties = load_properties(&properties_path)?;

    if let Some(path) = properties.get(&toolchain.property) {
        if !path.is_empty() {
            tracing::debug!(
                "toolchain path '{path}' from {}",
                properties_path.display()
            );
            return Ok(PathBuf::from(path));
        }
    }

    if let Ok(path) = std::env::var(&toolchain.env) {
        if !path.is_empty() {
            tracing::debug!("toolchain path '{path}' from ${}", toolchain.env);
            return Ok(PathBuf::from(path));
        }
    }

    Err(KonfigError::Toolchain {
        message: format!(
            "'{}' not set in {} and {} not found in environment",
            toolchain.property, toolchain.properties_file, toolchain.env
        ),
    }
    .into())
}
