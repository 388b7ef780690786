use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use konfig_util::errors::KonfigError;

use crate::options::CompilerOptionSet;
use crate::plugin::PluginDeclaration;
use crate::project::TaskKind;

/// The parsed representation of a `Konfig.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub build: BuildSettings,

    pub toolchain: ToolchainSettings,

    #[serde(default, rename = "plugin")]
    pub plugins: Vec<PluginDeclaration>,

    /// Forced dependency versions: group identifier -> version string.
    #[serde(default)]
    pub force: BTreeMap<String, String>,

    /// The canonical compiler option set applied to every node after its
    /// own configuration has been evaluated.
    #[serde(default)]
    pub options: CompilerOptionSet,

    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleConfig>,
}

/// Root build identity and output location from the `[build]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Name of the root project.
    pub name: String,
    /// Shared output root, relative to the project directory.
    #[serde(default = "default_output_dir", rename = "output-dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    "build".to_string()
}

/// External toolchain lookup from the `[toolchain]` section.
///
/// The path is read from `property` in `properties-file` first, then from
/// the `env` environment variable; a run with neither aborts fatally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainSettings {
    #[serde(default = "default_properties_file", rename = "properties-file")]
    pub properties_file: String,
    pub property: String,
    pub env: String,
}

fn default_properties_file() -> String {
    "local.properties".to_string()
}

/// One `[[module]]` entry: a subproject node of the build tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub name: String,

    /// Names of modules whose evaluation must complete before this one.
    #[serde(default, rename = "evaluation-depends-on")]
    pub evaluation_depends_on: Vec<String>,

    /// Dependency requests as `group:artifact:version` coordinates.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Compilation tasks; omitted means one Kotlin and one Java task.
    #[serde(default)]
    pub tasks: Option<Vec<TaskConfig>>,

    /// Node-local option overrides, applied before the canonical set.
    #[serde(default)]
    pub options: Option<CompilerOptionSet>,
}

/// A compilation task declaration within a module entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    pub name: String,
    pub kind: TaskKind,
}

impl Settings {
    /// Load and parse the settings manifest at `path`.
    pub fn load(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KonfigError::Settings {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|e| KonfigError::Settings {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?;
        Ok(settings)
    }
}
