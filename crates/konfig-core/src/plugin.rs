use serde::{Deserialize, Serialize};

/// A plugin declared at settings time: identifier, version, and whether it
/// is applied eagerly to the root build or only made available to modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginDeclaration {
    pub id: String,
    pub version: String,
    #[serde(default = "default_apply")]
    pub apply: bool,
}

fn default_apply() -> bool {
    true
}

impl std::fmt::Display for PluginDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id, self.version)?;
        if !self.apply {
            write!(f, " (apply false)")?;
        }
        Ok(())
    }
}
