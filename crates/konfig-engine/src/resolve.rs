//! Dependency-request resolution under forced-version rules.

use std::fmt;

use serde::Serialize;

use konfig_core::project::ProjectTree;
use konfig_core::rules::RuleSet;

/// A dependency request after resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDependency {
    pub module: String,
    pub group: String,
    pub artifact: String,
    /// The version the module asked for.
    pub requested: String,
    /// The version the request resolved to.
    pub resolved: String,
    pub forced: bool,
}

/// A single forced substitution: a request whose group matched a rule and
/// resolved to the rule's version instead of the requested one.
#[derive(Debug, Clone, Serialize)]
pub struct VersionOverride {
    pub module: String,
    pub group: String,
    pub artifact: String,
    pub requested: String,
    pub forced: String,
}

/// A report of all forced substitutions performed during resolution.
#[derive(Debug, Default, Serialize)]
pub struct OverrideReport {
    pub overrides: Vec<VersionOverride>,
}

impl OverrideReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, over: VersionOverride) {
        self.overrides.push(over);
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }
}

impl fmt::Display for OverrideReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overrides.is_empty() {
            return write!(f, "No versions forced.");
        }
        writeln!(f, "Forced versions ({}):", self.overrides.len())?;
        for o in &self.overrides {
            writeln!(f, "  {o}")?;
        }
        Ok(())
    }
}

impl fmt::Display for VersionOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}:{} requested {} but forced to {}",
            self.module, self.group, self.artifact, self.requested, self.forced
        )
    }
}

/// Resolve every node's dependency requests.
///
/// A request whose group matches a forced rule resolves to the forced
/// version no matter which version was requested; everything else resolves
/// as requested. Substitution is deterministic and total.
pub fn resolve_dependencies(
    tree: &ProjectTree,
    rules: &RuleSet,
) -> (Vec<ResolvedDependency>, OverrideReport) {
    let mut resolved = Vec::new();
    let mut report = OverrideReport::new();

    for node in &tree.nodes {
        for coord in &node.dependencies {
            match rules.forced_version(&coord.group) {
                Some(forced) => {
                    if forced != coord.version {
                        report.add(VersionOverride {
                            module: node.name.clone(),
                            group: coord.group.clone(),
                            artifact: coord.artifact.clone(),
                            requested: coord.version.clone(),
                            forced: forced.to_string(),
                        });
                    }
                    resolved.push(ResolvedDependency {
                        module: node.name.clone(),
                        group: coord.group.clone(),
                        artifact: coord.artifact.clone(),
                        requested: coord.version.clone(),
                        resolved: forced.to_string(),
                        forced: true,
                    });
                }
                None => resolved.push(ResolvedDependency {
                    module: node.name.clone(),
                    group: coord.group.clone(),
                    artifact: coord.artifact.clone(),
                    requested: coord.version.clone(),
                    resolved: coord.version.clone(),
                    forced: false,
                }),
            }
        }
    }

    (resolved, report)
}
