use std::collections::BTreeMap;

use konfig_util::errors::KonfigError;

/// Maven-style coordinates parsed from a `group:artifact:version` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Coordinate {
    /// Parse `"group:artifact:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
            Some(Self {
                group: parts[0].to_string(),
                artifact: parts[1].to_string(),
                version: parts[2].to_string(),
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// The set of forced-version rules, one effective version per group.
///
/// Registering two rules that disagree on the same group is an error that
/// names both versions; re-registering an identical rule is a no-op.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from the `[force]` table of the settings manifest.
    pub fn from_table(table: &BTreeMap<String, String>) -> miette::Result<Self> {
        let mut set = Self::new();
        for (group, version) in table {
            set.register(group, version)?;
        }
        Ok(set)
    }

    /// Register a forced version for a dependency group.
    pub fn register(&mut self, group: &str, version: &str) -> miette::Result<()> {
        if group.is_empty() || version.is_empty() {
            return Err(KonfigError::Settings {
                message: "forced-version rules need a non-empty group and version".to_string(),
            }
            .into());
        }
        if semver::Version::parse(version).is_err() {
            tracing::warn!("forced version '{version}' for group '{group}' is not semver");
        }
        match self.rules.get(group) {
            Some(existing) if existing == version => Ok(()),
            Some(existing) => Err(KonfigError::RuleConflict {
                group: group.to_string(),
                first: existing.clone(),
                second: version.to_string(),
            }
            .into()),
            None => {
                self.rules.insert(group.to_string(), version.to_string());
                Ok(())
            }
        }
    }

    /// The forced version for a group, if any rule matches.
    pub fn forced_version(&self, group: &str) -> Option<&str> {
        self.rules.get(group).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Rules in deterministic (group-sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(g, v)| (g.as_str(), v.as_str()))
    }
}
