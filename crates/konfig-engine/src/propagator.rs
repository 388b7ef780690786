//! The propagation state machine.
//!
//! A [`Propagator`] is the *configuring* state: it accepts rule
//! registrations and owns the mutable project tree. [`Propagator::seal`]
//! evaluates every node and consumes the propagator into a [`SealedBuild`],
//! the *sealed* state, which has no mutation API. The transition happens
//! once and there is no way back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use konfig_core::options::CompilerOptionSet;
use konfig_core::plugin::PluginDeclaration;
use konfig_core::project::{ProjectTree, Task};
use konfig_core::properties::resolve_toolchain_path;
use konfig_core::rules::RuleSet;
use konfig_core::settings::Settings;
use konfig_util::errors::KonfigError;
use konfig_util::fs::ensure_dir;

use crate::order::evaluation_order;
use crate::outputs::OutputLayout;
use crate::report::{PropagationReport, SkippedOption};
use crate::resolve::resolve_dependencies;

/// File name of the sealed-configuration snapshot written into the output
/// root by [`SealedBuild::materialize`].
pub const SNAPSHOT_FILE: &str = "konfig.json";

/// The configuring state of a propagation pass.
#[derive(Debug)]
pub struct Propagator {
    plugins: Vec<PluginDeclaration>,
    toolchain_path: PathBuf,
    tree: ProjectTree,
    layout: OutputLayout,
    rules: RuleSet,
    canonical: CompilerOptionSet,
}

impl Propagator {
    /// Start a configuring session from a parsed settings manifest.
    ///
    /// The toolchain path is resolved first: a run that cannot locate the
    /// toolchain aborts here, before any node is configured. Plugin
    /// declarations are evaluated once, at this point.
    pub fn from_settings(project_root: &Path, settings: &Settings) -> miette::Result<Self> {
        let toolchain_path = resolve_toolchain_path(project_root, &settings.toolchain)?;

        for plugin in &settings.plugins {
            tracing::debug!("declared plugin {plugin}");
        }

        let tree = ProjectTree::from_settings(settings)?;
        let layout = OutputLayout::compute(project_root, &settings.build.output_dir, &tree);
        let rules = RuleSet::from_table(&settings.force)?;

        Ok(Self {
            plugins: settings.plugins.clone(),
            toolchain_path,
            tree,
            layout,
            rules,
            canonical: settings.options.clone(),
        })
    }

    /// Register an additional forced version while still configuring.
    pub fn force_version(&mut self, group: &str, version: &str) -> miette::Result<()> {
        self.rules.register(group, version)
    }

    /// The output-directory mapping computed for this pass.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Evaluate every node and seal the configuration.
    ///
    /// Nodes evaluate in declared-dependency order; each node's own option
    /// overrides apply first, then the canonical set on top, so canonical
    /// values win. Options a task cannot take are collected, not fatal.
    pub fn seal(mut self) -> miette::Result<SealedBuild> {
        let order = evaluation_order(&self.tree)?;
        let mut skipped = Vec::new();

        for name in &order {
            let Some(node) = self.tree.node_mut(name) else {
                continue;
            };

            let local = node.local_options.clone();
            for task in &mut node.tasks {
                if let Some(ref local) = local {
                    for skip in local.apply_to(task) {
                        tracing::warn!("{name}/{}: {}", skip.task, skip.reason);
                        skipped.push(SkippedOption {
                            module: name.clone(),
                            skip,
                        });
                    }
                }
            }
            tracing::debug!("evaluated module '{name}'");

            for task in &mut node.tasks {
                for skip in self.canonical.apply_to(task) {
                    tracing::warn!("{name}/{}: {}", skip.task, skip.reason);
                    skipped.push(SkippedOption {
                        module: name.clone(),
                        skip,
                    });
                }
            }
        }

        let (resolved, overrides) = resolve_dependencies(&self.tree, &self.rules);

        let modules = order
            .iter()
            .filter_map(|name| {
                let node = self.tree.node(name)?;
                let output_dir = self.layout.dir_for(name)?.to_path_buf();
                Some(ModuleSnapshot {
                    name: node.name.clone(),
                    output_dir,
                    tasks: node.tasks.clone(),
                })
            })
            .collect();

        let snapshot = BuildSnapshot {
            root: self.tree.root_name.clone(),
            toolchain_path: self.toolchain_path,
            plugins: self.plugins,
            output_root: self.layout.root().to_path_buf(),
            forced: self.rules.iter().map(|(g, v)| (g.to_string(), v.to_string())).collect(),
            modules,
        };

        Ok(SealedBuild {
            snapshot,
            layout: self.layout,
            report: PropagationReport {
                evaluated: order,
                overrides,
                resolved,
                skipped,
            },
        })
    }
}

/// The sealed state: node evaluation is complete and the configuration is
/// frozen. Only inspection and materialization remain.
pub struct SealedBuild {
    snapshot: BuildSnapshot,
    layout: OutputLayout,
    report: PropagationReport,
}

/// The frozen configuration of one propagation pass.
#[derive(Debug, Serialize)]
pub struct BuildSnapshot {
    pub root: String,
    pub toolchain_path: PathBuf,
    pub plugins: Vec<PluginDeclaration>,
    pub output_root: PathBuf,
    pub forced: BTreeMap<String, String>,
    pub modules: Vec<ModuleSnapshot>,
}

/// A module's frozen configuration: where it builds and what its tasks
/// ended up configured with.
#[derive(Debug, Serialize)]
pub struct ModuleSnapshot {
    pub name: String,
    pub output_dir: PathBuf,
    pub tasks: Vec<Task>,
}

#[derive(Serialize)]
struct SnapshotDocument<'a> {
    build: &'a BuildSnapshot,
    report: &'a PropagationReport,
}

impl SealedBuild {
    pub fn snapshot(&self) -> &BuildSnapshot {
        &self.snapshot
    }

    pub fn report(&self) -> &PropagationReport {
        &self.report
    }

    pub fn output_root(&self) -> &Path {
        self.layout.root()
    }

    /// The sealed configuration as a JSON document.
    pub fn snapshot_json(&self) -> miette::Result<String> {
        serde_json::to_string_pretty(&SnapshotDocument {
            build: &self.snapshot,
            report: &self.report,
        })
        .map_err(|e| {
            KonfigError::Generic {
                message: format!("Failed to serialize snapshot: {e}"),
            }
            .into()
        })
    }

    /// Create the output directory tree and write the snapshot into it.
    ///
    /// Returns the path of the written snapshot file.
    pub fn materialize(&self) -> miette::Result<PathBuf> {
        ensure_dir(self.layout.root()).map_err(KonfigError::Io)?;
        for (_, dir) in self.layout.iter() {
            ensure_dir(dir).map_err(KonfigError::Io)?;
        }

        let path = self.layout.root().join(SNAPSHOT_FILE);
        std::fs::write(&path, self.snapshot_json()?).map_err(KonfigError::Io)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[build]
name = "mobile-android"
output-dir = "build"

[toolchain]
property = "flutter.sdk"
env = "KONFIG_PROPAGATOR_TEST_UNSET"

[[plugin]]
id = "com.android.application"
version = "8.7.2"
apply = false

[force]
"org.jetbrains.kotlin" = "1.9.24"

[options]
jvm-target = "17"
language-version = "1.9"
api-version = "1.9"
all-warnings-as-errors = false
free-args = ["-Xjdk-release=17"]

[[module]]
name = "app"
dependencies = ["org.jetbrains.kotlin:kotlin-stdlib:1.8.22"]

[[module]]
name = "path_provider"
evaluation-depends-on = ["app"]

[module.options]
jvm-target = "11"
"#;

    fn project(manifest: &str) -> (TempDir, Settings) {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("local.properties"), "flutter.sdk=/opt/flutter\n")
            .unwrap();
        let settings: Settings = toml::from_str(manifest).unwrap();
        (tmp, settings)
    }

    #[test]
    fn seal_produces_ordered_normalized_configuration() {
        let (tmp, settings) = project(MANIFEST);
        let propagator = Propagator::from_settings(tmp.path(), &settings).unwrap();
        let sealed = propagator.seal().unwrap();

        let report = sealed.report();
        assert_eq!(report.evaluated, vec!["app", "path_provider"]);
        assert_eq!(report.overrides.len(), 1);

        // The canonical set wins over path_provider's local jvm-target=11.
        let snapshot = sealed.snapshot();
        let provider = &snapshot.modules[1];
        let kotlin_task = &provider.tasks[0];
        assert_eq!(kotlin_task.options.jvm_target.as_deref(), Some("17"));

        // Java tasks took the JVM target but reported the Kotlin-only
        // options, once per module's java task.
        assert!(report.has_warnings());
        assert!(report.skipped.iter().all(|s| s.skip.task == "compileJava"));

        assert_eq!(
            snapshot.toolchain_path,
            PathBuf::from("/opt/flutter")
        );
        assert_eq!(snapshot.forced.get("org.jetbrains.kotlin").unwrap(), "1.9.24");
    }

    #[test]
    fn missing_toolchain_aborts_before_any_configuration() {
        let tmp = TempDir::new().unwrap();
        let settings: Settings = toml::from_str(MANIFEST).unwrap();

        let err = Propagator::from_settings(tmp.path(), &settings).unwrap_err();
        assert!(err.to_string().contains("flutter.sdk"), "got: {err}");
    }

    #[test]
    fn force_version_conflict_is_rejected_while_configuring() {
        let (tmp, settings) = project(MANIFEST);
        let mut propagator = Propagator::from_settings(tmp.path(), &settings).unwrap();

        propagator.force_version("androidx.core", "1.13.1").unwrap();
        let err = propagator
            .force_version("org.jetbrains.kotlin", "2.1.0")
            .unwrap_err();
        assert!(err.to_string().contains("1.9.24"), "got: {err}");
    }

    #[test]
    fn materialize_creates_mapping_and_snapshot() {
        let (tmp, settings) = project(MANIFEST);
        let sealed = Propagator::from_settings(tmp.path(), &settings)
            .unwrap()
            .seal()
            .unwrap();

        let snapshot_path = sealed.materialize().unwrap();
        assert!(snapshot_path.is_file());
        assert!(sealed.output_root().join("app").is_dir());
        assert!(sealed.output_root().join("path_provider").is_dir());

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&snapshot_path).unwrap()).unwrap();
        assert_eq!(json["build"]["root"], "mobile-android");
        assert_eq!(json["report"]["evaluated"][0], "app");
    }

    #[test]
    fn materialize_is_repeatable() {
        let (tmp, settings) = project(MANIFEST);
        let sealed = Propagator::from_settings(tmp.path(), &settings)
            .unwrap()
            .seal()
            .unwrap();

        sealed.materialize().unwrap();
        sealed.materialize().unwrap();
        assert!(sealed.output_root().join(SNAPSHOT_FILE).is_file());
    }
}
