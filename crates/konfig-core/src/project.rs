use serde::{Deserialize, Serialize};

use konfig_util::errors::KonfigError;

use crate::options::CompilerOptionSet;
use crate::rules::Coordinate;
use crate::settings::Settings;

/// Kind of a compilation task, used to decide which options apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[serde(rename = "kotlin")]
    KotlinCompile,
    #[serde(rename = "java")]
    JavaCompile,
}

/// A compilation task belonging to a project node.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub name: String,
    pub kind: TaskKind,
    pub options: CompilerOptionSet,
}

impl Task {
    pub fn new(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: CompilerOptionSet::default(),
        }
    }
}

/// A buildable module within the tree: the unit configuration propagates to.
#[derive(Debug, Clone)]
pub struct ProjectNode {
    pub name: String,
    /// Option values the node sets for itself; the canonical set is applied
    /// on top of these after the node evaluates.
    pub local_options: Option<CompilerOptionSet>,
    pub dependencies: Vec<Coordinate>,
    pub tasks: Vec<Task>,
    pub evaluation_depends_on: Vec<String>,
}

/// The root build plus its subproject nodes.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    pub root_name: String,
    pub nodes: Vec<ProjectNode>,
}

impl ProjectTree {
    /// Build the tree from a parsed settings manifest.
    ///
    /// Rejects duplicate node names (each node must map to a unique child
    /// of the shared output root) and names that would escape it.
    pub fn from_settings(settings: &Settings) -> miette::Result<Self> {
        let mut nodes = Vec::with_capacity(settings.modules.len());
        for module in &settings.modules {
            validate_node_name(&module.name)?;
            if module.name == settings.build.name {
                return Err(KonfigError::Settings {
                    message: format!(
                        "module '{}' has the same name as the root project",
                        module.name
                    ),
                }
                .into());
            }
            if nodes.iter().any(|n: &ProjectNode| n.name == module.name) {
                return Err(KonfigError::Settings {
                    message: format!("duplicate module name '{}'", module.name),
                }
                .into());
            }

            let mut dependencies = Vec::with_capacity(module.dependencies.len());
            for dep in &module.dependencies {
                let coord = Coordinate::parse(dep).ok_or_else(|| KonfigError::Settings {
                    message: format!(
                        "module '{}': invalid dependency '{dep}' (expected group:artifact:version)",
                        module.name
                    ),
                })?;
                dependencies.push(coord);
            }

            let tasks = match &module.tasks {
                Some(configs) => configs
                    .iter()
                    .map(|t| Task::new(t.name.as_str(), t.kind))
                    .collect(),
                None => default_tasks(),
            };

            nodes.push(ProjectNode {
                name: module.name.clone(),
                local_options: module.options.clone(),
                dependencies,
                tasks,
                evaluation_depends_on: module.evaluation_depends_on.clone(),
            });
        }

        Ok(Self {
            root_name: settings.build.name.clone(),
            nodes,
        })
    }

    pub fn node(&self, name: &str) -> Option<&ProjectNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut ProjectNode> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }
}

/// Every module gets a Kotlin and a Java compile task unless it declares
/// its own task list.
fn default_tasks() -> Vec<Task> {
    vec![
        Task::new("compileKotlin", TaskKind::KotlinCompile),
        Task::new("compileJava", TaskKind::JavaCompile),
    ]
}

fn validate_node_name(name: &str) -> miette::Result<()> {
    if name.is_empty() {
        return Err(KonfigError::Settings {
            message: "module name must not be empty".to_string(),
        }
        .into());
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(KonfigError::Settings {
            message: format!("module name '{name}' must not contain path separators"),
        }
        .into());
    }
    Ok(())
}
