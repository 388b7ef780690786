use serde::{Deserialize, Serialize};

use crate::project::{Task, TaskKind};

/// A bundle of compiler settings applied to compilation tasks.
///
/// The same type describes the canonical set from `[options]`, a module's
/// local overrides from `[module.options]`, and the effective configuration
/// carried by each task. Unset fields leave the task's current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CompilerOptionSet {
    /// JVM bytecode target, e.g. `"17"`.
    #[serde(default)]
    pub jvm_target: Option<String>,

    /// Kotlin language version, e.g. `"1.9"`.
    #[serde(default)]
    pub language_version: Option<String>,

    /// Kotlin API version, e.g. `"1.9"`.
    #[serde(default)]
    pub api_version: Option<String>,

    /// Whether warnings fail the compilation.
    #[serde(default)]
    pub all_warnings_as_errors: Option<bool>,

    /// Extra compiler arguments, appended without duplicating.
    #[serde(default)]
    pub free_args: Vec<String>,
}

/// A single option that could not be applied to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSkip {
    pub task: String,
    pub option: String,
    pub reason: String,
}

impl CompilerOptionSet {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this option set to a task, overwriting conflicting values.
    ///
    /// Options the task's kind does not support are skipped and returned;
    /// the task itself is never failed. Applying the same set twice leaves
    /// the task configuration unchanged (free args append only once).
    pub fn apply_to(&self, task: &mut Task) -> Vec<OptionSkip> {
        let mut skipped = Vec::new();

        if let Some(ref jvm_target) = self.jvm_target {
            task.options.jvm_target = Some(jvm_target.clone());
        }

        match task.kind {
            TaskKind::KotlinCompile => {
                if let Some(ref language_version) = self.language_version {
                    task.options.language_version = Some(language_version.clone());
                }
                if let Some(ref api_version) = self.api_version {
                    task.options.api_version = Some(api_version.clone());
                }
                if let Some(warnings) = self.all_warnings_as_errors {
                    task.options.all_warnings_as_errors = Some(warnings);
                }
                for arg in &self.free_args {
                    if !task.options.free_args.contains(arg) {
                        task.options.free_args.push(arg.clone());
                    }
                }
            }
            TaskKind::JavaCompile => {
                // javac only understands source/target compatibility; the
                // Kotlin-specific options are reported, not silently dropped.
                if let Some(ref v) = self.language_version {
                    skipped.push(skip(task, "language-version", v));
                }
                if let Some(ref v) = self.api_version {
                    skipped.push(skip(task, "api-version", v));
                }
                if let Some(v) = self.all_warnings_as_errors {
                    skipped.push(skip(task, "all-warnings-as-errors", &v.to_string()));
                }
                if !self.free_args.is_empty() {
                    skipped.push(skip(task, "free-args", &self.free_args.join(" ")));
                }
            }
        }

        skipped
    }
}

fn skip(task: &Task, option: &str, value: &str) -> OptionSkip {
    OptionSkip {
        task: task.name.clone(),
        option: option.to_string(),
        reason: format!("'{option}={value}' is not supported by java compile tasks"),
    }
}
