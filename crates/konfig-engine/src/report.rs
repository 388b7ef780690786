//! End-of-run propagation report.
//!
//! Per-task option failures are collected here and reported together at
//! the end of the pass instead of being swallowed one by one.

use std::fmt;

use serde::Serialize;

use konfig_core::options::OptionSkip;

use crate::resolve::{OverrideReport, ResolvedDependency};

/// An option that could not be applied to a task of some module.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedOption {
    pub module: String,
    #[serde(flatten)]
    pub skip: OptionSkip,
}

/// Everything a propagation pass wants to tell the user afterwards.
#[derive(Debug, Default, Serialize)]
pub struct PropagationReport {
    /// Node names in the order they were evaluated.
    pub evaluated: Vec<String>,
    pub overrides: OverrideReport,
    pub resolved: Vec<ResolvedDependency>,
    pub skipped: Vec<SkippedOption>,
}

impl PropagationReport {
    pub fn has_warnings(&self) -> bool {
        !self.skipped.is_empty()
    }
}

impl fmt::Display for PropagationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluated {} module(s)", self.evaluated.len())?;
        if self.overrides.is_empty() {
            writeln!(f, "No versions forced.")?;
        } else {
            write!(f, "{}", self.overrides)?;
        }
        if self.skipped.is_empty() {
            write!(f, "No options skipped.")?;
        } else {
            writeln!(f, "Skipped options ({}):", self.skipped.len())?;
            for s in &self.skipped {
                writeln!(f, "  {}/{}: {}", s.module, s.skip.task, s.skip.reason)?;
            }
        }
        Ok(())
    }
}
