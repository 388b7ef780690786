//! Operation: remove the shared output directory subtree.

use std::path::Path;

use konfig_util::errors::KonfigError;
use konfig_util::fs::remove_dir_if_exists;

/// Remove the shared output root and everything under it.
///
/// Invoking this when the directory does not exist is a successful no-op.
/// The tree is fully derived state and safe to delete between builds.
pub fn clean(output_root: &Path) -> miette::Result<CleanResult> {
    if remove_dir_if_exists(output_root).map_err(KonfigError::Io)? {
        Ok(CleanResult::Cleaned)
    } else {
        Ok(CleanResult::NothingToClean)
    }
}

/// Result of a clean operation.
#[derive(Debug, PartialEq, Eq)]
pub enum CleanResult {
    Cleaned,
    NothingToClean,
}
