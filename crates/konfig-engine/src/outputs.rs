//! Shared output-directory mapping for the project tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use konfig_core::project::ProjectTree;

/// The output-directory relation: the root build writes into the shared
/// root, every node into `root/<node name>`.
///
/// Computed once before any node evaluates and never mutated afterwards.
/// Node-name validation in [`ProjectTree`] guarantees each directory is a
/// distinct child of the shared root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    dirs: BTreeMap<String, PathBuf>,
}

impl OutputLayout {
    /// Compute the mapping for `tree`, with the shared root at
    /// `project_root/output_dir`.
    pub fn compute(project_root: &Path, output_dir: &str, tree: &ProjectTree) -> Self {
        let root = project_root.join(output_dir);
        let dirs = tree
            .nodes
            .iter()
            .map(|node| (node.name.clone(), root.join(&node.name)))
            .collect();
        Self { root, dirs }
    }

    /// The shared output root (also the root project's output directory).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The output directory assigned to a node.
    pub fn dir_for(&self, node: &str) -> Option<&Path> {
        self.dirs.get(node).map(PathBuf::as_path)
    }

    /// All node mappings in name-sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.dirs.iter().map(|(n, p)| (n.as_str(), p.as_path()))
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use konfig_core::project::ProjectTree;
    use konfig_core::settings::Settings;
    use std::collections::HashSet;

    fn tree(names: &[&str]) -> ProjectTree {
        let mut manifest = String::from(
            "[build]\nname = \"root\"\n[toolchain]\nproperty = \"p\"\nenv = \"E\"\n",
        );
        for name in names {
            manifest.push_str(&format!("[[module]]\nname = \"{name}\"\n"));
        }
        let settings: Settings = toml::from_str(&manifest).unwrap();
        ProjectTree::from_settings(&settings).unwrap()
    }

    #[test]
    fn every_node_maps_to_root_slash_name() {
        let tree = tree(&["app", "path_provider", "url_launcher"]);
        let layout = OutputLayout::compute(Path::new("/work/android"), "../../build", &tree);

        for node in &tree.nodes {
            assert_eq!(
                layout.dir_for(&node.name),
                Some(layout.root().join(&node.name).as_path())
            );
        }
    }

    #[test]
    fn mappings_are_pairwise_distinct() {
        let tree = tree(&["app", "a", "b", "c"]);
        let layout = OutputLayout::compute(Path::new("/work"), "build", &tree);

        let dirs: HashSet<&Path> = layout.iter().map(|(_, p)| p).collect();
        assert_eq!(dirs.len(), layout.len());
    }

    #[test]
    fn unknown_node_has_no_mapping() {
        let tree = tree(&["app"]);
        let layout = OutputLayout::compute(Path::new("/work"), "build", &tree);
        assert!(layout.dir_for("nope").is_none());
    }
}
