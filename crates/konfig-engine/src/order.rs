//! Node evaluation ordering.
//!
//! A node may declare that its evaluation depends on another named node
//! having completed first. The order honors every such declaration; a
//! dependent node never evaluates before its dependency.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use konfig_core::project::ProjectTree;
use konfig_util::errors::KonfigError;

/// Compute the evaluation order for the tree's nodes.
///
/// Kahn's algorithm over the declared-dependency graph. Among nodes whose
/// dependencies have all completed, declaration order breaks ties, so the
/// result is deterministic. Unknown references and dependency cycles fail
/// fast.
pub fn evaluation_order(tree: &ProjectTree) -> miette::Result<Vec<String>> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for node in &tree.nodes {
        let idx = graph.add_node(node.name.as_str());
        indices.insert(node.name.as_str(), idx);
    }

    for node in &tree.nodes {
        for dep in &node.evaluation_depends_on {
            let dep_idx = *indices.get(dep.as_str()).ok_or_else(|| {
                KonfigError::Evaluation {
                    message: format!(
                        "module '{}' declares evaluation-depends-on unknown module '{dep}'",
                        node.name
                    ),
                }
            })?;
            graph.add_edge(dep_idx, indices[node.name.as_str()], ());
        }
    }

    let mut pending: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
        .collect();

    // Node indices follow declaration order, so the BTreeSet pops the
    // earliest-declared ready node first.
    let mut ready: BTreeSet<NodeIndex> = graph
        .node_indices()
        .filter(|idx| pending[idx.index()] == 0)
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(&idx) = ready.iter().next() {
        ready.remove(&idx);
        order.push(graph[idx].to_string());
        for succ in graph.neighbors_directed(idx, Direction::Outgoing) {
            pending[succ.index()] -= 1;
            if pending[succ.index()] == 0 {
                ready.insert(succ);
            }
        }
    }

    if order.len() != graph.node_count() {
        let stuck = graph
            .node_indices()
            .find(|idx| pending[idx.index()] > 0)
            .map(|idx| graph[idx])
            .unwrap_or("?");
        return Err(KonfigError::Evaluation {
            message: format!("evaluation dependency cycle involving module '{stuck}'"),
        }
        .into());
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use konfig_core::project::ProjectTree;
    use konfig_core::settings::Settings;

    fn tree(manifest_tail: &str) -> ProjectTree {
        let manifest = format!(
            "[build]\nname = \"root\"\n[toolchain]\nproperty = \"p\"\nenv = \"E\"\n{manifest_tail}"
        );
        let settings: Settings = toml::from_str(&manifest).unwrap();
        ProjectTree::from_settings(&settings).unwrap()
    }

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn declaration_order_without_dependencies() {
        let tree = tree(
            "[[module]]\nname = \"app\"\n\
             [[module]]\nname = \"b\"\n\
             [[module]]\nname = \"c\"\n",
        );
        let order = evaluation_order(&tree).unwrap();
        assert_eq!(order, vec!["app", "b", "c"]);
    }

    #[test]
    fn dependencies_precede_dependents() {
        let tree = tree(
            "[[module]]\nname = \"plugin_a\"\nevaluation-depends-on = [\"app\"]\n\
             [[module]]\nname = \"plugin_b\"\nevaluation-depends-on = [\"app\"]\n\
             [[module]]\nname = \"app\"\n",
        );
        let order = evaluation_order(&tree).unwrap();
        assert!(position(&order, "app") < position(&order, "plugin_a"));
        assert!(position(&order, "app") < position(&order, "plugin_b"));
    }

    #[test]
    fn transitive_chains_are_honored() {
        let tree = tree(
            "[[module]]\nname = \"c\"\nevaluation-depends-on = [\"b\"]\n\
             [[module]]\nname = \"b\"\nevaluation-depends-on = [\"a\"]\n\
             [[module]]\nname = \"a\"\n",
        );
        let order = evaluation_order(&tree).unwrap();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_reference_fails_fast() {
        let tree = tree("[[module]]\nname = \"app\"\nevaluation-depends-on = [\"ghost\"]\n");
        let err = evaluation_order(&tree).unwrap_err();
        assert!(err.to_string().contains("ghost"), "got: {err}");
    }

    #[test]
    fn cycle_fails_fast() {
        let tree = tree(
            "[[module]]\nname = \"a\"\nevaluation-depends-on = [\"b\"]\n\
             [[module]]\nname = \"b\"\nevaluation-depends-on = [\"a\"]\n",
        );
        let err = evaluation_order(&tree).unwrap_err();
        assert!(err.to_string().contains("cycle"), "got: {err}");
    }
}
