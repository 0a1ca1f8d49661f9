//! DAG transfer patterns.
//!
//! Every path is stored as a chain of nodes from its destination up to the
//! origin (the root). A path whose remaining stops exactly match an
//! existing node's chain reuses that node, so paths sharing a suffix share
//! nodes.

use std::collections::BTreeMap;

use crate::domain::StopId;
use crate::raptor::ConnectionIndex;
use crate::results::all_paths;

use super::TransferPatternResults;

/// Index of a node in a [`TransferPatternGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A stop in the graph, linked towards the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: StopId,
    pub parent: Option<NodeId>,
}

/// Arena of nodes, indexed by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPatternGraph {
    nodes: Vec<TreeNode>,
    by_label: BTreeMap<StopId, Vec<NodeId>>,
}

impl TransferPatternGraph {
    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Nodes labelled `stop`, in creation order.
    pub fn nodes_labelled(&self, stop: &StopId) -> &[NodeId] {
        self.by_label.get(stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Labels from `id` up to the root.
    pub fn chain(&self, id: NodeId) -> Vec<StopId> {
        let mut labels = Vec::new();
        let mut current = Some(id);

        while let Some(node) = current.map(|n| self.node(n)) {
            labels.push(node.label.clone());
            current = node.parent;
        }

        labels
    }

    /// Returns every label with at least one node, in id order.
    pub fn labels(&self) -> impl Iterator<Item = &StopId> {
        self.by_label.keys()
    }

    /// Returns the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Does the chain starting at `node` consist of exactly `path`?
    fn matches(&self, mut node: Option<NodeId>, path: &[StopId]) -> bool {
        for label in path {
            match node.map(|n| self.node(n)) {
                Some(n) if &n.label == label => node = n.parent,
                _ => return false,
            }
        }

        node.is_none()
    }

    /// Merge a destination-first path, returning the node for its head.
    fn merge(&mut self, head: &StopId, tail: &[StopId]) -> NodeId {
        let existing = self
            .nodes_labelled(head)
            .iter()
            .copied()
            .find(|&id| self.matches(self.node(id).parent, tail));

        if let Some(id) = existing {
            return id;
        }

        let parent = tail
            .split_first()
            .map(|(next, rest)| self.merge(next, rest));

        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            label: head.clone(),
            parent,
        });
        self.by_label.entry(head.clone()).or_default().push(id);
        id
    }
}

/// Builds a [`TransferPatternGraph`] from every path of every scan,
/// direct paths included.
#[derive(Debug, Clone, Default)]
pub struct GraphResults {
    graph: TransferPatternGraph,
}

impl GraphResults {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransferPatternResults for GraphResults {
    type Output = TransferPatternGraph;

    fn add(&mut self, connections: &ConnectionIndex) {
        for path in all_paths(connections) {
            if let Some((head, tail)) = path.split_first() {
                self.graph.merge(head, tail);
            }
        }
    }

    fn finalize(self) -> TransferPatternGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer_pattern::test_support::path_connections;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn chains(graph: &TransferPatternGraph, label: &str) -> Vec<Vec<String>> {
        graph
            .nodes_labelled(&stop(label))
            .iter()
            .map(|&id| {
                graph
                    .chain(id)
                    .iter()
                    .map(|s| s.as_str().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn merges_path_into_empty_graph() {
        let mut results = GraphResults::new();
        results.add(&path_connections(&["A", "B", "C"]));
        let graph = results.finalize();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(chains(&graph, "A"), vec![vec!["A"]]);
        assert_eq!(chains(&graph, "B"), vec![vec!["B", "A"]]);
        assert_eq!(chains(&graph, "C"), vec![vec!["C", "B", "A"]]);
    }

    #[test]
    fn merges_duplicate_paths() {
        let mut results = GraphResults::new();
        results.add(&path_connections(&["A", "B", "C"]));
        results.add(&path_connections(&["A", "B"]));

        assert_eq!(results.finalize().node_count(), 3);
    }

    #[test]
    fn appends_to_existing_paths() {
        let mut results = GraphResults::new();
        results.add(&path_connections(&["A", "B"]));
        results.add(&path_connections(&["A", "B", "C"]));
        let graph = results.finalize();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(chains(&graph, "C"), vec![vec!["C", "B", "A"]]);
    }

    #[test]
    fn appends_different_paths() {
        let mut results = GraphResults::new();
        results.add(&path_connections(&["A", "B", "C", "D"]));
        results.add(&path_connections(&["A", "B", "D"]));
        let graph = results.finalize();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(
            chains(&graph, "D"),
            vec![vec!["D", "C", "B", "A"], vec!["D", "B", "A"]]
        );
    }

    #[test]
    fn prefix_of_chain_is_not_a_match() {
        let mut results = GraphResults::new();
        results.add(&path_connections(&["X", "A", "B"]));
        results.add(&path_connections(&["A", "B"]));
        let graph = results.finalize();

        // B reached directly from A is a different pattern to B via A from X
        assert_eq!(
            chains(&graph, "B"),
            vec![vec!["B", "A", "X"], vec!["B", "A"]]
        );
        assert_eq!(chains(&graph, "A"), vec![vec!["A", "X"], vec!["A"]]);
    }
}
