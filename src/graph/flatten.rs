//! Flatten the template graph into id-keyed node and edge tables.
//!
//! The graph has convergent paths and self-loops, so the walk keeps a
//! visited set and expands each node once. Edges into an already visited
//! node are still recorded at their source.

use super::ids::NodeId;
use super::node::TemplateGraph;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Read-only export of the reachable graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Node the walk started from
    pub root: NodeId,

    /// Node id -> template text
    pub nodes: BTreeMap<NodeId, String>,

    /// Source id -> (target id -> transition count); sinks are omitted
    pub edges: BTreeMap<NodeId, BTreeMap<NodeId, u64>>,
}

impl GraphSnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct (source, target) pairs
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    /// Sum of all transition counts
    pub fn total_transitions(&self) -> u64 {
        self.edges.values().flat_map(BTreeMap::values).sum()
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(String::as_str)
    }

    pub fn edge(&self, source: NodeId, target: NodeId) -> Option<u64> {
        self.edges.get(&source)?.get(&target).copied()
    }

    /// `(source, target, count)` in id order
    pub fn iter_edges(&self) -> impl Iterator<Item = (NodeId, NodeId, u64)> + '_ {
        self.edges.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |(target, count)| (*source, *target, *count))
        })
    }
}

/// Flatten everything reachable from the graph's root
pub fn flatten(graph: &TemplateGraph) -> GraphSnapshot {
    flatten_from(graph, graph.root())
}

/// Flatten everything reachable from `start`
pub fn flatten_from(graph: &TemplateGraph, start: NodeId) -> GraphSnapshot {
    let mut snapshot = GraphSnapshot {
        root: start,
        ..Default::default()
    };

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = graph.node(id) else {
            continue;
        };

        snapshot.nodes.insert(id, node.text.clone());

        for (&target, &count) in &node.outgoing {
            let targets = snapshot.edges.entry(id).or_default();
            *targets.entry(target).or_insert(0) += count;

            if !visited.contains(&target) {
                stack.push(target);
            }
        }
    }

    debug!(
        "Flattened {} nodes and {} edges from node {}",
        snapshot.node_count(),
        snapshot.edge_count(),
        start
    );

    snapshot
}
