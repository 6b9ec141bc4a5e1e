//! Metrics over a flattened template graph.
//!
//! - Rare edges: transitions seen exactly once, the usual anomaly candidates
//! - Dominant path: the heaviest walk from the root
//! - Edge distribution: how concentrated the transition counts are

use crate::graph::{GraphSnapshot, NodeId};
use crate::utils::config::RARE_EDGE_COUNT;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single weighted transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    pub count: u64,
}

/// Edges observed exactly once, in id order
pub fn find_rare_edges(snapshot: &GraphSnapshot) -> Vec<EdgeRecord> {
    let rare: Vec<EdgeRecord> = snapshot
        .iter_edges()
        .filter(|(_, _, count)| *count == RARE_EDGE_COUNT)
        .map(|(source, target, count)| EdgeRecord {
            source,
            target,
            count,
        })
        .collect();

    debug!("Found {} rare edges", rare.len());
    rare
}

/// Follow the heaviest outgoing edge from the root until a node repeats
///
/// Ties go to the lowest target id. The root is always the first element.
pub fn dominant_path(snapshot: &GraphSnapshot) -> Vec<NodeId> {
    let mut path = vec![snapshot.root];
    let mut seen: HashSet<NodeId> = HashSet::from([snapshot.root]);
    let mut current = snapshot.root;

    while let Some(targets) = snapshot.edges.get(&current) {
        // max_by_key keeps the last maximum, so compare on reversed id
        let Some((&next, _)) = targets
            .iter()
            .max_by_key(|(id, count)| (**count, std::cmp::Reverse(**id)))
        else {
            break;
        };

        if !seen.insert(next) {
            break;
        }
        path.push(next);
        current = next;
    }

    path
}

/// Transition count distribution statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeDistribution {
    /// Distinct (source, target) pairs
    pub edge_count: usize,

    /// Sum of all counts
    pub total_transitions: u64,

    /// Mean count per edge
    pub mean_count: u64,

    /// Median count per edge
    pub median_count: u64,

    /// Heaviest single edge
    pub max_count: u64,

    /// Edges seen exactly once
    pub rare_edges: usize,

    /// Percentage of edges that are rare
    pub rare_percentage: f64,
}

impl EdgeDistribution {
    /// Human-readable summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Edges: {} | Transitions: {} | Mean: {} | Median: {} | Max: {} | Rare: {} ({:.1}%)",
            self.edge_count,
            self.total_transitions,
            self.mean_count,
            self.median_count,
            self.max_count,
            self.rare_edges,
            self.rare_percentage
        )
    }
}

/// Calculate edge count distribution
pub fn calculate_edge_distribution(snapshot: &GraphSnapshot) -> EdgeDistribution {
    let mut counts: Vec<u64> = snapshot.iter_edges().map(|(_, _, count)| count).collect();
    if counts.is_empty() {
        return EdgeDistribution::default();
    }

    counts.sort_unstable();

    let edge_count = counts.len();
    let total_transitions: u64 = counts.iter().sum();
    let rare_edges = counts.iter().filter(|c| **c == RARE_EDGE_COUNT).count();

    EdgeDistribution {
        edge_count,
        total_transitions,
        mean_count: total_transitions / edge_count as u64,
        median_count: counts[edge_count / 2],
        max_count: counts[edge_count - 1],
        rare_edges,
        rare_percentage: (rare_edges as f64 / edge_count as f64) * 100.0,
    }
}
