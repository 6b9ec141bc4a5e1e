//! Analysis of flattened template graphs.
//!
//! This module derives from a snapshot:
//! - Rare transitions (anomaly candidates)
//! - The dominant control-flow path
//! - Transition count distribution
//! - A terminal summary

pub mod metrics;
pub mod summary;

// Re-export main types and functions
pub use metrics::{
    calculate_edge_distribution, dominant_path, find_rare_edges, EdgeDistribution, EdgeRecord,
};
pub use summary::render_terminal_summary;
