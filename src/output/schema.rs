//! Output JSON schema definitions for graph documents.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::graph::{GraphSnapshot, IngestStats};
use crate::parser::ParseStats;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level graph document written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Log the graph was built from
    pub source: String,

    /// Walker counters
    pub stats: IngestStats,

    /// Reader counters (absent when records came from memory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse: Option<ParseStats>,

    /// Nodes and edges reachable from the root
    pub graph: GraphSnapshot,

    /// Timestamp when the document was generated
    pub generated_at: String,
}

impl GraphDocument {
    pub fn new(
        source: impl Into<String>,
        stats: IngestStats,
        parse: Option<ParseStats>,
        graph: GraphSnapshot,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            stats,
            parse,
            graph,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
