//! Template graph construction.
//!
//! This module turns a sequence of log messages into:
//! - Template nodes (near-duplicate messages clustered by fuzzy similarity)
//! - Transition counts between consecutive templates
//! - A flattened snapshot for export and analysis

pub mod flatten;
pub mod ids;
pub mod node;
pub mod similarity;
pub mod walker;

// Re-export main types and functions
pub use flatten::{flatten, flatten_from, GraphSnapshot};
pub use ids::{IdAllocator, NodeId};
pub use node::{TemplateGraph, TemplateNode};
pub use similarity::{similar_enough, similarity, strip_digits, SimilarityMatcher};
pub use walker::{IngestStats, LineOutcome, TraceCursor, TraceWalker};
