use crate::output::{read_graph, GraphDocument};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Validate a graph JSON file
pub fn validate_graph_file(file_path: PathBuf) -> Result<()> {
    println!("Validating graph: {}", file_path.display());

    let doc = read_graph(&file_path)
        .with_context(|| format!("Failed to read graph {}", file_path.display()))?;
    check_graph_consistency(&doc)?;

    println!("✓ Valid graph JSON");
    println!("  Version: {}", doc.version);
    println!("  Source: {}", doc.source);
    println!("  Templates: {}", doc.graph.node_count());
    println!("  Edges: {}", doc.graph.edge_count());
    println!("  Transitions: {}", doc.graph.total_transitions());
    println!("  Traces: {}", doc.stats.traces_started);

    Ok(())
}

/// Check that the root and every edge endpoint are known nodes and that
/// every count is positive
pub fn check_graph_consistency(doc: &GraphDocument) -> Result<()> {
    let graph = &doc.graph;

    if graph.text(graph.root).is_none() {
        bail!("Root node {} missing from node table", graph.root);
    }

    for (source, target, count) in graph.iter_edges() {
        if graph.text(source).is_none() {
            bail!("Edge source {} missing from node table", source);
        }
        if graph.text(target).is_none() {
            bail!("Edge target {} missing from node table", target);
        }
        if count == 0 {
            bail!("Edge {} -> {} has a zero count", source, target);
        }
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Logpath Graph Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  source: string           - Log file the graph was built from");
        println!("  stats: object            - Ingestion counters");
        println!("    lines: number          - Lines handed to the walker");
        println!("    traces_started: number - Start-of-trace lines seen");
        println!("    resolved: number       - Lines resolved to a template");
        println!("    foreign_thread: number - Lines from untracked threads");
        println!("  parse: object?           - Reader counters (total/parsed/unparsed)");
        println!("  graph: object            - Flattened template graph");
        println!("    root: number           - Start-of-trace node id");
        println!("    nodes: object          - Node id -> template text");
        println!("    edges: object          - Source id -> (target id -> count)");
        println!("  generated_at: string     - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Logpath Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Graph Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Builds transition graphs of log-line templates.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphSnapshot, IngestStats};
    use std::collections::BTreeMap;

    fn document(edges: BTreeMap<u64, BTreeMap<u64, u64>>) -> GraphDocument {
        let mut graph = GraphSnapshot {
            root: 1,
            edges,
            ..Default::default()
        };
        graph.nodes.insert(1, "begin".to_string());
        graph.nodes.insert(2, "step".to_string());
        GraphDocument::new("t.log", IngestStats::default(), None, graph)
    }

    #[test]
    fn test_consistent_graph() {
        let doc = document(BTreeMap::from([(1, BTreeMap::from([(2, 3)]))]));
        assert!(check_graph_consistency(&doc).is_ok());
    }

    #[test]
    fn test_dangling_edge_target() {
        let doc = document(BTreeMap::from([(1, BTreeMap::from([(9, 1)]))]));
        assert!(check_graph_consistency(&doc).is_err());
    }

    #[test]
    fn test_zero_count_edge() {
        let doc = document(BTreeMap::from([(1, BTreeMap::from([(2, 0)]))]));
        assert!(check_graph_consistency(&doc).is_err());
    }
}
