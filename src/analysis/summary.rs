//! Terminal rendering of a graph summary.

use super::metrics::{calculate_edge_distribution, dominant_path, find_rare_edges};
use crate::output::schema::GraphDocument;
use colored::*;

/// Longest template text shown before truncation
const MAX_TEXT_WIDTH: usize = 72;

/// Render a human-readable summary of a graph document
///
/// At most `max_rare` rare edges are listed.
pub fn render_terminal_summary(doc: &GraphDocument, max_rare: usize) -> String {
    let mut out = String::new();

    out.push_str(&render_header(doc));
    out.push_str(&render_counts(doc));
    out.push_str(&render_dominant_path(doc));
    out.push_str(&render_rare_edges(doc, max_rare));

    out
}

fn render_header(doc: &GraphDocument) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Log Path Graph Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Source: {}\n", doc.source));
    out.push_str("---------------------------------------------------\n\n");
    out
}

fn render_counts(doc: &GraphDocument) -> String {
    let stats = &doc.stats;
    let dist = calculate_edge_distribution(&doc.graph);

    let mut out = String::new();
    out.push_str(&format!(
        "Lines: {} ingested, {} traces, {} resolved, {} other-thread, {} empty\n",
        stats.lines, stats.traces_started, stats.resolved, stats.foreign_thread, stats.empty
    ));
    out.push_str(&format!(
        "Graph: {} templates, {} edges, {} transitions\n",
        doc.graph.node_count(),
        dist.edge_count,
        dist.total_transitions
    ));
    out.push_str(&format!("{}\n", dist.summary()));
    out
}

fn render_dominant_path(doc: &GraphDocument) -> String {
    let path = dominant_path(&doc.graph);

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "Dominant path:".bold()));
    for (step, id) in path.iter().enumerate() {
        let text = doc.graph.text(*id).unwrap_or("?");
        out.push_str(&format!(
            "  {:>3}. [{}] {}\n",
            step + 1,
            id.to_string().cyan(),
            truncate(text)
        ));
    }
    out
}

fn render_rare_edges(doc: &GraphDocument, max_rare: usize) -> String {
    let rare = find_rare_edges(&doc.graph);

    let mut out = String::new();
    if rare.is_empty() {
        out.push_str(&format!("\n{}\n", "No rare transitions.".green()));
        return out;
    }

    out.push_str(&format!(
        "\n{} ({} total):\n",
        "Rare transitions".red().bold(),
        rare.len()
    ));
    for edge in rare.iter().take(max_rare) {
        out.push_str(&format!(
            "  [{}] {}\n    -> [{}] {}\n",
            edge.source,
            truncate(doc.graph.text(edge.source).unwrap_or("?")),
            edge.target,
            truncate(doc.graph.text(edge.target).unwrap_or("?")).red()
        ));
    }
    if rare.len() > max_rare {
        out.push_str(&format!("  ... and {} more\n", rare.len() - max_rare));
    }
    out
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_TEXT_WIDTH {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_TEXT_WIDTH - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphSnapshot, IngestStats};
    use std::collections::BTreeMap;

    fn document() -> GraphDocument {
        let mut graph = GraphSnapshot {
            root: 1,
            ..Default::default()
        };
        graph.nodes.insert(1, "begin".to_string());
        graph.nodes.insert(2, "load config".to_string());
        graph.nodes.insert(3, "retry connect".to_string());
        graph.edges.insert(1, BTreeMap::from([(2, 4)]));
        graph.edges.insert(2, BTreeMap::from([(3, 1)]));

        GraphDocument::new("test.log", IngestStats::default(), None, graph)
    }

    #[test]
    fn test_summary_lists_path_and_rare_edges() {
        colored::control::set_override(false);
        let out = render_terminal_summary(&document(), 10);

        assert!(out.contains("Source: test.log"));
        assert!(out.contains("[2] load config"));
        assert!(out.contains("Rare transitions (1 total)"));
        assert!(out.contains("-> [3] retry connect"));
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "x".repeat(100);
        let short = truncate(&long);
        assert_eq!(short.chars().count(), MAX_TEXT_WIDTH);
        assert!(short.ends_with("..."));
    }
}
