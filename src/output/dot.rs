//! DOT (Graphviz) rendering of a graph snapshot.
//!
//! One edge per (source, target) pair, labelled with its count. Edges
//! seen exactly once are drawn red so rare branches stand out.

use super::{ensure_parent_dir, validate_path};
use crate::graph::GraphSnapshot;
use crate::utils::config::RARE_EDGE_COUNT;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// DOT rendering options
#[derive(Debug, Clone)]
pub struct DotConfig {
    pub title: String,

    /// Prefix node labels with their id
    pub show_ids: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            title: "Log Graph".to_string(),
            show_ids: true,
        }
    }
}

impl DotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Render a snapshot as a DOT digraph
pub fn render_dot(snapshot: &GraphSnapshot, config: Option<&DotConfig>) -> String {
    let config = config.cloned().unwrap_or_default();
    let mut dot = String::new();

    dot.push_str(&format!("digraph \"{}\" {{\n", escape(&config.title)));
    dot.push_str("  node [shape=box, fontname=\"monospace\"];\n");

    for (id, text) in &snapshot.nodes {
        let label = if config.show_ids {
            format!("{}: {}", id, text)
        } else {
            text.clone()
        };
        let style = if *id == snapshot.root {
            ", style=bold"
        } else {
            ""
        };
        dot.push_str(&format!("  n{} [label=\"{}\"{}];\n", id, escape(&label), style));
    }

    for (source, target, count) in snapshot.iter_edges() {
        let color = if count == RARE_EDGE_COUNT { "red" } else { "black" };
        dot.push_str(&format!(
            "  n{} -> n{} [label=\"{}\", color={}];\n",
            source, target, count, color
        ));
    }

    dot.push_str("}\n");

    debug!(
        "Rendered DOT with {} nodes and {} edges",
        snapshot.node_count(),
        snapshot.edge_count()
    );
    dot
}

/// Write DOT content to a file
pub fn write_dot(dot_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing DOT graph to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(dot_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("DOT graph written ({} bytes)", dot_content.len());
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
