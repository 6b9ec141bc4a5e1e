//! JSON graph document writer.
//!
//! Writes GraphDocument structs to JSON files with proper formatting.

use super::schema::GraphDocument;
use super::{ensure_parent_dir, validate_path};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a graph document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let doc = GraphDocument::new("run.log", stats, None, snapshot);
/// write_graph(&doc, "graph.json")?;
/// ```
pub fn write_graph(doc: &GraphDocument, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing graph to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, doc).map_err(OutputError::SerializationFailed)?;

    info!(
        "Graph written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a graph document to a pretty JSON string
pub fn graph_to_string(doc: &GraphDocument) -> Result<String, OutputError> {
    serde_json::to_string_pretty(doc).map_err(OutputError::SerializationFailed)
}

/// Read a graph document from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_graph(input_path: impl AsRef<Path>) -> Result<GraphDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading graph from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let doc: GraphDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Graph loaded: version {}, {} nodes",
        doc.version,
        doc.graph.node_count()
    );

    Ok(doc)
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
