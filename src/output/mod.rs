//! Output writers for graph data.
//!
//! This module handles writing data to disk in various formats:
//! - JSON graph documents
//! - CSV node tables (id -> template text)
//! - DOT digraphs for Graphviz

pub mod dot;
pub mod json;
pub mod schema;
pub mod table;

// Re-export main functions
pub use dot::{render_dot, write_dot, DotConfig};
pub use json::{graph_to_string, read_graph, write_graph};
pub use schema::GraphDocument;
pub use table::write_node_table;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directory of `path` if it is missing
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
