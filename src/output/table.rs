//! CSV node table writer (id -> template text).

use super::{ensure_parent_dir, validate_path};
use crate::graph::GraphSnapshot;
use crate::utils::error::OutputError;
use log::info;
use std::path::Path;

/// Write one `id,text` row per node, in id order
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty or a directory
/// * `OutputError::CsvFailed` - CSV write error
pub fn write_node_table(
    snapshot: &GraphSnapshot,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing node table to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let mut wtr = csv::Writer::from_path(output_path)?;
    wtr.write_record(["id", "text"])?;

    for (id, text) in &snapshot.nodes {
        wtr.write_record([id.to_string().as_str(), text.as_str()])?;
    }

    wtr.flush()?;

    info!("Node table written ({} rows)", snapshot.node_count());
    Ok(())
}
