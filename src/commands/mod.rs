//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod build;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use build::{execute_build, resolve_config, validate_args};
pub use models::BuildArgs;
pub use utils::{check_graph_consistency, display_schema, display_version, validate_graph_file};
