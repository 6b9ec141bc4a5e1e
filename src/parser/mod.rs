//! Log parsing.
//!
//! This module handles:
//! - Extracting thread, category and message fields from a raw line
//! - Reading a log file into records, counting lines that do not parse

pub mod line;
pub mod reader;

// Re-export main types
pub use line::{LineParser, LogRecord};
pub use reader::{parse_lines, read_log, ParseStats, ParsedLog};
