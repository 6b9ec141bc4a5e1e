//! Logpath Studio
//!
//! Builds a directed graph of log-line templates from a structured log,
//! counting how often each template follows another. The graph exposes the
//! dominant control-flow path of a program and the rare branches around it.
//!
//! This crate provides the core implementation for the `logpath` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! logpath build --input run.log --dot run.dot --summary
//! ```
//!
//! As a library:
//!
//! ```ignore
//! use logpath_studio::graph::{flatten, TraceWalker};
//! use logpath_studio::utils::GraphConfig;
//!
//! let mut walker = TraceWalker::new(&GraphConfig::default())?;
//! walker.ingest("Planner-1", "begin level control 1 replan");
//! walker.ingest("Planner-1", "loading 12 tiles");
//! let snapshot = flatten(walker.graph());
//! ```

pub mod analysis;
pub mod commands;
pub mod graph;
pub mod output;
pub mod parser;
pub mod utils;
