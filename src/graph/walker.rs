//! Trace walker: feeds log lines through the template graph.
//!
//! Per line:
//! 1. Blank messages are skipped
//! 2. A start-of-trace line resets the cursor to the root and adopts the
//!    line's thread
//! 3. Lines from any other thread are discarded
//! 4. Connector templates route the cursor through their shared node
//! 5. The digit-stripped message is resolved to a node from the cursor

use super::ids::NodeId;
use super::node::TemplateGraph;
use super::similarity::{strip_digits, SimilarityMatcher};
use crate::parser::LogRecord;
use crate::utils::{ConfigError, GraphConfig};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What happened to a single ingested line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Message was blank
    Empty,

    /// Start-of-trace line; cursor reset to the root
    TraceStarted,

    /// Line belongs to an untracked thread
    ForeignThread,

    /// Cursor moved through connectors only (message was digits only)
    Connected(NodeId),

    /// Cursor moved to this node
    Resolved(NodeId),
}

/// Active position in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceCursor {
    pub current_node: NodeId,

    /// None until the first start-of-trace line
    pub current_thread: Option<String>,
}

/// Counters collected during ingestion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Lines handed to the walker
    pub lines: u64,

    /// Blank (or digit-only) messages skipped
    pub empty: u64,

    /// Start-of-trace lines seen
    pub traces_started: u64,

    /// Lines discarded for belonging to another thread
    pub foreign_thread: u64,

    /// Connector activations
    pub connector_hits: u64,

    /// Lines resolved to a template node
    pub resolved: u64,
}

/// Owns the template graph, the connectors and the trace cursor
#[derive(Debug, Clone)]
pub struct TraceWalker {
    graph: TemplateGraph,
    start_line: String,
    connectors: Vec<NodeId>,
    cursor: TraceCursor,
    stats: IngestStats,
}

impl TraceWalker {
    /// Create a walker with the root and connector nodes in place
    ///
    /// # Errors
    /// Any `ConfigError` from `GraphConfig::validate`
    pub fn new(config: &GraphConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let matcher = SimilarityMatcher::from(config.similarity);
        let mut graph = TemplateGraph::new(&config.start_line, matcher, config.search);
        let root = graph.root();

        let connectors = config
            .connector_lines
            .iter()
            .map(|line| graph.create_node(line, None))
            .collect::<Vec<_>>();

        debug!(
            "Walker ready: root {}, {} connector(s), threshold {}",
            root,
            connectors.len(),
            matcher.threshold()
        );

        Ok(Self {
            graph,
            start_line: config.start_line.trim().to_string(),
            connectors,
            cursor: TraceCursor {
                current_node: root,
                current_thread: None,
            },
            stats: IngestStats::default(),
        })
    }

    pub fn graph(&self) -> &TemplateGraph {
        &self.graph
    }

    pub fn cursor(&self) -> &TraceCursor {
        &self.cursor
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Connector node ids in registration order
    pub fn connectors(&self) -> &[NodeId] {
        &self.connectors
    }

    /// Feed one parsed line
    pub fn ingest_record(&mut self, record: &LogRecord) -> LineOutcome {
        self.ingest(&record.thread, &record.message)
    }

    /// Feed every record in order
    pub fn ingest_all<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        for record in records {
            self.ingest_record(record);
        }

        info!(
            "Ingested {} lines: {} traces, {} resolved, {} foreign, {} nodes",
            self.stats.lines,
            self.stats.traces_started,
            self.stats.resolved,
            self.stats.foreign_thread,
            self.graph.len()
        );
    }

    /// Feed one line given its thread label and message
    pub fn ingest(&mut self, thread: &str, message: &str) -> LineOutcome {
        self.stats.lines += 1;

        let message = message.trim();
        if message.is_empty() {
            self.stats.empty += 1;
            return LineOutcome::Empty;
        }

        let stripped = strip_digits(message);
        let matcher = *self.graph.matcher();

        if matcher.similar_enough(&stripped, &self.start_line) {
            self.cursor.current_node = self.graph.root();
            self.cursor.current_thread = Some(thread.to_string());
            self.stats.traces_started += 1;
            return LineOutcome::TraceStarted;
        }

        if self.cursor.current_thread.as_deref() != Some(thread) {
            self.stats.foreign_thread += 1;
            return LineOutcome::ForeignThread;
        }

        let mut connected = false;
        for &connector in &self.connectors {
            let is_match = self
                .graph
                .node(connector)
                .is_some_and(|node| matcher.similar_enough(&node.text, message));
            if !is_match {
                continue;
            }

            let current = self.cursor.current_node;
            self.graph.adopt(connector, current);
            self.graph.record_transition(current, connector);
            self.cursor.current_node = connector;
            self.stats.connector_hits += 1;
            connected = true;
        }

        let stripped = stripped.trim();
        if stripped.is_empty() {
            self.stats.empty += 1;
            return if connected {
                LineOutcome::Connected(self.cursor.current_node)
            } else {
                LineOutcome::Empty
            };
        }

        let next = self.graph.resolve_next(self.cursor.current_node, stripped);
        self.cursor.current_node = next;
        self.stats.resolved += 1;
        LineOutcome::Resolved(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GraphConfig {
        GraphConfig::default()
            .with_start_line("begin run 1")
            .with_connectors(["next task plans"])
    }

    #[test]
    fn test_root_and_connectors_allocated_first() {
        let walker = TraceWalker::new(&config()).unwrap();
        assert_eq!(walker.graph().root(), 1);
        assert_eq!(walker.connectors(), &[2]);
        assert_eq!(walker.graph().len(), 2);
    }

    #[test]
    fn test_lines_before_start_are_discarded() {
        let mut walker = TraceWalker::new(&config()).unwrap();
        assert_eq!(walker.ingest("main", "loading tiles"), LineOutcome::ForeignThread);
        assert_eq!(walker.graph().len(), 2);
    }

    #[test]
    fn test_start_line_adopts_thread() {
        let mut walker = TraceWalker::new(&config()).unwrap();
        assert_eq!(walker.ingest("worker-3", "begin run 7"), LineOutcome::TraceStarted);
        assert_eq!(walker.cursor().current_thread.as_deref(), Some("worker-3"));
        assert_eq!(walker.cursor().current_node, walker.graph().root());
    }

    #[test]
    fn test_blank_message_skipped() {
        let mut walker = TraceWalker::new(&config()).unwrap();
        walker.ingest("main", "begin run 1");
        assert_eq!(walker.ingest("main", "   "), LineOutcome::Empty);
        assert_eq!(walker.ingest("main", "12345"), LineOutcome::Empty);
        assert_eq!(walker.stats().empty, 2);
        assert_eq!(walker.graph().len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = config().with_connectors(Vec::<String>::new());
        assert!(TraceWalker::new(&config).is_err());
    }
}
