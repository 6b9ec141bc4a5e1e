//! Configuration and constants for graph building.
//!
//! Every value has a default here; a TOML file and CLI flags can override
//! them. `GraphConfig::validate` rejects malformed settings before ingestion.

use super::error::ConfigError;
use crate::parser::LineParser;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Lines scoring strictly above this are the same template
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Looser threshold kept for coarse matching; the walker does not use it
pub const DEFAULT_COARSE_SIMILARITY_THRESHOLD: f64 = 0.4;

/// How far up the parent chain a lookup may climb
pub const DEFAULT_MAX_ANCESTOR_HOPS: usize = 10;

/// Template that marks the start of a new trace
pub const DEFAULT_START_LINE: &str = "begin level control 1 replan";

/// Templates that recur identically in every trace
pub const DEFAULT_CONNECTOR_LINES: &[&str] = &[
    "next task plans",
    "end level control  replan. computation time =  msec PlanResult=NoError errorCounter= noActionCounter=",
];

/// `<date> <time>,<ms> [thread] category - message`
pub const DEFAULT_LINE_PATTERN: &str =
    r"[0-9]*-[0-9]*-[0-9]* [0-9]*:[0-9]*:[0-9]*,[0-9]* \[(.*)\] (\S*)[\s-]*(.*)";

/// Edges observed exactly this many times are flagged as rare
pub const RARE_EDGE_COUNT: u64 = 1;

/// Complete graph-building configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Start-of-trace template (also the root node's text)
    pub start_line: String,

    /// Connector templates, in registration order
    pub connector_lines: Vec<String>,

    /// Regex with thread, category and message capture groups
    pub line_pattern: String,

    /// Similarity thresholds
    pub similarity: SimilarityConfig,

    /// Bounded search settings
    pub search: SearchConfig,
}

/// Similarity thresholds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub threshold: f64,
    pub coarse_threshold: f64,
}

/// Bounded search settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of parent hops during lookup
    pub max_ancestor_hops: usize,

    /// Skip nodes already checked earlier in the same lookup
    pub dedup_revisits: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            start_line: DEFAULT_START_LINE.to_string(),
            connector_lines: DEFAULT_CONNECTOR_LINES
                .iter()
                .map(|line| line.to_string())
                .collect(),
            line_pattern: DEFAULT_LINE_PATTERN.to_string(),
            similarity: SimilarityConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            coarse_threshold: DEFAULT_COARSE_SIMILARITY_THRESHOLD,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_ancestor_hops: DEFAULT_MAX_ANCESTOR_HOPS,
            dedup_revisits: false,
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_line(mut self, start_line: impl Into<String>) -> Self {
        self.start_line = start_line.into();
        self
    }

    pub fn with_connectors<I, S>(mut self, connectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connector_lines = connectors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity.threshold = threshold;
        self
    }

    pub fn with_dedup_revisits(mut self, dedup: bool) -> Self {
        self.search.dedup_revisits = dedup;
        self
    }

    /// Check the configuration before ingestion starts
    ///
    /// # Errors
    /// * `ConfigError::EmptyStartLine` - start line is blank
    /// * `ConfigError::NoConnectors` / `EmptyConnector` - connector set is unusable
    /// * `ConfigError::InvalidThreshold` - threshold outside 0.0..=1.0
    /// * `ConfigError::InvalidPattern` / `MissingCaptureGroups` - bad line pattern
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_line.trim().is_empty() {
            return Err(ConfigError::EmptyStartLine);
        }

        if self.connector_lines.is_empty() {
            return Err(ConfigError::NoConnectors);
        }

        if let Some(index) = self
            .connector_lines
            .iter()
            .position(|line| line.trim().is_empty())
        {
            return Err(ConfigError::EmptyConnector(index));
        }

        check_threshold("similarity threshold", self.similarity.threshold)?;
        check_threshold("coarse similarity threshold", self.similarity.coarse_threshold)?;

        LineParser::new(&self.line_pattern)?;

        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

/// Load and validate a configuration from a TOML file
///
/// Missing keys fall back to the defaults above.
///
/// # Example
/// ```ignore
/// let config = load_config("logpath.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GraphConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: GraphConfig = toml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GraphConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_connectors_rejected() {
        let config = GraphConfig::default().with_connectors(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(ConfigError::NoConnectors)));
    }

    #[test]
    fn test_blank_connector_rejected() {
        let config = GraphConfig::default().with_connectors(["next task plans", "  "]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyConnector(1))
        ));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = GraphConfig::default().with_threshold(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_pattern_needs_three_groups() {
        let config = GraphConfig {
            line_pattern: r"\[(.*)\] (.*)".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCaptureGroups(2))
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GraphConfig = toml::from_str(
            r#"
            start_line = "boot sequence"

            [search]
            dedup_revisits = true
            "#,
        )
        .unwrap();

        assert_eq!(config.start_line, "boot sequence");
        assert!(config.search.dedup_revisits);
        assert_eq!(config.search.max_ancestor_hops, DEFAULT_MAX_ANCESTOR_HOPS);
        assert_eq!(config.similarity.threshold, DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(config.connector_lines.len(), DEFAULT_CONNECTOR_LINES.len());
    }
}
