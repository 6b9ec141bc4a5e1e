use std::path::PathBuf;

/// Arguments for the build command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Log file to ingest
    pub input: PathBuf,

    /// Optional TOML configuration file
    pub config: Option<PathBuf>,

    /// Output path for the JSON graph document
    pub output_json: PathBuf,

    /// Output path for the id -> text CSV table (optional)
    pub nodes_csv: Option<PathBuf>,

    /// Output path for the DOT digraph (optional)
    pub output_dot: Option<PathBuf>,

    /// Override for the start-of-trace template
    pub start_line: Option<String>,

    /// Override for the connector templates (replaces the configured set)
    pub connectors: Vec<String>,

    /// Override for the line pattern
    pub line_pattern: Option<String>,

    /// Override for the similarity threshold
    pub threshold: Option<f64>,

    /// Skip nodes already checked during a lookup
    pub dedup: bool,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Maximum rare transitions listed in the summary
    pub max_rare: usize,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            config: None,
            output_json: PathBuf::from("graph.json"),
            nodes_csv: None,
            output_dot: None,
            start_line: None,
            connectors: Vec::new(),
            line_pattern: None,
            threshold: None,
            dedup: false,
            print_summary: false,
            max_rare: 20,
        }
    }
}
