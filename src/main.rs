//! Logpath Studio CLI
//!
//! Builds transition graphs of log-line templates from structured logs.
//! Writes a JSON graph, an optional node table and an optional DOT digraph.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use logpath_studio::commands::{
    display_schema, display_version, execute_build, validate_args, validate_graph_file, BuildArgs,
};

/// Logpath Studio - template transition graphs from logs
#[derive(Parser, Debug)]
#[command(name = "logpath")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a template graph from a log file
    Build {
        /// Log file to ingest
        #[arg(short, long)]
        input: PathBuf,

        /// TOML configuration file
        #[arg(short, long, env = "LOGPATH_CONFIG")]
        config: Option<PathBuf>,

        /// Output path for the JSON graph
        #[arg(short, long, default_value = "artifacts/graph.json")]
        output: PathBuf,

        /// Output path for the id -> text CSV table
        #[arg(long, default_missing_value = "artifacts/node_to_line.csv", num_args = 0..=1)]
        nodes_csv: Option<PathBuf>,

        /// Output path for the DOT digraph
        #[arg(long, default_missing_value = "artifacts/graph.dot", num_args = 0..=1)]
        dot: Option<PathBuf>,

        /// Start-of-trace template
        #[arg(long)]
        start_line: Option<String>,

        /// Connector template (repeatable; replaces the configured set)
        #[arg(long = "connector")]
        connectors: Vec<String>,

        /// Regex with thread, category and message capture groups
        #[arg(long)]
        pattern: Option<String>,

        /// Similarity threshold for the same template
        #[arg(long)]
        threshold: Option<f64>,

        /// Skip nodes already checked during a lookup
        #[arg(long)]
        dedup: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Maximum rare transitions listed in the summary
        #[arg(long, default_value = "20")]
        max_rare: usize,
    },

    /// Validate a graph JSON file
    Validate {
        /// Path to graph JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Build {
            input,
            config,
            output,
            nodes_csv,
            dot,
            start_line,
            connectors,
            pattern,
            threshold,
            dedup,
            summary,
            max_rare,
        } => {
            let args = BuildArgs {
                input,
                config,
                output_json: output,
                nodes_csv,
                output_dot: dot,
                start_line,
                connectors,
                line_pattern: pattern,
                threshold,
                dedup,
                print_summary: summary,
                max_rare,
            };

            // Validate args first
            validate_args(&args)?;

            execute_build(args)?;
        }

        Commands::Validate { file } => {
            validate_graph_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
