//! Build command implementation.
//!
//! The build command:
//! 1. Resolves the configuration (file, then CLI overrides)
//! 2. Reads and parses the log
//! 3. Walks every record through the template graph
//! 4. Flattens the graph
//! 5. Writes output files

use super::models::BuildArgs;
use crate::analysis::{calculate_edge_distribution, render_terminal_summary};
use crate::graph::{flatten, TraceWalker};
use crate::output::{
    render_dot, write_dot, write_graph, write_node_table, DotConfig, GraphDocument,
};
use crate::parser::{read_log, LineParser};
use crate::utils::{load_config, GraphConfig};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the build command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The graph document that was written
///
/// # Errors
/// * Invalid configuration
/// * Log read failures
/// * File write errors
pub fn execute_build(args: BuildArgs) -> Result<GraphDocument> {
    let start_time = Instant::now();

    info!("Starting build for log: {}", args.input.display());

    // Step 1: Configuration
    info!("Step 1/5: Resolving configuration...");
    let config = resolve_config(&args)?;
    debug!(
        "Start line: {:?}, {} connector(s), threshold {}",
        config.start_line,
        config.connector_lines.len(),
        config.similarity.threshold
    );

    // Step 2: Read log
    info!("Step 2/5: Reading log...");
    let parser = LineParser::new(&config.line_pattern).context("Invalid line pattern")?;
    let parsed = read_log(&args.input, &parser)
        .with_context(|| format!("Failed to read log {}", args.input.display()))?;
    info!(
        "Parsed {}/{} lines ({} unparsed)",
        parsed.stats.parsed_lines, parsed.stats.total_lines, parsed.stats.unparsed_lines
    );

    // Step 3: Walk records
    info!("Step 3/5: Building template graph...");
    let mut walker = TraceWalker::new(&config).context("Invalid graph configuration")?;
    walker.ingest_all(&parsed.records);

    // Step 4: Flatten
    info!("Step 4/5: Flattening graph...");
    let snapshot = flatten(walker.graph());
    let dist = calculate_edge_distribution(&snapshot);
    info!("Edge distribution: {}", dist.summary());

    let doc = GraphDocument::new(
        args.input.display().to_string(),
        walker.stats().clone(),
        Some(parsed.stats),
        snapshot,
    );

    // Step 5: Write outputs
    info!("Step 5/5: Writing output files...");
    write_graph(&doc, &args.output_json).context("Failed to write graph JSON")?;
    info!("✓ Graph written to: {}", args.output_json.display());

    if let Some(csv_path) = &args.nodes_csv {
        write_node_table(&doc.graph, csv_path).context("Failed to write node table")?;
        info!("✓ Node table written to: {}", csv_path.display());
    }

    if let Some(dot_path) = &args.output_dot {
        let title = args
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Log Graph".to_string());
        let dot = render_dot(&doc.graph, Some(&DotConfig::new().with_title(title)));
        write_dot(&dot, dot_path).context("Failed to write DOT graph")?;
        info!("✓ DOT graph written to: {}", dot_path.display());
    }

    if args.print_summary {
        println!("{}", render_terminal_summary(&doc, args.max_rare));
    }

    let elapsed = start_time.elapsed();
    info!("Build completed in {:.2}s", elapsed.as_secs_f64());

    Ok(doc)
}

/// Load the config file (or defaults) and apply CLI overrides
pub fn resolve_config(args: &BuildArgs) -> Result<GraphConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GraphConfig::default(),
    };

    if let Some(start_line) = &args.start_line {
        config.start_line = start_line.clone();
    }
    if !args.connectors.is_empty() {
        config.connector_lines = args.connectors.clone();
    }
    if let Some(pattern) = &args.line_pattern {
        config.line_pattern = pattern.clone();
    }
    if let Some(threshold) = args.threshold {
        config.similarity.threshold = threshold;
    }
    if args.dedup {
        config.search.dedup_revisits = true;
    }

    config.validate().context("Invalid graph configuration")?;
    Ok(config)
}

/// Validate build arguments
///
/// **Public** - can be called before execute_build for early validation
pub fn validate_args(args: &BuildArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        bail!("Input log path cannot be empty");
    }

    if args.input.is_dir() {
        bail!("Input log path is a directory: {}", args.input.display());
    }

    if args.output_json.as_os_str().is_empty() {
        bail!("Output path cannot be empty");
    }

    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            bail!("Threshold must be between 0.0 and 1.0");
        }
    }

    if args.max_rare > 1000 {
        bail!("max_rare is too large (max 1000)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_config_overrides() {
        let args = BuildArgs {
            input: PathBuf::from("run.log"),
            start_line: Some("boot".to_string()),
            connectors: vec!["handoff".to_string()],
            threshold: Some(0.75),
            dedup: true,
            ..Default::default()
        };

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.start_line, "boot");
        assert_eq!(config.connector_lines, vec!["handoff".to_string()]);
        assert_eq!(config.similarity.threshold, 0.75);
        assert!(config.search.dedup_revisits);
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(&BuildArgs::default()).unwrap();
        assert_eq!(config, GraphConfig::default());
    }

    #[test]
    fn test_validate_args_empty_input() {
        assert!(validate_args(&BuildArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_bad_threshold() {
        let args = BuildArgs {
            input: PathBuf::from("run.log"),
            threshold: Some(-0.1),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }
}
