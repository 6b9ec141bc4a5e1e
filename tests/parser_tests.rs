use logpath_studio::parser::{parse_lines, read_log, LineParser, LogRecord};
use logpath_studio::utils::ConfigError;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

const SAMPLE_LOG: &str = "\
2017-03-14 10:22:01,100 [Planner-1] INFO - begin level control 1 replan
2017-03-14 10:22:01,120 [Planner-1] DEBUG - loading 12 tiles
java.lang.IllegalStateException: detached stack frame
2017-03-14 10:22:01,140 [Monitor] WARN - heartbeat 88
2017-03-14 10:22:01,160 [Planner-1] DEBUG - next task plans
";

#[test]
fn test_parse_line_fields() {
    let parser = LineParser::with_default_pattern().unwrap();
    let record = parser
        .parse_line("2017-03-14 10:22:01,140 [Monitor] WARN - heartbeat 88")
        .unwrap();

    assert_eq!(record, LogRecord::new("Monitor", "WARN", "heartbeat 88"));
}

#[test]
fn test_parse_line_without_separator() {
    let parser = LineParser::with_default_pattern().unwrap();
    let record = parser
        .parse_line("2017-03-14 10:22:01,140 [main] INFO plain message")
        .unwrap();

    assert_eq!(record.category, "INFO");
    assert_eq!(record.message, "plain message");
}

#[test]
fn test_custom_pattern() {
    let parser = LineParser::new(r"^(\w+)\|(\w+)\|(.*)$").unwrap();
    let record = parser.parse_line("worker|ERROR|disk full").unwrap();

    assert_eq!(record, LogRecord::new("worker", "ERROR", "disk full"));
    assert!(parser.parse_line("no pipes here").is_none());
}

#[test]
fn test_pattern_with_too_few_groups() {
    assert!(matches!(
        LineParser::new(r"(\w+) (.*)"),
        Err(ConfigError::MissingCaptureGroups(2))
    ));
}

#[test]
fn test_parse_lines_drops_unmatched() {
    let parser = LineParser::with_default_pattern().unwrap();
    let parsed = parse_lines(Cursor::new(SAMPLE_LOG), &parser).unwrap();

    assert_eq!(parsed.stats.total_lines, 5);
    assert_eq!(parsed.stats.parsed_lines, 4);
    assert_eq!(parsed.stats.unparsed_lines, 1);
    assert_eq!(parsed.records[2].thread, "Monitor");
}

#[test]
fn test_read_log_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_LOG.as_bytes()).unwrap();

    let parser = LineParser::with_default_pattern().unwrap();
    let parsed = read_log(file.path(), &parser).unwrap();

    assert_eq!(parsed.records.len(), 4);
    assert_eq!(parsed.records[1].message, "loading 12 tiles");
}

#[test]
fn test_read_log_directory_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let parser = LineParser::with_default_pattern().unwrap();
    assert!(read_log(temp_dir.path(), &parser).is_err());
}
