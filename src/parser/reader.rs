//! Read a log file into parsed records.
//!
//! Lines are decoded lossily so a stray invalid byte does not abort a
//! whole file. Lines that do not match the pattern are counted and dropped.

use super::line::{LineParser, LogRecord};
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line counters for one log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub total_lines: u64,
    pub parsed_lines: u64,
    pub unparsed_lines: u64,
}

/// Records extracted from a log, in input order
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    pub records: Vec<LogRecord>,
    pub stats: ParseStats,
}

/// Read and parse a log file
///
/// # Errors
/// * `ParseError::InvalidInput` - path is missing or a directory
/// * `ParseError::ReadFailed` - I/O error while reading
pub fn read_log(path: impl AsRef<Path>, parser: &LineParser) -> Result<ParsedLog, ParseError> {
    let path = path.as_ref();
    info!("Reading log: {}", path.display());

    if path.is_dir() {
        return Err(ParseError::InvalidInput(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }
    if !path.exists() {
        return Err(ParseError::InvalidInput(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    parse_lines(BufReader::new(file), parser)
}

/// Parse every line from `reader`
pub fn parse_lines(mut reader: impl BufRead, parser: &LineParser) -> Result<ParsedLog, ParseError> {
    let mut parsed = ParsedLog::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        parsed.stats.total_lines += 1;
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        match parser.parse_line(line) {
            Some(record) => {
                parsed.stats.parsed_lines += 1;
                parsed.records.push(record);
            }
            None => {
                parsed.stats.unparsed_lines += 1;
                debug!("Could not parse line {}: {}", parsed.stats.total_lines, line);
            }
        }
    }

    if parsed.stats.total_lines > 0 && parsed.stats.parsed_lines == 0 {
        warn!(
            "None of {} lines matched pattern {}",
            parsed.stats.total_lines,
            parser.pattern()
        );
    }

    debug!(
        "Parsed {}/{} lines",
        parsed.stats.parsed_lines, parsed.stats.total_lines
    );

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_lines_counts() {
        let log = "2017-03-14 10:22:01,532 [T1] INFO - begin level control 1 replan\r\n\
                   continuation without header\n\
                   2017-03-14 10:22:01,533 [T1] DEBUG - next task plans\n";
        let parser = LineParser::with_default_pattern().unwrap();
        let parsed = parse_lines(Cursor::new(log), &parser).unwrap();

        assert_eq!(parsed.stats.total_lines, 3);
        assert_eq!(parsed.stats.parsed_lines, 2);
        assert_eq!(parsed.stats.unparsed_lines, 1);
        assert_eq!(parsed.records[0].message, "begin level control 1 replan");
        assert_eq!(parsed.records[1].category, "DEBUG");
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let mut bytes = b"2017-03-14 10:22:01,532 [T1] INFO - caf".to_vec();
        bytes.push(0xff);
        bytes.push(b'\n');

        let parser = LineParser::with_default_pattern().unwrap();
        let parsed = parse_lines(Cursor::new(bytes), &parser).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.records[0].message.starts_with("caf"));
    }

    #[test]
    fn test_read_missing_file() {
        let parser = LineParser::with_default_pattern().unwrap();
        assert!(matches!(
            read_log("/definitely/not/here.log", &parser),
            Err(ParseError::InvalidInput(_))
        ));
    }
}
