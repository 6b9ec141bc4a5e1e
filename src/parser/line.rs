//! Field extraction for a single log line.

use crate::utils::config::DEFAULT_LINE_PATTERN;
use crate::utils::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One parsed log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Thread label of the producing actor
    pub thread: String,

    /// Log category / level
    pub category: String,

    /// Trimmed message text
    pub message: String,
}

impl LogRecord {
    pub fn new(
        thread: impl Into<String>,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            thread: thread.into(),
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Regex-driven line parser
///
/// Capture group 1 is the thread, 2 the category, 3 the message. The
/// pattern may match anywhere in the line.
#[derive(Debug, Clone)]
pub struct LineParser {
    pattern: Regex,
}

impl LineParser {
    /// Compile `pattern`
    ///
    /// # Errors
    /// * `ConfigError::InvalidPattern` - pattern does not compile
    /// * `ConfigError::MissingCaptureGroups` - fewer than 3 capture groups
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern)?;

        // captures_len counts the implicit whole-match group
        let groups = pattern.captures_len() - 1;
        if groups < 3 {
            return Err(ConfigError::MissingCaptureGroups(groups));
        }

        Ok(Self { pattern })
    }

    /// Parser for `<date> <time>,<ms> [thread] category - message`
    pub fn with_default_pattern() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_LINE_PATTERN)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Extract the fields, or None when the line does not match
    pub fn parse_line(&self, line: &str) -> Option<LogRecord> {
        let captures = self.pattern.captures(line)?;
        let field = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str())
                .unwrap_or_default()
        };

        Some(LogRecord {
            thread: field(1).to_string(),
            category: field(2).to_string(),
            message: field(3).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_format() {
        let parser = LineParser::with_default_pattern().unwrap();
        let record = parser
            .parse_line("2017-03-14 10:22:01,532 [Planner-2] INFO - next task plans ")
            .unwrap();

        assert_eq!(record.thread, "Planner-2");
        assert_eq!(record.category, "INFO");
        assert_eq!(record.message, "next task plans");
    }

    #[test]
    fn test_unmatched_line() {
        let parser = LineParser::with_default_pattern().unwrap();
        assert!(parser.parse_line("stack trace continuation").is_none());
    }

    #[test]
    fn test_bad_pattern() {
        assert!(matches!(
            LineParser::new("([unclosed"),
            Err(ConfigError::InvalidPattern(_))
        ));
    }
}
