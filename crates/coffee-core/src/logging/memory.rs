//! Logger that keeps records in memory

use parking_lot::Mutex;

use super::file_logger::LogLevel;
use super::traits::Logger;

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Captures every record; used to assert on what a component reported
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages logged at exactly `level`
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.records.lock().iter().any(|r| r.message.contains(needle))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_memory_logger_captures_levels() {
        let logger = MemoryLogger::new();
        logger.info("catalog loaded");
        logger.warn("catalog fetch failed");

        assert_eq!(logger.records().len(), 2);
        assert_eq!(logger.messages_at(LogLevel::Warn), vec!["catalog fetch failed".to_string()]);
        assert!(logger.contains("loaded"));
        assert!(!logger.contains("route"));
    }

    #[test]
    fn test_macros_format_arguments() {
        let logger = Arc::new(MemoryLogger::new());
        crate::log_info!(logger, "found {} tools", 3);
        crate::log_error!(logger, "status {}", 503);

        assert_eq!(logger.messages_at(LogLevel::Info), vec!["found 3 tools".to_string()]);
        assert_eq!(logger.messages_at(LogLevel::Error), vec!["status 503".to_string()]);
    }
}
