//! Logging abstractions for runtime-agnostic logging

mod console;
pub mod file_logger;
mod memory;
mod noop;
mod traits;

pub use console::ConsoleLogger;
pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use traits::{Logger, LoggerExt, SharedLogger};

pub use file_logger::{clear_log, debug, error, info, log, log_file_path, warn, FileLogger, LogLevel};
