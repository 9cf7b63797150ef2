pub mod level;
pub mod log;

pub use level::LogLevel;
pub use log::{LogRecord, NewLogRecord};
