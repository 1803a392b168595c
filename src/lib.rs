// Library interface for steptracker
// The binary and the integration tests go through these modules

pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod formulas;
pub mod logging;
pub mod models;
pub mod parser;
pub mod report;

// Re-export commonly used types for convenience
pub use models::*;
pub use error::{ErrorSeverity, ParseError, Result, TrackerError, ValidationError};
pub use report::{
    day_action_info, day_summary, training_info, training_summary, training_summary_for,
    DaySummary, TrainingSummary,
};
pub use batch::{process_file, process_records, BatchReport};
pub use config::AppConfig;
pub use export::{ExportError, ExportFormat};
pub use logging::{LogConfig, LogFormat, LogLevel};
