pub mod aggregator;
pub mod config;
pub mod emitter;
pub mod error;
pub mod logger;
pub mod metadata;
pub mod runner;

// Re-export commonly used types
pub use aggregator::{Browser, Report, ResultAggregator, RunSummary, TestResult};
pub use config::ReporterConfig;
pub use error::{ReportError, Result};
