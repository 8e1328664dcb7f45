pub mod collector;
pub mod formatter;
pub mod scoring;
pub mod types;

pub use collector::ResultAggregator;
pub use formatter::{DisplayErrorFormatter, ErrorFormatter};
pub use scoring::{ADVANCED_SUPPORT, BASIC_SUPPORT, score_results, sum_results, summarize};
pub use types::{
    Browser, BrowserId, BrowserReportEntry, CategoryCount, Report, RunSummary, ScoredSummary,
    Suite, TestResult,
};
