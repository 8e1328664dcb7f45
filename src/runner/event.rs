use crate::Result;
use crate::aggregator::{Browser, Report, ResultAggregator, RunSummary, TestResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One notification from the test host, tagged by `"event"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    BrowserError {
        browser: Browser,
        #[serde(default)]
        error: Value,
    },
    SpecComplete {
        browser: Browser,
        result: TestResult,
    },
    RunComplete {
        #[serde(default)]
        browsers: Vec<Browser>,
        #[serde(default)]
        summary: RunSummary,
    },
}

impl HostEvent {
    /// Feed the event to `aggregator`; returns the report when a run completes
    pub fn apply(self, aggregator: &mut ResultAggregator) -> Result<Option<Report>> {
        match self {
            HostEvent::BrowserError { browser, error } => {
                aggregator.on_browser_error(&browser, error);
                Ok(None)
            }
            HostEvent::SpecComplete { browser, result } => {
                aggregator.on_spec_complete(&browser, result);
                Ok(None)
            }
            HostEvent::RunComplete { browsers, summary } => {
                aggregator.on_run_complete(&browsers, &summary).map(Some)
            }
        }
    }
}
