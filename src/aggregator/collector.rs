use super::formatter::{DisplayErrorFormatter, ErrorFormatter};
use super::scoring::summarize;
use super::types::{Browser, BrowserReportEntry, Report, RunSummary, TestResult};
use crate::Result;
use crate::config::ReporterConfig;
use crate::emitter::{Emission, Emitter};
use crate::metadata::{MetadataProvider, ProjectMetadata};
use serde_json::Value;
use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Everything recorded for one browser during a run
#[derive(Debug, Clone)]
struct BrowserRecord {
    browser: Browser,
    errors: Vec<Value>,
    results: Vec<TestResult>,
}

impl BrowserRecord {
    fn new(browser: &Browser) -> Self {
        Self {
            browser: browser.clone(),
            errors: Vec::new(),
            results: Vec::new(),
        }
    }
}

/// Collects browser errors and test results for one run at a time and
/// emits a scored report when the run completes.
///
/// Browsers are reported in the order they were first seen.
pub struct ResultAggregator {
    records: Vec<BrowserRecord>,
    index: HashMap<String, usize>,
    emitter: Emitter,
    metadata: Box<dyn MetadataProvider>,
    formatter: Box<dyn ErrorFormatter>,
    pending: Vec<JoinHandle<()>>,
}

impl ResultAggregator {
    pub fn new(config: ReporterConfig) -> Self {
        Self::with_emitter(Emitter::new(config))
    }

    pub fn with_emitter(emitter: Emitter) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            emitter,
            metadata: Box::new(ProjectMetadata::new()),
            formatter: Box::new(DisplayErrorFormatter),
            pending: Vec::new(),
        }
    }

    pub fn metadata(mut self, provider: impl MetadataProvider + 'static) -> Self {
        self.metadata = Box::new(provider);
        self
    }

    pub fn error_formatter(mut self, formatter: impl ErrorFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Number of browsers with recorded events in the current run
    pub fn browser_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all per-browser state
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    fn record_for(&mut self, browser: &Browser) -> &mut BrowserRecord {
        let next = self.records.len();
        let idx = *self.index.entry(browser.id.key()).or_insert_with(|| {
            tracing::debug!("Tracking browser {} ({})", browser.id, browser.name);
            next
        });

        if idx == next {
            self.records.push(BrowserRecord::new(browser));
        }
        &mut self.records[idx]
    }

    pub fn on_browser_error(&mut self, browser: &Browser, error: Value) {
        self.record_for(browser).errors.push(error);
    }

    pub fn on_spec_complete(&mut self, browser: &Browser, mut result: TestResult) {
        result.flatten_log();
        self.record_for(browser).results.push(result);
    }

    /// Score, emit, and reset.
    ///
    /// A result without a weight aborts with `MissingWeight` before anything
    /// is emitted; the recorded state is then left as it was.
    pub fn on_run_complete(&mut self, browsers: &[Browser], summary: &RunSummary) -> Result<Report> {
        tracing::debug!(
            "Run complete: {} browsers reported by host, {} with events",
            browsers.len(),
            self.records.len()
        );

        let entries: Vec<BrowserReportEntry> = self
            .records
            .iter()
            .map(|record| BrowserReportEntry {
                browser: record.browser.clone(),
                errors: record.errors.iter().map(|e| self.formatter.format(e)).collect(),
                results: record.results.clone(),
            })
            .collect();

        let summary = summarize(summary, &entries)?;
        let report = Report {
            summary,
            browsers: entries,
            library: self.metadata.library(),
        };

        if let Emission::Pending(handle) = self.emitter.emit(&report) {
            self.pending.retain(|h| !h.is_finished());
            self.pending.push(handle);
        }
        self.clear();

        Ok(report)
    }

    /// Background write handles still held, finished or not
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// True while any background write is still running
    pub fn is_writing(&self) -> bool {
        self.pending.iter().any(|h| !h.is_finished())
    }

    /// Wait for background report writes started by earlier runs
    pub async fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!("Report write task did not finish: {}", e);
            }
        }
    }
}
