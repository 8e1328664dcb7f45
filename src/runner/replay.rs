use super::event::HostEvent;
use crate::Result;
use crate::aggregator::{Report, ResultAggregator};
use crate::error::ReportError;
use std::io::BufRead;

/// Drive `aggregator` from newline-delimited JSON host events
///
/// Blank lines are skipped. Returns one report per completed run.
pub fn replay_events<R: BufRead>(reader: R, aggregator: &mut ResultAggregator) -> Result<Vec<Report>> {
    let mut reports = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: HostEvent = serde_json::from_str(&line)
            .map_err(|e| ReportError::EventError(format!("line {}: {}", index + 1, e)))?;

        if let Some(report) = event.apply(aggregator)? {
            tracing::info!(
                "Run {} reported {} browsers, score {}",
                reports.len() + 1,
                report.browsers.len(),
                report
                    .summary
                    .score
                    .map_or_else(|| "n/a".to_string(), |s| s.to_string())
            );
            reports.push(report);
        }
    }

    if !aggregator.is_empty() {
        tracing::warn!(
            "Event stream ended with {} browsers recorded but no run_complete",
            aggregator.browser_count()
        );
    }

    Ok(reports)
}
