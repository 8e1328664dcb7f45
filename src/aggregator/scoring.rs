use super::types::{BrowserReportEntry, CategoryCount, RunSummary, ScoredSummary};
use crate::Result;
use crate::error::ReportError;

pub const BASIC_SUPPORT: &str = "basic support";
pub const ADVANCED_SUPPORT: &str = "advanced support";

/// Weighted score over every result of every browser
///
/// A passing test scores 100, anything else 0. A `null` weight counts as 0;
/// only an absent weight is an error. Returns `None` when the weights sum
/// to zero, including a run with no tests.
pub fn score_results(browsers: &[BrowserReportEntry]) -> Result<Option<i64>> {
    let mut sum_tests = 0.0;
    let mut sum_weights = 0.0;

    for test in browsers.iter().flat_map(|b| &b.results) {
        let weight = test
            .weight_value()
            .ok_or_else(|| ReportError::MissingWeight(test.description.clone()))?;
        let score = if test.passed() { 100.0 } else { 0.0 };

        sum_tests += score * weight;
        sum_weights += weight;
    }

    let ratio: f64 = sum_tests / sum_weights;
    // half-up, matching the rounding hosts expect for .5
    Ok(ratio.is_finite().then(|| (ratio + 0.5).floor() as i64))
}

/// Count results whose suite path contains `label`
pub fn sum_results(label: &str, browsers: &[BrowserReportEntry]) -> CategoryCount {
    browsers
        .iter()
        .flat_map(|b| &b.results)
        .filter(|test| test.in_category(label))
        .fold(CategoryCount::default(), |mut sum, test| {
            sum.total += 1;
            if test.passed() {
                sum.passed += 1;
            } else if test.failed() {
                sum.failed += 1;
            }
            sum
        })
}

/// Copy `summary` and attach the score and support categories
pub fn summarize(summary: &RunSummary, browsers: &[BrowserReportEntry]) -> Result<ScoredSummary> {
    let score = score_results(browsers)?;

    let mut base = summary.clone();
    for key in ["score", "basicSupport", "advancedSupport"] {
        base.fields.remove(key);
    }

    Ok(ScoredSummary {
        base,
        score,
        basic_support: sum_results(BASIC_SUPPORT, browsers),
        advanced_support: sum_results(ADVANCED_SUPPORT, browsers),
    })
}
