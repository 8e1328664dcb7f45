use crate::aggregator::{CategoryCount, Report};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

/// Human-readable run summary, printed to stderr so stdout stays JSON
pub struct SummaryPrinter {
    verbose: bool,
}

impl SummaryPrinter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print(&self, report: &Report) {
        eprintln!("{}", self.render(report));
    }

    pub fn render(&self, report: &Report) -> String {
        let mut output = Vec::new();

        output.push("━".repeat(50));
        output.push("Summary".bold().to_string());
        output.push("━".repeat(50));

        let score = match report.summary.score {
            Some(score) if score >= 100 => score.to_string().green(),
            Some(score) if score >= 50 => score.to_string().yellow(),
            Some(score) => score.to_string().red(),
            None => "n/a".dimmed(),
        };
        output.push(format!("  {}: {}", "Score".bold(), score));

        if let Some(library) = &report.library.name {
            let version = report.library.version.as_deref().unwrap_or("unknown");
            output.push(format!("  {}: {} {}", "Library".bold(), library, version));
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Group", "Total", "Passed", "Failed", "Errors"]);

        table.add_row(category_row("basic support", &report.summary.basic_support));
        table.add_row(category_row("advanced support", &report.summary.advanced_support));

        for entry in &report.browsers {
            let passed = entry.results.iter().filter(|r| r.passed()).count();
            let failed = entry.results.iter().filter(|r| r.failed()).count();
            let name = if entry.browser.name.is_empty() {
                entry.browser.id.to_string()
            } else {
                entry.browser.name.clone()
            };

            table.add_row(vec![
                Cell::new(name).add_attribute(Attribute::Bold),
                Cell::new(entry.results.len()),
                Cell::new(passed).fg(Color::Green),
                Cell::new(failed).fg(if failed > 0 { Color::Red } else { Color::Reset }),
                Cell::new(entry.errors.len()),
            ]);
        }
        output.push(table.to_string());

        if self.verbose {
            for entry in &report.browsers {
                for error in &entry.errors {
                    output.push(format!("   {}: {}", "Error".red().bold(), error));
                }
                for result in entry.results.iter().filter(|r| r.failed()) {
                    output.push(format!("   {} {}", "✗".red(), result.description));
                    for line in &result.log {
                        output.push(format!("       {}", line));
                    }
                }
            }
        }

        output.join("\n")
    }
}

fn category_row(label: &str, count: &CategoryCount) -> Vec<Cell> {
    vec![
        Cell::new(label),
        Cell::new(count.total),
        Cell::new(count.passed).fg(Color::Green),
        Cell::new(count.failed).fg(if count.failed > 0 { Color::Red } else { Color::Reset }),
        Cell::new("").add_attribute(Attribute::Dim),
    ]
}

impl Default for SummaryPrinter {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Browser, BrowserReportEntry, ScoredSummary, TestResult};
    use crate::metadata::Library;

    fn report() -> Report {
        Report {
            summary: ScoredSummary {
                score: Some(75),
                ..ScoredSummary::default()
            },
            browsers: vec![BrowserReportEntry {
                browser: Browser::new("7", "HeadlessChrome"),
                errors: vec!["Disconnected".to_string()],
                results: vec![
                    TestResult::new("filters", true, 3),
                    TestResult::new("pins columns", false, 1).with_log(["expected left", "got right"]),
                ],
            }],
            library: Library {
                name: Some("grid".to_string()),
                version: Some("^2.0.0".to_string()),
            },
        }
    }

    #[test]
    fn test_render_lists_browsers_and_categories() {
        let text = SummaryPrinter::default().render(&report());
        assert!(text.contains("75"));
        assert!(text.contains("HeadlessChrome"));
        assert!(text.contains("basic support"));
        assert!(text.contains("advanced support"));
        assert!(text.contains("^2.0.0"));
        assert!(!text.contains("pins columns"));
    }

    #[test]
    fn test_verbose_render_shows_failures() {
        let text = SummaryPrinter::new(true).render(&report());
        assert!(text.contains("pins columns"));
        assert!(text.contains("got right"));
        assert!(text.contains("Disconnected"));
    }
}
