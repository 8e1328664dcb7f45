use crate::metadata::Library;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Host-assigned browser id; hosts send either a string or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrowserId {
    Text(String),
    Number(Number),
}

impl BrowserId {
    /// Lookup key; `7` and `"7"` name the same browser
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl Default for BrowserId {
    fn default() -> Self {
        BrowserId::Text(String::new())
    }
}

impl fmt::Display for BrowserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserId::Text(id) => f.write_str(id),
            BrowserId::Number(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for BrowserId {
    fn from(id: &str) -> Self {
        BrowserId::Text(id.to_string())
    }
}

impl From<String> for BrowserId {
    fn from(id: String) -> Self {
        BrowserId::Text(id)
    }
}

impl From<u64> for BrowserId {
    fn from(id: u64) -> Self {
        BrowserId::Number(id.into())
    }
}

/// Execution context a test ran in, as described by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Browser {
    /// Unique within a run
    pub id: BrowserId,

    #[serde(default)]
    pub name: String,

    /// Remaining host fields, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Browser {
    pub fn new(id: impl Into<BrowserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Suite path in whichever shape the host sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suite {
    /// Outermost segment first
    Segments(Vec<String>),
    /// A single path string such as `"basic support > grid"`
    Joined(String),
}

impl Suite {
    /// Substring match against the joined path or any segment
    pub fn contains(&self, label: &str) -> bool {
        match self {
            Suite::Segments(segments) => segments.iter().any(|s| s.contains(label)),
            Suite::Joined(path) => path.contains(label),
        }
    }
}

/// One completed test
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(default)]
    pub description: String,

    /// `None` when the host reported neither pass nor fail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<Suite>,

    /// Outer `None`: field absent, which scoring rejects.
    /// `Some(None)`: explicit `null`, which scores as weight 0.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<Option<Number>>,

    /// One line per entry once recorded
    #[serde(default)]
    pub log: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestResult {
    pub fn new(description: impl Into<String>, success: bool, weight: impl Into<Number>) -> Self {
        Self {
            description: description.into(),
            success: Some(success),
            weight: Some(Some(weight.into())),
            ..Self::default()
        }
    }

    pub fn with_suite<I, S>(mut self, suite: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suite = Some(Suite::Segments(suite.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_log<I, S>(mut self, log: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.log = log.into_iter().map(Into::into).collect();
        self
    }

    /// `None` only when the host sent no weight at all
    pub fn weight_value(&self) -> Option<f64> {
        self.weight
            .as_ref()
            .map(|w| w.as_ref().and_then(Number::as_f64).unwrap_or(0.0))
    }

    pub fn passed(&self) -> bool {
        self.success == Some(true)
    }

    pub fn failed(&self) -> bool {
        self.success == Some(false)
    }

    pub fn in_category(&self, label: &str) -> bool {
        self.suite.as_ref().is_some_and(|suite| suite.contains(label))
    }

    /// Split every log entry on '\n', keeping empty segments and order
    pub fn flatten_log(&mut self) {
        self.log = self
            .log
            .iter()
            .flat_map(|message| message.split('\n'))
            .map(str::to_string)
            .collect();
    }
}

// Only called when the field is present, so `null` stays distinguishable from absent
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Run statistics supplied by the host, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Counts for one support category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Host summary plus the derived score and category counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredSummary {
    #[serde(flatten)]
    pub base: RunSummary,

    /// Weighted score 0-100; `None` (JSON null) when the total weight is zero
    pub score: Option<i64>,

    pub basic_support: CategoryCount,

    pub advanced_support: CategoryCount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserReportEntry {
    pub browser: Browser,
    pub errors: Vec<String>,
    pub results: Vec<TestResult>,
}

/// The emitted artifact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: ScoredSummary,
    pub browsers: Vec<BrowserReportEntry>,
    pub library: Library,
}

impl Report {
    /// All results in browser order
    pub fn tests(&self) -> impl Iterator<Item = &TestResult> {
        self.browsers.iter().flat_map(|b| &b.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_log_splits_lines() {
        let mut result = TestResult::new("t", true, 1).with_log(["a\nb", "c"]);
        result.flatten_log();
        assert_eq!(result.log, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_flatten_log_keeps_empty_lines() {
        let mut result = TestResult::new("t", true, 1).with_log(["first\n\nthird\n", "", "x"]);
        result.flatten_log();
        assert_eq!(result.log, vec!["first", "", "third", "", "", "x"]);
    }

    #[test]
    fn test_result_keeps_host_fields() {
        let value = json!({
            "description": "renders header",
            "success": true,
            "skipped": false,
            "suite": ["basic support", "header"],
            "weight": 2,
            "log": [],
            "time": 14,
            "id": "spec3"
        });

        let result: TestResult = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(result.weight_value(), Some(2.0));
        assert_eq!(result.extra.get("time"), Some(&json!(14)));
        assert_eq!(serde_json::to_value(&result).unwrap(), value);
    }

    #[test]
    fn test_suite_accepts_joined_path() {
        let result: TestResult =
            serde_json::from_value(json!({"description": "x", "suite": "basic support > x"}))
                .unwrap();
        assert_eq!(result.suite, Some(Suite::Joined("basic support > x".to_string())));
        assert!(result.in_category("basic support"));
        assert!(!result.in_category("advanced support"));

        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["suite"], json!("basic support > x"));
    }

    #[test]
    fn test_absent_and_null_weight_differ() {
        let absent: TestResult = serde_json::from_value(json!({"description": "a"})).unwrap();
        assert_eq!(absent.weight, None);
        assert_eq!(absent.weight_value(), None);

        let null: TestResult =
            serde_json::from_value(json!({"description": "n", "weight": null})).unwrap();
        assert_eq!(null.weight, Some(None));
        assert_eq!(null.weight_value(), Some(0.0));
        assert_eq!(serde_json::to_value(&null).unwrap()["weight"], Value::Null);
        assert!(serde_json::to_value(&absent).unwrap().get("weight").is_none());
    }

    #[test]
    fn test_browser_id_accepts_numbers() {
        let browser: Browser = serde_json::from_value(json!({"id": 7, "name": "Edge"})).unwrap();
        assert_eq!(browser.id, BrowserId::from(7u64));
        assert_eq!(browser.id.key(), "7");
        assert_eq!(BrowserId::from("7").key(), "7");
        assert_eq!(serde_json::to_value(&browser).unwrap()["id"], json!(7));
    }

    #[test]
    fn test_missing_fields_default() {
        let result: TestResult = serde_json::from_value(json!({"description": "bare"})).unwrap();
        assert_eq!(result.success, None);
        assert_eq!(result.weight, None);
        assert_eq!(result.suite, None);
        assert!(!result.passed() && !result.failed());
    }

    #[test]
    fn test_scored_summary_layout() {
        let summary = ScoredSummary {
            base: RunSummary::new().with("success", 3).with("failed", 1),
            score: None,
            basic_support: CategoryCount::default(),
            advanced_support: CategoryCount {
                total: 1,
                passed: 1,
                failed: 0,
            },
        };

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "success": 3,
                "failed": 1,
                "score": null,
                "basicSupport": {"total": 0, "passed": 0, "failed": 0},
                "advancedSupport": {"total": 1, "passed": 1, "failed": 0}
            })
        );
    }
}
