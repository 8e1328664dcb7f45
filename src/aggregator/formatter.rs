use serde_json::Value;

/// Renders a raw browser error into its display string
pub trait ErrorFormatter: Send + Sync {
    fn format(&self, error: &Value) -> String;
}

/// Strings pass through; objects render `stack`, then `message`, then compact JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayErrorFormatter;

impl ErrorFormatter for DisplayErrorFormatter {
    fn format(&self, error: &Value) -> String {
        match error {
            Value::String(s) => s.clone(),
            Value::Object(map) => ["stack", "message"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            other => other.to_string(),
        }
    }
}

impl<F> ErrorFormatter for F
where
    F: Fn(&Value) -> String + Send + Sync,
{
    fn format(&self, error: &Value) -> String {
        self(error)
    }
}
