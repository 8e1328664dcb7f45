use serde::Deserialize;
use std::path::PathBuf;

/// Reporter settings supplied by the host
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ReporterConfig {
    /// Destination of the pretty-printed report; stdout when unset
    #[serde(default, alias = "outputFile")]
    pub output_file: Option<PathBuf>,

    /// Write the report file before returning instead of in a background task
    #[serde(default, alias = "isSynchronous")]
    pub is_synchronous: bool,
}

impl ReporterConfig {
    pub fn stdout() -> Self {
        Self::default()
    }

    pub fn file(path: impl Into<PathBuf>, is_synchronous: bool) -> Self {
        Self {
            output_file: Some(path.into()),
            is_synchronous,
        }
    }
}

/// Top level of a `rureport.toml` file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default, alias = "jsonResultReporter")]
    pub json_result_reporter: ReporterConfig,
}
