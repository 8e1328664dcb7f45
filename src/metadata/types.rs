use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Library under test, as recorded in the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The part of `package.json` the provider reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
}

impl PackageManifest {
    pub fn dependency_version(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).map(|s| s.as_str())
    }
}
