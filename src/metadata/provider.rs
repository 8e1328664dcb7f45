use super::types::{Library, PackageManifest};
use crate::Result;
use std::fs;
use std::path::PathBuf;

const LIBRARY_NAME_ENV: &str = "LIBRARY_NAME";
const MANIFEST_FILE: &str = "package.json";

/// Resolves the library name and version at the moment a report is emitted
pub trait MetadataProvider: Send + Sync {
    fn library(&self) -> Library;
}

/// Reads `LIBRARY_NAME` and the host project's `package.json`
#[derive(Debug, Clone)]
pub struct ProjectMetadata {
    root: PathBuf,
}

impl ProjectMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a project root other than the working directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Version of `name` from the manifest's `dependencies`
    pub fn dependency_version(&self, name: &str) -> Result<Option<String>> {
        let content = fs::read_to_string(self.root.join(MANIFEST_FILE))?;
        let manifest: PackageManifest = serde_json::from_str(&content)?;
        Ok(manifest.dependency_version(name).map(str::to_string))
    }

    fn library_named(&self, name: Option<String>) -> Library {
        let version = name.as_deref().and_then(|n| match self.dependency_version(n) {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(
                    "Cannot read {} in {}: {}",
                    MANIFEST_FILE,
                    self.root.display(),
                    e
                );
                None
            }
        });

        Library { name, version }
    }
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { root }
    }
}

impl MetadataProvider for ProjectMetadata {
    fn library(&self) -> Library {
        self.library_named(std::env::var(LIBRARY_NAME_ENV).ok())
    }
}

/// Fixed library metadata
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata(pub Library);

impl StaticMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self(Library {
            name: Some(name.into()),
            version: Some(version.into()),
        })
    }
}

impl MetadataProvider for StaticMetadata {
    fn library(&self) -> Library {
        self.0.clone()
    }
}
