pub mod provider;
pub mod types;

pub use provider::{MetadataProvider, ProjectMetadata, StaticMetadata};
pub use types::Library;
