pub mod writer;

pub use writer::{Emission, Emitter, to_compact_json, to_pretty_json};
