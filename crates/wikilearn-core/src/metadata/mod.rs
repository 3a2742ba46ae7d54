//! Packaging metadata: version descriptor, requirements files, and the hook
//! that combines them with release pinning.

pub mod about;
pub mod hook;
pub mod requirements;

pub use about::{load_about, load_version, parse_about};
pub use hook::{BuildMetadata, MetadataHook};
pub use requirements::{load_requirements, parse_requirements};
