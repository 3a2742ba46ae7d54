//! Release pinning for custom plugin dependencies.
//!
//! - `declaration.rs`: `<repo>@<ref>` parsing.
//! - `resolver.rs`: the `TagResolver` seam and an in-memory cache.
//! - `github.rs`: redirect-based latest-release lookup.
//! - `pinner.rs`: the rewrite pass over a declaration list.

mod declaration;
mod github;
mod pinner;
mod resolver;

pub use declaration::{Declaration, REF_SEPARATOR};
pub use github::{GitHubReleaseResolver, release_endpoint, tag_from_release_url};
pub use pinner::{DEFAULT_DEVELOPMENT_MARKER, ReleasePinner};
pub use resolver::{CachedResolver, TagResolver};
