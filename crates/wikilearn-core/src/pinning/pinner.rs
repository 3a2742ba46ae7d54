//! Rewrites development-branch declarations to release tags.

use tracing::{debug, info};

use crate::error::PinError;

use super::declaration::Declaration;
use super::resolver::TagResolver;

/// Ref marking a dependency that tracks the development branch.
pub const DEFAULT_DEVELOPMENT_MARKER: &str = "develop";

/// Pins `<repo>@<development marker>` declarations to the repository's latest
/// release tag.
///
/// The resolver is consulted for every declaration, including ones already
/// pinned to another ref whose output is left unchanged. Callers that count
/// lookups (or pay for them) observe one per declaration.
#[derive(Debug)]
pub struct ReleasePinner<R> {
    resolver: R,
    development_marker: String,
}

impl<R: TagResolver> ReleasePinner<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            development_marker: DEFAULT_DEVELOPMENT_MARKER.to_string(),
        }
    }

    pub fn with_development_marker(mut self, marker: impl Into<String>) -> Self {
        self.development_marker = marker.into();
        self
    }

    /// Resolve every declaration in order.
    ///
    /// Stops at the first malformed declaration or failed lookup; nothing is
    /// returned for the entries already processed.
    pub fn resolve<S: AsRef<str>>(&self, declarations: &[S]) -> Result<Vec<String>, PinError> {
        let mut pinned = Vec::with_capacity(declarations.len());

        for raw in declarations {
            let declaration = Declaration::parse(raw.as_ref())?;
            let tag = self.resolver.latest_tag(declaration.repository())?;

            if declaration.tracks(&self.development_marker) {
                let rewritten = declaration.with_reference(&tag);
                info!("Pinned {} -> {}", declaration, rewritten);
                pinned.push(rewritten);
            } else {
                debug!("Keeping {} (latest release is {})", declaration, tag);
                pinned.push(declaration.as_str().to_string());
            }
        }

        Ok(pinned)
    }
}
