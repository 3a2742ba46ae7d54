//! Latest-release tag resolution seam.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use crate::error::PinError;

/// Resolves a repository identifier to its latest release tag.
pub trait TagResolver {
    fn latest_tag(&self, repository: &str) -> Result<String, PinError>;
}

impl<R: TagResolver + ?Sized> TagResolver for &R {
    fn latest_tag(&self, repository: &str) -> Result<String, PinError> {
        (**self).latest_tag(repository)
    }
}

impl<R: TagResolver + ?Sized> TagResolver for Box<R> {
    fn latest_tag(&self, repository: &str) -> Result<String, PinError> {
        (**self).latest_tag(repository)
    }
}

/// Memoizes successful lookups per repository for the lifetime of one run.
///
/// Failures are not cached.
#[derive(Debug)]
pub struct CachedResolver<R> {
    inner: R,
    tags: RefCell<HashMap<String, String>>,
}

impl<R: TagResolver> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            tags: RefCell::new(HashMap::new()),
        }
    }
}

impl<R: TagResolver> TagResolver for CachedResolver<R> {
    fn latest_tag(&self, repository: &str) -> Result<String, PinError> {
        if let Some(tag) = self.tags.borrow().get(repository) {
            debug!("Using cached release tag {} for {}", tag, repository);
            return Ok(tag.clone());
        }
        let tag = self.inner.latest_tag(repository)?;
        self.tags
            .borrow_mut()
            .insert(repository.to_string(), tag.clone());
        Ok(tag)
    }
}
