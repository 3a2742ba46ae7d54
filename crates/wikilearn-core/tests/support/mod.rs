#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use wikilearn_core::error::PinError;
use wikilearn_core::pinning::TagResolver;

/// Resolver stub that answers from a fixed table and records every call.
#[derive(Debug, Default)]
pub struct StubResolver {
    tags: HashMap<String, String>,
    failing: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, repository: &str, tag: &str) -> Self {
        self.tags.insert(repository.to_string(), tag.to_string());
        self
    }

    /// Fail lookups for `repository` as a network error would.
    pub fn failing_on(mut self, repository: &str) -> Self {
        self.failing = Some(repository.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TagResolver for StubResolver {
    fn latest_tag(&self, repository: &str) -> Result<String, PinError> {
        self.calls.borrow_mut().push(repository.to_string());
        if self.failing.as_deref() == Some(repository) {
            return Err(PinError::ResolutionFailed {
                repository: repository.to_string(),
                reason: "connection failed: stub".to_string(),
            });
        }
        Ok(self
            .tags
            .get(repository)
            .cloned()
            .unwrap_or_else(|| "v0.0.0".to_string()))
    }
}
