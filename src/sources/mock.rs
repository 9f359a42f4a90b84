//! Mock resolver for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::MetadataRecord;
use crate::sources::{DoiResolver, SourceError};

/// A resolver that returns predefined records.
///
/// DOIs without a canned record resolve to [`SourceError::NotFound`]; a DOI
/// can also be made to fail with a network error to exercise fallbacks.
#[derive(Debug, Default)]
pub struct MockResolver {
    id: String,
    records: Mutex<HashMap<String, MetadataRecord>>,
    failing: Mutex<Vec<String>>,
    calls: Mutex<Vec<String>>,
}

impl MockResolver {
    /// Create a new mock resolver.
    pub fn new() -> Self {
        Self::with_id("mock")
    }

    /// Create a mock resolver with a custom id, for chains of several mocks.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Register the record returned for its DOI.
    pub fn insert(&self, record: MetadataRecord) {
        let mut guard = self.records.lock().unwrap_or_else(|e| e.into_inner());
        guard.insert(record.doi.to_lowercase(), record);
    }

    /// Builder-style variant of [`MockResolver::insert`].
    pub fn with_record(self, record: MetadataRecord) -> Self {
        self.insert(record);
        self
    }

    /// Make lookups of `doi` fail with a network error.
    pub fn fail_on(&self, doi: &str) {
        let mut guard = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        guard.push(doi.to_lowercase());
    }

    /// DOIs looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl DoiResolver for MockResolver {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Mock Resolver"
    }

    async fn resolve(&self, doi: &str) -> Result<MetadataRecord, SourceError> {
        let key = doi.to_lowercase();
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key.clone());

        if self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&key)
        {
            return Err(SourceError::Network(format!("simulated failure for {}", doi)));
        }

        let guard = self.records.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .get(&key)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("no mock record for DOI {}", doi)))
    }
}

/// Helper function to create a record for testing.
pub fn make_record(doi: &str, title: &str, abstract_text: &str) -> MetadataRecord {
    crate::models::MetadataBuilder::new(doi, "mock")
        .title(title)
        .abstract_text(abstract_text)
        .build()
}
