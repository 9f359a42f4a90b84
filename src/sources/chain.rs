//! Ordered fallback over several resolvers.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::{CrossRefResolver, DoiResolver, PubMedResolver, SourceError};
use crate::config::ResolverSettings;
use crate::models::MetadataRecord;
use crate::utils::{user_agent, HttpClient, RetryConfig};

/// Resolvers tried one after another until one returns a record
///
/// Failures of individual resolvers are logged and skipped; when every
/// resolver fails the chain reports [`SourceError::NotFound`] for the DOI.
#[derive(Debug, Clone, Default)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn DoiResolver>>,
}

impl ResolverChain {
    /// Empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// CrossRef, then PubMed, with default settings
    pub fn with_defaults() -> Result<Self, SourceError> {
        Self::from_settings(&ResolverSettings::default())
    }

    /// Build the chain described by the `[resolver]` configuration section
    pub fn from_settings(settings: &ResolverSettings) -> Result<Self, SourceError> {
        let client = Arc::new(HttpClient::with_options(
            &user_agent(settings.mailto.as_deref()),
            Duration::from_secs(settings.timeout_seconds.max(1)),
        )?);
        let retry = RetryConfig::for_resolver(
            settings.max_retries,
            Duration::from_secs(settings.timeout_seconds.max(1)),
        );

        let mut chain = Self::new();
        for provider in &settings.providers {
            let resolver: Arc<dyn DoiResolver> = match provider.trim().to_lowercase().as_str() {
                "crossref" => Arc::new(
                    CrossRefResolver::with_client(Arc::clone(&client))
                        .with_base_url(&settings.crossref_base_url)
                        .with_retry_config(retry),
                ),
                "pubmed" => Arc::new(
                    PubMedResolver::with_client(Arc::clone(&client))
                        .with_base_url(&settings.pubmed_base_url)
                        .with_retry_config(retry),
                ),
                other => {
                    return Err(SourceError::InvalidRequest(format!(
                        "Unknown resolver '{}' (expected crossref or pubmed)",
                        other
                    )))
                }
            };
            chain.register(resolver);
        }
        Ok(chain)
    }

    /// Append a resolver to the end of the chain
    pub fn register(&mut self, resolver: Arc<dyn DoiResolver>) {
        self.resolvers.push(resolver);
    }

    /// Builder-style variant of [`ResolverChain::register`]
    pub fn with(mut self, resolver: Arc<dyn DoiResolver>) -> Self {
        self.register(resolver);
        self
    }

    /// Resolver ids in lookup order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.resolvers.iter().map(|r| r.id())
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

#[async_trait]
impl DoiResolver for ResolverChain {
    fn id(&self) -> &str {
        "chain"
    }

    fn name(&self) -> &str {
        "Resolver Chain"
    }

    async fn resolve(&self, doi: &str) -> Result<MetadataRecord, SourceError> {
        for resolver in &self.resolvers {
            match resolver.resolve(doi).await {
                Ok(record) => {
                    tracing::debug!("Resolved {} via {}", doi, resolver.name());
                    return Ok(record);
                }
                Err(SourceError::NotFound(msg)) => {
                    tracing::debug!("{} has no record: {}", resolver.name(), msg);
                }
                Err(e) => {
                    tracing::warn!("{} lookup failed for {}: {}", resolver.name(), doi, e);
                }
            }
        }

        Err(SourceError::NotFound(format!(
            "Unable to retrieve paper information for DOI {}",
            doi
        )))
    }
}
