//! DOI metadata resolvers.
//!
//! This module defines the [`DoiResolver`] trait that metadata providers
//! implement. The analysis core never talks to the network itself: callers
//! resolve a DOI to a [`MetadataRecord`] here and hand the record to the
//! pipeline.
//!
//! Built-in resolvers:
//!
//! - [`CrossRefResolver`] (`crossref`): CrossRef REST API `works` endpoint
//! - [`PubMedResolver`] (`pubmed`): NCBI E-utilities esearch + esummary
//! - [`MockResolver`] (`mock`): canned records for tests
//!
//! A [`ResolverChain`] tries resolvers in order and returns the first record.
//!
//! ```rust,no_run
//! use literature_analyzer::sources::{DoiResolver, ResolverChain};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let chain = ResolverChain::with_defaults()?;
//! let record = chain.resolve("10.1056/nejmoa2034577").await?;
//! println!("{}", record.title);
//! # Ok(())
//! # }
//! ```

mod chain;
mod crossref;
pub mod mock;
mod pubmed;

pub use chain::ResolverChain;
pub use crossref::{CrossRefResolver, CROSSREF_API_BASE};
pub use mock::MockResolver;
pub use pubmed::{PubMedResolver, PUBMED_EUTILS_BASE};

use async_trait::async_trait;

use crate::models::MetadataRecord;

/// A provider that turns a DOI into bibliographic metadata
#[async_trait]
pub trait DoiResolver: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this resolver (used in configuration, e.g. "crossref")
    fn id(&self) -> &str;

    /// Human-readable name of this resolver
    fn name(&self) -> &str;

    /// Fetch metadata for a normalized DOI
    ///
    /// Returns [`SourceError::NotFound`] when the provider has no record.
    async fn resolve(&self, doi: &str) -> Result<MetadataRecord, SourceError>;
}

/// Errors that can occur when talking to a metadata provider
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded (with optional retry-after seconds)
    #[error("Rate limit exceeded")]
    RateLimit(Option<u64>),

    /// No record for the DOI
    #[error("Not found: {0}")]
    NotFound(String),

    /// API error from the provider
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Network(format!("Request timed out: {}", err))
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

/// Map a non-success HTTP status to an error
///
/// 404 becomes [`SourceError::NotFound`], 429 [`SourceError::RateLimit`]
/// (honoring `Retry-After` when given in seconds) and 5xx a retryable
/// server error.
pub(crate) fn status_error(response: &reqwest::Response, provider: &str, doi: &str) -> SourceError {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return SourceError::NotFound(format!("{} has no record for DOI {}", provider, doi));
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        return SourceError::RateLimit(retry_after);
    }
    if status.is_server_error() {
        return SourceError::Api(format!(
            "{} server error: HTTP {}",
            provider,
            status.as_u16()
        ));
    }
    SourceError::Api(format!(
        "{} API returned status: {}",
        provider,
        status.as_u16()
    ))
}
