//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::sources::SourceError;

/// Default user agent, `literature-analyzer/<version>`
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_options(DEFAULT_USER_AGENT, Duration::from_secs(30))
    }

    /// Create a client with a custom user agent and request timeout
    ///
    /// Metadata APIs such as CrossRef route requests that carry a contact
    /// address (`mailto:`) to their polite pool, so the user agent is the
    /// place to put one.
    pub fn with_options(user_agent: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SourceError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create from an existing reqwest Client
    pub fn from_client(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Build the user agent string, appending a contact address when configured
pub fn user_agent(mailto: Option<&str>) -> String {
    match mailto.map(str::trim).filter(|m| !m.is_empty()) {
        Some(mailto) => format!("{} (mailto:{})", DEFAULT_USER_AGENT, mailto),
        None => DEFAULT_USER_AGENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent() {
        assert_eq!(user_agent(None), DEFAULT_USER_AGENT);
        assert_eq!(user_agent(Some("  ")), DEFAULT_USER_AGENT);
        assert!(user_agent(Some("me@example.org")).ends_with("(mailto:me@example.org)"));
        assert!(DEFAULT_USER_AGENT.starts_with("literature-analyzer/"));
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpClient::with_options("test-agent", Duration::from_secs(5)).is_ok());
    }
}
