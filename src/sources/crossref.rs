//! CrossRef DOI resolver.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, OnceLock};

use crate::models::{MetadataBuilder, MetadataRecord};
use crate::sources::{status_error, DoiResolver, SourceError};
use crate::utils::{normalize_whitespace, with_retry, HttpClient, RetryConfig};

/// Public CrossRef REST API
pub const CROSSREF_API_BASE: &str = "https://api.crossref.org";

/// CrossRef resolver
///
/// Uses the CrossRef REST API `works/{doi}` endpoint. Abstracts arrive as
/// JATS XML fragments and are reduced to plain text.
#[derive(Debug, Clone)]
pub struct CrossRefResolver {
    client: Arc<HttpClient>,
    base_url: String,
    retry: RetryConfig,
}

impl CrossRefResolver {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(Arc::new(HttpClient::new()?)))
    }

    /// Create with a shared HTTP client
    pub fn with_client(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            base_url: CROSSREF_API_BASE.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Point the resolver at another API root (mirrors, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn work_url(&self, doi: &str) -> String {
        format!("{}/works/{}", self.base_url, urlencoding::encode(doi))
    }
}

#[async_trait]
impl DoiResolver for CrossRefResolver {
    fn id(&self) -> &str {
        "crossref"
    }

    fn name(&self) -> &str {
        "CrossRef"
    }

    async fn resolve(&self, doi: &str) -> Result<MetadataRecord, SourceError> {
        let url = self.work_url(doi);
        tracing::debug!("Fetching CrossRef record: {}", url);

        let client = Arc::clone(&self.client);
        let data: CRWorkResponse = with_retry(self.retry, || {
            let client = Arc::clone(&client);
            let url = url.clone();
            let doi = doi.to_string();
            async move {
                let response = client.client().get(&url).send().await?;
                if !response.status().is_success() {
                    return Err(status_error(&response, "CrossRef", &doi));
                }
                response
                    .json::<CRWorkResponse>()
                    .await
                    .map_err(|e| SourceError::Parse(format!("Failed to parse CrossRef JSON: {}", e)))
            }
        })
        .await?;

        Ok(data.message.into_record(doi))
    }
}

/// Strip JATS/XML tags from a CrossRef abstract
fn strip_markup(text: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let tags = TAGS.get_or_init(|| {
        Regex::new(r"<[^>]+>").unwrap_or_else(|e| panic!("invalid markup pattern: {e}"))
    });
    normalize_whitespace(&tags.replace_all(text, " "))
}

// ===== CrossRef API Types =====

#[derive(Debug, Deserialize)]
struct CRWorkResponse {
    message: CRWork,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CRWork {
    title: Vec<String>,
    author: Vec<CRAuthor>,
    #[serde(rename = "container-title")]
    container_title: Vec<String>,
    #[serde(rename = "published-print")]
    published_print: Option<CRDate>,
    #[serde(rename = "published-online")]
    published_online: Option<CRDate>,
    issued: Option<CRDate>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    subject: Vec<String>,
    volume: Option<String>,
    issue: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CRAuthor {
    given: Option<String>,
    family: Option<String>,
    /// Organizational authors carry a single name
    name: Option<String>,
}

impl CRAuthor {
    fn display_name(&self) -> String {
        if self.given.is_none() && self.family.is_none() {
            return self.name.clone().unwrap_or_default();
        }
        format!(
            "{} {}",
            self.given.as_deref().unwrap_or_default(),
            self.family.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CRDate {
    #[serde(rename = "date-parts")]
    date_parts: Vec<Vec<Option<i64>>>,
}

impl CRDate {
    /// `[[2020, 5, 7]]` becomes `2020-5-7`
    fn joined(&self) -> Option<String> {
        let parts: Vec<String> = self
            .date_parts
            .first()?
            .iter()
            .map_while(|p| p.map(|n| n.to_string()))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("-"))
        }
    }
}

impl CRWork {
    fn into_record(self, doi: &str) -> MetadataRecord {
        let publication_date = [&self.published_print, &self.published_online, &self.issued]
            .into_iter()
            .flatten()
            .find_map(CRDate::joined)
            .unwrap_or_default();

        MetadataBuilder::new(doi, "crossref")
            .title(self.title.into_iter().next().unwrap_or_default())
            .authors(self.author.iter().map(CRAuthor::display_name))
            .journal(self.container_title.into_iter().next().unwrap_or_default())
            .publication_date(publication_date)
            .abstract_text(self.abstract_text.as_deref().map(strip_markup).unwrap_or_default())
            .keywords(self.subject)
            .volume(self.volume.unwrap_or_default())
            .issue(self.issue.unwrap_or_default())
            .pages(self.page.unwrap_or_default())
            .build()
    }
}
