//! PubMed DOI resolver using the NCBI E-utilities API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{MetadataBuilder, MetadataRecord};
use crate::sources::{status_error, DoiResolver, SourceError};
use crate::utils::{with_retry, HttpClient, RetryConfig};

/// NCBI E-utilities root
pub const PUBMED_EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// PubMed resolver
///
/// Looks the DOI up with esearch to get a PMID, then reads the summary
/// record with esummary. Summaries carry no abstract, so analysis of a
/// PubMed-only record works from the title.
#[derive(Debug, Clone)]
pub struct PubMedResolver {
    client: Arc<HttpClient>,
    base_url: String,
    retry: RetryConfig,
}

impl PubMedResolver {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(Arc::new(HttpClient::new()?)))
    }

    /// Create with a shared HTTP client
    pub fn with_client(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            base_url: PUBMED_EUTILS_BASE.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Point the resolver at another E-utilities root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn search_url(&self, doi: &str) -> String {
        format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmode=json",
            self.base_url,
            urlencoding::encode(doi)
        )
    }

    fn summary_url(&self, pmid: &str) -> String {
        format!(
            "{}/esummary.fcgi?db=pubmed&id={}&retmode=json",
            self.base_url,
            urlencoding::encode(pmid)
        )
    }

    async fn get_json<T>(&self, url: String, doi: &str) -> Result<T, SourceError>
    where
        T: DeserializeOwned + Send,
    {
        let client = Arc::clone(&self.client);
        with_retry(self.retry, || {
            let client = Arc::clone(&client);
            let url = url.clone();
            let doi = doi.to_string();
            async move {
                let response = client.client().get(&url).send().await?;
                if !response.status().is_success() {
                    return Err(status_error(&response, "PubMed", &doi));
                }
                response
                    .json::<T>()
                    .await
                    .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed JSON: {}", e)))
            }
        })
        .await
    }
}

#[async_trait]
impl DoiResolver for PubMedResolver {
    fn id(&self) -> &str {
        "pubmed"
    }

    fn name(&self) -> &str {
        "PubMed"
    }

    async fn resolve(&self, doi: &str) -> Result<MetadataRecord, SourceError> {
        let search: ESearchResponse = self.get_json(self.search_url(doi), doi).await?;
        let pmid = search
            .esearchresult
            .idlist
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound(format!("PubMed has no record for DOI {}", doi)))?;

        tracing::debug!("DOI {} maps to PMID {}", doi, pmid);

        let summary: ESummaryResponse = self.get_json(self.summary_url(&pmid), doi).await?;
        let document = summary.document(&pmid)?;
        Ok(document.into_record(doi))
    }
}

// ===== E-utilities API Types =====

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ESearchResult {
    idlist: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ESummaryResponse {
    /// Keyed by PMID, plus a `uids` list
    result: serde_json::Map<String, serde_json::Value>,
}

impl ESummaryResponse {
    fn document(&self, pmid: &str) -> Result<ESummaryDocument, SourceError> {
        let value = self
            .result
            .get(pmid)
            .ok_or_else(|| SourceError::NotFound(format!("PubMed summary missing PMID {}", pmid)))?;
        Ok(ESummaryDocument::deserialize(value)?)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ESummaryDocument {
    title: String,
    authors: Vec<ESummaryAuthor>,
    fulljournalname: String,
    source: String,
    pubdate: String,
    volume: String,
    issue: String,
    pages: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ESummaryAuthor {
    name: String,
}

impl ESummaryDocument {
    fn into_record(self, doi: &str) -> MetadataRecord {
        let journal = if self.fulljournalname.is_empty() {
            self.source
        } else {
            self.fulljournalname
        };

        MetadataBuilder::new(doi, "pubmed")
            .title(self.title)
            .authors(self.authors.into_iter().map(|a| a.name))
            .journal(journal)
            .publication_date(self.pubdate)
            .volume(self.volume)
            .issue(self.issue)
            .pages(self.pages)
            .build()
    }
}
