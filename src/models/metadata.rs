//! Bibliographic metadata record supplied by DOI resolution.

use serde::{Deserialize, Serialize};

/// Normalized bibliographic data for a paper
///
/// Every field defaults to an empty value, so a record deserialized from a
/// partial document still serializes with the full set of keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataRecord {
    /// Paper title
    pub title: String,

    /// Authors in publication order
    pub authors: Vec<String>,

    /// Journal or container title
    pub journal: String,

    /// Publication date (`YYYY`, `YYYY-M` or `YYYY-M-D` depending on the provider)
    pub publication_date: String,

    /// Abstract text with markup removed
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Landing page URL
    pub url: String,

    /// Identifier of the provider that produced this record
    pub source: String,

    /// Digital Object Identifier
    pub doi: String,

    /// Subject keywords
    pub keywords: Vec<String>,

    pub volume: String,

    pub issue: String,

    pub pages: String,
}

impl MetadataRecord {
    /// Create a record for a DOI with the canonical resolver URL filled in
    pub fn new(doi: impl Into<String>) -> Self {
        let doi = doi.into();
        Self {
            url: format!("https://doi.org/{}", doi),
            doi,
            ..Self::default()
        }
    }

    /// Text used for analysis: the title and abstract separated by a blank line
    pub fn analysis_text(&self) -> String {
        match (self.title.trim(), self.abstract_text.trim()) {
            ("", "") => String::new(),
            (title, "") => title.to_string(),
            ("", abstract_text) => abstract_text.to_string(),
            (title, abstract_text) => format!("{}\n\n{}", title, abstract_text),
        }
    }

    /// Returns the title if one is present
    pub fn title_hint(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty()).then_some(title)
    }

    /// Whether the record carries an abstract
    pub fn has_abstract(&self) -> bool {
        !self.abstract_text.trim().is_empty()
    }
}

/// Builder for constructing MetadataRecord objects
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    record: MetadataRecord,
}

impl MetadataBuilder {
    /// Start a record for the given DOI and provider
    pub fn new(doi: impl Into<String>, source: impl Into<String>) -> Self {
        let mut record = MetadataRecord::new(doi);
        record.source = source.into();
        Self { record }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    /// Set authors
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.authors = authors
            .into_iter()
            .map(Into::into)
            .filter(|a: &String| !a.trim().is_empty())
            .collect();
        self
    }

    pub fn journal(mut self, journal: impl Into<String>) -> Self {
        self.record.journal = journal.into();
        self
    }

    pub fn publication_date(mut self, date: impl Into<String>) -> Self {
        self.record.publication_date = date.into();
        self
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.record.abstract_text = abstract_text.into();
        self
    }

    /// Override the landing page URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.record.url = url.into();
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.record.volume = volume.into();
        self
    }

    pub fn issue(mut self, issue: impl Into<String>) -> Self {
        self.record.issue = issue.into();
        self
    }

    pub fn pages(mut self, pages: impl Into<String>) -> Self {
        self.record.pages = pages.into();
        self
    }

    /// Build the MetadataRecord
    pub fn build(self) -> MetadataRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let record = MetadataBuilder::new("10.1234/test.1234", "crossref")
            .title("Test Paper")
            .authors(["John Doe", " ", "Jane Smith"])
            .journal("The Lancet")
            .publication_date("2021-3-15")
            .abstract_text("This is a test abstract.")
            .build();

        assert_eq!(record.doi, "10.1234/test.1234");
        assert_eq!(record.url, "https://doi.org/10.1234/test.1234");
        assert_eq!(record.source, "crossref");
        assert_eq!(record.authors, vec!["John Doe", "Jane Smith"]);
        assert_eq!(record.journal, "The Lancet");
    }

    #[test]
    fn test_partial_record_keeps_all_keys() {
        let record: MetadataRecord =
            serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(record.title, "Only a title");
        assert!(record.authors.is_empty());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["authors"], serde_json::json!([]));
        assert_eq!(value["abstract"], serde_json::json!(""));
        assert_eq!(value["doi"], serde_json::json!(""));
    }

    #[test]
    fn test_analysis_text() {
        let record = MetadataBuilder::new("10.1/x", "crossref")
            .title("A Title")
            .abstract_text("An abstract.")
            .build();
        assert_eq!(record.analysis_text(), "A Title\n\nAn abstract.");
        assert_eq!(record.title_hint(), Some("A Title"));

        let title_only = MetadataBuilder::new("10.1/x", "crossref")
            .title("A Title")
            .build();
        assert_eq!(title_only.analysis_text(), "A Title");
        assert!(!title_only.has_abstract());

        assert_eq!(MetadataRecord::default().title_hint(), None);
    }
}
