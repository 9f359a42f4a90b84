//! Input validation for analysis text and DOIs.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Minimum number of characters (after trimming) accepted for analysis
pub const MIN_TEXT_CHARS: usize = 10;

/// Validation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Text too short: {actual} characters, at least {min} required")]
    TextTooShort { min: usize, actual: usize },

    #[error("Invalid DOI format: {0}")]
    InvalidDoi(String),
}

/// Check that `text` is long enough to analyze
///
/// Length is counted in characters of the trimmed text, so ten Chinese
/// characters are as acceptable as ten ASCII letters.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    let actual = text.trim().chars().count();
    if actual < MIN_TEXT_CHARS {
        return Err(ValidationError::TextTooShort {
            min: MIN_TEXT_CHARS,
            actual,
        });
    }
    Ok(())
}

/// Validate and normalize a DOI
///
/// DOIs have the format "10.xxxx/xxxxxx" where xxxx is a registrant code
/// and xxxxxx is an item ID. The result is lowercase with any `doi:` or
/// resolver URL prefix removed.
pub fn validate_doi(doi: &str) -> Result<String, ValidationError> {
    let doi = doi.trim().to_lowercase();

    if doi.is_empty() {
        return Err(ValidationError::InvalidDoi("empty DOI".to_string()));
    }

    let doi = strip_doi_prefix(&doi);

    if !doi.starts_with("10.") {
        return Err(ValidationError::InvalidDoi(
            "DOI must start with '10.'".to_string(),
        ));
    }

    if !doi.contains('/') {
        return Err(ValidationError::InvalidDoi(
            "DOI must contain a slash".to_string(),
        ));
    }

    if doi.contains("..") {
        return Err(ValidationError::InvalidDoi(
            "path traversal detected".to_string(),
        ));
    }

    if doi.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidDoi(
            "DOI must not contain whitespace".to_string(),
        ));
    }

    Ok(doi.to_string())
}

/// Find a DOI in user input
///
/// Accepts a bare DOI, a `doi:` prefixed string, a `doi.org` / `dx.doi.org`
/// URL, or free text mentioning a DOI. Trailing punctuation picked up from
/// the surrounding sentence is dropped.
pub fn extract_doi(input: &str) -> Result<String, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::InvalidDoi("empty DOI".to_string()));
    }

    if let Ok(doi) = validate_doi(input) {
        return Ok(doi.trim_end_matches(trailing_punctuation).to_string());
    }

    let found = doi_regex()
        .find(input)
        .ok_or_else(|| ValidationError::InvalidDoi(format!("no DOI found in '{}'", input)))?;

    validate_doi(found.as_str().trim_end_matches(trailing_punctuation))
}

fn strip_doi_prefix(doi: &str) -> &str {
    const PREFIXES: &[&str] = &[
        "doi:",
        "https://doi.org/",
        "http://doi.org/",
        "https://dx.doi.org/",
        "http://dx.doi.org/",
    ];
    PREFIXES
        .iter()
        .find_map(|prefix| doi.strip_prefix(prefix))
        .map_or(doi, str::trim_start)
}

fn trailing_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':' | ')' | ']' | '}' | '"' | '\'' | '>' | '。' | '，')
}

fn doi_regex() -> &'static Regex {
    static DOI: OnceLock<Regex> = OnceLock::new();
    DOI.get_or_init(|| {
        Regex::new(r"10\.\d{4,9}/[^\s]+").unwrap_or_else(|e| panic!("invalid DOI pattern: {e}"))
    })
}
