//! Utility modules supporting the analysis core and the CLI.
//!
//! - [`count_phrase`], [`normalize_whitespace`], [`truncate_chars`]: text helpers
//!   shared by the classifier and the extractor
//! - [`validate_text`], [`validate_doi`], [`extract_doi`]: input validation
//! - [`HttpClient`]: shared HTTP client for DOI resolvers
//! - [`RetryConfig`] and [`with_retry`]: retry with exponential backoff on
//!   transient errors
//! - [`summary_table`], [`modules_table`], [`types_table`]: terminal rendering
//!
//! # Retry with Backoff
//!
//! ```rust,no_run
//! use literature_analyzer::sources::SourceError;
//! use literature_analyzer::utils::{with_retry, RetryConfig};
//!
//! # async fn fetch_data() -> Result<String, SourceError> { Ok("data".to_string()) }
//! # #[tokio::main]
//! # async fn main() -> Result<(), SourceError> {
//! let config = RetryConfig::default();
//! let data = with_retry(config, || fetch_data()).await?;
//! # Ok(())
//! # }
//! ```

mod display;
mod http;
mod retry;
mod text;
mod validate;

pub use display::{
    classification_table, display_width, modules_table, plain_classification, plain_report,
    summary_table, terminal_info, truncate_to_width, types_table, Terminal, DEFAULT_WIDTH,
};
pub use http::{user_agent, HttpClient, DEFAULT_USER_AGENT};
pub use retry::{with_retry, RetryConfig, TransientError};
pub use text::{
    contains_phrase, count_phrase, normalize_whitespace, trim_leading_separators, truncate_chars,
};
pub use validate::{extract_doi, validate_doi, validate_text, ValidationError, MIN_TEXT_CHARS};
