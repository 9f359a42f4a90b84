//! # Literature Analyzer
//!
//! Classifies scientific paper text as clinical research, case report or
//! basic research and extracts a structured summary of its content modules.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Paper types, metadata records and the analysis report
//! - [`templates`]: Module schema per paper type
//! - [`classifier`]: Weighted keyword classification
//! - [`extractor`]: Cascading extraction strategies
//! - [`pipeline`]: Classifier, extractor and report assembly
//! - [`sources`]: DOI resolvers (CrossRef, PubMed) behind an async trait
//! - [`utils`]: Text helpers, validation, HTTP client and terminal output
//! - [`config`]: Configuration management
//!
//! ```rust
//! use literature_analyzer::AnalysisPipeline;
//!
//! let report = AnalysisPipeline::default()
//!     .analyze(
//!         "Objective: To assess drug X. Methods: A randomized controlled trial.",
//!         None,
//!         None,
//!     )
//!     .unwrap();
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod classifier;
pub mod config;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod templates;
pub mod utils;

// Re-export commonly used types
pub use classifier::KeywordClassifier;
pub use extractor::FieldExtractor;
pub use models::{AnalysisReport, MetadataRecord, PaperType};
pub use pipeline::{AnalysisError, AnalysisPipeline};
pub use sources::{DoiResolver, ResolverChain};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
