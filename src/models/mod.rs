//! Core data models for paper classification, extraction and reporting.

mod metadata;
mod paper_type;
mod report;

pub use metadata::{MetadataBuilder, MetadataRecord};
pub use paper_type::{PaperType, UnknownPaperType};
pub use report::{
    AnalysisReport, ClassificationResult, ClassificationSummary, ExtractionResult, FullAnalysis,
    NOT_FOUND,
};
