//! Analysis pipeline: classification, extraction and report assembly.

use std::fmt;
use std::sync::Arc;

use crate::classifier::KeywordClassifier;
use crate::config::Config;
use crate::extractor::FieldExtractor;
use crate::models::{
    AnalysisReport, ClassificationResult, ClassificationSummary, FullAnalysis, MetadataRecord,
};
use crate::sources::{DoiResolver, SourceError};
use crate::templates::TemplateCatalog;
use crate::utils::{extract_doi, validate_text, ValidationError};

/// Format of `generation_time`
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Failures visible to callers of the pipeline
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Input text or DOI rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The DOI could not be resolved to a record
    #[error("Metadata unavailable for DOI {doi}: {source}")]
    MetadataUnavailable {
        doi: String,
        #[source]
        source: SourceError,
    },
}

/// Source of report timestamps
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time formatted as `YYYY-MM-DD HH:MM:SS`
    fn now(&self) -> String;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        chrono::Local::now().format(TIME_FORMAT).to_string()
    }
}

/// Clock frozen at one timestamp, for reproducible reports
#[derive(Debug, Clone)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

/// Classifier and extractor wired together
///
/// The pipeline holds no per-request state and can be shared across threads
/// behind an [`Arc`].
///
/// ```rust
/// use literature_analyzer::pipeline::AnalysisPipeline;
/// use literature_analyzer::models::PaperType;
///
/// let pipeline = AnalysisPipeline::default();
/// let report = pipeline
///     .analyze("Case Report: We report a rare presentation in a 40-year-old woman.", None, None)
///     .unwrap();
/// assert_eq!(report.paper_type, PaperType::CaseReport);
/// assert!(report.core_info.contains_key("case_summary"));
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    classifier: Arc<KeywordClassifier>,
    extractor: Arc<FieldExtractor>,
    clock: Arc<dyn Clock>,
}

impl AnalysisPipeline {
    pub fn new(classifier: KeywordClassifier, extractor: FieldExtractor) -> Self {
        Self {
            classifier: Arc::new(classifier),
            extractor: Arc::new(extractor),
            clock: Arc::new(SystemClock),
        }
    }

    /// Build from the `[classifier]` and `[extraction]` configuration sections
    pub fn from_config(config: &Config) -> Result<Self, regex::Error> {
        let classifier = KeywordClassifier::new(
            config.classifier.keyword_table(),
            config.classifier.settings(),
        );
        let extractor = FieldExtractor::new(
            Arc::new(TemplateCatalog::builtin()),
            config.extraction,
        )?;
        Ok(Self::new(classifier, extractor))
    }

    /// Replace the clock used for `generation_time`
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn classifier(&self) -> &KeywordClassifier {
        &self.classifier
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        self.extractor.catalog()
    }

    /// Classify a text without extracting modules
    pub fn classify(&self, text: &str) -> Result<ClassificationResult, AnalysisError> {
        validate_text(text)?;
        Ok(self.classifier.classify(text))
    }

    /// Classify `text`, extract its modules and assemble the report
    ///
    /// `title` only keeps a leading copy of the title out of the extraction
    /// body. `metadata` is attached to the report unchanged.
    pub fn analyze(
        &self,
        text: &str,
        title: Option<&str>,
        metadata: Option<MetadataRecord>,
    ) -> Result<AnalysisReport, AnalysisError> {
        validate_text(text)?;

        let classification = self.classifier.classify(text);
        let paper_type = classification.paper_type;
        let modules = self.extractor.extract_with_title(text, paper_type, title);

        let report = AnalysisReport {
            paper_type,
            paper_type_description: paper_type.description().to_string(),
            confidence: classification.confidence,
            core_info: modules.clone(),
            full_analysis: FullAnalysis {
                paper_type,
                modules,
                classification: ClassificationSummary::from(&classification),
                metadata,
            },
            generation_time: self.clock.now(),
        };

        tracing::info!(
            "Generated {} report (confidence {:.2}, {} modules)",
            paper_type,
            report.confidence,
            report.core_info.len()
        );
        Ok(report)
    }

    /// Analyze a resolved record's title and abstract
    pub fn analyze_metadata(&self, record: MetadataRecord) -> Result<AnalysisReport, AnalysisError> {
        let text = record.analysis_text();
        let title = record.title_hint().map(str::to_string);
        if !record.has_abstract() {
            tracing::debug!("Record for {} has no abstract; analyzing title only", record.doi);
        }
        self.analyze(&text, title.as_deref(), Some(record))
    }

    /// Resolve `doi` and analyze the resulting record
    ///
    /// Accepts anything [`extract_doi`] understands, such as `doi.org` URLs.
    pub async fn analyze_doi(
        &self,
        resolver: &dyn DoiResolver,
        doi: &str,
    ) -> Result<AnalysisReport, AnalysisError> {
        let doi = extract_doi(doi)?;
        tracing::debug!("Resolving {} via {}", doi, resolver.name());

        let record = resolver
            .resolve(&doi)
            .await
            .map_err(|source| AnalysisError::MetadataUnavailable {
                doi: doi.clone(),
                source,
            })?;
        self.analyze_metadata(record)
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(KeywordClassifier::default(), FieldExtractor::default())
    }
}
