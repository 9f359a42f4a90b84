//! Template-driven field extraction.
//!
//! For each module of the chosen paper type's schema the [`FieldExtractor`]
//! runs its strategies in order until one returns non-empty content:
//!
//! 1. [`LabeledSection`]: text under a heading matching one of the module's aliases
//! 2. [`KeywordWindow`]: the first sentence containing a trigger term, plus a few more
//! 3. [`Positional`]: opening or closing sentences for leading / trailing modules
//!
//! When every strategy misses, the module is filled with [`NOT_FOUND`], so the
//! result always carries every key of the schema.

mod document;
mod strategies;

pub use document::{Document, Heading, HeadingPattern};
pub use strategies::{ExtractionStrategy, KeywordWindow, LabeledSection, Positional};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{ExtractionResult, PaperType, NOT_FOUND};
use crate::templates::{ModuleDef, TemplateCatalog};
use crate::utils::{normalize_whitespace, truncate_chars};

/// Tunables for the built-in strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Sentences taken after the sentence holding a trigger term
    pub window_sentences: usize,
    /// Sentences taken from the start or end of the body
    pub positional_sentences: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            window_sentences: 1,
            positional_sentences: 2,
        }
    }
}

impl ExtractionSettings {
    /// Default strategy chain for these settings
    pub fn strategies(&self) -> Vec<Box<dyn ExtractionStrategy>> {
        vec![
            Box::new(LabeledSection),
            Box::new(KeywordWindow::new(self.window_sentences)),
            Box::new(Positional::new(self.positional_sentences)),
        ]
    }
}

/// Content found for one module and the strategy that found it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleExtraction {
    pub key: &'static str,
    pub content: String,
    /// `None` when the placeholder was used
    pub strategy: Option<&'static str>,
}

/// Extracts schema modules from free text
#[derive(Debug)]
pub struct FieldExtractor {
    catalog: Arc<TemplateCatalog>,
    headings: HeadingPattern,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl FieldExtractor {
    /// Extractor with the default strategy chain
    pub fn new(
        catalog: Arc<TemplateCatalog>,
        settings: ExtractionSettings,
    ) -> Result<Self, regex::Error> {
        Self::with_strategies(catalog, settings.strategies())
    }

    /// Extractor with a custom strategy chain
    pub fn with_strategies(
        catalog: Arc<TemplateCatalog>,
        strategies: Vec<Box<dyn ExtractionStrategy>>,
    ) -> Result<Self, regex::Error> {
        let headings = HeadingPattern::new(&catalog.headings())?;
        Ok(Self {
            catalog,
            headings,
            strategies,
        })
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Extract every module of `paper_type`'s schema from `text`
    pub fn extract(&self, text: &str, paper_type: PaperType) -> ExtractionResult {
        self.extract_with_title(text, paper_type, None)
    }

    /// Like [`FieldExtractor::extract`], ignoring a leading copy of `title`
    pub fn extract_with_title(
        &self,
        text: &str,
        paper_type: PaperType,
        title: Option<&str>,
    ) -> ExtractionResult {
        self.extract_detailed(text, paper_type, title)
            .into_iter()
            .fold(ExtractionResult::new(), |mut result, module| {
                result.insert(module.key, module.content);
                result
            })
    }

    /// Per-module extraction including the strategy that produced each value
    pub fn extract_detailed(
        &self,
        text: &str,
        paper_type: PaperType,
        title: Option<&str>,
    ) -> Vec<ModuleExtraction> {
        let schema = self.catalog.schema(paper_type);
        let document = Document::parse(text, title, &self.headings);

        tracing::debug!(
            "Extracting {} modules for {} from {} headings, {} sentences",
            schema.len(),
            paper_type,
            document.headings().len(),
            document.sentences().len()
        );

        schema
            .modules()
            .iter()
            .map(|module| self.extract_module(&document, module))
            .collect()
    }

    fn extract_module(&self, document: &Document, module: &ModuleDef) -> ModuleExtraction {
        for strategy in &self.strategies {
            let Some(raw) = strategy.attempt(document, module) else {
                continue;
            };
            let content = normalize_whitespace(&raw);
            if content.is_empty() {
                continue;
            }

            tracing::trace!("Module '{}' filled by {}", module.key, strategy.name());
            return ModuleExtraction {
                key: module.key,
                content: truncate_chars(&content, module.max_chars),
                strategy: Some(strategy.name()),
            };
        }

        tracing::trace!("Module '{}' not found", module.key);
        ModuleExtraction {
            key: module.key,
            content: NOT_FOUND.to_string(),
            strategy: None,
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(
            Arc::new(TemplateCatalog::builtin()),
            ExtractionSettings::default(),
        )
        .expect("built-in headings form a valid pattern")
    }
}
