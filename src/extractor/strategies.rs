//! Extraction strategies, tried in order for every module.

use std::fmt::Debug;

use super::document::Document;
use crate::templates::{ModuleDef, Position};
use crate::utils::contains_phrase;

/// One way of locating a module's content in a document
///
/// Strategies never fail: a strategy that cannot find anything returns `None`
/// and the extractor moves on to the next one.
pub trait ExtractionStrategy: Debug + Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Raw content for `module`, if this strategy can locate it
    fn attempt(&self, document: &Document, module: &ModuleDef) -> Option<String>;
}

/// Text under a heading matching one of the module's aliases
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledSection;

impl ExtractionStrategy for LabeledSection {
    fn name(&self) -> &'static str {
        "labeled_section"
    }

    fn attempt(&self, document: &Document, module: &ModuleDef) -> Option<String> {
        document
            .headings()
            .iter()
            .enumerate()
            .filter(|(_, heading)| module.has_alias(&heading.name))
            .filter_map(|(index, _)| document.section(index))
            .find(|content| !content.trim().is_empty())
            .map(str::to_string)
    }
}

/// First sentence containing a trigger term, plus the sentences after it
#[derive(Debug, Clone, Copy)]
pub struct KeywordWindow {
    following: usize,
}

impl KeywordWindow {
    pub fn new(following: usize) -> Self {
        Self { following }
    }
}

impl ExtractionStrategy for KeywordWindow {
    fn name(&self) -> &'static str {
        "keyword_window"
    }

    fn attempt(&self, document: &Document, module: &ModuleDef) -> Option<String> {
        let first = document.lower_sentences().iter().position(|sentence| {
            module
                .triggers
                .iter()
                .any(|trigger| contains_phrase(sentence, trigger))
        })?;

        let sentences = document.sentences();
        let end = first
            .saturating_add(1)
            .saturating_add(self.following)
            .min(sentences.len());
        Some(sentences[first..end].join(" "))
    }
}

/// Opening or closing sentences for modules with a conventional position
#[derive(Debug, Clone, Copy)]
pub struct Positional {
    sentences: usize,
}

impl Positional {
    pub fn new(sentences: usize) -> Self {
        Self {
            sentences: sentences.max(1),
        }
    }
}

impl ExtractionStrategy for Positional {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn attempt(&self, document: &Document, module: &ModuleDef) -> Option<String> {
        let position = module.position?;
        let sentences = document.sentences();
        if sentences.is_empty() {
            return None;
        }

        let count = self.sentences.min(sentences.len());
        let picked = match position {
            Position::Leading => &sentences[..count],
            Position::Trailing => &sentences[sentences.len() - count..],
        };
        Some(picked.join(" "))
    }
}
