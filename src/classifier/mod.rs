//! Keyword-based paper type classification.
//!
//! The [`KeywordClassifier`] scores a text against one weighted keyword table
//! per [`PaperType`] and reports the best type together with a confidence.
//!
//! # Scoring
//!
//! - Matching is case-insensitive phrase matching (see [`count_phrase`]).
//! - Each keyword contributes `weight × min(occurrences, occurrence_cap)`.
//! - `confidence = top / (top + second + ε)`, clipped to
//!   `[min_confidence, max_confidence]`.
//! - Ties resolve by [`PaperType`] priority: clinical research, then case
//!   report, then basic research.
//! - Without any match the result is [`PaperType::BasicResearch`] with
//!   `fallback_confidence`.
//!
//! ```rust
//! use literature_analyzer::classifier::KeywordClassifier;
//! use literature_analyzer::models::PaperType;
//!
//! let classifier = KeywordClassifier::default();
//! let result = classifier.classify("A double-blind, placebo-controlled randomized controlled trial.");
//! assert_eq!(result.paper_type, PaperType::ClinicalResearch);
//! ```

mod keywords;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ClassificationResult, PaperType};
use crate::utils::count_phrase;

/// Type reported when no keyword matches
pub const FALLBACK_TYPE: PaperType = PaperType::BasicResearch;

/// A keyword or phrase with its weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKeyword {
    /// Lowercase keyword or phrase
    pub keyword: String,
    pub weight: f64,
}

/// Additional keyword supplied through configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraKeyword {
    pub paper_type: PaperType,
    pub keyword: String,
    pub weight: f64,
}

/// Weighted keyword tables, one per paper type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordTable {
    tables: BTreeMap<PaperType, Vec<WeightedKeyword>>,
}

impl KeywordTable {
    /// Built-in English and Chinese tables
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (paper_type, entries) in [
            (PaperType::ClinicalResearch, keywords::CLINICAL_RESEARCH),
            (PaperType::CaseReport, keywords::CASE_REPORT),
            (PaperType::BasicResearch, keywords::BASIC_RESEARCH),
        ] {
            for (keyword, weight) in entries {
                table.insert(paper_type, keyword, *weight);
            }
        }
        table
    }

    /// Table without any keyword
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a keyword, builder style
    pub fn with_keyword(mut self, paper_type: PaperType, keyword: &str, weight: f64) -> Self {
        self.insert(paper_type, keyword, weight);
        self
    }

    /// Append configured keywords to the table
    pub fn with_extra(mut self, extra: &[ExtraKeyword]) -> Self {
        for entry in extra {
            self.insert(entry.paper_type, &entry.keyword, entry.weight);
        }
        self
    }

    /// Add a keyword; an existing entry for the same phrase gets the new weight
    ///
    /// Blank keywords and non-positive or non-finite weights are ignored.
    pub fn insert(&mut self, paper_type: PaperType, keyword: &str, weight: f64) {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || !weight.is_finite() || weight <= 0.0 {
            tracing::debug!("Ignoring keyword '{}' with weight {}", keyword, weight);
            return;
        }

        let entries = self.tables.entry(paper_type).or_default();
        match entries.iter_mut().find(|e| e.keyword == keyword) {
            Some(existing) => existing.weight = weight,
            None => entries.push(WeightedKeyword { keyword, weight }),
        }
    }

    /// Keywords for a type (empty when the type has no table)
    pub fn keywords(&self, paper_type: PaperType) -> &[WeightedKeyword] {
        self.tables
            .get(&paper_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of keywords across all types
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tunable constants of the confidence computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Maximum number of counted occurrences per keyword
    pub occurrence_cap: usize,

    /// Lower clip for confidence when at least one keyword matched
    pub min_confidence: f64,

    /// Upper clip for confidence
    pub max_confidence: f64,

    /// Confidence reported when nothing matched
    pub fallback_confidence: f64,

    /// Added to the denominator of the confidence ratio
    pub epsilon: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            occurrence_cap: 3,
            min_confidence: 0.5,
            max_confidence: 0.99,
            fallback_confidence: 0.3,
            epsilon: 1e-9,
        }
    }
}

impl ClassifierSettings {
    /// Bring every value into its valid range
    fn sanitized(self) -> Self {
        let unit = |v: f64, default: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { default };
        let defaults = Self::default();

        let max_confidence = unit(self.max_confidence, defaults.max_confidence);
        let min_confidence = unit(self.min_confidence, defaults.min_confidence).min(max_confidence);
        Self {
            occurrence_cap: self.occurrence_cap.max(1),
            min_confidence,
            max_confidence,
            fallback_confidence: unit(self.fallback_confidence, defaults.fallback_confidence),
            epsilon: if self.epsilon.is_finite() && self.epsilon > 0.0 {
                self.epsilon
            } else {
                defaults.epsilon
            },
        }
    }
}

/// A keyword found in a text, with its capped contribution
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub paper_type: PaperType,
    pub keyword: String,
    pub occurrences: usize,
    pub contribution: f64,
}

/// Classifies texts by weighted keyword scoring
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    table: KeywordTable,
    settings: ClassifierSettings,
}

impl KeywordClassifier {
    pub fn new(table: KeywordTable, settings: ClassifierSettings) -> Self {
        Self {
            table,
            settings: settings.sanitized(),
        }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Classify a text. Never fails.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let lower = text.to_lowercase();

        let scores_by_type: BTreeMap<PaperType, f64> = PaperType::ALL
            .into_iter()
            .map(|t| (t, self.score_lowercase(&lower, t)))
            .collect();

        let mut ranked: Vec<(PaperType, f64)> =
            scores_by_type.iter().map(|(t, s)| (*t, *s)).collect();
        ranked.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| a.0.priority().cmp(&b.0.priority()))
        });

        let (top_type, top_score) = ranked[0];
        let second_score = ranked.get(1).map(|(_, s)| *s).unwrap_or(0.0);

        if top_score <= 0.0 {
            tracing::debug!(
                "No classification keyword matched; defaulting to {}",
                FALLBACK_TYPE
            );
            return ClassificationResult {
                paper_type: FALLBACK_TYPE,
                confidence: self.settings.fallback_confidence,
                scores_by_type,
            };
        }

        let ratio = top_score / (top_score + second_score + self.settings.epsilon);
        let confidence = ratio.clamp(self.settings.min_confidence, self.settings.max_confidence);

        tracing::debug!(
            "Classified as {} (confidence {:.3}, scores {:?})",
            top_type,
            confidence,
            scores_by_type
        );

        ClassificationResult {
            paper_type: top_type,
            confidence,
            scores_by_type,
        }
    }

    /// Raw score of `text` for one type
    pub fn score(&self, text: &str, paper_type: PaperType) -> f64 {
        self.score_lowercase(&text.to_lowercase(), paper_type)
    }

    /// Every keyword of every type found in `text`, in table order
    pub fn matches(&self, text: &str) -> Vec<KeywordMatch> {
        let lower = text.to_lowercase();
        let mut found = Vec::new();
        for paper_type in PaperType::ALL {
            for entry in self.table.keywords(paper_type) {
                let occurrences = count_phrase(&lower, &entry.keyword);
                if occurrences > 0 {
                    found.push(KeywordMatch {
                        paper_type,
                        keyword: entry.keyword.clone(),
                        occurrences,
                        contribution: self.contribution(entry, occurrences),
                    });
                }
            }
        }
        found
    }

    fn score_lowercase(&self, lower: &str, paper_type: PaperType) -> f64 {
        self.table
            .keywords(paper_type)
            .iter()
            .map(|entry| self.contribution(entry, count_phrase(lower, &entry.keyword)))
            .sum()
    }

    fn contribution(&self, entry: &WeightedKeyword, occurrences: usize) -> f64 {
        entry.weight * occurrences.min(self.settings.occurrence_cap) as f64
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(KeywordTable::builtin(), ClassifierSettings::default())
    }
}
