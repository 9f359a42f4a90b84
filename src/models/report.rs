//! Classification, extraction and report types produced by the analysis core.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::{MetadataRecord, PaperType};

/// Value emitted for a module when no extraction strategy produced content
pub const NOT_FOUND: &str = "not found";

/// Outcome of classifying a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Predicted paper type
    #[serde(rename = "type")]
    pub paper_type: PaperType,

    /// Certainty of the prediction, always within `[0, 1]`
    pub confidence: f64,

    /// Raw weighted score for every supported type
    pub scores_by_type: BTreeMap<PaperType, f64>,
}

impl ClassificationResult {
    /// Raw score for a type (zero when the type was not scored)
    pub fn score(&self, paper_type: PaperType) -> f64 {
        self.scores_by_type.get(&paper_type).copied().unwrap_or(0.0)
    }

    /// Whether any keyword matched at all
    pub fn has_evidence(&self) -> bool {
        self.scores_by_type.values().any(|s| *s > 0.0)
    }
}

/// Extracted content keyed by module, kept in schema order
///
/// Serializes as a JSON object whose keys follow the order of the schema the
/// result was extracted with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    entries: Vec<(String, String)>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a module, replacing an existing value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether the module fell through to the placeholder
    pub fn is_placeholder(&self, key: &str) -> bool {
        self.get(key) == Some(NOT_FOUND)
    }

    /// Module keys in schema order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtractionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ExtractionResult;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of module keys to extracted text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut result = ExtractionResult::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    result.insert(key, value);
                }
                Ok(result)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Classification block nested in the full analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    #[serde(rename = "type")]
    pub paper_type: PaperType,
    pub type_description: String,
    pub confidence: f64,
    pub scores: BTreeMap<PaperType, f64>,
}

impl From<&ClassificationResult> for ClassificationSummary {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            paper_type: result.paper_type,
            type_description: result.paper_type.description().to_string(),
            confidence: result.confidence,
            scores: result.scores_by_type.clone(),
        }
    }
}

/// Detailed analysis nested in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAnalysis {
    pub paper_type: PaperType,
    pub modules: ExtractionResult,
    pub classification: ClassificationSummary,

    /// External metadata, rendered as `{}` when none was supplied
    #[serde(with = "metadata_or_empty")]
    pub metadata: Option<MetadataRecord>,
}

/// Structured report returned by the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub paper_type: PaperType,
    pub paper_type_description: String,
    pub confidence: f64,
    pub core_info: ExtractionResult,
    pub full_analysis: FullAnalysis,

    /// Local wall-clock time formatted as `YYYY-MM-DD HH:MM:SS`
    pub generation_time: String,
}

impl AnalysisReport {
    pub fn classification(&self) -> &ClassificationSummary {
        &self.full_analysis.classification
    }

    pub fn metadata(&self) -> Option<&MetadataRecord> {
        self.full_analysis.metadata.as_ref()
    }
}

mod metadata_or_empty {
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::models::MetadataRecord;

    pub fn serialize<S: Serializer>(
        value: &Option<MetadataRecord>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(record) => record.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<MetadataRecord>, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(ref map) if map.is_empty() => Ok(None),
            other => serde_json::from_value(other)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_result_keeps_insertion_order() {
        let mut result = ExtractionResult::new();
        result.insert("objective", "to test");
        result.insert("background", "context");
        result.insert("objective", "to test again");

        let keys: Vec<&str> = result.keys().collect();
        assert_eq!(keys, vec!["objective", "background"]);
        assert_eq!(result.get("objective"), Some("to test again"));

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"objective":"to test again","background":"context"}"#);
    }

    #[test]
    fn test_extraction_result_placeholder() {
        let mut result = ExtractionResult::new();
        result.insert("mechanism", NOT_FOUND);
        result.insert("results", "increased");
        assert!(result.is_placeholder("mechanism"));
        assert!(!result.is_placeholder("results"));
        assert!(!result.is_placeholder("missing"));
    }

    #[test]
    fn test_classification_serializes_type_key() {
        let mut scores = BTreeMap::new();
        scores.insert(PaperType::ClinicalResearch, 4.0);
        scores.insert(PaperType::CaseReport, 0.0);
        scores.insert(PaperType::BasicResearch, 1.5);
        let result = ClassificationResult {
            paper_type: PaperType::ClinicalResearch,
            confidence: 0.72,
            scores_by_type: scores,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "clinical_research");
        assert_eq!(value["scores_by_type"]["basic_research"], 1.5);
        assert!(result.has_evidence());

        let summary = ClassificationSummary::from(&result);
        assert_eq!(summary.type_description, "Clinical Research");
    }
}
