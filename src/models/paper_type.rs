//! Paper type taxonomy used by classification and extraction.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of paper a text was classified as
///
/// The declaration order doubles as the tie-break priority: when two types
/// reach the same score, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperType {
    ClinicalResearch,
    CaseReport,
    BasicResearch,
}

impl PaperType {
    /// All supported types, in tie-break priority order
    pub const ALL: [PaperType; 3] = [
        PaperType::ClinicalResearch,
        PaperType::CaseReport,
        PaperType::BasicResearch,
    ];

    /// Returns the identifier used in serialized output
    pub fn id(&self) -> &'static str {
        match self {
            PaperType::ClinicalResearch => "clinical_research",
            PaperType::CaseReport => "case_report",
            PaperType::BasicResearch => "basic_research",
        }
    }

    /// Returns the human-readable name of the type
    pub fn description(&self) -> &'static str {
        match self {
            PaperType::ClinicalResearch => "Clinical Research",
            PaperType::CaseReport => "Case Report",
            PaperType::BasicResearch => "Basic Research",
        }
    }

    /// Returns a one-line summary of what papers of this type look like
    pub fn summary(&self) -> &'static str {
        match self {
            PaperType::ClinicalResearch => {
                "Clinical trials, cohort studies, and other clinical research"
            }
            PaperType::CaseReport => "Case reports and case studies",
            PaperType::BasicResearch => "Basic experiments and mechanism studies",
        }
    }

    /// Position in the tie-break order (lower wins)
    pub fn priority(&self) -> usize {
        match self {
            PaperType::ClinicalResearch => 0,
            PaperType::CaseReport => 1,
            PaperType::BasicResearch => 2,
        }
    }
}

impl std::fmt::Display for PaperType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Error returned when parsing an unknown paper type name
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown paper type: {0}")]
pub struct UnknownPaperType(pub String);

impl FromStr for PaperType {
    type Err = UnknownPaperType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        PaperType::ALL
            .into_iter()
            .find(|t| t.id() == normalized)
            .ok_or_else(|| UnknownPaperType(s.to_string()))
    }
}
