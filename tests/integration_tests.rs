//! Integration tests for Literature Analyzer
//!
//! These tests drive the public API end to end: classification, extraction
//! and report assembly.

use std::sync::Arc;

use literature_analyzer::classifier::{ClassifierSettings, KeywordClassifier, KeywordTable};
use literature_analyzer::config::Config;
use literature_analyzer::extractor::{ExtractionSettings, FieldExtractor};
use literature_analyzer::models::{AnalysisReport, MetadataRecord, PaperType, NOT_FOUND};
use literature_analyzer::pipeline::{AnalysisError, AnalysisPipeline, FixedClock};
use literature_analyzer::sources::mock::{make_record, MockResolver};
use literature_analyzer::templates::TemplateCatalog;
use literature_analyzer::utils::ValidationError;

const RCT_TEXT: &str = "Background: Hypertension is a leading cause of cardiovascular disease.\n\
Objective: To evaluate the efficacy of drug X.\n\
Methods: We conducted a multicenter, double-blind, placebo-controlled randomized controlled trial.\n\
Participants: 400 adults with stage 2 hypertension were enrolled.\n\
Intervention: Drug X 10 mg daily or placebo for 12 weeks.\n\
Outcomes: The primary outcome was change in systolic blood pressure.\n\
Results: Drug X lowered systolic pressure by 12 mmHg (95% CI 10-14; p < 0.001).\n\
Conclusion: Drug X is effective and well tolerated.";

const CASE_TEXT: &str = "Case Presentation: We report a 54-year-old man who presented with \
fever and a rash. Diagnosis: Biopsy confirmed cutaneous sarcoidosis. Treatment: He was \
started on oral prednisone. Outcome: The rash resolved within six weeks.";

const BASIC_TEXT: &str = "We investigated how kinase Y controls autophagy. Cells were cultured \
and analysed by western blot and qPCR. Knockdown of Y with siRNA reduced LC3 phosphorylation in \
vitro. These results suggest that Y regulates autophagy through the mTOR signaling pathway.";

fn pipeline() -> AnalysisPipeline {
    AnalysisPipeline::default().with_clock(FixedClock::new("2024-05-06 07:08:09"))
}

fn analyze(text: &str) -> AnalysisReport {
    pipeline().analyze(text, None, None).unwrap()
}

#[test]
fn test_every_schema_key_present() {
    let catalog = TemplateCatalog::builtin();
    for text in [RCT_TEXT, CASE_TEXT, BASIC_TEXT] {
        let report = analyze(text);
        let expected: Vec<&str> = catalog.schema(report.paper_type).keys().collect();
        let actual: Vec<&str> = report.core_info.keys().collect();
        assert_eq!(actual, expected);
        assert!(report.core_info.iter().all(|(_, v)| !v.is_empty()));
    }
}

#[test]
fn test_each_type_is_detected() {
    assert_eq!(analyze(RCT_TEXT).paper_type, PaperType::ClinicalResearch);
    assert_eq!(analyze(CASE_TEXT).paper_type, PaperType::CaseReport);
    assert_eq!(analyze(BASIC_TEXT).paper_type, PaperType::BasicResearch);
}

#[test]
fn test_randomized_trial_scenario() {
    let report = analyze(RCT_TEXT);

    assert_eq!(report.paper_type, PaperType::ClinicalResearch);
    assert!(report.confidence > 0.8);
    assert!(report.confidence <= 0.99);
    assert_eq!(
        report.core_info.get("objective"),
        Some("To evaluate the efficacy of drug X.")
    );
    assert_eq!(
        report.core_info.get("participants"),
        Some("400 adults with stage 2 hypertension were enrolled.")
    );
    assert_eq!(
        report.core_info.get("conclusion"),
        Some("Drug X is effective and well tolerated.")
    );
}

#[test]
fn test_case_report_modules() {
    let report = analyze(CASE_TEXT);
    assert_eq!(
        report.core_info.get("diagnosis"),
        Some("Biopsy confirmed cutaneous sarcoidosis.")
    );
    assert_eq!(
        report.core_info.get("treatment"),
        Some("He was started on oral prednisone.")
    );
    assert_eq!(
        report.core_info.get("outcome"),
        Some("The rash resolved within six weeks.")
    );
}

#[test]
fn test_short_text_scenario() {
    let err = pipeline().analyze("short", None, None).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::Validation(ValidationError::TextTooShort { .. })
    ));
}

#[test]
fn test_no_keyword_scenario() {
    let report = analyze("The weather was pleasant and the garden looked lovely today.");

    assert_eq!(report.paper_type, PaperType::BasicResearch);
    assert_eq!(report.confidence, 0.3);
    assert!(report.classification().scores.values().all(|s| *s == 0.0));
    for key in ["research_method", "results", "mechanism"] {
        assert_eq!(report.core_info.get(key), Some(NOT_FOUND), "{}", key);
    }
    assert_ne!(report.core_info.get("scientific_question"), Some(NOT_FOUND));
}

#[test]
fn test_title_only_metadata_scenario() {
    let metadata: MetadataRecord = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
    let report = pipeline().analyze(RCT_TEXT, None, Some(metadata)).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    let rendered = &json["full_analysis"]["metadata"];
    assert_eq!(rendered["title"], "Only a title");
    assert_eq!(rendered["authors"], serde_json::json!([]));
    assert_eq!(rendered["doi"], "");
}

#[test]
fn test_missing_metadata_renders_empty_object() {
    let json = serde_json::to_value(analyze(RCT_TEXT)).unwrap();
    assert_eq!(json["full_analysis"]["metadata"], serde_json::json!({}));
}

#[test]
fn test_report_is_idempotent_with_fixed_clock() {
    assert_eq!(analyze(CASE_TEXT), analyze(CASE_TEXT));
}

#[test]
fn test_json_round_trip() {
    let report = pipeline()
        .analyze(
            RCT_TEXT,
            None,
            Some(make_record("10.1/x", "Drug X trial", "Abstract")),
        )
        .unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in [
        "paper_type",
        "paper_type_description",
        "confidence",
        "core_info",
        "full_analysis",
        "generation_time",
    ] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(value["paper_type"], "clinical_research");
    assert_eq!(value["full_analysis"]["classification"]["type"], "clinical_research");
    assert!(value["full_analysis"]["classification"]["scores"]["case_report"].is_number());

    let keys: Vec<&String> = value["core_info"].as_object().unwrap().keys().collect();
    assert_eq!(keys[0], "background");
}

#[test]
fn test_tie_prefers_clinical_research() {
    let table = KeywordTable::empty()
        .with_keyword(PaperType::ClinicalResearch, "alpha", 2.0)
        .with_keyword(PaperType::CaseReport, "beta", 2.0);
    let classifier = KeywordClassifier::new(table, ClassifierSettings::default());
    let pipeline = AnalysisPipeline::new(classifier, FieldExtractor::default());

    let report = pipeline.analyze("beta appears before alpha here.", None, None).unwrap();
    assert_eq!(report.paper_type, PaperType::ClinicalResearch);
    assert_eq!(report.confidence, 0.5);
}

#[test]
fn test_chinese_text() {
    let text = "背景：高血压是常见疾病。目的：评估药物X的疗效。方法：本研究为多中心随机对照试验，\
        采用双盲设计。结果：收缩压显著下降。结论：药物X安全有效。";
    let report = analyze(text);
    assert_eq!(report.paper_type, PaperType::ClinicalResearch);
    assert_eq!(report.core_info.get("objective"), Some("评估药物X的疗效。"));
    assert_eq!(report.core_info.get("conclusion"), Some("药物X安全有效。"));
}

#[test]
fn test_pipeline_from_config() {
    let mut config = Config::default();
    config.extraction = ExtractionSettings {
        window_sentences: 0,
        positional_sentences: 1,
    };
    config.classifier.extra_keywords = toml::from_str::<Config>(
        r#"
[[classifier.extra_keywords]]
paper_type = "case_report"
keyword = "weather"
weight = 5.0
"#,
    )
    .unwrap()
    .classifier
    .extra_keywords;

    let pipeline = AnalysisPipeline::from_config(&config).unwrap();
    let report = pipeline
        .analyze("The weather was pleasant today. Nothing else happened.", None, None)
        .unwrap();
    assert_eq!(report.paper_type, PaperType::CaseReport);
    assert_eq!(
        report.core_info.get("case_summary"),
        Some("The weather was pleasant today.")
    );
}

#[test]
fn test_shared_pipeline_across_threads() {
    let pipeline = Arc::new(pipeline());
    let handles: Vec<_> = [RCT_TEXT, CASE_TEXT, BASIC_TEXT]
        .into_iter()
        .map(|text| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || pipeline.analyze(text, None, None).unwrap().paper_type)
        })
        .collect();
    let types: Vec<PaperType> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        types,
        vec![
            PaperType::ClinicalResearch,
            PaperType::CaseReport,
            PaperType::BasicResearch
        ]
    );
}

#[test]
fn test_custom_catalog_extractor() {
    let extractor = FieldExtractor::new(
        Arc::new(TemplateCatalog::builtin()),
        ExtractionSettings::default(),
    )
    .unwrap();
    let result = extractor.extract(CASE_TEXT, PaperType::CaseReport);
    assert_eq!(result.len(), 5);
}

#[tokio::test]
async fn test_doi_analysis_with_mock_resolver() {
    let resolver = MockResolver::new().with_record(make_record(
        "10.1000/xyz",
        "Western blot analysis of kinase Y",
        "Knockdown of Y reduced phosphorylation in vitro.",
    ));

    let report = pipeline()
        .analyze_doi(&resolver, "Read it at https://doi.org/10.1000/xyz.")
        .await
        .unwrap();
    assert_eq!(report.paper_type, PaperType::BasicResearch);
    assert_eq!(report.metadata().map(|m| m.title.as_str()), Some("Western blot analysis of kinase Y"));
    assert!(report
        .core_info
        .iter()
        .all(|(_, v)| v != "Western blot analysis of kinase Y"));
}
