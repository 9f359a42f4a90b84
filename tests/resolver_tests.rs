//! HTTP-level tests for the DOI resolvers against a local mock server.

use literature_analyzer::config::ResolverSettings;
use literature_analyzer::pipeline::{AnalysisError, AnalysisPipeline, FixedClock};
use literature_analyzer::sources::{DoiResolver, ResolverChain, SourceError};
use literature_analyzer::PaperType;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn settings(server: &ServerGuard, providers: &[&str], max_retries: u32) -> ResolverSettings {
    ResolverSettings {
        providers: providers.iter().map(|p| p.to_string()).collect(),
        timeout_seconds: 5,
        mailto: Some("tests@example.org".to_string()),
        max_retries,
        crossref_base_url: server.url(),
        pubmed_base_url: format!("{}/eutils", server.url()),
    }
}

fn crossref_body() -> String {
    json!({
        "status": "ok",
        "message": {
            "DOI": "10.1000/rct",
            "title": ["Drug X versus placebo in hypertension"],
            "author": [{"given": "Ada", "family": "Lovelace"}],
            "container-title": ["Journal of Testing"],
            "published-print": {"date-parts": [[2021, 6, 1]]},
            "abstract": "<jats:p>Objective: To assess drug X.</jats:p> <jats:p>Methods: A randomized controlled trial with placebo.</jats:p>"
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_crossref_resolves_record() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/works/10.1000%2Frct")
        .match_header(
            "user-agent",
            Matcher::Regex("mailto:tests@example.org".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(crossref_body())
        .expect(1)
        .create_async()
        .await;

    let chain = ResolverChain::from_settings(&settings(&server, &["crossref"], 0)).unwrap();
    let record = chain.resolve("10.1000/rct").await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.title, "Drug X versus placebo in hypertension");
    assert_eq!(record.authors, vec!["Ada Lovelace"]);
    assert_eq!(record.journal, "Journal of Testing");
    assert_eq!(record.publication_date, "2021-6-1");
    assert_eq!(
        record.abstract_text,
        "Objective: To assess drug X. Methods: A randomized controlled trial with placebo."
    );
    assert_eq!(record.source, "crossref");
}

#[tokio::test]
async fn test_crossref_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/works/10.1000%2Fmissing")
        .with_status(404)
        .create_async()
        .await;

    let chain = ResolverChain::from_settings(&settings(&server, &["crossref"], 0)).unwrap();
    let err = chain.resolve("10.1000/missing").await.unwrap_err();
    assert!(matches!(err, SourceError::NotFound(ref msg) if msg.contains("10.1000/missing")));
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/works/10.1000%2Fflaky")
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let chain = ResolverChain::from_settings(&settings(&server, &["crossref"], 1)).unwrap();
    assert!(chain.resolve("10.1000/flaky").await.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_pubmed_resolves_record() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/eutils/esearch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".to_string(), "pubmed".to_string()),
            Matcher::UrlEncoded("term".to_string(), "10.1000/pm".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"esearchresult": {"count": "1", "idlist": ["123456"]}}).to_string())
        .create_async()
        .await;
    let summary = server
        .mock("GET", "/eutils/esummary.fcgi")
        .match_query(Matcher::UrlEncoded("id".to_string(), "123456".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"result": {
                "uids": ["123456"],
                "123456": {
                    "title": "A rare case of something",
                    "authors": [{"name": "Doe J"}],
                    "source": "Case Rep Med",
                    "pubdate": "2022 Mar"
                }
            }})
            .to_string(),
        )
        .create_async()
        .await;

    let chain = ResolverChain::from_settings(&settings(&server, &["pubmed"], 0)).unwrap();
    let record = chain.resolve("10.1000/pm").await.unwrap();

    search.assert_async().await;
    summary.assert_async().await;
    assert_eq!(record.title, "A rare case of something");
    assert_eq!(record.authors, vec!["Doe J"]);
    assert_eq!(record.journal, "Case Rep Med");
    assert_eq!(record.source, "pubmed");
}

#[tokio::test]
async fn test_pubmed_empty_search_is_not_found() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/eutils/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"esearchresult": {"count": "0", "idlist": []}}).to_string())
        .create_async()
        .await;

    let chain = ResolverChain::from_settings(&settings(&server, &["pubmed"], 0)).unwrap();
    assert!(matches!(
        chain.resolve("10.1000/none").await,
        Err(SourceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_chain_falls_back_to_pubmed() {
    let mut server = Server::new_async().await;
    let crossref = server
        .mock("GET", "/works/10.1000%2Fpm")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let _search = server
        .mock("GET", "/eutils/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"esearchresult": {"idlist": ["7"]}}).to_string())
        .create_async()
        .await;
    let _summary = server
        .mock("GET", "/eutils/esummary.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"result": {"7": {"title": "Found in PubMed"}}}).to_string())
        .create_async()
        .await;

    let chain =
        ResolverChain::from_settings(&settings(&server, &["crossref", "pubmed"], 0)).unwrap();
    let record = chain.resolve("10.1000/pm").await.unwrap();

    crossref.assert_async().await;
    assert_eq!(record.title, "Found in PubMed");
    assert_eq!(record.source, "pubmed");
}

#[tokio::test]
async fn test_analyze_doi_over_http() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/works/10.1000%2Frct")
        .with_status(200)
        .with_body(crossref_body())
        .create_async()
        .await;

    let chain = ResolverChain::from_settings(&settings(&server, &["crossref"], 0)).unwrap();
    let pipeline = AnalysisPipeline::default().with_clock(FixedClock::new("2024-01-01 00:00:00"));
    let report = pipeline
        .analyze_doi(&chain, "doi:10.1000/RCT")
        .await
        .unwrap();

    assert_eq!(report.paper_type, PaperType::ClinicalResearch);
    assert_eq!(report.core_info.get("objective"), Some("To assess drug X."));
    assert_eq!(
        report.metadata().map(|m| m.doi.as_str()),
        Some("10.1000/rct")
    );

    let missing = pipeline.analyze_doi(&chain, "10.1000/other").await;
    assert!(matches!(
        missing,
        Err(AnalysisError::MetadataUnavailable { .. })
    ));
}
