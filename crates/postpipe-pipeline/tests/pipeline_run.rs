//! End-to-end tests for `Pipeline::run` with a mocked upstream API and an
//! in-memory store.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postpipe_fetcher::PostsClient;
use postpipe_pipeline::{Notifier, Pipeline, PipelineRequest};
use postpipe_sentiment::{
    AnalysisResult, Analyzer, KeywordAnalyzer, Sentiment, SentimentError, ANALYSIS_TEXT,
};

/// Records every address it is asked to notify.
#[derive(Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<Option<String>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, address: Option<&str>) -> bool {
        self.calls
            .lock()
            .expect("notifier lock")
            .push(address.map(str::to_owned));
        true
    }
}

/// Fails on any text containing "explode".
struct FlakyAnalyzer;

#[async_trait]
impl Analyzer for FlakyAnalyzer {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult, SentimentError> {
        if text.contains("explode") {
            return Err(SentimentError::Backend("model unavailable".to_string()));
        }
        Ok(postpipe_sentiment::classify(text))
    }
}

struct Harness {
    pipeline: Pipeline,
    notifier: Arc<RecordingNotifier>,
    _server: MockServer,
}

async fn harness_with(
    response: ResponseTemplate,
    timeout: Duration,
    analyzer: Arc<dyn Analyzer>,
) -> Harness {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(response)
        .mount(&server)
        .await;

    let posts = PostsClient::new(&format!("{}/posts", server.uri()), timeout, "postpipe-test/0.1", 3)
        .expect("posts client");
    let pool = postpipe_db::connect_in_memory().await.expect("pool");
    let notifier = Arc::new(RecordingNotifier::default());
    let pipeline = Pipeline::new(posts, analyzer, pool, notifier.clone());

    Harness {
        pipeline,
        notifier,
        _server: server,
    }
}

async fn harness(body: serde_json::Value) -> Harness {
    harness_with(
        ResponseTemplate::new(200).set_body_json(body),
        Duration::from_secs(5),
        Arc::new(KeywordAnalyzer),
    )
    .await
}

fn request(email: Option<&str>) -> PipelineRequest {
    PipelineRequest {
        email: email.map(str::to_owned),
        source: Some(json!("jsonplaceholder")),
    }
}

#[tokio::test]
async fn classifies_and_stores_three_posts() {
    let h = harness(json!([
        { "id": 1, "body": "I love pizza" },
        { "id": 2, "body": "This is bad" },
        { "id": 3, "body": "Neutral text" },
        { "id": 4, "body": "ignored fourth post" }
    ]))
    .await;

    let response = h.pipeline.run(&request(Some("ops@example.com"))).await;

    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    assert!(response.notification_sent);
    let sentiments: Vec<Sentiment> = response.items.iter().map(|i| i.sentiment).collect();
    assert_eq!(
        sentiments,
        [
            Sentiment::Enthusiastic,
            Sentiment::Critical,
            Sentiment::Objective
        ]
    );
    for item in &response.items {
        assert!(item.stored);
        assert_eq!(item.analysis, ANALYSIS_TEXT);
        DateTime::parse_from_rfc3339(&item.timestamp).expect("item timestamp");
    }
    DateTime::parse_from_rfc3339(&response.processed_at).expect("processedAt");

    let rows = postpipe_db::list_results(h.pipeline.pool(), 10)
        .await
        .expect("list");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].original, "I love pizza");
    assert_eq!(rows[2].sentiment, "enthusiastic");
    assert_eq!(rows[2].timestamp, response.items[0].timestamp);

    let calls = h.notifier.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![Some("ops@example.com".to_string())]);
}

#[tokio::test]
async fn upstream_timeout_short_circuits_without_notification() {
    let h = harness_with(
        ResponseTemplate::new(200)
            .set_body_json(json!([{ "body": "late" }]))
            .set_delay(Duration::from_secs(3)),
        Duration::from_secs(1),
        Arc::new(KeywordAnalyzer),
    )
    .await;

    let response = h.pipeline.run(&request(Some("ops@example.com"))).await;

    assert!(response.items.is_empty());
    assert!(!response.notification_sent);
    assert_eq!(response.errors.len(), 1);
    assert!(
        response.errors[0].contains("timed out"),
        "unexpected error: {}",
        response.errors[0]
    );
    assert!(h.notifier.calls.lock().unwrap().is_empty());

    let rows = postpipe_db::list_results(h.pipeline.pool(), 10)
        .await
        .expect("list");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn upstream_error_status_is_a_fetch_error() {
    let h = harness_with(
        ResponseTemplate::new(502),
        Duration::from_secs(5),
        Arc::new(KeywordAnalyzer),
    )
    .await;

    let response = h.pipeline.run(&request(None)).await;

    assert!(response.items.is_empty());
    assert!(!response.notification_sent);
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].contains("502"));
}

#[tokio::test]
async fn missing_body_is_an_item_error_and_notification_still_sent() {
    let h = harness(json!([
        { "id": 1, "body": "I love pizza" },
        { "id": 2, "title": "no body here" },
        { "id": 3, "body": "Neutral text" }
    ]))
    .await;

    let response = h.pipeline.run(&request(Some("ops@example.com"))).await;

    assert_eq!(response.items.len(), 2);
    assert_eq!(response.errors, ["post is missing `body` field"]);
    assert!(response.notification_sent);
    assert_eq!(response.items[0].original, "I love pizza");
    assert_eq!(response.items[1].original, "Neutral text");
}

#[tokio::test]
async fn analyzer_failure_is_an_item_error() {
    let h = harness_with(
        ResponseTemplate::new(200).set_body_json(json!([
            { "body": "this will explode" },
            { "body": "This is bad" }
        ])),
        Duration::from_secs(5),
        Arc::new(FlakyAnalyzer),
    )
    .await;

    let response = h.pipeline.run(&request(None)).await;

    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].sentiment, Sentiment::Critical);
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].contains("model unavailable"));
}

#[tokio::test]
async fn store_failure_records_every_post_and_still_notifies() {
    let h = harness(json!([
        { "body": "I love pizza" },
        { "body": "This is bad" }
    ]))
    .await;
    h.pipeline.pool().close().await;

    let response = h.pipeline.run(&request(Some("ops@example.com"))).await;

    assert!(response.items.is_empty());
    assert_eq!(response.errors.len(), 2);
    assert!(response.notification_sent);
}

#[tokio::test]
async fn notifies_even_without_email() {
    let h = harness(json!([{ "body": "Neutral text" }])).await;

    let response = h.pipeline.run(&PipelineRequest::default()).await;

    assert!(response.notification_sent);
    assert_eq!(h.notifier.calls.lock().unwrap().clone(), vec![None]);
}

#[tokio::test]
async fn empty_upstream_collection_still_notifies() {
    let h = harness(json!([])).await;

    let response = h.pipeline.run(&request(Some("ops@example.com"))).await;

    assert!(response.items.is_empty());
    assert!(response.errors.is_empty());
    assert!(response.notification_sent);
}

#[tokio::test]
async fn items_plus_errors_equals_fetched_posts() {
    let h = harness(json!([
        { "body": "I love pizza" },
        { "body": 12 },
        { "id": 3 }
    ]))
    .await;

    let response = h.pipeline.run(&request(None)).await;

    assert_eq!(response.items.len() + response.errors.len(), 3);
    assert_eq!(response.items.len(), 1);
}

#[tokio::test]
async fn malformed_entries_are_item_errors_not_a_fetch_error() {
    let h = harness(json!([
        { "id": "1a", "body": "I love pizza" },
        "not an object",
        { "id": 3, "title": 99, "body": "Neutral text" }
    ]))
    .await;

    let response = h.pipeline.run(&request(Some("ops@example.com"))).await;

    assert_eq!(response.items.len() + response.errors.len(), 3);
    let sentiments: Vec<Sentiment> = response.items.iter().map(|i| i.sentiment).collect();
    assert_eq!(sentiments, [Sentiment::Enthusiastic, Sentiment::Objective]);
    assert_eq!(response.errors, ["post must be a JSON object, got a string"]);
    assert!(response.notification_sent);
    assert_eq!(h.notifier.calls.lock().expect("notifier lock").len(), 1);
}
