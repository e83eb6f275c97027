use async_trait::async_trait;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pulse_core::conversation::Prompt;
use pulse_providers::mock::{ScriptedLanguageModel, StaticReportProvider};
use pulse_providers::{ChunkStream, LanguageModel};
use pulse_server::{PulseService, SESSION_HEADER, router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const URL: &str = "https://example.com";

fn test_service() -> PulseService {
    let report = json!({
        "lighthouseResult": {
            "categories": {"performance": {"score": 0.29}},
            "audits": {
                "first-contentful-paint": {"title": "First Contentful Paint", "displayValue": "4.1 s"}
            }
        }
    });
    let provider = StaticReportProvider::new().with_report(URL, report);
    let model = ScriptedLanguageModel::new(
        "Hi there",
        vec!["```markdown\r\n# Title".to_string(), "\n```".to_string()],
    );
    PulseService::new(Arc::new(provider), Arc::new(model))
}

fn sample_report() -> Value {
    json!({"lighthouseResult": {"categories": {"performance": {"score": 0.5}}, "audits": {}}})
}

/// Streams one chunk, then breaks the way a dropped upstream connection does
struct BrokenStreamModel;

#[async_trait]
impl LanguageModel for BrokenStreamModel {
    async fn complete(&self, _prompt: &Prompt) -> pulse_providers::Result<String> {
        Ok("overview".to_string())
    }

    async fn stream(&self, _prompt: &Prompt) -> pulse_providers::Result<ChunkStream> {
        let (sender, stream) = ChunkStream::channel();
        tokio::spawn(async move {
            sender.send("partial answer".to_string()).await;
            sender
                .fail(pulse_providers::Error::Timeout { provider: "Groq" })
                .await;
        });
        Ok(stream)
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_root_welcome() {
    let app = router(test_service());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["message"], "Welcome to the Pulse performance API");
}

#[tokio::test]
async fn test_analyze_endpoint() {
    let app = router(test_service());

    let response = app
        .oneshot(json_request("POST", "/api/analyze", json!({"url": URL, "strategy": "mobile"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["performance_score"], 29);
    assert_eq!(body["metrics"].as_array().unwrap().len(), 6);
    assert_eq!(body["metrics"][1]["value"], "N/A");
    assert_eq!(body["initial_suggestion"], "Hi there");
}

#[tokio::test]
async fn test_analyze_unknown_site_is_client_error() {
    let app = router(test_service());

    let response = app
        .oneshot(json_request("POST", "/api/analyze", json!({"url": "https://nope.example"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(body["detail"].as_str().unwrap().contains("nope.example"));
}

#[tokio::test]
async fn test_chat_requires_analysis() {
    let app = router(test_service());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/chat",
            json!({"history": [{"role": "user", "content": "hi"}]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["detail"], "Please analyze a website first before starting a chat.");
}

#[tokio::test]
async fn test_chat_streams_raw_fragments() {
    let app = router(test_service());

    let analyzed = app
        .clone()
        .oneshot(json_request("POST", "/api/analyze", json!({"url": URL})))
        .await
        .unwrap();
    assert_eq!(analyzed.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/chat",
            json!({"history": [{"role": "user", "content": "How do I fix FCP?"}]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/event-stream"
    );

    // Fragments arrive untouched, with no framing added
    assert_eq!(body_text(response).await, "```markdown\r\n# Title\n```");
}

#[tokio::test]
async fn test_chat_stream_failure_ends_body() {
    let provider = StaticReportProvider::new().with_report(URL, sample_report());
    let app = router(PulseService::new(Arc::new(provider), Arc::new(BrokenStreamModel)));

    app.clone()
        .oneshot(json_request("POST", "/api/analyze", json!({"url": URL})))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/chat",
            json!({"history": [{"role": "user", "content": "Why so slow?"}]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "partial answer");
}

#[tokio::test]
async fn test_download_report() {
    let app = router(test_service());

    let missing = app
        .clone()
        .oneshot(Request::builder().uri("/api/download-report").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    app.clone()
        .oneshot(json_request("POST", "/api/analyze", json!({"url": URL})))
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/api/download-report").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=lighthouse_report.json"
    );
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["lighthouseResult"]["categories"]["performance"]["score"], 0.29);
}

#[tokio::test]
async fn test_sessions_are_selected_by_header() {
    let app = router(test_service());

    let analyzed = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .header(SESSION_HEADER, "tab-a")
                .body(Body::from(json!({"url": URL}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(analyzed.status(), StatusCode::OK);

    let other_session = app
        .clone()
        .oneshot(Request::builder().uri("/api/download-report").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(other_session.status(), StatusCode::BAD_REQUEST);

    let same_session = app
        .oneshot(
            Request::builder()
                .uri("/api/download-report")
                .header(SESSION_HEADER, "tab-a")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(same_session.status(), StatusCode::OK);
}
