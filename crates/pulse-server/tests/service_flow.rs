use pulse_core::Strategy;
use pulse_core::conversation::{ChatTurn, MessageRole};
use pulse_providers::mock::{ScriptedLanguageModel, StaticReportProvider};
use pulse_server::{AnalysisRequest, Error, PulseService, SessionKey};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

const URL: &str = "https://example.com";

fn fixture_report() -> Value {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join("lighthouse-report.json");

    serde_json::from_str(&std::fs::read_to_string(fixture_path).unwrap()).unwrap()
}

fn request(url: &str) -> AnalysisRequest {
    AnalysisRequest {
        url: url.to_string(),
        strategy: Strategy::Desktop,
    }
}

fn service_with(model: ScriptedLanguageModel) -> (PulseService, StaticReportProvider) {
    let provider = StaticReportProvider::new()
        .with_report(URL, fixture_report())
        .with_report("https://other.example", json!({"lighthouseResult": {"categories": {"performance": {"score": 0.42}}, "audits": {}}}));
    let service = PulseService::new(Arc::new(provider.clone()), Arc::new(model));
    (service, provider)
}

#[tokio::test]
async fn test_analyze_returns_score_metrics_and_suggestion() {
    let model = ScriptedLanguageModel::new("```markdown\nHello!\n```", Vec::new());
    let (service, provider) = service_with(model.clone());
    let key = SessionKey::default();

    let response = service.analyze(&key, &request(URL)).await.unwrap();

    assert_eq!(response.performance_score, 87);
    assert_eq!(response.metrics.len(), 6);
    assert_eq!(response.metrics[0].title, "First Contentful Paint");
    assert_eq!(response.metrics[0].value, "1.2 s");
    assert_eq!(response.initial_suggestion, "```markdown\nHello!\n```");

    assert_eq!(provider.requests().await, vec![(URL.to_string(), Strategy::Desktop)]);

    // The initial suggestion is a single-shot prompt over the digest
    let prompts = model.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].history.is_empty());
    assert!(prompts[0].system.contains("Performance Summary Report for URL: https://example.com"));

    let digest = service.sessions().current_digest(&key).await.unwrap();
    assert!(digest.contains("Overall Score: 87/100"));
}

#[tokio::test]
async fn test_chat_before_analysis_never_reaches_model() {
    let model = ScriptedLanguageModel::new("", vec!["x".to_string()]);
    let (service, _) = service_with(model.clone());

    let result = service.chat(&SessionKey::default(), &[ChatTurn::user("hi")]).await;

    assert!(matches!(result, Err(Error::Core(pulse_core::Error::NoAnalysis))));
    assert_eq!(model.call_count().await, 0);
}

#[tokio::test]
async fn test_chat_streams_chunks_with_history_split() {
    let model = ScriptedLanguageModel::new("overview", vec!["Reduce ".to_string(), "JS.".to_string()]);
    let (service, _) = service_with(model.clone());
    let key = SessionKey::default();

    service.analyze(&key, &request(URL)).await.unwrap();

    let turns = vec![
        ChatTurn::user("hi"),
        ChatTurn::assistant("Hello! How can I help?"),
        ChatTurn::user("How do I fix LCP?"),
    ];
    let stream = service.chat(&key, &turns).await.unwrap();
    assert_eq!(stream.collect_text().await.unwrap(), "Reduce JS.");

    let prompts = model.prompts().await;
    let chat_prompt = &prompts[1];
    assert_eq!(chat_prompt.query, "How do I fix LCP?");
    assert_eq!(chat_prompt.history.len(), 2);
    assert_eq!(chat_prompt.history[1].role, MessageRole::Assistant);
}

#[tokio::test]
async fn test_empty_conversation_is_rejected() {
    let model = ScriptedLanguageModel::new("overview", Vec::new());
    let (service, _) = service_with(model.clone());
    let key = SessionKey::default();

    service.analyze(&key, &request(URL)).await.unwrap();
    let result = service.chat(&key, &[]).await;

    assert!(matches!(result, Err(Error::Core(pulse_core::Error::EmptyConversation))));
    assert_eq!(model.call_count().await, 1);
}

#[tokio::test]
async fn test_failed_analysis_keeps_previous_session() {
    let model = ScriptedLanguageModel::new("overview", Vec::new());
    let (service, _) = service_with(model);
    let key = SessionKey::default();

    service.analyze(&key, &request(URL)).await.unwrap();

    let result = service.analyze(&key, &request("https://unknown.example")).await;
    assert!(matches!(result, Err(Error::Provider(pulse_providers::Error::Upstream { .. }))));

    let snapshot = service.sessions().current_report(&key).await.unwrap();
    assert_eq!(snapshot.url, URL);
}

#[tokio::test]
async fn test_model_failure_does_not_record_analysis() {
    let (service, _) = service_with(ScriptedLanguageModel::failing());
    let key = SessionKey::default();

    let result = service.analyze(&key, &request(URL)).await;

    assert!(matches!(result, Err(Error::Provider(pulse_providers::Error::Request { .. }))));
    assert!(service.sessions().current_digest(&key).await.is_none());
}

#[tokio::test]
async fn test_latest_analysis_wins() {
    let model = ScriptedLanguageModel::new("overview", vec!["ok".to_string()]);
    let (service, _) = service_with(model.clone());
    let key = SessionKey::default();

    service.analyze(&key, &request(URL)).await.unwrap();
    let response = service.analyze(&key, &request("https://other.example")).await.unwrap();
    assert_eq!(response.performance_score, 42);

    let stream = service.chat(&key, &[ChatTurn::user("What changed?")]).await.unwrap();
    assert_eq!(stream.collect_text().await.unwrap(), "ok");

    // Chat is grounded on the second digest only
    let prompts = model.prompts().await;
    let system = &prompts.last().unwrap().system;
    assert!(system.contains("Performance Summary Report for URL: https://other.example ---"));
    assert!(system.contains("Overall Score: 42/100"));
    assert!(!system.contains("URL: https://example.com ---"));
    assert!(!system.contains("Overall Score: 87/100"));

    let download = service.download(&key).await.unwrap();
    assert!(!download.body.contains("bootup-time"));
}

#[tokio::test]
async fn test_download_round_trips_report() {
    let (service, _) = service_with(ScriptedLanguageModel::new("overview", Vec::new()));
    let key = SessionKey::new("tab-1");

    assert!(matches!(service.download(&key).await, Err(Error::NoReport)));

    service.analyze(&key, &request(URL)).await.unwrap();
    let download = service.download(&key).await.unwrap();

    assert_eq!(download.filename, "lighthouse_report.json");
    let parsed: Value = serde_json::from_str(&download.body).unwrap();
    assert_eq!(parsed, fixture_report());
}
