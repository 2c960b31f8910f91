//! Integration tests for the OpenAI-compatible explainer

use serde_json::json;
use trendwatch::agents::{build_explainer, suggested_document, Explainer, LlmExplainer};
use trendwatch::config::LlmConfig;
use trendwatch::error::ExplainError;
use trendwatch::models::strategy::StrategyConfig;
use trendwatch::services::market_data::StaticMarketDataProvider;
use trendwatch::signals::SignalEngine;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{bars_from_closes, default_strategy, strategy_yaml, wavy_closes};

fn llm_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        enabled: true,
        base_url: format!("{}/v1", server.uri()),
        api_key: Some("test-key".to_string()),
        model: "test-model".to_string(),
        timeout_secs: 5,
    }
}

fn sample_result() -> trendwatch::models::signal::SignalResult {
    let engine = SignalEngine::new(
        default_strategy(),
        std::sync::Arc::new(StaticMarketDataProvider::new()),
    );
    engine
        .evaluate_series("sz000001", &bars_from_closes(&wavy_closes(80)))
        .unwrap()
}

#[tokio::test]
async fn stock_explanation_posts_chat_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "test-model" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Uptrend intact." } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let explainer = LlmExplainer::from_config(&llm_config(&server)).unwrap();
    let text = explainer.explain_stock(&sample_result()).await.unwrap();
    assert_eq!(text, "Uptrend intact.");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("sz000001"), "prompt should embed the result");
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let explainer = LlmExplainer::from_config(&llm_config(&server)).unwrap();
    let err = explainer
        .explain_strategy(&default_strategy())
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::Status { status: 429, .. }));
}

#[tokio::test]
async fn blank_completion_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "   " } }]
        })))
        .mount(&server)
        .await;

    let explainer = LlmExplainer::from_config(&llm_config(&server)).unwrap();
    let err = explainer.explain_indices(&[]).await.unwrap_err();
    assert!(matches!(err, ExplainError::EmptyResponse));
}

#[tokio::test]
async fn disabled_config_builds_declining_explainer() {
    let explainer = build_explainer(&LlmConfig::default()).unwrap();
    let err = explainer.explain_stock(&sample_result()).await.unwrap_err();
    assert!(matches!(err, ExplainError::Disabled));
}

#[tokio::test]
async fn strategy_edit_returns_unfenced_document() {
    let server = MockServer::start().await;
    let revised = strategy_yaml(10, 30, 10);
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": format!("```yaml\n{}```", revised) } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let explainer = LlmExplainer::from_config(&llm_config(&server)).unwrap();
    let suggestion = explainer
        .edit_strategy(&default_strategy(), "short swings of a few days")
        .await
        .unwrap();
    let config = StrategyConfig::from_yaml(&suggestion).unwrap();
    assert_eq!(config.trend.moving_averages.short, 10);
    assert_eq!(config.trend.moving_averages.long, 30);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("short swings of a few days"));
    assert!(body.contains("resistance_window"));
}

#[tokio::test]
async fn disabled_explainer_declines_strategy_edit() {
    let explainer = build_explainer(&LlmConfig::default()).unwrap();
    let err = explainer
        .edit_strategy(&default_strategy(), "more aggressive")
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::Disabled));
}

#[test]
fn fence_is_stripped_from_suggestion() {
    assert_eq!(suggested_document("```yaml\na: 1\n```"), "a: 1");
    assert_eq!(suggested_document("```\na: 1\n```\n"), "a: 1");
    assert_eq!(suggested_document("  a: 1\n"), "a: 1");
}
