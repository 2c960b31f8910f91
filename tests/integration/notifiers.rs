//! Integration tests for notification channels

use serde_json::json;
use std::collections::BTreeMap;
use trendwatch::config::{ChannelConfig, NotificationConfig, WebhookEndpoint};
use trendwatch::error::NotifyError;
use trendwatch::notifiers::{NotificationManager, NotificationSender, SlackSender, WebhookSender};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::recording::{FailingSender, RecordingSender};

fn endpoint(server: &MockServer, name: &str, route: &str) -> WebhookEndpoint {
    WebhookEndpoint {
        name: name.to_string(),
        url: format!("{}{}", server.uri(), route),
    }
}

#[tokio::test]
async fn webhook_posts_text_payload_to_every_endpoint() {
    let server = MockServer::start().await;
    for route in ["/hook/a", "/hook/b"] {
        Mock::given(method("POST"))
            .and(path(route))
            .and(body_json(json!({
                "msg_type": "text",
                "content": { "text": "=== 2024-03-08 ===" }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let sender = WebhookSender::new(
        "feishu",
        reqwest::Client::new(),
        vec![
            endpoint(&server, "a", "/hook/a"),
            endpoint(&server, "b", "/hook/b"),
        ],
    );
    sender.send("=== 2024-03-08 ===").await.unwrap();
}

#[tokio::test]
async fn webhook_error_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;

    let sender = WebhookSender::new(
        "feishu",
        reqwest::Client::new(),
        vec![endpoint(&server, "main", "/hook")],
    );
    match sender.send("hello").await {
        Err(NotifyError::Rejected { channel, reason }) => {
            assert_eq!(channel, "feishu/main");
            assert!(reason.contains("500"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn slack_posts_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat.postMessage"))
        .and(header("authorization", "Bearer xoxb-test"))
        .and(body_json(json!({ "channel": "#alerts", "text": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let sender = SlackSender::new("slack", reqwest::Client::new(), "xoxb-test", "#alerts")
        .with_base_url(server.uri());
    sender.send("hello").await.unwrap();
}

#[tokio::test]
async fn slack_not_ok_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat.postMessage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": false, "error": "channel_not_found" })),
        )
        .mount(&server)
        .await;

    let sender = SlackSender::new("slack", reqwest::Client::new(), "xoxb-test", "#missing")
        .with_base_url(server.uri());
    match sender.send("hello").await {
        Err(NotifyError::Rejected { reason, .. }) => assert_eq!(reason, "channel_not_found"),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn manager_keeps_delivering_after_a_channel_fails() {
    let recording = RecordingSender::new();
    let manager = NotificationManager::from_senders(vec![
        Box::new(FailingSender),
        Box::new(recording.clone()),
    ]);

    match manager.notify("alert").await {
        Err(NotifyError::Partial { failed, attempted }) => {
            assert_eq!((failed, attempted), (1, 2));
        }
        other => panic!("expected partial failure, got {:?}", other),
    }
    assert_eq!(recording.messages(), vec!["alert".to_string()]);
}

#[tokio::test]
async fn manager_skips_disabled_channels() {
    let mut channels = BTreeMap::new();
    channels.insert("console".to_string(), ChannelConfig::Console { enabled: true });
    channels.insert(
        "team".to_string(),
        ChannelConfig::Slack {
            enabled: false,
            token: "xoxb-test".to_string(),
            default_channel: "#alerts".to_string(),
        },
    );
    let config = NotificationConfig {
        enabled: true,
        channels,
    };

    let manager = NotificationManager::from_config(&config, reqwest::Client::new());
    assert_eq!(manager.channel_count(), 1);
    assert_eq!(manager.notify("to console").await.unwrap(), 1);
}

#[tokio::test]
async fn disabled_manager_drops_messages() {
    let config = NotificationConfig {
        enabled: false,
        ..NotificationConfig::default()
    };
    let manager = NotificationManager::from_config(&config, reqwest::Client::new());
    assert_eq!(manager.notify("ignored").await.unwrap(), 0);
    assert_eq!(NotificationManager::disabled().notify("ignored").await.unwrap(), 0);
}
