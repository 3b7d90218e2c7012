//! Jokes page against a mock endpoint.

use std::time::Duration;

use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quip_engine::{App, JOKES_TITLE, ViewBody};

use crate::common::{config_for, config_with, mount_joke, settle};

fn joke_text(app: &App) -> Option<(String, bool)> {
    match app.view().body {
        ViewBody::Joke { text, cached, .. } => Some((text, cached)),
        _ => None,
    }
}

#[tokio::test]
async fn renders_joke_field() {
    let server = MockServer::start().await;
    mount_joke(&server, "What do you call a fake noodle? An impasta.").await;

    let mut app = App::new(&config_for(&server.uri()), Some("/jokes"));
    assert!(app.is_loading());
    assert_eq!(app.title(), JOKES_TITLE);

    settle(&mut app).await;
    assert_eq!(
        joke_text(&app),
        Some(("What do you call a fake noodle? An impasta.".to_string(), false))
    );
}

#[tokio::test]
async fn two_renders_inside_window_issue_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"joke": "once"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new(&config_for(&server.uri()), Some("/jokes"));
    settle(&mut app).await;
    app.reload();
    settle(&mut app).await;

    assert_eq!(joke_text(&app), Some(("once".to_string(), true)));
}

#[tokio::test]
async fn no_store_fetches_every_render() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"joke": "fresh"})))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_with(&server.uri(), "no_store = true");
    let mut app = App::new(&config, Some("/jokes"));
    settle(&mut app).await;
    app.reload();
    settle(&mut app).await;

    match app.view().body {
        ViewBody::Joke {
            cached, fresh_for, ..
        } => {
            assert!(!cached);
            assert_eq!(fresh_for, None);
        }
        other => panic!("expected joke, got {other:?}"),
    }
}

#[tokio::test]
async fn zero_window_disables_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"joke": "z"})))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_with(&server.uri(), "revalidate_seconds = 0");
    let mut app = App::new(&config, Some("/jokes"));
    settle(&mut app).await;
    app.reload();
    settle(&mut app).await;
}

#[tokio::test]
async fn expired_window_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"joke": "tick"})))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_with(&server.uri(), "revalidate_seconds = 1");
    let mut app = App::new(&config, Some("/jokes"));
    settle(&mut app).await;

    tokio::time::sleep(Duration::from_millis(1100)).await;
    app.reload();
    settle(&mut app).await;

    assert_eq!(joke_text(&app), Some(("tick".to_string(), false)));
}

#[tokio::test]
async fn configured_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "quip-tests/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"joke": "ua"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_with(&server.uri(), "user_agent = \"quip-tests/0.1\"");
    let mut app = App::new(&config, Some("/jokes"));
    settle(&mut app).await;

    assert_eq!(joke_text(&app), Some(("ua".to_string(), false)));
}
