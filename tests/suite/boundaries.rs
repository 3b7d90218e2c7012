//! Failure boundaries around pages.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use quip_engine::{App, Control, FailureKind, Section, ViewBody};
use quip_jokes::ErrorCode;
use quip_tui::apply_event;

use crate::common::{config_for, config_with, mount_joke, mount_status, settle};

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[tokio::test]
async fn failing_page_shows_fallback() {
    let server = MockServer::start().await;
    mount_status(&server, 500).await;

    let mut app = App::new(&config_for(&server.uri()), Some("/jokes"));
    settle(&mut app).await;

    let view = app.view();
    assert_eq!(view.body, ViewBody::Failed);
    assert_eq!(view.body.control(), Some(Control::TryAgain));
    assert_eq!(view.heading, None);
}

#[tokio::test]
async fn try_again_key_recovers_once_endpoint_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_joke(&server, "Back in business.").await;

    let mut app = App::new(&config_for(&server.uri()), Some("/jokes"));
    settle(&mut app).await;
    assert_eq!(app.view().body, ViewBody::Failed);

    apply_event(&mut app, press(KeyCode::Enter));
    settle(&mut app).await;

    assert!(matches!(
        app.view().body,
        ViewBody::Joke { ref text, cached: false, .. } if text == "Back in business."
    ));
    assert!(!app.boundary(Section::Root).is_failed());
}

#[tokio::test]
async fn malformed_body_is_not_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"setup": "no joke"})))
        .mount(&server)
        .await;

    let mut app = App::new(&config_for(&server.uri()), Some("/jokes"));
    settle(&mut app).await;

    let failure = app.boundary(Section::Root).failure().cloned().unwrap();
    assert_eq!(failure.kind, FailureKind::Fetch(ErrorCode::MalformedResponse));
    assert!(!failure.retryable);
}

#[tokio::test]
async fn timeout_is_caught() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"joke": "late"}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = config_with(&server.uri(), "timeout_seconds = 1");
    let mut app = App::new(&config, Some("/jokes"));
    settle(&mut app).await;

    let failure = app.boundary(Section::Root).failure().cloned().unwrap();
    assert_eq!(failure.kind, FailureKind::Fetch(ErrorCode::Timeout));
    assert!(failure.retryable);
}

#[tokio::test]
async fn leaving_failed_page_resets_boundaries() {
    let server = MockServer::start().await;
    mount_status(&server, 404).await;

    let mut app = App::new(&config_for(&server.uri()), Some("/jokes"));
    settle(&mut app).await;
    assert!(app.boundary(Section::Root).is_failed());

    apply_event(&mut app, press(KeyCode::Char('h')));
    assert!(!app.boundary(Section::Root).is_failed());
    assert_eq!(app.view().body, ViewBody::Counter { count: 0 });

    // Failures stay counted after the reset.
    assert_eq!(app.boundary(Section::Root).caught(), 1);
}

#[tokio::test]
async fn failed_fetch_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_joke(&server, "recovered").await;

    let mut app = App::new(&config_for(&server.uri()), Some("/jokes"));
    settle(&mut app).await;
    app.navigate("/");
    app.navigate("/jokes");
    settle(&mut app).await;

    assert!(matches!(app.view().body, ViewBody::Joke { cached: false, .. }));
}

#[tokio::test]
async fn posts_boundary_is_independent_of_root() {
    let app = App::new(&config_for(crate::common::OFFLINE_ENDPOINT), Some("/posts/a"));
    assert_eq!(app.boundary(Section::Posts).section(), Section::Posts);
    assert!(!app.boundary(Section::Posts).is_failed());
    assert!(!app.boundary(Section::Root).is_failed());
}
