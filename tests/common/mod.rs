//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quip_engine::{App, QuipConfig};

/// Endpoint nothing listens on; pages that never fetch don't care.
pub const OFFLINE_ENDPOINT: &str = "http://127.0.0.1:9/";

pub fn config_for(endpoint: &str) -> QuipConfig {
    config_with(endpoint, "")
}

/// Config pointing the joke fetcher at `endpoint`, plus extra `[jokes]` lines.
pub fn config_with(endpoint: &str, jokes_extra: &str) -> QuipConfig {
    QuipConfig::parse(&format!(
        "[jokes]\nendpoint = \"{endpoint}\"\n{jokes_extra}\n"
    ))
    .expect("test config parses")
}

pub fn offline_app(path: &str) -> App {
    App::new(&config_for(OFFLINE_ENDPOINT), Some(path))
}

/// Mount a successful joke response, as served by icanhazdadjoke.
pub async fn mount_joke(server: &MockServer, joke: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "R7UfaahVfFd",
            "joke": joke,
            "status": 200
        })))
        .mount(server)
        .await;
}

/// Mount a bare status response for every request.
pub async fn mount_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Tick the app until the current page stops loading.
pub async fn settle(app: &mut App) {
    for _ in 0..300 {
        app.tick();
        if !app.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("page at {} never finished loading", app.path());
}
