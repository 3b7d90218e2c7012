//! Routing, history, and the address prompt.

use std::io::Write;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use quip_engine::{App, InputMode, QuipConfig};
use quip_tui::apply_event;

use crate::common::{OFFLINE_ENDPOINT, offline_app};

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        apply_event(app, press(KeyCode::Char(c)));
    }
}

#[tokio::test]
async fn address_prompt_replaces_path() {
    let mut app = offline_app("/posts/first");
    apply_event(&mut app, press(KeyCode::Char('g')));
    assert_eq!(app.address_text(), Some("/posts/first"));

    for _ in 0.."first".len() {
        apply_event(&mut app, press(KeyCode::Backspace));
    }
    type_text(&mut app, "second");
    apply_event(&mut app, press(KeyCode::Enter));

    assert_eq!(app.input_mode(), InputMode::Normal);
    assert_eq!(app.path(), "/posts/second");
    assert_eq!(app.title(), "second");
}

#[tokio::test]
async fn cancelled_prompt_does_not_navigate() {
    let mut app = offline_app("/");
    apply_event(&mut app, press(KeyCode::Char('g')));
    type_text(&mut app, "posts/x");
    apply_event(&mut app, press(KeyCode::Esc));

    assert_eq!(app.path(), "/");
    assert!(!app.should_quit());
}

#[tokio::test]
async fn home_key_and_back() {
    let mut app = offline_app("/posts/a");
    apply_event(&mut app, press(KeyCode::Char('h')));
    assert_eq!(app.path(), "/");

    apply_event(&mut app, press(KeyCode::Backspace));
    assert_eq!(app.path(), "/posts/a");

    apply_event(&mut app, press(KeyCode::Backspace));
    assert_eq!(app.path(), "/posts/a");
    assert_eq!(app.status_message(), Some("No previous page"));
}

#[tokio::test]
async fn navigation_clears_status() {
    let mut app = offline_app("/");
    assert!(!app.back());
    assert!(app.status_message().is_some());
    app.navigate("/posts/z");
    assert_eq!(app.status_message(), None);
}

#[tokio::test]
async fn paths_are_normalized() {
    let mut app = offline_app("/");
    app.navigate("posts//abc123/?ref=home#top");
    assert_eq!(app.path(), "/posts/abc123");
}

#[tokio::test]
async fn config_file_sets_title_and_start_route() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[app]\ntitle = \"Demo\"\nstart_route = \"/posts/from-config\"\nhigh_contrast = true\n\n[jokes]\nendpoint = \"{OFFLINE_ENDPOINT}\""
    )
    .unwrap();

    let config = QuipConfig::load_from(file.path()).unwrap();
    let app = App::new(&config, None);

    assert_eq!(app.app_title(), "Demo");
    assert_eq!(app.path(), "/posts/from-config");
    assert!(app.ui_options().high_contrast);

    let home = App::new(&config, Some("/"));
    assert_eq!(home.title(), "Demo");
}
