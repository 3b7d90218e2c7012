//! Page rendering driven through key events.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use quip_engine::{NOT_FOUND_TITLE, ViewBody};
use quip_tui::apply_event;

use crate::common::offline_app;

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[tokio::test]
async fn counter_shows_number_of_activations() {
    for n in [0_u64, 1, 7, 25] {
        let mut app = offline_app("/");
        for _ in 0..n {
            apply_event(&mut app, press(KeyCode::Enter));
        }
        assert_eq!(app.view().body, ViewBody::Counter { count: n });
    }
}

#[tokio::test]
async fn reload_restarts_counter() {
    let mut app = offline_app("/");
    apply_event(&mut app, press(KeyCode::Char('+')));
    apply_event(&mut app, press(KeyCode::Char('+')));
    apply_event(&mut app, press(KeyCode::Char('r')));
    assert_eq!(app.view().body, ViewBody::Counter { count: 0 });
}

#[tokio::test]
async fn post_pages_echo_their_identifier() {
    for id in ["abc123", "1", "hello-world", "%20"] {
        let app = offline_app(&format!("/posts/{id}"));
        let view = app.view();
        assert_eq!(view.title, id);
        assert_eq!(view.heading, Some("/posts"));
        assert_eq!(view.body, ViewBody::Post { id: id.to_string() });
    }
}

#[tokio::test]
async fn post_page_has_no_control() {
    let mut app = offline_app("/posts/abc123");
    assert_eq!(app.activate(), None);
    assert_eq!(app.path(), "/posts/abc123");
}

#[tokio::test]
async fn unmatched_paths_are_not_found() {
    for path in ["/posts", "/posts/a/b", "/joke", "/about"] {
        let app = offline_app(path);
        let view = app.view();
        assert_eq!(view.title, NOT_FOUND_TITLE, "{path}");
        assert!(matches!(view.body, ViewBody::NotFound { .. }), "{path}");
    }
}

#[tokio::test]
async fn home_page_uses_app_title() {
    let app = offline_app("/");
    assert_eq!(app.title(), "quip");
    assert_eq!(app.view().heading, None);
}
