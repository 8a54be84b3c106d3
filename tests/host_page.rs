//! The trunk host page must carry what the browser binary looks up

use brick_breaker::input::{KeyAction, key_action};

const PAGE: &str = include_str!("../index.html");

#[test]
fn page_has_every_element_the_game_binds() {
    for id in [
        "gameCanvas",
        "startMenu",
        "startButton",
        "pauseMenu",
        "resumeButton",
        "playerNameInput",
        "highScoreList",
        "score",
        "lives",
    ] {
        assert!(PAGE.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
    }
}

#[test]
fn key_hint_matches_bindings() {
    assert!(PAGE.contains("Esc pauses"));
    assert_eq!(key_action("Escape"), KeyAction::Pause);
    assert!(PAGE.contains("M mutes"));
    assert_eq!(key_action("m"), KeyAction::Mute);
}
