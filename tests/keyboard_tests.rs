// Host-side tests for global keyboard shortcuts.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keys {
    include!("../src/keys.rs");
}

use keys::*;

#[test]
fn shortcuts_ignore_case() {
    assert_eq!(key_action("h"), Some(KeyAction::TogglePanel));
    assert_eq!(key_action("H"), Some(KeyAction::TogglePanel));
    assert_eq!(key_action("t"), Some(KeyAction::ToggleTheme));
    assert_eq!(key_action("P"), Some(KeyAction::ShowPrompt));
    assert_eq!(key_action("c"), Some(KeyAction::ShowControls));
}

#[test]
fn other_keys_do_nothing() {
    for key in ["a", "Enter", "Escape", " ", "", "hh"] {
        assert_eq!(key_action(key), None, "{:?}", key);
    }
}

#[test]
fn text_fields_swallow_shortcuts() {
    assert!(is_text_entry("INPUT"));
    assert!(is_text_entry("input"));
    assert!(is_text_entry("TEXTAREA"));
    assert!(is_text_entry("select"));
    assert!(!is_text_entry("BUTTON"));
    assert!(!is_text_entry("CANVAS"));
}
