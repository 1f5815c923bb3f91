/// What a global shortcut does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePanel,
    ToggleTheme,
    ShowPrompt,
    ShowControls,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "h" | "H" => Some(KeyAction::TogglePanel),
        "t" | "T" => Some(KeyAction::ToggleTheme),
        "p" | "P" => Some(KeyAction::ShowPrompt),
        "c" | "C" => Some(KeyAction::ShowControls),
        _ => None,
    }
}

/// Shortcuts are ignored while focus is in a text field.
#[inline]
pub fn is_text_entry(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    )
}
