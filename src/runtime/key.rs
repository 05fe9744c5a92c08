use bitflags::bitflags;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0001;
        const CONTROL = 0b0010;
        const ALT = 0b0100;
        const META = 0b1000;
    }
}

impl KeyModifiers {
    pub const NONE: Self = Self::empty();
}

/// Keys the widgets react to, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Unidentified,
}

impl KeyCode {
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Esc,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" | "Del" => Self::Delete,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Spacebar" => Self::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::Char(ch),
                    _ => Self::Unidentified,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn alt_key(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Any of ctrl, alt, meta or shift held.
    pub fn has_modifier(&self) -> bool {
        !self.modifiers.is_empty()
    }

    /// Produces a character in a text field: a non-control char with at most
    /// shift held.
    pub fn is_printable(&self) -> bool {
        match self.code {
            KeyCode::Char(ch) => {
                !ch.is_control()
                    && !self
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::META)
            }
            _ => false,
        }
    }
}

/// Platform capabilities, computed once by the embedder and passed in props.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Platform {
    pub mac: bool,
}

impl Platform {
    pub fn detect() -> Self {
        Self {
            mac: cfg!(any(target_os = "macos", target_os = "ios")),
        }
    }

    pub fn from_user_agent(user_agent: &str) -> Self {
        Self {
            mac: ["Macintosh", "Mac OS X", "iPhone", "iPad"]
                .iter()
                .any(|needle| user_agent.contains(needle)),
        }
    }

    pub fn mac() -> Self {
        Self { mac: true }
    }
}

/// Normalizes a key event for the platform.
///
/// Mac text fields honour Emacs-style chords natively, so Ctrl+H is treated
/// as Backspace and Ctrl+D / Ctrl+K as Delete rather than as shortcuts.
pub fn get_key(event: KeyEvent, platform: Platform) -> KeyEvent {
    if !platform.mac || event.modifiers != KeyModifiers::CONTROL {
        return event;
    }
    match event.code {
        KeyCode::Char('h') => KeyEvent::key(KeyCode::Backspace),
        KeyCode::Char('d') | KeyCode::Char('k') => KeyEvent::key(KeyCode::Delete),
        _ => event,
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyCode, KeyEvent, KeyModifiers, Platform, get_key};

    #[test]
    fn dom_keys_translate() {
        assert_eq!(KeyCode::from_dom_key("ArrowDown"), KeyCode::Down);
        assert_eq!(KeyCode::from_dom_key("Escape"), KeyCode::Esc);
        assert_eq!(KeyCode::from_dom_key("é"), KeyCode::Char('é'));
        assert_eq!(KeyCode::from_dom_key("F5"), KeyCode::Unidentified);
    }

    #[test]
    fn mac_remaps_emacs_chords() {
        let mac = Platform::mac();
        assert_eq!(
            get_key(KeyEvent::ctrl(KeyCode::Char('h')), mac),
            KeyEvent::key(KeyCode::Backspace)
        );
        assert_eq!(
            get_key(KeyEvent::ctrl(KeyCode::Char('k')), mac),
            KeyEvent::key(KeyCode::Delete)
        );
        assert_eq!(
            get_key(KeyEvent::ctrl(KeyCode::Char('d')), mac),
            KeyEvent::key(KeyCode::Delete)
        );
    }

    #[test]
    fn other_platforms_keep_chords() {
        let event = KeyEvent::ctrl(KeyCode::Char('h'));
        assert_eq!(get_key(event, Platform::default()), event);
        let shifted = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(get_key(shifted, Platform::mac()), shifted);
    }

    #[test]
    fn printable_allows_shift_only() {
        assert!(KeyEvent::key(KeyCode::Char('a')).is_printable());
        assert!(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT).is_printable());
        assert!(!KeyEvent::ctrl(KeyCode::Char('a')).is_printable());
        assert!(!KeyEvent::key(KeyCode::Enter).is_printable());
    }

    #[test]
    fn user_agent_detection() {
        assert!(Platform::from_user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)").mac);
        assert!(!Platform::from_user_agent("Mozilla/5.0 (Windows NT 10.0)").mac);
    }
}
