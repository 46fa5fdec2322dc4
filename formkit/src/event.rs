//! Input vocabulary shared by all controls.
//!
//! Hosts translate their native input (terminal events, DOM events, ...) into
//! these types and forward them to a control. Key names follow the web
//! `KeyboardEvent.key` convention so browser hosts can parse them directly.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Key codes understood by the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Character key (`' '` is the space bar)
    Char(char),
    /// Function keys F1-F24
    F(u8),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    /// A key the host could not identify.
    Unidentified,
}

impl Key {
    /// The space bar.
    pub const SPACE: Key = Key::Char(' ');

    /// Enter or Space, the keys that activate a control.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }
}

/// Error returned when a key name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key name")]
    Empty,
    #[error("unknown key name: {0:?}")]
    Unknown(String),
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let key = match s {
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::SPACE,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Tab" => Key::Tab,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Insert" => Key::Insert,
            "Delete" | "Del" => Key::Delete,
            "Unidentified" => Key::Unidentified,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => parse_function_key(s).ok_or_else(|| KeyParseError::Unknown(s.into()))?,
                }
            }
        };

        Ok(key)
    }
}

fn parse_function_key(s: &str) -> Option<Key> {
    let n: u8 = s.strip_prefix('F')?.parse().ok()?;
    (1..=24).contains(&n).then_some(Key::F(n))
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => write!(f, " "),
            Key::Char(c) => write!(f, "{}", c),
            Key::F(n) => write!(f, "F{}", n),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Tab | Key::BackTab => write!(f, "Tab"),
            Key::Up => write!(f, "ArrowUp"),
            Key::Down => write!(f, "ArrowDown"),
            Key::Left => write!(f, "ArrowLeft"),
            Key::Right => write!(f, "ArrowRight"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Insert => write!(f, "Insert"),
            Key::Delete => write!(f, "Delete"),
            Key::Unidentified => write!(f, "Unidentified"),
        }
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }
}

impl From<Key> for KeyCombo {
    fn from(key: Key) -> Self {
        Self::key(key)
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input events a host forwards to a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press while the control has input focus.
    Key(KeyCombo),
    /// Primary activation of the control itself (click on the switch or on
    /// the select trigger).
    Click,
    /// Click on a rendered option row of a select.
    OptionClick(usize),
    /// Pointer moved over a rendered option row of a select.
    OptionHover(usize),
    /// A pointer interaction anywhere in the host surface, in absolute
    /// coordinates. Controls use it to detect interactions outside their
    /// bounds.
    PointerDown { x: u16, y: u16, button: MouseButton },
    /// The control gained input focus.
    Focus,
    /// The control lost input focus.
    Blur,
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was not relevant to the control.
    Ignored,
    /// Event was handled and the host should suppress its default action.
    Consumed,
    /// Event was handled but the host's default action must still run
    /// (e.g. Tab closing a dropdown still moves focus).
    Handled,
}

impl EventResult {
    /// Check if the event was handled (consumed or passed through).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    /// Whether the host should prevent its default action.
    pub fn prevents_default(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Unidentified,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyCombo {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Self::new(event.code.into(), event.modifiers.into())
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_key_names() {
        assert_eq!("Enter".parse::<Key>(), Ok(Key::Enter));
        assert_eq!(" ".parse::<Key>(), Ok(Key::SPACE));
        assert_eq!("ArrowDown".parse::<Key>(), Ok(Key::Down));
        assert_eq!("ArrowUp".parse::<Key>(), Ok(Key::Up));
        assert_eq!("Esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("a".parse::<Key>(), Ok(Key::Char('a')));
        assert_eq!("F12".parse::<Key>(), Ok(Key::F(12)));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert_eq!("".parse::<Key>(), Err(KeyParseError::Empty));
        assert_eq!(
            "Hyper".parse::<Key>(),
            Err(KeyParseError::Unknown("Hyper".into()))
        );
        assert!("F99".parse::<Key>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for key in [Key::Enter, Key::SPACE, Key::Down, Key::Home, Key::F(3)] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_crossterm_key_event() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let combo: KeyCombo = KeyEvent::new(KeyCode::Esc, KeyModifiers::CONTROL).into();
        assert_eq!(combo, KeyCombo::key(Key::Escape).ctrl());
    }
}
