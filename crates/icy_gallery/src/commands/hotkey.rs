//! Hotkey parsing and representation
//!
//! Parses strings like "Shift+Right" into structured key bindings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub cmd: bool, // macOS Command key
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        cmd: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        cmd: false,
    };

    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        cmd: false,
    };

    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.cmd
    }

    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Keys the viewer can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    F1,
    F5,
    F11,

    Escape,
    Space,
    Enter,
    Backspace,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Plus,
    Minus,
    Equals,
}

const LETTERS: [KeyCode; 26] = [
    KeyCode::A,
    KeyCode::B,
    KeyCode::C,
    KeyCode::D,
    KeyCode::E,
    KeyCode::F,
    KeyCode::G,
    KeyCode::H,
    KeyCode::I,
    KeyCode::J,
    KeyCode::K,
    KeyCode::L,
    KeyCode::M,
    KeyCode::N,
    KeyCode::O,
    KeyCode::P,
    KeyCode::Q,
    KeyCode::R,
    KeyCode::S,
    KeyCode::T,
    KeyCode::U,
    KeyCode::V,
    KeyCode::W,
    KeyCode::X,
    KeyCode::Y,
    KeyCode::Z,
];

const DIGITS: [KeyCode; 10] = [
    KeyCode::Num0,
    KeyCode::Num1,
    KeyCode::Num2,
    KeyCode::Num3,
    KeyCode::Num4,
    KeyCode::Num5,
    KeyCode::Num6,
    KeyCode::Num7,
    KeyCode::Num8,
    KeyCode::Num9,
];

impl KeyCode {
    /// Parse a key name like "Left", "esc", "I" or "+"
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();

        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c.to_ascii_uppercase() {
                c @ 'A'..='Z' => Some(LETTERS[(c as u8 - b'A') as usize]),
                c @ '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
                '+' => Some(Self::Plus),
                '-' => Some(Self::Minus),
                '=' => Some(Self::Equals),
                ' ' => Some(Self::Space),
                _ => None,
            };
        }

        match s.to_lowercase().as_str() {
            "escape" | "esc" => Some(Self::Escape),
            "space" => Some(Self::Space),
            "enter" | "return" => Some(Self::Enter),
            "backspace" => Some(Self::Backspace),
            "home" => Some(Self::Home),
            "end" => Some(Self::End),
            "pageup" | "pgup" => Some(Self::PageUp),
            "pagedown" | "pgdn" => Some(Self::PageDown),
            "arrowup" | "up" => Some(Self::ArrowUp),
            "arrowdown" | "down" => Some(Self::ArrowDown),
            "arrowleft" | "left" => Some(Self::ArrowLeft),
            "arrowright" | "right" => Some(Self::ArrowRight),
            "plus" => Some(Self::Plus),
            "minus" => Some(Self::Minus),
            "equals" => Some(Self::Equals),
            "f1" => Some(Self::F1),
            "f5" => Some(Self::F5),
            "f11" => Some(Self::F11),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
            Self::I => "I",
            Self::J => "J",
            Self::K => "K",
            Self::L => "L",
            Self::M => "M",
            Self::N => "N",
            Self::O => "O",
            Self::P => "P",
            Self::Q => "Q",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
            Self::U => "U",
            Self::V => "V",
            Self::W => "W",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Num0 => "0",
            Self::Num1 => "1",
            Self::Num2 => "2",
            Self::Num3 => "3",
            Self::Num4 => "4",
            Self::Num5 => "5",
            Self::Num6 => "6",
            Self::Num7 => "7",
            Self::Num8 => "8",
            Self::Num9 => "9",
            Self::F1 => "F1",
            Self::F5 => "F5",
            Self::F11 => "F11",
            Self::Escape => "Escape",
            Self::Space => "Space",
            Self::Enter => "Enter",
            Self::Backspace => "Backspace",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::ArrowUp => "Up",
            Self::ArrowDown => "Down",
            Self::ArrowLeft => "Left",
            Self::ArrowRight => "Right",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Equals => "=",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A complete hotkey binding (modifiers + key)
///
/// Serializes to/from a string like "Ctrl+Home"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hotkey::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid hotkey: '{}'", s)))
    }
}

impl Hotkey {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parse a hotkey string like "Shift+Right" or "Ctrl++"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut modifiers = Modifiers::default();
        let mut remaining = s;

        // Modifiers at the beginning (case-insensitive)
        loop {
            let lower = remaining.to_lowercase();

            if let Some(rest) = lower.strip_prefix("ctrl+").or_else(|| lower.strip_prefix("control+")) {
                modifiers.ctrl = true;
                remaining = &remaining[remaining.len() - rest.len()..];
            } else if let Some(rest) = lower.strip_prefix("alt+").or_else(|| lower.strip_prefix("option+")) {
                modifiers.alt = true;
                remaining = &remaining[remaining.len() - rest.len()..];
            } else if let Some(rest) = lower.strip_prefix("shift+") {
                modifiers.shift = true;
                remaining = &remaining[remaining.len() - rest.len()..];
            } else if let Some(rest) = lower.strip_prefix("cmd+").or_else(|| lower.strip_prefix("meta+")) {
                modifiers.cmd = true;
                remaining = &remaining[remaining.len() - rest.len()..];
            } else {
                break;
            }
        }

        if remaining.is_empty() {
            return None;
        }

        let key = KeyCode::from_name(remaining)?;
        Some(Self { key, modifiers })
    }

    pub fn matches(&self, key: KeyCode, modifiers: Modifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.ctrl {
            parts.push("Ctrl");
        }
        if self.modifiers.alt {
            parts.push("Alt");
        }
        if self.modifiers.shift {
            parts.push("Shift");
        }
        if self.modifiers.cmd {
            parts.push("Cmd");
        }
        parts.push(self.key.name());

        write!(f, "{}", parts.join("+"))
    }
}
