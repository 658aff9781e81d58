//! Command Definition
//!
//! A single command id with its platform-specific hotkeys.

use serde::{Deserialize, Serialize};

use super::Hotkey;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Unique identifier, e.g. "nav.next"
    pub id: String,

    /// Hotkeys for Windows/Linux
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hotkeys: Vec<Hotkey>,

    /// Hotkeys for macOS (falls back to `hotkeys` if empty)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hotkeys_mac: Vec<Hotkey>,
}

impl CommandDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hotkeys: Vec::new(),
            hotkeys_mac: Vec::new(),
        }
    }

    pub fn with_hotkey(mut self, hotkey: Hotkey) -> Self {
        self.hotkeys.push(hotkey);
        self
    }

    pub fn with_hotkey_mac(mut self, hotkey: Hotkey) -> Self {
        self.hotkeys_mac.push(hotkey);
        self
    }

    /// Hotkeys for the current platform
    pub fn active_hotkeys(&self) -> &[Hotkey] {
        if cfg!(target_os = "macos") && !self.hotkeys_mac.is_empty() {
            &self.hotkeys_mac
        } else {
            &self.hotkeys
        }
    }

    pub fn primary_hotkey(&self) -> Option<&Hotkey> {
        self.active_hotkeys().first()
    }

    /// Replace the bindings with user configured ones, on every platform
    pub fn override_hotkeys(&mut self, hotkeys: Vec<Hotkey>) {
        self.hotkeys = hotkeys;
        self.hotkeys_mac.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::KeyCode;

    #[test]
    fn test_primary_hotkey() {
        let cmd = CommandDef::new("nav.next")
            .with_hotkey(Hotkey::parse("Right").unwrap())
            .with_hotkey(Hotkey::parse("PageDown").unwrap());
        assert_eq!(cmd.primary_hotkey().unwrap().key, KeyCode::ArrowRight);
        assert_eq!(cmd.active_hotkeys().len(), 2);
    }

    #[test]
    fn test_override_clears_mac_bindings() {
        let mut cmd = CommandDef::new("view.close")
            .with_hotkey(Hotkey::parse("Escape").unwrap())
            .with_hotkey_mac(Hotkey::parse("Cmd+W").unwrap());
        cmd.override_hotkeys(vec![Hotkey::parse("Q").unwrap()]);
        assert_eq!(cmd.active_hotkeys(), &[Hotkey::parse("Q").unwrap()]);
    }

    #[test]
    fn test_serde_empty_hotkeys_not_serialized() {
        let cmd = CommandDef::new("view.metadata");
        let toml_str = toml::to_string(&cmd).unwrap();
        assert!(!toml_str.contains("hotkeys"));
        assert!(toml_str.contains("view.metadata"));
    }
}
