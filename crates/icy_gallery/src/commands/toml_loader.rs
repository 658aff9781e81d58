//! TOML loader for command definitions

use super::{CommandDef, CommandSet, Hotkey};
use crate::error::{GalleryError, GalleryResult};

/// Raw command definition as it appears in TOML
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CommandToml {
    pub id: String,
    #[serde(default)]
    pub hotkey: Vec<String>,
    #[serde(default)]
    pub hotkey_mac: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct CommandsFile {
    #[serde(default)]
    pub commands: Vec<CommandToml>,
}

/// Parse a list of hotkey strings, failing on the first invalid one
pub fn parse_hotkeys(command: &str, bindings: &[String]) -> GalleryResult<Vec<Hotkey>> {
    bindings
        .iter()
        .map(|binding| {
            Hotkey::parse(binding).ok_or_else(|| GalleryError::InvalidHotkey {
                command: command.to_string(),
                binding: binding.clone(),
            })
        })
        .collect()
}

impl CommandToml {
    pub fn into_command_def(self) -> GalleryResult<CommandDef> {
        let hotkeys = parse_hotkeys(&self.id, &self.hotkey)?;
        let hotkeys_mac = parse_hotkeys(&self.id, &self.hotkey_mac)?;

        let mut cmd = CommandDef::new(self.id);
        for hk in hotkeys {
            cmd = cmd.with_hotkey(hk);
        }
        for hk in hotkeys_mac {
            cmd = cmd.with_hotkey_mac(hk);
        }
        Ok(cmd)
    }
}

impl CommandsFile {
    pub fn from_toml(toml_str: &str) -> GalleryResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn into_command_set(self) -> GalleryResult<CommandSet> {
        let mut set = CommandSet::new();
        for cmd_toml in self.commands {
            set.add(cmd_toml.into_command_def()?);
        }
        Ok(set)
    }
}

pub fn load_commands_from_str(toml_str: &str) -> GalleryResult<CommandSet> {
    CommandsFile::from_toml(toml_str)?.into_command_set()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{KeyCode, Modifiers};

    const TEST_TOML: &str = r#"
[[commands]]
id = "test.next"
hotkey = ["Right", "PageDown"]

[[commands]]
id = "test.close"
hotkey = ["Escape"]
hotkey_mac = ["Escape", "Cmd+W"]

[[commands]]
id = "test.nokey"
hotkey = []
"#;

    #[test]
    fn test_parse_toml() {
        let file = CommandsFile::from_toml(TEST_TOML).unwrap();
        assert_eq!(file.commands.len(), 3);
        assert_eq!(file.commands[0].id, "test.next");
        assert_eq!(file.commands[0].hotkey, vec!["Right", "PageDown"]);
    }

    #[test]
    fn test_into_command_set() {
        let set = load_commands_from_str(TEST_TOML).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.match_key(KeyCode::PageDown, Modifiers::NONE), Some("test.next"));
        assert!(set.get("test.nokey").unwrap().primary_hotkey().is_none());
    }

    #[test]
    fn test_invalid_hotkey_is_an_error() {
        let err = load_commands_from_str("[[commands]]\nid = \"x\"\nhotkey = [\"Hyper+Q\"]\n").unwrap_err();
        assert!(matches!(err, GalleryError::InvalidHotkey { .. }));
    }

    #[test]
    fn test_broken_toml_is_an_error() {
        assert!(matches!(load_commands_from_str("[[commands]\n"), Err(GalleryError::TomlParse(_))));
    }
}
