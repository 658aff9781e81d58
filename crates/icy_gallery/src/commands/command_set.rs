//! Command Set
//!
//! A collection of command definitions that can match keyboard events.

use std::collections::HashMap;

use super::{CommandDef, Hotkey, KeyCode, Modifiers};

#[derive(Debug, Default, Clone)]
pub struct CommandSet {
    /// Commands indexed by their ID
    commands: HashMap<String, CommandDef>,

    /// Lookup table: Hotkey -> command ID
    hotkey_map: HashMap<Hotkey, String>,
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, command: CommandDef) {
        let id = command.id.clone();
        for hotkey in command.active_hotkeys() {
            self.hotkey_map.insert(*hotkey, id.clone());
        }
        self.commands.insert(id, command);
    }

    pub fn get(&self, id: &str) -> Option<&CommandDef> {
        self.commands.get(id)
    }

    /// Match a key event and return the command ID if found
    pub fn match_key(&self, key: KeyCode, modifiers: Modifiers) -> Option<&str> {
        self.match_hotkey(&Hotkey::new(key, modifiers))
    }

    pub fn match_hotkey(&self, hotkey: &Hotkey) -> Option<&str> {
        self.hotkey_map.get(hotkey).map(|s| s.as_str())
    }

    fn rebuild_hotkey_map(&mut self) {
        self.hotkey_map.clear();
        for (id, cmd) in &self.commands {
            for hotkey in cmd.active_hotkeys() {
                self.hotkey_map.insert(*hotkey, id.clone());
            }
        }
    }

    /// Replace the hotkeys of a command. Returns false for unknown ids.
    pub fn override_hotkeys(&mut self, id: &str, hotkeys: Vec<Hotkey>) -> bool {
        let Some(cmd) = self.commands.get_mut(id) else {
            return false;
        };
        cmd.override_hotkeys(hotkeys);
        self.rebuild_hotkey_map();
        true
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Same hotkey bound to multiple commands
    pub fn find_conflicts(&self) -> Vec<(Hotkey, Vec<String>)> {
        let mut hotkey_to_commands: HashMap<Hotkey, Vec<String>> = HashMap::new();

        for (id, cmd) in &self.commands {
            for hotkey in cmd.active_hotkeys() {
                hotkey_to_commands.entry(*hotkey).or_default().push(id.clone());
            }
        }

        hotkey_to_commands.into_iter().filter(|(_, ids)| ids.len() > 1).collect()
    }
}
