//! Command system of the viewer
//!
//! Keys are bound to string command ids through a TOML keymap:
//! ```toml
//! [[commands]]
//! id = "nav.next"
//! hotkey = ["Right"]
//! ```
//! The viewer maps matched ids to [`ViewerCommand`] and dispatches them.

mod command_def;
mod command_set;
mod hotkey;
mod toml_loader;

pub use command_def::CommandDef;
pub use command_set::CommandSet;
pub use hotkey::{Hotkey, KeyCode, Modifiers};
pub use toml_loader::{load_commands_from_str, parse_hotkeys};

use std::fmt;
use std::str::FromStr;

use crate::error::GalleryError;

const GALLERY_COMMANDS_TOML: &str = include_str!("../../data/commands_gallery.toml");

/// Default key bindings of the viewer
pub fn create_gallery_commands() -> CommandSet {
    load_commands_from_str(GALLERY_COMMANDS_TOML).expect("Failed to parse embedded commands_gallery.toml")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerCommand {
    Previous,
    Next,
    First,
    Last,
    TogglePlay,
    /// Shorter time per slide
    SpeedUp,
    SlowDown,
    ToggleMetadata,
    ToggleFullscreen,
    Close,
}

impl ViewerCommand {
    pub const ALL: [ViewerCommand; 10] = [
        ViewerCommand::Previous,
        ViewerCommand::Next,
        ViewerCommand::First,
        ViewerCommand::Last,
        ViewerCommand::TogglePlay,
        ViewerCommand::SpeedUp,
        ViewerCommand::SlowDown,
        ViewerCommand::ToggleMetadata,
        ViewerCommand::ToggleFullscreen,
        ViewerCommand::Close,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ViewerCommand::Previous => "nav.previous",
            ViewerCommand::Next => "nav.next",
            ViewerCommand::First => "nav.first",
            ViewerCommand::Last => "nav.last",
            ViewerCommand::TogglePlay => "slideshow.toggle",
            ViewerCommand::SpeedUp => "slideshow.faster",
            ViewerCommand::SlowDown => "slideshow.slower",
            ViewerCommand::ToggleMetadata => "view.metadata",
            ViewerCommand::ToggleFullscreen => "view.fullscreen",
            ViewerCommand::Close => "view.close",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id)
    }
}

impl fmt::Display for ViewerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ViewerCommand {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| GalleryError::UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_keymap_binds_every_command() {
        let set = create_gallery_commands();
        assert_eq!(set.len(), ViewerCommand::ALL.len());
        for cmd in ViewerCommand::ALL {
            let def = set.get(cmd.id()).unwrap_or_else(|| panic!("missing {}", cmd.id()));
            assert!(def.primary_hotkey().is_some(), "{} has no hotkey", cmd);
        }
        assert!(set.find_conflicts().is_empty());
    }

    #[test]
    fn test_default_bindings() {
        let set = create_gallery_commands();
        let lookup = |key| set.match_key(key, Modifiers::NONE).and_then(ViewerCommand::from_id);
        assert_eq!(lookup(KeyCode::ArrowLeft), Some(ViewerCommand::Previous));
        assert_eq!(lookup(KeyCode::ArrowRight), Some(ViewerCommand::Next));
        assert_eq!(lookup(KeyCode::Home), Some(ViewerCommand::First));
        assert_eq!(lookup(KeyCode::End), Some(ViewerCommand::Last));
        assert_eq!(lookup(KeyCode::Space), Some(ViewerCommand::TogglePlay));
        assert_eq!(lookup(KeyCode::I), Some(ViewerCommand::ToggleMetadata));
        assert_eq!(lookup(KeyCode::F), Some(ViewerCommand::ToggleFullscreen));
        assert_eq!(lookup(KeyCode::Escape), Some(ViewerCommand::Close));
        assert_eq!(lookup(KeyCode::Plus), Some(ViewerCommand::SpeedUp));
        assert_eq!(lookup(KeyCode::Minus), Some(ViewerCommand::SlowDown));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("nav.first".parse::<ViewerCommand>().unwrap(), ViewerCommand::First);
        assert!(matches!("nav.sideways".parse::<ViewerCommand>(), Err(GalleryError::UnknownCommand(_))));
    }
}
