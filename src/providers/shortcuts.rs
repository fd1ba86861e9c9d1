use crossterm::event::KeyEvent;

use crate::app::Command;
use crate::tui::KeyMap;

/// Global editor shortcuts, checked before the focused component sees a key
#[derive(Debug, Clone)]
pub struct KeyboardShortcuts {
    key_map: KeyMap,
}

impl KeyboardShortcuts {
    pub fn new(key_map: KeyMap) -> Self {
        Self { key_map }
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Command bound to `event`, if any
    pub fn resolve(&self, event: &KeyEvent) -> Option<Command> {
        let keys = &self.key_map;
        if keys.new_diagram.matches(event) {
            Some(Command::NewDiagram)
        } else if keys.open_diagram.matches(event) {
            Some(Command::OpenDiagram)
        } else if keys.save.matches(event) {
            Some(Command::SaveDiagram)
        } else if keys.undo.matches(event) {
            Some(Command::Undo)
        } else if keys.redo.matches(event) {
            Some(Command::Redo)
        } else if keys.toggle_side_panel.matches(event) {
            Some(Command::ToggleSidePanel)
        } else {
            None
        }
    }
}
