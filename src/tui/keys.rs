use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: String,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, description: &str) -> Self {
        Self {
            key,
            modifiers,
            description: description.to_string(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        let code = match event.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.key == code && self.modifiers == event.modifiers
    }

    /// Menu style label such as "Ctrl+Z"
    pub fn label(&self) -> String {
        let key = match self.key {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key)
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            format!("Alt+{}", key)
        } else {
            key
        }
    }
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub menu: KeyBinding,
    pub new_diagram: KeyBinding,
    pub open_diagram: KeyBinding,
    pub save: KeyBinding,
    pub undo: KeyBinding,
    pub redo: KeyBinding,
    pub toggle_side_panel: KeyBinding,
    pub help: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Quit application"),
            menu: KeyBinding::new(KeyCode::F(10), KeyModifiers::NONE, "Open the menu bar"),
            new_diagram: KeyBinding::new(KeyCode::Char('n'), KeyModifiers::CONTROL, "New diagram"),
            open_diagram: KeyBinding::new(KeyCode::Char('o'), KeyModifiers::CONTROL, "Open diagram"),
            save: KeyBinding::new(KeyCode::Char('s'), KeyModifiers::CONTROL, "Save diagram"),
            undo: KeyBinding::new(KeyCode::Char('z'), KeyModifiers::CONTROL, "Undo"),
            redo: KeyBinding::new(KeyCode::Char('y'), KeyModifiers::CONTROL, "Redo"),
            toggle_side_panel: KeyBinding::new(
                KeyCode::Char('b'),
                KeyModifiers::CONTROL,
                "Show/hide side panel",
            ),
            help: KeyBinding::new(KeyCode::Char('g'), KeyModifiers::CONTROL, "Show/hide help"),
        }
    }
}

impl KeyMap {
    pub fn should_quit(&self, event: &KeyEvent) -> bool {
        self.quit.matches(event)
    }

    pub fn should_show_help(&self, event: &KeyEvent) -> bool {
        self.help.matches(event)
    }

    pub fn should_open_menu(&self, event: &KeyEvent) -> bool {
        self.menu.matches(event)
    }

    /// Help text for all key bindings
    pub fn help_text(&self) -> String {
        [
            &self.menu,
            &self.new_diagram,
            &self.open_diagram,
            &self.save,
            &self.undo,
            &self.redo,
            &self.toggle_side_panel,
            &self.help,
            &self.quit,
        ]
        .iter()
        .map(|binding| format!("{:<8} {}", binding.label(), binding.description))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_bindings_ignore_case() {
        let keys = KeyMap::default();
        let upper = KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::CONTROL);
        assert!(keys.undo.matches(&upper));
        assert!(!keys.undo.matches(&KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_labels() {
        let keys = KeyMap::default();
        assert_eq!(keys.undo.label(), "Ctrl+Z");
        assert_eq!(keys.menu.label(), "F10");
    }
}
