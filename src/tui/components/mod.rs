pub mod canvas;
pub mod dialogs;
pub mod loader;
pub mod logo;
pub mod navbar;
pub mod side_panel;
pub mod toasts;

use crate::app::Command;
use crate::tui::{styles::Theme, Frame};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

/// Base trait for all UI components
///
/// Components read the services they hold at render time and answer key
/// input with the `Command` to dispatch, if any.
pub trait Component: Send {
    /// Handle keyboard input
    fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        let _ = event;
        None
    }

    /// Handle pasted text
    fn handle_paste(&mut self, text: &str) {
        let _ = text;
    }

    /// Render the component
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// Selection index over a list that can shrink underneath it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: usize,
}

impl Selection {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.index = index.min(len.saturating_sub(1));
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn previous(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Current index clamped to `len`
    pub fn get(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.index.min(len - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut selection = Selection::default();
        selection.previous(3);
        assert_eq!(selection.index(), 2);
        selection.next(3);
        assert_eq!(selection.index(), 0);
    }

    #[test]
    fn test_selection_clamps_to_shorter_list() {
        let mut selection = Selection::default();
        selection.select(5, 10);
        assert_eq!(selection.get(3), Some(2));
        assert_eq!(selection.get(0), None);
    }
}
