use parking_lot::RwLock;
use std::sync::Arc;

use crate::app::{AppEvent, EventSink};

#[derive(Debug, Clone, PartialEq, Eq)]
struct LayoutState {
    side_panel_shown: bool,
    select_schema_open: bool,
}

/// Panel visibility of the editor
#[derive(Clone)]
pub struct LayoutProvider {
    state: Arc<RwLock<LayoutState>>,
    events: EventSink,
}

impl LayoutProvider {
    pub fn new(events: EventSink) -> Self {
        Self {
            state: Arc::new(RwLock::new(LayoutState {
                side_panel_shown: true,
                select_schema_open: false,
            })),
            events,
        }
    }

    pub fn is_side_panel_shown(&self) -> bool {
        self.state.read().side_panel_shown
    }

    pub fn show_side_panel(&self) {
        self.update(|state| state.side_panel_shown = true);
    }

    pub fn hide_side_panel(&self) {
        self.update(|state| state.side_panel_shown = false);
    }

    pub fn is_select_schema_open(&self) -> bool {
        self.state.read().select_schema_open
    }

    pub fn open_select_schema(&self) {
        self.update(|state| state.select_schema_open = true);
    }

    pub fn close_select_schema(&self) {
        self.update(|state| state.select_schema_open = false);
    }

    fn update(&self, apply: impl FnOnce(&mut LayoutState)) {
        let changed = {
            let mut state = self.state.write();
            let before = state.clone();
            apply(&mut state);
            *state != before
        };
        if changed {
            self.events.emit(AppEvent::LayoutChanged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_panel_toggles() {
        let layout = LayoutProvider::new(EventSink::detached());
        assert!(layout.is_side_panel_shown());
        layout.hide_side_panel();
        assert!(!layout.is_side_panel_shown());
        layout.show_side_panel();
        assert!(layout.is_side_panel_shown());
    }

    #[test]
    fn test_select_schema_is_independent_of_panel() {
        let layout = LayoutProvider::new(EventSink::detached());
        layout.open_select_schema();
        layout.hide_side_panel();
        assert!(layout.is_select_schema_open());
    }
}
