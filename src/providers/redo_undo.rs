use parking_lot::RwLock;
use std::sync::Arc;

use crate::app::{AppEvent, EventSink};
use crate::domain::{DbRelationship, DbTable};

const MAX_ACTIONS: usize = 100;

/// A reversible edit of the current diagram
#[derive(Debug, Clone, PartialEq)]
pub enum RedoUndoAction {
    RenameDiagram {
        old: String,
        new: String,
    },
    UpdateTableSchema {
        table_id: String,
        old: Option<String>,
        new: Option<String>,
    },
    AddRelationship {
        relationship: DbRelationship,
    },
    AddTables {
        tables: Vec<DbTable>,
    },
    ClearDiagram {
        tables: Vec<DbTable>,
        relationships: Vec<DbRelationship>,
    },
}

#[derive(Debug, Default)]
struct Stacks {
    undo: Vec<RedoUndoAction>,
    redo: Vec<RedoUndoAction>,
}

/// Undo and redo stacks of the editor session
#[derive(Clone, Default)]
pub struct RedoUndoStack {
    stacks: Arc<RwLock<Stacks>>,
    events: EventSink,
}

impl RedoUndoStack {
    pub fn new(events: EventSink) -> Self {
        Self {
            stacks: Arc::new(RwLock::new(Stacks::default())),
            events,
        }
    }

    /// Record a fresh user action; invalidates the redo stack
    pub fn add_undo_action(&self, action: RedoUndoAction) {
        self.mutate(|stacks| {
            stacks.undo.push(action);
            if stacks.undo.len() > MAX_ACTIONS {
                stacks.undo.remove(0);
            }
            stacks.redo.clear();
        });
    }

    pub fn push_undo(&self, action: RedoUndoAction) {
        self.mutate(|stacks| stacks.undo.push(action));
    }

    pub fn push_redo(&self, action: RedoUndoAction) {
        self.mutate(|stacks| stacks.redo.push(action));
    }

    pub fn pop_undo(&self) -> Option<RedoUndoAction> {
        let mut action = None;
        self.mutate(|stacks| action = stacks.undo.pop());
        action
    }

    pub fn pop_redo(&self) -> Option<RedoUndoAction> {
        let mut action = None;
        self.mutate(|stacks| action = stacks.redo.pop());
        action
    }

    pub fn reset_undo_stack(&self) {
        self.mutate(|stacks| stacks.undo.clear());
    }

    pub fn reset_redo_stack(&self) {
        self.mutate(|stacks| stacks.redo.clear());
    }

    pub fn has_undo(&self) -> bool {
        !self.stacks.read().undo.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.stacks.read().redo.is_empty()
    }

    fn mutate(&self, apply: impl FnOnce(&mut Stacks)) {
        let (has_undo, has_redo) = {
            let mut stacks = self.stacks.write();
            apply(&mut stacks);
            (!stacks.undo.is_empty(), !stacks.redo.is_empty())
        };
        self.events.emit(AppEvent::HistoryChanged { has_undo, has_redo });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename(old: &str, new: &str) -> RedoUndoAction {
        RedoUndoAction::RenameDiagram {
            old: old.into(),
            new: new.into(),
        }
    }

    #[test]
    fn test_new_action_clears_redo() {
        let stack = RedoUndoStack::new(EventSink::detached());
        stack.add_undo_action(rename("a", "b"));
        let action = stack.pop_undo().unwrap();
        stack.push_redo(action);
        assert!(stack.has_redo());

        stack.add_undo_action(rename("b", "c"));
        assert!(!stack.has_redo());
        assert!(stack.has_undo());
    }

    #[test]
    fn test_undo_stack_is_bounded() {
        let stack = RedoUndoStack::new(EventSink::detached());
        for i in 0..(MAX_ACTIONS + 5) {
            stack.add_undo_action(rename(&i.to_string(), "x"));
        }
        let mut count = 0;
        while stack.pop_undo().is_some() {
            count += 1;
        }
        assert_eq!(count, MAX_ACTIONS);
    }

    #[test]
    fn test_resets_are_independent() {
        let stack = RedoUndoStack::new(EventSink::detached());
        stack.add_undo_action(rename("a", "b"));
        stack.push_redo(rename("b", "c"));

        stack.reset_redo_stack();
        assert!(stack.has_undo());
        assert!(!stack.has_redo());

        stack.reset_undo_stack();
        assert!(!stack.has_undo());
    }
}
