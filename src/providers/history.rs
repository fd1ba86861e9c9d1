use anyhow::Result;
use tracing::{debug, warn};

use super::{RedoUndoStack, SchemaStore};

/// Undo/redo on top of the schema store
#[derive(Clone)]
pub struct HistoryProvider {
    redo_undo: RedoUndoStack,
    schema: SchemaStore,
}

impl HistoryProvider {
    pub fn new(redo_undo: &RedoUndoStack, schema: &SchemaStore) -> Self {
        Self {
            redo_undo: redo_undo.clone(),
            schema: schema.clone(),
        }
    }

    pub fn has_undo(&self) -> bool {
        self.redo_undo.has_undo()
    }

    pub fn has_redo(&self) -> bool {
        self.redo_undo.has_redo()
    }

    pub async fn undo(&self) -> Result<()> {
        let Some(action) = self.redo_undo.pop_undo() else {
            return Ok(());
        };
        debug!("Undo {:?}", action);
        if let Err(e) = self.schema.apply_undo(&action).await {
            warn!("Undo failed, restoring action: {}", e);
            self.redo_undo.push_undo(action);
            return Err(e);
        }
        self.redo_undo.push_redo(action);
        Ok(())
    }

    pub async fn redo(&self) -> Result<()> {
        let Some(action) = self.redo_undo.pop_redo() else {
            return Ok(());
        };
        debug!("Redo {:?}", action);
        if let Err(e) = self.schema.apply_redo(&action).await {
            warn!("Redo failed, restoring action: {}", e);
            self.redo_undo.push_redo(action);
            return Err(e);
        }
        self.redo_undo.push_undo(action);
        Ok(())
    }
}
