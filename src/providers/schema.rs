//! Current diagram state
//!
//! `SchemaStore` holds the diagram being edited. Every edit is written
//! through to storage and recorded on the redo/undo stack; `apply_undo` and
//! `apply_redo` replay recorded actions without recording them again.

use anyhow::{anyhow, Result};
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

use super::{RedoUndoAction, RedoUndoStack};
use crate::app::{AppEvent, EventSink};
use crate::domain::{DbRelationship, DbSchema, DbTable, Diagram};
use crate::storage::StorageProvider;

#[derive(Debug)]
struct SchemaState {
    diagram: Diagram,
    /// Visible schema names; `None` shows everything
    filtered_schemas: Option<Vec<String>>,
}

/// Handle to the diagram being edited
#[derive(Clone)]
pub struct SchemaStore {
    storage: StorageProvider,
    redo_undo: RedoUndoStack,
    state: Arc<RwLock<SchemaState>>,
    events: EventSink,
}

impl SchemaStore {
    pub fn new(storage: &StorageProvider, redo_undo: &RedoUndoStack, events: EventSink) -> Self {
        Self {
            storage: storage.clone(),
            redo_undo: redo_undo.clone(),
            state: Arc::new(RwLock::new(SchemaState {
                diagram: Diagram::empty(),
                filtered_schemas: None,
            })),
            events,
        }
    }

    /// Make the stored diagram `id` current; `None` when it does not exist
    pub async fn load_diagram(&self, id: &str) -> Result<Option<Diagram>> {
        let Some(diagram) = self.storage.get_diagram(id).await? else {
            debug!("Diagram {} not found", id);
            return Ok(None);
        };

        info!("Loaded diagram {} ({})", diagram.id, diagram.name);
        {
            let mut state = self.state.write();
            state.filtered_schemas = default_filter(&diagram);
            state.diagram = diagram.clone();
        }
        self.events.emit(AppEvent::DiagramLoaded {
            diagram_id: diagram.id.clone(),
        });
        Ok(Some(diagram))
    }

    pub fn current_diagram(&self) -> Diagram {
        self.state.read().diagram.clone()
    }

    pub fn current_diagram_id(&self) -> String {
        self.state.read().diagram.id.clone()
    }

    pub fn schemas(&self) -> Vec<DbSchema> {
        self.state.read().diagram.schemas()
    }

    pub fn filtered_schemas(&self) -> Option<Vec<String>> {
        self.state.read().filtered_schemas.clone()
    }

    pub fn filter_schemas(&self, schemas: Option<Vec<String>>) {
        let diagram_id = {
            let mut state = self.state.write();
            state.filtered_schemas = schemas;
            state.diagram.id.clone()
        };
        self.events.emit(AppEvent::DiagramUpdated { diagram_id });
    }

    /// Tables visible under the current schema filter
    pub fn visible_tables(&self) -> Vec<DbTable> {
        let state = self.state.read();
        state
            .diagram
            .tables
            .iter()
            .filter(|table| match (&state.filtered_schemas, &table.schema) {
                (Some(filter), Some(schema)) => filter.contains(schema),
                _ => true,
            })
            .cloned()
            .collect()
    }

    pub async fn update_diagram_name(&self, name: &str) -> Result<()> {
        let old = self.current_diagram().name;
        self.rename(name).await?;
        self.redo_undo.add_undo_action(RedoUndoAction::RenameDiagram {
            old,
            new: name.to_string(),
        });
        Ok(())
    }

    /// Bump `updated_at` and persist, used by "Save"
    pub async fn update_diagram_updated_at(&self) -> Result<()> {
        self.edit(|_| Ok(())).await
    }

    pub async fn update_table_schema(&self, table_id: &str, schema: Option<String>) -> Result<()> {
        let old = self
            .current_diagram()
            .table(table_id)
            .ok_or_else(|| anyhow!("Unknown table {}", table_id))?
            .schema
            .clone();
        self.set_table_schema(table_id, schema.clone()).await?;
        self.redo_undo.add_undo_action(RedoUndoAction::UpdateTableSchema {
            table_id: table_id.to_string(),
            old,
            new: schema,
        });
        Ok(())
    }

    pub async fn add_relationship(&self, relationship: DbRelationship) -> Result<()> {
        self.insert_relationship(relationship.clone()).await?;
        self.redo_undo
            .add_undo_action(RedoUndoAction::AddRelationship { relationship });
        Ok(())
    }

    pub async fn add_tables(&self, tables: Vec<DbTable>) -> Result<()> {
        if tables.is_empty() {
            return Ok(());
        }
        self.insert_tables(tables.clone()).await?;
        self.redo_undo.add_undo_action(RedoUndoAction::AddTables { tables });
        Ok(())
    }

    /// Remove every table and relationship of the current diagram
    pub async fn clear_diagram_data(&self) -> Result<()> {
        let diagram = self.current_diagram();
        self.edit(|diagram| {
            diagram.tables.clear();
            diagram.relationships.clear();
            Ok(())
        })
        .await?;
        self.redo_undo.add_undo_action(RedoUndoAction::ClearDiagram {
            tables: diagram.tables,
            relationships: diagram.relationships,
        });
        Ok(())
    }

    /// Delete the current diagram from storage and reset to the placeholder
    pub async fn delete_diagram(&self) -> Result<()> {
        let diagram_id = self.current_diagram_id();
        self.storage.delete_diagram(&diagram_id).await?;
        {
            let mut state = self.state.write();
            state.diagram = Diagram::empty();
            state.filtered_schemas = None;
        }
        self.redo_undo.reset_undo_stack();
        self.redo_undo.reset_redo_stack();
        info!("Deleted diagram {}", diagram_id);
        self.events.emit(AppEvent::DiagramDeleted { diagram_id });
        Ok(())
    }

    /// Revert `action`
    pub async fn apply_undo(&self, action: &RedoUndoAction) -> Result<()> {
        match action {
            RedoUndoAction::RenameDiagram { old, .. } => self.rename(old).await,
            RedoUndoAction::UpdateTableSchema { table_id, old, .. } => {
                self.set_table_schema(table_id, old.clone()).await
            }
            RedoUndoAction::AddRelationship { relationship } => {
                let id = relationship.id.clone();
                self.edit(move |diagram| {
                    diagram.relationships.retain(|r| r.id != id);
                    Ok(())
                })
                .await
            }
            RedoUndoAction::AddTables { tables } => {
                let ids: Vec<String> = tables.iter().map(|t| t.id.clone()).collect();
                self.edit(move |diagram| {
                    diagram.tables.retain(|t| !ids.contains(&t.id));
                    diagram.relationships.retain(|r| {
                        !ids.contains(&r.source_table_id) && !ids.contains(&r.target_table_id)
                    });
                    Ok(())
                })
                .await
            }
            RedoUndoAction::ClearDiagram {
                tables,
                relationships,
            } => {
                let (tables, relationships) = (tables.clone(), relationships.clone());
                self.edit(move |diagram| {
                    diagram.tables = tables;
                    diagram.relationships = relationships;
                    Ok(())
                })
                .await
            }
        }
    }

    /// Perform `action` again
    pub async fn apply_redo(&self, action: &RedoUndoAction) -> Result<()> {
        match action {
            RedoUndoAction::RenameDiagram { new, .. } => self.rename(new).await,
            RedoUndoAction::UpdateTableSchema { table_id, new, .. } => {
                self.set_table_schema(table_id, new.clone()).await
            }
            RedoUndoAction::AddRelationship { relationship } => {
                self.insert_relationship(relationship.clone()).await
            }
            RedoUndoAction::AddTables { tables } => self.insert_tables(tables.clone()).await,
            RedoUndoAction::ClearDiagram { .. } => {
                self.edit(|diagram| {
                    diagram.tables.clear();
                    diagram.relationships.clear();
                    Ok(())
                })
                .await
            }
        }
    }

    async fn rename(&self, name: &str) -> Result<()> {
        let name = name.to_string();
        self.edit(move |diagram| {
            diagram.name = name;
            Ok(())
        })
        .await
    }

    async fn set_table_schema(&self, table_id: &str, schema: Option<String>) -> Result<()> {
        let table_id = table_id.to_string();
        self.edit(move |diagram| {
            let table = diagram
                .table_mut(&table_id)
                .ok_or_else(|| anyhow!("Unknown table {}", table_id))?;
            table.schema = schema;
            Ok(())
        })
        .await
    }

    async fn insert_relationship(&self, relationship: DbRelationship) -> Result<()> {
        self.edit(move |diagram| {
            if diagram.table(&relationship.source_table_id).is_none()
                || diagram.table(&relationship.target_table_id).is_none()
            {
                return Err(anyhow!("Relationship {} references unknown tables", relationship.name));
            }
            diagram.relationships.push(relationship);
            Ok(())
        })
        .await
    }

    async fn insert_tables(&self, tables: Vec<DbTable>) -> Result<()> {
        self.edit(move |diagram| {
            diagram.tables.extend(tables);
            Ok(())
        })
        .await
    }

    /// Apply `change` to a copy of the current diagram, persist it, then
    /// publish it as current
    async fn edit(&self, change: impl FnOnce(&mut Diagram) -> Result<()>) -> Result<()> {
        let mut diagram = self.current_diagram();
        if diagram.id.is_empty() {
            return Err(anyhow!("No diagram loaded"));
        }
        change(&mut diagram)?;
        diagram.updated_at = Utc::now();

        self.storage.update_diagram(&diagram).await?;

        let diagram_id = diagram.id.clone();
        self.state.write().diagram = diagram;
        self.events.emit(AppEvent::DiagramUpdated { diagram_id });
        Ok(())
    }
}

/// Show only the dialect's default schema when the diagram has one
fn default_filter(diagram: &Diagram) -> Option<Vec<String>> {
    let default = diagram.database_type.default_schema()?;
    diagram
        .schemas()
        .iter()
        .any(|schema| schema.name == default)
        .then(|| vec![default.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatabaseType, DbField};

    async fn store_with(diagram: &Diagram) -> (SchemaStore, RedoUndoStack, StorageProvider) {
        let storage = StorageProvider::in_memory().await.unwrap();
        storage.add_diagram(diagram).await.unwrap();
        let redo_undo = RedoUndoStack::new(EventSink::detached());
        let store = SchemaStore::new(&storage, &redo_undo, EventSink::detached());
        store.load_diagram(&diagram.id).await.unwrap();
        (store, redo_undo, storage)
    }

    fn shop() -> Diagram {
        let mut diagram = Diagram::new("shop", DatabaseType::Postgresql);
        diagram.tables.push(
            DbTable::new("users", Some("public".into())).with_field(DbField::new("id", "int").primary_key()),
        );
        diagram.tables.push(DbTable::new("orders", Some("sales".into())));
        diagram
    }

    #[tokio::test]
    async fn test_missing_diagram_loads_none() {
        let storage = StorageProvider::in_memory().await.unwrap();
        let store = SchemaStore::new(&storage, &RedoUndoStack::default(), EventSink::detached());
        assert!(store.load_diagram("abc").await.unwrap().is_none());
        assert_eq!(store.current_diagram_id(), "");
    }

    #[tokio::test]
    async fn test_default_filter_uses_dialect_schema() {
        let (store, _, _) = store_with(&shop()).await;
        assert_eq!(store.filtered_schemas(), Some(vec!["public".to_string()]));
        assert_eq!(store.visible_tables().len(), 1);

        let mut mysql = shop();
        mysql.database_type = DatabaseType::Mysql;
        let (store, _, _) = store_with(&mysql).await;
        assert_eq!(store.filtered_schemas(), None);
    }

    #[tokio::test]
    async fn test_rename_persists_and_undoes() {
        let diagram = shop();
        let (store, redo_undo, storage) = store_with(&diagram).await;

        store.update_diagram_name("warehouse").await.unwrap();
        let stored = storage.get_diagram(&diagram.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "warehouse");

        let action = redo_undo.pop_undo().unwrap();
        store.apply_undo(&action).await.unwrap();
        assert_eq!(store.current_diagram().name, "shop");

        store.apply_redo(&action).await.unwrap();
        assert_eq!(store.current_diagram().name, "warehouse");
    }

    #[tokio::test]
    async fn test_clear_restores_on_undo() {
        let diagram = shop();
        let (store, redo_undo, _) = store_with(&diagram).await;
        let users = diagram.tables[0].id.clone();
        let orders = diagram.tables[1].id.clone();
        store
            .add_relationship(DbRelationship::new("users_orders", &users, &orders))
            .await
            .unwrap();

        store.clear_diagram_data().await.unwrap();
        assert!(store.current_diagram().tables.is_empty());

        let action = redo_undo.pop_undo().unwrap();
        store.apply_undo(&action).await.unwrap();
        let restored = store.current_diagram();
        assert_eq!(restored.tables.len(), 2);
        assert_eq!(restored.relationships.len(), 1);
    }

    #[tokio::test]
    async fn test_relationship_requires_known_tables() {
        let (store, redo_undo, _) = store_with(&shop()).await;
        let result = store
            .add_relationship(DbRelationship::new("broken", "nope", "nada"))
            .await;
        assert!(result.is_err());
        assert!(!redo_undo.has_undo());
    }

    #[tokio::test]
    async fn test_update_table_schema_round_trip() {
        let diagram = shop();
        let (store, redo_undo, _) = store_with(&diagram).await;
        let orders = diagram.tables[1].id.clone();

        store
            .update_table_schema(&orders, Some("public".into()))
            .await
            .unwrap();
        assert_eq!(store.schemas(), vec![DbSchema::new("public")]);

        let action = redo_undo.pop_undo().unwrap();
        store.apply_undo(&action).await.unwrap();
        assert_eq!(
            store.current_diagram().table(&orders).unwrap().schema.as_deref(),
            Some("sales")
        );
    }

    #[tokio::test]
    async fn test_delete_resets_current() {
        let diagram = shop();
        let (store, _, storage) = store_with(&diagram).await;

        store.delete_diagram().await.unwrap();
        assert_eq!(store.current_diagram_id(), "");
        assert!(storage.get_diagram(&diagram.id).await.unwrap().is_none());
    }
}
