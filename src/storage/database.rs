//! SQLite persistence for diagrams and editor configuration

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{StorageError, StorageResult};
use crate::domain::{DatabaseType, DbRelationship, DbTable, Diagram};

/// Diagram body stored as JSON next to the indexed columns
#[derive(Debug, Default, Serialize, Deserialize)]
struct DiagramContent {
    #[serde(default)]
    tables: Vec<DbTable>,
    #[serde(default)]
    relationships: Vec<DbRelationship>,
}

/// Database manager for diagram persistence
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file
    pub fn new<P: AsRef<Path>>(db_path: P) -> StorageResult<Self> {
        let conn = Connection::open(db_path)?;
        let db = Self { conn };
        db.create_tables()?;
        Ok(db)
    }

    /// Throwaway database that lives as long as the connection
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&self) -> StorageResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS diagrams (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                database_type TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS config (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_diagrams_updated_at ON diagrams (updated_at)",
            [],
        )?;

        Ok(())
    }

    /// Insert or replace a diagram
    pub fn upsert_diagram(&self, diagram: &Diagram) -> StorageResult<()> {
        let content = serde_json::to_string(&DiagramContent {
            tables: diagram.tables.clone(),
            relationships: diagram.relationships.clone(),
        })?;

        self.conn.execute(
            "INSERT INTO diagrams (id, name, database_type, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                database_type = excluded.database_type,
                content = excluded.content,
                updated_at = excluded.updated_at",
            params![
                diagram.id,
                diagram.name,
                diagram.database_type.as_str(),
                content,
                diagram.created_at.to_rfc3339(),
                diagram.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    /// Get a diagram by ID
    pub fn get_diagram(&self, id: &str) -> StorageResult<Option<Diagram>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, database_type, content, created_at, updated_at
                 FROM diagrams WHERE id = ?1",
                [id],
                DiagramRow::from_row,
            )
            .optional()?;

        row.map(Diagram::try_from).transpose()
    }

    /// List diagrams, most recently updated first
    pub fn list_diagrams(&self) -> StorageResult<Vec<Diagram>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, database_type, content, created_at, updated_at
             FROM diagrams ORDER BY updated_at DESC",
        )?;

        let rows = stmt.query_map([], DiagramRow::from_row)?;

        let mut diagrams = Vec::new();
        for row in rows {
            diagrams.push(Diagram::try_from(row?)?);
        }
        Ok(diagrams)
    }

    /// Delete a diagram, returning whether a row was removed
    pub fn delete_diagram(&self, id: &str) -> StorageResult<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM diagrams WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    /// Read a JSON config value
    pub fn get_config_value(&self, key: &str) -> StorageResult<Option<serde_json::Value>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM config WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(value.map(|v| serde_json::from_str(&v)).transpose()?)
    }

    /// Write a JSON config value
    pub fn set_config_value(&self, key: &str, value: &serde_json::Value) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, serde_json::to_string(value)?],
        )?;
        Ok(())
    }
}

/// Raw diagram row
#[derive(Debug, Clone)]
pub struct DiagramRow {
    pub id: String,
    pub name: String,
    pub database_type: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DiagramRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            database_type: row.get(2)?,
            content: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

fn parse_timestamp(value: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StorageError::InvalidTimestamp(value.to_string()))
}

impl TryFrom<DiagramRow> for Diagram {
    type Error = StorageError;

    fn try_from(row: DiagramRow) -> StorageResult<Self> {
        let content: DiagramContent = serde_json::from_str(&row.content)?;
        let database_type = DatabaseType::parse(&row.database_type)
            .ok_or_else(|| StorageError::UnknownDatabaseType(row.database_type.clone()))?;

        Ok(Diagram {
            id: row.id,
            name: row.name,
            database_type,
            tables: content.tables,
            relationships: content.relationships,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DbField;

    #[test]
    fn test_diagram_roundtrip_keeps_tables() {
        let db = Database::in_memory().unwrap();
        let mut diagram = Diagram::new("shop", DatabaseType::Postgresql);
        diagram.tables.push(
            DbTable::new("users", Some("public".into())).with_field(DbField::new("id", "int").primary_key()),
        );

        db.upsert_diagram(&diagram).unwrap();
        let loaded = db.get_diagram(&diagram.id).unwrap().unwrap();

        assert_eq!(loaded.name, "shop");
        assert_eq!(loaded.database_type, DatabaseType::Postgresql);
        assert_eq!(loaded.tables.len(), 1);
        assert!(loaded.tables[0].fields[0].primary_key);
    }

    #[test]
    fn test_missing_diagram_is_none() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_diagram("abc").unwrap().is_none());
        assert!(!db.delete_diagram("abc").unwrap());
    }

    #[test]
    fn test_upsert_updates_existing_row() {
        let db = Database::in_memory().unwrap();
        let mut diagram = Diagram::new("first", DatabaseType::Mysql);
        db.upsert_diagram(&diagram).unwrap();

        diagram.name = "second".into();
        db.upsert_diagram(&diagram).unwrap();

        let all = db.list_diagrams().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "second");
    }

    #[test]
    fn test_config_values() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_config_value("config").unwrap().is_none());

        let value = serde_json::json!({"default_diagram_id": "xyz"});
        db.set_config_value("config", &value).unwrap();
        assert_eq!(db.get_config_value("config").unwrap(), Some(value));
    }
}
