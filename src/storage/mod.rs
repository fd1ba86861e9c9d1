//! Persistent storage for diagrams and configuration
//!
//! `StorageProvider` is the shared handle every other service talks to;
//! the SQLite connection sits behind an async mutex.

mod database;

pub use database::*;

use std::{path::Path, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::Diagram;

/// Storage failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("Unknown database type '{0}'")]
    UnknownDatabaseType(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Handle to the diagram database
#[derive(Clone)]
pub struct StorageProvider {
    db: Arc<Mutex<Database>>,
}

impl StorageProvider {
    /// Open the database file at `path`
    pub async fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        debug!("Opening storage at {}", path.as_ref().display());
        let db = Database::new(path)?;
        Ok(Self::from_database(db))
    }

    /// In-memory storage
    pub async fn in_memory() -> StorageResult<Self> {
        Ok(Self::from_database(Database::in_memory()?))
    }

    pub fn from_database(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    pub async fn get_diagram(&self, id: &str) -> StorageResult<Option<Diagram>> {
        self.db.lock().await.get_diagram(id)
    }

    pub async fn list_diagrams(&self) -> StorageResult<Vec<Diagram>> {
        self.db.lock().await.list_diagrams()
    }

    pub async fn add_diagram(&self, diagram: &Diagram) -> StorageResult<()> {
        debug!("Adding diagram {} ({})", diagram.id, diagram.name);
        self.db.lock().await.upsert_diagram(diagram)
    }

    pub async fn update_diagram(&self, diagram: &Diagram) -> StorageResult<()> {
        self.db.lock().await.upsert_diagram(diagram)
    }

    pub async fn delete_diagram(&self, id: &str) -> StorageResult<bool> {
        debug!("Deleting diagram {}", id);
        self.db.lock().await.delete_diagram(id)
    }

    pub async fn get_config_value(&self, key: &str) -> StorageResult<Option<serde_json::Value>> {
        self.db.lock().await.get_config_value(key)
    }

    pub async fn set_config_value(&self, key: &str, value: &serde_json::Value) -> StorageResult<()> {
        self.db.lock().await.set_config_value(key, value)
    }
}
