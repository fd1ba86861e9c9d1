//! Diagram model shared by storage, the schema store and the dialogs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DatabaseType;

/// A column of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbField {
    pub id: String,
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl DbField {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            data_type: data_type.into(),
            primary_key: false,
            nullable: true,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }
}

/// A table placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbTable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub fields: Vec<DbField>,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl DbTable {
    pub fn new(name: impl Into<String>, schema: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            schema,
            fields: Vec::new(),
            x: 0,
            y: 0,
        }
    }

    pub fn with_field(mut self, field: DbField) -> Self {
        self.fields.push(field);
        self
    }

    /// `schema.name` when the table lives in a schema
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

/// A foreign key style link between two tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbRelationship {
    pub id: String,
    pub name: String,
    pub source_table_id: String,
    pub target_table_id: String,
}

impl DbRelationship {
    pub fn new(name: impl Into<String>, source_table_id: &str, target_table_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            source_table_id: source_table_id.to_string(),
            target_table_id: target_table_id.to_string(),
        }
    }
}

/// A database schema (namespace) found in a diagram
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DbSchema {
    pub id: String,
    pub name: String,
}

impl DbSchema {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { id: name.clone(), name }
    }
}

/// An entity relationship diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub id: String,
    pub name: String,
    pub database_type: DatabaseType,
    #[serde(default)]
    pub tables: Vec<DbTable>,
    #[serde(default)]
    pub relationships: Vec<DbRelationship>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Diagram {
    /// Create an empty diagram with a fresh id
    pub fn new(name: impl Into<String>, database_type: DatabaseType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            database_type,
            tables: Vec::new(),
            relationships: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Placeholder used before any diagram is loaded
    pub fn empty() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: String::new(),
            database_type: DatabaseType::Generic,
            tables: Vec::new(),
            relationships: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Distinct schemas referenced by the tables, in first seen order
    pub fn schemas(&self) -> Vec<DbSchema> {
        let mut schemas: Vec<DbSchema> = Vec::new();
        for schema in self.tables.iter().filter_map(|t| t.schema.as_deref()) {
            if !schemas.iter().any(|s| s.name == schema) {
                schemas.push(DbSchema::new(schema));
            }
        }
        schemas
    }

    pub fn table(&self, table_id: &str) -> Option<&DbTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn table_mut(&mut self, table_id: &str) -> Option<&mut DbTable> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    /// Copy this diagram under a new id, with fresh timestamps
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Image formats supported by the canvas export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Svg => "svg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPG",
            ImageFormat::Svg => "SVG",
        }
    }
}
