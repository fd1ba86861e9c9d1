use serde::Deserialize;

use crate::domain::{DatabaseType, DbField, DbTable};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("no tables found")]
    Empty,

    #[error("table #{0} has no name")]
    MissingTableName(usize),

    #[error("column #{column} of table '{table}' has no name")]
    MissingColumnName { table: String, column: usize },

    #[error("column '{column}' of table '{table}' has no type")]
    MissingColumnType { table: String, column: String },

    #[error("table '{0}' has no columns")]
    NoColumns(String),
}

#[derive(Debug, Deserialize)]
struct Metadata {
    #[serde(default)]
    tables: Vec<TableInfo>,
}

#[derive(Debug, Deserialize)]
struct TableInfo {
    #[serde(default)]
    schema: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    columns: Vec<ColumnInfo>,
}

#[derive(Debug, Deserialize)]
struct ColumnInfo {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    data_type: String,
    #[serde(default = "nullable_default")]
    nullable: bool,
    #[serde(default)]
    primary_key: bool,
}

fn nullable_default() -> bool {
    true
}

/// Parse pasted database metadata into new tables
pub fn import_metadata(input: &str, database_type: DatabaseType) -> Result<Vec<DbTable>, ImportError> {
    let metadata: Metadata = serde_json::from_str(input.trim())?;
    if metadata.tables.is_empty() {
        return Err(ImportError::Empty);
    }

    metadata
        .tables
        .into_iter()
        .enumerate()
        .map(|(index, info)| {
            let name = info.name.trim().to_string();
            if name.is_empty() {
                return Err(ImportError::MissingTableName(index + 1));
            }

            let schema = match database_type {
                DatabaseType::Sqlite => None,
                _ => info.schema.filter(|s| !s.is_empty()),
            };
            if info.columns.is_empty() {
                return Err(ImportError::NoColumns(name));
            }
            let mut table = DbTable::new(name.clone(), schema);
            for (column, col) in info.columns.into_iter().enumerate() {
                let column_name = col.name.trim();
                if column_name.is_empty() {
                    return Err(ImportError::MissingColumnName {
                        table: name,
                        column: column + 1,
                    });
                }
                let data_type = col.data_type.trim();
                if data_type.is_empty() {
                    return Err(ImportError::MissingColumnType {
                        table: name,
                        column: column_name.to_string(),
                    });
                }
                let mut field = DbField::new(column_name, data_type);
                field.nullable = col.nullable && !col.primary_key;
                field.primary_key = col.primary_key;
                table.fields.push(field);
            }
            Ok(table)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imports_tables_and_columns() {
        let input = r#"{"tables":[{"schema":"public","name":"users","columns":[
            {"name":"id","type":"bigint","primary_key":true},
            {"name":"email","type":"text","nullable":false}
        ]}]}"#;
        let tables = import_metadata(input, DatabaseType::Postgresql).unwrap();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].schema.as_deref(), Some("public"));
        assert!(tables[0].fields[0].primary_key);
        assert!(!tables[0].fields[0].nullable);
        assert_eq!(tables[0].fields[1].data_type, "text");
    }

    #[test]
    fn test_reports_parse_errors() {
        assert!(matches!(
            import_metadata("{not json", DatabaseType::Mysql),
            Err(ImportError::Json(_))
        ));
        assert!(matches!(
            import_metadata(r#"{"tables":[]}"#, DatabaseType::Mysql),
            Err(ImportError::Empty)
        ));
        assert!(matches!(
            import_metadata(r#"{"tables":[{"name":""}]}"#, DatabaseType::Mysql),
            Err(ImportError::MissingTableName(1))
        ));
    }

    #[test]
    fn test_sqlite_ignores_schema() {
        let tables =
            import_metadata(
                r#"{"tables":[{"schema":"main","name":"t","columns":[{"name":"id","type":"integer"}]}]}"#,
                DatabaseType::Sqlite,
            )
            .unwrap();
        assert_eq!(tables[0].schema, None);
    }

    #[test]
    fn test_rejects_columns_without_type_and_empty_tables() {
        let untyped = r#"{"tables":[{"name":"users","columns":[{"name":"id"}]}]}"#;
        let err = import_metadata(untyped, DatabaseType::Postgresql).unwrap_err();
        assert!(matches!(
            &err,
            ImportError::MissingColumnType { table, column } if table == "users" && column == "id"
        ));
        assert_eq!(err.to_string(), "column 'id' of table 'users' has no type");

        let blank = r#"{"tables":[{"name":"users","columns":[{"name":"id","type":"  "}]}]}"#;
        assert!(matches!(
            import_metadata(blank, DatabaseType::Mysql),
            Err(ImportError::MissingColumnType { .. })
        ));

        let empty = r#"{"tables":[{"name":"audit","columns":[]}]}"#;
        assert!(matches!(
            import_metadata(empty, DatabaseType::Mysql),
            Err(ImportError::NoColumns(table)) if table == "audit"
        ));
    }

    #[test]
    fn test_imported_tables_export_valid_columns() {
        let input = r#"{"tables":[{"name":"t","columns":[{"name":"id","type":" int ","primary_key":true}]}]}"#;
        let mut diagram = crate::domain::Diagram::new("d", DatabaseType::Mysql);
        diagram.tables = import_metadata(input, DatabaseType::Mysql).unwrap();

        let script = crate::sql::export_sql(&diagram, DatabaseType::Mysql);
        assert!(script.contains("`id` int NOT NULL"));
        assert!(!script.contains("(\n\n)"));
    }
}
