use regex::Regex;
use std::sync::OnceLock;

use crate::domain::{DatabaseType, DbField, DbTable, Diagram};

/// Identifiers that need no quoting in a generic script
fn plain_identifier() -> &'static Regex {
    static PLAIN: OnceLock<Regex> = OnceLock::new();
    PLAIN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("literal pattern"))
}

/// Quote `name` for `database_type`
///
/// Generic scripts only quote identifiers that need it.
pub fn quote_identifier(name: &str, database_type: DatabaseType) -> String {
    match database_type {
        DatabaseType::Mysql | DatabaseType::Mariadb => format!("`{}`", name.replace('`', "``")),
        DatabaseType::SqlServer => format!("[{}]", name.replace(']', "]]")),
        DatabaseType::Postgresql | DatabaseType::Sqlite => {
            format!("\"{}\"", name.replace('"', "\"\""))
        }
        DatabaseType::Generic => {
            if plain_identifier().is_match(name) {
                name.to_string()
            } else {
                format!("\"{}\"", name.replace('"', "\"\""))
            }
        }
    }
}

fn table_name(table: &DbTable, database_type: DatabaseType) -> String {
    match (&table.schema, database_type) {
        // SQLite has no schemas
        (_, DatabaseType::Sqlite) | (None, _) => quote_identifier(&table.name, database_type),
        (Some(schema), _) => format!(
            "{}.{}",
            quote_identifier(schema, database_type),
            quote_identifier(&table.name, database_type)
        ),
    }
}

fn column(field: &DbField, database_type: DatabaseType) -> String {
    let mut line = format!(
        "    {} {}",
        quote_identifier(&field.name, database_type),
        field.data_type
    );
    if !field.nullable {
        line.push_str(" NOT NULL");
    }
    line
}

/// DDL script creating every table of `diagram` in `database_type`
pub fn export_sql(diagram: &Diagram, database_type: DatabaseType) -> String {
    let mut script = format!("-- {} ({})\n", diagram.name, database_type.label());

    if matches!(database_type, DatabaseType::Postgresql | DatabaseType::SqlServer) {
        for schema in diagram.schemas() {
            let quoted = quote_identifier(&schema.name, database_type);
            match database_type {
                DatabaseType::SqlServer => script.push_str(&format!("CREATE SCHEMA {};\n", quoted)),
                _ => script.push_str(&format!("CREATE SCHEMA IF NOT EXISTS {};\n", quoted)),
            }
        }
    }

    for table in &diagram.tables {
        let mut lines: Vec<String> = table.fields.iter().map(|f| column(f, database_type)).collect();
        let keys: Vec<String> = table
            .fields
            .iter()
            .filter(|f| f.primary_key)
            .map(|f| quote_identifier(&f.name, database_type))
            .collect();
        if !keys.is_empty() {
            lines.push(format!("    PRIMARY KEY ({})", keys.join(", ")));
        }

        script.push_str(&format!(
            "\nCREATE TABLE {} (\n{}\n);\n",
            table_name(table, database_type),
            lines.join(",\n")
        ));
    }

    if !diagram.relationships.is_empty() {
        script.push('\n');
    }
    for relationship in &diagram.relationships {
        let source = diagram.table(&relationship.source_table_id);
        let target = diagram.table(&relationship.target_table_id);
        if let (Some(source), Some(target)) = (source, target) {
            script.push_str(&format!(
                "-- {}: {} -> {}\n",
                relationship.name,
                source.qualified_name(),
                target.qualified_name()
            ));
        }
    }

    script
}
