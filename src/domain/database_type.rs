use serde::{Deserialize, Serialize};
use std::fmt;

/// Database flavours a diagram can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseType {
    Generic,
    Postgresql,
    Mysql,
    SqlServer,
    Mariadb,
    Sqlite,
}

impl DatabaseType {
    /// Every database type, in menu order
    pub const ALL: [DatabaseType; 6] = [
        DatabaseType::Generic,
        DatabaseType::Postgresql,
        DatabaseType::Mysql,
        DatabaseType::SqlServer,
        DatabaseType::Mariadb,
        DatabaseType::Sqlite,
    ];

    /// Types that can be imported from a live database
    pub const IMPORTABLE: [DatabaseType; 5] = [
        DatabaseType::Postgresql,
        DatabaseType::Mysql,
        DatabaseType::SqlServer,
        DatabaseType::Mariadb,
        DatabaseType::Sqlite,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            DatabaseType::Generic => "Generic",
            DatabaseType::Postgresql => "PostgreSQL",
            DatabaseType::Mysql => "MySQL",
            DatabaseType::SqlServer => "SQL Server",
            DatabaseType::Mariadb => "MariaDB",
            DatabaseType::Sqlite => "SQLite",
        }
    }

    /// Stable identifier used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Generic => "generic",
            DatabaseType::Postgresql => "postgresql",
            DatabaseType::Mysql => "mysql",
            DatabaseType::SqlServer => "sql_server",
            DatabaseType::Mariadb => "mariadb",
            DatabaseType::Sqlite => "sqlite",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|db| db.as_str() == value)
    }

    /// Schema objects land in when none is given
    pub fn default_schema(&self) -> Option<&'static str> {
        match self {
            DatabaseType::Postgresql => Some("public"),
            DatabaseType::SqlServer => Some("dbo"),
            _ => None,
        }
    }

    /// Exporting to a specific dialect goes through the AI assisted path
    pub fn is_ai_export(&self) -> bool {
        !matches!(self, DatabaseType::Generic)
    }
}

impl Default for DatabaseType {
    fn default() -> Self {
        Self::Generic
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_storage_ids() {
        for db in DatabaseType::ALL {
            assert_eq!(DatabaseType::parse(db.as_str()), Some(db));
        }
        assert_eq!(DatabaseType::parse("oracle"), None);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&DatabaseType::SqlServer).unwrap();
        assert_eq!(json, "\"sql_server\"");
    }

    #[test]
    fn test_only_generic_is_not_ai_export() {
        assert!(!DatabaseType::Generic.is_ai_export());
        assert!(DatabaseType::IMPORTABLE.iter().all(|db| db.is_ai_export()));
    }
}
