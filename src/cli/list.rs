//! List command: print stored diagrams without starting the editor

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::config::Settings;
use crate::domain::Diagram;
use crate::storage::StorageProvider;

/// Print stored diagrams, most recently updated first
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Maximum number of diagrams to print
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: ListFormat,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
}

impl ListCommand {
    pub async fn execute(&self, settings: &Settings) -> Result<()> {
        settings.ensure_data_dir()?;
        let storage = StorageProvider::open(settings.database_path()).await?;

        let mut diagrams = storage.list_diagrams().await?;
        diagrams.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        if let Some(limit) = self.limit {
            diagrams.truncate(limit);
        }

        let output = match self.format {
            ListFormat::Text => format_text(&diagrams),
            ListFormat::Json => format_json(&diagrams)?,
        };
        println!("{}", output);
        Ok(())
    }
}

fn format_text(diagrams: &[Diagram]) -> String {
    if diagrams.is_empty() {
        return "No diagrams yet".to_string();
    }
    diagrams
        .iter()
        .map(|diagram| {
            format!(
                "{}  {:<24} {:<10} {:>3} tables  {}",
                diagram.id,
                diagram.name,
                diagram.database_type.label(),
                diagram.tables.len(),
                diagram.updated_at.format("%Y-%m-%d %H:%M")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_json(diagrams: &[Diagram]) -> Result<String> {
    let entries: Vec<_> = diagrams
        .iter()
        .map(|diagram| {
            json!({
                "id": diagram.id,
                "name": diagram.name,
                "database_type": diagram.database_type,
                "tables": diagram.tables.len(),
                "updated_at": diagram.updated_at.to_rfc3339(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatabaseType, DbTable};

    #[test]
    fn test_text_lists_each_diagram() {
        let mut diagram = Diagram::new("shop", DatabaseType::Postgresql);
        diagram.tables.push(DbTable::new("orders", None));
        let text = format_text(&[diagram.clone()]);

        assert!(text.starts_with(&diagram.id));
        assert!(text.contains("PostgreSQL"));
        assert!(text.contains("1 tables"));
        assert_eq!(format_text(&[]), "No diagrams yet");
    }

    #[test]
    fn test_json_uses_storage_identifiers() {
        let diagram = Diagram::new("shop", DatabaseType::SqlServer);
        let value: serde_json::Value =
            serde_json::from_str(&format_json(&[diagram]).unwrap()).unwrap();
        assert_eq!(value[0]["database_type"], "sql_server");
        assert_eq!(value[0]["tables"], 0);
    }
}
