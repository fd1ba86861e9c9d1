//! User commands and their dispatch
//!
//! Menu entries, shortcuts, toast buttons and dialog confirmations all
//! produce a `Command`. `CommandDispatcher` maps each one onto the editor
//! services; it keeps no state of its own.

use anyhow::{anyhow, Result};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info};

use super::{AppEvent, EditorServices, ExportDecision, ExportRateLimiter};
use crate::domain::{DatabaseType, DbRelationship, DbTable, Diagram, ImageFormat, Route};
use crate::providers::{
    AlertParams, ConfigUpdate, ExportImageParams, ExportSqlParams, ImportDatabaseParams,
    LayoutProvider, ScrollAction, TableSchemaParams, ThemePreference, Toast,
};

/// Delay before the schema selector opens on narrow screens, so the side
/// panel is visible first
pub const SCHEMA_SELECT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // File
    NewDiagram,
    CreateDiagram {
        name: String,
        database_type: DatabaseType,
    },
    OpenDiagram,
    GoToDiagram(String),
    SaveDiagram,
    RenameDiagram(String),
    ImportDatabase(DatabaseType),
    ImportTables(Vec<DbTable>),
    ExportSql(DatabaseType),
    ExportImage(ImageFormat),
    ExportImageScaled {
        format: ImageFormat,
        scale: u32,
    },
    DeleteDiagram,
    ConfirmDeleteDiagram,
    Exit,

    // Edit
    Undo,
    Redo,
    ClearDiagram,
    ConfirmClearDiagram,
    CreateRelationship,
    AddRelationship {
        source_table_id: String,
        target_table_id: String,
    },
    ChangeTableSchema(String),
    SetTableSchema {
        table_id: String,
        schema: Option<String>,
    },
    FilterSchemas(Option<Vec<String>>),

    // View
    ToggleSidePanel,
    ToggleCardinality,
    ToggleDependencies,
    SetScrollAction(ScrollAction),
    SetTheme(ThemePreference),
    ChangeLanguage(String),
    HideMultiSchemaNotification,
    ChangeSchema {
        desktop: bool,
    },

    // Help
    VisitWebsite,
    ShowExamples,
}

/// Executes commands against the editor services
#[derive(Clone)]
pub struct CommandDispatcher {
    services: EditorServices,
    limiter: ExportRateLimiter,
}

impl CommandDispatcher {
    pub fn new(services: &EditorServices) -> Self {
        Self {
            services: services.clone(),
            limiter: ExportRateLimiter::default(),
        }
    }

    pub async fn dispatch(&self, command: Command) -> Result<()> {
        debug!("Dispatching {:?}", command);
        let s = &self.services;
        let t = &s.translator;

        match command {
            Command::NewDiagram => s.dialogs.open_create_diagram(),
            Command::CreateDiagram {
                name,
                database_type,
            } => {
                let name = if name.trim().is_empty() {
                    t.t("create_diagram_dialog.default_name")
                } else {
                    name.trim().to_string()
                };
                let diagram = Diagram::new(name, database_type);
                s.storage.add_diagram(&diagram).await?;
                s.config
                    .update_config(ConfigUpdate::new().default_diagram_id(diagram.id.clone()))
                    .await?;
                s.dialogs.close_create_diagram();
                info!("Created diagram {} ({})", diagram.id, diagram.name);
                s.events.navigate(Route::Diagram(diagram.id));
            }
            Command::OpenDiagram => s.dialogs.open_open_diagram(),
            Command::GoToDiagram(id) => {
                s.dialogs.close_open_diagram();
                s.events.navigate(Route::Diagram(id));
            }
            Command::SaveDiagram => s.schema.update_diagram_updated_at().await?,
            Command::RenameDiagram(name) => s.schema.update_diagram_name(&name).await?,
            Command::ImportDatabase(database_type) => {
                s.dialogs
                    .open_import_database(ImportDatabaseParams { database_type });
            }
            Command::ImportTables(tables) => {
                let count = tables.len();
                s.schema.add_tables(tables).await?;
                s.dialogs.close_import_database();
                s.toaster.toast(Toast::new(t.t_with(
                    "import_database_dialog.imported",
                    &[("count", count.to_string())],
                )));
            }
            Command::ExportSql(database_type) => self.export_sql(database_type).await?,
            Command::ExportImage(ImageFormat::Svg) => {
                self.export_image(ImageFormat::Svg, 1).await?;
            }
            Command::ExportImage(format) => {
                s.dialogs.open_export_image(ExportImageParams { format });
            }
            Command::ExportImageScaled { format, scale } => {
                s.dialogs.close_export_image();
                self.export_image(format, scale).await?;
            }
            Command::DeleteDiagram => s.dialogs.show_alert(
                AlertParams::new(t.t("delete_diagram_alert.title"))
                    .description(t.t("delete_diagram_alert.description"))
                    .action(t.t("delete_diagram_alert.delete"), Command::ConfirmDeleteDiagram)
                    .close_label(t.t("delete_diagram_alert.cancel")),
            ),
            Command::ConfirmDeleteDiagram => {
                s.schema.delete_diagram().await?;
                s.config
                    .update_config(ConfigUpdate::new().clear_default_diagram_id())
                    .await?;
                s.events.navigate(Route::Home);
            }
            Command::Exit => s.events.emit(AppEvent::Shutdown),

            Command::Undo => s.history.undo().await?,
            Command::Redo => s.history.redo().await?,
            Command::ClearDiagram => s.dialogs.show_alert(
                AlertParams::new(t.t("clear_diagram_alert.title"))
                    .description(t.t("clear_diagram_alert.description"))
                    .action(t.t("clear_diagram_alert.clear"), Command::ConfirmClearDiagram)
                    .close_label(t.t("clear_diagram_alert.cancel")),
            ),
            Command::ConfirmClearDiagram => s.schema.clear_diagram_data().await?,
            Command::CreateRelationship => s.dialogs.open_create_relationship(),
            Command::AddRelationship {
                source_table_id,
                target_table_id,
            } => {
                let diagram = s.schema.current_diagram();
                let name = match (diagram.table(&source_table_id), diagram.table(&target_table_id)) {
                    (Some(source), Some(target)) => format!("{}_{}_fk", source.name, target.name),
                    _ => return Err(anyhow!("Relationship references unknown tables")),
                };
                s.schema
                    .add_relationship(DbRelationship::new(name, &source_table_id, &target_table_id))
                    .await?;
                s.dialogs.close_create_relationship();
            }
            Command::ChangeTableSchema(table_id) => {
                let diagram = s.schema.current_diagram();
                let table = diagram
                    .table(&table_id)
                    .ok_or_else(|| anyhow!("Unknown table {}", table_id))?;
                s.dialogs.open_table_schema(TableSchemaParams {
                    table_id: table.id.clone(),
                    table_name: table.name.clone(),
                    schemas: diagram.schemas(),
                    current_schema: table.schema.clone(),
                });
            }
            Command::SetTableSchema { table_id, schema } => {
                s.schema.update_table_schema(&table_id, schema).await?;
                s.dialogs.close_table_schema();
            }
            Command::FilterSchemas(schemas) => {
                s.schema.filter_schemas(schemas);
                s.layout.close_select_schema();
            }

            Command::ToggleSidePanel => {
                if s.layout.is_side_panel_shown() {
                    s.layout.hide_side_panel();
                } else {
                    s.layout.show_side_panel();
                }
            }
            Command::ToggleCardinality => {
                s.local_config
                    .set_show_cardinality(!s.local_config.show_cardinality());
            }
            Command::ToggleDependencies => {
                s.local_config
                    .set_show_dependencies_on_canvas(!s.local_config.show_dependencies_on_canvas());
            }
            Command::SetScrollAction(action) => s.local_config.set_scroll_action(action),
            Command::SetTheme(theme) => s.theme.set_theme(theme),
            Command::ChangeLanguage(code) => {
                if !t.change_language(&code) {
                    return Err(anyhow!("Unsupported language '{}'", code));
                }
            }
            Command::HideMultiSchemaNotification => {
                s.local_config.set_hide_multi_schema_notification(true);
            }
            Command::ChangeSchema { desktop } => {
                let layout = s.layout.clone();
                tokio::spawn(async move { change_schema(&layout, desktop).await });
            }

            Command::VisitWebsite => {
                let url = s.settings.website_url.clone();
                info!("Visit website: {}", url);
                s.toaster
                    .toast(Toast::new(t.t_with("visit_website_toast", &[("url", url)])));
            }
            Command::ShowExamples => s.events.navigate(Route::Examples),
        }

        Ok(())
    }

    /// Open the SQL export, enforcing the AI export budget when enabled
    async fn export_sql(&self, database_type: DatabaseType) -> Result<()> {
        let s = &self.services;
        if database_type.is_ai_export() && s.settings.limit_ai_exports {
            let history = s.config.config().unwrap_or_default().export_actions;
            match self.limiter.evaluate(&history, Utc::now()) {
                ExportDecision::Blocked => {
                    info!("AI export limit reached");
                    let t = &s.translator;
                    s.dialogs.show_alert(
                        AlertParams::new(t.t("export_sql_limit.title"))
                            .description(t.t_with(
                                "export_sql_limit.description",
                                &[("url", s.settings.repository_url.clone())],
                            ))
                            .close_label(t.t("common.close")),
                    );
                    return Ok(());
                }
                ExportDecision::Allowed(updated) => {
                    s.config
                        .update_config(ConfigUpdate::new().export_actions(updated))
                        .await?;
                }
            }
        }

        s.dialogs.open_export_sql(ExportSqlParams {
            target_database_type: database_type,
        });
        Ok(())
    }

    async fn export_image(&self, format: ImageFormat, scale: u32) -> Result<()> {
        let s = &self.services;
        let path = s.export_image.export_image(format, scale).await?;
        s.toaster.toast(Toast::new(s.translator.t_with(
            "export_image_dialog.exported",
            &[("path", path.display().to_string())],
        )));
        Ok(())
    }
}

/// Show the side panel, then open the schema selector
pub async fn change_schema(layout: &LayoutProvider, desktop: bool) {
    layout.show_side_panel();
    if !desktop {
        tokio::time::sleep(SCHEMA_SELECT_DELAY).await;
    }
    layout.open_select_schema();
}
