//! Dialog views and the layer that mounts them
//!
//! `DialogLayer` mirrors the dialog registry: a view is mounted when its
//! kind opens and dropped when it closes. Views are drawn bottom to top and
//! only the top view receives keys. Esc closes the top view through the
//! registry, never by unmounting it directly.

mod alert;
mod create_diagram;
mod create_relationship;
mod export_image;
mod export_sql;
mod import_database;
mod open_diagram;
mod table_schema;

pub use alert::AlertDialog;
pub use create_diagram::CreateDiagramDialog;
pub use create_relationship::CreateRelationshipDialog;
pub use export_image::ExportImageDialog;
pub use export_sql::ExportSqlDialog;
pub use import_database::ImportDatabaseDialog;
pub use open_diagram::OpenDiagramDialog;
pub use table_schema::TableSchemaDialog;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    widgets::{Block, BorderType, Borders, Clear},
};
use tracing::debug;

use super::Component;
use crate::app::{Command, EditorServices};
use crate::providers::{DialogKind, DialogState};
use crate::sql::export_sql;
use crate::tui::{styles::Theme, utils::layout::centered_rect, Frame};

/// A mounted dialog
pub trait DialogView: Component + Send + Sync {
    fn kind(&self) -> DialogKind;

    /// Preferred (width, height) in cells
    fn size(&self) -> (u16, u16);
}

/// Draw the dialog frame and return the inner area
pub(crate) fn render_frame(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Rect {
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.focused_border_style())
        .style(theme.base_style());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    inner
}

pub struct DialogLayer {
    services: EditorServices,
    views: Vec<Box<dyn DialogView>>,
}

impl DialogLayer {
    pub fn new(services: &EditorServices) -> Self {
        Self {
            services: services.clone(),
            views: Vec::new(),
        }
    }

    /// Whether any dialog is mounted
    pub fn is_active(&self) -> bool {
        !self.views.is_empty()
    }

    /// Kinds mounted, bottom to top
    pub fn mounted(&self) -> Vec<DialogKind> {
        self.views.iter().map(|v| v.kind()).collect()
    }

    /// Follow a registry change
    ///
    /// Reopening a kind that is already mounted remounts it with the new
    /// params.
    pub async fn on_dialog_changed(&mut self, kind: DialogKind, open: bool) -> Result<()> {
        let state = self.services.dialogs.state();
        self.views
            .retain(|view| view.kind() != kind && state.is_open(view.kind()));

        if open && state.is_open(kind) {
            if let Some(view) = self.mount(kind, &state).await? {
                debug!("Mounted dialog {:?}", kind);
                self.views.push(view);
            }
        }
        Ok(())
    }

    async fn mount(&self, kind: DialogKind, state: &DialogState) -> Result<Option<Box<dyn DialogView>>> {
        let s = &self.services;
        let view: Box<dyn DialogView> = match kind {
            DialogKind::CreateDiagram => Box::new(CreateDiagramDialog::new(s)),
            DialogKind::OpenDiagram => {
                let diagrams = s.storage.list_diagrams().await?;
                Box::new(OpenDiagramDialog::new(s, diagrams))
            }
            DialogKind::ExportSql => {
                let Some(params) = state.export_sql.params.clone() else {
                    return Ok(None);
                };
                let script = export_sql(&s.schema.current_diagram(), params.target_database_type);
                Box::new(ExportSqlDialog::new(s, params, script))
            }
            DialogKind::Alert => {
                let Some(params) = state.alert.params.clone() else {
                    return Ok(None);
                };
                Box::new(AlertDialog::new(s, params))
            }
            DialogKind::CreateRelationship => Box::new(CreateRelationshipDialog::new(
                s,
                s.schema.current_diagram().tables,
            )),
            DialogKind::ImportDatabase => {
                let Some(params) = state.import_database.params.clone() else {
                    return Ok(None);
                };
                Box::new(ImportDatabaseDialog::new(s, params))
            }
            DialogKind::TableSchema => {
                let Some(params) = state.table_schema.params.clone() else {
                    return Ok(None);
                };
                Box::new(TableSchemaDialog::new(s, params))
            }
            DialogKind::ExportImage => {
                let Some(params) = state.export_image.params.clone() else {
                    return Ok(None);
                };
                Box::new(ExportImageDialog::new(s, params))
            }
        };
        Ok(Some(view))
    }

    /// Route a key to the top dialog
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Option<Command> {
        let top = self.views.last_mut()?;
        if event.code == KeyCode::Esc {
            self.services.dialogs.close(top.kind());
            return None;
        }
        top.handle_key_event(event)
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Some(top) = self.views.last_mut() {
            top.handle_paste(text);
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        for view in self.views.iter_mut() {
            let (width, height) = view.size();
            let rect = centered_rect(width, height, area);
            view.render(frame, rect, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventSink;
    use crate::config::Settings;
    use crate::providers::{AlertParams, ExportImageParams};
    use crate::domain::ImageFormat;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    async fn services(dir: &tempfile::TempDir) -> EditorServices {
        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        EditorServices::compose(Arc::new(settings), EventSink::detached())
            .await
            .unwrap()
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_layer_can_be_shared_across_awaits() {
        assert_send_sync::<DialogLayer>();
        assert_send_sync::<Box<dyn DialogView>>();
    }

    #[tokio::test]
    async fn test_layer_follows_registry() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(&dir).await;
        let mut layer = DialogLayer::new(&services);

        services.dialogs.open_create_diagram();
        layer.on_dialog_changed(DialogKind::CreateDiagram, true).await.unwrap();
        services.dialogs.show_alert(AlertParams::new("Heads up"));
        layer.on_dialog_changed(DialogKind::Alert, true).await.unwrap();
        assert_eq!(layer.mounted(), vec![DialogKind::CreateDiagram, DialogKind::Alert]);

        // Esc closes the top dialog through the registry
        layer.handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!services.dialogs.is_open(DialogKind::Alert));
        assert!(services.dialogs.is_open(DialogKind::CreateDiagram));

        layer.on_dialog_changed(DialogKind::Alert, false).await.unwrap();
        assert_eq!(layer.mounted(), vec![DialogKind::CreateDiagram]);
    }

    #[tokio::test]
    async fn test_stale_open_event_mounts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(&dir).await;
        let mut layer = DialogLayer::new(&services);

        services.dialogs.open_export_image(ExportImageParams {
            format: ImageFormat::Png,
        });
        services.dialogs.close_export_image();
        layer.on_dialog_changed(DialogKind::ExportImage, true).await.unwrap();
        assert!(!layer.is_active());
    }
}
