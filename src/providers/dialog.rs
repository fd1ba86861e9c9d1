//! Dialog registry
//!
//! `DialogProvider` owns one slot per dialog kind for the editor session.
//! Components never touch the slots directly; they call the open/close
//! operations of a `DialogHandle`. A handle built with `Default` (or
//! `DialogHandle::detached`) is not connected to any provider and every
//! operation on it does nothing, which keeps components usable in
//! isolation.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::app::{AppEvent, Command, EventSink};
use crate::domain::{DatabaseType, DbSchema, ImageFormat};

/// Modal workflows of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    CreateDiagram,
    OpenDiagram,
    ExportSql,
    Alert,
    CreateRelationship,
    ImportDatabase,
    TableSchema,
    ExportImage,
}

impl DialogKind {
    pub const ALL: [DialogKind; 8] = [
        DialogKind::CreateDiagram,
        DialogKind::OpenDiagram,
        DialogKind::ExportSql,
        DialogKind::Alert,
        DialogKind::CreateRelationship,
        DialogKind::ImportDatabase,
        DialogKind::TableSchema,
        DialogKind::ExportImage,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSqlParams {
    pub target_database_type: DatabaseType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDatabaseParams {
    pub database_type: DatabaseType,
}

/// Content of the alert dialog
#[derive(Debug, Clone, PartialEq)]
pub struct AlertParams {
    pub title: String,
    pub description: Option<String>,
    pub action_label: Option<String>,
    pub close_label: String,
    /// Dispatched when the action button is pressed
    pub on_action: Option<Command>,
}

impl AlertParams {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            action_label: None,
            close_label: "Close".to_string(),
            on_action: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn action(mut self, label: impl Into<String>, command: Command) -> Self {
        self.action_label = Some(label.into());
        self.on_action = Some(command);
        self
    }

    pub fn close_label(mut self, label: impl Into<String>) -> Self {
        self.close_label = label.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSchemaParams {
    pub table_id: String,
    pub table_name: String,
    pub schemas: Vec<DbSchema>,
    pub current_schema: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportImageParams {
    pub format: ImageFormat,
}

/// Visibility of one dialog kind plus the params it was last opened with
///
/// Params survive a close so the closing frame still renders the same
/// content; every kind that takes params requires fresh ones on open.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogSlot<P> {
    pub open: bool,
    pub params: Option<P>,
}

impl<P> Default for DialogSlot<P> {
    fn default() -> Self {
        Self {
            open: false,
            params: None,
        }
    }
}

impl<P> DialogSlot<P> {
    fn show(&mut self, params: P) {
        self.open = true;
        self.params = Some(params);
    }
}

/// Snapshot of every dialog slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogState {
    pub create_diagram: DialogSlot<()>,
    pub open_diagram: DialogSlot<()>,
    pub export_sql: DialogSlot<ExportSqlParams>,
    pub alert: DialogSlot<AlertParams>,
    pub create_relationship: DialogSlot<()>,
    pub import_database: DialogSlot<ImportDatabaseParams>,
    pub table_schema: DialogSlot<TableSchemaParams>,
    pub export_image: DialogSlot<ExportImageParams>,
    /// Open kinds, most recently opened last
    stack: Vec<DialogKind>,
}

impl DialogState {
    pub fn is_open(&self, kind: DialogKind) -> bool {
        match kind {
            DialogKind::CreateDiagram => self.create_diagram.open,
            DialogKind::OpenDiagram => self.open_diagram.open,
            DialogKind::ExportSql => self.export_sql.open,
            DialogKind::Alert => self.alert.open,
            DialogKind::CreateRelationship => self.create_relationship.open,
            DialogKind::ImportDatabase => self.import_database.open,
            DialogKind::TableSchema => self.table_schema.open,
            DialogKind::ExportImage => self.export_image.open,
        }
    }

    /// Open kinds from bottom to top
    pub fn open_kinds(&self) -> &[DialogKind] {
        &self.stack
    }

    /// The open dialog drawn last, which receives keyboard input
    pub fn top(&self) -> Option<DialogKind> {
        self.stack.last().copied()
    }

    fn raise(&mut self, kind: DialogKind) {
        self.stack.retain(|k| *k != kind);
        self.stack.push(kind);
    }

    /// Returns false when `kind` was already closed
    fn close(&mut self, kind: DialogKind) -> bool {
        let open = match kind {
            DialogKind::CreateDiagram => &mut self.create_diagram.open,
            DialogKind::OpenDiagram => &mut self.open_diagram.open,
            DialogKind::ExportSql => &mut self.export_sql.open,
            DialogKind::Alert => &mut self.alert.open,
            DialogKind::CreateRelationship => &mut self.create_relationship.open,
            DialogKind::ImportDatabase => &mut self.import_database.open,
            DialogKind::TableSchema => &mut self.table_schema.open,
            DialogKind::ExportImage => &mut self.export_image.open,
        };
        if !*open {
            return false;
        }
        *open = false;
        self.stack.retain(|k| *k != kind);
        true
    }
}

struct DialogInner {
    state: RwLock<DialogState>,
    events: EventSink,
}

/// Owner of the dialog slots for one editor session
pub struct DialogProvider {
    inner: Arc<DialogInner>,
}

impl DialogProvider {
    pub fn new(events: EventSink) -> Self {
        Self {
            inner: Arc::new(DialogInner {
                state: RwLock::new(DialogState::default()),
                events,
            }),
        }
    }

    /// Handle sharing this provider's slots
    pub fn handle(&self) -> DialogHandle {
        DialogHandle {
            inner: Some(self.inner.clone()),
        }
    }

    pub fn state(&self) -> DialogState {
        self.inner.state.read().clone()
    }
}

/// Open/close operations for every dialog kind
#[derive(Clone, Default)]
pub struct DialogHandle {
    inner: Option<Arc<DialogInner>>,
}

impl DialogHandle {
    /// Handle with no provider behind it
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_detached(&self) -> bool {
        self.inner.is_none()
    }

    /// Whether both handles talk to the same provider
    pub fn same_provider(&self, other: &DialogHandle) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Current slots; all closed for a detached handle
    pub fn state(&self) -> DialogState {
        self.inner
            .as_ref()
            .map(|inner| inner.state.read().clone())
            .unwrap_or_default()
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.inner
            .as_ref()
            .map(|inner| inner.state.read().is_open(kind))
            .unwrap_or(false)
    }

    pub fn open_create_diagram(&self) {
        self.open(DialogKind::CreateDiagram, |state| state.create_diagram.show(()));
    }

    pub fn close_create_diagram(&self) {
        self.close(DialogKind::CreateDiagram);
    }

    pub fn open_open_diagram(&self) {
        self.open(DialogKind::OpenDiagram, |state| state.open_diagram.show(()));
    }

    pub fn close_open_diagram(&self) {
        self.close(DialogKind::OpenDiagram);
    }

    pub fn open_export_sql(&self, params: ExportSqlParams) {
        self.open(DialogKind::ExportSql, |state| state.export_sql.show(params));
    }

    pub fn close_export_sql(&self) {
        self.close(DialogKind::ExportSql);
    }

    pub fn show_alert(&self, params: AlertParams) {
        self.open(DialogKind::Alert, |state| state.alert.show(params));
    }

    pub fn close_alert(&self) {
        self.close(DialogKind::Alert);
    }

    pub fn open_create_relationship(&self) {
        self.open(DialogKind::CreateRelationship, |state| {
            state.create_relationship.show(())
        });
    }

    pub fn close_create_relationship(&self) {
        self.close(DialogKind::CreateRelationship);
    }

    pub fn open_import_database(&self, params: ImportDatabaseParams) {
        self.open(DialogKind::ImportDatabase, |state| {
            state.import_database.show(params)
        });
    }

    pub fn close_import_database(&self) {
        self.close(DialogKind::ImportDatabase);
    }

    pub fn open_table_schema(&self, params: TableSchemaParams) {
        self.open(DialogKind::TableSchema, |state| state.table_schema.show(params));
    }

    pub fn close_table_schema(&self) {
        self.close(DialogKind::TableSchema);
    }

    pub fn open_export_image(&self, params: ExportImageParams) {
        self.open(DialogKind::ExportImage, |state| state.export_image.show(params));
    }

    pub fn close_export_image(&self) {
        self.close(DialogKind::ExportImage);
    }

    /// Close whichever kind is given; used by the bound cancel of each dialog
    pub fn close(&self, kind: DialogKind) {
        let Some(inner) = &self.inner else {
            return;
        };
        let changed = inner.state.write().close(kind);
        if changed {
            debug!("Closed dialog {:?}", kind);
            inner.events.emit(AppEvent::DialogChanged { kind, open: false });
        }
    }

    fn open(&self, kind: DialogKind, apply: impl FnOnce(&mut DialogState)) {
        let Some(inner) = &self.inner else {
            return;
        };
        {
            let mut state = inner.state.write();
            apply(&mut state);
            state.raise(kind);
        }
        debug!("Opened dialog {:?}", kind);
        inner.events.emit(AppEvent::DialogChanged { kind, open: true });
    }
}

impl std::fmt::Debug for DialogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogHandle")
            .field("detached", &self.is_detached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_schema_params() -> TableSchemaParams {
        TableSchemaParams {
            table_id: "t1".into(),
            table_name: "users".into(),
            schemas: vec![DbSchema::new("public"), DbSchema::new("auth")],
            current_schema: Some("public".into()),
        }
    }

    /// Open every kind through the handle with representative params
    fn open_kind(handle: &DialogHandle, kind: DialogKind) {
        match kind {
            DialogKind::CreateDiagram => handle.open_create_diagram(),
            DialogKind::OpenDiagram => handle.open_open_diagram(),
            DialogKind::ExportSql => handle.open_export_sql(ExportSqlParams {
                target_database_type: DatabaseType::Mysql,
            }),
            DialogKind::Alert => handle.show_alert(AlertParams::new("Heads up")),
            DialogKind::CreateRelationship => handle.open_create_relationship(),
            DialogKind::ImportDatabase => handle.open_import_database(ImportDatabaseParams {
                database_type: DatabaseType::Sqlite,
            }),
            DialogKind::TableSchema => handle.open_table_schema(table_schema_params()),
            DialogKind::ExportImage => handle.open_export_image(ExportImageParams {
                format: ImageFormat::Png,
            }),
        }
    }

    fn close_kind(handle: &DialogHandle, kind: DialogKind) {
        match kind {
            DialogKind::CreateDiagram => handle.close_create_diagram(),
            DialogKind::OpenDiagram => handle.close_open_diagram(),
            DialogKind::ExportSql => handle.close_export_sql(),
            DialogKind::Alert => handle.close_alert(),
            DialogKind::CreateRelationship => handle.close_create_relationship(),
            DialogKind::ImportDatabase => handle.close_import_database(),
            DialogKind::TableSchema => handle.close_table_schema(),
            DialogKind::ExportImage => handle.close_export_image(),
        }
    }

    #[test]
    fn test_open_then_close_every_kind() {
        let provider = DialogProvider::new(EventSink::detached());
        let handle = provider.handle();

        for kind in DialogKind::ALL {
            open_kind(&handle, kind);
            assert!(handle.is_open(kind), "{:?} should be open", kind);
            close_kind(&handle, kind);
            assert!(!handle.is_open(kind), "{:?} should be closed", kind);
        }
    }

    #[test]
    fn test_open_stores_exact_params() {
        let provider = DialogProvider::new(EventSink::detached());
        let handle = provider.handle();

        handle.open_export_sql(ExportSqlParams {
            target_database_type: DatabaseType::Postgresql,
        });
        handle.open_table_schema(table_schema_params());
        let alert = AlertParams::new("Delete Diagram")
            .description("This cannot be undone")
            .action("Delete", Command::ConfirmDeleteDiagram);
        handle.show_alert(alert.clone());

        let state = provider.state();
        assert_eq!(
            state.export_sql.params,
            Some(ExportSqlParams {
                target_database_type: DatabaseType::Postgresql
            })
        );
        assert_eq!(state.table_schema.params, Some(table_schema_params()));
        assert_eq!(state.alert.params, Some(alert));
        assert_eq!(state.alert.params.as_ref().unwrap().close_label, "Close");
    }

    #[test]
    fn test_reopen_replaces_params_in_place() {
        let provider = DialogProvider::new(EventSink::detached());
        let handle = provider.handle();

        handle.open_import_database(ImportDatabaseParams {
            database_type: DatabaseType::Mysql,
        });
        handle.open_import_database(ImportDatabaseParams {
            database_type: DatabaseType::Mariadb,
        });

        let state = provider.state();
        assert!(state.import_database.open);
        assert_eq!(
            state.import_database.params,
            Some(ImportDatabaseParams {
                database_type: DatabaseType::Mariadb
            })
        );
        assert_eq!(state.open_kinds(), &[DialogKind::ImportDatabase]);
    }

    #[test]
    fn test_close_keeps_params() {
        let provider = DialogProvider::new(EventSink::detached());
        let handle = provider.handle();

        handle.open_export_image(ExportImageParams {
            format: ImageFormat::Jpeg,
        });
        handle.close_export_image();

        let state = provider.state();
        assert!(!state.export_image.open);
        assert_eq!(
            state.export_image.params,
            Some(ExportImageParams {
                format: ImageFormat::Jpeg
            })
        );
    }

    #[test]
    fn test_close_on_closed_kind_is_noop() {
        let (sink, mut rx) = EventSink::channel();
        let provider = DialogProvider::new(sink);
        let handle = provider.handle();

        let before = provider.state();
        for kind in DialogKind::ALL {
            close_kind(&handle, kind);
        }
        assert_eq!(provider.state(), before);
        assert!(rx.try_recv().is_err());

        handle.open_open_diagram();
        handle.close_open_diagram();
        let after_first_close = provider.state();
        handle.close_open_diagram();
        assert_eq!(provider.state(), after_first_close);
    }

    #[test]
    fn test_open_never_touches_other_kinds() {
        for kind in DialogKind::ALL {
            let provider = DialogProvider::new(EventSink::detached());
            let handle = provider.handle();

            // Start with every other kind open so a stray close would show
            for other in DialogKind::ALL.into_iter().filter(|k| *k != kind) {
                open_kind(&handle, other);
            }
            let before = provider.state();

            open_kind(&handle, kind);
            let after = provider.state();
            for other in DialogKind::ALL.into_iter().filter(|k| *k != kind) {
                assert_eq!(slot(&before, other), slot(&after, other), "{:?}", other);
            }
        }
    }

    /// Visibility and params of one kind, comparable across kinds
    fn slot(state: &DialogState, kind: DialogKind) -> (bool, String) {
        let params = match kind {
            DialogKind::CreateDiagram => format!("{:?}", state.create_diagram.params),
            DialogKind::OpenDiagram => format!("{:?}", state.open_diagram.params),
            DialogKind::ExportSql => format!("{:?}", state.export_sql.params),
            DialogKind::Alert => format!("{:?}", state.alert.params),
            DialogKind::CreateRelationship => format!("{:?}", state.create_relationship.params),
            DialogKind::ImportDatabase => format!("{:?}", state.import_database.params),
            DialogKind::TableSchema => format!("{:?}", state.table_schema.params),
            DialogKind::ExportImage => format!("{:?}", state.export_image.params),
        };
        (state.is_open(kind), params)
    }

    #[test]
    fn test_close_only_touches_its_kind() {
        let provider = DialogProvider::new(EventSink::detached());
        let handle = provider.handle();
        for kind in DialogKind::ALL {
            open_kind(&handle, kind);
        }

        handle.close_alert();
        let state = provider.state();
        for kind in DialogKind::ALL {
            assert_eq!(state.is_open(kind), kind != DialogKind::Alert);
        }
    }

    #[test]
    fn test_most_recent_open_is_on_top() {
        let provider = DialogProvider::new(EventSink::detached());
        let handle = provider.handle();

        handle.open_create_diagram();
        handle.show_alert(AlertParams::new("Export SQL Limit Reached"));
        assert_eq!(provider.state().top(), Some(DialogKind::Alert));

        handle.open_create_diagram();
        assert_eq!(provider.state().top(), Some(DialogKind::CreateDiagram));

        handle.close_create_diagram();
        assert_eq!(provider.state().top(), Some(DialogKind::Alert));
    }

    #[test]
    fn test_detached_handle_is_inert() {
        let handle = DialogHandle::default();
        for kind in DialogKind::ALL {
            open_kind(&handle, kind);
            assert!(!handle.is_open(kind));
            close_kind(&handle, kind);
        }
        assert_eq!(handle.state(), DialogState::default());
        assert!(handle.is_detached());
    }

    #[test]
    fn test_handles_share_provider_identity() {
        let provider = DialogProvider::new(EventSink::detached());
        let a = provider.handle();
        let b = provider.handle();
        assert!(a.same_provider(&b.clone()));

        a.open_open_diagram();
        assert!(b.is_open(DialogKind::OpenDiagram));

        let other = DialogProvider::new(EventSink::detached());
        assert!(!a.same_provider(&other.handle()));
        assert!(!DialogHandle::detached().same_provider(&DialogHandle::detached()));
    }

    #[test]
    fn test_changes_are_published() {
        let (sink, mut rx) = EventSink::channel();
        let provider = DialogProvider::new(sink);
        let handle = provider.handle();

        handle.open_create_relationship();
        handle.close_create_relationship();

        assert_eq!(
            rx.try_recv().unwrap(),
            AppEvent::DialogChanged {
                kind: DialogKind::CreateRelationship,
                open: true
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            AppEvent::DialogChanged {
                kind: DialogKind::CreateRelationship,
                open: false
            }
        );
    }
}
