//! Service composition and command dispatch
//!
//! `EditorServices::compose` builds every editor service in dependency
//! order. Constructors take the services they depend on by reference, so a
//! layer cannot be built before the layers it needs.

mod commands;
mod events;
mod rate_limit;

pub use commands::*;
pub use events::*;
pub use rate_limit::*;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Settings;
use crate::i18n::Translator;
use crate::providers::{
    CanvasState, ConfigProvider, DialogHandle, DialogProvider, ExportImageProvider,
    FullScreenLoader, HistoryProvider, KeyboardShortcuts, LayoutProvider, LocalConfigProvider,
    RedoUndoStack, SchemaStore, ThemeProvider, Toaster,
};
use crate::storage::StorageProvider;
use crate::tui::KeyMap;

/// Every service of an editor session
#[derive(Clone)]
pub struct EditorServices {
    pub settings: Arc<Settings>,
    pub events: EventSink,
    pub local_config: LocalConfigProvider,
    pub theme: ThemeProvider,
    pub loader: FullScreenLoader,
    pub layout: LayoutProvider,
    pub storage: StorageProvider,
    pub config: ConfigProvider,
    pub redo_undo: RedoUndoStack,
    pub schema: SchemaStore,
    pub history: HistoryProvider,
    pub canvas: CanvasState,
    pub export_image: ExportImageProvider,
    pub dialogs: DialogHandle,
    pub shortcuts: KeyboardShortcuts,
    pub translator: Translator,
    pub toaster: Toaster,
}

impl EditorServices {
    pub async fn compose(settings: Arc<Settings>, events: EventSink) -> Result<Self> {
        debug!("Composing editor services in {}", settings.data_dir.display());
        settings.ensure_data_dir()?;

        // 1-2: preferences, then the theme that reads them
        let local_config =
            LocalConfigProvider::load(settings.local_config_path(), events.clone()).await?;
        let theme = ThemeProvider::new(&local_config, events.clone());

        // 3-4: independent view state
        let loader = FullScreenLoader::new(events.clone());
        let layout = LayoutProvider::new(events.clone());

        // 5-6: storage and the config kept in it
        let storage = StorageProvider::open(settings.database_path()).await?;
        let config = ConfigProvider::new(&storage, events.clone());
        config.load().await?;

        // 7-8: history and diagram state
        let redo_undo = RedoUndoStack::new(events.clone());
        let schema = SchemaStore::new(&storage, &redo_undo, events.clone());
        let history = HistoryProvider::new(&redo_undo, &schema);

        // 9-10: canvas and image export
        let canvas = CanvasState::new(events.clone());
        let export_image =
            ExportImageProvider::new(&canvas, &schema, settings.export_dir(), events.clone());

        // 11-12: dialogs, then the global shortcuts
        let dialogs = DialogProvider::new(events.clone()).handle();
        let shortcuts = KeyboardShortcuts::new(KeyMap::default());

        let translator = Translator::new(&local_config);
        let toaster = Toaster::new(events.clone());

        info!("Editor services ready");
        Ok(Self {
            settings,
            events,
            local_config,
            theme,
            loader,
            layout,
            storage,
            config,
            redo_undo,
            schema,
            history,
            canvas,
            export_image,
            dialogs,
            shortcuts,
            translator,
            toaster,
        })
    }
}

/// Reduced service set of the examples gallery
#[derive(Clone)]
pub struct GalleryServices {
    pub settings: Arc<Settings>,
    pub events: EventSink,
    pub local_config: LocalConfigProvider,
    pub storage: StorageProvider,
    pub theme: ThemeProvider,
    pub translator: Translator,
}

impl GalleryServices {
    pub async fn compose(settings: Arc<Settings>, events: EventSink) -> Result<Self> {
        settings.ensure_data_dir()?;

        let local_config =
            LocalConfigProvider::load(settings.local_config_path(), events.clone()).await?;
        let storage = StorageProvider::open(settings.database_path()).await?;
        let theme = ThemeProvider::new(&local_config, events.clone());
        let translator = Translator::new(&local_config);

        Ok(Self {
            settings,
            events,
            local_config,
            storage,
            theme,
            translator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatabaseType, Diagram};

    fn settings(dir: &tempfile::TempDir) -> Arc<Settings> {
        Arc::new(Settings {
            data_dir: dir.path().join("data"),
            ..Settings::default()
        })
    }

    #[tokio::test]
    async fn test_compose_loads_config_and_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let services = EditorServices::compose(settings(&dir), EventSink::detached())
            .await
            .unwrap();

        assert!(services.config.config().is_some());
        assert!(dir.path().join("data").join("schemax.db").exists());
        assert!(!services.dialogs.is_detached());
        assert!(!services.history.has_undo());
    }

    #[tokio::test]
    async fn test_gallery_shares_storage_with_editor() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = GalleryServices::compose(settings(&dir), EventSink::detached())
            .await
            .unwrap();
        let diagram = Diagram::new("copy", DatabaseType::Sqlite);
        gallery.storage.add_diagram(&diagram).await.unwrap();
        drop(gallery);

        let editor = EditorServices::compose(settings(&dir), EventSink::detached())
            .await
            .unwrap();
        assert!(editor.storage.get_diagram(&diagram.id).await.unwrap().is_some());
    }
}
