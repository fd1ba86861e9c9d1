//! User preferences kept on this machine only

use anyhow::Result;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, warn};

use super::ThemePreference;
use crate::app::{AppEvent, EventSink};

/// What the mouse wheel does on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAction {
    Pan,
    Zoom,
}

impl Default for ScrollAction {
    fn default() -> Self {
        Self::Pan
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub theme: ThemePreference,
    pub scroll_action: ScrollAction,
    pub show_cardinality: bool,
    pub show_dependencies_on_canvas: bool,
    pub hide_multi_schema_notification: bool,
    pub language: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            scroll_action: ScrollAction::Pan,
            show_cardinality: true,
            show_dependencies_on_canvas: false,
            hide_multi_schema_notification: false,
            language: "en".to_string(),
        }
    }
}

/// Handle to the preference store
#[derive(Clone)]
pub struct LocalConfigProvider {
    path: Option<PathBuf>,
    state: Arc<RwLock<LocalConfig>>,
    events: EventSink,
}

impl LocalConfigProvider {
    /// Load preferences from `path`, falling back to defaults
    pub async fn load(path: PathBuf, events: EventSink) -> Result<Self> {
        let config = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring unreadable preferences at {}: {}", path.display(), e);
                    LocalConfig::default()
                }
            }
        } else {
            LocalConfig::default()
        };

        debug!("Loaded local config: {:?}", config);

        Ok(Self {
            path: Some(path),
            state: Arc::new(RwLock::new(config)),
            events,
        })
    }

    /// Preferences that are never written to disk
    pub fn in_memory(events: EventSink) -> Self {
        Self {
            path: None,
            state: Arc::new(RwLock::new(LocalConfig::default())),
            events,
        }
    }

    pub fn get(&self) -> LocalConfig {
        self.state.read().clone()
    }

    pub fn theme(&self) -> ThemePreference {
        self.state.read().theme
    }

    pub fn scroll_action(&self) -> ScrollAction {
        self.state.read().scroll_action
    }

    pub fn show_cardinality(&self) -> bool {
        self.state.read().show_cardinality
    }

    pub fn show_dependencies_on_canvas(&self) -> bool {
        self.state.read().show_dependencies_on_canvas
    }

    pub fn hide_multi_schema_notification(&self) -> bool {
        self.state.read().hide_multi_schema_notification
    }

    pub fn language(&self) -> String {
        self.state.read().language.clone()
    }

    pub fn set_theme(&self, theme: ThemePreference) {
        self.update(|config| config.theme = theme);
    }

    pub fn set_scroll_action(&self, action: ScrollAction) {
        self.update(|config| config.scroll_action = action);
    }

    pub fn set_show_cardinality(&self, show: bool) {
        self.update(|config| config.show_cardinality = show);
    }

    pub fn set_show_dependencies_on_canvas(&self, show: bool) {
        self.update(|config| config.show_dependencies_on_canvas = show);
    }

    pub fn set_hide_multi_schema_notification(&self, hide: bool) {
        self.update(|config| config.hide_multi_schema_notification = hide);
    }

    pub fn set_language(&self, language: impl Into<String>) {
        let language = language.into();
        self.update(|config| config.language = language);
    }

    fn update(&self, apply: impl FnOnce(&mut LocalConfig)) {
        let snapshot = {
            let mut state = self.state.write();
            apply(&mut state);
            state.clone()
        };

        // Preferences are best effort, a failed write keeps the in-memory value
        if let Err(e) = self.persist(&snapshot) {
            warn!("Failed to save preferences: {}", e);
        }

        self.events.emit(AppEvent::LocalConfigChanged);
    }

    fn persist(&self, config: &LocalConfig) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_string_pretty(config)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_preferences_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_config.json");

        let provider = LocalConfigProvider::load(path.clone(), EventSink::detached())
            .await
            .unwrap();
        provider.set_hide_multi_schema_notification(true);
        provider.set_scroll_action(ScrollAction::Zoom);
        provider.set_language("de");

        let reloaded = LocalConfigProvider::load(path, EventSink::detached())
            .await
            .unwrap();
        assert!(reloaded.hide_multi_schema_notification());
        assert_eq!(reloaded.scroll_action(), ScrollAction::Zoom);
        assert_eq!(reloaded.language(), "de");
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_config.json");
        std::fs::write(&path, "not json").unwrap();

        let provider = LocalConfigProvider::load(path, EventSink::detached())
            .await
            .unwrap();
        assert_eq!(provider.get(), LocalConfig::default());
    }

    #[test]
    fn test_setters_emit_change_events() {
        let (sink, mut rx) = EventSink::channel();
        let provider = LocalConfigProvider::in_memory(sink);

        provider.set_show_cardinality(false);

        assert!(!provider.show_cardinality());
        assert_eq!(rx.try_recv().unwrap(), AppEvent::LocalConfigChanged);
    }
}
