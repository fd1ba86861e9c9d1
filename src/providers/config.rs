//! Editor configuration persisted in storage

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::app::{AppEvent, EventSink};
use crate::storage::StorageProvider;

const CONFIG_KEY: &str = "config";

/// Editor configuration stored with the diagrams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diagram opened when the editor starts without a route
    pub default_diagram_id: Option<String>,

    /// Timestamps of recent AI assisted SQL exports
    pub export_actions: Vec<DateTime<Utc>>,
}

/// Partial update of `Config`; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    default_diagram_id: Option<Option<String>>,
    export_actions: Option<Vec<DateTime<Utc>>>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_diagram_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.default_diagram_id = Some(if id.is_empty() { None } else { Some(id) });
        self
    }

    pub fn clear_default_diagram_id(mut self) -> Self {
        self.default_diagram_id = Some(None);
        self
    }

    pub fn export_actions(mut self, actions: Vec<DateTime<Utc>>) -> Self {
        self.export_actions = Some(actions);
        self
    }

    fn apply(self, config: &mut Config) {
        if let Some(default_diagram_id) = self.default_diagram_id {
            config.default_diagram_id = default_diagram_id;
        }
        if let Some(export_actions) = self.export_actions {
            config.export_actions = export_actions;
        }
    }
}

/// Handle to the persisted editor configuration
#[derive(Clone)]
pub struct ConfigProvider {
    storage: StorageProvider,
    state: Arc<RwLock<Option<Config>>>,
    events: EventSink,
}

impl ConfigProvider {
    /// Unloaded provider, `config()` is `None` until `load` completes
    pub fn new(storage: &StorageProvider, events: EventSink) -> Self {
        Self {
            storage: storage.clone(),
            state: Arc::new(RwLock::new(None)),
            events,
        }
    }

    /// Read the configuration from storage
    pub async fn load(&self) -> Result<()> {
        let config = match self.storage.get_config_value(CONFIG_KEY).await? {
            Some(value) => serde_json::from_value(value)?,
            None => Config::default(),
        };
        debug!("Loaded editor config: {:?}", config);

        *self.state.write() = Some(config);
        self.events.emit(AppEvent::ConfigUpdated);
        Ok(())
    }

    pub fn config(&self) -> Option<Config> {
        self.state.read().clone()
    }

    /// Apply `update` and persist the result
    pub async fn update_config(&self, update: ConfigUpdate) -> Result<Config> {
        let updated = {
            let mut state = self.state.write();
            let mut config = (*state).clone().unwrap_or_default();
            update.apply(&mut config);
            *state = Some(config.clone());
            config
        };

        self.storage
            .set_config_value(CONFIG_KEY, &serde_json::to_value(&updated)?)
            .await?;
        self.events.emit(AppEvent::ConfigUpdated);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_is_none_until_loaded() {
        let storage = StorageProvider::in_memory().await.unwrap();
        let provider = ConfigProvider::new(&storage, EventSink::detached());
        assert!(provider.config().is_none());

        provider.load().await.unwrap();
        assert_eq!(provider.config(), Some(Config::default()));
    }

    #[tokio::test]
    async fn test_update_persists_to_storage() {
        let storage = StorageProvider::in_memory().await.unwrap();
        let provider = ConfigProvider::new(&storage, EventSink::detached());
        provider.load().await.unwrap();

        provider
            .update_config(ConfigUpdate::new().default_diagram_id("xyz"))
            .await
            .unwrap();

        let reloaded = ConfigProvider::new(&storage, EventSink::detached());
        reloaded.load().await.unwrap();
        assert_eq!(
            reloaded.config().unwrap().default_diagram_id.as_deref(),
            Some("xyz")
        );
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let storage = StorageProvider::in_memory().await.unwrap();
        let provider = ConfigProvider::new(&storage, EventSink::detached());
        provider.load().await.unwrap();

        let now = Utc::now();
        provider
            .update_config(ConfigUpdate::new().default_diagram_id("abc"))
            .await
            .unwrap();
        let config = provider
            .update_config(ConfigUpdate::new().export_actions(vec![now]))
            .await
            .unwrap();

        assert_eq!(config.default_diagram_id.as_deref(), Some("abc"));
        assert_eq!(config.export_actions, vec![now]);

        let cleared = provider
            .update_config(ConfigUpdate::new().default_diagram_id(""))
            .await
            .unwrap();
        assert!(cleared.default_diagram_id.is_none());
    }
}
