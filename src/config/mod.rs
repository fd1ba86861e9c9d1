use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Process level settings, resolved once at startup
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Data directory holding the database, preferences and logs
    pub data_dir: PathBuf,

    /// Apply the rolling limit to AI assisted SQL exports
    pub limit_ai_exports: bool,

    /// Marketing site opened from the help menu
    pub website_url: String,

    /// Source repository, shown in the rate limit alert
    pub repository_url: String,

    /// Directory receiving exported images
    pub export_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join("schemax"))
            .unwrap_or_else(|| PathBuf::from("./data"));

        Self {
            data_dir,
            limit_ai_exports: true,
            website_url: "https://schemax.io".to_string(),
            repository_url: "https://github.com/schemax/schemax".to_string(),
            export_dir: None,
        }
    }
}

impl Settings {
    /// Initialize settings from defaults, environment and settings files
    pub async fn init() -> Result<Self> {
        debug!("Initializing settings");

        let mut settings = match Self::load_from_file().await {
            Ok(file_settings) => file_settings,
            Err(e) => {
                debug!("Using default settings: {}", e);
                Self::default()
            }
        };

        settings.load_from_env();

        Ok(settings)
    }

    /// Load overrides from environment variables
    pub fn load_from_env(&mut self) {
        if let Ok(data_dir) = std::env::var("SCHEMAX_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(limit) = std::env::var("SCHEMAX_LIMIT_AI_EXPORTS") {
            self.limit_ai_exports = !matches!(limit.to_lowercase().as_str(), "0" | "false" | "no");
        }

        if let Ok(url) = std::env::var("SCHEMAX_WEBSITE_URL") {
            self.website_url = url;
        }

        if let Ok(dir) = std::env::var("SCHEMAX_EXPORT_DIR") {
            self.export_dir = Some(PathBuf::from(dir));
        }
    }

    /// Load settings from the first schemax.json found
    pub async fn load_from_file() -> Result<Self> {
        // 1. ./.schemax.json
        // 2. ./schemax.json
        // 3. $CONFIG/schemax/schemax.json
        let mut paths = vec![
            PathBuf::from("./.schemax.json"),
            PathBuf::from("./schemax.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("schemax").join("schemax.json"));
        }

        for path in paths {
            if path.exists() {
                debug!("Loading settings from: {}", path.display());
                let content = tokio::fs::read_to_string(&path).await?;
                let settings: Self = serde_json::from_str(&content)?;
                return Ok(settings);
            }
        }

        Err(anyhow::anyhow!("No settings file found"))
    }

    /// Make sure the data directory exists
    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    /// Where exported images are written
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("exports"))
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("schemax.db")
    }

    pub fn local_config_path(&self) -> PathBuf {
        self.data_dir.join("local_config.json")
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("data_dir must not be empty"));
        }

        if self.website_url.is_empty() {
            return Err(anyhow::anyhow!("website_url must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"limit_ai_exports": false}"#).unwrap();
        assert!(!settings.limit_ai_exports);
        assert_eq!(settings.website_url, "https://schemax.io");
    }

    #[test]
    fn test_paths_live_in_data_dir() {
        let settings = Settings {
            data_dir: PathBuf::from("/tmp/schemax-test"),
            ..Settings::default()
        };
        assert_eq!(settings.database_path(), PathBuf::from("/tmp/schemax-test/schemax.db"));
        assert_eq!(settings.export_dir(), PathBuf::from("/tmp/schemax-test/exports"));
    }

    #[test]
    fn test_validate_rejects_empty_data_dir() {
        let settings = Settings {
            data_dir: PathBuf::new(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
