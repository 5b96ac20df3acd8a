use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::PostdeckError;
use crate::model::Platform;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub api: ApiConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
    /// Simulate all API calls without a backend. The --mock flag overrides
    /// this to true.
    pub mock: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Postdeck".to_string(),
            mock: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.postdeck.app".to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default tone suggested on the AI subject step.
    pub tone: Option<String>,
    /// Platforms preselected on platform-selection steps.
    pub platforms: Vec<Platform>,
}

impl AppConfig {
    pub fn load() -> Result<Self, PostdeckError> {
        Self::load_from(Self::default_path())
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, PostdeckError> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("postdeck")
            .join("config.toml")
    }

    /// API token from the config file, falling back to POSTDECK_TOKEN.
    pub fn api_token(&self) -> Option<String> {
        self.api
            .token
            .clone()
            .or_else(|| std::env::var("POSTDECK_TOKEN").ok())
    }
}
