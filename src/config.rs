use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_BASE_URL;
use crate::internal::filters::DEFAULT_WINDOW_DAYS;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the news backend, e.g. "http://127.0.0.1:5000"
    pub api_base_url: String,
    /// Quiet period after the last search keystroke before a fetch is issued
    pub search_debounce_ms: u64,
    /// How long the article-load error banner stays up
    pub error_banner_secs: u64,
    /// Time window restored by refresh and used at startup
    pub default_window_days: u32,
    /// Choices offered by the time selector, in days
    pub window_options: Vec<u32>,
    /// Optional JSON theme file with "light" and "dark" variants
    pub theme_file: Option<String>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling log file; "logs" when unset
    pub log_directory: Option<String>,
    /// Per-module overrides, e.g. {"reqwest": "warn"}
    pub module_levels: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_directory: None,
            module_levels: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// EnvFilter directive built from the level and module overrides.
    pub fn filter_directive(&self) -> String {
        let mut filter_str = self.level.clone();
        let mut modules: Vec<_> = self.module_levels.iter().collect();
        modules.sort();
        for (module, level) in modules {
            filter_str.push_str(&format!(",{}={}", module, level));
        }
        filter_str
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_debounce_ms: 300,
            error_banner_secs: 5,
            default_window_days: DEFAULT_WINDOW_DAYS,
            window_options: vec![1, 7, 30],
            theme_file: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        // Look for config.ron in current directory or next to executable
        let mut candidates = vec![PathBuf::from("config.ron")];

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<AppConfig>(content)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn error_banner_timeout(&self) -> Duration {
        Duration::from_secs(self.error_banner_secs)
    }
}
