use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Key under which the dark-mode flag is stored.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Small string key-value store persisted as JSON in the user config directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preferences {
    pub values: BTreeMap<String, String>,
    #[serde(skip)]
    file_path: Option<PathBuf>,
}

impl Preferences {
    /// An in-memory store; `save` is a no-op.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_or_create() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("tui-news-app");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).with_context(|| {
                format!("Failed to create config directory {}", config_dir.display())
            })?;
            info!(config_dir = %config_dir.display(), "Created config directory for preferences");
        }

        Self::load_from(config_dir.join("preferences.json"))
    }

    /// Load from `path`, starting empty when the file is missing or unparseable.
    ///
    /// The path is kept either way, so the next `save` replaces a corrupt file.
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let empty = |path: PathBuf| Self {
            values: BTreeMap::new(),
            file_path: Some(path),
        };

        if !path.exists() {
            info!(preferences_file = %path.display(), "No preferences file found, starting empty");
            return Ok(empty(path));
        }

        let content = fs::read_to_string(&path).context("Failed to read preferences file")?;
        match serde_json::from_str::<Preferences>(&content) {
            Ok(mut prefs) => {
                info!(preferences_file = %path.display(), "Loaded preferences");
                prefs.file_path = Some(path);
                Ok(prefs)
            }
            Err(e) => {
                tracing::error!(preferences_file = %path.display(), "Failed to parse preferences file, starting empty: {}", e);
                Ok(empty(path))
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.file_path else {
            tracing::debug!("Preferences.save() called without a file path; skipping write");
            return Ok(());
        };
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        fs::write(path, content).context("Failed to write preferences file")?;
        info!(preferences_file = %path.display(), "Saved preferences");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Only the exact string `"true"` reads as true.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, value.to_string());
    }
}
