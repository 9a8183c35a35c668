use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::providers::{provider_for, ProviderKey};

/// Endpoint settings for this tool, persisted separately from the OpenCode
/// config. The key names are part of the on-disk interface and kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(rename = "OLLAMA_URL", default = "default_ollama_url")]
    pub ollama_url: String,

    #[serde(rename = "LMSTUDIO_URL", default = "default_lmstudio_url")]
    pub lmstudio_url: String,

    #[serde(rename = "LLAMA_URL", default = "default_llama_url")]
    pub llama_url: String,
}

fn default_ollama_url() -> String {
    provider_for(ProviderKey::Ollama).default_url()
}

fn default_lmstudio_url() -> String {
    provider_for(ProviderKey::LmStudio).default_url()
}

fn default_llama_url() -> String {
    provider_for(ProviderKey::LlamaCpp).default_url()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ollama_url: default_ollama_url(),
            lmstudio_url: default_lmstudio_url(),
            llama_url: default_llama_url(),
        }
    }
}

impl Settings {
    /// Returns the settings directory path, e.g. ~/.config/opencode-model-sync
    pub fn settings_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("opencode-model-sync"))
    }

    /// Returns the full path to the settings file
    pub fn file_path() -> Option<PathBuf> {
        Self::settings_dir().map(|p| p.join("settings.toml"))
    }

    /// Whether a settings file has been persisted (first-run detection)
    pub fn is_saved() -> bool {
        Self::file_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Load settings from disk, falling back to defaults when no file exists.
    /// Unknown keys in the file are ignored; missing keys take their defaults.
    pub fn load() -> Result<Self> {
        let path = Self::file_path().context("Could not determine settings directory")?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to disk. The whole document is rewritten on every save.
    pub fn save(&self) -> Result<()> {
        let dir = Self::settings_dir().context("Could not determine settings directory")?;

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create settings directory: {}", dir.display()))?;

        let path = Self::file_path().context("Could not determine settings file path")?;

        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Model-listing endpoint configured for a provider
    pub fn url_for(&self, key: ProviderKey) -> &str {
        match key {
            ProviderKey::Ollama => &self.ollama_url,
            ProviderKey::LmStudio => &self.lmstudio_url,
            ProviderKey::LlamaCpp => &self.llama_url,
        }
    }

    pub fn set_url(&mut self, key: ProviderKey, url: String) {
        match key {
            ProviderKey::Ollama => self.ollama_url = url,
            ProviderKey::LmStudio => self.lmstudio_url = url,
            ProviderKey::LlamaCpp => self.llama_url = url,
        }
    }
}
