// Application settings
// Loaded from ~/.config/tally/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// AI solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Whether the AI prompt surface is available at all
    pub enabled: bool,

    /// Model identifier (empty = default)
    pub model: String,

    /// API base override (for self-hosted gateways and tests)
    pub endpoint: Option<String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: String::new(), // Empty = use the default model
            endpoint: None,
        }
    }
}

impl AiSettings {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";
    pub const DEFAULT_ENDPOINT: &'static str = "https://generativelanguage.googleapis.com";

    /// Get the effective model (user-specified or default)
    pub fn effective_model(&self) -> &str {
        if self.model.is_empty() {
            Self::DEFAULT_MODEL
        } else {
            &self.model
        }
    }

    /// Get the effective API base
    pub fn effective_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(Self::DEFAULT_ENDPOINT)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ai: AiSettings,
}

impl Settings {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tally")
            .join("settings.json")
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// malformed.
    pub fn load() -> Self {
        fs::read_to_string(Self::path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, json).map_err(|e| e.to_string())
    }
}
