// AI configuration and key resolution
//
// API keys come from environment variables and are NEVER stored in
// settings.json.

use std::env;

use crate::settings::AiSettings;

/// Primary environment variable for the solver key
pub const KEY_ENV_VAR: &str = "TALLY_GEMINI_KEY";
/// Conventional fallback used by other Gemini tooling
pub const KEY_ENV_FALLBACK: &str = "GEMINI_API_KEY";

/// Source of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Key from TALLY_GEMINI_KEY
    Environment,
    /// Key from the GEMINI_API_KEY fallback
    EnvironmentFallback,
    /// No key found
    None,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySource::Environment => KEY_ENV_VAR,
            KeySource::EnvironmentFallback => KEY_ENV_FALLBACK,
            KeySource::None => "none",
        }
    }
}

/// Look up the solver API key.
pub fn get_api_key() -> (Option<String>, KeySource) {
    for (var, source) in [
        (KEY_ENV_VAR, KeySource::Environment),
        (KEY_ENV_FALLBACK, KeySource::EnvironmentFallback),
    ] {
        if let Ok(key) = env::var(var) {
            if !key.is_empty() {
                return (Some(key), source);
            }
        }
    }
    (None, KeySource::None)
}

/// Status of the AI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiConfigStatus {
    /// AI is disabled in settings
    Disabled,
    /// Configuration is valid and a key is present
    Ready,
    /// AI is enabled but no API key was found
    MissingKey,
}

impl AiConfigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Ready => "ready",
            Self::MissingKey => "missing_key",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// The effective AI configuration, fully resolved from settings and
/// environment. Single source of truth for runtime solver behavior.
#[derive(Debug, Clone)]
pub struct ResolvedAiConfig {
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub key_source: KeySource,
    pub status: AiConfigStatus,
    /// Human-readable reason if not ready
    pub blocking_reason: Option<String>,
}

impl ResolvedAiConfig {
    pub fn from_settings(settings: &AiSettings) -> Self {
        let model = settings.effective_model().to_string();
        let endpoint = settings.effective_endpoint().to_string();

        if !settings.enabled {
            return Self {
                model,
                endpoint,
                api_key: None,
                key_source: KeySource::None,
                status: AiConfigStatus::Disabled,
                blocking_reason: Some("AI solving is disabled in settings".to_string()),
            };
        }

        let (api_key, key_source) = get_api_key();
        let (status, blocking_reason) = match &api_key {
            Some(_) => (AiConfigStatus::Ready, None),
            None => (
                AiConfigStatus::MissingKey,
                Some(format!(
                    "No API key found. Set {} (or {})",
                    KEY_ENV_VAR, KEY_ENV_FALLBACK
                )),
            ),
        };

        Self {
            model,
            endpoint,
            api_key,
            key_source,
            status,
            blocking_reason,
        }
    }

    /// Load settings and resolve in one call (convenience method)
    pub fn load() -> Self {
        let settings = crate::settings::Settings::load();
        Self::from_settings(&settings.ai)
    }
}

impl std::fmt::Display for ResolvedAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "AI Configuration")?;
        writeln!(f, "──────────────────────────────")?;
        writeln!(f, "Status:      {}", self.status.as_str())?;
        writeln!(f, "Model:       {}", self.model)?;
        writeln!(f, "Endpoint:    {}", self.endpoint)?;
        writeln!(
            f,
            "Key present: {}",
            if self.api_key.is_some() { "yes" } else { "no" }
        )?;
        writeln!(f, "Key source:  {}", self.key_source.as_str())?;
        if let Some(reason) = &self.blocking_reason {
            writeln!(f, "Blocked:     {}", reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_settings_short_circuit() {
        let settings = AiSettings {
            enabled: false,
            ..Default::default()
        };
        let resolved = ResolvedAiConfig::from_settings(&settings);
        assert_eq!(resolved.status, AiConfigStatus::Disabled);
        assert!(resolved.api_key.is_none());
        assert!(!resolved.status.is_ready());
    }

    #[test]
    fn test_key_lookup_from_env() {
        env::set_var(KEY_ENV_VAR, "test-key-123");

        let (key, source) = get_api_key();
        assert_eq!(source, KeySource::Environment);
        assert_eq!(key, Some("test-key-123".to_string()));

        env::remove_var(KEY_ENV_VAR);
    }

    #[test]
    fn test_resolved_missing_key() {
        // Only meaningful when the environment carries no key; skip otherwise
        // (CI machines may have one set, and the env-var test runs in
        // parallel).
        let resolved = ResolvedAiConfig::from_settings(&AiSettings::default());
        if resolved.api_key.is_some() {
            return;
        }
        assert_eq!(resolved.status, AiConfigStatus::MissingKey);
        assert!(resolved.blocking_reason.is_some());
    }
}
