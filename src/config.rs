use crate::error::{DevTranslateError, Result};
use crate::formatter::FormatMode;
use crate::providers::ProviderPreset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub format: FormatMode,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Override the preset's `json_schema` support.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_output: Option<bool>,
}

fn default_port() -> u16 {
    4300
}

fn default_timeout_secs() -> u64 {
    60
}

const FALLBACK_API_KEY_ENV: &str = "API_KEY";

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "gemini".to_string(),
            base_url: None,
            api_key_env: None,
            model: None,
            structured_output: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            format: FormatMode::default(),
            timeout_secs: default_timeout_secs(),
            provider: ProviderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DevTranslateError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Search standard locations for a config file, falling back to defaults.
    /// Priority: CLI arg > CWD > XDG config > home dir
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in &config_search_paths() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(candidate);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Switch to another provider. Preset-derived settings are cleared so the
    /// new preset's URL, model and key variable apply.
    pub fn set_provider(&mut self, name: &str) {
        if self.provider.name.eq_ignore_ascii_case(name) {
            return;
        }
        self.provider = ProviderConfig {
            name: name.to_string(),
            ..ProviderConfig::default()
        };
    }

    fn preset(&self) -> Option<&'static ProviderPreset> {
        ProviderPreset::from_name(&self.provider.name)
    }

    /// Resolve the effective base URL (config override or provider preset default)
    pub fn effective_base_url(&self) -> Result<String> {
        if let Some(ref url) = self.provider.base_url {
            return Ok(url.clone());
        }

        self.preset()
            .map(|p| p.base_url.to_string())
            .ok_or_else(|| self.unknown_provider("base_url"))
    }

    /// Resolve the model to request (config override or provider preset default)
    pub fn effective_model(&self) -> Result<String> {
        if let Some(ref model) = self.provider.model {
            return Ok(model.clone());
        }

        self.preset()
            .map(|p| p.default_model.to_string())
            .ok_or_else(|| self.unknown_provider("model"))
    }

    /// Whether to request a `json_schema` response format. Unknown providers
    /// default to it unless configured otherwise.
    #[must_use]
    pub fn structured_output(&self) -> bool {
        self.provider
            .structured_output
            .or_else(|| self.preset().map(|p| p.structured_output))
            .unwrap_or(true)
    }

    /// Name of the environment variable holding the API key.
    #[must_use]
    pub fn api_key_env(&self) -> &str {
        if let Some(ref env) = self.provider.api_key_env {
            return env;
        }
        self.preset()
            .map_or(FALLBACK_API_KEY_ENV, |p| p.default_api_key_env)
    }

    /// Resolve the API key from the configured environment variable
    pub fn resolve_api_key(&self) -> Result<String> {
        let var = self.api_key_env();
        std::env::var(var).map_err(|_| {
            DevTranslateError::config(format!(
                "Environment variable '{}' not set. Set it with your provider API key.",
                var
            ))
        })
    }

    fn unknown_provider(&self, field: &str) -> DevTranslateError {
        let known = ProviderPreset::all()
            .iter()
            .map(|p| p.name)
            .collect::<Vec<_>>()
            .join(", ");
        DevTranslateError::config(format!(
            "Unknown provider '{}' and no {} configured. Known providers: {}",
            self.provider.name, field, known
        ))
    }
}

pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // CWD
    paths.push(PathBuf::from("devtranslate.toml"));

    // XDG / platform config dir
    if cfg!(target_os = "macos") {
        if let Some(home) = home_dir() {
            paths.push(
                home.join("Library")
                    .join("Application Support")
                    .join("devtranslate")
                    .join("config.toml"),
            );
        }
    } else {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("devtranslate").join("config.toml"));
        }
        if let Some(home) = home_dir() {
            paths.push(home.join(".config").join("devtranslate").join("config.toml"));
        }
    }

    // Home directory fallback
    if let Some(home) = home_dir() {
        paths.push(home.join(".devtranslate.toml"));
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
