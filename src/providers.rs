//! Built-in presets for OpenAI-compatible chat-completions providers.
//!
//! Each preset defines the base URL, a default model, the environment
//! variable that holds the API key, and whether the provider accepts a
//! `json_schema` response format. Users name a provider in their config and
//! the preset fills in the rest.

#[derive(Debug, Clone)]
pub struct ProviderPreset {
    pub name: &'static str,
    pub base_url: &'static str,
    pub default_model: &'static str,
    pub default_api_key_env: &'static str,
    /// Accepts `response_format: {"type": "json_schema"}`. Otherwise only
    /// `json_object` is sent and the shape is checked locally.
    pub structured_output: bool,
}

const PRESETS: &[ProviderPreset] = &[
    ProviderPreset {
        name: "gemini",
        base_url: "https://generativelanguage.googleapis.com/v1beta/openai",
        default_model: "gemini-3-flash-preview",
        default_api_key_env: "GEMINI_API_KEY",
        structured_output: true,
    },
    ProviderPreset {
        name: "openai",
        base_url: "https://api.openai.com/v1",
        default_model: "gpt-4o-mini",
        default_api_key_env: "OPENAI_API_KEY",
        structured_output: true,
    },
    ProviderPreset {
        name: "openrouter",
        base_url: "https://openrouter.ai/api/v1",
        default_model: "google/gemini-2.5-flash",
        default_api_key_env: "OPENROUTER_API_KEY",
        structured_output: true,
    },
    ProviderPreset {
        name: "deepseek",
        base_url: "https://api.deepseek.com/v1",
        default_model: "deepseek-chat",
        default_api_key_env: "DEEPSEEK_API_KEY",
        structured_output: false,
    },
    ProviderPreset {
        name: "groq",
        base_url: "https://api.groq.com/openai/v1",
        default_model: "llama-3.3-70b-versatile",
        default_api_key_env: "GROQ_API_KEY",
        structured_output: false,
    },
    ProviderPreset {
        name: "together",
        base_url: "https://api.together.xyz/v1",
        default_model: "meta-llama/Llama-3.3-70B-Instruct-Turbo",
        default_api_key_env: "TOGETHER_API_KEY",
        structured_output: true,
    },
    ProviderPreset {
        name: "fireworks",
        base_url: "https://api.fireworks.ai/inference/v1",
        default_model: "accounts/fireworks/models/llama-v3p3-70b-instruct",
        default_api_key_env: "FIREWORKS_API_KEY",
        structured_output: true,
    },
];

impl ProviderPreset {
    #[must_use]
    pub fn from_name(name: &str) -> Option<&'static ProviderPreset> {
        PRESETS.iter().find(|p| p.name == name.to_lowercase())
    }

    #[must_use]
    pub fn all() -> &'static [ProviderPreset] {
        PRESETS
    }
}
