use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Prompt used when the user has not customised one
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Translate the following text from {source_language} to {target_language}. \nProvide only the translation result without any explanations, prefixes, or additional text.\n\nText: {text}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    DeepSeek,
    OpenAi,
}

impl Provider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "DeepSeek",
            Provider::OpenAi => "OpenAI",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "https://api.deepseek.com/chat/completions",
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "deepseek-chat",
            Provider::OpenAi => "gpt-3.5-turbo",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Ok(Provider::DeepSeek),
            "openai" => Ok(Provider::OpenAi),
            other => Err(format!("Unknown provider: {other}")),
        }
    }
}

/// Snapshot of everything needed to call a chat-completion endpoint.
///
/// Handed to the translation service per call; never mutated by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    pub endpoint_url: String,
    pub model_name: String,
    pub prompt_template: String,
}

impl ProviderConfig {
    /// Key, endpoint and model must all be present
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
            && !self.endpoint_url.trim().is_empty()
            && !self.model_name.trim().is_empty()
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_prompt() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    pub provider: Provider,
    #[serde(default)]
    pub api_key: String,
    /// Empty means the provider's default endpoint
    #[serde(default)]
    pub endpoint_url: String,
    /// Empty means the provider's default model
    #[serde(default)]
    pub model_name: String,
    #[serde(default = "default_prompt")]
    pub prompt_template: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        let provider = Provider::default();
        Self {
            provider,
            api_key: String::new(),
            endpoint_url: provider.default_endpoint().to_string(),
            model_name: provider.default_model().to_string(),
            prompt_template: default_prompt(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl TranslatorConfig {
    /// Build the per-call snapshot, filling blanks from the provider presets.
    /// The API key is never defaulted.
    pub fn provider_config(&self) -> ProviderConfig {
        let or_default = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.trim().to_string()
            }
        };

        ProviderConfig {
            api_key: self.api_key.clone(),
            endpoint_url: or_default(&self.endpoint_url, self.provider.default_endpoint()),
            model_name: or_default(&self.model_name, self.provider.default_model()),
            prompt_template: or_default(&self.prompt_template, DEFAULT_PROMPT_TEMPLATE),
        }
    }

    /// Restore endpoint, model and prompt for the selected provider, keeping the key
    pub fn reset_to_defaults(&mut self) {
        self.endpoint_url = self.provider.default_endpoint().to_string();
        self.model_name = self.provider.default_model().to_string();
        self.prompt_template = default_prompt();
    }

    /// Per-request timeout; zero falls back to the default
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => Duration::from_secs(default_timeout()),
            secs => Duration::from_secs(secs),
        }
    }
}
