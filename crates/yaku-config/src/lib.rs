use std::env;

use serde::{Deserialize, Serialize};

use self::session::SessionConfig;
use self::translator::TranslatorConfig;

pub mod session;
pub mod translator;

pub use translator::{DEFAULT_PROMPT_TEMPLATE, Provider, ProviderConfig};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub session: SessionConfig,
}

impl Config {
    /// Defaults overridden by `YAKU_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Override fields from a key lookup. Unparsable numbers are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("YAKU_PROVIDER") {
            match provider.parse::<Provider>() {
                Ok(provider) if provider != self.translator.provider => {
                    self.translator.provider = provider;
                    self.translator.reset_to_defaults();
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Ignoring YAKU_PROVIDER: {}", e),
            }
        }

        if let Some(key) = lookup("YAKU_API_KEY") {
            self.translator.api_key = key;
        }

        if let Some(endpoint) = lookup("YAKU_ENDPOINT") {
            self.translator.endpoint_url = endpoint;
        }

        if let Some(model) = lookup("YAKU_MODEL") {
            self.translator.model_name = model;
        }

        if let Some(timeout) = lookup("YAKU_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => self.translator.request_timeout_secs = secs,
                _ => tracing::warn!("Ignoring YAKU_TIMEOUT_SECONDS: {:?}", timeout),
            }
        }

        if let Some(debounce) = lookup("YAKU_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.session.debounce_ms = debounce;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn overrides_replace_fields() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("YAKU_API_KEY", "sk-env"),
            ("YAKU_MODEL", "deepseek-reasoner"),
            ("YAKU_DEBOUNCE_MS", "250"),
            ("YAKU_TIMEOUT_SECONDS", "not-a-number"),
        ]));

        assert_eq!(config.translator.api_key, "sk-env");
        assert_eq!(config.translator.model_name, "deepseek-reasoner");
        assert_eq!(config.session.debounce_ms, 250);
        assert_eq!(config.translator.request_timeout_secs, 30);
    }

    #[test]
    fn zero_timeout_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("YAKU_TIMEOUT_SECONDS", "0")]));
        assert_eq!(config.translator.request_timeout_secs, 30);

        config.apply_overrides(lookup(&[("YAKU_TIMEOUT_SECONDS", "12")]));
        assert_eq!(config.translator.request_timeout_secs, 12);
    }

    #[test]
    fn switching_provider_resets_presets() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("YAKU_PROVIDER", "openai")]));

        assert_eq!(config.translator.provider, Provider::OpenAi);
        assert_eq!(
            config.translator.endpoint_url,
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(config.translator.model_name, "gpt-3.5-turbo");
    }

    #[test]
    fn explicit_endpoint_wins_over_provider_switch() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("YAKU_PROVIDER", "openai"),
            ("YAKU_ENDPOINT", "http://localhost:8080/v1/chat/completions"),
        ]));

        assert_eq!(
            config.translator.endpoint_url,
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn empty_json_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.session.debounce_ms, 1000);
        assert_eq!(config.session.copy_reset_ms, 2000);
        assert_eq!(config.translator.provider, Provider::DeepSeek);
    }
}
