use serde::{Deserialize, Serialize};
use yaku_types::Language;

fn default_source() -> Language {
    Language::English
}

fn default_target() -> Language {
    Language::Chinese
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_copy_reset_ms() -> u64 {
    2000
}

fn default_auto_translate() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(default = "default_source")]
    pub source_language: Language,
    #[serde(default = "default_target")]
    pub target_language: Language,
    /// Quiet period after the last edit before auto-translating
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long the "copied" indicator stays on
    #[serde(default = "default_copy_reset_ms")]
    pub copy_reset_ms: u64,
    #[serde(default = "default_auto_translate")]
    pub auto_translate: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source_language: default_source(),
            target_language: default_target(),
            debounce_ms: default_debounce_ms(),
            copy_reset_ms: default_copy_reset_ms(),
            auto_translate: default_auto_translate(),
        }
    }
}
