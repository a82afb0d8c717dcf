use yaku_translator::TranslateError;
use yaku_types::Language;

/// Everything the UI renders for one translation session.
///
/// Snapshots are handed out read-only; only the session mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub input_text: String,
    pub output_text: String,
    pub source_language: Language,
    pub target_language: Language,
    pub is_translating: bool,
    pub last_error: Option<TranslateError>,
    /// User-facing text for `last_error`
    pub error_message: Option<String>,
    pub is_copied: bool,
}

impl SessionState {
    pub fn new(source_language: Language, target_language: Language) -> Self {
        Self {
            input_text: String::new(),
            output_text: String::new(),
            source_language,
            target_language,
            is_translating: false,
            last_error: None,
            error_message: None,
            is_copied: false,
        }
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
        self.error_message = None;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Language::English, Language::Chinese)
    }
}
