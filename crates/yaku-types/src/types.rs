use crate::language::Language;

/// A single translation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: Language,
    pub target_language: Language,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source_language: Language, target_language: Language) -> Self {
        Self {
            text: text.into(),
            source_language,
            target_language,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub translated_text: String,
    pub source_language: Language,
    pub target_language: Language,
    pub original_text: String,
}
