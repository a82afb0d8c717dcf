pub mod language;
pub mod types;

pub use language::{Language, UnknownLanguage};
pub use types::{TranslationRequest, TranslationResponse};
