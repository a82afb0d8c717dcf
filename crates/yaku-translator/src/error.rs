/// Every way a translation attempt can fail.
///
/// Carries only owned strings so the session can keep the last error in its
/// observable state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("API key not configured")]
    NoApiKey,

    #[error("Translation settings not configured")]
    NoSettings,

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Http(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No translation in response")]
    NoResult,
}

impl From<reqwest::Error> for TranslateError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("request timed out ({error})")
        } else if error.is_connect() {
            format!("could not connect ({error})")
        } else {
            error.to_string()
        };
        TranslateError::Transport(message)
    }
}
