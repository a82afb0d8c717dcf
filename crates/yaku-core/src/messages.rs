use yaku_translator::TranslateError;

/// Human-readable explanation of a failed translation
pub fn user_message(error: &TranslateError) -> String {
    let detail = match error {
        TranslateError::NoApiKey => {
            "API key not configured. Please open Settings and enter your API key.".to_string()
        }
        TranslateError::NoSettings => {
            "Translation settings not configured. Please open Settings to configure the API."
                .to_string()
        }
        TranslateError::InvalidEndpoint(_) => {
            "Invalid API endpoint URL. Please check your settings.".to_string()
        }
        TranslateError::Transport(reason) => {
            format!("Could not reach the translation service ({reason}). Please check your internet connection and try again.")
        }
        TranslateError::Http(code) => http_message(*code),
        TranslateError::Decode(reason) => format!("Failed to decode API response: {reason}"),
        TranslateError::NoResult => "No translation result returned from the API.".to_string(),
    };

    format!("Translation failed: {detail}")
}

fn http_message(code: u16) -> String {
    match code {
        401 => "Authentication failed. Please check your API key in Settings.".to_string(),
        404 => "API endpoint not found. This might indicate:\n\
                • Invalid API key\n\
                • Incorrect endpoint URL\n\
                • API service unavailable\n\n\
                Please verify your settings and try again."
            .to_string(),
        429 => "Rate limit exceeded. Please wait a moment and try again.".to_string(),
        500..=599 => format!(
            "Server error ({code}). The API service may be temporarily unavailable."
        ),
        _ => format!("HTTP error {code}. Please check your internet connection and try again."),
    }
}
