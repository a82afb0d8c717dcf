#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write clipboard: {0}")]
    Write(String),
}

/// Write side of the system clipboard
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}
