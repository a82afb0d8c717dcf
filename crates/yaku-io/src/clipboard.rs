use std::sync::{Mutex, PoisonError};

use arboard::Clipboard as Arboard;
use yaku_core::{Clipboard, ClipboardError};

/// System clipboard via `arboard`.
///
/// The handle is opened on first use and kept alive, since on some
/// platforms the copied text disappears when its owner is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<Arboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self.handle.lock().unwrap_or_else(PoisonError::into_inner);

        if guard.is_none() {
            let clipboard =
                Arboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            *guard = Some(clipboard);
        }

        let Some(clipboard) = guard.as_mut() else {
            return Err(ClipboardError::Unavailable("clipboard not initialised".into()));
        };

        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))?;

        tracing::debug!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }
}
