use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{RwLock, watch};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use yaku_config::ProviderConfig;
use yaku_config::session::SessionConfig;
use yaku_translator::{TranslateError, Translator};
use yaku_types::{Language, TranslationRequest, TranslationResponse};

use crate::clipboard::Clipboard;
use crate::messages::user_message;
use crate::state::SessionState;
use crate::timer::{Timer, TokioTimer};

/// Provider settings owned by the settings collaborator, read per translation
pub type SharedSettings = Arc<RwLock<Option<ProviderConfig>>>;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub debounce: Duration,
    pub copy_reset: Duration,
    pub auto_translate: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(1),
            copy_reset: Duration::from_secs(2),
            auto_translate: true,
        }
    }
}

impl From<&SessionConfig> for SessionOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            copy_reset: Duration::from_millis(config.copy_reset_ms),
            auto_translate: config.auto_translate,
        }
    }
}

struct Inner {
    id: Uuid,
    state: watch::Sender<SessionState>,
    /// Bumped only while holding the state lock
    generation: AtomicU64,
    translator: Arc<dyn Translator>,
    settings: SharedSettings,
    clipboard: Arc<dyn Clipboard>,
    timer: Arc<dyn Timer>,
    options: SessionOptions,
    pending_debounce: Mutex<Option<CancellationToken>>,
    /// Input text of the most recently started translation
    last_submitted: Mutex<Option<String>>,
    pending_copy_reset: Mutex<Option<CancellationToken>>,
    shutdown: CancellationToken,
}

/// Long-lived translation session behind one input/output pane.
///
/// All methods return immediately; timers and network calls run on spawned
/// tokio tasks, so a runtime must be active. Observers read snapshots via
/// [`TranslationSession::state`] or [`TranslationSession::subscribe`].
#[derive(Clone)]
pub struct TranslationSession {
    inner: Arc<Inner>,
}

impl TranslationSession {
    pub fn new(
        translator: Arc<dyn Translator>,
        settings: SharedSettings,
        clipboard: Arc<dyn Clipboard>,
        source_language: Language,
        target_language: Language,
        options: SessionOptions,
    ) -> Self {
        Self::with_timer(
            translator,
            settings,
            clipboard,
            Arc::new(TokioTimer),
            SessionState::new(source_language, target_language),
            options,
        )
    }

    pub fn with_timer(
        translator: Arc<dyn Translator>,
        settings: SharedSettings,
        clipboard: Arc<dyn Clipboard>,
        timer: Arc<dyn Timer>,
        initial: SessionState,
        options: SessionOptions,
    ) -> Self {
        let (state, _) = watch::channel(initial);
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "Translation session created");

        Self {
            inner: Arc::new(Inner {
                id,
                state,
                generation: AtomicU64::new(0),
                translator,
                settings,
                clipboard,
                timer,
                options,
                pending_debounce: Mutex::new(None),
                last_submitted: Mutex::new(None),
                pending_copy_reset: Mutex::new(None),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Whether the current input differs from the last text sent for translation
    pub fn has_untranslated_input(&self) -> bool {
        let state = self.inner.state.borrow();
        if state.input_text.trim().is_empty() {
            return false;
        }

        let submitted = self
            .inner
            .last_submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        submitted.as_deref() != Some(state.input_text.as_str())
    }

    /// Record an edit and (re)arm the auto-translate debounce
    pub fn set_input_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner
            .state
            .send_modify(|state| state.input_text = text.clone());

        if !self.inner.options.auto_translate {
            return;
        }

        let token = self.inner.shutdown.child_token();
        replace_token(&self.inner.pending_debounce, Some(token.clone()));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = inner.timer.sleep(inner.options.debounce) => {
                    let unchanged = inner.state.borrow().input_text == text;
                    if unchanged && !text.trim().is_empty() {
                        tracing::debug!(session = %inner.id, "Debounce elapsed, translating");
                        start_translation(&inner);
                    }
                }
            }
        });
    }

    /// Translate the current input, superseding any in-flight translation
    pub fn translate_now(&self) {
        replace_token(&self.inner.pending_debounce, None);
        start_translation(&self.inner);
    }

    pub fn set_languages(&self, source_language: Language, target_language: Language) {
        self.inner.state.send_modify(|state| {
            state.source_language = source_language;
            state.target_language = target_language;
        });
    }

    /// Swap languages and texts; does not translate
    pub fn swap_languages(&self) {
        replace_token(&self.inner.pending_debounce, None);
        self.inner.state.send_modify(|state| {
            std::mem::swap(&mut state.source_language, &mut state.target_language);
            std::mem::swap(&mut state.input_text, &mut state.output_text);
        });
    }

    pub fn clear(&self) {
        replace_token(&self.inner.pending_debounce, None);
        self.inner.state.send_modify(|state| {
            state.input_text.clear();
            state.output_text.clear();
            state.clear_error();
        });
    }

    /// Put the output on the clipboard and flash the copied indicator
    pub fn copy_result(&self) {
        let text = self.inner.state.borrow().output_text.clone();

        if let Err(e) = self.inner.clipboard.set_text(&text) {
            tracing::warn!(session = %self.inner.id, "Copy failed: {}", e);
            return;
        }

        self.inner.state.send_modify(|state| state.is_copied = true);

        let token = self.inner.shutdown.child_token();
        replace_token(&self.inner.pending_copy_reset, Some(token.clone()));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = inner.timer.sleep(inner.options.copy_reset) => {
                    inner.state.send_modify(|state| state.is_copied = false);
                }
            }
        });
    }

    /// Cancel all pending timers and drop the results of in-flight translations
    pub fn shutdown(&self) {
        tracing::debug!(session = %self.inner.id, "Translation session shutting down");
        self.inner.shutdown.cancel();
    }
}

fn replace_token(slot: &Mutex<Option<CancellationToken>>, next: Option<CancellationToken>) {
    let previous = {
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    };

    if let Some(token) = previous {
        token.cancel();
    }
}

fn start_translation(inner: &Arc<Inner>) {
    let mut submitted = None;

    inner.state.send_if_modified(|state| {
        if state.input_text.trim().is_empty() {
            return false;
        }

        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        state.is_translating = true;
        state.clear_error();
        *inner
            .last_submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(state.input_text.clone());

        submitted = Some((
            generation,
            TranslationRequest::new(
                state.input_text.clone(),
                state.source_language,
                state.target_language,
            ),
        ));
        true
    });

    let Some((generation, request)) = submitted else {
        return;
    };

    tracing::debug!(session = %inner.id, generation, "Translation started");

    let inner = Arc::clone(inner);
    tokio::spawn(async move {
        let outcome = tokio::select! {
            biased;
            _ = inner.shutdown.cancelled() => return,
            outcome = run_translation(&inner, &request) => outcome,
        };
        apply_outcome(&inner, generation, outcome);
    });
}

async fn run_translation(
    inner: &Inner,
    request: &TranslationRequest,
) -> Result<TranslationResponse, TranslateError> {
    let config = inner.settings.read().await.clone();
    inner.translator.translate(request, config.as_ref()).await
}

fn apply_outcome(
    inner: &Inner,
    generation: u64,
    outcome: Result<TranslationResponse, TranslateError>,
) {
    let applied = inner.state.send_if_modified(|state| {
        if inner.generation.load(Ordering::SeqCst) != generation {
            return false;
        }

        match &outcome {
            Ok(response) => {
                state.output_text = response.translated_text.clone();
                state.clear_error();
            }
            Err(error) => {
                state.output_text.clear();
                state.error_message = Some(user_message(error));
                state.last_error = Some(error.clone());
            }
        }
        state.is_translating = false;
        true
    });

    match (&outcome, applied) {
        (_, false) => {
            tracing::debug!(session = %inner.id, generation, "Discarding superseded translation");
        }
        (Ok(_), true) => {
            tracing::debug!(session = %inner.id, generation, "Translation finished");
        }
        (Err(e), true) => {
            tracing::warn!(session = %inner.id, generation, "Translation failed: {}", e);
        }
    }
}
