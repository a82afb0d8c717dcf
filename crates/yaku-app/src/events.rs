use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use yaku_core::TranslationSession;
use yaku_types::Language;

pub mod finish;
pub mod parse;

use finish::handle_finish;
pub use parse::parse_line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TextInput(String),
    TranslateNow,
    Swap,
    Clear,
    Copy,
    SetLanguages { source: Language, target: Language },
    /// Input ended: translate anything pending, then stop
    Finish,
    Quit,
}

/// App's main loop
pub async fn event_loop(
    session: TranslationSession,
    events_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!("[EVENT_LOOP] Waiting for events");

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = events_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => {
                    tracing::debug!("[EVENT_LOOP] Input channel closed");
                    break;
                }
            },
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);

        if !handle_event(&session, event).await {
            break;
        }
    }

    session.shutdown();
    cancel.cancel();
    Ok(())
}

/// Apply one event to the session; `false` stops the loop
async fn handle_event(session: &TranslationSession, event: AppEvent) -> bool {
    match event {
        AppEvent::TextInput(text) => session.set_input_text(text),
        AppEvent::TranslateNow => session.translate_now(),
        AppEvent::Swap => session.swap_languages(),
        AppEvent::Clear => session.clear(),
        AppEvent::Copy => session.copy_result(),
        AppEvent::SetLanguages { source, target } => session.set_languages(source, target),
        AppEvent::Finish => {
            handle_finish(session).await;
            return false;
        }
        AppEvent::Quit => return false,
    }

    true
}
