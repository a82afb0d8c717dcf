use yaku_core::TranslationSession;

/// Translate whatever input is still untranslated and wait for it to settle
pub async fn handle_finish(session: &TranslationSession) {
    if session.has_untranslated_input() {
        session.translate_now();
    }

    let mut updates = session.subscribe();
    if updates.wait_for(|state| !state.is_translating).await.is_err() {
        tracing::warn!("Session closed before translation settled");
    }
}
