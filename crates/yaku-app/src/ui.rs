use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use yaku_core::SessionState;

/// Print session changes to stdout until cancelled
pub async fn render_loop(
    mut updates: watch::Receiver<SessionState>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut last = updates.borrow_and_update().clone();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        let current = updates.borrow_and_update().clone();
        for line in describe_changes(&last, &current) {
            println!("{line}");
        }
        last = current;
    }

    // flush whatever landed between the last change and cancellation
    let current = updates.borrow().clone();
    for line in describe_changes(&last, &current) {
        println!("{line}");
    }

    Ok(())
}

/// Lines worth showing for a transition between two snapshots
pub fn describe_changes(previous: &SessionState, current: &SessionState) -> Vec<String> {
    let mut lines = Vec::new();

    if (previous.source_language, previous.target_language)
        != (current.source_language, current.target_language)
    {
        lines.push(format!(
            "[{} → {}]",
            current.source_language.code(),
            current.target_language.code()
        ));
    }

    if current.is_translating && !previous.is_translating {
        lines.push("… translating".to_string());
    }

    if previous.is_translating && !current.is_translating && current.last_error.is_none() {
        lines.push(format!("→ {}", current.output_text));
    }

    if current.last_error.is_some()
        && current.last_error != previous.last_error
        && let Some(message) = &current.error_message
    {
        lines.push(format!("! {message}"));
    }

    if current.input_text.is_empty()
        && current.output_text.is_empty()
        && !(previous.input_text.is_empty() && previous.output_text.is_empty())
    {
        lines.push("(cleared)".to_string());
    }

    if current.is_copied && !previous.is_copied {
        lines.push("(copied)".to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use yaku_translator::TranslateError;
    use yaku_types::Language;

    use super::*;

    #[test]
    fn reports_translation_lifecycle() {
        let idle = SessionState {
            input_text: "Hello".into(),
            ..Default::default()
        };
        let busy = SessionState {
            is_translating: true,
            ..idle.clone()
        };
        let done = SessionState {
            output_text: "你好".into(),
            ..idle.clone()
        };

        assert_eq!(describe_changes(&idle, &busy), vec!["… translating"]);
        assert_eq!(describe_changes(&busy, &done), vec!["→ 你好"]);
    }

    #[test]
    fn reports_errors_once() {
        let busy = SessionState {
            input_text: "Hello".into(),
            is_translating: true,
            ..Default::default()
        };
        let failed = SessionState {
            is_translating: false,
            last_error: Some(TranslateError::Http(429)),
            error_message: Some("Translation failed: slow down".into()),
            ..busy.clone()
        };

        assert_eq!(
            describe_changes(&busy, &failed),
            vec!["! Translation failed: slow down"]
        );
        assert!(describe_changes(&failed, &failed).is_empty());
    }

    #[test]
    fn reports_language_swap_and_copy() {
        let before = SessionState {
            input_text: "a".into(),
            output_text: "b".into(),
            ..Default::default()
        };
        let after = SessionState {
            source_language: Language::Chinese,
            target_language: Language::English,
            input_text: "b".into(),
            output_text: "a".into(),
            is_copied: true,
            ..Default::default()
        };

        assert_eq!(describe_changes(&before, &after), vec!["[zh → en]", "(copied)"]);
    }
}
