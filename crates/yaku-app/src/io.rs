use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use kanal::Sender;

use crate::events::{AppEvent, parse_line};

/// Read stdin lines on a dedicated thread and forward them as events.
///
/// Blocking reads stay off the runtime so shutdown never waits on the
/// terminal. End of input sends [`AppEvent::Finish`].
pub fn spawn_stdin_reader(events_tx: Sender<AppEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("yaku-stdin".into())
        .spawn(move || {
            let stdin = io::stdin();
            forward_lines(stdin.lock(), &events_tx);
        })
}

/// Parse each line and send it on; stops when the receiver is gone
pub fn forward_lines<R: BufRead>(reader: R, events_tx: &Sender<AppEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            Ok(event) => {
                if events_tx.send(event).is_err() {
                    return;
                }
            }
            Err(message) => eprintln!("{message}"),
        }
    }

    let _ = events_tx.send(AppEvent::Finish);
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn lines_become_events_then_finish() {
        let (tx, rx) = kanal::unbounded::<AppEvent>();
        let input = Cursor::new("Hello\n:bogus\n:swap\n");

        forward_lines(input, &tx);

        let events: Vec<AppEvent> = (0..3).map(|_| rx.recv().unwrap()).collect();
        assert!(rx.is_empty());
        assert_eq!(
            events,
            vec![
                AppEvent::TextInput("Hello".to_string()),
                AppEvent::Swap,
                AppEvent::Finish,
            ]
        );
    }

    #[test]
    fn stops_when_receiver_dropped() {
        let (tx, rx) = kanal::unbounded::<AppEvent>();
        drop(rx);

        forward_lines(Cursor::new("a\nb\n"), &tx);
    }
}
