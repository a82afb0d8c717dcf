use kanal::{AsyncReceiver, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yaku_core::TranslationSession;

use crate::events::{AppEvent, event_loop};
use crate::ui::render_loop;

/// Centralized channel management
pub struct ChannelSet {
    /// Blocking side for the stdin thread, async side for the event loop
    pub input: (Sender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        let (tx, rx) = kanal::bounded(64);
        Self {
            input: (tx, rx.to_async()),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    session: TranslationSession,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(session: TranslationSession) -> Self {
        Self {
            channels: ChannelSet::new(),
            session,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for whatever produces input events
    pub fn input_sender(&self) -> Sender<AppEvent> {
        self.channels.input.0.clone()
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Renderer
        tasks.spawn(render_loop(
            self.session.subscribe(),
            self.cancel_token.child_token(),
        ));

        // Event loop
        tasks.spawn(event_loop(
            self.session.clone(),
            self.channels.input.1.clone(),
            self.cancel_token.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.session.shutdown();
        self.cancel_token.cancel();
    }
}
