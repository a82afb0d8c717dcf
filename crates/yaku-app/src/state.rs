use std::sync::Arc;

use tokio::sync::RwLock;
use yaku_config::Config;
use yaku_core::SharedSettings;

pub struct AppState {
    pub config: Config,
    /// Provider snapshot source shared with the session
    pub settings: SharedSettings,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let settings = Arc::new(RwLock::new(Some(config.translator.provider_config())));
        Self { config, settings }
    }
}
