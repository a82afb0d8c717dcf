pub mod client;
pub mod error;
pub mod prompt;
pub mod service;
pub mod transport;

use yaku_config::ProviderConfig;
use yaku_types::{TranslationRequest, TranslationResponse};

pub use client::ChatCompletionClient;
pub use error::TranslateError;
pub use service::TranslationService;
pub use transport::{HttpReply, HttpTransport, ReqwestTransport};

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate one request using the given provider settings snapshot.
    ///
    /// `None` means the settings collaborator has nothing configured.
    async fn translate(
        &self,
        request: &TranslationRequest,
        config: Option<&ProviderConfig>,
    ) -> Result<TranslationResponse, TranslateError>;
}
