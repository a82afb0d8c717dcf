use async_trait::async_trait;
use yaku_config::ProviderConfig;
use yaku_config::translator::TranslatorConfig;
use yaku_types::{TranslationRequest, TranslationResponse};

use crate::Translator;
use crate::client::ChatCompletionClient;
use crate::error::TranslateError;
use crate::prompt::{self, DEFAULT_PROMPT_TEMPLATE, SYSTEM_PROMPT};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Prompt rendering plus a chat-completion call, per request
#[derive(Clone)]
pub struct TranslationService<T = ReqwestTransport> {
    client: ChatCompletionClient<T>,
}

impl TranslationService<ReqwestTransport> {
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Ok(Self::new(ChatCompletionClient::new(transport)))
    }
}

impl<T: HttpTransport> TranslationService<T> {
    pub fn new(client: ChatCompletionClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ChatCompletionClient<T> {
        &self.client
    }
}

/// Key first, so a missing key is reported as such rather than as missing settings
fn check_settings(config: Option<&ProviderConfig>) -> Result<&ProviderConfig, TranslateError> {
    let config = config.ok_or(TranslateError::NoSettings)?;

    if config.api_key.trim().is_empty() {
        return Err(TranslateError::NoApiKey);
    }

    if !config.is_configured() {
        return Err(TranslateError::NoSettings);
    }

    Ok(config)
}

#[async_trait]
impl<T: HttpTransport> Translator for TranslationService<T> {
    async fn translate(
        &self,
        request: &TranslationRequest,
        config: Option<&ProviderConfig>,
    ) -> Result<TranslationResponse, TranslateError> {
        let config = check_settings(config)?;

        let template = if config.prompt_template.trim().is_empty() {
            DEFAULT_PROMPT_TEMPLATE
        } else {
            config.prompt_template.as_str()
        };

        let user_prompt = prompt::render(
            template,
            request.source_language,
            request.target_language,
            &request.text,
        );

        tracing::debug!(
            "Translating {} chars {} -> {}",
            request.text.chars().count(),
            request.source_language.code(),
            request.target_language.code()
        );

        let translated = self
            .client
            .send(
                &config.endpoint_url,
                &config.api_key,
                &config.model_name,
                SYSTEM_PROMPT,
                &user_prompt,
            )
            .await?;

        Ok(TranslationResponse {
            translated_text: translated.trim().to_string(),
            source_language: request.source_language,
            target_language: request.target_language,
            original_text: request.text.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use yaku_types::Language;

    use super::*;
    use crate::client::tests::{ScriptedTransport, content_body, reply};

    fn config(api_key: &str, endpoint: &str, model: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.to_string(),
            endpoint_url: endpoint.to_string(),
            model_name: model.to_string(),
            prompt_template: "From {source_language} to {target_language}: {text}".to_string(),
        }
    }

    fn service(replies: Vec<Result<crate::transport::HttpReply, TranslateError>>) -> TranslationService<ScriptedTransport> {
        TranslationService::new(ChatCompletionClient::new(ScriptedTransport::new(replies)))
    }

    fn hello() -> TranslationRequest {
        TranslationRequest::new("Hello", Language::English, Language::Chinese)
    }

    #[tokio::test]
    async fn deepseek_scenario_falls_back_to_v1() {
        let service = service(vec![reply(404, ""), reply(200, &content_body("你好"))]);
        let config = config(
            "sk-test",
            "https://api.deepseek.com/chat/completions",
            "deepseek-chat",
        );

        let response = service.translate(&hello(), Some(&config)).await.unwrap();

        assert_eq!(
            response,
            TranslationResponse {
                translated_text: "你好".to_string(),
                source_language: Language::English,
                target_language: Language::Chinese,
                original_text: "Hello".to_string(),
            }
        );
        assert_eq!(service.client().transport().call_count(), 2);
    }

    #[tokio::test]
    async fn empty_key_rejected_without_http() {
        let service = service(vec![]);
        let config = config("", "https://api.deepseek.com/chat/completions", "deepseek-chat");

        let result = service.translate(&hello(), Some(&config)).await;

        assert_eq!(result, Err(TranslateError::NoApiKey));
        assert_eq!(service.client().transport().call_count(), 0);
    }

    #[tokio::test]
    async fn missing_or_partial_settings_rejected() {
        let service = service(vec![]);

        assert_eq!(
            service.translate(&hello(), None).await,
            Err(TranslateError::NoSettings)
        );
        assert_eq!(
            service
                .translate(&hello(), Some(&config("sk-test", " ", "deepseek-chat")))
                .await,
            Err(TranslateError::NoSettings)
        );
        assert_eq!(
            service
                .translate(
                    &hello(),
                    Some(&config("sk-test", "https://api.deepseek.com/chat/completions", ""))
                )
                .await,
            Err(TranslateError::NoSettings)
        );
        assert_eq!(service.client().transport().call_count(), 0);
    }

    #[tokio::test]
    async fn renders_prompt_and_fixed_system_message() {
        let service = service(vec![reply(200, &content_body("Hallo"))]);
        let config = config("sk-test", "https://example.com/chat/completions", "m");
        let request = TranslationRequest::new("Hello", Language::English, Language::German);

        service.translate(&request, Some(&config)).await.unwrap();

        let calls = service.client().transport().calls.lock().unwrap();
        let messages = &calls[0].2.messages;
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "From English to Deutsch: Hello");
        assert_eq!(calls[0].2.model, "m");
    }

    #[tokio::test]
    async fn blank_template_uses_default() {
        let service = service(vec![reply(200, &content_body("x"))]);
        let mut config = config("sk-test", "https://example.com/chat/completions", "m");
        config.prompt_template = String::new();

        service.translate(&hello(), Some(&config)).await.unwrap();

        let calls = service.client().transport().calls.lock().unwrap();
        assert_eq!(
            calls[0].2.messages[1].content,
            prompt::render(DEFAULT_PROMPT_TEMPLATE, Language::English, Language::Chinese, "Hello")
        );
    }

    #[tokio::test]
    async fn client_errors_pass_through_unchanged() {
        let service = service(vec![reply(429, "slow down")]);
        let config = config("sk-test", "https://example.com/chat/completions", "m");

        assert_eq!(
            service.translate(&hello(), Some(&config)).await,
            Err(TranslateError::Http(429))
        );
    }
}
