use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::transport::{HttpReply, HttpTransport, ReqwestTransport};

const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 2000;

/// Host whose older deployments only answer on the `/v1/` path
const LEGACY_HOST_MARKER: &str = "api.deepseek.com";
const CHAT_PATH: &str = "/chat/completions";
const V1_CHAT_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    pub fn new(model: &str, system_prompt: &str, user_prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            stream: false,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Reject an empty key up front; anything else is only checked loosely
pub fn validate_api_key(endpoint_url: &str, api_key: &str) -> Result<(), TranslateError> {
    let key = api_key.trim();

    if key.is_empty() {
        return Err(TranslateError::NoApiKey);
    }

    if endpoint_url.contains("deepseek.com") && !key.starts_with("sk-") {
        tracing::warn!("DeepSeek API keys typically start with 'sk-'");
    }

    if endpoint_url.contains("openai.com") && !key.starts_with("sk-") {
        tracing::warn!("OpenAI API keys typically start with 'sk-'");
    }

    if key.chars().count() < 20 {
        tracing::warn!("API key seems too short (expected 40+ characters)");
    }

    Ok(())
}

/// The `/v1/` variant of a legacy DeepSeek endpoint, if the endpoint qualifies
pub fn legacy_fallback_endpoint(endpoint_url: &str) -> Option<String> {
    if !endpoint_url.contains(LEGACY_HOST_MARKER) || endpoint_url.contains("/v1/") {
        return None;
    }

    let rewritten = endpoint_url.replace(CHAT_PATH, V1_CHAT_PATH);
    (rewritten != endpoint_url).then_some(rewritten)
}

fn parse_endpoint(endpoint_url: &str) -> Result<Url, TranslateError> {
    Url::parse(endpoint_url.trim())
        .map_err(|e| TranslateError::InvalidEndpoint(format!("{endpoint_url}: {e}")))
}

/// One-shot chat-completion caller
#[derive(Clone)]
pub struct ChatCompletionClient<T = ReqwestTransport> {
    transport: T,
}

impl<T: HttpTransport> ChatCompletionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the system and user prompts and return the assistant's reply, trimmed.
    ///
    /// A 404 from a legacy DeepSeek endpoint is retried once on the `/v1/`
    /// path; the retry's outcome is final.
    pub async fn send(
        &self,
        endpoint_url: &str,
        api_key: &str,
        model_name: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, TranslateError> {
        validate_api_key(endpoint_url, api_key)?;
        let api_key = api_key.trim();

        let url = parse_endpoint(endpoint_url)?;
        let request = ChatCompletionRequest::new(model_name, system_prompt, user_prompt);

        match self.post(&url, api_key, &request).await {
            Err(TranslateError::Http(404)) => {
                let Some(v1_endpoint) = legacy_fallback_endpoint(endpoint_url) else {
                    return Err(TranslateError::Http(404));
                };

                tracing::info!("Retrying with v1 endpoint: {}", v1_endpoint);
                let v1_url = parse_endpoint(&v1_endpoint)?;
                self.post(&v1_url, api_key, &request).await
            }
            other => other,
        }
    }

    async fn post(
        &self,
        url: &Url,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<String, TranslateError> {
        tracing::debug!("POST {} (model: {})", url, request.model);

        let reply = self.transport.post_json(url, api_key, request).await?;

        if !reply.is_success() {
            if reply.status == 404 {
                tracing::debug!("HTTP 404 from {}: {}", url, reply.body);
            } else {
                tracing::debug!("HTTP {} from {}", reply.status, url);
            }
            return Err(TranslateError::Http(reply.status));
        }

        extract_content(&reply)
    }
}

fn extract_content(reply: &HttpReply) -> Result<String, TranslateError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(&reply.body)
        .map_err(|e| TranslateError::Decode(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or(TranslateError::NoResult)
}
