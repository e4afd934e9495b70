//! Groq chat completion client
//!
//! Speaks the OpenAI-compatible `POST {base_url}/chat/completions` protocol.

use biztone_common::config::CompletionConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{CompletionClient, CompletionError, CompletionRequest};

const USER_AGENT: &str = concat!("BizTone/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`GroqClient`]
#[derive(Clone)]
pub struct GroqSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GroqSettings {
    pub fn from_config(api_key: String, config: &CompletionConfig) -> Self {
        Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl std::fmt::Debug for GroqSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Groq API client
pub struct GroqClient {
    http_client: reqwest::Client,
    settings: GroqSettings,
}

impl GroqClient {
    pub fn new(settings: GroqSettings) -> Result<Self, CompletionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CompletionError::Build(e.to_string()))?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Join `path` onto the configured base URL
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn map_transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.settings.timeout)
        } else {
            CompletionError::Network(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for GroqClient {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.settings.model,
            messages: request
                .messages
                .iter()
                .map(|m| ChatCompletionMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            model = %self.settings.model,
            messages = body.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(CompletionError::Api(status.as_u16(), text));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| CompletionError::Parse(e.to_string()))?;

        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyCompletion)
    }
}

// OpenAI-compatible Chat Completions API types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
    usage: Option<ChatCompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base_url(base_url: &str) -> GroqClient {
        GroqClient::new(GroqSettings {
            api_key: "gsk_test".to_string(),
            model: "test-model".to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_api_url_trailing_slash() {
        let client = client_with_base_url("https://api.groq.com/openai/v1/");
        assert_eq!(
            client.api_url("chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_api_url_strips_leading_slash_from_path() {
        let client = client_with_base_url("http://localhost:8080/v1");
        assert_eq!(
            client.api_url("/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_settings_debug_redacts_key() {
        let settings = GroqSettings::from_config(
            "gsk_secret".to_string(),
            &CompletionConfig::default(),
        );
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("gsk_secret"));
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_response_without_usage_parses() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#)
                .unwrap();
        assert!(parsed.usage.is_none());
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hi"));
    }
}
