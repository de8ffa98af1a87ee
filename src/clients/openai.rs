//! reqwest-backed OpenAI client for chat completions and image generation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ClientError, GeneratedImage, ImageGenerator, TextGenerator};
use crate::config::OpenAiConfig;

/// Client for an OpenAI-compatible API, implementing both generation
/// seams over one connection pool.
///
/// The base URL is part of [`OpenAiConfig`], so integration tests can
/// point the client at a local mock server instead of the hosted service.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Convenience constructor resolving the credential from the
    /// environment.
    pub fn from_env() -> Result<Self, crate::config::ConfigError> {
        Ok(Self::new(OpenAiConfig::from_env()?))
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &body));
        }

        response.json().await.map_err(|e| ClientError::Upstream {
            status: Some(status.as_u16()),
            message: format!("malformed response body: {e}"),
        })
    }
}

/// Maps an error status and body onto the client error taxonomy,
/// preserving the service's own message when it sends one.
fn classify_failure(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        });
    if status == 429 || message.to_lowercase().contains("rate limit") {
        ClientError::RateLimited { message }
    } else {
        ClientError::Upstream {
            status: Some(status),
            message,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    #[instrument(skip(self, instruction, prompt), fields(model = %self.config.text_model), err)]
    async fn complete(&self, instruction: &str, prompt: &str) -> Result<String, ClientError> {
        let request = ChatRequest {
            model: &self.config.text_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instruction,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        let reply: ChatResponse = self.post_json("/chat/completions", &request).await?;
        // No choices or empty content is a legitimate empty reply; the
        // parsers' fallback tiers take over from here.
        Ok(reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.image_model), err)]
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError> {
        let request = ImageRequest {
            model: &self.config.image_model,
            prompt,
            size: &self.config.image_size,
            quality: "standard",
            n: 1,
        };
        let reply: ImageResponse = self.post_json("/images/generations", &request).await?;
        let first = reply.data.into_iter().next();
        match first.and_then(|d| d.url.map(|url| (url, d.revised_prompt))) {
            Some((url, revised_prompt)) => Ok(GeneratedImage {
                url,
                revised_prompt,
            }),
            None => Err(ClientError::Upstream {
                status: None,
                message: "image response carried no URL".to_string(),
            }),
        }
    }
}

// Wire shapes. Only the fields this crate reads are modeled.

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u8,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
    revised_prompt: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
