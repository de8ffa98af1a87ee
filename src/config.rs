//! Configuration for the upstream clients and the orchestrator.
//!
//! The upstream credential is resolved once, at construction, from the
//! process environment (with `.env` support via dotenvy). It is read-only
//! for the life of the process; nothing in the pipeline mutates it.

use miette::Diagnostic;
use thiserror::Error;

use crate::images::JoinStrategy;

/// Default OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found in environment")]
    #[diagnostic(
        code(ideaforge::config::missing_api_key),
        help("Set OPENAI_API_KEY in your environment or a .env file.")
    )]
    MissingApiKey,
}

/// Connection settings for [`crate::clients::OpenAiClient`].
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// API root; injectable so tests can point the client at a mock server.
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub image_size: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl OpenAiConfig {
    /// Settings with library defaults for everything but the credential.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: "gpt-4".to_string(),
            image_model: "dall-e-3".to_string(),
            image_size: "1024x1024".to_string(),
            temperature: 0.8,
            max_tokens: 1200,
        }
    }

    /// Resolves the credential from `OPENAI_API_KEY` (loading `.env` first)
    /// and the API root from `OPENAI_BASE_URL` when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Orchestrator behavior knobs.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Maximum number of visual prompts carried into the image stage.
    pub sketch_capacity: usize,
    /// Join policy for the image batch. Isolate-all by default: one
    /// failed render must not void its siblings.
    pub image_join: JoinStrategy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sketch_capacity: 3,
            image_join: JoinStrategy::IsolateAll,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_image_join(mut self, strategy: JoinStrategy) -> Self {
        self.image_join = strategy;
        self
    }
}
