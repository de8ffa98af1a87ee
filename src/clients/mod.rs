//! Upstream service client seams.
//!
//! The orchestrator talks to the hosted text- and image-generation
//! services through the [`TextGenerator`] and [`ImageGenerator`] traits.
//! Production code uses [`OpenAiClient`]; tests substitute fakes without
//! touching any process-wide state, since the client is an explicitly
//! constructed value passed into the orchestrator.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

mod openai;

pub use openai::OpenAiClient;

/// An upstream call failure, before it is attributed to a pipeline stage.
#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    /// The service rejected the call (auth, bad request, server error,
    /// malformed response body).
    #[error("upstream call failed{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(ideaforge::client::upstream))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// HTTP 429 or rate-limit wording in the service's error message.
    #[error("rate limit reached: {message}")]
    #[diagnostic(
        code(ideaforge::client::rate_limited),
        help("Wait a moment before retrying.")
    )]
    RateLimited { message: String },

    /// The request never produced a response (connect error, timeout).
    #[error("transport error: {message}")]
    #[diagnostic(code(ideaforge::client::transport))]
    Transport { message: String },
}

/// One successfully generated image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Hosted URL of the rendered image.
    pub url: String,
    /// The service's rewritten prompt, when it reports one.
    pub revised_prompt: Option<String>,
}

/// Issues one request to a hosted text-generation service.
///
/// Returns the raw text of the first completion. An empty string is a
/// legitimate success: downstream parsers treat it as "no structured
/// data" and fall back to their placeholder tiers, never as an error.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, instruction: &str, prompt: &str) -> Result<String, ClientError>;
}

/// Issues one request per prompt to a hosted image-generation service.
///
/// The per-prompt batching (and its failure-isolation policy) lives in
/// [`crate::images`]; implementations only handle a single prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError>;
}
