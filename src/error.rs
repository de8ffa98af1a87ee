//! Error taxonomy for the generation pipeline.
//!
//! Only upstream call failures surface to the caller. Empty replies and
//! unparseable replies are absorbed by the parsers' fallback tiers and
//! never become errors.

use miette::Diagnostic;
use thiserror::Error;

/// The pipeline stage a failure originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Reframes,
    FeatureIdeas,
    SketchPrompts,
    Layouts,
    UserContext,
    Concepts,
    Images,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Stage::Reframes => "reframes",
            Stage::FeatureIdeas => "feature ideas",
            Stage::SketchPrompts => "sketch prompts",
            Stage::Layouts => "layouts",
            Stage::UserContext => "user context",
            Stage::Concepts => "concept explanations",
            Stage::Images => "images",
        };
        f.write_str(label)
    }
}

/// A failed generation attempt.
///
/// A failure in any of the five stage-1 text calls fails the whole
/// invocation (fail-fast); no partial text result is returned. Image
/// failures never appear here; they are captured per slot.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    /// An upstream text- or image-generation call failed.
    #[error("{stage} generation failed: {message}")]
    #[diagnostic(
        code(ideaforge::generate::upstream),
        help("The upstream service rejected the call. Retry by re-invoking the orchestrator.")
    )]
    Upstream { stage: Stage, message: String },

    /// The upstream service reported a rate limit; surfaced distinctly so
    /// callers can present retry-later wording.
    #[error("rate limit reached while generating {stage}")]
    #[diagnostic(
        code(ideaforge::generate::rate_limited),
        help("Wait a moment and re-invoke the orchestrator.")
    )]
    RateLimited { stage: Stage },

    /// Client construction or credential resolution failed.
    #[error("configuration error: {0}")]
    #[diagnostic(
        code(ideaforge::generate::config),
        help("Set OPENAI_API_KEY in the environment or a .env file.")
    )]
    Config(String),
}

impl GenerateError {
    /// Maps a client error onto the stage it occurred in.
    pub(crate) fn from_client(stage: Stage, err: crate::clients::ClientError) -> Self {
        match err {
            crate::clients::ClientError::RateLimited { .. } => GenerateError::RateLimited { stage },
            other => GenerateError::Upstream {
                stage,
                message: other.to_string(),
            },
        }
    }
}
