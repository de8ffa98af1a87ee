//! Generation orchestrator.
//!
//! One invocation fans a design challenge into five concurrent text
//! calls (reframes, feature ideas, visual prompts, layouts, user
//! context), parses each reply through its grammar, then runs the image
//! batch and the concept-explanation call concurrently and assembles a
//! [`GenerationResult`].
//!
//! The five text calls join fail-fast: a failure in any of them fails
//! the whole invocation with the stage attached, and no partial result
//! is returned. The image batch joins isolate-all by default, so one
//! failed render surfaces in its own slot without voiding siblings.

use std::sync::Arc;

use tracing::instrument;

use crate::clients::{ImageGenerator, OpenAiClient, TextGenerator};
use crate::concepts::derive_concepts;
use crate::config::{GeneratorConfig, OpenAiConfig};
use crate::error::{GenerateError, Stage};
use crate::ideas::GenerationResult;
use crate::images::generate_images;
use crate::parser::collect_marker_lines;
use crate::parser::features::parse_features;
use crate::parser::layouts::parse_layouts;
use crate::parser::reframes::parse_reframes;
use crate::parser::segments::parse_user_segments;
use crate::prompts;

const FALLBACK_SKETCH_PROMPTS: [&str; 3] = [
    "A clean pencil sketch of a user-centered interface concept addressing the design challenge",
    "A whiteboard-style sketch of an alternative interaction flow for the design challenge",
    "A rough concept sketch exploring an unconventional take on the design challenge",
];

/// Runs the full generation pipeline against injected client seams.
///
/// # Examples
///
/// ```no_run
/// use ideaforge::orchestrator::IdeaOrchestrator;
///
/// # async fn run() -> miette::Result<()> {
/// let orchestrator = IdeaOrchestrator::from_env()?;
/// let result = orchestrator
///     .generate("improve the bus stop experience")
///     .await?;
/// println!("{} reframe themes", result.reframes.len());
/// # Ok(())
/// # }
/// ```
pub struct IdeaOrchestrator {
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
    config: GeneratorConfig,
}

impl IdeaOrchestrator {
    /// Builds an orchestrator over explicit client seams.
    #[must_use]
    pub fn new(text: Arc<dyn TextGenerator>, images: Arc<dyn ImageGenerator>) -> Self {
        Self {
            text,
            images,
            config: GeneratorConfig::default(),
        }
    }

    /// Builds an orchestrator backed by [`OpenAiClient`] with settings
    /// resolved from the environment.
    pub fn from_env() -> Result<Self, GenerateError> {
        let config = OpenAiConfig::from_env().map_err(|err| GenerateError::Config(err.to_string()))?;
        let client = Arc::new(OpenAiClient::new(config));
        Ok(Self::new(client.clone(), client))
    }

    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Generates the full idea set for one design challenge.
    #[instrument(skip(self), fields(challenge_len = challenge.len()), err)]
    pub async fn generate(&self, challenge: &str) -> Result<GenerationResult, GenerateError> {
        let (reframe_reply, feature_reply, visual_reply, layout_reply, context_reply) = tokio::try_join!(
            self.text_stage(
                Stage::Reframes,
                prompts::REFRAME_INSTRUCTION,
                prompts::REFRAME_TEMPLATE,
                challenge
            ),
            self.text_stage(
                Stage::FeatureIdeas,
                prompts::FEATURE_INSTRUCTION,
                prompts::FEATURE_TEMPLATE,
                challenge
            ),
            self.text_stage(
                Stage::SketchPrompts,
                prompts::VISUAL_INSTRUCTION,
                prompts::VISUAL_TEMPLATE,
                challenge
            ),
            self.text_stage(
                Stage::Layouts,
                prompts::LAYOUT_INSTRUCTION,
                prompts::LAYOUT_TEMPLATE,
                challenge
            ),
            self.text_stage(
                Stage::UserContext,
                prompts::USER_CONTEXT_INSTRUCTION,
                prompts::USER_CONTEXT_TEMPLATE,
                challenge
            ),
        )?;

        let reframes = parse_reframes(&reframe_reply);
        let feature_ideas = parse_features(&feature_reply);
        let layouts = parse_layouts(&layout_reply);
        let user_segments = parse_user_segments(&context_reply);
        let sketch_prompts = sketch_prompts(&visual_reply, self.config.sketch_capacity);
        tracing::debug!(
            reframe_themes = reframes.len(),
            feature_themes = feature_ideas.len(),
            layout_themes = layouts.len(),
            segments = user_segments.len(),
            sketches = sketch_prompts.len(),
            "text stage parsed"
        );

        let (image_batch, sketch_concepts) = tokio::join!(
            generate_images(
                self.images.as_ref(),
                &sketch_prompts,
                self.config.image_join
            ),
            derive_concepts(self.text.as_ref(), challenge, &sketch_prompts),
        );
        let images = image_batch.map_err(|err| GenerateError::from_client(Stage::Images, err))?;

        Ok(GenerationResult {
            reframes,
            feature_ideas,
            sketch_prompts,
            images,
            sketch_concepts,
            layouts,
            user_segments,
        })
    }

    async fn text_stage(
        &self,
        stage: Stage,
        instruction: &str,
        template: &str,
        challenge: &str,
    ) -> Result<String, GenerateError> {
        let prompt = prompts::fill(template, challenge);
        self.text
            .complete(instruction, &prompt)
            .await
            .map_err(|err| GenerateError::from_client(stage, err))
    }
}

/// Reads visual prompts from the reply's marker lines, capped at the
/// configured capacity. A reply with no marker lines falls back to a
/// fixed generic trio so the image stage always has input.
fn sketch_prompts(reply: &str, capacity: usize) -> Vec<String> {
    let mut prompts = collect_marker_lines(reply);
    if prompts.is_empty() {
        prompts = FALLBACK_SKETCH_PROMPTS.map(String::from).to_vec();
    }
    prompts.truncate(capacity);
    prompts
}
