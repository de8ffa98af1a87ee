//! Concurrent image generation.
//!
//! All prompts are dispatched at once and awaited together. How a failed
//! call is handled is a named policy: the default isolates each failure
//! into its slot so one bad render never costs the batch.

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use crate::clients::{ClientError, ImageGenerator};
use crate::ideas::ImageSlot;

/// Failure policy for a batch of concurrent calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinStrategy {
    /// Capture each failure in its own slot; the batch always completes.
    #[default]
    IsolateAll,
    /// Propagate the first failure and abandon the batch.
    FailFast,
}

/// Renders one image per prompt, preserving prompt order in the output.
///
/// Under [`JoinStrategy::IsolateAll`] the result is always `Ok` and every
/// slot records either a URL or the error that produced it.
pub async fn generate_images(
    client: &dyn ImageGenerator,
    prompts: &[String],
    strategy: JoinStrategy,
) -> Result<Vec<ImageSlot>, ClientError> {
    let calls = prompts.iter().map(|prompt| client.generate(prompt));
    let outcomes = join_all(calls).await;

    let mut slots = Vec::with_capacity(outcomes.len());
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(image) => slots.push(ImageSlot::ok(image.url, image.revised_prompt)),
            Err(err) => match strategy {
                JoinStrategy::IsolateAll => {
                    tracing::warn!(slot = index, error = %err, "image generation failed");
                    slots.push(ImageSlot::failed(err.to_string()));
                }
                JoinStrategy::FailFast => return Err(err),
            },
        }
    }
    Ok(slots)
}
