//! Concept-explanation deriver.
//!
//! One additional text call turns the challenge plus the visual prompts
//! into a short explanation per sketch. The reply is segmented with the
//! generic list-block rules and shaped to exactly three entries (the
//! image-slot capacity), padding with a fixed sentence or truncating as
//! needed. A failed call degrades to the raw prompts instead of failing
//! the invocation.

use crate::clients::TextGenerator;
use crate::parser::split_list_blocks;
use crate::prompts::CONCEPT_INSTRUCTION;

/// Fixed explanation count, matching the image-slot capacity.
pub const CONCEPT_CAPACITY: usize = 3;

const PADDING_SENTENCE: &str =
    "This sketch explores a design approach for addressing the challenge.";

/// Derives exactly [`CONCEPT_CAPACITY`] explanations for the sketches.
pub async fn derive_concepts(
    client: &dyn TextGenerator,
    challenge: &str,
    sketch_prompts: &[String],
) -> Vec<String> {
    let prompt = build_prompt(challenge, sketch_prompts);
    match client.complete(CONCEPT_INSTRUCTION, &prompt).await {
        Ok(reply) => shape(split_list_blocks(&reply)),
        Err(err) => {
            tracing::warn!(
                error = %err,
                "concept explanation call failed; substituting sketch prompts"
            );
            shape(sketch_prompts.to_vec())
        }
    }
}

fn build_prompt(challenge: &str, sketch_prompts: &[String]) -> String {
    let numbered = (0..CONCEPT_CAPACITY)
        .map(|i| {
            let prompt = sketch_prompts.get(i).map_or("N/A", String::as_str);
            format!("{}. {prompt}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Design challenge: {challenge}\n\n\
         Three visual sketch concepts have been created for this challenge. For each \
         sketch concept below, explain in 1-2 sentences the design idea being explored: \
         what approach it represents and what problem it addresses.\n\n\
         Sketch concepts:\n{numbered}\n\n\
         Format as numbered explanations, one per line."
    )
}

/// Pads or truncates to the fixed capacity.
fn shape(mut explanations: Vec<String>) -> Vec<String> {
    explanations.retain(|e| !e.trim().is_empty());
    explanations.truncate(CONCEPT_CAPACITY);
    while explanations.len() < CONCEPT_CAPACITY {
        explanations.push(PADDING_SENTENCE.to_string());
    }
    explanations
}
