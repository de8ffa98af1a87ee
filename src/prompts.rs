//! Embedded prompt templates and system instructions.
//!
//! Each of the five grammars reads one template containing a single
//! `{{challenge}}` placeholder. The templates live as plain text files
//! under `prompts/` and are embedded at compile time; substitution is a
//! plain string replace.
//!
//! The instruction strings describe the desired reply format, but the
//! upstream service is not guaranteed to honor them; that is exactly
//! why the parsers carry fallback tiers.

/// Placeholder replaced with the challenge text.
pub const CHALLENGE_PLACEHOLDER: &str = "{{challenge}}";

pub const REFRAME_TEMPLATE: &str = include_str!("../prompts/hmw.txt");
pub const FEATURE_TEMPLATE: &str = include_str!("../prompts/features.txt");
pub const VISUAL_TEMPLATE: &str = include_str!("../prompts/visual.txt");
pub const LAYOUT_TEMPLATE: &str = include_str!("../prompts/layout.txt");
pub const USER_CONTEXT_TEMPLATE: &str = include_str!("../prompts/user_context.txt");

pub const REFRAME_INSTRUCTION: &str = "You are a design strategist. Return multiple 'How might we' statements organized into 3-4 thematic categories. Format as 'Theme 1: [Name]' followed by numbered statements, then 'Theme 2: [Name]', etc.";

pub const FEATURE_INSTRUCTION: &str = "You are a product strategist. Return multiple feature ideas organized into 3-4 thematic categories. Format as 'Theme 1: [Name]' followed by numbered features, each as 'Feature — rationale'.";

pub const VISUAL_INSTRUCTION: &str = "You are a concept artist. Return exactly 3 visual prompt descriptions for an image-generation model, one per line, numbered 1-3.";

pub const LAYOUT_INSTRUCTION: &str = "You are a product designer. Return multiple layout suggestions organized into 3-4 thematic categories. Format as 'Theme 1: [Name]' followed by numbered layouts with titles and descriptions, then 'Theme 2: [Name]', etc.";

pub const USER_CONTEXT_INSTRUCTION: &str = "You are a user researcher. Return 2-3 user segments. Start each with 'User Segment N: [Name]', then a 'Persona:' block, then a 'Key Scenarios:' block with numbered scenarios.";

pub const CONCEPT_INSTRUCTION: &str = "You are a design strategist. For each sketch concept, provide a clear explanation (1-2 sentences) of the design idea or solution approach being explored. Focus on what the concept represents, not visual style.";

/// Replaces the `{{challenge}}` placeholder in a template.
#[must_use]
pub fn fill(template: &str, challenge: &str) -> String {
    template.replace(CHALLENGE_PLACEHOLDER, challenge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_carries_exactly_one_placeholder() {
        for template in [
            REFRAME_TEMPLATE,
            FEATURE_TEMPLATE,
            VISUAL_TEMPLATE,
            LAYOUT_TEMPLATE,
            USER_CONTEXT_TEMPLATE,
        ] {
            assert_eq!(template.matches(CHALLENGE_PLACEHOLDER).count(), 1);
        }
    }

    #[test]
    fn fill_substitutes_challenge_text() {
        let filled = fill(REFRAME_TEMPLATE, "improve the bus stop experience");
        assert!(filled.contains("improve the bus stop experience"));
        assert!(!filled.contains(CHALLENGE_PLACEHOLDER));
    }
}
