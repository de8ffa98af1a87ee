//! Typed records produced by the generation pipeline.
//!
//! Every type here is created fresh per generation request, lives only for
//! the duration of producing the response, and is serializable so the
//! caller can hand a derived subset to an external session store.
//!
//! Ordering is user-visible: themes appear in the order they were
//! discovered in the source reply, and items keep their relative order
//! within a theme.

use serde::{Deserialize, Serialize};

/// A named grouping of related generated items.
///
/// The item type varies per grammar: reframes collect plain statements
/// (`Theme<String>`), feature ideas collect [`FeatureIdea`] records, and
/// layout suggestions collect [`LayoutIdea`] records. Keeping the item
/// type concrete per grammar lets the rendering collaborator match
/// exhaustively instead of probing optional fields.
///
/// # Examples
///
/// ```
/// use ideaforge::ideas::Theme;
///
/// let theme = Theme::new("Safety")
///     .with_item("How might we improve lighting?".to_string());
/// assert_eq!(theme.name, "Safety");
/// assert_eq!(theme.items.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme<T> {
    /// Display label grouping the items.
    pub name: String,
    /// Items in discovery order.
    pub items: Vec<T>,
}

impl<T> Theme<T> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_item(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.items.extend(items);
        self
    }
}

/// A single feature suggestion with its (possibly empty) rationale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureIdea {
    pub feature: String,
    pub rationale: String,
}

impl FeatureIdea {
    #[must_use]
    pub fn new(feature: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            rationale: rationale.into(),
        }
    }
}

/// A layout suggestion: a title line plus the space-joined continuation
/// lines that followed it in the reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutIdea {
    pub title: String,
    pub description: String,
}

impl LayoutIdea {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A persona attached to a user segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub description: String,
}

/// One user segment parsed from the user-context reply.
///
/// Unlike the theme grammars, segments are a distinct top-level
/// structure: each carries its own optional persona and an ordered list
/// of key scenarios.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSegment {
    pub name: String,
    pub persona: Option<Persona>,
    pub scenarios: Vec<String>,
}

impl UserSegment {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            persona: None,
            scenarios: Vec::new(),
        }
    }
}

/// A fixed-position image result correlated by index to its input prompt.
///
/// Exactly one slot exists per visual prompt, at the same index,
/// regardless of success or failure. A failed request leaves `url` empty
/// and records the upstream message in `error`; siblings are unaffected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSlot {
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
    pub error: Option<String>,
}

impl ImageSlot {
    /// Slot for a successful image request.
    #[must_use]
    pub fn ok(url: impl Into<String>, revised_prompt: Option<String>) -> Self {
        Self {
            url: Some(url.into()),
            revised_prompt,
            error: None,
        }
    }

    /// Slot for a failed image request; the prompt's position is kept.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            url: None,
            revised_prompt: None,
            error: Some(message.into()),
        }
    }
}

/// The assembled output of one generation request. Immutable once built.
///
/// Every theme-bearing field and `user_segments` contain at least one
/// entry; the parsers' fallback tiers guarantee this unconditionally, so
/// a rendering layer always has something to show. `sketch_concepts` has
/// exactly as many entries as the image slot capacity (three).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Themed "How might we" reframes.
    pub reframes: Vec<Theme<String>>,
    /// Themed feature suggestions.
    pub feature_ideas: Vec<Theme<FeatureIdea>>,
    /// Visual prompts used for the image stage, in order.
    pub sketch_prompts: Vec<String>,
    /// One slot per sketch prompt, same index, success or failure.
    pub images: Vec<ImageSlot>,
    /// Concept explanation per sketch, always exactly three.
    pub sketch_concepts: Vec<String>,
    /// Themed layout suggestions.
    pub layouts: Vec<Theme<LayoutIdea>>,
    /// User segments with personas and key scenarios.
    pub user_segments: Vec<UserSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_builder_preserves_insertion_order() {
        let theme = Theme::new("Comfort")
            .with_item("first".to_string())
            .with_item("second".to_string());
        assert_eq!(theme.items, vec!["first", "second"]);
    }

    #[test]
    fn image_slot_roundtrips_through_json() {
        let slot = ImageSlot::failed("rate limited");
        let json = serde_json::to_string(&slot).unwrap();
        let parsed: ImageSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(slot, parsed);
        assert!(parsed.url.is_none());
    }
}
