//! The [`EntityRecognizer`] capability trait and its baseline and
//! compositing implementations.

use async_trait::async_trait;

use super::entity::{Entity, deduplicate};
use super::patterns::{EntityPattern, builtin_patterns};

/// Recognizes typed entity spans within document text.
///
/// `async_trait` so a model-backed implementation outside this crate can
/// call out to a hosted model without forcing every caller onto a
/// blocking API, matching the way the crate's other capability traits are
/// shaped.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entities in `text`. Pure: the same `text` always yields
    /// the same (unordered) entity set.
    async fn recognize_entities(&self, text: &str) -> Vec<Entity>;
}

/// The rule-based baseline recognizer: regex patterns with per-pattern
/// confidence priors and optional validators.
pub struct RuleEntityRecognizer {
    patterns: Vec<EntityPattern>,
}

impl RuleEntityRecognizer {
    /// Builds a recognizer from the built-in pattern catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: builtin_patterns(),
        }
    }

    /// Builds a recognizer from an explicit pattern list.
    #[must_use]
    pub fn with_patterns(patterns: Vec<EntityPattern>) -> Self {
        Self { patterns }
    }

    /// Synchronous core used by both the trait method and by other
    /// in-crate callers that don't want to cross an `async` boundary for a
    /// CPU-bound scan.
    #[must_use]
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut found = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                let value = m.as_str();
                if let Some(validator) = pattern.validator {
                    if !validator(value) {
                        continue;
                    }
                }
                found.push(Entity {
                    text: value.to_string(),
                    entity_type: pattern.entity_type,
                    start_offset: m.start(),
                    end_offset: m.end(),
                    confidence: pattern.confidence_prior,
                });
            }
        }
        deduplicate(found)
    }
}

impl Default for RuleEntityRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityRecognizer for RuleEntityRecognizer {
    async fn recognize_entities(&self, text: &str) -> Vec<Entity> {
        self.recognize(text)
    }
}

/// Combines a rule-based recognizer with a supplementary recognizer
/// (typically model-backed): rule entities are always kept; supplementary
/// entities are appended only where they don't overlap a rule entity.
pub struct CompositeRecognizer {
    rule_recognizer: RuleEntityRecognizer,
    supplementary: Box<dyn EntityRecognizer>,
}

impl CompositeRecognizer {
    #[must_use]
    pub fn new(rule_recognizer: RuleEntityRecognizer, supplementary: Box<dyn EntityRecognizer>) -> Self {
        Self {
            rule_recognizer,
            supplementary,
        }
    }
}

fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.start_offset < b.end_offset && b.start_offset < a.end_offset
}

#[async_trait]
impl EntityRecognizer for CompositeRecognizer {
    async fn recognize_entities(&self, text: &str) -> Vec<Entity> {
        let rule_entities = self.rule_recognizer.recognize(text);
        let model_entities = self.supplementary.recognize_entities(text).await;

        let mut combined = rule_entities.clone();
        for candidate in model_entities {
            if !rule_entities.iter().any(|r| overlaps(r, &candidate)) {
                combined.push(candidate);
            }
        }
        combined
    }
}

// ── Tests ──────────────────────────────────────────────────────────────
