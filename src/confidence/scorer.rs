//! Multi-signal confidence fusion: pattern, context, frequency, and NER
//! sub-scores combined into a single calibrated confidence per match.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classifier::redact;
use crate::entities::{Entity, EntityType};
use crate::model::{Category, Sensitivity};

use super::thresholds::{ConfidenceThresholds, ConfidenceWeights};

/// A single unredacted regex finding, as produced internally by the
/// classifier before redaction — the confidence layer needs the raw value
/// to locate it within `content` and test entity confirmation, so it
/// operates on this rather than the already-masked public `Match`.
#[derive(Debug, Clone)]
pub struct RegexMatch {
    pub rule_name: String,
    pub category: Category,
    pub sensitivity: Sensitivity,
    pub value: String,
    pub count: usize,
    /// Confidence the pattern layer itself assigns this rule's match
    /// (`1.0` when the rule's validators passed, lower for a pattern-only
    /// rule with no validator).
    pub regex_confidence: f64,
}

/// Priors a [`crate::entities::EntityRecognizer`] or
/// [`DocumentClassifier`](super::DocumentClassifier) may have produced for
/// the document as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    MedicalRecord,
    FinancialStatement,
    TechnicalDocument,
    Other,
}

/// A confidence-scored, redaction-safe finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedMatch {
    pub rule_name: String,
    pub category: Category,
    pub sensitivity: Sensitivity,
    pub redacted_value: String,
    pub count: usize,
    pub regex_confidence: f64,
    pub ml_confidence: f64,
    pub combined_confidence: f64,
    pub entity_type: Option<EntityType>,
    pub context_score: f64,
}

static NEGATIVE_INDICATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(example|test|sample|demo|fake|placeholder|dummy|mock|xxx)\b")
        .expect("negative indicator pattern must compile")
});

fn category_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Pii => &["ssn", "social security", "name", "address", "email", "phone", "dob", "passport"],
        Category::Phi => &["patient", "medical", "diagnosis", "health", "prescription", "treatment", "hospital"],
        Category::Pci => &["card", "payment", "account", "bank", "credit", "routing", "iban", "transaction"],
        Category::Secrets => &["key", "secret", "password", "token", "credential", "api"],
        Category::Custom => &[],
    }
}

fn pattern_score(regex_confidence: f64) -> f64 {
    let mut score = 0.5;
    if regex_confidence >= 0.8 {
        score += 0.4;
    }
    if regex_confidence >= 0.9 {
        score += 0.1;
    }
    score.min(1.0)
}

fn context_score(context: &str, category: Category) -> f64 {
    if context.is_empty() {
        return 0.5;
    }
    let lower = context.to_lowercase();
    let keyword_hits = category_keywords(category)
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count();
    let mut score: f64 = 0.3 + (0.15 * keyword_hits as f64).min(0.6);
    if NEGATIVE_INDICATOR.is_match(&lower) {
        score -= 0.3;
    }
    score.clamp(0.0, 1.0)
}

fn frequency_score(count: usize) -> f64 {
    match count {
        0 => 0.0,
        1 => 0.6,
        2..=5 => 0.8,
        6..=20 => 0.9,
        _ => 0.7,
    }
}

fn ner_score(ner_ran: bool, entity_confirmed: bool, entity_type_present: bool) -> f64 {
    if entity_confirmed {
        0.95
    } else if ner_ran && entity_type_present {
        0.4
    } else {
        0.5
    }
}

/// Extracts `content[max(0, idx - window) .. min(len, idx + value.len() + window)]`,
/// or an empty string if `value` doesn't occur in `content`.
#[must_use]
pub fn context_window(content: &str, value: &str, window: usize) -> String {
    let Some(idx) = content.find(value) else {
        return String::new();
    };
    let start = idx.saturating_sub(window);
    let end = (idx + value.len() + window).min(content.len());
    content[start..end].to_string()
}

fn entity_confirmed(entities: &[Entity], value: &str) -> Option<EntityType> {
    entities
        .iter()
        .find(|e| e.text == value || e.text.contains(value))
        .map(|e| e.entity_type)
}

fn document_type_adjustment(doc_type: Option<DocumentType>, category: Category) -> f64 {
    match (doc_type, category) {
        (Some(DocumentType::MedicalRecord), Category::Phi) => 1.15,
        (Some(DocumentType::FinancialStatement), Category::Pci) => 1.15,
        (Some(DocumentType::TechnicalDocument), _) => 0.85,
        _ => 1.0,
    }
}

/// Fuses `regex_confidence` and `ml_confidence` with weight `w`; falls
/// back to `0.5` if `w` is outside `[0, 1]`.
#[must_use]
pub fn combine(regex_confidence: f64, ml_confidence: f64, w: f64) -> f64 {
    let w = if (0.0..=1.0).contains(&w) { w } else { 0.5 };
    (regex_confidence * w + ml_confidence * (1.0 - w)).clamp(0.0, 1.0)
}

/// Fuses C1's raw matches with C3's entities into calibrated,
/// redaction-safe [`EnhancedMatch`]es.
pub struct ConfidenceScorer {
    weights: ConfidenceWeights,
    thresholds: ConfidenceThresholds,
    context_window_size: usize,
    combine_weight: f64,
}

impl ConfidenceScorer {
    #[must_use]
    pub fn new(weights: ConfidenceWeights, thresholds: ConfidenceThresholds) -> Self {
        Self {
            weights,
            thresholds,
            context_window_size: 200,
            combine_weight: 0.4,
        }
    }

    #[must_use]
    pub fn with_context_window_size(mut self, size: usize) -> Self {
        self.context_window_size = size;
        self
    }

    #[must_use]
    pub fn with_combine_weight(mut self, w: f64) -> Self {
        self.combine_weight = w;
        self
    }

    #[must_use]
    pub fn thresholds(&self) -> &ConfidenceThresholds {
        &self.thresholds
    }

    /// Scores every regex match against `content` and `entities`,
    /// applying `doc_type`'s adjustment where applicable.
    #[must_use]
    pub fn enhance(
        &self,
        content: &str,
        regex_matches: &[RegexMatch],
        entities: &[Entity],
        doc_type: Option<DocumentType>,
        ner_ran: bool,
    ) -> Vec<EnhancedMatch> {
        regex_matches
            .iter()
            .map(|m| self.enhance_one(content, m, entities, doc_type, ner_ran))
            .collect()
    }

    fn enhance_one(
        &self,
        content: &str,
        m: &RegexMatch,
        entities: &[Entity],
        doc_type: Option<DocumentType>,
        ner_ran: bool,
    ) -> EnhancedMatch {
        let context = context_window(content, &m.value, self.context_window_size);
        let confirmed_type = entity_confirmed(entities, &m.value);

        let pattern = pattern_score(m.regex_confidence) * self.weights.pattern;
        let context_s = context_score(&context, m.category);
        let context_weighted = context_s * self.weights.context;
        let frequency = frequency_score(m.count) * self.weights.frequency;
        let ner = ner_score(ner_ran, confirmed_type.is_some(), confirmed_type.is_some())
            * self.weights.ner;

        let mut ml_confidence = (pattern + context_weighted + frequency + ner).min(1.0);
        ml_confidence = (ml_confidence * document_type_adjustment(doc_type, m.category)).min(1.0);

        let combined_confidence = combine(m.regex_confidence, ml_confidence, self.combine_weight);

        EnhancedMatch {
            rule_name: m.rule_name.clone(),
            category: m.category,
            sensitivity: m.sensitivity,
            redacted_value: redact(&m.value),
            count: m.count,
            regex_confidence: m.regex_confidence,
            ml_confidence,
            combined_confidence,
            entity_type: confirmed_type,
            context_score: context_s,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> ConfidenceScorer {
        ConfidenceScorer::new(ConfidenceWeights::default(), ConfidenceThresholds::default())
    }

    #[test]
    fn ssn_scenario_yields_expected_combined_range() {
        let content = "Customer SSN: 123-45-6789 on file";
        let entities = vec![Entity {
            text: "123-45-6789".to_string(),
            entity_type: EntityType::Ssn,
            start_offset: 14,
            end_offset: 25,
            confidence: 0.90,
        }];
        let regex_matches = vec![RegexMatch {
            rule_name: "ssn".to_string(),
            category: Category::Pii,
            sensitivity: Sensitivity::Critical,
            value: "123-45-6789".to_string(),
            count: 1,
            regex_confidence: 1.0,
        }];
        let enhanced = scorer().enhance(content, &regex_matches, &entities, None, true);
        let m = &enhanced[0];
        assert!((0.70..=1.0).contains(&m.combined_confidence));
        assert_eq!(m.redacted_value, "12*******89");
    }

    #[test]
    fn pattern_score_caps_at_full_credit() {
        assert_eq!(pattern_score(1.0), 1.0);
        assert_eq!(pattern_score(0.5), 0.5);
        assert_eq!(pattern_score(0.8), 0.9);
    }

    #[test]
    fn context_score_penalizes_negative_indicators() {
        let with_negative = context_score("this is a test example value", Category::Pii);
        let without = context_score("ssn on file for customer", Category::Pii);
        assert!(with_negative < without);
    }

    #[test]
    fn frequency_score_buckets() {
        assert_eq!(frequency_score(1), 0.6);
        assert_eq!(frequency_score(3), 0.8);
        assert_eq!(frequency_score(10), 0.9);
        assert_eq!(frequency_score(50), 0.7);
    }

    #[test]
    fn combine_falls_back_to_half_weight_outside_unit_interval() {
        assert_eq!(combine(1.0, 0.0, 1.5), combine(1.0, 0.0, 0.5));
    }

    #[test]
    fn combine_is_monotone_in_regex_confidence() {
        let low = combine(0.2, 0.5, 0.4);
        let high = combine(0.9, 0.5, 0.4);
        assert!(high >= low);
    }

    #[test]
    fn document_type_adjustment_boosts_matching_pairs() {
        assert_eq!(document_type_adjustment(Some(DocumentType::MedicalRecord), Category::Phi), 1.15);
        assert_eq!(
            document_type_adjustment(Some(DocumentType::TechnicalDocument), Category::Pii),
            0.85
        );
        assert_eq!(document_type_adjustment(None, Category::Pii), 1.0);
    }

    #[test]
    fn context_window_handles_missing_value() {
        assert_eq!(context_window("hello world", "absent", 10), "");
    }
}
