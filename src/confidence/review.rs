//! The human-review gate: deciding whether a classification needs manual
//! review, and the priority a queued item is served at.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Category, Sensitivity};

use super::scorer::EnhancedMatch;
use super::thresholds::ConfidenceThresholds;

/// Why a classification was routed to human review. Checked in this fixed
/// priority order; the first applicable reason wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewReason {
    LowConfidence,
    ConflictingPredictions,
    SensitiveData,
}

impl ReviewReason {
    fn priority_weight(self) -> i32 {
        match self {
            Self::SensitiveData => 50,
            Self::ConflictingPredictions => 30,
            Self::LowConfidence => 20,
        }
    }
}

/// The outcome of the review gate for a full set of enhanced matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDecision {
    pub requires_review: bool,
    pub reason: Option<ReviewReason>,
}

/// Evaluates the review gate over `matches` against `thresholds`.
///
/// Checks in order: any match in `[require_review, auto_approve)` →
/// `LowConfidence`; more than two distinct categories among matches →
/// `ConflictingPredictions`; any Critical match below `auto_approve` →
/// `SensitiveData`. The first applicable reason is returned.
#[must_use]
pub fn evaluate(matches: &[EnhancedMatch], thresholds: &ConfidenceThresholds) -> ReviewDecision {
    let low_confidence = matches.iter().any(|m| {
        m.combined_confidence >= thresholds.require_review
            && m.combined_confidence < thresholds.auto_approve
    });
    if low_confidence {
        return ReviewDecision {
            requires_review: true,
            reason: Some(ReviewReason::LowConfidence),
        };
    }

    let categories: HashSet<Category> = matches.iter().map(|m| m.category).collect();
    if categories.len() > 2 {
        return ReviewDecision {
            requires_review: true,
            reason: Some(ReviewReason::ConflictingPredictions),
        };
    }

    let sensitive_data = matches
        .iter()
        .any(|m| m.sensitivity == Sensitivity::Critical && m.combined_confidence < thresholds.auto_approve);
    if sensitive_data {
        return ReviewDecision {
            requires_review: true,
            reason: Some(ReviewReason::SensitiveData),
        };
    }

    ReviewDecision {
        requires_review: false,
        reason: None,
    }
}

/// Computes a review-queue item's integer priority: reason weight plus a
/// confidence bucket (`< 0.5` → `+30`, `< 0.7` → `+20`, else `+0`). Higher
/// priority is served first; items with equal priority are served FIFO by
/// `created_at`.
#[must_use]
pub fn queue_priority(reason: ReviewReason, confidence: f64) -> i32 {
    let bucket = if confidence < 0.5 {
        30
    } else if confidence < 0.7 {
        20
    } else {
        0
    };
    reason.priority_weight() + bucket
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn enhanced(category: Category, sensitivity: Sensitivity, combined: f64) -> EnhancedMatch {
        EnhancedMatch {
            rule_name: "rule".to_string(),
            category,
            sensitivity,
            redacted_value: "**".to_string(),
            count: 1,
            regex_confidence: 1.0,
            ml_confidence: combined,
            combined_confidence: combined,
            entity_type: None,
            context_score: 0.5,
        }
    }

    #[test]
    fn low_confidence_reason_wins_when_applicable() {
        let thresholds = ConfidenceThresholds::default();
        let matches = vec![enhanced(Category::Pii, Sensitivity::Medium, 0.6)];
        let decision = evaluate(&matches, &thresholds);
        assert!(decision.requires_review);
        assert_eq!(decision.reason, Some(ReviewReason::LowConfidence));
    }

    #[test]
    fn conflicting_predictions_from_three_categories() {
        let thresholds = ConfidenceThresholds::default();
        let matches = vec![
            enhanced(Category::Pii, Sensitivity::Low, 0.95),
            enhanced(Category::Phi, Sensitivity::Low, 0.95),
            enhanced(Category::Pci, Sensitivity::Low, 0.95),
        ];
        let decision = evaluate(&matches, &thresholds);
        assert_eq!(decision.reason, Some(ReviewReason::ConflictingPredictions));
    }

    #[test]
    fn sensitive_data_reason_for_low_confidence_critical_match() {
        let thresholds = ConfidenceThresholds::default();
        let matches = vec![enhanced(Category::Pii, Sensitivity::Critical, 0.90)];
        // Below require_review so the low-confidence check doesn't preempt it.
        let matches_below = vec![enhanced(Category::Pii, Sensitivity::Critical, 0.30)];
        assert!(!evaluate(&matches, &thresholds).requires_review);
        let decision = evaluate(&matches_below, &thresholds);
        assert_eq!(decision.reason, Some(ReviewReason::SensitiveData));
    }

    #[test]
    fn clean_high_confidence_single_category_needs_no_review() {
        let thresholds = ConfidenceThresholds::default();
        let matches = vec![enhanced(Category::Pii, Sensitivity::Low, 0.95)];
        let decision = evaluate(&matches, &thresholds);
        assert!(!decision.requires_review);
        assert_eq!(decision.reason, None);
    }

    #[test]
    fn queue_priority_orders_reasons_and_confidence_buckets() {
        assert_eq!(queue_priority(ReviewReason::SensitiveData, 0.3), 80);
        assert_eq!(queue_priority(ReviewReason::ConflictingPredictions, 0.6), 50);
        assert_eq!(queue_priority(ReviewReason::LowConfidence, 0.9), 20);
    }
}
