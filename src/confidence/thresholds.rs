//! Validated configuration for the confidence scorer and review gate.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Weights applied to the four confidence sub-scores. Must sum to `1.0`
/// within a small epsilon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct ConfidenceWeights {
    #[validate(range(min = 0.0, max = 1.0))]
    pub pattern: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub context: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub frequency: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub ner: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            pattern: 0.35,
            context: 0.25,
            frequency: 0.15,
            ner: 0.25,
        }
    }
}

impl ConfidenceWeights {
    /// Validates range constraints and that the four weights sum to `1.0`
    /// within `1e-6`.
    ///
    /// # Errors
    ///
    /// Returns a [`validator::ValidationErrors`] if any weight is outside
    /// `[0, 1]` or the weights don't sum to `1.0`.
    pub fn validate_weights(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        let sum = self.pattern + self.context + self.frequency + self.ner;
        if (sum - 1.0).abs() > 1e-6 {
            let mut errors = validator::ValidationErrors::new();
            errors.add(
                "weights",
                validator::ValidationError::new("weights_must_sum_to_one"),
            );
            return Err(errors);
        }
        Ok(())
    }
}

/// Thresholds gating the overall review decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct ConfidenceThresholds {
    #[validate(range(min = 0.0, max = 1.0))]
    pub auto_approve: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub require_review: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub auto_reject: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            auto_approve: 0.85,
            require_review: 0.50,
            auto_reject: 0.20,
        }
    }
}

impl ConfidenceThresholds {
    /// Validates range constraints and `auto_reject <= require_review <=
    /// auto_approve`.
    ///
    /// # Errors
    ///
    /// Returns a [`validator::ValidationErrors`] if any threshold is
    /// outside `[0, 1]` or the thresholds aren't monotonically increasing.
    pub fn validate_thresholds(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        if !(self.auto_reject <= self.require_review && self.require_review <= self.auto_approve) {
            let mut errors = validator::ValidationErrors::new();
            errors.add(
                "thresholds",
                validator::ValidationError::new("thresholds_must_be_monotone"),
            );
            return Err(errors);
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        ConfidenceWeights::default().validate_weights().unwrap();
    }

    #[test]
    fn unbalanced_weights_rejected() {
        let w = ConfidenceWeights {
            pattern: 0.9,
            context: 0.2,
            frequency: 0.1,
            ner: 0.1,
        };
        assert!(w.validate_weights().is_err());
    }

    #[test]
    fn default_thresholds_are_monotone() {
        ConfidenceThresholds::default().validate_thresholds().unwrap();
    }

    #[test]
    fn out_of_order_thresholds_rejected() {
        let t = ConfidenceThresholds {
            auto_approve: 0.5,
            require_review: 0.8,
            auto_reject: 0.2,
        };
        assert!(t.validate_thresholds().is_err());
    }
}
