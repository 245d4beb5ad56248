//! Configurable weights applied by the model-risk scorer.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Per-factor weights used when scoring an AI/ML model's data-use risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct RiskFactorWeights {
    #[validate(range(min = 0.0, max = 1.0))]
    pub sensitive_data_access: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub critical_data_training: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub unencrypted_data: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub cross_account_access: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub high_volume_access: f64,
}

impl Default for RiskFactorWeights {
    fn default() -> Self {
        Self {
            sensitive_data_access: 0.30,
            critical_data_training: 0.25,
            unencrypted_data: 0.20,
            cross_account_access: 0.15,
            high_volume_access: 0.10,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_validate() {
        RiskFactorWeights::default().validate().unwrap();
    }

    #[test]
    fn out_of_range_weight_is_rejected() {
        let w = RiskFactorWeights {
            sensitive_data_access: 1.5,
            ..RiskFactorWeights::default()
        };
        assert!(w.validate().is_err());
    }
}
