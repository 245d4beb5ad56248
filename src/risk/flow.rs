//! Bounded additive risk scoring for a single inferred lineage flow.

use crate::lineage::{FlowType, ResourceType};
use crate::model::Sensitivity;

const CAP: u32 = 100;

fn sensitivity_score(sensitivity: Sensitivity) -> u32 {
    match sensitivity {
        Sensitivity::Critical => 40,
        Sensitivity::High => 30,
        Sensitivity::Medium => 20,
        Sensitivity::Low | Sensitivity::Unknown => 0,
    }
}

/// Scores a flow's risk from its source sensitivity, inference
/// confidence, cross-service crossing, and flow direction.
#[must_use]
pub fn flow_risk(
    source_sensitivity: Sensitivity,
    confidence: f64,
    source_type: ResourceType,
    target_type: ResourceType,
    flow_type: FlowType,
) -> (u32, Vec<String>) {
    let mut score = 0u32;
    let mut factors = Vec::new();

    let sens = sensitivity_score(source_sensitivity);
    if sens > 0 {
        score += sens;
        factors.push(format!("{source_sensitivity} sensitivity source (+{sens})"));
    }

    if confidence < 0.7 {
        score += 10;
        factors.push("low inference confidence (+10)".to_string());
    }

    if source_type != target_type {
        score += 10;
        factors.push("cross-service flow (+10)".to_string());
    }

    if matches!(flow_type, FlowType::ExportsTo | FlowType::ReplicatesTo) {
        score += 15;
        factors.push("external export or replication (+15)".to_string());
    }

    (score.min(CAP), factors)
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_low_confidence_cross_service_export_accumulates() {
        let (score, factors) = flow_risk(
            Sensitivity::Critical,
            0.5,
            ResourceType::S3Bucket,
            ResourceType::LambdaFunction,
            FlowType::ExportsTo,
        );
        assert_eq!(score, 40 + 10 + 10 + 15);
        assert_eq!(factors.len(), 4);
    }

    #[test]
    fn same_service_flow_has_no_cross_service_bonus() {
        let (score, _) = flow_risk(
            Sensitivity::Unknown,
            0.9,
            ResourceType::S3Bucket,
            ResourceType::S3Bucket,
            FlowType::ReadsFrom,
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn score_is_capped() {
        let (score, _) = flow_risk(
            Sensitivity::Critical,
            0.1,
            ResourceType::S3Bucket,
            ResourceType::LambdaFunction,
            FlowType::ReplicatesTo,
        );
        assert!(score <= 100);
    }
}
