//! Property tests for the core invariants every classification and risk
//! computation must hold regardless of input.

#[macro_use]
extern crate proptest;

use proptest::prelude::*;

use dspm_core::classifier::ClassificationEngine;
use dspm_core::lineage::{FlowType, ResourceType};
use dspm_core::model::{Category, Sensitivity};
use dspm_core::risk::{EventType, event_risk, flow_risk};

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Pii),
        Just(Category::Phi),
        Just(Category::Pci),
        Just(Category::Secrets),
        Just(Category::Custom),
    ]
}

fn sensitivity_strategy() -> impl Strategy<Value = Sensitivity> {
    prop_oneof![
        Just(Sensitivity::Unknown),
        Just(Sensitivity::Low),
        Just(Sensitivity::Medium),
        Just(Sensitivity::High),
        Just(Sensitivity::Critical),
    ]
}

fn resource_type_strategy() -> impl Strategy<Value = ResourceType> {
    prop_oneof![
        Just(ResourceType::S3Bucket),
        Just(ResourceType::DynamoDbTable),
        Just(ResourceType::SqsQueue),
        Just(ResourceType::SnsTopic),
        Just(ResourceType::KinesisStream),
        Just(ResourceType::RdsInstance),
        Just(ResourceType::LambdaFunction),
        Just(ResourceType::Unknown),
    ]
}

fn flow_type_strategy() -> impl Strategy<Value = FlowType> {
    prop_oneof![
        Just(FlowType::ReadsFrom),
        Just(FlowType::WritesTo),
        Just(FlowType::ExportsTo),
        Just(FlowType::ReplicatesTo),
    ]
}

proptest! {
    #[test]
    fn event_risk_never_exceeds_cap(
        sensitivity in sensitivity_strategy(),
        categories in prop::collection::vec(category_strategy(), 0..12),
        is_training in any::<bool>(),
    ) {
        let event_type = if is_training { EventType::TrainingJob } else { EventType::Inference };
        let (score, factors) = event_risk(sensitivity, &categories, event_type);
        prop_assert!(score <= 100);
        prop_assert!(factors.len() <= categories.len() + 2);
    }

    #[test]
    fn flow_risk_never_exceeds_cap(
        sensitivity in sensitivity_strategy(),
        confidence in 0.0f64..=1.0,
        source_type in resource_type_strategy(),
        target_type in resource_type_strategy(),
        flow_type in flow_type_strategy(),
    ) {
        let (score, _) = flow_risk(sensitivity, confidence, source_type, target_type, flow_type);
        prop_assert!(score <= 100);
    }

    #[test]
    fn classify_is_deterministic_over_arbitrary_text(content in "\\PC{0,400}") {
        let engine = ClassificationEngine::with_builtin_rules().unwrap();
        let first = engine.classify(&content);
        let second = engine.classify(&content);
        prop_assert_eq!(first.total_findings, second.total_findings);
        prop_assert_eq!(first.matches.len(), second.matches.len());
        for (a, b) in first.matches.iter().zip(second.matches.iter()) {
            prop_assert_eq!(&a.redacted_value, &b.redacted_value);
            prop_assert_eq!(a.count, b.count);
        }
    }

    #[test]
    fn classify_never_exceeds_documented_caps(content in "\\PC{0,2000}") {
        let engine = ClassificationEngine::with_builtin_rules().unwrap();
        let result = engine.classify(&content);
        for m in &result.matches {
            prop_assert!(m.sample_matches.len() <= 5);
            prop_assert!(m.line_numbers.len() <= 10);
            prop_assert!(m.count >= m.sample_matches.len());
        }
    }
}
