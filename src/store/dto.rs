//! DTOs exchanged across the store boundary.
//!
//! Every type here derives `Debug, Clone, Serialize, Deserialize` per the
//! crate's ambient-derive convention for anything crossing an I/O boundary.
//! Schemaless fields (`evidence`, `tags`, `raw_metadata`) are carried as
//! opaque `serde_json::Value` bags rather than reflected at runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::confidence::ReviewReason;
use crate::lineage::{FlowType, InferenceSource, ResourceType};
use crate::model::{Category, Sensitivity};

/// Cloud or hosting provider a tracked service/model runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Aws,
    Gcp,
    Azure,
    Other,
}

/// Whether a data source is known to be encrypted at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionStatus {
    Encrypted,
    Unencrypted,
    Unknown,
}

/// Coarse shape of an AI/ML model, for risk and inventory purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    LanguageModel,
    EmbeddingModel,
    Classifier,
    Other,
}

/// Where a [`ReviewQueueItem`] sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewQueueStatus {
    Pending,
    InReview,
    Approved,
    Rejected,
}

/// A tracked AI/ML-hosting service (e.g. a SageMaker endpoint, a Bedrock
/// deployment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiService {
    pub id: Uuid,
    pub name: String,
    pub provider: Provider,
    pub description: Option<String>,
    pub tags: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A model hosted by an [`AiService`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiModel {
    pub id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub model_type: ModelType,
    pub version: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A data source used to train or fine-tune an [`AiModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTrainingData {
    pub id: Uuid,
    pub model_id: Uuid,
    pub source_arn: String,
    pub sensitivity: Sensitivity,
    pub categories: Vec<Category>,
    pub encryption_status: EncryptionStatus,
    pub record_count: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// A recorded access or inference event against an [`AiModel`] or
/// [`AiService`], the raw material [`crate::risk::event_risk`] scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiProcessingEvent {
    pub id: Uuid,
    pub service_id: Uuid,
    pub model_id: Option<Uuid>,
    pub event_type: String,
    pub categories: Vec<Category>,
    pub sensitivity: Sensitivity,
    pub raw_metadata: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

/// The persisted form of a [`crate::lineage::InferredFlow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageEvent {
    pub id: Uuid,
    pub source_arn: String,
    pub source_type: ResourceType,
    pub source_name: String,
    pub target_arn: String,
    pub target_type: ResourceType,
    pub target_name: String,
    pub flow_type: FlowType,
    pub inferred_from: InferenceSource,
    pub confidence: f64,
    pub evidence: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LineageEvent {
    /// The upsert key this event converges on, delegating to
    /// [`crate::lineage::InferredFlow::upsert_key`]'s definition of "the
    /// same flow".
    #[must_use]
    pub fn upsert_key(&self) -> (String, String, FlowType, InferenceSource) {
        (
            self.source_arn.clone(),
            self.target_arn.clone(),
            self.flow_type,
            self.inferred_from,
        )
    }
}

/// A classification routed to human review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewQueueItem {
    pub id: Uuid,
    pub classification_id: Uuid,
    pub category: Category,
    pub sensitivity: Sensitivity,
    pub combined_confidence: f64,
    pub reason: ReviewReason,
    pub status: ReviewQueueStatus,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Human feedback recorded against a [`ReviewQueueItem`], used to retrain
/// or recalibrate the confidence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingFeedback {
    pub id: Uuid,
    pub review_item_id: Uuid,
    pub accepted: bool,
    pub corrected_category: Option<Category>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A custom classification rule as persisted by the rules-admin surface.
/// Patterns are stored separately (see [`CustomRulePattern`]) and always
/// fetched together with their owning rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRuleRecord {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub sensitivity: Sensitivity,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One pattern belonging to a [`CustomRuleRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRulePattern {
    pub id: Uuid,
    pub rule_id: Uuid,
    pub pattern: String,
    pub is_negative: bool,
}

/// A rule together with its full pattern list, the unit the rules-admin
/// surface reads and writes as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRuleWithPatterns {
    pub rule: CustomRuleRecord,
    pub patterns: Vec<CustomRulePattern>,
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineage_event_upsert_key_matches_inferred_flow_fields() {
        let now = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let event = LineageEvent {
            id: Uuid::nil(),
            source_arn: "arn:aws:s3:::a".to_string(),
            source_type: ResourceType::S3Bucket,
            source_name: "a".to_string(),
            target_arn: "arn:aws:lambda:us-east-1:1:function:f".to_string(),
            target_type: ResourceType::LambdaFunction,
            target_name: "f".to_string(),
            flow_type: FlowType::ReadsFrom,
            inferred_from: InferenceSource::EnvVariable,
            confidence: 0.75,
            evidence: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            event.upsert_key(),
            (
                "arn:aws:s3:::a".to_string(),
                "arn:aws:lambda:us-east-1:1:function:f".to_string(),
                FlowType::ReadsFrom,
                InferenceSource::EnvVariable,
            )
        );
    }

    #[test]
    fn provider_round_trips_json() {
        let json = serde_json::to_string(&Provider::Aws).unwrap();
        assert_eq!(json, r#""aws""#);
        let parsed: Provider = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Provider::Aws);
    }
}
