//! The [`InferredFlow`] DTO and its supporting enums.

use serde::{Deserialize, Serialize};

/// The resource kind at either end of an [`InferredFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    S3Bucket,
    DynamoDbTable,
    SqsQueue,
    SnsTopic,
    KinesisStream,
    RdsInstance,
    LambdaFunction,
    Unknown,
}

/// The direction and nature of a data flow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowType {
    ReadsFrom,
    WritesTo,
    ExportsTo,
    ReplicatesTo,
}

/// Which signal produced an [`InferredFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InferenceSource {
    IamPolicy,
    EnvVariable,
    EventSource,
    CloudTrail,
}

/// A single inferred data-flow edge between two assets.
///
/// Invariant: `source_arn != target_arn`. Once emitted, source and target
/// are never swapped — callers that need the reverse direction should
/// construct a new flow rather than mutate this one in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferredFlow {
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
}

impl InferredFlow {
    /// The key an external store should use for upsert-by-unique-key
    /// semantics: the same `(source, target, flow_type, inferred_from)`
    /// tuple represents "the same flow" across repeated inference runs.
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

// ── Tests ──────────────────────────────────────────────────────────────
