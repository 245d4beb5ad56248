//! Persistence for inferred lineage flows and ARN-keyed asset lookups.

use async_trait::async_trait;
use uuid::Uuid;

use super::StoreError;
use super::dto::LineageEvent;

/// CRUD plus the two query shapes lineage reporting needs: "what touches
/// sensitive data" and "what do we know about this asset".
///
/// `record_event` upserts on [`LineageEvent::upsert_key`] so that repeated
/// inference runs over the same flow converge instead of accumulating
/// duplicate rows.
#[async_trait]
pub trait LineageStore: Send + Sync {
    async fn record_event(&self, event: LineageEvent) -> Result<Uuid, StoreError>;
    async fn get_event(&self, id: Uuid) -> Result<Option<LineageEvent>, StoreError>;
    async fn list_events(&self) -> Result<Vec<LineageEvent>, StoreError>;
    async fn delete_event(&self, id: Uuid) -> Result<(), StoreError>;

    /// Flows where either endpoint's resource type is known to carry
    /// sensitive data, per the caller's own sensitivity join.
    async fn list_sensitive_flows(&self) -> Result<Vec<LineageEvent>, StoreError>;

    /// All events where `arn` is the source or the target.
    async fn list_events_for_asset(&self, arn: &str) -> Result<Vec<LineageEvent>, StoreError>;
}
