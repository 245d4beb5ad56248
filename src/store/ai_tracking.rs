//! AI service/model inventory and processing-event tracking.

use async_trait::async_trait;
use uuid::Uuid;

use super::StoreError;
use super::dto::{AiModel, AiProcessingEvent, AiService, AiTrainingData};

/// CRUD and specialised listing over the AI/ML inventory tables.
///
/// `record_service`/`record_model` are deliberate upserts: callers never
/// need to probe existence first, which resolves the create-then-fall-
/// back-to-update ambiguity a prior implementation left open.
#[async_trait]
pub trait AiTrackingStore: Send + Sync {
    async fn record_service(&self, service: AiService) -> Result<Uuid, StoreError>;
    async fn get_service(&self, id: Uuid) -> Result<Option<AiService>, StoreError>;
    async fn list_services(&self) -> Result<Vec<AiService>, StoreError>;
    async fn delete_service(&self, id: Uuid) -> Result<(), StoreError>;

    async fn record_model(&self, model: AiModel) -> Result<Uuid, StoreError>;
    async fn get_model(&self, id: Uuid) -> Result<Option<AiModel>, StoreError>;
    async fn list_models(&self) -> Result<Vec<AiModel>, StoreError>;
    async fn delete_model(&self, id: Uuid) -> Result<(), StoreError>;
    async fn list_models_by_service(&self, service_id: Uuid) -> Result<Vec<AiModel>, StoreError>;

    async fn record_training_data(&self, data: AiTrainingData) -> Result<Uuid, StoreError>;
    async fn get_training_data(&self, id: Uuid) -> Result<Option<AiTrainingData>, StoreError>;
    async fn list_training_data(&self) -> Result<Vec<AiTrainingData>, StoreError>;
    async fn delete_training_data(&self, id: Uuid) -> Result<(), StoreError>;
    async fn list_sensitive_training_data(&self) -> Result<Vec<AiTrainingData>, StoreError>;
    async fn list_training_data_by_model(&self, model_id: Uuid) -> Result<Vec<AiTrainingData>, StoreError>;

    async fn record_processing_event(&self, event: AiProcessingEvent) -> Result<Uuid, StoreError>;
    async fn get_processing_event(&self, id: Uuid) -> Result<Option<AiProcessingEvent>, StoreError>;
    async fn list_processing_events(&self) -> Result<Vec<AiProcessingEvent>, StoreError>;
    async fn delete_processing_event(&self, id: Uuid) -> Result<(), StoreError>;
    async fn list_sensitive_data_access_events(&self) -> Result<Vec<AiProcessingEvent>, StoreError>;
}
