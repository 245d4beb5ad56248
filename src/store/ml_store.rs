//! Model registry, review-queue management, and training feedback.

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::Category;

use super::StoreError;
use super::dto::{AiModel, ReviewQueueItem, ReviewQueueStatus, TrainingFeedback};

/// Model registry lookups plus the review-queue lifecycle: queueing,
/// status/priority-ordered listing, and the human feedback that closes
/// the loop on a queued item.
#[async_trait]
pub trait MlStore: Send + Sync {
    async fn get_model(&self, id: Uuid) -> Result<Option<AiModel>, StoreError>;
    async fn list_models(&self) -> Result<Vec<AiModel>, StoreError>;

    /// Classifications previously routed to review for `category`, most
    /// relevant for recalibrating a single rule family.
    async fn list_predictions_by_category(&self, category: Category) -> Result<Vec<ReviewQueueItem>, StoreError>;

    async fn enqueue_review_item(&self, item: ReviewQueueItem) -> Result<Uuid, StoreError>;
    async fn get_review_item(&self, id: Uuid) -> Result<Option<ReviewQueueItem>, StoreError>;

    /// Queued items filtered by `status`, ordered by `priority` descending
    /// then `created_at` ascending (FIFO within equal priority).
    async fn list_review_queue(&self, status: ReviewQueueStatus) -> Result<Vec<ReviewQueueItem>, StoreError>;

    async fn update_review_status(&self, id: Uuid, status: ReviewQueueStatus) -> Result<(), StoreError>;

    /// Overwrites a previously recorded `combined_confidence`, e.g. after
    /// a rescoring pass with updated weights.
    async fn update_classification_confidence(&self, id: Uuid, combined_confidence: f64) -> Result<(), StoreError>;

    async fn record_training_feedback(&self, feedback: TrainingFeedback) -> Result<Uuid, StoreError>;
    async fn list_training_feedback(&self, review_item_id: Uuid) -> Result<Vec<TrainingFeedback>, StoreError>;
}
