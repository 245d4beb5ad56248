//! DTOs and trait contracts for the persistence layer this crate consumes
//! but does not implement: AI/ML inventory tracking, lineage events, the
//! ML review queue, and rules administration.
//!
//! Traits are `async_trait` and object-safe so a caller can hold e.g.
//! `Arc<dyn LineageStore>` behind a concrete database-backed adapter.

mod ai_tracking;
mod dto;
mod error;
mod lineage_store;
mod ml_store;
mod rules_admin;

#[cfg(feature = "testing")]
mod memory;

pub use ai_tracking::AiTrackingStore;
pub use dto::{
    AiModel, AiProcessingEvent, AiService, AiTrainingData, CustomRulePattern, CustomRuleRecord,
    CustomRuleWithPatterns, EncryptionStatus, LineageEvent, ModelType, Provider, ReviewQueueItem,
    ReviewQueueStatus, TrainingFeedback,
};
pub use error::StoreError;
pub use lineage_store::LineageStore;
pub use ml_store::MlStore;
pub use rules_admin::RulesAdminStore;

#[cfg(feature = "testing")]
pub use memory::InMemoryStore;
