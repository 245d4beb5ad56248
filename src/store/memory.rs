//! An in-memory reference implementation of the store trait family, for
//! tests and examples. Not exposed outside the `testing` feature.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{Category, Sensitivity};

use super::ai_tracking::AiTrackingStore;
use super::dto::{
    AiModel, AiProcessingEvent, AiService, AiTrainingData, CustomRulePattern, CustomRuleRecord,
    CustomRuleWithPatterns, LineageEvent, ReviewQueueItem, ReviewQueueStatus, TrainingFeedback,
};
use super::lineage_store::LineageStore;
use super::ml_store::MlStore;
use super::rules_admin::RulesAdminStore;
use super::StoreError;

/// A single process-local store backing all four trait families at once,
/// the way a test harness wants one fixture instead of four.
#[derive(Default)]
pub struct InMemoryStore {
    services: Mutex<HashMap<Uuid, AiService>>,
    models: Mutex<HashMap<Uuid, AiModel>>,
    training_data: Mutex<HashMap<Uuid, AiTrainingData>>,
    processing_events: Mutex<HashMap<Uuid, AiProcessingEvent>>,
    lineage_events: Mutex<HashMap<Uuid, LineageEvent>>,
    review_queue: Mutex<HashMap<Uuid, ReviewQueueItem>>,
    training_feedback: Mutex<HashMap<Uuid, TrainingFeedback>>,
    rules: Mutex<HashMap<Uuid, CustomRuleRecord>>,
    rule_patterns: Mutex<HashMap<Uuid, Vec<CustomRulePattern>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(operation: &str) -> StoreError {
        StoreError::Unavailable {
            operation: operation.to_string(),
            source: "internal lock poisoned".into(),
        }
    }
}

#[async_trait]
impl AiTrackingStore for InMemoryStore {
    async fn record_service(&self, service: AiService) -> Result<Uuid, StoreError> {
        let id = service.id;
        self.services
            .lock()
            .map_err(|_| Self::poisoned("recording AI service"))?
            .insert(id, service);
        Ok(id)
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<AiService>, StoreError> {
        Ok(self
            .services
            .lock()
            .map_err(|_| Self::poisoned("getting AI service"))?
            .get(&id)
            .cloned())
    }

    async fn list_services(&self) -> Result<Vec<AiService>, StoreError> {
        Ok(self
            .services
            .lock()
            .map_err(|_| Self::poisoned("listing AI services"))?
            .values()
            .cloned()
            .collect())
    }

    async fn delete_service(&self, id: Uuid) -> Result<(), StoreError> {
        self.services
            .lock()
            .map_err(|_| Self::poisoned("deleting AI service"))?
            .remove(&id);
        Ok(())
    }

    async fn record_model(&self, model: AiModel) -> Result<Uuid, StoreError> {
        let id = model.id;
        self.models
            .lock()
            .map_err(|_| Self::poisoned("recording AI model"))?
            .insert(id, model);
        Ok(id)
    }

    async fn get_model(&self, id: Uuid) -> Result<Option<AiModel>, StoreError> {
        Ok(self
            .models
            .lock()
            .map_err(|_| Self::poisoned("getting AI model"))?
            .get(&id)
            .cloned())
    }

    async fn list_models(&self) -> Result<Vec<AiModel>, StoreError> {
        Ok(self
            .models
            .lock()
            .map_err(|_| Self::poisoned("listing AI models"))?
            .values()
            .cloned()
            .collect())
    }

    async fn delete_model(&self, id: Uuid) -> Result<(), StoreError> {
        self.models
            .lock()
            .map_err(|_| Self::poisoned("deleting AI model"))?
            .remove(&id);
        Ok(())
    }

    async fn list_models_by_service(&self, service_id: Uuid) -> Result<Vec<AiModel>, StoreError> {
        Ok(self
            .models
            .lock()
            .map_err(|_| Self::poisoned("listing models by service"))?
            .values()
            .filter(|m| m.service_id == service_id)
            .cloned()
            .collect())
    }

    async fn record_training_data(&self, data: AiTrainingData) -> Result<Uuid, StoreError> {
        let id = data.id;
        self.training_data
            .lock()
            .map_err(|_| Self::poisoned("recording training data"))?
            .insert(id, data);
        Ok(id)
    }

    async fn get_training_data(&self, id: Uuid) -> Result<Option<AiTrainingData>, StoreError> {
        Ok(self
            .training_data
            .lock()
            .map_err(|_| Self::poisoned("getting training data"))?
            .get(&id)
            .cloned())
    }

    async fn list_training_data(&self) -> Result<Vec<AiTrainingData>, StoreError> {
        Ok(self
            .training_data
            .lock()
            .map_err(|_| Self::poisoned("listing training data"))?
            .values()
            .cloned()
            .collect())
    }

    async fn delete_training_data(&self, id: Uuid) -> Result<(), StoreError> {
        self.training_data
            .lock()
            .map_err(|_| Self::poisoned("deleting training data"))?
            .remove(&id);
        Ok(())
    }

    async fn list_sensitive_training_data(&self) -> Result<Vec<AiTrainingData>, StoreError> {
        Ok(self
            .training_data
            .lock()
            .map_err(|_| Self::poisoned("listing sensitive training data"))?
            .values()
            .filter(|d| d.sensitivity >= Sensitivity::Medium)
            .cloned()
            .collect())
    }

    async fn list_training_data_by_model(&self, model_id: Uuid) -> Result<Vec<AiTrainingData>, StoreError> {
        Ok(self
            .training_data
            .lock()
            .map_err(|_| Self::poisoned("listing training data by model"))?
            .values()
            .filter(|d| d.model_id == model_id)
            .cloned()
            .collect())
    }

    async fn record_processing_event(&self, event: AiProcessingEvent) -> Result<Uuid, StoreError> {
        let id = event.id;
        self.processing_events
            .lock()
            .map_err(|_| Self::poisoned("recording processing event"))?
            .insert(id, event);
        Ok(id)
    }

    async fn get_processing_event(&self, id: Uuid) -> Result<Option<AiProcessingEvent>, StoreError> {
        Ok(self
            .processing_events
            .lock()
            .map_err(|_| Self::poisoned("getting processing event"))?
            .get(&id)
            .cloned())
    }

    async fn list_processing_events(&self) -> Result<Vec<AiProcessingEvent>, StoreError> {
        Ok(self
            .processing_events
            .lock()
            .map_err(|_| Self::poisoned("listing processing events"))?
            .values()
            .cloned()
            .collect())
    }

    async fn delete_processing_event(&self, id: Uuid) -> Result<(), StoreError> {
        self.processing_events
            .lock()
            .map_err(|_| Self::poisoned("deleting processing event"))?
            .remove(&id);
        Ok(())
    }

    async fn list_sensitive_data_access_events(&self) -> Result<Vec<AiProcessingEvent>, StoreError> {
        Ok(self
            .processing_events
            .lock()
            .map_err(|_| Self::poisoned("listing sensitive data access events"))?
            .values()
            .filter(|e| e.sensitivity >= Sensitivity::Medium)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LineageStore for InMemoryStore {
    async fn record_event(&self, event: LineageEvent) -> Result<Uuid, StoreError> {
        let mut events = self
            .lineage_events
            .lock()
            .map_err(|_| Self::poisoned("recording lineage event"))?;
        let key = event.upsert_key();
        if let Some(existing) = events.values_mut().find(|e| e.upsert_key() == key) {
            let id = existing.id;
            *existing = LineageEvent { id, ..event };
            return Ok(id);
        }
        let id = event.id;
        events.insert(id, event);
        Ok(id)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<LineageEvent>, StoreError> {
        Ok(self
            .lineage_events
            .lock()
            .map_err(|_| Self::poisoned("getting lineage event"))?
            .get(&id)
            .cloned())
    }

    async fn list_events(&self) -> Result<Vec<LineageEvent>, StoreError> {
        Ok(self
            .lineage_events
            .lock()
            .map_err(|_| Self::poisoned("listing lineage events"))?
            .values()
            .cloned()
            .collect())
    }

    async fn delete_event(&self, id: Uuid) -> Result<(), StoreError> {
        self.lineage_events
            .lock()
            .map_err(|_| Self::poisoned("deleting lineage event"))?
            .remove(&id);
        Ok(())
    }

    async fn list_sensitive_flows(&self) -> Result<Vec<LineageEvent>, StoreError> {
        use crate::lineage::ResourceType;
        Ok(self
            .lineage_events
            .lock()
            .map_err(|_| Self::poisoned("listing sensitive flows"))?
            .values()
            .filter(|e| {
                !matches!(e.source_type, ResourceType::Unknown) || !matches!(e.target_type, ResourceType::Unknown)
            })
            .cloned()
            .collect())
    }

    async fn list_events_for_asset(&self, arn: &str) -> Result<Vec<LineageEvent>, StoreError> {
        Ok(self
            .lineage_events
            .lock()
            .map_err(|_| Self::poisoned("listing events for asset"))?
            .values()
            .filter(|e| e.source_arn == arn || e.target_arn == arn)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MlStore for InMemoryStore {
    async fn get_model(&self, id: Uuid) -> Result<Option<AiModel>, StoreError> {
        AiTrackingStore::get_model(self, id).await
    }

    async fn list_models(&self) -> Result<Vec<AiModel>, StoreError> {
        AiTrackingStore::list_models(self).await
    }

    async fn list_predictions_by_category(&self, category: Category) -> Result<Vec<ReviewQueueItem>, StoreError> {
        Ok(self
            .review_queue
            .lock()
            .map_err(|_| Self::poisoned("listing predictions by category"))?
            .values()
            .filter(|i| i.category == category)
            .cloned()
            .collect())
    }

    async fn enqueue_review_item(&self, item: ReviewQueueItem) -> Result<Uuid, StoreError> {
        let id = item.id;
        self.review_queue
            .lock()
            .map_err(|_| Self::poisoned("enqueuing review item"))?
            .insert(id, item);
        Ok(id)
    }

    async fn get_review_item(&self, id: Uuid) -> Result<Option<ReviewQueueItem>, StoreError> {
        Ok(self
            .review_queue
            .lock()
            .map_err(|_| Self::poisoned("getting review item"))?
            .get(&id)
            .cloned())
    }

    async fn list_review_queue(&self, status: ReviewQueueStatus) -> Result<Vec<ReviewQueueItem>, StoreError> {
        let mut items: Vec<ReviewQueueItem> = self
            .review_queue
            .lock()
            .map_err(|_| Self::poisoned("listing review queue"))?
            .values()
            .filter(|i| i.status == status)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.created_at.cmp(&b.created_at)));
        Ok(items)
    }

    async fn update_review_status(&self, id: Uuid, status: ReviewQueueStatus) -> Result<(), StoreError> {
        let mut queue = self
            .review_queue
            .lock()
            .map_err(|_| Self::poisoned("updating review status"))?;
        let item = queue.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            operation: "updating review status".to_string(),
            id: id.to_string(),
        })?;
        item.status = status;
        Ok(())
    }

    async fn update_classification_confidence(&self, id: Uuid, combined_confidence: f64) -> Result<(), StoreError> {
        let mut queue = self
            .review_queue
            .lock()
            .map_err(|_| Self::poisoned("updating classification confidence"))?;
        let item = queue.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            operation: "updating classification confidence".to_string(),
            id: id.to_string(),
        })?;
        item.combined_confidence = combined_confidence;
        Ok(())
    }

    async fn record_training_feedback(&self, feedback: TrainingFeedback) -> Result<Uuid, StoreError> {
        let id = feedback.id;
        self.training_feedback
            .lock()
            .map_err(|_| Self::poisoned("recording training feedback"))?
            .insert(id, feedback);
        Ok(id)
    }

    async fn list_training_feedback(&self, review_item_id: Uuid) -> Result<Vec<TrainingFeedback>, StoreError> {
        Ok(self
            .training_feedback
            .lock()
            .map_err(|_| Self::poisoned("listing training feedback"))?
            .values()
            .filter(|f| f.review_item_id == review_item_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RulesAdminStore for InMemoryStore {
    async fn create_rule(&self, rule: CustomRuleRecord) -> Result<Uuid, StoreError> {
        let id = rule.id;
        self.rules
            .lock()
            .map_err(|_| Self::poisoned("creating custom rule"))?
            .insert(id, rule);
        Ok(id)
    }

    async fn update_rule(&self, rule: CustomRuleRecord) -> Result<(), StoreError> {
        let mut rules = self.rules.lock().map_err(|_| Self::poisoned("updating custom rule"))?;
        if !rules.contains_key(&rule.id) {
            return Err(StoreError::NotFound {
                operation: "updating custom rule".to_string(),
                id: rule.id.to_string(),
            });
        }
        rules.insert(rule.id, rule);
        Ok(())
    }

    async fn get_rule(&self, id: Uuid) -> Result<Option<CustomRuleWithPatterns>, StoreError> {
        let rules = self.rules.lock().map_err(|_| Self::poisoned("getting custom rule"))?;
        let Some(rule) = rules.get(&id).cloned() else {
            return Ok(None);
        };
        let patterns = self
            .rule_patterns
            .lock()
            .map_err(|_| Self::poisoned("getting custom rule"))?
            .get(&id)
            .cloned()
            .unwrap_or_default();
        Ok(Some(CustomRuleWithPatterns { rule, patterns }))
    }

    async fn list_rules(&self) -> Result<Vec<CustomRuleWithPatterns>, StoreError> {
        let rules = self.rules.lock().map_err(|_| Self::poisoned("listing custom rules"))?;
        let patterns = self
            .rule_patterns
            .lock()
            .map_err(|_| Self::poisoned("listing custom rules"))?;
        Ok(rules
            .values()
            .map(|rule| CustomRuleWithPatterns {
                rule: rule.clone(),
                patterns: patterns.get(&rule.id).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn delete_rule(&self, id: Uuid) -> Result<(), StoreError> {
        self.rules
            .lock()
            .map_err(|_| Self::poisoned("deleting custom rule"))?
            .remove(&id);
        self.rule_patterns
            .lock()
            .map_err(|_| Self::poisoned("deleting custom rule"))?
            .remove(&id);
        Ok(())
    }

    async fn set_patterns(&self, rule_id: Uuid, patterns: Vec<CustomRulePattern>) -> Result<(), StoreError> {
        self.rule_patterns
            .lock()
            .map_err(|_| Self::poisoned("setting custom rule patterns"))?
            .insert(rule_id, patterns);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────
