//! C2: the ML confidence layer — fuses regex, context, frequency, and NER
//! signals into a calibrated confidence and drives the human-review gate.

mod review;
mod scorer;
mod thresholds;

pub use review::{ReviewDecision, ReviewReason, evaluate, queue_priority};
pub use scorer::{ConfidenceScorer, DocumentType, EnhancedMatch, RegexMatch, combine, context_window};
pub use thresholds::{ConfidenceThresholds, ConfidenceWeights};

use async_trait::async_trait;

/// Classifies a document's overall type — a capability consumed, not
/// defined, by the confidence layer's document-type adjustment; a
/// model-backed implementation lives outside this crate.
#[async_trait]
pub trait DocumentClassifier: Send + Sync {
    async fn classify_document(&self, content: &str) -> Option<DocumentType>;
}
