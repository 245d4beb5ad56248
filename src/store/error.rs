//! The store boundary's error type: every failure names the
//! sub-operation that failed.

use thiserror::Error;

/// Errors surfaced by a [`super::AiTrackingStore`], [`super::LineageStore`],
/// [`super::MlStore`], or [`super::RulesAdminStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not complete `operation` (connection
    /// failure, timeout, serialization error from the backend, ...).
    #[error("store unavailable during {operation}: {source}")]
    Unavailable {
        operation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// `operation` referenced an id that does not exist. Note that an
    /// unresolvable ARN in lineage traversal is *not* this variant — per
    /// the core's failure model, an unknown asset is a normal "unknown"
    /// node, not an error.
    #[error("not found during {operation}: {id}")]
    NotFound { operation: String, id: String },
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_operation_and_id() {
        let err = StoreError::NotFound {
            operation: "listing services".to_string(),
            id: "svc-1".to_string(),
        };
        assert!(err.to_string().contains("listing services"));
        assert!(err.to_string().contains("svc-1"));
    }
}
