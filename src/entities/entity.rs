//! The [`Entity`] type and deduplication pass.

use serde::{Deserialize, Serialize};

/// The closed set of entity types the baseline recognizer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Email,
    Phone,
    Ssn,
    CreditCard,
    IpAddress,
    Date,
    Person,
    AwsArn,
    AwsAccessKey,
    ApiKey,
    Uuid,
    Iban,
}

/// A typed span recognized within a document's text.
///
/// Invariants: `start_offset < end_offset`; `text` equals
/// `content[start_offset..end_offset]` in the document the entity was
/// recognized from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub entity_type: EntityType,
    pub start_offset: usize,
    pub end_offset: usize,
    pub confidence: f64,
}

/// Removes exact `(text, type)` duplicates, then removes any entity fully
/// contained inside another with confidence `>=` its own. Resulting order
/// is unspecified, matching the contract.
#[must_use]
pub fn deduplicate(entities: Vec<Entity>) -> Vec<Entity> {
    let mut deduped: Vec<Entity> = Vec::with_capacity(entities.len());
    for e in entities {
        if !deduped
            .iter()
            .any(|d| d.text == e.text && d.entity_type == e.entity_type)
        {
            deduped.push(e);
        }
    }

    let is_strictly_contained = |i: usize, j: usize| -> bool {
        let (inner, outer) = (&deduped[i], &deduped[j]);
        outer.start_offset <= inner.start_offset
            && inner.end_offset <= outer.end_offset
            && outer.confidence >= inner.confidence
            && (outer.start_offset, outer.end_offset) != (inner.start_offset, inner.end_offset)
    };

    (0..deduped.len())
        .filter(|&i| !(0..deduped.len()).any(|j| i != j && is_strictly_contained(i, j)))
        .map(|i| deduped[i].clone())
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────
