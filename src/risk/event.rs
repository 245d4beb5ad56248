//! Bounded additive risk scoring for a single AI-processing event.

use serde::{Deserialize, Serialize};

use crate::model::{Category, Sensitivity};

/// The kind of processing event being scored; only `TrainingJob` carries
/// its own risk weight today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Inference,
    TrainingJob,
    DataExport,
    Other,
}

const CAP: u32 = 100;

fn sensitivity_score(sensitivity: Sensitivity) -> u32 {
    match sensitivity {
        Sensitivity::Critical => 40,
        Sensitivity::High => 30,
        Sensitivity::Medium => 15,
        Sensitivity::Low | Sensitivity::Unknown => 0,
    }
}

fn category_score(category: Category) -> u32 {
    match category {
        Category::Pii | Category::Pci => 15,
        Category::Phi => 20,
        Category::Secrets | Category::Custom => 0,
    }
}

/// Scores a processing event's risk. `categories` may contain repeats —
/// each occurrence counts, matching the spec's additive model.
#[must_use]
pub fn event_risk(
    sensitivity: Sensitivity,
    categories: &[Category],
    event_type: EventType,
) -> (u32, Vec<String>) {
    let mut score = 0u32;
    let mut factors = Vec::new();

    let sens = sensitivity_score(sensitivity);
    if sens > 0 {
        score += sens;
        factors.push(format!("{sensitivity} sensitivity data accessed (+{sens})"));
    }

    for &category in categories {
        let points = category_score(category);
        if points > 0 {
            score += points;
            factors.push(format!("{category} data present (+{points})"));
        }
    }

    if event_type == EventType::TrainingJob {
        score += 10;
        factors.push("training job processing (+10)".to_string());
    }

    (score.min(CAP), factors)
}

// ── Tests ──────────────────────────────────────────────────────────────
