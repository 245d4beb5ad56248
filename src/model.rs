//! Shared data model used across the classifier, confidence, lineage, and
//! risk modules.
//!
//! [`Sensitivity`] and [`Category`] are the two closed vocabularies every
//! [`crate::classifier::Rule`] and derived finding is tagged with.

use serde::{Deserialize, Serialize};

// ── Sensitivity ──────────────────────────────────────────────────────────

/// Severity of a sensitive-data finding, lowest to highest.
///
/// `Ord` is derived so `Iterator::max` over a document's matches yields the
/// document's overall sensitivity directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    /// No sensitivity classification could be determined.
    Unknown,
    Low,
    Medium,
    High,
    /// Regulated data whose exposure carries the highest risk (SSNs, full
    /// payment card numbers, private keys).
    Critical,
}

impl std::fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self::Unknown
    }
}

// ── Category ─────────────────────────────────────────────────────────────

/// Closed set of regulated-data categories a [`crate::classifier::Rule`]
/// belongs to.
///
/// `Ord` follows declaration order and carries no regulatory meaning; it
/// exists so a document's categories can sit in a `BTreeSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Personally identifiable information.
    Pii,
    /// Protected health information.
    Phi,
    /// Payment card industry regulated data.
    Pci,
    /// Credentials and API secrets.
    Secrets,
    /// Customer-defined rule category.
    Custom,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pii => write!(f, "pii"),
            Self::Phi => write!(f, "phi"),
            Self::Pci => write!(f, "pci"),
            Self::Secrets => write!(f, "secrets"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl Category {
    /// Categories whose matched values must never appear unmasked in a
    /// [`crate::classifier::Match`]'s sample matches or context windows.
    #[must_use]
    pub fn is_always_redacted(self) -> bool {
        matches!(self, Self::Pii | Self::Phi | Self::Pci | Self::Secrets)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitivity_ordering() {
        assert!(Sensitivity::Unknown < Sensitivity::Low);
        assert!(Sensitivity::Low < Sensitivity::Medium);
        assert!(Sensitivity::Medium < Sensitivity::High);
        assert!(Sensitivity::High < Sensitivity::Critical);
    }

    #[test]
    fn sensitivity_max_over_iterator() {
        let values = [Sensitivity::Low, Sensitivity::Critical, Sensitivity::Medium];
        assert_eq!(values.into_iter().max(), Some(Sensitivity::Critical));
    }

    #[test]
    fn category_redaction_flags() {
        assert!(Category::Pii.is_always_redacted());
        assert!(Category::Phi.is_always_redacted());
        assert!(Category::Pci.is_always_redacted());
        assert!(Category::Secrets.is_always_redacted());
        assert!(!Category::Custom.is_always_redacted());
    }

    #[test]
    fn sensitivity_round_trips_json() {
        let json = serde_json::to_string(&Sensitivity::Critical).unwrap();
        assert_eq!(json, r#""critical""#);
        let parsed: Sensitivity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Sensitivity::Critical);
    }
}
