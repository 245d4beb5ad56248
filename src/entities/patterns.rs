//! Built-in entity pattern catalog and per-pattern confidence priors.

use regex::Regex;

use super::entity::EntityType;

/// A compiled entity pattern: one regex, an entity type, a confidence
/// prior, and an optional validator applied to the raw matched text.
pub struct EntityPattern {
    pub entity_type: EntityType,
    pub confidence_prior: f64,
    pub regex: Regex,
    pub validator: Option<fn(&str) -> bool>,
}

macro_rules! entity_pattern {
    ($ty:expr, $prior:expr, $re:expr) => {
        EntityPattern {
            entity_type: $ty,
            confidence_prior: $prior,
            regex: Regex::new($re).expect("built-in entity pattern must compile"),
            validator: None,
        }
    };
    ($ty:expr, $prior:expr, $re:expr, $validator:expr) => {
        EntityPattern {
            entity_type: $ty,
            confidence_prior: $prior,
            regex: Regex::new($re).expect("built-in entity pattern must compile"),
            validator: Some($validator),
        }
    };
}

/// Returns the default entity pattern catalog, one pattern per
/// [`EntityType`].
#[must_use]
pub fn builtin_patterns() -> Vec<EntityPattern> {
    use crate::classifier::{luhn_valid, no_dominant_digit, valid_iban, valid_ssn};
    use EntityType::{
        ApiKey, AwsAccessKey, AwsArn, CreditCard, Date, Email, Iban, IpAddress, Person, Phone, Ssn,
        Uuid,
    };

    vec![
        entity_pattern!(Email, 0.95, r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b"),
        entity_pattern!(
            Phone,
            0.85,
            r"\b\(?\d{3}\)?[\s.\-]\d{3}[\s.\-]\d{4}\b",
            no_dominant_digit
        ),
        entity_pattern!(Ssn, 0.90, r"\b\d{3}-\d{2}-\d{4}\b", valid_ssn),
        entity_pattern!(
            CreditCard,
            0.85,
            r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6(?:011|5\d{2}))[\s\-]?\d{4}[\s\-]?\d{4}[\s\-]?\d{1,4}\b",
            luhn_valid
        ),
        entity_pattern!(
            IpAddress,
            0.95,
            r"\b(25[0-5]|2[0-4]\d|1?\d?\d)(\.(25[0-5]|2[0-4]\d|1?\d?\d)){3}\b"
        ),
        entity_pattern!(
            Date,
            0.80,
            r"\b(0?[1-9]|1[0-2])[/\-](0?[1-9]|[12]\d|3[01])[/\-](19|20)\d{2}\b"
        ),
        entity_pattern!(Person, 0.70, r"\b[A-Z][a-z]+\s[A-Z][a-z]+\b"),
        entity_pattern!(
            AwsArn,
            0.95,
            r"\barn:aws:[a-z0-9\-]+:[a-z0-9\-]*:\d{0,12}:[^\s\"']+"
        ),
        entity_pattern!(AwsAccessKey, 0.95, r"\b(AKIA|ASIA)[0-9A-Z]{16}\b"),
        entity_pattern!(
            ApiKey,
            0.80,
            r#"(?i)api[_\-]?key['"]?\s*[:=]\s*['"][A-Za-z0-9_\-]{20,}['"]"#
        ),
        entity_pattern!(
            Uuid,
            0.95,
            r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b"
        ),
        entity_pattern!(Iban, 0.85, r"\b[A-Z]{2}\d{2}[A-Z0-9]{10,30}\b", valid_iban),
    ]
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_patterns_cover_every_entity_type() {
        let patterns = builtin_patterns();
        assert_eq!(patterns.len(), 12);
    }

    #[test]
    fn confidence_priors_in_range() {
        for p in builtin_patterns() {
            assert!(p.confidence_prior > 0.0 && p.confidence_prior <= 1.0);
        }
    }
}
