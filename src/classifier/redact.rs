//! Redaction of matched values and their surrounding context.
//!
//! [`redact`] masks a single value; [`redact_context`] additionally scans a
//! context window for secondary sensitive patterns the primary match
//! didn't cover, so a `sample_match.context` never leaks an unrelated SSN
//! or card number that happened to sit next to the primary hit.

use std::sync::LazyLock;

use regex::Regex;

/// Masks `value`: `"****"` if 4 characters or fewer, otherwise the first
/// two and last two characters with asterisks filling the middle, one per
/// masked character.
///
/// Idempotent: `redact(redact(v)) == redact(v)` for `len(v) > 4`, since the
/// masked form's first/last two characters and length are unchanged by a
/// second pass.
#[must_use]
pub fn redact(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let first: String = chars[..2].iter().collect();
    let last: String = chars[chars.len() - 2..].iter().collect();
    let middle = "*".repeat(chars.len() - 4);
    format!("{first}{middle}{last}")
}

struct SecondaryPattern {
    name: &'static str,
    regex: LazyLock<Regex>,
}

macro_rules! secondary {
    ($name:expr, $re:expr) => {
        SecondaryPattern {
            name: $name,
            regex: LazyLock::new(|| Regex::new($re).expect("secondary pattern must compile")),
        }
    };
}

static SECONDARY_PATTERNS: LazyLock<Vec<SecondaryPattern>> = LazyLock::new(|| {
    vec![
        secondary!("ssn", r"\b\d{3}-\d{2}-\d{4}\b"),
        secondary!("phone", r"\b\(?\d{3}\)?[\s.\-]\d{3}[\s.\-]\d{4}\b"),
        secondary!("email", r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b"),
        secondary!("date", r"\b\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}\b"),
        secondary!(
            "address",
            r"(?i)\b\d{1,6}\s+\w+(\s\w+)?\s+(street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr)\b"
        ),
        secondary!("account", r"(?i)\baccount\s*(number|no|#)?\s*:?\s*\d{6,17}\b"),
        secondary!("credit_card", r"\b\d{4}[\s\-]?\d{4}[\s\-]?\d{4}[\s\-]?\d{1,4}\b"),
        secondary!("long_alphanum", r"\b[A-Za-z0-9]{20,}\b"),
        secondary!("password_assignment", r#"(?i)(password|passwd|pwd)\s*[:=]\s*\S+"#),
        secondary!("name_after_label", r"(?i)\b(name|patient|customer)\s*:\s*[A-Z][a-z]+\s+[A-Z][a-z]+"),
    ]
});

/// Masks `primary` wherever it appears in `ctx`, then scans for secondary
/// sensitive patterns (SSN/phone/email/date/address/account/card/long
/// alphanumeric/password assignment/name-after-label) and masks each
/// non-overlapping match not already covered by the primary mask.
#[must_use]
pub fn redact_context(ctx: &str, primary: &str) -> String {
    let mut masked = if primary.is_empty() {
        ctx.to_string()
    } else {
        ctx.replace(primary, &redact(primary))
    };

    for pattern in SECONDARY_PATTERNS.iter() {
        let hits: Vec<(usize, usize)> = pattern
            .regex
            .find_iter(&masked)
            .map(|m| (m.start(), m.end()))
            .collect();
        for (start, end) in hits.into_iter().rev() {
            let candidate = &masked[start..end];
            if candidate.contains('*') {
                continue;
            }
            let replacement = redact(candidate);
            masked.replace_range(start..end, &replacement);
        }
    }

    masked
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_short_value() {
        assert_eq!(redact("abcd"), "****");
        assert_eq!(redact("abc"), "****");
    }

    #[test]
    fn redact_long_value() {
        assert_eq!(redact("123-45-6789"), "12*******89");
    }

    #[test]
    fn redact_is_idempotent() {
        let v = "123-45-6789";
        let once = redact(v);
        let twice = redact(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn redact_context_masks_primary() {
        let ctx = "Customer SSN: 123-45-6789 on file";
        let masked = redact_context(ctx, "123-45-6789");
        assert!(!masked.contains("123-45-6789"));
        assert!(masked.contains("12*******89"));
    }

    #[test]
    fn redact_context_masks_secondary_email() {
        let ctx = "contact jane.doe@example.org for details, ssn unrelated";
        let masked = redact_context(ctx, "unrelated");
        assert!(!masked.contains("jane.doe@example.org"));
    }

    #[test]
    fn redact_context_does_not_double_mask() {
        let ctx = "123-45-6789";
        let masked = redact_context(ctx, "123-45-6789");
        // Primary mask applied once; secondary SSN scan must not re-mask
        // the already-masked text.
        assert_eq!(masked, redact("123-45-6789"));
    }
}
