//! Rule definitions and the built-in rule catalog.
//!
//! A [`Rule`] is immutable once built; [`builtin_rules`] returns the default
//! catalog described in the specification, and callers may add
//! [`Rule`]s of their own for custom categories.

use crate::model::{Category, Sensitivity};

use super::validators;

/// A single predicate applied to a candidate match's substring.
///
/// Wraps a named pure `fn(&str) -> bool` so validator failures can be
/// attributed to a specific check in diagnostics.
#[derive(Clone)]
pub struct Validator {
    /// Short name for diagnostics (e.g. `"luhn"`).
    pub name: &'static str,
    /// The predicate itself.
    pub check: fn(&str) -> bool,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish()
    }
}

impl Validator {
    /// Construct a named validator from a function pointer.
    #[must_use]
    pub const fn new(name: &'static str, check: fn(&str) -> bool) -> Self {
        Self { name, check }
    }
}

/// How far from a candidate a context pattern must match.
///
/// `Anywhere` requires a context pattern to match anywhere in the document
/// (a fail-fast global gate). `Window(n)` requires a match within `n`
/// characters of the candidate on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDistance {
    /// No context requirement.
    None,
    /// Context pattern must match anywhere in the full document.
    Anywhere,
    /// Context pattern must match within `n` characters of the candidate.
    Window(usize),
}

impl Default for ContextDistance {
    fn default() -> Self {
        Self::None
    }
}

/// An immutable rule: one or more patterns, optional context gating, and
/// validators — the unit of work the [`crate::classifier::ClassificationEngine`]
/// applies to a document.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique rule name (e.g. `"ssn"`, `"credit_card"`).
    pub name: String,
    pub category: Category,
    pub sensitivity: Sensitivity,
    /// Ordered regex pattern sources; matching is OR across patterns.
    pub patterns: Vec<String>,
    /// Regex sources that must match near (or anywhere in) the document.
    pub context_patterns: Vec<String>,
    /// Regex sources that, if matched near a candidate, reject it.
    pub negative_patterns: Vec<String>,
    /// How far from a candidate a context pattern may match.
    pub context_distance: ContextDistance,
    /// Validators run in order against the raw matched substring.
    pub validators: Vec<Validator>,
}

/// Builder for [`Rule`] — every setter is `#[must_use]` so a builder chain
/// that drops its result is a compile warning, not a silent no-op.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    rule: Rule,
}

impl RuleBuilder {
    /// Start building a rule with the given name, category, and sensitivity.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category, sensitivity: Sensitivity) -> Self {
        Self {
            rule: Rule {
                name: name.into(),
                category,
                sensitivity,
                patterns: Vec::new(),
                context_patterns: Vec::new(),
                negative_patterns: Vec::new(),
                context_distance: ContextDistance::None,
                validators: Vec::new(),
            },
        }
    }

    /// Add a matching pattern.
    #[must_use]
    pub fn pattern(mut self, regex: impl Into<String>) -> Self {
        self.rule.patterns.push(regex.into());
        self
    }

    /// Add an inclusion context pattern.
    #[must_use]
    pub fn context(mut self, regex: impl Into<String>) -> Self {
        self.rule.context_patterns.push(regex.into());
        self
    }

    /// Add an exclusion (negative) pattern.
    #[must_use]
    pub fn negative(mut self, regex: impl Into<String>) -> Self {
        self.rule.negative_patterns.push(regex.into());
        self
    }

    /// Require context within the given distance (or [`ContextDistance::Anywhere`]).
    #[must_use]
    pub fn context_required(mut self, distance: ContextDistance) -> Self {
        self.rule.context_distance = distance;
        self
    }

    /// Add a validator.
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.rule.validators.push(validator);
        self
    }

    /// Finish building the rule.
    #[must_use]
    pub fn build(self) -> Rule {
        self.rule
    }
}

/// Reduces boilerplate when listing the built-in catalog.
macro_rules! rule {
    ($b:expr) => {
        $b.build()
    };
}

/// Returns the full built-in rule catalog described by the specification.
#[allow(clippy::too_many_lines)]
#[must_use]
pub fn builtin_rules() -> Vec<Rule> {
    use Category::{Custom as _Custom, Pci, Phi, Pii, Secrets};
    use ContextDistance::{Anywhere, Window};
    use Sensitivity::{Critical, High, Medium};

    vec![
        // ── PII ──────────────────────────────────────────────────────
        rule!(
            RuleBuilder::new("ssn", Pii, Critical)
                .pattern(r"\b\d{3}-\d{2}-\d{4}\b")
                .pattern(r"\b\d{3} \d{2} \d{4}\b")
                .validator(Validator::new("ssn_checksum", validators::valid_ssn))
        ),
        rule!(
            RuleBuilder::new("email", Pii, Medium)
                .pattern(r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b")
                .negative(r"(?i)\b(noreply|no-reply|donotreply|admin|postmaster|webmaster)@")
                .negative(r"(?i)@(example\.com|test\.com|domain\.com)\b")
                .negative(r"(?i)[a-z0-9._%+\-]+:[^@\s]+@")
        ),
        rule!(
            RuleBuilder::new("us_phone", Pii, Medium)
                .pattern(r"\b\(?\d{3}\)?[\s.\-]\d{3}[\s.\-]\d{4}\b")
                .context("(?i)phone|call|contact|mobile|cell|tel\\b")
                .context_required(Window(150))
                .negative(r"(?i)\b(ip|address|port|version|timestamp|id)\b")
                .validator(Validator::new("us_phone", validators::valid_us_phone))
        ),
        rule!(
            RuleBuilder::new("address_us", Pii, Medium)
                .pattern(
                    r"(?i)\b\d{1,6}\s+\w+(\s\w+)?\s+(street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|way|place|pl)\b"
                )
                .context("(?i)address|residence|mailing|ship\\s*to|deliver")
                .context_required(Window(200))
        ),
        rule!(
            RuleBuilder::new("dob", Pii, High)
                .pattern(r"\b(0?[1-9]|1[0-2])[/\-](0?[1-9]|[12]\d|3[01])[/\-](19|20)\d{2}\b")
                .pattern(r"\b(0?[1-9]|[12]\d|3[01])[/\-](0?[1-9]|1[0-2])[/\-](19|20)\d{2}\b")
                .context("(?i)dob|birth|born")
                .context_required(Window(200))
        ),
        rule!(
            RuleBuilder::new("passport", Pii, Critical)
                .pattern(r"\b[A-Z]{1,2}\d{6,9}\b")
                .context("(?i)passport")
                .context_required(Anywhere)
        ),
        // ── PHI ──────────────────────────────────────────────────────
        rule!(
            RuleBuilder::new("mrn", Phi, High)
                .pattern(r"\b[A-Z]{0,3}\d{6,10}\b")
                .context("(?i)mrn|medical\\s*record|patient\\s*id")
                .context_required(Window(100))
        ),
        rule!(
            RuleBuilder::new("icd10", Phi, High)
                .pattern(r"\b[A-TV-Z]\d{2}(\.\d{1,4})?\b")
                .context("(?i)diagnosis|icd|condition|disorder")
                .context_required(Window(100))
                .negative(r"(?i)\b(v\d+\.\d+|version|firmware|build|release)\b")
        ),
        rule!(
            RuleBuilder::new("ndc", Phi, High)
                .pattern(r"\b\d{4,5}-\d{3,4}-\d{1,2}\b")
                .context("(?i)ndc|drug|medication|prescription|rx\\b")
                .context_required(Window(100))
        ),
        // ── PCI ──────────────────────────────────────────────────────
        rule!(
            RuleBuilder::new("credit_card", Pci, Critical)
                .pattern(r"\b4\d{3}[\s\-]?\d{4}[\s\-]?\d{4}[\s\-]?\d{1,4}\b")
                .pattern(r"\b5[1-5]\d{2}[\s\-]?\d{4}[\s\-]?\d{4}[\s\-]?\d{4}\b")
                .pattern(r"\b3[47]\d{2}[\s\-]?\d{6}[\s\-]?\d{5}\b")
                .pattern(r"\b6(?:011|5\d{2})[\s\-]?\d{4}[\s\-]?\d{4}[\s\-]?\d{4}\b")
                .pattern(r"\b(?:5018|5020|5038|5612|5893|6304|6759|6761|6762|6763)[\s\-]?\d{4,12}\b")
                .validator(Validator::new("luhn", validators::luhn_valid))
        ),
        rule!(
            RuleBuilder::new("bank_account", Pci, High)
                .pattern(r"\b\d{8,17}\b")
                .context("(?i)account\\s*(number|no|#)|bank\\s*account|iban\\b")
                .context_required(Window(150))
                .negative(r"(?i)\becr\d|arn:aws|i-[0-9a-f]{8,}")
        ),
        rule!(
            RuleBuilder::new("routing_number", Pci, High)
                .pattern(r"\b\d{9}\b")
                .context("(?i)routing|aba\\b")
                .context_required(Window(100))
                .validator(Validator::new("aba_checksum", validators::valid_aba_routing))
        ),
        rule!(
            RuleBuilder::new("iban", Pci, High)
                .pattern(r"\b[A-Z]{2}\d{2}[A-Z0-9]{10,30}\b")
                .validator(Validator::new("iban_mod97", validators::valid_iban))
        ),
        // ── Secrets ──────────────────────────────────────────────────
        rule!(
            RuleBuilder::new("aws_access_key", Secrets, Critical)
                .pattern(r"\b(AKIA|ASIA)[0-9A-Z]{16}\b")
        ),
        rule!(
            RuleBuilder::new("aws_secret_key", Secrets, Critical)
                .pattern(r#"(?i)aws(.{0,20})?(secret|access)(.{0,20})?['"]\s*[:=]\s*['"][A-Za-z0-9/+=]{40}['"]"#)
        ),
        rule!(
            RuleBuilder::new("private_key_block", Secrets, Critical)
                .pattern(r"-----BEGIN ((RSA|EC|DSA|OPENSSH) )?PRIVATE KEY-----")
        ),
        rule!(
            RuleBuilder::new("jwt", Secrets, High)
                .pattern(r"\beyJ[A-Za-z0-9_\-]+\.eyJ[A-Za-z0-9_\-]+\.[A-Za-z0-9_\-]+\b")
        ),
        rule!(
            RuleBuilder::new("github_token", Secrets, Critical)
                .pattern(r"\bgh[pousr]_[A-Za-z0-9]{36,}\b")
        ),
        rule!(
            RuleBuilder::new("slack_token", Secrets, Critical)
                .pattern(r"\bxox[baprs]-[A-Za-z0-9-]{10,}\b")
        ),
        rule!(
            RuleBuilder::new("google_api_key", Secrets, High)
                .pattern(r"\bAIza[0-9A-Za-z\-_]{35}\b")
        ),
        rule!(
            RuleBuilder::new("azure_connection_string", Secrets, Critical)
                .pattern(r"(?i)DefaultEndpointsProtocol=https?;AccountName=[^;]+;AccountKey=[A-Za-z0-9+/=]+")
        ),
        rule!(
            RuleBuilder::new("db_connection_string", Secrets, Critical)
                .pattern(r"(?i)\b(postgres|postgresql|mysql|mongodb(\+srv)?|redis)://[^:/\s]+:[^@/\s]+@[^\s/]+")
        ),
        rule!(
            RuleBuilder::new("generic_api_key", Secrets, Medium)
                .pattern(r#"(?i)api[_\-]?key['"]?\s*[:=]\s*['"][A-Za-z0-9_\-]{20,}['"]"#)
        ),
    ]
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_nonempty_and_unique_names() {
        let rules = builtin_rules();
        assert!(rules.len() >= 20);
        let names: std::collections::HashSet<_> = rules.iter().map(|r| &r.name).collect();
        assert_eq!(names.len(), rules.len(), "duplicate rule names detected");
    }

    #[test]
    fn builtin_patterns_all_compile() {
        for r in &builtin_rules() {
            for p in r.patterns.iter().chain(&r.context_patterns).chain(&r.negative_patterns) {
                regex::Regex::new(p)
                    .unwrap_or_else(|e| panic!("rule {} has invalid pattern {p:?}: {e}", r.name));
            }
        }
    }

    #[test]
    fn credit_card_rule_uses_luhn() {
        let rules = builtin_rules();
        let cc = rules.iter().find(|r| r.name == "credit_card").unwrap();
        assert!(cc.validators.iter().any(|v| v.name == "luhn"));
    }

    #[test]
    fn phone_rule_requires_windowed_context() {
        let rules = builtin_rules();
        let phone = rules.iter().find(|r| r.name == "us_phone").unwrap();
        assert_eq!(phone.context_distance, ContextDistance::Window(150));
    }

    #[test]
    fn builder_is_chainable() {
        let r = RuleBuilder::new("custom_thing", Category::Custom, Sensitivity::Low)
            .pattern(r"\bfoo\b")
            .context("bar")
            .context_required(ContextDistance::Window(10))
            .build();
        assert_eq!(r.name, "custom_thing");
        assert_eq!(r.patterns, vec![r"\bfoo\b".to_string()]);
    }
}
