//! C1: sensitive-data classification.
//!
//! A regex-and-validator rule engine that scans document text for
//! regulated data (PII, PHI, PCI, credentials), gates candidate matches on
//! surrounding context, and returns masked findings — raw sensitive values
//! never leave this module.

mod engine;
mod redact;
mod rules;
mod validators;

pub use engine::{
    ClassificationEngine, ClassificationResult, ClassifierError, Match, RawMatch, SampleMatch,
};
pub use redact::{redact, redact_context};
pub use rules::{ContextDistance, Rule, RuleBuilder, Validator, builtin_rules};
pub use validators::{
    luhn_valid, no_dominant_digit, valid_aba_routing, valid_iban, valid_ssn, valid_us_phone,
};
