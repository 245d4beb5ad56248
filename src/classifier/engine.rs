//! The classification engine — compiles [`Rule`]s into regexes and applies
//! them to document text.
//!
//! [`ClassificationEngine::classify`] is pure and deterministic: the same
//! `content` always yields the same [`ClassificationResult`]. Rule sets are
//! held behind an [`arc_swap::ArcSwap`] snapshot so an admin-path
//! [`ClassificationEngine::reload`] never blocks an in-flight `classify`
//! call (see the crate's concurrency notes).

use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Category, Sensitivity};

use super::redact::{redact, redact_context};
use super::rules::Rule;

const MAX_SAMPLE_MATCHES: usize = 5;
const MAX_LINE_NUMBERS: usize = 10;
const CONTEXT_PAD: usize = 30;
const NEGATIVE_WINDOW: usize = 100;

/// Errors raised while compiling a rule set. `classify` itself never fails.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A rule's pattern, context pattern, or negative pattern is not a
    /// valid regular expression.
    #[error("rule '{rule}' has an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// A classification call was cancelled before completion.
    #[error("classification cancelled")]
    Cancelled,
}

/// A single raw hit within one line of a document, before aggregation.
#[derive(Debug, Clone)]
pub struct RawMatch {
    pub value: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    pub column_name: Option<String>,
    /// Literal `line[a-30 .. b+30]` slice, un-redacted.
    pub context_window: String,
}

/// An aggregated, redacted finding for one rule within one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub rule_name: String,
    pub category: Category,
    pub sensitivity: Sensitivity,
    pub redacted_value: String,
    pub count: usize,
    /// First 10 line numbers a match occurred on.
    pub line_numbers: Vec<usize>,
    pub sample_matches: Vec<SampleMatch>,
    pub column_name: Option<String>,
}

/// One masked sample within a [`Match`], preserving file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleMatch {
    pub masked_value: String,
    pub context: String,
    pub line: usize,
    pub column: usize,
}

/// The result of classifying a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub matches: Vec<Match>,
    pub total_findings: usize,
    pub categories: BTreeSet<Category>,
    pub max_sensitivity: Sensitivity,
}

/// A compiled rule: the original [`Rule`] plus its regexes.
struct CompiledRule {
    rule: Rule,
    patterns: Vec<Regex>,
    context_patterns: Vec<Regex>,
    negative_patterns: Vec<Regex>,
}

/// An immutable, compiled snapshot of the active rule set.
struct CompiledRuleSet {
    rules: Vec<CompiledRule>,
}

impl CompiledRuleSet {
    fn compile(rules: Vec<Rule>) -> Result<Self, ClassifierError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let patterns = compile_all(&rule.name, &rule.patterns)?;
            let context_patterns = compile_all(&rule.name, &rule.context_patterns)?;
            let negative_patterns = compile_all(&rule.name, &rule.negative_patterns)?;
            compiled.push(CompiledRule {
                rule,
                patterns,
                context_patterns,
                negative_patterns,
            });
        }
        Ok(Self { rules: compiled })
    }
}

fn compile_all(rule_name: &str, patterns: &[String]) -> Result<Vec<Regex>, ClassifierError> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|source| ClassifierError::InvalidPattern {
                rule: rule_name.to_string(),
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

/// Applies a compiled rule set to document text.
///
/// Construction compiles every rule's patterns up front; `classify` and
/// `classify_cancellable` are pure functions of `(self, content)`.
pub struct ClassificationEngine {
    active: ArcSwap<CompiledRuleSet>,
}

impl ClassificationEngine {
    /// Build an engine from an explicit rule list.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::InvalidPattern`] if any rule's regex
    /// fails to compile.
    pub fn new(rules: Vec<Rule>) -> Result<Self, ClassifierError> {
        let compiled = CompiledRuleSet::compile(rules)?;
        Ok(Self {
            active: ArcSwap::from_pointee(compiled),
        })
    }

    /// Build an engine from the built-in rule catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::InvalidPattern`] if a built-in rule fails
    /// to compile (indicates a bug in the catalog itself).
    pub fn with_builtin_rules() -> Result<Self, ClassifierError> {
        Self::new(super::rules::builtin_rules())
    }

    /// Atomically swap in a new rule set. In-flight `classify` calls keep
    /// using the snapshot they loaded; only subsequent calls see the new
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::InvalidPattern`] if a new rule's regex
    /// fails to compile — the previously active set is left untouched.
    pub fn reload(&self, rules: Vec<Rule>) -> Result<(), ClassifierError> {
        let compiled = CompiledRuleSet::compile(rules)?;
        self.active.store(Arc::new(compiled));
        tracing::info!("classification rule set reloaded");
        Ok(())
    }

    /// Classify `content`, never failing on user input.
    #[must_use]
    pub fn classify(&self, content: &str) -> ClassificationResult {
        self.classify_cancellable(content, &|| false)
            .expect("a cancellation check that always returns false never cancels")
    }

    /// Classify `content`, checking `is_cancelled` at each rule boundary.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Cancelled`] if `is_cancelled` reports
    /// true before the document has been fully processed; no partial
    /// result is returned.
    pub fn classify_cancellable(
        &self,
        content: &str,
        is_cancelled: &dyn Fn() -> bool,
    ) -> Result<ClassificationResult, ClassifierError> {
        let snapshot = self.active.load();
        let lines: Vec<&str> = content.lines().collect();
        let header = detect_csv_header(&lines);
        let lowercased_doc = content.to_lowercase();

        let mut matches = Vec::new();
        for compiled in &snapshot.rules {
            if is_cancelled() {
                return Err(ClassifierError::Cancelled);
            }
            if let Some(m) = classify_one_rule(compiled, &lines, header.as_deref(), &lowercased_doc) {
                matches.push(m);
            }
        }

        let categories: BTreeSet<Category> = matches.iter().map(|m| m.category).collect();
        let max_sensitivity = matches
            .iter()
            .map(|m| m.sensitivity)
            .max()
            .unwrap_or(Sensitivity::Unknown);
        let total_findings = matches.iter().map(|m| m.count).sum();

        Ok(ClassificationResult {
            matches,
            total_findings,
            categories,
            max_sensitivity,
        })
    }
}

/// Splits the first line into trimmed header names if it contains a comma.
fn detect_csv_header(lines: &[&str]) -> Option<Vec<String>> {
    let first = lines.first()?;
    if !first.contains(',') {
        return None;
    }
    Some(first.split(',').map(|h| h.trim().to_string()).collect())
}

fn classify_one_rule(
    compiled: &CompiledRule,
    lines: &[&str],
    header: Option<&[String]>,
    lowercased_doc: &str,
) -> Option<Match> {
    if compiled.rule.context_distance == super::rules::ContextDistance::Anywhere
        && !compiled.context_patterns.is_empty()
        && !compiled
            .context_patterns
            .iter()
            .any(|c| c.is_match(lowercased_doc))
    {
        return None;
    }

    // Cumulative byte offset of the start of each line within the document,
    // accounting for the `\n` the `.lines()` iterator strips.
    let mut line_offsets = Vec::with_capacity(lines.len());
    let mut offset = 0usize;
    for line in lines {
        line_offsets.push(offset);
        offset += line.len() + 1;
    }

    let mut raw_matches: Vec<RawMatch> = Vec::new();
    let mut line_numbers: Vec<usize> = Vec::new();

    'lines: for (line_idx, line) in lines.iter().enumerate() {
        for pattern in &compiled.patterns {
            for m in pattern.find_iter(line) {
                let (a, b) = (m.start(), m.end());
                let value = &line[a..b];

                if !compiled.rule.validators.iter().all(|v| (v.check)(value)) {
                    continue;
                }

                if let super::rules::ContextDistance::Window(distance) = compiled.rule.context_distance {
                    let abs_pos = line_offsets[line_idx] + a;
                    let width = b - a;
                    let win_start = abs_pos.saturating_sub(distance);
                    let win_end = (abs_pos + width + distance).min(lowercased_doc.len());
                    let window = &lowercased_doc[win_start.min(lowercased_doc.len())..win_end];
                    if !compiled.context_patterns.iter().any(|c| c.is_match(window)) {
                        continue;
                    }
                }

                let neg_start = a.saturating_sub(NEGATIVE_WINDOW);
                let neg_end = (b + NEGATIVE_WINDOW).min(line.len());
                let neg_window = line[neg_start..neg_end].to_lowercase();
                if compiled.negative_patterns.iter().any(|n| n.is_match(&neg_window)) {
                    continue;
                }

                let column_name = header.and_then(|h| {
                    if line_idx == 0 {
                        return None;
                    }
                    let column_index = line[..a].matches(',').count();
                    h.get(column_index).cloned()
                });

                let ctx_start = a.saturating_sub(CONTEXT_PAD);
                let ctx_end = (b + CONTEXT_PAD).min(line.len());
                let context_window = line[ctx_start..ctx_end].to_string();

                raw_matches.push(RawMatch {
                    value: value.to_string(),
                    line: line_idx + 1,
                    column: a + 1,
                    column_name,
                    context_window,
                });

                if line_numbers.last() != Some(&(line_idx + 1)) {
                    line_numbers.push(line_idx + 1);
                }

                if raw_matches.len() >= 10_000 {
                    break 'lines;
                }
            }
        }
    }

    if raw_matches.is_empty() {
        return None;
    }

    let redacted_value = redact(&raw_matches[0].value);
    let sample_matches: Vec<SampleMatch> = raw_matches
        .iter()
        .take(MAX_SAMPLE_MATCHES)
        .map(|rm| SampleMatch {
            masked_value: redact(&rm.value),
            context: redact_context(&rm.context_window, &rm.value),
            line: rm.line,
            column: rm.column,
        })
        .collect();

    Some(Match {
        rule_name: compiled.rule.name.clone(),
        category: compiled.rule.category,
        sensitivity: compiled.rule.sensitivity,
        redacted_value,
        count: raw_matches.len(),
        line_numbers: line_numbers.into_iter().take(MAX_LINE_NUMBERS).collect(),
        sample_matches,
        column_name: raw_matches[0].column_name.clone(),
    })
}

// ── Tests ──────────────────────────────────────────────────────────────
