//! Field language validation.
//!
//! This module checks generated text fields against a previously detected
//! target language. Fields that carry no language (URLs, emails, numbers,
//! short brand-like tokens) are skipped rather than judged.

use crate::language::detector::{detect, TargetLanguage};
use crate::language::script::{letter_tokens, Script};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

/// Latin detections below this confidence never count as a hard mismatch.
const LATIN_MISMATCH_MIN_CONFIDENCE: f64 = 0.8;

/// Single-token values with at most this many letters are treated as names.
const NAME_MAX_LETTERS: usize = 8;

/// A field whose language did not match the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMismatch {
    pub field: String,
    pub detected_code: &'static str,
    pub detected_label: &'static str,
    /// Human-readable explanation (script or language mismatch)
    pub reason: String,
}

/// Outcome of validating a set of fields against a target language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub checked_fields: usize,
    pub matched_fields: usize,
    pub skipped_fields: usize,

    /// Mismatches in sorted field-name order
    pub mismatches: Vec<FieldMismatch>,
}

impl ValidationResult {
    /// Create a new empty validation result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every judged field matched the target
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Names of the mismatched fields, in order
    pub fn mismatched_fields(&self) -> impl Iterator<Item = &str> {
        self.mismatches.iter().map(|m| m.field.as_str())
    }
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn is_email(value: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
        .is_match(value)
}

fn is_url(value: &str) -> bool {
    URL_REGEX
        .get_or_init(|| Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*://|www\.)\S+$").unwrap())
        .is_match(value)
}

/// Whether a trimmed field value carries no judgeable language.
fn is_neutral(value: &str) -> bool {
    if value.is_empty() || is_email(value) || is_url(value) {
        return true;
    }

    let letters = value.chars().filter(|c| c.is_alphabetic()).count();
    if letters == 0 {
        return true;
    }

    letter_tokens(value).count() <= 1 && letters <= NAME_MAX_LETTERS
}

/// Check whether a detected field language is acceptable for the target.
///
/// Non-Latin targets only require the same script. Latin targets require a
/// Latin detection, and only a confidently detected different language is
/// treated as a mismatch.
pub fn is_language_compatible(target: &TargetLanguage, detected: &TargetLanguage) -> bool {
    if target.script() != Some(Script::Latin) {
        return detected.script() == target.script();
    }

    if detected.script() != Some(Script::Latin) {
        return false;
    }

    if target.code().is_empty() || detected.code().is_empty() {
        return true;
    }

    target.code() == detected.code() || detected.confidence() < LATIN_MISMATCH_MIN_CONFIDENCE
}

fn mismatch_reason(target: &TargetLanguage, detected: &TargetLanguage) -> String {
    let script_name = |lang: &TargetLanguage| lang.script().map_or("unknown", |s| s.name());

    if target.script() != detected.script() {
        format!(
            "expected {} script, got {} script",
            script_name(target),
            script_name(detected)
        )
    } else {
        format!("expected {}, got {}", target.label(), detected.label())
    }
}

/// Validate that every language-bearing field is written in `target`.
///
/// Fields are visited in sorted name order so the mismatch list is
/// deterministic regardless of the map type supplied. An unreliable target
/// yields an empty result: nothing is enforced.
pub fn validate_fields<I, K, V>(target: &TargetLanguage, fields: I) -> ValidationResult
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut result = ValidationResult::new();
    if !target.is_enforceable() {
        return result;
    }

    let mut fields: Vec<(K, V)> = fields.into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

    for (name, value) in &fields {
        let name = name.as_ref();
        let value = value.as_ref().trim();

        if is_neutral(value) {
            result.skipped_fields += 1;
            continue;
        }

        let detected = detect(value);
        if !detected.is_reliable() {
            result.skipped_fields += 1;
            continue;
        }

        result.checked_fields += 1;
        if is_language_compatible(target, &detected) {
            result.matched_fields += 1;
            continue;
        }

        let reason = mismatch_reason(target, &detected);
        debug!(field = name, reason = %reason, "Field language mismatch");
        result.mismatches.push(FieldMismatch {
            field: name.to_string(),
            detected_code: detected.code(),
            detected_label: detected.label(),
            reason,
        });
    }

    debug!(
        target = target.code(),
        checked = result.checked_fields,
        matched = result.matched_fields,
        skipped = result.skipped_fields,
        mismatched = result.mismatches.len(),
        "Validated field languages"
    );

    result
}
