//! Generation directives for the detected target language.
//!
//! Both builders return an empty string when the target is not
//! enforceable, meaning no language directive should be added.

use crate::language::detector::TargetLanguage;
use crate::language::validator::ValidationResult;

const DEFAULT_FIELD_LIST: &str = "the user-facing text fields";

const PRESERVE_RULE: &str =
    "Do not translate proper nouns, URLs, email addresses, or quoted literals; keep them exactly as written.";

/// Build the directive appended to the first generation prompt.
pub fn build_initial_instruction(target: &TargetLanguage) -> String {
    if !target.is_enforceable() {
        return String::new();
    }

    format!(
        r#"## Output Language

Write every user-facing field (title, description, location) in {label} ({code}).
Match the language of the latest triggering discussion, even if earlier messages used another language.
{preserve}"#,
        label = target.label(),
        code = target.code(),
        preserve = PRESERVE_RULE,
    )
}

/// Build the directive appended to a regeneration prompt after validation failed.
pub fn build_corrective_instruction(target: &TargetLanguage, validation: &ValidationResult) -> String {
    if !target.is_enforceable() {
        return String::new();
    }

    let fields = validation.mismatched_fields().collect::<Vec<_>>().join(", ");
    let fields = if fields.is_empty() {
        DEFAULT_FIELD_LIST.to_string()
    } else {
        fields
    };

    format!(
        r#"## Language Correction

The previous output was not written in {label} ({code}).
Regenerate exactly these fields in {label} ({code}): {fields}.
Leave every other field unchanged.
{preserve}"#,
        label = target.label(),
        code = target.code(),
        fields = fields,
        preserve = PRESERVE_RULE,
    )
}
