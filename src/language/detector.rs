//! Target-language detection.
//!
//! Detection runs in three stages over a single piece of text:
//!
//! 1. Letters are counted per script ([`ScriptCounts::classify`]).
//! 2. A decisively dominant Hebrew, Arabic or Cyrillic script resolves the
//!    language immediately.
//! 3. Latin-dominant text is disambiguated with a diacritic signal, then a
//!    keyword signal, then a weak English fallback.
//!
//! Every path produces a [`TargetLanguage`]; insufficient evidence is
//! expressed as `reliable == false`, never as an error.

use crate::language::registry::{LanguageConfig, LanguageRegistry};
use crate::language::script::{letter_tokens, Script, ScriptCounts};
use serde::Serialize;
use tracing::debug;

/// Minimum letters of a non-Latin script before it can dominate.
const STRONG_SCRIPT_MIN_LETTERS: usize = 2;
/// Minimum share of all letters a non-Latin script needs to dominate.
const STRONG_SCRIPT_MIN_RATIO: f64 = 0.35;
const STRONG_SCRIPT_BASE_CONFIDENCE: f64 = 0.7;
const STRONG_SCRIPT_RATIO_WEIGHT: f64 = 0.28;
const STRONG_SCRIPT_MAX_CONFIDENCE: f64 = 0.98;

/// Minimum winning score for both the diacritic and the keyword signal.
const SIGNAL_MIN_SCORE: usize = 2;
/// Required lead of the winning score over the runner-up.
const SIGNAL_MIN_MARGIN: usize = 1;

const DIACRITIC_CONFIDENCE: f64 = 0.9;

const KEYWORD_BASE_CONFIDENCE: f64 = 0.72;
const KEYWORD_MARGIN_WEIGHT: f64 = 0.08;
const KEYWORD_MAX_CONFIDENCE: f64 = 0.95;

const FALLBACK_MIN_LATIN_LETTERS: usize = 8;
const FALLBACK_MIN_TOKENS: usize = 2;
const FALLBACK_CODE: &str = "en";
const FALLBACK_CONFIDENCE: f64 = 0.62;

const UNRESOLVED_LATIN_CONFIDENCE: f64 = 0.45;

const UNKNOWN_LABEL: &str = "Unknown";

/// The language generated content should be written in.
///
/// A value type: constructed per detection and never mutated. When
/// `reliable` is false the code is always empty and callers must not
/// enforce any language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetLanguage {
    code: &'static str,
    label: &'static str,
    script: Option<Script>,
    confidence: f64,
    reliable: bool,
}

impl TargetLanguage {
    /// Fully unknown: no language and no script identified.
    pub fn unknown() -> Self {
        Self {
            code: "",
            label: UNKNOWN_LABEL,
            script: None,
            confidence: 0.0,
            reliable: false,
        }
    }

    /// Latin script identified, but no specific language could be chosen.
    fn unresolved_latin() -> Self {
        Self {
            code: "",
            label: UNKNOWN_LABEL,
            script: Some(Script::Latin),
            confidence: UNRESOLVED_LATIN_CONFIDENCE,
            reliable: false,
        }
    }

    fn reliable(config: &LanguageConfig, confidence: f64) -> Self {
        Self {
            code: config.code,
            label: config.name,
            script: Some(config.script),
            confidence: confidence.clamp(0.0, 1.0),
            reliable: true,
        }
    }

    /// Build a reliable target for a registered language code.
    ///
    /// Returns `None` for unregistered codes. Useful for callers that already
    /// know the language (e.g., a user preference) and only need validation.
    pub fn from_code(code: &str, confidence: f64) -> Option<Self> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Self::reliable(config, confidence))
    }

    /// ISO 639-1 code, or `""` when unknown.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// English name of the language, or "Unknown".
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Script bucket, if one was identified.
    pub fn script(&self) -> Option<Script> {
        self.script
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn is_reliable(&self) -> bool {
        self.reliable
    }

    /// Whether this target should be enforced on generated text.
    pub fn is_enforceable(&self) -> bool {
        self.reliable && !self.code.is_empty()
    }
}

/// Detect the target language of `text`.
pub fn detect(text: &str) -> TargetLanguage {
    let counts = ScriptCounts::classify(text);
    let target = resolve(text, &counts);

    debug!(
        code = target.code,
        script = target.script.map(|s| s.name()).unwrap_or(""),
        confidence = target.confidence,
        reliable = target.reliable,
        total_letters = counts.total_letters,
        "Detected target language"
    );

    target
}

fn resolve(text: &str, counts: &ScriptCounts) -> TargetLanguage {
    if let Some(target) = resolve_strong_script(counts) {
        return target;
    }

    if counts.latin == 0 {
        return TargetLanguage::unknown();
    }

    disambiguate_latin(text, counts)
}

/// Resolve a decisively dominant Hebrew, Arabic or Cyrillic script.
fn resolve_strong_script(counts: &ScriptCounts) -> Option<TargetLanguage> {
    let (script, count) = counts.dominant()?;
    if script == Script::Latin || count < STRONG_SCRIPT_MIN_LETTERS {
        return None;
    }

    let ratio = count as f64 / counts.total_letters as f64;
    if ratio < STRONG_SCRIPT_MIN_RATIO {
        return None;
    }

    let config = LanguageRegistry::get().for_script(script)?;
    let confidence = (STRONG_SCRIPT_BASE_CONFIDENCE + ratio * STRONG_SCRIPT_RATIO_WEIGHT)
        .min(STRONG_SCRIPT_MAX_CONFIDENCE);

    Some(TargetLanguage::reliable(config, confidence))
}

fn disambiguate_latin(text: &str, counts: &ScriptCounts) -> TargetLanguage {
    let lowered = text.to_lowercase();
    let languages: Vec<&LanguageConfig> = LanguageRegistry::get().latin_languages().collect();

    let diacritic_scores: Vec<usize> = languages
        .iter()
        .map(|lang| lowered.chars().filter(|&c| lang.is_diacritic(c)).count())
        .collect();
    if let Some((idx, _)) = decisive_winner(&diacritic_scores) {
        return TargetLanguage::reliable(languages[idx], DIACRITIC_CONFIDENCE);
    }

    let tokens: Vec<&str> = letter_tokens(&lowered).collect();
    let keyword_scores: Vec<usize> = languages
        .iter()
        .map(|lang| tokens.iter().filter(|token| lang.is_hint(token)).count())
        .collect();
    if let Some((idx, margin)) = decisive_winner(&keyword_scores) {
        let confidence = (KEYWORD_BASE_CONFIDENCE + margin as f64 * KEYWORD_MARGIN_WEIGHT)
            .min(KEYWORD_MAX_CONFIDENCE);
        return TargetLanguage::reliable(languages[idx], confidence);
    }

    if counts.latin >= FALLBACK_MIN_LATIN_LETTERS && tokens.len() >= FALLBACK_MIN_TOKENS {
        if let Some(english) = LanguageRegistry::get().get_by_code(FALLBACK_CODE) {
            return TargetLanguage::reliable(english, FALLBACK_CONFIDENCE);
        }
    }

    TargetLanguage::unresolved_latin()
}

/// Index and margin of a score that clears both the floor and the lead.
fn decisive_winner(scores: &[usize]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut second = 0;

    for (idx, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score > top => {
                second = top;
                best = Some((idx, score));
            }
            Some(_) => second = second.max(score),
            None => best = Some((idx, score)),
        }
    }

    let (idx, top) = best?;
    (top >= SIGNAL_MIN_SCORE && top >= second + SIGNAL_MIN_MARGIN).then_some((idx, top - second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    // ==================== Unknown Tests ====================

    #[test]
    fn test_detect_empty_is_unknown() {
        assert_eq!(detect(""), TargetLanguage::unknown());
    }

    #[test]
    fn test_detect_letterless_is_unknown() {
        let target = detect("2024-05-01 10:30 🎉 !!!");
        assert!(!target.is_reliable());
        assert_eq!(target.code(), "");
        assert_eq!(target.script(), None);
        assert_eq!(target.label(), "Unknown");
    }

    #[test]
    fn test_detect_other_script_is_unknown() {
        let target = detect("明天开会");
        assert_eq!(target, TargetLanguage::unknown());
    }

    // ==================== Strong Script Tests ====================

    #[test]
    fn test_detect_hebrew() {
        let target = detect("בוא ניפגש מחר בבוקר");
        assert_eq!(target.code(), "he");
        assert_eq!(target.label(), "Hebrew");
        assert_eq!(target.script(), Some(Script::Hebrew));
        assert!(target.is_reliable());
        assert_close(target.confidence(), 0.98);
    }

    #[test]
    fn test_detect_arabic() {
        let target = detect("لنلتقي غدا في المكتب");
        assert_eq!(target.code(), "ar");
        assert!(target.is_reliable());
    }

    #[test]
    fn test_detect_cyrillic_maps_to_russian() {
        let target = detect("Давай встретимся завтра");
        assert_eq!(target.code(), "ru");
        assert_eq!(target.label(), "Russian");
        assert_eq!(target.script(), Some(Script::Cyrillic));
    }

    #[test]
    fn test_strong_script_confidence_scales_with_ratio() {
        // 4 Hebrew letters out of 8 total: ratio 0.5
        let target = detect("שלום Zoom");
        assert_eq!(target.code(), "he");
        assert_close(target.confidence(), 0.7 + 0.5 * 0.28);
    }

    #[test]
    fn test_single_foreign_letter_does_not_dominate() {
        // One Hebrew letter is below the absolute minimum
        let target = detect("ש ok");
        assert_ne!(target.code(), "he");
    }

    #[test]
    fn test_minority_script_below_ratio_does_not_dominate() {
        // 2 Cyrillic letters out of 30+ Latin letters
        let target = detect("Meeting tomorrow with the team at the office, ок");
        assert_eq!(target.code(), "en");
    }

    #[test]
    fn test_dominant_latin_over_hebrew_goes_to_disambiguation() {
        let target = detect("Meeting tomorrow with the team at שלום");
        assert_eq!(target.code(), "en");
        assert_eq!(target.script(), Some(Script::Latin));
    }

    #[test]
    fn test_hebrew_plurality_with_latin_brand_name() {
        // Hebrew 5, Latin 4: Hebrew is dominant with ratio 0.56
        let target = detect("פגישה Zoom");
        assert_eq!(target.code(), "he");
    }

    // ==================== Diacritic Signal Tests ====================

    #[test]
    fn test_diacritics_spanish() {
        let target = detect("¿Nos juntamos mañana?");
        assert_eq!(target.code(), "es");
        assert_close(target.confidence(), 0.9);
    }

    #[test]
    fn test_diacritics_german() {
        let target = detect("Grüße, schöne Straße");
        assert_eq!(target.code(), "de");
        assert_close(target.confidence(), 0.9);
    }

    #[test]
    fn test_diacritics_portuguese() {
        let target = detect("Não, são três");
        assert_eq!(target.code(), "pt");
    }

    #[test]
    fn test_diacritics_french() {
        let target = detect("Ça va très bien, à bientôt");
        assert_eq!(target.code(), "fr");
    }

    #[test]
    fn test_diacritics_are_case_insensitive() {
        let target = detect("GRÜSSE AUS MÜNCHEN UND KÖLN");
        assert_eq!(target.code(), "de");
    }

    #[test]
    fn test_single_diacritic_is_not_enough() {
        // "São" gives Portuguese one diacritic; English keywords decide
        let target = detect("Meeting with the team in São Paulo tomorrow");
        assert_eq!(target.code(), "en");
    }

    #[test]
    fn test_tied_diacritics_fall_through_to_keywords() {
        // One German and one Spanish diacritic each, German keywords decide
        let target = detect("Morgen und heute: über niño");
        assert_eq!(target.code(), "de");
        assert_close(target.confidence(), 0.95);
    }

    // ==================== Keyword Signal Tests ====================

    #[test]
    fn test_keywords_english() {
        let target = detect("Team meeting tomorrow");
        assert_eq!(target.code(), "en");
        // margin 3: 0.72 + 0.24 capped at 0.95
        assert_close(target.confidence(), 0.95);
    }

    #[test]
    fn test_keywords_confidence_from_margin() {
        // en scores 2 ("the", "team"), de scores 1 ("die")
        let target = detect("the team die");
        assert_eq!(target.code(), "en");
        assert_close(target.confidence(), 0.72 + 0.08);
    }

    #[test]
    fn test_keywords_italian() {
        let target = detect("Ci vediamo domani per la riunione");
        assert_eq!(target.code(), "it");
    }

    #[test]
    fn test_keywords_french_without_diacritics() {
        let target = detect("Rendez vous demain avec nous");
        assert_eq!(target.code(), "fr");
    }

    #[test]
    fn test_english_with_one_portuguese_word_stays_english() {
        let target = detect("Thanks for the meeting today, obrigado");
        assert_eq!(target.code(), "en");
    }

    #[test]
    fn test_keyword_tie_does_not_resolve() {
        // One English and one German hint, too few letters for the fallback
        let target = detect("the die");
        assert!(!target.is_reliable());
        assert_eq!(target.script(), Some(Script::Latin));
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_weak_english_fallback() {
        let target = detect("Quarterly roadmap sync");
        assert_eq!(target.code(), "en");
        assert!(target.is_reliable());
        assert_close(target.confidence(), 0.62);
    }

    #[test]
    fn test_unresolved_latin_single_token() {
        let target = detect("Roadmapping");
        assert!(!target.is_reliable());
        assert_eq!(target.code(), "");
        assert_eq!(target.label(), "Unknown");
        assert_eq!(target.script(), Some(Script::Latin));
        assert_close(target.confidence(), 0.45);
    }

    #[test]
    fn test_unresolved_latin_too_few_letters() {
        let target = detect("ok go");
        assert!(!target.is_reliable());
        assert_eq!(target.script(), Some(Script::Latin));
    }

    // ==================== Decisive Winner Tests ====================

    #[test]
    fn test_decisive_winner_requires_floor() {
        assert_eq!(decisive_winner(&[1, 0, 0]), None);
    }

    #[test]
    fn test_decisive_winner_requires_margin() {
        assert_eq!(decisive_winner(&[2, 2, 0]), None);
        assert_eq!(decisive_winner(&[0, 3, 3]), None);
    }

    #[test]
    fn test_decisive_winner_reports_margin() {
        assert_eq!(decisive_winner(&[1, 4, 2]), Some((1, 2)));
        assert_eq!(decisive_winner(&[0, 0, 2]), Some((2, 2)));
    }

    #[test]
    fn test_decisive_winner_empty() {
        assert_eq!(decisive_winner(&[]), None);
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_known() {
        let target = TargetLanguage::from_code("es", 0.9).unwrap();
        assert!(target.is_enforceable());
        assert_eq!(target.label(), "Spanish");
        assert_eq!(target.script(), Some(Script::Latin));
    }

    #[test]
    fn test_from_code_unknown() {
        assert!(TargetLanguage::from_code("xx", 0.9).is_none());
    }

    #[test]
    fn test_serialize_target() {
        let json = serde_json::to_value(detect("שלום לכולם")).unwrap();
        assert_eq!(json["code"], "he");
        assert_eq!(json["script"], "hebrew");
        assert_eq!(json["reliable"], true);
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_detect_is_deterministic(text in "\\PC{0,80}") {
            prop_assert_eq!(detect(&text), detect(&text));
        }

        #[test]
        fn prop_letterless_text_is_unknown(text in "[0-9 .,:;!?()+\\-/#@%]{0,60}") {
            let target = detect(&text);
            prop_assert!(!target.is_reliable());
            prop_assert_eq!(target.code(), "");
        }

        #[test]
        fn prop_reliable_implies_code(text in "\\PC{0,80}") {
            let target = detect(&text);
            prop_assert!((0.0..=1.0).contains(&target.confidence()));
            if target.is_reliable() {
                prop_assert!(!target.code().is_empty());
            } else {
                prop_assert_eq!(target.code(), "");
            }
        }

        #[test]
        fn prop_dominant_cyrillic_detects_russian(
            cyrillic in "[а-я]{4,20}",
            latin in "[a-z]{0,3}",
        ) {
            // Cyrillic always outnumbers the Latin letters
            let text = format!("{cyrillic} {latin}");
            let target = detect(&text);
            prop_assert_eq!(target.code(), "ru");
            prop_assert!(target.is_reliable());
        }

        #[test]
        fn prop_dominant_hebrew_detects_hebrew(
            hebrew in "[א-ת]{2,20}",
            digits in "[0-9]{0,10}",
        ) {
            let text = format!("{digits} {hebrew}");
            let target = detect(&text);
            prop_assert_eq!(target.code(), "he");
            prop_assert!(target.confidence() <= 0.98);
        }
    }
}
