//! Language registry: Single source of truth for all detectable languages.
//!
//! This module provides a centralized registry of every language the detector
//! can return, together with the lexical signals used to tell the Latin-script
//! languages apart. It uses a singleton pattern with `OnceLock` so the tables
//! are built once and shared read-only across threads.

use crate::language::Script;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Configuration for a detectable language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "he")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Hebrew")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "עברית")
    pub native_name: &'static str,

    /// Script bucket the language is written in
    pub script: Script,

    /// Lowercase trigger words that count as keyword evidence.
    /// Empty for the non-Latin languages, which are resolved by script alone.
    pub keyword_hints: HashSet<&'static str>,

    /// Lowercase characters that count as diacritic evidence
    pub diacritics: &'static [char],
}

impl LanguageConfig {
    /// Check whether a lowercase token is one of this language's hint words.
    pub fn is_hint(&self, token: &str) -> bool {
        self.keyword_hints.contains(token)
    }

    /// Check whether a lowercase character is one of this language's diacritics.
    pub fn is_diacritic(&self, c: char) -> bool {
        self.diacritics.contains(&c)
    }
}

/// Global language registry singleton.
///
/// Initialized once on first access and immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get the language a non-Latin script maps to.
    ///
    /// Each non-Latin script has exactly one representative language
    /// (Cyrillic maps to Russian). Returns `None` for Latin, which needs
    /// disambiguation.
    pub fn for_script(&self, script: Script) -> Option<&LanguageConfig> {
        if script == Script::Latin {
            return None;
        }
        self.languages.iter().find(|lang| lang.script == script)
    }

    /// Get all Latin-script languages, in registry order.
    pub fn latin_languages(&self) -> impl Iterator<Item = &LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| lang.script == Script::Latin)
    }

    /// Get all languages.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }
}

fn latin(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    hints: &[&'static str],
    diacritics: &'static [char],
) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
        script: Script::Latin,
        keyword_hints: hints.iter().copied().collect(),
        diacritics,
    }
}

fn scripted(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    script: Script,
) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
        script,
        keyword_hints: HashSet::new(),
        diacritics: &[],
    }
}

/// Default language configurations.
///
/// Hint lists are kept disjoint across languages so that a single token can
/// never score for two languages at once.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        scripted("he", "Hebrew", "עברית", Script::Hebrew),
        scripted("ar", "Arabic", "العربية", Script::Arabic),
        scripted("ru", "Russian", "Русский", Script::Cyrillic),
        latin(
            "en",
            "English",
            "English",
            &[
                "today", "tomorrow", "tonight", "yesterday", "morning", "afternoon", "evening",
                "week", "next", "meeting", "meet", "call", "team", "schedule", "review", "office",
                "lunch", "dinner", "please", "thanks", "thank", "you", "the", "and", "with", "at",
                "let", "lets", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
                "sunday",
            ],
            &[],
        ),
        latin(
            "es",
            "Spanish",
            "Español",
            &[
                "hoy", "mañana", "tarde", "noche", "semana", "próxima", "próximo", "reunión",
                "equipo", "llamada", "cita", "revisar", "revisamos", "lanzamiento", "gracias",
                "hola", "favor", "el", "los", "las", "del", "con", "nos", "vemos", "podemos",
                "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
            ],
            &['ñ', '¿', '¡', 'á', 'í', 'ó', 'ú'],
        ),
        latin(
            "fr",
            "French",
            "Français",
            &[
                "aujourd", "demain", "soir", "matin", "semaine", "prochaine", "prochain",
                "réunion", "rendez", "équipe", "salle", "merci", "bonjour", "vous", "nous",
                "avec", "pour", "le", "les", "des", "une", "dans", "lundi", "mardi", "mercredi",
                "jeudi", "vendredi", "samedi", "dimanche",
            ],
            &[
                'à', 'â', 'ç', 'è', 'ê', 'ë', 'î', 'ï', 'ô', 'û', 'ù', 'ÿ', 'œ', 'æ',
            ],
        ),
        latin(
            "pt",
            "Portuguese",
            "Português",
            &[
                "hoje", "amanhã", "manhã", "noite", "depois", "reunião", "equipe", "encontro",
                "ligação", "obrigado", "obrigada", "você", "vocês", "não", "uma", "isso", "então",
                "vamos", "segunda", "terça", "quarta", "quinta", "sexta", "feira",
            ],
            &['ã', 'õ'],
        ),
        latin(
            "de",
            "German",
            "Deutsch",
            &[
                "heute", "morgen", "abend", "woche", "nächste", "nächsten", "besprechung",
                "treffen", "termin", "danke", "bitte", "und", "mit", "der", "die", "das", "wir",
                "uns", "ist", "montag", "dienstag", "mittwoch", "donnerstag", "freitag",
                "samstag", "sonntag",
            ],
            &['ä', 'ö', 'ü', 'ß'],
        ),
        latin(
            "it",
            "Italian",
            "Italiano",
            &[
                "oggi", "domani", "sera", "mattina", "settimana", "prossima", "prossimo",
                "riunione", "incontro", "chiamata", "squadra", "grazie", "ciao", "per", "il",
                "gli", "della", "alle", "sono", "siamo", "vediamo", "lunedì", "martedì",
                "mercoledì", "giovedì", "venerdì", "sabato", "domenica",
            ],
            &['ì', 'ò'],
        ),
    ]
}
