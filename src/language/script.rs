//! Script classification: per-script letter counts for a piece of text.
//!
//! Only letters are counted. Digits, punctuation, whitespace and emoji are
//! ignored entirely, so they never dilute a script ratio.

use serde::Serialize;
use std::fmt;

/// A Unicode writing-system bucket used for coarse classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hebrew,
    Arabic,
    Cyrillic,
    Latin,
}

impl Script {
    /// Scripts in tie-breaking priority order.
    pub const PRIORITY: [Script; 4] = [
        Script::Hebrew,
        Script::Arabic,
        Script::Cyrillic,
        Script::Latin,
    ];

    /// Lowercase name of the script (e.g., "hebrew").
    pub fn name(&self) -> &'static str {
        match self {
            Script::Hebrew => "hebrew",
            Script::Arabic => "arabic",
            Script::Cyrillic => "cyrillic",
            Script::Latin => "latin",
        }
    }

    /// Bucket a single letter, or `None` for letters of any other script.
    fn of(c: char) -> Option<Script> {
        match c as u32 {
            0x0590..=0x05FF | 0xFB1D..=0xFB4F => Some(Script::Hebrew),
            0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF | 0xFB50..=0xFDFF
            | 0xFE70..=0xFEFF => Some(Script::Arabic),
            0x0400..=0x052F | 0x1C80..=0x1C8F | 0x2DE0..=0x2DFF | 0xA640..=0xA69F => {
                Some(Script::Cyrillic)
            }
            0x0041..=0x005A
            | 0x0061..=0x007A
            | 0x00AA
            | 0x00BA
            | 0x00C0..=0x024F
            | 0x1E00..=0x1EFF
            | 0x2C60..=0x2C7F
            | 0xA720..=0xA7FF
            | 0xFB00..=0xFB06 => Some(Script::Latin),
            _ => None,
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Letter counts per script bucket.
///
/// `total_letters` also includes letters from scripts outside the four
/// buckets (CJK, Greek, ...), which therefore count against every ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptCounts {
    pub hebrew: usize,
    pub arabic: usize,
    pub cyrillic: usize,
    pub latin: usize,
    pub total_letters: usize,
}

impl ScriptCounts {
    /// Count letters per script in `text`.
    pub fn classify(text: &str) -> Self {
        let mut counts = ScriptCounts::default();

        for c in text.chars().filter(|c| c.is_alphabetic()) {
            counts.total_letters += 1;
            match Script::of(c) {
                Some(Script::Hebrew) => counts.hebrew += 1,
                Some(Script::Arabic) => counts.arabic += 1,
                Some(Script::Cyrillic) => counts.cyrillic += 1,
                Some(Script::Latin) => counts.latin += 1,
                None => {}
            }
        }

        counts
    }

    /// Letter count for a single script.
    pub fn get(&self, script: Script) -> usize {
        match script {
            Script::Hebrew => self.hebrew,
            Script::Arabic => self.arabic,
            Script::Cyrillic => self.cyrillic,
            Script::Latin => self.latin,
        }
    }

    /// The script with the highest count, first in priority order on a tie.
    ///
    /// Returns `None` when the text has no letters in any bucket.
    pub fn dominant(&self) -> Option<(Script, usize)> {
        let mut best: Option<(Script, usize)> = None;
        for script in Script::PRIORITY {
            let count = self.get(script);
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((script, count));
            }
        }
        best
    }
}

/// Split text into runs of letters. Everything else is a separator.
pub fn letter_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|token| !token.is_empty())
}
