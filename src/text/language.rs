use crate::models::Language;
use std::collections::HashSet;

const BENGALI_RANGES: &[(u32, u32)] = &[(0x0980, 0x09FF), (0x200C, 0x200D)];

fn is_bengali_char(c: char) -> bool {
    let code = c as u32;
    BENGALI_RANGES.iter().any(|(lo, hi)| code >= *lo && code <= *hi)
}

fn bengali_word_stoplist() -> &'static HashSet<&'static str> {
    static WORDS: once_lock::OnceLock<HashSet<&'static str>> = once_lock::OnceLock::new();
    WORDS.get_or_init(|| {
        [
            "এই", "সেই", "যে", "যা", "কি", "কে", "এবং", "অথবা", "না", "হয়", "করে", "বলে",
            "আজ", "কাল", "খবর", "সংবাদ", "দেশ", "সরকার", "মানুষ", "সময়",
        ]
        .into_iter()
        .collect()
    })
}

fn english_word_stoplist() -> &'static HashSet<&'static str> {
    static WORDS: once_lock::OnceLock<HashSet<&'static str>> = once_lock::OnceLock::new();
    WORDS.get_or_init(|| {
        [
            "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "to", "of", "in",
            "on", "at", "for", "with", "said", "news", "today", "government", "people",
        ]
        .into_iter()
        .collect()
    })
}

/// A small local replacement for `std::sync::OnceLock` under a crate-private name so the
/// lexicon modules read uniformly; this is just `std::sync::OnceLock` re-exported.
mod once_lock {
    pub use std::sync::OnceLock;
}

/// Bengali/English/mixed/unknown language classification, per §4.3.
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    fn char_scores(text: &str) -> (f64, f64) {
        let mut bengali_chars = 0usize;
        let mut ascii_letters = 0usize;
        let mut alphabetic = 0usize;

        for c in text.chars() {
            if is_bengali_char(c) {
                bengali_chars += 1;
                alphabetic += 1;
            } else if c.is_ascii_alphabetic() {
                ascii_letters += 1;
                alphabetic += 1;
            } else if c.is_alphabetic() {
                alphabetic += 1;
            }
        }

        if alphabetic == 0 {
            return (0.0, 0.0);
        }
        (
            bengali_chars as f64 / alphabetic as f64,
            ascii_letters as f64 / alphabetic as f64,
        )
    }

    fn word_scores(text: &str) -> (f64, f64) {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        if tokens.is_empty() {
            return (0.0, 0.0);
        }

        let bengali_hits = tokens
            .iter()
            .filter(|t| bengali_word_stoplist().contains(t.as_str()))
            .count();
        let english_hits = tokens
            .iter()
            .filter(|t| english_word_stoplist().contains(t.as_str()))
            .count();

        (
            bengali_hits as f64 / tokens.len() as f64,
            english_hits as f64 / tokens.len() as f64,
        )
    }

    /// Combined per-class score: `0.7 * char_signal + 0.3 * word_signal`.
    fn scores(text: &str) -> (f64, f64) {
        if text.trim().is_empty() {
            return (0.0, 0.0);
        }
        let (bengali_char, english_char) = Self::char_scores(text);
        let (bengali_word, english_word) = Self::word_scores(text);
        (
            0.7 * bengali_char + 0.3 * bengali_word,
            0.7 * english_char + 0.3 * english_word,
        )
    }

    /// Classify `text` as `english | bengali | mixed | unknown`.
    pub fn detect(&self, text: &str) -> Language {
        if text.trim().is_empty() {
            return Language::Unknown;
        }
        let (bengali_score, english_score) = Self::scores(text);

        if bengali_score > 0.6 {
            Language::Bengali
        } else if english_score > 0.6 {
            Language::English
        } else if bengali_score > english_score {
            Language::Bengali
        } else if english_score > bengali_score {
            Language::English
        } else {
            Language::Mixed
        }
    }

    /// `(language, confidence)` where `confidence = max(bengali_score, english_score)`.
    ///
    /// Uses the same classification rule as [`detect`] -- the distilled source had two
    /// different tie-break rules between its `detect_language` and `get_language_confidence`
    /// paths; this crate follows the single rule this spec states in §4.3 for both.
    pub fn confidence(&self, text: &str) -> (Language, f64) {
        let (bengali_score, english_score) = Self::scores(text);
        (self.detect(text), bengali_score.max(english_score))
    }

    /// True only when *both* character ratios individually exceed `threshold` -- a stricter,
    /// distinct check from the main classification rule, used by diagnostics.
    pub fn is_mixed(&self, text: &str, threshold: f64) -> bool {
        let (bengali_char, english_char) = Self::char_scores(text);
        bengali_char > threshold && english_char > threshold
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_unknown() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect(""), Language::Unknown);
    }

    #[test]
    fn pure_bengali_script_is_bengali() {
        let detector = LanguageDetector::new();
        let text = "আজ সরকার একটি নতুন ঘোষণা দিয়েছে এবং মানুষ খুশি হয়েছে।";
        assert_eq!(detector.detect(text), Language::Bengali);
    }

    #[test]
    fn pure_english_is_english() {
        let detector = LanguageDetector::new();
        let text = "The government announced a new policy today and people were pleased.";
        assert_eq!(detector.detect(text), Language::English);
    }

    #[test]
    fn confidence_matches_detect() {
        let detector = LanguageDetector::new();
        let text = "The government announced a new policy today.";
        let (lang, conf) = detector.confidence(text);
        assert_eq!(lang, detector.detect(text));
        assert!(conf > 0.0);
    }
}
