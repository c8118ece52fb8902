use super::lexicons;
use crate::models::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoliticalLean {
    RightLeaning,
    LeftLeaning,
    Balanced,
}

/// Lexicon-driven political-bias scoring, per §4.5.
///
/// "Left"/"right" are the labels the lexicon tables use; this analyzer treats them abstractly
/// and does not ascribe universal political meaning to either label.
pub struct PoliticalBiasDetector;

impl PoliticalBiasDetector {
    pub fn new() -> Self {
        Self
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// `right_ratio - left_ratio`, clamped to `[-1, 1]`.
    ///
    /// Keyword occurrences weight 1.0; loaded phrases weight 2.0. "Positive-bias" phrasing
    /// (e.g. "remarkable success") counts toward the left-leaning total and "negative-bias"
    /// phrasing (e.g. "complete failure") toward the right-leaning total.
    pub fn analyze(&self, text: &str, language: Language) -> f64 {
        let (left_words, right_words, neutral_words, pos_phrases, neg_phrases) = match language {
            Language::Bengali => (
                lexicons::bengali_left_leaning(),
                lexicons::bengali_right_leaning(),
                lexicons::bengali_neutral_political(),
                lexicons::bengali_positive_bias_phrases(),
                lexicons::bengali_negative_bias_phrases(),
            ),
            _ => (
                lexicons::english_left_leaning(),
                lexicons::english_right_leaning(),
                lexicons::english_neutral_political(),
                lexicons::english_positive_bias_phrases(),
                lexicons::english_negative_bias_phrases(),
            ),
        };

        let lower = text.to_lowercase();
        let tokens = Self::tokens(text);

        let left_count = tokens.iter().filter(|t| left_words.contains(t.as_str())).count() as f64;
        let right_count = tokens.iter().filter(|t| right_words.contains(t.as_str())).count() as f64;
        let neutral_count = tokens.iter().filter(|t| neutral_words.contains(t.as_str())).count() as f64;

        let pos_phrase_hits = pos_phrases.iter().filter(|p| lower.contains(**p)).count() as f64;
        let neg_phrase_hits = neg_phrases.iter().filter(|p| lower.contains(**p)).count() as f64;

        let left_total = left_count + pos_phrase_hits * 2.0;
        let right_total = right_count + neg_phrase_hits * 2.0;
        let total = left_total + right_total + neutral_count * 0.5;

        if total == 0.0 {
            return 0.0;
        }

        let left_ratio = left_total / total;
        let right_ratio = right_total / total;
        (right_ratio - left_ratio).clamp(-1.0, 1.0)
    }

    pub fn get_political_bias_breakdown(&self, text: &str, language: Language) -> PoliticalLean {
        let score = self.analyze(text, language);
        if score > 0.2 {
            PoliticalLean::RightLeaning
        } else if score < -0.2 {
            PoliticalLean::LeftLeaning
        } else {
            PoliticalLean::Balanced
        }
    }

    /// `(2*high_emotion_hits + medium_emotion_hits) / total_tokens`, times 10, clamped to
    /// `[0, 1]`. A diagnostic-only metric, distinct from and not used for
    /// `emotional_language_score` (see §4.5b).
    pub fn detect_loaded_language(&self, text: &str, language: Language) -> f64 {
        let (high, medium) = match language {
            Language::Bengali => (
                lexicons::bengali_high_emotion_terms(),
                lexicons::bengali_medium_emotion_terms(),
            ),
            _ => (
                lexicons::english_high_emotion_terms(),
                lexicons::english_medium_emotion_terms(),
            ),
        };

        let tokens = Self::tokens(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let high_hits = tokens.iter().filter(|t| high.contains(t.as_str())).count() as f64;
        let medium_hits = tokens.iter().filter(|t| medium.contains(t.as_str())).count() as f64;

        (((2.0 * high_hits + medium_hits) / tokens.len() as f64) * 10.0).clamp(0.0, 1.0)
    }
}

impl Default for PoliticalBiasDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_scores_zero() {
        let detector = PoliticalBiasDetector::new();
        assert_eq!(detector.analyze("The weather today is sunny.", Language::English), 0.0);
    }

    #[test]
    fn right_leaning_keywords_score_positive() {
        let detector = PoliticalBiasDetector::new();
        let score = detector.analyze("The opposition activist led a rally and protest.", Language::English);
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn left_leaning_keywords_score_negative() {
        let detector = PoliticalBiasDetector::new();
        let score = detector.analyze("The ruling administration and cabinet met today.", Language::English);
        assert!(score < 0.0, "expected negative score, got {score}");
    }

    #[test]
    fn breakdown_thresholds() {
        let detector = PoliticalBiasDetector::new();
        assert_eq!(detector.get_political_bias_breakdown("sunny weather", Language::English), PoliticalLean::Balanced);
    }
}
