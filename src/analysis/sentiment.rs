use super::lexicons;
use crate::models::Language;

/// Lexicon-driven sentiment scoring with intensity modifiers and negation handling, per §4.5.
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// `(pos, neg)` polarity weights is preserved unclamped before dividing; clamping happens on
    /// the ratio, not the sums.
    fn polarity_weights(&self, text: &str, language: Language) -> (f64, f64) {
        let (positive, negative, intensity, negation) = match language {
            Language::Bengali => (
                lexicons::bengali_positive_words(),
                lexicons::bengali_negative_words(),
                lexicons::bengali_intensity_modifiers(),
                lexicons::bengali_negation_words(),
            ),
            _ => (
                lexicons::english_positive_words(),
                lexicons::english_negative_words(),
                lexicons::english_intensity_modifiers(),
                lexicons::english_negation_words(),
            ),
        };

        let tokens = Self::tokens(text);
        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut pos = 0.0;
        let mut neg = 0.0;

        for (i, token) in lower.iter().enumerate() {
            let is_positive = positive.contains(token.as_str());
            let is_negative = negative.contains(token.as_str());
            if !is_positive && !is_negative {
                continue;
            }

            let prev = if i > 0 { Some(lower[i - 1].as_str()) } else { None };
            let intensity_factor = prev.and_then(|p| intensity.get(p)).copied().unwrap_or(1.0);
            let negated = prev.map(|p| negation.contains(p)).unwrap_or(false);

            let weight = intensity_factor;
            let (mut add_pos, mut add_neg) = if is_positive { (weight, 0.0) } else { (0.0, weight) };
            if negated {
                std::mem::swap(&mut add_pos, &mut add_neg);
            }
            pos += add_pos;
            neg += add_neg;
        }

        (pos, neg)
    }

    /// `(pos - neg) / (pos + neg)`, clamped to `[-1, 1]`; 0 when no sentiment-bearing tokens.
    pub fn analyze(&self, text: &str, language: Language) -> f64 {
        let (pos, neg) = self.polarity_weights(text, language);
        if pos + neg == 0.0 {
            return 0.0;
        }
        ((pos - neg) / (pos + neg)).clamp(-1.0, 1.0)
    }

    /// Ratio of emotionally-charged (sentiment-lexicon-bearing) tokens to total tokens, times 5,
    /// capped at 1.0. This is the source of `emotional_language_score`.
    pub fn detect_emotional_intensity(&self, text: &str, language: Language) -> f64 {
        let (positive, negative) = match language {
            Language::Bengali => (lexicons::bengali_positive_words(), lexicons::bengali_negative_words()),
            _ => (lexicons::english_positive_words(), lexicons::english_negative_words()),
        };

        let tokens = Self::tokens(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let hits = tokens
            .iter()
            .filter(|t| {
                let lower = t.to_lowercase();
                positive.contains(lower.as_str()) || negative.contains(lower.as_str())
            })
            .count();

        ((hits as f64 / tokens.len() as f64) * 5.0).min(1.0)
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_english_text_scores_positive() {
        let analyzer = SentimentAnalyzer::new();
        let score = analyzer.analyze("This is excellent and wonderful news!", Language::English);
        assert!(score > 0.1, "expected > 0.1, got {score}");
    }

    #[test]
    fn negative_english_text_scores_negative() {
        let analyzer = SentimentAnalyzer::new();
        let score = analyzer.analyze("This is terrible and awful news!", Language::English);
        assert!(score < -0.1, "expected < -0.1, got {score}");
    }

    #[test]
    fn empty_text_is_neutral() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.analyze("", Language::English), 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        let analyzer = SentimentAnalyzer::new();
        let score = analyzer.analyze("not good", Language::English);
        assert!(score < 0.0);
    }

    #[test]
    fn intensity_modifier_amplifies() {
        let analyzer = SentimentAnalyzer::new();
        let (pos_plain, _) = analyzer.polarity_weights("good", Language::English);
        let (pos_intense, _) = analyzer.polarity_weights("very good", Language::English);
        assert!(pos_intense > pos_plain);
    }
}
