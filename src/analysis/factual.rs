use super::lexicons;
use crate::models::Language;

/// Factual-vs-opinion classification, per §4.5.
///
/// Matching is substring-based against the lowercased full text (not tokenized per indicator),
/// matching the reference implementation this was distilled from.
pub struct FactualOpinionClassifier;

impl FactualOpinionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// `factual / (factual + opinion)`; `0.5` when neither is present.
    pub fn analyze(&self, text: &str, language: Language) -> f64 {
        let lower = text.to_lowercase();

        let (factual_categories, opinion_categories, first_person) = match language {
            Language::Bengali => (
                lexicons::bengali_factual_indicators(),
                lexicons::bengali_opinion_indicators(),
                lexicons::bengali_first_person_pronouns(),
            ),
            _ => (
                lexicons::english_factual_indicators(),
                lexicons::english_opinion_indicators(),
                lexicons::english_first_person_pronouns(),
            ),
        };

        let mut factual = 0.0;
        for category in factual_categories {
            for word in category.words {
                if lower.contains(word) {
                    factual += category.weight;
                }
            }
        }

        let mut opinion = 0.0;
        for category in opinion_categories {
            for word in category.words {
                if lower.contains(word) {
                    opinion += category.weight;
                }
            }
        }

        for pattern in lexicons::numeric_pattern_regexes() {
            let hits = pattern.find_iter(&lower).count();
            factual += hits as f64 * 1.5;
        }

        let tokens: Vec<&str> = lower.split_whitespace().collect();
        if tokens.iter().any(|t| first_person.contains(*t)) {
            opinion += 1.0;
        }

        if factual + opinion == 0.0 {
            return 0.5;
        }
        factual / (factual + opinion)
    }
}

impl Default for FactualOpinionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporting_text_scores_above_half() {
        let classifier = FactualOpinionClassifier::new();
        let score = classifier.analyze(
            "According to the report, GDP grew by 3.2% last year.",
            Language::English,
        );
        assert!(score > 0.5, "expected > 0.5, got {score}");
    }

    #[test]
    fn opinion_text_scores_below_half() {
        let classifier = FactualOpinionClassifier::new();
        let score = classifier.analyze("I think this policy is completely wrong.", Language::English);
        assert!(score < 0.5, "expected < 0.5, got {score}");
    }

    #[test]
    fn empty_text_is_exactly_half() {
        let classifier = FactualOpinionClassifier::new();
        assert_eq!(classifier.analyze("", Language::English), 0.5);
    }
}
