use super::factual::FactualOpinionClassifier;
use super::political::{PoliticalBiasDetector, PoliticalLean};
use super::sentiment::SentimentAnalyzer;
use crate::models::{Article, BiasScore, Language};
use crate::text::LanguageDetector;
use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

fn classify_bias_level(overall: f64) -> BiasLevel {
    if overall < 0.2 {
        BiasLevel::Low
    } else if overall < 0.4 {
        BiasLevel::Moderate
    } else if overall < 0.6 {
        BiasLevel::High
    } else {
        BiasLevel::VeryHigh
    }
}

/// Read-only diagnostic bundle on top of a `BiasScore` -- never written to `Article.bias_scores`
/// (§4.5b).
#[derive(Debug, Clone)]
pub struct DetailedBiasAnalysis {
    pub scores: BiasScore,
    pub loaded_language_score: f64,
    pub political_lean: PoliticalLean,
    pub bias_level: BiasLevel,
}

/// Orchestrates the four sub-analyzers and combines their outputs into a `BiasScore`, per §4.5.
pub struct BiasAnalyzer {
    language_detector: LanguageDetector,
    sentiment: SentimentAnalyzer,
    political: PoliticalBiasDetector,
    factual: FactualOpinionClassifier,
}

impl BiasAnalyzer {
    pub fn new() -> Self {
        Self {
            language_detector: LanguageDetector::new(),
            sentiment: SentimentAnalyzer::new(),
            political: PoliticalBiasDetector::new(),
            factual: FactualOpinionClassifier::new(),
        }
    }

    fn overall(sentiment: f64, political: f64, emotional: f64, factual: f64) -> f64 {
        let sentiment_bias = sentiment.abs();
        let political_bias = political.abs();
        let emotional_bias = emotional;
        let opinion_bias = 1.0 - factual;
        (0.20 * sentiment_bias + 0.30 * political_bias + 0.25 * emotional_bias + 0.25 * opinion_bias)
            .clamp(0.0, 1.0)
    }

    /// Compute the five-dimension score for raw text under an explicit language, with no
    /// confidence gating. Used both internally and by `analyze_text_sample`.
    fn score_text(&self, text: &str, language: Language) -> BiasScore {
        let sentiment_score = self.sentiment.analyze(text, language);
        let political_bias_score = self.political.analyze(text, language);
        let emotional_language_score = self.sentiment.detect_emotional_intensity(text, language);
        let factual_vs_opinion_score = self.factual.analyze(text, language);
        let overall_bias_score = Self::overall(
            sentiment_score,
            political_bias_score,
            emotional_language_score,
            factual_vs_opinion_score,
        );

        BiasScore {
            sentiment_score,
            political_bias_score,
            emotional_language_score,
            factual_vs_opinion_score,
            overall_bias_score,
            analyzed_at: Utc::now(),
        }
    }

    /// Analyze an Article's title+content. Detects the text's language; uses the detected label
    /// when confidence > 0.6, otherwise falls back to the Article's declared language (§4.5).
    /// Any internal failure yields [`BiasScore::neutral`] -- analysis must never block ingestion.
    pub fn analyze(&self, article: &Article) -> BiasScore {
        let combined = format!("{} {}", article.title, article.content);
        let (detected, confidence) = self.language_detector.confidence(&combined);
        let analysis_language = if confidence > 0.6 { detected } else { article.language };

        self.score_text(&combined, analysis_language)
    }

    /// Analyze an ad-hoc text sample (not yet wrapped in an Article), e.g. the
    /// `/bias/analyze-text` operation. Unlike [`analyze`], always uses the raw detected language
    /// directly -- no confidence gate (§4.5b).
    pub fn analyze_text_sample(&self, text: &str, language_hint: Option<Language>) -> BiasScore {
        let language = match language_hint {
            Some(l) => l,
            None => self.language_detector.detect(text),
        };
        self.score_text(text, language)
    }

    /// Diagnostic view layered on top of [`analyze`]; never mutates what would be persisted.
    pub fn get_detailed_analysis(&self, article: &Article) -> DetailedBiasAnalysis {
        let combined = format!("{} {}", article.title, article.content);
        let (detected, confidence) = self.language_detector.confidence(&combined);
        let analysis_language = if confidence > 0.6 { detected } else { article.language };

        let scores = self.score_text(&combined, analysis_language);
        let loaded_language_score = self.political.detect_loaded_language(&combined, analysis_language);
        let political_lean = self.political.get_political_bias_breakdown(&combined, analysis_language);
        let bias_level = classify_bias_level(scores.overall_bias_score);

        DetailedBiasAnalysis {
            scores,
            loaded_language_score,
            political_lean,
            bias_level,
        }
    }
}

impl Default for BiasAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_article(title: &str, content: &str, language: Language) -> Article {
        Article::new(
            "http://example.com/a",
            title,
            content,
            None,
            "example_source",
            Utc::now(),
            language,
        )
    }

    #[test]
    fn empty_text_yields_documented_defaults() {
        let analyzer = BiasAnalyzer::new();
        let article = make_article("", "", Language::English);
        let scores = analyzer.analyze(&article);
        assert_eq!(scores.sentiment_score, 0.0);
        assert_eq!(scores.political_bias_score, 0.0);
        assert_eq!(scores.emotional_language_score, 0.0);
        assert_eq!(scores.factual_vs_opinion_score, 0.5);
        assert_eq!(scores.overall_bias_score, 0.0);
    }

    #[test]
    fn overall_bias_score_in_range() {
        let analyzer = BiasAnalyzer::new();
        let article = make_article(
            "Outrageous scandal rocks government",
            "I believe this is a devastating and shameful failure of the ruling administration.",
            Language::English,
        );
        let scores = analyzer.analyze(&article);
        assert!(scores.overall_bias_score >= 0.0 && scores.overall_bias_score <= 1.0);
    }

    #[test]
    fn analysis_is_deterministic() {
        let analyzer = BiasAnalyzer::new();
        let article = make_article(
            "Government announces new policy",
            "Officials said the policy will take effect next month.",
            Language::English,
        );
        let first = analyzer.analyze(&article);
        let second = analyzer.analyze(&article);
        assert_eq!(first.sentiment_score, second.sentiment_score);
        assert_eq!(first.political_bias_score, second.political_bias_score);
        assert_eq!(first.factual_vs_opinion_score, second.factual_vs_opinion_score);
        assert_eq!(first.overall_bias_score, second.overall_bias_score);
    }

    #[test]
    fn detailed_analysis_never_mutates_article() {
        let analyzer = BiasAnalyzer::new();
        let article = make_article("Test", "Some content here.", Language::English);
        let detail = analyzer.get_detailed_analysis(&article);
        assert!(article.bias_scores.is_none());
        assert!(matches!(detail.bias_level, BiasLevel::Low | BiasLevel::Moderate | BiasLevel::High | BiasLevel::VeryHigh));
    }
}
