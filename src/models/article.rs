use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Canonical language classification. Two-letter codes (`en`/`bn`) are never used anywhere in
/// this crate -- only these four variants, serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Bengali,
    Mixed,
    Unknown,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Language::English => "english",
            Language::Bengali => "bengali",
            Language::Mixed => "mixed",
            Language::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Five-dimension bias assessment of a single Article.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasScore {
    /// -1 (very negative) .. +1 (very positive)
    pub sentiment_score: f64,
    /// -1 (left-leaning) .. +1 (right-leaning); label meaning is lexicon-defined, not universal.
    pub political_bias_score: f64,
    /// 0 .. 1
    pub emotional_language_score: f64,
    /// 0 (pure opinion) .. 1 (pure factual)
    pub factual_vs_opinion_score: f64,
    /// 0 .. 1, weighted combination of the above four.
    pub overall_bias_score: f64,
    pub analyzed_at: DateTime<Utc>,
}

impl BiasScore {
    /// The neutral score returned whenever analysis cannot proceed (§4.5 error handling).
    pub fn neutral() -> Self {
        Self {
            sentiment_score: 0.0,
            political_bias_score: 0.0,
            emotional_language_score: 0.0,
            factual_vs_opinion_score: 0.5,
            overall_bias_score: 0.0,
            analyzed_at: Utc::now(),
        }
    }
}

/// A single extracted news item.
///
/// Immutable once stored except for `bias_scores` (written by the Analyzer) and `topics`
/// (written by the Topic Extractor). `content_hash` is computed once at construction and never
/// recomputed -- title/content are cleaned text fixed at scrape time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: String,
    pub url: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    pub source: String,
    pub publication_date: DateTime<Utc>,
    pub scraped_at: DateTime<Utc>,
    pub language: Language,
    pub content_hash: String,
    #[serde(default)]
    pub bias_scores: Option<BiasScore>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

impl Article {
    /// Construct a new, not-yet-stored Article. `id` is left empty -- the Store assigns it on
    /// first successful insert.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        author: Option<String>,
        source: impl Into<String>,
        publication_date: DateTime<Utc>,
        language: Language,
    ) -> Self {
        let title = title.into();
        let content = content.into();
        let source = source.into();
        let content_hash = compute_content_hash(&title, &content, &source);
        Self {
            id: String::new(),
            url: url.into(),
            title,
            content,
            author,
            source,
            publication_date,
            scraped_at: Utc::now(),
            language,
            content_hash,
            bias_scores: None,
            topics: None,
        }
    }
}

/// SHA-256 of `title || content || source`, hex-encoded.
pub fn compute_content_hash(title: &str, content: &str, source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(content.as_bytes());
    hasher.update(source.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_deterministic() {
        let a = compute_content_hash("T", "C", "S");
        let b = compute_content_hash("T", "C", "S");
        assert_eq!(a, b);
    }

    #[test]
    fn content_hash_changes_with_any_field() {
        let base = compute_content_hash("T", "C", "S");
        assert_ne!(base, compute_content_hash("T2", "C", "S"));
        assert_ne!(base, compute_content_hash("T", "C2", "S"));
        assert_ne!(base, compute_content_hash("T", "C", "S2"));
    }

    #[test]
    fn new_article_computes_hash_matching_invariant() {
        let article = Article::new(
            "http://x/1",
            "T",
            "C",
            None,
            "S",
            Utc::now(),
            Language::English,
        );
        assert_eq!(article.content_hash, compute_content_hash("T", "C", "S"));
    }

    #[test]
    fn language_serializes_lowercase() {
        let s = serde_json::to_string(&Language::Bengali).unwrap();
        assert_eq!(s, "\"bengali\"");
    }
}
