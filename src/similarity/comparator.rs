use super::matcher::SimilarityMatcher;
use crate::analysis::BiasAnalyzer;
use crate::models::Article;
use crate::store::ArticleStore;
use chrono::{DateTime, Duration, Utc};
use fnv::FnvHasher;
use std::collections::HashMap;
use std::hash::Hasher;

/// Report comparing a related set of Articles across sources, per §4.7.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub story_id: String,
    pub articles: Vec<Article>,
    pub bias_differences: HashMap<String, f64>,
    pub similarity_scores: HashMap<String, f64>,
    pub key_differences: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-source averages and ranges across all five bias components (§4.7).
#[derive(Debug, Clone, Default)]
pub struct SourcePattern {
    pub source: String,
    pub article_count: usize,
    pub avg_sentiment: f64,
    pub range_sentiment: f64,
    pub avg_political: f64,
    pub range_political: f64,
    pub avg_emotional: f64,
    pub range_emotional: f64,
    pub avg_factual: f64,
    pub range_factual: f64,
    pub avg_overall: f64,
    pub range_overall: f64,
}

/// Deterministic 4-digit suffix from FNV-1a over the concatenated titles -- never the runtime's
/// randomized default hasher (§4.7, §9).
fn story_suffix(titles: &str) -> u32 {
    let mut hasher = FnvHasher::default();
    hasher.write(titles.as_bytes());
    (hasher.finish() % 10000) as u32
}

fn story_id(articles: &[Article]) -> String {
    let earliest = articles
        .iter()
        .map(|a| a.publication_date)
        .min()
        .unwrap_or_else(Utc::now);
    let concatenated: String = articles.iter().map(|a| a.title.as_str()).collect::<Vec<_>>().join("");
    let suffix = story_suffix(&concatenated);
    format!("{}_{:04}", earliest.format("%Y%m%d"), suffix)
}

fn bias_diff_pct(b1: f64, b2: f64) -> f64 {
    let avg = (b1 + b2) / 2.0;
    if avg == 0.0 {
        0.0
    } else {
        (b1 - b2).abs() / avg * 100.0
    }
}

/// Windows and thresholds for the three comparator entry points, per §4.7.
pub struct ComparisonWindows {
    pub similar_window: Duration,
    pub similar_threshold: f64,
    pub comparison_window: Duration,
    pub comparison_threshold: f64,
    pub clustering_window: Duration,
    pub clustering_threshold: f64,
}

impl Default for ComparisonWindows {
    fn default() -> Self {
        Self {
            similar_window: Duration::hours(72),
            similar_threshold: 0.3,
            comparison_window: Duration::days(3),
            comparison_threshold: 0.4,
            clustering_window: Duration::days(7),
            clustering_threshold: 0.4,
        }
    }
}

/// Finds related articles across sources and produces cross-source bias/similarity reports.
/// Depends on a Store (to fetch candidates and backfill missing analysis) and a BiasAnalyzer
/// (to ensure every member of a compared set has bias_scores), per §4.7.
pub struct Comparator<'a> {
    store: &'a dyn ArticleStore,
    analyzer: &'a BiasAnalyzer,
    matcher: SimilarityMatcher,
    windows: ComparisonWindows,
}

impl<'a> Comparator<'a> {
    pub fn new(store: &'a dyn ArticleStore, analyzer: &'a BiasAnalyzer) -> Self {
        Self {
            store,
            analyzer,
            matcher: SimilarityMatcher::new(),
            windows: ComparisonWindows::default(),
        }
    }

    fn within_window(&self, target: &Article, candidate: &Article, window: Duration) -> bool {
        (candidate.publication_date - target.publication_date).abs() <= window
    }

    /// Time-window + similarity filter, ranked descending, for the "similar articles" use case.
    pub fn find_similar_articles<'c>(&self, target: &Article, candidates: &'c [Article]) -> Vec<&'c Article> {
        let filtered: Vec<Article> = candidates
            .iter()
            .filter(|c| self.within_window(target, c, self.windows.similar_window))
            .cloned()
            .collect();
        let owned_refs: Vec<&Article> = self
            .matcher
            .find_similar(target, &filtered, self.windows.similar_threshold)
            .into_iter()
            .collect();
        // Re-resolve against the original candidate slice so lifetimes tie to `candidates`.
        owned_refs
            .iter()
            .filter_map(|a| candidates.iter().find(|c| c.url == a.url))
            .collect()
    }

    /// Ensures every article in the set has `bias_scores`, analyzing on the fly and persisting
    /// via the Store when missing.
    fn ensure_analyzed(&self, articles: &mut [Article]) {
        for article in articles.iter_mut() {
            if article.bias_scores.is_none() {
                let scores = self.analyzer.analyze(article);
                article.bias_scores = Some(scores);
                if !article.id.is_empty() {
                    let _ = self.store.set_bias_scores(&article.id, scores);
                }
            }
        }
    }

    fn key_differences(&self, articles: &[Article]) -> Vec<String> {
        let mut diffs = Vec::new();
        let sentiments: Vec<f64> = articles.iter().filter_map(|a| a.bias_scores.map(|s| s.sentiment_score)).collect();
        let politicals: Vec<f64> = articles.iter().filter_map(|a| a.bias_scores.map(|s| s.political_bias_score)).collect();
        let factuals: Vec<f64> = articles.iter().filter_map(|a| a.bias_scores.map(|s| s.factual_vs_opinion_score)).collect();

        let spread = |values: &[f64]| -> f64 {
            if values.is_empty() {
                0.0
            } else {
                values.iter().cloned().fold(f64::MIN, f64::max) - values.iter().cloned().fold(f64::MAX, f64::min)
            }
        };

        if spread(&sentiments) > 0.3 {
            diffs.push("Significant sentiment divergence across sources".to_string());
        }
        if spread(&politicals) > 0.3 {
            diffs.push("Significant political bias divergence across sources".to_string());
        }
        if spread(&factuals) > 0.3 {
            diffs.push("Significant factual-vs-opinion divergence across sources".to_string());
        }

        let lengths: Vec<usize> = articles.iter().map(|a| a.content.chars().count()).collect();
        if let (Some(&max_len), Some(&min_len)) = (lengths.iter().max(), lengths.iter().min()) {
            if min_len > 0 && max_len > min_len * 2 {
                diffs.push("Large content-length disparity between longest and shortest article".to_string());
            }
        }

        diffs
    }

    /// Full comparison report for a related set (>= 2 articles): ensures analysis, computes
    /// bias differences, pairwise similarities, key differences, and story id.
    pub fn generate_comparison_report(&self, articles: &[Article]) -> ComparisonReport {
        let mut articles = articles.to_vec();
        self.ensure_analyzed(&mut articles);

        let mut bias_differences = HashMap::new();
        let mut similarity_scores = HashMap::new();

        for i in 0..articles.len() {
            for j in (i + 1)..articles.len() {
                let a = &articles[i];
                let b = &articles[j];
                if let (Some(sa), Some(sb)) = (a.bias_scores, b.bias_scores) {
                    let pct = bias_diff_pct(sa.overall_bias_score, sb.overall_bias_score);
                    bias_differences.insert(format!("{} vs {}", a.source, b.source), pct);
                }
                let sim = self.matcher.similarity(a, b);
                similarity_scores.insert(format!("{}_{}", a.source, b.source), sim);
            }
        }

        let key_differences = self.key_differences(&articles);
        let sid = story_id(&articles);

        ComparisonReport {
            story_id: sid,
            articles,
            bias_differences,
            similarity_scores,
            key_differences,
            created_at: Utc::now(),
        }
    }

    /// Per-source averages and ranges of each bias component.
    pub fn compare_source_patterns(&self, articles_by_source: &HashMap<String, Vec<Article>>) -> Vec<SourcePattern> {
        let mut patterns = Vec::new();

        for (source, articles) in articles_by_source {
            let scores: Vec<_> = articles.iter().filter_map(|a| a.bias_scores).collect();
            if scores.is_empty() {
                patterns.push(SourcePattern {
                    source: source.clone(),
                    article_count: articles.len(),
                    ..Default::default()
                });
                continue;
            }

            let avg = |f: fn(&crate::models::BiasScore) -> f64| -> f64 {
                scores.iter().map(f).sum::<f64>() / scores.len() as f64
            };
            let range = |f: fn(&crate::models::BiasScore) -> f64| -> f64 {
                let vals: Vec<f64> = scores.iter().map(f).collect();
                vals.iter().cloned().fold(f64::MIN, f64::max) - vals.iter().cloned().fold(f64::MAX, f64::min)
            };

            patterns.push(SourcePattern {
                source: source.clone(),
                article_count: articles.len(),
                avg_sentiment: avg(|s| s.sentiment_score),
                range_sentiment: range(|s| s.sentiment_score),
                avg_political: avg(|s| s.political_bias_score),
                range_political: range(|s| s.political_bias_score),
                avg_emotional: avg(|s| s.emotional_language_score),
                range_emotional: range(|s| s.emotional_language_score),
                avg_factual: avg(|s| s.factual_vs_opinion_score),
                range_factual: range(|s| s.factual_vs_opinion_score),
                avg_overall: avg(|s| s.overall_bias_score),
                range_overall: range(|s| s.overall_bias_score),
            });
        }

        patterns
    }

    /// Delegates to the similarity matcher's clustering, keeping only clusters of size >= 2.
    pub fn find_story_clusters<'c>(&self, articles: &'c [Article], threshold: f64) -> Vec<Vec<&'c Article>> {
        self.matcher
            .group_similar(articles, threshold)
            .into_iter()
            .filter(|c| c.len() >= 2)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use crate::store::InMemoryArticleStore;
    use regex::Regex;

    fn article(url: &str, title: &str, content: &str, source: &str, when: DateTime<Utc>) -> Article {
        Article::new(url, title, content, None, source, when, Language::English)
    }

    #[test]
    fn story_id_matches_expected_pattern() {
        let store = InMemoryArticleStore::new();
        let analyzer = BiasAnalyzer::new();
        let comparator = Comparator::new(&store, &analyzer);

        let now = Utc::now();
        let a = article("http://x/1", "Flood warning for coastal districts", "Heavy rain across the coast.", "Sa", now);
        let b = article("http://x/2", "Flood warning for coastal districts", "Heavy rain across the coast.", "Sb", now);
        let report = comparator.generate_comparison_report(&[a, b]);

        let re = Regex::new(r"^\d{8}_\d{4}$").unwrap();
        assert!(re.is_match(&report.story_id), "story_id was {}", report.story_id);
    }

    #[test]
    fn story_id_is_deterministic() {
        let store = InMemoryArticleStore::new();
        let analyzer = BiasAnalyzer::new();
        let comparator = Comparator::new(&store, &analyzer);

        let now = Utc::now();
        let a = article("http://x/1", "Same story title", "Body text.", "Sa", now);
        let b = article("http://x/2", "Same story title", "Body text.", "Sb", now);
        let first = comparator.generate_comparison_report(&[a.clone(), b.clone()]);
        let second = comparator.generate_comparison_report(&[a, b]);
        assert_eq!(first.story_id, second.story_id);
    }

    #[test]
    fn comparison_report_keys_use_documented_formats() {
        let store = InMemoryArticleStore::new();
        let analyzer = BiasAnalyzer::new();
        let comparator = Comparator::new(&store, &analyzer);

        let now = Utc::now();
        let a = article("http://x/1", "Flood warning coastal districts", "Rain across the coast today.", "Sa", now);
        let b = article("http://x/2", "Flood warning coastal districts", "Rain across the coast today.", "Sb", now);
        let c = article("http://x/3", "Flood warning coastal districts", "Rain across the coast today.", "Sc", now);
        let report = comparator.generate_comparison_report(&[a, b, c]);

        assert!(report.similarity_scores.contains_key("Sa_Sb"));
        assert!(report.bias_differences.contains_key("Sa vs Sb"));
        let mut keys: Vec<String> = report.bias_differences.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["Sa vs Sb", "Sa vs Sc", "Sb vs Sc"]);
    }

    #[test]
    fn story_clusters_filter_singletons() {
        let store = InMemoryArticleStore::new();
        let analyzer = BiasAnalyzer::new();
        let comparator = Comparator::new(&store, &analyzer);

        let now = Utc::now();
        let a = article("http://x/1", "Flood warning coastal districts", "Heavy rain across coastal districts.", "Sa", now);
        let b = article("http://x/2", "Flood warning coastal districts", "Heavy rain across coastal districts.", "Sb", now);
        let c = article("http://x/3", "Cricket finals end dramatically", "The cricket finals concluded dramatically.", "Sc", now);
        let clusters = comparator.find_story_clusters(&[a, b, c], 0.4);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 2);
    }
}
