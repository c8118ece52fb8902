use crate::models::Article;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= 3)
        .map(|t| t.to_string())
        .collect()
}

fn domain_common_tokens() -> &'static HashSet<&'static str> {
    static TOKENS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    TOKENS.get_or_init(|| {
        [
            "news", "report", "today", "says", "said", "will", "after", "over", "with",
            "খবর", "সংবাদ", "আজ", "বলেন", "প্রতিবেদন",
        ]
        .into_iter()
        .collect()
    })
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    if union == 0.0 {
        0.0
    } else {
        intersection / union
    }
}

fn term_frequencies(tokens: &[String]) -> HashMap<String, f64> {
    let mut counts: HashMap<String, f64> = HashMap::new();
    for t in tokens {
        *counts.entry(t.clone()).or_insert(0.0) += 1.0;
    }
    counts
}

fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let mut dot = 0.0;
    for (term, weight) in a {
        if let Some(other) = b.get(term) {
            dot += weight * other;
        }
    }
    let norm_a: f64 = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn tfidf_vectors(a: &[String], b: &[String]) -> (HashMap<String, f64>, HashMap<String, f64>) {
    let tf_a = term_frequencies(a);
    let tf_b = term_frequencies(b);

    let mut vocab: HashSet<&String> = HashSet::new();
    vocab.extend(tf_a.keys());
    vocab.extend(tf_b.keys());

    let mut vec_a = HashMap::new();
    let mut vec_b = HashMap::new();
    for term in vocab {
        let df = (tf_a.contains_key(term) as usize) + (tf_b.contains_key(term) as usize);
        let idf = (2.0_f64 / df as f64).ln();
        if let Some(tf) = tf_a.get(term) {
            vec_a.insert(term.clone(), tf * idf);
        }
        if let Some(tf) = tf_b.get(term) {
            vec_b.insert(term.clone(), tf * idf);
        }
    }
    (vec_a, vec_b)
}

/// Pairwise and set-level article similarity, per §4.6. Pure and deterministic.
pub struct SimilarityMatcher;

impl SimilarityMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Weighted combination of title Jaccard, content cosine, and pair-local TF-IDF cosine.
    pub fn similarity(&self, a: &Article, b: &Article) -> f64 {
        let title_tokens_a: HashSet<String> = tokenize(&a.title).into_iter().collect();
        let title_tokens_b: HashSet<String> = tokenize(&b.title).into_iter().collect();
        let title_similarity = jaccard(&title_tokens_a, &title_tokens_b);

        let content_tokens_a = tokenize(&a.content);
        let content_tokens_b = tokenize(&b.content);
        let tf_a = term_frequencies(&content_tokens_a);
        let tf_b = term_frequencies(&content_tokens_b);
        let content_similarity = cosine(&tf_a, &tf_b);

        let (vec_a, vec_b) = tfidf_vectors(&content_tokens_a, &content_tokens_b);
        let tfidf_similarity = cosine(&vec_a, &vec_b);

        (0.4 * title_similarity + 0.4 * content_similarity + 0.2 * tfidf_similarity).clamp(0.0, 1.0)
    }

    /// Jaccard over "key entities": tokens of length >= 4 excluding a small bilingual
    /// domain-common set.
    pub fn topic_similarity(&self, a: &Article, b: &Article) -> f64 {
        let common = domain_common_tokens();
        let entities = |text: &str| -> HashSet<String> {
            tokenize(text)
                .into_iter()
                .filter(|t| t.chars().count() >= 4 && !common.contains(t.as_str()))
                .collect()
        };
        let combined_a = format!("{} {}", a.title, a.content);
        let combined_b = format!("{} {}", b.title, b.content);
        jaccard(&entities(&combined_a), &entities(&combined_b))
    }

    /// Candidates (excluding identical URL) with sim >= threshold, sorted descending.
    pub fn find_similar<'a>(
        &self,
        target: &Article,
        candidates: &'a [Article],
        threshold: f64,
    ) -> Vec<&'a Article> {
        let mut scored: Vec<(&Article, f64)> = candidates
            .iter()
            .filter(|c| c.url != target.url)
            .map(|c| (c, self.similarity(target, c)))
            .filter(|(_, sim)| *sim >= threshold)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(a, _)| a).collect()
    }

    /// Single-link clustering: each unclaimed article opens a cluster and sweeps the remaining
    /// unclaimed articles once, comparing only against the opener. Sorted by size descending.
    pub fn group_similar<'a>(&self, articles: &'a [Article], threshold: f64) -> Vec<Vec<&'a Article>> {
        let mut claimed = vec![false; articles.len()];
        let mut clusters: Vec<Vec<&Article>> = Vec::new();

        for i in 0..articles.len() {
            if claimed[i] {
                continue;
            }
            claimed[i] = true;
            let opener = &articles[i];
            let mut cluster = vec![opener];

            for j in (i + 1)..articles.len() {
                if claimed[j] {
                    continue;
                }
                if self.similarity(opener, &articles[j]) > threshold {
                    claimed[j] = true;
                    cluster.push(&articles[j]);
                }
            }
            clusters.push(cluster);
        }

        clusters.sort_by(|a, b| b.len().cmp(&a.len()));
        clusters
    }
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use chrono::Utc;

    fn article(url: &str, title: &str, content: &str) -> Article {
        Article::new(url, title, content, None, "source", Utc::now(), Language::English)
    }

    #[test]
    fn identical_articles_are_maximally_similar() {
        let matcher = SimilarityMatcher::new();
        let a = article("http://x/1", "Test Article About Politics", "Some detailed content about the election.");
        let b = article("http://x/2", "Test Article About Politics", "Some detailed content about the election.");
        let sim = matcher.similarity(&a, &b);
        assert!(sim > 0.9, "expected near-identical similarity, got {sim}");
    }

    #[test]
    fn similarity_threshold_scenario() {
        let matcher = SimilarityMatcher::new();
        let a = article("http://x/1", "Test Article 1 About Politics", "Political news coverage of the recent election debate.");
        let b = article("http://x/2", "Test Article 2 About Politics", "Political news coverage of the recent election debate.");
        let sim = matcher.similarity(&a, &b);
        assert!(sim >= 0.3 && sim <= 1.0, "sim was {sim}");

        let similar = matcher.find_similar(&a, std::slice::from_ref(&b), 0.2);
        assert_eq!(similar.len(), 1);

        let not_similar = matcher.find_similar(&a, std::slice::from_ref(&b), 0.95);
        assert!(not_similar.is_empty());
    }

    #[test]
    fn group_similar_clusters_by_opener() {
        let matcher = SimilarityMatcher::new();
        let a = article("http://x/1", "Flood warning issued for coastal districts", "Heavy rain is expected across coastal districts this week.");
        let b = article("http://x/2", "Flood warning issued for coastal districts", "Heavy rain is expected across coastal districts this week.");
        let c = article("http://x/3", "Unrelated story about cricket finals", "The cricket finals concluded with a dramatic last over.");
        let articles = vec![a, b, c];
        let clusters = matcher.group_similar(&articles, 0.4);
        assert_eq!(clusters[0].len(), 2);
        assert_eq!(clusters.last().unwrap().len(), 1);
    }

    #[test]
    fn unrelated_articles_have_low_similarity() {
        let matcher = SimilarityMatcher::new();
        let a = article("http://x/1", "Cricket team wins championship", "The local cricket team celebrated a historic championship win.");
        let b = article("http://x/2", "New hospital opens downtown", "A new hospital facility opened its doors to patients downtown.");
        let sim = matcher.similarity(&a, &b);
        assert!(sim < 0.3, "expected low similarity, got {sim}");
    }
}
