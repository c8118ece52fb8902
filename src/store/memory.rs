use super::{ArticleStore, BatchPutResult, StoreStats};
use crate::error::{PipelineError, Result};
use crate::models::{Article, BiasScore};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

struct Indices {
    by_id: HashMap<String, Article>,
    id_by_url: HashMap<String, String>,
    id_by_hash: HashMap<String, String>,
}

impl Indices {
    fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            id_by_url: HashMap::new(),
            id_by_hash: HashMap::new(),
        }
    }
}

/// Reference `ArticleStore` implementation: an in-process store guarded by a single `RwLock`
/// over indexed maps, sufficient to satisfy the full contract in §4.2 without committing to any
/// external datastore.
pub struct InMemoryArticleStore {
    indices: RwLock<Indices>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self {
            indices: RwLock::new(Indices::new()),
        }
    }
}

impl Default for InMemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleStore for InMemoryArticleStore {
    fn put(&self, mut article: Article) -> Result<String> {
        let mut guard = self
            .indices
            .write()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;

        if let Some(existing_id) = guard.id_by_url.get(&article.url).cloned() {
            return Ok(existing_id);
        }
        if let Some(existing_id) = guard.id_by_hash.get(&article.content_hash).cloned() {
            return Ok(existing_id);
        }

        let id = uuid::Uuid::new_v4().to_string();
        article.id = id.clone();
        guard.id_by_url.insert(article.url.clone(), id.clone());
        guard.id_by_hash.insert(article.content_hash.clone(), id.clone());
        guard.by_id.insert(id.clone(), article);
        Ok(id)
    }

    fn put_batch(&self, articles: Vec<Article>) -> Result<BatchPutResult> {
        let mut result = BatchPutResult::default();
        for article in articles {
            let url = article.url.clone();
            let was_new = {
                let guard = self
                    .indices
                    .read()
                    .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
                !guard.id_by_url.contains_key(&url) && !guard.id_by_hash.contains_key(&article.content_hash)
            };

            match self.put(article) {
                Ok(id) => {
                    if was_new {
                        result.stored += 1;
                        result.stored_ids.push(id);
                    } else {
                        result.duplicates += 1;
                        result.duplicate_ids.push(id);
                    }
                }
                Err(_) => result.errors += 1,
            }
        }
        Ok(result)
    }

    fn get(&self, id: &str) -> Result<Option<Article>> {
        let guard = self
            .indices
            .read()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        Ok(guard.by_id.get(id).cloned())
    }

    fn list_by_source(&self, source: &str, limit: usize, skip: usize) -> Result<Vec<Article>> {
        let guard = self
            .indices
            .read()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        let mut matches: Vec<Article> = guard
            .by_id
            .values()
            .filter(|a| a.source == source)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
        Ok(matches.into_iter().skip(skip).take(limit).collect())
    }

    fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Article>> {
        let guard = self
            .indices
            .read()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        let mut matches: Vec<Article> = guard
            .by_id
            .values()
            .filter(|a| a.publication_date >= start && a.publication_date <= end)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
        matches.truncate(limit);
        Ok(matches)
    }

    fn list_by_topic(&self, topic: &str, limit: usize, skip: usize) -> Result<Vec<Article>> {
        let guard = self
            .indices
            .read()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        let mut matches: Vec<Article> = guard
            .by_id
            .values()
            .filter(|a| a.topics.as_ref().map(|t| t.iter().any(|x| x == topic)).unwrap_or(false))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
        Ok(matches.into_iter().skip(skip).take(limit).collect())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>> {
        let needle = query.to_lowercase();
        let guard = self
            .indices
            .read()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        let matches: Vec<Article> = guard
            .by_id
            .values()
            .filter(|a| a.title.to_lowercase().contains(&needle) || a.content.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect();
        Ok(matches)
    }

    fn set_bias_scores(&self, id: &str, scores: BiasScore) -> Result<()> {
        let mut guard = self
            .indices
            .write()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        match guard.by_id.get_mut(id) {
            Some(article) => {
                article.bias_scores = Some(scores);
                Ok(())
            }
            None => Err(PipelineError::Store(format!("no article with id {id}"))),
        }
    }

    fn set_topics(&self, id: &str, topics: Vec<String>) -> Result<()> {
        let mut guard = self
            .indices
            .write()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        match guard.by_id.get_mut(id) {
            Some(article) => {
                article.topics = Some(topics);
                Ok(())
            }
            None => Err(PipelineError::Store(format!("no article with id {id}"))),
        }
    }

    fn list_without_bias_scores(&self, limit: usize) -> Result<Vec<Article>> {
        let guard = self
            .indices
            .read()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        let mut matches: Vec<Article> = guard
            .by_id
            .values()
            .filter(|a| a.bias_scores.is_none())
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.scraped_at.cmp(&b.scraped_at));
        matches.truncate(limit);
        Ok(matches)
    }

    fn stats(&self) -> Result<StoreStats> {
        let guard = self
            .indices
            .read()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;
        let now = Utc::now();
        let week_ago = now - Duration::days(7);

        let mut stats = StoreStats {
            total: guard.by_id.len(),
            ..Default::default()
        };
        for article in guard.by_id.values() {
            if article.bias_scores.is_some() {
                stats.analyzed += 1;
            } else {
                stats.unanalyzed += 1;
            }
            if article.scraped_at >= week_ago {
                stats.recent_7d += 1;
            }
            *stats.language_distribution.entry(article.language).or_insert(0) += 1;
            *stats.source_distribution.entry(article.source.clone()).or_insert(0) += 1;
        }
        Ok(stats)
    }

    fn purge_older_than(&self, days: i64) -> Result<usize> {
        let cutoff = Utc::now() - Duration::days(days);
        let mut guard = self
            .indices
            .write()
            .map_err(|_| PipelineError::Store("article store lock poisoned".into()))?;

        let stale_ids: Vec<String> = guard
            .by_id
            .values()
            .filter(|a| a.scraped_at < cutoff)
            .map(|a| a.id.clone())
            .collect();

        for id in &stale_ids {
            if let Some(article) = guard.by_id.remove(id) {
                guard.id_by_url.remove(&article.url);
                guard.id_by_hash.remove(&article.content_hash);
            }
        }
        Ok(stale_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    fn article(url: &str, title: &str, content: &str, source: &str) -> Article {
        Article::new(url, title, content, None, source, Utc::now(), Language::English)
    }

    #[test]
    fn dedup_via_url() {
        let store = InMemoryArticleStore::new();
        let a = article("http://x/1", "T", "C", "S");
        let id1 = store.put(a.clone()).unwrap();
        let id2 = store.put(a).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.stats().unwrap().total, 1);
    }

    #[test]
    fn dedup_via_content_hash() {
        let store = InMemoryArticleStore::new();
        let a1 = article("http://x/1", "T", "C", "S");
        let a2 = article("http://x/2", "T", "C", "S");
        let id1 = store.put(a1).unwrap();
        let id2 = store.put(a2).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.stats().unwrap().total, 1);
    }

    #[test]
    fn put_batch_preserves_outcomes() {
        let store = InMemoryArticleStore::new();
        let a = article("http://x/1", "T", "C", "S");
        let result = store.put_batch(vec![a.clone(), a.clone(), a]).unwrap();
        assert_eq!(result.stored, 1);
        assert_eq!(result.duplicates, 2);
        assert_eq!(result.stored + result.duplicates, 3);
    }

    #[test]
    fn get_roundtrips_stored_article() {
        let store = InMemoryArticleStore::new();
        let a = article("http://x/1", "T", "C", "S");
        let id = store.put(a.clone()).unwrap();
        let fetched = store.get(&id).unwrap().unwrap();
        assert_eq!(fetched.title, a.title);
        assert_eq!(fetched.content, a.content);
        assert_eq!(fetched.id, id);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let store = InMemoryArticleStore::new();
        store.put(article("http://x/1", "Breaking News", "Full story here", "S")).unwrap();
        let hits = store.search("breaking", 10).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn list_without_bias_scores_is_oldest_first() {
        let store = InMemoryArticleStore::new();
        let id1 = store.put(article("http://x/1", "T1", "C1", "S")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.put(article("http://x/2", "T2", "C2", "S")).unwrap();
        let pending = store.list_without_bias_scores(10).unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, id1);
    }
}
