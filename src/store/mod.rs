mod memory;

pub use memory::InMemoryArticleStore;

use crate::error::Result;
use crate::models::{Article, BiasScore, Language};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Outcome of a single `put` within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Stored,
    Duplicate,
}

/// Aggregate result of `put_batch`, preserving per-article outcomes (§4.2).
#[derive(Debug, Clone, Default)]
pub struct BatchPutResult {
    pub stored: usize,
    pub duplicates: usize,
    pub errors: usize,
    pub stored_ids: Vec<String>,
    pub duplicate_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    pub total: usize,
    pub analyzed: usize,
    pub unanalyzed: usize,
    pub recent_7d: usize,
    pub language_distribution: HashMap<Language, usize>,
    pub source_distribution: HashMap<String, usize>,
}

/// The abstract persistence contract the rest of the core depends on. The choice of concrete
/// datastore is out of scope (§1) -- everything above this trait depends only on these
/// operations and their documented ordering/uniqueness guarantees (§4.2).
pub trait ArticleStore: Send + Sync {
    /// Idempotent insert. Checks `url` first, then `content_hash`; returns the existing id on
    /// either collision, otherwise stores and returns a freshly assigned id.
    fn put(&self, article: Article) -> Result<String>;

    fn put_batch(&self, articles: Vec<Article>) -> Result<BatchPutResult>;

    fn get(&self, id: &str) -> Result<Option<Article>>;

    fn list_by_source(&self, source: &str, limit: usize, skip: usize) -> Result<Vec<Article>>;

    fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Article>>;

    fn list_by_topic(&self, topic: &str, limit: usize, skip: usize) -> Result<Vec<Article>>;

    /// Case-insensitive substring match over title and content -- the intended behavior, not a
    /// fallback for a missing full-text index (§9).
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>>;

    fn set_bias_scores(&self, id: &str, scores: BiasScore) -> Result<()>;

    fn set_topics(&self, id: &str, topics: Vec<String>) -> Result<()>;

    /// Oldest-first by `scraped_at`.
    fn list_without_bias_scores(&self, limit: usize) -> Result<Vec<Article>>;

    fn stats(&self) -> Result<StoreStats>;

    fn purge_older_than(&self, days: i64) -> Result<usize>;
}
