use super::scraper_trait::Scraper;
use crate::models::Article;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{info, warn};

/// Per-source health tracked by the manager (§4.9). `is_healthy` is advisory, not a gate --
/// a source with `is_healthy == false` is still attempted on subsequent calls.
#[derive(Debug, Clone)]
pub struct ScraperHealth {
    pub last_successful_scrape: Option<DateTime<Utc>>,
    pub total_articles_scraped: u64,
    pub total_errors: u64,
    pub avg_response_time_ms: f64,
    pub is_healthy: bool,
}

impl Default for ScraperHealth {
    fn default() -> Self {
        Self {
            last_successful_scrape: None,
            total_articles_scraped: 0,
            total_errors: 0,
            avg_response_time_ms: 0.0,
            is_healthy: true,
        }
    }
}

/// Diagnostic identity info for a registered adapter.
#[derive(Debug, Clone)]
pub struct ScraperInfo {
    pub source_name: String,
    pub base_url: String,
}

/// Holds a map from source id to scraper adapter and tracks per-source health (§4.9).
pub struct ScraperManager {
    scrapers: HashMap<String, Arc<dyn Scraper>>,
    health: Arc<RwLock<HashMap<String, ScraperHealth>>>,
}

impl ScraperManager {
    pub fn new() -> Self {
        Self {
            scrapers: HashMap::new(),
            health: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn register(&mut self, scraper: Arc<dyn Scraper>) {
        let source = scraper.source_name().to_string();
        self.health.write().unwrap().entry(source.clone()).or_default();
        self.scrapers.insert(source, scraper);
    }

    fn record_success(&self, source: &str, articles_scraped: usize, elapsed_ms: f64) {
        let mut guard = self.health.write().unwrap();
        let entry = guard.entry(source.to_string()).or_default();
        entry.last_successful_scrape = Some(Utc::now());
        entry.total_articles_scraped += articles_scraped as u64;
        entry.total_errors = 0;
        entry.is_healthy = true;
        entry.avg_response_time_ms = if entry.avg_response_time_ms == 0.0 {
            elapsed_ms
        } else {
            (entry.avg_response_time_ms + elapsed_ms) / 2.0
        };
    }

    fn record_failure(&self, source: &str) {
        let mut guard = self.health.write().unwrap();
        let entry = guard.entry(source.to_string()).or_default();
        entry.total_errors += 1;
        if entry.total_errors >= 3 {
            entry.is_healthy = false;
        }
    }

    /// Runs a single adapter, timing the call and updating its health record.
    pub async fn scrape_one(&self, source: &str, max_n: usize) -> Vec<Article> {
        let Some(scraper) = self.scrapers.get(source) else {
            warn!(source, "scrape_one called for unregistered source");
            return Vec::new();
        };

        let start = Instant::now();
        let articles = scraper.scrape(max_n).await;
        let elapsed_ms = start.elapsed().as_millis() as f64;

        if articles.is_empty() {
            self.record_failure(source);
        } else {
            self.record_success(source, articles.len(), elapsed_ms);
        }
        info!(source, count = articles.len(), elapsed_ms, "scrape_one complete");
        articles
    }

    /// Runs all registered adapters concurrently, up to `max_workers` in flight, collecting
    /// `{source -> [Article]}`. An adapter failure never cancels the others (§4.9).
    pub async fn scrape_all(&self, max_per_source: usize, max_workers: usize) -> HashMap<String, Vec<Article>> {
        let sources: Vec<String> = self.scrapers.keys().cloned().collect();

        let results: Vec<(String, Vec<Article>)> = stream::iter(sources)
            .map(|source| async move {
                let articles = self.scrape_one(&source, max_per_source).await;
                (source, articles)
            })
            .buffer_unordered(max_workers.max(1))
            .collect()
            .await;

        results.into_iter().collect()
    }

    pub fn health_status(&self) -> HashMap<String, ScraperHealth> {
        self.health.read().unwrap().clone()
    }

    pub fn reset_health(&self, source: Option<&str>) {
        let mut guard = self.health.write().unwrap();
        match source {
            Some(s) => {
                guard.insert(s.to_string(), ScraperHealth::default());
            }
            None => {
                for entry in guard.values_mut() {
                    *entry = ScraperHealth::default();
                }
            }
        }
    }

    pub fn scraper_info(&self) -> Vec<ScraperInfo> {
        self.scrapers
            .values()
            .map(|s| ScraperInfo {
                source_name: s.source_name().to_string(),
                base_url: s.base_url().to_string(),
            })
            .collect()
    }
}

impl Default for ScraperManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubScraper {
        name: &'static str,
        articles_per_call: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Scraper for StubScraper {
        fn source_name(&self) -> &str {
            self.name
        }
        fn base_url(&self) -> &str {
            "https://example.test"
        }
        async fn list_article_urls(&self, _max_n: usize) -> Vec<String> {
            vec!["https://example.test/news/1".to_string()]
        }
        async fn fetch_html(&self, _url: &str) -> anyhow::Result<String> {
            Ok("<html></html>".to_string())
        }
        fn extract_article(&self, _html: &str, url: &str) -> anyhow::Result<Article> {
            Ok(Article::new(url, "Stub Title Long Enough", "x".repeat(120), None, self.name, Utc::now(), Language::English))
        }
        async fn scrape(&self, _max_n: usize) -> Vec<Article> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (0..self.articles_per_call)
                .map(|i| Article::new(format!("https://example.test/news/{i}"), "Stub Title Long Enough", "x".repeat(120), None, self.name, Utc::now(), Language::English))
                .collect()
        }
    }

    #[tokio::test]
    async fn health_turns_unhealthy_after_three_failures() {
        let mut manager = ScraperManager::new();
        manager.register(Arc::new(StubScraper { name: "flaky", articles_per_call: 0, calls: AtomicUsize::new(0) }));

        for _ in 0..3 {
            manager.scrape_one("flaky", 5).await;
        }

        let health = manager.health_status();
        assert!(!health["flaky"].is_healthy);
        assert_eq!(health["flaky"].total_errors, 3);
    }

    #[tokio::test]
    async fn successful_scrape_resets_error_counter() {
        let mut manager = ScraperManager::new();
        manager.register(Arc::new(StubScraper { name: "ok", articles_per_call: 2, calls: AtomicUsize::new(0) }));

        manager.scrape_one("ok", 5).await;
        let health = manager.health_status();
        assert!(health["ok"].is_healthy);
        assert_eq!(health["ok"].total_articles_scraped, 2);
    }

    #[tokio::test]
    async fn scrape_all_collects_per_source_results() {
        let mut manager = ScraperManager::new();
        manager.register(Arc::new(StubScraper { name: "a", articles_per_call: 1, calls: AtomicUsize::new(0) }));
        manager.register(Arc::new(StubScraper { name: "b", articles_per_call: 3, calls: AtomicUsize::new(0) }));

        let results = manager.scrape_all(10, 3).await;
        assert_eq!(results["a"].len(), 1);
        assert_eq!(results["b"].len(), 3);
    }
}
